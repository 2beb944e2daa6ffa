//! Capability seams for the external registry and the sequencing that
//! turns them into displayable data.
//!
//! The traits are `?Send` because the browser transport that implements
//! them is not `Send`; host-side test doubles don't mind.

use ac_types::{ConnectionStatus, GroupedEntry, ProvenanceRecord};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

/// The only network identifier the demo accepts: the local devnet chain.
pub const EXPECTED_NETWORK_ID: u64 = 31337;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("no wallet extension detected")]
    NoWalletExtension,
    #[error("wrong network: expected chain id {expected}, got {actual}")]
    WrongNetwork { expected: u64, actual: u64 },
    #[error("wallet connection request was rejected")]
    UserRejected,
    #[error("ledger read failed: {0}")]
    Read(anyhow::Error),
    #[error("ledger write failed: {0}")]
    Write(anyhow::Error),
    #[error("provider error: {0}")]
    Provider(anyhow::Error),
}

impl LedgerError {
    /// Every failure resolves to exactly one terminal status.
    pub fn status(&self) -> ConnectionStatus {
        match self {
            LedgerError::NoWalletExtension => ConnectionStatus::NoWalletExtension,
            LedgerError::WrongNetwork { .. } => ConnectionStatus::WrongNetwork,
            LedgerError::UserRejected => ConnectionStatus::UserRejected,
            LedgerError::Read(_) | LedgerError::Write(_) | LedgerError::Provider(_) => {
                ConnectionStatus::Error
            }
        }
    }
}

/// A submitted but not yet durable write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub tx_hash: String,
}

/// Access prompt and network identity of the injected wallet.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// May fail with [`LedgerError::UserRejected`] when the user declines
    /// the prompt.
    async fn request_access(&self) -> Result<(), LedgerError>;
    async fn network_id(&self) -> Result<u64, LedgerError>;
}

/// The registry contract, reduced to the four operations the demo uses.
#[async_trait(?Send)]
pub trait LedgerClient {
    async fn item_count(&self) -> Result<u64, LedgerError>;
    async fn record_at(&self, index: u64) -> Result<ProvenanceRecord, LedgerError>;
    async fn submit_record(&self, name: &str, location: &str)
    -> Result<PendingWrite, LedgerError>;
    async fn await_confirmation(&self, pending: &PendingWrite) -> Result<(), LedgerError>;
}

/// Read the count, then that many sequential indexed reads, then group.
/// Any individual read failure fails the whole operation; there is no
/// partial-success state.
pub async fn fetch_grouped<L: LedgerClient + ?Sized>(
    ledger: &L,
) -> Result<Vec<GroupedEntry>, LedgerError> {
    let count = ledger.item_count().await?;
    let mut records = Vec::with_capacity(count as usize);
    for index in 0..count {
        records.push(ledger.record_at(index).await?);
    }
    debug!(count, "fetched registry records");
    Ok(ac_roster::group_by_owner(&records))
}

/// Result of one connect attempt: the resolved terminal status, plus the
/// live entries only when it resolved to `Connected`. Callers substitute
/// the mock fallback whenever `live` is `None`.
#[derive(Debug)]
pub struct ConnectOutcome {
    pub status: ConnectionStatus,
    pub live: Option<Vec<GroupedEntry>>,
}

impl ConnectOutcome {
    fn degraded(err: LedgerError) -> Self {
        warn!(status = ?err.status(), "connect attempt failed: {err}");
        ConnectOutcome {
            status: err.status(),
            live: None,
        }
    }
}

/// One whole connect attempt: access prompt, network check, full read
/// sequence. `capability` is `None` when no wallet extension is present at
/// attempt start. Never retries; the user re-triggers explicitly.
pub async fn connect_and_fetch<C>(capability: Option<&C>) -> ConnectOutcome
where
    C: WalletProvider + LedgerClient,
{
    let Some(wallet) = capability else {
        return ConnectOutcome::degraded(LedgerError::NoWalletExtension);
    };

    if let Err(err) = wallet.request_access().await {
        return ConnectOutcome::degraded(err);
    }

    match wallet.network_id().await {
        Ok(id) if id != EXPECTED_NETWORK_ID => {
            return ConnectOutcome::degraded(LedgerError::WrongNetwork {
                expected: EXPECTED_NETWORK_ID,
                actual: id,
            });
        }
        Err(err) => return ConnectOutcome::degraded(err),
        Ok(_) => {}
    }

    match fetch_grouped(wallet).await {
        Ok(entries) => ConnectOutcome {
            status: ConnectionStatus::Connected,
            live: Some(entries),
        },
        Err(err) => ConnectOutcome::degraded(err),
    }
}

/// Submit one record, wait until it is durable, then re-run the full read
/// sequence. The ledger-backed list is never updated optimistically.
pub async fn write_and_refresh<L: LedgerClient + ?Sized>(
    ledger: &L,
    name: &str,
    location: &str,
) -> Result<Vec<GroupedEntry>, LedgerError> {
    let pending = ledger.submit_record(name, location).await?;
    ledger.await_confirmation(&pending).await?;
    fetch_grouped(ledger).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Scriptable registry double: seeded records, an optional index that
    /// fails on read, and wallet-level failure switches.
    struct FakeLedger {
        records: RefCell<Vec<ProvenanceRecord>>,
        fail_read_at: Option<u64>,
        network: u64,
        reject_access: bool,
    }

    impl FakeLedger {
        fn with_records(names: &[&str]) -> Self {
            let records = names
                .iter()
                .enumerate()
                .map(|(i, name)| ProvenanceRecord {
                    name: (*name).to_owned(),
                    location: format!("plot-{i}"),
                    timestamp: 1_726_000_000 + i as u64,
                    collector_address: "0x00000000000000000000000000000000000000aa".to_owned(),
                })
                .collect();
            FakeLedger {
                records: RefCell::new(records),
                fail_read_at: None,
                network: EXPECTED_NETWORK_ID,
                reject_access: false,
            }
        }
    }

    #[async_trait(?Send)]
    impl WalletProvider for FakeLedger {
        async fn request_access(&self) -> Result<(), LedgerError> {
            if self.reject_access {
                Err(LedgerError::UserRejected)
            } else {
                Ok(())
            }
        }

        async fn network_id(&self) -> Result<u64, LedgerError> {
            Ok(self.network)
        }
    }

    #[async_trait(?Send)]
    impl LedgerClient for FakeLedger {
        async fn item_count(&self) -> Result<u64, LedgerError> {
            Ok(self.records.borrow().len() as u64)
        }

        async fn record_at(&self, index: u64) -> Result<ProvenanceRecord, LedgerError> {
            if self.fail_read_at == Some(index) {
                return Err(LedgerError::Read(anyhow::anyhow!(
                    "revert at index {index}"
                )));
            }
            self.records
                .borrow()
                .get(index as usize)
                .cloned()
                .ok_or_else(|| LedgerError::Read(anyhow::anyhow!("index {index} out of range")))
        }

        async fn submit_record(
            &self,
            name: &str,
            location: &str,
        ) -> Result<PendingWrite, LedgerError> {
            let mut records = self.records.borrow_mut();
            records.push(ProvenanceRecord {
                name: name.to_owned(),
                location: location.to_owned(),
                timestamp: 1_726_100_000,
                collector_address: "0x00000000000000000000000000000000000000aa".to_owned(),
            });
            Ok(PendingWrite {
                tx_hash: format!("0x{:064x}", records.len()),
            })
        }

        async fn await_confirmation(&self, _pending: &PendingWrite) -> Result<(), LedgerError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn successful_reads_group_in_first_seen_order() -> anyhow::Result<()> {
        let ledger =
            FakeLedger::with_records(&["Ram Farmers Coop", "Green Valley Herbs", "Ram Farmers Coop"]);

        let outcome = connect_and_fetch(Some(&ledger)).await;

        assert_eq!(outcome.status, ConnectionStatus::Connected);
        let entries = outcome.live.expect("live entries");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].owner_name, "Ram Farmers Coop");
        assert_eq!(entries[0].batch_ids, vec!["RFC001", "RFC003"]);
        assert_eq!(entries[1].batch_ids, vec!["GVH002"]);
        Ok(())
    }

    #[tokio::test]
    async fn absent_capability_resolves_no_wallet_extension() {
        let outcome = connect_and_fetch::<FakeLedger>(None).await;
        assert_eq!(outcome.status, ConnectionStatus::NoWalletExtension);
        assert!(outcome.live.is_none());
    }

    #[tokio::test]
    async fn wrong_network_never_yields_a_partial_list() {
        let mut ledger = FakeLedger::with_records(&["Ram Farmers Coop"]);
        ledger.network = 1;

        let outcome = connect_and_fetch(Some(&ledger)).await;

        assert_eq!(outcome.status, ConnectionStatus::WrongNetwork);
        assert!(outcome.live.is_none());
    }

    #[tokio::test]
    async fn declined_prompt_resolves_user_rejected() {
        let mut ledger = FakeLedger::with_records(&[]);
        ledger.reject_access = true;

        let outcome = connect_and_fetch(Some(&ledger)).await;

        assert_eq!(outcome.status, ConnectionStatus::UserRejected);
        assert!(outcome.live.is_none());
    }

    #[tokio::test]
    async fn mid_sequence_read_failure_fails_the_whole_fetch() {
        let mut ledger = FakeLedger::with_records(&["a", "b", "c", "d"]);
        ledger.fail_read_at = Some(2);

        let outcome = connect_and_fetch(Some(&ledger)).await;

        assert_eq!(outcome.status, ConnectionStatus::Error);
        assert!(outcome.live.is_none());
    }

    #[tokio::test]
    async fn write_then_refresh_rereads_everything() -> anyhow::Result<()> {
        let ledger = FakeLedger::with_records(&["Green Valley Herbs"]);

        let entries = write_and_refresh(&ledger, "Green Valley Herbs", "Nashik").await?;

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].batch_ids, vec!["GVH001", "GVH002"]);
        Ok(())
    }

    #[test]
    fn every_error_maps_to_one_status() {
        assert_eq!(
            LedgerError::NoWalletExtension.status(),
            ConnectionStatus::NoWalletExtension
        );
        assert_eq!(
            LedgerError::WrongNetwork {
                expected: EXPECTED_NETWORK_ID,
                actual: 1
            }
            .status(),
            ConnectionStatus::WrongNetwork
        );
        assert_eq!(LedgerError::UserRejected.status(), ConnectionStatus::UserRejected);
        assert_eq!(
            LedgerError::Read(anyhow::anyhow!("boom")).status(),
            ConnectionStatus::Error
        );
        assert_eq!(
            LedgerError::Write(anyhow::anyhow!("boom")).status(),
            ConnectionStatus::Error
        );
    }
}
