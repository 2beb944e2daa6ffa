use serde::{Deserialize, Serialize};

/// One entry on the external registry contract. Immutable once read;
/// ordering is the ascending index assigned by the ledger at write time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvenanceRecord {
    pub name: String,
    pub location: String,
    pub timestamp: u64,
    pub collector_address: String,
}

/// Records aggregated by owner name for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupedEntry {
    pub owner_name: String,
    pub batch_ids: Vec<String>,
}

/// Why live ledger data is or isn't available. Reset to `Checking` at the
/// start of every connect attempt, then resolved to exactly one terminal
/// value. Never persisted across page loads.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionStatus {
    #[default]
    Unconnected,
    Checking,
    Connected,
    NoWalletExtension,
    WrongNetwork,
    UserRejected,
    Error,
}

impl ConnectionStatus {
    pub fn is_live(self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    /// Short user-facing line for the status bar.
    pub fn message(self) -> &'static str {
        match self {
            ConnectionStatus::Unconnected => "Not connected — showing sample data",
            ConnectionStatus::Checking => "Connecting to wallet…",
            ConnectionStatus::Connected => "Connected — live registry data",
            ConnectionStatus::NoWalletExtension => {
                "No wallet extension found — showing sample data"
            }
            ConnectionStatus::WrongNetwork => {
                "Wallet is on the wrong network — showing sample data"
            }
            ConnectionStatus::UserRejected => {
                "Connection request was declined — showing sample data"
            }
            ConnectionStatus::Error => "Could not reach the registry — showing sample data",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionEvent {
    pub collector_id: String,
    pub location: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityTest {
    pub lab: String,
    pub test: String,
    pub result: String,
    pub timestamp: String,
    pub certificate_ref: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessingStep {
    pub step: String,
    pub facility: String,
    pub details: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sustainability {
    pub compliance: String,
    pub fair_trade: String,
}

/// The full farm-to-formula story shown on the customer portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TraceReport {
    pub batch_id: String,
    pub product_name: String,
    pub collection: CollectionEvent,
    pub quality_tests: Vec<QualityTest>,
    pub processing: Vec<ProcessingStep>,
    pub sustainability: Sustainability,
}

/// Demo-only registration fields kept in per-browser storage for later
/// login comparison. Carries no security contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DemoAccount {
    pub company_name: String,
    pub company_id: String,
    pub password: String,
    pub location: String,
    pub registration_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionEventInput {
    pub collector_id: String,
    pub species: String,
    pub location_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProcessingStepInput {
    pub batch_id: String,
    pub step: String,
    pub facility: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityTestInput {
    pub batch_id: String,
    pub test_name: String,
    pub result: String,
}
