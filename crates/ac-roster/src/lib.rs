//! The displayed batch roster: grouping, the mock fallback seed, and the
//! quality-review mutations that apply to whichever list is on screen.

use ac_types::{
    CollectionEvent, GroupedEntry, ProcessingStep, ProvenanceRecord, QualityTest, Sustainability,
    TraceReport,
};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("select at least one batch before submitting")]
    EmptySelection,
}

/// Derive the display batch id for a record: owner initials plus the
/// 1-based ledger index, zero-padded. The registry itself stores no id.
pub fn batch_id(owner_name: &str, index: u64) -> String {
    let prefix: String = owner_name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    let prefix = if prefix.is_empty() {
        "BAT".to_owned()
    } else {
        prefix
    };
    format!("{prefix}{:03}", index + 1)
}

/// Group records by owner name, preserving first-seen order of distinct
/// names. Batch ids within an owner keep ascending read-index order, so an
/// owner appears at most once and never out of order.
pub fn group_by_owner(records: &[ProvenanceRecord]) -> Vec<GroupedEntry> {
    let mut grouped: Vec<GroupedEntry> = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let id = batch_id(&record.name, index as u64);
        match grouped.iter_mut().find(|e| e.owner_name == record.name) {
            Some(entry) => entry.batch_ids.push(id),
            None => grouped.push(GroupedEntry {
                owner_name: record.name.clone(),
                batch_ids: vec![id],
            }),
        }
    }
    grouped
}

/// The fixed fallback list shown whenever live data is unavailable.
pub fn seed_roster() -> Vec<GroupedEntry> {
    vec![
        GroupedEntry {
            owner_name: "Ram Farmers Coop".to_owned(),
            batch_ids: vec!["RMF001".to_owned(), "RMF002".to_owned()],
        },
        GroupedEntry {
            owner_name: "Green Valley Herbs".to_owned(),
            batch_ids: vec!["GVH003".to_owned()],
        },
        GroupedEntry {
            owner_name: "Surya Herb Traders".to_owned(),
            batch_ids: vec!["SHT004".to_owned()],
        },
    ]
}

/// Next free numeric suffix across the whole roster. Approvals can remove
/// earlier ids, so a plain count would mint duplicates.
fn next_batch_number(roster: &[GroupedEntry]) -> u64 {
    roster
        .iter()
        .flat_map(|entry| entry.batch_ids.iter())
        .filter_map(|id| {
            let digits: String = id.chars().skip_while(|c| !c.is_ascii_digit()).collect();
            digits.parse::<u64>().ok()
        })
        .max()
        .map_or(1, |n| n + 1)
}

/// Mock-mode add: mutate the local list directly. Returns the minted id.
/// Never reconciled with the live ledger; a later successful connect
/// replaces the whole list.
pub fn add_local_batch(roster: &mut Vec<GroupedEntry>, owner_name: &str) -> String {
    let id = batch_id(owner_name, next_batch_number(roster) - 1);
    match roster.iter_mut().find(|e| e.owner_name == owner_name) {
        Some(entry) => entry.batch_ids.push(id.clone()),
        None => roster.push(GroupedEntry {
            owner_name: owner_name.to_owned(),
            batch_ids: vec![id.clone()],
        }),
    }
    debug!(owner = owner_name, batch = %id, "added local batch");
    id
}

/// Simulated approval: remove every selected id from its owner, drop owners
/// left empty, clear the selection. An empty selection is rejected without
/// touching the roster. Returns how many ids were removed.
pub fn approve_selected(
    roster: &mut Vec<GroupedEntry>,
    selection: &mut BTreeSet<String>,
) -> Result<usize, RosterError> {
    if selection.is_empty() {
        return Err(RosterError::EmptySelection);
    }

    let mut removed = 0;
    for entry in roster.iter_mut() {
        let before = entry.batch_ids.len();
        entry.batch_ids.retain(|id| !selection.contains(id));
        removed += before - entry.batch_ids.len();
    }
    roster.retain(|entry| !entry.batch_ids.is_empty());
    selection.clear();
    Ok(removed)
}

/// Canned provenance story for the customer portal. There is no lookup
/// backend; every traced batch tells the same journey under its own id.
pub fn sample_trace_report(batch_id: &str) -> TraceReport {
    TraceReport {
        batch_id: batch_id.to_owned(),
        product_name: "Ashwagandha Root Powder".to_owned(),
        collection: CollectionEvent {
            collector_id: "FARM00123".to_owned(),
            location: "Neemuch, Madhya Pradesh".to_owned(),
            timestamp: "2024-09-15T08:30:00Z".to_owned(),
        },
        quality_tests: vec![
            QualityTest {
                lab: "AyurLabs Pvt. Ltd.".to_owned(),
                test: "Pesticide Analysis".to_owned(),
                result: "Pass".to_owned(),
                timestamp: "2024-09-18T14:00:00Z".to_owned(),
                certificate_ref: "QmXoW8...a45B".to_owned(),
            },
            QualityTest {
                lab: "GeoChem Labs".to_owned(),
                test: "DNA Barcoding".to_owned(),
                result: "Verified: Withania somnifera".to_owned(),
                timestamp: "2024-09-19T11:20:00Z".to_owned(),
                certificate_ref: "QmYv9N...c89F".to_owned(),
            },
        ],
        processing: vec![
            ProcessingStep {
                step: "Drying".to_owned(),
                facility: "SunHarvest Co.".to_owned(),
                details: "Sun-dried for 72 hours".to_owned(),
                timestamp: "2024-09-20T10:00:00Z".to_owned(),
            },
            ProcessingStep {
                step: "Grinding".to_owned(),
                facility: "SunHarvest Co.".to_owned(),
                details: "Cryogenic grinding to preserve nutrients".to_owned(),
                timestamp: "2024-09-23T16:00:00Z".to_owned(),
            },
        ],
        sustainability: Sustainability {
            compliance: "NMPB Good Collection Practices Certified".to_owned(),
            fair_trade: "Verified Fair Trade Sourcing".to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ProvenanceRecord {
        ProvenanceRecord {
            name: name.to_owned(),
            location: "Neemuch".to_owned(),
            timestamp: 1_726_000_000,
            collector_address: "0x0000000000000000000000000000000000000001".to_owned(),
        }
    }

    #[test]
    fn grouping_preserves_first_seen_owner_order() {
        let records = vec![
            record("Ram Farmers Coop"),
            record("Green Valley Herbs"),
            record("Ram Farmers Coop"),
            record("Surya Herb Traders"),
        ];

        let grouped = group_by_owner(&records);

        let owners: Vec<&str> = grouped.iter().map(|e| e.owner_name.as_str()).collect();
        assert_eq!(
            owners,
            ["Ram Farmers Coop", "Green Valley Herbs", "Surya Herb Traders"]
        );
        // Batch ids follow ascending read index, so the interleaved Ram
        // record lands after the first one within its owner.
        assert_eq!(grouped[0].batch_ids, vec!["RFC001", "RFC003"]);
        assert_eq!(grouped[1].batch_ids, vec!["GVH002"]);
        assert_eq!(grouped[2].batch_ids, vec!["SHT004"]);
    }

    #[test]
    fn grouping_lists_each_owner_at_most_once() {
        let records = vec![
            record("Green Valley Herbs"),
            record("Green Valley Herbs"),
            record("Green Valley Herbs"),
        ];

        let grouped = group_by_owner(&records);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].batch_ids.len(), 3);
    }

    #[test]
    fn empty_selection_is_rejected_without_mutation() {
        let mut roster = seed_roster();
        let snapshot = roster.clone();
        let mut selection = BTreeSet::new();

        let err = approve_selected(&mut roster, &mut selection).unwrap_err();

        assert_eq!(err, RosterError::EmptySelection);
        assert_eq!(roster, snapshot);
    }

    #[test]
    fn approval_removes_selected_ids_and_empty_owners() {
        let mut roster = vec![
            GroupedEntry {
                owner_name: "Ram Farmers Coop".to_owned(),
                batch_ids: vec!["RMF001".to_owned(), "RMF002".to_owned()],
            },
            GroupedEntry {
                owner_name: "Green Valley Herbs".to_owned(),
                batch_ids: vec!["GVH003".to_owned()],
            },
        ];
        let mut selection: BTreeSet<String> = ["GVH003".to_owned()].into_iter().collect();

        let removed = approve_selected(&mut roster, &mut selection).unwrap();

        assert_eq!(removed, 1);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].owner_name, "Ram Farmers Coop");
        assert_eq!(roster[0].batch_ids, vec!["RMF001", "RMF002"]);
        assert!(selection.is_empty());
    }

    #[test]
    fn approval_across_owners_removes_exactly_the_selection() {
        let mut roster = seed_roster();
        let mut selection: BTreeSet<String> =
            ["RMF001".to_owned(), "SHT004".to_owned()].into_iter().collect();

        let removed = approve_selected(&mut roster, &mut selection).unwrap();

        assert_eq!(removed, 2);
        let owners: Vec<&str> = roster.iter().map(|e| e.owner_name.as_str()).collect();
        assert_eq!(owners, ["Ram Farmers Coop", "Green Valley Herbs"]);
        assert_eq!(roster[0].batch_ids, vec!["RMF002"]);
    }

    #[test]
    fn local_add_appends_to_existing_owner() {
        let mut roster = seed_roster();

        let id = add_local_batch(&mut roster, "Ram Farmers Coop");

        assert_eq!(id, "RFC005");
        assert_eq!(roster[0].batch_ids.last().unwrap(), "RFC005");
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn local_add_creates_new_owner_and_skips_removed_numbers() {
        let mut roster = seed_roster();
        let mut selection: BTreeSet<String> = ["SHT004".to_owned()].into_iter().collect();
        approve_selected(&mut roster, &mut selection).unwrap();

        // Highest surviving suffix is 3, so the next mint is 4 even though
        // an id numbered 4 existed before approval removed it.
        let id = add_local_batch(&mut roster, "Himalayan Root Collective");

        assert_eq!(id, "HRC004");
        assert_eq!(roster.last().unwrap().owner_name, "Himalayan Root Collective");
    }

    #[test]
    fn batch_id_prefix_falls_back_for_blank_owner() {
        assert_eq!(batch_id("", 0), "BAT001");
        assert_eq!(batch_id("Green Valley Herbs", 2), "GVH003");
    }
}
