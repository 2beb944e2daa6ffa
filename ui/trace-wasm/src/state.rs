//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Transitions on this state are plain functions so they also run under
//! host-side tests; nothing in this module touches the DOM.

use ac_types::{ConnectionStatus, GroupedEntry, TraceReport};
use std::cell::RefCell;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Home,
    CustomerPortal,
    CompanyLogin,
    CompanyRegister,
    CompanyPortal,
    QualityReview,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PortalTab {
    #[default]
    Dashboard,
    Collection,
    Processing,
    Quality,
}

#[derive(Clone, Debug, Default)]
pub struct CustomerState {
    pub batch_id: String,
    pub file_name: Option<String>,
    pub report: Option<TraceReport>,
}

/// Placeholder certificate upload progress on the quality-test form.
#[derive(Clone, Debug, Default)]
pub struct UploadState {
    pub file_name: String,
    pub in_progress: bool,
    pub certificate_hash: Option<String>,
}

/// Central application state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub page: Page,
    pub portal_tab: PortalTab,
    pub captcha: String,
    pub customer: CustomerState,
    pub upload: Option<UploadState>,
    pub roster: Vec<GroupedEntry>,
    pub selection: BTreeSet<String>,
    pub status: ConnectionStatus,
    pub connect_in_flight: bool,
    pub provider_available: bool,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            page: Page::default(),
            portal_tab: PortalTab::default(),
            captcha: String::new(),
            customer: CustomerState::default(),
            upload: None,
            roster: ac_roster::seed_roster(),
            selection: BTreeSet::new(),
            status: ConnectionStatus::Unconnected,
            connect_in_flight: false,
            provider_available: false,
        }
    }
}

// ── Pure transitions ──

/// Start a connect attempt: re-enter `Checking` from any prior terminal
/// state. Returns `false` (and changes nothing) while another attempt is
/// in flight — overlapping attempts are ignored, not queued.
pub fn begin_connect(state: &mut AppState) -> bool {
    if state.connect_in_flight {
        return false;
    }
    state.connect_in_flight = true;
    state.status = ConnectionStatus::Checking;
    true
}

/// Resolve the attempt: install live entries on success, substitute the
/// mock fallback otherwise. The selection only keeps ids that still exist
/// in the new list.
pub fn finish_connect(
    state: &mut AppState,
    status: ConnectionStatus,
    live: Option<Vec<GroupedEntry>>,
) {
    state.connect_in_flight = false;
    state.status = status;
    state.roster = live.unwrap_or_else(ac_roster::seed_roster);
    let surviving: BTreeSet<String> = state
        .roster
        .iter()
        .flat_map(|entry| entry.batch_ids.iter().cloned())
        .collect();
    state.selection.retain(|id| surviving.contains(id));
}

pub fn toggle_selection(state: &mut AppState, batch_id: &str, checked: bool) {
    if checked {
        state.selection.insert(batch_id.to_owned());
    } else {
        state.selection.remove(batch_id);
    }
}

// ── Thread-local singleton ──

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn page() -> Page {
    with(|s| s.page)
}

pub fn set_page(page: Page) {
    with_mut(|s| s.page = page);
}

pub fn portal_tab() -> PortalTab {
    with(|s| s.portal_tab)
}

pub fn set_portal_tab(tab: PortalTab) {
    with_mut(|s| s.portal_tab = tab);
}

pub fn captcha() -> String {
    with(|s| s.captcha.clone())
}

pub fn set_captcha(challenge: String) {
    with_mut(|s| s.captcha = challenge);
}

pub fn status() -> ConnectionStatus {
    with(|s| s.status)
}

pub fn roster() -> Vec<GroupedEntry> {
    with(|s| s.roster.clone())
}

pub fn selection() -> BTreeSet<String> {
    with(|s| s.selection.clone())
}

pub fn provider_available() -> bool {
    with(|s| s.provider_available)
}

pub fn set_provider_available(available: bool) {
    with_mut(|s| s.provider_available = available);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn live_entries() -> Vec<GroupedEntry> {
        vec![GroupedEntry {
            owner_name: "Green Valley Herbs".to_owned(),
            batch_ids: vec!["GVH001".to_owned()],
        }]
    }

    #[test]
    fn overlapping_connect_attempts_are_ignored() {
        let mut state = AppState::default();

        assert!(begin_connect(&mut state));
        assert_eq!(state.status, ConnectionStatus::Checking);
        assert!(!begin_connect(&mut state));

        finish_connect(&mut state, ConnectionStatus::Connected, Some(live_entries()));
        assert!(!state.connect_in_flight);
        assert!(begin_connect(&mut state));
    }

    #[test]
    fn failed_connect_substitutes_the_seed_and_never_a_partial_list() {
        let mut state = AppState::default();
        state.roster = live_entries();

        begin_connect(&mut state);
        finish_connect(&mut state, ConnectionStatus::WrongNetwork, None);

        assert_eq!(state.status, ConnectionStatus::WrongNetwork);
        assert_eq!(state.roster, ac_roster::seed_roster());
    }

    #[test]
    fn successful_connect_replaces_the_mock_list_without_merging() {
        let mut state = AppState::default();
        state.selection.insert("RMF001".to_owned());

        begin_connect(&mut state);
        finish_connect(&mut state, ConnectionStatus::Connected, Some(live_entries()));

        assert_eq!(state.roster, live_entries());
        // RMF001 no longer exists in the displayed list, so it cannot
        // linger in the selection.
        assert!(state.selection.is_empty());
    }

    #[test]
    fn selection_toggle_inserts_and_removes() {
        let mut state = AppState::default();

        toggle_selection(&mut state, "RMF001", true);
        toggle_selection(&mut state, "GVH003", true);
        toggle_selection(&mut state, "RMF001", false);

        assert_eq!(state.selection.len(), 1);
        assert!(state.selection.contains("GVH003"));
    }
}
