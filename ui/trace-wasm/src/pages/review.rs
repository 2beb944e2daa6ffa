//! Quality-review page: connect status, the grouped batch list (live or
//! mock), the approval flow, and the add-batch form.
//!
//! This is the only page that talks to the registry. Every connect
//! attempt re-enters `Checking` and resolves to one terminal status; any
//! failure substitutes the mock fallback list.

use crate::dom::{self, Elements};
use crate::events::{on_change, on_click};
use crate::state::{self, Page};
use crate::wallet;
use ac_types::ConnectionStatus;
use gloo_console::log;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

pub fn render(els: &Elements) {
    let (status, roster, selection, provider_available) = state::with(|s| {
        (
            s.status,
            s.roster.clone(),
            s.selection.clone(),
            s.provider_available,
        )
    });

    let owners: String = roster
        .iter()
        .map(|entry| {
            let checks: String = entry
                .batch_ids
                .iter()
                .map(|id| {
                    let checked = if selection.contains(id) { "checked" } else { "" };
                    let id_html = dom::escape_html(id);
                    format!(
                        r#"<label class="batch-row">
                             <input type="checkbox" class="batch-check" data-batch="{id_html}" {checked} />
                             <span>{id_html}</span>
                           </label>"#
                    )
                })
                .collect();
            format!(
                r#"<div class="owner-card"><h4>{}</h4>{checks}</div>"#,
                dom::escape_html(&entry.owner_name)
            )
        })
        .collect();

    let hint = if provider_available {
        String::new()
    } else {
        r#"<p class="wallet-hint">No wallet extension detected yet — connect will fall back to sample data.</p>"#
            .to_owned()
    };
    let connect_label = if status == ConnectionStatus::Connected {
        "Refresh from Registry"
    } else {
        "Connect Wallet"
    };
    let status_class = if status.is_live() { "live" } else { "degraded" };

    let html = format!(
        r#"
        <div class="review-page">
          <div class="status-bar">
            <span class="status {status_class}">{status_msg}</span>
            <button id="connectBtn" class="btn secondary">{connect_label}</button>
          </div>
          {hint}
          <div class="review-list">
            <h2>Batches Awaiting Quality Review</h2>
            {owners}
            <button id="approveBtn" class="btn primary">Approve Selected</button>
          </div>
          <div class="data-form add-batch-form">
            <h3>Record New Batch</h3>
            <label>Owner / Collector Name</label>
            <input type="text" id="addOwnerInput" />
            <label>Collection Location</label>
            <input type="text" id="addLocationInput" />
            <button id="addBatchBtn" class="btn primary">Add Batch</button>
          </div>
        </div>
        "#,
        status_msg = status.message(),
    );
    dom::set_inner_html(&els.content, &html);

    wire(els);
}

fn wire(els: &Elements) {
    if let Some(btn) = dom::by_id("connectBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| {
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                connect_flow(els3).await;
            });
        });
    }

    for check in dom::query_all_within(&els.content, ".batch-check") {
        let batch_id = check.get_attribute("data-batch").unwrap_or_default();
        on_change(&check, move |event| {
            let checked = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.checked())
                .unwrap_or(false);
            state::with_mut(|s| state::toggle_selection(s, &batch_id, checked));
        });
    }

    if let Some(btn) = dom::by_id("approveBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| handle_approve(&els2));
    }

    if let Some(btn) = dom::by_id("addBatchBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| handle_add(&els2));
    }
}

/// One whole connect attempt. Overlapping attempts are ignored while one
/// is in flight; there is no automatic retry.
pub async fn connect_flow(els: Elements) {
    let started = state::with_mut(state::begin_connect);
    if !started {
        log!("connect attempt already in flight; ignoring");
        return;
    }
    render(&els);

    let provider = wallet::detect();
    let outcome = ac_ledger::connect_and_fetch(provider.as_ref()).await;
    state::with_mut(|s| state::finish_connect(s, outcome.status, outcome.live));
    // The user may have navigated away while the attempt ran.
    if state::page() == Page::QualityReview {
        render(&els);
    }
}

fn handle_approve(els: &Elements) {
    let result = state::with_mut(|s| {
        let mut selection = s.selection.clone();
        let outcome = ac_roster::approve_selected(&mut s.roster, &mut selection);
        s.selection = selection;
        outcome
    });

    match result {
        Ok(count) => {
            dom::alert(&format!("{count} batch(es) approved for sale."));
            render(els);
        }
        Err(err) => dom::alert(&err.to_string()),
    }
}

fn handle_add(els: &Elements) {
    let owner = dom::input_value("addOwnerInput");
    let location = dom::input_value("addLocationInput");
    if owner.is_empty() || location.is_empty() {
        dom::alert("Owner name and location are required.");
        return;
    }

    if state::status().is_live() {
        let els2 = els.clone();
        wasm_bindgen_futures::spawn_local(async move {
            add_live(els2, owner, location).await;
        });
    } else {
        // Mock mode: optimistic local mutation, never reconciled later.
        let id = state::with_mut(|s| ac_roster::add_local_batch(&mut s.roster, &owner));
        dom::alert(&format!("Batch {id} added to the local demo list."));
        render(els);
    }
}

/// Submit the record, wait for confirmation, then re-read everything.
/// The ledger-backed list is never updated optimistically.
async fn add_live(els: Elements, owner: String, location: String) {
    let Some(provider) = wallet::detect() else {
        dom::alert(ConnectionStatus::NoWalletExtension.message());
        return;
    };
    if let Err(err) = ac_ledger::WalletProvider::request_access(&provider).await {
        dom::alert(&err.to_string());
        return;
    }

    match ac_ledger::write_and_refresh(&provider, &owner, &location).await {
        Ok(entries) => {
            state::with_mut(|s| state::finish_connect(s, ConnectionStatus::Connected, Some(entries)));
            dom::alert("Batch recorded on the registry.");
            if state::page() == Page::QualityReview {
                render(&els);
            }
        }
        Err(err) => {
            dom::alert(&err.to_string());
            // Only the read path degrades to mock data; a failed write
            // leaves the displayed list untouched.
            if matches!(err, ac_ledger::LedgerError::Read(_)) {
                state::with_mut(|s| state::finish_connect(s, err.status(), None));
                if state::page() == Page::QualityReview {
                    render(&els);
                }
            }
        }
    }
}
