//! Company portal: dashboard plus the three data-entry forms.
//!
//! The forms acknowledge and reset; nothing is persisted. The quality
//! form's certificate selection only ever produces a placeholder hash.

use crate::dom::{self, Elements};
use crate::events::on_click;
use crate::state::{self, PortalTab, UploadState};
use crate::uploads;
use ac_types::{CollectionEventInput, ProcessingStepInput, QualityTestInput};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement};

pub fn render(els: &Elements) {
    let tab = state::portal_tab();
    let content = match tab {
        PortalTab::Dashboard => dashboard_html(),
        PortalTab::Collection => collection_html(),
        PortalTab::Processing => processing_html(),
        PortalTab::Quality => quality_html(),
    };

    let html = format!(
        r#"
        <div class="company-portal">
          <div class="company-nav">
            <button id="tabDashboard" class="{d}">Dashboard</button>
            <button id="tabCollection" class="{c}">Add Collection Event</button>
            <button id="tabProcessing" class="{p}">Update Processing Step</button>
            <button id="tabQuality" class="{q}">Add Quality Test</button>
          </div>
          <div class="company-content">{content}</div>
        </div>
        "#,
        d = active(tab, PortalTab::Dashboard),
        c = active(tab, PortalTab::Collection),
        p = active(tab, PortalTab::Processing),
        q = active(tab, PortalTab::Quality),
    );
    dom::set_inner_html(&els.content, &html);

    wire_tab(els, "tabDashboard", PortalTab::Dashboard);
    wire_tab(els, "tabCollection", PortalTab::Collection);
    wire_tab(els, "tabProcessing", PortalTab::Processing);
    wire_tab(els, "tabQuality", PortalTab::Quality);

    match tab {
        PortalTab::Dashboard => {}
        PortalTab::Collection => wire_collection(els),
        PortalTab::Processing => wire_processing(els),
        PortalTab::Quality => wire_quality(els),
    }
}

fn active(current: PortalTab, tab: PortalTab) -> &'static str {
    if current == tab { "active" } else { "" }
}

fn wire_tab(els: &Elements, id: &str, tab: PortalTab) {
    if let Some(btn) = dom::by_id(id) {
        let els2 = els.clone();
        on_click(&btn, move |_| {
            state::set_portal_tab(tab);
            render(&els2);
        });
    }
}

fn dashboard_html() -> String {
    r#"
    <div class="dashboard">
      <h2>Supply Chain Overview</h2>
      <div class="stats-grid">
        <div class="stat-card"><h3>Batches in Transit</h3><p>42</p></div>
        <div class="stat-card"><h3>Pending Quality Tests</h3><p>8</p></div>
        <div class="stat-card"><h3>Completed Products</h3><p>1,250</p></div>
      </div>
      <h4>Recent Activity</h4>
      <ul>
        <li>Batch ASHWA-002 completed quality testing.</li>
        <li>New collection event added by FARM007.</li>
        <li>Batch BRAHMI-011 moved to processing.</li>
      </ul>
    </div>
    "#
    .to_owned()
}

fn collection_html() -> String {
    r#"
    <div class="data-form">
      <h3>Record New Collection Event</h3>
      <label>Collector ID</label>
      <input type="text" id="collectorIdInput" />
      <label>Species</label>
      <input type="text" id="speciesInput" />
      <label>Location Name (e.g., Neemuch, MP)</label>
      <input type="text" id="locationNameInput" />
      <button id="collectionSubmitBtn" class="btn primary">Submit Event</button>
    </div>
    "#
    .to_owned()
}

fn wire_collection(els: &Elements) {
    if let Some(btn) = dom::by_id("collectionSubmitBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| {
            let input = CollectionEventInput {
                collector_id: dom::input_value("collectorIdInput"),
                species: dom::input_value("speciesInput"),
                location_name: dom::input_value("locationNameInput"),
            };
            if input.collector_id.is_empty()
                || input.species.is_empty()
                || input.location_name.is_empty()
            {
                dom::alert("All fields are required.");
                return;
            }
            dom::alert(&format!(
                "New Collection Event Submitted:\nCollector: {}\nSpecies: {}\nLocation: {}",
                input.collector_id, input.species, input.location_name
            ));
            render(&els2);
        });
    }
}

fn processing_html() -> String {
    r#"
    <div class="data-form">
      <h3>Update Processing Step</h3>
      <label>Batch ID</label>
      <input type="text" id="procBatchIdInput" />
      <label>Processing Step (e.g., Drying, Grinding)</label>
      <input type="text" id="procStepInput" />
      <label>Facility Name</label>
      <input type="text" id="procFacilityInput" />
      <button id="processingSubmitBtn" class="btn primary">Update Step</button>
    </div>
    "#
    .to_owned()
}

fn wire_processing(els: &Elements) {
    if let Some(btn) = dom::by_id("processingSubmitBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| {
            let input = ProcessingStepInput {
                batch_id: dom::input_value("procBatchIdInput"),
                step: dom::input_value("procStepInput"),
                facility: dom::input_value("procFacilityInput"),
            };
            if input.batch_id.is_empty() || input.step.is_empty() || input.facility.is_empty() {
                dom::alert("All fields are required.");
                return;
            }
            dom::alert(&format!(
                "Processing Step Added:\nBatch ID: {}\nStep: {}\nFacility: {}",
                input.batch_id, input.step, input.facility
            ));
            render(&els2);
        });
    }
}

fn quality_html() -> String {
    let upload = state::with(|s| s.upload.clone());
    let status_line = match &upload {
        Some(u) if u.in_progress => format!(
            r#"<p class="upload-status">Uploading "{}"…</p>"#,
            dom::escape_html(&u.file_name)
        ),
        Some(u) => match &u.certificate_hash {
            Some(hash) => format!(
                r#"<p class="upload-status">✅ Upload Complete!</p>
                   <p class="cert-hash">Certificate ref: {hash}</p>"#
            ),
            None => String::new(),
        },
        None => String::new(),
    };

    format!(
        r#"
        <div class="data-form">
          <h3>Add Quality Test Result</h3>
          <label>Batch ID</label>
          <input type="text" id="qualBatchIdInput" />
          <label>Test Name</label>
          <input type="text" id="qualTestNameInput" />
          <label>Result</label>
          <select id="qualResultSelect">
            <option value="Pass">Pass</option>
            <option value="Fail">Fail</option>
          </select>
          <label>Upload Certificate (PDF)</label>
          <input type="file" id="certFileInput" accept=".pdf" />
          {status_line}
          <button id="qualitySubmitBtn" class="btn primary">Add Result</button>
        </div>
        "#
    )
}

fn wire_quality(els: &Elements) {
    if let Some(btn) = dom::by_id("qualitySubmitBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| {
            let Some(file_input) = dom::by_id_typed::<HtmlInputElement>("certFileInput") else {
                return;
            };
            let Some(file) = file_input.files().and_then(|list| list.item(0)) else {
                dom::alert("Please select a certificate PDF to upload.");
                return;
            };

            let input = QualityTestInput {
                batch_id: dom::input_value("qualBatchIdInput"),
                test_name: dom::input_value("qualTestNameInput"),
                result: dom::by_id("qualResultSelect")
                    .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
                    .map(|sel| dom::get_select_value(&sel))
                    .unwrap_or_else(|| "Pass".to_owned()),
            };
            if input.batch_id.is_empty() || input.test_name.is_empty() {
                dom::alert("All fields are required.");
                return;
            }

            state::with_mut(|s| {
                s.upload = Some(UploadState {
                    file_name: file.name(),
                    in_progress: true,
                    certificate_hash: None,
                })
            });
            render(&els2);

            // Placeholder acknowledgment only; the PDF is never read.
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                TimeoutFuture::new(uploads::CERT_UPLOAD_DELAY_MS).await;
                let hash = uploads::placeholder_certificate_hash();
                state::with_mut(|s| {
                    if let Some(upload) = s.upload.as_mut() {
                        upload.in_progress = false;
                        upload.certificate_hash = Some(hash.clone());
                    }
                });
                dom::alert(&format!(
                    "Quality Test Added:\nBatch ID: {}\nTest: {}\nResult: {}\nCertificate ref: {hash}",
                    input.batch_id, input.test_name, input.result
                ));
                if state::page() == crate::state::Page::CompanyPortal {
                    render(&els3);
                }
            });
        });
    }
}
