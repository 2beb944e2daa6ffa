//! Customer trace portal: batch-id entry, the simulated QR scan, and the
//! provenance timeline.

use crate::dom::{self, Elements};
use crate::events::{on_change, on_click};
use crate::state;
use crate::uploads;
use ac_types::TraceReport;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

pub fn render(els: &Elements) {
    let (batch_id, file_name, report) = state::with(|s| {
        (
            s.customer.batch_id.clone(),
            s.customer.file_name.clone(),
            s.customer.report.clone(),
        )
    });

    let file_line = match &file_name {
        Some(name) => format!(
            r#"<p class="file-name-display">Selected file: {}</p>"#,
            dom::escape_html(name)
        ),
        None => String::new(),
    };

    let report_html = report.as_ref().map(render_report).unwrap_or_default();

    let html = format!(
        r#"
        <div class="customer-portal">
          <div class="scan-section">
            <h2>Trace Your Herb's Journey</h2>
            <p>Scan the QR code on your product to reveal its complete story from farm to you.</p>
            <div class="scan-input">
              <input type="text" id="batchIdInput" value="{batch}" placeholder="Enter Batch ID (e.g., ASHWA-001)" />
              <label class="qr-upload-label btn secondary">📷 Upload QR
                <input type="file" id="qrFileInput" accept="image/*" style="display:none" />
              </label>
            </div>
            {file_line}
            <button id="traceBtn" class="btn primary trace-btn">Trace Product</button>
          </div>
          {report_html}
        </div>
        "#,
        batch = dom::escape_html(&batch_id),
    );
    dom::set_inner_html(&els.content, &html);

    wire(els);
}

fn render_report(report: &TraceReport) -> String {
    let tests: String = report
        .quality_tests
        .iter()
        .map(|t| {
            format!(
                r#"<div class="test-result"><p><strong>{}:</strong> {} by {}</p>
                   <span class="cert-ref">Certificate ref: {}</span></div>"#,
                t.test, t.result, t.lab, t.certificate_ref
            )
        })
        .collect();
    let steps: String = report
        .processing
        .iter()
        .map(|p| format!(r#"<p><strong>{}:</strong> {} at {}</p>"#, p.step, p.details, p.facility))
        .collect();

    format!(
        r#"
        <div class="provenance-details">
          <h3>Provenance for Batch: {batch}</h3>
          <h4>{product}</h4>
          <div class="timeline">
            <div class="timeline-item">
              <div class="timeline-icon">🌱</div>
              <div class="timeline-content">
                <h5>Collection</h5>
                <p><strong>Collector:</strong> {collector}</p>
                <p><strong>Location:</strong> {location}</p>
                <p><strong>Date:</strong> {collected_at}</p>
              </div>
            </div>
            <div class="timeline-item">
              <div class="timeline-icon">🔬</div>
              <div class="timeline-content"><h5>Quality Testing</h5>{tests}</div>
            </div>
            <div class="timeline-item">
              <div class="timeline-icon">⚙️</div>
              <div class="timeline-content"><h5>Processing</h5>{steps}</div>
            </div>
            <div class="timeline-item">
              <div class="timeline-icon">🌍</div>
              <div class="timeline-content">
                <h5>Sustainability</h5>
                <p>{compliance}</p>
                <p>{fair_trade}</p>
              </div>
            </div>
          </div>
        </div>
        "#,
        batch = dom::escape_html(&report.batch_id),
        product = report.product_name,
        collector = report.collection.collector_id,
        location = report.collection.location,
        collected_at = report.collection.timestamp,
        compliance = report.sustainability.compliance,
        fair_trade = report.sustainability.fair_trade,
    )
}

fn wire(els: &Elements) {
    if let Some(btn) = dom::by_id("traceBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| {
            let batch_id = dom::input_value("batchIdInput");
            if batch_id.is_empty() {
                dom::alert(
                    "Please enter a Batch ID or upload a QR code image to trace the product.",
                );
                return;
            }
            state::with_mut(|s| {
                s.customer.batch_id = batch_id.clone();
                s.customer.report = Some(ac_roster::sample_trace_report(&batch_id));
            });
            render(&els2);
        });
    }

    if let Some(input) = dom::by_id("qrFileInput") {
        let els2 = els.clone();
        on_change(&input, move |event| {
            let Some(target) = event.target() else { return };
            let Ok(file_input) = target.dyn_into::<HtmlInputElement>() else {
                return;
            };
            let Some(file) = file_input.files().and_then(|list| list.item(0)) else {
                return;
            };
            let file_name = file.name();
            state::with_mut(|s| s.customer.file_name = Some(file_name.clone()));
            render(&els2);

            // Simulated scan: nothing is decoded, the result is canned.
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                TimeoutFuture::new(uploads::QR_SCAN_DELAY_MS).await;
                dom::alert(&format!(
                    "QR Code from \"{file_name}\" scanned successfully! Batch ID \"{}\" found.",
                    uploads::SCANNED_BATCH_ID
                ));
                state::with_mut(|s| s.customer.batch_id = uploads::SCANNED_BATCH_ID.to_owned());
                if state::page() == crate::state::Page::CustomerPortal {
                    render(&els3);
                }
            });
        });
    }
}
