//! Landing page: hero copy plus entry points for each persona.

use crate::dom::{self, Elements};
use crate::events::{self, on_click};
use crate::state::Page;

pub fn render(els: &Elements) {
    let html = r#"
    <div class="home-page">
      <section class="hero" role="region" aria-label="Main hero">
        <div class="hero-text">
          <h1>From Farm to Formula 🌱</h1>
          <p class="tagline">"Knowing an herb's journey is the first step toward trusting what you take."</p>
          <p class="lead">Experience 100% transparency in Ayurvedic herbs — trace every step from the farmer's field to your medicine pack using Blockchain &amp; QR codes.</p>
          <div class="buttons">
            <button id="homeTraceBtn" class="btn primary">🔎 Trace a Product</button>
            <button id="homeLoginBtn" class="btn secondary">🏢 Company Login</button>
            <button id="homeReviewBtn" class="btn secondary">✅ Quality Review</button>
          </div>
        </div>
        <div class="hero-image" aria-hidden="true">
          <img src="https://placehold.co/420x260/e9fce9/0f2b1b?text=Ayur+Chain+Image" alt="Ayurvedic herbs" />
        </div>
      </section>
    </div>
    "#;
    dom::set_inner_html(&els.content, html);

    wire(els, "homeTraceBtn", Page::CustomerPortal);
    wire(els, "homeLoginBtn", Page::CompanyLogin);
    wire(els, "homeReviewBtn", Page::QualityReview);
}

fn wire(els: &Elements, id: &str, target: Page) {
    if let Some(btn) = dom::by_id(id) {
        let els2 = els.clone();
        on_click(&btn, move |_| events::navigate(&els2, target));
    }
}
