//! AyurChain demo frontend.
//!
//! Pure Rust + WASM single-page app. Modularised per concern: DOM
//! bindings, state container, event wiring, page renderers, the injected
//! wallet bridge, and the one-time dependency loader.

pub mod dom;
pub mod events;
pub mod loader;
pub mod pages;
pub mod state;
pub mod storage;
pub mod uploads;
pub mod wallet;

use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    events::bind_shell(&els);
    pages::render(&els);

    // One-time dependency load: wait up to 5s for the wallet extension to
    // inject its provider, then proceed either way.
    let available = loader::wait_for_provider().await.is_some();
    state::set_provider_available(available);
    if state::page() == state::Page::QualityReview {
        pages::render(&els);
    }

    Ok(())
}
