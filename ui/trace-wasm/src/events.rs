//! Event wiring helpers and top-level navigation.
//!
//! Pages are redrawn from scratch on navigation, so page modules wire
//! their own elements after each render; only the navbar is wired once.

use crate::dom::Elements;
use crate::pages;
use crate::state::{self, Page};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Element;

/// Attach a click handler. `forget()` keeps the listener alive for the
/// lifetime of the page.
pub fn on_click<F>(el: &Element, f: F)
where
    F: FnMut(web_sys::MouseEvent) + 'static,
{
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

pub fn on_change<F>(el: &Element, f: F)
where
    F: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())
        .unwrap();
    cb.forget();
}

/// Wire the static navbar. Call once after init.
pub fn bind_shell(els: &Elements) {
    {
        let els2 = els.clone();
        on_click(&els.brand, move |_| navigate(&els2, Page::Home));
    }
    {
        let els2 = els.clone();
        on_click(&els.nav_customer_btn, move |_| {
            navigate(&els2, Page::CustomerPortal)
        });
    }
    {
        let els2 = els.clone();
        on_click(&els.nav_company_btn, move |_| {
            navigate(&els2, Page::CompanyLogin)
        });
    }
}

/// Switch pages. Entering an auth page mints a fresh captcha challenge.
pub fn navigate(els: &Elements, page: Page) {
    state::set_page(page);
    if matches!(page, Page::CompanyLogin | Page::CompanyRegister) {
        state::set_captcha(ac_auth::generate_captcha());
    }
    pages::render(els);
}
