//! DOM helpers and the static shell bindings.
//!
//! Only the navbar and the content root are resolved at startup; page
//! elements are re-queried after every render because pages are drawn
//! from scratch on navigation.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    let nl = parent.query_selector_all(selector).unwrap();
    let mut v = Vec::new();
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn get_select_value(el: &HtmlSelectElement) -> String {
    el.value()
}

pub fn input_value(id: &str) -> String {
    by_id_typed::<HtmlInputElement>(id)
        .map(|el| get_input_value(&el))
        .unwrap_or_default()
}

pub fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

pub fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

/// Escape user-supplied text before it lands in an innerHTML string.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ── Shell elements ──

/// Static shell references, resolved once at startup.
#[derive(Clone)]
pub struct Elements {
    pub brand: HtmlElement,
    pub nav_customer_btn: HtmlElement,
    pub nav_company_btn: HtmlElement,
    pub content: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve the shell references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            brand: get_html!("brandLogo"),
            nav_customer_btn: get_html!("navCustomerBtn"),
            nav_company_btn: get_html!("navCompanyBtn"),
            content: get_el!("appRoot"),
        })
    }
}
