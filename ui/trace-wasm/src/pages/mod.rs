//! Page rendering. One module per page; each draws its markup into the
//! content root and wires its own event handlers.

pub mod auth;
pub mod customer;
pub mod home;
pub mod portal;
pub mod review;

use crate::dom::Elements;
use crate::state::{self, Page};

pub fn render(els: &Elements) {
    match state::page() {
        Page::Home => home::render(els),
        Page::CustomerPortal => customer::render(els),
        Page::CompanyLogin => auth::render_login(els),
        Page::CompanyRegister => auth::render_register(els),
        Page::CompanyPortal => portal::render(els),
        Page::QualityReview => review::render(els),
    }
}
