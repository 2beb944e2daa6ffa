//! Company login and registration forms.
//!
//! Both are demo mocks: credentials live in browser storage, the captcha
//! is plain text, and every failure regenerates the challenge.

use crate::dom::{self, Elements};
use crate::events::{self, on_click};
use crate::state::{self, Page};
use crate::storage::BrowserAccounts;
use ac_types::DemoAccount;

fn captcha_box(captcha: &str) -> String {
    format!(
        r#"
        <label>Captcha</label>
        <div class="captcha-box">
          <span class="captcha-text">{}</span>
          <button type="button" id="regenCaptchaBtn">Regenerate</button>
        </div>
        <input type="text" id="captchaInput" placeholder="Enter captcha" />
        "#,
        dom::escape_html(captcha)
    )
}

fn refresh_captcha(els: &Elements) {
    state::set_captcha(ac_auth::generate_captcha());
    super::render(els);
}

pub fn render_login(els: &Elements) {
    let html = format!(
        r#"
        <div class="auth-container">
          <div class="data-form auth-form">
            <h3>Company Login</h3>
            <label>Company ID</label>
            <input type="text" id="loginCompanyId" value="{demo_id}" />
            <label>Password</label>
            <input type="password" id="loginPassword" value="{demo_pw}" />
            {captcha}
            <button id="loginBtn" class="btn primary">Login</button>
            <p class="auth-switch">Don't have an account? <button type="button" id="toRegisterBtn">Register here</button></p>
          </div>
        </div>
        "#,
        demo_id = ac_auth::DEMO_COMPANY_ID,
        demo_pw = ac_auth::DEMO_PASSWORD,
        captcha = captcha_box(&state::captcha()),
    );
    dom::set_inner_html(&els.content, &html);

    wire_regen(els);
    if let Some(btn) = dom::by_id("toRegisterBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| events::navigate(&els2, Page::CompanyRegister));
    }
    if let Some(btn) = dom::by_id("loginBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| handle_login(&els2));
    }
}

fn handle_login(els: &Elements) {
    let company_id = dom::input_value("loginCompanyId");
    let password = dom::input_value("loginPassword");
    let entered = dom::input_value("captchaInput");

    match ac_auth::check_login(
        &BrowserAccounts,
        &company_id,
        &password,
        &state::captcha(),
        &entered,
    ) {
        Ok(()) => {
            dom::alert("Login Successful!");
            events::navigate(els, Page::CompanyPortal);
        }
        Err(err) => {
            dom::alert(&err.to_string());
            refresh_captcha(els);
        }
    }
}

pub fn render_register(els: &Elements) {
    let html = format!(
        r#"
        <div class="auth-container">
          <div class="data-form auth-form">
            <h3>Company Registration</h3>
            <label>Company Name</label>
            <input type="text" id="regName" />
            <label>Company ID</label>
            <input type="text" id="regCompanyId" />
            <label>Password</label>
            <input type="password" id="regPassword" />
            <label>Location</label>
            <input type="text" id="regLocation" />
            <label>Registration Number</label>
            <input type="text" id="regNumber" />
            {captcha}
            <button id="registerBtn" class="btn primary">Register</button>
            <p class="auth-switch">Already have an account? <button type="button" id="toLoginBtn">Login here</button></p>
          </div>
        </div>
        "#,
        captcha = captcha_box(&state::captcha()),
    );
    dom::set_inner_html(&els.content, &html);

    wire_regen(els);
    if let Some(btn) = dom::by_id("toLoginBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| events::navigate(&els2, Page::CompanyLogin));
    }
    if let Some(btn) = dom::by_id("registerBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| handle_register(&els2));
    }
}

fn handle_register(els: &Elements) {
    let account = DemoAccount {
        company_name: dom::input_value("regName"),
        company_id: dom::input_value("regCompanyId"),
        password: dom::input_value("regPassword"),
        location: dom::input_value("regLocation"),
        registration_number: dom::input_value("regNumber"),
    };
    let entered = dom::input_value("captchaInput");

    match ac_auth::register(&BrowserAccounts, &account, &state::captcha(), &entered) {
        Ok(()) => {
            dom::alert(&format!(
                "Registration for \"{}\" submitted successfully! You can now log in.",
                account.company_name
            ));
            events::navigate(els, Page::CompanyLogin);
        }
        Err(err) => {
            dom::alert(&err.to_string());
            refresh_captcha(els);
        }
    }
}

fn wire_regen(els: &Elements) {
    if let Some(btn) = dom::by_id("regenCaptchaBtn") {
        let els2 = els.clone();
        on_click(&btn, move |_| refresh_captcha(&els2));
    }
}
