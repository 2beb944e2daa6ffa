//! Demo login and registration checks.
//!
//! Everything here is a mock stand-in: the captcha is a plain text
//! challenge and accounts live in per-browser storage. No security
//! contract is implied anywhere.

use ac_types::DemoAccount;
use anyhow::Result;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

pub const CAPTCHA_LEN: usize = 6;

/// Built-in demo credentials accepted alongside registered accounts.
pub const DEMO_COMPANY_ID: &str = "COMP123";
pub const DEMO_PASSWORD: &str = "password";

const CAPTCHA_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid captcha, please try again")]
    CaptchaMismatch,
    #[error("invalid company id or password")]
    InvalidCredentials,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("a company with id {0} is already registered")]
    DuplicateCompanyId(String),
    #[error("account store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Fresh 6-character uppercase alphanumeric challenge.
pub fn generate_captcha() -> String {
    let mut rng = rand::thread_rng();
    (0..CAPTCHA_LEN)
        .map(|_| CAPTCHA_CHARSET[rng.gen_range(0..CAPTCHA_CHARSET.len())] as char)
        .collect()
}

/// Case-insensitive comparison against the displayed challenge.
pub fn verify_captcha(expected: &str, entered: &str) -> bool {
    !expected.is_empty() && expected.eq_ignore_ascii_case(entered.trim())
}

/// Where registered demo accounts are kept, keyed by company id. The UI
/// backs this with browser localStorage; tests use the in-memory store.
pub trait AccountStore {
    fn load(&self, company_id: &str) -> Result<Option<DemoAccount>>;
    fn save(&self, account: &DemoAccount) -> Result<()>;
}

#[derive(Default)]
pub struct InMemoryAccounts {
    accounts: Mutex<HashMap<String, DemoAccount>>,
}

impl AccountStore for InMemoryAccounts {
    fn load(&self, company_id: &str) -> Result<Option<DemoAccount>> {
        let guard = self
            .accounts
            .lock()
            .map_err(|_| anyhow::anyhow!("account store lock poisoned"))?;
        Ok(guard.get(company_id).cloned())
    }

    fn save(&self, account: &DemoAccount) -> Result<()> {
        let mut guard = self
            .accounts
            .lock()
            .map_err(|_| anyhow::anyhow!("account store lock poisoned"))?;
        guard.insert(account.company_id.clone(), account.clone());
        Ok(())
    }
}

/// Captcha first, then the built-in demo pair or a stored account. A failed
/// check blocks navigation; the caller regenerates the challenge.
pub fn check_login(
    store: &impl AccountStore,
    company_id: &str,
    password: &str,
    captcha_expected: &str,
    captcha_entered: &str,
) -> Result<(), AuthError> {
    if !verify_captcha(captcha_expected, captcha_entered) {
        return Err(AuthError::CaptchaMismatch);
    }

    if company_id == DEMO_COMPANY_ID && password == DEMO_PASSWORD {
        return Ok(());
    }

    match store.load(company_id)? {
        Some(account) if account.password == password => Ok(()),
        _ => Err(AuthError::InvalidCredentials),
    }
}

/// Captcha plus required-field validation, then persist the demo account.
pub fn register(
    store: &impl AccountStore,
    account: &DemoAccount,
    captcha_expected: &str,
    captcha_entered: &str,
) -> Result<(), AuthError> {
    if !verify_captcha(captcha_expected, captcha_entered) {
        return Err(AuthError::CaptchaMismatch);
    }

    required(&account.company_name, "company name")?;
    required(&account.company_id, "company id")?;
    required(&account.password, "password")?;
    required(&account.location, "location")?;
    required(&account.registration_number, "registration number")?;

    if store.load(&account.company_id)?.is_some() {
        return Err(AuthError::DuplicateCompanyId(account.company_id.clone()));
    }

    store.save(account)?;
    Ok(())
}

fn required(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(())
    }
}
