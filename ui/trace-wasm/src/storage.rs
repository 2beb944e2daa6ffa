//! Browser-backed account store.
//!
//! Registered demo accounts round-trip through `localStorage` as one JSON
//! map keyed by company id. Demo-only data; no security contract.

use ac_auth::AccountStore;
use ac_types::DemoAccount;
use anyhow::{Context, Result};
use gloo_storage::{LocalStorage, Storage};
use std::collections::HashMap;

const ACCOUNTS_KEY: &str = "ayur_accounts";

pub struct BrowserAccounts;

fn load_all() -> HashMap<String, DemoAccount> {
    LocalStorage::get(ACCOUNTS_KEY).unwrap_or_default()
}

impl AccountStore for BrowserAccounts {
    fn load(&self, company_id: &str) -> Result<Option<DemoAccount>> {
        Ok(load_all().get(company_id).cloned())
    }

    fn save(&self, account: &DemoAccount) -> Result<()> {
        let mut accounts = load_all();
        accounts.insert(account.company_id.clone(), account.clone());
        LocalStorage::set(ACCOUNTS_KEY, &accounts).context("persisting demo accounts")?;
        Ok(())
    }
}
