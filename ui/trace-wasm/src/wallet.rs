//! Bridge to the injected browser wallet (`window.ethereum`).
//!
//! Implements the registry capability traits over EIP-1193 `request`.
//! Payload shaping and decoding are delegated to `ac-ledger-evm`; this
//! module only moves `JsValue`s across the boundary.

use ac_ledger::{LedgerClient, LedgerError, PendingWrite, WalletProvider};
use ac_ledger_evm as evm;
use anyhow::anyhow;
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Object, Promise, Reflect};
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// EIP-1193 code for a user-declined request prompt.
const USER_REJECTED_CODE: f64 = 4001.0;

const RECEIPT_POLL_MS: u32 = 500;
const RECEIPT_POLL_LIMIT: u32 = 120;

pub struct InjectedProvider {
    ethereum: Object,
    registry: String,
    account: RefCell<Option<String>>,
}

/// Look for the injected provider right now. `None` simply means the
/// extension is absent (or not injected yet).
pub fn detect() -> Option<InjectedProvider> {
    let window = web_sys::window()?;
    let ethereum = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
    if ethereum.is_undefined() || ethereum.is_null() {
        return None;
    }
    Some(InjectedProvider {
        ethereum: ethereum.unchecked_into(),
        registry: evm::DEFAULT_REGISTRY_ADDRESS.to_owned(),
        account: RefCell::new(None),
    })
}

fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Ok(message) = Reflect::get(value, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{value:?}")
}

/// A rejected promise from the provider: either the user declined the
/// prompt (code 4001) or something else went wrong.
fn rejection_to_error(err: JsValue) -> LedgerError {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64());
    if code == Some(USER_REJECTED_CODE) {
        LedgerError::UserRejected
    } else {
        LedgerError::Provider(anyhow!("{}", describe(&err)))
    }
}

fn provider_error(message: impl Into<String>) -> LedgerError {
    LedgerError::Provider(anyhow!(message.into()))
}

/// Plain-object serializer; the default one would produce an ES `Map`,
/// which wallet extensions do not accept as params.
fn to_js(value: &serde_json::Value) -> Result<JsValue, LedgerError> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|err| provider_error(format!("params serialization: {err}")))
}

impl InjectedProvider {
    async fn request(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<JsValue, LedgerError> {
        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(|_| provider_error("building request args"))?;
        Reflect::set(&args, &JsValue::from_str("params"), &to_js(&params)?)
            .map_err(|_| provider_error("building request args"))?;

        let request_fn: Function = Reflect::get(&self.ethereum, &JsValue::from_str("request"))
            .map_err(|_| provider_error("provider has no request method"))?
            .dyn_into()
            .map_err(|_| provider_error("provider.request is not callable"))?;

        let promise: Promise = request_fn
            .call1(&self.ethereum, &args)
            .map_err(rejection_to_error)?
            .dyn_into()
            .map_err(|_| provider_error("provider.request did not return a promise"))?;

        JsFuture::from(promise).await.map_err(rejection_to_error)
    }

    async fn eth_call(&self, data: Vec<u8>) -> Result<Vec<u8>, LedgerError> {
        let result = self
            .request("eth_call", evm::eth_call_params(&self.registry, &data))
            .await?;
        let hex = result
            .as_string()
            .ok_or_else(|| LedgerError::Read(anyhow!("eth_call returned a non-string")))?;
        evm::abi::parse_hex(&hex).map_err(|err| LedgerError::Read(anyhow!(err)))
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    async fn request_access(&self) -> Result<(), LedgerError> {
        let accounts = self
            .request("eth_requestAccounts", serde_json::json!([]))
            .await?;
        *self.account.borrow_mut() = Array::from(&accounts).get(0).as_string();
        Ok(())
    }

    async fn network_id(&self) -> Result<u64, LedgerError> {
        let raw = self.request("eth_chainId", serde_json::json!([])).await?;
        let hex = raw
            .as_string()
            .ok_or_else(|| provider_error("eth_chainId returned a non-string"))?;
        evm::parse_chain_id(&hex).map_err(|err| LedgerError::Provider(anyhow!(err)))
    }
}

#[async_trait(?Send)]
impl LedgerClient for InjectedProvider {
    async fn item_count(&self) -> Result<u64, LedgerError> {
        let bytes = self.eth_call(evm::item_count_call()).await?;
        evm::abi::decode_u64(&bytes).map_err(|err| LedgerError::Read(anyhow!(err)))
    }

    async fn record_at(&self, index: u64) -> Result<ac_types::ProvenanceRecord, LedgerError> {
        let bytes = self.eth_call(evm::record_at_call(index)).await?;
        evm::abi::decode_record(&bytes).map_err(|err| LedgerError::Read(anyhow!(err)))
    }

    async fn submit_record(
        &self,
        name: &str,
        location: &str,
    ) -> Result<PendingWrite, LedgerError> {
        let from = self
            .account
            .borrow()
            .clone()
            .ok_or_else(|| LedgerError::Write(anyhow!("no connected account")))?;

        let params =
            evm::eth_send_transaction_params(&from, &self.registry, &evm::add_record_call(name, location));
        let result = self.request("eth_sendTransaction", params).await?;
        let tx_hash = result
            .as_string()
            .ok_or_else(|| LedgerError::Write(anyhow!("transaction hash missing")))?;
        Ok(PendingWrite { tx_hash })
    }

    async fn await_confirmation(&self, pending: &PendingWrite) -> Result<(), LedgerError> {
        for _ in 0..RECEIPT_POLL_LIMIT {
            let receipt = self
                .request(
                    "eth_getTransactionReceipt",
                    evm::transaction_receipt_params(&pending.tx_hash),
                )
                .await?;
            if !receipt.is_null() && !receipt.is_undefined() {
                return Ok(());
            }
            TimeoutFuture::new(RECEIPT_POLL_MS).await;
        }
        Err(LedgerError::Write(anyhow!(
            "transaction {} was not confirmed in time",
            pending.tx_hash
        )))
    }
}
