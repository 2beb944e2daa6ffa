//! One-time dependency loader.
//!
//! Wallet extensions inject their provider object after the page starts
//! executing, so presence is polled at a fixed short interval until it
//! appears or the ceiling elapses. Either way polling stops and the app
//! proceeds (degraded demo mode when absent). This is the only timed
//! operation in the system.

use crate::wallet::{self, InjectedProvider};
use gloo_console::warn;
use gloo_timers::future::TimeoutFuture;

const POLL_INTERVAL_MS: u32 = 250;
const POLL_CEILING_MS: u32 = 5_000;

pub async fn wait_for_provider() -> Option<InjectedProvider> {
    for _ in 0..POLL_CEILING_MS / POLL_INTERVAL_MS {
        if let Some(provider) = wallet::detect() {
            return Some(provider);
        }
        TimeoutFuture::new(POLL_INTERVAL_MS).await;
    }
    if wallet::detect().is_none() {
        warn!("no wallet provider appeared within 5s; continuing in demo mode");
    }
    wallet::detect()
}
