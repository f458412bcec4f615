//! Shared utilities for integration testing.

use std::sync::{Arc, Mutex};

use endpoint_relay::{Diagnostics, Relay, RelayConfig};

/// A diagnostics channel wired to an in-memory recorder.
pub fn recording_diagnostics() -> (Diagnostics, Arc<Mutex<Vec<String>>>) {
    let diagnostics = Diagnostics::new();
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    diagnostics.subscribe(move |msg| sink.lock().unwrap().push(msg.to_string()));
    (diagnostics, messages)
}

/// A relay over the production transport with tight policy for tests.
#[allow(dead_code)]
pub fn relay_with_policy(retry_limit: u32, timeout_secs: u64) -> (Relay, Arc<Mutex<Vec<String>>>) {
    let (diagnostics, messages) = recording_diagnostics();
    let config = RelayConfig {
        retry_limit,
        timeout_secs,
        ..Default::default()
    };
    let relay = Relay::new(config, diagnostics).expect("relay construction");
    (relay, messages)
}
