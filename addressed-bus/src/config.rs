use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{error::Error, label::TERMINATOR};

/// Settings for one [`AddressedSocket`](crate::socket::AddressedSocket).
///
/// `host` is both the subscription filter and the sender stamped on outgoing
/// messages. `tx_url` is where messages are published, `rx_url` where they are
/// received from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub rx_url: String,
    pub tx_url: String,
    /// Log at `debug` instead of `info` when `RUST_LOG` is unset; see
    /// [`init_tracing_for`](crate::telemetry::init_tracing_for).
    pub verbose: bool,
    /// Default receive timeout for [`Inbox::recv_default`](crate::socket::Inbox::recv_default).
    pub timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "chat".to_string(),
            rx_url: "ipc:///var/tmp/serial_bridge_rx".to_string(),
            tx_url: "ipc:///var/tmp/serial_bridge_tx".to_string(),
            verbose: false,
            timeout_ms: None,
        }
    }
}

impl Config {
    pub fn new(
        host: impl Into<String>,
        rx_url: impl Into<String>,
        tx_url: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            rx_url: rx_url.into(),
            tx_url: tx_url.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|err| Error::Config(err.to_string()))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.host.is_empty() {
            return Err(Error::Config("host must not be empty".into()));
        }
        if self.host.as_bytes().contains(&TERMINATOR) {
            return Err(Error::Config(format!(
                "host {:?} contains the label terminator",
                self.host
            )));
        }
        if self.rx_url.is_empty() || self.tx_url.is_empty() {
            return Err(Error::Config("rx_url and tx_url must be set".into()));
        }
        Ok(())
    }

    pub fn receive_timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
