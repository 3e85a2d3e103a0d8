//! Ambient edge-runtime configuration.
//!
//! The hosting edge runtime injects connection settings into the module's
//! environment; no credentials are passed through module code. `EdgeEnv`
//! snapshots those variables at startup and fails fast when a required
//! one is missing.

use crate::error::{EdgeError, EdgeResult};

/// Connection settings supplied by the edge runtime environment.
#[derive(Debug, Clone)]
pub struct EdgeEnv {
    /// Hub gateway hostname. `EDGE_GATEWAY_HOST`, required.
    pub gateway_host: String,
    /// Broker port. `EDGE_BROKER_PORT`, default 8883.
    pub broker_port: u16,
    /// Device (gateway) identity. `EDGE_DEVICE_ID`, required.
    pub device_id: String,
    /// Module identity within the device. `EDGE_MODULE_ID`, required.
    pub module_id: String,
    /// Keep-alive interval in seconds. `EDGE_KEEPALIVE_SECS`, default 30.
    pub keepalive_secs: u16,
    /// CA certificate path. `EDGE_CA_CERT_PATH`; when unset the channel
    /// connects plaintext (local dev against an in-network broker).
    pub ca_cert_path: Option<String>,
    /// Module X.509 certificate path. `EDGE_CLIENT_CERT_PATH`.
    pub client_cert_path: Option<String>,
    /// Module private key path. `EDGE_CLIENT_KEY_PATH`.
    pub client_key_path: Option<String>,
}

impl EdgeEnv {
    /// Snapshot the ambient edge environment from process env vars.
    pub fn from_env() -> EdgeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Lets tests supply settings
    /// without mutating process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> EdgeResult<Self> {
        let required = |key: &str| -> EdgeResult<String> {
            match get(key) {
                Some(v) if !v.is_empty() => Ok(v),
                _ => Err(EdgeError::Environment(format!(
                    "required variable '{key}' is not set; is the module running under an edge runtime?"
                ))),
            }
        };

        let broker_port = match get("EDGE_BROKER_PORT") {
            Some(v) if !v.is_empty() => v.parse::<u16>().map_err(|e| {
                EdgeError::Environment(format!("EDGE_BROKER_PORT '{v}' is not a port: {e}"))
            })?,
            _ => 8883,
        };

        let keepalive_secs = match get("EDGE_KEEPALIVE_SECS") {
            Some(v) if !v.is_empty() => v.parse::<u16>().map_err(|e| {
                EdgeError::Environment(format!("EDGE_KEEPALIVE_SECS '{v}' is invalid: {e}"))
            })?,
            _ => 30,
        };

        Ok(Self {
            gateway_host: required("EDGE_GATEWAY_HOST")?,
            broker_port,
            device_id: required("EDGE_DEVICE_ID")?,
            module_id: required("EDGE_MODULE_ID")?,
            keepalive_secs,
            ca_cert_path: get("EDGE_CA_CERT_PATH").filter(|v| !v.is_empty()),
            client_cert_path: get("EDGE_CLIENT_CERT_PATH").filter(|v| !v.is_empty()),
            client_key_path: get("EDGE_CLIENT_KEY_PATH").filter(|v| !v.is_empty()),
        })
    }

    /// MQTT client id: one session per module within a device.
    pub fn client_id(&self) -> String {
        format!("{}/{}", self.device_id, self.module_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn minimal() -> HashMap<String, String> {
        env_of(&[
            ("EDGE_GATEWAY_HOST", "edgehub.local"),
            ("EDGE_DEVICE_ID", "gateway-01"),
            ("EDGE_MODULE_ID", "camera-capture"),
        ])
    }

    #[test]
    fn minimal_env_uses_defaults() {
        let vars = minimal();
        let env = EdgeEnv::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(env.gateway_host, "edgehub.local");
        assert_eq!(env.broker_port, 8883);
        assert_eq!(env.keepalive_secs, 30);
        assert!(env.ca_cert_path.is_none());
        assert_eq!(env.client_id(), "gateway-01/camera-capture");
    }

    #[test]
    fn overrides_are_honored() {
        let mut vars = minimal();
        vars.insert("EDGE_BROKER_PORT".into(), "1883".into());
        vars.insert("EDGE_KEEPALIVE_SECS".into(), "60".into());
        vars.insert("EDGE_CA_CERT_PATH".into(), "/certs/ca.pem".into());
        let env = EdgeEnv::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(env.broker_port, 1883);
        assert_eq!(env.keepalive_secs, 60);
        assert_eq!(env.ca_cert_path.as_deref(), Some("/certs/ca.pem"));
    }

    #[test]
    fn each_required_variable_is_enforced() {
        for missing in ["EDGE_GATEWAY_HOST", "EDGE_DEVICE_ID", "EDGE_MODULE_ID"] {
            let mut vars = minimal();
            vars.remove(missing);
            let err = EdgeEnv::from_lookup(|k| vars.get(k).cloned())
                .err()
                .expect("should fail");
            assert!(
                err.to_string().contains(missing),
                "error should name {missing}: {err}"
            );
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let mut vars = minimal();
        vars.insert("EDGE_DEVICE_ID".into(), String::new());
        assert!(EdgeEnv::from_lookup(|k| vars.get(k).cloned()).is_err());
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut vars = minimal();
        vars.insert("EDGE_BROKER_PORT".into(), "not-a-port".into());
        let err = EdgeEnv::from_lookup(|k| vars.get(k).cloned())
            .err()
            .expect("should fail");
        assert!(err.to_string().contains("EDGE_BROKER_PORT"));
    }
}
