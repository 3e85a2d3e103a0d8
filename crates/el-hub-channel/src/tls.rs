//! TLS transport for mTLS connections to the hub gateway.
//!
//! Loads the CA certificate plus the module's X.509 certificate and
//! private key from the PEM paths the edge runtime mounted into the
//! container, and configures rumqttc's TLS transport.

use rumqttc::Transport;

use crate::config::EdgeEnv;
use crate::error::{EdgeError, EdgeResult};

/// Build the transport implied by the ambient environment: mTLS when a
/// CA path is configured, plaintext TCP otherwise.
pub fn transport_from_env(env: &EdgeEnv) -> EdgeResult<Transport> {
    let Some(ca_path) = &env.ca_cert_path else {
        return Ok(Transport::Tcp);
    };

    let ca = std::fs::read(ca_path)
        .map_err(|e| EdgeError::Tls(format!("failed to read CA cert '{ca_path}': {e}")))?;

    let client_auth = match (&env.client_cert_path, &env.client_key_path) {
        (Some(cert_path), Some(key_path)) => {
            let cert = std::fs::read(cert_path).map_err(|e| {
                EdgeError::Tls(format!("failed to read client cert '{cert_path}': {e}"))
            })?;
            let key = std::fs::read(key_path).map_err(|e| {
                EdgeError::Tls(format!("failed to read client key '{key_path}': {e}"))
            })?;
            Some((cert, key))
        }
        (None, None) => None,
        _ => {
            return Err(EdgeError::Tls(
                "client cert and key must be configured together".into(),
            ));
        }
    };

    Ok(Transport::tls_with_config(
        rumqttc::TlsConfiguration::Simple {
            ca,
            alpn: None,
            client_auth,
        },
    ))
}
