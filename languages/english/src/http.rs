use quickdef_config::network::NetworkConfig;
use quickdef_core::RemoteError;

/// Shared pooled client; every request inherits the configured timeout
pub fn build_client(network: &NetworkConfig) -> Result<reqwest::Client, RemoteError> {
    reqwest::Client::builder()
        .timeout(network.timeout())
        .build()
        .map_err(|e| RemoteError::Network(e.to_string()))
}

pub(crate) fn map_error(e: reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::Timeout
    } else if e.is_decode() {
        RemoteError::Malformed(e.to_string())
    } else {
        RemoteError::Network(e.to_string())
    }
}

/// "Not Found" for 404, falling back to the bare code
pub(crate) fn status_text(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}
