//! Reload notifier — one best-effort POST to the host's control endpoint.
//!
//! Fire-and-forget by contract: a single attempt with no timeout, no retry
//! and no cancellation. If the host is unresponsive the call blocks until
//! the connection itself gives up.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use plugctl_core::config::ReloadConfig;

use crate::error::RenameError;

#[derive(Debug, Serialize)]
struct ReloadRequest<'a> {
    name: &'a str,
}

/// Host response body: `{"status": string, "message"?: string}`.
#[derive(Debug, Deserialize)]
pub struct ReloadResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Ask the host to reload `plugin` from its (freshly edited) source.
///
/// The three failure shapes are kept distinct because the caller words its
/// reply differently for each: a non-200 HTTP status, a 200 whose body
/// `status` is not `"ok"`, and transport/decode failures below that.
pub async fn notify_reload(config: &ReloadConfig, plugin: &str) -> Result<(), RenameError> {
    let url = config.endpoint();
    debug!(%url, plugin, "requesting plugin reload");

    let resp = reqwest::Client::new()
        .post(&url)
        .header("content-type", "application/json")
        .json(&ReloadRequest { name: plugin })
        .send()
        .await
        .map_err(|e| RenameError::ReloadTransportError(e.to_string()))?;

    let status = resp.status().as_u16();
    if status != 200 {
        warn!(status, %url, "plugin reload request failed");
        return Err(RenameError::ReloadHttpError { status });
    }

    let body: ReloadResponse = resp
        .json()
        .await
        .map_err(|e| RenameError::ReloadTransportError(e.to_string()))?;

    if body.status != "ok" {
        let message = body.message.unwrap_or_default();
        warn!(%message, plugin, "plugin reload reported an error");
        return Err(RenameError::ReloadStatusError { message });
    }

    Ok(())
}
