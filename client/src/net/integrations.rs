//! Object storage upload and LLM invocation.
//!
//! Uploads go to the hosted backend's storage endpoint through the server
//! gateway. LLM calls go to the server's own `/api/integrations/llm/invoke`,
//! which keeps provider keys off the client.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "integrations_test.rs"]
mod integrations_test;

use super::types::{LlmInvokeRequest, LlmOutput, UploadedFile};

#[cfg(any(test, feature = "hydrate"))]
const UPLOAD_ENDPOINT: &str = "/api/integrations/storage/upload";
#[cfg(any(test, feature = "hydrate"))]
const LLM_INVOKE_ENDPOINT: &str = "/api/integrations/llm/invoke";

/// Object path for an upload: `{prefix}/{sanitized file name}`. Anything
/// outside `[A-Za-z0-9._-]` becomes `_`.
#[must_use]
pub fn object_path(prefix: &str, file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() { safe } else { format!("{prefix}/{safe}") }
}

#[cfg(any(test, feature = "hydrate"))]
fn upload_failed_message(status: u16) -> String {
    format!("upload failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn invoke_failed_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(str::to_owned));
    match detail {
        Some(detail) => format!("assistant request failed ({status}): {detail}"),
        None => format!("assistant request failed: {status}"),
    }
}

/// Upload `file` into `bucket` at `path`.
///
/// # Errors
///
/// Returns an error string if the form cannot be built or the upload fails.
#[cfg(feature = "hydrate")]
pub async fn upload_file(bucket: &str, path: &str, file: &web_sys::File) -> Result<UploadedFile, String> {
    let form = web_sys::FormData::new().map_err(|e| format!("{e:?}"))?;
    form.append_with_str("bucket", bucket).map_err(|e| format!("{e:?}"))?;
    form.append_with_str("path", path).map_err(|e| format!("{e:?}"))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| format!("{e:?}"))?;

    let resp = gloo_net::http::Request::post(UPLOAD_ENDPOINT)
        .body(form)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(upload_failed_message(resp.status()));
    }
    resp.json::<UploadedFile>().await.map_err(|e| e.to_string())
}

/// Send a prompt to the LLM integration.
///
/// # Errors
///
/// Returns an error string on transport failure, rate limiting, or when the
/// server has no LLM configured.
pub async fn invoke_llm(request: &LlmInvokeRequest) -> Result<LlmOutput, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LLM_INVOKE_ENDPOINT)
            .json(request)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(invoke_failed_message(status, &body));
        }
        resp.json::<LlmOutput>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}
