use std::time::Duration;

use postings_logging::{clip, postings_debug, postings_warn, BODY_LOG_CHARS};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::{ApiError, FailureKind, UploadAck, UploadBody, UploadRequest, WireRankedResult};

pub const PROCESS_CSV_PATH: &str = "api/process-csv/";
pub const QUERY_PATH: &str = "api/get-query-result/";
/// Multipart field carrying the CSV document.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// `None` waits for the connection as long as the OS does.
    pub connect_timeout: Option<Duration>,
    /// `None` lets a request stay pending until the server answers.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// The two backend operations the client consumes.
#[async_trait::async_trait]
pub trait SearchApi: Send + Sync {
    async fn upload(&self, request: UploadRequest) -> Result<UploadAck, ApiError>;

    async fn query(&self, text: &str) -> Result<Vec<WireRankedResult>, ApiError>;
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    ranked_results: Option<Vec<WireRankedResult>>,
}

/// Which JSON field of an error body to try first.
#[derive(Clone, Copy)]
enum ErrorField {
    Error,
    Message,
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let base = parse_base_url(&settings.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl SearchApi for ReqwestApi {
    async fn upload(&self, request: UploadRequest) -> Result<UploadAck, ApiError> {
        let url = self.endpoint(PROCESS_CSV_PATH)?;
        let UploadRequest {
            filename,
            media_type,
            body,
        } = request;

        let bytes = match body {
            UploadBody::Bytes(bytes) => bytes,
            UploadBody::File(path) => tokio::fs::read(&path).await.map_err(|err| {
                postings_warn!("Could not read {:?} for upload: {}", path, err);
                ApiError::new(FailureKind::Io, format!("{}: {err}", path.display()))
            })?,
        };
        postings_debug!(
            "POST {} file={} bytes={} head={}",
            url,
            filename,
            bytes.len(),
            clip(&String::from_utf8_lossy(&bytes), BODY_LOG_CHARS)
        );

        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(&media_type)
            .map_err(|err| ApiError::new(FailureKind::InvalidRequest, err.to_string()))?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|err| transport_failure(&url, err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| transport_failure(&url, err))?;

        if !status.is_success() {
            return Err(server_failure(status, &body, ErrorField::Error));
        }
        let json: Value = decode_json(&url, &body)?;
        Ok(UploadAck {
            message: json
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    async fn query(&self, text: &str) -> Result<Vec<WireRankedResult>, ApiError> {
        let url = self.endpoint(QUERY_PATH)?;
        postings_debug!("POST {} text={}", url, clip(text, BODY_LOG_CHARS));

        let response = self
            .client
            .post(url.clone())
            .json(&QueryRequest { text })
            .send()
            .await
            .map_err(|err| transport_failure(&url, err))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| transport_failure(&url, err))?;

        if !status.is_success() {
            return Err(server_failure(status, &body, ErrorField::Message));
        }
        let parsed: QueryResponse = decode_json(&url, &body)?;
        Ok(parsed.ranked_results.unwrap_or_default())
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut base = Url::parse(raw.trim())
        .map_err(|err| ApiError::new(FailureKind::InvalidUrl, format!("{raw}: {err}")))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(ApiError::new(
            FailureKind::InvalidUrl,
            format!("{raw}: only http and https are supported"),
        ));
    }
    // Endpoint paths are joined relative to the base, so keep its last segment.
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

fn decode_json<T: serde::de::DeserializeOwned>(url: &Url, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        postings_warn!(
            "Undecodable response from {}: {} body={}",
            url,
            err,
            clip(&String::from_utf8_lossy(body), BODY_LOG_CHARS)
        );
        ApiError::new(FailureKind::Decode, err.to_string())
    })
}

fn server_failure(status: StatusCode, body: &[u8], prefer: ErrorField) -> ApiError {
    let reported = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|json| reported_message(&json, prefer));
    postings_warn!(
        "Server answered {}: {}",
        status,
        clip(&String::from_utf8_lossy(body), BODY_LOG_CHARS)
    );
    ApiError::new(
        FailureKind::Server {
            status: status.as_u16(),
            reported,
        },
        status.to_string(),
    )
}

fn reported_message(json: &Value, prefer: ErrorField) -> Option<String> {
    let order = match prefer {
        ErrorField::Error => ["error", "message"],
        ErrorField::Message => ["message", "error"],
    };
    order
        .iter()
        .filter_map(|key| json.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

fn transport_failure(url: &Url, err: reqwest::Error) -> ApiError {
    postings_warn!("Request to {} failed: {}", url, err);
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_decode() {
        FailureKind::Decode
    } else {
        FailureKind::Network
    };
    ApiError::new(kind, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let base = parse_base_url("http://localhost:8000/search").unwrap();
        assert_eq!(
            base.join(QUERY_PATH).unwrap().as_str(),
            "http://localhost:8000/search/api/get-query-result/"
        );
        let root = parse_base_url("http://localhost:8000").unwrap();
        assert_eq!(
            root.join(PROCESS_CSV_PATH).unwrap().as_str(),
            "http://localhost:8000/api/process-csv/"
        );
    }

    #[test]
    fn base_url_must_be_http() {
        let err = parse_base_url("ftp://example.com").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn reported_message_respects_preference() {
        let json = serde_json::json!({ "error": "bad format", "message": "nope" });
        assert_eq!(
            reported_message(&json, ErrorField::Error).as_deref(),
            Some("bad format")
        );
        assert_eq!(
            reported_message(&json, ErrorField::Message).as_deref(),
            Some("nope")
        );
        let detail = serde_json::json!({ "detail": [{ "msg": "field required" }] });
        assert_eq!(reported_message(&detail, ErrorField::Message), None);
    }
}
