use std::time::Duration;

use reqwest::{Method, StatusCode, Url};
use screentime_core::{LogicalRequest, NOT_RECORDED_HEADER, RequestSigner};

use crate::error::ClientError;

/// Carries signed logical requests over HTTP.
///
/// Raw segments are percent-encoded into the URL here and only here; the
/// signature always covers the raw strings.
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
}

impl Transport {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url).map_err(|e| ClientError::Url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Url(format!("{base_url} cannot be a base URL")));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(2))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Appends each raw segment to the base URL as one percent-encoded path
    /// component.
    ///
    /// `.` and `..` are refused: URL parsing resolves them as dot segments,
    /// so they can never arrive at the service as a path component.
    pub fn url_for(&self, segments: &[String]) -> Result<Url, ClientError> {
        if let Some(dot) = segments.iter().find(|s| matches!(s.as_str(), "." | "..")) {
            return Err(ClientError::Url(format!(
                "path segment {dot:?} cannot be sent as a single component"
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Signs `request`, sends it, and returns the response body of a 2xx
    /// answer. A 404 carrying [`NOT_RECORDED_HEADER`] becomes
    /// [`ClientError::NotRecorded`]; any other status becomes
    /// [`ClientError::Status`].
    pub async fn send(
        &self,
        request: &LogicalRequest,
        signer: &dyn RequestSigner,
    ) -> Result<Vec<u8>, ClientError> {
        let method = Method::from_bytes(request.method().as_bytes())
            .map_err(|_| ClientError::Method(request.method().to_string()))?;
        let url = self.url_for(request.segments())?;
        let envelope = request.sign(signer)?;

        tracing::debug!(%method, %url, timestamp = envelope.timestamp, "sending signed request");

        let mut builder = self.http.request(method, url).query(&envelope);
        if let Some(body) = request.body() {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }

        let response = builder.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND && response.headers().contains_key(NOT_RECORDED_HEADER)
        {
            return Err(ClientError::NotRecorded);
        }
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body.to_vec())
    }
}
