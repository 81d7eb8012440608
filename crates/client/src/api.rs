use std::sync::Arc;

use reqwest::StatusCode;
use screentime_core::{KeySet, KeyType, LogicalRequest, PublicKey, RequestSigner, ScreenTime};

use crate::error::ClientError;
use crate::transport::Transport;

/// Screen time service client holding one device key.
pub struct Client {
    transport: Transport,
    signer: Arc<dyn RequestSigner>,
}

impl Client {
    pub fn new(base_url: &str, signer: Arc<dyn RequestSigner>) -> Result<Self, ClientError> {
        Ok(Self {
            transport: Transport::new(base_url)?,
            signer,
        })
    }

    pub fn public_key(&self) -> PublicKey {
        self.signer.public_key()
    }

    /// Asks the service which role this device's key holds.
    ///
    /// `Ok(None)` means the service gave no answer; `Some(KeyType::None)`
    /// means it answered that the key is not registered.
    pub async fn role(&self) -> Result<Option<KeyType>, ClientError> {
        let request = LogicalRequest::new("GET", ["role"]);
        match self.transport.send(&request, self.signer.as_ref()).await {
            Ok(body) => Ok(KeyType::parse_probe_body(&body)?),
            Err(error) if error.status() == Some(StatusCode::NOT_FOUND) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Reads one week's value; `Ok(None)` if nothing has been recorded.
    pub async fn get_time(
        &self,
        user: &str,
        year: i32,
        week: u8,
    ) -> Result<Option<ScreenTime>, ClientError> {
        let request = LogicalRequest::new(
            "GET",
            ["time".to_string(), user.to_string(), year.to_string(), week.to_string()],
        );
        match self.transport.send(&request, self.signer.as_ref()).await {
            Ok(body) => Ok(Some(serde_json::from_slice(&body)?)),
            Err(ClientError::NotRecorded) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Overwrites one week's value.
    pub async fn set_time(
        &self,
        user: &str,
        year: i32,
        week: u8,
        value: ScreenTime,
    ) -> Result<(), ClientError> {
        let request = LogicalRequest::new(
            "PUT",
            ["time".to_string(), user.to_string(), year.to_string(), week.to_string()],
        )
        .with_body(serde_json::to_vec(&value)?);
        self.transport.send(&request, self.signer.as_ref()).await?;
        tracing::info!(user, year, week, "screen time written");
        Ok(())
    }

    /// Replaces the service's whole key registry. Requires the admin key.
    pub async fn upload_keys(&self, keys: &KeySet<PublicKey>) -> Result<(), ClientError> {
        let request = LogicalRequest::new("PUT", ["keys"]).with_body(serde_json::to_vec(keys)?);
        self.transport.send(&request, self.signer.as_ref()).await?;
        tracing::info!(
            users = keys.users.len(),
            viewers = keys.viewers.len(),
            "key registry uploaded"
        );
        Ok(())
    }
}
