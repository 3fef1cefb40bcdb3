//! HTTP client for the round API.

use liftoff_server::infrastructure::dto::http::{
    ErrorDto, NumericInput, RankingEntryDto, RoundStateDto, SpeedRequest, StartRoundRequest,
};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::ClientError;

/// Round control over HTTP.
#[derive(Debug, Clone)]
pub struct RoundApi {
    client: reqwest::Client,
    base_url: String,
}

impl RoundApi {
    /// # Arguments
    ///
    /// * `base_url` - Server root, e.g. `http://127.0.0.1:8080`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn start(&self, wager: f64, cash_out_target: f64) -> Result<RoundStateDto, ClientError> {
        let body = StartRoundRequest {
            wager: NumericInput::from(wager),
            cash_out_target: NumericInput::from(cash_out_target),
        };
        send(self.client.post(self.url("/api/round/start")).json(&body)).await
    }

    pub async fn reset(&self) -> Result<RoundStateDto, ClientError> {
        send(self.client.post(self.url("/api/round/reset"))).await
    }

    pub async fn set_speed(&self, speed_factor: f64) -> Result<RoundStateDto, ClientError> {
        let body = SpeedRequest {
            speed_factor: NumericInput::from(speed_factor),
        };
        send(self.client.put(self.url("/api/round/speed")).json(&body)).await
    }

    pub async fn state(&self) -> Result<RoundStateDto, ClientError> {
        send(self.client.get(self.url("/api/round"))).await
    }

    pub async fn ranking(&self) -> Result<Vec<RankingEntryDto>, ClientError> {
        send(self.client.get(self.url("/api/round/ranking"))).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::CONFLICT {
        let error = response
            .json::<ErrorDto>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|e| e.to_string());
        return Err(ClientError::Rejected(error));
    }
    if !status.is_success() {
        return Err(ClientError::Api(format!("unexpected status {}", status)));
    }

    Ok(response.json::<T>().await?)
}
