//! HTTP API request / response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::ParticipantDto;

/// Loosely typed numeric input: accepts `5`, `5.5` or `"5.5"`.
///
/// Anything else (`null`, booleans, arrays, objects, unparsable text, a
/// missing field) becomes NaN and is clamped to the lower bound by the value
/// object constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl NumericInput {
    pub fn as_f64(&self) -> f64 {
        match self {
            NumericInput::Number(n) => *n,
            NumericInput::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
            NumericInput::Other(_) => f64::NAN,
        }
    }
}

impl Default for NumericInput {
    fn default() -> Self {
        NumericInput::Other(serde_json::Value::Null)
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

/// Body of `POST /api/round/start`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartRoundRequest {
    #[serde(default)]
    pub wager: NumericInput,
    #[serde(default)]
    pub cash_out_target: NumericInput,
}

/// Body of `PUT /api/round/speed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedRequest {
    #[serde(default)]
    pub speed_factor: NumericInput,
}

/// Round snapshot returned by the round endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStateDto {
    /// `idle`, `running` or `ended`
    pub phase: String,
    pub round_id: Option<u64>,
    pub tick: u32,
    pub elapsed: f64,
    pub current_multiplier: f64,
    /// Only present once the round has ended.
    pub crash_point: Option<f64>,
    pub speed_factor: f64,
    pub tick_interval_ms: u64,
    pub balance: f64,
    pub participants: Vec<ParticipantDto>,
    /// JST, RFC 3339
    pub started_at: Option<String>,
    /// JST, RFC 3339
    pub ended_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntryDto {
    pub rank: usize,
    pub id: u32,
    pub name: String,
    pub score: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
