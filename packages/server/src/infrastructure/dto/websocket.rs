//! WebSocket message DTOs.
//!
//! Chat messages travel verbatim (see `domain::ChatMessage`); the types here
//! are the round events the server pushes to every session.

use serde::{Deserialize, Serialize};

/// A participant as seen on the wire. Fractional values are plain numbers
/// with at most two decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantDto {
    pub id: u32,
    pub name: String,
    pub primary: bool,
    pub wager: Option<f64>,
    pub cash_out_target: Option<f64>,
    pub score: Option<u64>,
}

/// Round event frame, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RoundEventMessage {
    RoundStarted {
        round_id: u64,
        participants: Vec<ParticipantDto>,
        speed_factor: f64,
        tick_interval_ms: u64,
        started_at: i64,
    },
    Multiplier {
        round_id: u64,
        tick: u32,
        elapsed: f64,
        multiplier: f64,
    },
    RoundEnded {
        round_id: u64,
        crash_point: f64,
        participants: Vec<ParticipantDto>,
        ranking: Vec<u32>,
        balance: f64,
        ended_at: i64,
    },
    RoundReset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_event_is_tagged_by_type() {
        // テスト項目: ラウンドイベントは "type" フィールドで識別される
        // given (前提条件):
        let event = RoundEventMessage::Multiplier {
            round_id: 3,
            tick: 12,
            elapsed: 1.2,
            multiplier: 0.5,
        };

        // when (操作):
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "multiplier");
        assert_eq!(json["round_id"], 3);
        assert_eq!(json["tick"], 12);
    }

    #[test]
    fn test_round_reset_has_only_type() {
        // テスト項目: round-reset はフィールドを持たない
        // when (操作):
        let json = serde_json::to_string(&RoundEventMessage::RoundReset).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"type":"round-reset"}"#);
    }

    #[test]
    fn test_chat_frame_is_not_a_round_event() {
        // テスト項目: チャットメッセージはラウンドイベントとしてパースされない
        // given (前提条件):
        let chat = r#"{"sender":"me","message":"hi"}"#;

        // when (操作):
        let result = serde_json::from_str::<RoundEventMessage>(chat);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
