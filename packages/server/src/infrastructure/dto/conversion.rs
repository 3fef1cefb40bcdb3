//! Conversion logic between domain types and DTOs.

use liftoff_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{Participant, RoundEvent, RoundPhase, RoundSnapshot};
use crate::infrastructure::dto::{
    http::{RankingEntryDto, RoundStateDto},
    websocket::{ParticipantDto, RoundEventMessage},
};

pub fn phase_label(phase: RoundPhase) -> &'static str {
    match phase {
        RoundPhase::Idle => "idle",
        RoundPhase::Running => "running",
        RoundPhase::Ended => "ended",
    }
}

fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Participant> for ParticipantDto {
    fn from(model: &Participant) -> Self {
        Self {
            id: model.id.value(),
            name: model.display_name.clone(),
            primary: model.is_primary(),
            wager: model.wager.map(|w| w.value()),
            cash_out_target: model.cash_out_target.map(|t| t.value()),
            score: model.score,
        }
    }
}

impl From<RoundEvent> for RoundEventMessage {
    fn from(event: RoundEvent) -> Self {
        match event {
            RoundEvent::Started {
                round_id,
                participants,
                speed_factor,
                tick_interval,
                started_at,
            } => RoundEventMessage::RoundStarted {
                round_id: round_id.value(),
                participants: participants.iter().map(ParticipantDto::from).collect(),
                speed_factor: speed_factor.value(),
                tick_interval_ms: millis(tick_interval),
                started_at: started_at.value(),
            },
            RoundEvent::Multiplier {
                round_id,
                tick,
                elapsed,
                multiplier,
            } => RoundEventMessage::Multiplier {
                round_id: round_id.value(),
                tick,
                elapsed,
                multiplier,
            },
            RoundEvent::Ended {
                round_id,
                crash_point,
                participants,
                ranking,
                balance,
                ended_at,
            } => RoundEventMessage::RoundEnded {
                round_id: round_id.value(),
                crash_point: crash_point.value(),
                participants: participants.iter().map(ParticipantDto::from).collect(),
                ranking: ranking.iter().map(|id| id.value()).collect(),
                balance: balance.value(),
                ended_at: ended_at.value(),
            },
            RoundEvent::Reset => RoundEventMessage::RoundReset,
        }
    }
}

impl From<RoundSnapshot> for RoundStateDto {
    fn from(snapshot: RoundSnapshot) -> Self {
        Self {
            phase: phase_label(snapshot.phase).to_string(),
            round_id: snapshot.round_id.map(|id| id.value()),
            tick: snapshot.tick,
            elapsed: snapshot.elapsed,
            current_multiplier: snapshot.current_multiplier,
            crash_point: snapshot.crash_point.map(|c| c.value()),
            speed_factor: snapshot.speed_factor.value(),
            tick_interval_ms: millis(snapshot.tick_interval),
            balance: snapshot.balance.value(),
            participants: snapshot.participants.iter().map(ParticipantDto::from).collect(),
            started_at: snapshot
                .started_at
                .map(|t| timestamp_to_jst_rfc3339(t.value())),
            ended_at: snapshot.ended_at.map(|t| timestamp_to_jst_rfc3339(t.value())),
        }
    }
}

/// Ranked participants, 1-based.
pub fn ranking_entries(ranked: &[Participant]) -> Vec<RankingEntryDto> {
    ranked
        .iter()
        .enumerate()
        .map(|(index, p)| RankingEntryDto {
            rank: index + 1,
            id: p.id.value(),
            name: p.display_name.clone(),
            score: p.score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CashOutTarget, CrashPoint, ParticipantId, ParticipantKind, RoundId, Timestamp, Wager,
    };

    fn participant(id: u32, score: Option<u64>) -> Participant {
        let kind = if id == 1 {
            ParticipantKind::Primary
        } else {
            ParticipantKind::Synthetic
        };
        let mut p = Participant::new(ParticipantId::new(id), format!("P{}", id), kind);
        p.wager = Some(Wager::from_hundredths(1_250));
        p.cash_out_target = Some(CashOutTarget::clamped(2.5));
        p.score = score;
        p
    }

    #[test]
    fn test_domain_participant_to_dto() {
        // テスト項目: ドメインの Participant が DTO に変換される
        // given (前提条件):
        let model = participant(1, Some(31));

        // when (操作):
        let dto = ParticipantDto::from(&model);

        // then (期待する結果):
        assert_eq!(dto.id, 1);
        assert_eq!(dto.name, "P1");
        assert!(dto.primary);
        assert_eq!(dto.wager, Some(12.5));
        assert_eq!(dto.cash_out_target, Some(2.5));
        assert_eq!(dto.score, Some(31));
    }

    #[test]
    fn test_ended_event_to_dto() {
        // テスト項目: Ended イベントが round-ended メッセージに変換される
        // given (前提条件):
        let event = RoundEvent::Ended {
            round_id: RoundId::new(4),
            crash_point: CrashPoint::from_hundredths(512).unwrap(),
            participants: vec![participant(1, None), participant(2, Some(31))],
            ranking: vec![ParticipantId::new(2), ParticipantId::new(1)],
            balance: Wager::from_points(980),
            ended_at: Timestamp::new(5_000),
        };

        // when (操作):
        let message = RoundEventMessage::from(event);

        // then (期待する結果):
        let RoundEventMessage::RoundEnded {
            round_id,
            crash_point,
            participants,
            ranking,
            balance,
            ended_at,
        } = message
        else {
            panic!("expected round-ended");
        };
        assert_eq!(round_id, 4);
        assert_eq!(crash_point, 5.12);
        assert_eq!(participants.len(), 2);
        assert_eq!(ranking, vec![2, 1]);
        assert_eq!(balance, 980.0);
        assert_eq!(ended_at, 5_000);
    }

    #[test]
    fn test_ranking_entries_are_one_based() {
        // テスト項目: ランキングは 1 位から番号付けされる
        // given (前提条件):
        let ranked = vec![participant(2, Some(31)), participant(1, None)];

        // when (操作):
        let entries = ranking_entries(&ranked);

        // then (期待する結果):
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].id, 2);
        assert_eq!(entries[1].rank, 2);
        assert_eq!(entries[1].score, None);
    }
}
