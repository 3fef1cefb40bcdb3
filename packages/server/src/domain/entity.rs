//! Domain entities: participants, the round, the primary bankroll and chat messages.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{
    error::ValueObjectError,
    value_object::{CashOutTarget, CrashPoint, ParticipantId, RoundId, SpeedFactor, Timestamp, Wager},
};

/// Upper bound on engine-driven participants in a roster.
pub const MAX_SYNTHETIC_PARTICIPANTS: usize = 64;

/// Whether a participant is driven by the caller or by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantKind {
    Primary,
    Synthetic,
}

/// A participant of the current round.
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub kind: ParticipantKind,
    pub wager: Option<Wager>,
    pub cash_out_target: Option<CashOutTarget>,
    pub score: Option<u64>,
}

impl Participant {
    pub fn new(id: ParticipantId, display_name: impl Into<String>, kind: ParticipantKind) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            kind,
            wager: None,
            cash_out_target: None,
            score: None,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.kind == ParticipantKind::Primary
    }

    fn place_stake(&mut self, wager: Wager, cash_out_target: CashOutTarget) {
        self.wager = Some(wager);
        self.cash_out_target = Some(cash_out_target);
        self.score = None;
    }

    fn clear(&mut self) {
        self.wager = None;
        self.cash_out_target = None;
        self.score = None;
    }

    fn settle(&mut self, crash_point: CrashPoint) {
        self.score = score_for(self.wager, self.cash_out_target, crash_point);
    }
}

/// Score of a stake once the round crashed at `crash_point`.
///
/// `round(target * wager)` if the crash happened strictly after the target,
/// `None` otherwise or when no stake was placed.
pub fn score_for(
    wager: Option<Wager>,
    cash_out_target: Option<CashOutTarget>,
    crash_point: CrashPoint,
) -> Option<u64> {
    match (wager, cash_out_target) {
        (Some(wager), Some(target)) if target.survives(crash_point) => Some(wager.payout(target)),
        _ => None,
    }
}

/// Ordered roster of participants. Index 0 is always the primary participant.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantSet {
    participants: Vec<Participant>,
}

impl ParticipantSet {
    /// Build a roster with one primary participant followed by `synthetic_count`
    /// synthetic ones named "CPU 1", "CPU 2", ...
    ///
    /// `synthetic_count` is capped at [`MAX_SYNTHETIC_PARTICIPANTS`].
    pub fn roster(primary_name: impl Into<String>, synthetic_count: usize) -> Self {
        let synthetic_count = synthetic_count.min(MAX_SYNTHETIC_PARTICIPANTS);
        let mut participants = Vec::with_capacity(synthetic_count + 1);
        participants.push(Participant::new(
            ParticipantId::new(1),
            primary_name,
            ParticipantKind::Primary,
        ));
        for n in 1..=synthetic_count {
            participants.push(Participant::new(
                ParticipantId::new(n as u32 + 1),
                format!("CPU {}", n),
                ParticipantKind::Synthetic,
            ));
        }
        Self { participants }
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn primary(&self) -> &Participant {
        &self.participants[0]
    }

    pub fn to_vec(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    /// Place the primary stake and draw one stake per synthetic participant.
    pub(crate) fn place_stakes(
        &mut self,
        primary_wager: Wager,
        primary_target: CashOutTarget,
        mut draw: impl FnMut() -> (Wager, CashOutTarget),
    ) {
        for participant in &mut self.participants {
            if participant.is_primary() {
                participant.place_stake(primary_wager, primary_target);
            } else {
                let (wager, target) = draw();
                participant.place_stake(wager, target);
            }
        }
    }

    pub(crate) fn clear_stakes(&mut self) {
        self.participants.iter_mut().for_each(Participant::clear);
    }

    pub(crate) fn settle_all(&mut self, crash_point: CrashPoint) {
        for participant in &mut self.participants {
            participant.settle(crash_point);
        }
    }

    /// Participants by score descending. Unscored participants come last and
    /// ties keep display order.
    pub fn ranking(&self) -> Vec<&Participant> {
        let mut ranked: Vec<&Participant> = self.participants.iter().collect();
        ranked.sort_by(|a, b| match (a.score, b.score) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        ranked
    }
}

/// Running balance of the primary participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bankroll {
    balance: Wager,
}

impl Bankroll {
    pub fn new(balance: Wager) -> Self {
        Self { balance }
    }

    pub fn balance(&self) -> Wager {
        self.balance
    }

    /// Debit up to the available balance and return the amount actually staked.
    pub fn stake(&mut self, requested: Wager) -> Wager {
        let staked = requested.min(self.balance);
        self.balance = self.balance.saturating_sub(staked);
        staked
    }

    pub fn credit_points(&mut self, points: u64) {
        self.balance = self.balance.saturating_add(Wager::from_points(points));
    }
}

/// Lifecycle phase of the round engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Running,
    Ended,
}

/// A started round. Absent while the engine is idle.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub id: RoundId,
    pub crash_point: CrashPoint,
    pub phase: RoundPhase,
    /// Ticks emitted so far; elapsed round-time is `tick / 10`.
    pub tick: u32,
    pub current_multiplier: f64,
    pub speed_factor: SpeedFactor,
    pub tick_interval: Duration,
    pub started_at: Timestamp,
    pub ended_at: Option<Timestamp>,
}

impl Round {
    pub fn elapsed(&self) -> f64 {
        super::curve::elapsed_for_tick(self.tick)
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }
}

/// Chat message relayed by the broadcast hub.
///
/// Wire form: `{ "sender": string, "message": string }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    #[serde(rename = "message")]
    pub body: String,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Parse a raw text frame.
    pub fn from_wire(raw: &str) -> Result<Self, ValueObjectError> {
        serde_json::from_str(raw).map_err(|e| ValueObjectError::MalformedChatMessage(e.to_string()))
    }

    pub fn to_wire(&self) -> Result<String, ValueObjectError> {
        serde_json::to_string(self).map_err(|e| ValueObjectError::MalformedChatMessage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crash(hundredths: u32) -> CrashPoint {
        CrashPoint::from_hundredths(hundredths).unwrap()
    }

    #[test]
    fn test_score_for_survivor_and_losers() {
        // テスト項目: クラッシュ 5.00 のとき、4.00 は 200 点、5.00 と 6.00 は得点なし
        // given (前提条件):
        let crash_point = crash(500);
        let wager = Some(Wager::from_points(50));

        // when (操作):
        let survivor = score_for(wager, Some(CashOutTarget::clamped(4.0)), crash_point);
        let equal = score_for(wager, Some(CashOutTarget::clamped(5.0)), crash_point);
        let above = score_for(wager, Some(CashOutTarget::clamped(6.0)), crash_point);

        // then (期待する結果):
        assert_eq!(survivor, Some(200));
        assert_eq!(equal, None);
        assert_eq!(above, None);
    }

    #[test]
    fn test_score_for_without_stake() {
        // テスト項目: 賭けていない参加者は得点なし
        // given (前提条件):
        let crash_point = crash(1000);

        // when (操作):
        let no_wager = score_for(None, Some(CashOutTarget::clamped(1.0)), crash_point);
        let no_target = score_for(Some(Wager::from_points(10)), None, crash_point);

        // then (期待する結果):
        assert_eq!(no_wager, None);
        assert_eq!(no_target, None);
    }

    #[test]
    fn test_roster_has_single_primary_first() {
        // テスト項目: ロスターは先頭に 1 人だけプライマリ参加者を持つ
        // given (前提条件):
        let synthetic_count = 4;

        // when (操作):
        let set = ParticipantSet::roster("me", synthetic_count);

        // then (期待する結果):
        assert_eq!(set.len(), 5);
        assert!(set.primary().is_primary());
        assert_eq!(set.primary().display_name, "me");
        assert_eq!(set.iter().filter(|p| p.is_primary()).count(), 1);
        let names: Vec<&str> = set.iter().map(|p| p.display_name.as_str()).collect();
        assert_eq!(names, vec!["me", "CPU 1", "CPU 2", "CPU 3", "CPU 4"]);
        let ids: Vec<u32> = set.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_roster_size_is_capped() {
        // テスト項目: 合成参加者数は上限で打ち切られ、ID は重複しない
        // given (前提条件):
        let synthetic_count = usize::MAX;

        // when (操作):
        let set = ParticipantSet::roster("me", synthetic_count);

        // then (期待する結果):
        assert_eq!(set.len(), MAX_SYNTHETIC_PARTICIPANTS + 1);
        let ids: Vec<u32> = set.iter().map(|p| p.id.value()).collect();
        let expected: Vec<u32> = (1..=MAX_SYNTHETIC_PARTICIPANTS as u32 + 1).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_place_and_settle_stakes() {
        // テスト項目: 全参加者に同じ採点ルールが適用される
        // given (前提条件):
        let mut set = ParticipantSet::roster("me", 2);
        let mut draws = vec![
            (Wager::from_points(10), CashOutTarget::clamped(2.0)),
            (Wager::from_points(20), CashOutTarget::clamped(9.0)),
        ]
        .into_iter();
        set.place_stakes(Wager::from_points(50), CashOutTarget::clamped(4.0), || {
            draws.next().unwrap()
        });

        // when (操作):
        set.settle_all(crash(500));

        // then (期待する結果):
        let scores: Vec<Option<u64>> = set.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![Some(200), Some(20), None]);
    }

    #[test]
    fn test_ranking_orders_by_score_with_unscored_last() {
        // テスト項目: ランキングは得点の降順、得点なしは最後（同点は表示順を維持）
        // given (前提条件):
        let mut set = ParticipantSet::roster("me", 3);
        let mut draws = vec![
            (Wager::from_points(100), CashOutTarget::clamped(9.0)),
            (Wager::from_points(100), CashOutTarget::clamped(3.0)),
            (Wager::from_points(150), CashOutTarget::clamped(2.0)),
        ]
        .into_iter();
        set.place_stakes(Wager::from_points(10), CashOutTarget::clamped(1.5), || {
            draws.next().unwrap()
        });
        set.settle_all(crash(400));

        // when (操作):
        let ranking: Vec<u32> = set.ranking().iter().map(|p| p.id.value()).collect();

        // then (期待する結果):
        // id3: 300, id4: 300, id1: 15, id2: なし
        assert_eq!(ranking, vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_clear_stakes_resets_every_field() {
        // テスト項目: ステークのクリアで賭け金・倍率・得点がすべて null に戻る
        // given (前提条件):
        let mut set = ParticipantSet::roster("me", 1);
        set.place_stakes(Wager::from_points(5), CashOutTarget::clamped(1.0), || {
            (Wager::from_points(1), CashOutTarget::clamped(1.0))
        });
        set.settle_all(crash(200));

        // when (操作):
        set.clear_stakes();

        // then (期待する結果):
        assert!(set.iter().all(|p| p.wager.is_none()
            && p.cash_out_target.is_none()
            && p.score.is_none()));
    }

    #[test]
    fn test_bankroll_stake_is_capped_by_balance() {
        // テスト項目: 残高を超える賭け金は残高までに制限される
        // given (前提条件):
        let mut bankroll = Bankroll::new(Wager::from_points(100));

        // when (操作):
        let staked = bankroll.stake(Wager::from_points(250));
        bankroll.credit_points(40);

        // then (期待する結果):
        assert_eq!(staked, Wager::from_points(100));
        assert_eq!(bankroll.balance(), Wager::from_points(40));
    }

    #[test]
    fn test_chat_message_wire_format() {
        // テスト項目: チャットメッセージは {sender, message} の JSON として解析される
        // given (前提条件):
        let raw = r#"{"sender":"CPU 1","message":"to the moon"}"#;

        // when (操作):
        let parsed = ChatMessage::from_wire(raw).unwrap();
        let malformed = ChatMessage::from_wire(r#"{"sender":"CPU 1"}"#);

        // then (期待する結果):
        assert_eq!(parsed, ChatMessage::new("CPU 1", "to the moon"));
        assert_eq!(parsed.to_wire().unwrap(), raw);
        assert!(matches!(
            malformed,
            Err(ValueObjectError::MalformedChatMessage(_))
        ));
    }
}
