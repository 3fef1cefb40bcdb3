//! Message formatting utilities for client display.

use liftoff_server::infrastructure::dto::{
    http::{RankingEntryDto, RoundStateDto},
    websocket::{ParticipantDto, RoundEventMessage},
};
use liftoff_shared::time::timestamp_to_jst_rfc3339;

const RULE: &str = "============================================================";

/// Multiplier samples are printed once per unit of round-time.
const TICKS_PER_PRINTED_SAMPLE: u32 = 10;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a chat message
    ///
    /// Own messages are marked with `(me)`.
    pub fn format_chat_message(sender: &str, body: &str, me: &str) -> String {
        let me_suffix = if sender == me { " (me)" } else { "" };
        format!("\n@{}{}: {}\n", sender, me_suffix, body)
    }

    /// Format a round event.
    ///
    /// Returns `None` for multiplier samples that are skipped to keep the
    /// terminal readable.
    pub fn format_round_event(event: &RoundEventMessage) -> Option<String> {
        match event {
            RoundEventMessage::RoundStarted {
                round_id,
                participants,
                speed_factor,
                tick_interval_ms,
                started_at,
            } => {
                let mut output = format!(
                    "\n\n{}\nRound #{} started at {} (speed {:.2}, tick {}ms)\n",
                    RULE,
                    round_id,
                    timestamp_to_jst_rfc3339(*started_at),
                    speed_factor,
                    tick_interval_ms
                );
                for participant in participants {
                    output.push_str(&Self::format_stake(participant));
                }
                output.push_str(RULE);
                output.push('\n');
                Some(output)
            }
            RoundEventMessage::Multiplier {
                tick, multiplier, ..
            } => {
                if tick % TICKS_PER_PRINTED_SAMPLE != 0 {
                    return None;
                }
                Some(format!("  {:>6.2}x\n", multiplier))
            }
            RoundEventMessage::RoundEnded {
                round_id,
                crash_point,
                participants,
                ranking,
                balance,
                ..
            } => {
                let mut output = format!(
                    "\n{}\nRound #{} crashed at {:.2}x\n",
                    RULE, round_id, crash_point
                );
                for (rank, id) in ranking.iter().enumerate() {
                    if let Some(participant) = participants.iter().find(|p| p.id == *id) {
                        output.push_str(&format!(
                            "{:>2}. {}\n",
                            rank + 1,
                            Self::format_result(participant)
                        ));
                    }
                }
                output.push_str(&format!("Balance: {:.2}\n{}\n", balance, RULE));
                Some(output)
            }
            RoundEventMessage::RoundReset => Some("\nRound reset\n".to_string()),
        }
    }

    fn format_stake(participant: &ParticipantDto) -> String {
        match (participant.wager, participant.cash_out_target) {
            (Some(wager), Some(target)) => format!(
                "  {} bets {:.2} @ {:.2}x\n",
                participant.name, wager, target
            ),
            _ => format!("  {} is not betting\n", participant.name),
        }
    }

    fn format_result(participant: &ParticipantDto) -> String {
        match participant.score {
            Some(score) => format!("{} cashed out: +{}", participant.name, score),
            None => format!("{} busted", participant.name),
        }
    }

    /// Format a round snapshot returned by the HTTP API
    pub fn format_state(state: &RoundStateDto) -> String {
        let round = state
            .round_id
            .map_or_else(|| "-".to_string(), |id| format!("#{}", id));
        let crash_point = state
            .crash_point
            .map_or_else(|| "hidden".to_string(), |c| format!("{:.2}x", c));
        format!(
            "\nRound {}: {} | multiplier {:.2}x | crash point {} | speed {:.2} | balance {:.2}\n",
            round, state.phase, state.current_multiplier, crash_point, state.speed_factor, state.balance
        )
    }

    /// Format the ranking returned by the HTTP API
    pub fn format_ranking(entries: &[RankingEntryDto]) -> String {
        let mut output = String::from("\nRanking:\n");
        for entry in entries {
            let score = entry
                .score
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            output.push_str(&format!("{:>2}. {} {}\n", entry.rank, entry.name, score));
        }
        output
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
