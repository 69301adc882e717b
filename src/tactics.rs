//! Tactical profile tracking.
//!
//! Classifies the raw directive text into behavioral buckets by keyword
//! membership and maintains the rolling success rate and adaptation level
//! the oracle reads back as steering context. Deliberately a plain
//! keyword matcher, not a learned model.

use smallvec::SmallVec;

use crate::constants::{
    ADAPTATION_CAP, AGGRESSIVE_KEYWORDS, DIPLOMATIC_KEYWORDS, ECONOMIC_KEYWORDS,
    SUBTERFUGE_KEYWORDS,
};
use crate::outcome::StateUpdates;
use crate::state::TacticalProfile;

/// Which behavioral buckets a directive landed in. Non-exclusive: a
/// directive may match zero, one, or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TacticHits {
    pub economic: bool,
    pub aggressive: bool,
    pub diplomatic: bool,
    pub subterfuge: bool,
}

impl TacticHits {
    /// Labels of the matched buckets, for log and test output.
    #[must_use]
    pub fn labels(self) -> SmallVec<[&'static str; 4]> {
        let mut labels = SmallVec::new();
        if self.economic {
            labels.push("economic");
        }
        if self.aggressive {
            labels.push("aggressive");
        }
        if self.diplomatic {
            labels.push("diplomatic");
        }
        if self.subterfuge {
            labels.push("subterfuge");
        }
        labels
    }
}

fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Classify a directive by case-insensitive keyword membership.
#[must_use]
pub fn classify_directive(directive: &str) -> TacticHits {
    let text = directive.to_lowercase();
    TacticHits {
        economic: matches_any(&text, ECONOMIC_KEYWORDS),
        aggressive: matches_any(&text, AGGRESSIVE_KEYWORDS),
        diplomatic: matches_any(&text, DIPLOMATIC_KEYWORDS),
        subterfuge: matches_any(&text, SUBTERFUGE_KEYWORDS),
    }
}

/// A turn counts as a success when nothing the player cares about got
/// worse: no health, safety, or treasury loss.
#[must_use]
pub const fn is_success(updates: &StateUpdates) -> bool {
    updates.health_change >= 0 && updates.safety_change >= 0 && updates.treasury_change >= 0
}

/// Advance the profile for one applied turn.
///
/// `prev_turn` is the turn number before the orchestrator increments it,
/// so the running success average weights every applied turn equally.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn advance_profile(
    prev: &TacticalProfile,
    directive: &str,
    updates: &StateUpdates,
    prev_turn: u32,
) -> TacticalProfile {
    let hits = classify_directive(directive);
    let sample = if is_success(updates) { 100 } else { 0 };
    let success_rate = ((i64::from(prev.success_rate) * i64::from(prev_turn) + sample)
        / i64::from(prev_turn + 1)) as i32;

    TacticalProfile {
        economic_actions: prev.economic_actions + u32::from(hits.economic),
        aggressive_actions: prev.aggressive_actions + u32::from(hits.aggressive),
        diplomatic_actions: prev.diplomatic_actions + u32::from(hits.diplomatic),
        subterfuge_actions: prev.subterfuge_actions + u32::from(hits.subterfuge),
        success_rate,
        adaptation_level: (prev.adaptation_level + updates.adaptation_increase)
            .min(ADAPTATION_CAP),
    }
}
