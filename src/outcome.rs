//! Oracle outcome payloads and the validation/coercion boundary.
//!
//! The oracle is an untrusted generator: its payload arrives as loose
//! JSON whose numeric fields may be absent or mistyped. Everything is
//! coerced here, once, into a fully-typed [`TurnOutcome`] so the ledger
//! and orchestrator never touch optional chains. A payload missing its
//! required narrative or state-update block degrades into the
//! [`ValidatedOutcome::Fallback`] variant, which still counts as an
//! applied turn.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::constants::{DEFAULT_ADAPTATION_INCREASE, FALLBACK_CUNNING_GAIN, FALLBACK_SUGGESTIONS};
use crate::state::WorldEventCategory;

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_i64(&value))
}

fn lenient_opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_opt_i64(&value))
}

fn lenient_opt_f32<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    #[allow(clippy::cast_possible_truncation)]
    Ok(value.as_f64().map(|f| f as f32))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_i64(value: &Value) -> i64 {
    coerce_opt_i64(value).unwrap_or(0)
}

#[allow(clippy::cast_possible_truncation)]
fn coerce_opt_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.floor() as i64))
}

/// Loosely-typed state-update block as received from the oracle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStateUpdates {
    #[serde(deserialize_with = "lenient_i64")]
    pub treasury_change: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub income_change: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub expense_change: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub public_change: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub noble_change: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub clergy_change: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub cunning_change: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub safety_change: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub health_change: i64,
    #[serde(deserialize_with = "lenient_opt_f32")]
    pub adaptation_increase: Option<f32>,
    pub new_traits: Option<Vec<String>>,
    pub new_rank_title: Option<String>,
    pub new_location_path: Option<Vec<String>>,
    pub faction_updates: Vec<RawFactionUpdate>,
    pub new_world_event: Option<RawWorldEvent>,
    pub updated_scenarios: Option<Vec<String>>,
}

/// Partial per-faction update keyed by faction id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFactionUpdate {
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient_opt_i64")]
    pub opinion: Option<i64>,
    #[serde(deserialize_with = "lenient_opt_i64")]
    pub influence: Option<i64>,
}

/// World event as reported by the oracle, before tagging with turn and id.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawWorldEvent {
    pub category: String,
    pub headline: String,
    pub body: String,
    pub impact_label: String,
}

/// Top-level oracle payload shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawOutcome {
    pub narrative: String,
    pub whisper: Option<String>,
    pub ripple_context: Option<String>,
    pub adaptation_note: Option<String>,
    pub state_updates: Option<RawStateUpdates>,
    pub suggestions: Vec<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub game_over: bool,
    pub game_over_reason: Option<String>,
}

/// Fully-typed numeric delta bundle, defaults applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdates {
    pub treasury_change: i64,
    pub income_change: i64,
    pub expense_change: i64,
    pub public_change: i32,
    pub noble_change: i32,
    pub clergy_change: i32,
    pub cunning_change: i32,
    pub safety_change: i32,
    pub health_change: i32,
    pub adaptation_increase: f32,
    pub new_traits: Option<Vec<String>>,
    pub new_rank_title: Option<String>,
    pub new_location_path: Option<Vec<String>>,
    pub faction_updates: Vec<FactionDelta>,
    pub new_world_event: Option<NewWorldEvent>,
    pub updated_scenarios: Option<Vec<String>>,
}

/// Validated partial faction update. Unmatched ids are dropped silently
/// at merge time; no faction is ever created from an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactionDelta {
    pub id: String,
    pub opinion: Option<i32>,
    pub influence: Option<i32>,
}

/// Validated new world event, ready to be tagged and appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorldEvent {
    pub category: WorldEventCategory,
    pub headline: String,
    pub body: String,
    pub impact_label: String,
}

/// One turn's outcome with every field defaulted and typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnOutcome {
    pub narrative: String,
    pub whisper: Option<String>,
    pub ripple_context: Option<String>,
    pub adaptation_note: Option<String>,
    pub updates: StateUpdates,
    pub suggestions: Vec<String>,
    pub game_over: bool,
    pub game_over_reason: Option<String>,
}

/// Outcome of boundary validation: a narrated turn, or the degraded local
/// fallback. Both are applied; the distinction is surfaced to the caller
/// so a degraded turn can be flagged without special-casing the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedOutcome {
    Narrated(TurnOutcome),
    Fallback(TurnOutcome),
}

impl ValidatedOutcome {
    #[must_use]
    pub const fn outcome(&self) -> &TurnOutcome {
        match self {
            Self::Narrated(outcome) | Self::Fallback(outcome) => outcome,
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Validate and coerce a raw oracle payload.
///
/// A payload is accepted when it parses and carries a non-blank narrative
/// and a state-update block; anything else degrades to the fallback
/// outcome for the given rank.
#[must_use]
pub fn validate_payload(payload: Value, rank_title: &str) -> ValidatedOutcome {
    let raw: RawOutcome = match serde_json::from_value(payload) {
        Ok(raw) => raw,
        Err(err) => {
            log::warn!("oracle payload unparseable, using fallback: {err}");
            return ValidatedOutcome::Fallback(fallback_outcome(rank_title));
        }
    };
    if raw.narrative.trim().is_empty() || raw.state_updates.is_none() {
        log::warn!("oracle payload missing narrative or state updates, using fallback");
        return ValidatedOutcome::Fallback(fallback_outcome(rank_title));
    }
    ValidatedOutcome::Narrated(raw.into_outcome())
}

impl RawOutcome {
    fn into_outcome(self) -> TurnOutcome {
        let updates = self.state_updates.unwrap_or_default();
        TurnOutcome {
            narrative: self.narrative,
            whisper: self.whisper.filter(|w| !w.trim().is_empty()),
            ripple_context: self.ripple_context.filter(|r| !r.trim().is_empty()),
            adaptation_note: self.adaptation_note.filter(|n| !n.trim().is_empty()),
            updates: updates.into_typed(),
            suggestions: self.suggestions,
            game_over: self.game_over,
            game_over_reason: self.game_over_reason.filter(|r| !r.trim().is_empty()),
        }
    }
}

impl RawStateUpdates {
    fn into_typed(self) -> StateUpdates {
        let faction_updates = self
            .faction_updates
            .into_iter()
            .filter_map(|update| {
                let id = update.id.filter(|id| !id.is_empty())?;
                Some(FactionDelta {
                    id,
                    opinion: update.opinion.map(clamp_i32),
                    influence: update.influence.map(clamp_i32),
                })
            })
            .collect();
        let new_world_event = self.new_world_event.and_then(|event| {
            if event.headline.trim().is_empty() {
                None
            } else {
                Some(NewWorldEvent {
                    category: WorldEventCategory::parse_lenient(&event.category),
                    headline: event.headline,
                    body: event.body,
                    impact_label: event.impact_label,
                })
            }
        });
        StateUpdates {
            treasury_change: self.treasury_change,
            income_change: self.income_change,
            expense_change: self.expense_change,
            public_change: clamp_i32(self.public_change),
            noble_change: clamp_i32(self.noble_change),
            clergy_change: clamp_i32(self.clergy_change),
            cunning_change: clamp_i32(self.cunning_change),
            safety_change: clamp_i32(self.safety_change),
            health_change: clamp_i32(self.health_change),
            adaptation_increase: self
                .adaptation_increase
                .unwrap_or(DEFAULT_ADAPTATION_INCREASE),
            new_traits: self.new_traits,
            new_rank_title: self.new_rank_title.filter(|t| !t.trim().is_empty()),
            new_location_path: self.new_location_path.filter(|p| !p.is_empty()),
            faction_updates,
            new_world_event,
            updated_scenarios: self.updated_scenarios,
        }
    }
}

/// The neutral zero-delta outcome applied when the oracle's answer is
/// unusable. Cunning still ticks up: a quiet period teaches something.
#[must_use]
pub fn fallback_outcome(rank_title: &str) -> TurnOutcome {
    TurnOutcome {
        narrative: format!(
            "You spent a period focusing on your duties as a {rank_title}. \
             The world continues to turn, and your survival is for now assured."
        ),
        updates: StateUpdates {
            cunning_change: FALLBACK_CUNNING_GAIN,
            ..StateUpdates::default()
        },
        suggestions: FALLBACK_SUGGESTIONS.iter().map(ToString::to_string).collect(),
        ..TurnOutcome::default()
    }
}
