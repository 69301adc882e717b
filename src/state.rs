//! Persistent game state for a Statecraft playthrough.
//!
//! The [`GameState`] record is the single source of truth for a session. It
//! is replaced wholesale by the turn orchestrator; nothing mutates it in
//! place while a reader might observe it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{SIXTIETHS_PER_MONTH, STAT_MAX, STAT_MIN};

/// Granularity of elapsed time covered by a single directive.
///
/// Elapsed time is measured in sixtieths of a month so that every scale is
/// exact in integer arithmetic (a day is 2/60, a week 15/60). This avoids
/// the floating-point drift that would otherwise swallow repeated
/// day-scale actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeScale {
    Day,
    Week,
    #[default]
    Month,
    Year,
    FiveYears,
}

impl TimeScale {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::FiveYears => "5_years",
        }
    }

    /// Elapsed time in sixtieths of a month.
    #[must_use]
    pub const fn sixtieths(self) -> u32 {
        match self {
            Self::Day => 2,
            Self::Week => 15,
            Self::Month => SIXTIETHS_PER_MONTH,
            Self::Year => 12 * SIXTIETHS_PER_MONTH,
            Self::FiveYears => 60 * SIXTIETHS_PER_MONTH,
        }
    }

    /// Elapsed months as a fraction, for display purposes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn months(self) -> f32 {
        self.sixtieths() as f32 / SIXTIETHS_PER_MONTH as f32
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeScale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "5_years" => Ok(Self::FiveYears),
            _ => Err(()),
        }
    }
}

impl From<TimeScale> for String {
    fn from(value: TimeScale) -> Self {
        value.as_str().to_string()
    }
}

/// Category attached to a world event when the oracle reports one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorldEventCategory {
    War,
    Plague,
    Heresy,
    Trade,
    #[default]
    Court,
}

impl WorldEventCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::War => "war",
            Self::Plague => "plague",
            Self::Heresy => "heresy",
            Self::Trade => "trade",
            Self::Court => "court",
        }
    }

    /// Parse a loosely-cased label, falling back to [`Self::Court`].
    #[must_use]
    pub fn parse_lenient(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "war" => Self::War,
            "plague" => Self::Plague,
            "heresy" => Self::Heresy,
            "trade" => Self::Trade,
            _ => Self::Court,
        }
    }
}

impl fmt::Display for WorldEventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry in the append-only world chronicle. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldEvent {
    pub id: String,
    pub turn: u32,
    pub category: WorldEventCategory,
    pub headline: String,
    pub body: String,
    pub impact_label: String,
}

/// Tone of a chronicle log entry, used by the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    #[default]
    Neutral,
    Violent,
    Success,
    Setback,
    Hardship,
    LevelUp,
    Whisper,
    Adaptation,
}

/// A single narrative log entry. Logs are append-only and never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub message: String,
    #[serde(default)]
    pub whisper: Option<String>,
    #[serde(default)]
    pub ripple_effect: Option<String>,
    #[serde(default)]
    pub category: LogCategory,
}

/// A power bloc the character interacts with. Factions are merged by id
/// and never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faction {
    pub id: String,
    pub name: String,
    pub influence: i32,
    pub opinion: i32,
    pub leader: String,
    pub leader_ambition: i32,
    pub leader_fear: i32,
    #[serde(default)]
    pub secrets_discovered: Vec<String>,
    #[serde(default)]
    pub alliances: Vec<String>,
}

/// Kind of node in the world hierarchy returned by region enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapNodeKind {
    Realm,
    Duchy,
    County,
    #[default]
    City,
    Village,
    Castle,
    Republic,
    Theocracy,
}

/// A node in the hierarchical world map, with the secular and church
/// power-holders for that place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: String,
    pub name: String,
    pub kind: MapNodeKind,
    #[serde(default)]
    pub nobility_title: Option<String>,
    #[serde(default)]
    pub nobility_ruler: Option<String>,
    #[serde(default)]
    pub church_title: Option<String>,
    #[serde(default)]
    pub church_ruler: Option<String>,
    #[serde(default)]
    pub children: Vec<MapNode>,
}

/// Rolling behavioral statistics fed back to the oracle as steering
/// context. The core maintains these but never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TacticalProfile {
    #[serde(default)]
    pub economic_actions: u32,
    #[serde(default)]
    pub aggressive_actions: u32,
    #[serde(default)]
    pub diplomatic_actions: u32,
    #[serde(default)]
    pub subterfuge_actions: u32,
    /// Running percentage of turns judged successful, 0..=100.
    #[serde(default)]
    pub success_rate: i32,
    /// Monotonic difficulty signal, soft-capped at 100.
    #[serde(default)]
    pub adaptation_level: f32,
}

/// Record of a deceased character within the session lineage.
///
/// The snapshot holds the full state as of the start of the fatal turn, so
/// re-inhabiting restores a live predecessor rather than a corpse. Its own
/// lineage is emptied when stored to prevent recursive growth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyCharacter {
    pub name: String,
    pub rank: String,
    pub age_at_death: u32,
    pub cause: String,
    pub turn_died: u32,
    #[serde(default)]
    pub snapshot: Option<Box<GameState>>,
}

/// The full persistent state of one playthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameState {
    // Identity and time
    pub character_name: String,
    pub rank_title: String,
    pub age: u32,
    pub turn: u32,
    /// Calendar month, 1..=12.
    pub month: u8,
    /// Sub-month progress in sixtieths of a month, 0..60. Carried across
    /// turns so day- and week-scale actions accumulate instead of being
    /// floored away.
    #[serde(default)]
    pub month_sixtieths: u8,
    pub year: i32,

    // Resources
    pub treasury: i64,
    pub monthly_income: i64,
    pub monthly_expenses: i64,

    // Vitals and reputations, all clamped 0..=100
    pub health: i32,
    pub safety: i32,
    pub public_image: i32,
    pub noble_standing: i32,
    pub clergy_trust: i32,
    pub cunning: i32,

    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub factions: Vec<Faction>,
    #[serde(default)]
    pub world_events: Vec<WorldEvent>,
    #[serde(default)]
    pub active_scenarios: Vec<String>,
    #[serde(default)]
    pub location_path: Vec<String>,
    #[serde(default)]
    pub discovered_regions: Vec<MapNode>,
    #[serde(default)]
    pub tactical_profile: TacticalProfile,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub lineage: Vec<LegacyCharacter>,
    #[serde(default)]
    pub suggestions: Vec<String>,

    /// Seed the character was generated from, kept for reproducibility.
    #[serde(default)]
    pub seed: u64,
    /// Set only by the termination evaluator.
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub game_over_reason: Option<String>,
}

impl GameState {
    /// Whether the state is terminal and awaiting a legacy choice.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.game_over
    }

    /// The most recent `n` log entries, oldest first.
    #[must_use]
    pub fn log_tail(&self, n: usize) -> &[LogEntry] {
        let start = self.logs.len().saturating_sub(n);
        &self.logs[start..]
    }

    /// Current leaf location name, if any.
    #[must_use]
    pub fn current_place(&self) -> Option<&str> {
        self.location_path.last().map(String::as_str)
    }

    /// Debug-only invariant sweep used by tests after every transition.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let stats = [
            self.health,
            self.safety,
            self.public_image,
            self.noble_standing,
            self.clergy_trust,
            self.cunning,
        ];
        stats.iter().all(|s| (STAT_MIN..=STAT_MAX).contains(s))
            && self.treasury >= crate::constants::TREASURY_FLOOR
            && self.monthly_income >= 0
            && self.monthly_expenses >= 1
            && (1..=12).contains(&self.month)
            && u32::from(self.month_sixtieths) < SIXTIETHS_PER_MONTH
            && self.turn >= 1
    }
}
