//! Centralized balance and tuning constants for Statecraft game logic.
//!
//! These values define the deterministic math for the turn-resolution
//! engine. Keeping them together ensures that gameplay can only be
//! adjusted via code changes reviewed in version control.

// Calendar -----------------------------------------------------------------
pub(crate) const SIXTIETHS_PER_MONTH: u32 = 60;
pub(crate) const MONTHS_PER_YEAR: u32 = 12;

// Stat clamps --------------------------------------------------------------
pub(crate) const STAT_MIN: i32 = 0;
pub(crate) const STAT_MAX: i32 = 100;
pub(crate) const TREASURY_FLOOR: i64 = -2_000;
pub(crate) const EXPENSES_FLOOR: i64 = 1;

// Termination thresholds ---------------------------------------------------
pub(crate) const DEBT_COLLAPSE_THRESHOLD: i64 = -1_000;
pub(crate) const AGE_LIMIT: u32 = 90;

// Tactical profile ---------------------------------------------------------
pub(crate) const DEFAULT_ADAPTATION_INCREASE: f32 = 0.5;
pub(crate) const ADAPTATION_CAP: f32 = 100.0;
pub(crate) const ECONOMIC_KEYWORDS: &[&str] = &["gold", "buy", "sell", "treasury", "tax"];
pub(crate) const AGGRESSIVE_KEYWORDS: &[&str] = &["kill", "attack", "war", "execute", "force"];
pub(crate) const DIPLOMATIC_KEYWORDS: &[&str] = &["negotiate", "talk", "marry", "alliance"];
pub(crate) const SUBTERFUGE_KEYWORDS: &[&str] = &["whisper", "spy", "secret", "hide"];

// Damage signal ------------------------------------------------------------
pub(crate) const DAMAGE_FLASH_THRESHOLD: i32 = -15;

// Succession ---------------------------------------------------------------
pub(crate) const HEIR_TREASURY_NUMERATOR: i64 = 1;
pub(crate) const HEIR_TREASURY_DENOMINATOR: i64 = 2;
pub(crate) const HEIR_STANDING_NUMERATOR: i64 = 7;
pub(crate) const HEIR_STANDING_DENOMINATOR: i64 = 10;
pub(crate) const HEIR_TREASURY_MINIMUM: i64 = 25;
pub(crate) const HEIR_STANDING_MINIMUM: i32 = 20;
pub(crate) const REINHABIT_HEALTH_FLOOR: i32 = 50;
pub(crate) const REINHABIT_SAFETY_FLOOR: i32 = 25;

// Starting character -------------------------------------------------------
pub(crate) const START_YEAR: i32 = 1400;
pub(crate) const START_MONTH: u8 = 1;
pub(crate) const START_AGE_BASE: u32 = 14;
pub(crate) const START_AGE_SPREAD: u32 = 4;
pub(crate) const START_TREASURY: i64 = 25;
pub(crate) const START_INCOME: i64 = 3;
pub(crate) const START_EXPENSES: i64 = 1;
pub(crate) const START_HEALTH: i32 = 100;
pub(crate) const START_SAFETY: i32 = 85;
pub(crate) const START_PUBLIC_IMAGE: i32 = 50;
pub(crate) const START_NOBLE_STANDING: i32 = 10;
pub(crate) const START_CLERGY_TRUST: i32 = 35;
pub(crate) const START_CUNNING: i32 = 20;

// Canonical death reasons --------------------------------------------------
pub(crate) const REASON_DEBT: &str =
    "Your astronomical debts led to your public execution by creditors.";
pub(crate) const REASON_AGE: &str =
    "Age finally claimed what no enemy could. You pass into legend.";
pub(crate) const REASON_HEALTH: &str = "Your body failed you at last.";
pub(crate) const REASON_SAFETY: &str = "Your enemies found you unguarded.";
pub(crate) const REASON_GENERIC: &str = "Your thread of life has been cut.";

// Degraded-oracle fallback -------------------------------------------------
pub(crate) const FALLBACK_CUNNING_GAIN: i32 = 1;
pub(crate) const FALLBACK_SUGGESTIONS: &[&str] = &[
    "Inquire about local rumors",
    "Seek to increase your meager savings",
    "Train your mind and body",
];
