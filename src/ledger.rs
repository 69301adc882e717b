//! Resource and reputation ledger.
//!
//! Applies one turn's delta bundle to the character's resources under the
//! documented clamps, plus the periodic economic accrual for the elapsed
//! time. All arithmetic is integer; the accrual floor matches
//! `floor(net_income * months_elapsed)` exactly.

use crate::constants::{
    DAMAGE_FLASH_THRESHOLD, EXPENSES_FLOOR, SIXTIETHS_PER_MONTH, STAT_MAX, STAT_MIN,
    TREASURY_FLOOR,
};
use crate::outcome::StateUpdates;
use crate::state::GameState;

/// Resource fields after one turn's deltas and accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerResult {
    pub treasury: i64,
    pub monthly_income: i64,
    pub monthly_expenses: i64,
    pub health: i32,
    pub safety: i32,
    pub public_image: i32,
    pub noble_standing: i32,
    pub clergy_trust: i32,
    pub cunning: i32,
    /// True when the health or safety hit was severe enough that the
    /// display layer should flash. Never stored in state.
    pub damage_flash: bool,
}

/// Clamp a vital or reputation value into its 0..=100 band. Idempotent.
#[must_use]
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Income minus expenses, accrued over the elapsed time and floored.
#[must_use]
pub fn economic_shift(net_income_per_month: i64, elapsed_sixtieths: u32) -> i64 {
    (net_income_per_month * i64::from(elapsed_sixtieths)).div_euclid(i64::from(SIXTIETHS_PER_MONTH))
}

/// Apply a validated delta bundle to the previous state's resources.
#[must_use]
pub fn apply_ledger(prev: &GameState, updates: &StateUpdates, elapsed_sixtieths: u32) -> LedgerResult {
    let net_income = prev.monthly_income - prev.monthly_expenses;
    let shift = economic_shift(net_income, elapsed_sixtieths);

    let treasury = (prev.treasury.saturating_add(updates.treasury_change).saturating_add(shift))
        .max(TREASURY_FLOOR);
    let monthly_income = prev.monthly_income.saturating_add(updates.income_change).max(0);
    let monthly_expenses = prev
        .monthly_expenses
        .saturating_add(updates.expense_change)
        .max(EXPENSES_FLOOR);

    LedgerResult {
        treasury,
        monthly_income,
        monthly_expenses,
        health: clamp_stat(prev.health.saturating_add(updates.health_change)),
        safety: clamp_stat(prev.safety.saturating_add(updates.safety_change)),
        public_image: clamp_stat(prev.public_image.saturating_add(updates.public_change)),
        noble_standing: clamp_stat(prev.noble_standing.saturating_add(updates.noble_change)),
        clergy_trust: clamp_stat(prev.clergy_trust.saturating_add(updates.clergy_change)),
        cunning: clamp_stat(prev.cunning.saturating_add(updates.cunning_change)),
        damage_flash: updates.health_change < DAMAGE_FLASH_THRESHOLD
            || updates.safety_change < DAMAGE_FLASH_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimeScale;

    fn base_state() -> GameState {
        GameState {
            treasury: 500,
            monthly_income: 10,
            monthly_expenses: 4,
            health: 80,
            safety: 85,
            public_image: 50,
            noble_standing: 10,
            clergy_trust: 35,
            cunning: 20,
            ..GameState::default()
        }
    }

    #[test]
    fn month_of_surplus_accrues_floored_net_income() {
        let prev = base_state();
        let updates = StateUpdates {
            treasury_change: -50,
            ..StateUpdates::default()
        };
        let result = apply_ledger(&prev, &updates, TimeScale::Month.sixtieths());
        // 500 - 50 + floor(6 * 1) = 456
        assert_eq!(result.treasury, 456);
    }

    #[test]
    fn negative_net_income_floors_toward_negative() {
        // floor(-3 * 0.25) = -1, not 0
        assert_eq!(economic_shift(-3, TimeScale::Week.sixtieths()), -1);
        assert_eq!(economic_shift(6, TimeScale::Week.sixtieths()), 1);
        assert_eq!(economic_shift(6, TimeScale::Day.sixtieths()), 0);
    }

    #[test]
    fn treasury_never_drops_below_floor() {
        let prev = base_state();
        let updates = StateUpdates {
            treasury_change: -1_000_000,
            ..StateUpdates::default()
        };
        let result = apply_ledger(&prev, &updates, 0);
        assert_eq!(result.treasury, -2_000);
    }

    #[test]
    fn income_and_expense_floors_hold() {
        let prev = base_state();
        let updates = StateUpdates {
            income_change: -999,
            expense_change: -999,
            ..StateUpdates::default()
        };
        let result = apply_ledger(&prev, &updates, 0);
        assert_eq!(result.monthly_income, 0);
        assert_eq!(result.monthly_expenses, 1);
    }

    #[test]
    fn vitals_and_reputations_stay_in_band() {
        let prev = base_state();
        let updates = StateUpdates {
            health_change: -200,
            safety_change: 200,
            public_change: 60,
            noble_change: -60,
            ..StateUpdates::default()
        };
        let result = apply_ledger(&prev, &updates, 0);
        assert_eq!(result.health, 0);
        assert_eq!(result.safety, 100);
        assert_eq!(result.public_image, 100);
        assert_eq!(result.noble_standing, 0);
    }

    #[test]
    fn clamping_is_idempotent() {
        for value in [-5, 0, 42, 100, 250] {
            assert_eq!(clamp_stat(clamp_stat(value)), clamp_stat(value));
        }
    }

    #[test]
    fn severe_hits_raise_the_damage_flash() {
        let prev = base_state();
        let mild = StateUpdates {
            health_change: -15,
            ..StateUpdates::default()
        };
        assert!(!apply_ledger(&prev, &mild, 0).damage_flash);

        let severe = StateUpdates {
            safety_change: -16,
            ..StateUpdates::default()
        };
        assert!(apply_ledger(&prev, &severe, 0).damage_flash);
    }

    #[test]
    fn low_health_hit_bottoms_out_at_zero() {
        let mut prev = base_state();
        prev.health = 10;
        let updates = StateUpdates {
            health_change: -15,
            ..StateUpdates::default()
        };
        let result = apply_ledger(&prev, &updates, 0);
        assert_eq!(result.health, 0);
    }
}
