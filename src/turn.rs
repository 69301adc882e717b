//! Turn orchestration.
//!
//! A [`GameSession`] owns the live [`GameState`] and the phase machine
//! around it. One turn is: accept a directive, wait on the oracle, then
//! run the fixed apply order — calendar, ledger, tactical profile,
//! world/scenario — and hand the candidate to the termination evaluator.
//! The state is always replaced wholesale; a failed application leaves
//! the previous state fully intact.

use crate::calendar::advance_calendar;
use crate::error::{EngineError, SubmitError};
use crate::ledger::apply_ledger;
use crate::outcome::{TurnOutcome, ValidatedOutcome};
use crate::state::{GameState, LegacyCharacter, LogCategory, LogEntry, TimeScale};
use crate::tactics::advance_profile;
use crate::termination::{Death, evaluate_termination};
use crate::world::{append_world_event, merge_faction_updates, replace_scenarios};

/// Where the session currently sits. A submission is accepted only from
/// `Idle`; an oracle failure returns the session to `Idle` without
/// touching state, so "error" is a reported value rather than a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingOracle,
    Applying,
    Terminal,
}

/// Proof that a submission was accepted. Consumed exactly once, by either
/// [`GameSession::apply_outcome`] or [`GameSession::abort_turn`], so a
/// late oracle response after a timeout has nothing left to apply to.
#[derive(Debug)]
pub struct PendingTurn {
    directive: String,
    time_scale: TimeScale,
    travel_path: Option<Vec<String>>,
    turn: u32,
}

impl PendingTurn {
    #[must_use]
    pub fn directive(&self) -> &str {
        &self.directive
    }

    #[must_use]
    pub const fn time_scale(&self) -> TimeScale {
        self.time_scale
    }

    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }
}

/// What one applied turn looked like, for the display layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    /// Turn number the action resolved as.
    pub turn: u32,
    pub narrative: String,
    pub category: LogCategory,
    /// Transient severe-damage signal for the display layer.
    pub damage_flash: bool,
    /// True when the oracle's answer was unusable and the local fallback
    /// was applied instead. The turn still counts.
    pub degraded: bool,
    pub death: Option<Death>,
}

/// A live playthrough: the current state plus the turn phase machine.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    state: GameState,
    phase: Phase,
}

impl GameSession {
    /// Wrap an existing state, entering `Terminal` if it already ended.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        let phase = if state.is_terminal() {
            Phase::Terminal
        } else {
            Phase::Idle
        };
        Self { state, phase }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Consume the session, returning the underlying game state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Replace the live state wholesale (legacy transitions, loads).
    pub fn replace_state(&mut self, state: GameState) {
        self.phase = if state.is_terminal() {
            Phase::Terminal
        } else {
            Phase::Idle
        };
        self.state = state;
    }

    /// Accept a directive for resolution.
    ///
    /// # Errors
    ///
    /// Rejected without a transition when the directive is blank with no
    /// travel path, when a turn is already in flight, or when the game is
    /// over.
    pub fn begin_turn(
        &mut self,
        directive: &str,
        time_scale: TimeScale,
        travel_path: Option<Vec<String>>,
    ) -> Result<PendingTurn, SubmitError> {
        match self.phase {
            Phase::Terminal => return Err(SubmitError::GameOver),
            Phase::AwaitingOracle | Phase::Applying => return Err(SubmitError::TurnInFlight),
            Phase::Idle => {}
        }
        if directive.trim().is_empty() && travel_path.is_none() {
            return Err(SubmitError::EmptyDirective);
        }
        self.phase = Phase::AwaitingOracle;
        Ok(PendingTurn {
            directive: directive.trim().to_string(),
            time_scale,
            travel_path,
            turn: self.state.turn,
        })
    }

    /// Give up on a pending turn after an oracle failure. State and turn
    /// counter are untouched; the directive may be resubmitted.
    pub fn abort_turn(&mut self, pending: PendingTurn) {
        log::debug!("turn {} aborted before application", pending.turn);
        self.phase = Phase::Idle;
    }

    /// Apply a validated oracle outcome, producing the next state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StateApply`] if the candidate state cannot
    /// be computed; the previous state is preserved unchanged and the
    /// session returns to idle.
    pub fn apply_outcome(
        &mut self,
        pending: PendingTurn,
        validated: &ValidatedOutcome,
    ) -> Result<TurnReport, EngineError> {
        self.phase = Phase::Applying;
        match resolve_turn(&self.state, &pending, validated.outcome(), validated.is_fallback()) {
            Ok((next, report)) => {
                self.phase = if report.death.is_some() {
                    Phase::Terminal
                } else {
                    Phase::Idle
                };
                self.state = next;
                Ok(report)
            }
            Err(err) => {
                self.phase = Phase::Idle;
                Err(err)
            }
        }
    }
}

fn log_category(outcome: &TurnOutcome, terminal: bool) -> LogCategory {
    if terminal {
        LogCategory::Hardship
    } else if outcome.updates.health_change < 0 || outcome.updates.safety_change < 0 {
        LogCategory::Violent
    } else if outcome.adaptation_note.is_some() {
        LogCategory::Adaptation
    } else {
        LogCategory::Neutral
    }
}

/// Pure turn reducer: previous state plus one outcome yields the next
/// state and its report. Free of any rendering or transport concern.
fn resolve_turn(
    prev: &GameState,
    pending: &PendingTurn,
    outcome: &TurnOutcome,
    degraded: bool,
) -> Result<(GameState, TurnReport), EngineError> {
    let calendar = advance_calendar(
        prev.month,
        prev.month_sixtieths,
        prev.year,
        prev.age,
        pending.time_scale,
    );
    let ledger = apply_ledger(prev, &outcome.updates, calendar.elapsed_sixtieths);
    let profile = advance_profile(
        &prev.tactical_profile,
        &pending.directive,
        &outcome.updates,
        prev.turn,
    );

    let mut factions = prev.factions.clone();
    merge_faction_updates(&mut factions, &outcome.updates.faction_updates);

    let mut world_events = prev.world_events.clone();
    if let Some(event) = outcome.updates.new_world_event.clone() {
        append_world_event(&mut world_events, event, prev.turn);
    }

    let mut active_scenarios = prev.active_scenarios.clone();
    replace_scenarios(&mut active_scenarios, outcome.updates.updated_scenarios.clone());

    let death = evaluate_termination(
        calendar.age,
        ledger.treasury,
        ledger.health,
        ledger.safety,
        outcome,
    );
    let terminal = death.is_some();

    let category = log_category(outcome, terminal);
    let mut logs = prev.logs.clone();
    logs.push(LogEntry {
        turn: prev.turn,
        message: outcome.narrative.clone(),
        whisper: outcome.whisper.clone(),
        ripple_effect: outcome.ripple_context.clone(),
        category,
    });

    // An explicit travel path wins over an oracle-directed relocation.
    let location_path = pending
        .travel_path
        .clone()
        .or_else(|| outcome.updates.new_location_path.clone())
        .unwrap_or_else(|| prev.location_path.clone());

    let suggestions = if outcome.suggestions.is_empty() {
        prev.suggestions.clone()
    } else {
        outcome.suggestions.clone()
    };

    let turn = if terminal {
        prev.turn
    } else {
        prev.turn
            .checked_add(1)
            .ok_or_else(|| EngineError::StateApply("turn counter overflow".to_string()))?
    };

    let mut lineage = prev.lineage.clone();
    if let Some(death) = &death {
        let mut snapshot = prev.clone();
        snapshot.lineage = Vec::new();
        lineage.push(LegacyCharacter {
            name: prev.character_name.clone(),
            rank: outcome
                .updates
                .new_rank_title
                .clone()
                .unwrap_or_else(|| prev.rank_title.clone()),
            age_at_death: calendar.age,
            cause: death.reason.clone(),
            turn_died: prev.turn,
            snapshot: Some(Box::new(snapshot)),
        });
    }

    let next = GameState {
        character_name: prev.character_name.clone(),
        rank_title: outcome
            .updates
            .new_rank_title
            .clone()
            .unwrap_or_else(|| prev.rank_title.clone()),
        age: calendar.age,
        turn,
        month: calendar.month,
        month_sixtieths: calendar.month_sixtieths,
        year: calendar.year,
        treasury: ledger.treasury,
        monthly_income: ledger.monthly_income,
        monthly_expenses: ledger.monthly_expenses,
        health: if terminal { 0 } else { ledger.health },
        safety: ledger.safety,
        public_image: ledger.public_image,
        noble_standing: ledger.noble_standing,
        clergy_trust: ledger.clergy_trust,
        cunning: ledger.cunning,
        traits: outcome
            .updates
            .new_traits
            .clone()
            .unwrap_or_else(|| prev.traits.clone()),
        factions,
        world_events,
        active_scenarios,
        location_path,
        discovered_regions: prev.discovered_regions.clone(),
        tactical_profile: profile,
        logs,
        lineage,
        suggestions,
        seed: prev.seed,
        game_over: terminal,
        game_over_reason: death.as_ref().map(|d| d.reason.clone()),
    };

    let report = TurnReport {
        turn: prev.turn,
        narrative: outcome.narrative.clone(),
        category,
        damage_flash: ledger.damage_flash,
        degraded,
        death,
    };
    Ok((next, report))
}
