//! Statecraft Game Engine
//!
//! Platform-agnostic turn-resolution core for the Statecraft narrative
//! life-simulation game. The crate owns the state-transition semantics —
//! calendar advancement, resource clamping, world bookkeeping, game-over
//! detection, and succession — while the narrative oracle, rendering,
//! and persistence transports live behind ports.

pub mod calendar;
pub mod constants;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod legacy;
pub mod oracle;
pub mod outcome;
pub mod state;
pub mod tactics;
pub mod termination;
pub mod turn;
pub mod world;

// Re-export commonly used types
pub use calendar::{CalendarStep, advance_calendar};
pub use error::{EngineError, OracleError, SubmitError};
pub use factory::initial_state;
pub use ledger::{LedgerResult, apply_ledger, clamp_stat, economic_shift};
pub use legacy::{LegacyChoice, heir_name, succeed};
pub use oracle::{
    CONTEXT_LOG_TAIL, DEFAULT_ORACLE_TIMEOUT_SECS, Oracle, OracleContext,
};
pub use outcome::{
    FactionDelta, NewWorldEvent, RawOutcome, StateUpdates, TurnOutcome, ValidatedOutcome,
    fallback_outcome, validate_payload,
};
pub use state::{
    Faction, GameState, LegacyCharacter, LogCategory, LogEntry, MapNode, MapNodeKind,
    TacticalProfile, TimeScale, WorldEvent, WorldEventCategory,
};
pub use tactics::{TacticHits, advance_profile, classify_directive};
pub use termination::{Death, DeathCause, evaluate_termination};
pub use turn::{GameSession, PendingTurn, Phase, TurnReport};
pub use world::{
    RegionAtlas, append_world_event, find_region, merge_faction_updates, record_region,
    replace_scenarios,
};

/// Fixed identifier of the single persistence slot.
pub const SAVE_KEY: &str = "statecraft_v4_save";

/// Trait for abstracting the opaque key-value save slot.
/// Platform-specific implementations should provide this.
pub trait SaveSlot {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Overwrite the slot with a serialized state payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be stored.
    fn write(&self, key: &str, payload: &str) -> Result<(), Self::Error>;

    /// Read the slot, `None` when no save exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Clear the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be cleared.
    fn clear(&self, key: &str) -> Result<(), Self::Error>;
}

/// Main game engine binding the oracle and persistence ports to the
/// session orchestration.
pub struct GameEngine<O, S>
where
    O: Oracle,
    S: SaveSlot,
{
    oracle: O,
    slot: S,
}

impl<O, S> GameEngine<O, S>
where
    O: Oracle,
    S: SaveSlot,
{
    /// Create a new engine with the provided oracle and save slot.
    pub const fn new(oracle: O, slot: S) -> Self {
        Self { oracle, slot }
    }

    /// Start a brand-new game, discarding any existing save.
    pub fn new_game(&self, seed: u64) -> GameSession {
        if let Err(err) = self.slot.clear(SAVE_KEY) {
            log::warn!("failed to clear save slot: {err}");
        }
        GameSession::new(initial_state(seed))
    }

    /// Load the saved session, `None` when no save exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the slot cannot be read or its payload does
    /// not parse as a saved state.
    pub fn load_game(&self) -> Result<Option<GameSession>, anyhow::Error> {
        let Some(payload) = self.slot.read(SAVE_KEY)? else {
            return Ok(None);
        };
        let state: GameState = serde_json::from_str(&payload)?;
        Ok(Some(GameSession::new(state)))
    }

    /// Resume from the save slot, or start fresh when the slot is empty
    /// or its contents cannot be parsed. Corrupt saves are discarded.
    pub fn load_or_new(&self, seed: u64) -> GameSession {
        match self.load_game() {
            Ok(Some(session)) => session,
            Ok(None) => GameSession::new(initial_state(seed)),
            Err(err) => {
                log::warn!("corrupt save discarded, starting fresh: {err}");
                self.new_game(seed)
            }
        }
    }

    /// Resolve one submitted action end to end: consult the oracle,
    /// validate its payload, and apply the outcome.
    ///
    /// # Errors
    ///
    /// Returns the submission rejection or oracle failure; in either case
    /// the state and turn counter are unchanged and the directive may be
    /// resubmitted. A malformed (but received) payload is not an error —
    /// it degrades to a fallback turn that still counts.
    pub fn submit_action(
        &self,
        session: &mut GameSession,
        directive: &str,
        time_scale: TimeScale,
        travel_path: Option<Vec<String>>,
    ) -> Result<TurnReport, EngineError> {
        let pending = session.begin_turn(directive, time_scale, travel_path)?;
        let consulted = {
            let ctx =
                OracleContext::from_state(session.state(), pending.directive(), time_scale);
            self.oracle.consult(&ctx)
        };
        let payload = match consulted {
            Ok(payload) => payload,
            Err(err) => {
                session.abort_turn(pending);
                return Err(err.into());
            }
        };
        let validated = validate_payload(payload, &session.state().rank_title);
        let report = session.apply_outcome(pending, &validated)?;
        if report.death.is_none() {
            // Fire-and-forget: a failed save never fails the turn.
            self.persist(session.state());
        }
        Ok(report)
    }

    /// Apply a legacy choice to a terminal session, producing the
    /// successor state and restarting the save slot lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoSuccessionPending`] outside a terminal
    /// state, or [`EngineError::UnknownLineageEntry`] for a bad
    /// re-inhabitation index.
    pub fn choose_legacy(
        &self,
        session: &mut GameSession,
        choice: LegacyChoice,
        seed: u64,
    ) -> Result<(), EngineError> {
        if !session.state().is_terminal() {
            return Err(EngineError::NoSuccessionPending);
        }
        let next = legacy::succeed(session.state(), choice, seed)?;
        if let Err(err) = self.slot.clear(SAVE_KEY) {
            log::warn!("failed to clear save slot: {err}");
        }
        self.persist(&next);
        session.replace_state(next);
        Ok(())
    }

    /// Enrich and cache a region by place name, consulting the atlas only
    /// when the region is not already discovered.
    ///
    /// # Errors
    ///
    /// Returns the atlas lookup error when the place cannot be resolved.
    pub fn discover_region<A: RegionAtlas>(
        &self,
        session: &mut GameSession,
        atlas: &A,
        place: &str,
    ) -> Result<MapNode, A::Error> {
        if let Some(found) = find_region(&session.state().discovered_regions, place) {
            return Ok(found.clone());
        }
        let node = atlas.lookup_region(place, session.state().year)?;
        let mut state = session.state().clone();
        record_region(&mut state.discovered_regions, node.clone());
        session.replace_state(state);
        self.persist(session.state());
        Ok(node)
    }

    fn persist(&self, state: &GameState) {
        match serde_json::to_string(state) {
            Ok(payload) => {
                if let Err(err) = self.slot.write(SAVE_KEY, &payload) {
                    log::warn!("failed to persist state: {err}");
                }
            }
            Err(err) => log::warn!("failed to serialize state: {err}"),
        }
    }
}
