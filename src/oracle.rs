//! Oracle port: the external narrative/outcome generator.
//!
//! The core never talks to a network itself. A transport implements
//! [`Oracle`] and maps its own failures onto [`OracleError`], keeping the
//! timeout case distinct so the player message can differ. The request
//! context is the derived subset of state the oracle steers by.

use serde::Serialize;

use crate::error::OracleError;
use crate::state::{GameState, LogEntry, TacticalProfile, TimeScale};

/// Bound a conforming transport should apply to one consultation.
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 15;

/// How many recent log entries travel with the request.
pub const CONTEXT_LOG_TAIL: usize = 5;

/// The derived context subset sent with one consultation.
#[derive(Debug, Clone, Serialize)]
pub struct OracleContext<'a> {
    pub directive: &'a str,
    pub time_scale: TimeScale,
    pub location_path: &'a [String],
    pub age: u32,
    pub treasury: i64,
    pub health: i32,
    pub safety: i32,
    pub public_image: i32,
    pub noble_standing: i32,
    pub clergy_trust: i32,
    pub cunning: i32,
    pub recent_logs: &'a [LogEntry],
    pub active_scenarios: &'a [String],
    pub tactical_profile: &'a TacticalProfile,
}

impl<'a> OracleContext<'a> {
    /// Derive the steering context for one directive from the live state.
    #[must_use]
    pub fn from_state(state: &'a GameState, directive: &'a str, time_scale: TimeScale) -> Self {
        Self {
            directive,
            time_scale,
            location_path: &state.location_path,
            age: state.age,
            treasury: state.treasury,
            health: state.health,
            safety: state.safety,
            public_image: state.public_image,
            noble_standing: state.noble_standing,
            clergy_trust: state.clergy_trust,
            cunning: state.cunning,
            recent_logs: state.log_tail(CONTEXT_LOG_TAIL),
            active_scenarios: &state.active_scenarios,
            tactical_profile: &state.tactical_profile,
        }
    }
}

/// Trait for abstracting the narrative oracle.
/// Platform-specific implementations should provide this.
pub trait Oracle {
    /// Consult the oracle for one turn's outcome payload.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Timeout`] when the bound elapsed, or
    /// [`OracleError::Backend`] for any other transport failure. The
    /// payload is returned as loose JSON; validation happens in the core.
    fn consult(&self, ctx: &OracleContext<'_>) -> Result<serde_json::Value, OracleError>;
}

/// Drive an oracle request future under the standard timeout, discarding
/// any late response.
///
/// # Errors
///
/// Returns [`OracleError::Timeout`] when the bound elapses, otherwise
/// whatever the request itself produced.
#[cfg(feature = "async")]
pub async fn consult_with_timeout<F>(
    request: F,
    timeout_secs: u64,
) -> Result<serde_json::Value, OracleError>
where
    F: core::future::Future<Output = Result<serde_json::Value, OracleError>>,
{
    match tokio::time::timeout(core::time::Duration::from_secs(timeout_secs), request).await {
        Ok(result) => result,
        Err(_) => {
            log::warn!("oracle consultation exceeded {timeout_secs}s, discarding");
            Err(OracleError::Timeout)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::initial_state;

    #[test]
    fn context_carries_the_recent_log_tail() {
        let mut state = initial_state(4);
        for turn in 2..=10 {
            state.logs.push(LogEntry {
                turn,
                message: format!("turn {turn}"),
                whisper: None,
                ripple_effect: None,
                category: crate::state::LogCategory::Neutral,
            });
        }
        let ctx = OracleContext::from_state(&state, "watch", TimeScale::Day);
        assert_eq!(ctx.recent_logs.len(), CONTEXT_LOG_TAIL);
        assert_eq!(ctx.recent_logs.last().unwrap().message, "turn 10");
        assert!(serde_json::to_value(&ctx).is_ok());
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn timeout_discards_a_response_that_never_arrives() {
        let request = async {
            tokio::time::sleep(core::time::Duration::from_secs(60)).await;
            Ok(serde_json::json!({}))
        };
        let result = consult_with_timeout(request, 0).await;
        assert_eq!(result.unwrap_err(), OracleError::Timeout);
    }
}
