//! World and scenario ledger.
//!
//! Appends oracle-reported world events to the append-only chronicle,
//! replaces the active scenario set when the oracle supplies one, merges
//! partial faction updates by id, and caches region-enrichment lookups.

use crate::ledger::clamp_stat;
use crate::outcome::{FactionDelta, NewWorldEvent};
use crate::state::{Faction, MapNode, WorldEvent};

/// Port for the external region-enrichment lookup: given a place name and
/// the current year, produce the hierarchy of power-holders for it.
pub trait RegionAtlas {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Look up a place by name, era-adjusted to the given year.
    ///
    /// # Errors
    ///
    /// Returns an error if the place cannot be resolved.
    fn lookup_region(&self, place: &str, year: i32) -> Result<MapNode, Self::Error>;
}

/// Tag a reported event with the current turn and a fresh id, and append
/// it to the chronicle. Existing entries are never touched; the id is
/// derived from the turn and chronicle length, both monotonic, so it is
/// unique within a playthrough.
pub fn append_world_event(events: &mut Vec<WorldEvent>, reported: NewWorldEvent, turn: u32) {
    let id = format!("e-{turn}-{}", events.len());
    events.push(WorldEvent {
        id,
        turn,
        category: reported.category,
        headline: reported.headline,
        body: reported.body,
        impact_label: reported.impact_label,
    });
}

/// Wholesale-replace the active scenario threads when the oracle supplied
/// a non-empty set; otherwise carry the current threads forward.
pub fn replace_scenarios(current: &mut Vec<String>, updated: Option<Vec<String>>) {
    if let Some(threads) = updated {
        if !threads.is_empty() {
            *current = threads;
        }
    }
}

/// Merge partial faction updates into the faction list by id.
///
/// Matched factions get their supplied fields overwritten (clamped to the
/// 0..=100 band); factions without an update pass through untouched, and
/// update ids with no matching faction are dropped. No faction is ever
/// created or removed here.
pub fn merge_faction_updates(factions: &mut [Faction], updates: &[FactionDelta]) {
    for update in updates {
        if let Some(faction) = factions.iter_mut().find(|f| f.id == update.id) {
            if let Some(opinion) = update.opinion {
                faction.opinion = clamp_stat(opinion);
            }
            if let Some(influence) = update.influence {
                faction.influence = clamp_stat(influence);
            }
        }
    }
}

/// Find an already-discovered region by place name.
#[must_use]
pub fn find_region<'a>(regions: &'a [MapNode], place: &str) -> Option<&'a MapNode> {
    regions.iter().find(|region| region.name == place)
}

/// Record an enriched region, deduplicated by id. Returns whether the
/// region was newly added.
pub fn record_region(regions: &mut Vec<MapNode>, node: MapNode) -> bool {
    if regions.iter().any(|existing| existing.id == node.id) {
        return false;
    }
    regions.push(node);
    true
}
