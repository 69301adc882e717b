//! Initial-state factory.
//!
//! Seeds a fresh character deterministically from a `u64`, so the same
//! seed always produces the same opening position.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::constants::{
    START_AGE_BASE, START_AGE_SPREAD, START_CLERGY_TRUST, START_CUNNING, START_EXPENSES,
    START_HEALTH, START_INCOME, START_MONTH, START_NOBLE_STANDING, START_PUBLIC_IMAGE,
    START_SAFETY, START_TREASURY, START_YEAR,
};
use crate::state::{Faction, GameState, LogCategory, LogEntry, WorldEvent, WorldEventCategory};

struct CharacterSeed {
    name: &'static str,
    title: &'static str,
}

const CHARACTER_POOL: &[CharacterSeed] = &[
    CharacterSeed { name: "Alaric Thatcher", title: "Kitchen Scullion" },
    CharacterSeed { name: "Cedric of Kent", title: "Stable Boy" },
    CharacterSeed { name: "Elara Vane", title: "Messenger" },
    CharacterSeed { name: "Brother Thomas", title: "Scribe's Apprentice" },
    CharacterSeed { name: "Kaelen Stout", title: "Bellows-Blower" },
    CharacterSeed { name: "Silas Mercer", title: "Ledger Assistant" },
    CharacterSeed { name: "Gwenna the Weaver", title: "Chamber Maid" },
    CharacterSeed { name: "Hugo the Bold", title: "Squire-in-Waiting" },
];

const STARTING_LOCATION: &[&str] = &[
    "Christendom",
    "Kingdom of France",
    "Duchy of Aquitaine",
    "County of Poitou",
    "Lusignan",
];

const STARTING_SUGGESTIONS: &[&str] = &[
    "Listen at the pantry door",
    "Save scraps for the poor",
    "Offer to sharpen the guards' blades",
];

fn starting_factions() -> Vec<Faction> {
    vec![
        Faction {
            id: "f1".to_string(),
            name: "The Lusignan Peasantry".to_string(),
            influence: 15,
            opinion: 65,
            leader: "Old Miller Wat".to_string(),
            leader_ambition: 20,
            leader_fear: 80,
            secrets_discovered: Vec::new(),
            alliances: Vec::new(),
        },
        Faction {
            id: "f2".to_string(),
            name: "The Abbey of St. Jude".to_string(),
            influence: 40,
            opinion: 50,
            leader: "Abbot Jerome".to_string(),
            leader_ambition: 50,
            leader_fear: 30,
            secrets_discovered: Vec::new(),
            alliances: vec!["The County Nobility".to_string()],
        },
        Faction {
            id: "f3".to_string(),
            name: "The County Nobility".to_string(),
            influence: 75,
            opinion: 20,
            leader: "Count William IV".to_string(),
            leader_ambition: 90,
            leader_fear: 10,
            secrets_discovered: Vec::new(),
            alliances: vec!["The Abbey of St. Jude".to_string()],
        },
    ]
}

fn opening_log(name: &str, title: &str) -> LogEntry {
    LogEntry {
        turn: 1,
        message: format!(
            "In the shadow of Lusignan Castle, {name} begins a journey. The air is cold, \
             but your resolve is burning. You are currently a {title}, yet the chronicles \
             have a blank page reserved for your name."
        ),
        whisper: None,
        ripple_effect: None,
        category: LogCategory::Neutral,
    }
}

fn opening_world_event() -> WorldEvent {
    WorldEvent {
        id: "e1".to_string(),
        turn: 1,
        category: WorldEventCategory::War,
        headline: "A Season of Truce".to_string(),
        body: "Conflict in the north has stalled. While the great lords argue over borders, \
               the common folk breathe a sigh of relief."
            .to_string(),
        impact_label: "Security is stable for now.".to_string(),
    }
}

/// Build a fresh starting state from a seed.
#[must_use]
pub fn initial_state(seed: u64) -> GameState {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let character = &CHARACTER_POOL[rng.gen_range(0..CHARACTER_POOL.len())];
    let age = START_AGE_BASE + rng.gen_range(0..START_AGE_SPREAD);

    GameState {
        character_name: character.name.to_string(),
        rank_title: character.title.to_string(),
        age,
        turn: 1,
        month: START_MONTH,
        month_sixtieths: 0,
        year: START_YEAR,
        treasury: START_TREASURY,
        monthly_income: START_INCOME,
        monthly_expenses: START_EXPENSES,
        health: START_HEALTH,
        safety: START_SAFETY,
        public_image: START_PUBLIC_IMAGE,
        noble_standing: START_NOBLE_STANDING,
        clergy_trust: START_CLERGY_TRUST,
        cunning: START_CUNNING,
        traits: vec!["Observant".to_string()],
        factions: starting_factions(),
        world_events: vec![opening_world_event()],
        active_scenarios: Vec::new(),
        location_path: STARTING_LOCATION.iter().map(ToString::to_string).collect(),
        discovered_regions: Vec::new(),
        tactical_profile: crate::state::TacticalProfile::default(),
        logs: vec![opening_log(character.name, character.title)],
        lineage: Vec::new(),
        suggestions: STARTING_SUGGESTIONS.iter().map(ToString::to_string).collect(),
        seed,
        game_over: false,
        game_over_reason: None,
    }
}
