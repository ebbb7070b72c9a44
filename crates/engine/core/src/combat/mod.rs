//! Seeded auto-resolution of combat encounters.
//!
//! Combat is fully deterministic: the same rosters and the same seed
//! always produce the same report. The resolver never touches
//! [`PlayerState`](crate::state::PlayerState); it consumes combatant
//! templates and an RNG stream and returns a [`CombatReport`] that the
//! event processor folds into the action outcome.
//!
//! # Resolution rules
//!
//! - Turn order is fixed at the start: descending speed, ties broken by
//!   lower combatant id, then allies before enemies.
//! - Each living combatant attacks the first living member of the
//!   opposing side, in roster declaration order.
//! - `damage = max(1, attack + variance - defense)` with
//!   `variance ∈ [0, 2]` drawn from the seeded stream.
//! - The encounter ends the moment one side has no one standing.
//! - After [`MAX_ROUNDS`] full rounds with both sides standing, the
//!   encounter disengages as [`CombatOutcome::Fled`].

use std::cmp::Reverse;

use crate::catalog::{CombatantDef, PcgRng};

/// Rounds fought before an unresolved encounter disengages.
pub const MAX_ROUNDS: u32 = 64;

/// Which roster a fighter belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Allies,
    Enemies,
}

impl Side {
    fn opposing(self) -> Side {
        match self {
            Side::Allies => Side::Enemies,
            Side::Enemies => Side::Allies,
        }
    }
}

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    /// Every enemy is down.
    Victory,
    /// Every ally is down.
    Defeat,
    /// Both sides still stood at the round bound.
    Fled,
}

/// Full record of one resolved encounter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatReport {
    pub outcome: CombatOutcome,
    /// Rounds fought, counting the one the encounter ended in.
    pub rounds: u32,
    /// Per-attack log lines in resolution order, for rendering.
    pub log: Vec<String>,
}

struct Fighter {
    name: String,
    side: Side,
    hp: u32,
    attack: u32,
    defense: u32,
}

impl Fighter {
    fn from_def(def: &CombatantDef, side: Side) -> Self {
        Self {
            name: def.name.clone(),
            side,
            hp: def.max_hp,
            attack: def.attack,
            defense: def.defense,
        }
    }

    fn alive(&self) -> bool {
        self.hp > 0
    }
}

/// Resolves a full encounter between `allies` and `enemies`.
///
/// `rng` must be freshly seeded for this encounter; the resolver draws
/// one variance value per attack, so the stream position encodes the
/// whole fight.
pub fn resolve(allies: &[&CombatantDef], enemies: &[&CombatantDef], rng: &mut PcgRng) -> CombatReport {
    let mut roster: Vec<Fighter> = allies
        .iter()
        .map(|def| Fighter::from_def(def, Side::Allies))
        .chain(enemies.iter().map(|def| Fighter::from_def(def, Side::Enemies)))
        .collect();

    // Speed never changes mid-fight, so the order is computed once.
    let mut order: Vec<usize> = (0..roster.len()).collect();
    let keys: Vec<_> = allies
        .iter()
        .map(|def| (Reverse(def.speed), def.id, Side::Allies))
        .chain(enemies.iter().map(|def| (Reverse(def.speed), def.id, Side::Enemies)))
        .collect();
    order.sort_by_key(|&index| keys[index]);

    let mut log = Vec::new();
    for round in 1..=MAX_ROUNDS {
        for &attacker in &order {
            if !roster[attacker].alive() {
                continue;
            }
            let target_side = roster[attacker].side.opposing();
            let Some(target) = roster
                .iter()
                .position(|fighter| fighter.side == target_side && fighter.alive())
            else {
                // Opposing side already wiped mid-round.
                break;
            };

            let variance = rng.bounded(3);
            let raw = (roster[attacker].attack + variance).saturating_sub(roster[target].defense);
            let damage = raw.max(1);
            roster[target].hp = roster[target].hp.saturating_sub(damage);
            log.push(format!(
                "{} hits {} for {} ({} hp left)",
                roster[attacker].name, roster[target].name, damage, roster[target].hp
            ));
        }

        let allies_standing = roster
            .iter()
            .any(|fighter| fighter.side == Side::Allies && fighter.alive());
        let enemies_standing = roster
            .iter()
            .any(|fighter| fighter.side == Side::Enemies && fighter.alive());
        let outcome = match (allies_standing, enemies_standing) {
            (_, false) => CombatOutcome::Victory,
            (false, true) => CombatOutcome::Defeat,
            (true, true) => continue,
        };
        return CombatReport {
            outcome,
            rounds: round,
            log,
        };
    }

    log.push("the fight drags on and both sides disengage".into());
    CombatReport {
        outcome: CombatOutcome::Fled,
        rounds: MAX_ROUNDS,
        log,
    }
}
