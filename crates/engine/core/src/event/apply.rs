//! The chain processor.
//!
//! `apply_chain` mutates the state it is handed, in event order, and
//! stops at the first failure. All-or-nothing semantics live one level
//! up: the engine runs chains against a staged clone and only commits
//! the clone on success, so a mid-chain error here never leaks partial
//! mutations into a session.

use tracing::debug;

use super::{Event, EventError, EventOutcome};
use crate::action::ActionInput;
use crate::catalog::{
    CombatantDef, CombatantId, DialogId, PcgRng, RecipeDef, RecipeId, Registry, compute_seed,
};
use crate::combat::{self, CombatOutcome};
use crate::state::{PlayerState, SkillProgress};

/// Applies `events` in order against `state`.
///
/// `input` refines interactive events: a `Choice` steers dialog
/// traversal and a `Recipe` selects what an open crafting event builds.
pub fn apply_chain(
    events: &[Event],
    state: &mut PlayerState,
    registry: &Registry,
    input: Option<&ActionInput>,
) -> Result<EventOutcome, EventError> {
    let mut chain = Chain {
        registry,
        input,
        encounters: 0,
    };
    let mut outcome = EventOutcome::default();
    for event in events {
        chain.apply(event, state, &mut outcome)?;
    }
    Ok(outcome)
}

struct Chain<'a> {
    registry: &'a Registry,
    input: Option<&'a ActionInput>,
    /// Encounters resolved so far; salts each combat seed so two fights
    /// in one chain draw distinct streams.
    encounters: u32,
}

impl Chain<'_> {
    fn apply(
        &mut self,
        event: &Event,
        state: &mut PlayerState,
        out: &mut EventOutcome,
    ) -> Result<(), EventError> {
        debug!(event = event.as_ref(), "applying event");
        match event {
            Event::AddItem { item, quantity } => {
                let def = self.registry.item(*item)?;
                let held = state.item_quantity(*item);
                let total = def.clamp_stack(held.saturating_add(*quantity));
                let gained = total - held;
                state.grant_items(*item, gained);
                out.text.push(format!("You receive {gained} x {}.", def.name));
                if gained < *quantity {
                    out.text
                        .push(format!("You cannot carry any more {}.", def.name));
                }
            }
            Event::RemoveItem { item, quantity } => {
                let def = self.registry.item(*item)?;
                if !state.remove_items(*item, *quantity) {
                    return Err(EventError::InsufficientItems {
                        item: *item,
                        need: *quantity,
                        have: state.item_quantity(*item),
                    });
                }
                out.text.push(format!("You lose {quantity} x {}.", def.name));
            }
            Event::AddCurrency { currency, amount } => {
                let def = self.registry.currency(*currency)?;
                state.credit_currency(*currency, *amount);
                out.text.push(format!("You gain {amount} {}.", def.name));
            }
            Event::SkillXp { skill, amount } => {
                let def = self.registry.skill(*skill)?;
                let progress = state.skill_progress(*skill);
                let (level, xp, levels_gained) =
                    def.apply_xp(progress.level, progress.xp, *amount);
                state.skills.insert(*skill, SkillProgress { level, xp });
                out.text.push(format!("You gain {amount} {} xp.", def.name));
                if levels_gained > 0 {
                    out.text
                        .push(format!("{} is now level {level}.", def.name));
                }
            }
            Event::Text { text } => out.text.push(text.clone()),
            Event::Dialog { dialog } => self.advance_dialog(*dialog, state, out)?,
            Event::Craft { recipe } => self.craft(*recipe, state, out)?,
            Event::Combat {
                allies,
                enemies,
                on_victory,
            } => {
                let ally_defs = self.roster(allies)?;
                let enemy_defs = self.roster(enemies)?;
                let seed = compute_seed(self.registry.world_seed, state.nonce, self.encounters);
                let mut rng = PcgRng::new(seed);
                let report = combat::resolve(&ally_defs, &enemy_defs, &mut rng);
                self.encounters += 1;
                debug!(outcome = ?report.outcome, rounds = report.rounds, "encounter resolved");
                out.text.extend(report.log);
                out.combat = Some(report.outcome);
                if report.outcome == CombatOutcome::Victory {
                    for event in on_victory {
                        self.apply(event, state, out)?;
                    }
                }
            }
            Event::ViewSummary => self.summarize(state, out),
        }
        Ok(())
    }

    fn roster(&self, ids: &[CombatantId]) -> Result<Vec<&CombatantDef>, EventError> {
        ids.iter()
            .map(|id| self.registry.combatant(*id).map_err(EventError::from))
            .collect()
    }

    /// One node per invocation. A first visit lands on the root; later
    /// visits consume a choice (default: the first option) and move along
    /// its edge. An option without a target ends the conversation and
    /// leaves the cursor where it is.
    fn advance_dialog(
        &self,
        dialog_id: DialogId,
        state: &mut PlayerState,
        out: &mut EventOutcome,
    ) -> Result<(), EventError> {
        let def = self.registry.dialog(dialog_id)?;
        let node_id = match state.dialog_cursors.get(&dialog_id).copied() {
            None => {
                state.dialog_cursors.insert(dialog_id, def.root);
                def.root
            }
            Some(at) => {
                let node = def.node(at).ok_or(EventError::MissingDialogNode {
                    dialog: dialog_id,
                    node: at,
                })?;
                if node.is_terminal() {
                    at
                } else {
                    let choice = match self.input {
                        Some(ActionInput::Choice(index)) => *index,
                        _ => 0,
                    };
                    let option = node.options.get(choice as usize).ok_or(
                        EventError::InvalidChoice {
                            dialog: dialog_id,
                            choice,
                        },
                    )?;
                    match option.next {
                        Some(next) => {
                            state.dialog_cursors.insert(dialog_id, next);
                            next
                        }
                        None => {
                            out.text.push("The conversation ends.".into());
                            return Ok(());
                        }
                    }
                }
            }
        };

        let node = def.node(node_id).ok_or(EventError::MissingDialogNode {
            dialog: dialog_id,
            node: node_id,
        })?;
        out.text.push(node.text.clone());
        for (index, option) in node.options.iter().enumerate() {
            out.text.push(format!("  {index}) {}", option.text));
        }
        Ok(())
    }

    fn craft(
        &self,
        recipe: Option<RecipeId>,
        state: &mut PlayerState,
        out: &mut EventOutcome,
    ) -> Result<(), EventError> {
        let selected = recipe.or(match self.input {
            Some(ActionInput::Recipe(id)) => Some(*id),
            _ => None,
        });
        let Some(recipe_id) = selected else {
            let mut craftable = false;
            for def in self.registry.recipes.values() {
                if self.has_ingredients(def, state) {
                    out.text.push(format!("You could craft {}.", def.name));
                    craftable = true;
                }
            }
            if !craftable {
                out.text
                    .push("You lack the ingredients to craft anything.".into());
            }
            return Ok(());
        };

        let def = self.registry.recipe(recipe_id)?;
        for stack in &def.inputs {
            let have = state.item_quantity(stack.item);
            if have < stack.quantity {
                return Err(EventError::InsufficientItems {
                    item: stack.item,
                    need: stack.quantity,
                    have,
                });
            }
        }
        for stack in &def.inputs {
            if !state.remove_items(stack.item, stack.quantity) {
                return Err(EventError::InsufficientItems {
                    item: stack.item,
                    need: stack.quantity,
                    have: state.item_quantity(stack.item),
                });
            }
        }
        for stack in &def.outputs {
            let item = self.registry.item(stack.item)?;
            let held = state.item_quantity(stack.item);
            let total = item.clamp_stack(held.saturating_add(stack.quantity));
            state.grant_items(stack.item, total - held);
        }
        out.text.push(format!("You craft {}.", def.name));
        Ok(())
    }

    fn summarize(&self, state: &PlayerState, out: &mut EventOutcome) {
        let location = self
            .registry
            .rooms
            .room(state.current_room)
            .map(|room| room.name.clone())
            .unwrap_or_else(|_| state.current_room.to_string());
        out.text.push(format!("Location: {location}"));

        if state.inventory.is_empty() {
            out.text.push("Inventory: empty".into());
        } else {
            out.text.push("Inventory:".into());
            for (&item, &quantity) in &state.inventory {
                let name = self
                    .registry
                    .item(item)
                    .map(|def| def.name.clone())
                    .unwrap_or_else(|_| item.to_string());
                out.text.push(format!("  {quantity} x {name}"));
            }
        }

        for (&currency, &balance) in &state.currencies {
            let name = self
                .registry
                .currency(currency)
                .map(|def| def.name.clone())
                .unwrap_or_else(|_| currency.to_string());
            out.text.push(format!("{name}: {balance}"));
        }

        for (&skill, progress) in &state.skills {
            let name = self
                .registry
                .skill(skill)
                .map(|def| def.name.clone())
                .unwrap_or_else(|_| skill.to_string());
            out.text.push(format!(
                "{name}: level {} ({} xp)",
                progress.level, progress.xp
            ));
        }
    }

    fn has_ingredients(&self, recipe: &RecipeDef, state: &PlayerState) -> bool {
        recipe
            .inputs
            .iter()
            .all(|stack| state.item_quantity(stack.item) >= stack.quantity)
    }
}
