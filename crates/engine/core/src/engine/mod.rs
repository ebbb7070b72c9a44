//! The action execution pipeline.
//!
//! [`Engine`] is the authoritative reducer for [`PlayerState`]. Every
//! mutation a player can cause flows through [`Engine::execute`]:
//! availability check, requirement evaluation, staged mutation, then an
//! atomic commit. A failure at any step leaves the session's state
//! untouched, so one invocation is always all-or-nothing.

mod errors;

pub use errors::ExecuteError;

use tracing::debug;

use crate::action::{ActionDef, ActionInput, ActionKind, Requirement, evaluate_all};
use crate::catalog::{ActionId, CurrencyId, ItemId, Registry, RoomId};
use crate::combat::CombatOutcome;
use crate::event::{Event, EventError, apply_chain};
use crate::room::RoomDef;
use crate::state::{PlayerState, StateDelta};

/// How an execution concluded, for callers that branch on combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    Success,
    CombatVictory,
    CombatDefeat,
    CombatFled,
}

/// Complete result of one successful execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Display text, one rendered line per `\n`.
    pub text: String,
    /// Which parts of the player state changed.
    pub delta: StateDelta,
    pub outcome: ActionOutcome,
}

/// Stateless executor over one loaded world.
///
/// The engine borrows the registry and owns nothing, so one instance
/// (or many) can serve any number of sessions; each call is given the
/// session's state explicitly.
pub struct Engine<'a> {
    registry: &'a Registry,
}

impl<'a> Engine<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Actions the player could invoke in `room` right now.
    ///
    /// An action is listed when it passes the visibility gate and has not
    /// been spent via `hide_after_use`. Requirements are not consulted
    /// here; a listed action may still fail them on execution.
    pub fn available_actions(
        &self,
        state: &PlayerState,
        room: RoomId,
    ) -> Result<Vec<(ActionId, &'a ActionDef)>, ExecuteError> {
        if state.current_room != room {
            return Err(ExecuteError::NotInRoom {
                player_room: state.current_room,
                requested: room,
            });
        }
        let room_def = self.room(room)?;
        Ok(room_def
            .actions
            .iter()
            .enumerate()
            .map(|(index, action)| (ActionId::new(index as u32), action))
            .filter(|(id, action)| {
                action.is_visible_to(state) && !state.is_action_used(room, *id)
            })
            .collect())
    }

    /// Moves `state` into `room` and returns the entry text.
    ///
    /// The first visit to a room emits its `first_enter_text` ahead of the
    /// regular description.
    pub fn enter_room(
        &self,
        state: &mut PlayerState,
        room: RoomId,
    ) -> Result<Vec<String>, ExecuteError> {
        let def = self.room(room)?;
        state.current_room = room;
        let mut lines = Vec::new();
        if state.visited_rooms.insert(room) {
            if let Some(text) = &def.first_enter_text {
                lines.push(text.clone());
            }
        }
        lines.push(def.enter_text.clone());
        Ok(lines)
    }

    /// Executes one action for the player.
    ///
    /// Pipeline: availability, requirements, staged mutation (deferred
    /// consumptions, then the action body), reveal/hide bookkeeping, and
    /// finally an atomic commit of the staged state. Any error before the
    /// commit leaves `state` untouched.
    pub fn execute(
        &self,
        state: &mut PlayerState,
        room: RoomId,
        action: ActionId,
        input: Option<&ActionInput>,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        if state.current_room != room {
            return Err(ExecuteError::NotInRoom {
                player_room: state.current_room,
                requested: room,
            });
        }
        let room_def = self.room(room)?;
        let action_def = room_def
            .actions
            .get(action.index())
            .filter(|def| def.is_visible_to(state) && !state.is_action_used(room, action))
            .ok_or(ExecuteError::ActionNotFound { room, action })?;

        evaluate_all(&action_def.requirements, state)?;

        debug!(%room, %action, kind = action_def.kind.as_ref(), "executing action");

        let mut stage = state.clone();
        let mut text = Vec::new();
        if let Some(line) = &action_def.activation_text {
            text.push(line.clone());
        }

        // Consumptions deferred from requirement evaluation commit first,
        // on the staged copy only.
        for requirement in &action_def.requirements {
            if let Requirement::ConsumeItem { item, quantity } = requirement {
                if !stage.remove_items(*item, *quantity) {
                    return Err(EventError::InsufficientItems {
                        item: *item,
                        need: *quantity,
                        have: stage.item_quantity(*item),
                    }
                    .into());
                }
            }
        }

        let mut combat = None;
        match &action_def.kind {
            ActionKind::Exit { target_room } => {
                text.extend(self.enter_room(&mut stage, *target_room)?);
            }
            ActionKind::Wrapper { events } => {
                let outcome = apply_chain(events, &mut stage, self.registry, input)?;
                text.extend(outcome.text);
                combat = outcome.combat;
            }
            ActionKind::Shop {
                default_currency,
                wares,
            } => {
                text.extend(self.shop(&mut stage, *default_currency, wares, input)?);
            }
            ActionKind::Dialog { dialog } => {
                let event = Event::Dialog { dialog: *dialog };
                let outcome =
                    apply_chain(std::slice::from_ref(&event), &mut stage, self.registry, input)?;
                text.extend(outcome.text);
            }
            ActionKind::ManageInventory => {
                text.extend(self.manage_inventory(&mut stage, input)?);
            }
        }

        for tag in &action_def.reveal_after_use {
            stage.tags.insert(tag.clone());
        }
        if action_def.hide_after_use {
            stage.used_actions.insert((room, action));
        }
        stage.nonce += 1;

        let delta = StateDelta::from_states(state, &stage);
        *state = stage;

        let outcome = match combat {
            None => ActionOutcome::Success,
            Some(CombatOutcome::Victory) => ActionOutcome::CombatVictory,
            Some(CombatOutcome::Defeat) => ActionOutcome::CombatDefeat,
            Some(CombatOutcome::Fled) => ActionOutcome::CombatFled,
        };

        Ok(ExecutionOutcome {
            text: text.join("\n"),
            delta,
            outcome,
        })
    }

    fn room(&self, id: RoomId) -> Result<&'a RoomDef, ExecuteError> {
        self.registry
            .rooms
            .room(id)
            .map_err(|_| ExecuteError::UnknownRoom(id))
    }

    /// Without input: lists the wares and their prices. With a `Ware`
    /// input: debits the default currency and hands over one unit.
    fn shop(
        &self,
        stage: &mut PlayerState,
        currency: CurrencyId,
        wares: &[ItemId],
        input: Option<&ActionInput>,
    ) -> Result<Vec<String>, ExecuteError> {
        let currency_def = self.registry.currency(currency)?;
        match input {
            Some(ActionInput::Ware(item)) => {
                if !wares.contains(item) {
                    return Err(ExecuteError::NotForSale { item: *item });
                }
                let def = self.registry.item(*item)?;
                let held = stage.item_quantity(*item);
                if def.clamp_stack(held.saturating_add(1)) == held {
                    return Ok(vec![format!("You cannot carry any more {}.", def.name)]);
                }
                if !stage.debit_currency(currency, def.value) {
                    return Err(ExecuteError::InsufficientFunds {
                        currency,
                        need: def.value,
                        have: stage.currency_balance(currency),
                    });
                }
                stage.grant_items(*item, 1);
                Ok(vec![format!(
                    "You buy {} for {} {}.",
                    def.name, def.value, currency_def.name
                )])
            }
            _ => {
                let mut lines = vec![format!("Wares (prices in {}):", currency_def.name)];
                for item in wares {
                    let def = self.registry.item(*item)?;
                    lines.push(format!("  {} - {}", def.name, def.value));
                }
                Ok(lines)
            }
        }
    }

    /// Without input: lists the inventory. With a `Drop` input: discards
    /// a quantity of one item.
    fn manage_inventory(
        &self,
        stage: &mut PlayerState,
        input: Option<&ActionInput>,
    ) -> Result<Vec<String>, ExecuteError> {
        match input {
            Some(ActionInput::Drop { item, quantity }) => {
                let def = self.registry.item(*item)?;
                if !stage.remove_items(*item, *quantity) {
                    return Err(EventError::InsufficientItems {
                        item: *item,
                        need: *quantity,
                        have: stage.item_quantity(*item),
                    }
                    .into());
                }
                Ok(vec![format!("You drop {quantity} x {}.", def.name)])
            }
            _ => {
                if stage.inventory.is_empty() {
                    return Ok(vec!["Your inventory is empty.".into()]);
                }
                let mut lines = vec!["You carry:".to_string()];
                for (&item, &quantity) in &stage.inventory {
                    let name = self
                        .registry
                        .item(item)
                        .map(|def| def.name.clone())
                        .unwrap_or_else(|_| item.to_string());
                    lines.push(format!("  {quantity} x {name}"));
                }
                Ok(lines)
            }
        }
    }
}
