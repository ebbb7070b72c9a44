//! Rooms and the navigable graph between them.
//!
//! The graph is immutable after load. It never moves the player itself;
//! movement happens in [`PlayerState`] as a consequence of executing an
//! exit action through the engine. The graph only answers whether a
//! transition is currently legal for a given player.

use std::collections::BTreeMap;

use crate::action::{ActionDef, ActionKind, evaluate_all};
use crate::catalog::{ActionId, RoomId};
use crate::state::PlayerState;

/// One location in the world.
///
/// Actions are ordered as declared in content; [`ActionId`] is the index
/// into that order, so ids are stable for the lifetime of a loaded world.
#[derive(Clone, Debug)]
pub struct RoomDef {
    pub id: RoomId,
    pub name: String,
    /// Text shown on every entry.
    pub enter_text: String,
    /// Extra text shown only the first time the player enters.
    pub first_enter_text: Option<String>,
    pub actions: Vec<ActionDef>,
}

impl RoomDef {
    pub fn action(&self, id: ActionId) -> Result<&ActionDef, UnknownRoomError> {
        self.actions
            .get(id.index())
            .ok_or(UnknownRoomError::UnknownAction {
                room: self.id,
                action: id,
            })
    }
}

/// Raised when a room or action lookup misses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnknownRoomError {
    #[error("unknown room {0}")]
    UnknownRoom(RoomId),

    #[error("room {room} has no action {action}")]
    UnknownAction { room: RoomId, action: ActionId },
}

/// The frozen set of rooms in one loaded world.
#[derive(Clone, Debug, Default)]
pub struct RoomGraph {
    rooms: BTreeMap<RoomId, RoomDef>,
}

impl RoomGraph {
    pub fn new(rooms: impl IntoIterator<Item = RoomDef>) -> Self {
        Self {
            rooms: rooms.into_iter().map(|room| (room.id, room)).collect(),
        }
    }

    pub fn room(&self, id: RoomId) -> Result<&RoomDef, UnknownRoomError> {
        self.rooms.get(&id).ok_or(UnknownRoomError::UnknownRoom(id))
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.rooms.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &RoomDef> {
        self.rooms.values()
    }

    /// Whether `state`'s player could move from `from` to `to` right now.
    ///
    /// True iff some exit on `from` targets `to` and that exit is visible,
    /// not spent, and its requirements pass. Purely advisory; the engine
    /// re-checks everything when the exit actually executes.
    pub fn is_valid_transition(&self, from: RoomId, to: RoomId, state: &PlayerState) -> bool {
        let Ok(room) = self.room(from) else {
            return false;
        };
        room.actions.iter().enumerate().any(|(index, action)| {
            matches!(action.kind, ActionKind::Exit { target_room } if target_room == to)
                && action.is_visible_to(state)
                && !state.is_action_used(from, ActionId::new(index as u32))
                && evaluate_all(&action.requirements, state).is_ok()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Requirement;
    use crate::catalog::ItemId;

    fn exit_to(target: RoomId, requirements: Vec<Requirement>) -> ActionDef {
        ActionDef {
            menu_name: "leave".into(),
            activation_text: None,
            requirements,
            tags: Vec::new(),
            visible: true,
            reveal_after_use: Vec::new(),
            hide_after_use: false,
            kind: ActionKind::Exit {
                target_room: target,
            },
        }
    }

    fn graph_with(actions: Vec<ActionDef>) -> RoomGraph {
        RoomGraph::new([
            RoomDef {
                id: RoomId(0),
                name: "hollow".into(),
                enter_text: "A quiet hollow.".into(),
                first_enter_text: None,
                actions,
            },
            RoomDef {
                id: RoomId(1),
                name: "ridge".into(),
                enter_text: "A windy ridge.".into(),
                first_enter_text: None,
                actions: Vec::new(),
            },
        ])
    }

    #[test]
    fn missing_room_is_an_error() {
        let graph = graph_with(Vec::new());
        assert_eq!(
            graph.room(RoomId(9)).unwrap_err(),
            UnknownRoomError::UnknownRoom(RoomId(9))
        );
    }

    #[test]
    fn transition_requires_a_matching_exit() {
        let graph = graph_with(vec![exit_to(RoomId(1), Vec::new())]);
        let state = PlayerState::new(RoomId(0));
        assert!(graph.is_valid_transition(RoomId(0), RoomId(1), &state));
        assert!(!graph.is_valid_transition(RoomId(0), RoomId(2), &state));
        assert!(!graph.is_valid_transition(RoomId(1), RoomId(0), &state));
    }

    #[test]
    fn failing_requirements_block_the_transition() {
        let graph = graph_with(vec![exit_to(
            RoomId(1),
            vec![Requirement::ConsumeItem {
                item: ItemId(3),
                quantity: 1,
            }],
        )]);
        let mut state = PlayerState::new(RoomId(0));
        assert!(!graph.is_valid_transition(RoomId(0), RoomId(1), &state));
        state.grant_items(ItemId(3), 1);
        assert!(graph.is_valid_transition(RoomId(0), RoomId(1), &state));
    }

    #[test]
    fn spent_exit_no_longer_validates() {
        let graph = graph_with(vec![exit_to(RoomId(1), Vec::new())]);
        let mut state = PlayerState::new(RoomId(0));
        state.used_actions.insert((RoomId(0), ActionId::new(0)));
        assert!(!graph.is_valid_transition(RoomId(0), RoomId(1), &state));
    }
}
