//! Session hosting over one loaded world.
//!
//! [`Runtime`] owns the mutable state of every hosted session and shares
//! one immutable [`Registry`] across all of them. Executions take `&mut
//! self`, so a runtime instance processes one action at a time; separate
//! runtimes (or separate sessions) never contend because the registry is
//! read-only after load.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, info_span};

use fable_core::{ActionId, ActionInput, Engine, PlayerState, Registry, RoomId};

use crate::error::{Result, RuntimeError};
use crate::session::SessionId;
use crate::view::{
    ActionView, CurrencyEntry, ExecuteResponse, ItemEntry, PlayerSnapshot, RoomView, SkillEntry,
};

pub struct Runtime {
    registry: Arc<Registry>,
    sessions: BTreeMap<SessionId, PlayerState>,
    next_session: u64,
}

impl Runtime {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            sessions: BTreeMap::new(),
            next_session: 0,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Opens a new session with the player standing in `start_room`.
    ///
    /// The start room counts as entered, so its one-time text is not
    /// replayed when the player later walks back into it.
    pub fn create_session(&mut self, start_room: RoomId) -> Result<SessionId> {
        let engine = Engine::new(&self.registry);
        let mut state = PlayerState::new(start_room);
        engine.enter_room(&mut state, start_room)?;

        let id = SessionId::new(self.next_session);
        self.next_session += 1;
        self.sessions.insert(id, state);
        info!(session = %id, room = %start_room, "session created");
        Ok(id)
    }

    /// Every room in the world, in ascending id order.
    pub fn list_rooms(&self) -> Vec<RoomView> {
        self.registry
            .rooms
            .iter()
            .map(|room| RoomView {
                id: room.id,
                name: room.name.clone(),
            })
            .collect()
    }

    /// The actions the session's player could invoke in `room` right now,
    /// in presentation order.
    pub fn available_actions(&self, session: SessionId, room: RoomId) -> Result<Vec<ActionView>> {
        let state = self.session(session)?;
        let engine = Engine::new(&self.registry);
        Ok(engine
            .available_actions(state, room)?
            .into_iter()
            .map(|(id, def)| ActionView {
                id,
                menu_name: def.menu_name.clone(),
            })
            .collect())
    }

    /// Executes one action for one session.
    ///
    /// All engine guarantees carry over: any error leaves the session's
    /// state exactly as it was before the call.
    pub fn execute(
        &mut self,
        session: SessionId,
        room: RoomId,
        action: ActionId,
        input: Option<ActionInput>,
    ) -> Result<ExecuteResponse> {
        let span = info_span!("execute", %session, %room, %action);
        let _guard = span.enter();

        let engine = Engine::new(&self.registry);
        let state = self
            .sessions
            .get_mut(&session)
            .ok_or(RuntimeError::UnknownSession(session))?;
        let result = engine.execute(state, room, action, input.as_ref())?;
        debug!(outcome = ?result.outcome, "action executed");
        Ok(ExecuteResponse {
            text: result.text,
            delta: result.delta,
            outcome: result.outcome,
        })
    }

    /// A display-ready snapshot of the session's progress.
    pub fn player_snapshot(&self, session: SessionId) -> Result<PlayerSnapshot> {
        let state = self.session(session)?;
        let room = self.registry.rooms.room(state.current_room)?;

        let inventory = state
            .inventory
            .iter()
            .map(|(&id, &quantity)| {
                Ok(ItemEntry {
                    id,
                    name: self.registry.item(id)?.name.clone(),
                    quantity,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let currencies = state
            .currencies
            .iter()
            .map(|(&id, &amount)| {
                Ok(CurrencyEntry {
                    id,
                    name: self.registry.currency(id)?.name.clone(),
                    amount,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let skills = state
            .skills
            .iter()
            .map(|(&id, progress)| {
                Ok(SkillEntry {
                    id,
                    name: self.registry.skill(id)?.name.clone(),
                    level: progress.level,
                    xp: progress.xp,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PlayerSnapshot {
            room: state.current_room,
            room_name: room.name.clone(),
            inventory,
            currencies,
            skills,
            tags: state.tags.iter().cloned().collect(),
        })
    }

    fn session(&self, id: SessionId) -> Result<&PlayerState> {
        self.sessions.get(&id).ok_or(RuntimeError::UnknownSession(id))
    }
}
