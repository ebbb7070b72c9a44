//! Builds a frozen [`Registry`] from a world document.
//!
//! Pipeline: parse (serde rejects unknown `class` discriminators), build
//! the catalogs (rejecting duplicate ids), append the world's default
//! actions to every room that has not opted out, then cross-validate
//! every embedded reference before freezing the registry.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use fable_core::{
    ActionDef, ActionKind, DialogDef, Event, Registry, Requirement, RoomDef, RoomGraph,
};

use crate::error::LoadError;
use crate::schema::{RawAction, RawEvent, RawRequirement, RawRoom, WorldDocument};
use crate::validate;

/// Loads and validates a world from a JSON file on disk.
pub fn load_world_file(path: &Path) -> anyhow::Result<Registry> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let registry = load_world_str(&text)
        .with_context(|| format!("failed to load world from {}", path.display()))?;
    info!(path = %path.display(), rooms = registry.rooms.len(), "world loaded");
    Ok(registry)
}

/// Loads and validates a world from JSON text.
pub fn load_world_str(text: &str) -> Result<Registry, LoadError> {
    build(serde_json::from_str(text)?)
}

/// Converts a parsed document into a validated registry.
pub fn build(document: WorldDocument) -> Result<Registry, LoadError> {
    let mut items = BTreeMap::new();
    for def in document.items {
        let id = def.id;
        if items.insert(id, def).is_some() {
            return Err(LoadError::Duplicate {
                kind: "item",
                id: id.0,
            });
        }
    }

    let mut skills = BTreeMap::new();
    for def in document.skills {
        let id = def.id;
        if skills.insert(id, def).is_some() {
            return Err(LoadError::Duplicate {
                kind: "skill",
                id: id.0,
            });
        }
    }

    let mut currencies = BTreeMap::new();
    for def in document.currencies {
        let id = def.id;
        if currencies.insert(id, def).is_some() {
            return Err(LoadError::Duplicate {
                kind: "currency",
                id: id.0,
            });
        }
    }

    let mut dialogs = BTreeMap::new();
    for raw in document.dialogs {
        let id = raw.id;
        let mut nodes = BTreeMap::new();
        for node in raw.nodes {
            let node_id = node.id;
            if nodes.insert(node_id, node).is_some() {
                return Err(LoadError::Duplicate {
                    kind: "dialog node",
                    id: node_id.0,
                });
            }
        }
        let def = DialogDef {
            id,
            root: raw.root,
            nodes,
        };
        if dialogs.insert(id, def).is_some() {
            return Err(LoadError::Duplicate {
                kind: "dialog",
                id: id.0,
            });
        }
    }

    let mut recipes = BTreeMap::new();
    for def in document.recipes {
        let id = def.id;
        if recipes.insert(id, def).is_some() {
            return Err(LoadError::Duplicate {
                kind: "recipe",
                id: id.0,
            });
        }
    }

    let mut combatants = BTreeMap::new();
    for def in document.combatants {
        let id = def.id;
        if combatants.insert(id, def).is_some() {
            return Err(LoadError::Duplicate {
                kind: "combatant",
                id: id.0,
            });
        }
    }

    let mut rooms = Vec::with_capacity(document.content.len());
    for raw in document.content {
        if rooms.iter().any(|room: &RoomDef| room.id == raw.id) {
            return Err(LoadError::Duplicate {
                kind: "room",
                id: raw.id.0,
            });
        }
        rooms.push(room_def(raw, &document.config.default_actions));
    }

    let registry = Registry {
        items,
        skills,
        currencies,
        dialogs,
        recipes,
        combatants,
        rooms: RoomGraph::new(rooms),
        world_seed: document.config.world_seed,
    };
    validate::validate(&registry)?;
    Ok(registry)
}

fn room_def(raw: RawRoom, default_actions: &[RawAction]) -> RoomDef {
    let mut actions: Vec<ActionDef> = raw.actions.into_iter().map(action_def).collect();
    if raw.default_actions_enabled {
        actions.extend(default_actions.iter().cloned().map(action_def));
    }
    RoomDef {
        id: raw.id,
        name: raw.name,
        enter_text: raw.enter_text,
        first_enter_text: raw.first_enter_text,
        actions,
    }
}

fn action_def(raw: RawAction) -> ActionDef {
    let (common, kind) = match raw {
        RawAction::Exit {
            common,
            target_room,
        } => (common, ActionKind::Exit { target_room }),
        RawAction::Wrapper { common, wrap } => (
            common,
            ActionKind::Wrapper {
                events: wrap.into_vec().into_iter().map(event).collect(),
            },
        ),
        RawAction::Shop {
            common,
            default_currency,
            wares,
        } => (
            common,
            ActionKind::Shop {
                default_currency,
                wares,
            },
        ),
        RawAction::Dialog { common, dialog_id } => {
            (common, ActionKind::Dialog { dialog: dialog_id })
        }
        RawAction::ManageInventory { common } => (common, ActionKind::ManageInventory),
    };
    ActionDef {
        menu_name: common.menu_name,
        activation_text: common.activation_text,
        requirements: common.requirements.into_iter().map(requirement).collect(),
        tags: common.tags,
        visible: common.visible,
        reveal_after_use: common.reveal_after_use,
        hide_after_use: common.hide_after_use,
        kind,
    }
}

fn requirement(raw: RawRequirement) -> Requirement {
    match raw {
        RawRequirement::Item { item_id, quantity } => Requirement::Item {
            item: item_id,
            quantity,
        },
        RawRequirement::ConsumeItem { item_id, quantity } => Requirement::ConsumeItem {
            item: item_id,
            quantity,
        },
        RawRequirement::Skill { skill_id, level } => Requirement::Skill {
            skill: skill_id,
            level,
        },
        RawRequirement::Currency {
            currency_id,
            amount,
        } => Requirement::Currency {
            currency: currency_id,
            amount,
        },
        RawRequirement::Tag { tag } => Requirement::Tag { tag },
    }
}

fn event(raw: RawEvent) -> Event {
    match raw {
        RawEvent::AddItem { item_id, quantity } => Event::AddItem {
            item: item_id,
            quantity,
        },
        RawEvent::RemoveItem { item_id, quantity } => Event::RemoveItem {
            item: item_id,
            quantity,
        },
        RawEvent::AddCurrency {
            currency_id,
            amount,
        } => Event::AddCurrency {
            currency: currency_id,
            amount,
        },
        RawEvent::SkillXp { skill_id, amount } => Event::SkillXp {
            skill: skill_id,
            amount,
        },
        RawEvent::Text { text } => Event::Text { text },
        RawEvent::Dialog { dialog_id } => Event::Dialog { dialog: dialog_id },
        RawEvent::Crafting { recipe_id } => Event::Craft { recipe: recipe_id },
        RawEvent::Combat {
            allies,
            enemies,
            on_victory,
        } => Event::Combat {
            allies,
            enemies,
            on_victory: on_victory.into_iter().map(event).collect(),
        },
        RawEvent::ViewSummary {} => Event::ViewSummary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fable_core::{ItemId, RoomId};

    fn minimal_world(rooms_json: &str) -> String {
        format!(
            r#"{{
                "config": {{
                    "default_actions": [
                        {{ "class": "ManageInventoryAction", "menu_name": "manage inventory" }}
                    ],
                    "world_seed": 7
                }},
                "items": [
                    {{ "id": 1, "name": "Shiny Stone", "value": 2 }}
                ],
                "currencies": [
                    {{ "id": 1, "name": "Coins", "symbol": "c" }}
                ],
                "combatants": [
                    {{ "id": 1, "name": "Hero", "max_hp": 20, "attack": 5, "defense": 1, "speed": 3 }},
                    {{ "id": 2, "name": "Slime", "max_hp": 5, "attack": 1, "defense": 0, "speed": 1 }}
                ],
                "content": {rooms_json}
            }}"#
        )
    }

    #[test]
    fn default_actions_are_appended_after_the_rooms_own() {
        let world = minimal_world(
            r#"[
                {
                    "id": 0,
                    "name": "Field",
                    "enter_text": "Grass sways around you.",
                    "actions": [
                        {
                            "class": "WrapperAction",
                            "menu_name": "pick up the stone",
                            "wrap": { "class": "AddItemEvent", "item_id": 1 }
                        }
                    ]
                },
                { "id": 1, "name": "Void", "default_actions_enabled": false }
            ]"#,
        );
        let registry = load_world_str(&world).unwrap();

        let field = registry.rooms.room(RoomId(0)).unwrap();
        assert_eq!(field.actions.len(), 2);
        assert_eq!(field.actions[0].menu_name, "pick up the stone");
        assert_eq!(field.actions[1].menu_name, "manage inventory");

        let void = registry.rooms.room(RoomId(1)).unwrap();
        assert!(void.actions.is_empty());
        assert_eq!(registry.world_seed, 7);
    }

    #[test]
    fn duplicate_room_ids_are_rejected() {
        let world = minimal_world(
            r#"[
                { "id": 0, "name": "Field" },
                { "id": 0, "name": "Field Again" }
            ]"#,
        );
        assert!(matches!(
            load_world_str(&world),
            Err(LoadError::Duplicate { kind: "room", id: 0 })
        ));
    }

    #[test]
    fn unknown_class_fails_the_parse() {
        let world = minimal_world(
            r#"[
                {
                    "id": 0,
                    "name": "Field",
                    "actions": [ { "class": "TeleportAction", "menu_name": "zap" } ]
                }
            ]"#,
        );
        assert!(matches!(load_world_str(&world), Err(LoadError::Parse(_))));
    }

    #[test]
    fn dangling_exit_target_is_rejected() {
        let world = minimal_world(
            r#"[
                {
                    "id": 0,
                    "name": "Field",
                    "actions": [
                        { "class": "ExitAction", "menu_name": "leave", "target_room": 9 }
                    ]
                }
            ]"#,
        );
        assert!(matches!(
            load_world_str(&world),
            Err(LoadError::Dangling { kind: "room", id: 9, .. })
        ));
    }

    #[test]
    fn dangling_ware_is_rejected() {
        let world = minimal_world(
            r#"[
                {
                    "id": 0,
                    "name": "Field",
                    "actions": [
                        {
                            "class": "ShopAction",
                            "menu_name": "browse",
                            "default_currency": 1,
                            "wares": [42]
                        }
                    ]
                }
            ]"#,
        );
        assert!(matches!(
            load_world_str(&world),
            Err(LoadError::Dangling { kind: "item", id: 42, .. })
        ));
    }

    #[test]
    fn combat_without_enemies_is_rejected() {
        let world = minimal_world(
            r#"[
                {
                    "id": 0,
                    "name": "Field",
                    "actions": [
                        {
                            "class": "WrapperAction",
                            "menu_name": "shadow boxing",
                            "wrap": { "class": "CombatEvent", "allies": [1], "enemies": [] }
                        }
                    ]
                }
            ]"#,
        );
        assert!(matches!(load_world_str(&world), Err(LoadError::Invalid { .. })));
    }

    #[test]
    fn zero_quantity_requirement_is_rejected() {
        let world = minimal_world(
            r#"[
                {
                    "id": 0,
                    "name": "Field",
                    "actions": [
                        {
                            "class": "ExitAction",
                            "menu_name": "leave",
                            "target_room": 0,
                            "requirements": [
                                { "class": "ItemRequirement", "item_id": 1, "quantity": 0 }
                            ]
                        }
                    ]
                }
            ]"#,
        );
        assert!(matches!(load_world_str(&world), Err(LoadError::Invalid { .. })));
    }

    #[test]
    fn quantities_default_to_one() {
        let world = minimal_world(
            r#"[
                {
                    "id": 0,
                    "name": "Field",
                    "actions": [
                        {
                            "class": "WrapperAction",
                            "menu_name": "pick up the stone",
                            "wrap": { "class": "AddItemEvent", "item_id": 1 }
                        }
                    ]
                }
            ]"#,
        );
        let registry = load_world_str(&world).unwrap();
        let room = registry.rooms.room(RoomId(0)).unwrap();
        let ActionKind::Wrapper { events } = &room.actions[0].kind else {
            panic!("expected a wrapper");
        };
        assert_eq!(
            events[0],
            Event::AddItem {
                item: ItemId(1),
                quantity: 1,
            }
        );
    }

    #[test]
    fn load_from_file_reports_the_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_world_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("world.json"));
    }

    #[test]
    fn load_from_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");
        std::fs::write(&path, minimal_world(r#"[ { "id": 0, "name": "Field" } ]"#)).unwrap();
        let registry = load_world_file(&path).unwrap();
        assert_eq!(registry.rooms.len(), 1);
    }
}
