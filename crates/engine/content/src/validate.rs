//! Cross-reference checks over a freshly built registry.
//!
//! Runs after the catalogs are assembled, so every check can assume the
//! id maps themselves are well formed. Anything flagged here aborts the
//! load; a registry that survives validation contains no dangling ids.

use fable_core::{ActionKind, DialogDef, Event, RecipeDef, Registry, Requirement, RoomDef};

use crate::error::LoadError;

pub(crate) fn validate(registry: &Registry) -> Result<(), LoadError> {
    for dialog in registry.dialogs.values() {
        check_dialog(dialog)?;
    }
    for recipe in registry.recipes.values() {
        check_recipe(registry, recipe)?;
    }
    for room in registry.rooms.iter() {
        check_room(registry, room)?;
    }
    Ok(())
}

fn check_dialog(dialog: &DialogDef) -> Result<(), LoadError> {
    let context = format!("dialog {}", dialog.id);
    if !dialog.nodes.contains_key(&dialog.root) {
        return Err(LoadError::Dangling {
            context,
            kind: "dialog node",
            id: dialog.root.0,
        });
    }
    for node in dialog.nodes.values() {
        for option in &node.options {
            if let Some(next) = option.next {
                if !dialog.nodes.contains_key(&next) {
                    return Err(LoadError::Dangling {
                        context: format!("{context} node {}", node.id),
                        kind: "dialog node",
                        id: next.0,
                    });
                }
            }
        }
    }
    Ok(())
}

fn check_recipe(registry: &Registry, recipe: &RecipeDef) -> Result<(), LoadError> {
    let context = format!("recipe {} '{}'", recipe.id, recipe.name);
    for stack in recipe.inputs.iter().chain(recipe.outputs.iter()) {
        if !registry.items.contains_key(&stack.item) {
            return Err(LoadError::Dangling {
                context,
                kind: "item",
                id: stack.item.0,
            });
        }
        if stack.quantity == 0 {
            return Err(LoadError::Invalid {
                context,
                reason: format!("zero-quantity stack of item {}", stack.item),
            });
        }
    }
    if recipe.outputs.is_empty() {
        return Err(LoadError::Invalid {
            context,
            reason: "recipe produces nothing".to_string(),
        });
    }
    Ok(())
}

fn check_room(registry: &Registry, room: &RoomDef) -> Result<(), LoadError> {
    for action in &room.actions {
        let context = format!("room {} action '{}'", room.id, action.menu_name);
        for requirement in &action.requirements {
            check_requirement(registry, &context, requirement)?;
        }
        match &action.kind {
            ActionKind::Exit { target_room } => {
                if !registry.rooms.contains(*target_room) {
                    return Err(LoadError::Dangling {
                        context,
                        kind: "room",
                        id: target_room.0,
                    });
                }
            }
            ActionKind::Wrapper { events } => {
                for event in events {
                    check_event(registry, &context, event)?;
                }
            }
            ActionKind::Shop {
                default_currency,
                wares,
            } => {
                if !registry.currencies.contains_key(default_currency) {
                    return Err(LoadError::Dangling {
                        context,
                        kind: "currency",
                        id: default_currency.0,
                    });
                }
                for ware in wares {
                    if !registry.items.contains_key(ware) {
                        return Err(LoadError::Dangling {
                            context,
                            kind: "item",
                            id: ware.0,
                        });
                    }
                }
            }
            ActionKind::Dialog { dialog } => {
                if !registry.dialogs.contains_key(dialog) {
                    return Err(LoadError::Dangling {
                        context,
                        kind: "dialog",
                        id: dialog.0,
                    });
                }
            }
            ActionKind::ManageInventory => {}
        }
    }
    Ok(())
}

fn check_requirement(
    registry: &Registry,
    context: &str,
    requirement: &Requirement,
) -> Result<(), LoadError> {
    match requirement {
        Requirement::Item { item, quantity } | Requirement::ConsumeItem { item, quantity } => {
            if !registry.items.contains_key(item) {
                return Err(LoadError::Dangling {
                    context: context.to_string(),
                    kind: "item",
                    id: item.0,
                });
            }
            if *quantity == 0 {
                return Err(LoadError::Invalid {
                    context: context.to_string(),
                    reason: format!("zero-quantity requirement on item {item}"),
                });
            }
        }
        Requirement::Skill { skill, .. } => {
            if !registry.skills.contains_key(skill) {
                return Err(LoadError::Dangling {
                    context: context.to_string(),
                    kind: "skill",
                    id: skill.0,
                });
            }
        }
        Requirement::Currency { currency, amount } => {
            if !registry.currencies.contains_key(currency) {
                return Err(LoadError::Dangling {
                    context: context.to_string(),
                    kind: "currency",
                    id: currency.0,
                });
            }
            if *amount == 0 {
                return Err(LoadError::Invalid {
                    context: context.to_string(),
                    reason: format!("zero-amount requirement on currency {currency}"),
                });
            }
        }
        Requirement::Tag { .. } => {}
    }
    Ok(())
}

fn check_event(registry: &Registry, context: &str, event: &Event) -> Result<(), LoadError> {
    match event {
        Event::AddItem { item, .. } | Event::RemoveItem { item, .. } => {
            if !registry.items.contains_key(item) {
                return Err(LoadError::Dangling {
                    context: context.to_string(),
                    kind: "item",
                    id: item.0,
                });
            }
        }
        Event::AddCurrency { currency, .. } => {
            if !registry.currencies.contains_key(currency) {
                return Err(LoadError::Dangling {
                    context: context.to_string(),
                    kind: "currency",
                    id: currency.0,
                });
            }
        }
        Event::SkillXp { skill, .. } => {
            if !registry.skills.contains_key(skill) {
                return Err(LoadError::Dangling {
                    context: context.to_string(),
                    kind: "skill",
                    id: skill.0,
                });
            }
        }
        Event::Dialog { dialog } => {
            if !registry.dialogs.contains_key(dialog) {
                return Err(LoadError::Dangling {
                    context: context.to_string(),
                    kind: "dialog",
                    id: dialog.0,
                });
            }
        }
        Event::Craft { recipe } => {
            if let Some(recipe) = recipe {
                if !registry.recipes.contains_key(recipe) {
                    return Err(LoadError::Dangling {
                        context: context.to_string(),
                        kind: "recipe",
                        id: recipe.0,
                    });
                }
            }
        }
        Event::Combat {
            allies,
            enemies,
            on_victory,
        } => {
            if enemies.is_empty() {
                return Err(LoadError::Invalid {
                    context: context.to_string(),
                    reason: "combat event has no enemies".to_string(),
                });
            }
            for combatant in allies.iter().chain(enemies.iter()) {
                if !registry.combatants.contains_key(combatant) {
                    return Err(LoadError::Dangling {
                        context: context.to_string(),
                        kind: "combatant",
                        id: combatant.0,
                    });
                }
            }
            for chained in on_victory {
                check_event(registry, context, chained)?;
            }
        }
        Event::Text { .. } | Event::ViewSummary => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use fable_core::{
        CurrencyDef, CurrencyId, DialogId, DialogNode, DialogOption, ItemDef, ItemId, ItemStack,
        NodeId, RecipeId, RoomGraph, RoomId,
    };

    fn empty_registry() -> Registry {
        Registry {
            items: BTreeMap::new(),
            skills: BTreeMap::new(),
            currencies: BTreeMap::new(),
            dialogs: BTreeMap::new(),
            recipes: BTreeMap::new(),
            combatants: BTreeMap::new(),
            rooms: RoomGraph::default(),
            world_seed: 0,
        }
    }

    #[test]
    fn dialog_option_must_point_at_a_real_node() {
        let mut registry = empty_registry();
        let mut nodes = BTreeMap::new();
        nodes.insert(
            NodeId(0),
            DialogNode {
                id: NodeId(0),
                text: "Hello.".to_string(),
                options: vec![DialogOption {
                    text: "And you?".to_string(),
                    next: Some(NodeId(5)),
                }],
            },
        );
        registry.dialogs.insert(
            DialogId(1),
            DialogDef {
                id: DialogId(1),
                root: NodeId(0),
                nodes,
            },
        );
        assert!(matches!(
            validate(&registry),
            Err(LoadError::Dangling { kind: "dialog node", id: 5, .. })
        ));
    }

    #[test]
    fn dialog_root_must_exist() {
        let mut registry = empty_registry();
        registry.dialogs.insert(
            DialogId(1),
            DialogDef {
                id: DialogId(1),
                root: NodeId(3),
                nodes: BTreeMap::new(),
            },
        );
        assert!(matches!(
            validate(&registry),
            Err(LoadError::Dangling { kind: "dialog node", id: 3, .. })
        ));
    }

    #[test]
    fn recipe_with_unknown_input_is_rejected() {
        let mut registry = empty_registry();
        registry.items.insert(
            ItemId(1),
            ItemDef {
                id: ItemId(1),
                name: "Potion".to_string(),
                description: String::new(),
                max_stack: 0,
                value: 0,
            },
        );
        registry.recipes.insert(
            RecipeId(1),
            RecipeDef {
                id: RecipeId(1),
                name: "Potion".to_string(),
                inputs: vec![ItemStack {
                    item: ItemId(7),
                    quantity: 2,
                }],
                outputs: vec![ItemStack {
                    item: ItemId(1),
                    quantity: 1,
                }],
            },
        );
        assert!(matches!(
            validate(&registry),
            Err(LoadError::Dangling { kind: "item", id: 7, .. })
        ));
    }

    #[test]
    fn recipe_without_outputs_is_rejected() {
        let mut registry = empty_registry();
        registry.recipes.insert(
            RecipeId(1),
            RecipeDef {
                id: RecipeId(1),
                name: "Nothing".to_string(),
                inputs: vec![],
                outputs: vec![],
            },
        );
        assert!(matches!(validate(&registry), Err(LoadError::Invalid { .. })));
    }

    #[test]
    fn empty_world_is_valid() {
        let mut registry = empty_registry();
        registry.currencies.insert(
            CurrencyId(1),
            CurrencyDef {
                id: CurrencyId(1),
                name: "Coins".to_string(),
                symbol: "c".to_string(),
            },
        );
        registry.rooms = RoomGraph::new([RoomDef {
            id: RoomId(0),
            name: "Field".to_string(),
            enter_text: String::new(),
            first_enter_text: None,
            actions: vec![],
        }]);
        assert!(validate(&registry).is_ok());
    }
}
