//! Raw serde models for world documents.
//!
//! These mirror the authored JSON one-to-one. Every polymorphic object
//! carries a `"class"` discriminator selecting its variant; serde rejects
//! unknown discriminators at parse time, so by the time the loader runs,
//! only the closed vocabulary below exists. Catalog entries (items,
//! skills, currencies, recipes, combatants, dialog nodes) deserialize
//! straight into their `fable-core` definitions.

use serde::Deserialize;

use fable_core::{
    CombatantDef, CombatantId, CurrencyDef, CurrencyId, DialogId, DialogNode, ItemDef, ItemId,
    NodeId, RecipeDef, RecipeId, RoomId, SkillDef, SkillId, Tag,
};

/// A complete authored world.
#[derive(Clone, Debug, Deserialize)]
pub struct WorldDocument {
    #[serde(default)]
    pub config: WorldConfig,
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub skills: Vec<SkillDef>,
    #[serde(default)]
    pub currencies: Vec<CurrencyDef>,
    #[serde(default)]
    pub dialogs: Vec<RawDialog>,
    #[serde(default)]
    pub recipes: Vec<RecipeDef>,
    #[serde(default)]
    pub combatants: Vec<CombatantDef>,
    /// The room list. Order is presentation order.
    pub content: Vec<RawRoom>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldConfig {
    /// Actions appended to every room that does not opt out.
    #[serde(default)]
    pub default_actions: Vec<RawAction>,
    /// Base seed for deterministic combat resolution.
    #[serde(default)]
    pub world_seed: u64,
}

/// Dialog as authored: a flat node list rather than the core's arena.
#[derive(Clone, Debug, Deserialize)]
pub struct RawDialog {
    pub id: DialogId,
    pub root: NodeId,
    pub nodes: Vec<DialogNode>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawRoom {
    pub id: RoomId,
    pub name: String,
    #[serde(default)]
    pub enter_text: String,
    #[serde(default)]
    pub first_enter_text: Option<String>,
    /// Set to `false` to keep the world's default actions out of this room.
    #[serde(default = "default_true")]
    pub default_actions_enabled: bool,
    #[serde(default)]
    pub actions: Vec<RawAction>,
}

/// Envelope fields shared by every action class.
#[derive(Clone, Debug, Deserialize)]
pub struct RawActionCommon {
    pub menu_name: String,
    #[serde(default)]
    pub activation_text: Option<String>,
    #[serde(default)]
    pub requirements: Vec<RawRequirement>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub reveal_after_use: Vec<Tag>,
    #[serde(default)]
    pub hide_after_use: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "class")]
pub enum RawAction {
    #[serde(rename = "ExitAction")]
    Exit {
        #[serde(flatten)]
        common: RawActionCommon,
        target_room: RoomId,
    },
    #[serde(rename = "WrapperAction")]
    Wrapper {
        #[serde(flatten)]
        common: RawActionCommon,
        wrap: OneOrMany<RawEvent>,
    },
    #[serde(rename = "ShopAction")]
    Shop {
        #[serde(flatten)]
        common: RawActionCommon,
        default_currency: CurrencyId,
        wares: Vec<ItemId>,
    },
    #[serde(rename = "DialogAction")]
    Dialog {
        #[serde(flatten)]
        common: RawActionCommon,
        dialog_id: DialogId,
    },
    #[serde(rename = "ManageInventoryAction")]
    ManageInventory {
        #[serde(flatten)]
        common: RawActionCommon,
    },
}

impl RawAction {
    pub fn common(&self) -> &RawActionCommon {
        match self {
            RawAction::Exit { common, .. }
            | RawAction::Wrapper { common, .. }
            | RawAction::Shop { common, .. }
            | RawAction::Dialog { common, .. }
            | RawAction::ManageInventory { common } => common,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "class")]
pub enum RawRequirement {
    #[serde(rename = "ItemRequirement")]
    Item {
        item_id: ItemId,
        #[serde(default = "default_one")]
        quantity: u32,
    },
    #[serde(rename = "ConsumeItemRequirement")]
    ConsumeItem {
        item_id: ItemId,
        #[serde(default = "default_one")]
        quantity: u32,
    },
    #[serde(rename = "SkillRequirement")]
    Skill { skill_id: SkillId, level: u32 },
    #[serde(rename = "CurrencyRequirement")]
    Currency { currency_id: CurrencyId, amount: u32 },
    #[serde(rename = "TagRequirement")]
    Tag { tag: Tag },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "class")]
pub enum RawEvent {
    #[serde(rename = "AddItemEvent")]
    AddItem {
        item_id: ItemId,
        #[serde(default = "default_one")]
        quantity: u32,
    },
    #[serde(rename = "RemoveItemEvent")]
    RemoveItem {
        item_id: ItemId,
        #[serde(default = "default_one")]
        quantity: u32,
    },
    #[serde(rename = "AddCurrencyEvent")]
    AddCurrency { currency_id: CurrencyId, amount: u32 },
    #[serde(rename = "SkillXPEvent")]
    SkillXp { skill_id: SkillId, amount: u32 },
    #[serde(rename = "TextEvent")]
    Text { text: String },
    #[serde(rename = "DialogEvent")]
    Dialog { dialog_id: DialogId },
    #[serde(rename = "CraftingEvent")]
    Crafting {
        #[serde(default)]
        recipe_id: Option<RecipeId>,
    },
    #[serde(rename = "CombatEvent")]
    Combat {
        #[serde(default)]
        allies: Vec<CombatantId>,
        enemies: Vec<CombatantId>,
        #[serde(default)]
        on_victory: Vec<RawEvent>,
    },
    #[serde(rename = "ViewSummaryEvent")]
    ViewSummary {},
}

/// Accepts either a single object or a list, as `wrap` is authored both
/// ways in practice.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(Box<T>),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![*value],
            OneOrMany::Many(values) => values,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_one() -> u32 {
    1
}
