//! Typed identifiers for catalog entities.
//!
//! Every cross-reference in content data (an exit's target room, a ware's
//! item, a combat roster entry) is expressed through one of these newtypes.
//! The loader validates all of them at load time, so a well-formed world
//! never produces a dangling id at runtime.

use core::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a room in the room graph.
    RoomId,
    "room:"
);
define_id!(
    /// Identifier of an item definition.
    ItemId,
    "item:"
);
define_id!(
    /// Identifier of a skill definition.
    SkillId,
    "skill:"
);
define_id!(
    /// Identifier of a currency definition.
    CurrencyId,
    "currency:"
);
define_id!(
    /// Identifier of a dialog definition.
    DialogId,
    "dialog:"
);
define_id!(
    /// Identifier of a crafting recipe.
    RecipeId,
    "recipe:"
);
define_id!(
    /// Identifier of a combatant template.
    CombatantId,
    "combatant:"
);
define_id!(
    /// Identifier of a dialog node within one dialog's node arena.
    NodeId,
    "node:"
);

/// Position of an action inside a room's ordered action list.
///
/// Default actions occupy the leading indices, followed by the room's own
/// actions in declaration order. The index is stable for the lifetime of a
/// loaded world, which lets player state reference actions as
/// `(RoomId, ActionId)` pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(pub u32);

impl ActionId {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action:{}", self.0)
    }
}

/// Player-scoped marker gating action visibility.
///
/// Tags are plain strings in content data. They are only ever mutated
/// through explicit `reveal_after_use` directives.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tag(pub String);

impl Tag {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for Tag {
    fn from(value: String) -> Self {
        Self(value)
    }
}
