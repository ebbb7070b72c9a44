//! Dialog definitions: a node arena traversed one step per invocation.

use std::collections::BTreeMap;

use super::ids::{DialogId, NodeId};

/// One selectable option on a dialog node.
///
/// `next` of `None` ends the conversation; the node the option sits on
/// becomes the dialog's terminal position for the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogOption {
    pub text: String,
    pub next: Option<NodeId>,
}

/// A single node in a dialog graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogNode {
    pub id: NodeId,
    pub text: String,
    /// Ordered options presented to the player. An empty list makes the
    /// node terminal: repeated visits keep returning `text`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<DialogOption>,
}

impl DialogNode {
    pub fn is_terminal(&self) -> bool {
        self.options.is_empty()
    }
}

/// Static definition of a dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogDef {
    pub id: DialogId,
    pub root: NodeId,
    pub nodes: BTreeMap<NodeId, DialogNode>,
}

impl DialogDef {
    /// Looks up a node by id. The loader validates every option target, so
    /// a missing node in a loaded world indicates a corrupted definition.
    pub fn node(&self, id: NodeId) -> Option<&DialogNode> {
        self.nodes.get(&id)
    }
}
