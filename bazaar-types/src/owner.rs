//! Shop owners (one per player save).

use crate::Identified;
use serde::{Deserialize, Serialize};

/// A player registered with the shop service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Remote id; `None` until created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    /// Player character name.
    pub name: String,
    /// Compatibility marker of the calling mod, echoed back by the service.
    pub mod_version: i32,
}

impl Owner {
    /// Builds an unsaved owner from values supplied by the game.
    #[must_use]
    pub fn from_game(name: &str, mod_version: i32) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            mod_version,
        }
    }
}

impl Identified for Owner {
    const KIND: &'static str = "owner";

    fn id(&self) -> Option<i32> {
        self.id
    }
}
