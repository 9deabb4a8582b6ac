//! Shops and their vendor keyword filters.

use crate::Identified;
use serde::{Deserialize, Serialize};

/// Shop type assigned when the caller does not pick one.
pub const DEFAULT_SHOP_TYPE: &str = "general_store";

/// A player-run shop.
///
/// `gold`, `shop_type` and the vendor keyword fields were added to the
/// service after the first release; they default when a response omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    /// Remote id; `None` until created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub name: String,
    pub description: String,
    /// Gold held by the shop's vendor.
    #[serde(default)]
    pub gold: i32,
    #[serde(default = "default_shop_type")]
    pub shop_type: String,
    /// Keywords an item must carry to be sold here.
    #[serde(default)]
    pub vendor_keywords: Vec<String>,
    /// Inverts `vendor_keywords`: items carrying any of them are refused.
    #[serde(default)]
    pub vendor_keywords_exclude: bool,
}

fn default_shop_type() -> String {
    DEFAULT_SHOP_TYPE.to_string()
}

impl Shop {
    /// Builds an unsaved shop with only a name and description.
    #[must_use]
    pub fn from_game(name: &str, description: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
            gold: 0,
            shop_type: default_shop_type(),
            vendor_keywords: Vec::new(),
            vendor_keywords_exclude: false,
        }
    }

}

impl Identified for Shop {
    const KIND: &'static str = "shop";

    fn id(&self) -> Option<i32> {
        self.id
    }
}
