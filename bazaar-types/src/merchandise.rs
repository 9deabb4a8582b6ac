//! Merchandise catalogs: the items a shop offers for sale.

use crate::Identified;
use serde::{Deserialize, Serialize};

/// One stack of items offered by a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchandise {
    pub mod_name: String,
    pub local_form_id: u32,
    pub name: String,
    pub quantity: u32,
    pub form_type: u32,
    pub is_food: bool,
    pub price: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// The full catalog of one shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchandiseList {
    /// Remote id; `None` until created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub shop_id: i32,
    /// Filled in by the service from the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i32>,
    pub form_list: Vec<Merchandise>,
}

impl MerchandiseList {
    /// Builds an unsaved catalog for `shop_id`.
    #[must_use]
    pub fn from_game(shop_id: i32, form_list: Vec<Merchandise>) -> Self {
        Self {
            id: None,
            shop_id,
            owner_id: None,
            form_list,
        }
    }
}

impl Identified for MerchandiseList {
    const KIND: &'static str = "merchandise list";

    fn id(&self) -> Option<i32> {
        self.id
    }
}
