//! Buy and sell events against a shop's inventory.

use crate::{FormKey, Identified};
use serde::{Deserialize, Serialize};

/// One buy or sell event.
///
/// `is_sell` is from the shop's point of view: `true` means the shop sells
/// `quantity` items to the player and its stock shrinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Remote id; `None` until created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub shop_id: i32,
    pub mod_name: String,
    pub local_form_id: i32,
    pub name: String,
    pub form_type: i32,
    pub is_food: bool,
    pub price: i32,
    pub is_sell: bool,
    pub quantity: i32,
    /// Gold that changed hands.
    pub amount: i32,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Transaction {
    /// The natural key of the traded game object, or `None` when
    /// `local_form_id` is negative and so cannot name a form.
    #[must_use]
    pub fn form_key(&self) -> Option<FormKey> {
        u32::try_from(self.local_form_id)
            .ok()
            .map(|local_form_id| FormKey::new(self.mod_name.clone(), local_form_id))
    }
}

impl Identified for Transaction {
    const KIND: &'static str = "transaction";

    fn id(&self) -> Option<i32> {
        self.id
    }
}
