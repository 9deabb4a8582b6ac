//! Interior decoration layouts: placed object references and shelves.
//!
//! A shop's layout is always transferred whole: the reference list and the
//! shelf list travel in one [`InteriorRefList`] and replace each other as a
//! unit.

use crate::Identified;
use serde::{Deserialize, Serialize};

/// Placement of one object instance relative to a base container object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteriorRef {
    pub base_mod_name: String,
    pub base_local_form_id: u32,
    /// Plugin that defines the placed reference; `None` for references the
    /// game created at runtime.
    #[serde(default)]
    pub ref_mod_name: Option<String>,
    pub ref_local_form_id: u32,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub angle_x: f32,
    pub angle_y: f32,
    pub angle_z: f32,
    pub scale: u16,
}

/// A display fixture with its own filter and sort configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub shelf_type: u32,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub angle_x: f32,
    pub angle_y: f32,
    pub angle_z: f32,
    pub scale: u16,
    /// Zero-based page currently shown.
    pub page: u32,
    /// Only show items of this form type.
    #[serde(default)]
    pub filter_form_type: Option<u32>,
    pub filter_is_food: bool,
    #[serde(default)]
    pub search: Option<String>,
    /// Merchandise field to sort by.
    #[serde(default)]
    pub sort_on: Option<String>,
    pub sort_asc: bool,
}

/// A shop's complete decoration layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteriorRefList {
    /// Remote id; `None` until created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub shop_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i32>,
    pub ref_list: Vec<InteriorRef>,
    /// Older service versions stored references only.
    #[serde(default)]
    pub shelves: Vec<Shelf>,
}

impl InteriorRefList {
    /// Builds an unsaved layout for `shop_id`.
    #[must_use]
    pub fn from_game(shop_id: i32, ref_list: Vec<InteriorRef>, shelves: Vec<Shelf>) -> Self {
        Self {
            id: None,
            shop_id,
            owner_id: None,
            ref_list,
            shelves,
        }
    }
}

impl Identified for InteriorRefList {
    const KIND: &'static str = "interior ref list";

    fn id(&self) -> Option<i32> {
        self.id
    }
}
