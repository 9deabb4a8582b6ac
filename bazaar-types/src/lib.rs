//! Domain models for the Bazaar shop service.
//!
//! This crate defines the resources the service stores, in the shape they
//! take on the wire:
//! - Owners and shops
//! - Merchandise catalogs
//! - Interior layouts (placed references and shelves)
//! - Transactions
//!
//! Nothing here knows about HTTP or the C boundary; `bazaar-client` moves
//! these types over the network and `bazaar-ffi` mirrors them as C structs.

mod ids;
mod interior;
mod merchandise;
mod owner;
mod shop;
mod transaction;

pub use ids::{FormKey, Identified};
pub use interior::{InteriorRef, InteriorRefList, Shelf};
pub use merchandise::{Merchandise, MerchandiseList};
pub use owner::Owner;
pub use shop::{Shop, DEFAULT_SHOP_TYPE};
pub use transaction::Transaction;
