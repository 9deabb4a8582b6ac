//! Identity types shared by every shop-service resource.
//!
//! Two kinds of identity exist:
//! - Record ids, assigned by the remote service when a resource is created.
//!   They are absent (`None` here, `0` across the C boundary) before creation
//!   and immutable afterwards.
//! - Form keys, the `(mod_name, local_form_id)` pair that names a game object
//!   the same way on every installation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resource whose id is assigned by the remote service.
pub trait Identified {
    /// Human-readable resource name used in error messages.
    const KIND: &'static str;

    /// The remote-assigned id, if the resource has been saved.
    fn id(&self) -> Option<i32>;

    /// Returns true once the service has assigned a non-zero id.
    fn is_saved(&self) -> bool {
        self.id().is_some_and(|id| id != 0)
    }
}

/// Natural key of a game object: the plugin file that defines it and the
/// form id local to that file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FormKey {
    /// Plugin file name, e.g. `Skyrim.esm`.
    pub mod_name: String,
    /// Form id with the load-order byte stripped.
    pub local_form_id: u32,
}

impl FormKey {
    /// Creates a form key.
    #[must_use]
    pub fn new(mod_name: impl Into<String>, local_form_id: u32) -> Self {
        Self {
            mod_name: mod_name.into(),
            local_form_id,
        }
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{:#010x}", self.mod_name, self.local_form_id)
    }
}
