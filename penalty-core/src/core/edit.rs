//! Edit strategy for changing a stored record from the form.
//!
//! The register supports two ways of applying an edit:
//!
//! - [`EditStrategy::InPlace`]: the record is rewritten with an `UPDATE` and
//!   keeps its id. This is the default.
//! - [`EditStrategy::Recreate`]: the original record is deleted (after the
//!   usual delete confirmation) and the edited values are submitted as a new
//!   record, which receives a new id. Registers that relied on earlier
//!   releases' behaviour, where every edit produced a fresh id, can opt into
//!   this.
//!
//! ## Serialization
//!
//! Variants serialize as PascalCase strings (`"InPlace"`, `"Recreate"`), so the
//! value can sit in a settings file or cross an IPC boundary unchanged.
//!
//! ```rust
//! use penalty_core::EditStrategy;
//!
//! let json = serde_json::to_string(&EditStrategy::Recreate).unwrap();
//! assert_eq!(json, r#""Recreate""#);
//! assert_eq!(EditStrategy::default(), EditStrategy::InPlace);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Determines how a submitted edit is written back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum EditStrategy {
    /// Update the selected record, preserving its id.
    #[default]
    InPlace,

    /// Delete the selected record and create a new one from the edited values.
    Recreate,
}

/// The action that needed a selected record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum SelectionAction {
    Edit,
    Delete,
}

impl fmt::Display for SelectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit => f.write_str("edit"),
            Self::Delete => f.write_str("delete"),
        }
    }
}
