//! Core library for the Penalty Committee register, a local single-user log
//! of vehicle penalty complaints.
//!
//! The primary entry points are [`RecordStore`], which owns the SQLite file and
//! performs record CRUD and search, and [`ViewModel`], which holds the entry
//! form, selection and pending confirmation that a window renders.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    category::{Category, CategoryFilter, ALL_CATEGORIES},
    edit::{EditStrategy, SelectionAction},
    error::{PenaltyError, Result},
    form::{today, FormField, FormPhase, FormState, DATE_FORMAT},
    query::SearchFilter,
    record::{Record, RecordId, RecordInput, COLUMN_HEADERS},
    record_store::RecordStore,
    settings::{
        default_database_path, load_settings, load_settings_from, save_settings,
        save_settings_to, settings_file_path, AppSettings,
    },
    storage::Storage,
    view_model::{Confirmation, Outcome, ViewModel},
};
