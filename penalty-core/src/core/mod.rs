//! Internal domain modules for the penalty register core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod category;
pub mod edit;
pub mod error;
pub mod form;
pub mod query;
pub mod record;
pub mod record_store;
pub mod settings;
pub mod storage;
pub mod view_model;

#[doc(inline)]
pub use category::{Category, CategoryFilter, ALL_CATEGORIES};
#[doc(inline)]
pub use edit::{EditStrategy, SelectionAction};
#[doc(inline)]
pub use error::{PenaltyError, Result};
#[doc(inline)]
pub use form::{FormField, FormPhase, FormState};
#[doc(inline)]
pub use query::SearchFilter;
#[doc(inline)]
pub use record::{Record, RecordId, RecordInput, COLUMN_HEADERS};
#[doc(inline)]
pub use record_store::RecordStore;
#[doc(inline)]
pub use settings::AppSettings;
#[doc(inline)]
pub use storage::Storage;
#[doc(inline)]
pub use view_model::{Confirmation, Outcome, ViewModel};
