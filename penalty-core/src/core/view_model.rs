//! Presentation-independent state behind the register window.
//!
//! [`ViewModel`] owns everything the window shows apart from widgets: the
//! entry form, the selected record, the pending yes/no confirmation, the
//! search inputs, and the rows currently listed. Every user action is a method
//! that borrows the [`RecordStore`] for its duration.
//!
//! Deleting is two-step: [`ViewModel::request_delete`] opens a
//! [`Confirmation`], and only [`ViewModel::confirm`] touches the store.
//! [`ViewModel::cancel`] declines and leaves everything else as it was.
//!
//! Construct with [`ViewModel::open`] to start with every record listed;
//! [`ViewModel::new`] starts with no rows until the first
//! [`show_all`](ViewModel::show_all).

use crate::{
    EditStrategy, FormState, PenaltyError, Record, RecordId, RecordStore, Result, SearchFilter,
    SelectionAction, ALL_CATEGORIES,
};

/// A yes/no decision the user must make before the store is changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Delete the selected record.
    Delete(RecordId),
    /// Delete the original of a record being edited with [`EditStrategy::Recreate`].
    ReplaceOnEdit(RecordId),
}

impl Confirmation {
    pub fn target(&self) -> RecordId {
        match self {
            Self::Delete(id) | Self::ReplaceOnEdit(id) => *id,
        }
    }

    pub fn title(&self) -> &'static str {
        "Confirm"
    }

    pub fn prompt(&self) -> &'static str {
        "Are you sure you want to delete this record?"
    }
}

/// What a successful action did, for the notification banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created(RecordId),
    Updated(RecordId),
    Deleted(RecordId),
    /// A record's values were copied into the form for editing.
    Loaded(RecordId),
    /// A confirmation is now pending; see [`ViewModel::pending`].
    ConfirmationRequested(RecordId),
    /// The row list was refreshed and holds this many records.
    Listed(usize),
}

impl Outcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::Created(_) => Some("Record added successfully!"),
            Self::Updated(_) => Some("Record updated successfully!"),
            Self::Deleted(_) => Some("Record deleted successfully!"),
            Self::Loaded(_) | Self::ConfirmationRequested(_) | Self::Listed(_) => None,
        }
    }
}

/// Which rows the table is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum ActiveView {
    #[default]
    All,
    Filtered(SearchFilter),
}

pub struct ViewModel {
    form: FormState,
    strategy: EditStrategy,
    selection: Option<RecordId>,
    editing: Option<RecordId>,
    pending: Option<Confirmation>,
    /// Form contents from before a Recreate edit loaded the original.
    restore_on_decline: Option<FormState>,
    search_term: String,
    search_category: String,
    view: ActiveView,
    rows: Vec<Record>,
}

impl ViewModel {
    /// A view model with an empty form that already lists every record.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::Database`] if the records cannot be read.
    pub fn open(store: &RecordStore, strategy: EditStrategy) -> Result<Self> {
        Self::open_with_form(store, FormState::new(), strategy)
    }

    /// Like [`open`](Self::open), with a caller-supplied form.
    pub fn open_with_form(store: &RecordStore, form: FormState, strategy: EditStrategy) -> Result<Self> {
        let mut vm = Self::with_form(form, strategy);
        vm.show_all(store)?;
        Ok(vm)
    }

    /// A view model with no rows listed yet.
    pub fn new(strategy: EditStrategy) -> Self {
        Self::with_form(FormState::new(), strategy)
    }

    pub fn with_form(form: FormState, strategy: EditStrategy) -> Self {
        Self {
            form,
            strategy,
            selection: None,
            editing: None,
            pending: None,
            restore_on_decline: None,
            search_term: String::new(),
            search_category: ALL_CATEGORIES.to_string(),
            view: ActiveView::All,
            rows: Vec::new(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn strategy(&self) -> EditStrategy {
        self.strategy
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn selection(&self) -> Option<RecordId> {
        self.selection
    }

    /// The record an in-place edit will overwrite on the next submit.
    pub fn editing(&self) -> Option<RecordId> {
        self.editing
    }

    pub fn pending(&self) -> Option<Confirmation> {
        self.pending
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn search_category(&self) -> &str {
        &self.search_category
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Sets the category dropdown value (`"All"` or a category label).
    pub fn set_search_category(&mut self, category: impl Into<String>) {
        self.search_category = category.into();
    }

    /// Marks `id` as the target of Edit / Delete, replacing any previous selection.
    pub fn select(&mut self, id: RecordId) {
        self.selection = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Validates the form and writes it to the store.
    ///
    /// Creates a new record, or updates the record loaded by an in-place
    /// [`begin_edit`](Self::begin_edit). On success the form is reset and all
    /// records are listed again; if that re-read fails the previous rows stay
    /// and the outcome is still returned.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::ValidationFailed`] without touching the store if
    /// a field is blank; the form keeps its contents. Failures of the create or
    /// update are propagated and also leave the form as it was.
    pub fn submit(&mut self, store: &mut RecordStore) -> Result<Outcome> {
        let input = self.form.validate()?.clone();

        let outcome = match self.editing {
            Some(id) => {
                if let Err(e) = store.update(id, &input) {
                    if matches!(e, PenaltyError::RecordNotFound(_)) {
                        log::warn!("record {id} vanished while being edited");
                        self.editing = None;
                    }
                    return Err(e);
                }
                Outcome::Updated(id)
            }
            None => Outcome::Created(store.create(&input)?),
        };

        self.editing = None;
        self.restore_on_decline = None;
        self.form.reset();
        self.relist(store);
        Ok(outcome)
    }

    /// Loads the selected record into the form.
    ///
    /// With [`EditStrategy::InPlace`] the next submit updates the record.
    /// With [`EditStrategy::Recreate`] a [`Confirmation::ReplaceOnEdit`] is
    /// opened for the original; once confirmed the original is deleted and the
    /// next submit creates a new record. Declining puts the form back as it
    /// was before the edit.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::NoSelection`] if nothing is selected, or
    /// [`PenaltyError::RecordNotFound`] if the selected record no longer exists
    /// (the selection is cleared in that case).
    pub fn begin_edit(&mut self, store: &RecordStore) -> Result<Outcome> {
        let id = self
            .selection
            .ok_or(PenaltyError::NoSelection(SelectionAction::Edit))?;

        let Some(record) = store.get_by_id(id)? else {
            log::warn!("selected record {id} no longer exists");
            self.selection = None;
            return Err(PenaltyError::RecordNotFound(id));
        };

        match self.strategy {
            EditStrategy::InPlace => {
                self.form.load(&record);
                self.editing = Some(id);
                Ok(Outcome::Loaded(id))
            }
            EditStrategy::Recreate => {
                self.decline_pending();
                self.restore_on_decline = Some(self.form.clone());
                self.form.load(&record);
                self.editing = None;
                self.pending = Some(Confirmation::ReplaceOnEdit(id));
                Ok(Outcome::ConfirmationRequested(id))
            }
        }
    }

    /// Abandons an edit in progress and clears the form.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.reset();
    }

    /// Asks for confirmation to delete the selected record. Nothing is deleted yet.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::NoSelection`] if nothing is selected.
    pub fn request_delete(&mut self) -> Result<Outcome> {
        let id = self
            .selection
            .ok_or(PenaltyError::NoSelection(SelectionAction::Delete))?;
        self.decline_pending();
        self.pending = Some(Confirmation::Delete(id));
        Ok(Outcome::ConfirmationRequested(id))
    }

    /// Answers "yes" to the pending confirmation and performs the delete.
    ///
    /// Returns `None` when no confirmation was pending. Once the delete is
    /// stored the outcome is returned even if re-reading the rows fails.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::Database`] if the delete fails. A Recreate
    /// edit's form is then put back as it was before the edit.
    pub fn confirm(&mut self, store: &mut RecordStore) -> Result<Option<Outcome>> {
        let Some(confirmation) = self.pending.take() else {
            return Ok(None);
        };
        let snapshot = self.restore_on_decline.take();
        let id = confirmation.target();
        if let Err(e) = store.delete(id) {
            if let Some(form) = snapshot {
                self.form = form;
            }
            return Err(e);
        }

        if self.selection == Some(id) {
            self.selection = None;
        }
        if self.editing == Some(id) {
            // The buffer survives; submitting it now creates a new record.
            self.editing = None;
        }
        self.rows.retain(|r| r.id != id);
        self.relist(store);
        Ok(Some(Outcome::Deleted(id)))
    }

    /// Answers "no" to the pending confirmation. Returns whether one was pending.
    ///
    /// Declining a [`Confirmation::ReplaceOnEdit`] restores the form to what it
    /// held before [`begin_edit`](Self::begin_edit).
    pub fn cancel(&mut self) -> bool {
        self.decline_pending().is_some()
    }

    fn decline_pending(&mut self) -> Option<Confirmation> {
        let declined = self.pending.take();
        if let Some(form) = self.restore_on_decline.take() {
            self.form = form;
        }
        declined
    }

    /// Filters the rows by the current search inputs.
    ///
    /// Surrounding whitespace in the search term is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::InvalidCategory`] if the category input is not
    /// `"All"` or a known category.
    pub fn search(&mut self, store: &RecordStore) -> Result<Outcome> {
        let filter = SearchFilter::build(self.search_term.trim(), &self.search_category)?;
        self.view = ActiveView::Filtered(filter);
        self.refresh(store).map(Outcome::Listed)
    }

    /// Lists every record, dropping any active search.
    pub fn show_all(&mut self, store: &RecordStore) -> Result<Outcome> {
        self.view = ActiveView::All;
        self.refresh(store).map(Outcome::Listed)
    }

    /// Lists every record after a stored change. A failed re-read keeps the
    /// previous rows.
    fn relist(&mut self, store: &RecordStore) {
        self.view = ActiveView::All;
        if let Err(e) = self.refresh(store) {
            log::warn!("record list not refreshed: {e}");
        }
    }

    /// Re-reads the rows for the active view. A selection that is no longer
    /// listed is cleared.
    pub fn refresh(&mut self, store: &RecordStore) -> Result<usize> {
        self.rows = match &self.view {
            ActiveView::All => store.list()?,
            ActiveView::Filtered(filter) => store.search(filter)?,
        };
        if let Some(id) = self.selection {
            if !self.rows.iter().any(|r| r.id == id) {
                self.selection = None;
            }
        }
        Ok(self.rows.len())
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new(EditStrategy::default())
    }
}
