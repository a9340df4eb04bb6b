//! The edit buffer behind the record entry form.

use crate::{Category, PenaltyError, Record, RecordInput, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used for the complaint date default.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's local date in [`DATE_FORMAT`].
pub fn today() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// The free-text inputs of the entry form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    ComplaintDate,
    VehicleNumber,
    DriverName,
    PlateNumber,
    Description,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::ComplaintDate,
        FormField::VehicleNumber,
        FormField::DriverName,
        FormField::PlateNumber,
        FormField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ComplaintDate => "Complaint Date",
            Self::VehicleNumber => "Vehicle Number",
            Self::DriverName => "Driver Name",
            Self::PlateNumber => "Plate Number",
            Self::Description => "Description",
        }
    }

    /// Only the description accepts several lines.
    pub fn is_multiline(self) -> bool {
        self == Self::Description
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the buffer still holds only defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Empty,
    Filled,
}

/// The single in-flight record the user is composing or editing.
#[derive(Debug, Clone)]
pub struct FormState {
    input: RecordInput,
    today: String,
}

impl FormState {
    /// An empty form whose date defaults to today.
    pub fn new() -> Self {
        Self::with_today(today())
    }

    /// An empty form with an explicit "today", for deterministic callers.
    pub fn with_today(today: impl Into<String>) -> Self {
        let today = today.into();
        Self {
            input: empty_input(&today),
            today,
        }
    }

    pub fn input(&self) -> &RecordInput {
        &self.input
    }

    pub fn category(&self) -> Category {
        self.input.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.input.category = category;
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::ComplaintDate => self.input.complaint_date.as_str(),
            FormField::VehicleNumber => self.input.vehicle_number.as_str(),
            FormField::DriverName => self.input.driver_name.as_str(),
            FormField::PlateNumber => self.input.plate_number.as_str(),
            FormField::Description => self.input.description.as_str(),
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::ComplaintDate => self.input.complaint_date = value,
            FormField::VehicleNumber => self.input.vehicle_number = value,
            FormField::DriverName => self.input.driver_name = value,
            FormField::PlateNumber => self.input.plate_number = value,
            FormField::Description => self.input.description = value,
        }
    }

    /// Replaces the whole buffer with a stored record's values.
    pub fn load(&mut self, record: &Record) {
        self.input = record.input();
    }

    pub fn phase(&self) -> FormPhase {
        if self.input == empty_input(&self.today) {
            FormPhase::Empty
        } else {
            FormPhase::Filled
        }
    }

    /// Fields that are currently blank.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|f| self.field(*f).is_empty())
            .collect()
    }

    /// Checks that every required field is present and returns the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::ValidationFailed`] listing every blank field.
    pub fn validate(&self) -> Result<&RecordInput> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(&self.input)
        } else {
            Err(PenaltyError::ValidationFailed(missing))
        }
    }

    /// Clears the buffer back to its defaults.
    pub fn reset(&mut self) {
        self.input = empty_input(&self.today);
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_input(today: &str) -> RecordInput {
    RecordInput {
        complaint_date: today.to_string(),
        ..RecordInput::default()
    }
}
