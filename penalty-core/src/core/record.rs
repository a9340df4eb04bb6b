//! The complaint record entity and its id-less input form.

use crate::Category;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identity of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl ToSql for RecordId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for RecordId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(RecordId)
    }
}

/// One penalty complaint as stored in the `records` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub category: Category,
    pub complaint_date: String,
    pub vehicle_number: String,
    pub driver_name: String,
    pub plate_number: String,
    pub description: String,
}

impl Record {
    /// The record's business fields, without its id.
    pub fn input(&self) -> RecordInput {
        RecordInput {
            category: self.category,
            complaint_date: self.complaint_date.clone(),
            vehicle_number: self.vehicle_number.clone(),
            driver_name: self.driver_name.clone(),
            plate_number: self.plate_number.clone(),
            description: self.description.clone(),
        }
    }

    /// Display cells for a table row, in column order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.category.label(),
            self.complaint_date.as_str(),
            self.vehicle_number.as_str(),
            self.driver_name.as_str(),
            self.plate_number.as_str(),
            self.description.as_str(),
        ]
    }
}

/// The six business fields of a record, as collected by the form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInput {
    pub category: Category,
    pub complaint_date: String,
    pub vehicle_number: String,
    pub driver_name: String,
    pub plate_number: String,
    pub description: String,
}

impl RecordInput {
    pub fn with_id(self, id: RecordId) -> Record {
        Record {
            id,
            category: self.category,
            complaint_date: self.complaint_date,
            vehicle_number: self.vehicle_number,
            driver_name: self.driver_name,
            plate_number: self.plate_number,
            description: self.description,
        }
    }
}

/// Column headers matching [`Record::cells`].
pub const COLUMN_HEADERS: [&str; 6] = [
    "Category",
    "Complaint Date",
    "Vehicle Number",
    "Driver Name",
    "Plate Number",
    "Description",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordInput {
        RecordInput {
            category: Category::Buses,
            complaint_date: "2024-03-02".to_string(),
            vehicle_number: "77".to_string(),
            driver_name: "Sara".to_string(),
            plate_number: "BUS-9".to_string(),
            description: "Skipped stop\nTwice".to_string(),
        }
    }

    #[test]
    fn test_input_round_trips_through_record() {
        let record = sample().with_id(RecordId(4));
        assert_eq!(record.id, RecordId(4));
        assert_eq!(record.input(), sample());
    }

    #[test]
    fn test_cells_follow_headers() {
        let record = sample().with_id(RecordId(1));
        let cells = record.cells();
        assert_eq!(cells.len(), COLUMN_HEADERS.len());
        assert_eq!(cells[0], "Buses");
        assert_eq!(cells[3], "Sara");
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_string(&sample().with_id(RecordId(9))).unwrap();
        assert!(json.contains("\"id\":9"));
        assert!(json.contains("\"complaintDate\":\"2024-03-02\""));
        assert!(json.contains("\"plateNumber\":\"BUS-9\""));
        assert!(json.contains("\"category\":\"Buses\""));
    }
}
