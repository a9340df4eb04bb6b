//! Record CRUD and filtered search over the `records` table.

use crate::{
    AppSettings, Category, PenaltyError, Record, RecordId, RecordInput, Result, SearchFilter, Storage,
};
use rusqlite::Connection;
use std::path::Path;

const RECORD_COLUMNS: &str =
    "id, category, complaint_date, vehicle_number, driver_name, plate_number, description";

/// An open penalty register backed by a SQLite database.
///
/// `RecordStore` is the only handle to the database: the view model borrows
/// it for each action. Every mutation is a single autocommitted statement.
pub struct RecordStore {
    storage: Storage,
}

impl RecordStore {
    /// Opens the register at `path`, creating the file and table if absent.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::Database`] or [`PenaltyError::Io`] if the file
    /// cannot be opened or initialised.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            storage: Storage::open(path)?,
        })
    }

    /// Opens the register at the location named in `settings`.
    pub fn open_with_settings(settings: &AppSettings) -> Result<Self> {
        Self::open(&settings.database_path)
    }

    pub fn connection(&self) -> &Connection {
        self.storage.connection()
    }

    /// Inserts a new record and returns its store-assigned id.
    ///
    /// The input is not re-validated here; callers check required fields first.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::Database`] for any SQLite failure.
    pub fn create(&mut self, input: &RecordInput) -> Result<RecordId> {
        let conn = self.storage.connection_mut();
        conn.execute(
            "INSERT INTO records (category, complaint_date, vehicle_number, driver_name, plate_number, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                input.category,
                input.complaint_date,
                input.vehicle_number,
                input.driver_name,
                input.plate_number,
                input.description,
            ],
        )?;
        let id = RecordId(conn.last_insert_rowid());
        log::info!("created record {id} ({})", input.category);
        Ok(id)
    }

    /// Returns every record, oldest first.
    ///
    /// Rows whose category is NULL or not recognised are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::Database`] for any SQLite failure, including a
    /// column holding a non-text value.
    pub fn list(&self) -> Result<Vec<Record>> {
        let mut stmt = self
            .connection()
            .prepare(&format!("SELECT {RECORD_COLUMNS} FROM records ORDER BY id"))?;
        let records: Vec<Record> = stmt
            .query_map([], map_record_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .filter_map(record_from_row)
            .collect();
        log::debug!("listed {} records", records.len());
        Ok(records)
    }

    /// Returns the records admitted by `filter`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::Database`] for any SQLite failure.
    pub fn search(&self, filter: &SearchFilter) -> Result<Vec<Record>> {
        let (clause, (category, pattern)) = filter.where_clause();
        let mut stmt = self.connection().prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM records WHERE {clause} ORDER BY id"
        ))?;
        let records: Vec<Record> = stmt
            .query_map(rusqlite::params![category, pattern], map_record_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .filter_map(record_from_row)
            .collect();
        log::debug!(
            "search term={:?} category={} matched {} records",
            filter.term(),
            filter.category(),
            records.len()
        );
        Ok(records)
    }

    /// Fetches a single record, or `None` if no row has that id (or the row's
    /// category cannot be read, as in [`list`](Self::list)).
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::Database`] for SQLite failures other than
    /// "no rows returned".
    pub fn get_by_id(&self, id: RecordId) -> Result<Option<Record>> {
        let result = self.connection().query_row(
            &format!("SELECT {RECORD_COLUMNS} FROM records WHERE id = ?1"),
            [id],
            map_record_row,
        );

        match result {
            Ok(row) => Ok(record_from_row(row)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the business fields of an existing record, keeping its id.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::RecordNotFound`] if no row has `id`, or
    /// [`PenaltyError::Database`] for any other SQLite failure.
    pub fn update(&mut self, id: RecordId, input: &RecordInput) -> Result<()> {
        let changed = self.storage.connection_mut().execute(
            "UPDATE records
             SET category = ?1, complaint_date = ?2, vehicle_number = ?3,
                 driver_name = ?4, plate_number = ?5, description = ?6
             WHERE id = ?7",
            rusqlite::params![
                input.category,
                input.complaint_date,
                input.vehicle_number,
                input.driver_name,
                input.plate_number,
                input.description,
                id,
            ],
        )?;

        // UPDATE on a missing row succeeds but touches nothing.
        if changed == 0 {
            return Err(PenaltyError::RecordNotFound(id));
        }
        log::info!("updated record {id}");
        Ok(())
    }

    /// Deletes the record with `id`. Deleting an absent id is not an error.
    ///
    /// Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns [`PenaltyError::Database`] for any SQLite failure.
    pub fn delete(&mut self, id: RecordId) -> Result<bool> {
        let removed = self
            .storage
            .connection_mut()
            .execute("DELETE FROM records WHERE id = ?1", [id])?;
        if removed == 0 {
            log::debug!("delete of record {id} matched no row");
        } else {
            log::info!("deleted record {id}");
        }
        Ok(removed > 0)
    }

    /// Number of records in the register.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .connection()
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Raw 7-column tuple extracted from a `records` row, before the category is parsed.
type RecordRow = (RecordId, Option<String>, Option<String>, Option<String>, Option<String>, Option<String>, Option<String>);

/// Row-mapping closure for `SELECT {RECORD_COLUMNS}` queries.
///
/// Only column types are checked here; the category is parsed per row by
/// [`record_from_row`] so one bad row cannot fail a whole listing.
fn map_record_row(row: &rusqlite::Row) -> rusqlite::Result<RecordRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

/// Converts a raw row into a [`Record`]. NULL text columns read as empty.
///
/// Returns `None`, with a warning, when the category is NULL or unknown.
fn record_from_row(
    (id, category, complaint_date, vehicle_number, driver_name, plate_number, description): RecordRow,
) -> Option<Record> {
    let Some(label) = category else {
        log::warn!("skipping record {id}: no category");
        return None;
    };
    let category = match label.parse::<Category>() {
        Ok(category) => category,
        Err(_) => {
            log::warn!("skipping record {id}: unknown category {label:?}");
            return None;
        }
    };
    Some(Record {
        id,
        category,
        complaint_date: complaint_date.unwrap_or_default(),
        vehicle_number: vehicle_number.unwrap_or_default(),
        driver_name: driver_name.unwrap_or_default(),
        plate_number: plate_number.unwrap_or_default(),
        description: description.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CategoryFilter;
    use tempfile::NamedTempFile;

    fn open_store() -> (NamedTempFile, RecordStore) {
        let temp = NamedTempFile::new().unwrap();
        let store = RecordStore::open(temp.path()).unwrap();
        (temp, store)
    }

    fn input(category: Category, vehicle: &str, driver: &str, plate: &str, description: &str) -> RecordInput {
        RecordInput {
            category,
            complaint_date: "2024-01-01".to_string(),
            vehicle_number: vehicle.to_string(),
            driver_name: driver.to_string(),
            plate_number: plate.to_string(),
            description: description.to_string(),
        }
    }

    fn ali() -> RecordInput {
        input(Category::Taxis, "12345", "Ali", "XYZ-1", "Speeding")
    }

    fn seed(store: &mut RecordStore) -> Vec<RecordId> {
        vec![
            store.create(&ali()).unwrap(),
            store
                .create(&input(Category::Buses, "B-7", "Omar", "BUS-22", "Skipped the stop"))
                .unwrap(),
            store
                .create(&input(Category::HeavyTrucks, "HT-9", "Layla", "TR-100", "Overloaded axle, 50% over"))
                .unwrap(),
            store
                .create(&input(Category::Taxis, "T-44", "Khalid", "XYZ-2", "Refused fare to ALI street"))
                .unwrap(),
        ]
    }

    #[test]
    fn test_concrete_create_search_delete_scenario() {
        let (_temp, mut store) = open_store();

        let id = store.create(&ali()).unwrap();
        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId(1));
        assert_eq!(id, RecordId(1));
        assert_eq!(records[0].input(), ali());

        let found = store
            .search(&SearchFilter::build("ali", "All").unwrap())
            .unwrap();
        assert_eq!(found, records);

        store.delete(RecordId(1)).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_ids_are_unique_and_never_reused() {
        let (_temp, mut store) = open_store();
        let first = store.create(&ali()).unwrap();
        let second = store.create(&ali()).unwrap();
        assert!(second > first);

        store.delete(second).unwrap();
        let third = store.create(&ali()).unwrap();
        assert!(third > second, "AUTOINCREMENT must not hand out a deleted id again");
    }

    #[test]
    fn test_list_returns_insertion_order() {
        let (_temp, mut store) = open_store();
        let ids = seed(&mut store);
        let listed: Vec<RecordId> = store.list().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn test_empty_search_equals_list() {
        let (_temp, mut store) = open_store();
        seed(&mut store);
        let all = store.search(&SearchFilter::build("", "All").unwrap()).unwrap();
        assert_eq!(all, store.list().unwrap());
    }

    #[test]
    fn test_search_matches_in_memory_predicate() {
        let (_temp, mut store) = open_store();
        seed(&mut store);
        let everything = store.list().unwrap();

        let cases = [
            ("ali", "All"),
            ("ALI", "Taxis"),
            ("xyz", "All"),
            ("xyz", "Buses"),
            ("", "Heavy Trucks"),
            ("50%", "All"),
            ("%", "All"),
            ("_", "All"),
            ("stop", "Citizen Complaints on Taxis"),
            ("nothing-matches", "All"),
        ];
        for (term, category) in cases {
            let filter = SearchFilter::build(term, category).unwrap();
            let expected: Vec<Record> = everything
                .iter()
                .filter(|r| filter.matches(r))
                .cloned()
                .collect();
            assert_eq!(
                store.search(&filter).unwrap(),
                expected,
                "term={term:?} category={category:?}"
            );
        }
    }

    #[test]
    fn test_search_is_case_insensitive_on_stored_side() {
        let (_temp, mut store) = open_store();
        seed(&mut store);
        let found = store
            .search(&SearchFilter::new("ali", CategoryFilter::All))
            .unwrap();
        let drivers: Vec<&str> = found.iter().map(|r| r.driver_name.as_str()).collect();
        // "Ali" by driver name, "ALI street" by description
        assert_eq!(drivers, vec!["Ali", "Khalid"]);
    }

    #[test]
    fn test_wildcards_in_term_are_literal() {
        let (_temp, mut store) = open_store();
        seed(&mut store);
        let found = store
            .search(&SearchFilter::new("%", CategoryFilter::All))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].driver_name, "Layla");
    }

    #[test]
    fn test_get_by_id_present_and_absent() {
        let (_temp, mut store) = open_store();
        let id = store.create(&ali()).unwrap();

        let record = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(record.driver_name, "Ali");
        assert!(store.get_by_id(RecordId(999)).unwrap().is_none());
    }

    #[test]
    fn test_delete_existing_removes_exactly_one() {
        let (_temp, mut store) = open_store();
        let ids = seed(&mut store);

        assert!(store.delete(ids[1]).unwrap());
        assert_eq!(store.count().unwrap(), ids.len() - 1);
        assert!(store.get_by_id(ids[1]).unwrap().is_none());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let (_temp, mut store) = open_store();
        seed(&mut store);
        let before = store.count().unwrap();

        assert!(!store.delete(RecordId(42)).unwrap());
        assert_eq!(store.count().unwrap(), before);
    }

    #[test]
    fn test_update_preserves_id() {
        let (_temp, mut store) = open_store();
        let id = store.create(&ali()).unwrap();

        let mut changed = ali();
        changed.description = "Speeding, second offence".to_string();
        changed.category = Category::CitizenComplaintsOnTaxis;
        store.update(id, &changed).unwrap();

        let record = store.get_by_id(id).unwrap().unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.input(), changed);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_update_missing_record() {
        let (_temp, mut store) = open_store();
        let err = store.update(RecordId(5), &ali()).unwrap_err();
        assert!(matches!(err, PenaltyError::RecordNotFound(RecordId(5))));
    }

    #[test]
    fn test_records_survive_reopen() {
        let temp = NamedTempFile::new().unwrap();
        {
            let mut store = RecordStore::open(temp.path()).unwrap();
            store.create(&ali()).unwrap();
        }
        let store = RecordStore::open(temp.path()).unwrap();
        assert_eq!(store.list().unwrap()[0].input(), ali());
    }

    #[test]
    fn test_unknown_stored_category_skips_only_that_row() {
        let (_temp, mut store) = open_store();
        let good = store.create(&ali()).unwrap();
        store
            .connection()
            .execute(
                "INSERT INTO records (category, complaint_date, vehicle_number, driver_name, plate_number, description)
                 VALUES ('Rickshaws', '2024-01-01', '1', 'A', 'P', 'D')",
                [],
            )
            .unwrap();
        let bad = RecordId(store.connection().last_insert_rowid());

        let ids: Vec<RecordId> = store.list().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![good]);
        assert!(store.get_by_id(bad).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn test_null_category_skips_only_that_row() {
        let (_temp, mut store) = open_store();
        store
            .connection()
            .execute(
                "INSERT INTO records (category, vehicle_number, driver_name) VALUES (NULL, '9', 'Ali')",
                [],
            )
            .unwrap();
        let good = store.create(&ali()).unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, good);
        assert_eq!(store.search(&SearchFilter::build("ali", "All").unwrap()).unwrap(), listed);
        assert_eq!(store.search(&SearchFilter::default()).unwrap(), listed);
    }

    #[test]
    fn test_non_text_column_is_a_database_error() {
        let (_temp, store) = open_store();
        store
            .connection()
            .execute(
                "INSERT INTO records (category, complaint_date, vehicle_number, driver_name, plate_number, description)
                 VALUES ('Taxis', '2024-01-01', '1', 'A', 'P', X'00FF')",
                [],
            )
            .unwrap();
        assert!(matches!(store.list(), Err(PenaltyError::Database(_))));
    }

    #[test]
    fn test_null_columns_read_as_empty() {
        let (_temp, store) = open_store();
        store
            .connection()
            .execute("INSERT INTO records (category) VALUES ('Buses')", [])
            .unwrap();
        let records = store.list().unwrap();
        assert_eq!(records[0].category, Category::Buses);
        assert_eq!(records[0].driver_name, "");
        assert_eq!(store.search(&SearchFilter::default()).unwrap(), records);
    }
}
