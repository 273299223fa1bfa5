use std::collections::BTreeSet;

use crate::api::Backend;
use crate::error::ClientError;
use crate::model::Entry;

/// Display-ready form of one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub id: i64,
    pub name: String,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
    pub details: Option<String>,
    pub expanded: bool,
}

impl EntryRow {
    pub fn from_entry(entry: &Entry, expanded: bool) -> Self {
        Self {
            id: entry.id,
            name: entry.name.clone(),
            calories: entry.calories,
            protein: entry.protein.unwrap_or(0.0),
            carbs: entry.carbs.unwrap_or(0.0),
            fat: entry.fat.unwrap_or(0.0),
            sugar: entry.sugar.unwrap_or(0.0),
            details: entry.parsed_details().map(|d| d.summary()),
            expanded,
        }
    }
}

/// Last fetched snapshot of the day's entries plus which rows are open.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryLog {
    entries: Vec<Entry>,
    expanded: BTreeSet<i64>,
}

impl EntryLog {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Swap in a new snapshot. Rows that are still present stay open.
    pub fn replace(&mut self, entries: Vec<Entry>) {
        self.expanded
            .retain(|id| entries.iter().any(|e| e.id == *id));
        self.entries = entries;
    }

    pub fn toggle_details(&mut self, id: i64) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }

    pub fn total_calories(&self) -> i64 {
        self.entries.iter().map(|e| e.calories).sum()
    }

    pub fn rows(&self) -> Vec<EntryRow> {
        self.entries
            .iter()
            .map(|e| EntryRow::from_entry(e, self.is_expanded(e.id)))
            .collect()
    }
}

pub async fn load_entries<B: Backend + ?Sized>(backend: &B) -> Result<Vec<Entry>, ClientError> {
    let entries = backend.list_entries().await?;
    log::debug!("Loaded {} entries", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewEntry;
    use crate::testing::FakeBackend;

    fn entry(id: i64, name: &str, calories: i64, details: Option<&str>) -> Entry {
        Entry {
            id,
            name: name.to_string(),
            calories,
            protein: Some(1.0),
            carbs: None,
            fat: Some(2.5),
            sugar: None,
            details: details.map(str::to_string),
        }
    }

    #[test]
    fn test_toggle_details_is_local() {
        let mut log = EntryLog::default();
        log.replace(vec![entry(1, "Apple", 95, None)]);

        assert!(!log.is_expanded(1));
        log.toggle_details(1);
        assert!(log.is_expanded(1));
        log.toggle_details(1);
        assert!(!log.is_expanded(1));
    }

    #[test]
    fn test_replace_keeps_open_rows_that_survive() {
        let mut log = EntryLog::default();
        log.replace(vec![entry(1, "Apple", 95, None), entry(2, "Pear", 100, None)]);
        log.toggle_details(1);
        log.toggle_details(2);

        log.replace(vec![entry(3, "Soup", 200, None), entry(1, "Apple", 95, None)]);

        assert!(log.is_expanded(1));
        assert!(!log.is_expanded(2));
        assert!(!log.is_expanded(3));
    }

    #[test]
    fn test_rows_render_details_and_missing_macros() {
        let mut log = EntryLog::default();
        log.replace(vec![
            entry(1, "Eggs", 140, Some(r#"[{"name":"egg","calories":70}]"#)),
            entry(2, "Mystery", 300, Some("[invalid")),
            entry(3, "Water", 0, Some("")),
        ]);
        let rows = log.rows();

        assert_eq!(rows[0].details.as_deref(), Some("egg (70 kcal)"));
        assert_eq!(rows[0].carbs, 0.0);
        assert_eq!(rows[0].fat, 2.5);
        assert_eq!(rows[1].details.as_deref(), Some("[invalid"));
        assert_eq!(rows[2].details, None);
        assert_eq!(log.total_calories(), 440);
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let backend = FakeBackend::default();
        backend.seed_entry(NewEntry {
            name: "Toast".to_string(),
            calories: 90,
            protein: 3.0,
            carbs: 15.0,
            fat: 1.0,
            sugar: 1.0,
            details: None,
        });
        let mut log = EntryLog::default();
        log.replace(vec![entry(9, "Stale", 1, None)]);

        log.replace(load_entries(&backend).await.unwrap());

        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.entries()[0].name, "Toast");
    }

    #[tokio::test]
    async fn test_refresh_failure_propagates() {
        let backend = FakeBackend::default();
        backend.fail_list(true);

        let result = load_entries(&backend).await;
        assert!(matches!(result, Err(ClientError::Status { status: 500, .. })));
    }
}
