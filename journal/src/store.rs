use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::entry::JournalEntry;
use crate::errors::JournalResult;
use crate::paths::{ensure_journal_dir, get_journal_path};

/// In-memory journal backed by one JSON file.
///
/// The collection is loaded once at startup and rewritten whole after every
/// append. A failed write degrades to session-only durability: the in-memory
/// append stands, nothing is reported to the user, and the next successful
/// write persists everything again.
#[derive(Debug)]
pub struct JournalStore {
    path: PathBuf,
    entries: Vec<JournalEntry>,
}

impl JournalStore {
    /// Load the journal from the given file.
    ///
    /// A missing file and unparsable content are treated identically: the
    /// journal starts empty and no error is surfaced.
    pub fn load(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<JournalEntry>>(&content) {
                Ok(entries) => {
                    debug!("Loaded {} journal entries from {:?}", entries.len(), path);
                    entries
                }
                Err(e) => {
                    debug!("Unparsable journal at {:?}, starting empty: {}", path, e);
                    Vec::new()
                }
            },
            Err(e) => {
                debug!("No journal at {:?}, starting empty: {}", path, e);
                Vec::new()
            }
        };

        Self { path, entries }
    }

    /// Load the journal from its default location
    pub fn open_default() -> JournalResult<Self> {
        let path = get_journal_path()?;
        Ok(Self::load(path))
    }

    /// Append an entry and rewrite the whole journal file.
    ///
    /// The in-memory append always succeeds; a persistence failure is logged
    /// and otherwise swallowed.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
        if let Err(e) = self.persist() {
            warn!(
                "Failed to persist journal to {:?}: {} (entry kept for this session only)",
                self.path, e
            );
        }
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries recorded on exactly the given date, in insertion order
    pub fn query_by_date(&self, date: NaiveDate) -> Vec<&JournalEntry> {
        self.entries.iter().filter(|e| e.date == date).collect()
    }

    /// Whether any entry exists on the given date. Cheap existence check for
    /// calendar-day markers, issued once per visible day.
    pub fn has_any_on_date(&self, date: NaiveDate) -> bool {
        self.entries.iter().any(|e| e.date == date)
    }

    fn persist(&self) -> JournalResult<()> {
        ensure_journal_dir(&self.path)?;
        let content = serde_json::to_string(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mealroast_core::{AnalysisItem, MealAnalysis, MealType};
    use tempfile::tempdir;

    fn sample_analysis(total: f64) -> MealAnalysis {
        MealAnalysis {
            items: vec![AnalysisItem {
                name: "toast".to_string(),
                kcal: total,
            }],
            total_kcal: total,
            ..MealAnalysis::default()
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = JournalStore::load(dir.path().join("journal.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_unparsable_content_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.json");
        fs::write(&path, "not json at all {").unwrap();

        let store = JournalStore::load(path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.json");

        let mut store = JournalStore::load(path.clone());
        store.append(JournalEntry::on_date(
            date(2024, 5, 3),
            MealType::Breakfast,
            sample_analysis(150.0),
        ));
        store.append(JournalEntry::on_date(
            date(2024, 5, 3),
            MealType::Lunch,
            sample_analysis(700.0),
        ));

        // Simulated reload reproduces contents and relative order
        let reloaded = JournalStore::load(path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.entries()[0].meal_type, MealType::Breakfast);
        assert_eq!(reloaded.entries()[1].meal_type, MealType::Lunch);
        assert_eq!(reloaded.entries(), store.entries());
    }

    #[test]
    fn test_load_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.json");

        let mut store = JournalStore::load(path.clone());
        store.append(JournalEntry::on_date(
            date(2024, 5, 17),
            MealType::Dinner,
            sample_analysis(900.0),
        ));

        let first = JournalStore::load(path.clone());
        let second = JournalStore::load(path);
        assert_eq!(first.entries(), second.entries());
    }

    #[test]
    fn test_query_by_date_filters_and_preserves_order() {
        let dir = tempdir().unwrap();
        let mut store = JournalStore::load(dir.path().join("journal.json"));

        store.append(JournalEntry::on_date(
            date(2024, 5, 3),
            MealType::Breakfast,
            sample_analysis(150.0),
        ));
        store.append(JournalEntry::on_date(
            date(2024, 5, 4),
            MealType::Lunch,
            sample_analysis(600.0),
        ));
        store.append(JournalEntry::on_date(
            date(2024, 5, 3),
            MealType::Snack,
            sample_analysis(300.0),
        ));

        let hits = store.query_by_date(date(2024, 5, 3));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].meal_type, MealType::Breakfast);
        assert_eq!(hits[1].meal_type, MealType::Snack);

        assert!(store.query_by_date(date(2024, 5, 5)).is_empty());
    }

    #[test]
    fn test_has_any_on_date() {
        let dir = tempdir().unwrap();
        let mut store = JournalStore::load(dir.path().join("journal.json"));

        store.append(JournalEntry::on_date(
            date(2024, 5, 3),
            MealType::Breakfast,
            sample_analysis(150.0),
        ));

        assert!(store.has_any_on_date(date(2024, 5, 3)));
        assert!(!store.has_any_on_date(date(2024, 5, 4)));
    }

    #[test]
    fn test_duplicate_entries_are_kept() {
        // No dedup: the same date and meal type may repeat
        let dir = tempdir().unwrap();
        let mut store = JournalStore::load(dir.path().join("journal.json"));

        let entry = JournalEntry::on_date(
            date(2024, 5, 3),
            MealType::Breakfast,
            sample_analysis(150.0),
        );
        store.append(entry.clone());
        store.append(entry);

        assert_eq!(store.len(), 2);
        assert_eq!(store.query_by_date(date(2024, 5, 3)).len(), 2);
    }

    #[test]
    fn test_persistence_failure_keeps_in_memory_append() {
        let dir = tempdir().unwrap();
        // The journal path's parent is a regular file, so the write must fail
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let path = blocker.join("journal.json");

        let mut store = JournalStore::load(path.clone());
        store.append(JournalEntry::on_date(
            date(2024, 5, 3),
            MealType::Breakfast,
            sample_analysis(150.0),
        ));

        // Session-only durability: present in memory, gone after reload
        assert_eq!(store.len(), 1);
        assert!(JournalStore::load(path).is_empty());
    }

    #[test]
    fn test_entries_with_missing_analysis_fields_still_load() {
        // Old persisted shapes must render defensively: absent fields default
        let dir = tempdir().unwrap();
        let path = dir.path().join("journal.json");
        fs::write(
            &path,
            r#"[{"date":"2024-05-03","meal_type":"breakfast","analysis":{"total_kcal":150}}]"#,
        )
        .unwrap();

        let store = JournalStore::load(path);
        assert_eq!(store.len(), 1);
        let entry = &store.entries()[0];
        assert_eq!(entry.analysis.total_kcal, 150.0);
        assert!(entry.analysis.items.is_empty());
        assert!(entry.analysis.fact_attack.is_empty());
    }
}
