use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use mealroast_core::{MealAnalysis, MealType};

/// One recorded meal analysis, tagged with the day and meal type it was made
/// under.
///
/// The date is fixed to "today" in the local time zone at creation and never
/// edited afterwards. Multiple entries may share a date and meal type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub analysis: MealAnalysis,
}

impl JournalEntry {
    /// Create an entry stamped with today's local date
    pub fn today(meal_type: MealType, analysis: MealAnalysis) -> Self {
        Self {
            date: Local::now().date_naive(),
            meal_type,
            analysis,
        }
    }

    /// Create an entry for an explicit date
    pub fn on_date(date: NaiveDate, meal_type: MealType, analysis: MealAnalysis) -> Self {
        Self {
            date,
            meal_type,
            analysis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_stamps_local_date() {
        let entry = JournalEntry::today(MealType::Breakfast, MealAnalysis::default());
        assert_eq!(entry.date, Local::now().date_naive());
        assert_eq!(entry.meal_type, MealType::Breakfast);
    }

    #[test]
    fn test_entry_serializes_date_as_canonical_string() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let entry = JournalEntry::on_date(date, MealType::Snack, MealAnalysis::default());

        let value = serde_json::to_value(&entry).unwrap();
        // Zero-padded YYYY-MM-DD, matching the calendar's canonical format
        assert_eq!(value["date"], "2024-05-03");
        assert_eq!(value["meal_type"], "snack");
    }

    #[test]
    fn test_entry_round_trips() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let entry = JournalEntry::on_date(date, MealType::LateNightSnack, MealAnalysis::default());

        let json = serde_json::to_string(&entry).unwrap();
        let back: JournalEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
