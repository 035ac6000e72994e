use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TimetableError;

// Fixed week shape
pub const DAYS_PER_WEEK: usize = 5;
pub const PERIODS_PER_DAY: usize = 6;
pub const TOTAL_SLOTS: usize = DAYS_PER_WEEK * PERIODS_PER_DAY;

/// A teaching day. Ordering follows the school week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub const ALL: [Day; DAYS_PER_WEEK] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        };
        f.write_str(name)
    }
}

/// Kind of session an entry represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    #[default]
    Academic,
    Wellness,
    Elective,
}

impl EntryType {
    pub fn is_academic(self) -> bool {
        matches!(self, EntryType::Academic)
    }
}

/// One recurring course offering declared by the user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "NewEntry")]
pub struct CourseEntry {
    pub id: String,
    pub subject: String,
    pub handler: String,
    pub room: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

impl CourseEntry {
    /// Builds an entry from raw form input. Fields are trimmed and must be non-blank.
    pub fn new(
        subject: &str,
        handler: &str,
        room: &str,
        entry_type: EntryType,
    ) -> Result<Self, TimetableError> {
        let subject = required_field("subject", subject)?;
        let handler = required_field("handler", handler)?;
        let room = required_field("room", room)?;
        let id = identity_key(&subject, &handler, &room);

        Ok(CourseEntry {
            id,
            subject,
            handler,
            room,
            entry_type,
        })
    }
}

fn required_field(name: &str, value: &str) -> Result<String, TimetableError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TimetableError::Validation(format!("{name} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// `subject_handler_room` with every whitespace run collapsed to `_`.
pub fn identity_key(subject: &str, handler: &str, room: &str) -> String {
    [subject, handler, room]
        .iter()
        .map(|part| part.split_whitespace().join("_"))
        .join("_")
}

/// Form payload for a new entry. Any `id` sent by a client is recomputed.
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntry {
    pub subject: String,
    pub handler: String,
    pub room: String,
    #[serde(rename = "type", default)]
    pub entry_type: EntryType,
}

impl TryFrom<NewEntry> for CourseEntry {
    type Error = TimetableError;

    fn try_from(input: NewEntry) -> Result<Self, Self::Error> {
        CourseEntry::new(&input.subject, &input.handler, &input.room, input.entry_type)
    }
}

/// One row of an uploaded timetable: a day label followed by its slot values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimetableRow {
    pub day: String,
    pub slots: Vec<String>,
}

impl TimetableRow {
    /// Takes one parsed record in header order; the first field is the day label.
    /// Returns `None` for a record without a usable day label.
    pub fn from_record<I, S>(fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = fields.into_iter().map(Into::into);
        let day = fields.next()?.trim().to_string();
        if day.is_empty() {
            return None;
        }
        Some(TimetableRow {
            day,
            slots: fields.map(|s| s.trim().to_string()).collect(),
        })
    }

    /// The row as a record again: day label first, then the slot values.
    pub fn into_record(self) -> impl Iterator<Item = String> {
        std::iter::once(self.day).chain(self.slots)
    }
}

/// Re-runs already structured rows through record intake, so JSON rows are
/// trimmed and filtered exactly like parsed records.
pub fn normalize_rows(rows: Vec<TimetableRow>) -> Result<Vec<TimetableRow>, TimetableError> {
    rows_from_records(rows.into_iter().map(TimetableRow::into_record))
}

/// Converts parsed records into rows, failing when none of them is usable.
pub fn rows_from_records<R, I, S>(records: R) -> Result<Vec<TimetableRow>, TimetableError>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let rows: Vec<TimetableRow> = records
        .into_iter()
        .filter_map(TimetableRow::from_record)
        .collect();
    if rows.is_empty() {
        return Err(TimetableError::EmptyInput);
    }
    Ok(rows)
}

/// Ordered list of rule breaches found in a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ViolationReport(pub Vec<String>);

impl ViolationReport {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub(crate) fn push(&mut self, message: String) {
        self.0.push(message);
    }
}

/// Qualitative bucket for a compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ComplianceBand {
    Excellent,
    Moderate,
    NeedsRestructuring,
}

impl ComplianceBand {
    pub fn from_score(score: f64) -> Self {
        if score > 85.0 {
            ComplianceBand::Excellent
        } else if score > 65.0 {
            ComplianceBand::Moderate
        } else {
            ComplianceBand::NeedsRestructuring
        }
    }
}

impl fmt::Display for ComplianceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComplianceBand::Excellent => "Excellent compliance",
            ComplianceBand::Moderate => "Moderate compliance",
            ComplianceBand::NeedsRestructuring => "Needs restructuring",
        };
        f.write_str(label)
    }
}

/// Secondary outputs of the placeholder model, as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelIndicators {
    pub academic_balance: f64,
    pub stress_risk: f64,
}

/// Result of scoring an uploaded timetable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceAssessment {
    pub score: f64,
    pub band: ComplianceBand,
    pub issues: Vec<String>,
    pub indicators: ModelIndicators,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_key_normalizes_whitespace() {
        assert_eq!(
            identity_key("Computer  Science", "Dr Rao", "Lab 2"),
            "Computer_Science_Dr_Rao_Lab_2"
        );
    }

    #[test]
    fn test_entry_rejects_blank_fields() {
        let err = CourseEntry::new("Math", "   ", "A1", EntryType::Academic).unwrap_err();
        assert!(matches!(err, TimetableError::Validation(_)));
        assert!(CourseEntry::new("", "Rao", "A1", EntryType::Academic).is_err());
        assert!(CourseEntry::new("Math", "Rao", "\t", EntryType::Academic).is_err());
    }

    #[test]
    fn test_entry_trims_fields() {
        let entry = CourseEntry::new(" Math ", "Rao", " A1", EntryType::Wellness).unwrap();
        assert_eq!(entry.subject, "Math");
        assert_eq!(entry.room, "A1");
        assert_eq!(entry.id, "Math_Rao_A1");
    }

    #[test]
    fn test_entry_deserialize_recomputes_id_and_defaults_type() {
        let entry: CourseEntry = serde_json::from_str(
            r#"{"id":"bogus","subject":"Art","handler":"Meena","room":"Studio"}"#,
        )
        .unwrap();
        assert_eq!(entry.id, "Art_Meena_Studio");
        assert_eq!(entry.entry_type, EntryType::Academic);

        let bad = serde_json::from_str::<CourseEntry>(
            r#"{"subject":"Art","handler":"","room":"Studio","type":"elective"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_row_from_record_preserves_field_order() {
        let row = TimetableRow::from_record(["Monday", "Math", "PE", "Free"]).unwrap();
        assert_eq!(row.day, "Monday");
        assert_eq!(row.slots, vec!["Math", "PE", "Free"]);
        assert!(TimetableRow::from_record(["  ", "Math"]).is_none());
        assert!(TimetableRow::from_record(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_rows_from_records_without_usable_rows() {
        let records: Vec<Vec<&str>> = vec![vec![""], vec![]];
        assert!(matches!(
            rows_from_records(records),
            Err(TimetableError::EmptyInput)
        ));
    }

    #[test]
    fn test_normalize_rows_matches_record_intake() {
        let rows = vec![
            TimetableRow {
                day: " Monday".to_string(),
                slots: vec!["Math".to_string(), " PE".to_string(), "Free ".to_string()],
            },
            TimetableRow {
                day: "   ".to_string(),
                slots: vec!["Math".to_string()],
            },
        ];
        let expected = rows_from_records([vec![" Monday", "Math", " PE", "Free "]]).unwrap();

        let normalized = normalize_rows(rows).unwrap();
        assert_eq!(normalized, expected);
        assert_eq!(normalized[0].slots, vec!["Math", "PE", "Free"]);
    }

    #[test]
    fn test_normalize_rows_with_only_blank_days() {
        let rows = vec![TimetableRow {
            day: String::new(),
            slots: vec!["PE".to_string()],
        }];
        assert_eq!(normalize_rows(rows), Err(TimetableError::EmptyInput));
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(ComplianceBand::from_score(85.01), ComplianceBand::Excellent);
        assert_eq!(ComplianceBand::from_score(85.0), ComplianceBand::Moderate);
        assert_eq!(ComplianceBand::from_score(65.01), ComplianceBand::Moderate);
        assert_eq!(ComplianceBand::from_score(65.0), ComplianceBand::NeedsRestructuring);
        assert_eq!(ComplianceBand::NeedsRestructuring.to_string(), "Needs restructuring");
    }
}
