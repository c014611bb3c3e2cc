// src/domain/conditions.rs

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Internal five-level condition grade, ordered roughly by desirability.
///
/// Variant names double as the canonical labels, so serde and the CSV
/// importer match against them exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionGrade {
    New,
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ConditionGrade {
    pub const ALL: [ConditionGrade; 5] = [
        ConditionGrade::New,
        ConditionGrade::Excellent,
        ConditionGrade::Good,
        ConditionGrade::Fair,
        ConditionGrade::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionGrade::New => "New",
            ConditionGrade::Excellent => "Excellent",
            ConditionGrade::Good => "Good",
            ConditionGrade::Fair => "Fair",
            ConditionGrade::Poor => "Poor",
        }
    }

    /// Exact-match parse; no trimming or case folding here.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|g| g.as_str() == s)
    }

    /// The valid labels joined for error messages:
    /// "New, Excellent, Good, Fair, Poor".
    pub fn valid_labels() -> String {
        Self::ALL
            .iter()
            .map(|g| g.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ConditionGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Stored as TEXT in the phones table.
impl ToSql for ConditionGrade {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ConditionGrade {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        ConditionGrade::parse(s).ok_or_else(|| {
            FromSqlError::Other(format!("unknown condition grade '{s}'").into())
        })
    }
}

/// Table-driven mapping from internal grades to each platform's own
/// condition vocabulary. `None` means the grade cannot be listed on that
/// platform. A lookup table rather than a formula: the mapping is a
/// business decision and has to stay auditable and editable as data.
#[derive(Debug, Clone)]
pub struct ConditionMap {
    entries: HashMap<ConditionGrade, HashMap<String, Option<String>>>,
}

impl ConditionMap {
    pub fn new(entries: HashMap<ConditionGrade, HashMap<String, Option<String>>>) -> Self {
        Self { entries }
    }

    /// The production mapping table. Every grade has an entry (possibly
    /// unsupported) for every standard platform.
    pub fn standard() -> Self {
        let rows: [(ConditionGrade, [(&str, Option<&str>); 3]); 5] = [
            (
                ConditionGrade::New,
                [("X", Some("New")), ("Y", Some("3 stars (Excellent)")), ("Z", Some("New"))],
            ),
            (
                ConditionGrade::Excellent,
                [("X", Some("Good")), ("Y", Some("3 stars (Excellent)")), ("Z", Some("As New"))],
            ),
            (
                ConditionGrade::Good,
                [("X", Some("Good")), ("Y", Some("2 stars (Good)")), ("Z", Some("Good"))],
            ),
            (
                ConditionGrade::Fair,
                [("X", Some("Good")), ("Y", Some("1 star (Usable)")), ("Z", Some("Good"))],
            ),
            (
                // Too rough for Platform Z.
                ConditionGrade::Poor,
                [("X", Some("Scrap")), ("Y", Some("1 star (Usable)")), ("Z", None)],
            ),
        ];

        let mut entries = HashMap::new();
        for (grade, cols) in rows {
            let mut by_platform = HashMap::new();
            for (code, label) in cols {
                by_platform.insert(code.to_string(), label.map(str::to_string));
            }
            entries.insert(grade, by_platform);
        }
        Self::new(entries)
    }

    /// Platform-specific label for a grade, or `None` when the grade has
    /// no mapping there. Unknown platform codes also yield `None`, so
    /// callers treat "can't list" uniformly.
    pub fn map(&self, grade: ConditionGrade, platform_code: &str) -> Option<&str> {
        self.entries
            .get(&grade)
            .and_then(|m| m.get(platform_code))
            .and_then(|label| label.as_deref())
    }

    /// Whether the table carries an entry (supported or not) for the pair.
    pub fn has_entry(&self, grade: ConditionGrade, platform_code: &str) -> bool {
        self.entries
            .get(&grade)
            .map(|m| m.contains_key(platform_code))
            .unwrap_or(false)
    }
}
