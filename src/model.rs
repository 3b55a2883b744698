use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::dataset::Row;
use crate::error::CoerceError;

/// Headers the presentation layer reads as numbers.
pub const NUMERIC_FIELDS: &[&str] = &[
    "assessment_score",
    "predicted_score",
    "attention",
    "focus",
    "retention",
    "engagement_time",
    "comprehension",
];

/// Typed view of one student row: the boundary where string fields become
/// numbers. Empty fields read as 0, anything else uncoercible becomes NaN.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub name: String,
    pub assessment_score: f64,
    pub predicted_score: f64,
    pub attention: f64,
    pub focus: f64,
    pub retention: f64,
    pub engagement_time: f64,
    pub comprehension: f64,
    pub cluster_name: String,
    pub extras: HashMap<String, String>,
}

/// Coerce a raw field value to a number.
pub fn coerce_number(raw: &str) -> Result<f64, CoerceError> {
    let trimmed = raw.trim();
    trimmed.parse::<f64>().map_err(|_| CoerceError {
        raw: raw.to_string(),
    })
}

/// Permissive numeric read: empty fields count as 0, any other coercion
/// failure yields NaN.
pub fn permissive_number(raw: &str) -> f64 {
    if raw.trim().is_empty() {
        return 0.0;
    }
    coerce_number(raw).unwrap_or(f64::NAN)
}

pub fn numeric_value(row: &Row, field: &str) -> f64 {
    permissive_number(row.value(field))
}

impl StudentRecord {
    pub fn from_row(row: &Row) -> Self {
        let known: HashSet<&str> = ["student_id", "name", "cluster_name"]
            .iter()
            .chain(NUMERIC_FIELDS)
            .copied()
            .collect();
        let extras = row
            .fields()
            .iter()
            .filter(|(name, _)| !known.contains(name.as_str()))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Self {
            student_id: row.value("student_id").to_string(),
            name: row.value("name").to_string(),
            assessment_score: numeric_value(row, "assessment_score"),
            // absent or empty predicted_score ends up 0, per the consumer contract
            predicted_score: numeric_value(row, "predicted_score"),
            attention: numeric_value(row, "attention"),
            focus: numeric_value(row, "focus"),
            retention: numeric_value(row, "retention"),
            engagement_time: numeric_value(row, "engagement_time"),
            comprehension: numeric_value(row, "comprehension"),
            cluster_name: row.value("cluster_name").to_string(),
            extras,
        }
    }
}

/// Typed view of a row sequence. Duplicate student ids are a data-quality
/// warning, not a reason to drop rows or fail the retrieval.
pub fn students_from_rows(rows: &[Row]) -> Vec<StudentRecord> {
    let mut seen = HashSet::new();
    let mut students = Vec::with_capacity(rows.len());

    for row in rows {
        let student = StudentRecord::from_row(row);
        if !student.student_id.is_empty() && !seen.insert(student.student_id.clone()) {
            warn!(student_id = %student.student_id, "duplicate student_id in source data");
        }
        students.push(student);
    }

    students
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse;

    const HEADER: &str = "student_id,name,assessment_score,predicted_score,attention,focus,retention,engagement_time,comprehension,cluster_name";

    #[test]
    fn coerces_valid_numbers() {
        assert_eq!(coerce_number("90").unwrap(), 90.0);
        assert_eq!(coerce_number(" 7.25 ").unwrap(), 7.25);
        assert_eq!(coerce_number("-3").unwrap(), -3.0);
    }

    #[test]
    fn coercion_failure_is_typed() {
        let err = coerce_number("ninety").unwrap_err();
        assert_eq!(err.raw, "ninety");
        assert!(coerce_number("").is_err());
    }

    #[test]
    fn builds_typed_record_from_row() {
        let text = format!("{HEADER}\ns1,Ada,90,85.5,70,80,60,45,75,High Performer\n");
        let table = parse(&text).unwrap();
        let students = students_from_rows(&table.rows);

        assert_eq!(students.len(), 1);
        let ada = &students[0];
        assert_eq!(ada.name, "Ada");
        assert_eq!(ada.assessment_score, 90.0);
        assert_eq!(ada.predicted_score, 85.5);
        assert_eq!(ada.cluster_name, "High Performer");
        assert!(ada.extras.is_empty());
    }

    #[test]
    fn missing_predicted_score_defaults_to_zero() {
        let table = parse("student_id,name,predicted_score\ns1,Ada,\ns2,Bo\n").unwrap();
        let students = students_from_rows(&table.rows);
        assert_eq!(students[0].predicted_score, 0.0);
        assert_eq!(students[1].predicted_score, 0.0);
    }

    #[test]
    fn uncoercible_numeric_field_becomes_nan() {
        let table = parse("student_id,name,assessment_score\ns1,Ada,n/a\n").unwrap();
        let students = students_from_rows(&table.rows);
        assert!(students[0].assessment_score.is_nan());
    }

    #[test]
    fn empty_numeric_field_reads_as_zero() {
        // a short row keeps its record, and the blank field counts as 0
        let table = parse("student_id,name,assessment_score\ns1,Dee,\n").unwrap();
        let students = students_from_rows(&table.rows);
        assert_eq!(students[0].assessment_score, 0.0);
        assert_eq!(permissive_number("  "), 0.0);
    }

    #[test]
    fn unknown_headers_land_in_extras() {
        let table = parse("student_id,name,homeroom\ns1,Ada,B12\n").unwrap();
        let students = students_from_rows(&table.rows);
        assert_eq!(students[0].extras.get("homeroom").map(String::as_str), Some("B12"));
    }

    #[test]
    fn duplicate_ids_still_yield_every_row() {
        let table = parse("student_id,name\ns1,Ada\ns1,Bo\n").unwrap();
        let students = students_from_rows(&table.rows);
        assert_eq!(students.len(), 2);
    }
}
