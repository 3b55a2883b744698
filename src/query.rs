use std::cmp::Ordering;

use clap::ValueEnum;

use crate::dataset::Row;
use crate::model::permissive_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldFilter {
    pub field: String,
    pub needle: String,
}

impl FieldFilter {
    /// The dashboard's search box: match against the `name` field.
    pub fn name(needle: impl Into<String>) -> Self {
        Self {
            field: "name".to_string(),
            needle: needle.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SortSpec {
    pub key: String,
    pub direction: Direction,
}

/// Request-scoped query state, passed in explicitly instead of living in
/// ambient UI state.
#[derive(Debug, Clone, Default)]
pub struct QueryConfig {
    pub search: Option<FieldFilter>,
    pub sort: Option<SortSpec>,
}

impl QueryConfig {
    pub fn apply(&self, rows: &[Row]) -> Vec<Row> {
        let view = match &self.search {
            Some(f) => filter(rows, &f.field, &f.needle),
            None => rows.to_vec(),
        };
        match &self.sort {
            Some(spec) => sort(&view, &spec.key, spec.direction),
            None => view,
        }
    }
}

/// Rows whose `field` contains `needle` case-insensitively, in original order.
pub fn filter(rows: &[Row], field: &str, needle: &str) -> Vec<Row> {
    let needle = needle.to_lowercase();
    rows.iter()
        .filter(|row| row.value(field).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Stable sort by a field key; the input is left untouched. Numeric values
/// compare numerically, text lexicographically, and an uncoercible value
/// sorts last regardless of direction.
pub fn sort(rows: &[Row], key: &str, direction: Direction) -> Vec<Row> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| compare_values(a.value(key), b.value(key), direction));
    sorted
}

fn numeric(value: &str) -> Option<f64> {
    Some(permissive_number(value)).filter(|n| !n.is_nan())
}

fn compare_values(a: &str, b: &str, direction: Direction) -> Ordering {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => direction.apply(x.partial_cmp(&y).unwrap_or(Ordering::Equal)),
        (None, None) => direction.apply(a.cmp(b)),
        // Uncoercible values always land after resolved numbers.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
    }
}
