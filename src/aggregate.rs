use crate::dataset::Row;
use crate::error::AggregateError;
use crate::model::numeric_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

/// Count occurrences of each distinct value of `key`, in first-occurrence
/// order so rendering stays deterministic.
pub fn group_counts(rows: &[Row], key: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for row in rows {
        let value = row.value(key);
        match counts.iter_mut().find(|(category, _)| category == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}

/// Arithmetic mean of the coerced numeric field. Uncoercible values propagate
/// NaN; an empty record set is a typed error rather than a silent NaN.
pub fn average(rows: &[Row], field: &str) -> Result<f64, AggregateError> {
    if rows.is_empty() {
        return Err(AggregateError::EmptyInput);
    }
    let sum: f64 = rows.iter().map(|row| numeric_value(row, field)).sum();
    Ok(sum / rows.len() as f64)
}

/// The record holding the minimum or maximum coerced value of `field`. The
/// fold replaces only on strict exceed, so ties keep the first-encountered
/// record; a NaN value never displaces a resolved number.
pub fn extremum<'a>(
    rows: &'a [Row],
    field: &str,
    which: Extremum,
) -> Result<&'a Row, AggregateError> {
    let mut iter = rows.iter();
    let mut best = iter.next().ok_or(AggregateError::EmptyInput)?;
    let mut best_value = numeric_value(best, field);

    for row in iter {
        let value = numeric_value(row, field);
        if value.is_nan() {
            continue;
        }
        let exceeds = match which {
            Extremum::Max => value > best_value,
            Extremum::Min => value < best_value,
        };
        if exceeds || best_value.is_nan() {
            best = row;
            best_value = value;
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::parse;

    fn scores() -> Vec<Row> {
        parse("name,score\nAda,90\nBo,75\nCy,90\n").unwrap().rows
    }

    #[test]
    fn group_counts_in_first_occurrence_order() {
        let counts = group_counts(&scores(), "score");
        assert_eq!(counts, vec![("90".to_string(), 2), ("75".to_string(), 1)]);
    }

    #[test]
    fn group_counts_sum_to_record_count() {
        let rows = parse("cluster_name\nHigh Performer\nNeeds Improvement\nHigh Performer\nModerate Performer\n")
            .unwrap()
            .rows;
        let counts = group_counts(&rows, "cluster_name");
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, rows.len());
        assert_eq!(counts[0].0, "High Performer");
    }

    #[test]
    fn group_counts_on_empty_input_is_empty() {
        assert!(group_counts(&[], "cluster_name").is_empty());
    }

    #[test]
    fn average_of_scores() {
        let avg = average(&scores(), "score").unwrap();
        assert!((avg - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn average_of_empty_input_is_an_error() {
        assert!(matches!(
            average(&[], "score"),
            Err(AggregateError::EmptyInput)
        ));
    }

    #[test]
    fn average_counts_empty_fields_as_zero() {
        let rows = parse("name,score\nAda,90\nDee,\n").unwrap().rows;
        assert_eq!(average(&rows, "score").unwrap(), 45.0);
    }

    #[test]
    fn average_propagates_nan_from_bad_values() {
        let rows = parse("name,score\nAda,90\nBo,n/a\n").unwrap().rows;
        assert!(average(&rows, "score").unwrap().is_nan());
    }

    #[test]
    fn extremum_finds_min_and_max() {
        let rows = scores();
        assert_eq!(
            extremum(&rows, "score", Extremum::Max).unwrap().value("name"),
            "Ada"
        );
        assert_eq!(
            extremum(&rows, "score", Extremum::Min).unwrap().value("name"),
            "Bo"
        );
    }

    #[test]
    fn extremum_ties_keep_first_encountered() {
        // Ada and Cy both hold 90; Ada is first in iteration order.
        let rows = scores();
        let best = extremum(&rows, "score", Extremum::Max).unwrap();
        assert_eq!(best.value("name"), "Ada");
    }

    #[test]
    fn extremum_of_empty_input_is_an_error() {
        assert!(matches!(
            extremum(&[], "score", Extremum::Max),
            Err(AggregateError::EmptyInput)
        ));
    }

    #[test]
    fn extremum_prefers_resolved_numbers_over_nan() {
        let rows = parse("name,score\nAda,n/a\nBo,75\nCy,60\n").unwrap().rows;
        assert_eq!(
            extremum(&rows, "score", Extremum::Max).unwrap().value("name"),
            "Bo"
        );
        assert_eq!(
            extremum(&rows, "score", Extremum::Min).unwrap().value("name"),
            "Cy"
        );
    }
}
