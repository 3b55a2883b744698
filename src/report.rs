use std::fmt::Write;

use crate::aggregate::{self, Extremum};
use crate::dataset::Row;
use crate::model::students_from_rows;

/// Markdown insights over the queried view of the roster.
pub fn build_report(filter_label: Option<&str>, rows: &[Row]) -> String {
    let personas = aggregate::group_counts(rows, "cluster_name");

    let mut output = String::new();
    let scope = filter_label.unwrap_or("full roster");

    let _ = writeln!(output, "# Student Persona Report");
    let _ = writeln!(output, "Generated for {} ({} students)", scope, rows.len());
    let _ = writeln!(output);
    let _ = writeln!(output, "## Learning Persona Mix");

    if personas.is_empty() {
        let _ = writeln!(output, "No students in this view.");
    } else {
        for (persona, count) in &personas {
            let _ = writeln!(output, "- {}: {} students", persona, count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Score Summary");

    match aggregate::average(rows, "assessment_score") {
        Ok(avg) => {
            let _ = writeln!(output, "- Average assessment score: {:.2}", avg);
        }
        Err(_) => {
            let _ = writeln!(output, "- Average assessment score: n/a (no students)");
        }
    }
    match aggregate::average(rows, "predicted_score") {
        Ok(avg) => {
            let _ = writeln!(output, "- Average predicted score: {:.2}", avg);
        }
        Err(_) => {
            let _ = writeln!(output, "- Average predicted score: n/a (no students)");
        }
    }
    if let Ok(top) = aggregate::extremum(rows, "predicted_score", Extremum::Max) {
        let _ = writeln!(
            output,
            "- Top predicted student: {} ({})",
            top.value("name"),
            top.value("predicted_score")
        );
    }
    if let Ok(lowest) = aggregate::extremum(rows, "predicted_score", Extremum::Min) {
        let _ = writeln!(
            output,
            "- Lowest predicted student: {} ({})",
            lowest.value("name"),
            lowest.value("predicted_score")
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Roster");

    if rows.is_empty() {
        let _ = writeln!(output, "No students in this view.");
    } else {
        for student in students_from_rows(rows) {
            let _ = writeln!(
                output,
                "- {}: score {:.1}, predicted {:.2}, persona {}",
                student.name, student.assessment_score, student.predicted_score, student.cluster_name
            );
        }
    }

    output
}
