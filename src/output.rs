//! Human-readable and JSON rendering of reports and object lists.

use crate::graph::DependencyReport;
use schemars::JsonSchema;
use serde::Serialize;

/// Column alignment in a grid table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Render a grid table with a rule between every row
pub fn render_grid(headers: &[&str], align: &[Align], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, val) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(val.chars().count());
        }
    }

    let rule = |left: char, mid: char, right: char| {
        let mut line = String::new();
        line.push(left);
        for (i, width) in widths.iter().enumerate() {
            line.push_str(&"─".repeat(*width + 2));
            line.push(if i < widths.len() - 1 { mid } else { right });
        }
        line.push('\n');
        line
    };

    let cells = |values: &[String]| {
        let mut line = String::from("│");
        for (i, width) in widths.iter().enumerate() {
            let val = values.get(i).map(String::as_str).unwrap_or("");
            match align.get(i).copied().unwrap_or_default() {
                Align::Left => line.push_str(&format!(" {:<width$} │", val, width = width)),
                Align::Right => line.push_str(&format!(" {:>width$} │", val, width = width)),
            }
        }
        line.push('\n');
        line
    };

    let header_values: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    let mut output = rule('┌', '┬', '┐');
    output.push_str(&cells(&header_values));
    output.push_str(&rule('╞', '╪', '╡').replace('─', "═"));
    for (i, row) in rows.iter().enumerate() {
        output.push_str(&cells(row));
        if i < rows.len() - 1 {
            output.push_str(&rule('├', '┼', '┤'));
        }
    }
    output.push_str(&rule('└', '┴', '┘'));
    output
}

/// Message printed when an object has nothing to report
pub fn not_found_message(object: &str) -> String {
    format!(
        "{} object does not exist or has no dependencies in the catalog",
        object
    )
}

/// Text rendering of a flat dependency report
pub fn format_report(report: &DependencyReport) -> String {
    if report.is_empty() {
        return format!("{}\n", not_found_message(&report.object));
    }

    let rows: Vec<Vec<String>> = report
        .groups
        .iter()
        .map(|g| vec![g.object_type.clone(), g.count.to_string(), g.names.join(", ")])
        .collect();

    let mut output = format!("Parent object : {}\nDependencies\n", report.object);
    output.push_str(&render_grid(
        &["Type", "Count", "Names"],
        &[Align::Left, Align::Right, Align::Left],
        &rows,
    ));
    output
}

/// JSON rendering of a flat dependency report
pub fn format_report_json(report: &DependencyReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

/// JSON document for `--list-objects --json`
#[derive(Debug, Serialize, JsonSchema)]
pub struct ObjectListJson {
    pub schema: String,
    pub count: usize,
    pub objects: Vec<String>,
}

/// Text rendering of the object enumeration
pub fn format_object_list(names: &[String]) -> String {
    if names.is_empty() {
        return "No objects found\n".to_string();
    }
    let mut output = format!("Database objects ({}):\n", names.len());
    for name in names {
        output.push_str("  ");
        output.push_str(name);
        output.push('\n');
    }
    output
}

/// JSON rendering of the object enumeration
pub fn format_object_list_json(schema: &str, names: &[String]) -> String {
    let list = ObjectListJson {
        schema: schema.to_string(),
        count: names.len(),
        objects: names.to_vec(),
    };
    serde_json::to_string_pretty(&list).unwrap_or_else(|_| "{}".to_string())
}
