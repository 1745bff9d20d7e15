use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nf_engine::{FormCheck, FormStatus, Outcome, Violation};

use crate::commands::{CheckReport, ClosureReport, DecomposeResult, KeysReport};

/// Prints the decomposition summary.
///
/// When the rendered script goes to stdout the summary goes to stderr so the
/// script stays pipeable.
pub fn print_decompose_summary(result: &DecomposeResult) {
    let to_stderr = result.output.is_none();
    let emit = |line: String| {
        if to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    };

    let decomposition = match &result.outcome {
        Outcome::AlreadySatisfied { check, .. } => {
            emit(format!(
                "{} already satisfies {}; nothing to decompose",
                result.source.name(),
                check.form
            ));
            if let Some(path) = &result.output {
                emit(format!("Output: {}", path.display()));
            }
            return;
        }
        Outcome::Decomposed(decomposition) => decomposition,
    };

    emit(format!(
        "{} -> {} ({} relations)",
        decomposition.source,
        decomposition.target,
        decomposition.relations.len()
    ));
    if let Some(path) = &result.output {
        emit(format!("Output: {}", path.display()));
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Relation"),
        header_cell("Attributes"),
        header_cell("Primary key"),
        header_cell("Rows"),
        header_cell("FDs"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for output in &decomposition.relations {
        let relation = &output.relation;
        table.add_row(vec![
            Cell::new(relation.name()).add_attribute(Attribute::Bold),
            Cell::new(relation.attributes().to_string()),
            key_cell(&relation.key().to_string()),
            Cell::new(relation.rows().len()),
            Cell::new(output.fds.len()),
        ]);
    }
    emit(table.to_string());

    emit(format!(
        "Dependency preserving: {}",
        yes_no(decomposition.dependency_preserving)
    ));
    emit(format!("Lossless join: {}", yes_no(decomposition.lossless)));
    for lost in &decomposition.lost_dependencies {
        emit(format!("  lost: {lost}"));
    }
    for note in &decomposition.notes {
        emit(format!("Note: {note}"));
    }
}

pub fn print_check_report(report: &CheckReport) {
    println!("Relation: {}", report.relation);
    println!(
        "Candidate keys: {}",
        format_keys(&report.keys.candidate_keys)
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Form"),
        header_cell("Status"),
        header_cell("Violations"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for check in &report.checks {
        table.add_row(vec![
            Cell::new(check.form).add_attribute(Attribute::Bold),
            status_cell(check),
            Cell::new(violation_lines(check)),
        ]);
    }
    println!("{table}");

    match report.highest {
        Some(form) => println!("Highest normal form: {form}"),
        None => println!("Highest normal form: none (not in 1NF)"),
    }
}

pub fn print_keys_report(report: &KeysReport) {
    println!("Relation: {} ({})", report.relation, report.attributes);
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Candidate key")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, key) in report.analysis.candidate_keys.iter().enumerate() {
        table.add_row(vec![Cell::new(index + 1), key_cell(&key.to_string())]);
    }
    println!("{table}");
    println!("Prime attributes: {}", report.analysis.prime);
    println!(
        "Non-prime attributes: {}",
        report.analysis.non_prime(&report.attributes)
    );
}

pub fn print_closure_report(report: &ClosureReport) {
    println!("({})+ = ({})", report.seed, report.closure);
    let kind = if report.is_candidate_key {
        "candidate key"
    } else if report.is_superkey {
        "superkey"
    } else {
        "not a superkey"
    };
    println!("In {}: {kind}", report.relation);
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn key_cell(key: &str) -> Cell {
    if key.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(key).fg(Color::Green)
    }
}

fn status_cell(check: &FormCheck) -> Cell {
    match check.status {
        FormStatus::Satisfied => Cell::new("satisfied").fg(Color::Green),
        FormStatus::Violated => Cell::new("violated").fg(Color::Red),
        FormStatus::PrerequisiteViolated(form) => {
            Cell::new(format!("needs {form}")).fg(Color::Yellow)
        }
        FormStatus::NotVerifiable => dim_cell("not verifiable"),
    }
}

fn violation_lines(check: &FormCheck) -> String {
    check
        .violations
        .iter()
        .map(Violation::describe)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_keys(keys: &[nf_model::AttributeSet]) -> String {
    keys.iter()
        .map(|key| format!("({key})"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string())
        .fg(Color::DarkGrey)
        .add_attribute(Attribute::Dim)
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
