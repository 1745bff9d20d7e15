//! CREATE TABLE emission.

use nf_engine::{Decomposition, Outcome};
use nf_model::{AttributeSet, Relation};

use crate::types::infer_column_type;

/// One `CREATE TABLE` statement with inferred column types.
///
/// The `PRIMARY KEY` clause lists the relation's key and is left out when
/// the relation has none.
pub fn render_create_table(relation: &Relation) -> String {
    render_table(relation, relation.key())
}

fn render_table(relation: &Relation, key: &AttributeSet) -> String {
    let mut lines: Vec<String> = relation
        .attributes()
        .iter()
        .map(|attribute| {
            let values = relation.column(attribute).unwrap_or_default();
            format!("    {attribute} {}", infer_column_type(values))
        })
        .collect();
    if !key.is_empty() {
        lines.push(format!("    PRIMARY KEY ({key})"));
    }
    format!(
        "CREATE TABLE {} (\n{}\n);\n",
        relation.name(),
        lines.join(",\n")
    )
}

/// Script for a whole decomposition: a header, the notes, then one
/// statement per output relation.
pub fn render_decomposition(decomposition: &Decomposition) -> String {
    let mut script = String::new();
    script.push_str(&format!(
        "-- {} decomposed to {}: {} relation(s)\n",
        decomposition.source,
        decomposition.target,
        decomposition.relations.len()
    ));
    script.push_str(&format!(
        "-- dependency preserving: {}, lossless: {}\n",
        yes_no(decomposition.dependency_preserving),
        yes_no(decomposition.lossless)
    ));
    for note in &decomposition.notes {
        script.push_str(&format!("-- note: {note}\n"));
    }
    for output in &decomposition.relations {
        script.push('\n');
        script.push_str(&render_create_table(&output.relation));
    }
    script
}

/// Script for any outcome.
///
/// An already-normalized relation is emitted as is, keyed by the outcome's
/// primary key.
pub fn render_outcome(outcome: &Outcome, source: &Relation) -> String {
    match outcome {
        Outcome::Decomposed(decomposition) => render_decomposition(decomposition),
        Outcome::AlreadySatisfied { check, primary_key } => format!(
            "-- {} already satisfies {}\n\n{}",
            source.name(),
            check.form,
            render_table(source, primary_key)
        ),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
