//! Command implementations.
//!
//! Each command loads its inputs, runs one engine request and returns a
//! result value; printing is left to [`crate::summary`].

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use nf_engine::{
    Checker, FormCheck, KeyAnalysis, NormalizeOptions, Normalizer, Outcome, closure,
    is_candidate_key, is_superkey,
};
use nf_ingest::{parse_key_hint, read_dependencies, read_relation};
use nf_model::{AttributeSet, Dependencies, NormalForm, NormalizeError, Relation};
use nf_output::{render_outcome, to_json, write_output};

use crate::cli::{ClosureArgs, DecomposeArgs, InputArgs, OutputFormatArg};
use crate::config::resolve_options;

/// Everything a command needs, loaded from the shared input flags.
#[derive(Debug)]
pub struct Inputs {
    pub relation: Relation,
    pub dependencies: Dependencies,
    pub hints: Vec<AttributeSet>,
    pub options: NormalizeOptions,
}

pub fn load_inputs(args: &InputArgs) -> Result<Inputs> {
    let options = resolve_options(args)?;
    let relation = read_relation(&args.csv)?;
    let dependencies = read_dependencies(&args.fds, args.mvds.as_deref())?;
    let hints = args
        .keys
        .iter()
        .map(|hint| parse_key_hint(hint))
        .collect::<nf_ingest::Result<Vec<_>>>()?;
    info!(
        relation = %relation.name(),
        attributes = relation.attributes().len(),
        rows = relation.rows().len(),
        fds = dependencies.fds.len(),
        mvds = dependencies.mvds.len(),
        key_hints = hints.len(),
        "loaded inputs"
    );
    Ok(Inputs {
        relation,
        dependencies,
        hints,
        options,
    })
}

#[derive(Debug)]
pub struct DecomposeResult {
    pub source: Relation,
    pub outcome: Outcome,
    /// SQL script or JSON document, depending on `--format`.
    pub rendered: String,
    /// Where `rendered` was written; `None` means it goes to stdout.
    pub output: Option<PathBuf>,
}

pub fn run_decompose(args: &DecomposeArgs) -> Result<DecomposeResult> {
    let target: NormalForm = args.target.parse()?;
    let span = info_span!("decompose", target = %target);
    let _guard = span.enter();

    let inputs = load_inputs(&args.input)?;
    let mut options = inputs.options;
    if args.dedupe {
        options = options.with_deduplication(true);
    }
    let outcome = Normalizer::new(options)
        .normalize(
            &inputs.relation,
            &inputs.dependencies,
            target,
            &inputs.hints,
        )
        .with_context(|| format!("normalize {}", inputs.relation.name()))?;

    let rendered = match args.format {
        OutputFormatArg::Sql => render_outcome(&outcome, &inputs.relation),
        OutputFormatArg::Json => to_json(&outcome)?,
    };
    if let Some(path) = &args.output {
        write_output(path, &rendered)?;
        info!(path = %path.display(), "wrote output");
    }
    Ok(DecomposeResult {
        source: inputs.relation,
        outcome,
        rendered,
        output: args.output.clone(),
    })
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub relation: String,
    pub keys: KeyAnalysis,
    pub checks: Vec<FormCheck>,
    pub highest: Option<NormalForm>,
}

pub fn run_check(args: &InputArgs) -> Result<CheckReport> {
    let inputs = load_inputs(args)?;
    let relation = &inputs.relation;
    let dependencies = &inputs.dependencies;
    dependencies.validate_against(relation)?;
    let separator = inputs.options.multi_value_separator;
    let keys = Normalizer::new(inputs.options)
        .analyze_keys(relation, &dependencies.fds, &inputs.hints)
        .with_context(|| format!("check {}", relation.name()))?;

    let checker = Checker::new(relation, dependencies, &keys, separator);
    let checks = checker.check_all();
    let highest = checker.highest_normal_form();
    Ok(CheckReport {
        relation: relation.name().to_string(),
        keys,
        checks,
        highest,
    })
}

#[derive(Debug, Serialize)]
pub struct KeysReport {
    pub relation: String,
    pub attributes: AttributeSet,
    pub analysis: KeyAnalysis,
}

pub fn run_keys(args: &InputArgs) -> Result<KeysReport> {
    let inputs = load_inputs(args)?;
    inputs.dependencies.validate_against(&inputs.relation)?;
    let analysis = Normalizer::new(inputs.options)
        .analyze_keys(&inputs.relation, &inputs.dependencies.fds, &inputs.hints)
        .with_context(|| format!("analyze keys of {}", inputs.relation.name()))?;
    Ok(KeysReport {
        relation: inputs.relation.name().to_string(),
        attributes: inputs.relation.attributes().clone(),
        analysis,
    })
}

#[derive(Debug, Serialize)]
pub struct ClosureReport {
    pub relation: String,
    pub seed: AttributeSet,
    pub closure: AttributeSet,
    pub is_superkey: bool,
    pub is_candidate_key: bool,
}

pub fn run_closure(args: &ClosureArgs) -> Result<ClosureReport> {
    let inputs = load_inputs(&args.input)?;
    let relation = &inputs.relation;
    inputs.dependencies.validate_against(relation)?;
    let seed = parse_key_hint(&args.of)?;
    if let Some(missing) = seed
        .iter()
        .find(|attribute| !relation.attributes().contains(attribute))
    {
        return Err(NormalizeError::UnknownAttribute {
            attribute: missing.to_string(),
            dependency: format!("closure of ({seed})"),
            relation: relation.name().to_string(),
        }
        .into());
    }

    let fds = &inputs.dependencies.fds;
    let attributes = relation.attributes();
    Ok(ClosureReport {
        relation: relation.name().to_string(),
        closure: closure(&seed, fds).ordered_by(attributes),
        is_superkey: is_superkey(&seed, attributes, fds),
        is_candidate_key: is_candidate_key(&seed, attributes, fds),
        seed,
    })
}
