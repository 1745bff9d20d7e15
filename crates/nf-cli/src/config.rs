//! Option loading: config file first, then command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use nf_engine::NormalizeOptions;

use crate::cli::InputArgs;

/// Layout of the `--config` TOML file.
///
/// ```toml
/// [normalize]
/// multi-value-separator = ";"
/// deduplicate-projections = true
/// max-key-search-attributes = 24
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub normalize: NormalizeOptions,
}

/// Reads options from `path`, or the defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<NormalizeOptions> {
    let Some(path) = path else {
        return Ok(NormalizeOptions::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let config: ConfigFile =
        toml::from_str(&text).with_context(|| format!("parse config: {}", path.display()))?;
    debug!(path = %path.display(), options = ?config.normalize, "loaded config");
    Ok(config.normalize)
}

/// Config file options with command-line flags applied on top.
pub fn resolve_options(args: &InputArgs) -> Result<NormalizeOptions> {
    let mut options = load_options(args.config.as_deref())?;
    if let Some(separator) = args.separator {
        options = options.with_separator(separator);
    }
    if let Some(limit) = args.max_key_attributes {
        options = options.with_key_search_limit(limit);
    }
    Ok(options)
}
