//! Naming of decomposed relations.

use nf_model::AttributeSet;

/// Chooses a name for a decomposed relation from its source name and key.
pub trait TableNamer {
    fn name(&self, source: &str, key: &AttributeSet) -> String;
}

impl<F> TableNamer for F
where
    F: Fn(&str, &AttributeSet) -> String,
{
    fn name(&self, source: &str, key: &AttributeSet) -> String {
        self(source, key)
    }
}

/// `<source>_<sorted key attributes>`, lower-cased, with every character
/// outside `[a-z0-9]` replaced by `_`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDerivedNamer;

impl TableNamer for KeyDerivedNamer {
    fn name(&self, source: &str, key: &AttributeSet) -> String {
        let mut parts = vec![source.to_string()];
        parts.extend(key.sorted().iter().map(str::to_string));
        sanitize(&parts.join("_"))
    }
}

fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Appends `_2`, `_3`, ... to `name` until it is not in `taken`.
pub(crate) fn unique_name(name: String, taken: &[String]) -> String {
    if !taken.contains(&name) {
        return name;
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{name}_{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
