use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

/// Normal forms, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NormalForm {
    #[serde(rename = "1NF")]
    First,
    #[serde(rename = "2NF")]
    Second,
    #[serde(rename = "3NF")]
    Third,
    #[serde(rename = "BCNF")]
    BoyceCodd,
    #[serde(rename = "4NF")]
    Fourth,
    #[serde(rename = "5NF")]
    Fifth,
}

impl NormalForm {
    pub const ALL: [NormalForm; 6] = [
        NormalForm::First,
        NormalForm::Second,
        NormalForm::Third,
        NormalForm::BoyceCodd,
        NormalForm::Fourth,
        NormalForm::Fifth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NormalForm::First => "1NF",
            NormalForm::Second => "2NF",
            NormalForm::Third => "3NF",
            NormalForm::BoyceCodd => "BCNF",
            NormalForm::Fourth => "4NF",
            NormalForm::Fifth => "5NF",
        }
    }

    /// The form that must hold before this one is meaningful.
    pub fn prerequisite(&self) -> Option<NormalForm> {
        match self {
            NormalForm::First => None,
            NormalForm::Second => Some(NormalForm::First),
            NormalForm::Third => Some(NormalForm::Second),
            NormalForm::BoyceCodd => Some(NormalForm::Third),
            NormalForm::Fourth => Some(NormalForm::BoyceCodd),
            NormalForm::Fifth => Some(NormalForm::Fourth),
        }
    }
}

impl fmt::Display for NormalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NormalForm {
    type Err = NormalizeError;

    /// Accepts the tags `1NF`..`5NF` and `BCNF` (case-insensitive), plus
    /// spelled-out names such as `third` or `boyce-codd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', '_', ' '], "");
        match normalized.as_str() {
            "1NF" | "1" | "FIRST" => Ok(NormalForm::First),
            "2NF" | "2" | "SECOND" => Ok(NormalForm::Second),
            "3NF" | "3" | "THIRD" => Ok(NormalForm::Third),
            "BCNF" | "BOYCECODD" | "3.5NF" => Ok(NormalForm::BoyceCodd),
            "4NF" | "4" | "FOURTH" => Ok(NormalForm::Fourth),
            "5NF" | "5" | "FIFTH" | "PJNF" => Ok(NormalForm::Fifth),
            _ => Err(NormalizeError::UnsupportedNormalForm {
                form: s.trim().to_string(),
                reason: "expected one of 1NF, 2NF, 3NF, BCNF, 4NF, 5NF".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!("3nf".parse::<NormalForm>().unwrap(), NormalForm::Third);
        assert_eq!("bcnf".parse::<NormalForm>().unwrap(), NormalForm::BoyceCodd);
        assert_eq!(
            "Boyce-Codd".parse::<NormalForm>().unwrap(),
            NormalForm::BoyceCodd
        );
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = "6NF".parse::<NormalForm>().unwrap_err();
        assert!(matches!(err, NormalizeError::UnsupportedNormalForm { .. }));
    }

    #[test]
    fn forms_are_ordered() {
        assert!(NormalForm::Third < NormalForm::BoyceCodd);
        assert_eq!(NormalForm::BoyceCodd.prerequisite(), Some(NormalForm::Third));
        assert_eq!(NormalForm::First.prerequisite(), None);
    }

    #[test]
    fn display_round_trips() {
        for form in NormalForm::ALL {
            assert_eq!(form.to_string().parse::<NormalForm>().unwrap(), form);
        }
    }
}
