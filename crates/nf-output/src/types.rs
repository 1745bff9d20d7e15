//! Column type inference for schema emission.

use std::fmt;

/// Width used for a text column with no sampled values.
pub const DEFAULT_VARCHAR_LENGTH: usize = 255;

/// SQL column type inferred from sampled values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Varchar(usize),
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int => f.write_str("INT"),
            ColumnType::Float => f.write_str("FLOAT"),
            ColumnType::Varchar(length) => write!(f, "VARCHAR({length})"),
        }
    }
}

/// `INT` when every value is an integer, else `FLOAT` when every value is a
/// finite number, else `VARCHAR(n)` with `n` the longest value in
/// characters (at least 1).
///
/// Values are trimmed before parsing and measuring. No values at all gives
/// `VARCHAR(255)`.
pub fn infer_column_type<'a>(values: impl IntoIterator<Item = &'a str>) -> ColumnType {
    let mut seen = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut longest = 0;
    for value in values {
        seen = true;
        let trimmed = value.trim();
        if all_int && trimmed.parse::<i64>().is_err() {
            all_int = false;
        }
        if all_float && !trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
            all_float = false;
        }
        longest = longest.max(trimmed.chars().count());
    }
    if !seen {
        ColumnType::Varchar(DEFAULT_VARCHAR_LENGTH)
    } else if all_int {
        ColumnType::Int
    } else if all_float {
        ColumnType::Float
    } else {
        ColumnType::Varchar(longest.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(infer_column_type(["1", " -20 ", "300"]), ColumnType::Int);
    }

    #[test]
    fn mixed_numbers_are_float() {
        assert_eq!(infer_column_type(["1", "2.5", "1e3"]), ColumnType::Float);
    }

    #[test]
    fn any_text_makes_varchar_of_longest_value() {
        assert_eq!(
            infer_column_type(["1", "héllo", "ab"]),
            ColumnType::Varchar(5)
        );
    }

    #[test]
    fn varchar_length_ignores_surrounding_whitespace() {
        assert_eq!(infer_column_type(["  ab  ", "x"]), ColumnType::Varchar(2));
    }

    #[test]
    fn non_finite_numbers_are_text() {
        assert_eq!(infer_column_type(["inf", "NaN"]), ColumnType::Varchar(3));
    }

    #[test]
    fn empty_strings_are_text_of_length_one() {
        assert_eq!(infer_column_type([""]), ColumnType::Varchar(1));
    }

    #[test]
    fn no_values_defaults_to_255() {
        assert_eq!(
            infer_column_type(Vec::<&str>::new()),
            ColumnType::Varchar(255)
        );
        assert_eq!(ColumnType::Varchar(255).to_string(), "VARCHAR(255)");
    }
}
