use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ParsingError {
    Failed(String),
    Missing,
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use ParsingError::*;
        match self {
            Failed(field) => {
                write!(f, "parsing {} failed", field)
            }
            Missing => write!(f, "no such field"),
        }
    }
}

/// Parse the value at `index` position as a double.
///
/// Non-finite values ("NaN", "inf") parse fine: the binning engine drops
/// them on its own, the same way the source table's missing cells are
/// dropped.
///
/// # Arguments
/// * `line` - String input to be parsed
/// * `index` - Index of the field in `line`, where the fields are whitespace separated
///
/// # Errors
///
/// It will throw error in two cases:
/// * It was not able to parse the string as a `f64` number.
/// * The line has no field at `index`.
pub fn parse(line: String, index: usize) -> Result<f64, ParsingError> {
    if let Some(field) = line.split_whitespace().nth(index) {
        field
            .parse::<f64>()
            .map_err(|_| ParsingError::Failed(field.to_owned()))
    } else {
        Err(ParsingError::Missing)
    }
}
