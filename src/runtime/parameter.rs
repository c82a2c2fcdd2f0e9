use super::{Error, Result};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl FromStr for ParameterValue {
    type Err = std::convert::Infallible;

    /// Infers the narrowest type: booleans, then integers, then doubles.
    /// Anything else is a string, with one layer of quotes removed.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if let Ok(value) = text.parse::<bool>() {
            return Ok(Self::Bool(value));
        }
        if let Ok(value) = text.parse::<i64>() {
            return Ok(Self::Integer(value));
        }
        if let Ok(value) = text.parse::<f64>() {
            return Ok(Self::Double(value));
        }
        let unquoted = ['"', '\'']
            .iter()
            .find_map(|&q| text.strip_prefix(q).and_then(|t| t.strip_suffix(q)))
            .unwrap_or(text);
        Ok(Self::String(unquoted.to_string()))
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(val) => write!(f, "{val}"),
            ParameterValue::Integer(val) => write!(f, "{val}"),
            ParameterValue::Double(val) => write!(f, "{val}"),
            ParameterValue::String(val) => write!(f, "{val}"),
        }
    }
}

/// Parses a `key:=value` command line assignment.
pub fn parse_param_assignment(text: &str) -> Result<(String, ParameterValue)> {
    let Some((key, value)) = text.split_once(":=") else {
        return Err(Error::InvalidParameterAssignment(text.to_string()));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::InvalidParameterAssignment(text.to_string()));
    }
    let value = match value.parse::<ParameterValue>() {
        Ok(value) => value,
        Err(never) => match never {},
    };
    Ok((key.to_string(), value))
}
