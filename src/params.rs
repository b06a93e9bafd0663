//! Parameter values and the nested parameter namespace
//!
//! Every pipeline stage exposes a flat map from parameter name to
//! [`ParamValue`]. At the pipeline level, names are prefixed with the stage
//! name joined by [`PARAM_SEP`], so the classifier's `c` becomes `clf__c`.

use crate::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Separator between a stage name and the stage's own parameter name
pub const PARAM_SEP: &str = "__";

/// A hyperparameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Str(String),
}

impl ParamValue {
    /// Numeric view; integers widen to float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Str(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

/// A set of named hyperparameters that can be enumerated, read, and written
pub trait ParamSet {
    /// All parameters as a sorted name -> value map
    fn params(&self) -> BTreeMap<String, ParamValue>;

    /// Write a single parameter by name
    fn set_param(&mut self, name: &str, value: ParamValue) -> Result<()>;

    /// Read a single parameter by name
    fn param(&self, name: &str) -> Result<ParamValue> {
        self.params()
            .remove(name)
            .ok_or_else(|| SweepError::UnknownParameter(name.to_string()))
    }

    /// All parameter names, sorted
    fn param_names(&self) -> Vec<String> {
        self.params().into_keys().collect()
    }
}

/// Split a nested name into (stage, rest) at the first separator
pub(crate) fn split_nested(name: &str) -> Option<(&str, &str)> {
    name.split_once(PARAM_SEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_widening() {
        assert_eq!(ParamValue::Int(10).as_f64(), Some(10.0));
        assert_eq!(ParamValue::Float(0.1).as_f64(), Some(0.1));
        assert_eq!(ParamValue::Str("10".into()).as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ParamValue::Float(0.001).to_string(), "0.001");
        assert_eq!(ParamValue::Bool(true).to_string(), "true");
        assert_eq!(ParamValue::Str("minmax".into()).to_string(), "minmax");
    }

    #[test]
    fn test_split_nested() {
        assert_eq!(split_nested("clf__c"), Some(("clf", "c")));
        assert_eq!(split_nested("scaler__range_min"), Some(("scaler", "range_min")));
        // Only the first separator splits; the rest stays with the stage param
        assert_eq!(split_nested("a__b__c"), Some(("a", "b__c")));
        assert_eq!(split_nested("c"), None);
    }
}
