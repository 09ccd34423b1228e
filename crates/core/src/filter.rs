#![forbid(unsafe_code)]

use crate::value::{AttrValue, Info, format_number};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "<")]
    Less,
    #[default]
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = ">")]
    Greater,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::Equal => "=",
            Self::Greater => ">",
        }
    }

    pub fn parse(value: &str) -> Result<Self, OperatorError> {
        match value.trim() {
            "<" => Ok(Self::Less),
            "=" | "==" => Ok(Self::Equal),
            ">" => Ok(Self::Greater),
            "" => Err(OperatorError::Empty),
            _ => Err(OperatorError::Unknown),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperatorError {
    Empty,
    Unknown,
}

impl OperatorError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "operator must not be empty",
            Self::Unknown => "operator must be one of: < = >",
        }
    }
}

/// Runtime type of the tested attribute, sampled from the layer's first feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    String,
    Numeric,
}

impl FilterType {
    /// Only strings and numbers carry a type; booleans, nulls and absent attributes do not.
    pub fn infer(sample: Option<&AttrValue>) -> Option<Self> {
        match sample? {
            AttrValue::Text(_) => Some(Self::String),
            AttrValue::Number(_) => Some(Self::Numeric),
            AttrValue::Null | AttrValue::Bool(_) => None,
        }
    }
}

/// Comparison operand. Raw input that parses as a finite number is stored as a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
}

impl FilterValue {
    /// Empty input clears the operand.
    pub fn coerce(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        match parse_finite(raw) {
            Some(n) => Some(Self::Number(n)),
            None => Some(Self::Text(raw.to_string())),
        }
    }

    pub fn text(&self) -> String {
        match self {
            Self::Number(n) => format_number(*n),
            Self::Text(s) => s.clone(),
        }
    }
}

/// A borrowed view of one filter's predicate fields.
#[derive(Clone, Copy, Debug)]
pub struct Predicate<'a> {
    pub label: Option<&'a str>,
    pub operator: Operator,
    pub value: Option<&'a FilterValue>,
    pub value_type: Option<FilterType>,
}

impl Predicate<'_> {
    /// `<`/`>` compare the attribute against the operand; a missing attribute or operand,
    /// or an incomparable pair, is a non-match. `=` compares text when the attribute is a
    /// string and otherwise only checks that an operand is set.
    pub fn matches(&self, info: &Info) -> bool {
        let Some(label) = self.label else {
            return false;
        };
        let attr = info.get(label);
        match self.operator {
            Operator::Less => self.compare(attr) == Some(Ordering::Less),
            Operator::Greater => self.compare(attr) == Some(Ordering::Greater),
            Operator::Equal => match self.value_type {
                Some(FilterType::String) => match (attr.and_then(AttrValue::display_text), self.value) {
                    (Some(left), Some(right)) => left == right.text(),
                    _ => false,
                },
                _ => self.value.is_some(),
            },
        }
    }

    fn compare(&self, attr: Option<&AttrValue>) -> Option<Ordering> {
        let value = self.value?;
        match (attr?, value) {
            (AttrValue::Null, _) => None,
            (AttrValue::Text(left), FilterValue::Text(right)) => Some(left.as_str().cmp(right.as_str())),
            (AttrValue::Text(left), FilterValue::Number(right)) => {
                parse_finite(left)?.partial_cmp(right)
            }
            (AttrValue::Number(left), FilterValue::Number(right)) => left.partial_cmp(right),
            (AttrValue::Number(left), FilterValue::Text(right)) => {
                left.partial_cmp(&parse_finite(right)?)
            }
            (AttrValue::Bool(left), FilterValue::Number(right)) => {
                f64::from(u8::from(*left)).partial_cmp(right)
            }
            (AttrValue::Bool(left), FilterValue::Text(right)) => {
                f64::from(u8::from(*left)).partial_cmp(&parse_finite(right)?)
            }
        }
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
