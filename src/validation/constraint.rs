//! Constraint kinds and their checks

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Timestamp layout used by the API (`2016-06-21T16:00:38`)
pub const API_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// JSON value types a field can be constrained to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Number => "numeric",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::Bool => value.is_boolean(),
            ValueKind::Int => value.is_i64() || value.is_u64(),
            ValueKind::Number => value.is_number(),
            ValueKind::String => value.is_string(),
            ValueKind::Array => value.is_array(),
            ValueKind::Object => value.is_object(),
        }
    }
}

/// String formats understood by [`Constraint::Format`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// API timestamp, or RFC 3339
    DateTime,
    Ipv4,
    /// IPv6 address, optionally with a `/prefix` of at most 128
    Ipv6,
    /// Linode label: ASCII alphanumerics plus `-`, `_` and `.`, starting and
    /// ending with an alphanumeric, no two separators in a row
    Label,
}

impl Format {
    fn message(self) -> &'static str {
        match self {
            Format::DateTime => "This value is not a valid datetime.",
            Format::Ipv4 | Format::Ipv6 => "This is not a valid IP address.",
            Format::Label => "This value is not valid.",
        }
    }

    fn matches(self, s: &str) -> bool {
        match self {
            Format::DateTime => {
                NaiveDateTime::parse_from_str(s, API_DATETIME_FORMAT).is_ok()
                    || DateTime::parse_from_rfc3339(s).is_ok()
            }
            Format::Ipv4 => s.parse::<Ipv4Addr>().is_ok(),
            Format::Ipv6 => is_valid_ipv6(s),
            Format::Label => is_valid_label(s),
        }
    }
}

fn is_valid_ipv6(s: &str) -> bool {
    let (addr, prefix) = match s.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (s, None),
    };

    if addr.parse::<Ipv6Addr>().is_err() {
        return false;
    }

    match prefix {
        None => true,
        Some(p) => !p.starts_with('+') && p.parse::<u8>().is_ok_and(|len| len <= 128),
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '-' | '_' | '.')
}

fn is_valid_label(label: &str) -> bool {
    let (Some(first), Some(last)) = (label.chars().next(), label.chars().last()) else {
        return false;
    };

    if !first.is_ascii_alphanumeric() || !last.is_ascii_alphanumeric() {
        return false;
    }

    let mut prev_separator = false;
    for c in label.chars() {
        if is_separator(c) {
            if prev_separator {
                return false;
            }
            prev_separator = true;
        } else if c.is_ascii_alphanumeric() {
            prev_separator = false;
        } else {
            return false;
        }
    }

    true
}

/// A single validation rule attached to a declared field
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    NotNull,
    /// Not null, not `""`, not `false`, not an empty array or object
    NotBlank,
    Type(ValueKind),
    /// String must be one of the listed values
    Choice(&'static [&'static str]),
    /// Character count bounds for strings
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
    Format(Format),
}

impl Constraint {
    /// Returns the violation message, or `None` when the value passes
    pub fn check(&self, value: &Value) -> Option<String> {
        match self {
            Constraint::NotNull => value
                .is_null()
                .then(|| "This value should not be null.".to_string()),
            Constraint::NotBlank => {
                is_blank(value).then(|| "This value should not be blank.".to_string())
            }
            _ if value.is_null() => None,
            Constraint::Type(kind) => (!kind.matches(value))
                .then(|| format!("This value should be of type {}.", kind.name())),
            Constraint::Choice(choices) => {
                let valid = value.as_str().is_some_and(|s| choices.contains(&s));
                (!valid).then(|| "The value you selected is not a valid choice.".to_string())
            }
            Constraint::Length { min, max } => {
                let count = value.as_str()?.chars().count();
                match (min, max) {
                    (Some(min), _) if count < *min => Some(format!(
                        "This value is too short. It should have {} {} or more.",
                        min,
                        characters(*min)
                    )),
                    (_, Some(max)) if count > *max => Some(format!(
                        "This value is too long. It should have {} {} or less.",
                        max,
                        characters(*max)
                    )),
                    _ => None,
                }
            }
            Constraint::Format(format) => {
                let s = value.as_str()?;
                (!format.matches(s)).then(|| format.message().to_string())
            }
        }
    }
}

fn characters(n: usize) -> &'static str {
    if n == 1 {
        "character"
    } else {
        "characters"
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) => false,
    }
}
