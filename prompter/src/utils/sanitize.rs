//! # Input Sanitization & Validation
//!
//! The rule chain behind every prompt. Raw text is first cast to a
//! [`DesiredType`], then the [`Sanitize`] filters run in order and
//! short-circuit on the first failure, returning a [`Rejection`] that names
//! the failed check.
//!
//! ## Rules
//! - Inclusive bounds with [`Sanitize::Min`] and [`Sanitize::Max`]
//! - Divisibility with [`Sanitize::MultipleOf`] and [`Sanitize::FactorOf`]
//! - Parity with [`Sanitize::Even`]
//! - Interval membership with [`Sanitize::InRanges`]
//! - Alphabetic content of strings with [`Sanitize::Alphabetical`]
//! - File names with [`Sanitize::Extension`] and [`Sanitize::Exists`]
//!
//! Filters are normally derived from [`crate::Options`] by
//! [`crate::Request`], which also makes sure every filter fits the cast type.
use crate::config::{Kind, Number};
use serde::Serialize;
use std::{error::Error, fmt::Display, path::Path};

/// A successfully cast input value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(x) => Some(Number::Float(*x)),
            _ => None,
        }
    }

    pub fn into_string(self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{}", s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// The check a [`Rejection`] comes from. Each one has its own message option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Type,
    Min,
    Max,
    Mult,
    Factor,
    Even,
    Ranges,
    Alphabetical,
    Extension,
    Exists,
}

impl Check {
    /// The option key holding the custom message for this check.
    pub fn message_key(self) -> &'static str {
        match self {
            Check::Type => "typeError",
            Check::Min => "minError",
            Check::Max => "maxError",
            Check::Mult => "multError",
            Check::Factor => "factorError",
            Check::Even => "evenError",
            Check::Ranges => "rangesError",
            Check::Alphabetical => "alphabeticalError",
            Check::Extension => "extensionError",
            Check::Exists => "existsError",
        }
    }
}

/// Why an input was rejected.
///
/// The `Display` text is for logs; the user only ever sees the messages
/// configured in [`crate::Options`].
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    Type(DesiredType),
    Min(Number),
    Max(Number),
    Mult(Number),
    Factor(Number),
    Even(bool),
    Ranges,
    Alphabetical(bool),
    Extension(String),
    Exists(bool),
}

impl Rejection {
    pub fn check(&self) -> Check {
        match self {
            Self::Type(_) => Check::Type,
            Self::Min(_) => Check::Min,
            Self::Max(_) => Check::Max,
            Self::Mult(_) => Check::Mult,
            Self::Factor(_) => Check::Factor,
            Self::Even(_) => Check::Even,
            Self::Ranges => Check::Ranges,
            Self::Alphabetical(_) => Check::Alphabetical,
            Self::Extension(_) => Check::Extension,
            Self::Exists(_) => Check::Exists,
        }
    }
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type(t) => write!(f, "The value is not a {}", t),
            Self::Min(n) => write!(f, "The value is below {}", n),
            Self::Max(n) => write!(f, "The value is above {}", n),
            Self::Mult(n) => write!(f, "The value is not a multiple of {}", n),
            Self::Factor(n) => write!(f, "The value is not a factor of {}", n),
            Self::Even(true) => write!(f, "The value is not even"),
            Self::Even(false) => write!(f, "The value is not odd"),
            Self::Ranges => write!(f, "The value is outside every range"),
            Self::Alphabetical(true) => write!(f, "The value is not alphabetical"),
            Self::Alphabetical(false) => write!(f, "The value contains letters"),
            Self::Extension(e) => write!(f, "The file name doesn't end in {}", e),
            Self::Exists(true) => write!(f, "The file doesn't exist"),
            Self::Exists(false) => write!(f, "The file already exists"),
        }
    }
}

impl Error for Rejection {}

/// A validation filter applied to a cast value.
#[derive(Debug, Clone, PartialEq)]
pub enum Sanitize {
    Min(Number),
    Max(Number),
    MultipleOf(Vec<Number>),
    FactorOf(Vec<Number>),
    Even(bool),
    InRanges(Vec<(Number, Number)>),
    Alphabetical(bool),
    Extension(String),
    Exists(bool),
}

/// Trait for input validation.
///
/// Any filter that implements this checks a cast value and returns either
/// `Ok(())` or the [`Rejection`] describing the failure.
trait Validate {
    fn validate(&self, value: &Value) -> Result<(), Rejection>;
}

/// Parses `$input` as `$t` and wraps it with `$variant`, or rejects it as `$desired`.
///
/// # Example
/// ```rust,ignore
/// let value = cast!("42", i64, Value::Int, DesiredType::Int);
/// ```
macro_rules! cast {
    ($input:expr, $t:ty, $variant:path, $desired:expr) => {
        match $input.parse::<$t>() {
            Ok(v) => Ok($variant(v)),
            Err(_) => Err(Rejection::Type($desired)),
        }
    };
}

impl Sanitize {
    /// Casts the answer and runs all filters against it.
    ///
    /// - Stops and returns the first rejection encountered.
    /// - Returns the cast value if every filter passes.
    pub fn execute(
        answer: &str,
        desired: DesiredType,
        filters: &[Sanitize],
    ) -> Result<Value, Rejection> {
        let value = desired.cast(answer)?;

        for filter in filters {
            filter.validate(&value)?;
        }
        Ok(value)
    }

    pub fn check(&self) -> Check {
        match self {
            Sanitize::Min(_) => Check::Min,
            Sanitize::Max(_) => Check::Max,
            Sanitize::MultipleOf(_) => Check::Mult,
            Sanitize::FactorOf(_) => Check::Factor,
            Sanitize::Even(_) => Check::Even,
            Sanitize::InRanges(_) => Check::Ranges,
            Sanitize::Alphabetical(_) => Check::Alphabetical,
            Sanitize::Extension(_) => Check::Extension,
            Sanitize::Exists(_) => Check::Exists,
        }
    }
}

impl Validate for Sanitize {
    fn validate(&self, value: &Value) -> Result<(), Rejection> {
        // Request::new only pairs numeric filters with numeric kinds and
        // string filters with string kinds; other pairings never reject.
        match (self, value) {
            (Sanitize::Alphabetical(expected), Value::Str(s)) => {
                if alphabetic(s) == Some(*expected) {
                    Ok(())
                } else {
                    Err(Rejection::Alphabetical(*expected))
                }
            }
            (Sanitize::Extension(extension), Value::Str(name)) => {
                if has_extension(name, extension) {
                    Ok(())
                } else {
                    Err(Rejection::Extension(extension.clone()))
                }
            }
            (Sanitize::Exists(expected), Value::Str(name)) => {
                let path = Path::new(name);
                let ok = if *expected {
                    path.is_file()
                } else {
                    !path.exists()
                };
                if ok {
                    Ok(())
                } else {
                    Err(Rejection::Exists(*expected))
                }
            }
            _ => match value.as_number() {
                Some(n) => self.validate_number(n),
                None => Ok(()),
            },
        }
    }
}

impl Sanitize {
    fn validate_number(&self, n: Number) -> Result<(), Rejection> {
        match self {
            // NaN is outside every bound
            Sanitize::Min(min) if !(n >= *min) => Err(Rejection::Min(*min)),
            Sanitize::Max(max) if !(n <= *max) => Err(Rejection::Max(*max)),
            Sanitize::MultipleOf(divisors) => {
                match divisors.iter().find(|d| !n.is_multiple_of(**d)) {
                    Some(d) => Err(Rejection::Mult(*d)),
                    None => Ok(()),
                }
            }
            Sanitize::FactorOf(multiples) => {
                match multiples.iter().find(|m| !m.is_multiple_of(n)) {
                    Some(m) => Err(Rejection::Factor(*m)),
                    None => Ok(()),
                }
            }
            Sanitize::Even(even) => {
                if n.is_even() == Some(*even) {
                    Ok(())
                } else {
                    Err(Rejection::Even(*even))
                }
            }
            Sanitize::InRanges(ranges) => {
                if ranges.iter().any(|(lo, hi)| n >= *lo && n <= *hi) {
                    Ok(())
                } else {
                    Err(Rejection::Ranges)
                }
            }
            _ => Ok(()),
        }
    }
}

/// `Some(true)` when the text is alphabetic once spaces are removed,
/// `Some(false)` when it has no alphabetic character at all, `None` when mixed.
pub fn alphabetic(input: &str) -> Option<bool> {
    let mut letters = 0;
    let mut others = 0;
    for c in input.chars().filter(|c| *c != ' ') {
        if c.is_alphabetic() {
            letters += 1;
        } else {
            others += 1;
        }
    }

    match (letters, others) {
        (0, _) => Some(false),
        (_, 0) => Some(true),
        _ => None,
    }
}

/// Matches `extension` against the part after the last `.` or the suffix from
/// the last `.` on, so both `"txt"` and `".txt"` accept `notes.txt`.
pub fn has_extension(name: &str, extension: &str) -> bool {
    match name.rfind('.') {
        Some(dot) => &name[dot + 1..] == extension || &name[dot..] == extension,
        None => false,
    }
}

/// Represents the desired type to which the input should be cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredType {
    String,
    Int,
    Float,
    Hex,
    Bool,
}

impl From<Kind> for DesiredType {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::String | Kind::FileName => DesiredType::String,
            Kind::Int => DesiredType::Int,
            Kind::Float => DesiredType::Float,
            Kind::Hex => DesiredType::Hex,
            Kind::Bool => DesiredType::Bool,
        }
    }
}

impl DesiredType {
    /// Casts raw text.
    ///
    /// - `String` keeps the text untouched.
    /// - `Int` and `Float` ignore surrounding whitespace.
    /// - `Hex` takes an optional sign and an optional `0x`/`0X` prefix.
    /// - `Bool` matches `true`/`false` in any case.
    pub fn cast(self, input: &str) -> Result<Value, Rejection> {
        match self {
            DesiredType::String => Ok(Value::Str(input.to_string())),
            DesiredType::Int => cast!(input.trim(), i64, Value::Int, DesiredType::Int),
            DesiredType::Float => cast!(input.trim(), f64, Value::Float, DesiredType::Float),
            DesiredType::Hex => parse_hex(input.trim())
                .map(Value::Int)
                .ok_or(Rejection::Type(DesiredType::Hex)),
            DesiredType::Bool => match input.to_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(Rejection::Type(DesiredType::Bool)),
            },
        }
    }
}

fn parse_hex(input: &str) -> Option<i64> {
    let (sign, rest) = match input.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", input.strip_prefix('+').unwrap_or(input)),
    };
    let digits = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
        .unwrap_or(rest);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    i64::from_str_radix(&format!("{sign}{digits}"), 16).ok()
}

impl Display for DesiredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "integer"),
            Self::Float => write!(f, "floating-point number"),
            Self::Hex => write!(f, "hexadecimal number"),
            Self::Bool => write!(f, "boolean"),
        }
    }
}
