//! # Request configuration
//!
//! Every prompt is described by an [`Options`] record: prompt text, target
//! type, validation rules, exit sentinels, retry behaviour and the messages
//! printed when a rule fails. Options are built in code with the builder
//! methods or read from JSON using the same key names the record documents
//! (`outputText`, `numInputs`, `minError`, ...).
//!
//! Options only reach the prompt engine through [`Request::new`], which runs
//! the parameter validation layer. A [`ConfigError`] from there is a
//! programmer error and is never retried.
//!
//! ## Example
//!
//! ```rust
//! use prompter::{Kind, Options, Request};
//!
//! let options = Options::from_json(r#"{"min": 5, "max": 10, "minError": "Too small"}"#).unwrap();
//! let request = Request::new(Kind::Int, options).unwrap();
//! assert_eq!(request.kind(), Kind::Int);
//!
//! // Booleans must be booleans
//! assert!(Options::from_json(r#"{"repeat": "yes"}"#).is_err());
//! ```
use crate::error::ConfigError;
use crate::utils::sanitize::{Check, Sanitize};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use std::{cmp::Ordering, fmt::Display, fs::OpenOptions, str::FromStr};

/// The target type of a request. JSON key `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Int,
    Float,
    Hex,
    Bool,
    #[serde(rename = "filename")]
    FileName,
}

impl Kind {
    /// Numeric kinds accept `min`, `max`, `mult`, `factor`, `even` and `ranges`.
    pub fn is_numeric(self) -> bool {
        matches!(self, Kind::Int | Kind::Float | Kind::Hex)
    }

    /// Prompt shown when neither `outputText` nor a wrapper text is set.
    pub fn default_text(self) -> &'static str {
        match self {
            Kind::String => "Enter a string:\t",
            Kind::Int => "Enter an integer:\t",
            Kind::Float => "Enter a floating-point number:\t",
            Kind::Hex => "Enter a hexadecimal number:\t",
            Kind::Bool => "Enter a boolean value:\t",
            Kind::FileName => "Enter a filename:\t",
        }
    }

    /// Noun used by the collect-mode prompt ("Enter an integer, ...").
    pub fn noun(self) -> &'static str {
        match self {
            Kind::String => "a string",
            Kind::Int => "an integer",
            Kind::Float => "a floating-point number",
            Kind::Hex => "a hexadecimal number",
            Kind::Bool => "a boolean value",
            Kind::FileName => "a filename",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Hex => write!(f, "hex"),
            Self::Bool => write!(f, "bool"),
            Self::FileName => write!(f, "filename"),
        }
    }
}

impl FromStr for Kind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" | "str" => Ok(Kind::String),
            "int" => Ok(Kind::Int),
            "float" => Ok(Kind::Float),
            "hex" => Ok(Kind::Hex),
            "bool" | "boolean" => Ok(Kind::Bool),
            "filename" => Ok(Kind::FileName),
            other => Err(ConfigError::InvalidValue {
                option: "type",
                reason: format!("unknown type {other:?}"),
            }),
        }
    }
}

/// A numeric rule operand.
///
/// Two integers compare exactly; any comparison involving a float is done
/// in `f64`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(x) => x,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(x) => x == 0.0,
        }
    }

    /// `true` when `self` is an exact multiple of `divisor`. Zero divides nothing.
    pub fn is_multiple_of(self, divisor: Number) -> bool {
        if divisor.is_zero() {
            return false;
        }
        match (self, divisor) {
            // checked_rem only overflows on i64::MIN % -1, which is a multiple.
            (Number::Int(a), Number::Int(b)) => a.checked_rem(b).is_none_or(|r| r == 0),
            _ => {
                let r = self.as_f64() % divisor.as_f64();
                r == 0.0
            }
        }
    }

    /// Euclidean parity. `None` for non-integral or non-finite values.
    pub fn is_even(self) -> Option<bool> {
        match self {
            Number::Int(i) => Some(i.rem_euclid(2) == 0),
            Number::Float(x) if x.is_finite() && x.fract() == 0.0 => {
                Some(x.rem_euclid(2.0) == 0.0)
            }
            Number::Float(_) => None,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.partial_cmp(b),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value.into())
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// A JSON option that takes either a single value or a list of values.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(OneOrMany::deserialize(deserializer)?.into_vec())
}

fn some_one_or_many<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<OneOrMany<T>>::deserialize(deserializer)?.map(OneOrMany::into_vec))
}

/// `numInputs` accepts an integer or a string that parses as one.
fn budget<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Budget {
        Count(usize),
        Text(String),
    }

    match Option::<Budget>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Budget::Count(n)) => Ok(Some(n)),
        Some(Budget::Text(s)) => s.trim().parse().map(Some).map_err(|_| {
            D::Error::custom(format!("numInputs must be a non-negative integer, got {s:?}"))
        }),
    }
}

/// How a validated file name is opened by `get_file`.
///
/// Parsed from the classic mode strings: `r`, `w`, `a` or `x`, optionally
/// followed by `+` and one of `b`/`t`. `b` and `t` make no difference to
/// the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    access: Access,
    update: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
    Append,
    CreateNew,
}

impl OpenMode {
    pub const READ: OpenMode = OpenMode {
        access: Access::Read,
        update: false,
    };

    /// The matching [`OpenOptions`].
    pub fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self.access {
            Access::Read => options.read(true).write(self.update),
            Access::Write => options.write(true).create(true).truncate(true).read(self.update),
            Access::Append => options.append(true).create(true).read(self.update),
            Access::CreateNew => options.write(true).create_new(true).read(self.update),
        };
        options
    }
}

impl Default for OpenMode {
    fn default() -> Self {
        Self::READ
    }
}

impl FromStr for OpenMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidMode(s.to_string());
        let mut chars = s.chars();

        let access = match chars.next() {
            Some('r') => Access::Read,
            Some('w') => Access::Write,
            Some('a') => Access::Append,
            Some('x') => Access::CreateNew,
            _ => return Err(invalid()),
        };

        let mut update = false;
        let mut flavour = false;
        for c in chars {
            match c {
                '+' if !update => update = true,
                'b' | 't' if !flavour => flavour = true,
                _ => return Err(invalid()),
            }
        }

        Ok(OpenMode { access, update })
    }
}

/// The configuration of one input request.
///
/// Field names map to the JSON keys in camelCase (`output_text` is
/// `outputText`, `type_error` is `typeError`, `kind` is `type`). Unknown
/// keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    pub output_text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<Kind>,

    pub min: Option<Number>,
    pub max: Option<Number>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub mult: Vec<Number>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub factor: Vec<Number>,
    pub even: Option<bool>,
    pub ranges: Option<Vec<(Number, Number)>>,
    pub alphabetical: Option<bool>,

    pub exists: Option<bool>,
    pub extension: Option<String>,
    pub mode: Option<String>,

    #[serde(default, deserialize_with = "some_one_or_many")]
    pub exiton: Option<Vec<String>>,
    #[serde(default, deserialize_with = "budget")]
    pub num_inputs: Option<usize>,
    pub repeat: Option<bool>,

    pub type_error: Option<String>,
    pub min_error: Option<String>,
    pub max_error: Option<String>,
    pub mult_error: Option<String>,
    pub factor_error: Option<String>,
    pub even_error: Option<String>,
    pub ranges_error: Option<String>,
    pub alphabetical_error: Option<String>,
    pub extension_error: Option<String>,
    pub exists_error: Option<String>,
    pub error_message: Option<String>,

    /// Wrapper-provided prompt, used when `output_text` is unset.
    #[serde(skip)]
    pub(crate) default_text: Option<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads options from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn output_text(mut self, text: impl Into<String>) -> Self {
        self.output_text = Some(text.into());
        self
    }

    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn min(mut self, min: impl Into<Number>) -> Self {
        self.min = Some(min.into());
        self
    }

    pub fn max(mut self, max: impl Into<Number>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Adds a divisor the value must be a multiple of.
    pub fn mult(mut self, divisor: impl Into<Number>) -> Self {
        self.mult.push(divisor.into());
        self
    }

    /// Adds a number the value must divide.
    pub fn factor(mut self, multiple: impl Into<Number>) -> Self {
        self.factor.push(multiple.into());
        self
    }

    pub fn even(mut self, even: bool) -> Self {
        self.even = Some(even);
        self
    }

    /// Adds a closed interval to the accepted ranges.
    pub fn range(mut self, lo: impl Into<Number>, hi: impl Into<Number>) -> Self {
        self.ranges
            .get_or_insert_with(Vec::new)
            .push((lo.into(), hi.into()));
        self
    }

    pub fn alphabetical(mut self, alphabetical: bool) -> Self {
        self.alphabetical = Some(alphabetical);
        self
    }

    pub fn exists(mut self, exists: bool) -> Self {
        self.exists = Some(exists);
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Adds an exit sentinel.
    pub fn exit_on(mut self, sentinel: impl Into<String>) -> Self {
        self.exiton
            .get_or_insert_with(Vec::new)
            .push(sentinel.into());
        self
    }

    pub fn num_inputs(mut self, budget: usize) -> Self {
        self.num_inputs = Some(budget);
        self
    }

    pub fn repeat(mut self, repeat: bool) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// Sets the message printed when `check` rejects the input.
    pub fn message(mut self, check: Check, message: impl Into<String>) -> Self {
        let slot = match check {
            Check::Type => &mut self.type_error,
            Check::Min => &mut self.min_error,
            Check::Max => &mut self.max_error,
            Check::Mult => &mut self.mult_error,
            Check::Factor => &mut self.factor_error,
            Check::Even => &mut self.even_error,
            Check::Ranges => &mut self.ranges_error,
            Check::Alphabetical => &mut self.alphabetical_error,
            Check::Extension => &mut self.extension_error,
            Check::Exists => &mut self.exists_error,
        };
        *slot = Some(message.into());
        self
    }

    /// Sets the fallback message printed for any rejection without its own message.
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// The message to print for a failed `check`: its own, else `errorMessage`.
    pub fn message_for(&self, check: Check) -> Option<&str> {
        let own = match check {
            Check::Type => &self.type_error,
            Check::Min => &self.min_error,
            Check::Max => &self.max_error,
            Check::Mult => &self.mult_error,
            Check::Factor => &self.factor_error,
            Check::Even => &self.even_error,
            Check::Ranges => &self.ranges_error,
            Check::Alphabetical => &self.alphabetical_error,
            Check::Extension => &self.extension_error,
            Check::Exists => &self.exists_error,
        };
        own.as_deref().or(self.error_message.as_deref())
    }

    pub(crate) fn with_default_text(mut self, text: impl Into<String>) -> Self {
        self.default_text = Some(text.into());
        self
    }
}

/// A validated request: the only way options reach the prompt engine.
#[derive(Debug, Clone)]
pub struct Request {
    kind: Kind,
    options: Options,
    mode: OpenMode,
}

impl Request {
    /// Validates `options` for `kind`.
    ///
    /// `kind` wins over any `type` set in the options.
    pub fn new(kind: Kind, mut options: Options) -> Result<Self, ConfigError> {
        options.kind = Some(kind);
        let mode = validate(kind, &options)?;
        Ok(Request {
            kind,
            options,
            mode,
        })
    }

    /// Validates `options`, taking the kind from `type` (float when unset).
    pub fn from_options(options: Options) -> Result<Self, ConfigError> {
        let kind = options.kind.unwrap_or(Kind::Float);
        Self::new(kind, options)
    }

    /// Reads and validates a JSON request.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_options(Options::from_json(json)?)
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn repeat(&self) -> bool {
        self.options.repeat.unwrap_or(true)
    }

    pub fn exit_sentinels(&self) -> &[String] {
        self.options.exiton.as_deref().unwrap_or_default()
    }

    pub fn prompt_text(&self) -> &str {
        self.options
            .output_text
            .as_deref()
            .or(self.options.default_text.as_deref())
            .unwrap_or(self.kind.default_text())
    }

    /// The rule chain run after the cast, in evaluation order.
    pub(crate) fn filters(&self) -> Vec<Sanitize> {
        let o = &self.options;
        let mut filters = Vec::new();

        if let Some(min) = o.min {
            filters.push(Sanitize::Min(min));
        }
        if let Some(max) = o.max {
            filters.push(Sanitize::Max(max));
        }
        if !o.mult.is_empty() {
            filters.push(Sanitize::MultipleOf(o.mult.clone()));
        }
        if !o.factor.is_empty() {
            filters.push(Sanitize::FactorOf(o.factor.clone()));
        }
        if let Some(even) = o.even {
            filters.push(Sanitize::Even(even));
        }
        if let Some(ranges) = &o.ranges {
            filters.push(Sanitize::InRanges(ranges.clone()));
        }
        if let Some(alphabetical) = o.alphabetical {
            filters.push(Sanitize::Alphabetical(alphabetical));
        }
        if let Some(extension) = &o.extension {
            filters.push(Sanitize::Extension(extension.clone()));
        }
        if let Some(exists) = o.exists {
            filters.push(Sanitize::Exists(exists));
        }

        filters
    }
}

/// The parameter validation layer. Returns the parsed open mode.
fn validate(kind: Kind, o: &Options) -> Result<OpenMode, ConfigError> {
    let not_applicable = |option: &'static str| -> Result<OpenMode, ConfigError> {
        Err(ConfigError::NotApplicable { option, kind })
    };

    if !kind.is_numeric() {
        let numeric = [
            ("min", o.min.is_some()),
            ("max", o.max.is_some()),
            ("mult", !o.mult.is_empty()),
            ("factor", !o.factor.is_empty()),
            ("even", o.even.is_some()),
            ("ranges", o.ranges.is_some()),
        ];
        if let Some((option, _)) = numeric.iter().find(|(_, set)| *set) {
            return not_applicable(*option);
        }
    }
    if kind != Kind::String && o.alphabetical.is_some() {
        return not_applicable("alphabetical");
    }
    if kind != Kind::FileName {
        if o.extension.is_some() {
            return not_applicable("extension");
        }
        if o.exists.is_some() {
            return not_applicable("exists");
        }
        if o.mode.is_some() {
            return not_applicable("mode");
        }
    }

    if o.mult.iter().any(|d| d.is_zero()) {
        return Err(ConfigError::InvalidValue {
            option: "mult",
            reason: "divisors must be non-zero".to_string(),
        });
    }

    if let Some(ranges) = &o.ranges {
        if ranges.is_empty() {
            return Err(ConfigError::InvalidValue {
                option: "ranges",
                reason: "at least one [min, max] pair is required".to_string(),
            });
        }
        if let Some((lo, hi)) = ranges.iter().find(|(lo, hi)| !(lo <= hi)) {
            return Err(ConfigError::InvalidValue {
                option: "ranges",
                reason: format!("[{lo}, {hi}] is not an interval"),
            });
        }
    }

    match &o.mode {
        Some(mode) => mode.parse(),
        None => Ok(OpenMode::default()),
    }
}
