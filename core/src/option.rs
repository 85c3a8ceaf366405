//! Flavor-polymorphic command-line options.
//!
//! Every option carries the same descriptive envelope (name, summary,
//! description, usage, visibility) plus a flavor that decides how many tokens
//! it eats, what value it stores, and what extras payload it contributes to
//! the program's descriptor. Options are built with flavor constructors and
//! chained setters, then handed to a
//! [`ProgramBuilder`](crate::ProgramBuilder).
//!
//! # Examples
//!
//! ```
//! use argwire_core::ArgOption;
//!
//! let option = ArgOption::integer("--count", 10)
//!     .with_summary("How many records to emit.")
//!     .with_usage("--count 10");
//! assert_eq!(option.as_integer(), Some(10));
//! assert_eq!(option.main_flavor(), "int");
//! ```

use std::io::Write;

use argwire_codec as codec;
use argwire_codec::io as wire;

use crate::error::{ArgumentError, Result};
use crate::group::SelectionGroup;

/// What a reserved meta-option does when its token is seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MetaAction {
    /// Print help text, stop run and validation, swallow remaining tokens.
    Help,
    /// Print version text, stop run and validation, swallow remaining tokens.
    Version,
    /// Emit the program descriptor, stop run and validation, swallow
    /// remaining tokens.
    ArgDump,
    /// Stop the run but keep validating: a dry run.
    DryRun,
}

/// Filesystem role attached to string-backed options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathKind {
    Plain,
    FileRead,
    FileWrite,
    FolderRead,
    FolderWrite,
}

/// Parsed value storage, one variant per main flavor.
#[derive(Debug, Clone)]
enum OptionValue {
    Meta(MetaAction),
    Flag(bool),
    Enum { group: SelectionGroup, set_value: usize },
    Int(i64),
    IntVec(Vec<i64>),
    Float(f64),
    FloatVec(Vec<f64>),
    Str(String),
    StrVec(Vec<String>),
}

/// Lower bound applied to an integer option after parsing.
#[derive(Debug, Clone)]
struct MinCheck {
    min: i64,
    message: String,
}

/// One command-line option of a [`Program`](crate::Program).
///
/// The envelope fields are plain data and may be read directly; the parsed
/// value is reached through the typed accessors ([`as_flag`](Self::as_flag),
/// [`as_integer`](Self::as_integer) and friends), which return `None` when
/// the option has a different flavor.
#[derive(Debug, Clone)]
pub struct ArgOption {
    /// Token that selects this option, e.g. `--thread`.
    pub name: String,
    /// One-line description shown in help output.
    pub summary: String,
    /// Longer prose for generated documentation.
    pub description: String,
    /// Example invocation shown in help output when non-empty.
    pub usage: String,
    /// Whether help output and documentation should show this option.
    pub is_public: bool,
    value: OptionValue,
    path_kind: PathKind,
    extensions: Vec<String>,
    required: bool,
    min_check: Option<MinCheck>,
}

impl ArgOption {
    fn new(name: impl Into<String>, value: OptionValue) -> Self {
        ArgOption {
            name: name.into(),
            summary: String::new(),
            description: String::new(),
            usage: String::new(),
            is_public: true,
            value,
            path_kind: PathKind::Plain,
            extensions: Vec::new(),
            required: false,
            min_check: None,
        }
    }

    fn with_path_kind(mut self, path_kind: PathKind) -> Self {
        self.path_kind = path_kind;
        self
    }

    pub(crate) fn meta_help() -> Self {
        let mut opt = ArgOption::new(codec::HELP_FLAG, OptionValue::Meta(MetaAction::Help));
        opt.summary = "Print out help information.".to_string();
        opt.is_public = false;
        opt
    }

    pub(crate) fn meta_version() -> Self {
        let mut opt = ArgOption::new(codec::VERSION_FLAG, OptionValue::Meta(MetaAction::Version));
        opt.summary = "Print out version information.".to_string();
        opt.is_public = false;
        opt
    }

    pub(crate) fn meta_argdump() -> Self {
        let mut opt = ArgOption::new(codec::ARGDUMP_FLAG, OptionValue::Meta(MetaAction::ArgDump));
        opt.summary = "Dump out argument information.".to_string();
        opt.is_public = false;
        opt
    }

    pub(crate) fn meta_dry_run() -> Self {
        let mut opt = ArgOption::new(codec::DRY_RUN_FLAG, OptionValue::Meta(MetaAction::DryRun));
        opt.summary = "Do not actually run, just check arguments.".to_string();
        opt.is_public = false;
        opt
    }

    /// A presence flag: consumes one token, value starts false.
    pub fn flag(name: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::Flag(false))
    }

    /// One member of a mutually-exclusive group.
    ///
    /// Registration order matters: the first member registered with a group
    /// is its default selection.
    pub fn enum_member(name: impl Into<String>, group: &SelectionGroup) -> Self {
        let set_value = group.register();
        ArgOption::new(
            name,
            OptionValue::Enum {
                group: group.clone(),
                set_value,
            },
        )
    }

    /// A single integer value with a default.
    pub fn integer(name: impl Into<String>, default: i64) -> Self {
        ArgOption::new(name, OptionValue::Int(default))
    }

    /// A repeatable integer, collected in encounter order.
    pub fn integer_vector(name: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::IntVec(Vec::new()))
    }

    /// A single floating-point value with a default.
    pub fn float(name: impl Into<String>, default: f64) -> Self {
        ArgOption::new(name, OptionValue::Float(default))
    }

    /// A repeatable floating-point value, collected in encounter order.
    pub fn float_vector(name: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::FloatVec(Vec::new()))
    }

    /// A single string value with a default.
    pub fn string(name: impl Into<String>, default: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::Str(default.into()))
    }

    /// A repeatable string, collected in encounter order.
    pub fn string_vector(name: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::StrVec(Vec::new()))
    }

    /// A path to an existing file the program will read.
    pub fn file_read(name: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::Str(String::new())).with_path_kind(PathKind::FileRead)
    }

    /// A path the program will write a file to.
    pub fn file_write(name: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::Str(String::new())).with_path_kind(PathKind::FileWrite)
    }

    /// Repeatable paths to files the program will read.
    pub fn file_read_vector(name: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::StrVec(Vec::new())).with_path_kind(PathKind::FileRead)
    }

    /// Repeatable paths the program will write files to.
    pub fn file_write_vector(name: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::StrVec(Vec::new())).with_path_kind(PathKind::FileWrite)
    }

    /// A path to a folder the program will read from.
    pub fn folder_read(name: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::Str(String::new())).with_path_kind(PathKind::FolderRead)
    }

    /// A path to a folder the program will write into.
    pub fn folder_write(name: impl Into<String>) -> Self {
        ArgOption::new(name, OptionValue::Str(String::new())).with_path_kind(PathKind::FolderWrite)
    }

    /// The standard `--thread` option: worker count, at least one.
    pub fn thread_count() -> Self {
        ArgOption::integer("--thread", 1)
            .with_summary("The number of threads to spin up.")
            .with_usage("--thread 1")
            .with_min(1, "Need at least one thread.")
    }

    /// The standard `--threadgrain` option: work items per thread.
    pub fn thread_grain() -> Self {
        ArgOption::integer("--threadgrain", 65536)
            .with_summary("The number of things to do per thread.")
            .with_usage("--threadgrain 65536")
            .with_min(1, "Each thread needs to do at least one thing.")
    }

    /// Sets the one-line help summary.
    pub fn with_summary(mut self, text: impl Into<String>) -> Self {
        self.summary = text.into();
        self
    }

    /// Sets the long documentation text.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Sets the example invocation line.
    pub fn with_usage(mut self, text: impl Into<String>) -> Self {
        self.usage = text.into();
        self
    }

    /// Hides the option from help output and documentation.
    pub fn hidden(mut self) -> Self {
        self.is_public = false;
        self
    }

    /// Requires a non-empty value after parsing.
    ///
    /// Applies to string-backed flavors; the validation message names the
    /// option and its filesystem role.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declares the file extensions consumers should offer for this option.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Rejects parsed integers below `min` with the given message.
    pub fn with_min(mut self, min: i64, message: impl Into<String>) -> Self {
        self.min_check = Some(MinCheck {
            min,
            message: message.into(),
        });
        self
    }

    /// Main flavor code as it appears on the wire.
    pub fn main_flavor(&self) -> &'static str {
        match &self.value {
            OptionValue::Meta(_) => codec::MAIN_META,
            OptionValue::Flag(_) => codec::MAIN_FLAG,
            OptionValue::Enum { .. } => codec::MAIN_ENUM,
            OptionValue::Int(_) => codec::MAIN_INT,
            OptionValue::IntVec(_) => codec::MAIN_INT_VEC,
            OptionValue::Float(_) => codec::MAIN_FLOAT,
            OptionValue::FloatVec(_) => codec::MAIN_FLOAT_VEC,
            OptionValue::Str(_) => codec::MAIN_STRING,
            OptionValue::StrVec(_) => codec::MAIN_STRING_VEC,
        }
    }

    /// Sub flavor code as it appears on the wire.
    pub fn sub_flavor(&self) -> &'static str {
        match self.path_kind {
            PathKind::Plain => codec::SUB_NONE,
            PathKind::FileRead => codec::SUB_FILE_READ,
            PathKind::FileWrite => codec::SUB_FILE_WRITE,
            PathKind::FolderRead => codec::SUB_FOLDER_READ,
            PathKind::FolderWrite => codec::SUB_FOLDER_WRITE,
        }
    }

    /// Declared file extensions, empty for non-file flavors.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Flag state, or `None` for other flavors.
    pub fn as_flag(&self) -> Option<bool> {
        match &self.value {
            OptionValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer value, or `None` for other flavors.
    pub fn as_integer(&self) -> Option<i64> {
        match &self.value {
            OptionValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Collected integers, or `None` for other flavors.
    pub fn as_integers(&self) -> Option<&[i64]> {
        match &self.value {
            OptionValue::IntVec(values) => Some(values),
            _ => None,
        }
    }

    /// Float value, or `None` for other flavors.
    pub fn as_float(&self) -> Option<f64> {
        match &self.value {
            OptionValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Collected floats, or `None` for other flavors.
    pub fn as_floats(&self) -> Option<&[f64]> {
        match &self.value {
            OptionValue::FloatVec(values) => Some(values),
            _ => None,
        }
    }

    /// String value, or `None` for other flavors.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            OptionValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Collected strings, or `None` for other flavors.
    pub fn as_strings(&self) -> Option<&[String]> {
        match &self.value {
            OptionValue::StrVec(values) => Some(values),
            _ => None,
        }
    }

    /// Whether this enum member is the group's current selection, or `None`
    /// for other flavors.
    pub fn is_selected(&self) -> Option<bool> {
        match &self.value {
            OptionValue::Enum { group, set_value } => Some(group.selected_index() == *set_value),
            _ => None,
        }
    }

    pub(crate) fn meta_action(&self) -> Option<MetaAction> {
        match &self.value {
            OptionValue::Meta(action) => Some(*action),
            _ => None,
        }
    }

    /// Whether `token` selects this option.
    ///
    /// The help meta-option answers to every spelling in
    /// [`HELP_ALIASES`](codec::HELP_ALIASES); everything else matches its
    /// name exactly.
    pub(crate) fn matches(&self, token: &str) -> bool {
        if let OptionValue::Meta(MetaAction::Help) = self.value {
            return codec::HELP_ALIASES.contains(&token);
        }
        self.name == token
    }

    /// Consumes this option's tokens from the front of `tokens` and returns
    /// how many were eaten.
    ///
    /// `tokens[0]` is the matching name token. Meta-options are handled by
    /// the program's dispatch loop, not here.
    pub(crate) fn consume(&mut self, tokens: &[String]) -> Result<usize> {
        match &mut self.value {
            OptionValue::Meta(_) => Ok(1),
            OptionValue::Flag(value) => {
                *value = true;
                Ok(1)
            }
            OptionValue::Enum { group, set_value } => {
                group.select(*set_value);
                Ok(1)
            }
            OptionValue::Int(value) => {
                let token = require_value(tokens, "Integer", &self.name)?;
                *value = parse_integer(token, &self.name)?;
                Ok(2)
            }
            OptionValue::IntVec(values) => {
                let token = require_value(tokens, "Integer", &self.name)?;
                values.push(parse_integer(token, &self.name)?);
                Ok(2)
            }
            OptionValue::Float(value) => {
                let token = require_value(tokens, "Float", &self.name)?;
                *value = parse_float(token, &self.name)?;
                Ok(2)
            }
            OptionValue::FloatVec(values) => {
                let token = require_value(tokens, "Float", &self.name)?;
                values.push(parse_float(token, &self.name)?);
                Ok(2)
            }
            OptionValue::Str(value) => {
                let token = require_value(tokens, "String", &self.name)?;
                *value = token.to_string();
                Ok(2)
            }
            OptionValue::StrVec(values) => {
                let token = require_value(tokens, "String", &self.name)?;
                values.push(token.to_string());
                Ok(2)
            }
        }
    }

    /// Post-parse check: lower bounds on integers, required values on
    /// string-backed flavors.
    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(check) = &self.min_check {
            if let OptionValue::Int(value) = &self.value {
                if *value < check.min {
                    return Err(ArgumentError::Validation(check.message.clone()));
                }
            }
        }
        if self.required {
            let empty = match &self.value {
                OptionValue::Str(value) => value.is_empty(),
                OptionValue::StrVec(values) => values.is_empty(),
                _ => false,
            };
            if empty {
                return Err(ArgumentError::Validation(self.missing_value_message()));
            }
        }
        Ok(())
    }

    fn missing_value_message(&self) -> String {
        match self.path_kind {
            PathKind::Plain => format!("No value provided for {}.", self.name),
            PathKind::FileRead => format!("No file to read provided for {}.", self.name),
            PathKind::FileWrite => format!("No file to write provided for {}.", self.name),
            PathKind::FolderRead => format!("No folder to read provided for {}.", self.name),
            PathKind::FolderWrite => format!("No folder to write provided for {}.", self.name),
        }
    }

    /// Writes this option's wire record: the envelope followed by the
    /// length-prefixed flavor extras.
    pub fn encode_info<W: Write + ?Sized>(&self, to: &mut W) -> codec::Result<()> {
        let extras = self.encode_extras()?;
        wire::write_string(to, &self.name)?;
        wire::write_string(to, &self.summary)?;
        wire::write_string(to, &self.description)?;
        wire::write_string(to, &self.usage)?;
        wire::write_bool(to, self.is_public)?;
        wire::write_string(to, self.main_flavor())?;
        wire::write_string(to, self.sub_flavor())?;
        wire::write_u64(to, extras.len() as u64)?;
        to.write_all(&extras)?;
        Ok(())
    }

    fn encode_extras(&self) -> codec::Result<Vec<u8>> {
        let mut extras = Vec::new();
        match &self.value {
            OptionValue::Meta(_)
            | OptionValue::Flag(_)
            | OptionValue::IntVec(_)
            | OptionValue::FloatVec(_) => {}
            OptionValue::Enum { group, set_value } => {
                wire::write_string(&mut extras, &group.class_name())?;
                wire::write_bool(&mut extras, *set_value == 0)?;
            }
            OptionValue::Int(value) => wire::write_i64(&mut extras, *value)?,
            OptionValue::Float(value) => wire::write_f64(&mut extras, *value)?,
            OptionValue::Str(value) => {
                wire::write_string(&mut extras, value)?;
                if matches!(self.path_kind, PathKind::FileRead | PathKind::FileWrite) {
                    write_extension_list(&mut extras, &self.extensions)?;
                }
            }
            OptionValue::StrVec(_) => {
                if matches!(self.path_kind, PathKind::FileRead | PathKind::FileWrite) {
                    write_extension_list(&mut extras, &self.extensions)?;
                }
            }
        }
        Ok(extras)
    }
}

fn write_extension_list<W: Write>(to: &mut W, extensions: &[String]) -> codec::Result<()> {
    wire::write_u64(to, extensions.len() as u64)?;
    for extension in extensions {
        wire::write_string(to, extension)?;
    }
    Ok(())
}

fn require_value<'t>(tokens: &'t [String], kind: &'static str, name: &str) -> Result<&'t str> {
    match tokens.get(1) {
        Some(token) => Ok(token.as_str()),
        None => Err(ArgumentError::MissingValue {
            kind,
            name: name.to_string(),
        }),
    }
}

fn parse_integer(token: &str, name: &str) -> Result<i64> {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    let literal_ok = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    if !literal_ok {
        return Err(malformed("integer", token, name));
    }
    token
        .parse::<i64>()
        .map_err(|_| malformed("integer", token, name))
}

fn parse_float(token: &str, name: &str) -> Result<f64> {
    if !float_literal_ok(token) {
        return Err(malformed("float", token, name));
    }
    token
        .parse::<f64>()
        .map_err(|_| malformed("float", token, name))
}

/// Walks the accepted float shape: optional sign, digit run, optional
/// fraction, optional exponent, nothing left over.
fn float_literal_ok(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut at = 0;
    let mut saw_digit = false;
    if at < bytes.len() && (bytes[at] == b'+' || bytes[at] == b'-') {
        at += 1;
    }
    while at < bytes.len() && bytes[at].is_ascii_digit() {
        at += 1;
        saw_digit = true;
    }
    if at < bytes.len() && bytes[at] == b'.' {
        at += 1;
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
            saw_digit = true;
        }
    }
    if at < bytes.len() && (bytes[at] == b'e' || bytes[at] == b'E') {
        at += 1;
        if at < bytes.len() && (bytes[at] == b'+' || bytes[at] == b'-') {
            at += 1;
        }
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
    }
    saw_digit && at == bytes.len()
}

fn malformed(kind: &'static str, token: &str, name: &str) -> ArgumentError {
    ArgumentError::MalformedValue {
        kind,
        token: token.to_string(),
        name: name.to_string(),
    }
}
