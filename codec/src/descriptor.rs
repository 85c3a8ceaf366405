//! Plain descriptor records decoded from an introspection stream.
//!
//! These are the consumer-side view of a subject program: inert data, not
//! live options. The subject's own encoder produces the byte layout; the
//! `decode` constructors here read it back generically, leaving each
//! option's `extras` blob opaque until interpreted through the flavor
//! registry ([`interpret_extras`](crate::interpret_extras)).

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::flavor::{ExtrasView, interpret_extras};
use crate::io::{read_blob, read_bool, read_string, read_u64};

/// Wire record for a single command-line option.
///
/// The envelope fields are flavor-agnostic; `extras` holds the
/// flavor-specific payload exactly as the subject emitted it. Unknown
/// flavor keys keep their bytes here so newer subjects never break older
/// consumers.
///
/// # Examples
///
/// ```
/// use argwire_codec::{OptionDescriptor, io};
///
/// let mut bytes = Vec::new();
/// for field in ["--bye", "Say goodbye.", "", "--bye"] {
///     io::write_string(&mut bytes, field).unwrap();
/// }
/// io::write_bool(&mut bytes, true).unwrap();
/// io::write_string(&mut bytes, "flag").unwrap();
/// io::write_string(&mut bytes, "").unwrap();
/// io::write_u64(&mut bytes, 0).unwrap();
///
/// let opt = OptionDescriptor::decode(&mut bytes.as_slice()).unwrap();
/// assert_eq!(opt.name, "--bye");
/// assert_eq!(opt.main_flavor, "flag");
/// assert!(opt.extras.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Option name as matched on the command line (e.g. `--name`).
    pub name: String,
    /// One-line summary.
    pub summary: String,
    /// Longform description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Example usage text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub usage: String,
    /// Whether the option should appear in rendered documentation.
    pub is_public: bool,
    /// Main flavor code (e.g. `flag`, `int`, `string`).
    pub main_flavor: String,
    /// Sub flavor code (e.g. `fileread`), empty for most flavors.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_flavor: String,
    /// Flavor-specific payload, opaque at the envelope level.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<u8>,
}

impl OptionDescriptor {
    /// Reads one option envelope from the stream.
    pub fn decode<R: Read>(from: &mut R) -> Result<Self> {
        Ok(Self {
            name: read_string(from, "option name")?,
            summary: read_string(from, "option summary")?,
            description: read_string(from, "option description")?,
            usage: read_string(from, "option usage")?,
            is_public: read_bool(from, "option visibility")?,
            main_flavor: read_string(from, "option main flavor")?,
            sub_flavor: read_string(from, "option sub flavor")?,
            extras: read_blob(from, "option extras")?,
        })
    }

    /// Returns the `(main_flavor, sub_flavor)` registry key.
    pub fn flavor_key(&self) -> (&str, &str) {
        (&self.main_flavor, &self.sub_flavor)
    }

    /// Interprets this option's extras through the flavor registry.
    pub fn interpret_extras(&self) -> Result<ExtrasView> {
        interpret_extras(&self.main_flavor, &self.sub_flavor, &self.extras)
    }
}

/// Wire record for a whole subject program.
///
/// Options appear in declaration order, which drives synopsis order in
/// rendered documentation. Parsing on the subject side is name-driven, so
/// the order carries no positional meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDescriptor {
    /// Program name.
    pub name: String,
    /// One-line summary.
    pub summary: String,
    /// Longform description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Example usage text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub usage: String,
    /// Options in declaration order, built-in meta-options included.
    pub options: Vec<OptionDescriptor>,
}

impl ProgramDescriptor {
    /// Reads a full program descriptor from the stream.
    pub fn decode<R: Read>(from: &mut R) -> Result<Self> {
        let name = read_string(from, "program name")?;
        let summary = read_string(from, "program summary")?;
        let description = read_string(from, "program description")?;
        let usage = read_string(from, "program usage")?;
        let count = read_u64(from, "option count")?;
        let mut options = Vec::new();
        for _ in 0..count {
            options.push(OptionDescriptor::decode(from)?);
        }
        Ok(Self {
            name,
            summary,
            description,
            usage,
            options,
        })
    }

    /// Returns the first option with the given name, if any.
    pub fn find_option(&self, name: &str) -> Option<&OptionDescriptor> {
        self.options.iter().find(|opt| opt.name == name)
    }

    /// Iterates over options meant for rendered documentation.
    pub fn public_options(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.options.iter().filter(|opt| opt.is_public)
    }
}

/// Name and summary of one sub-program inside a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSummary {
    /// Sub-program name, usable as the dispatch token.
    pub name: String,
    /// One-line summary.
    pub summary: String,
}

/// Wire record for a named collection of sub-programs.
///
/// Each listed name can be fed back to the subprocess bridge to obtain that
/// sub-program's own [`ProgramDescriptor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSetDescriptor {
    /// Set name.
    pub name: String,
    /// One-line summary.
    pub summary: String,
    /// Sub-programs in the order the subject listed them.
    pub programs: Vec<ProgramSummary>,
}

impl ProgramSetDescriptor {
    /// Reads a program-set descriptor from the stream.
    pub fn decode<R: Read>(from: &mut R) -> Result<Self> {
        let name = read_string(from, "set name")?;
        let summary = read_string(from, "set summary")?;
        let count = read_u64(from, "program count")?;
        let mut programs = Vec::new();
        for _ in 0..count {
            programs.push(ProgramSummary {
                name: read_string(from, "sub-program name")?,
                summary: read_string(from, "sub-program summary")?,
            });
        }
        Ok(Self {
            name,
            summary,
            programs,
        })
    }

    /// Returns true if the set lists a sub-program with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.programs.iter().any(|prog| prog.name == name)
    }
}
