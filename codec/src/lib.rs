//! Wire format primitives and descriptor records for argument introspection.
//!
//! A subject program invoked with the reserved dump flag writes a binary
//! description of its command-line interface to stdout. This crate owns both
//! halves of that format:
//!
//! - [`io`] — length-prefixed big-endian field primitives shared by encoder
//!   and decoder.
//! - [`OptionDescriptor`], [`ProgramDescriptor`], [`ProgramSetDescriptor`] —
//!   plain records decoded from a descriptor stream.
//! - [`interpret_extras`] and [`ExtrasView`] — the flavor registry that
//!   turns each option's opaque extras payload into typed data, degrading to
//!   [`ExtrasView::Unknown`] for flavor keys outside the table.
//!
//! The reserved flag literals recognized by every subject live here too, so
//! the subject-side engine and the consumer-side bridge cannot drift apart.
//!
//! # Example
//!
//! ```
//! use argwire_codec::{OptionDescriptor, interpret_extras, io};
//!
//! // A minimal flag option, as a subject would emit it.
//! let mut bytes = Vec::new();
//! for field in ["--bye", "Say goodbye.", "", "--bye"] {
//!     io::write_string(&mut bytes, field).unwrap();
//! }
//! io::write_bool(&mut bytes, true).unwrap();
//! io::write_string(&mut bytes, "flag").unwrap();
//! io::write_string(&mut bytes, "").unwrap();
//! io::write_u64(&mut bytes, 0).unwrap();
//!
//! let opt = OptionDescriptor::decode(&mut bytes.as_slice()).unwrap();
//! let view = interpret_extras(&opt.main_flavor, &opt.sub_flavor, &opt.extras).unwrap();
//! assert_eq!(view, argwire_codec::ExtrasView::Flag);
//! ```

mod descriptor;
mod error;
mod flavor;
pub mod io;

pub use descriptor::{OptionDescriptor, ProgramDescriptor, ProgramSetDescriptor, ProgramSummary};
pub use error::{CodecError, Result};
pub use flavor::{
    ExtrasView, KNOWN_FLAVORS, MAIN_ENUM, MAIN_FLAG, MAIN_FLOAT, MAIN_FLOAT_VEC, MAIN_INT,
    MAIN_INT_VEC, MAIN_META, MAIN_STRING, MAIN_STRING_VEC, SUB_FILE_READ, SUB_FILE_WRITE,
    SUB_FOLDER_READ, SUB_FOLDER_WRITE, SUB_NONE, interpret_extras, is_known_flavor,
};

/// Primary help flag, with [`HELP_ALIASES`] accepted as equivalents.
pub const HELP_FLAG: &str = "--help";

/// All spellings that trigger help output.
pub const HELP_ALIASES: &[&str] = &["--help", "-h", "/?"];

/// Reserved flag that prints version text instead of running.
pub const VERSION_FLAG: &str = "--version";

/// Reserved flag that makes a subject dump its descriptor to stdout.
pub const ARGDUMP_FLAG: &str = "--help_argdump";

/// Reserved flag that parses and validates without running.
pub const DRY_RUN_FLAG: &str = "--help_id10t";
