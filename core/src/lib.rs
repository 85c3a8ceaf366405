//! Subject-side model for self-describing command-line programs.
//!
//! This crate defines the live types a program builds its command line from:
//!
//! - [`ArgOption`] — a flavor-polymorphic option: flags, enum members,
//!   integers, floats, strings, their repeatable vector forms, and
//!   file/folder path variants.
//! - [`SelectionGroup`] — the shared cell behind a family of
//!   mutually-exclusive enum options.
//! - [`Program`] — an option list plus the parse/validate engine and the
//!   reserved meta-options (`--help`, `--version`, `--help_argdump`,
//!   `--help_id10t`).
//! - [`ProgramSet`] — a named family of programs dispatched by their first
//!   argument token.
//!
//! Every program built here can describe itself: `--help_argdump` emits the
//! binary descriptor that `argwire-codec` decodes on the consumer side, and
//! `--help_id10t` checks an argument vector without running anything.
//!
//! # Example
//!
//! ```
//! use argwire_core::{ArgOption, Program, SelectionGroup};
//!
//! let mode = SelectionGroup::new("mode");
//! let mut program = Program::builder("align", "Aligns sequences.")
//!     .version("align 0.1.0\n")
//!     .option(ArgOption::enum_member("--local", &mode).with_summary("Local alignment."))
//!     .option(ArgOption::enum_member("--global", &mode).with_summary("Global alignment."))
//!     .option(ArgOption::file_read("--in").required().with_extensions([".fa"]))
//!     .option(ArgOption::thread_count())
//!     .build();
//!
//! let args: Vec<String> = ["--global", "--in", "reads.fa", "--thread", "4"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! program.parse(&args);
//! assert!(program.should_run());
//! assert_eq!(program.is_selected("--global"), Some(true));
//! assert_eq!(program.integer_value("--thread"), Some(4));
//! ```

mod error;
mod group;
mod option;
mod program;
mod set;

pub use argwire_codec::{ARGDUMP_FLAG, DRY_RUN_FLAG, HELP_ALIASES, HELP_FLAG, VERSION_FLAG};
pub use error::{ArgumentError, Result};
pub use group::SelectionGroup;
pub use option::ArgOption;
pub use program::{AggregateCheck, Program, ProgramBuilder};
pub use set::{ProgramFactory, ProgramSet, SetOutcome};
