//! Subprocess bridge and documentation renderers for self-describing
//! programs.
//!
//! Programs built on `argwire-core` answer a reserved `--help_argdump` flag
//! with a binary descriptor of every option they accept, and a reserved
//! `--help_id10t` flag that validates arguments without running. This crate
//! is the consumer side of that contract: it launches such a program, reads
//! its descriptor, checks candidate argument lists, and renders man page or
//! HTML documentation from what the program reported about itself.
//!
//! # Main entry points
//!
//! - [`Subject`] — a program reachable through its command line; fetch
//!   descriptors, dry-run argument lists, or run it for real.
//! - [`man_program`] / [`man_program_set`] — roff man page rendering.
//! - [`html_program`] / [`html_program_set`] — HTML page rendering.
//!
//! # Example
//!
//! ```no_run
//! use argwire_bridge::{Subject, man_program};
//!
//! # fn main() -> Result<(), argwire_bridge::BridgeError> {
//! let subject = Subject::new("/usr/local/bin/align");
//! let descriptor = subject.fetch_program()?;
//! println!("{}", man_program("", &descriptor));
//!
//! let args = vec!["--thread".to_string(), "4".to_string()];
//! let report = subject.check_arguments(None, &args)?;
//! if !report.accepted {
//!     eprintln!("{}", report.stderr);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod html;
mod probe;
mod render;

pub use error::{BridgeError, Result};
pub use html::{html_program, html_program_set, html_sanitize};
pub use probe::{CheckReport, SUBJECT_TIMEOUT_MS, Subject};
pub use render::{man_program, man_program_set, man_sanitize};
