//! Named collections of programs behind one executable.
//!
//! A [`ProgramSet`] maps sub-program names to factory functions. The first
//! argument token picks the sub-program (or one of the reserved set-level
//! flags); everything after it goes to that program's own parse. Programs
//! are built fresh per dispatch, so a set can be dispatched repeatedly.

use std::collections::BTreeMap;
use std::io::{self, Write};

use argwire_codec as codec;
use argwire_codec::io as wire;

use crate::error::{ArgumentError, Result};
use crate::program::Program;

/// Builds a fresh instance of one sub-program.
pub type ProgramFactory = fn() -> Program;

/// What a set-level dispatch produced.
#[derive(Debug)]
pub enum SetOutcome {
    /// A sub-program parsed its arguments; check its flags before running.
    Program(Program),
    /// A reserved set-level flag was answered (help, version or dump).
    Handled,
    /// Dispatch failed; diagnostics were written to the error sink.
    Failed,
}

/// A named family of sub-programs selectable by their first argument.
///
/// # Examples
///
/// ```
/// use argwire_core::{Program, ProgramSet, SetOutcome};
///
/// fn greet() -> Program {
///     Program::builder("greet", "Says hello.").build()
/// }
///
/// let set = ProgramSet::new("toolbox", "Assorted utilities.")
///     .with_version("toolbox 0.1.0\n")
///     .with_program("greet", greet);
///
/// let args = vec!["greet".to_string()];
/// match set.dispatch(&args) {
///     SetOutcome::Program(program) => assert!(program.should_run()),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug)]
pub struct ProgramSet {
    /// Set name, first line of help output.
    pub name: String,
    /// One-line summary, second line of help output.
    pub summary: String,
    /// Version text printed verbatim by `--version`.
    pub version: String,
    programs: BTreeMap<String, ProgramFactory>,
}

impl ProgramSet {
    /// Creates an empty set with the given name and summary.
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        ProgramSet {
            name: name.into(),
            summary: summary.into(),
            version: String::new(),
            programs: BTreeMap::new(),
        }
    }

    /// Sets the version text printed by `--version`.
    pub fn with_version(mut self, text: impl Into<String>) -> Self {
        self.version = text.into();
        self
    }

    /// Registers a sub-program under `name`. Re-registering a name replaces
    /// the earlier factory.
    pub fn with_program(mut self, name: impl Into<String>, factory: ProgramFactory) -> Self {
        self.programs.insert(name.into(), factory);
        self
    }

    /// Sub-program names in sorted order.
    pub fn program_names(&self) -> impl Iterator<Item = &str> {
        self.programs.keys().map(String::as_str)
    }

    /// Dispatches `args`, writing to stdout and stderr.
    pub fn dispatch(&self, args: &[String]) -> SetOutcome {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.dispatch_with(args, &mut stdout.lock(), &mut stderr.lock())
    }

    /// Dispatches `args` with explicit output and error sinks.
    ///
    /// The first token is tried against the reserved set-level flags, then
    /// looked up as a sub-program name. Lookup failures write the specific
    /// diagnostic and a closing `Problem getting routine to run.` line; a
    /// sub-program that fails its own parse gets a closing
    /// `Problem parsing program arguments.` line instead.
    pub fn dispatch_with(
        &self,
        args: &[String],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> SetOutcome {
        match self.try_dispatch(args, out, err) {
            Ok(outcome) => outcome,
            Err(problem) => {
                let _ = writeln!(err, "{problem}");
                let _ = writeln!(err, "Problem getting routine to run.");
                SetOutcome::Failed
            }
        }
    }

    fn try_dispatch(
        &self,
        args: &[String],
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<SetOutcome> {
        let Some(first) = args.first() else {
            return Err(ArgumentError::Validation("No arguments provided.".to_string()));
        };
        if codec::HELP_ALIASES.contains(&first.as_str()) {
            self.print_help(out)?;
            return Ok(SetOutcome::Handled);
        }
        if first == codec::VERSION_FLAG {
            self.print_version(out)?;
            return Ok(SetOutcome::Handled);
        }
        if first == codec::ARGDUMP_FLAG {
            self.write_descriptor(out)?;
            return Ok(SetOutcome::Handled);
        }
        let Some(factory) = self.programs.get(first.as_str()) else {
            return Err(ArgumentError::Validation(format!(
                "{first} is not a known program."
            )));
        };
        let mut program = factory();
        program.parse_with(&args[1..], out, err);
        if program.was_error() {
            let _ = writeln!(err, "Problem parsing program arguments.");
            return Ok(SetOutcome::Failed);
        }
        Ok(SetOutcome::Program(program))
    }

    /// Writes the set help: name, summary, a blank line, then each
    /// sub-program's name and summary in sorted order.
    pub fn print_help(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.name)?;
        writeln!(out, "{}", self.summary)?;
        writeln!(out)?;
        for (name, factory) in &self.programs {
            let program = factory();
            writeln!(out, "{name}")?;
            writeln!(out, "{}", program.summary)?;
        }
        Ok(())
    }

    /// Writes the version text verbatim, no trailing newline added.
    pub fn print_version(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.version.as_bytes())
    }

    /// Writes the set's binary descriptor: name, summary, then the count
    /// and `(name, summary)` pair of every sub-program in sorted order.
    pub fn write_descriptor(&self, out: &mut dyn Write) -> codec::Result<()> {
        wire::write_string(out, &self.name)?;
        wire::write_string(out, &self.summary)?;
        wire::write_u64(out, self.programs.len() as u64)?;
        for (name, factory) in &self.programs {
            let program = factory();
            wire::write_string(out, name)?;
            wire::write_string(out, &program.summary)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::ArgOption;
    use argwire_codec::ProgramSetDescriptor;

    fn greet() -> Program {
        Program::builder("greet", "Says hello.")
            .option(
                ArgOption::string("--name", "")
                    .required()
                    .with_summary("Name to greet."),
            )
            .build()
    }

    fn stats() -> Program {
        Program::builder("stats", "Counts things.").build()
    }

    fn toolbox() -> ProgramSet {
        ProgramSet::new("toolbox", "Assorted utilities.")
            .with_version("toolbox 0.1.0\n")
            .with_program("stats", stats)
            .with_program("greet", greet)
    }

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    fn dispatch_captured(set: &ProgramSet, parts: &[&str]) -> (SetOutcome, String, String) {
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let outcome = set.dispatch_with(&args(parts), &mut out, &mut err);
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_no_arguments_is_an_error() {
        let set = toolbox();
        let (outcome, out, err) = dispatch_captured(&set, &[]);
        assert!(matches!(outcome, SetOutcome::Failed));
        assert!(out.is_empty());
        assert_eq!(
            err,
            "No arguments provided.\nProblem getting routine to run.\n"
        );
    }

    #[test]
    fn test_unknown_program_names_the_token() {
        let set = toolbox();
        let (outcome, _, err) = dispatch_captured(&set, &["zzz"]);
        assert!(matches!(outcome, SetOutcome::Failed));
        assert_eq!(
            err,
            "zzz is not a known program.\nProblem getting routine to run.\n"
        );
    }

    #[test]
    fn test_dry_run_flag_is_not_special_at_set_level() {
        let set = toolbox();
        let (outcome, _, err) = dispatch_captured(&set, &["--help_id10t"]);
        assert!(matches!(outcome, SetOutcome::Failed));
        assert!(err.starts_with("--help_id10t is not a known program.\n"));
    }

    #[test]
    fn test_dispatch_hands_remaining_tokens_to_subprogram() {
        let set = toolbox();
        let (outcome, out, err) = dispatch_captured(&set, &["greet", "--name", "alice"]);
        assert!(out.is_empty());
        assert!(err.is_empty());
        match outcome {
            SetOutcome::Program(program) => {
                assert_eq!(program.name, "greet");
                assert!(program.should_run());
                assert_eq!(program.string_value("--name"), Some("alice"));
            }
            other => panic!("expected a program, got {other:?}"),
        }
    }

    #[test]
    fn test_subprogram_parse_failure_adds_wrapper_line() {
        let set = toolbox();
        let (outcome, _, err) = dispatch_captured(&set, &["greet", "--wat"]);
        assert!(matches!(outcome, SetOutcome::Failed));
        assert_eq!(
            err,
            "Unknown command line argument: --wat\nProblem parsing program arguments.\n"
        );
    }

    #[test]
    fn test_subprogram_validation_failure_reported() {
        let set = toolbox();
        let (outcome, _, err) = dispatch_captured(&set, &["greet"]);
        assert!(matches!(outcome, SetOutcome::Failed));
        assert_eq!(
            err,
            "No value provided for --name.\nProblem parsing program arguments.\n"
        );
    }

    #[test]
    fn test_set_help_lists_programs_sorted() {
        let set = toolbox();
        let (outcome, out, _) = dispatch_captured(&set, &["--help"]);
        assert!(matches!(outcome, SetOutcome::Handled));
        assert_eq!(
            out,
            "toolbox\nAssorted utilities.\n\ngreet\nSays hello.\nstats\nCounts things.\n"
        );
    }

    #[test]
    fn test_set_help_aliases() {
        let set = toolbox();
        for alias in ["-h", "/?"] {
            let (outcome, out, _) = dispatch_captured(&set, &[alias]);
            assert!(matches!(outcome, SetOutcome::Handled));
            assert!(out.starts_with("toolbox\n"));
        }
    }

    #[test]
    fn test_set_version_prints_verbatim() {
        let set = toolbox();
        let (outcome, out, _) = dispatch_captured(&set, &["--version"]);
        assert!(matches!(outcome, SetOutcome::Handled));
        assert_eq!(out, "toolbox 0.1.0\n");
    }

    #[test]
    fn test_set_descriptor_lists_programs_sorted() {
        let set = toolbox();
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let outcome = set.dispatch_with(&args(&["--help_argdump"]), &mut out, &mut err);
        assert!(matches!(outcome, SetOutcome::Handled));
        assert!(err.is_empty());

        let record = ProgramSetDescriptor::decode(&mut out.as_slice()).unwrap();
        assert_eq!(record.name, "toolbox");
        assert_eq!(record.summary, "Assorted utilities.");
        let names: Vec<&str> = record.programs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["greet", "stats"]);
        assert_eq!(record.programs[0].summary, "Says hello.");
        assert!(record.contains("stats"));
        assert!(!record.contains("zzz"));
    }

    #[test]
    fn test_subprogram_descriptor_through_set() {
        let set = toolbox();
        let mut out: Vec<u8> = Vec::new();
        let mut err: Vec<u8> = Vec::new();
        let outcome = set.dispatch_with(&args(&["greet", "--help_argdump"]), &mut out, &mut err);
        assert!(err.is_empty());
        match outcome {
            SetOutcome::Program(program) => assert!(!program.should_run()),
            other => panic!("expected a program, got {other:?}"),
        }
        let record = argwire_codec::ProgramDescriptor::decode(&mut out.as_slice()).unwrap();
        assert_eq!(record.name, "greet");
        assert_eq!(record.options.len(), 5);
    }
}
