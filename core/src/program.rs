//! A runnable program assembled from options.
//!
//! [`Program`] owns the option list and drives the parse loop: scan options
//! in registration order, let the first match eat its tokens, repeat until
//! the argument vector is empty, then run the post-parse checks. Any failure
//! is caught at this boundary; the program records the error, writes one
//! diagnostic line to its error sink and refuses to run, so a `main` can
//! always finish with [`exit_code`](Program::exit_code).
//!
//! # Examples
//!
//! ```
//! use argwire_core::{ArgOption, Program};
//!
//! let mut program = Program::builder("greeter", "Says hello.")
//!     .version("greeter 0.1.0\n")
//!     .option(ArgOption::flag("--bye").with_summary("Say goodbye at the end."))
//!     .option(ArgOption::string("--name", "").required().with_summary("Name to greet."))
//!     .build();
//!
//! let args: Vec<String> = ["--name", "alice"].iter().map(|s| s.to_string()).collect();
//! program.parse(&args);
//! assert!(program.should_run());
//! assert_eq!(program.string_value("--name"), Some("alice"));
//! assert_eq!(program.flag_value("--bye"), Some(false));
//! ```

use std::io::{self, Write};

use argwire_codec as codec;
use argwire_codec::io as wire;

use crate::error::{ArgumentError, Result};
use crate::option::{ArgOption, MetaAction};

/// Whole-program validation hook, run after every option's own checks.
pub type AggregateCheck = fn(&Program) -> std::result::Result<(), String>;

/// A program with a named option list and the state of its last parse.
///
/// Built through [`Program::builder`], which registers the four reserved
/// meta-options (`--help`, `--version`, `--help_argdump`, `--help_id10t`)
/// ahead of everything the caller adds.
#[derive(Debug)]
pub struct Program {
    /// Program name, first line of help output.
    pub name: String,
    /// One-line summary, second line of help output.
    pub summary: String,
    /// Longform description carried in the descriptor.
    pub description: String,
    /// Example invocation carried in the descriptor.
    pub usage: String,
    /// Version text printed verbatim by `--version`.
    pub version: String,
    options: Vec<ArgOption>,
    need_run: bool,
    need_validate: bool,
    was_error: bool,
    check: Option<AggregateCheck>,
}

impl Program {
    /// Starts building a program with the given name and summary.
    pub fn builder(name: impl Into<String>, summary: impl Into<String>) -> ProgramBuilder {
        ProgramBuilder {
            name: name.into(),
            summary: summary.into(),
            description: String::new(),
            usage: String::new(),
            version: String::new(),
            options: Vec::new(),
            check: None,
        }
    }

    /// Parses `args`, writing help or descriptor output to stdout and
    /// diagnostics to stderr.
    pub fn parse(&mut self, args: &[String]) {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.parse_with(args, &mut stdout.lock(), &mut stderr.lock());
    }

    /// Parses `args` with explicit output and error sinks.
    ///
    /// Never returns an error: any parse or validation failure is recorded
    /// on the program (`was_error` set, run suppressed) and reported as one
    /// line on `err`.
    pub fn parse_with(&mut self, args: &[String], out: &mut dyn Write, err: &mut dyn Write) {
        if let Err(problem) = self.dispatch(args, out) {
            self.was_error = true;
            self.need_run = false;
            let _ = writeln!(err, "{problem}");
        }
    }

    fn dispatch(&mut self, args: &[String], out: &mut dyn Write) -> Result<()> {
        let mut cursor = 0;
        while cursor < args.len() {
            let rest = &args[cursor..];
            let Some(index) = self.options.iter().position(|opt| opt.matches(&rest[0])) else {
                return Err(ArgumentError::UnknownArgument(rest[0].clone()));
            };
            cursor += match self.options[index].meta_action() {
                Some(action) => self.handle_meta(action, rest.len(), out)?,
                None => self.options[index].consume(rest)?,
            };
        }
        if self.need_validate {
            for option in &self.options {
                option.validate()?;
            }
            if let Some(check) = self.check {
                check(self).map_err(ArgumentError::Validation)?;
            }
        }
        Ok(())
    }

    fn handle_meta(
        &mut self,
        action: MetaAction,
        remaining: usize,
        out: &mut dyn Write,
    ) -> Result<usize> {
        match action {
            MetaAction::Help => {
                self.need_run = false;
                self.need_validate = false;
                self.print_help(out)?;
                Ok(remaining)
            }
            MetaAction::Version => {
                self.need_run = false;
                self.need_validate = false;
                self.print_version(out)?;
                Ok(remaining)
            }
            MetaAction::ArgDump => {
                self.need_run = false;
                self.need_validate = false;
                self.write_descriptor(out)?;
                Ok(remaining)
            }
            MetaAction::DryRun => {
                self.need_run = false;
                Ok(1)
            }
        }
    }

    /// Writes the help text: name, summary, then one entry per public
    /// option with its usage line when present.
    pub fn print_help(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.name)?;
        writeln!(out, "{}", self.summary)?;
        for option in &self.options {
            if !option.is_public {
                continue;
            }
            writeln!(out, "  {} : {}", option.name, option.summary)?;
            if !option.usage.is_empty() {
                writeln!(out, "    {}", option.usage)?;
            }
        }
        Ok(())
    }

    /// Writes the version text verbatim, no trailing newline added.
    pub fn print_version(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.version.as_bytes())
    }

    /// Writes this program's binary descriptor: the envelope strings, the
    /// option count, then every option's record in registration order.
    pub fn write_descriptor(&self, out: &mut dyn Write) -> codec::Result<()> {
        wire::write_string(out, &self.name)?;
        wire::write_string(out, &self.summary)?;
        wire::write_string(out, &self.description)?;
        wire::write_string(out, &self.usage)?;
        wire::write_u64(out, self.options.len() as u64)?;
        for option in &self.options {
            option.encode_info(out)?;
        }
        Ok(())
    }

    /// Whether the program body should execute after the last parse.
    pub fn should_run(&self) -> bool {
        self.need_run
    }

    /// Whether the last parse failed.
    pub fn was_error(&self) -> bool {
        self.was_error
    }

    /// Process exit code reflecting the last parse: 1 on error, else 0.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.was_error)
    }

    /// All options in registration order, reserved meta-options first.
    pub fn options(&self) -> &[ArgOption] {
        &self.options
    }

    /// Finds an option by name. With duplicate names the first registered
    /// one wins, mirroring parse dispatch.
    pub fn option(&self, name: &str) -> Option<&ArgOption> {
        self.options.iter().find(|opt| opt.name == name)
    }

    /// Flag state by option name.
    pub fn flag_value(&self, name: &str) -> Option<bool> {
        self.option(name)?.as_flag()
    }

    /// Integer value by option name.
    pub fn integer_value(&self, name: &str) -> Option<i64> {
        self.option(name)?.as_integer()
    }

    /// Collected integers by option name.
    pub fn integer_values(&self, name: &str) -> Option<&[i64]> {
        self.option(name)?.as_integers()
    }

    /// Float value by option name.
    pub fn float_value(&self, name: &str) -> Option<f64> {
        self.option(name)?.as_float()
    }

    /// Collected floats by option name.
    pub fn float_values(&self, name: &str) -> Option<&[f64]> {
        self.option(name)?.as_floats()
    }

    /// String value by option name.
    pub fn string_value(&self, name: &str) -> Option<&str> {
        self.option(name)?.as_str()
    }

    /// Collected strings by option name.
    pub fn string_values(&self, name: &str) -> Option<&[String]> {
        self.option(name)?.as_strings()
    }

    /// Whether the named enum member is its group's current selection.
    pub fn is_selected(&self, name: &str) -> Option<bool> {
        self.option(name)?.is_selected()
    }
}

/// Assembles a [`Program`], reserved meta-options first.
#[derive(Debug)]
pub struct ProgramBuilder {
    name: String,
    summary: String,
    description: String,
    usage: String,
    version: String,
    options: Vec<ArgOption>,
    check: Option<AggregateCheck>,
}

impl ProgramBuilder {
    /// Sets the longform description.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Sets the example invocation text.
    pub fn usage(mut self, text: impl Into<String>) -> Self {
        self.usage = text.into();
        self
    }

    /// Sets the version text printed by `--version`.
    pub fn version(mut self, text: impl Into<String>) -> Self {
        self.version = text.into();
        self
    }

    /// Appends a caller-defined option.
    ///
    /// Option names are not checked for uniqueness; parse dispatch and name
    /// lookups always take the first match in registration order.
    pub fn option(mut self, option: ArgOption) -> Self {
        self.options.push(option);
        self
    }

    /// Installs a whole-program check run after per-option validation.
    pub fn check(mut self, check: AggregateCheck) -> Self {
        self.check = Some(check);
        self
    }

    /// Finishes the program: the four reserved meta-options, then every
    /// caller option in the order added.
    pub fn build(self) -> Program {
        let mut options = vec![
            ArgOption::meta_help(),
            ArgOption::meta_version(),
            ArgOption::meta_argdump(),
            ArgOption::meta_dry_run(),
        ];
        options.extend(self.options);
        Program {
            name: self.name,
            summary: self.summary,
            description: self.description,
            usage: self.usage,
            version: self.version,
            options,
            need_run: true,
            need_validate: true,
            was_error: false,
            check: self.check,
        }
    }
}
