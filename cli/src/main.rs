use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use argwire_bridge::{
    BridgeError, Subject, html_program, html_program_set, man_program, man_program_set,
};
use argwire_codec::{ProgramDescriptor, ProgramSetDescriptor};

/// Output format for the `describe` subcommand.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum DescribeFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "argwire")]
#[command(about = "Inspect, document, and dry-run self-describing programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a program's descriptor and print it as JSON or YAML.
    Describe(DescribeArgs),
    /// Render man pages for a program, a set member, or a whole set.
    Man(ManArgs),
    /// Render an HTML page for a program, a set member, or a whole set.
    Html(HtmlArgs),
    /// Check an argument list against a program without running it.
    Check(CheckArgs),
    /// Run a program, treating stderr output or a nonzero exit as failure.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct DescribeArgs {
    /// Subject command line: the executable plus any fixed leading arguments.
    command: Vec<String>,
    /// Describe this member of a program set.
    #[arg(long)]
    member: Option<String>,
    /// Describe the set itself: its name, summary, and member list.
    #[arg(long)]
    set: bool,
    /// Decode a saved descriptor dump instead of probing a live subject.
    #[arg(long)]
    from_file: Option<PathBuf>,
    /// Time limit for the subject's answer, in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: DescribeFormat,
}

#[derive(Debug, Args)]
struct ManArgs {
    /// Subject command line: the executable plus any fixed leading arguments.
    #[arg(required = true)]
    command: Vec<String>,
    /// Render the page for this member of a program set.
    #[arg(long)]
    member: Option<String>,
    /// Render the whole set: an index page plus one page per member.
    #[arg(long)]
    set: bool,
    /// Output directory for the set's pages (required with --set).
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// File name prefix for the set's pages (required with --set).
    #[arg(long)]
    prefix: Option<String>,
    /// Time limit for the subject's answer, in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Debug, Args)]
struct HtmlArgs {
    /// Subject command line: the executable plus any fixed leading arguments.
    #[arg(required = true)]
    command: Vec<String>,
    /// Render the page for this member of a program set.
    #[arg(long)]
    member: Option<String>,
    /// Render one page covering the whole set.
    #[arg(long)]
    set: bool,
    /// Time limit for the subject's answer, in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Subject command line: the executable plus any fixed leading arguments.
    #[arg(required = true)]
    command: Vec<String>,
    /// Check against this member of a program set.
    #[arg(long)]
    member: Option<String>,
    /// Time limit for the subject's answer, in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Candidate arguments, given after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Subject command line: the executable plus any fixed leading arguments.
    #[arg(required = true)]
    command: Vec<String>,
    /// Run this member of a program set.
    #[arg(long)]
    member: Option<String>,
    /// Program arguments, given after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Describe(args) => run_describe(args),
        Command::Man(args) => run_man(args),
        Command::Html(args) => run_html(args),
        Command::Check(args) => run_check(args),
        Command::Run(args) => run_run(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_describe(args: DescribeArgs) -> Result<(), String> {
    if args.set && args.member.is_some() {
        return Err("--set and --member are mutually exclusive".to_string());
    }

    if let Some(path) = &args.from_file {
        if !args.command.is_empty() {
            return Err("Give either a subject command or --from-file, not both".to_string());
        }
        if args.member.is_some() {
            return Err("--member needs a live subject to ask".to_string());
        }
        let raw = fs::read(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
        let mut cursor = raw.as_slice();
        if args.set {
            let set = ProgramSetDescriptor::decode(&mut cursor).map_err(|e| e.to_string())?;
            print_serialized(&set, args.format)
        } else {
            let descriptor = ProgramDescriptor::decode(&mut cursor).map_err(|e| e.to_string())?;
            print_serialized(&descriptor, args.format)
        }
    } else {
        let subject = build_subject(args.command, args.timeout_ms)?;
        if args.set {
            let set = subject.fetch_program_set().map_err(bridge_error_detail)?;
            print_serialized(&set, args.format)
        } else {
            let descriptor = match &args.member {
                Some(member) => subject.fetch_member(member),
                None => subject.fetch_program(),
            }
            .map_err(bridge_error_detail)?;
            print_serialized(&descriptor, args.format)
        }
    }
}

fn run_man(args: ManArgs) -> Result<(), String> {
    let subject = build_subject(args.command, args.timeout_ms)?;

    if args.set {
        let out_dir = args
            .out_dir
            .ok_or_else(|| "--set needs --out-dir for the generated pages".to_string())?;
        let prefix = args
            .prefix
            .ok_or_else(|| "--set needs --prefix for the page file names".to_string())?;
        let set = subject.fetch_program_set().map_err(bridge_error_detail)?;
        fs::create_dir_all(&out_dir).map_err(|err| {
            format!(
                "Failed to create output directory '{}': {err}",
                out_dir.display()
            )
        })?;

        let index_path = out_dir.join(format!("{prefix}.1"));
        fs::write(&index_path, man_program_set(&set))
            .map_err(|err| format!("Failed to write '{}': {err}", index_path.display()))?;
        let mut written = 1usize;
        for member in &set.programs {
            let descriptor = subject
                .fetch_member(&member.name)
                .map_err(bridge_error_detail)?;
            let path = out_dir.join(format!("{prefix}-{}.1", member.name));
            fs::write(&path, man_program(&set.name, &descriptor))
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            written += 1;
        }
        println!("Wrote {written} man page(s) to '{}'.", out_dir.display());
        Ok(())
    } else if let Some(member) = &args.member {
        // The member page carries the set's name in its title, so both
        // descriptors are needed.
        let set = subject.fetch_program_set().map_err(bridge_error_detail)?;
        let descriptor = subject.fetch_member(member).map_err(bridge_error_detail)?;
        print!("{}", man_program(&set.name, &descriptor));
        Ok(())
    } else {
        let descriptor = subject.fetch_program().map_err(bridge_error_detail)?;
        print!("{}", man_program("", &descriptor));
        Ok(())
    }
}

fn run_html(args: HtmlArgs) -> Result<(), String> {
    let subject = build_subject(args.command, args.timeout_ms)?;

    if args.set {
        let set = subject.fetch_program_set().map_err(bridge_error_detail)?;
        let mut members = Vec::with_capacity(set.programs.len());
        for member in &set.programs {
            members.push(
                subject
                    .fetch_member(&member.name)
                    .map_err(bridge_error_detail)?,
            );
        }
        print!("{}", html_program_set(&set, &members));
    } else if let Some(member) = &args.member {
        let descriptor = subject.fetch_member(member).map_err(bridge_error_detail)?;
        print!("{}", html_program(&descriptor));
    } else {
        let descriptor = subject.fetch_program().map_err(bridge_error_detail)?;
        print!("{}", html_program(&descriptor));
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let subject = build_subject(args.command, args.timeout_ms)?;
    let report = subject
        .check_arguments(args.member.as_deref(), &args.args)
        .map_err(bridge_error_detail)?;
    if report.accepted {
        println!("Arguments accepted.");
        Ok(())
    } else {
        if !report.stderr.is_empty() {
            eprint!("{}", report.stderr);
        }
        Err("Arguments rejected.".to_string())
    }
}

fn run_run(args: RunArgs) -> Result<(), String> {
    let subject = build_subject(args.command, None)?;
    subject
        .run(args.member.as_deref(), &args.args)
        .map_err(bridge_error_detail)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_subject(command: Vec<String>, timeout_ms: Option<u64>) -> Result<Subject, String> {
    let mut subject = Subject::from_command(command).map_err(|e| e.to_string())?;
    if let Some(ms) = timeout_ms {
        subject = subject.with_timeout(Duration::from_millis(ms));
    }
    Ok(subject)
}

/// Flattens a bridge error to one message, appending whatever the subject
/// said on stderr when there is anything to show.
fn bridge_error_detail(err: BridgeError) -> String {
    match &err {
        BridgeError::ArgumentInfo { stderr, .. }
        | BridgeError::SetInfo { stderr, .. }
        | BridgeError::RunFailed { stderr, .. }
            if !stderr.trim().is_empty() =>
        {
            format!("{err}\n{}", stderr.trim_end())
        }
        _ => err.to_string(),
    }
}

fn print_serialized<T: serde::Serialize>(value: &T, format: DescribeFormat) -> Result<(), String> {
    match format {
        DescribeFormat::Json => {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{json}");
        }
        DescribeFormat::Yaml => {
            let yaml = serde_yaml::to_string(value)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            print!("{yaml}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{BridgeError, bridge_error_detail, build_subject};

    #[test]
    fn test_bridge_error_detail_appends_subject_stderr() {
        let err = BridgeError::ArgumentInfo {
            exit_code: Some(1),
            stderr: "zzz is not a known program.\n".to_string(),
        };
        assert_eq!(
            bridge_error_detail(err),
            "Problem getting argument info.\nzzz is not a known program."
        );
    }

    #[test]
    fn test_bridge_error_detail_skips_empty_stderr() {
        let err = BridgeError::RunFailed {
            exit_code: Some(3),
            stderr: String::new(),
        };
        assert_eq!(bridge_error_detail(err), "Problem running program.");
    }

    #[test]
    fn test_build_subject_rejects_empty_command() {
        let err = build_subject(Vec::new(), None).expect_err("expected failure");
        assert_eq!(err, "Subject command is empty.");
    }
}
