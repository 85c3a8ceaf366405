//! Man page rendering for program descriptors.
//!
//! Output is classic troff with the `man` macro set. Dashes are escaped
//! everywhere so option names like `--thread` survive roff hyphenation.

use argwire_codec::{
    MAIN_ENUM, MAIN_FLAG, MAIN_FLOAT, MAIN_FLOAT_VEC, MAIN_INT, MAIN_INT_VEC, MAIN_STRING,
    MAIN_STRING_VEC, OptionDescriptor, ProgramDescriptor, ProgramSetDescriptor, SUB_FILE_READ,
    SUB_FILE_WRITE, SUB_FOLDER_READ, SUB_FOLDER_WRITE, SUB_NONE,
};

/// Escapes a string for use in roff source.
pub fn man_sanitize(text: &str) -> String {
    text.replace('-', "\\-")
}

/// Synopsis fragment for one option, or `None` for reserved and
/// unrecognized flavors.
fn synopsis_fragment(option: &OptionDescriptor) -> Option<String> {
    let name = man_sanitize(&option.name);
    let fragment = match option.flavor_key() {
        (MAIN_FLAG, SUB_NONE) | (MAIN_ENUM, SUB_NONE) => format!("\\fB{name}\\fR"),
        (MAIN_INT, SUB_NONE) => format!("\\fB{name}\\fR \\fI###\\fR"),
        (MAIN_INT_VEC, SUB_NONE) => format!("[\\fB{name}\\fR \\fI###\\fR]*"),
        (MAIN_FLOAT, SUB_NONE) => format!("\\fB{name}\\fR \\fI###.###\\fR"),
        (MAIN_FLOAT_VEC, SUB_NONE) => format!("[\\fB{name}\\fR \\fI###.###\\fR]*"),
        (MAIN_STRING, SUB_NONE) => format!("\\fB{name}\\fR \\fITEXT\\fR"),
        (MAIN_STRING_VEC, SUB_NONE) => format!("[\\fB{name}\\fR \\fITEXT\\fR]*"),
        (MAIN_STRING, SUB_FILE_READ | SUB_FILE_WRITE) => format!("\\fB{name}\\fR \\fIFILE\\fR"),
        (MAIN_STRING_VEC, SUB_FILE_READ | SUB_FILE_WRITE) => {
            format!("[\\fB{name}\\fR \\fIFILE\\fR]*")
        }
        (MAIN_STRING, SUB_FOLDER_READ | SUB_FOLDER_WRITE) => format!("\\fB{name}\\fR \\fIDIR\\fR"),
        _ => return None,
    };
    Some(fragment)
}

/// Renders the man page for one program.
///
/// `set_name` is empty for a standalone program. For a set member it
/// prefixes the page title and every bold program reference, matching how
/// the program is actually invoked.
pub fn man_program(set_name: &str, program: &ProgramDescriptor) -> String {
    let mut out = String::new();
    let work_name = if set_name.is_empty() {
        program.name.clone()
    } else {
        format!("{set_name} {}", program.name)
    };
    if set_name.is_empty() {
        out.push_str(&format!(
            ".TH {} 1\n",
            man_sanitize(&program.name).to_uppercase()
        ));
    } else {
        out.push_str(&format!(
            ".TH {}-{} 1\n",
            man_sanitize(set_name).to_uppercase(),
            man_sanitize(&program.name).to_uppercase()
        ));
    }
    out.push_str(".SH NAME\n");
    out.push_str(&format!(
        "{} \\- {}\n",
        man_sanitize(&work_name),
        man_sanitize(&program.summary)
    ));
    out.push_str(".SH SYNOPSIS\n");
    out.push_str(&format!(".B {}\n", man_sanitize(&work_name)));
    for option in program.public_options() {
        if let Some(fragment) = synopsis_fragment(option) {
            out.push_str(&fragment);
            out.push('\n');
        }
    }
    out.push_str(".SH DESCRIPTION\n");
    out.push_str(&format!(".B {}\n", man_sanitize(&work_name)));
    if program.description.is_empty() {
        out.push_str(&man_sanitize(&program.summary));
        out.push('\n');
    } else {
        for line in program.description.split('\n') {
            out.push_str(&man_sanitize(line.trim()));
            out.push('\n');
        }
    }
    out.push_str(".SH OPTIONS\n");
    for option in program.public_options() {
        let Some(fragment) = synopsis_fragment(option) else {
            continue;
        };
        out.push_str(".TP\n");
        out.push_str(&fragment);
        out.push('\n');
        out.push_str(&man_sanitize(&option.summary));
        out.push('\n');
    }
    out
}

/// Renders the top-level man page for a program set.
///
/// Member pages are rendered separately with [`man_program`] and the set's
/// name; this page lists the members and how to reach them.
pub fn man_program_set(set: &ProgramSetDescriptor) -> String {
    let mut out = String::new();
    let set_name = man_sanitize(&set.name);
    out.push_str(&format!(".TH {} 1\n", set_name.to_uppercase()));
    out.push_str(".SH NAME\n");
    out.push_str(&format!("{} \\- {}\n", set_name, man_sanitize(&set.summary)));
    out.push_str(".SH SYNOPSIS\n");
    out.push_str(&format!(".B {set_name}\n"));
    out.push_str("\\fIPROGRAM\\fR \\fIARGS\\fR ...\n");
    out.push_str(".SH DESCRIPTION\n");
    out.push_str(&format!(".B {set_name}\n"));
    out.push_str(&man_sanitize(&set.summary));
    out.push('\n');
    out.push_str(".SH OPTIONS\n");
    for member in &set.programs {
        out.push_str(".TP\n");
        out.push_str(&format!(
            "\\fB{set_name}\\fR \\fB{}\\fR \\fIARGS\\fR ...\n",
            man_sanitize(&member.name)
        ));
        out.push_str(&man_sanitize(&member.summary));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use argwire_codec::{MAIN_META, ProgramSummary};

    fn option(name: &str, summary: &str, main: &str, sub: &str, public: bool) -> OptionDescriptor {
        OptionDescriptor {
            name: name.to_string(),
            summary: summary.to_string(),
            description: String::new(),
            usage: String::new(),
            is_public: public,
            main_flavor: main.to_string(),
            sub_flavor: sub.to_string(),
            extras: Vec::new(),
        }
    }

    fn align_program() -> ProgramDescriptor {
        ProgramDescriptor {
            name: "align".to_string(),
            summary: "Aligns reads.".to_string(),
            description: String::new(),
            usage: "align --in FILE".to_string(),
            options: vec![
                option("--help", "Print out help information.", MAIN_META, "", false),
                option("--fast", "Use the quick heuristic.", MAIN_FLAG, "", true),
                option("--thread", "Worker threads.", MAIN_INT, "", true),
                option("--seed", "RNG seed.", MAIN_INT, "", false),
                option("--in", "Input file.", MAIN_STRING, SUB_FILE_READ, true),
            ],
        }
    }

    #[test]
    fn test_man_sanitize_escapes_dashes() {
        assert_eq!(man_sanitize("--thread"), "\\-\\-thread");
        assert_eq!(man_sanitize("plain"), "plain");
    }

    #[test]
    fn test_man_program_layout() {
        let text = man_program("", &align_program());
        let expected = concat!(
            ".TH ALIGN 1\n",
            ".SH NAME\n",
            "align \\- Aligns reads.\n",
            ".SH SYNOPSIS\n",
            ".B align\n",
            "\\fB\\-\\-fast\\fR\n",
            "\\fB\\-\\-thread\\fR \\fI###\\fR\n",
            "\\fB\\-\\-in\\fR \\fIFILE\\fR\n",
            ".SH DESCRIPTION\n",
            ".B align\n",
            "Aligns reads.\n",
            ".SH OPTIONS\n",
            ".TP\n",
            "\\fB\\-\\-fast\\fR\n",
            "Use the quick heuristic.\n",
            ".TP\n",
            "\\fB\\-\\-thread\\fR \\fI###\\fR\n",
            "Worker threads.\n",
            ".TP\n",
            "\\fB\\-\\-in\\fR \\fIFILE\\fR\n",
            "Input file.\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_man_program_description_lines_trimmed() {
        let mut program = align_program();
        program.description = "  First line.  \nSecond line.".to_string();
        let text = man_program("", &program);
        assert!(text.contains(".SH DESCRIPTION\n.B align\nFirst line.\nSecond line.\n"));
    }

    #[test]
    fn test_man_member_page_title_joins_set_and_program() {
        let text = man_program("toolbox", &align_program());
        assert!(text.starts_with(".TH TOOLBOX-ALIGN 1\n"));
        assert!(text.contains("toolbox align \\- Aligns reads.\n"));
        assert!(text.contains(".B toolbox align\n"));
    }

    #[test]
    fn test_man_program_set_lists_members() {
        let set = ProgramSetDescriptor {
            name: "toolbox".to_string(),
            summary: "Small text utilities.".to_string(),
            programs: vec![
                ProgramSummary {
                    name: "greet".to_string(),
                    summary: "Greets someone.".to_string(),
                },
                ProgramSummary {
                    name: "stats".to_string(),
                    summary: "Counts lines.".to_string(),
                },
            ],
        };
        let text = man_program_set(&set);
        let expected = concat!(
            ".TH TOOLBOX 1\n",
            ".SH NAME\n",
            "toolbox \\- Small text utilities.\n",
            ".SH SYNOPSIS\n",
            ".B toolbox\n",
            "\\fIPROGRAM\\fR \\fIARGS\\fR ...\n",
            ".SH DESCRIPTION\n",
            ".B toolbox\n",
            "Small text utilities.\n",
            ".SH OPTIONS\n",
            ".TP\n",
            "\\fBtoolbox\\fR \\fBgreet\\fR \\fIARGS\\fR ...\n",
            "Greets someone.\n",
            ".TP\n",
            "\\fBtoolbox\\fR \\fBstats\\fR \\fIARGS\\fR ...\n",
            "Counts lines.\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_vector_and_folder_fragments() {
        let ints = option("--w", "Weights.", MAIN_INT_VEC, "", true);
        assert_eq!(
            synopsis_fragment(&ints).unwrap(),
            "[\\fB\\-\\-w\\fR \\fI###\\fR]*"
        );
        let floats = option("--q", "Quantiles.", MAIN_FLOAT_VEC, "", true);
        assert_eq!(
            synopsis_fragment(&floats).unwrap(),
            "[\\fB\\-\\-q\\fR \\fI###.###\\fR]*"
        );
        let files = option("--in", "Inputs.", MAIN_STRING_VEC, SUB_FILE_READ, true);
        assert_eq!(
            synopsis_fragment(&files).unwrap(),
            "[\\fB\\-\\-in\\fR \\fIFILE\\fR]*"
        );
        let folder = option("--out", "Output dir.", MAIN_STRING, SUB_FOLDER_WRITE, true);
        assert_eq!(
            synopsis_fragment(&folder).unwrap(),
            "\\fB\\-\\-out\\fR \\fIDIR\\fR"
        );
        let meta = option("--help", "Help.", MAIN_META, "", false);
        assert!(synopsis_fragment(&meta).is_none());
    }
}
