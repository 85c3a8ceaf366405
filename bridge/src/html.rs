//! HTML rendering for program descriptors.
//!
//! Produces a standalone page per program, or a single page for a set with
//! an anchor-linked section per member.

use argwire_codec::{ProgramDescriptor, ProgramSetDescriptor};

/// Escapes text for literal inclusion in HTML.
pub fn html_sanitize(text: &str) -> String {
    let mut out = text.replace('&', "&amp;");
    out = out.replace('"', "&quot;");
    out = out.replace('\'', "&apos;");
    out = out.replace('<', "&lt;");
    out = out.replace('>', "&gt;");
    out
}

/// Usage, description, and option table for one program.
fn program_body(program: &ProgramDescriptor, out: &mut String) {
    out.push_str(&format!("<P>{}</P>\n", html_sanitize(&program.usage)));
    if program.description.is_empty() {
        out.push_str(&format!("<P>{}</P>\n", html_sanitize(&program.summary)));
    } else {
        for line in program.description.split('\n') {
            out.push_str(&format!("<P>{}</P>\n", html_sanitize(line.trim())));
        }
    }
    out.push_str("<TABLE>\n");
    for option in program.public_options() {
        out.push_str("\t<TR>\n");
        out.push_str(&format!("\t\t<TD>{}</TD>\n", html_sanitize(&option.name)));
        out.push_str(&format!("\t\t<TD>{}</TD>\n", html_sanitize(&option.summary)));
        out.push_str("\t</TR>\n");
        if !option.description.is_empty() {
            out.push_str("\t<TR>\n");
            out.push_str("\t\t<TD></TD>\n");
            out.push_str("\t\t<TD>\n");
            for line in option.description.split('\n') {
                out.push_str(&format!("\t\t\t<P>{}</P>\n", html_sanitize(line.trim())));
            }
            out.push_str("\t\t</TD>\n");
            out.push_str("\t</TR>\n");
        }
        if !option.usage.is_empty() {
            out.push_str("\t<TR>\n");
            out.push_str("\t\t<TD></TD>\n");
            out.push_str(&format!("\t\t<TD>{}</TD>\n", html_sanitize(&option.usage)));
            out.push_str("\t</TR>\n");
        }
    }
    out.push_str("</TABLE>\n");
}

fn page_open(title: &str, out: &mut String) {
    out.push_str("<!DOCTYPE html>\n");
    out.push_str("<HTML>\n");
    out.push_str("<HEAD>\n");
    out.push_str(&format!("\t<TITLE>{}</TITLE>\n", html_sanitize(title)));
    out.push_str("</HEAD>\n");
    out.push_str("<BODY>\n");
    out.push_str(&format!("<P>{}</P>\n", html_sanitize(title)));
}

fn page_close(out: &mut String) {
    out.push_str("</BODY>\n");
    out.push_str("</HTML>\n");
}

/// Renders a complete HTML page for one program.
pub fn html_program(program: &ProgramDescriptor) -> String {
    let mut out = String::new();
    page_open(&program.name, &mut out);
    program_body(program, &mut out);
    page_close(&mut out);
    out
}

/// Renders a complete HTML page for a program set.
///
/// `members` holds the full descriptor for each listed sub-program, in the
/// same order the set lists them. The page opens with a link table and then
/// gives each member its own anchored section.
pub fn html_program_set(set: &ProgramSetDescriptor, members: &[ProgramDescriptor]) -> String {
    let mut out = String::new();
    page_open(&set.name, &mut out);
    out.push_str(&format!("<P>{}</P>\n", html_sanitize(&set.summary)));
    out.push_str("<TABLE>\n");
    for (index, member) in set.programs.iter().enumerate() {
        out.push_str("\t<TR>\n");
        out.push_str(&format!(
            "\t\t<TD><A HREF=\"#prog{index}\">{}</A></TD>\n",
            html_sanitize(&member.name)
        ));
        out.push_str(&format!("\t\t<TD>{}</TD>\n", html_sanitize(&member.summary)));
        out.push_str("\t</TR>\n");
    }
    out.push_str("</TABLE>\n");
    for (index, member) in members.iter().enumerate() {
        out.push_str("<HR>\n");
        out.push_str(&format!(
            "<P><A ID=\"prog{index}\">{} {}</A></P>\n",
            html_sanitize(&set.name),
            html_sanitize(&member.name)
        ));
        program_body(member, &mut out);
    }
    page_close(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use argwire_codec::{MAIN_FLAG, MAIN_META, MAIN_STRING, OptionDescriptor, ProgramSummary};

    fn greeter() -> ProgramDescriptor {
        ProgramDescriptor {
            name: "greeter".to_string(),
            summary: "Prints a greeting.".to_string(),
            description: String::new(),
            usage: "greeter --name NAME".to_string(),
            options: vec![
                OptionDescriptor {
                    name: "--help".to_string(),
                    summary: "Print out help information.".to_string(),
                    description: String::new(),
                    usage: String::new(),
                    is_public: false,
                    main_flavor: MAIN_META.to_string(),
                    sub_flavor: String::new(),
                    extras: Vec::new(),
                },
                OptionDescriptor {
                    name: "--name".to_string(),
                    summary: "Name to greet.".to_string(),
                    description: String::new(),
                    usage: "--name smith".to_string(),
                    is_public: true,
                    main_flavor: MAIN_STRING.to_string(),
                    sub_flavor: String::new(),
                    extras: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn test_html_sanitize_escapes_markup() {
        assert_eq!(
            html_sanitize("a < b & \"c\" > 'd'"),
            "a &lt; b &amp; &quot;c&quot; &gt; &apos;d&apos;"
        );
        assert_eq!(html_sanitize("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_html_program_page() {
        let text = html_program(&greeter());
        let expected = concat!(
            "<!DOCTYPE html>\n",
            "<HTML>\n",
            "<HEAD>\n",
            "\t<TITLE>greeter</TITLE>\n",
            "</HEAD>\n",
            "<BODY>\n",
            "<P>greeter</P>\n",
            "<P>greeter --name NAME</P>\n",
            "<P>Prints a greeting.</P>\n",
            "<TABLE>\n",
            "\t<TR>\n",
            "\t\t<TD>--name</TD>\n",
            "\t\t<TD>Name to greet.</TD>\n",
            "\t</TR>\n",
            "\t<TR>\n",
            "\t\t<TD></TD>\n",
            "\t\t<TD>--name smith</TD>\n",
            "\t</TR>\n",
            "</TABLE>\n",
            "</BODY>\n",
            "</HTML>\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_html_option_description_rows() {
        let mut program = greeter();
        program.options[1].description = "Line one.\n Line two. ".to_string();
        let text = html_program(&program);
        let expected_rows = concat!(
            "\t<TR>\n",
            "\t\t<TD></TD>\n",
            "\t\t<TD>\n",
            "\t\t\t<P>Line one.</P>\n",
            "\t\t\t<P>Line two.</P>\n",
            "\t\t</TD>\n",
            "\t</TR>\n",
        );
        assert!(text.contains(expected_rows));
    }

    #[test]
    fn test_html_set_page_links_and_sections() {
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
        let mut greet = greeter();
        greet.name = "greet".to_string();
        let mut stats = greeter();
        stats.name = "stats".to_string();
        stats.options = vec![OptionDescriptor {
            name: "--zero".to_string(),
            summary: "Print zero counts too.".to_string(),
            description: String::new(),
            usage: String::new(),
            is_public: true,
            main_flavor: MAIN_FLAG.to_string(),
            sub_flavor: String::new(),
            extras: Vec::new(),
        }];
        let text = html_program_set(&set, &[greet, stats]);
        assert!(text.contains("\t\t<TD><A HREF=\"#prog0\">greet</A></TD>\n"));
        assert!(text.contains("\t\t<TD><A HREF=\"#prog1\">stats</A></TD>\n"));
        assert!(text.contains("<P><A ID=\"prog0\">toolbox greet</A></P>\n"));
        assert!(text.contains("<P><A ID=\"prog1\">toolbox stats</A></P>\n"));
        assert!(text.contains("\t\t<TD>--zero</TD>\n"));
        let hr_count = text.matches("<HR>\n").count();
        assert_eq!(hr_count, 2);
    }

    #[test]
    fn test_html_hides_private_options() {
        let text = html_program(&greeter());
        assert!(!text.contains("--help"));
    }
}
