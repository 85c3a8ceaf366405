//! Flavor registry and extras interpretation.
//!
//! An option's `(main_flavor, sub_flavor)` string pair keys into a fixed,
//! ahead-of-time table that says how to read its `extras` payload. The table
//! is closed on purpose: a consumer presented with a flavor key it does not
//! know keeps the raw bytes and renders nothing, so subjects can grow new
//! flavors without breaking deployed consumers.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::io::{read_bool, read_f64, read_i64, read_u64};

/// Main flavor code for reserved meta-options.
pub const MAIN_META: &str = "meta";
/// Main flavor code for boolean flags.
pub const MAIN_FLAG: &str = "flag";
/// Main flavor code for mutually-exclusive enum members.
pub const MAIN_ENUM: &str = "enum";
/// Main flavor code for integer options.
pub const MAIN_INT: &str = "int";
/// Main flavor code for repeatable integer options.
pub const MAIN_INT_VEC: &str = "intvec";
/// Main flavor code for float options.
pub const MAIN_FLOAT: &str = "float";
/// Main flavor code for repeatable float options.
pub const MAIN_FLOAT_VEC: &str = "floatvec";
/// Main flavor code for string options.
pub const MAIN_STRING: &str = "string";
/// Main flavor code for repeatable string options.
pub const MAIN_STRING_VEC: &str = "stringvec";

/// Sub flavor code for options with no path semantics.
pub const SUB_NONE: &str = "";
/// Sub flavor code for file paths opened for reading.
pub const SUB_FILE_READ: &str = "fileread";
/// Sub flavor code for file paths opened for writing.
pub const SUB_FILE_WRITE: &str = "filewrite";
/// Sub flavor code for folder paths read from.
pub const SUB_FOLDER_READ: &str = "folderread";
/// Sub flavor code for folder paths written to.
pub const SUB_FOLDER_WRITE: &str = "folderwrite";

/// The ahead-of-time flavor table, in wire-code form.
pub const KNOWN_FLAVORS: &[(&str, &str)] = &[
    (MAIN_META, SUB_NONE),
    (MAIN_FLAG, SUB_NONE),
    (MAIN_ENUM, SUB_NONE),
    (MAIN_INT, SUB_NONE),
    (MAIN_INT_VEC, SUB_NONE),
    (MAIN_FLOAT, SUB_NONE),
    (MAIN_FLOAT_VEC, SUB_NONE),
    (MAIN_STRING, SUB_NONE),
    (MAIN_STRING_VEC, SUB_NONE),
    (MAIN_STRING, SUB_FILE_READ),
    (MAIN_STRING, SUB_FILE_WRITE),
    (MAIN_STRING, SUB_FOLDER_READ),
    (MAIN_STRING, SUB_FOLDER_WRITE),
    (MAIN_STRING_VEC, SUB_FILE_READ),
    (MAIN_STRING_VEC, SUB_FILE_WRITE),
];

/// Returns true if the flavor key appears in [`KNOWN_FLAVORS`].
pub fn is_known_flavor(main: &str, sub: &str) -> bool {
    KNOWN_FLAVORS
        .iter()
        .any(|&(known_main, known_sub)| known_main == main && known_sub == sub)
}

/// Typed view of an option's extras payload.
///
/// Produced by [`interpret_extras`]; one variant per registered flavor plus
/// [`Unknown`](ExtrasView::Unknown) for keys outside the table. Vector
/// flavors carry no current value on the wire, so their variants are empty
/// (file vectors still list their valid extensions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtrasView {
    /// Reserved meta-option, no payload.
    Meta,
    /// Boolean flag, no payload.
    Flag,
    /// Enum member: owning group and whether it is the default selection.
    Enum { group: String, is_default: bool },
    /// Integer option with its current value.
    Int { value: i64 },
    /// Repeatable integer option.
    IntVec,
    /// Float option with its current value.
    Float { value: f64 },
    /// Repeatable float option.
    FloatVec,
    /// String option with its current value.
    Str { value: String },
    /// Repeatable string option.
    StrVec,
    /// File path option: current value plus valid extension list.
    File {
        value: String,
        extensions: Vec<String>,
    },
    /// Repeatable file path option: extension list only.
    FileVec { extensions: Vec<String> },
    /// Folder path option with its current value.
    Folder { value: String },
    /// Flavor key outside the registry; raw bytes stay on the descriptor.
    Unknown,
}

/// Interprets an extras payload through the flavor registry.
///
/// Unknown flavor keys return [`ExtrasView::Unknown`] rather than an error.
/// A *known* flavor with a malformed payload is a protocol error: the
/// subject and consumer disagree about the format, and there is nothing
/// sensible to render. Trailing bytes after a well-formed payload are
/// ignored, matching how older consumers skip fields added later.
///
/// # Examples
///
/// ```
/// use argwire_codec::{ExtrasView, interpret_extras};
///
/// let extras = [0, 0, 0, 0, 0, 0, 0, 20];
/// let view = interpret_extras("int", "", &extras).unwrap();
/// assert_eq!(view, ExtrasView::Int { value: 20 });
///
/// let view = interpret_extras("hologram", "", &[1, 2, 3]).unwrap();
/// assert_eq!(view, ExtrasView::Unknown);
/// ```
pub fn interpret_extras(main: &str, sub: &str, extras: &[u8]) -> Result<ExtrasView> {
    let mut rest = extras;
    let view = match (main, sub) {
        (MAIN_META, SUB_NONE) => ExtrasView::Meta,
        (MAIN_FLAG, SUB_NONE) => ExtrasView::Flag,
        (MAIN_ENUM, SUB_NONE) => ExtrasView::Enum {
            group: take_text(&mut rest, "enum group")?,
            is_default: read_bool(&mut rest, "enum default byte")?,
        },
        (MAIN_INT, SUB_NONE) => ExtrasView::Int {
            value: read_i64(&mut rest, "int value")?,
        },
        (MAIN_INT_VEC, SUB_NONE) => ExtrasView::IntVec,
        (MAIN_FLOAT, SUB_NONE) => ExtrasView::Float {
            value: read_f64(&mut rest, "float value")?,
        },
        (MAIN_FLOAT_VEC, SUB_NONE) => ExtrasView::FloatVec,
        (MAIN_STRING, SUB_NONE) => ExtrasView::Str {
            value: take_text(&mut rest, "string value")?,
        },
        (MAIN_STRING_VEC, SUB_NONE) => ExtrasView::StrVec,
        (MAIN_STRING, SUB_FILE_READ) | (MAIN_STRING, SUB_FILE_WRITE) => ExtrasView::File {
            value: take_text(&mut rest, "file value")?,
            extensions: take_extensions(&mut rest)?,
        },
        (MAIN_STRING_VEC, SUB_FILE_READ) | (MAIN_STRING_VEC, SUB_FILE_WRITE) => {
            ExtrasView::FileVec {
                extensions: take_extensions(&mut rest)?,
            }
        }
        (MAIN_STRING, SUB_FOLDER_READ) | (MAIN_STRING, SUB_FOLDER_WRITE) => ExtrasView::Folder {
            value: take_text(&mut rest, "folder value")?,
        },
        _ => ExtrasView::Unknown,
    };
    Ok(view)
}

/// Reads a length-prefixed string from a slice, checking the declared
/// length against the bytes actually remaining.
fn take_text(rest: &mut &[u8], field: &'static str) -> Result<String> {
    let declared = read_u64(rest, field)?;
    let remaining = rest.len() as u64;
    if declared > remaining {
        return Err(CodecError::LengthOverrun {
            declared,
            remaining,
        });
    }
    let (head, tail) = rest.split_at(declared as usize);
    *rest = tail;
    String::from_utf8(head.to_vec()).map_err(|_| CodecError::InvalidText(field))
}

fn take_extensions(rest: &mut &[u8]) -> Result<Vec<String>> {
    let count = read_u64(rest, "extension count")?;
    let mut extensions = Vec::new();
    for _ in 0..count {
        extensions.push(take_text(rest, "extension")?);
    }
    Ok(extensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{write_bool, write_f64, write_i64, write_string, write_u64};

    #[test]
    fn test_registry_covers_the_wire_roster() {
        assert_eq!(KNOWN_FLAVORS.len(), 15);
        assert!(is_known_flavor("flag", ""));
        assert!(is_known_flavor("stringvec", "filewrite"));
        assert!(!is_known_flavor("flag", "fileread"));
        assert!(!is_known_flavor("hologram", ""));
    }

    #[test]
    fn test_empty_payload_flavors() {
        assert_eq!(interpret_extras("meta", "", &[]).unwrap(), ExtrasView::Meta);
        assert_eq!(interpret_extras("flag", "", &[]).unwrap(), ExtrasView::Flag);
        assert_eq!(
            interpret_extras("intvec", "", &[]).unwrap(),
            ExtrasView::IntVec
        );
        assert_eq!(
            interpret_extras("floatvec", "", &[]).unwrap(),
            ExtrasView::FloatVec
        );
        assert_eq!(
            interpret_extras("stringvec", "", &[]).unwrap(),
            ExtrasView::StrVec
        );
    }

    #[test]
    fn test_enum_payload() {
        let mut buf = Vec::new();
        write_string(&mut buf, "radio").unwrap();
        write_bool(&mut buf, true).unwrap();

        let view = interpret_extras("enum", "", &buf).unwrap();
        assert_eq!(
            view,
            ExtrasView::Enum {
                group: "radio".into(),
                is_default: true
            }
        );
    }

    #[test]
    fn test_numeric_payloads() {
        let mut buf = Vec::new();
        write_i64(&mut buf, -42).unwrap();
        assert_eq!(
            interpret_extras("int", "", &buf).unwrap(),
            ExtrasView::Int { value: -42 }
        );

        let mut buf = Vec::new();
        write_f64(&mut buf, 2.5).unwrap();
        assert_eq!(
            interpret_extras("float", "", &buf).unwrap(),
            ExtrasView::Float { value: 2.5 }
        );
    }

    #[test]
    fn test_file_payload_with_extensions() {
        let mut buf = Vec::new();
        write_string(&mut buf, "in.tsv").unwrap();
        write_u64(&mut buf, 2).unwrap();
        write_string(&mut buf, ".tsv").unwrap();
        write_string(&mut buf, ".txt").unwrap();

        let view = interpret_extras("string", "fileread", &buf).unwrap();
        assert_eq!(
            view,
            ExtrasView::File {
                value: "in.tsv".into(),
                extensions: vec![".tsv".into(), ".txt".into()]
            }
        );
    }

    #[test]
    fn test_file_payload_with_empty_extension_list() {
        let mut buf = Vec::new();
        write_string(&mut buf, "").unwrap();
        write_u64(&mut buf, 0).unwrap();

        let view = interpret_extras("string", "filewrite", &buf).unwrap();
        assert_eq!(
            view,
            ExtrasView::File {
                value: String::new(),
                extensions: Vec::new()
            }
        );
    }

    #[test]
    fn test_file_vector_payload_has_no_value() {
        let mut buf = Vec::new();
        write_u64(&mut buf, 1).unwrap();
        write_string(&mut buf, ".csv").unwrap();

        let view = interpret_extras("stringvec", "filewrite", &buf).unwrap();
        assert_eq!(
            view,
            ExtrasView::FileVec {
                extensions: vec![".csv".into()]
            }
        );
    }

    #[test]
    fn test_folder_payload_is_value_only() {
        let mut buf = Vec::new();
        write_string(&mut buf, "/tmp/work").unwrap();

        let view = interpret_extras("string", "folderwrite", &buf).unwrap();
        assert_eq!(
            view,
            ExtrasView::Folder {
                value: "/tmp/work".into()
            }
        );
    }

    #[test]
    fn test_unknown_flavor_is_not_an_error() {
        let view = interpret_extras("matrix", "sparse", &[9, 9, 9]).unwrap();
        assert_eq!(view, ExtrasView::Unknown);
    }

    #[test]
    fn test_declared_length_beyond_payload_is_overrun() {
        let mut buf = Vec::new();
        write_u64(&mut buf, 100).unwrap();
        buf.extend_from_slice(b"tiny");

        let err = interpret_extras("string", "", &buf).unwrap_err();
        match err {
            CodecError::LengthOverrun {
                declared,
                remaining,
            } => {
                assert_eq!(declared, 100);
                assert_eq!(remaining, 4);
            }
            other => panic!("expected LengthOverrun, got {other:?}"),
        }
    }

    #[test]
    fn test_short_fixed_payload_is_truncated() {
        let err = interpret_extras("int", "", &[0, 0, 1]).unwrap_err();
        assert!(matches!(err, CodecError::Truncated(_)));
    }

    #[test]
    fn test_trailing_bytes_are_tolerated() {
        let mut buf = Vec::new();
        write_i64(&mut buf, 7).unwrap();
        buf.extend_from_slice(&[0xAA, 0xBB]);

        assert_eq!(
            interpret_extras("int", "", &buf).unwrap(),
            ExtrasView::Int { value: 7 }
        );
    }

    #[test]
    fn test_view_serializes_with_kind_tag() {
        let view = ExtrasView::File {
            value: "a.tsv".into(),
            extensions: vec![".tsv".into()],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "file");
        assert_eq!(json["extensions"][0], ".tsv");
    }
}
