//! In-memory file attachments.
//!
//! An attachment stands in for a file on disk. The job hands back a synthetic
//! `attachment:/{n}/{name}` path that can be used anywhere a filename is
//! accepted; the engine materializes the contents on its side.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::sync::OnceLock;

/// Prefix of every attachment reference.
pub const ATTACHMENT_PREFIX: &str = "attachment:/";

/// Unreserved URI component characters other than alphanumerics.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn allowed_characters() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"^[^\\/:*?"<>|]+$"#).expect("valid regex"))
}

fn reserved_name() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(nul|prn|con|aux|lpt[0-9]|com[1-9])(\.|$)").expect("valid regex")
    })
}

/// Check that `filename` is usable as an attachment name on every platform
/// the engine runs on.
///
/// Rejects names containing `\ / : * ? " < > |`, names starting with a dot
/// and reserved device names such as `nul` or `com1.txt`.
pub fn validate_filename(filename: &str) -> bool {
    allowed_characters().is_match(filename)
        && !filename.starts_with('.')
        && !reserved_name().is_match(filename)
}

/// Build the synthetic path for the `index`th attachment.
pub(crate) fn attachment_reference(index: u32, filename: &str) -> String {
    format!(
        "{}{}/{}",
        ATTACHMENT_PREFIX,
        index,
        utf8_percent_encode(filename, COMPONENT)
    )
}

/// Whether `path` refers to an attachment rather than a local file.
pub fn is_attachment(path: &str) -> bool {
    path.starts_with(ATTACHMENT_PREFIX)
}

/// A named blob streamed along with the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    /// The synthetic `attachment:/` path.
    pub reference: String,
    pub contents: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("fuel.asc"));
        assert!(validate_filename("my fire (1).kml"));
        assert!(validate_filename("console.txt"));
        assert!(!validate_filename(""));
        assert!(!validate_filename(".hidden"));
        assert!(!validate_filename("a/b.txt"));
        assert!(!validate_filename("what?.txt"));
        assert!(!validate_filename("pipe|name"));
        assert!(!validate_filename("NUL"));
        assert!(!validate_filename("com1.txt"));
        assert!(!validate_filename("Lpt0"));
        assert!(validate_filename("com0.txt"));
    }

    #[test]
    fn test_reference_is_percent_encoded() {
        assert_eq!(
            attachment_reference(1, "my fire (1).kml"),
            "attachment:/1/my%20fire%20(1).kml"
        );
        assert_eq!(attachment_reference(7, "a&b"), "attachment:/7/a%26b");
        assert!(is_attachment("attachment:/7/a%26b"));
        assert!(!is_attachment("/tmp/attachment"));
    }
}
