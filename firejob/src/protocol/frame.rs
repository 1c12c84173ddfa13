//! Line framing and value formatting.

use std::fmt::{self, Display, Write as _};

use crate::ids::FIELD_SEPARATOR;
use crate::model::LatLon;

/// Render a number the way the engine's reference client prints it.
///
/// Integral values have no fraction (`5`, not `5.0`), very small and very
/// large magnitudes switch to exponent form (`1e-7`, `1e+21`). Non-finite
/// values and negative zero render as `0`.
pub fn fmt_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{:e}", value);
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => text,
        };
    }
    format!("{}", value)
}

/// A number rendered with [`fmt_number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Num(pub f64);

impl Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&fmt_number(self.0))
    }
}

/// `0` or `1`.
pub fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// `-1` when unset, otherwise `0` or `1`.
pub fn tristate(value: Option<bool>) -> &'static str {
    match value {
        None => "-1",
        Some(v) => flag(v),
    }
}

/// A pipe-delimited positional payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    text: String,
    count: usize,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a payload with its first field.
    pub fn start(first: impl Display) -> Self {
        let mut fields = Self::new();
        fields.push(first);
        fields
    }

    /// Append one field.
    pub fn push(&mut self, value: impl Display) -> &mut Self {
        if self.count > 0 {
            self.text.push(FIELD_SEPARATOR);
        }
        let _ = write!(self.text, "{}", value);
        self.count += 1;
        self
    }

    pub fn push_number(&mut self, value: f64) -> &mut Self {
        self.push(Num(value))
    }

    /// Append `|lat|lon` for every point.
    pub fn push_points(&mut self, points: &[LatLon]) -> &mut Self {
        for point in points {
            self.push(Num(point.latitude)).push(Num(point.longitude));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Accumulates newline-terminated protocol lines.
#[derive(Debug, Clone, Default)]
pub struct FrameWriter {
    buf: String,
    lines: usize,
}

impl FrameWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a bare line.
    pub fn line(&mut self, text: impl Display) {
        let _ = writeln!(self.buf, "{}", text);
        self.lines += 1;
    }

    /// Write a token line followed by its payload line.
    pub fn pair(&mut self, token: &str, payload: impl Display) {
        self.line(token);
        self.line(payload);
    }

    /// Number of lines written so far.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_number_matches_reference_client() {
        assert_eq!(fmt_number(5.0), "5");
        assert_eq!(fmt_number(-115.25), "-115.25");
        assert_eq!(fmt_number(0.1), "0.1");
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(f64::NAN), "0");
        assert_eq!(fmt_number(0.0000001), "1e-7");
        assert_eq!(fmt_number(1.5e21), "1.5e+21");
        assert_eq!(fmt_number(0.000001), "0.000001");
    }

    #[test]
    fn test_fields_join_with_separator() {
        let mut fields = Fields::start("ign0");
        fields.push("").push(Num(2.0)).push_points(&[LatLon::new(51.5, -115.0)]);
        assert_eq!(fields.as_str(), "ign0||2|51.5|-115");
        assert_eq!(fields.len(), 5);
    }

    #[test]
    fn test_tristate() {
        assert_eq!(tristate(None), "-1");
        assert_eq!(tristate(Some(true)), "1");
        assert_eq!(tristate(Some(false)), "0");
    }

    #[test]
    fn test_pair_writes_two_lines() {
        let mut out = FrameWriter::new();
        out.line("STARTUP");
        out.pair("projfile", "/data/a.prj");
        assert_eq!(out.as_str(), "STARTUP\nprojfile\n/data/a.prj\n");
        assert_eq!(out.line_count(), 3);
    }
}
