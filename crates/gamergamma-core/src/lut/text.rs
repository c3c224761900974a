//! Delimited text 1D LUT reader.
//!
//! Line-oriented: blank lines and `#` comments are ignored; every other line
//! with at least three whitespace-separated numbers contributes one R, G, B
//! sample from its first three fields. Lines that fail to parse are skipped
//! one at a time, so `.cube` headers such as `LUT_1D_SIZE 256` or `TITLE`
//! drop out without special handling. Lines holding `nan` or `inf` are
//! skipped the same way.

use std::fs;
use std::path::Path;

use crate::lut::{LutResult, LutSamples};

/// Parse a text LUT from a string.
pub fn parse_text(source: &str) -> LutSamples {
    let mut samples = LutSamples::default();
    let mut skipped = 0usize;

    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            skipped += 1;
            continue;
        }

        // `str::parse::<f64>` is locale-independent.
        match (
            fields[0].parse::<f64>(),
            fields[1].parse::<f64>(),
            fields[2].parse::<f64>(),
        ) {
            (Ok(r), Ok(g), Ok(b)) if r.is_finite() && g.is_finite() && b.is_finite() => {
                samples.push([r, g, b])
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!("text LUT: skipped {skipped} unparsable or non-finite line(s)");
    }
    samples
}

/// Read and parse a text LUT file.
pub fn read_text(path: &Path) -> LutResult<LutSamples> {
    let source = fs::read_to_string(path)?;
    Ok(parse_text(&source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_blanks_and_bad_lines_are_skipped() {
        let source = "# header\n\n0.0 0.0 0.0\n0.5\t0.25  0.125\nnot a number here\n1 1 1 extra\n";
        let samples = parse_text(source);
        assert_eq!(samples.len(), 3);
        assert_eq!(samples.red, vec![0.0, 0.5, 1.0]);
        assert_eq!(samples.green, vec![0.0, 0.25, 1.0]);
        assert_eq!(samples.blue, vec![0.0, 0.125, 1.0]);
    }

    #[test]
    fn test_cube_header_lines_drop_out() {
        let source = "TITLE \"warm\"\nLUT_1D_SIZE 2\nDOMAIN_MIN 0 0 0\n0.1 0.0 0.0\n0.9 1.0 1.0\n";
        let samples = parse_text(source);
        // DOMAIN_MIN fails on its first field.
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.red, vec![0.1, 0.9]);
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let samples = parse_text("0.1 0.2\n0.3 0.4 0.5\n");
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn test_signed_and_exponent_forms_parse() {
        let samples = parse_text("+1e-1 -0.0 2.5E0\n");
        assert_eq!(samples.red, vec![0.1]);
        assert_eq!(samples.blue, vec![2.5]);
    }

    #[test]
    fn test_non_finite_lines_are_skipped() {
        let samples = parse_text("nan 0 0\ninf 1 1\n0 -inf 0\n0.1 0.2 0.3\n");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples.red, vec![0.1]);
        assert_eq!(samples.green, vec![0.2]);
        assert_eq!(samples.blue, vec![0.3]);
    }
}
