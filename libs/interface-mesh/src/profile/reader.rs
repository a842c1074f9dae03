//! # Profile Reader
//!
//! Parses the whitespace-separated profile text format: one `x y` pair per
//! line, segments delimited by one or more blank lines.

use crate::error::{InterfaceError, Result};
use glam::DVec2;
use std::collections::HashSet;
use std::path::Path;

use super::Profile;

/// Splits profile text into raw point sequences.
///
/// Blank lines only delimit; they never create empty segments.
///
/// # Errors
///
/// `MalformedProfile` with the 1-based line number when a line does not hold
/// exactly two finite numbers.
pub fn parse_segments(text: &str) -> Result<Vec<Vec<DVec2>>> {
    let mut segments = Vec::new();
    let mut current: Vec<DVec2> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(parse_point(trimmed, index + 1)?);
    }

    if !current.is_empty() {
        segments.push(current);
    }

    Ok(segments)
}

fn parse_point(line: &str, line_number: usize) -> Result<DVec2> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(InterfaceError::malformed(
            format!("expected two coordinates, found {}", fields.len()),
            Some(line_number),
        ));
    }

    let mut coords = [0.0; 2];
    for (slot, field) in coords.iter_mut().zip(&fields) {
        *slot = field.parse::<f64>().map_err(|_| {
            InterfaceError::malformed(format!("'{field}' is not a number"), Some(line_number))
        })?;
        if !slot.is_finite() {
            return Err(InterfaceError::malformed(
                format!("'{field}' is not finite"),
                Some(line_number),
            ));
        }
    }

    Ok(DVec2::new(coords[0], coords[1]))
}

/// Checks the topology of raw segments.
///
/// - at least one segment, each with at least two points
/// - no point repeated inside a segment
/// - the last point of each segment is bitwise equal to the first point of
///   the next one
pub fn validate_segments(segments: &[Vec<DVec2>]) -> Result<()> {
    if segments.is_empty() {
        return Err(InterfaceError::malformed("profile holds no segment", None));
    }

    for (index, points) in segments.iter().enumerate() {
        if points.len() < 2 {
            return Err(InterfaceError::malformed(
                format!("segment {index} has {} point(s), at least 2 required", points.len()),
                None,
            ));
        }

        let mut seen = HashSet::with_capacity(points.len());
        for point in points {
            if !seen.insert(point_key(*point)) {
                return Err(InterfaceError::malformed(
                    format!(
                        "segment {index} intersects itself at ({}, {})",
                        point.x, point.y
                    ),
                    None,
                ));
            }
        }
    }

    for (index, pair) in segments.windows(2).enumerate() {
        let end = pair[0][pair[0].len() - 1];
        let start = pair[1][0];
        if point_key(end) != point_key(start) {
            return Err(InterfaceError::malformed(
                format!(
                    "segment {index} ends at ({}, {}) but segment {} starts at ({}, {})",
                    end.x,
                    end.y,
                    index + 1,
                    start.x,
                    start.y
                ),
                None,
            ));
        }
    }

    Ok(())
}

#[inline]
fn point_key(point: DVec2) -> (u64, u64) {
    (point.x.to_bits(), point.y.to_bits())
}

/// Reads and classifies a profile file.
pub fn read_profile(path: &Path) -> Result<Profile> {
    let text = std::fs::read_to_string(path).map_err(|e| InterfaceError::io(path, e))?;
    let profile: Profile = text.parse()?;
    tracing::debug!(
        path = %path.display(),
        segments = profile.len(),
        "profile read"
    );
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_line_delimiters() {
        let text = "\n\n0 0\n0 1\n\n\n0 1\n1 1\n\n";
        let segments = parse_segments(text).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![DVec2::new(0.0, 0.0), DVec2::new(0.0, 1.0)]);
        assert_eq!(segments[1][1], DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_parse_whitespace_variants() {
        let segments = parse_segments("0\t0\n  1.5   2e-1  \n").unwrap();
        assert_eq!(segments[0][1], DVec2::new(1.5, 0.2));
    }

    #[test]
    fn test_parse_reports_line_number() {
        let err = parse_segments("0 0\n1 abc\n").unwrap_err();
        assert!(matches!(
            err,
            InterfaceError::MalformedProfile { line: Some(2), .. }
        ));
    }

    #[test]
    fn test_parse_rejects_extra_columns() {
        assert!(parse_segments("0 0 0\n").is_err());
    }

    #[test]
    fn test_validate_duplicate_point() {
        let segments = vec![vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 0.0),
        ]];
        let err = validate_segments(&segments).unwrap_err();
        assert!(err.to_string().contains("intersects itself"));
    }

    #[test]
    fn test_validate_disconnected() {
        let segments = vec![
            vec![DVec2::new(0.0, 0.0), DVec2::new(0.0, 1.0)],
            vec![DVec2::new(0.0, 1.0 + 1e-15), DVec2::new(1.0, 1.0)],
        ];
        let err = validate_segments(&segments).unwrap_err();
        assert!(err.to_string().contains("segment 1 starts"));
    }

    #[test]
    fn test_validate_empty_profile() {
        assert!(validate_segments(&[]).is_err());
    }

    #[test]
    fn test_validate_single_point_segment() {
        let segments = vec![vec![DVec2::new(0.0, 0.0)]];
        assert!(validate_segments(&segments).is_err());
    }
}
