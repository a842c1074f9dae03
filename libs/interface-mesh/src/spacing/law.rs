//! # Spacing Laws
//!
//! Per-segment stretching laws resolved from JSON overrides or the global
//! default spacing.

use crate::diagnostic::{DiagnosticKind, Diagnostics};
use crate::error::{InterfaceError, Result};
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Cell shape requested for the rings built from a segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    #[default]
    Tri,
    Quad,
}

/// Stretching law of one segment.
///
/// Spacings are lengths in profile units until [`SpacingLaw::normalized`]
/// divides them by the segment's arc length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingLaw {
    pub start_spacing: f64,
    pub start_growth: f64,
    pub end_spacing: f64,
    pub end_growth: f64,
    pub max_edge: f64,
}

impl SpacingLaw {
    /// Builds a law from `[start_ds, start_gr, end_ds, end_gr, max_edge]`.
    pub fn from_array(values: [f64; 5]) -> Self {
        Self {
            start_spacing: values[0],
            start_growth: values[1],
            end_spacing: values[2],
            end_growth: values[3],
            max_edge: values[4],
        }
    }

    /// Uniform law `[g, 1, g, 1, g]`.
    pub fn uniform(spacing: f64) -> Self {
        Self::from_array([spacing, 1.0, spacing, 1.0, spacing])
    }

    /// Checks spacings and growth ratios.
    pub fn validate(&self, segment: usize) -> Result<()> {
        let lengths = [
            ("start spacing", self.start_spacing),
            ("end spacing", self.end_spacing),
            ("max edge length", self.max_edge),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(InterfaceError::invalid_spacing(
                    segment,
                    format!("{name} must be positive, got {value}"),
                ));
            }
        }

        let ratios = [
            ("start growth ratio", self.start_growth),
            ("end growth ratio", self.end_growth),
        ];
        for (name, value) in ratios {
            if !(value.is_finite() && value >= 1.0) {
                return Err(InterfaceError::invalid_spacing(
                    segment,
                    format!("{name} must be >= 1, got {value}"),
                ));
            }
        }

        Ok(())
    }

    /// Scales every length of the law by `1 / length`.
    pub fn normalized(&self, length: f64) -> Self {
        Self {
            start_spacing: self.start_spacing / length,
            end_spacing: self.end_spacing / length,
            max_edge: self.max_edge / length,
            ..*self
        }
    }
}

/// A spacing override as found under `spacing.profileSegments`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingOverride {
    #[serde(default)]
    pub cell_type: CellType,
    pub stretching: [f64; 5],
}

/// Resolved spacing of one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSpacing {
    pub law: SpacingLaw,
    pub cell_type: CellType,
}

/// Resolves the law and cell type of every segment of a profile.
///
/// Segments without an override get [`SpacingLaw::uniform`] with
/// `default_spacing` and triangles, and a `DefaultSpacing` notice. Override
/// keys that name no segment get an `UnusedSpacingOverride` notice.
pub fn resolve_spacing(
    profile: &Profile,
    overrides: &BTreeMap<String, SpacingOverride>,
    default_spacing: f64,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<SegmentSpacing>> {
    let mut by_index: HashMap<usize, &SpacingOverride> = HashMap::new();
    for (key, value) in overrides {
        match key.trim().parse::<usize>() {
            Ok(index) if index < profile.len() && !by_index.contains_key(&index) => {
                by_index.insert(index, value);
            }
            _ => diagnostics.notice(DiagnosticKind::UnusedSpacingOverride { key: key.clone() }),
        }
    }

    let mut resolved = Vec::with_capacity(profile.len());
    for index in 0..profile.len() {
        let spacing = match by_index.get(&index) {
            Some(value) => SegmentSpacing {
                law: SpacingLaw::from_array(value.stretching),
                cell_type: value.cell_type,
            },
            None => {
                diagnostics.notice(DiagnosticKind::DefaultSpacing { segment: index });
                SegmentSpacing {
                    law: SpacingLaw::uniform(default_spacing),
                    cell_type: CellType::Tri,
                }
            }
        };
        spacing.law.validate(index)?;
        resolved.push(spacing);
    }

    tracing::debug!(
        segments = resolved.len(),
        overrides = by_index.len(),
        "spacing resolved"
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle() -> Profile {
        "0 0\n0 1\n\n0 1\n1 1\n\n1 1\n1 0\n".parse().unwrap()
    }

    #[test]
    fn test_default_spacing_for_missing_overrides() {
        let mut diagnostics = Diagnostics::new();
        let resolved = resolve_spacing(&rectangle(), &BTreeMap::new(), 0.1, &mut diagnostics).unwrap();
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0].law, SpacingLaw::uniform(0.1));
        assert_eq!(resolved[0].cell_type, CellType::Tri);
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_override_applies_to_segment() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "1".to_string(),
            SpacingOverride {
                cell_type: CellType::Quad,
                stretching: [0.01, 1.2, 0.02, 1.1, 0.05],
            },
        );
        let mut diagnostics = Diagnostics::new();
        let resolved = resolve_spacing(&rectangle(), &overrides, 0.1, &mut diagnostics).unwrap();
        assert_eq!(resolved[1].cell_type, CellType::Quad);
        assert_eq!(resolved[1].law.start_growth, 1.2);
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_unknown_override_key_is_reported() {
        let mut overrides = BTreeMap::new();
        let value = SpacingOverride {
            cell_type: CellType::Tri,
            stretching: [0.1, 1.0, 0.1, 1.0, 0.1],
        };
        overrides.insert("7".to_string(), value);
        overrides.insert("rim".to_string(), value);
        let mut diagnostics = Diagnostics::new();
        resolve_spacing(&rectangle(), &overrides, 0.1, &mut diagnostics).unwrap();
        let unused = diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::UnusedSpacingOverride { .. }))
            .count();
        assert_eq!(unused, 2);
    }

    #[test]
    fn test_invalid_growth_ratio() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "0".to_string(),
            SpacingOverride {
                cell_type: CellType::Tri,
                stretching: [0.1, 0.9, 0.1, 1.0, 0.1],
            },
        );
        let err = resolve_spacing(&rectangle(), &overrides, 0.1, &mut Diagnostics::new()).unwrap_err();
        assert!(matches!(err, InterfaceError::InvalidSpacing { segment: 0, .. }));
    }

    #[test]
    fn test_invalid_default_spacing() {
        let err = resolve_spacing(&rectangle(), &BTreeMap::new(), 0.0, &mut Diagnostics::new()).unwrap_err();
        assert!(matches!(err, InterfaceError::InvalidSpacing { .. }));
    }

    #[test]
    fn test_normalized() {
        let law = SpacingLaw::from_array([0.2, 1.1, 0.4, 1.2, 1.0]).normalized(2.0);
        assert_eq!(law.start_spacing, 0.1);
        assert_eq!(law.end_spacing, 0.2);
        assert_eq!(law.max_edge, 0.5);
        assert_eq!(law.end_growth, 1.2);
    }

    #[test]
    fn test_override_deserializes() {
        let value: SpacingOverride =
            serde_json::from_str(r#"{"cellType": "quad", "stretching": [0.1, 1.0, 0.1, 1.0, 0.1]}"#).unwrap();
        assert_eq!(value.cell_type, CellType::Quad);
    }
}
