//! # Generation Pipeline
//!
//! Runs every stage for one interface:
//!
//! ```text
//! profile → spacing → distribution → curve mesher → revolver → assembler → placement
//! ```
//!
//! Each run owns its data; nothing is cached between runs.

use crate::assemble::assemble;
use crate::curve::mesh_segment;
use crate::diagnostic::{DiagnosticKind, Diagnostics};
use crate::error::Result;
use crate::mesh::InterfaceMesh;
use crate::profile::{read_profile, Profile, Zone};
use crate::revolve::{revolve_zones, Station, ZoneMesh, ZoneStations};
use crate::settings::InterfaceConfig;
use crate::spacing::{distribute, resolve_spacing, SegmentSpacing};
use glam::DVec3;
use serde::Serialize;

/// Ring layout of one generated zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSummary {
    pub zone: Zone,
    pub ring_dims: Vec<usize>,
    pub triangles: usize,
    pub quads: usize,
}

impl From<&ZoneMesh> for ZoneSummary {
    fn from(mesh: &ZoneMesh) -> Self {
        Self {
            zone: mesh.zone,
            ring_dims: mesh.ring_dims(),
            triangles: mesh.triangles.len(),
            quads: mesh.quads.len(),
        }
    }
}

/// Outcome of one generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Closed, placed interface mesh.
    pub mesh: InterfaceMesh,
    pub diagnostics: Diagnostics,
    /// Per-zone ring layout of the top half.
    pub zones: Vec<ZoneSummary>,
}

/// Reads the configured profile and generates the interface.
///
/// # Errors
///
/// Any fatal [`crate::InterfaceError`]; diagnostics collected before the
/// failure are logged but not returned.
pub fn generate_interface(config: &InterfaceConfig) -> Result<GenerationReport> {
    let profile = read_profile(&config.general.input_profile)?;
    generate_from_profile(&profile, config)
}

/// Generates the interface of an already parsed profile.
pub fn generate_from_profile(profile: &Profile, config: &InterfaceConfig) -> Result<GenerationReport> {
    config.validate()?;
    let settings = config.revolve_settings()?;
    let placement = config.placement()?;
    let mut diagnostics = Diagnostics::new();

    let spacing = resolve_spacing(
        profile,
        &config.spacing.profile_segments,
        settings.max_edge_length,
        &mut diagnostics,
    )?;
    let zones = mesh_profile(profile, &spacing, &mut diagnostics)?;
    let zone_meshes = revolve_zones(&zones, &settings, &mut diagnostics)?;
    let mut mesh = assemble(&zone_meshes)?;

    let bbox = profile.bounding_box();
    let canonical_center = DVec3::new(bbox.midpoint().x, 0.0, 0.0);
    placement.apply(&mut mesh, canonical_center);

    let zones: Vec<ZoneSummary> = zone_meshes.iter().map(ZoneSummary::from).collect();
    tracing::info!(
        segments = profile.len(),
        zones = zones.len(),
        points = mesh.point_count(),
        triangles = mesh.triangle_count(),
        quads = mesh.quad_count(),
        area = mesh.surface_area(),
        warnings = diagnostics.warning_count(),
        "interface generated"
    );

    Ok(GenerationReport {
        mesh,
        diagnostics,
        zones,
    })
}

/// Meshes every segment and groups the stations by zone.
///
/// The first station of each non-empty zone is the point it shares with the
/// previous zone, or the profile start.
pub fn mesh_profile(
    profile: &Profile,
    spacing: &[SegmentSpacing],
    diagnostics: &mut Diagnostics,
) -> Result<Vec<ZoneStations>> {
    let mut zones = Vec::with_capacity(Zone::ALL.len());

    for zone in Zone::ALL {
        let mut stations: Vec<Station> = Vec::new();
        for index in profile.zone_segments(zone) {
            let segment = &profile.segments()[index];
            let SegmentSpacing { law, cell_type } = spacing[index];

            let distribution = distribute(&law.normalized(segment.arc_length()));
            if let Some(fallback) = distribution.fallback {
                diagnostics.notice(DiagnosticKind::DistributionFallback {
                    segment: index,
                    fallback,
                });
            }

            let points = mesh_segment(segment, &distribution.values)?;
            let skip = usize::from(!stations.is_empty());
            stations.extend(points.into_iter().skip(skip).map(|position| Station {
                position,
                cell_type,
            }));
            tracing::debug!(
                segment = index,
                kind = ?segment.kind(),
                %zone,
                points = distribution.values.len(),
                "segment meshed"
            );
        }
        zones.push(ZoneStations { zone, stations });
    }

    Ok(zones)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GeneralSettings, InterfaceKind, PropertySettings, SpacingSettings};
    use std::path::PathBuf;

    fn config() -> InterfaceConfig {
        InterfaceConfig {
            general: GeneralSettings {
                input_profile: PathBuf::from("unused.txt"),
                kind: InterfaceKind::Profile,
            },
            properties: PropertySettings::default(),
            spacing: SpacingSettings::default(),
        }
    }

    fn rectangle() -> Profile {
        "0 0\n0 1\n\n0 1\n1 1\n\n1 1\n1 0\n".parse().unwrap()
    }

    #[test]
    fn test_zone_stations_share_boundaries() {
        let profile = rectangle();
        let mut diagnostics = Diagnostics::new();
        let spacing = resolve_spacing(&profile, &Default::default(), 0.1, &mut diagnostics).unwrap();
        let zones = mesh_profile(&profile, &spacing, &mut diagnostics).unwrap();

        assert_eq!(zones.len(), 3);
        for zone in &zones {
            assert_eq!(zone.stations.len(), 11);
        }
        assert_eq!(zones[0].stations[10].position, zones[1].stations[0].position);
        assert_eq!(zones[1].stations[10].position, zones[2].stations[0].position);
    }

    #[test]
    fn test_segments_within_zone_join_once() {
        // Two side segments meeting at (0.5, 1)
        let profile: Profile = "0 0\n0 1\n\n0 1\n0.5 1\n\n0.5 1\n1 1\n\n1 1\n1 0\n".parse().unwrap();
        let mut diagnostics = Diagnostics::new();
        let spacing = resolve_spacing(&profile, &Default::default(), 0.1, &mut diagnostics).unwrap();
        let zones = mesh_profile(&profile, &spacing, &mut diagnostics).unwrap();
        assert_eq!(zones[1].stations.len(), 11);
    }

    #[test]
    fn test_generate_reports_zones() {
        let report = generate_from_profile(&rectangle(), &config()).unwrap();
        assert_eq!(report.zones.len(), 3);
        assert_eq!(report.zones[0].ring_dims[0], 1);
        assert_eq!(*report.zones[2].ring_dims.last().unwrap(), 1);
        assert!(report.mesh.validate());
    }

    #[test]
    fn test_default_spacing_is_reported() {
        let report = generate_from_profile(&rectangle(), &config()).unwrap();
        let defaults = report
            .diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::DefaultSpacing { .. }))
            .count();
        assert_eq!(defaults, 3);
    }

    #[test]
    fn test_missing_profile_file() {
        let mut config = config();
        config.general.input_profile = PathBuf::from("/nonexistent/profile.txt");
        assert!(generate_interface(&config).is_err());
    }
}
