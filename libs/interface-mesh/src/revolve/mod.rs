//! # Ring Revolver
//!
//! Revolves the meshed profile zone by zone into rings of adaptive density.
//!
//! ## Algorithm
//!
//! 1. The angular group count `Δ` follows from the profile start
//!    ([`config::constants::compute_group_count`]); rings hold `1 + kΔ`
//!    points so every ring splits into `Δ` groups.
//! 2. The first zone is seeded with a pole or an arc of `1 + Δ` points; later
//!    zones are seeded with the previous zone's last ring.
//! 3. Each station adds one ring. Past the fixed layers, a ring whose
//!    circumferential edge exceeds the max edge length gains `Δ` points.
//! 4. A back zone closing on the axis sheds its density over a precomputed
//!    schedule and ends in a pole.

pub mod builder;
pub mod ring;
pub mod schedule;
pub mod stitch;

pub use builder::{ZoneMesh, ZoneMeshBuilder};
pub use ring::{ring_points, Ring};
pub use schedule::schedule_density_changes;
pub use stitch::{consecutive_distance_deviation, stitch_rings, StitchedCells};

use crate::diagnostic::{DiagnosticKind, Diagnostics};
use crate::error::{InterfaceError, Result};
use crate::profile::Zone;
use crate::spacing::CellType;
use config::constants::{compute_group_count, ring_edge_length, RevolveSettings, POLE_TOLERANCE};
use glam::DVec2;

/// One meshed profile point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub position: DVec2,
    /// Cell type of the band that ends at this station.
    pub cell_type: CellType,
}

/// The stations of one zone. The first station is the zone's seed: the
/// profile start for the first zone, the previous zone's last station
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneStations {
    pub zone: Zone,
    pub stations: Vec<Station>,
}

impl ZoneStations {
    /// Stations that add a ring.
    #[inline]
    pub fn new_stations(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }
}

#[inline]
fn on_axis(position: DVec2) -> bool {
    position.y.abs() < POLE_TOLERANCE
}

/// Revolves every non-empty zone into a [`ZoneMesh`].
///
/// # Errors
///
/// `DegenerateGeometry` when an interior station lies on the axis, and
/// `InvalidTopology` when zones do not chain.
pub fn revolve_zones(
    zones: &[ZoneStations],
    settings: &RevolveSettings,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<ZoneMesh>> {
    let zones: Vec<&ZoneStations> = zones.iter().filter(|z| z.new_stations() > 0).collect();
    let (Some(first_zone), Some(last_zone)) = (zones.first(), zones.last()) else {
        return Err(InterfaceError::degenerate("profile has no station to revolve"));
    };

    let start = first_zone.stations[0].position;
    let end = last_zone.stations[last_zone.stations.len() - 1].position;
    check_interior_stations(&zones)?;

    let start_radius = (!on_axis(start)).then(|| start.y.abs());
    let delta = compute_group_count(settings.refinement_factor, start_radius, settings.max_edge_length);
    let ends_on_axis = on_axis(end);
    tracing::debug!(delta, starts_on_axis = start_radius.is_none(), ends_on_axis, "revolving profile");

    let mut meshes: Vec<ZoneMesh> = Vec::with_capacity(zones.len());
    let mut station_offset = 0;

    for (zone_index, zone) in zones.iter().enumerate() {
        let is_last = zone_index + 1 == zones.len();
        let mut builder = match meshes.last() {
            None if start_radius.is_none() => ZoneMeshBuilder::from_pole(zone.zone, delta, 0, start),
            None => ZoneMeshBuilder::from_arc(zone.zone, delta, 0, start, 1 + delta),
            Some(previous) => {
                let ring = previous
                    .last_ring()
                    .ok_or_else(|| InterfaceError::invalid_topology("previous zone has no ring"))?;
                ZoneMeshBuilder::from_shared(zone.zone, delta, ring)
            }
        };

        let closes_on_axis = is_last && ends_on_axis;
        revolve_zone(
            zone,
            &mut builder,
            delta,
            station_offset,
            closes_on_axis,
            settings,
            diagnostics,
        )?;

        let mesh = builder.finish();
        tracing::debug!(
            zone = %mesh.zone,
            rings = mesh.rings.len(),
            points = mesh.points.len(),
            triangles = mesh.triangles.len(),
            quads = mesh.quads.len(),
            "zone revolved"
        );
        station_offset += zone.new_stations();
        meshes.push(mesh);
    }

    Ok(meshes)
}

fn revolve_zone(
    zone: &ZoneStations,
    builder: &mut ZoneMeshBuilder,
    delta: usize,
    station_offset: usize,
    closes_on_axis: bool,
    settings: &RevolveSettings,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let count = zone.new_stations();
    let requested = match zone.zone {
        Zone::Front => settings.front_fixed_layers,
        Zone::Side => 0,
        Zone::Back => settings.back_fixed_layers,
    };
    let fixed = if requested > count + 1 {
        diagnostics.notice(DiagnosticKind::FixedLayersClamped {
            zone: zone.zone.to_string(),
            requested,
        });
        1
    } else {
        requested
    };

    let min_dim = 1 + delta;
    let mut dim = builder.current_dim().max(min_dim);

    let schedule = if closes_on_axis && zone.zone == Zone::Back {
        schedule_density_changes(dim, min_dim, delta, 1, count.saturating_sub(fixed))
    } else {
        Vec::new()
    };

    for (s, station) in zone.stations.iter().enumerate().skip(1) {
        let position = station.position;
        if closes_on_axis && s == count {
            builder.push_ring(station_offset + s, position, 1, station.cell_type, diagnostics)?;
            break;
        }

        if !schedule.is_empty() {
            if schedule.binary_search(&s).is_ok() {
                dim = dim.saturating_sub(delta).max(min_dim);
            }
        } else if s > fixed && ring_edge_length(position.y.abs(), dim) > settings.max_edge_length {
            dim += delta;
        }

        builder.push_ring(station_offset + s, position, dim, station.cell_type, diagnostics)?;
    }

    Ok(())
}

/// Only the first and last station of the profile may sit on the axis.
fn check_interior_stations(zones: &[&ZoneStations]) -> Result<()> {
    let mut stations: Vec<DVec2> = Vec::new();
    for (i, zone) in zones.iter().enumerate() {
        let skip = usize::from(i > 0);
        stations.extend(zone.stations.iter().skip(skip).map(|s| s.position));
    }

    let last = stations.len().saturating_sub(1);
    for (i, position) in stations.iter().enumerate() {
        if i != 0 && i != last && on_axis(*position) {
            return Err(InterfaceError::degenerate(format!(
                "station {i} at ({}, {}) lies on the rotation axis",
                position.x, position.y
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
