//! Tests for the ring revolver.

use super::*;

fn stations(points: &[(f64, f64)]) -> Vec<Station> {
    points
        .iter()
        .map(|&(x, y)| Station {
            position: DVec2::new(x, y),
            cell_type: CellType::Tri,
        })
        .collect()
}

fn line(from: (f64, f64), to: (f64, f64), intervals: usize) -> Vec<(f64, f64)> {
    (0..=intervals)
        .map(|k| {
            let t = k as f64 / intervals as f64;
            (from.0 + t * (to.0 - from.0), from.1 + t * (to.1 - from.1))
        })
        .collect()
}

/// Rectangle: front cap up the axis, rim at r = 1, back cap down to the axis.
fn rectangle_zones() -> Vec<ZoneStations> {
    vec![
        ZoneStations {
            zone: Zone::Front,
            stations: stations(&line((0.0, 0.0), (0.0, 1.0), 10)),
        },
        ZoneStations {
            zone: Zone::Side,
            stations: stations(&line((0.0, 1.0), (1.0, 1.0), 10)),
        },
        ZoneStations {
            zone: Zone::Back,
            stations: stations(&line((1.0, 1.0), (1.0, 0.0), 10)),
        },
    ]
}

fn settings(refinement_factor: f64) -> RevolveSettings {
    RevolveSettings::new(0.1, refinement_factor, 1, 1).unwrap()
}

#[test]
fn test_rectangle_ring_dims() {
    let mut diagnostics = Diagnostics::new();
    let meshes = revolve_zones(&rectangle_zones(), &settings(1.0), &mut diagnostics).unwrap();
    assert_eq!(meshes.len(), 3);

    assert_eq!(
        meshes[0].ring_dims(),
        vec![1, 10, 10, 10, 19, 19, 19, 28, 28, 37, 37]
    );
    assert_eq!(meshes[1].ring_dims(), vec![37; 11]);
    assert_eq!(
        meshes[2].ring_dims(),
        vec![37, 37, 37, 37, 37, 28, 28, 19, 19, 10, 1]
    );
    assert_eq!(diagnostics.warning_count(), 0);
}

#[test]
fn test_zones_share_boundary_rings() {
    let meshes = revolve_zones(&rectangle_zones(), &settings(1.0), &mut Diagnostics::new()).unwrap();
    assert_eq!(meshes[0].shared, 0);
    assert_eq!(meshes[1].shared, 37);
    assert_eq!(meshes[2].shared, 37);
    assert_eq!(meshes[1].rings[0].points, meshes[0].last_ring().unwrap().points);
}

#[test]
fn test_every_ring_splits_into_groups() {
    let meshes = revolve_zones(&rectangle_zones(), &settings(0.0), &mut Diagnostics::new()).unwrap();
    // Pole start without refinement: floor(4 / 2) groups
    for mesh in &meshes {
        for ring in &mesh.rings {
            assert!(ring.is_pole() || (ring.dim() - 1) % 2 == 0);
        }
    }
}

#[test]
fn test_off_axis_start_seeds_an_arc() {
    let zones = vec![ZoneStations {
        zone: Zone::Side,
        stations: stations(&line((0.0, 1.0), (1.0, 1.0), 4)),
    }];
    let meshes = revolve_zones(&zones, &settings(0.0), &mut Diagnostics::new()).unwrap();
    let dims = meshes[0].ring_dims();
    // floor(pi / 0.1) = 31 edges, 31 - 7 = 24, 24 / 2 = 12 groups
    assert_eq!(dims[0], 13);
    assert!(dims.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(*dims.last().unwrap(), 37);
    assert_eq!(meshes[0].points.len(), dims.iter().sum::<usize>());
}

#[test]
fn test_interior_station_on_axis() {
    let mut points = line((0.0, 0.0), (0.0, 1.0), 4);
    points.extend(line((0.0, 1.0), (1.0, 0.0), 4).into_iter().skip(1));
    points.extend(line((1.0, 0.0), (2.0, 1.0), 4).into_iter().skip(1));
    let zones = vec![ZoneStations {
        zone: Zone::Front,
        stations: stations(&points),
    }];
    let err = revolve_zones(&zones, &settings(0.0), &mut Diagnostics::new()).unwrap_err();
    assert!(matches!(err, InterfaceError::DegenerateGeometry { .. }));
}

#[test]
fn test_fixed_layers_clamped() {
    let zones = vec![
        ZoneStations {
            zone: Zone::Front,
            stations: stations(&line((0.0, 0.0), (0.0, 1.0), 3)),
        },
        ZoneStations {
            zone: Zone::Side,
            stations: stations(&line((0.0, 1.0), (1.0, 1.0), 3)),
        },
    ];
    let settings = RevolveSettings::new(0.1, 0.0, 10, 1).unwrap();
    let mut diagnostics = Diagnostics::new();
    revolve_zones(&zones, &settings, &mut diagnostics).unwrap();
    assert!(diagnostics.iter().any(|d| matches!(
        d.kind,
        DiagnosticKind::FixedLayersClamped { requested: 10, .. }
    )));
}

#[test]
fn test_empty_zones_are_skipped() {
    let zones = vec![
        ZoneStations {
            zone: Zone::Front,
            stations: Vec::new(),
        },
        ZoneStations {
            zone: Zone::Side,
            stations: stations(&line((0.0, 0.5), (1.0, 0.5), 2)),
        },
    ];
    let meshes = revolve_zones(&zones, &settings(0.0), &mut Diagnostics::new()).unwrap();
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].zone, Zone::Side);
}

#[test]
fn test_no_stations() {
    assert!(revolve_zones(&[], &settings(0.0), &mut Diagnostics::new()).is_err());
}
