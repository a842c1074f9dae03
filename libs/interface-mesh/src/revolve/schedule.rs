//! # Density Change Schedule
//!
//! Spreads ring density changes evenly over a range of stations.

/// Stations at which the ring density changes by one group step.
///
/// `|start_dim - end_dim| / delta` changes are placed in
/// `first_station..=last_station`, anchored at `last_station` and spaced
/// evenly towards `first_station`. If there are at least as many changes as
/// stations, every station changes. The result is sorted ascending.
///
/// # Example
///
/// ```rust
/// use interface_mesh::revolve::schedule_density_changes;
///
/// // 37 → 10 points with 9 groups: three changes over stations 1..=9
/// assert_eq!(schedule_density_changes(37, 10, 9, 1, 9), vec![5, 7, 9]);
/// assert!(schedule_density_changes(10, 10, 9, 1, 9).is_empty());
/// ```
pub fn schedule_density_changes(
    start_dim: usize,
    end_dim: usize,
    delta: usize,
    first_station: usize,
    last_station: usize,
) -> Vec<usize> {
    if delta == 0 || last_station < first_station {
        return Vec::new();
    }

    let changes = start_dim.abs_diff(end_dim) / delta;
    if changes == 0 {
        return Vec::new();
    }

    let available = last_station - first_station + 1;
    if changes >= available {
        return (first_station..=last_station).collect();
    }

    let spacing = ((last_station - first_station) / changes).max(1);
    let mut stations: Vec<usize> = (0..changes).map(|k| last_station - k * spacing).collect();
    stations.sort_unstable();
    stations
}
