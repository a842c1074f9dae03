//! # Profile Segments
//!
//! Typed segments of a meridional profile with their shape classification,
//! bounding box and zone.

use config::constants::{COLINEARITY_TOLERANCE, FRONT_ZONE_AXIAL_FRACTION, SIDE_ZONE_RADIAL_FRACTION};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    /// All points share one axial coordinate.
    VLine,
    /// All points share one radial coordinate.
    HLine,
    /// Colinear points on an inclined line.
    Line,
    /// Anything else; meshed through a spline.
    Curve,
}

impl SegmentKind {
    /// Returns true for the kinds meshed by linear interpolation.
    #[inline]
    pub fn is_linear(self) -> bool {
        !matches!(self, SegmentKind::Curve)
    }
}

/// Region of the profile a segment belongs to.
///
/// Ordered as the revolver consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Front,
    Side,
    Back,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Front, Zone::Side, Zone::Back];
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::Front => "front",
            Zone::Side => "side",
            Zone::Back => "back",
        };
        f.write_str(name)
    }
}

/// Axis-aligned 2D bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl BoundingBox {
    /// Computes the bounding box of a non-empty point set.
    ///
    /// An empty slice yields a zero box.
    pub fn from_points(points: &[DVec2]) -> Self {
        let Some(first) = points.first() else {
            return Self {
                min: DVec2::ZERO,
                max: DVec2::ZERO,
            };
        };
        let (min, max) = points[1..]
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Self { min, max }
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn midpoint(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn extent(&self) -> DVec2 {
        self.max - self.min
    }
}

/// Classifies the shape of a point sequence.
///
/// Checks run in order: vertical line, horizontal line, colinear line, curve.
/// Fewer than two points classify as a curve.
pub fn classify_kind(points: &[DVec2]) -> SegmentKind {
    let [first, second, rest @ ..] = points else {
        return SegmentKind::Curve;
    };

    if points.iter().all(|p| p.x == first.x) {
        return SegmentKind::VLine;
    }
    if points.iter().all(|p| p.y == first.y) {
        return SegmentKind::HLine;
    }

    let direction = *second - *first;
    let colinear = rest
        .iter()
        .all(|p| direction.perp_dot(*p - *first).abs() < COLINEARITY_TOLERANCE);
    if colinear {
        SegmentKind::Line
    } else {
        SegmentKind::Curve
    }
}

/// Assigns a segment to a zone from its bounding box and the profile's.
///
/// - `side` when the segment's radial midpoint reaches the upper quarter of
///   the profile's radial extent
/// - `front` when the segment ends in the first half of the axial extent
/// - `back` otherwise
///
/// # Example
///
/// ```rust
/// use glam::DVec2;
/// use interface_mesh::profile::{classify_zone, BoundingBox, Zone};
///
/// let profile = BoundingBox { min: DVec2::ZERO, max: DVec2::ONE };
/// let cap = BoundingBox { min: DVec2::new(0.0, 0.0), max: DVec2::new(0.0, 1.0) };
/// let rim = BoundingBox { min: DVec2::new(0.0, 1.0), max: DVec2::new(1.0, 1.0) };
/// assert_eq!(classify_zone(&cap, &profile), Zone::Front);
/// assert_eq!(classify_zone(&rim, &profile), Zone::Side);
/// ```
pub fn classify_zone(segment: &BoundingBox, profile: &BoundingBox) -> Zone {
    let radial_mark = profile.min.y + SIDE_ZONE_RADIAL_FRACTION * profile.extent().y;
    let axial_mark = profile.min.x + FRONT_ZONE_AXIAL_FRACTION * profile.extent().x;

    if segment.midpoint().y >= radial_mark {
        Zone::Side
    } else if segment.max.x <= axial_mark {
        Zone::Front
    } else {
        Zone::Back
    }
}

/// One segment of a profile, referenced by its position in the profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    points: Vec<DVec2>,
    kind: SegmentKind,
    bbox: BoundingBox,
    zone: Zone,
}

impl Segment {
    /// Builds a segment from at least two validated points.
    pub(crate) fn new(points: Vec<DVec2>, zone: Zone) -> Self {
        let kind = classify_kind(&points);
        let bbox = BoundingBox::from_points(&points);
        Self {
            points,
            kind,
            bbox,
            zone,
        }
    }

    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    #[inline]
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    #[inline]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    #[inline]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub(crate) fn set_zone(&mut self, zone: Zone) {
        self.zone = zone;
    }

    #[inline]
    pub fn first(&self) -> DVec2 {
        self.points[0]
    }

    #[inline]
    pub fn last(&self) -> DVec2 {
        self.points[self.points.len() - 1]
    }

    /// Polyline length through every point.
    pub fn arc_length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}
