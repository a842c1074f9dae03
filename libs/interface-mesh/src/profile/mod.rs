//! # Meridional Profile
//!
//! The 2D cross-section revolved into the interface surface. `x` is the
//! axial coordinate, `y` the radial one.
//!
//! ## Pipeline
//!
//! ```text
//! text → parse_segments → validate_segments → classify_kind / classify_zone → Profile
//! ```

pub mod reader;
pub mod segment;

pub use reader::{parse_segments, read_profile, validate_segments};
pub use segment::{classify_kind, classify_zone, BoundingBox, Segment, SegmentKind, Zone};

use crate::error::{InterfaceError, Result};
use glam::DVec2;
use std::str::FromStr;

/// A validated, classified profile.
///
/// # Example
///
/// ```rust
/// use interface_mesh::profile::{Profile, Zone};
///
/// let profile: Profile = "0 0\n0 1\n\n0 1\n1 1\n\n1 1\n1 0\n".parse().unwrap();
/// assert_eq!(profile.len(), 3);
/// assert_eq!(profile.segment(1).unwrap().zone(), Zone::Side);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    segments: Vec<Segment>,
    bbox: BoundingBox,
}

impl Profile {
    /// Validates raw segments, classifies them and checks zone ordering.
    pub fn new(raw: Vec<Vec<DVec2>>) -> Result<Self> {
        validate_segments(&raw)?;

        let mut segments: Vec<Segment> = raw
            .into_iter()
            .map(|points| Segment::new(points, Zone::Front))
            .collect();

        let bbox = segments
            .iter()
            .map(|s| *s.bounding_box())
            .reduce(|a, b| a.union(&b))
            .ok_or_else(|| InterfaceError::malformed("profile holds no segment", None))?;

        for segment in &mut segments {
            let zone = classify_zone(segment.bounding_box(), &bbox);
            segment.set_zone(zone);
        }

        for (index, pair) in segments.windows(2).enumerate() {
            if pair[1].zone() < pair[0].zone() {
                return Err(InterfaceError::malformed(
                    format!(
                        "segment {} is {} but follows a {} segment; zones must run front, side, back",
                        index + 1,
                        pair[1].zone(),
                        pair[0].zone()
                    ),
                    None,
                ));
            }
        }

        Ok(Self { segments, bbox })
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    /// First point of the profile.
    pub fn start(&self) -> DVec2 {
        self.segments[0].first()
    }

    /// Last point of the profile.
    pub fn end(&self) -> DVec2 {
        self.segments[self.segments.len() - 1].last()
    }

    /// Indices of the segments assigned to `zone`, in profile order.
    pub fn zone_segments(&self, zone: Zone) -> impl Iterator<Item = usize> + '_ {
        self.segments
            .iter()
            .enumerate()
            .filter(move |(_, s)| s.zone() == zone)
            .map(|(i, _)| i)
    }
}

impl FromStr for Profile {
    type Err = InterfaceError;

    fn from_str(text: &str) -> Result<Self> {
        Profile::new(parse_segments(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECTANGLE: &str = "0 0\n0 1\n\n0 1\n1 1\n\n1 1\n1 0\n";

    #[test]
    fn test_rectangle_zones() {
        let profile: Profile = RECTANGLE.parse().unwrap();
        let zones: Vec<Zone> = profile.segments().iter().map(|s| s.zone()).collect();
        assert_eq!(zones, vec![Zone::Front, Zone::Side, Zone::Back]);
        assert_eq!(profile.segment(0).unwrap().kind(), SegmentKind::VLine);
        assert_eq!(profile.segment(1).unwrap().kind(), SegmentKind::HLine);
        assert_eq!(profile.start(), DVec2::ZERO);
        assert_eq!(profile.end(), DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_zone_segments() {
        let profile: Profile = RECTANGLE.parse().unwrap();
        assert_eq!(profile.zone_segments(Zone::Side).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_rejects_zone_out_of_order() {
        // Back cap first, then front cap
        let text = "2 0\n2 1\n\n2 1\n0 0.2\n\n0 0.2\n0 0\n";
        let err = text.parse::<Profile>().unwrap_err();
        assert!(err.to_string().contains("zones must run"));
    }

    #[test]
    fn test_single_side_segment() {
        let profile: Profile = "0 1\n1 1\n".parse().unwrap();
        assert_eq!(profile.segment(0).unwrap().zone(), Zone::Side);
    }
}
