//! Horizontal bounding box measured from a point collection.

use serde::{Deserialize, Serialize};

/// Round a coordinate to 4 decimal places.
///
/// All horizontal coordinates are rounded to this precision before any
/// equality check or subtraction, so that the declared bounds and the
/// scan-order cursor agree exactly.
pub fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// A projected bounding box in linear units (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Measure the envelope of a point collection.
    ///
    /// Coordinates are rounded to 4 decimals before comparison. Returns
    /// `None` for an empty collection — the bounds must be measured from
    /// the points, never assumed from configuration.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (x0, y0) = iter.next()?;
        let mut bbox = Self::new(round4(x0), round4(y0), round4(x0), round4(y0));
        for (x, y) in iter {
            let (x, y) = (round4(x), round4(y));
            bbox.min_x = bbox.min_x.min(x);
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_x = bbox.max_x.max(x);
            bbox.max_y = bbox.max_y.max(y);
        }
        Some(bbox)
    }

    /// Width of the box (x span).
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box (y span).
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round4() {
        assert_eq!(round4(1.00004999), 1.0);
        assert_eq!(round4(1.00005001), 1.0001);
        assert_eq!(round4(-115.123449), -115.1234);
    }

    #[test]
    fn test_from_points_measures_envelope() {
        let bbox =
            BoundingBox::from_points(vec![(2.0, 3.0), (0.0, 7.0), (5.0, 1.0)]).unwrap();
        assert_eq!(bbox.min_x, 0.0);
        assert_eq!(bbox.min_y, 1.0);
        assert_eq!(bbox.max_x, 5.0);
        assert_eq!(bbox.max_y, 7.0);
    }

    #[test]
    fn test_from_points_empty() {
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }
}
