//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// Valid longitude range, in degrees.
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Valid latitude range, in degrees.
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// A geographic bounding box in EPSG:4326 degrees.
///
/// Corners are kept as supplied by the user: `x0 < x1` and `y0 < y1` are
/// not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Parse an order bbox string: "x0,y0,x1,y1"
    ///
    /// Only the shape and the numbers are checked here, see
    /// [`BoundingBox::check_ranges`] for the coordinate limits.
    pub fn from_order_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let mut values = [0.0f64; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }

    /// Check that both x coordinates are valid longitudes and both y
    /// coordinates are valid latitudes. NaN never passes.
    pub fn check_ranges(&self) -> Result<(), BboxParseError> {
        let in_range = |v: f64, (lo, hi): (f64, f64)| lo <= v && v <= hi;

        let valid_x = in_range(self.x0, LONGITUDE_RANGE) && in_range(self.x1, LONGITUDE_RANGE);
        let valid_y = in_range(self.y0, LATITUDE_RANGE) && in_range(self.y1, LATITUDE_RANGE);

        if valid_x && valid_y {
            Ok(())
        } else {
            Err(BboxParseError::OutOfRange(self.to_order_string()))
        }
    }

    /// Render back to the "x0,y0,x1,y1" form used in order options.
    pub fn to_order_string(&self) -> String {
        format!("{},{},{},{}", self.x0, self.y0, self.x1, self.y1)
    }

    /// Check if `other` lies completely inside this bbox (edges included).
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.x0 <= other.x0 && self.y0 <= other.y0 && self.x1 >= other.x1 && self.y1 >= other.y1
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'x0,y0,x1,y1'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),

    #[error("BBOX out of range: {0}")]
    OutOfRange(String),
}
