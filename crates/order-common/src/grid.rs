//! Snapping of requested extents onto a fixed lon/lat lattice.
//!
//! Users draw bounding boxes freely. Enlarging every edge outward onto a
//! shared grid makes nearby requests collapse onto the same extent, so the
//! processing backend can reuse files it already produced.

use crate::bbox::{LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::{BoundingBox, OrderError, OrderResult};

/// Generate `start, start + resolution, start + 2 * resolution, ...` up to
/// and including `end`.
///
/// Values are computed as `start + i * resolution` so rounding errors do not
/// accumulate along the grid.
pub fn generate_1d_grid(start: f64, end: f64, resolution: f64) -> OrderResult<Vec<f64>> {
    if resolution == 0.0 {
        return Err(OrderError::InvalidConfiguration(
            "grid resolution cannot be zero".to_string(),
        ));
    }
    if !resolution.is_finite() || resolution < 0.0 {
        return Err(OrderError::InvalidConfiguration(format!(
            "grid resolution must be a positive number, got {}",
            resolution
        )));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(OrderError::InvalidConfiguration(format!(
            "grid bounds must be finite, got [{}, {}]",
            start, end
        )));
    }

    let mut grid = Vec::new();
    let mut step: u64 = 0;
    loop {
        let value = start + step as f64 * resolution;
        if value > end {
            break;
        }
        grid.push(value);
        step += 1;
    }

    Ok(grid)
}

/// Index of the grid value closest to `value`.
///
/// The first candidate with the smallest distance wins, so on a tie in an
/// ascending grid the lower value is picked. Returns `None` for an empty
/// grid or a NaN value.
fn nearest_index(value: f64, grid: &[f64]) -> Option<usize> {
    let mut best_delta = f64::INFINITY;
    let mut result = None;

    for (index, item) in grid.iter().enumerate() {
        let delta = (value - item).abs();
        if delta < best_delta {
            result = Some(index);
            best_delta = delta;
        }
        if delta == 0.0 {
            break;
        }
    }

    result
}

/// Return the item from `grid` which is closest to `value`.
pub fn snap_value(value: f64, grid: &[f64]) -> OrderResult<f64> {
    nearest_index(value, grid)
        .map(|index| grid[index])
        .ok_or_else(|| OrderError::InternalError(format!("Could not snap value {}", value)))
}

/// Snap `value` onto `grid`, moving one step outward when the nearest grid
/// value would cut the original coordinate off.
///
/// With `floor` the coordinate is a lower bound and the result is never
/// above `value`, otherwise it is an upper bound and never below. At the
/// first (resp. last) grid position there is no room to step, and the
/// snapped value is returned as is.
pub fn enlarge_coordinate(value: f64, grid: &[f64], floor: bool) -> OrderResult<f64> {
    let index = nearest_index(value, grid)
        .ok_or_else(|| OrderError::InternalError(format!("Could not snap value {}", value)))?;
    let snapped = grid[index];

    let result = if floor {
        if snapped <= value {
            snapped
        } else {
            index
                .checked_sub(1)
                .map(|previous| grid[previous])
                .unwrap_or(snapped)
        }
    } else if snapped >= value {
        snapped
    } else {
        grid.get(index + 1).copied().unwrap_or(snapped)
    };

    Ok(result)
}

/// Adjust a user supplied bbox to the grid of the given resolution.
///
/// Both corners are enlarged outward, so the returned box contains the
/// original one.
pub fn snap_bbox_to_grid(resolution: f64, bbox: &BoundingBox) -> OrderResult<BoundingBox> {
    let x_grid = generate_1d_grid(LONGITUDE_RANGE.0, LONGITUDE_RANGE.1, resolution)?;
    let y_grid = generate_1d_grid(LATITUDE_RANGE.0, LATITUDE_RANGE.1, resolution)?;

    Ok(BoundingBox {
        x0: enlarge_coordinate(bbox.x0, &x_grid, true)?,
        y0: enlarge_coordinate(bbox.y0, &y_grid, true)?,
        x1: enlarge_coordinate(bbox.x1, &x_grid, false)?,
        y1: enlarge_coordinate(bbox.y1, &y_grid, false)?,
    })
}
