//! Direction classifier: swipe vectors and arrow keys to direction symbols.
//!
//! The angle of a swipe is measured as `atan2(dx, dy)`: the horizontal
//! component goes first, so straight down is 0°, right is 90°, left is −90°
//! and up is ±180°. The angle is rounded to the nearest quarter turn with
//! round-half-to-even, which sends exact diagonals to the vertical axis:
//!
//! | angle | quarters | rounded | direction |
//! |-------|----------|---------|-----------|
//! | 45°   | 0.5      | 0       | Down      |
//! | −45°  | −0.5     | 0       | Down      |
//! | 135°  | 1.5      | 2       | Up        |
//! | −135° | −1.5     | −2      | Up        |

use crate::direction::{Direction, Key, Point};

/// Default noise threshold in pixels.
pub const DEFAULT_MIN_DISTANCE: f64 = 60.0;

/// Quarter values this close to a tie are treated as exact ties.
const TIE_EPSILON: f64 = 1e-9;

/// Classify the swipe from `start` to `end`.
///
/// Returns `Direction::None` when the displacement is shorter than
/// `min_distance` (a zero-length swipe is always `None`).
pub fn classify_vector(start: Point, end: Point, min_distance: f64) -> Direction {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let magnitude = dx.hypot(dy);

    // Written as a negated comparison so NaN input also lands here.
    if !(magnitude >= min_distance) || magnitude == 0.0 {
        return Direction::None;
    }

    let azimuth = dx.atan2(dy).to_degrees();
    match round_to_quarter(azimuth) {
        2 | -2 => Direction::Up,
        1 => Direction::Right,
        0 => Direction::Down,
        -1 => Direction::Left,
        _ => Direction::None,
    }
}

/// Classify a key. Only the four arrow keys map to a direction.
pub fn classify_key(key: Key) -> Direction {
    match key {
        Key::Left => Direction::Left,
        Key::Up => Direction::Up,
        Key::Down => Direction::Down,
        Key::Right => Direction::Right,
        _ => Direction::None,
    }
}

/// Round an angle in degrees to a whole number of quarter turns, ties to even.
fn round_to_quarter(degrees: f64) -> i64 {
    let quarters = degrees / 90.0;
    let whole = quarters.trunc();
    let snapped = if ((quarters - whole).abs() - 0.5).abs() < TIE_EPSILON {
        whole + 0.5_f64.copysign(quarters)
    } else {
        quarters
    };
    snapped.round_ties_even() as i64
}
