//! Projection of raw star coordinates onto the drawing board.
//!
//! Raw coordinates are centimetres in an arbitrary frame. The board is a
//! fixed 800x600 pixel area with a 40 pixel padding. Each axis range is
//! widened to at least 200 cm so that a tight cluster is not blown up to
//! fill the whole board. After the linear fit, positions are pushed away
//! from the board centre by a separation factor (at most 1.6) chosen so
//! that no star leaves the usable area, then clamped as a last resort.
//!
//! Board positions are a rendering concern. The planners only use them for
//! the fallback weight of edges whose distance is invalid.

use burro_types::Position;

/// Board width in pixels.
pub const BOARD_WIDTH: f64 = 800.0;

/// Board height in pixels.
pub const BOARD_HEIGHT: f64 = 600.0;

/// Padding around the usable area in pixels.
pub const BOARD_PADDING: f64 = 40.0;

/// Minimum raw range per axis in centimetres.
pub const MIN_AXIS_RANGE_CM: f64 = 200.0;

/// Preferred radial spreading factor around the board centre.
pub const DESIRED_SEPARATION: f64 = 1.6;

/// Fitted projection from raw centimetres to board pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    min_x: f64,
    min_y: f64,
    range_x: f64,
    range_y: f64,
    separation: f64,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::fit(&[])
    }
}

impl BoardLayout {
    /// Fit the projection to a set of raw coordinates.
    pub fn fit(raw: &[Position]) -> Self {
        let (min_x, max_x, min_y, max_y) = bounds(raw);

        let range_x = (max_x - min_x).max(MIN_AXIS_RANGE_CM);
        let range_y = (max_y - min_y).max(MIN_AXIS_RANGE_CM);

        let mut layout = Self {
            min_x,
            min_y,
            range_x,
            range_y,
            separation: 1.0,
        };

        let center = Self::center();
        let mut allowed = f64::INFINITY;
        for &point in raw {
            let base = layout.base(point);
            if let Some(limit) = axis_limit(base.x, center.x, BOARD_PADDING, usable_width()) {
                allowed = allowed.min(limit);
            }
            if let Some(limit) = axis_limit(base.y, center.y, BOARD_PADDING, usable_height()) {
                allowed = allowed.min(limit);
            }
        }
        if !allowed.is_finite() || allowed < 1.0 {
            allowed = 1.0;
        }
        layout.separation = DESIRED_SEPARATION.min(allowed);
        layout
    }

    /// Radial separation factor that was chosen for this layout.
    pub const fn separation(&self) -> f64 {
        self.separation
    }

    /// Project a raw coordinate onto the board.
    pub fn project(&self, raw: Position) -> Position {
        let base = self.base(raw);
        let center = Self::center();
        let x = (base.x - center.x).mul_add(self.separation, center.x);
        let y = (base.y - center.y).mul_add(self.separation, center.y);
        Position::new(
            x.clamp(BOARD_PADDING, BOARD_PADDING + usable_width()),
            y.clamp(BOARD_PADDING, BOARD_PADDING + usable_height()),
        )
    }

    /// Linear fit without separation.
    fn base(&self, raw: Position) -> Position {
        let norm_x = (raw.x - self.min_x) / self.range_x;
        let norm_y = (raw.y - self.min_y) / self.range_y;
        Position::new(
            norm_x.mul_add(usable_width(), BOARD_PADDING),
            norm_y.mul_add(usable_height(), BOARD_PADDING),
        )
    }

    fn center() -> Position {
        Position::new(
            BOARD_PADDING + usable_width() / 2.0,
            BOARD_PADDING + usable_height() / 2.0,
        )
    }
}

fn usable_width() -> f64 {
    2.0f64.mul_add(-BOARD_PADDING, BOARD_WIDTH)
}

fn usable_height() -> f64 {
    2.0f64.mul_add(-BOARD_PADDING, BOARD_HEIGHT)
}

/// Largest factor that keeps `base` inside `[low, low + extent]` when
/// scaled radially around `center`. `None` when `base` sits on the centre.
fn axis_limit(base: f64, center: f64, low: f64, extent: f64) -> Option<f64> {
    let offset = base - center;
    if offset.abs() <= f64::EPSILON {
        return None;
    }
    if offset > 0.0 {
        Some((low + extent - center) / offset)
    } else {
        Some((center - low) / -offset)
    }
}

fn bounds(raw: &[Position]) -> (f64, f64, f64, f64) {
    if raw.is_empty() {
        return (0.0, 1.0, 0.0, 1.0);
    }
    raw.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(min_x, max_x, min_y, max_y), p| {
            (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inside_board(p: Position) -> bool {
        (BOARD_PADDING..=BOARD_WIDTH - BOARD_PADDING).contains(&p.x)
            && (BOARD_PADDING..=BOARD_HEIGHT - BOARD_PADDING).contains(&p.y)
    }

    #[test]
    fn empty_layout_is_usable() {
        let layout = BoardLayout::default();
        let p = layout.project(Position::ORIGIN);
        assert!(inside_board(p));
    }

    #[test]
    fn extremes_map_to_padding_edges() {
        let raw = [Position::new(0.0, 0.0), Position::new(1000.0, 500.0)];
        let layout = BoardLayout::fit(&raw);
        let low = layout.project(Position::new(0.0, 0.0));
        let high = layout.project(Position::new(1000.0, 500.0));
        assert!((low.x - BOARD_PADDING).abs() < 1e-9);
        assert!((low.y - BOARD_PADDING).abs() < 1e-9);
        assert!((high.x - (BOARD_WIDTH - BOARD_PADDING)).abs() < 1e-9);
        assert!((high.y - (BOARD_HEIGHT - BOARD_PADDING)).abs() < 1e-9);
    }

    #[test]
    fn small_clusters_get_widened_range_and_spread() {
        // 10 cm apart: the range is widened to 200 cm, so both stars sit
        // near the top-left and are spread out radially.
        let raw = [Position::new(0.0, 0.0), Position::new(10.0, 10.0)];
        let layout = BoardLayout::fit(&raw);
        assert!(layout.separation() >= 1.0);
        assert!(layout.separation() <= DESIRED_SEPARATION);
        for p in raw {
            assert!(inside_board(layout.project(p)));
        }
    }

    #[test]
    fn projection_never_leaves_the_board() {
        let raw: Vec<Position> = (0..20)
            .map(|i| Position::new(f64::from(i) * 37.0, f64::from(i % 5) * 91.0))
            .collect();
        let layout = BoardLayout::fit(&raw);
        for p in raw {
            assert!(inside_board(layout.project(p)));
        }
        // Points outside the fitted range are clamped.
        assert!(inside_board(layout.project(Position::new(-1.0e6, 1.0e6))));
    }
}
