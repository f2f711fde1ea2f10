//! Geometric primitives for scene compilation.
//!
//! This module provides the small set of geometric types the compiler needs
//! to place shapes and resolve arrow endpoints.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in scene space
//! - [`Size`] - Width and height dimensions
//! - [`BBox`] - An axis-aligned bounding box anchored at its top-left corner
//! - [`Side`] - A named anchor on a bounding box
//! - [`Grid`] - Coordinate snapping to a regular grid
//!
//! # Coordinate System
//!
//! Scenes use the same coordinate system as the drawing surface:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use std::{fmt, str::FromStr};

use thiserror::Error;

/// A 2D point representing a position in scene coordinate space.
///
/// # Examples
///
/// ```
/// # use scenic_core::geometry::Point;
/// let start = Point::new(100.0, 30.0);
/// let end = Point::new(200.0, 30.0);
///
/// let delta = end.sub_point(start);
/// assert_eq!(delta.x(), 100.0);
/// assert_eq!(delta.y(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Subtracts another point from this point, returning the displacement
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }
}

/// A named anchor point on a bounding box.
///
/// Arrows attach to shapes through these anchors. Parsing is
/// case-insensitive, so `"Right"` and `"right"` name the same side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    #[default]
    Center,
}

impl Side {
    /// Returns the canonical lowercase name of the side.
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Center => "center",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known [`Side`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown side `{0}`")]
pub struct UnknownSideError(pub String);

impl FromStr for Side {
    type Err = UnknownSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "center" => Ok(Self::Center),
            _ => Err(UnknownSideError(s.to_string())),
        }
    }
}

/// An axis-aligned bounding box defined by its top-left corner and size.
///
/// Every rendered shape and text element registers one of these so that
/// arrows can later resolve their endpoints against it.
///
/// # Examples
///
/// ```
/// # use scenic_core::geometry::{BBox, Point, Side};
/// let bbox = BBox::new(0.0, 0.0, 100.0, 60.0);
///
/// assert_eq!(bbox.anchor(Side::Right), Point::new(100.0, 30.0));
/// assert_eq!(bbox.anchor(Side::Left), Point::new(0.0, 30.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BBox {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl BBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the x-coordinate of the left edge
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the top edge
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the width of the box
    pub fn width(self) -> f64 {
        self.w
    }

    /// Returns the height of the box
    pub fn height(self) -> f64 {
        self.h
    }

    /// Returns the center point of the box
    pub fn center(self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Returns the anchor point for the given side.
    ///
    /// Edge anchors sit at the midpoint of the named edge; `Center` is the
    /// middle of the box.
    pub fn anchor(self, side: Side) -> Point {
        match side {
            Side::Left => Point::new(self.x, self.y + self.h / 2.0),
            Side::Right => Point::new(self.x + self.w, self.y + self.h / 2.0),
            Side::Top => Point::new(self.x + self.w / 2.0, self.y),
            Side::Bottom => Point::new(self.x + self.w / 2.0, self.y + self.h),
            Side::Center => self.center(),
        }
    }
}

/// A snapping grid.
///
/// A grid of size `0` disables snapping. Otherwise every coordinate is
/// rounded to the nearest multiple of the grid size, with ties going to
/// the even multiple.
///
/// # Examples
///
/// ```
/// # use scenic_core::geometry::Grid;
/// let grid = Grid::new(10.0);
/// assert_eq!(grid.snap(13.0), 10.0);
/// assert_eq!(grid.snap(25.0), 20.0);
/// assert_eq!(Grid::disabled().snap(13.0), 13.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Grid {
    size: f64,
}

impl Grid {
    /// Creates a grid with the given cell size. A size of `0` disables snapping.
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    /// A grid that leaves coordinates untouched
    pub fn disabled() -> Self {
        Self { size: 0.0 }
    }

    /// Returns the cell size of the grid
    pub fn size(self) -> f64 {
        self.size
    }

    /// Returns true if this grid snaps coordinates
    pub fn is_enabled(self) -> bool {
        self.size != 0.0
    }

    /// Snaps a single coordinate to the grid.
    ///
    /// Values that round to zero always yield positive zero.
    pub fn snap(self, value: f64) -> f64 {
        if !self.is_enabled() {
            return value;
        }
        // Adding 0.0 turns -0.0 into 0.0
        (value / self.size).round_ties_even() * self.size + 0.0
    }

    /// Snaps both coordinates of a point independently
    pub fn snap_point(self, point: Point) -> Point {
        Point::new(self.snap(point.x()), self.snap(point.y()))
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_sub_point() {
        let delta = Point::new(200.0, 30.0).sub_point(Point::new(100.0, 30.0));

        assert_approx_eq!(f64, delta.x(), 100.0);
        assert_approx_eq!(f64, delta.y(), 0.0);
    }

    #[test]
    fn test_bbox_anchors() {
        let bbox = BBox::new(0.0, 0.0, 100.0, 60.0);

        assert_eq!(bbox.anchor(Side::Left), Point::new(0.0, 30.0));
        assert_eq!(bbox.anchor(Side::Right), Point::new(100.0, 30.0));
        assert_eq!(bbox.anchor(Side::Top), Point::new(50.0, 0.0));
        assert_eq!(bbox.anchor(Side::Bottom), Point::new(50.0, 60.0));
        assert_eq!(bbox.anchor(Side::Center), Point::new(50.0, 30.0));
    }

    #[test]
    fn test_bbox_anchors_offset_box() {
        let bbox = BBox::new(200.0, 40.0, 80.0, 20.0);

        assert_eq!(bbox.anchor(Side::Left), Point::new(200.0, 50.0));
        assert_eq!(bbox.anchor(Side::Bottom), Point::new(240.0, 60.0));
        assert_eq!(bbox.center(), Point::new(240.0, 50.0));
    }

    #[test]
    fn test_side_from_str() {
        assert_eq!("left".parse::<Side>(), Ok(Side::Left));
        assert_eq!("RIGHT".parse::<Side>(), Ok(Side::Right));
        assert_eq!("Top".parse::<Side>(), Ok(Side::Top));
        assert_eq!("bottom".parse::<Side>(), Ok(Side::Bottom));
        assert_eq!("center".parse::<Side>(), Ok(Side::Center));
    }

    #[test]
    fn test_side_from_str_unknown() {
        let err = "diagonal".parse::<Side>().unwrap_err();

        assert_eq!(err, UnknownSideError("diagonal".to_string()));
        assert_eq!(err.to_string(), "unknown side `diagonal`");
    }

    #[test]
    fn test_side_default_is_center() {
        assert_eq!(Side::default(), Side::Center);
        assert_eq!(Side::Center.to_string(), "center");
    }

    #[test]
    fn test_grid_snap() {
        let grid = Grid::new(10.0);

        assert_approx_eq!(f64, grid.snap(13.0), 10.0);
        assert_approx_eq!(f64, grid.snap(17.0), 20.0);
        assert_approx_eq!(f64, grid.snap(-13.0), -10.0);
    }

    #[test]
    fn test_grid_snap_ties_to_even() {
        let grid = Grid::new(10.0);

        assert_approx_eq!(f64, grid.snap(25.0), 20.0);
        assert_approx_eq!(f64, grid.snap(35.0), 40.0);
        assert_approx_eq!(f64, grid.snap(5.0), 0.0);
    }

    #[test]
    fn test_grid_snap_small_negative_is_positive_zero() {
        let grid = Grid::new(10.0);

        assert!(grid.snap(-3.0).is_sign_positive());
        assert!(grid.snap(-5.0).is_sign_positive());
        assert_eq!(
            grid.snap_point(Point::new(-3.0, -4.0)),
            Point::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_grid_disabled_is_identity() {
        let grid = Grid::disabled();

        assert!(!grid.is_enabled());
        assert_approx_eq!(f64, grid.snap(13.37), 13.37);
        assert_eq!(
            grid.snap_point(Point::new(1.5, 2.5)),
            Point::new(1.5, 2.5)
        );
    }

    #[test]
    fn test_grid_snap_point() {
        let grid = Grid::new(10.0);

        assert_eq!(
            grid.snap_point(Point::new(104.0, 33.0)),
            Point::new(100.0, 30.0)
        );
    }
}
