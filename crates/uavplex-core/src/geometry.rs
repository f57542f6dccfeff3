//! Geometric primitives for component placement and chart rendering.
//!
//! # Overview
//!
//! - [`Point3`] - A component position in design space (millimetres, Z up)
//! - [`Point`] - A 2D coordinate in chart space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box
//! - [`Insets`] - Margins for four sides
//! - [`Camera`] - Orthographic projection from design space to the chart plane
//! - [`Viewport`] - Uniform scale and offset fitting projected content into a frame
//!
//! # Coordinate Systems
//!
//! Chart space follows SVG: origin top-left, X rightward, Y downward.
//! Design space is right-handed with Z pointing up; the camera flips the
//! projected vertical axis so "up" in design space is up on the page.

/// A 2D point in chart coordinate space.
///
/// # Examples
///
/// ```
/// # use uavplex_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean distance from the origin
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// A position in design space.
///
/// Positions produced by the position calculator are approximate and only
/// used for visualization.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Point3 {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the x-coordinate
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the z-coordinate
    pub fn z(self) -> f32 {
        self.z
    }

    /// Returns the coordinates as a tuple
    pub fn to_tuple(self) -> (f32, f32, f32) {
        (self.x, self.y, self.z)
    }

    /// Component-wise addition
    pub fn add_point(self, other: Point3) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Component-wise subtraction
    pub fn sub_point(self, other: Point3) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Scales the horizontal coordinates, keeping the height.
    ///
    /// Arm chains place parts at fractions of the arm end while staying in the
    /// arm plane.
    pub fn scale_xy(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z,
        }
    }

    /// Scales all three coordinates.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    /// Returns the same point at height `z`.
    pub fn with_z(self, z: f32) -> Self {
        Self { z, ..self }
    }

    /// Returns the same point raised by `dz`.
    pub fn lift(self, dz: f32) -> Self {
        Self {
            z: self.z + dz,
            ..self
        }
    }

    /// Euclidean length of the position vector
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Margins around a drawing area.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates insets with individual values for each side
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with the same value on every side
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }
}

/// A rectangular bounding box defined by minimum and maximum coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds from a top-left corner and a size.
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Smallest bounds containing every point, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            let point_bounds = Self {
                min_x: p.x,
                min_y: p.y,
                max_x: p.x,
                max_y: p.y,
            };
            Some(match acc {
                Some(bounds) => bounds.merge(&point_bounds),
                None => point_bounds,
            })
        })
    }

    pub fn min_x(&self) -> f32 {
        self.min_x
    }

    pub fn min_y(&self) -> f32 {
        self.min_y
    }

    pub fn max_x(&self) -> f32 {
        self.max_x
    }

    pub fn max_y(&self) -> f32 {
        self.max_y
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Smallest bounds containing both `self` and `other`.
    pub fn merge(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Shrinks the bounds by the given insets.
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x + insets.left,
            min_y: self.min_y + insets.top,
            max_x: (self.max_x - insets.right).max(self.min_x + insets.left),
            max_y: (self.max_y - insets.bottom).max(self.min_y + insets.top),
        }
    }
}

/// Orthographic camera looking at the design from a given azimuth and
/// elevation, both in degrees.
///
/// Azimuth rotates around the Z axis; elevation tilts the view above the XY
/// plane. `(-60, 30)` matches the usual 3D axes default view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    azimuth: f32,
    elevation: f32,
}

impl Camera {
    /// Creates a camera from azimuth and elevation in degrees
    pub fn new(azimuth: f32, elevation: f32) -> Self {
        Self {
            azimuth,
            elevation,
        }
    }

    /// Projects a design-space point onto the chart plane.
    ///
    /// Returns the projected point (Y downward) and its depth; larger depth is
    /// closer to the viewer.
    pub fn project(&self, p: Point3) -> (Point, f32) {
        let (sin_a, cos_a) = self.azimuth.to_radians().sin_cos();
        let (sin_e, cos_e) = self.elevation.to_radians().sin_cos();

        let screen_x = -p.x * sin_a + p.y * cos_a;
        let horizontal_depth = p.x * cos_a + p.y * sin_a;
        let screen_up = -horizontal_depth * sin_e + p.z * cos_e;
        let depth = horizontal_depth * cos_e + p.z * sin_e;

        (Point::new(screen_x, -screen_up), depth)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(-60.0, 30.0)
    }
}

/// Uniform scale and translation mapping content bounds into a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f32,
    offset: Point,
}

impl Viewport {
    /// Fits `content` inside `frame`, preserving aspect ratio and centering.
    ///
    /// Degenerate content (zero width or height) is centered without scaling
    /// along the flat axis.
    pub fn fit(content: Bounds, frame: Bounds) -> Self {
        let sx = if content.width() > f32::EPSILON {
            frame.width() / content.width()
        } else {
            f32::INFINITY
        };
        let sy = if content.height() > f32::EPSILON {
            frame.height() / content.height()
        } else {
            f32::INFINITY
        };
        let scale = match sx.min(sy) {
            s if s.is_finite() => s,
            _ => 1.0,
        };

        let offset = frame.center().sub_point(content.center().scale(scale));
        Self { scale, offset }
    }

    /// Maps a content point into the frame.
    pub fn apply(&self, p: Point) -> Point {
        p.scale(self.scale).add_point(self.offset)
    }

    /// Returns the scale factor
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::{approx_eq, assert_approx_eq};
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point3_scale_xy_keeps_height() {
        let p = Point3::new(100.0, -50.0, 40.0).scale_xy(0.5);
        assert_eq!(p.to_tuple(), (50.0, -25.0, 40.0));
    }

    #[test]
    fn test_point3_lift() {
        let p = Point3::new(1.0, 2.0, 3.0).lift(60.0);
        assert_approx_eq!(f32, p.z(), 63.0);
    }

    #[test]
    fn test_bounds_from_points_empty() {
        assert!(Bounds::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds::from_points([
            Point::new(1.0, 5.0),
            Point::new(-3.0, 2.0),
            Point::new(4.0, -1.0),
        ])
        .unwrap();
        assert_approx_eq!(f32, bounds.min_x(), -3.0);
        assert_approx_eq!(f32, bounds.min_y(), -1.0);
        assert_approx_eq!(f32, bounds.max_x(), 4.0);
        assert_approx_eq!(f32, bounds.max_y(), 5.0);
    }

    #[test]
    fn test_bounds_inset() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
        let inner = bounds.inset(Insets::new(5.0, 10.0, 15.0, 20.0));
        assert_approx_eq!(f32, inner.min_x(), 20.0);
        assert_approx_eq!(f32, inner.min_y(), 5.0);
        assert_approx_eq!(f32, inner.max_x(), 90.0);
        assert_approx_eq!(f32, inner.max_y(), 35.0);
    }

    #[test]
    fn test_camera_top_view_keeps_plane() {
        // Looking straight down from azimuth 0: X points into the screen
        // vertical, Y points right.
        let camera = Camera::new(0.0, 90.0);
        let (p, depth) = camera.project(Point3::new(0.0, 10.0, 5.0));
        assert_approx_eq!(f32, p.x(), 10.0, epsilon = 1e-4);
        assert_approx_eq!(f32, depth, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_camera_up_is_up() {
        let camera = Camera::default();
        let (low, _) = camera.project(Point3::new(0.0, 0.0, 0.0));
        let (high, _) = camera.project(Point3::new(0.0, 0.0, 100.0));
        assert!(high.y() < low.y());
    }

    #[test]
    fn test_viewport_fit_centers_content() {
        let content = Bounds::new_from_top_left(Point::new(-10.0, -10.0), Size::new(20.0, 10.0));
        let frame = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(200.0, 200.0));
        let viewport = Viewport::fit(content, frame);

        assert_approx_eq!(f32, viewport.scale(), 10.0);
        let center = viewport.apply(content.center());
        assert_approx_eq!(f32, center.x(), 100.0);
        assert_approx_eq!(f32, center.y(), 100.0);
    }

    #[test]
    fn test_viewport_fit_single_point() {
        let content = Bounds::from_points([Point::new(3.0, 4.0)]).unwrap();
        let frame = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(50.0, 50.0));
        let viewport = Viewport::fit(content, frame);
        let p = viewport.apply(Point::new(3.0, 4.0));
        assert_approx_eq!(f32, p.x(), 25.0);
        assert_approx_eq!(f32, p.y(), 25.0);
    }

    fn point3_strategy() -> impl Strategy<Value = Point3> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0, -1000.0f32..1000.0)
            .prop_map(|(x, y, z)| Point3::new(x, y, z))
    }

    fn angle_strategy() -> impl Strategy<Value = (f32, f32)> {
        (-180.0f32..180.0, -90.0f32..90.0)
    }

    /// An orthographic camera is a rotation, so lengths are preserved.
    fn check_projection_preserves_length(
        p: Point3,
        (azimuth, elevation): (f32, f32),
    ) -> Result<(), TestCaseError> {
        let (screen, depth) = Camera::new(azimuth, elevation).project(p);
        let projected_length = (screen.hypot().powi(2) + depth.powi(2)).sqrt();
        prop_assert!(approx_eq!(
            f32,
            projected_length,
            p.length(),
            epsilon = 0.05
        ));
        Ok(())
    }

    /// Adding then subtracting the same offset returns the original point.
    fn check_add_sub_inverse(p: Point3, offset: Point3) -> Result<(), TestCaseError> {
        let roundtrip = p.add_point(offset).sub_point(offset);
        prop_assert!(approx_eq!(f32, roundtrip.x(), p.x(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, roundtrip.y(), p.y(), epsilon = 0.001));
        prop_assert!(approx_eq!(f32, roundtrip.z(), p.z(), epsilon = 0.001));
        Ok(())
    }

    proptest! {
        #[test]
        fn projection_preserves_length(p in point3_strategy(), angles in angle_strategy()) {
            check_projection_preserves_length(p, angles)?;
        }

        #[test]
        fn add_sub_inverse(p in point3_strategy(), offset in point3_strategy()) {
            check_add_sub_inverse(p, offset)?;
        }
    }
}
