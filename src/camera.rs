//! Pan/zoom camera and coordinate conversions.
//!
//! The camera maps world space to screen space as `screen = world * scale +
//! position`. Zoom is uniform and eased: callers set a target with
//! [`Camera::set_zoom`] and [`Camera::update_zoom`] moves the live scale
//! toward it each frame while keeping the screen center anchored.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::bounded::BoundedProperty;
use crate::consts::{
    DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DEFAULT_ZOOM_EASE_RATE, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MIN,
    ZOOM_EPSILON,
};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height of a screen or drawable node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Camera state for the scene viewport.
///
/// `position` is the screen-space location of the world origin, in pixels.
/// `scale` is the live zoom factor; `target_scale` is where easing is heading.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point,
    scale: f64,
    target_scale: f64,
    zoom_min: BoundedProperty,
    zoom_max: BoundedProperty,
    zoom_ease_rate: f64,
    screen: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            BoundedProperty::new(DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_MIN, DEFAULT_ZOOM_MIN),
            BoundedProperty::new(DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MAX, DEFAULT_ZOOM_MAX),
            DEFAULT_ZOOM_EASE_RATE,
            Size::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT),
        )
    }
}

impl Camera {
    /// Create a camera at scale 1 with the world origin at the screen center.
    #[must_use]
    pub fn new(zoom_min: BoundedProperty, zoom_max: BoundedProperty, zoom_ease_rate: f64, screen: Size) -> Self {
        let mut camera = Self {
            position: Point::default(),
            scale: 1.0,
            target_scale: 1.0,
            zoom_min,
            zoom_max,
            zoom_ease_rate,
            screen,
        };
        camera.position = camera.screen_center();
        camera
    }

    // --- Zoom ---

    /// The zoom level being eased toward.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.target_scale
    }

    /// Set the target zoom, clamped into the current zoom limits. Returns the stored target.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.target_scale = zoom.max(self.zoom_min.get()).min(self.zoom_max.get());
        self.target_scale
    }

    /// Multiply the target zoom by `factor`.
    pub fn zoom_by(&mut self, factor: f64) -> f64 {
        self.set_zoom(self.target_scale * factor)
    }

    /// Set the target zoom and jump the live scale to it without easing.
    pub fn snap_zoom(&mut self, zoom: f64) -> f64 {
        self.scale = self.set_zoom(zoom);
        self.scale
    }

    /// Live scale factor, applied uniformly to both axes.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Live scale as a per-axis pair for renderers that expect one.
    #[must_use]
    pub fn scale_xy(&self) -> Point {
        Point::new(self.scale, self.scale)
    }

    /// Lower zoom limit.
    #[must_use]
    pub fn zoom_min(&self) -> &BoundedProperty {
        &self.zoom_min
    }

    /// Upper zoom limit.
    #[must_use]
    pub fn zoom_max(&self) -> &BoundedProperty {
        &self.zoom_max
    }

    /// Tune the lower zoom limit. The current target is left as is until the next `set_zoom`.
    pub fn zoom_min_mut(&mut self) -> &mut BoundedProperty {
        &mut self.zoom_min
    }

    /// Tune the upper zoom limit. The current target is left as is until the next `set_zoom`.
    pub fn zoom_max_mut(&mut self) -> &mut BoundedProperty {
        &mut self.zoom_max
    }

    #[must_use]
    pub fn zoom_ease_rate(&self) -> f64 {
        self.zoom_ease_rate
    }

    /// Ease the live scale toward the target zoom.
    ///
    /// Each step covers `dt * zoom_ease_rate` of the remaining distance, capped
    /// at the whole distance so a long frame lands on the target instead of
    /// overshooting past it. Position is adjusted so the world point under
    /// the screen center stays put. Returns `true` if the scale changed.
    pub fn update_zoom(&mut self, dt: f64) -> bool {
        let remaining = self.target_scale - self.scale;
        if remaining.abs() <= ZOOM_EPSILON {
            return false;
        }
        let step = (dt * self.zoom_ease_rate).clamp(0.0, 1.0);
        if step <= 0.0 {
            return false;
        }

        let amount = remaining * step;
        let previous = self.scale;
        self.scale += amount;

        let center = self.screen_center();
        self.position.x += (self.position.x - center.x) * amount / previous;
        self.position.y += (self.position.y - center.y) * amount / previous;
        true
    }

    // --- Pan ---

    /// Move the view by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Place the world origin at `position` on screen.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    // --- Screen ---

    /// Record the host's screen extent.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.screen = Size::new(width, height);
    }

    #[must_use]
    pub fn screen(&self) -> Size {
        self.screen
    }

    /// Screen-space center of the viewport, the anchor for zoom easing.
    #[must_use]
    pub fn screen_center(&self) -> Point {
        Point::new(self.screen.width * 0.5, self.screen.height * 0.5)
    }

    // --- Conversions ---

    /// Convert a screen-space point (pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.position.x) / self.scale,
            y: (screen.y - self.position.y) / self.scale,
        }
    }

    /// Convert a world-space point to screen coordinates (pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.scale + self.position.x,
            y: world.y * self.scale + self.position.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Normalize two screen corners and convert them to world-space `(min, max)`.
    #[must_use]
    pub fn screen_rect_to_world(&self, a: Point, b: Point) -> (Point, Point) {
        let min = Point::new(a.x.min(b.x), a.y.min(b.y));
        let max = Point::new(a.x.max(b.x), a.y.max(b.y));
        (self.screen_to_world(min), self.screen_to_world(max))
    }
}
