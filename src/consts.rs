//! Shared numeric constants for the scene crate.

// ── Camera ──────────────────────────────────────────────────────

/// Default lower zoom limit.
pub const DEFAULT_ZOOM_MIN: f64 = 0.1;

/// Default upper zoom limit.
pub const DEFAULT_ZOOM_MAX: f64 = 2.0;

/// Rate at which the camera scale eases toward its target, per second.
pub const DEFAULT_ZOOM_EASE_RATE: f64 = 10.0;

/// Scale differences at or below this are treated as settled.
pub const ZOOM_EPSILON: f64 = 1e-6;

/// Screen extent assumed when the host has not reported one.
pub const DEFAULT_SCREEN_WIDTH: f64 = 500.0;

/// Screen extent assumed when the host has not reported one.
pub const DEFAULT_SCREEN_HEIGHT: f64 = 500.0;

// ── Physics ─────────────────────────────────────────────────────

/// Fraction of `dampening * momentum` removed from momentum per update call.
///
/// Applied once per call and not scaled by `dt`, so damping is frame-rate
/// dependent while position integration is not. Hosts should call
/// `update` at a steady cadence.
pub const DAMPENING_STRENGTH: f64 = 0.05;

/// Approximate drawable extent of an entity with no reported size.
pub const DEFAULT_ENTITY_EXTENT: f64 = 1.0;

// ── Host loop ───────────────────────────────────────────────────

/// Largest frame delta handed to `update`, in seconds.
pub const DEFAULT_MAX_FRAME_DT: f64 = 0.03;

// ── Input ───────────────────────────────────────────────────────

/// Zoom multiplier per wheel notch.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.1;

/// Screen pixels panned per frame while a pan key is held (scaled by `1 + dt`).
pub const DEFAULT_KEY_PAN_SPEED: f64 = 6.0;

/// Zoom multiplier per frame while a zoom key is held (scaled by `1 + dt`).
pub const DEFAULT_KEY_ZOOM_SPEED: f64 = 1.01;

/// Gain applied to the normalized change in pinch distance.
pub const PINCH_ZOOM_GAIN: f64 = 3.0;

/// Pointer travel under which a press/release pair counts as a click.
pub const CLICK_SLOP_PX: f64 = 3.0;
