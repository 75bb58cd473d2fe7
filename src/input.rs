//! Input model: buttons, modifiers, key bindings and the gesture state machine.
//!
//! [`InputBinding`] turns raw host samples into camera pan/zoom deltas and
//! selection commands. It never touches entities itself: marquee and click
//! gestures come back as [`InputCommand`]s that the scene applies through
//! its public selection API. Held keys and multi-touch pinches are applied
//! once per frame by [`InputBinding::tick`].

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::camera::{Camera, Point};
use crate::config::InputConfig;
use crate::consts::{CLICK_SLOP_PX, DEFAULT_KEY_PAN_SPEED, DEFAULT_KEY_ZOOM_SPEED, PINCH_ZOOM_GAIN, WHEEL_ZOOM_FACTOR};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key, named as the host reports it (e.g. `"ArrowUp"`, `"w"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Single-character keys compare case-insensitively; named keys as-is.
    fn normalized(&self) -> String {
        normalize_key(&self.0)
    }
}

fn normalize_key(name: &str) -> String {
    if name.chars().count() == 1 { name.to_lowercase() } else { name.to_string() }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// A raw sample from the host's input backend.
#[derive(Debug, Clone)]
pub enum InputEvent {
    PointerDown { screen: Point, button: Button, modifiers: Modifiers },
    PointerMove { screen: Point, modifiers: Modifiers },
    PointerUp { screen: Point, button: Button, modifiers: Modifiers },
    Wheel { screen: Point, delta: WheelDelta, modifiers: Modifiers },
    KeyDown(Key),
    KeyUp(Key),
    /// The full set of active touch points, in screen space. Empty when all fingers lift.
    Touches(Vec<Point>),
}

/// Selection request produced by a completed pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputCommand {
    /// Box-select between two screen-space corners.
    Marquee { from: Point, to: Point, additive: bool },
    /// Select whatever lies under a screen-space point.
    Click { screen: Point, additive: bool },
}

/// Logical actions that keys can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Up,
    Down,
    Left,
    Right,
    ZoomIn,
    ZoomOut,
    Shift,
    Control,
}

/// Key name → action lookup table.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<String, KeyAction>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self { bindings: HashMap::new() };
        map.bind(KeyAction::Up, &["ArrowUp", "w"]);
        map.bind(KeyAction::Down, &["ArrowDown", "s"]);
        map.bind(KeyAction::Left, &["ArrowLeft", "a"]);
        map.bind(KeyAction::Right, &["ArrowRight", "d"]);
        map.bind(KeyAction::ZoomIn, &["=", "+"]);
        map.bind(KeyAction::ZoomOut, &["-"]);
        map.bind(KeyAction::Shift, &["Shift"]);
        map.bind(KeyAction::Control, &["Control"]);
        map
    }
}

impl KeyMap {
    /// An empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self { bindings: HashMap::new() }
    }

    /// Build from an action → keys table, starting from the defaults.
    ///
    /// Actions listed in `table` replace their default keys entirely.
    #[must_use]
    pub fn from_table(table: &BTreeMap<KeyAction, Vec<String>>) -> Self {
        let mut map = Self::default();
        for (action, keys) in table {
            map.bindings.retain(|_, bound| bound != action);
            if keys.is_empty() {
                warn!(?action, "key binding left empty; action is unreachable");
            }
            for key in keys {
                map.bindings.insert(normalize_key(key), *action);
            }
        }
        map
    }

    /// Bind every key in `keys` to `action`.
    pub fn bind(&mut self, action: KeyAction, keys: &[&str]) {
        for key in keys {
            self.bindings.insert(normalize_key(key), action);
        }
    }

    /// Action bound to `key`, if any.
    #[must_use]
    pub fn action(&self, key: &Key) -> Option<KeyAction> {
        self.bindings.get(&key.normalized()).copied()
    }
}

/// Aggregate of the active touch points at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchSample {
    pub count: usize,
    pub midpoint: Point,
    /// Diagonal of the touch points' bounding box.
    pub distance: f64,
}

impl TouchSample {
    /// Summarize a set of touch points. `None` when there are none.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min, mut max) = (*first, *first);
        let (mut sx, mut sy) = (0.0, 0.0);
        for p in points {
            sx += p.x;
            sy += p.y;
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        #[allow(clippy::cast_precision_loss)]
        let n = points.len() as f64;
        Some(Self { count: points.len(), midpoint: Point::new(sx / n, sy / n), distance: min.distance(max) })
    }
}

/// Pointer gesture in progress between press and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// No button held.
    Idle,
    /// Primary button dragging out a selection rectangle.
    Marquee { anchor: Point, current: Point },
    /// Secondary or middle button dragging the view.
    Panning,
}

/// Translates raw input samples into camera motion and selection commands.
#[derive(Debug, Clone)]
pub struct InputBinding {
    keys: KeyMap,
    held: HashSet<KeyAction>,
    pan_speed: f64,
    zoom_speed: f64,
    gesture: Gesture,
    last_pointer: Option<Point>,
    touches: Vec<Point>,
    last_touch: Option<TouchSample>,
}

impl Default for InputBinding {
    fn default() -> Self {
        Self::new(KeyMap::default(), DEFAULT_KEY_PAN_SPEED, DEFAULT_KEY_ZOOM_SPEED)
    }
}

impl InputBinding {
    #[must_use]
    pub fn new(keys: KeyMap, pan_speed: f64, zoom_speed: f64) -> Self {
        Self {
            keys,
            held: HashSet::new(),
            pan_speed,
            zoom_speed,
            gesture: Gesture::Idle,
            last_pointer: None,
            touches: Vec::new(),
            last_touch: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &InputConfig) -> Self {
        let keys = config.keys.as_ref().map_or_else(KeyMap::default, KeyMap::from_table);
        Self::new(keys, config.pan_speed, config.zoom_speed)
    }

    /// Current pointer gesture.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Screen-space marquee corners while a box-select drag is active.
    #[must_use]
    pub fn marquee(&self) -> Option<(Point, Point)> {
        match self.gesture {
            Gesture::Marquee { anchor, current } => Some((anchor, current)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_held(&self, action: KeyAction) -> bool {
        self.held.contains(&action)
    }

    /// Apply one raw sample. Immediate camera changes (wheel zoom, drag pan)
    /// happen here; a finished marquee or click comes back as a command.
    pub fn handle(&mut self, event: InputEvent, camera: &mut Camera) -> Option<InputCommand> {
        match event {
            InputEvent::PointerDown { screen, button, .. } => {
                self.gesture = match button {
                    Button::Primary => Gesture::Marquee { anchor: screen, current: screen },
                    Button::Middle | Button::Secondary => Gesture::Panning,
                };
                self.last_pointer = Some(screen);
                None
            }
            InputEvent::PointerMove { screen, .. } => {
                match &mut self.gesture {
                    Gesture::Panning => {
                        if let Some(last) = self.last_pointer {
                            camera.pan_by(screen.x - last.x, screen.y - last.y);
                        }
                    }
                    Gesture::Marquee { current, .. } => *current = screen,
                    Gesture::Idle => {}
                }
                self.last_pointer = Some(screen);
                None
            }
            InputEvent::PointerUp { screen, modifiers, .. } => {
                let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
                self.last_pointer = Some(screen);
                let Gesture::Marquee { anchor, .. } = gesture else {
                    return None;
                };
                let additive = modifiers.shift || self.is_held(KeyAction::Shift);
                if anchor.distance(screen) <= CLICK_SLOP_PX {
                    Some(InputCommand::Click { screen, additive })
                } else {
                    Some(InputCommand::Marquee { from: anchor, to: screen, additive })
                }
            }
            InputEvent::Wheel { delta, .. } => {
                if delta.dy < 0.0 {
                    camera.zoom_by(WHEEL_ZOOM_FACTOR);
                } else if delta.dy > 0.0 {
                    camera.zoom_by(1.0 / WHEEL_ZOOM_FACTOR);
                }
                None
            }
            InputEvent::KeyDown(key) => {
                if let Some(action) = self.keys.action(&key) {
                    self.held.insert(action);
                }
                None
            }
            InputEvent::KeyUp(key) => {
                if let Some(action) = self.keys.action(&key) {
                    self.held.remove(&action);
                }
                None
            }
            InputEvent::Touches(points) => {
                self.touches = points;
                None
            }
        }
    }

    /// Per-frame step: two-finger pinch, then held pan/zoom keys.
    ///
    /// Keys are ignored while Shift or Control is held so those chords stay
    /// free for host shortcuts.
    pub fn tick(&mut self, dt: f64, camera: &mut Camera) {
        let sample = TouchSample::from_points(&self.touches);
        if let (Some(prev), Some(cur)) = (self.last_touch, sample) {
            if prev.count == 2 && cur.count == 2 {
                camera.pan_by(cur.midpoint.x - prev.midpoint.x, cur.midpoint.y - prev.midpoint.y);
                let screen = camera.screen();
                let extent = (screen.width + screen.height) * 0.5;
                if extent > 0.0 {
                    camera.zoom_by(1.0 - (prev.distance - cur.distance) / extent * PINCH_ZOOM_GAIN);
                }
            }
        }
        self.last_touch = sample;

        if self.is_held(KeyAction::Control) || self.is_held(KeyAction::Shift) {
            return;
        }
        let boost = 1.0 + dt;
        let pan = self.pan_speed * boost;
        let zoom = self.zoom_speed * boost;
        if self.is_held(KeyAction::Up) {
            camera.pan_by(0.0, pan);
        }
        if self.is_held(KeyAction::Down) {
            camera.pan_by(0.0, -pan);
        }
        if self.is_held(KeyAction::Left) {
            camera.pan_by(pan, 0.0);
        }
        if self.is_held(KeyAction::Right) {
            camera.pan_by(-pan, 0.0);
        }
        if self.is_held(KeyAction::ZoomOut) {
            camera.zoom_by(1.0 / zoom);
        }
        if self.is_held(KeyAction::ZoomIn) {
            camera.zoom_by(zoom);
        }
    }
}
