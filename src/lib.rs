//! Headless scene manager for interactive 2D applications.
//!
//! The crate tracks a collection of positioned, moving, selectable entities
//! inside a pannable/zoomable viewport and advances their physics once per
//! frame. It owns object lifecycle, the camera transform, marquee and point
//! selection, and clamped numeric settings. Drawing, windowing and the
//! render loop itself stay with the host, which reaches the core through
//! [`render::RenderBackend`], [`input::InputEvent`] and [`scene::Scene::update`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`scene`] | Entity collection, selection, preview/fx layers, pause, frame update |
//! | [`entity`] | Entity physics body, builder, and the [`entity::Updatable`] hooks |
//! | [`camera`] | Pan/zoom camera with eased zoom and coordinate conversions |
//! | [`bounded`] | Clamped numeric settings with fixed or dynamic bounds |
//! | [`input`] | Raw pointer/key/touch samples to camera deltas and selection commands |
//! | [`render`] | Rendering collaborator trait and the headless implementation |
//! | [`events`] | Pause/resume/zoom notifications and their observers |
//! | [`clock`] | Host-loop helper: capped frame deltas, pause/resume/kill |
//! | [`config`] | Scene configuration from JSON or the environment |
//! | [`error`] | Error taxonomy |
//! | [`consts`] | Shared numeric constants |

pub mod bounded;
pub mod camera;
pub mod clock;
pub mod config;
pub mod consts;
pub mod entity;
pub mod error;
pub mod events;
pub mod input;
pub mod render;
pub mod scene;

pub use error::SceneError;
pub use scene::Scene;
