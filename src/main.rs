//! Headless demo: drifts a field of random entities for a few seconds,
//! box-selects some of them, pauses once, and logs what the scene does.
//!
//! Configure the view with `STAGEHAND_*` variables (see
//! [`SceneConfig::from_env`]). Logs go to stdout at INFO.

use std::time::{Duration, Instant};

use rand::Rng;
use stagehand::clock::FrameClock;
use stagehand::config::SceneConfig;
use stagehand::entity::Motion;
use stagehand::{Scene, SceneError};
use tracing::{debug, info};

const ENTITY_COUNT: usize = 24;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const RUN_FOR: Duration = Duration::from_secs(3);
const PAUSE_AT_FRAME: u64 = 90;
const RESUME_AT_FRAME: u64 = 120;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), SceneError> {
    tracing_subscriber::fmt::init();

    let config = SceneConfig::from_env();
    let mut scene = Scene::new(&config)?;
    scene.subscribe(|event| debug!(?event, "scene event"));

    let mut rng = rand::rng();
    for _ in 0..ENTITY_COUNT {
        let entity = scene
            .spawn()
            .position(rng.random_range(-200.0..200.0), rng.random_range(-200.0..200.0))
            .momentum(Motion::new(
                rng.random_range(-40.0..40.0),
                rng.random_range(-40.0..40.0),
                rng.random_range(-1.0..1.0),
            ))
            .dampening(Motion::new(0.1, 0.1, 0.5))
            .bounds(rng.random_range(8.0..24.0), rng.random_range(8.0..24.0))
            .build()?;
        scene.add(entity);
    }

    let screen = scene.camera().screen();
    scene.select(0.0, 0.0, screen.width * 0.5, screen.height * 0.5, false);
    info!(entities = scene.len(), selected = scene.selected().len(), "initial marquee");
    scene.camera_mut().set_zoom(0.5);

    let mut clock = FrameClock::default();
    let mut interval = tokio::time::interval(FRAME_INTERVAL);
    let started = Instant::now();
    let mut frames: u64 = 0;

    loop {
        interval.tick().await;
        let now = Instant::now();
        if now.duration_since(started) >= RUN_FOR {
            clock.kill();
        }
        let Some(dt) = clock.tick(now) else {
            break;
        };

        scene.update(dt);
        frames += 1;

        if frames == PAUSE_AT_FRAME || frames == RESUME_AT_FRAME {
            scene.toggle_pause();
        }
        if frames % 60 == 0 {
            info!(frames, scale = scene.camera().scale(), paused = scene.paused(), "frame");
        }
    }

    let removed = scene.remove_selected();
    info!(
        frames,
        removed = removed.len(),
        remaining = scene.len(),
        stats = ?scene.renderer().stats(),
        "demo finished"
    );
    Ok(())
}
