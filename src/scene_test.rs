#![allow(clippy::float_cmp)]

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::bounded::BoundedPropertyConfig;
use crate::config::ViewConfig;
use crate::entity::Motion;
use crate::input::{Button, Modifiers};

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Add(Layer, EntityId),
    Remove(Layer, EntityId),
    Raise(Layer),
    Redraw(EntityId, bool),
    Resize(f64, f64),
}

#[derive(Debug, Default)]
struct RecordingRenderer {
    calls: Vec<Call>,
}

impl RenderBackend for RecordingRenderer {
    fn add_child(&mut self, layer: Layer, node: EntityId) {
        self.calls.push(Call::Add(layer, node));
    }

    fn remove_child(&mut self, layer: Layer, node: EntityId) {
        self.calls.push(Call::Remove(layer, node));
    }

    fn bring_to_front(&mut self, layer: Layer) {
        self.calls.push(Call::Raise(layer));
    }

    fn redraw(&mut self, node: EntityId, selected: bool) {
        self.calls.push(Call::Redraw(node, selected));
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.calls.push(Call::Resize(width, height));
    }
}

fn scene() -> Scene {
    Scene::new(&SceneConfig::default()).unwrap()
}

fn recording_scene() -> Scene<RecordingRenderer> {
    Scene::with_renderer(&SceneConfig::default(), RecordingRenderer::default()).unwrap()
}

fn add_at<R: RenderBackend>(scene: &mut Scene<R>, x: f64, y: f64) -> EntityId {
    let entity = scene.spawn().position(x, y).build().unwrap();
    scene.add(entity)
}

/// Three entities at (0,0), (10,10), (-10,-10) with the camera at the origin, scale 1.
fn three_at_origin() -> (Scene, EntityId, EntityId, EntityId) {
    let mut scene = scene();
    scene.camera_mut().set_position(Point::new(0.0, 0.0));
    let e1 = add_at(&mut scene, 0.0, 0.0);
    let e2 = add_at(&mut scene, 10.0, 10.0);
    let e3 = add_at(&mut scene, -10.0, -10.0);
    (scene, e1, e2, e3)
}

fn selected_flag(scene: &Scene, id: EntityId) -> bool {
    scene.entity(id).unwrap().is_selected()
}

/// Appends `label:phase` to a shared log on every hook.
struct Tally {
    body: Entity,
    label: &'static str,
    log: Rc<RefCell<Vec<String>>>,
    remove_on_update: Option<EntityId>,
}

impl Tally {
    fn new<R: RenderBackend>(scene: &Scene<R>, label: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
        Self { body: scene.spawn().build().unwrap(), label, log: Rc::clone(log), remove_on_update: None }
    }

    fn record(&self, phase: &str) {
        self.log.borrow_mut().push(format!("{}:{phase}", self.label));
    }
}

impl Updatable for Tally {
    fn body(&self) -> &Entity {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Entity {
        &mut self.body
    }

    fn before_update(&mut self, _dt: f64, _ctx: &mut UpdateContext<'_>) {
        self.record("before");
    }

    fn update(&mut self, dt: f64, ctx: &mut UpdateContext<'_>) {
        self.record("update");
        self.body.integrate(dt);
        if let Some(target) = self.remove_on_update {
            ctx.remove(target);
        }
    }

    fn after_update(&mut self, _dt: f64, _ctx: &mut UpdateContext<'_>) {
        self.record("after");
    }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_scene_is_empty_and_running() {
    let scene = scene();
    assert!(scene.is_empty());
    assert_eq!(scene.len(), 0);
    assert!(!scene.paused());
    assert!(scene.selected().is_empty());
    assert!(scene.input().is_none());
    assert_eq!(scene.camera().position, Point::new(250.0, 250.0));
    assert_eq!(scene.camera().zoom(), 1.0);
}

#[test]
fn missing_view_is_configuration_error() {
    let config = SceneConfig { view: None, input: None };
    let err = Scene::new(&config).unwrap_err();
    assert!(matches!(err, SceneError::Configuration(_)));
}

#[test]
fn inverted_zoom_limits_are_configuration_error() {
    let view = ViewConfig {
        zoom_min: BoundedPropertyConfig::fixed(3.0),
        zoom_max: BoundedPropertyConfig::fixed(1.0),
        ..ViewConfig::default()
    };
    let config = SceneConfig { view: Some(view), input: None };
    assert!(matches!(Scene::new(&config), Err(SceneError::Configuration(_))));
}

#[test]
fn construction_sizes_renderer() {
    let scene = recording_scene();
    assert_eq!(scene.renderer().calls, vec![Call::Resize(500.0, 500.0)]);
}

#[test]
fn input_config_installs_binding() {
    let config = SceneConfig::from_json(r#"{"view": {"zoom_min": [0.1,0.1,0.1], "zoom_max": [2,2,2]}, "input": {}}"#)
        .unwrap();
    let scene = Scene::new(&config).unwrap();
    assert!(scene.input().is_some());
}

#[test]
fn spawn_binds_scene_and_content_layer() {
    let scene = scene();
    let entity = scene.spawn().build().unwrap();
    assert_eq!(entity.scene(), scene.id());
    assert_eq!(entity.parent(), Parent::Layer(Layer::Content));
}

// =============================================================
// Add / remove
// =============================================================

#[test]
fn add_attaches_to_content_layer() {
    let mut scene = recording_scene();
    let id = add_at(&mut scene, 1.0, 2.0);
    assert!(scene.contains(id));
    assert_eq!(scene.entity(id).unwrap().position, Point::new(1.0, 2.0));
    assert_eq!(scene.renderer().calls.last(), Some(&Call::Add(Layer::Content, id)));
}

#[test]
fn add_keeps_insertion_order() {
    let mut scene = scene();
    let a = add_at(&mut scene, 0.0, 0.0);
    let b = add_at(&mut scene, 0.0, 0.0);
    let c = add_at(&mut scene, 0.0, 0.0);
    assert_eq!(scene.ids().collect::<Vec<_>>(), vec![a, b, c]);
}

#[test]
fn duplicate_id_add_is_ignored() {
    let mut scene = scene();
    let entity = scene.spawn().build().unwrap();
    let twin = entity.same_id_copy();
    let id = scene.add(entity);
    assert_eq!(scene.add(twin), id);
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.renderer().stats().attached, 1);
}

#[test]
fn cloned_entity_joins_as_separate_unselected_object() {
    let mut scene = scene();
    let entity = scene.spawn().build().unwrap();
    let id = scene.add(entity);
    scene.select_object(id, false);
    let copy = scene.entity(id).unwrap().clone();
    let copy_id = scene.add(copy);

    assert_ne!(copy_id, id);
    assert_eq!(scene.len(), 2);
    assert!(!selected_flag(&scene, copy_id));
    assert_eq!(scene.selected(), &[id]);

    scene.select_all();
    assert!(selected_flag(&scene, copy_id));
    assert!(scene.is_selected(copy_id));
}

#[test]
fn re_added_object_keeps_flag_and_list_in_step() {
    let mut scene = scene();
    let id = add_at(&mut scene, 0.0, 0.0);
    scene.select_object(id, false);
    let copy = scene.entity(id).unwrap().same_id_copy();
    assert!(copy.is_selected());
    assert!(scene.remove(id).is_some());

    assert_eq!(scene.add(copy), id);
    assert!(!selected_flag(&scene, id));
    assert!(!scene.is_selected(id));
    scene.select_all();
    assert!(selected_flag(&scene, id));
    assert_eq!(scene.selected(), &[id]);
}

#[test]
fn object_from_another_scene_is_rejected() {
    let other = scene();
    let mut scene = recording_scene();
    let stray = other.spawn().build().unwrap();
    let stray_id = stray.id();

    assert_eq!(scene.add(stray), stray_id);
    assert!(!scene.contains(stray_id));
    assert!(scene.is_empty());

    scene.preview_object(other.spawn().build().unwrap());
    scene.add_fx(other.spawn().build().unwrap());
    assert!(scene.previews().is_empty());
    assert!(scene.fx().is_empty());
    assert_eq!(scene.renderer().calls, vec![Call::Resize(500.0, 500.0)]);
}

#[test]
fn remove_hands_back_object_marked_removed() {
    let mut scene = recording_scene();
    let id = add_at(&mut scene, 0.0, 0.0);
    let object = scene.remove(id).unwrap();
    assert!(object.body().is_removed());
    assert!(!scene.contains(id));
    assert_eq!(scene.renderer().calls.last(), Some(&Call::Remove(Layer::Content, id)));
}

#[test]
fn remove_clears_selection() {
    let mut scene = scene();
    let id = add_at(&mut scene, 0.0, 0.0);
    scene.select_object(id, false);
    let object = scene.remove(id).unwrap();
    assert!(!object.body().is_selected());
    assert!(!scene.is_selected(id));
    assert!(scene.selected().is_empty());
}

#[test]
fn remove_unknown_is_noop() {
    let mut scene = scene();
    let id = add_at(&mut scene, 0.0, 0.0);
    assert!(scene.remove(id).is_some());
    assert!(scene.remove(id).is_none());
    assert_eq!(scene.renderer().stats().detached, 1);
}

#[test]
fn removed_object_can_be_added_back() {
    let mut scene = scene();
    let id = add_at(&mut scene, 0.0, 0.0);
    let object = scene.remove(id).unwrap();
    assert_eq!(scene.add_boxed(object), id);
    assert!(!scene.entity(id).unwrap().is_removed());
}

#[test]
fn remove_objects_goes_last_first_and_skips_stale() {
    let mut scene = scene();
    let a = add_at(&mut scene, 0.0, 0.0);
    let b = add_at(&mut scene, 0.0, 0.0);
    let c = add_at(&mut scene, 0.0, 0.0);
    assert!(scene.remove(b).is_some());
    let removed = scene.remove_objects(&[a, b, c]);
    let ids: Vec<_> = removed.iter().map(|o| o.body().id()).collect();
    assert_eq!(ids, vec![c, a]);
    assert!(scene.is_empty());
    assert!(scene.remove_objects(&[a, b, c]).is_empty());
}

#[test]
fn remove_selected_empties_selection() {
    let (mut scene, e1, e2, e3) = three_at_origin();
    scene.select(0.0, 0.0, 10.0, 11.0, false);
    let removed = scene.remove_selected();
    assert_eq!(removed.len(), 2);
    assert!(!scene.contains(e1));
    assert!(!scene.contains(e2));
    assert!(scene.contains(e3));
    assert!(scene.selected().is_empty());
}

// =============================================================
// Preview / fx
// =============================================================

#[test]
fn preview_is_drawn_but_not_simulated() {
    let mut scene = recording_scene();
    let entity = scene.spawn().momentum(Motion::new(5.0, 0.0, 0.0)).build().unwrap();
    let id = scene.preview_object(entity);
    assert!(!scene.contains(id));
    assert_eq!(scene.previews().len(), 1);
    assert_eq!(scene.renderer().calls.last(), Some(&Call::Add(Layer::Content, id)));

    scene.update(1.0);
    assert_eq!(scene.previews()[0].body().position.x, 0.0);

    let preview = scene.cancel_preview(id).unwrap();
    assert_eq!(preview.body().id(), id);
    assert!(scene.previews().is_empty());
    assert!(scene.cancel_preview(id).is_none());
}

#[test]
fn fx_attach_to_fx_layer_and_toggle_removed() {
    let mut scene = recording_scene();
    let entity = scene.spawn().momentum(Motion::new(5.0, 0.0, 0.0)).build().unwrap();
    let id = scene.add_fx(entity);
    assert_eq!(scene.renderer().calls.last(), Some(&Call::Add(Layer::Fx, id)));
    assert!(!scene.fx()[0].body().is_removed());

    scene.update(1.0);
    assert_eq!(scene.fx()[0].body().position.x, 0.0);

    let fx = scene.remove_fx(id).unwrap();
    assert!(fx.body().is_removed());
    assert_eq!(scene.renderer().calls.last(), Some(&Call::Remove(Layer::Fx, id)));
    assert!(scene.remove_fx(id).is_none());
}

#[test]
fn preview_sharing_live_entity_id_is_rejected() {
    let mut scene = recording_scene();
    let id = add_at(&mut scene, 0.0, 0.0);
    let twin = scene.entity(id).unwrap().same_id_copy();

    assert_eq!(scene.preview_object(twin), id);
    assert!(scene.previews().is_empty());
    assert!(scene.cancel_preview(id).is_none());

    assert!(scene.contains(id));
    assert_eq!(scene.renderer().calls, vec![Call::Resize(500.0, 500.0), Call::Add(Layer::Content, id)]);
}

#[test]
fn fx_sharing_held_id_is_rejected() {
    let mut scene = recording_scene();
    let preview = scene.spawn().build().unwrap();
    let twin = preview.same_id_copy();
    let id = scene.preview_object(preview);

    assert_eq!(scene.add_fx(twin), id);
    assert!(scene.fx().is_empty());
    assert!(scene.remove_fx(id).is_none());
    assert_eq!(scene.previews().len(), 1);

    let entity = scene.spawn().build().unwrap();
    let fx = scene.add_fx(entity.same_id_copy());
    assert_eq!(scene.add(entity), fx);
    assert!(!scene.contains(fx));
    assert_eq!(scene.fx().len(), 1);
}

#[test]
fn update_raises_fx_layer_each_frame() {
    let mut scene = recording_scene();
    scene.update(0.016);
    scene.update(0.016);
    let raises = scene.renderer().calls.iter().filter(|c| **c == Call::Raise(Layer::Fx)).count();
    assert_eq!(raises, 2);
}

// =============================================================
// Selection
// =============================================================

#[test]
fn box_select_at_identity_picks_overlapping() {
    let (mut scene, e1, e2, e3) = three_at_origin();
    scene.select(0.0, 0.0, 10.0, 11.0, false);
    assert!(selected_flag(&scene, e1));
    assert!(selected_flag(&scene, e2));
    assert!(!selected_flag(&scene, e3));
    assert_eq!(scene.selected(), &[e1, e2]);
}

#[test]
fn box_select_maps_screen_rect_through_camera() {
    let (mut scene, e1, e2, e3) = three_at_origin();
    scene.camera_mut().set_position(Point::new(5.0, 5.0));
    scene.camera_mut().snap_zoom(0.5);
    scene.select(0.0, 0.0, 10.0, 10.0, false);
    assert!(selected_flag(&scene, e1));
    assert!(selected_flag(&scene, e2));
    assert!(selected_flag(&scene, e3));
    assert_eq!(scene.selected().len(), 3);
}

#[test]
fn select_sequence_replaces_then_accumulates() {
    let (mut scene, e1, e2, e3) = three_at_origin();
    scene.select(0.0, 0.0, 10.0, 11.0, false);

    scene.select(0.0, 0.0, 1.0, 1.0, false);
    assert!(selected_flag(&scene, e1));
    assert!(!selected_flag(&scene, e2));
    assert!(!selected_flag(&scene, e3));
    assert_eq!(scene.selected(), &[e1]);

    scene.select(10.0, 10.0, 11.0, 11.0, true);
    assert!(selected_flag(&scene, e1));
    assert!(selected_flag(&scene, e2));
    assert!(!selected_flag(&scene, e3));
    assert_eq!(scene.selected(), &[e1, e2]);
}

#[test]
fn select_is_invariant_under_corner_order() {
    let corners = [(0.0, 0.0, 10.0, 11.0), (10.0, 0.0, 0.0, 11.0), (0.0, 11.0, 10.0, 0.0), (10.0, 11.0, 0.0, 0.0)];
    for (x1, y1, x2, y2) in corners {
        let (mut scene, e1, e2, _) = three_at_origin();
        scene.select(x1, y1, x2, y2, false);
        assert_eq!(scene.selected(), &[e1, e2]);
    }
}

#[test]
fn additive_select_never_deselects() {
    let (mut scene, e1, e2, e3) = three_at_origin();
    scene.select_object(e3, false);
    scene.select(0.0, 0.0, 1.0, 1.0, true);
    assert!(scene.is_selected(e3));
    assert!(scene.is_selected(e1));
    assert!(!scene.is_selected(e2));

    scene.select(100.0, 100.0, 200.0, 200.0, true);
    assert_eq!(scene.selected(), &[e3, e1]);
}

#[test]
fn additive_select_does_not_duplicate() {
    let (mut scene, e1, _, _) = three_at_origin();
    scene.select(0.0, 0.0, 1.0, 1.0, true);
    scene.select(0.0, 0.0, 1.0, 1.0, true);
    assert_eq!(scene.selected(), &[e1]);
}

#[test]
fn select_object_replaces_unless_additive() {
    let (mut scene, e1, e2, _) = three_at_origin();
    scene.select_object(e1, false);
    scene.select_object(e2, false);
    assert_eq!(scene.selected(), &[e2]);
    assert!(!selected_flag(&scene, e1));
    scene.select_object(e1, true);
    assert_eq!(scene.selected(), &[e2, e1]);
}

#[test]
fn select_unknown_object_keeps_selection() {
    let (mut scene, e1, _, _) = three_at_origin();
    scene.select_object(e1, false);
    let stray = scene.spawn().build().unwrap();
    scene.select_object(stray.id(), false);
    assert_eq!(scene.selected(), &[e1]);
}

#[test]
fn deselect_object_leaves_others() {
    let (mut scene, e1, e2, _) = three_at_origin();
    scene.select(0.0, 0.0, 10.0, 11.0, false);
    scene.deselect_object(e1);
    assert_eq!(scene.selected(), &[e2]);
    assert!(!selected_flag(&scene, e1));
}

#[test]
fn select_all_and_deselect_all() {
    let (mut scene, e1, e2, e3) = three_at_origin();
    scene.select_all();
    assert_eq!(scene.selected().len(), 3);
    assert!(selected_flag(&scene, e1) && selected_flag(&scene, e2) && selected_flag(&scene, e3));
    scene.deselect_all();
    assert!(scene.selected().is_empty());
    assert!(!selected_flag(&scene, e1) && !selected_flag(&scene, e2) && !selected_flag(&scene, e3));
}

#[test]
fn select_all_when_everything_selected_is_quiet() {
    let mut scene = recording_scene();
    add_at(&mut scene, 0.0, 0.0);
    add_at(&mut scene, 1.0, 1.0);
    scene.select_all();
    let before = scene.renderer().calls.len();
    scene.select_all();
    assert_eq!(scene.renderer().calls.len(), before);
}

#[test]
fn redraw_only_on_selection_change() {
    let mut scene = recording_scene();
    scene.camera_mut().set_position(Point::new(0.0, 0.0));
    let id = add_at(&mut scene, 0.0, 0.0);
    scene.renderer_mut().calls.clear();

    scene.select(0.0, 0.0, 1.0, 1.0, false);
    scene.select(0.0, 0.0, 1.0, 1.0, true);
    assert_eq!(scene.renderer().calls, vec![Call::Redraw(id, true)]);

    scene.select(50.0, 50.0, 60.0, 60.0, false);
    scene.deselect_all();
    assert_eq!(scene.renderer().calls, vec![Call::Redraw(id, true), Call::Redraw(id, false)]);
}

// =============================================================
// Update
// =============================================================

#[test]
fn update_dampens_momentum_without_reversing() {
    let mut scene = scene();
    let entity = scene.spawn().momentum(Motion::new(10.0, 0.0, 0.0)).dampening(Motion::new(1.0, 0.0, 0.0)).build().unwrap();
    let id = scene.add(entity);
    scene.update(1.0);
    let body = scene.entity(id).unwrap();
    assert!(body.momentum.x >= 0.0 && body.momentum.x < 10.0);
    assert!(approx_eq(body.position.x, 10.0));
}

#[test]
fn passes_run_in_order_across_all_objects() {
    let mut scene = scene();
    let log = Rc::new(RefCell::new(Vec::new()));
    let a = Tally::new(&scene, "a", &log);
    let b = Tally::new(&scene, "b", &log);
    scene.add(a);
    scene.add(b);
    scene.update(0.016);
    assert_eq!(
        *log.borrow(),
        vec!["a:before", "b:before", "a:update", "b:update", "a:after", "b:after"]
    );
}

#[test]
fn removal_requested_during_update_is_deferred() {
    let mut scene = scene();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut a = Tally::new(&scene, "a", &log);
    let b = Tally::new(&scene, "b", &log);
    let a_id = a.body.id();
    let b_id = b.body.id();
    a.remove_on_update = Some(b_id);
    scene.add(a);
    scene.add(b);
    scene.select_object(b_id, false);

    scene.update(0.016);

    assert!(log.borrow().contains(&"b:after".to_string()));
    assert!(!scene.contains(b_id));
    assert!(scene.contains(a_id));
    assert!(scene.selected().is_empty());
}

#[test]
fn self_removal_is_applied_after_frame() {
    let mut scene = scene();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut a = Tally::new(&scene, "a", &log);
    a.remove_on_update = Some(a.body.id());
    let id = scene.add(a);
    scene.update(0.016);
    assert!(log.borrow().contains(&"a:after".to_string()));
    assert!(!scene.contains(id));
}

#[test]
fn update_eases_zoom_and_notifies() {
    let mut scene = scene();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    scene.subscribe(move |event| sink.borrow_mut().push(*event));
    scene.camera_mut().set_zoom(2.0);
    scene.update(0.016);
    assert!(scene.camera().scale() > 1.0);
    assert!(matches!(events.borrow().as_slice(), [SceneEvent::ZoomChanged { zoom, .. }] if *zoom == 2.0));
}

#[test]
fn settled_zoom_emits_nothing() {
    let mut scene = scene();
    let events = Rc::new(RefCell::new(0_usize));
    let sink = Rc::clone(&events);
    scene.subscribe(move |_| *sink.borrow_mut() += 1);
    scene.update(0.016);
    assert_eq!(*events.borrow(), 0);
}

// =============================================================
// Pause
// =============================================================

#[test]
fn pause_notifies_once_per_transition() {
    let mut scene = scene();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    scene.subscribe(move |event| sink.borrow_mut().push(*event));

    scene.set_paused(true);
    scene.set_paused(true);
    scene.set_paused(false);
    scene.set_paused(false);

    assert_eq!(*events.borrow(), vec![SceneEvent::Paused, SceneEvent::Resumed]);
}

#[test]
fn paused_scene_eases_zoom_but_freezes_entities() {
    let mut scene = scene();
    let entity = scene.spawn().momentum(Motion::new(10.0, 0.0, 0.0)).build().unwrap();
    let id = scene.add(entity);
    scene.camera_mut().set_zoom(0.5);
    scene.set_paused(true);

    scene.update(0.016);

    assert!(scene.camera().scale() < 1.0);
    assert_eq!(scene.entity(id).unwrap().position.x, 0.0);
    assert_eq!(scene.renderer().stats().raises, 0);
}

#[test]
fn toggle_pause_flips_state() {
    let mut scene = scene();
    assert!(scene.toggle_pause());
    assert!(scene.paused());
    assert!(!scene.toggle_pause());
    assert!(!scene.paused());
}

#[test]
fn unsubscribed_listener_is_silent() {
    let mut scene = scene();
    let count = Rc::new(RefCell::new(0_usize));
    let sink = Rc::clone(&count);
    let sub = scene.subscribe(move |_| *sink.borrow_mut() += 1);
    assert!(scene.unsubscribe(sub));
    scene.set_paused(true);
    assert_eq!(*count.borrow(), 0);
    assert!(!scene.unsubscribe(sub));
}

// =============================================================
// Input
// =============================================================

#[test]
fn handle_input_without_binding_does_nothing() {
    let mut scene = scene();
    let event = InputEvent::Wheel {
        screen: Point::new(0.0, 0.0),
        delta: crate::input::WheelDelta { dx: 0.0, dy: -1.0 },
        modifiers: Modifiers::default(),
    };
    assert!(scene.handle_input(event).is_none());
    assert_eq!(scene.camera().zoom(), 1.0);
}

#[test]
fn marquee_drag_selects_through_scene() {
    let (mut scene, e1, e2, _) = three_at_origin();
    scene.install_input(InputBinding::default());
    let mods = Modifiers::default();
    scene.handle_input(InputEvent::PointerDown { screen: Point::new(0.0, 0.0), button: Button::Primary, modifiers: mods });
    scene.handle_input(InputEvent::PointerMove { screen: Point::new(10.0, 11.0), modifiers: mods });
    let command = scene.handle_input(InputEvent::PointerUp {
        screen: Point::new(10.0, 11.0),
        button: Button::Primary,
        modifiers: mods,
    });
    assert!(matches!(command, Some(InputCommand::Marquee { additive: false, .. })));
    assert_eq!(scene.selected(), &[e1, e2]);
}

#[test]
fn click_selects_object_under_pointer() {
    let (mut scene, _, e2, _) = three_at_origin();
    scene.install_input(InputBinding::default());
    let mods = Modifiers::default();
    scene.handle_input(InputEvent::PointerDown { screen: Point::new(10.0, 10.0), button: Button::Primary, modifiers: mods });
    let command = scene.handle_input(InputEvent::PointerUp {
        screen: Point::new(10.0, 10.0),
        button: Button::Primary,
        modifiers: mods,
    });
    assert!(matches!(command, Some(InputCommand::Click { .. })));
    assert_eq!(scene.selected(), &[e2]);
}

#[test]
fn held_keys_pan_camera_during_update() {
    let mut scene = scene();
    scene.install_input(InputBinding::default());
    let start = scene.camera().position;
    scene.handle_input(InputEvent::KeyDown(crate::input::Key::new("ArrowLeft")));
    scene.update(0.0);
    assert!(approx_eq(scene.camera().position.x, start.x + 6.0));
}

#[test]
fn resize_updates_camera_and_renderer() {
    let mut scene = recording_scene();
    scene.resize(800.0, 600.0);
    assert_eq!(scene.camera().screen_center(), Point::new(400.0, 300.0));
    assert_eq!(scene.renderer().calls.last(), Some(&Call::Resize(800.0, 600.0)));
}
