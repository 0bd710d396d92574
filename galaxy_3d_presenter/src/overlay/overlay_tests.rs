use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use crate::backend::{GuiWindow, GuiWindowHandle, OverlayUi, ResourceUsage};
use crate::request::ObjectId;
use crate::surface::FrameTimes;
use super::*;

#[derive(Default)]
struct TextUi {
    lines: Vec<String>,
}

impl OverlayUi for TextUi {
    fn begin_panel(&mut self, title: &str) {
        self.lines.push(format!("[{}]", title));
    }

    fn text(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn end_panel(&mut self) {}
}

fn window(id: u64) -> GuiWindow {
    GuiWindow { id: ObjectId(id), handle: GuiWindowHandle(id), width: 100, height: 100 }
}

/// Run `f` with a context for window `id`
fn with_context<R>(id: u64, ui: &mut TextUi, f: impl FnOnce(&mut OverlayContext<'_>) -> R) -> R {
    let window = window(id);
    let mut times = FrameTimes::new(4);
    let start = Instant::now();
    times.record(start);
    times.record(start + Duration::from_millis(500));
    let mut ctx = OverlayContext {
        window: &window,
        ui,
        frame_index: 7,
        frame_times: &times,
        resources: ResourceUsage { allocated_bytes: 2048, buffer_count: 3, texture_count: 4 },
    };
    f(&mut ctx)
}

fn tagging(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Overlay {
    let log = log.clone();
    Overlay::custom(move |_ctx| log.borrow_mut().push(tag))
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_register_counts_per_target() {
    let mut registry = OverlayRegistry::new();
    registry.register(ObjectId(1), Overlay::Fps(FpsOverlay));
    registry.register(ObjectId(1), Overlay::Monitor(MonitorOverlay));
    registry.register(ObjectId(2), Overlay::Fps(FpsOverlay));

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.count_for(ObjectId(1)), 2);
    assert_eq!(registry.count_for(ObjectId(2)), 1);
    assert_eq!(registry.count_for(ObjectId(3)), 0);
}

#[test]
fn test_unregister_removes_one_entry() {
    let mut registry = OverlayRegistry::new();
    let first = registry.register(ObjectId(1), Overlay::Fps(FpsOverlay));
    registry.register(ObjectId(1), Overlay::Monitor(MonitorOverlay));

    assert_eq!(registry.target(first), Some(ObjectId(1)));
    assert!(registry.unregister(first));
    assert!(!registry.unregister(first));
    assert_eq!(registry.count_for(ObjectId(1)), 1);
    assert_eq!(registry.target(first), None);
}

#[test]
fn test_clear_drops_captured_state() {
    let captured = Rc::new(());
    let mut registry = OverlayRegistry::new();
    let held = captured.clone();
    registry.register(ObjectId(1), Overlay::custom(move |_ctx| {
        let _keep = &held;
    }));
    assert_eq!(Rc::strong_count(&captured), 2);

    registry.clear();

    assert!(registry.is_empty());
    assert_eq!(Rc::strong_count(&captured), 1);
}

// ============================================================================
// Invocation
// ============================================================================

#[test]
fn test_invoke_only_matching_target_in_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = OverlayRegistry::new();
    registry.register(ObjectId(1), tagging(&log, "a"));
    registry.register(ObjectId(2), tagging(&log, "other"));
    registry.register(ObjectId(1), tagging(&log, "b"));
    registry.register(ObjectId(1), tagging(&log, "c"));

    let mut ui = TextUi::default();
    let invoked = with_context(1, &mut ui, |ctx| registry.invoke_for(ObjectId(1), ctx));

    assert_eq!(invoked, 3);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
}

#[test]
fn test_order_survives_unregister() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = OverlayRegistry::new();
    registry.register(ObjectId(1), tagging(&log, "a"));
    let b = registry.register(ObjectId(1), tagging(&log, "b"));
    registry.register(ObjectId(1), tagging(&log, "c"));
    registry.unregister(b);
    registry.register(ObjectId(1), tagging(&log, "d"));

    let mut ui = TextUi::default();
    with_context(1, &mut ui, |ctx| registry.invoke_for(ObjectId(1), ctx));

    assert_eq!(*log.borrow(), vec!["a", "c", "d"]);
}

#[test]
fn test_custom_overlay_sees_context() {
    let seen = Rc::new(RefCell::new(None));
    let sink = seen.clone();
    let mut registry = OverlayRegistry::new();
    registry.register(ObjectId(5), Overlay::custom(move |ctx| {
        *sink.borrow_mut() = Some((ctx.window.id, ctx.frame_index));
        ctx.ui.text("hello");
    }));

    let mut ui = TextUi::default();
    with_context(5, &mut ui, |ctx| registry.invoke_for(ObjectId(5), ctx));

    assert_eq!(*seen.borrow(), Some((ObjectId(5), 7)));
    assert_eq!(ui.lines, vec!["hello"]);
}

// ============================================================================
// Built-in overlays
// ============================================================================

#[test]
fn test_fps_overlay_text() {
    let mut ui = TextUi::default();
    with_context(1, &mut ui, |ctx| Overlay::Fps(FpsOverlay).render(ctx));

    assert_eq!(ui.lines, vec!["[FPS]", "2.0 FPS", "frame 7"]);
}

#[test]
fn test_monitor_overlay_text() {
    let mut ui = TextUi::default();
    with_context(1, &mut ui, |ctx| Overlay::Monitor(MonitorOverlay).render(ctx));

    assert_eq!(ui.lines, vec!["[GPU]", "memory: 2 KiB", "buffers: 3", "textures: 4"]);
}

#[test]
fn test_overlay_names() {
    assert_eq!(Overlay::Fps(FpsOverlay).name(), "fps");
    assert_eq!(Overlay::Monitor(MonitorOverlay).name(), "monitor");
    assert_eq!(Overlay::custom(|_ctx| {}).name(), "custom");
    assert_eq!(format!("{:?}", Overlay::Fps(FpsOverlay)), "Overlay::fps");
}
