use glam::Vec2;
use crate::recorder::RecordCommand;
use super::*;

fn canvas_id() -> SurfaceId {
    ObjectId(0x10)
}

fn sample_batch() -> Batch {
    let mut batch = Batch::new();
    batch
        .add(Request::create_canvas(canvas_id(), 800, 600, CanvasFlags::FPS))
        .add(Request::record(canvas_id(), RecordCommand::Begin { canvas: canvas_id() }))
        .add(Request::record(canvas_id(), RecordCommand::Viewport {
            offset: Vec2::ZERO,
            shape: Vec2::new(1600.0, 1200.0),
        }))
        .add(Request::record(canvas_id(), RecordCommand::Draw {
            graphics: ObjectId(0x20),
            first_vertex: 0,
            vertex_count: 3,
            first_instance: 0,
            instance_count: 1,
        }))
        .add(Request::record(canvas_id(), RecordCommand::End { canvas: canvas_id() }));
    batch
}

// ============================================================================
// ObjectId
// ============================================================================

#[test]
fn test_object_id_display_is_hex() {
    assert_eq!(ObjectId(255).to_string(), "0xff");
    assert_eq!(ObjectId(255).raw(), 255);
}

// ============================================================================
// CanvasFlags
// ============================================================================

#[test]
fn test_fps_and_monitor_imply_gui() {
    assert!(CanvasFlags::FPS.has_gui());
    assert!(CanvasFlags::MONITOR.has_gui());
    assert!(!CanvasFlags::FULLSCREEN.has_gui());
}

#[test]
fn test_imgui_alone_has_no_builtin_overlay() {
    let flags = CanvasFlags::IMGUI;
    assert!(flags.has_gui());
    assert!(!flags.has_fps());
    assert!(!flags.has_monitor());
}

#[test]
fn test_overlay_bits_are_independent() {
    assert!(CanvasFlags::FPS.has_fps());
    assert!(!CanvasFlags::FPS.has_monitor());
    assert!(CanvasFlags::MONITOR.has_monitor());
    assert!(!CanvasFlags::MONITOR.has_fps());

    let both = CanvasFlags::FPS | CanvasFlags::MONITOR;
    assert!(both.has_fps() && both.has_monitor());
}

#[test]
fn test_fullscreen_flag() {
    assert!(CanvasFlags::FULLSCREEN.is_fullscreen());
    assert!(!CanvasFlags::empty().is_fullscreen());
    assert!(!CanvasFlags::empty().has_gui());
}

// ============================================================================
// Request
// ============================================================================

#[test]
fn test_create_canvas_request() {
    let request = Request::create_canvas(canvas_id(), 640, 480, CanvasFlags::empty());
    assert_eq!(request.action, RequestAction::Create);
    assert_eq!(request.object, RequestObject::Canvas);
    assert_eq!(request.id, canvas_id());
    assert_eq!(
        request.content,
        RequestContent::Canvas { screen_width: 640, screen_height: 480, flags: CanvasFlags::empty() }
    );
    assert!(request.is_canvas_lifecycle());
}

#[test]
fn test_delete_canvas_request() {
    let request = Request::delete_canvas(canvas_id());
    assert_eq!(request.action, RequestAction::Delete);
    assert_eq!(request.content, RequestContent::None);
    assert!(request.is_canvas_lifecycle());
}

#[test]
fn test_non_lifecycle_requests() {
    let resize = Request::new(RequestAction::Resize, RequestObject::Canvas, canvas_id(), RequestContent::None);
    let upload = Request::new(RequestAction::Upload, RequestObject::Dat, ObjectId(3), RequestContent::Data { size: 64 });
    let record = Request::record(canvas_id(), RecordCommand::End { canvas: canvas_id() });

    assert!(!resize.is_canvas_lifecycle());
    assert!(!upload.is_canvas_lifecycle());
    assert!(!record.is_canvas_lifecycle());
}

#[test]
fn test_request_display() {
    let create = Request::create_canvas(canvas_id(), 800, 600, CanvasFlags::IMGUI);
    assert_eq!(create.to_string(), "Create Canvas 0x10 800x600 flags=0x1");

    let record = Request::record(canvas_id(), RecordCommand::Begin { canvas: canvas_id() });
    assert_eq!(record.to_string(), "Record Record 0x10 begin");

    let upload = Request::new(RequestAction::Upload, RequestObject::Dat, ObjectId(1), RequestContent::Data { size: 12 });
    assert_eq!(upload.to_string(), "Upload Dat 0x1 12 bytes");
}

// ============================================================================
// Batch
// ============================================================================

#[test]
fn test_batch_preserves_order() {
    let batch = sample_batch();
    assert_eq!(batch.len(), 5);
    assert!(!batch.is_empty());
    assert!(batch.requests()[0].is_canvas_lifecycle());
    assert_eq!(batch.requests()[4].action, RequestAction::Record);
}

#[test]
fn test_batch_from_vec_and_into_requests() {
    let requests = vec![Request::delete_canvas(canvas_id())];
    let batch = Batch::from(requests.clone());
    assert_eq!(batch.into_requests(), requests);
    assert!(Batch::new().is_empty());
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_batch_document() {
    let mut out = Vec::new();
    export_batch(&sample_batch(), &mut out).unwrap();

    let document: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(document["version"], BATCH_EXPORT_VERSION);
    assert_eq!(document["count"], 5);

    let requests = document["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 5);
    assert_eq!(requests[0]["action"], "Create");
    assert_eq!(requests[0]["type"], "Canvas");
    assert_eq!(requests[0]["id"], 0x10);
    assert_eq!(requests[0]["content"]["flags"], CanvasFlags::FPS.bits());
    assert_eq!(requests[2]["content"]["command"], "viewport");
    assert_eq!(requests[2]["content"]["shape"][0], 1600.0);
    assert_eq!(requests[3]["content"]["graphics"], 0x20);
    assert_eq!(requests[3]["content"]["vertex_count"], 3);
}

#[test]
fn test_export_empty_batch() {
    let mut out = Vec::new();
    export_batch(&Batch::new(), &mut out).unwrap();

    let document: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(document["count"], 0);
    assert!(document["requests"].as_array().unwrap().is_empty());
    assert!(out.ends_with(b"\n"));
}
