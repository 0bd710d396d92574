/// Batch diagnostics: human-readable print and JSON export
///
/// Both are driven by `PresenterConfig` and never affect routing.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde_json::{Value, json};

use crate::recorder::RecordCommand;
use super::request::{Batch, Request, RequestContent};

/// Version tag written at the top of every export
pub const BATCH_EXPORT_VERSION: &str = "1.0";

/// Log one Info line per request
pub fn print_batch(batch: &Batch) {
    crate::engine_info!("galaxy3d::Batch", "batch with {} requests", batch.len());
    for (index, request) in batch.requests().iter().enumerate() {
        crate::engine_info!("galaxy3d::Batch", "  #{:03} {}", index, request);
    }
}

/// Write the batch as one JSON document
pub fn export_batch(batch: &Batch, writer: &mut dyn Write) -> io::Result<()> {
    let requests: Vec<Value> = batch.requests().iter().map(request_to_json).collect();
    let document = json!({
        "version": BATCH_EXPORT_VERSION,
        "count": batch.len(),
        "requests": requests,
    });
    serde_json::to_writer_pretty(&mut *writer, &document)?;
    writer.write_all(b"\n")
}

/// Write the batch to `path`, replacing the previous export
pub fn export_batch_to_file(batch: &Batch, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    export_batch(batch, &mut writer)?;
    writer.flush()
}

fn request_to_json(request: &Request) -> Value {
    json!({
        "action": format!("{:?}", request.action),
        "type": format!("{:?}", request.object),
        "id": request.id.raw(),
        "content": content_to_json(&request.content),
    })
}

fn content_to_json(content: &RequestContent) -> Value {
    match content {
        RequestContent::None => Value::Null,
        RequestContent::Canvas { screen_width, screen_height, flags } => json!({
            "screen_width": screen_width,
            "screen_height": screen_height,
            "flags": flags.bits(),
        }),
        RequestContent::Record(command) => record_to_json(command),
        RequestContent::Data { size } => json!({ "size": size }),
    }
}

fn record_to_json(command: &RecordCommand) -> Value {
    match command {
        RecordCommand::Begin { canvas } => json!({ "command": "begin", "canvas": canvas.raw() }),
        RecordCommand::Viewport { offset, shape } => json!({
            "command": "viewport",
            "offset": [offset.x, offset.y],
            "shape": [shape.x, shape.y],
        }),
        RecordCommand::Draw { graphics, first_vertex, vertex_count, first_instance, instance_count } => json!({
            "command": "draw",
            "graphics": graphics.raw(),
            "first_vertex": first_vertex,
            "vertex_count": vertex_count,
            "first_instance": first_instance,
            "instance_count": instance_count,
        }),
        RecordCommand::DrawIndexed {
            graphics, first_index, vertex_offset, index_count, first_instance, instance_count,
        } => json!({
            "command": "draw_indexed",
            "graphics": graphics.raw(),
            "first_index": first_index,
            "vertex_offset": vertex_offset,
            "index_count": index_count,
            "first_instance": first_instance,
            "instance_count": instance_count,
        }),
        RecordCommand::DrawIndirect { graphics, indirect, draw_count } => json!({
            "command": "draw_indirect",
            "graphics": graphics.raw(),
            "indirect": indirect.raw(),
            "draw_count": draw_count,
        }),
        RecordCommand::End { canvas } => json!({ "command": "end", "canvas": canvas.raw() }),
    }
}
