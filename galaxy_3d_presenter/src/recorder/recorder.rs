/// Command recorder - cached drawing commands with per-image staleness
///
/// Each canvas owns one recorder. The command sequence is replayed into the
/// command buffer of a swapchain image only when that image is dirty; the
/// dirty bit of an image is cleared right after its command buffer has been
/// refilled, and every change to the sequence marks all images dirty again.

use glam::Vec2;
use crate::error::Result;
use crate::backend::RenderBackend;
use crate::request::{ObjectId, SurfaceId};

/// Drawing command replayed into a canvas command buffer
#[derive(Debug, Clone, PartialEq)]
pub enum RecordCommand {
    /// Start of the sequence (begins the canvas render pass)
    Begin { canvas: SurfaceId },
    /// Viewport, in framebuffer pixels
    Viewport { offset: Vec2, shape: Vec2 },
    /// Non-indexed draw with a graphics pipeline
    Draw {
        graphics: ObjectId,
        first_vertex: u32,
        vertex_count: u32,
        first_instance: u32,
        instance_count: u32,
    },
    /// Indexed draw with a graphics pipeline
    DrawIndexed {
        graphics: ObjectId,
        first_index: u32,
        vertex_offset: u32,
        index_count: u32,
        first_instance: u32,
        instance_count: u32,
    },
    /// Indirect draw reading its parameters from a dat
    DrawIndirect {
        graphics: ObjectId,
        indirect: ObjectId,
        draw_count: u32,
    },
    /// End of the sequence
    End { canvas: SurfaceId },
}

impl RecordCommand {
    /// Short name for traces and dumps
    pub fn name(&self) -> &'static str {
        match self {
            RecordCommand::Begin { .. } => "begin",
            RecordCommand::Viewport { .. } => "viewport",
            RecordCommand::Draw { .. } => "draw",
            RecordCommand::DrawIndexed { .. } => "draw_indexed",
            RecordCommand::DrawIndirect { .. } => "draw_indirect",
            RecordCommand::End { .. } => "end",
        }
    }
}

/// Cached command sequence of a canvas plus one dirty bit per swapchain image
#[derive(Debug, Clone)]
pub struct Recorder {
    commands: Vec<RecordCommand>,
    dirty: Vec<bool>,
}

impl Recorder {
    /// Empty recorder for a swapchain with `image_count` images (all dirty)
    pub fn new(image_count: u32) -> Self {
        Self {
            commands: Vec::new(),
            dirty: vec![true; image_count as usize],
        }
    }

    /// Number of cached commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no drawing command has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Cached commands in replay order
    pub fn commands(&self) -> &[RecordCommand] {
        &self.commands
    }

    /// Number of tracked swapchain images
    pub fn image_count(&self) -> u32 {
        self.dirty.len() as u32
    }

    /// Append a command; `Begin` restarts the sequence
    pub fn append(&mut self, command: RecordCommand) {
        if matches!(command, RecordCommand::Begin { .. }) {
            self.commands.clear();
        }
        self.commands.push(command);
        self.set_dirty();
    }

    /// Drop every cached command
    pub fn clear(&mut self) {
        self.commands.clear();
        self.set_dirty();
    }

    /// Mark every image dirty
    pub fn set_dirty(&mut self) {
        self.dirty.iter_mut().for_each(|bit| *bit = true);
    }

    /// Whether the command buffer of `image_index` must be refilled
    pub fn is_dirty(&self, image_index: u32) -> bool {
        self.dirty.get(image_index as usize).copied().unwrap_or_else(|| {
            crate::engine_fatal!("galaxy3d::Recorder",
                "image index {} out of range (count: {})", image_index, self.dirty.len())
        })
    }

    /// Number of images whose command buffer is stale
    pub fn dirty_count(&self) -> usize {
        self.dirty.iter().filter(|bit| **bit).count()
    }

    /// Track a new image count after swapchain recreation (all dirty)
    pub fn resize(&mut self, image_count: u32) {
        self.dirty = vec![true; image_count as usize];
    }

    /// Reset and refill the command buffer of `image_index`, then clear its dirty bit
    ///
    /// An empty recorder records a blank pass so that the image still
    /// presents well-defined content.
    pub fn refill(
        &mut self,
        backend: &mut dyn RenderBackend,
        canvas: SurfaceId,
        image_index: u32,
    ) -> Result<()> {
        if !self.is_dirty(image_index) {
            crate::engine_fatal!("galaxy3d::Recorder",
                "refill of clean image {} on canvas {}", image_index, canvas);
        }

        backend.reset_commands(canvas, image_index)?;
        if self.commands.is_empty() {
            crate::engine_debug!("galaxy3d::Recorder",
                "record blank commands for canvas {}, image {}", canvas, image_index);
            backend.record_blank(canvas, image_index)?;
        } else {
            backend.record_commands(canvas, image_index, &self.commands)?;
        }

        self.dirty[image_index as usize] = false;
        Ok(())
    }
}
