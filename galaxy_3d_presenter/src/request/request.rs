/// Requests consumed from the upstream client
///
/// A request targets one backend object (`ObjectId`) with an action. The
/// presenter applies every request to the rendering backend unchanged and
/// only looks at canvas create/delete and record requests.

use std::fmt;
use bitflags::bitflags;
use crate::recorder::RecordCommand;

/// Opaque backend object id
///
/// Canvases share their id with the window and the drawable surface bound to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Id of a canvas / window / surface triple
pub type SurfaceId = ObjectId;

impl ObjectId {
    /// Raw id value
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

bitflags! {
    /// Canvas creation flags
    ///
    /// `FPS` and `MONITOR` include the `IMGUI` bit: asking for a built-in
    /// overlay implies a GUI window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CanvasFlags: u32 {
        /// Bind a GUI window to the canvas
        const IMGUI = 0x0001;
        /// GUI window with the frame-rate overlay
        const FPS = 0x0002 | Self::IMGUI.bits();
        /// GUI window with the resource-usage overlay
        const MONITOR = 0x0004 | Self::IMGUI.bits();
        /// Start fullscreen
        const FULLSCREEN = 0x0008;
    }
}

impl CanvasFlags {
    /// A GUI window must be bound to the canvas
    pub fn has_gui(self) -> bool {
        self.contains(Self::IMGUI)
    }

    /// The frame-rate overlay bit is set (IMGUI bit ignored)
    pub fn has_fps(self) -> bool {
        self.bits() & (Self::FPS.bits() ^ Self::IMGUI.bits()) != 0
    }

    /// The resource-usage overlay bit is set (IMGUI bit ignored)
    pub fn has_monitor(self) -> bool {
        self.bits() & (Self::MONITOR.bits() ^ Self::IMGUI.bits()) != 0
    }

    /// The window starts fullscreen
    pub fn is_fullscreen(self) -> bool {
        self.contains(Self::FULLSCREEN)
    }
}

/// Request action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestAction {
    Create,
    Delete,
    Resize,
    Update,
    Upload,
    Upfill,
    Download,
    Set,
    Get,
    Bind,
    /// Append a drawing command to a canvas recorder
    Record,
}

/// Kind of backend object a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestObject {
    Canvas,
    Dat,
    Tex,
    Sampler,
    Shader,
    Graphics,
    Compute,
    Record,
}

/// Request payload
#[derive(Debug, Clone, PartialEq)]
pub enum RequestContent {
    None,
    /// Canvas creation: screen (logical) size and flags
    Canvas {
        screen_width: u32,
        screen_height: u32,
        flags: CanvasFlags,
    },
    /// Drawing command for the canvas recorder
    Record(RecordCommand),
    /// Data transfer of `size` bytes
    Data { size: u64 },
}

/// One request of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub action: RequestAction,
    pub object: RequestObject,
    pub id: ObjectId,
    pub content: RequestContent,
}

impl Request {
    /// Canvas creation request
    pub fn create_canvas(id: SurfaceId, screen_width: u32, screen_height: u32, flags: CanvasFlags) -> Self {
        Self {
            action: RequestAction::Create,
            object: RequestObject::Canvas,
            id,
            content: RequestContent::Canvas { screen_width, screen_height, flags },
        }
    }

    /// Canvas deletion request
    pub fn delete_canvas(id: SurfaceId) -> Self {
        Self {
            action: RequestAction::Delete,
            object: RequestObject::Canvas,
            id,
            content: RequestContent::None,
        }
    }

    /// Recorder command for canvas `id`
    pub fn record(id: SurfaceId, command: RecordCommand) -> Self {
        Self {
            action: RequestAction::Record,
            object: RequestObject::Record,
            id,
            content: RequestContent::Record(command),
        }
    }

    /// Any other request (forwarded to the backend only)
    pub fn new(action: RequestAction, object: RequestObject, id: ObjectId, content: RequestContent) -> Self {
        Self { action, object, id, content }
    }

    /// Canvas create or delete: drives the surface lifecycle
    pub fn is_canvas_lifecycle(&self) -> bool {
        self.object == RequestObject::Canvas
            && matches!(self.action, RequestAction::Create | RequestAction::Delete)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {:?} {}", self.action, self.object, self.id)?;
        match &self.content {
            RequestContent::None => Ok(()),
            RequestContent::Canvas { screen_width, screen_height, flags } => {
                write!(f, " {}x{} flags=0x{:x}", screen_width, screen_height, flags.bits())
            }
            RequestContent::Record(command) => write!(f, " {}", command.name()),
            RequestContent::Data { size } => write!(f, " {} bytes", size),
        }
    }
}

/// Ordered batch of requests
///
/// Consumed by the presenter: released once every request has been routed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    requests: Vec<Request>,
}

impl Batch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request
    pub fn add(&mut self, request: Request) -> &mut Self {
        self.requests.push(request);
        self
    }

    /// Number of requests
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the batch holds no request
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Requests in submission order
    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Consume the batch
    pub fn into_requests(self) -> Vec<Request> {
        self.requests
    }
}

impl From<Vec<Request>> for Batch {
    fn from(requests: Vec<Request>) -> Self {
        Self { requests }
    }
}
