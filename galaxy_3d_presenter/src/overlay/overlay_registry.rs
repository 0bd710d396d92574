/// Overlay registry - overlays bound to canvases by id, invoked in registration order

use slotmap::{SlotMap, new_key_type};
use crate::request::SurfaceId;
use super::overlay::{Overlay, OverlayContext};

new_key_type! {
    /// Stable key of a registered overlay
    pub struct OverlayKey;
}

struct OverlayEntry {
    target: SurfaceId,
    overlay: Overlay,
}

#[derive(Default)]
pub struct OverlayRegistry {
    entries: SlotMap<OverlayKey, OverlayEntry>,
    /// Keys in registration order
    order: Vec<OverlayKey>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overlay for `target`; the same canvas may hold any number of them
    pub fn register(&mut self, target: SurfaceId, overlay: Overlay) -> OverlayKey {
        crate::engine_debug!("galaxy3d::OverlayRegistry",
            "register {} overlay for surface {}", overlay.name(), target);
        let key = self.entries.insert(OverlayEntry { target, overlay });
        self.order.push(key);
        key
    }

    /// Remove one overlay; returns false if the key is stale
    pub fn unregister(&mut self, key: OverlayKey) -> bool {
        if self.entries.remove(key).is_none() {
            return false;
        }
        self.order.retain(|k| *k != key);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of overlays targeting `target`
    pub fn count_for(&self, target: SurfaceId) -> usize {
        self.entries.values().filter(|entry| entry.target == target).count()
    }

    /// Target of a registered overlay
    pub fn target(&self, key: OverlayKey) -> Option<SurfaceId> {
        self.entries.get(key).map(|entry| entry.target)
    }

    /// Render every overlay targeting `target`, in registration order
    ///
    /// Returns the number of overlays invoked.
    pub fn invoke_for(&mut self, target: SurfaceId, ctx: &mut OverlayContext<'_>) -> usize {
        let mut invoked = 0;
        for key in &self.order {
            if let Some(entry) = self.entries.get_mut(*key) {
                if entry.target == target {
                    entry.overlay.render(ctx);
                    invoked += 1;
                }
            }
        }
        invoked
    }

    /// Drop every overlay and its captured state
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
