/// Ordered surface teardown
///
/// A surface is torn down in a fixed sequence of typed steps. Each step
/// checks that the previous one has run; calling them out of order is a
/// contract violation.

use crate::request::SurfaceId;

/// Progress of a surface teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TeardownStage {
    /// All surface-owned state alive
    Bound,
    /// Swapchain, synchronization set and recorder destroyed
    SwapchainTorn,
    /// GUI window destroyed (or there was none)
    OverlayTorn,
    /// Drawable surface untracked and destroyed
    SurfaceTorn,
    Done,
}

#[derive(Debug)]
pub struct SurfaceTeardown {
    id: SurfaceId,
    stage: TeardownStage,
}

impl SurfaceTeardown {
    pub fn begin(id: SurfaceId) -> Self {
        crate::engine_debug!("galaxy3d::SurfaceTeardown", "begin teardown of surface {}", id);
        Self { id, stage: TeardownStage::Bound }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn stage(&self) -> TeardownStage {
        self.stage
    }

    fn advance(&mut self, expected: TeardownStage, next: TeardownStage) {
        if self.stage != expected {
            crate::engine_fatal!("galaxy3d::SurfaceTeardown",
                "surface {}: cannot enter {:?} from {:?} (expected {:?})",
                self.id, next, self.stage, expected);
        }
        crate::engine_trace!("galaxy3d::SurfaceTeardown", "surface {}: {:?}", self.id, next);
        self.stage = next;
    }

    pub fn tear_swapchain(&mut self) {
        self.advance(TeardownStage::Bound, TeardownStage::SwapchainTorn);
    }

    pub fn tear_overlay(&mut self) {
        self.advance(TeardownStage::SwapchainTorn, TeardownStage::OverlayTorn);
    }

    pub fn tear_surface(&mut self) {
        self.advance(TeardownStage::OverlayTorn, TeardownStage::SurfaceTorn);
    }

    pub fn finish(&mut self) {
        self.advance(TeardownStage::SurfaceTorn, TeardownStage::Done);
    }
}
