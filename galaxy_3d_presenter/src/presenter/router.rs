/// Request router - applies batches to the backend and drives the lifecycle

use crate::error::Result;
use crate::request::{Batch, Request, RequestAction, RequestContent};
use super::presenter::Presenter;

impl Presenter {
    /// Apply every request of a batch in order, then release the batch
    ///
    /// Each request reaches the backend first. Canvas create/delete then runs
    /// the surface lifecycle, and record requests feed the canvas recorder.
    pub fn process_requests(&mut self, batch: Batch) -> Result<()> {
        crate::engine_trace!("galaxy3d::Router", "process batch of {} requests", batch.len());
        for request in batch.into_requests() {
            self.backend.apply(&request)?;
            self.route(request)?;
        }
        Ok(())
    }

    fn route(&mut self, request: Request) -> Result<()> {
        if request.is_canvas_lifecycle() {
            return match (request.action, request.content) {
                (RequestAction::Create, RequestContent::Canvas { screen_width, screen_height, flags }) => {
                    self.create_surface(request.id, screen_width, screen_height, flags);
                    Ok(())
                }
                (RequestAction::Create, content) => crate::engine_fatal!("galaxy3d::Router",
                    "canvas create {} without canvas content: {:?}", request.id, content),
                _ => self.delete_surface(request.id),
            };
        }

        if request.action == RequestAction::Record {
            let RequestContent::Record(command) = request.content else {
                crate::engine_fatal!("galaxy3d::Router",
                    "record request {} without a command", request.id);
            };
            let Some(surface) = self.surfaces.get_mut(request.id) else {
                crate::engine_fatal!("galaxy3d::Router",
                    "record {} for unknown surface {}", command.name(), request.id);
            };
            surface.recorder.append(command);
        }
        Ok(())
    }
}
