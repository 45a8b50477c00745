//! Core seams for the planning client.
//!
//! These are intentionally minimal. Concrete apps plug in their own
//! transport (an HTTP client, a fake, a recording) and their own drawable
//! surface (a browser map binding, an in-memory double).

use crate::dispatch::{DispatchError, RouteRequest, RouteResult};
use crate::layers::Layer;

/// A black-box route optimizer.
///
/// Implementations settle the outcome once, at this boundary; callers
/// never re-inspect transport payloads.
pub trait RouteOptimizer {
    fn optimize(&self, request: &RouteRequest) -> Result<RouteResult, DispatchError>;
}

impl<T> RouteOptimizer for &T
where
    T: RouteOptimizer + ?Sized,
{
    fn optimize(&self, request: &RouteRequest) -> Result<RouteResult, DispatchError> {
        (**self).optimize(request)
    }
}

/// Handle to one layer a surface currently displays.
///
/// Handles are issued by the surface and only ever redeemed against the
/// surface that issued them. Removing an unknown handle is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(u64);

impl LayerHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A drawable surface the renderer manages layers on.
///
/// The renderer retains every handle it creates and removes each one
/// before drawing a replacement, so surfaces only need create/destroy.
pub trait MapSurface {
    fn add_layer(&mut self, layer: Layer) -> LayerHandle;
    fn remove_layer(&mut self, handle: LayerHandle);
}
