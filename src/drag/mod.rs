//! Pointer drag-reorder engine.
//!
//! Everything here is headless: geometry, pointer capture, hit testing and
//! the drag state machine are driven by plain values so they can be tested
//! without a terminal.

pub mod capture;
pub mod geometry;
pub mod session;

pub use capture::{CaptureError, CaptureRegistry, PointerCapture, PointerId};
pub use geometry::{Bounds, Point};
pub use hit_test::{DropZone, HitMap};
pub use session::{
    DRAG_THRESHOLD, DownOutcome, DragController, DragState, DragVisuals, DropRequest, Ghost,
    MoveOutcome, Press, PressRegion, ReleaseOutcome,
};
