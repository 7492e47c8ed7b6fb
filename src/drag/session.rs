//! Pointer-driven reorder sessions.
//!
//! A press on an item arms a session; moving the pointer at least the
//! threshold away promotes it to a drag with a ghost and a live drop zone;
//! releasing turns it into either a drop request or a plain click. The
//! controller never touches the item store itself: callers feed it pointer
//! events plus the current [`HitMap`] and act on the returned outcomes.

use tracing::debug;

use crate::model::item::ItemId;

use super::capture::{CaptureRegistry, PointerCapture, PointerId};
use super::geometry::Point;
use super::hit_test::{DropZone, HitMap};

/// Default activation distance in pointer units
pub const DRAG_THRESHOLD: u32 = 5;

/// What kind of region of an item was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressRegion {
    /// Plain card surface: may start a drag
    Body,
    /// Inline-editable text; keeps its click behaviour
    Editable,
    /// A button such as delete
    Button,
}

/// A press on a rendered item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    pub item: ItemId,
    pub region: PressRegion,
}

impl Press {
    pub fn body(item: ItemId) -> Self {
        Press {
            item,
            region: PressRegion::Body,
        }
    }
}

/// Observable controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Armed,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownOutcome {
    Armed,
    /// Press on an editable or button region
    Ignored,
    /// Another session is still open
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No session, or a different pointer
    Ignored,
    /// Still armed, below threshold or without capture
    Pending,
    /// Promoted to dragging by this move
    Started,
    /// Drag in progress
    Moved,
}

impl MoveOutcome {
    /// Default gesture handling is suppressed only once dragging
    pub fn suppresses_default(self) -> bool {
        matches!(self, MoveOutcome::Started | MoveOutcome::Moved)
    }
}

/// A completed drag, ready for the reorder committer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropRequest {
    pub dragged: ItemId,
    pub zone: DropZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Ignored,
    /// Released before the drag threshold: an ordinary click
    Click(ItemId),
    Drop(DropRequest),
    /// Dragged but released over empty space
    Cancelled,
}

/// Floating proxy following the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    pub item: ItemId,
    /// Top-left corner of the proxy
    pub position: Point,
}

/// Everything the renderer needs to draw drag feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragVisuals {
    /// Item being dragged (dimmed in place)
    pub source: Option<ItemId>,
    pub drop_zone: Option<DropZone>,
    pub ghost: Option<Ghost>,
}

impl DragVisuals {
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.drop_zone.is_none() && self.ghost.is_none()
    }
}

#[derive(Debug)]
enum Phase {
    Armed,
    Dragging {
        /// Pointer position relative to the source box at promotion
        offset: Point,
        pointer_at: Point,
        zone: Option<DropZone>,
    },
}

#[derive(Debug)]
struct Session {
    pointer: PointerId,
    item: ItemId,
    origin: Point,
    /// `None` when the capture request failed; such a session never drags
    capture: Option<PointerCapture>,
    phase: Phase,
}

/// Drives at most one drag session at a time
#[derive(Debug)]
pub struct DragController {
    threshold: u32,
    captures: CaptureRegistry,
    session: Option<Session>,
}

impl DragController {
    pub fn new(threshold: u32, captures: CaptureRegistry) -> Self {
        DragController {
            threshold,
            captures,
            session: None,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn captures(&self) -> &CaptureRegistry {
        &self.captures
    }

    pub fn state(&self) -> DragState {
        match &self.session {
            None => DragState::Idle,
            Some(Session {
                phase: Phase::Armed,
                ..
            }) => DragState::Armed,
            Some(Session {
                phase: Phase::Dragging { .. },
                ..
            }) => DragState::Dragging,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.state() == DragState::Dragging
    }

    /// Item the open session was started on
    pub fn active_item(&self) -> Option<ItemId> {
        self.session.as_ref().map(|s| s.item)
    }

    /// Press on an item. Arms a session unless the press landed on an
    /// editable/button region or a session is already open.
    pub fn pointer_down(&mut self, pointer: PointerId, point: Point, press: Press) -> DownOutcome {
        if self.session.is_some() {
            debug!(%pointer, "press rejected: drag session already open");
            return DownOutcome::Rejected;
        }
        if press.region != PressRegion::Body {
            return DownOutcome::Ignored;
        }
        let item = press.item;
        let capture = match self.captures.acquire(pointer) {
            Ok(guard) => Some(guard),
            Err(err) => {
                debug!(%pointer, %err, "pointer capture failed; press cannot become a drag");
                None
            }
        };
        self.session = Some(Session {
            pointer,
            item,
            origin: point,
            capture,
            phase: Phase::Armed,
        });
        debug!(%pointer, %item, x = point.x, y = point.y, "drag armed");
        DownOutcome::Armed
    }

    /// Pointer movement. Promotes an armed session once the threshold is
    /// reached and refreshes the ghost and drop zone while dragging.
    pub fn pointer_move(&mut self, pointer: PointerId, point: Point, hits: &HitMap) -> MoveOutcome {
        let threshold = self.threshold;
        let Some(session) = self.session.as_mut().filter(|s| s.pointer == pointer) else {
            return MoveOutcome::Ignored;
        };
        match session.phase {
            Phase::Armed => {
                if session.capture.is_none() || !session.origin.reaches(point, threshold) {
                    return MoveOutcome::Pending;
                }
                let offset = hits
                    .bounds_of(session.item)
                    .map_or(Point::default(), |b| point - b.origin());
                let zone = hits.resolve(point, session.item);
                session.phase = Phase::Dragging {
                    offset,
                    pointer_at: point,
                    zone,
                };
                debug!(item = %session.item, ?zone, "drag started");
                MoveOutcome::Started
            }
            Phase::Dragging {
                ref mut pointer_at,
                ref mut zone,
                ..
            } => {
                *pointer_at = point;
                *zone = hits.resolve(point, session.item);
                MoveOutcome::Moved
            }
        }
    }

    /// Pointer release. Always ends the session for this pointer.
    pub fn pointer_up(&mut self, pointer: PointerId, point: Point, hits: &HitMap) -> ReleaseOutcome {
        if self.session.as_ref().is_none_or(|s| s.pointer != pointer) {
            return ReleaseOutcome::Ignored;
        }
        let Some(session) = self.session.take() else {
            return ReleaseOutcome::Ignored;
        };
        match session.phase {
            Phase::Armed => ReleaseOutcome::Click(session.item),
            Phase::Dragging { .. } => match hits.resolve(point, session.item) {
                Some(zone) => {
                    debug!(item = %session.item, ?zone, "drag released over target");
                    ReleaseOutcome::Drop(DropRequest {
                        dragged: session.item,
                        zone,
                    })
                }
                None => {
                    debug!(item = %session.item, "drag released over empty space");
                    ReleaseOutcome::Cancelled
                }
            },
        }
        // session (and its capture guard) dropped here
    }

    /// Lost capture or device gone: end without committing
    pub fn pointer_cancel(&mut self, pointer: PointerId) -> bool {
        if self.session.as_ref().is_some_and(|s| s.pointer == pointer) {
            self.abort();
            true
        } else {
            false
        }
    }

    /// End any open session without committing
    pub fn abort(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(item = %session.item, "drag aborted");
        }
    }

    pub fn visuals(&self) -> DragVisuals {
        match &self.session {
            Some(Session {
                item,
                phase:
                    Phase::Dragging {
                        offset,
                        pointer_at,
                        zone,
                    },
                ..
            }) => DragVisuals {
                source: Some(*item),
                drop_zone: *zone,
                ghost: Some(Ghost {
                    item: *item,
                    position: *pointer_at - *offset,
                }),
            },
            _ => DragVisuals::default(),
        }
    }
}
