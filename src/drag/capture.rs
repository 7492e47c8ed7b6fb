use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Identifies one pointing device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for capture requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("pointer capture is unavailable")]
    Unavailable,
    #[error("pointer {0} already holds the capture")]
    Busy(PointerId),
}

#[derive(Debug)]
struct CaptureState {
    available: bool,
    held: Option<PointerId>,
}

/// Grants exclusive pointer capture to at most one pointer at a time.
///
/// Capture is handed out as a [`PointerCapture`] guard; dropping the guard
/// releases it, so no exit path can leave a capture stuck.
#[derive(Debug, Clone)]
pub struct CaptureRegistry {
    state: Rc<RefCell<CaptureState>>,
}

impl Default for CaptureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureRegistry {
    pub fn new() -> Self {
        CaptureRegistry {
            state: Rc::new(RefCell::new(CaptureState {
                available: true,
                held: None,
            })),
        }
    }

    /// A registry whose every request fails (no mouse support)
    pub fn unavailable() -> Self {
        let registry = Self::new();
        registry.set_available(false);
        registry
    }

    pub fn set_available(&self, available: bool) {
        self.state.borrow_mut().available = available;
    }

    /// The pointer currently holding capture, if any
    pub fn holder(&self) -> Option<PointerId> {
        self.state.borrow().held
    }

    pub fn acquire(&self, pointer: PointerId) -> Result<PointerCapture, CaptureError> {
        let mut state = self.state.borrow_mut();
        if !state.available {
            return Err(CaptureError::Unavailable);
        }
        if let Some(holder) = state.held {
            return Err(CaptureError::Busy(holder));
        }
        state.held = Some(pointer);
        Ok(PointerCapture {
            state: Rc::clone(&self.state),
            pointer,
        })
    }
}

/// Held capture; released on drop
#[derive(Debug)]
pub struct PointerCapture {
    state: Rc<RefCell<CaptureState>>,
    pointer: PointerId,
}

impl PointerCapture {
    pub fn pointer(&self) -> PointerId {
        self.pointer
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.held == Some(self.pointer) {
            state.held = None;
        }
    }
}
