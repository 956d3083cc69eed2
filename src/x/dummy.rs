#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use crate::corners::Fill;
use crate::types::Size;
use crate::x::core::{MaskKind, Result, ShapeSink, XError, XWindowID};

/// A request recorded by a [`DummyConn`].
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    CreateSurface {
        window: XWindowID,
        size: Size,
        surface: u32,
    },
    DestroySurface(u32),
    Fill(u32, Fill),
    SetMask(XWindowID, MaskKind, u32),
    ClearMask(XWindowID),
    Flush,
}

/// A dummy connection implementing ShapeSink but actually
/// does not interface with the X server at all, and
/// should mainly be used for testing.
///
/// `DummyConn` records every request made on it, in order,
/// and can be told to fail surface creation or mask submission.
pub struct DummyConn {
    shape: bool,
    next_id: Cell<u32>,
    requests: RefCell<Vec<Request>>,
    fail_create: Cell<bool>,
    fail_mask: Cell<bool>,
}

impl DummyConn {
    /// Creates a new DummyConn with the SHAPE extension present.
    pub fn new() -> Self {
        Self {
            shape: true,
            next_id: Cell::new(1),
            requests: RefCell::new(Vec::new()),
            fail_create: Cell::new(false),
            fail_mask: Cell::new(false),
        }
    }

    /// Creates a new DummyConn on a server without SHAPE.
    pub fn without_shape() -> Self {
        Self {
            shape: false,
            ..Self::new()
        }
    }

    /// Makes surface creation fail.
    pub fn fail_create(&self, fail: bool) {
        self.fail_create.set(fail);
    }

    /// Makes mask submission fail.
    pub fn fail_mask(&self, fail: bool) {
        self.fail_mask.set(fail);
    }

    /// Returns and clears the recorded requests.
    pub fn take_requests(&self) -> Vec<Request> {
        self.requests.take()
    }

    /// Returns a copy of the recorded requests.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    /// Counts the recorded requests matching a predicate.
    pub fn count<F: Fn(&Request) -> bool>(&self, f: F) -> usize {
        self.requests.borrow().iter().filter(|r| f(r)).count()
    }

    fn record(&self, request: Request) {
        self.requests.borrow_mut().push(request);
    }
}

impl ShapeSink for DummyConn {
    type Surface = u32;

    fn shape_supported(&self) -> bool {
        self.shape
    }

    fn create_surface(&self, window: XWindowID, size: Size) -> Result<u32> {
        if self.fail_create.get() {
            return Err(XError::ServerError("BadAlloc".into()));
        }
        let surface = self.next_id.get();
        self.next_id.set(surface + 1);
        self.record(Request::CreateSurface {
            window,
            size,
            surface,
        });
        Ok(surface)
    }

    fn destroy_surface(&self, surface: u32) -> Result<()> {
        self.record(Request::DestroySurface(surface));
        Ok(())
    }

    fn fill(&self, surface: u32, fill: &Fill) -> Result<()> {
        self.record(Request::Fill(surface, fill.clone()));
        Ok(())
    }

    fn set_mask(&self, window: XWindowID, kind: MaskKind, surface: u32) -> Result<()> {
        if self.fail_mask.get() {
            return Err(XError::Protocol("BadMatch".into()));
        }
        self.record(Request::SetMask(window, kind, surface));
        Ok(())
    }

    fn clear_mask(&self, window: XWindowID) -> Result<()> {
        self.record(Request::ClearMask(window));
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.record(Request::Flush);
        Ok(())
    }
}
