use tracing::error;

use crate::types::{Frame, ToaruError};

/// A type that can handle errors raised while shaping a frame.
///
/// Shaping never retries, and a failure leaves the frame with
/// whatever shape it had before, so the handler is the last stop
/// for the error.
pub trait ErrorHandler {
    fn call(&self, frame: &Frame, err: ToaruError);
}

impl<F> ErrorHandler for F
where
    F: Fn(&Frame, ToaruError),
{
    fn call(&self, frame: &Frame, err: ToaruError) {
        self(frame, err)
    }
}

/// The default error handler, which logs the error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn call(&self, frame: &Frame, err: ToaruError) {
        error!("could not shape frame {}: {}", frame.window(), err)
    }
}
