//! Shorthands for the xcb request and resource id boilerplate.

/// Wraps a raw `u32` id as the given `xcb::XidNew` type.
macro_rules! cast {
    ($ctype:ty, $resid:expr) => {
        unsafe { <$ctype as XidNew>::new($resid) }
    };
}

/// The raw id of anything implementing `x::Xid`.
macro_rules! id {
    ($e:expr) => {
        $e.resource_id()
    };
}

/// Sends a request and blocks on its reply.
macro_rules! req_and_reply {
    ($conn:expr, $req:expr) => {
        $conn.wait_for_reply($conn.send_request($req))
    };
}

/// Sends a checked request and blocks until the server acknowledges
/// or rejects it. Shape masks are applied this way so failures
/// surface on the call that caused them.
macro_rules! req_and_check {
    ($conn:expr, $req:expr) => {
        $conn.check_request($conn.send_request_checked($req))
    };
}

pub(super) use {cast, id, req_and_check, req_and_reply};
