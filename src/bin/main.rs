//! Applies a corner style to a single existing window.
//!
//! Usage: `toarushape <window-id> <shape> <size> [--fullscreen] [--tabbed] [-v]`
//!
//! The window is treated as a tiled frame directly on a workspace,
//! unless `--tabbed` places it inside a nested tabbed container. The window
//! id may be given in decimal or as `0x`-prefixed hex.

use std::env;
use std::error::Error;

use tracing::{info, Level};
use tracing_subscriber::{fmt as logger, fmt::format::FmtSpan};

use x11rb::protocol::xproto::ConnectionExt;

use toarushape::corners::CornerStyle;
use toarushape::types::{Container, Frame, Layout, Size};
use toarushape::x::{X11RBConn, XWindowID};
use toarushape::{apply_shape, ShapeOutcome};

const USAGE: &str = "usage: toarushape <window-id> <shape> <size> [--fullscreen] [--tabbed] [-v]";

struct Args {
    window: XWindowID,
    style: CornerStyle,
    fullscreen: bool,
    tabbed: bool,
    verbose: bool,
}

fn parse_window(s: &str) -> Result<XWindowID, Box<dyn Error + Send + Sync>> {
    let id = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => XWindowID::from_str_radix(hex, 16)?,
        None => s.parse()?,
    };
    Ok(id)
}

fn parse_args() -> Result<Args, Box<dyn Error + Send + Sync>> {
    let mut positional = Vec::new();
    let mut fullscreen = false;
    let mut tabbed = false;
    let mut verbose = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--fullscreen" => fullscreen = true,
            "--tabbed" => tabbed = true,
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => return Err(USAGE.into()),
            _ => positional.push(arg),
        }
    }

    let [window, shape, size] = positional.as_slice() else {
        return Err(USAGE.into());
    };

    Ok(Args {
        window: parse_window(window)?,
        style: format!("{shape} {size}").parse()?,
        fullscreen,
        tabbed,
        verbose,
    })
}

pub fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = parse_args()?;

    // set up the logger
    logger::fmt()
        // only log enter and exit
        .with_span_events(FmtSpan::ACTIVE)
        .with_max_level(if args.verbose { Level::TRACE } else { Level::INFO })
        // don't use timestamps
        .without_time()
        .with_file(false)
        .with_line_number(false)
        // register as global
        .try_init()?;

    let conn = X11RBConn::new()?;

    let geom = conn.conn().get_geometry(args.window)?.reply()?;
    let size = Size::new(geom.width as u32, geom.height as u32);

    let mut frame = Frame::new(args.window, size).fullscreen(args.fullscreen);
    if args.tabbed {
        // nest the tab group in a split so only the bottom edge is decorated
        frame = frame
            .within(Container::split(Layout::Tabbed))
            .within(Container::split(Layout::SplitH));
    }
    let frame = frame.within(Container::workspace("1"));

    match apply_shape(&conn, &frame, args.style)? {
        ShapeOutcome::Unsupported => info!("server does not support SHAPE"),
        ShapeOutcome::Skipped => info!("window {:#x} was not shaped", args.window),
        ShapeOutcome::Cleared => info!("cleared mask on window {:#x}", args.window),
        ShapeOutcome::Shaped(edges) => {
            info!("shaped {} edge(s) of window {:#x}", edges, args.window)
        }
    }

    Ok(())
}
