//! Deciding which edges of a frame get decorated.

use tracing::trace;

use crate::types::Frame;

use super::EdgeSelector;

/// Classifies a frame by its position in the container tree.
///
/// A frame gets both of its edges decorated unless it sits inside a
/// stacked or tabbed container somewhere below its workspace, in which
/// case its top edge is flush with a title or tab bar and only the
/// bottom edge is decorated.
///
/// The frame's own layout is inspected along with every ancestor whose
/// parent is not the workspace root.
pub fn classify(frame: &Frame) -> EdgeSelector {
    let on_workspace = frame.parent().map_or(true, |p| p.is_workspace());

    // pair each node with its parent, climbing until the parent is the workspace
    let layouts = std::iter::once(frame.layout()).chain(frame.ancestors().iter().map(|c| c.layout));
    let tab_or_stack = layouts
        .zip(frame.ancestors())
        .take_while(|(_, parent)| !parent.is_workspace())
        .any(|(layout, _)| layout.is_tab_or_stack());

    trace!(
        "frame {}: on_workspace {}, tab_or_stack {}",
        frame.window(),
        on_workspace,
        tab_or_stack
    );

    if on_workspace || !tab_or_stack {
        EdgeSelector::Both
    } else {
        EdgeSelector::Bottom
    }
}
