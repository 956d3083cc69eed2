//! The part of the container tree a frame needs in order to be shaped.
//!
//! A [`Frame`] does not own the container tree. It carries a snapshot
//! of its ancestor chain, ordered from its direct parent up to and
//! including the workspace it lives on, which is all the corner
//! classifier ever looks at.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::types::Size;
use crate::x::XWindowID;

/// The kind of a container in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ContainerKind {
    /// The root of a workspace.
    Workspace,
    /// A docking area, holding docks and bars.
    ///
    /// Frames inside a dock area are never shaped.
    DockArea,
    /// Any other container: splits, stacks and tab groups.
    Split,
}

/// The way a container lays out its children.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    /// Children are placed side by side.
    #[default]
    SplitH,
    /// Children are placed on top of each other.
    SplitV,
    /// Only one child is shown, with titles stacked above it.
    Stacked,
    /// Only one child is shown, with a tab bar above it.
    Tabbed,
}

impl Layout {
    /// Whether this layout draws a title bar along the top
    /// edge of its children.
    pub fn is_tab_or_stack(&self) -> bool {
        matches!(self, Self::Stacked | Self::Tabbed)
    }
}

/// A single ancestor in a frame's container chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub kind: ContainerKind,
    pub layout: Layout,
    /// Set for workspaces.
    pub name: Option<String>,
}

impl Container {
    /// A workspace root with the given name.
    pub fn workspace<S: Into<String>>(name: S) -> Self {
        Self {
            kind: ContainerKind::Workspace,
            layout: Layout::default(),
            name: Some(name.into()),
        }
    }

    /// A docking area.
    pub fn dock_area() -> Self {
        Self {
            kind: ContainerKind::DockArea,
            layout: Layout::SplitV,
            name: None,
        }
    }

    /// A plain split container with the given layout.
    pub fn split(layout: Layout) -> Self {
        Self {
            kind: ContainerKind::Split,
            layout,
            name: None,
        }
    }

    pub fn is_workspace(&self) -> bool {
        self.kind == ContainerKind::Workspace
    }
}

/// A window frame as seen by the shaping code.
///
/// # Example
///
/// ```rust
/// use toarushape::types::{Container, Frame, Layout, Size};
///
/// let frame = Frame::new(0x40001, Size::new(300, 200))
///     .within(Container::split(Layout::Tabbed))
///     .within(Container::split(Layout::SplitH))
///     .within(Container::workspace("1"));
///
/// assert_eq!(frame.workspace_name(), Some("1"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub(crate) window: XWindowID,
    pub(crate) size: Size,
    pub(crate) fullscreen: bool,
    pub(crate) layout: Layout,
    pub(crate) ancestors: Vec<Container>,
}

impl Frame {
    /// Creates a new, non-fullscreen frame with no ancestors.
    pub fn new(window: XWindowID, size: Size) -> Self {
        Self {
            window,
            size,
            fullscreen: false,
            layout: Layout::default(),
            ancestors: Vec::new(),
        }
    }

    /// Sets whether the frame is fullscreen.
    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Sets the frame's own layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Appends an ancestor to the top of the chain.
    ///
    /// Call this from the innermost container outward.
    pub fn within(mut self, container: Container) -> Self {
        self.ancestors.push(container);
        self
    }

    /// Updates the frame geometry, as on a resize.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    pub fn window(&self) -> XWindowID {
        self.window
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The ancestor chain, from the direct parent upward.
    pub fn ancestors(&self) -> &[Container] {
        &self.ancestors
    }

    /// The direct parent of the frame.
    pub fn parent(&self) -> Option<&Container> {
        self.ancestors.first()
    }

    /// The kind of container the frame sits in.
    ///
    /// A detached frame is treated as sitting directly on a workspace.
    pub fn container_kind(&self) -> ContainerKind {
        self.parent()
            .map(|c| c.kind)
            .unwrap_or(ContainerKind::Workspace)
    }

    /// The workspace the frame lives on.
    pub fn workspace(&self) -> Option<&Container> {
        self.ancestors.iter().find(|c| c.is_workspace())
    }

    pub fn workspace_name(&self) -> Option<&str> {
        self.workspace().and_then(|ws| ws.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_chain() {
        let frame = Frame::new(1, Size::new(100, 100))
            .within(Container::split(Layout::Stacked))
            .within(Container::workspace("web"));

        assert_eq!(frame.parent().map(|c| c.layout), Some(Layout::Stacked));
        assert_eq!(frame.container_kind(), ContainerKind::Split);
        assert_eq!(frame.workspace_name(), Some("web"));
    }

    #[test]
    fn test_detached_frame() {
        let frame = Frame::new(1, Size::new(100, 100));

        assert!(frame.parent().is_none());
        assert_eq!(frame.container_kind(), ContainerKind::Workspace);
        assert!(frame.workspace_name().is_none());
    }

    #[test]
    fn test_parse_layout() {
        assert_eq!("tabbed".parse::<Layout>().unwrap(), Layout::Tabbed);
        assert_eq!("splitv".parse::<Layout>().unwrap(), Layout::SplitV);
        assert!("grid".parse::<Layout>().is_err());
    }
}
