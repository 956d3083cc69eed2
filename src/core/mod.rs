//! Core types used throughout ToaruShape.

pub mod container;
pub mod types;

#[doc(inline)]
pub use container::{Container, ContainerKind, Frame, Layout};
