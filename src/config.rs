//! Types for configuring frame corners.
//!
//! This module contains [`CornerConfig`], the trait that defines a
//! configuration object able to resolve the [`CornerStyle`] of a frame
//! from the workspace it lives on. One type that implements this is
//! already provided: [`ToaruCornerConfig`].
//!
//! Corner styles can also be parsed from strings of the form
//! `<shape> [<size>]`:
//!
//! ```rust
//! use toarushape::corners::{CornerShape, CornerStyle};
//!
//! let style: CornerStyle = "rounded 10".parse().unwrap();
//!
//! assert_eq!(style, CornerStyle::new(CornerShape::Rounded, 10));
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::corners::{CornerShape, CornerStyle};

/// Errors raised while building or parsing a corner configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The corner style string was empty.
    #[error("empty corner style")]
    Empty,
    /// The corner shape is not one of the known shapes.
    #[error("unknown corner shape '{0}'")]
    UnknownShape(String),
    /// A shape other than `default` was given without a size.
    #[error("corner shape '{0}' requires a size")]
    MissingSize(CornerShape),
    /// The corner size is not an integer between 0 and
    /// [`CornerStyle::MAX_SIZE`].
    #[error("invalid corner size '{0}'")]
    InvalidSize(String),
    /// Extra input followed the corner style.
    #[error("unexpected '{0}' after corner style")]
    TrailingInput(String),
    /// A workspace override was given an empty name.
    #[error("workspace name is empty")]
    EmptyWorkspaceName,
}

impl FromStr for CornerStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();

        let name = parts.next().ok_or(ConfigError::Empty)?;
        let shape = name
            .to_lowercase()
            .parse::<CornerShape>()
            .map_err(|_| ConfigError::UnknownShape(name.into()))?;

        let size = match parts.next() {
            Some(size) => size
                .trim_end_matches("px")
                .parse::<u32>()
                .ok()
                .filter(|&n| n <= CornerStyle::MAX_SIZE)
                .ok_or_else(|| ConfigError::InvalidSize(size.into()))?,
            None if shape == CornerShape::Default => 0,
            None => return Err(ConfigError::MissingSize(shape)),
        };

        if let Some(extra) = parts.next() {
            return Err(ConfigError::TrailingInput(extra.into()));
        }

        Ok(CornerStyle::new(shape, size))
    }
}

/// A type that can supply corner configuration per workspace.
pub trait CornerConfig {
    /// The corner style for frames on the given workspace.
    ///
    /// `None` is passed for frames that do not live on a workspace.
    fn corner_style(&self, workspace: Option<&str>) -> CornerStyle;
}

/// A single style applies everywhere.
impl CornerConfig for CornerStyle {
    fn corner_style(&self, _: Option<&str>) -> CornerStyle {
        *self
    }
}

/// An implementation of [`CornerConfig`].
///
/// Stores a global style and optional per-workspace overrides.
///
/// # Example
///
/// ```rust
/// use toarushape::config::{CornerConfig, ToaruCornerConfig};
/// use toarushape::corners::{CornerShape, CornerStyle};
///
/// let config = ToaruCornerConfig::builder()
///     .corners(CornerStyle::new(CornerShape::Rounded, 8))
///     .workspace("media", CornerStyle::new(CornerShape::Default, 0))
///     .finish()
///     .expect("invalid config");
///
/// assert_eq!(config.corner_style(Some("media")).size, 0);
/// assert_eq!(config.corner_style(Some("1")).size, 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToaruCornerConfig {
    pub(crate) corners: CornerStyle,
    pub(crate) workspaces: HashMap<String, CornerStyle>,
}

impl ToaruCornerConfig {
    /// Creates a config with square corners everywhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a [`ToaruCornerConfigBuilder`] to build your config with
    /// the 'builder' idiom.
    pub fn builder() -> ToaruCornerConfigBuilder {
        ToaruCornerConfigBuilder::new()
    }

    /// Checks the configuration to verify that all invariants are upheld.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workspaces.keys().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::EmptyWorkspaceName);
        }
        Ok(())
    }

    /// The global corner style.
    pub fn corners(&self) -> CornerStyle {
        self.corners
    }

    /// Sets the global corner style.
    pub fn set_corners(&mut self, style: CornerStyle) {
        self.corners = style;
    }

    /// Overrides the corner style of a workspace, returning the old override.
    pub fn set_workspace<S: Into<String>>(
        &mut self,
        name: S,
        style: CornerStyle,
    ) -> Option<CornerStyle> {
        self.workspaces.insert(name.into(), style)
    }

    /// Removes the override for a workspace.
    pub fn remove_workspace(&mut self, name: &str) -> Option<CornerStyle> {
        self.workspaces.remove(name)
    }
}

impl CornerConfig for ToaruCornerConfig {
    fn corner_style(&self, workspace: Option<&str>) -> CornerStyle {
        match workspace.and_then(|name| self.workspaces.get(name)) {
            Some(style) => {
                debug!("using override {:?} for workspace {:?}", style, workspace);
                *style
            }
            None => self.corners,
        }
    }
}

/// A builder for a [`ToaruCornerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ToaruCornerConfigBuilder {
    inner: ToaruCornerConfig,
}

impl ToaruCornerConfigBuilder {
    /// Creates a new builder, starting from the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global corner style.
    pub fn corners(mut self, style: CornerStyle) -> Self {
        self.inner.corners = style;
        self
    }

    /// Overrides the corner style for a workspace.
    pub fn workspace<S: Into<String>>(mut self, name: S, style: CornerStyle) -> Self {
        self.inner.workspaces.insert(name.into(), style);
        self
    }

    /// Validates and returns the built config.
    pub fn finish(self) -> Result<ToaruCornerConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style() {
        assert_eq!(
            "rounded 10".parse::<CornerStyle>().unwrap(),
            CornerStyle::new(CornerShape::Rounded, 10)
        );
        assert_eq!(
            "  Triangular   4px ".parse::<CornerStyle>().unwrap(),
            CornerStyle::new(CornerShape::Triangular, 4)
        );
        assert_eq!(
            "trim 3".parse::<CornerStyle>().unwrap(),
            CornerStyle::new(CornerShape::Trimmed, 3)
        );
        assert_eq!(
            "default".parse::<CornerStyle>().unwrap(),
            CornerStyle::new(CornerShape::Default, 0)
        );
    }

    #[test]
    fn test_parse_style_errors() {
        assert_eq!("".parse::<CornerStyle>(), Err(ConfigError::Empty));
        assert_eq!(
            "wavy 3".parse::<CornerStyle>(),
            Err(ConfigError::UnknownShape("wavy".into()))
        );
        assert_eq!(
            "rounded".parse::<CornerStyle>(),
            Err(ConfigError::MissingSize(CornerShape::Rounded))
        );
        assert_eq!(
            "rounded -2".parse::<CornerStyle>(),
            Err(ConfigError::InvalidSize("-2".into()))
        );
        assert_eq!(
            "rounded 3000000000".parse::<CornerStyle>(),
            Err(ConfigError::InvalidSize("3000000000".into()))
        );
        assert_eq!(
            "trimmed 32768px".parse::<CornerStyle>(),
            Err(ConfigError::InvalidSize("32768px".into()))
        );
        assert_eq!(
            "trimmed 32767".parse::<CornerStyle>(),
            Ok(CornerStyle::new(CornerShape::Trimmed, CornerStyle::MAX_SIZE))
        );
        assert_eq!(
            "rounded 2 3".parse::<CornerStyle>(),
            Err(ConfigError::TrailingInput("3".into()))
        );
    }

    #[test]
    fn test_workspace_resolution() {
        let rounded = CornerStyle::new(CornerShape::Rounded, 6);
        let trimmed = CornerStyle::new(CornerShape::Trimmed, 4);

        let mut config = ToaruCornerConfig::builder()
            .corners(rounded)
            .workspace("2", trimmed)
            .finish()
            .unwrap();

        assert_eq!(config.corner_style(Some("1")), rounded);
        assert_eq!(config.corner_style(Some("2")), trimmed);
        assert_eq!(config.corner_style(None), rounded);

        assert_eq!(config.remove_workspace("2"), Some(trimmed));
        assert_eq!(config.corner_style(Some("2")), rounded);
    }

    #[test]
    fn test_validate() {
        let res = ToaruCornerConfig::builder()
            .workspace(" ", CornerStyle::default())
            .finish();

        assert_eq!(res, Err(ConfigError::EmptyWorkspaceName));
        assert!(ToaruCornerConfig::new().validate().is_ok());
    }
}
