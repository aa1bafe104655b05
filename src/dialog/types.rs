//! Core dialog types and traits
//!
//! This module defines the fundamental types for the dialog widget:
//! identifiers, configuration, layout calculation, lifecycle notifications
//! and the observer registration interface.

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

use crate::scene::SceneTree;

/// Unique identifier for dialog instances
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogId(pub String);

impl DialogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DialogId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DialogId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DialogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dialog positioning options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogPosition {
    /// Center the dialog in the available area
    #[default]
    Center,
    /// Position at specific coordinates (col, row)
    Fixed(u16, u16),
    /// Position at top of screen, horizontally centered
    Top,
    /// Position at bottom of screen, horizontally centered
    Bottom,
}

/// Dialog size options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogSize {
    /// Fixed size in characters (width, height)
    Fixed(u16, u16),
    /// Percentage of available area (width_pct, height_pct)
    Percentage(u16, u16),
    /// Fit content with a minimum size
    FitContent { min_width: u16, min_height: u16 },
    /// Full screen
    FullScreen,
}

impl Default for DialogSize {
    fn default() -> Self {
        Self::FitContent {
            min_width: 40,
            min_height: 7,
        }
    }
}

/// Dialog configuration options
#[derive(Debug, Clone)]
pub struct DialogConfig {
    /// Dialog identifier
    pub id: DialogId,
    /// Dialog title (optional)
    pub title: Option<String>,
    /// Position configuration
    pub position: DialogPosition,
    /// Size configuration
    pub size: DialogSize,
    /// Whether the dialog presents modally (backdrop layer) by default
    pub modal: bool,
    /// Whether a click on the empty overlay area dismisses the dialog
    pub can_ignore: bool,
    /// Whether the dialog can be dismissed with the Escape key
    pub closable: bool,
    /// Whether the dialog panel has a border
    pub has_border: bool,
    /// Style scope name; defaults to the dialog id
    pub class: Option<String>,
}

impl DialogConfig {
    pub fn new(id: impl Into<DialogId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            position: DialogPosition::default(),
            size: DialogSize::default(),
            modal: false,
            can_ignore: false,
            closable: true,
            has_border: true,
            class: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_position(mut self, position: DialogPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_size(mut self, size: DialogSize) -> Self {
        self.size = size;
        self
    }

    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    pub fn can_ignore(mut self, can_ignore: bool) -> Self {
        self.can_ignore = can_ignore;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn with_border(mut self, has_border: bool) -> Self {
        self.has_border = has_border;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Check the configuration for values the widget cannot work with
    pub fn validate(&self) -> DialogResult<()> {
        if self.id.as_str().is_empty() {
            return Err(DialogError::InvalidConfig("dialog id is empty".into()));
        }
        match self.size {
            DialogSize::Fixed(w, h) if w == 0 || h == 0 => Err(DialogError::InvalidConfig(
                format!("fixed size {}x{} has a zero dimension", w, h),
            )),
            DialogSize::Percentage(w, h) if w == 0 || h == 0 || w > 100 || h > 100 => {
                Err(DialogError::InvalidConfig(format!(
                    "percentage size {}x{} is outside 1..=100",
                    w, h
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Lifecycle notifications emitted by a dialog widget
///
/// Notifications are emitted strictly after the corresponding tree mutation
/// completes and before the triggering method returns. They are informational
/// only; observers cannot veto a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DialogEvent {
    /// The dialog body was attached to the render tree
    Show { id: DialogId, modal: bool },
    /// The dialog body and backdrop were removed from the render tree
    Hide { id: DialogId },
    /// A pending confirmation was settled with an accepting result
    Success { id: DialogId },
    /// A pending confirmation was settled with a rejecting result
    Failure { id: DialogId },
}

impl DialogEvent {
    /// The dialog this notification originated from
    pub fn id(&self) -> &DialogId {
        match self {
            Self::Show { id, .. } | Self::Hide { id } | Self::Success { id } | Self::Failure { id } => id,
        }
    }
}

/// Observer registration interface for dialog notifications
///
/// Observers are invoked synchronously, in registration order, with a borrow
/// of the dialog's scene tree so they always see the completed tree state for
/// the transition being reported.
pub trait DialogObserver: Send + Sync {
    fn on_dialog_event(&mut self, event: &DialogEvent, scene: &SceneTree);
}

/// Result type for dialog operations
pub type DialogResult<T> = std::result::Result<T, DialogError>;

/// Dialog-specific error types
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    #[error("Invalid dialog configuration: {0}")]
    InvalidConfig(String),
}

/// Helper struct for dialog layout calculations
#[derive(Debug, Clone)]
pub struct DialogLayout {
    /// Full available area
    pub available_area: Rect,
    /// Dialog panel area (including border)
    pub dialog_area: Rect,
    /// Content area (excluding border)
    pub content_area: Rect,
}

impl DialogLayout {
    pub fn calculate(
        config: &DialogConfig,
        available_area: Rect,
        content_size: Option<(u16, u16)>,
    ) -> Self {
        let (width, height) = Self::calculate_size(config, available_area, content_size);
        let (x, y) = Self::calculate_position(config, available_area, width, height);

        let dialog_area = Rect {
            x,
            y,
            width: width.min(available_area.width),
            height: height.min(available_area.height),
        };

        let content_area = if config.has_border {
            Rect {
                x: dialog_area.x + 1,
                y: dialog_area.y + 1,
                width: dialog_area.width.saturating_sub(2),
                height: dialog_area.height.saturating_sub(2),
            }
        } else {
            dialog_area
        };

        Self {
            available_area,
            dialog_area,
            content_area,
        }
    }

    fn calculate_size(
        config: &DialogConfig,
        available_area: Rect,
        content_size: Option<(u16, u16)>,
    ) -> (u16, u16) {
        match config.size {
            DialogSize::Fixed(w, h) => (w, h),
            DialogSize::Percentage(w_pct, h_pct) => {
                let width = (available_area.width as f32 * w_pct as f32 / 100.0) as u16;
                let height = (available_area.height as f32 * h_pct as f32 / 100.0) as u16;
                (width, height)
            }
            DialogSize::FitContent {
                min_width,
                min_height,
            } => {
                if let Some((content_w, content_h)) = content_size {
                    let width = content_w.max(min_width);
                    let height = content_h.max(min_height);

                    if config.has_border {
                        (width + 2, height + 2)
                    } else {
                        (width, height)
                    }
                } else {
                    (min_width, min_height)
                }
            }
            DialogSize::FullScreen => (available_area.width, available_area.height),
        }
    }

    fn calculate_position(
        config: &DialogConfig,
        available_area: Rect,
        width: u16,
        height: u16,
    ) -> (u16, u16) {
        match config.position {
            DialogPosition::Center => {
                let x = available_area.x + (available_area.width.saturating_sub(width)) / 2;
                let y = available_area.y + (available_area.height.saturating_sub(height)) / 2;
                (x, y)
            }
            DialogPosition::Fixed(x, y) => (
                available_area.x + x.min(available_area.width.saturating_sub(width)),
                available_area.y + y.min(available_area.height.saturating_sub(height)),
            ),
            DialogPosition::Top => {
                let x = available_area.x + (available_area.width.saturating_sub(width)) / 2;
                (x, available_area.y)
            }
            DialogPosition::Bottom => {
                let x = available_area.x + (available_area.width.saturating_sub(width)) / 2;
                let y = available_area.y + available_area.height.saturating_sub(height);
                (x, y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn test_config_defaults() {
        let config = DialogConfig::new("confirm");
        assert_eq!(config.id.as_str(), "confirm");
        assert!(!config.modal);
        assert!(!config.can_ignore);
        assert!(config.closable);
        assert!(config.has_border);
    }

    #[test]
    fn test_config_validation_rejects_empty_id() {
        let config = DialogConfig::new("");
        assert!(matches!(
            config.validate(),
            Err(DialogError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_validation_rejects_zero_fixed_size() {
        let config = DialogConfig::new("d").with_size(DialogSize::Fixed(0, 5));
        assert!(config.validate().is_err());

        let config = DialogConfig::new("d").with_size(DialogSize::Percentage(120, 50));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_layout_centers_fixed_size() {
        let config = DialogConfig::new("d").with_size(DialogSize::Fixed(40, 8));
        let layout = DialogLayout::calculate(&config, area(), None);
        assert_eq!(layout.dialog_area, Rect::new(20, 8, 40, 8));
        // Content shrinks by the border on every side
        assert_eq!(layout.content_area, Rect::new(21, 9, 38, 6));
    }

    #[test]
    fn test_layout_fit_content_grows_past_minimum() {
        let config = DialogConfig::new("d").with_size(DialogSize::FitContent {
            min_width: 10,
            min_height: 3,
        });
        let layout = DialogLayout::calculate(&config, area(), Some((30, 6)));
        // Content size plus the border
        assert_eq!(layout.dialog_area.width, 32);
        assert_eq!(layout.dialog_area.height, 8);
    }

    #[test]
    fn test_layout_bottom_position() {
        let config = DialogConfig::new("d")
            .with_size(DialogSize::Fixed(20, 4))
            .with_position(DialogPosition::Bottom);
        let layout = DialogLayout::calculate(&config, area(), None);
        assert_eq!(layout.dialog_area.y, 20);
        assert_eq!(layout.dialog_area.x, 30);
    }

    #[test]
    fn test_event_id_accessor() {
        let event = DialogEvent::Show {
            id: DialogId::new("confirm"),
            modal: true,
        };
        assert_eq!(event.id().as_str(), "confirm");
    }
}
