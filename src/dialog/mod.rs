//! Dialog system for modal UI components
//!
//! This module provides the dialog widget itself plus its supporting types:
//! configuration, layout calculation, lifecycle notifications, observer
//! registration and the single-slot confirmation channel backing `wait()`.

pub mod confirm;
pub mod types;
pub mod widget;

pub use confirm::Confirmation;
pub use types::*;
pub use widget::DialogWidget;
