use ratatui::style::{Color, Modifier, Style};

/// Visual theme configuration for dialog widgets
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary colors
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,

    /// Text colors
    pub text: Color,
    pub text_dim: Color,
    pub text_bright: Color,

    /// Background colors
    pub background: Color,
    pub background_alt: Color,

    /// Border colors
    pub border: Color,
    pub border_focused: Color,

    /// Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme
    pub fn dark() -> Self {
        Self {
            primary: Color::Rgb(147, 51, 234),    // Purple
            secondary: Color::Rgb(59, 130, 246),  // Blue
            accent: Color::Rgb(236, 72, 153),     // Pink

            text: Color::Rgb(248, 250, 252),      // Slate-50
            text_dim: Color::Rgb(148, 163, 184),  // Slate-400
            text_bright: Color::Rgb(255, 255, 255), // White

            background: Color::Rgb(15, 23, 42),   // Slate-900
            background_alt: Color::Rgb(30, 41, 59), // Slate-800

            border: Color::Rgb(71, 85, 105),      // Slate-600
            border_focused: Color::Rgb(147, 51, 234), // Purple

            success: Color::Rgb(34, 197, 94),     // Green-500
            warning: Color::Rgb(245, 158, 11),    // Amber-500
            error: Color::Rgb(239, 68, 68),       // Red-500
            info: Color::Rgb(59, 130, 246),       // Blue-500
        }
    }

    /// Create a light theme
    pub fn light() -> Self {
        Self {
            primary: Color::Rgb(124, 58, 237),    // Violet-600
            secondary: Color::Rgb(37, 99, 235),   // Blue-600
            accent: Color::Rgb(219, 39, 119),     // Pink-600

            text: Color::Rgb(15, 23, 42),         // Slate-900
            text_dim: Color::Rgb(100, 116, 139),  // Slate-500
            text_bright: Color::Rgb(2, 6, 23),    // Slate-950

            background: Color::Rgb(248, 250, 252), // Slate-50
            background_alt: Color::Rgb(226, 232, 240), // Slate-200

            border: Color::Rgb(148, 163, 184),    // Slate-400
            border_focused: Color::Rgb(124, 58, 237), // Violet-600

            success: Color::Rgb(22, 163, 74),     // Green-600
            warning: Color::Rgb(217, 119, 6),     // Amber-600
            error: Color::Rgb(220, 38, 38),       // Red-600
            info: Color::Rgb(37, 99, 235),        // Blue-600
        }
    }

    /// Style for text content
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for focused borders
    pub fn focused_border_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_dark() {
        let theme = Theme::default();
        assert_eq!(theme.background, Theme::dark().background);
    }

    #[test]
    fn test_dark_and_light_backgrounds_differ() {
        assert_ne!(Theme::dark().background, Theme::light().background);
        assert_ne!(Theme::dark().text, Theme::light().text);
    }
}
