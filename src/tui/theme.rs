//! Colors and bordered panels for the terminal form
//!
//! Colors are organized by purpose, not by color name.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Padding};

#[derive(Clone, Debug)]
pub struct Theme {
    /// Main background color
    pub background: Color,
    /// Selected row background
    pub surface: Color,

    /// Headers, active items
    pub text_primary: Color,
    /// Labels, descriptions
    pub text_secondary: Color,
    /// Hints, disabled states
    pub text_muted: Color,

    pub accent: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    pub border: Color,
    pub border_focused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(31, 36, 43),
            surface: Color::Rgb(42, 48, 56),

            text_primary: Color::Rgb(245, 245, 247),
            text_secondary: Color::Rgb(180, 180, 185),
            text_muted: Color::Rgb(136, 136, 136),

            accent: Color::Rgb(137, 180, 250),

            success: Color::Rgb(139, 213, 162),
            warning: Color::Rgb(249, 226, 175),
            error: Color::Rgb(255, 107, 107),
            info: Color::Rgb(137, 180, 250),

            border: Color::Rgb(58, 65, 75),
            border_focused: Color::Rgb(137, 180, 250),
        }
    }
}

/// Panel style variants
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelStyle {
    #[default]
    Default,
    Focused,
    Success,
    Warning,
    Error,
}

/// A rounded, titled block colored by [`PanelStyle`].
pub struct Panel<'a> {
    title: Option<&'a str>,
    style: PanelStyle,
    theme: &'a Theme,
}

impl<'a> Panel<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            title: None,
            style: PanelStyle::Default,
            theme,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    pub fn block(&self) -> Block<'a> {
        let color = match self.style {
            PanelStyle::Default => self.theme.border,
            PanelStyle::Focused => self.theme.border_focused,
            PanelStyle::Success => self.theme.success,
            PanelStyle::Warning => self.theme.warning,
            PanelStyle::Error => self.theme.error,
        };
        let title_color = match self.style {
            PanelStyle::Default => self.theme.text_secondary,
            _ => color,
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .padding(Padding::horizontal(1));

        if let Some(title) = self.title {
            block = block
                .title(title)
                .title_style(Style::default().fg(title_color).bold());
        }
        block
    }
}
