//! Theme and styling definitions
//!
//! Maps the document's abstract style tags to terminal styles. Centralized
//! so the mapping can later come from configuration.

use ratatui::style::{Color, Modifier, Style};

use crate::render::StyleTag;

/// Color assignments for the TUI
pub struct Theme {
    pub heading: Color,
    pub column_header: Color,
    pub key_label: Color,
    pub dimmed: Color,
    pub in_progress: Color,
    pub marked: Color,
    pub pending_deletion: Color,
    pub text_primary: Color,
    pub cursor_bg: Color,
    pub header_context: Color,
    pub status_info: Color,
    pub status_error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            heading: Color::Cyan,
            column_header: Color::Blue,
            key_label: Color::Blue,
            dimmed: Color::DarkGray,
            in_progress: Color::Yellow,
            marked: Color::Red,
            pending_deletion: Color::Magenta,
            text_primary: Color::Reset,
            cursor_bg: Color::Rgb(40, 40, 60),
            header_context: Color::Yellow,
            status_info: Color::Green,
            status_error: Color::Red,
        }
    }
}

impl Theme {
    /// Terminal style for a span's accumulated style tags
    ///
    /// Later tags win for the foreground color, so a mark or pending tag
    /// applied by a wrapper overrides the column styling underneath.
    pub fn style_for(&self, tags: &[StyleTag]) -> Style {
        let mut style = Style::default().fg(self.text_primary);
        for tag in tags {
            style = match tag {
                StyleTag::Heading => style.fg(self.heading).add_modifier(Modifier::BOLD),
                StyleTag::ColumnHeader => {
                    style.fg(self.column_header).add_modifier(Modifier::BOLD)
                }
                StyleTag::KeyLabel => style.fg(self.key_label),
                StyleTag::Dimmed => style.fg(self.dimmed),
                StyleTag::InProgress => style.fg(self.in_progress).add_modifier(Modifier::ITALIC),
                StyleTag::Marked => style.fg(self.marked).add_modifier(Modifier::BOLD),
                StyleTag::PendingDeletion => style
                    .fg(self.pending_deletion)
                    .add_modifier(Modifier::CROSSED_OUT),
            };
        }
        style
    }
}
