//! Theming and color definitions.
//!
//! Marker state (open, active, error, focused) is the only channel
//! between the application logic and its presentation; this module maps
//! those markers to terminal styles. Uses ANSI colors that adapt to the
//! terminal's palette.

use ratatui::style::{Color, Modifier, Style};

use crate::page::LineKind;

/// Base style for a rendered page line.
pub fn style_for_line_kind(kind: LineKind) -> Style {
    match kind {
        LineKind::Heading(1) => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineKind::Heading(2) => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        LineKind::Heading(_) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),

        LineKind::CodeBlock => Style::default()
            .fg(Color::Indexed(245))
            .add_modifier(Modifier::DIM),

        LineKind::Quote => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::ITALIC),

        LineKind::Rule => Style::default()
            .fg(Color::Indexed(240))
            .add_modifier(Modifier::DIM),

        LineKind::FormLabel(_) => Style::default().add_modifier(Modifier::BOLD),
        LineKind::FormError(_) => error_style(),
        LineKind::FormHint => Style::default()
            .fg(Color::Indexed(245))
            .add_modifier(Modifier::ITALIC),

        LineKind::FormInput(_)
        | LineKind::Paragraph
        | LineKind::ListItem
        | LineKind::Blank => Style::default(),
    }
}

/// Style for the navigation entry holding the active marker.
pub fn active_nav_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Style for in-page anchor link text.
pub fn link_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED)
}

/// Style for a form input row.
///
/// Invalid fields get the error color; the focused field shows a
/// distinct background so the typing target is obvious.
pub fn input_style(focused: bool, has_error: bool) -> Style {
    let mut style = Style::default().add_modifier(Modifier::UNDERLINED);
    if has_error {
        style = style.fg(Color::Red);
    }
    if focused {
        style = style.bg(Color::DarkGray);
    }
    style
}

/// Style for validation error messages.
pub fn error_style() -> Style {
    Style::default().fg(Color::Red)
}
