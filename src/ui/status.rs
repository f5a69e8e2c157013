use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let title = model.page.title().map_or_else(
        || {
            model
                .file_path
                .file_name()
                .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string())
        },
        ToString::to_string,
    );

    // The location fragment mirrors what a browser address bar would
    // show after an anchor navigation.
    let fragment = model
        .location
        .as_deref()
        .map_or_else(String::new, |f| format!("  #{f}"));

    let percent = model.viewport.scroll_percent();
    let line_info = format!(
        "Line {}/{}",
        model.viewport.offset() + 1,
        model.viewport.total_lines()
    );

    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };
    let nav_indicator = if model.nav_open { " [menu]" } else { "" };

    let status = format!(
        " {title}{fragment}  [{percent}%]  {line_info}{watch_indicator}{nav_indicator}  ?:help"
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
