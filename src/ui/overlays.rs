use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_link_picker_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let items = &model.link_picker_items;
    if items.is_empty() {
        return;
    }
    let popup_width = area.width.saturating_sub(16).max(44);
    // The picker holds at most nine items
    #[allow(clippy::cast_possible_truncation)]
    let needed_rows = (items.len() as u16 * 2) + 4;
    let popup_height = needed_rows.min(area.height.saturating_sub(4).max(8));
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let mut lines: Vec<Line> = Vec::new();
    for (idx, link) in items.iter().enumerate() {
        let title = if link.text.trim().is_empty() {
            "(untitled link)"
        } else {
            link.text.as_str()
        };
        let left_margin = "   ";
        let number = format!("{}: ", idx + 1);
        lines.push(Line::from(vec![
            Span::raw(left_margin),
            Span::styled(
                number,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                title.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::raw(left_margin),
            Span::raw("   "),
            Span::styled(format!("#{}", link.target), Style::default().fg(Color::Cyan)),
        ]));
    }
    lines.push(Line::raw(" "));
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled(
            "1-9 go · any key or click cancels",
            Style::default().fg(Color::Indexed(245)),
        ),
    ]));

    let block = Block::default()
        .title("Go To Link")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut all_lines: Vec<Line> = Vec::new();

    all_lines.push(Line::styled("Scrolling", section_style));
    all_lines.push(Line::raw("  j/k or Up/Down      Scroll"));
    all_lines.push(Line::raw("  Space/PageDown      Page down"));
    all_lines.push(Line::raw("  b/PageUp            Page up"));
    all_lines.push(Line::raw("  Ctrl-d / Ctrl-u     Half page"));
    all_lines.push(Line::raw("  g / G               Top / bottom"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Navigation", section_style));
    all_lines.push(Line::raw("  m                   Toggle the menu panel"));
    all_lines.push(Line::raw("  Tab                 Focus menu / page"));
    all_lines.push(Line::raw("  Enter               Go to the selected section"));
    all_lines.push(Line::raw("  o                   Pick a visible link"));
    all_lines.push(Line::raw("  u                   Back to previous section"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Contact form", section_style));
    all_lines.push(Line::raw("  c                   Jump to the form and type"));
    all_lines.push(Line::raw("  Tab / Shift-Tab     Next / previous field"));
    all_lines.push(Line::raw("  Enter               Send"));
    all_lines.push(Line::raw("  Esc                 Leave the form"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("File", section_style));
    all_lines.push(Line::raw("  w                   Toggle file watching"));
    all_lines.push(Line::raw("  r                   Reload"));
    all_lines.push(Line::raw("  q                   Quit"));
    all_lines.push(Line::raw(""));

    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::styled(format!("  global: {global_cfg}"), dim_style));
    all_lines.push(Line::styled(format!("  local:  {local_cfg}"), dim_style));
    all_lines.push(Line::raw(""));
    all_lines.push(Line::styled("  any key closes this help", dim_style));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(all_lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
