use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::page::LineKind;

use super::{NAV_WIDTH_PERCENT, PAGE_LEFT_PADDING, PAGE_WIDTH_PERCENT, overlays, status};

pub fn split_panel_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(NAV_WIDTH_PERCENT),
            Constraint::Percentage(PAGE_WIDTH_PERCENT),
        ])
        .split(area)
}

pub fn page_content_width(total_width: u16, nav_open: bool) -> u16 {
    let area = Rect::new(0, 0, total_width, 1);
    let page_width = if nav_open {
        split_panel_columns(area)[1].width
    } else {
        total_width
    };
    page_width.saturating_sub(PAGE_LEFT_PADDING).max(1)
}

/// First entry shown in the panel so the cursor stays visible.
///
/// The panel has no scroll state of its own; the window is derived from
/// the cursor position every frame.
pub fn nav_window_start(selected: Option<usize>, entry_count: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    let max_start = entry_count.saturating_sub(visible_rows);
    selected
        .map_or(0, |sel| sel.saturating_sub(visible_rows.saturating_sub(1) / 2))
        .min(max_start)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    if model.nav_open {
        let chunks = split_panel_columns(area);
        render_nav(model, frame, chunks[0]);
        render_page(model, frame, chunks[1]);
    } else {
        render_page(model, frame, area);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if model.link_picker_active() {
        overlays::render_link_picker_overlay(model, frame, area);
    }
}

fn render_nav(model: &Model, frame: &mut Frame, area: Rect) {
    let sections = model.page.sections();
    let visible_rows = area.height.saturating_sub(2) as usize;
    let start = nav_window_start(model.nav_selected, sections.len(), visible_rows);
    let end = (start + visible_rows).min(sections.len());
    let active = model.tracker.active();

    let items: Vec<Line> = sections
        .iter()
        .enumerate()
        .skip(start)
        .take(end.saturating_sub(start))
        .map(|(i, section)| {
            // The active marker and the cursor are independent: the
            // marker follows the viewport, the cursor follows the keys.
            let marker = if active == Some(i) { "●" } else { " " };
            let style = if active == Some(i) {
                super::style::active_nav_style()
            } else {
                Style::default()
            };
            let style = if model.nav_selected == Some(i) {
                style.reversed()
            } else {
                style
            };
            Line::styled(format!("{marker} {}", section.title), style)
        })
        .collect();

    let title = model.page.title().unwrap_or("Menu").to_string();
    let nav_block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if model.nav_focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });

    frame.render_widget(Paragraph::new(items).block(nav_block), area);
}

fn render_page(model: &Model, frame: &mut Frame, area: Rect) {
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    // Reserve the last line for the status bar (+ one toast line when active).
    let page_outer_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let visible = model
        .page
        .visible_lines(model.viewport.offset(), model.viewport.height() as usize);

    let mut content: Vec<Line> = Vec::with_capacity(visible.len());
    for (idx, line) in visible.iter().enumerate() {
        let line_idx = model.viewport.offset() + idx;
        content.push(match line.kind() {
            LineKind::FormLabel(field) => form_label_line(field),
            LineKind::FormInput(field) => form_input_line(model, field),
            LineKind::FormError(field) => form_error_line(model, field),
            LineKind::FormHint => form_hint_line(model),
            kind => {
                let base = super::style::style_for_line_kind(kind);
                Line::from(link_spans(model, line_idx, line.content(), base))
            }
        });
    }

    let page_block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(PAGE_LEFT_PADDING));
    let page = Paragraph::new(content).block(page_block);
    frame.render_widget(Clear, page_outer_area);
    frame.render_widget(page, page_outer_area);

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);
}

fn form_label_line(field: crate::form::FieldId) -> Line<'static> {
    Line::styled(
        field.label().to_string(),
        super::style::style_for_line_kind(LineKind::FormLabel(field)),
    )
}

fn form_input_line(model: &Model, field: crate::form::FieldId) -> Line<'static> {
    let focused = model.form_focused && model.form.focus() == field;
    let has_error = model.form.error(field).is_some();
    let style = super::style::input_style(focused, has_error);
    let value = model.form.value(field);
    let mut spans = vec![Span::styled(format!("{value} "), style)];
    if focused {
        spans.push(Span::styled(" ", style.reversed()));
    }
    Line::from(spans)
}

fn form_error_line(model: &Model, field: crate::form::FieldId) -> Line<'static> {
    // A fixed row whose content toggles with validity, so showing or
    // hiding an error never reflows the page.
    model.form.error(field).map_or_else(
        || Line::raw(""),
        |message| Line::styled(message.to_string(), super::style::error_style()),
    )
}

fn form_hint_line(model: &Model) -> Line<'static> {
    let hint = if model.form_focused {
        "Enter: send  Tab: next field  Esc: done"
    } else {
        "press c to fill in the form"
    };
    Line::styled(
        hint.to_string(),
        super::style::style_for_line_kind(LineKind::FormHint),
    )
}

/// Split a line into spans, styling anchor link text distinctly.
fn link_spans(model: &Model, line_idx: usize, text: &str, base: Style) -> Vec<Span<'static>> {
    let link_texts: Vec<&str> = model
        .page
        .links()
        .iter()
        .filter(|link| link.line == line_idx)
        .map(|link| link.text.as_str())
        .collect();
    if link_texts.is_empty() {
        return vec![Span::styled(text.to_string(), base)];
    }

    let mut out = Vec::new();
    let mut cursor = 0usize;
    for link_text in link_texts {
        let Some(rel) = text[cursor..].find(link_text) else {
            continue;
        };
        let start = cursor + rel;
        if start > cursor {
            out.push(Span::styled(text[cursor..start].to_string(), base));
        }
        out.push(Span::styled(
            link_text.to_string(),
            super::style::link_style(),
        ));
        cursor = start + link_text.len();
    }
    if cursor < text.len() {
        out.push(Span::styled(text[cursor..].to_string(), base));
    }
    out
}
