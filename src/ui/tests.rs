use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use super::*;
use crate::app::{Message, Model, update};
use crate::page::Page;

const SAMPLE: &str = "\
# Demo Site

Welcome. See [our work](#work) or [about us](#about).

## Home

Intro paragraph.

## Work

Projects.

## About

People.

## Contact

Say hello.
";

fn create_test_model() -> Model {
    let page = Page::parse(SAMPLE, 80).unwrap();
    let mut model = Model::new(PathBuf::from("page.md"), page, (80, 40));
    model.motion_enabled = false;
    model
}

fn render_to_string(model: &Model) -> String {
    let backend = TestBackend::new(80, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    buffer.content().iter().map(|c| c.symbol()).collect()
}

#[test]
fn test_render_shows_page_content() {
    let model = create_test_model();
    let content = render_to_string(&model);
    assert!(content.contains("Demo Site"));
    assert!(content.contains("Intro paragraph."));
}

#[test]
fn test_nav_panel_lists_sections_when_open() {
    let model = update(create_test_model(), Message::ToggleNav);
    let content = render_to_string(&model);
    for title in ["Home", "Work", "About", "Contact"] {
        assert!(content.contains(title), "panel should list {title}");
    }
}

#[test]
fn test_nav_panel_hidden_when_closed() {
    let model = create_test_model();
    let content = render_to_string(&model);
    // The active marker bullet only renders inside the panel.
    assert!(!content.contains('●'));
}

#[test]
fn test_exactly_one_active_marker_in_panel() {
    let model = update(create_test_model(), Message::ToggleNav);
    let content = render_to_string(&model);
    assert_eq!(
        content.matches('●').count(),
        1,
        "at most one entry carries the active marker"
    );
}

#[test]
fn test_status_bar_shows_location_fragment() {
    let model = update(
        create_test_model(),
        Message::NavigateTo("work".to_string()),
    );
    let content = render_to_string(&model);
    assert!(content.contains("#work"));
}

#[test]
fn test_error_messages_render_after_blocked_submission() {
    let mut model = create_test_model();
    model = update(model, Message::FocusForm);
    model = update(model, Message::FormSubmit);
    let content = render_to_string(&model);
    assert!(content.contains("Name cannot be empty."));
    assert!(content.contains("Please enter a valid email address."));
    assert!(content.contains("Message cannot be empty."));
}

#[test]
fn test_error_rows_blank_while_valid() {
    let mut model = create_test_model();
    model = update(model, Message::FocusForm);
    let content = render_to_string(&model);
    assert!(!content.contains("cannot be empty"));
}

#[test]
fn test_confirmation_toast_renders_after_valid_submission() {
    let mut model = create_test_model();
    model = update(model, Message::FocusForm);
    for ch in "Jo".chars() {
        model = update(model, Message::FormInput(ch));
    }
    model = update(model, Message::FormNextField);
    for ch in "jo@example.com".chars() {
        model = update(model, Message::FormInput(ch));
    }
    model = update(model, Message::FormNextField);
    for ch in "Hello".chars() {
        model = update(model, Message::FormInput(ch));
    }
    model = update(model, Message::FormSubmit);

    let content = render_to_string(&model);
    assert!(content.contains("Thank you for your message!"));
}

#[test]
fn test_form_hint_follows_focus() {
    let mut model = create_test_model();
    model = update(model, Message::FocusForm);
    assert!(render_to_string(&model).contains("Enter: send"));

    model = update(model, Message::LeaveForm);
    assert!(render_to_string(&model).contains("press c to fill in the form"));
}

#[test]
fn test_help_overlay_renders() {
    let model = update(create_test_model(), Message::ToggleHelp);
    let content = render_to_string(&model);
    assert!(content.contains("Toggle the menu panel"));
}

#[test]
fn test_link_picker_overlay_lists_targets() {
    let model = update(create_test_model(), Message::OpenLinkPicker);
    let content = render_to_string(&model);
    assert!(content.contains("#work"));
    assert!(content.contains("#about"));
}

#[test]
fn test_page_content_width_accounts_for_panel() {
    let full = page_content_width(100, false);
    let with_panel = page_content_width(100, true);
    assert_eq!(full, 98);
    assert!(with_panel < full);
}

#[test]
fn test_nav_window_start_keeps_cursor_visible() {
    // Cursor near the top: window pinned at zero.
    assert_eq!(nav_window_start(Some(0), 20, 5), 0);
    assert_eq!(nav_window_start(None, 20, 5), 0);

    // Cursor deep in the list: window follows, clamped to the tail.
    let start = nav_window_start(Some(18), 20, 5);
    assert!(start <= 18 && 18 < start + 5);
    assert!(start <= 15);

    // Short lists never scroll.
    assert_eq!(nav_window_start(Some(3), 4, 5), 0);
}

#[test]
fn test_split_panel_columns_covers_area() {
    let area = ratatui::layout::Rect::new(0, 0, 100, 30);
    let chunks = split_panel_columns(area);
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].width + chunks[1].width, 100);
}
