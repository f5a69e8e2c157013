use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::tempdir;

use crate::form::{self, FieldId};
use crate::page::Page;

use super::{App, Message, Model, ToastLevel, update};

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
    let mut model = Model::new(PathBuf::from("page.md"), page, (80, 24));
    model.motion_enabled = false;
    model
}

fn create_long_model() -> Model {
    // Three 18-line sections so the tracker has room to move.
    let mut md = String::from("# Long\n\n");
    for name in ["One", "Two", "Three"] {
        md.push_str(&format!("## {name}\n\n"));
        for i in 0..8 {
            md.push_str(&format!("{name} paragraph {i} with some filler text.\n\n"));
        }
    }
    let page = Page::parse(&md, 80).unwrap();
    let mut model = Model::new(PathBuf::from("long.md"), page, (80, 24));
    model.motion_enabled = false;
    model
}

fn type_text(mut model: Model, text: &str) -> Model {
    for ch in text.chars() {
        model = update(model, Message::FormInput(ch));
    }
    model
}

fn fill_form(mut model: Model, name: &str, email: &str, message: &str) -> Model {
    model = update(model, Message::FocusForm);
    model = type_text(model, name);
    model = update(model, Message::FormNextField);
    model = type_text(model, email);
    model = update(model, Message::FormNextField);
    model = type_text(model, message);
    model
}

fn section_visible(model: &Model, fragment: &str) -> bool {
    let idx = model.page.section_index(fragment).unwrap();
    let section = &model.page.sections()[idx];
    let visible = model.viewport.visible_range();
    section.lines.start >= visible.start && section.lines.end <= visible.end
}

// ─── Navigation panel ───────────────────────────────────────

#[test]
fn test_toggle_nav_twice_restores_state() {
    let model = create_test_model();
    assert!(!model.nav_open);

    let model = update(model, Message::ToggleNav);
    assert!(model.nav_open);

    let model = update(model, Message::ToggleNav);
    assert!(!model.nav_open);
}

#[test]
fn test_toggle_nav_selects_first_entry() {
    let model = create_test_model();
    assert!(model.nav_selected.is_none());

    let model = update(model, Message::ToggleNav);
    assert_eq!(model.nav_selected, Some(0));
}

#[test]
fn test_toggle_nav_without_sections_is_inert() {
    let page = Page::parse("Just a paragraph, no sections.", 80).unwrap();
    let model = Model::new(PathBuf::from("bare.md"), page, (80, 24));

    let model = update(model, Message::ToggleNav);
    assert!(!model.nav_open);
    assert!(model.nav_selected.is_none());
}

#[test]
fn test_nav_select_closes_open_panel() {
    let mut model = create_test_model();
    model = update(model, Message::ToggleNav);
    model = update(model, Message::SwitchFocus);
    model = update(model, Message::NavDown);
    assert!(model.nav_open);

    model = update(model, Message::NavSelect);
    assert!(!model.nav_open, "choosing an entry must close the panel");
    assert!(!model.nav_focused);
    assert_eq!(model.location.as_deref(), Some("work"));
}

#[test]
fn test_nav_click_closes_panel_and_navigates() {
    let mut model = create_test_model();
    model = update(model, Message::ToggleNav);

    model = update(model, Message::NavClick(2));
    assert!(!model.nav_open);
    assert_eq!(model.location.as_deref(), Some("about"));
}

#[test]
fn test_nav_select_with_closed_panel_still_navigates() {
    let mut model = create_test_model();
    model.nav_selected = Some(1);

    model = update(model, Message::NavSelect);
    assert!(!model.nav_open);
    assert_eq!(model.location.as_deref(), Some("work"));
}

#[test]
fn test_nav_cursor_clamps_at_both_ends() {
    let mut model = create_test_model();
    model = update(model, Message::ToggleNav);

    model = update(model, Message::NavUp);
    assert_eq!(model.nav_selected, Some(0));

    for _ in 0..20 {
        model = update(model, Message::NavDown);
    }
    assert_eq!(model.nav_selected, Some(3));
}

// ─── Anchor routing ─────────────────────────────────────────

#[test]
fn test_navigate_brings_target_section_into_view() {
    let mut model = create_long_model();
    assert!(!section_visible(&model, "three"));

    model = update(model, Message::NavigateTo("three".to_string()));
    assert!(section_visible(&model, "three"));
    assert_eq!(model.location.as_deref(), Some("three"));
}

#[test]
fn test_navigate_to_missing_fragment_changes_nothing() {
    let mut model = create_test_model();
    let offset_before = model.viewport.offset();

    model = update(model, Message::NavigateTo("missing".to_string()));
    assert_eq!(model.viewport.offset(), offset_before);
    assert_eq!(model.location, None);
    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Warning);
    assert!(message.contains("#missing"));
}

#[test]
fn test_navigation_history_and_back() {
    let mut model = create_test_model();
    model = update(model, Message::NavigateTo("work".to_string()));
    model = update(model, Message::NavigateTo("about".to_string()));
    assert_eq!(model.history_len(), 1);

    model = update(model, Message::NavigateBack);
    assert_eq!(model.location.as_deref(), Some("work"));
    assert_eq!(model.history_len(), 0);
}

#[test]
fn test_renavigating_same_fragment_does_not_grow_history() {
    let mut model = create_test_model();
    model = update(model, Message::NavigateTo("work".to_string()));
    model = update(model, Message::NavigateTo("work".to_string()));
    assert_eq!(model.history_len(), 0);
}

#[test]
fn test_back_with_empty_history_is_inert() {
    let mut model = create_test_model();
    model = update(model, Message::NavigateBack);
    assert_eq!(model.location, None);
}

#[test]
fn test_animation_runs_to_target() {
    let mut model = create_long_model();
    model.motion_enabled = true;

    model = update(model, Message::NavigateTo("two".to_string()));
    assert!(model.animation.is_some());

    let mut ticks = 0;
    while model.animation.is_some() {
        model = update(model, Message::AnimationTick);
        ticks += 1;
        assert!(ticks < 1000, "animation failed to settle");
    }
    assert!(section_visible(&model, "two"));
}

#[test]
fn test_new_navigation_supersedes_animation() {
    let mut model = create_long_model();
    model.motion_enabled = true;

    model = update(model, Message::NavigateTo("three".to_string()));
    let first_target = model.animation.unwrap().target();

    model = update(model, Message::NavigateTo("one".to_string()));
    let second_target = model.animation.unwrap().target();
    assert_ne!(first_target, second_target, "the new target must win");
    assert_eq!(model.location.as_deref(), Some("one"));
}

#[test]
fn test_manual_scroll_cancels_animation() {
    let mut model = create_long_model();
    model.motion_enabled = true;

    model = update(model, Message::NavigateTo("three".to_string()));
    assert!(model.animation.is_some());

    model = update(model, Message::ScrollDown(1));
    assert!(model.animation.is_none());
}

// ─── Active-section tracking ────────────────────────────────

#[test]
fn test_initial_active_entry_is_topmost_visible() {
    let model = create_long_model();
    assert_eq!(model.tracker.active(), Some(0));
}

#[test]
fn test_scrolling_moves_active_marker() {
    let mut model = create_long_model();
    model = update(model, Message::GoToBottom);
    assert_eq!(model.tracker.active(), Some(2));

    model = update(model, Message::GoToTop);
    assert_eq!(model.tracker.active(), Some(0));
}

#[test]
fn test_active_marker_survives_dead_zones() {
    let mut model = create_long_model();
    assert_eq!(model.tracker.active(), Some(0));

    // A few lines down no section clears the threshold; the marker stays.
    model = update(model, Message::ScrollDown(8));
    assert_eq!(model.tracker.active(), Some(0));
}

#[test]
fn test_active_marker_always_within_bounds() {
    let mut model = create_long_model();
    for msg in [
        Message::ScrollDown(5),
        Message::PageDown,
        Message::HalfPageUp,
        Message::GoToBottom,
        Message::ScrollUp(3),
        Message::GoToTop,
    ] {
        model = update(model, msg);
        if let Some(active) = model.tracker.active() {
            assert!(active < model.page.sections().len());
        }
    }
}

// ─── Contact form ───────────────────────────────────────────

#[test]
fn test_focus_form_navigates_to_contact() {
    let mut model = create_test_model();
    model = update(model, Message::FocusForm);
    assert!(model.form_focused);
    assert_eq!(model.location.as_deref(), Some("contact"));
}

#[test]
fn test_focus_form_without_contact_section_is_inert() {
    let page = Page::parse("## Home\n\nNo form here.", 80).unwrap();
    let model = Model::new(PathBuf::from("bare.md"), page, (80, 24));

    let model = update(model, Message::FocusForm);
    assert!(!model.form_focused);
}

#[test]
fn test_blocked_submission_shows_every_error() {
    let mut model = fill_form(create_test_model(), "", "bad", "hi");
    model = update(model, Message::FormSubmit);

    assert_eq!(model.form.error(FieldId::Name), Some(form::NAME_REQUIRED));
    assert_eq!(model.form.error(FieldId::Email), Some(form::EMAIL_INVALID));
    assert_eq!(model.form.error(FieldId::Message), None);
    assert_eq!(model.form.value(FieldId::Message), "hi");
    assert!(
        model.active_toast().is_none(),
        "no confirmation on a blocked submission"
    );
}

#[test]
fn test_valid_submission_confirms_and_clears() {
    let mut model = fill_form(create_test_model(), "Jo", "jo@example.com", "Hello");
    model = update(model, Message::FormSubmit);

    let (message, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Info);
    assert_eq!(message, form::CONFIRMATION);
    assert!(!model.form.has_errors());
    for field in FieldId::ALL {
        assert_eq!(model.form.value(field), "");
    }
}

#[test]
fn test_form_input_ignored_without_focus() {
    let mut model = create_test_model();
    model = type_text(model, "stray");
    assert_eq!(model.form.value(FieldId::Name), "");
}

#[test]
fn test_leave_form_returns_focus_to_page() {
    let mut model = create_test_model();
    model = update(model, Message::FocusForm);
    model = update(model, Message::LeaveForm);
    assert!(!model.form_focused);
}

#[test]
fn test_form_field_cycling_messages() {
    let mut model = create_test_model();
    model = update(model, Message::FocusForm);
    model = update(model, Message::FormNextField);
    assert_eq!(model.form.focus(), FieldId::Email);
    model = update(model, Message::FormPrevField);
    assert_eq!(model.form.focus(), FieldId::Name);
}

// ─── Link picker ────────────────────────────────────────────

#[test]
fn test_open_link_picker_lists_visible_links() {
    let mut model = create_test_model();
    model = update(model, Message::OpenLinkPicker);
    assert_eq!(model.link_picker_items.len(), 2);
}

#[test]
fn test_single_visible_link_followed_directly() {
    let page = Page::parse("Go [there](#end).\n\n## End\n\nDone.", 80).unwrap();
    let mut model = Model::new(PathBuf::from("one.md"), page, (80, 24));
    model.motion_enabled = false;

    model = update(model, Message::OpenLinkPicker);
    assert!(model.link_picker_items.is_empty());
    assert_eq!(model.location.as_deref(), Some("end"));
}

#[test]
fn test_pick_link_navigates_and_clears_picker() {
    let mut model = create_test_model();
    model = update(model, Message::OpenLinkPicker);
    model = update(model, Message::PickLink(1));
    assert!(model.link_picker_items.is_empty());
    assert_eq!(model.location.as_deref(), Some("work"));
}

#[test]
fn test_cancel_link_picker() {
    let mut model = create_test_model();
    model = update(model, Message::OpenLinkPicker);
    model = update(model, Message::CancelLinkPicker);
    assert!(model.link_picker_items.is_empty());
    assert_eq!(model.location, None);
}

#[test]
fn test_follow_link_at_line() {
    let model = create_test_model();
    let link_line = model.page.links()[0].line;
    let model = update(model, Message::FollowLinkAtLine(link_line));
    assert_eq!(model.location.as_deref(), Some("work"));
}

// ─── File handling ──────────────────────────────────────────

#[test]
fn test_toggle_watch_changes_state() {
    let model = create_test_model();
    assert!(!model.watch_enabled);

    let model = update(model, Message::ToggleWatch);
    assert!(model.watch_enabled);
}

#[test]
fn test_force_reload_side_effect_reloads_page() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.md");
    std::fs::write(&file_path, "## One\n\nalpha").unwrap();

    let page = Page::parse("## One\n\nalpha", 80).unwrap();
    let mut model = Model::new(file_path.clone(), page, (80, 24));
    let mut watcher = None;

    std::fs::write(&file_path, "## Two\n\nbeta").unwrap();
    model = update(model, Message::ForceReload);
    App::handle_message_side_effects(&mut model, &mut watcher, &Message::ForceReload);

    assert!(model.page.source().contains("## Two"));
    assert_eq!(model.page.sections()[0].id, "two");
}

#[test]
fn test_reload_drops_stale_location() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("page.md");
    std::fs::write(&file_path, "## Gone\n\ntext").unwrap();

    let page = Page::parse("## Work\n\ntext", 80).unwrap();
    let mut model = Model::new(file_path, page, (80, 24));
    model.motion_enabled = false;
    model = update(model, Message::NavigateTo("work".to_string()));
    assert_eq!(model.location.as_deref(), Some("work"));

    model.reload_from_disk().unwrap();
    assert_eq!(model.location, None, "stale fragment must be dropped");
    assert_eq!(model.tracker.active(), Some(0));
}

// ─── Window and overlays ────────────────────────────────────

#[test]
fn test_resize_reflows_page() {
    let mut model = create_test_model();
    let sections_before = model.page.sections().len();

    model = update(model, Message::Resize(40, 12));
    assert_eq!(model.viewport.width(), 40);
    assert_eq!(model.viewport.height(), 11);
    assert_eq!(model.page.sections().len(), sections_before);
}

#[test]
fn test_toggle_help_changes_visibility() {
    let model = create_test_model();
    assert!(!model.help_visible);

    let model = update(model, Message::ToggleHelp);
    assert!(model.help_visible);

    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
}

#[test]
fn test_quit_sets_flag() {
    let model = update(create_test_model(), Message::Quit);
    assert!(model.should_quit);
}

// ─── Key routing ────────────────────────────────────────────

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_key_m_toggles_nav() {
    let model = create_test_model();
    assert_eq!(
        App::handle_key(key(KeyCode::Char('m')), &model),
        Some(Message::ToggleNav)
    );
}

#[test]
fn test_typed_characters_go_to_focused_form() {
    let mut model = create_test_model();
    model = update(model, Message::FocusForm);
    // 'c' focuses the form from the page, but types once focused.
    assert_eq!(
        App::handle_key(key(KeyCode::Char('c')), &model),
        Some(Message::FormInput('c'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &model),
        Some(Message::LeaveForm)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &model),
        Some(Message::FormSubmit)
    );
}

#[test]
fn test_digits_pick_links_while_picker_open() {
    let mut model = create_test_model();
    model = update(model, Message::OpenLinkPicker);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('2')), &model),
        Some(Message::PickLink(2))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('x')), &model),
        Some(Message::CancelLinkPicker)
    );
}

#[test]
fn test_panel_focus_keys_drive_cursor() {
    let mut model = create_test_model();
    model = update(model, Message::ToggleNav);
    model = update(model, Message::SwitchFocus);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('j')), &model),
        Some(Message::NavDown)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &model),
        Some(Message::NavSelect)
    );
}

#[test]
fn test_any_key_closes_help() {
    let mut model = create_test_model();
    model = update(model, Message::ToggleHelp);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('z')), &model),
        Some(Message::HideHelp)
    );
}
