use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::page::LineKind;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::debug!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        if model.link_picker_active() {
            return match key.code {
                KeyCode::Char(c) if ('1'..='9').contains(&c) => {
                    Some(Message::PickLink((c as u8) - b'0'))
                }
                _ => Some(Message::CancelLinkPicker),
            };
        }

        // All printable input goes to the form while it has key focus.
        if model.form_focused {
            return match key.code {
                KeyCode::Esc => Some(Message::LeaveForm),
                KeyCode::Enter => Some(Message::FormSubmit),
                KeyCode::Tab | KeyCode::Down => Some(Message::FormNextField),
                KeyCode::BackTab | KeyCode::Up => Some(Message::FormPrevField),
                KeyCode::Backspace => Some(Message::FormBackspace),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Message::Quit)
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    Some(Message::FormInput(c))
                }
                _ => None,
            };
        }

        // Panel-focused navigation
        if model.nav_focused && model.nav_open {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Message::NavDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::NavUp),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Message::NavSelect),
                KeyCode::Tab | KeyCode::Esc => Some(Message::SwitchFocus),
                KeyCode::Char('m') => Some(Message::ToggleNav),
                KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
                KeyCode::Char('q') => Some(Message::Quit),
                _ => None,
            };
        }

        // Normal key handling
        match key.code {
            // Scrolling
            KeyCode::Char('j') | KeyCode::Down => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(1))
                } else {
                    None
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(1))
                } else {
                    None
                }
            }
            KeyCode::Char(' ') | KeyCode::PageDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::PageDown)
                } else {
                    None
                }
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::PageUp)
                } else {
                    None
                }
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::HalfPageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::HalfPageUp)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            // Navigation panel
            KeyCode::Char('m') => Some(Message::ToggleNav),
            KeyCode::Tab if model.nav_open => Some(Message::SwitchFocus),
            KeyCode::Esc if model.nav_open => Some(Message::ToggleNav),

            // Anchor routing
            KeyCode::Char('o') => Some(Message::OpenLinkPicker),
            KeyCode::Char('u') => Some(Message::NavigateBack),

            // Quit (checked before the form key: both use 'c')
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }

            // Contact form
            KeyCode::Char('c') => Some(Message::FocusForm),

            // File
            KeyCode::Char('w') => Some(Message::ToggleWatch),
            KeyCode::Char('r' | 'R') => Some(Message::ForceReload),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            // Quit
            KeyCode::Char('q') => Some(Message::Quit),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        if model.link_picker_active() {
            if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                return Some(Message::CancelLinkPicker);
            }
            return None;
        }

        let total_area = Rect::new(
            0,
            0,
            model.viewport.width(),
            model.viewport.height().saturating_add(1),
        );
        let (nav_area, page_area) = if model.nav_open {
            let chunks = crate::ui::split_panel_columns(total_area);
            (Some(chunks[0]), chunks[1])
        } else {
            (None, total_area)
        };

        if let Some(nav_area) = nav_area
            && point_in_rect(mouse.column, mouse.row, nav_area)
        {
            if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                return nav_click_index(model, nav_area, mouse.row).map(Message::NavClick);
            }
            return None;
        }

        if point_in_rect(mouse.column, mouse.row, page_area)
            && matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left))
            && let Some(line) = page_line_for_row(model, page_area, mouse.row)
        {
            if let Some(kind) = model.page.line_at(line).map(crate::page::PageLine::kind)
                && matches!(
                    kind,
                    LineKind::FormLabel(_) | LineKind::FormInput(_) | LineKind::FormError(_)
                )
            {
                return Some(Message::FocusForm);
            }
            if model.page.link_on_line(line).is_some() {
                return Some(Message::FollowLinkAtLine(line));
            }
        }

        match mouse.kind {
            MouseEventKind::ScrollDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(3))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(3))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Map a click row inside the panel to a section index, accounting for
/// the panel border and the stateless scroll window.
fn nav_click_index(model: &Model, nav_area: Rect, row: u16) -> Option<usize> {
    let entry_count = model.page.sections().len();
    if entry_count == 0 {
        return None;
    }
    if row <= nav_area.y || row >= nav_area.y + nav_area.height.saturating_sub(1) {
        return None;
    }
    let visible_rows = nav_area.height.saturating_sub(2) as usize;
    if visible_rows == 0 {
        return None;
    }
    let start = crate::ui::nav_window_start(model.nav_selected, entry_count, visible_rows);
    let rel_row = (row - nav_area.y - 1) as usize;
    let idx = start + rel_row;
    (idx < entry_count).then_some(idx)
}

/// Map a click row inside the page pane to a rendered line index.
fn page_line_for_row(model: &Model, page_area: Rect, row: u16) -> Option<usize> {
    // The last row is the status bar, plus one more when a toast shows.
    let content_rows = model.viewport.height();
    if row < page_area.y || row >= page_area.y + content_rows {
        return None;
    }
    let line = model.viewport.offset() + (row - page_area.y) as usize;
    (line < model.page.line_count()).then_some(line)
}
