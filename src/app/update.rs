use crate::app::Model;
use crate::app::model::ToastLevel;
use crate::form;
use crate::page::CONTACT_FRAGMENT;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Scrolling
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up half page
    HalfPageUp,
    /// Scroll down half page
    HalfPageDown,
    /// Go to top of page
    GoToTop,
    /// Go to bottom of page
    GoToBottom,

    // Navigation panel
    /// Toggle the navigation panel open/closed
    ToggleNav,
    /// Move the panel cursor up
    NavUp,
    /// Move the panel cursor down
    NavDown,
    /// Activate the entry under the panel cursor
    NavSelect,
    /// Activate a panel entry by index
    NavClick(usize),
    /// Switch focus between the panel and the page
    SwitchFocus,

    // Anchor routing
    /// Navigate to a fragment identifier
    NavigateTo(String),
    /// Return to the previously visited fragment
    NavigateBack,
    /// Advance the scroll animation one step
    AnimationTick,
    /// Open the visible-link picker (or follow directly when single link)
    OpenLinkPicker,
    /// Follow a numbered link in the picker
    PickLink(u8),
    /// Close the visible-link picker
    CancelLinkPicker,
    /// Follow the anchor link on a rendered line
    FollowLinkAtLine(usize),

    // Contact form
    /// Scroll the form into view and give it key focus
    FocusForm,
    /// Return key focus to the page
    LeaveForm,
    /// Type a character into the focused field
    FormInput(char),
    /// Delete the last character of the focused field
    FormBackspace,
    /// Focus the next field
    FormNextField,
    /// Focus the previous field
    FormPrevField,
    /// Attempt a submission
    FormSubmit,

    // File watching
    /// Toggle file watching
    ToggleWatch,
    /// File changed externally, reload
    FileChanged,
    /// Force reload file
    ForceReload,

    // Overlays
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// All state transitions happen here; side effects (file reloads,
/// watcher wiring) live in the effects layer.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Section focus is recomputed after anything that moves the viewport.
    let moves_viewport = matches!(
        &msg,
        Message::ScrollUp(_)
            | Message::ScrollDown(_)
            | Message::PageUp
            | Message::PageDown
            | Message::HalfPageUp
            | Message::HalfPageDown
            | Message::GoToTop
            | Message::GoToBottom
            | Message::Resize(_, _)
    );

    match msg {
        // Scrolling; manual movement cancels an in-flight animation.
        Message::ScrollUp(n) => {
            model.viewport.scroll_up(n);
            model.animation = None;
        }
        Message::ScrollDown(n) => {
            model.viewport.scroll_down(n);
            model.animation = None;
        }
        Message::PageUp => {
            model.viewport.page_up();
            model.animation = None;
        }
        Message::PageDown => {
            model.viewport.page_down();
            model.animation = None;
        }
        Message::HalfPageUp => {
            model.viewport.half_page_up();
            model.animation = None;
        }
        Message::HalfPageDown => {
            model.viewport.half_page_down();
            model.animation = None;
        }
        Message::GoToTop => {
            model.viewport.go_to_top();
            model.animation = None;
        }
        Message::GoToBottom => {
            model.viewport.go_to_bottom();
            model.animation = None;
        }

        // Navigation panel
        Message::ToggleNav => {
            // A page without sections has no panel to toggle.
            if !model.page.sections().is_empty() {
                model.nav_open = !model.nav_open;
                if model.nav_open && model.nav_selected.is_none() {
                    model.nav_selected = Some(0);
                }
                if !model.nav_open {
                    model.nav_focused = false;
                }
                model.reflow();
            }
        }
        Message::NavUp => {
            if let Some(sel) = model.nav_selected {
                model.nav_selected = Some(sel.saturating_sub(1));
            }
        }
        Message::NavDown => {
            if let Some(sel) = model.nav_selected {
                let max = model.page.sections().len().saturating_sub(1);
                model.nav_selected = Some((sel + 1).min(max));
            }
        }
        Message::NavSelect => {
            if let Some(sel) = model.nav_selected {
                activate_nav_entry(&mut model, sel);
            }
        }
        Message::NavClick(idx) => {
            model.nav_selected = Some(idx);
            activate_nav_entry(&mut model, idx);
        }
        Message::SwitchFocus => {
            if model.nav_open {
                model.nav_focused = !model.nav_focused;
                if model.nav_focused && model.nav_selected.is_none() {
                    model.nav_selected = Some(0);
                }
            }
        }

        // Anchor routing
        Message::NavigateTo(fragment) => {
            model.start_navigation(&fragment);
        }
        Message::NavigateBack => {
            model.navigate_back();
        }
        Message::AnimationTick => {
            model.animation_tick();
        }
        Message::OpenLinkPicker => {
            let visible = model.visible_anchor_links();
            match visible.len() {
                0 => model.show_toast(ToastLevel::Info, "No links in view"),
                1 => {
                    let target = visible[0].target.clone();
                    model.start_navigation(&target);
                }
                _ => {
                    model.link_picker_items = visible;
                    model.show_toast(ToastLevel::Info, "Select link: 1-9 (Esc to cancel)");
                }
            }
        }
        Message::PickLink(index) => {
            let target = model
                .link_picker_items
                .get(usize::from(index.saturating_sub(1)))
                .map(|link| link.target.clone());
            model.link_picker_items.clear();
            if let Some(target) = target {
                model.start_navigation(&target);
            }
        }
        Message::CancelLinkPicker => {
            model.link_picker_items.clear();
        }
        Message::FollowLinkAtLine(line) => {
            if let Some(target) = model.page.link_on_line(line).map(|l| l.target.clone()) {
                model.start_navigation(&target);
            }
        }

        // Contact form
        Message::FocusForm => {
            // A page without a contact section has no form to focus.
            if model.form_available() {
                model.form_focused = true;
                model.nav_focused = false;
                model.start_navigation(CONTACT_FRAGMENT);
            }
        }
        Message::LeaveForm => {
            model.form_focused = false;
        }
        Message::FormInput(ch) => {
            if model.form_focused {
                model.form.insert_char(ch);
            }
        }
        Message::FormBackspace => {
            if model.form_focused {
                model.form.backspace();
            }
        }
        Message::FormNextField => {
            if model.form_focused {
                model.form.focus_next();
            }
        }
        Message::FormPrevField => {
            if model.form_focused {
                model.form.focus_prev();
            }
        }
        Message::FormSubmit => {
            if model.form_focused && model.form.submit() {
                model.show_toast(ToastLevel::Info, form::CONFIRMATION);
            }
        }

        // File watching
        Message::ToggleWatch => {
            model.watch_enabled = !model.watch_enabled;
        }
        // FileChanged/ForceReload: handled in effects (side effect)
        // Redraw: no state change needed
        Message::FileChanged | Message::ForceReload | Message::Redraw => {}

        // Overlays
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            model.reflow();
        }

        // Application
        Message::Quit => {
            model.should_quit = true;
        }
    }

    if moves_viewport {
        model.observe_sections();
    }
    model
}

/// Choosing a panel entry navigates to its section and always leaves
/// the panel closed.
fn activate_nav_entry(model: &mut Model, idx: usize) {
    let Some(fragment) = model.page.sections().get(idx).map(|s| s.id.clone()) else {
        return;
    };
    if model.nav_open {
        model.nav_open = false;
        model.nav_focused = false;
        model.reflow();
    }
    model.start_navigation(&fragment);
}
