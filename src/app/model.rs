use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::form::ContactForm;
use crate::page::{AnchorLink, Page};
use crate::tracker::SectionTracker;
use crate::ui::scroll::ScrollAnimation;
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The loaded page
    pub page: Page,
    /// Viewport managing scroll position
    pub viewport: Viewport,
    /// Path to the source file
    pub file_path: PathBuf,
    /// Whether the navigation panel is open
    pub nav_open: bool,
    /// Focus: true = navigation panel, false = page
    pub nav_focused: bool,
    /// Cursor position in the navigation panel
    pub nav_selected: Option<usize>,
    /// Active-section tracking state
    pub tracker: SectionTracker,
    /// Contact form state (inert when the page hosts no form)
    pub form: ContactForm,
    /// Whether keystrokes go to the contact form
    pub form_focused: bool,
    /// Current location fragment, shown in the status bar
    pub location: Option<String>,
    /// Previously visited fragments, most recent last
    history: Vec<String>,
    /// Pending visible-link picker items
    pub link_picker_items: Vec<AnchorLink>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether file watching is enabled
    pub watch_enabled: bool,
    /// Whether anchor navigation animates (false = instant jumps)
    pub motion_enabled: bool,
    /// In-flight scroll animation, if any
    pub animation: Option<ScrollAnimation>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("nav_open", &self.nav_open)
            .field("location", &self.location)
            .field("form_focused", &self.form_focused)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model for a parsed page.
    pub fn new(file_path: PathBuf, page: Page, terminal_size: (u16, u16)) -> Self {
        let tracker = SectionTracker::new(page.sections().len());
        let mut model = Self {
            viewport: Viewport::new(
                terminal_size.0,
                terminal_size.1.saturating_sub(1),
                page.line_count(),
            ),
            page,
            file_path,
            nav_open: false,
            nav_focused: false,
            nav_selected: None,
            tracker,
            form: ContactForm::new(),
            form_focused: false,
            location: None,
            history: Vec::new(),
            link_picker_items: Vec::new(),
            help_visible: false,
            watch_enabled: false,
            motion_enabled: true,
            animation: None,
            toast: None,
            should_quit: false,
            config_global_path: None,
            config_local_path: None,
        };
        model.observe_sections();
        model
    }

    /// Whether the page hosts the contact form.
    pub const fn form_available(&self) -> bool {
        self.page.has_contact_form()
    }

    pub const fn link_picker_active(&self) -> bool {
        !self.link_picker_items.is_empty()
    }

    /// Content width available to the page pane at the current layout.
    pub(super) fn layout_width(&self) -> u16 {
        crate::ui::page_content_width(self.viewport.width(), self.nav_open)
    }

    /// Feed the current viewport to the tracker. Returns true when the
    /// active entry changed.
    pub fn observe_sections(&mut self) -> bool {
        let ranges: Vec<_> = self
            .page
            .sections()
            .iter()
            .map(|s| s.lines.clone())
            .collect();
        self.tracker.observe(&ranges, &self.viewport.visible_range())
    }

    /// Route an anchor activation to its section.
    ///
    /// Resolves the fragment, records the previous location in history,
    /// and starts an eased scroll (or jumps when motion is disabled).
    /// An unresolvable fragment performs no navigation.
    pub(super) fn start_navigation(&mut self, fragment: &str) {
        let Some(idx) = self.page.section_index(fragment) else {
            tracing::warn!(fragment, "anchor target not found");
            self.show_toast(ToastLevel::Warning, format!("No section #{fragment}"));
            return;
        };
        let target = self.page.sections()[idx].lines.start;
        if let Some(previous) = self.location.replace(fragment.to_string())
            && previous != fragment
        {
            self.history.push(previous);
        }
        self.scroll_toward(target);
    }

    /// Return to the previously visited fragment, if any.
    pub(super) fn navigate_back(&mut self) {
        let Some(fragment) = self.history.pop() else {
            self.show_toast(ToastLevel::Info, "No earlier location");
            return;
        };
        let Some(idx) = self.page.section_index(&fragment) else {
            tracing::warn!(fragment, "history target no longer exists");
            return;
        };
        let target = self.page.sections()[idx].lines.start;
        self.location = Some(fragment);
        self.scroll_toward(target);
    }

    fn scroll_toward(&mut self, target: usize) {
        if self.motion_enabled {
            // The latest navigation wins over any in-flight animation.
            self.animation = Some(ScrollAnimation::new(target));
        } else {
            self.animation = None;
            self.viewport.go_to_line(target);
            self.observe_sections();
        }
    }

    /// Advance the scroll animation by one step.
    pub(super) fn animation_tick(&mut self) {
        let Some(anim) = self.animation else {
            return;
        };
        let before = self.viewport.offset();
        self.viewport.go_to_line(anim.step(before));
        let after = self.viewport.offset();
        // Done on arrival, or when clamping stops further progress
        // (target past the last scrollable line).
        if anim.is_done(after) || after == before {
            self.animation = None;
        }
        self.observe_sections();
    }

    /// Anchor links currently visible, capped for the picker digits.
    pub(super) fn visible_anchor_links(&self) -> Vec<AnchorLink> {
        let mut links = self.page.links_in_range(&self.viewport.visible_range());
        links.truncate(9);
        links
    }

    /// Re-parse the page at the current layout width, e.g. after the
    /// panel toggled or the terminal resized.
    pub(super) fn reflow(&mut self) {
        let width = self.layout_width();
        if let Ok(page) = Page::parse(self.page.source(), width) {
            self.page = page;
            self.finish_page_swap();
        }
    }

    /// Reload the page from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parses to an
    /// empty page.
    pub fn reload_from_disk(&mut self) -> Result<()> {
        let source = std::fs::read_to_string(&self.file_path)?;
        self.page = Page::parse(&source, self.layout_width())?;
        self.finish_page_swap();
        Ok(())
    }

    /// Clamp derived state after the page was replaced.
    fn finish_page_swap(&mut self) {
        self.viewport.set_total_lines(self.page.line_count());
        self.animation = None;
        self.tracker.reset(self.page.sections().len());
        self.observe_sections();
        let section_count = self.page.sections().len();
        if section_count == 0 {
            self.nav_selected = None;
            self.nav_open = false;
            self.nav_focused = false;
        } else if let Some(sel) = self.nav_selected {
            self.nav_selected = Some(sel.min(section_count - 1));
        }
        if self
            .location
            .as_deref()
            .is_some_and(|loc| self.page.section_index(loc).is_none())
        {
            self.location = None;
        }
        if !self.form_available() {
            self.form_focused = false;
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    #[cfg(test)]
    pub(super) fn history_len(&self) -> usize {
        self.history.len()
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            page: Page::empty(),
            viewport: Viewport::new(80, 24, 0),
            file_path: PathBuf::new(),
            nav_open: false,
            nav_focused: false,
            nav_selected: None,
            tracker: SectionTracker::new(0),
            form: ContactForm::new(),
            form_focused: false,
            location: None,
            history: Vec::new(),
            link_picker_items: Vec::new(),
            help_visible: false,
            watch_enabled: false,
            motion_enabled: true,
            animation: None,
            toast: None,
            should_quit: false,
            config_global_path: None,
            config_local_path: None,
        }
    }
}
