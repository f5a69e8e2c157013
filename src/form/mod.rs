//! Contact form state and validation.
//!
//! The form holds three fields (name, email, message) plus a per-field
//! error slot. Validation runs all three checks on every submission so
//! every applicable error is shown at once, and only a fully valid form
//! clears its fields.

use std::sync::LazyLock;

use regex::Regex;

/// Error shown when the name field is blank.
pub const NAME_REQUIRED: &str = "Name cannot be empty.";
/// Error shown when the email field does not look like an address.
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
/// Error shown when the message field is blank.
pub const MESSAGE_REQUIRED: &str = "Message cannot be empty.";
/// Notification shown after a successful submission.
pub const CONFIRMATION: &str = "Thank you for your message! We will get back to you shortly.";

// Non-whitespace local part, non-whitespace domain with at least one dot.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Identifies one of the form's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Name,
    Email,
    Message,
}

impl FieldId {
    /// All fields in display order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    /// Label shown above the field's input row.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Message => "Message",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Message,
            Self::Message => Self::Name,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Message => Self::Email,
        }
    }
}

/// The contact form's transient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    name_error: Option<&'static str>,
    email_error: Option<&'static str>,
    message_error: Option<&'static str>,
    focus: FieldId,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    /// Create an empty form focused on the name field.
    pub const fn new() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            name_error: None,
            email_error: None,
            message_error: None,
            focus: FieldId::Name,
        }
    }

    /// The currently focused field.
    pub const fn focus(&self) -> FieldId {
        self.focus
    }

    /// Current raw value of a field.
    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::Message => &self.message,
        }
    }

    /// Current validation error for a field, if any.
    pub const fn error(&self, field: FieldId) -> Option<&'static str> {
        match field {
            FieldId::Name => self.name_error,
            FieldId::Email => self.email_error,
            FieldId::Message => self.message_error,
        }
    }

    /// Whether any field currently shows an error.
    pub const fn has_errors(&self) -> bool {
        self.name_error.is_some() || self.email_error.is_some() || self.message_error.is_some()
    }

    /// Move focus to the next field, wrapping around.
    pub const fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus to the previous field, wrapping around.
    pub const fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Append a character to the focused field.
    ///
    /// Control characters are ignored; the fields are single display rows.
    pub fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        self.value_mut(self.focus).push(ch);
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        self.value_mut(self.focus).pop();
    }

    /// Run every field check and record the outcome per field.
    ///
    /// All three checks always run so that every applicable error is
    /// visible after a single attempt. Returns true when the whole form
    /// is valid.
    pub fn validate(&mut self) -> bool {
        self.name_error = if self.name.trim().is_empty() {
            Some(NAME_REQUIRED)
        } else {
            None
        };
        self.email_error = if EMAIL_PATTERN.is_match(self.email.trim()) {
            None
        } else {
            Some(EMAIL_INVALID)
        };
        self.message_error = if self.message.trim().is_empty() {
            Some(MESSAGE_REQUIRED)
        } else {
            None
        };
        !self.has_errors()
    }

    /// Attempt a submission.
    ///
    /// On success the fields are cleared, focus returns to the name
    /// field, and true is returned. On failure the per-field errors are
    /// left set for display and the values are kept for correction.
    pub fn submit(&mut self) -> bool {
        if !self.validate() {
            return false;
        }
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.focus = FieldId::Name;
        true
    }

    fn value_mut(&mut self, field: FieldId) -> &mut String {
        match field {
            FieldId::Name => &mut self.name,
            FieldId::Email => &mut self.email,
            FieldId::Message => &mut self.message,
        }
    }
}
