//! Markdown parsing with comrak.
//!
//! Turns a single-page markdown source into wrapped display lines plus
//! the section and anchor-link tables. Sections are introduced by
//! level-2 headings; their fragment identifiers come from comrak's
//! anchorizer so in-page links (`[text](#fragment)`) resolve the same
//! way a rendered page would resolve them.

use comrak::nodes::{AstNode, NodeValue};
use comrak::{Anchorizer, Arena, Options, parse_document};
use unicode_width::UnicodeWidthStr;

use crate::form::FieldId;

use super::PageError;
use super::types::{AnchorLink, LineKind, Page, PageLine, Section};

/// Fragment identifier of the section that hosts the contact form.
pub const CONTACT_FRAGMENT: &str = "contact";

impl Page {
    /// Parse markdown source, wrapping text to `width` columns.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Empty`] when the source contains no
    /// renderable content.
    pub fn parse(source: &str, width: u16) -> Result<Self, PageError> {
        parse(source, width)
    }
}

pub(super) fn parse(source: &str, width: u16) -> Result<Page, PageError> {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, source, &options);

    let mut builder = PageBuilder::new(width.max(1) as usize);
    for node in root.children() {
        builder.block(node);
    }
    builder.finish(source)
}

fn create_options() -> Options {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.header_ids = Some(String::new());
    options
}

struct PageBuilder {
    width: usize,
    lines: Vec<PageLine>,
    sections: Vec<Section>,
    links: Vec<AnchorLink>,
    title: Option<String>,
    has_contact_form: bool,
    anchorizer: Anchorizer,
    /// Section currently being built: (id, title, first line index).
    open_section: Option<(String, String, usize)>,
}

impl PageBuilder {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            sections: Vec::new(),
            links: Vec::new(),
            title: None,
            has_contact_form: false,
            anchorizer: Anchorizer::new(),
            open_section: None,
        }
    }

    fn block<'a>(&mut self, node: &'a AstNode<'a>) {
        match &node.data.borrow().value {
            NodeValue::Heading(heading) => self.heading(node, heading.level),
            NodeValue::Paragraph => self.paragraph(node, ""),
            NodeValue::List(_) => self.list(node),
            NodeValue::BlockQuote => {
                for child in node.children() {
                    if matches!(child.data.borrow().value, NodeValue::Paragraph) {
                        self.paragraph(child, "▌ ");
                    }
                }
                self.lines.push(PageLine::blank());
            }
            NodeValue::CodeBlock(code_block) => {
                for line in code_block.literal.lines() {
                    self.push(line.to_string(), LineKind::CodeBlock);
                }
                self.lines.push(PageLine::blank());
            }
            NodeValue::ThematicBreak => {
                self.push("─".repeat(self.width), LineKind::Rule);
                self.lines.push(PageLine::blank());
            }
            _ => {}
        }
    }

    fn heading<'a>(&mut self, node: &'a AstNode<'a>, level: u8) {
        let text = collect_text(node);
        if level == 1 && self.title.is_none() && self.sections.is_empty() {
            self.title = Some(text.clone());
        }
        if level == 2 {
            self.close_section();
            let id = self.anchorizer.anchorize(text.clone());
            self.open_section = Some((id, text.clone(), self.lines.len()));
        }
        for wrapped in wrap(&text, self.width) {
            self.push(wrapped, LineKind::Heading(level));
        }
        self.lines.push(PageLine::blank());
    }

    fn paragraph<'a>(&mut self, node: &'a AstNode<'a>, prefix: &str) {
        let text = collect_text(node);
        if text.is_empty() {
            return;
        }
        let kind = if prefix.is_empty() {
            LineKind::Paragraph
        } else {
            LineKind::Quote
        };
        let block_start = self.lines.len();
        let wrap_width = self.width.saturating_sub(prefix.width()).max(1);
        for wrapped in wrap(&text, wrap_width) {
            self.push(format!("{prefix}{wrapped}"), kind);
        }
        self.collect_anchor_links(node, block_start);
        if prefix.is_empty() {
            self.lines.push(PageLine::blank());
        }
    }

    fn list<'a>(&mut self, node: &'a AstNode<'a>) {
        for item in node.children() {
            let text = collect_text(item);
            if text.is_empty() {
                continue;
            }
            let block_start = self.lines.len();
            let wrap_width = self.width.saturating_sub(2).max(1);
            for (idx, wrapped) in wrap(&text, wrap_width).into_iter().enumerate() {
                let lead = if idx == 0 { "• " } else { "  " };
                self.push(format!("{lead}{wrapped}"), LineKind::ListItem);
            }
            self.collect_anchor_links(item, block_start);
        }
        self.lines.push(PageLine::blank());
    }

    /// Record in-page anchor links under `node`, locating each on the
    /// wrapped line its text landed on.
    fn collect_anchor_links<'a>(&mut self, node: &'a AstNode<'a>, block_start: usize) {
        for child in node.descendants() {
            let data = child.data.borrow();
            let NodeValue::Link(link) = &data.value else {
                continue;
            };
            let Some(target) = link.url.strip_prefix('#') else {
                continue;
            };
            let text = collect_text(child);
            if text.is_empty() || target.is_empty() {
                continue;
            }
            // Wrapping may have split the link text; fall back to the
            // block's first line when no single line contains it.
            let line = self.lines[block_start..]
                .iter()
                .position(|l| l.content().contains(&text))
                .map_or(block_start, |rel| block_start + rel);
            self.links.push(AnchorLink {
                text,
                target: target.to_string(),
                line,
            });
        }
    }

    fn push(&mut self, content: String, kind: LineKind) {
        self.lines.push(PageLine::new(content, kind));
    }

    fn close_section(&mut self) {
        let Some((id, title, start)) = self.open_section.take() else {
            return;
        };
        if id == CONTACT_FRAGMENT {
            self.push_form_block();
            self.has_contact_form = true;
        }
        self.sections.push(Section {
            id,
            title,
            lines: start..self.lines.len(),
        });
    }

    /// The contact form occupies a fixed block so toggling error rows
    /// never reflows the page.
    fn push_form_block(&mut self) {
        for field in FieldId::ALL {
            self.push(field.label().to_string(), LineKind::FormLabel(field));
            self.push(String::new(), LineKind::FormInput(field));
            self.push(String::new(), LineKind::FormError(field));
        }
        self.push(String::new(), LineKind::FormHint);
        self.lines.push(PageLine::blank());
    }

    fn finish(mut self, source: &str) -> Result<Page, PageError> {
        self.close_section();
        while self.lines.last().is_some_and(|l| l.kind() == LineKind::Blank) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            return Err(PageError::Empty);
        }
        // Trimming may have shortened the last section's range.
        let line_count = self.lines.len();
        for section in &mut self.sections {
            section.lines.start = section.lines.start.min(line_count);
            section.lines.end = section.lines.end.min(line_count);
        }
        Ok(Page {
            title: self.title,
            lines: self.lines,
            sections: self.sections,
            links: self.links,
            source: source.to_string(),
            has_contact_form: self.has_contact_form,
        })
    }
}

/// Concatenated text content of a node's inline descendants.
fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut out = String::new();
    for child in node.descendants() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => out.push_str(text),
            NodeValue::Code(code) => out.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Greedy word wrap by display width. Words wider than the target get a
/// line of their own rather than being split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let sep = usize::from(!current.is_empty());
        if current_width + sep + word_width > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
