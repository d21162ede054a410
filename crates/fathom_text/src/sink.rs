//! The text sink interface and the plain-text transcript sink.

/// Where prose goes.
///
/// The core issues structural calls (regions, paragraphs, links) rather
/// than concatenating strings; a sink decides what they mean. An HTML
/// sink would build DOM nodes; the bundled [`TranscriptSink`] renders
/// styled text as plain text and ignores event hooks.
pub trait TextSink {
    /// Emits literal text into the current region.
    fn write_text(&mut self, text: &str);

    /// Emits a standalone element (a rule, an image placeholder, ...).
    fn write_element(&mut self, element: &str);

    /// Enters an inline region with the given tag.
    fn enter_inline(&mut self, tag: &str);

    /// Enters a block region with the given tag.
    fn enter_block(&mut self, tag: &str);

    /// Leaves the innermost region.
    fn leave(&mut self);

    /// Terminates the current paragraph.
    fn para(&mut self);

    /// Attaches a class to the current region.
    fn add_class(&mut self, class: &str);

    /// Sets an attribute on the current region.
    fn attr(&mut self, key: &str, value: &str);

    /// Sets a style property on the current region.
    fn css(&mut self, key: &str, value: &str);

    /// Registers an event handler command on the current region.
    ///
    /// A terminal sink ignores this.
    fn on_event(&mut self, event: &str, command: &str);

    /// Opens an action link; clicking it re-submits `command` as if the
    /// player had typed it.
    fn begin_action_link(&mut self, command: &str);

    /// Closes the innermost action link.
    fn end_action_link(&mut self);
}

/// Plain-text sink that accumulates a transcript.
///
/// Paragraph breaks become blank lines; regions, classes, styles, and
/// events are ignored; action links render as their inner text.
#[derive(Debug, Default)]
pub struct TranscriptSink {
    out: String,
    /// Text has been written since the last paragraph break.
    dirty: bool,
}

impl TranscriptSink {
    /// Creates an empty transcript sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the transcript so far without clearing it.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.out
    }

    /// Takes the accumulated transcript, leaving the sink empty.
    pub fn take(&mut self) -> String {
        self.dirty = false;
        std::mem::take(&mut self.out)
    }
}

impl TextSink for TranscriptSink {
    fn write_text(&mut self, text: &str) {
        if !text.is_empty() {
            self.out.push_str(text);
            self.dirty = true;
        }
    }

    fn write_element(&mut self, element: &str) {
        self.write_text(element);
    }

    fn enter_inline(&mut self, _tag: &str) {}

    fn enter_block(&mut self, _tag: &str) {
        if self.dirty {
            self.para();
        }
    }

    fn leave(&mut self) {}

    fn para(&mut self) {
        if self.dirty {
            self.out.push_str("\n\n");
            self.dirty = false;
        }
    }

    fn add_class(&mut self, _class: &str) {}

    fn attr(&mut self, _key: &str, _value: &str) {}

    fn css(&mut self, _key: &str, _value: &str) {}

    fn on_event(&mut self, _event: &str, _command: &str) {}

    fn begin_action_link(&mut self, _command: &str) {}

    fn end_action_link(&mut self) {}
}
