use crate::fingerprint::{Digest, empty_fingerprint, fingerprint};

/// Visible text and the two fingerprints that define dirtiness.
///
/// `visible_text` is only ever written by [`ContentState::refresh`], which the
/// session calls with the text of the visible snapshot.
#[derive(Debug, Clone)]
pub struct ContentState {
    visible_text: String,
    content_fingerprint: Digest,
    saved_fingerprint: Digest,
}

impl Default for ContentState {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentState {
    pub fn new() -> Self {
        Self {
            visible_text: String::new(),
            content_fingerprint: empty_fingerprint(),
            saved_fingerprint: empty_fingerprint(),
        }
    }

    pub fn visible_text(&self) -> &str {
        &self.visible_text
    }
    pub fn content_fingerprint(&self) -> Digest {
        self.content_fingerprint
    }
    pub fn saved_fingerprint(&self) -> Digest {
        self.saved_fingerprint
    }

    pub fn is_dirty(&self) -> bool {
        self.content_fingerprint != self.saved_fingerprint
    }

    pub(crate) fn refresh(&mut self, text: &str) {
        if self.visible_text != text {
            self.visible_text.clear();
            self.visible_text.push_str(text);
        }
        self.content_fingerprint = fingerprint(text);
    }

    pub(crate) fn set_saved(&mut self, digest: Digest) {
        self.saved_fingerprint = digest;
    }

    /// Record the current content as saved. Returns false when it already was.
    pub(crate) fn mark_saved(&mut self) -> bool {
        if !self.is_dirty() {
            return false;
        }
        self.saved_fingerprint = self.content_fingerprint;
        true
    }
}
