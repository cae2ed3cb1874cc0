//! Agent's outgoing message draft.

#[cfg(test)]
#[path = "composer_test.rs"]
mod composer_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Composer {
    draft: String,
}

impl Composer {
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Send button state: disabled while the draft is blank.
    #[must_use]
    pub fn can_send(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Take the draft for sending, leaving the composer empty.
    ///
    /// Returns `None` and leaves the draft untouched when it is blank.
    pub fn take_outgoing(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        Some(std::mem::take(&mut self.draft))
    }
}
