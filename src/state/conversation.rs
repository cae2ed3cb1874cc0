//! Conversation thread between the customer and the support agent.
//!
//! DESIGN
//! ======
//! Append-only: messages are never edited or removed, and insertion order is
//! display order. Ids are assigned at append time from the highest id seen so
//! far, so a delayed customer reply can never collide with an agent message
//! sent while it was pending.

use serde::Serialize;

#[cfg(test)]
#[path = "conversation_test.rs"]
mod conversation_test;

/// Acknowledgements a simulated customer may send after an agent reply.
pub const CANNED_CUSTOMER_REPLIES: [&str; 4] = [
    "Thank you for looking into this!",
    "That sounds good, I appreciate your help.",
    "Perfect, when can I expect an update?",
    "Great, thank you for the quick response!",
];

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Customer,
    Agent,
}

/// A single entry in the conversation thread.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: u64,
    pub sender: Sender,
    pub content: String,
    /// Display-only timestamp (e.g. `"02:35 PM"`).
    pub time: String,
}

/// Static header shown above the thread.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomerProfile {
    pub name: String,
    pub details: String,
    pub status: String,
    pub ai_summary: String,
}

impl CustomerProfile {
    /// Profile for the demo conversation.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            name: "Mridul Pramod".to_owned(),
            details: "Order #12847 • Premium Customer".to_owned(),
            status: "Active".to_owned(),
            ai_summary: "Customer reporting missing delivery for Order #12847. Premium customer with 3-year \
                         history. Previous delivery issues resolved successfully."
                .to_owned(),
        }
    }
}

/// Ordered, append-only message store.
#[derive(Clone, Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    last_id: u64,
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the opening exchange of the demo conversation.
    #[must_use]
    pub fn demo_thread() -> Self {
        let mut store = Self::new();
        store.append(
            Sender::Customer,
            "Hi, I'm having trouble with my recent order. It shows as delivered but I never received it.",
            "2:34 PM",
        );
        store.append(
            Sender::Agent,
            "I understand your concern about your missing order. Let me help you resolve this right away.",
            "2:35 PM",
        );
        store
    }

    /// Append a message at the end of the thread and return it.
    pub fn append(&mut self, sender: Sender, content: impl Into<String>, time: impl Into<String>) -> &Message {
        self.last_id += 1;
        let index = self.messages.len();
        self.messages.push(Message { id: self.last_id, sender, content: content.into(), time: time.into() });
        &self.messages[index]
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Message> {
        self.messages.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
