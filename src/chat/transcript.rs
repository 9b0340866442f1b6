use crate::types::{Message, MessageId, Sender};

/// Append-only, ordered chat history of one widget instance
///
/// There is no API to edit or remove a message; the only way to get an empty
/// transcript back is to drop this one with its widget.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript opening with an assistant greeting (skipped when blank)
    pub fn seeded(greeting: &str) -> Self {
        let mut transcript = Self::new();
        if !greeting.trim().is_empty() {
            transcript.append(Sender::Assistant, greeting);
        }
        transcript
    }

    pub(crate) fn append(&mut self, sender: Sender, text: impl Into<String>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message::new(id, sender, text));
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
