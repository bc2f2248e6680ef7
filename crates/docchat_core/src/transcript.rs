use crate::message::{Message, MessageId};

/// Ordered, append-only log of messages. Insertion order is display order.
///
/// The only in-place edit is [`Transcript::replace_placeholder`], and the only
/// removal is a wholesale [`Transcript::clear`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// True while the loading placeholder `placeholder_id` is anywhere in the
    /// log, not only at the end.
    pub fn holds_placeholder(&self, placeholder_id: MessageId) -> bool {
        self.messages
            .iter()
            .any(|message| message.id() == placeholder_id && message.is_loading_placeholder())
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replaces the last entry with `replacement` only if that entry is the
    /// loading placeholder identified by `placeholder_id`.
    ///
    /// Returns the replacement back to the caller when the guard fails so the
    /// caller decides what to do with it; nothing is removed in that case.
    pub(crate) fn replace_placeholder(
        &mut self,
        placeholder_id: MessageId,
        replacement: Message,
    ) -> Result<(), Message> {
        match self.messages.last_mut() {
            Some(last) if last.id() == placeholder_id && last.is_loading_placeholder() => {
                *last = replacement;
                Ok(())
            }
            _ => Err(replacement),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.messages.clear();
    }
}
