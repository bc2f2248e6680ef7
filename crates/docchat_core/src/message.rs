pub type MessageId = u64;

/// Caption shown while a chat call is outstanding.
pub const WORKING_CAPTION: &str = "Analyzing documents...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// One transcript entry. Assistant replies carry rendered markup; everything
/// else is plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    id: MessageId,
    role: Role,
    content: String,
    is_loading_placeholder: bool,
    sources: Vec<String>,
    retrieved_chunks: u32,
}

impl Message {
    pub(crate) fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self::plain(id, Role::User, content)
    }

    pub(crate) fn system(id: MessageId, content: impl Into<String>) -> Self {
        Self::plain(id, Role::System, content)
    }

    pub(crate) fn assistant(id: MessageId, content: impl Into<String>) -> Self {
        Self::plain(id, Role::Assistant, content)
    }

    /// Placeholders are always assistant-authored and never carry sources.
    pub(crate) fn loading_placeholder(id: MessageId) -> Self {
        Self {
            is_loading_placeholder: true,
            ..Self::plain(id, Role::Assistant, WORKING_CAPTION)
        }
    }

    pub(crate) fn assistant_reply(
        id: MessageId,
        markup: String,
        sources: Vec<String>,
        retrieved_chunks: u32,
    ) -> Self {
        Self {
            sources,
            retrieved_chunks,
            ..Self::plain(id, Role::Assistant, markup)
        }
    }

    fn plain(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            is_loading_placeholder: false,
            sources: Vec::new(),
            retrieved_chunks: 0,
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_loading_placeholder(&self) -> bool {
        self.is_loading_placeholder
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn retrieved_chunks(&self) -> u32 {
        self.retrieved_chunks
    }
}
