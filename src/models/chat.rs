/// A conversation partner in the chat list
#[derive(Debug, Clone)]
pub struct Chat {
    pub id: i64,
    pub name: String,
    pub last_message: String,
    /// Display label, not a timestamp: "12:45", "Yesterday", ...
    pub time: String,
    pub unread: u32,
    pub encrypted: bool,
    /// Short avatar tag rendered in place of a picture
    pub avatar: String,
}

impl Chat {
    pub fn has_unread(&self) -> bool {
        self.unread > 0
    }
}

/// One message bubble in a conversation
#[derive(Debug, Clone)]
pub struct Message {
    pub outgoing: bool,
    pub text: String,
    pub time: String,
}
