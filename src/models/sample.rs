//! Sample content for the messenger views.
//!
//! The product has no transport; every list in the shell is populated from
//! these fixtures.

use super::{Call, CallDirection, Chat, Message};

pub fn chats() -> Vec<Chat> {
    vec![
        Chat {
            id: 1,
            name: "Anonymous #4782".to_string(),
            last_message: "Message is encrypted end-to-end".to_string(),
            time: "12:45".to_string(),
            unread: 3,
            encrypted: true,
            avatar: "A4".to_string(),
        },
        Chat {
            id: 2,
            name: "Anonymous #8932".to_string(),
            last_message: "Hey! How are you?".to_string(),
            time: "11:20".to_string(),
            unread: 0,
            encrypted: true,
            avatar: "A8".to_string(),
        },
        Chat {
            id: 3,
            name: "Anonymous #2341".to_string(),
            last_message: "Great, thanks!".to_string(),
            time: "Yesterday".to_string(),
            unread: 1,
            encrypted: true,
            avatar: "A2".to_string(),
        },
        Chat {
            id: 4,
            name: "Anonymous #9871".to_string(),
            last_message: "Meet tomorrow?".to_string(),
            time: "2 days ago".to_string(),
            unread: 0,
            encrypted: true,
            avatar: "A9".to_string(),
        },
    ]
}

pub fn calls() -> Vec<Call> {
    vec![
        Call {
            id: 1,
            name: "Anonymous #4782".to_string(),
            direction: CallDirection::Incoming,
            time: "Today 14:30".to_string(),
            duration: Some("15:43".to_string()),
            avatar: "A4".to_string(),
        },
        Call {
            id: 2,
            name: "Anonymous #8932".to_string(),
            direction: CallDirection::Outgoing,
            time: "Yesterday 18:22".to_string(),
            duration: Some("05:12".to_string()),
            avatar: "A8".to_string(),
        },
        Call {
            id: 3,
            name: "Anonymous #2341".to_string(),
            direction: CallDirection::Missed,
            time: "3 days ago".to_string(),
            duration: None,
            avatar: "A2".to_string(),
        },
    ]
}

/// The conversation shown in the chat window
pub fn conversation() -> Vec<Message> {
    vec![
        Message {
            outgoing: false,
            text: "Hey! How are you?".to_string(),
            time: "10:30".to_string(),
        },
        Message {
            outgoing: true,
            text: "Doing great, thanks for asking!".to_string(),
            time: "10:32".to_string(),
        },
        Message {
            outgoing: false,
            text: "I'd like to discuss something important. Do you have a minute?".to_string(),
            time: "12:45".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::avatar_tag;

    #[test]
    fn test_avatar_tags_match_ids() {
        for chat in chats() {
            let id = chat.name.trim_start_matches("Anonymous ");
            assert_eq!(chat.avatar, avatar_tag(id));
        }
    }

    #[test]
    fn test_every_call_partner_is_a_chat_partner() {
        let chat_names: Vec<String> = chats().into_iter().map(|c| c.name).collect();
        for call in calls() {
            assert!(chat_names.contains(&call.name));
        }
    }
}
