use std::num::TryFromIntError;

use teloxide::types::{Chat, Message, MessageOrigin, Update, UpdateKind, User};
use tracing::warn;

/// A user or chat identity as shown in replies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub username: Option<String>,
}

impl Identity {
    pub fn new(id: i64, username: Option<&str>) -> Self {
        Self {
            id,
            username: username.map(str::to_string),
        }
    }
}

impl TryFrom<&User> for Identity {
    type Error = TryFromIntError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        Ok(Self::new(i64::try_from(user.id.0)?, user.username.as_deref()))
    }
}

/// Telegram user ids fit in 52 bits. One that does not fit in `i64` is
/// reported as unknown rather than wrapped.
fn user_identity(user: &User) -> Option<Identity> {
    match Identity::try_from(user) {
        Ok(identity) => Some(identity),
        Err(e) => {
            warn!("User id {} out of range: {}", user.id.0, e);
            None
        }
    }
}

impl From<&Chat> for Identity {
    fn from(chat: &Chat) -> Self {
        Self::new(chat.id.0, chat.username())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatRef {
    pub id: i64,
}

/// Where a forwarded message originally came from.
///
/// Telegram reports exactly one origin per forwarded message, so this is an
/// enum rather than three independent optional fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOrigin {
    /// Forwarded from a user who allows linking to their account
    User(Identity),
    /// Forwarded from a channel, or from a group posting as itself
    Chat {
        id: i64,
        title: String,
        username: Option<String>,
    },
    /// Forwarded from a user who hides their account; only the name is known
    HiddenUser(String),
}

impl ForwardOrigin {
    pub fn from_origin(origin: &MessageOrigin) -> Option<Self> {
        match origin {
            MessageOrigin::User { sender_user, .. } => user_identity(sender_user).map(Self::User),
            MessageOrigin::HiddenUser {
                sender_user_name, ..
            } => Some(Self::HiddenUser(sender_user_name.clone())),
            MessageOrigin::Chat { sender_chat, .. } => Some(Self::from_chat(sender_chat)),
            MessageOrigin::Channel { chat, .. } => Some(Self::from_chat(chat)),
        }
    }

    fn from_chat(chat: &Chat) -> Self {
        Self::Chat {
            id: chat.id.0,
            title: chat.title().unwrap_or_default().to_string(),
            username: chat.username().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyContext {
    pub from_user: Option<Identity>,
}

/// Message-level fields, present only for message updates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageContext {
    pub forward_origin: Option<ForwardOrigin>,
    pub reply_to: Option<ReplyContext>,
    /// The identity the message was posted as. Differs from the effective
    /// sender for anonymous admins and channel posts in linked groups.
    pub explicit_sender: Option<Identity>,
}

impl From<&Message> for MessageContext {
    fn from(msg: &Message) -> Self {
        Self {
            forward_origin: msg.forward_origin().and_then(ForwardOrigin::from_origin),
            reply_to: msg.reply_to_message().map(|reply| ReplyContext {
                from_user: reply.from.as_ref().and_then(user_identity),
            }),
            explicit_sender: msg.sender_chat.as_ref().map(Identity::from),
        }
    }
}

/// Read-only view of one inbound update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundEvent {
    pub sender_user: Option<Identity>,
    pub chat: Option<ChatRef>,
    pub message: Option<MessageContext>,
}

impl InboundEvent {
    pub fn from_update(update: &Update) -> Self {
        let message = match &update.kind {
            UpdateKind::Message(msg) => Some(MessageContext::from(msg)),
            _ => None,
        };

        Self {
            sender_user: update.from().and_then(user_identity),
            chat: update.chat().map(|chat| ChatRef { id: chat.id.0 }),
            message,
        }
    }
}
