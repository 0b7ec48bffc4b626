use tracing::debug;

use crate::event::{ForwardOrigin, InboundEvent, MessageContext};
use crate::platform::ReplySink;
use crate::reply::{Line, ReplyFormat, Value};

pub const MISSING_IDENTITY: &str = "Unable to get user or chat information.";

const START_TITLE: &str = "🎉 Welcome!";
const MESSAGE_TITLE: &str = "📊 Message Information";

/// Turns one inbound event into at most one reply.
///
/// Holds only the reply format, so a single instance is shared by every
/// concurrently running handler.
#[derive(Debug, Clone, Default)]
pub struct Responder {
    format: ReplyFormat,
}

impl Responder {
    pub fn new(format: ReplyFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ReplyFormat {
        self.format
    }

    /// Reply for `/start`: the caller's user id and the current chat id
    pub fn start_reply(&self, event: &InboundEvent) -> Option<String> {
        event.message.as_ref()?;

        let (Some(user), Some(chat)) = (&event.sender_user, &event.chat) else {
            debug!("/start without user or chat information");
            return Some(self.format.error(MISSING_IDENTITY));
        };

        let lines = [
            Line::new("👤", "Your user ID", Value::id(user.id)),
            Line::new("💬", "Current chat ID", Value::id(chat.id)),
        ];
        Some(self.format.render(START_TITLE, &lines))
    }

    pub fn help_reply(&self, event: &InboundEvent) -> Option<String> {
        event.message.as_ref()?;
        Some(self.format.help_text().to_string())
    }

    /// Reply for a regular message: ids of the sender and chat, plus
    /// whatever forward, reply and sender-chat details the message carries.
    pub fn message_reply(&self, event: &InboundEvent) -> Option<String> {
        let message = event.message.as_ref()?;
        let lines = message_lines(event, message);
        Some(self.format.render(MESSAGE_TITLE, &lines))
    }

    pub async fn handle_start<S: ReplySink>(
        &self,
        event: &InboundEvent,
        sink: &S,
    ) -> Result<(), S::Error> {
        send(sink, self.start_reply(event)).await
    }

    pub async fn handle_help<S: ReplySink>(
        &self,
        event: &InboundEvent,
        sink: &S,
    ) -> Result<(), S::Error> {
        send(sink, self.help_reply(event)).await
    }

    pub async fn handle_message<S: ReplySink>(
        &self,
        event: &InboundEvent,
        sink: &S,
    ) -> Result<(), S::Error> {
        send(sink, self.message_reply(event)).await
    }
}

async fn send<S: ReplySink>(sink: &S, reply: Option<String>) -> Result<(), S::Error> {
    match reply {
        Some(text) => sink.reply(text).await,
        None => {
            debug!("Update carries no message, not replying");
            Ok(())
        }
    }
}

fn message_lines(event: &InboundEvent, message: &MessageContext) -> Vec<Line> {
    let user_id = event.sender_user.as_ref().map(|user| user.id);
    let chat_id = event.chat.map(|chat| chat.id);

    let mut lines = vec![
        Line::new("👤", "Your user ID", Value::id_or_unknown(user_id)),
        Line::new("💬", "Current chat ID", Value::id_or_unknown(chat_id)),
    ];

    match &message.forward_origin {
        Some(ForwardOrigin::User(user)) => {
            lines.push(Line::new("↪️", "Forwarded from user ID", Value::id(user.id)));
            if let Some(username) = &user.username {
                lines.push(Line::new(
                    "👤",
                    "Forwarded from username",
                    Value::Handle(username.clone()),
                ));
            }
        }
        Some(ForwardOrigin::Chat {
            id,
            title,
            username,
        }) => {
            lines.push(Line::new("↪️", "Forwarded from chat ID", Value::id(*id)));
            lines.push(Line::new(
                "📢",
                "Forwarded from chat title",
                Value::Text(title.clone()),
            ));
            if let Some(username) = username {
                lines.push(Line::new(
                    "📢",
                    "Forwarded from chat username",
                    Value::Handle(username.clone()),
                ));
            }
        }
        Some(ForwardOrigin::HiddenUser(name)) => {
            lines.push(Line::new(
                "↪️",
                "Forwarded from sender name",
                Value::Text(name.clone()),
            ));
        }
        None => {}
    }

    if let Some(replied_to) = message.reply_to.as_ref().and_then(|r| r.from_user.as_ref()) {
        lines.push(Line::new("↩️", "Replying to user ID", Value::id(replied_to.id)));
        if let Some(username) = &replied_to.username {
            lines.push(Line::new(
                "👤",
                "Replying to username",
                Value::Handle(username.clone()),
            ));
        }
    }

    if let Some(sender) = &message.explicit_sender {
        // With no effective sender there is nothing the explicit one could
        // match, so it is always shown.
        if !matches!(user_id, Some(id) if id == sender.id) {
            lines.push(Line::new("📨", "Message sender ID", Value::id(sender.id)));
            if let Some(username) = &sender.username {
                lines.push(Line::new(
                    "👤",
                    "Message sender username",
                    Value::Handle(username.clone()),
                ));
            }
        }
    }

    lines
}
