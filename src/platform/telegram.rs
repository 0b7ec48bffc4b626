use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageEntityKind, ParseMode};
use teloxide::utils::command::BotCommands;
use tracing::{debug, info, warn};

use crate::event::InboundEvent;
use crate::platform::ReplySink;
use crate::reply::ReplyFormat;
use crate::responder::Responder;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "Get your user ID and current chat ID")]
    Start,
    #[command(description = "Show this help message")]
    Help,
}

/// Sends replies into the chat the triggering message came from
pub struct TelegramReply {
    bot: Bot,
    chat_id: ChatId,
    format: ReplyFormat,
}

impl TelegramReply {
    pub fn new(bot: Bot, msg: &Message, format: ReplyFormat) -> Self {
        Self {
            bot,
            chat_id: msg.chat.id,
            format,
        }
    }
}

#[async_trait]
impl ReplySink for TelegramReply {
    type Error = teloxide::RequestError;

    async fn reply(&self, text: String) -> Result<(), Self::Error> {
        let request = self.bot.send_message(self.chat_id, text);
        match self.format {
            ReplyFormat::Plain => request.await?,
            ReplyFormat::Html => request.parse_mode(ParseMode::Html).await?,
        };
        Ok(())
    }
}

/// Text messages that do not open with a bot command. Unknown `/commands`
/// are left alone, while text that merely starts with `/` still counts.
fn is_plain_text(msg: &Message) -> bool {
    if msg.text().is_none() {
        return false;
    }

    let starts_with_command = msg.entities().is_some_and(|entities| {
        entities
            .iter()
            .any(|e| e.offset == 0 && matches!(e.kind, MessageEntityKind::BotCommand))
    });
    !starts_with_command
}

/// Run the Telegram bot platform
pub async fn run(bot: Bot, responder: Arc<Responder>) -> Result<()> {
    info!("Starting Telegram platform...");

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(dptree::filter(|msg: Message| is_plain_text(&msg)).endpoint(handle_text));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![responder])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("telegram"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_command(
    bot: Bot,
    upd: Update,
    msg: Message,
    cmd: Command,
    responder: Arc<Responder>,
) -> ResponseResult<()> {
    info!("Command {:?} in chat {}", cmd, msg.chat.id.0);

    let event = InboundEvent::from_update(&upd);
    let sink = TelegramReply::new(bot, &msg, responder.format());

    match cmd {
        Command::Start => responder.handle_start(&event, &sink).await,
        Command::Help => responder.handle_help(&event, &sink).await,
    }
}

async fn handle_text(
    bot: Bot,
    upd: Update,
    msg: Message,
    responder: Arc<Responder>,
) -> ResponseResult<()> {
    debug!(
        "Message {} in chat {} (forwarded: {})",
        msg.id.0,
        msg.chat.id.0,
        msg.forward_origin().is_some()
    );

    let event = InboundEvent::from_update(&upd);
    let sink = TelegramReply::new(bot, &msg, responder.format());
    responder.handle_message(&event, &sink).await
}
