use serde::Deserialize;
use teloxide::utils::html;

/// How replies are rendered before sending
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReplyFormat {
    #[default]
    Plain,
    Html,
}

impl std::fmt::Display for ReplyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplyFormat::Plain => write!(f, "plain"),
            ReplyFormat::Html => write!(f, "html"),
        }
    }
}

/// The value half of a labeled reply line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A numeric id, or a placeholder when the id is unknown
    Id(String),
    /// Free text such as a chat title or a sender name
    Text(String),
    /// A username, rendered with a leading `@`
    Handle(String),
}

impl Value {
    pub fn id(id: i64) -> Self {
        Value::Id(id.to_string())
    }

    pub fn id_or_unknown(id: Option<i64>) -> Self {
        match id {
            Some(id) => Value::id(id),
            None => Value::Id("Unknown".to_string()),
        }
    }
}

/// One labeled line of a reply, e.g. `Your user ID: 42`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub emoji: &'static str,
    pub label: &'static str,
    pub value: Value,
}

impl Line {
    pub fn new(emoji: &'static str, label: &'static str, value: Value) -> Self {
        Self {
            emoji,
            label,
            value,
        }
    }
}

impl ReplyFormat {
    /// Render a titled block of lines.
    ///
    /// Plain replies are just the lines. HTML replies get a bold title,
    /// emoji-prefixed bold labels, and ids in `<code>`.
    pub fn render(&self, title: &str, lines: &[Line]) -> String {
        match self {
            ReplyFormat::Plain => lines
                .iter()
                .map(|line| format!("{}: {}", line.label, plain_value(&line.value)))
                .collect::<Vec<_>>()
                .join("\n"),
            ReplyFormat::Html => {
                let body = lines
                    .iter()
                    .map(|line| {
                        format!(
                            "<b>{} {}:</b> {}",
                            line.emoji,
                            line.label,
                            html_value(&line.value)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("<b>{}</b>\n\n{}", title, body)
            }
        }
    }

    pub fn error(&self, text: &str) -> String {
        match self {
            ReplyFormat::Plain => format!("Error: {}", text),
            ReplyFormat::Html => format!("<b>⚠️ Error:</b> {}", html::escape(text)),
        }
    }

    pub fn help_text(&self) -> &'static str {
        match self {
            ReplyFormat::Plain => HELP_PLAIN,
            ReplyFormat::Html => HELP_HTML,
        }
    }
}

fn plain_value(value: &Value) -> String {
    match value {
        Value::Id(id) => id.clone(),
        Value::Text(text) => text.clone(),
        Value::Handle(name) => format!("@{}", name),
    }
}

fn html_value(value: &Value) -> String {
    match value {
        Value::Id(id) => html::code_inline(id),
        Value::Text(text) => html::escape(text),
        Value::Handle(name) => format!("@{}", html::escape(name)),
    }
}

const HELP_PLAIN: &str = "Bot Information\n\n\
I will send you your telegram user ID, current chat ID and sender ID or chat ID of forwarded message.\n\n\
What is User ID?\n\
User ID is your unique identifier in telegram, which you can use in your telegram bot. \
Read more: https://core.telegram.org/bots/api#user\n\n\
Available Commands:\n\
• /start - Get your user ID and current chat ID\n\
• /help - Show this help message\n\n\
Tip: You can also forward any message to me to get the sender's ID and original chat ID.";

const HELP_HTML: &str = "<b>📱 Bot Information</b>\n\n\
I will send you your telegram user ID, current chat ID and sender ID or chat ID of forwarded message.\n\n\
<b>ℹ️ What is User ID?</b>\n\
User ID is your unique identifier in telegram, which you can use in your telegram bot. \
Read more: https://core.telegram.org/bots/api#user\n\n\
<b>📋 Available Commands:</b>\n\
• /start - Get your user ID and current chat ID\n\
• /help - Show this help message\n\n\
<b>💡 Tip:</b> You can also forward any message to me to get the sender's ID and original chat ID.";
