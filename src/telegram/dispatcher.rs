use log::{debug, info};

use super::client::{TelegramBot, TelegramError};
use super::types::Update;
use crate::agent::Responder;

/// Reply to the `/start` command.
pub const START_GREETING: &str =
    "مرحباً بك في بوت أكاديمية الماهرون لتحفيظ القرآن الكريم! 🌙\nاكتب سؤالك وسنقوم بالرد عليك.";

/// Routes one webhook update: `/start` gets the fixed greeting, other
/// commands are ignored, plain text goes through the responder.
pub struct UpdateDispatcher {
    bot: TelegramBot,
    responder: Responder,
}

impl UpdateDispatcher {
    pub fn new(bot: TelegramBot, responder: Responder) -> Self {
        Self { bot, responder }
    }

    pub async fn process_update(&self, update: Update) -> Result<(), TelegramError> {
        let Some(message) = update.message else {
            debug!("update {} carries no message, ignoring", update.update_id);
            return Ok(());
        };
        let Some(text) = message.text.as_deref() else {
            debug!("message in chat {} has no text, ignoring", message.chat.id);
            return Ok(());
        };

        let text = text.trim();
        let chat_id = message.chat.id;

        if text.starts_with('/') {
            if is_start_command(text) {
                info!("/start received in chat {chat_id}");
                self.bot.send_message(chat_id, START_GREETING).await?;
            } else {
                debug!("ignoring unsupported command in chat {chat_id}: {text}");
            }
            return Ok(());
        }

        info!("new message in chat {chat_id}: {text}");
        let reply = self.responder.resolve(text).await;
        self.bot.send_message(chat_id, &reply).await?;
        info!("reply sent to chat {chat_id}");
        Ok(())
    }
}

fn is_start_command(text: &str) -> bool {
    text == "/start" || text.starts_with("/start@")
}
