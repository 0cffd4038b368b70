pub mod client;
pub mod dispatcher;
pub mod types;

pub use client::{TelegramBot, TelegramError};
pub use dispatcher::UpdateDispatcher;
pub use types::{Chat, Message, Update, User};
