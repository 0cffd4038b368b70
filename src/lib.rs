pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod server;
pub mod telegram;

use agent::Responder;
use cli::Args;
use config::KnowledgeBase;
use llm::chat::{new_client, ChatClient};
use llm::LlmConfig;
use log::{info, warn};
use server::{AppState, Server};
use std::error::Error;
use std::sync::Arc;
use telegram::{TelegramBot, UpdateDispatcher};

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Listen Port: {}", args.port);
    info!("Groq Model: {}", args.groq_model);
    info!("Telegram Token Set: {}", !args.telegram_token.is_empty());
    info!("Groq API Key Set: {}", !args.groq_api_key.is_empty());
    if let Some(path) = &args.knowledge_path {
        info!("Knowledge Path: {}", path);
    }
    info!("-------------------------");

    let knowledge = KnowledgeBase::load(args.knowledge_path.as_deref())?;
    info!("Knowledge Entries: {}", knowledge.len());

    let chat_client: Option<Arc<dyn ChatClient>> = if args.groq_api_key.is_empty() {
        warn!("GROQ_API_KEY is not set; completion replies degrade to a fixed notice");
        None
    } else {
        let config = LlmConfig {
            api_key: Some(args.groq_api_key.clone()),
            model: args.groq_model.clone(),
            base_url: args.groq_base_url.clone(),
        };
        Some(new_client(&config)?)
    };

    let dispatcher = if args.telegram_token.is_empty() {
        warn!("TELEGRAM_TOKEN is not set; the webhook answers 500 until it is configured");
        None
    } else {
        let bot = TelegramBot::new(args.telegram_token.clone(), args.telegram_base_url.clone());

        match bot.get_me().await {
            Ok(me) => info!(
                "bot authenticated as @{}",
                me.username.as_deref().unwrap_or("unknown")
            ),
            Err(e) => warn!("could not verify the bot token: {e}"),
        }
        if let Err(e) = bot.set_my_commands().await {
            warn!("failed to register the /start command: {e}");
        }

        let responder = Responder::new(knowledge, chat_client);
        Some(Arc::new(UpdateDispatcher::new(bot, responder)))
    };

    let state = AppState {
        dispatcher,
        telegram_token_set: !args.telegram_token.is_empty(),
        groq_api_key_set: !args.groq_api_key.is_empty(),
    };

    let addr = format!("0.0.0.0:{}", args.port);
    let server = Server::new(addr, state);
    server.run().await
}
