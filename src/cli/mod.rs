use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Telegram bot token used for outbound Bot API calls.
    #[arg(long, env = "TELEGRAM_TOKEN", default_value = "")]
    pub telegram_token: String,

    /// Base URL for the Telegram Bot API.
    #[arg(long, env = "TELEGRAM_BASE_URL")]
    pub telegram_base_url: Option<String>,

    /// API key for the Groq chat completion API.
    #[arg(long, env = "GROQ_API_KEY", default_value = "")]
    pub groq_api_key: String,

    /// Model name for chat completion.
    #[arg(long, env = "GROQ_MODEL", default_value = "llama3-70b-8192")]
    pub groq_model: String,

    /// Base URL for the Groq API.
    #[arg(long, env = "GROQ_BASE_URL")]
    pub groq_base_url: Option<String>,

    /// Port the webhook server listens on.
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Optional path to a JSON file replacing the built-in knowledge table.
    #[arg(long, env = "KNOWLEDGE_PATH")]
    pub knowledge_path: Option<String>,
}
