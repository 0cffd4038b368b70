use crate::config::KnowledgeBase;
use crate::llm::chat::ChatClient;

use log::{error, info};
use std::sync::Arc;

/// Reply used when the completion API key is not configured.
pub const MISSING_KEY_REPLY: &str = "عذراً، مفتاح Groq API غير متاح. يرجى إبلاغ الإدارة.";

/// Decides the reply for one message: exact lookup in the knowledge
/// table, else one chat completion. Stateless across messages.
pub struct Responder {
    knowledge: KnowledgeBase,
    chat_client: Option<Arc<dyn ChatClient>>,
}

impl Responder {
    pub fn new(knowledge: KnowledgeBase, chat_client: Option<Arc<dyn ChatClient>>) -> Self {
        Self {
            knowledge,
            chat_client,
        }
    }

    /// Never fails: completion errors are logged and turned into a
    /// user-displayable apology here.
    pub async fn resolve(&self, text: &str) -> String {
        if let Some(answer) = self.knowledge.lookup(text) {
            info!("reply served from the local knowledge base");
            return answer.to_string();
        }

        info!("no knowledge entry matched, asking Groq");
        self.ask_groq(text).await
    }

    async fn ask_groq(&self, prompt: &str) -> String {
        let Some(client) = &self.chat_client else {
            error!("GROQ_API_KEY is not set, cannot call the Groq API");
            return MISSING_KEY_REPLY.to_string();
        };

        match client.complete(prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Groq API call failed: {e}");
                format!("عذراً، حدث خطأ أثناء التواصل مع Groq AI: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::CompletionError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClient {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl ChatClient for CountingClient {
        async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CompletionError::EmptyResponse)
            } else {
                Ok("generated reply".to_string())
            }
        }

        fn model(&self) -> &str {
            "counting"
        }
    }

    fn responder_with(fail: bool) -> (Responder, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let client = CountingClient {
            calls: calls.clone(),
            fail,
        };
        (
            Responder::new(KnowledgeBase::default(), Some(Arc::new(client))),
            calls,
        )
    }

    #[tokio::test]
    async fn knowledge_hit_answers_without_completion_call() {
        let (responder, calls) = responder_with(false);
        let reply = responder.resolve("ما هي الأسعار؟").await;
        assert_eq!(
            reply,
            "تختلف حسب عدد الأيام والأوقات. تواصل معنا لتحديد السعر المناسب."
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn near_miss_falls_through_to_completion_once() {
        let (responder, calls) = responder_with(false);
        // Same question without the question mark.
        let reply = responder.resolve("ما هي الأسعار").await;
        assert_eq!(reply, "generated reply");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_client_returns_fixed_notice() {
        let responder = Responder::new(KnowledgeBase::default(), None);
        let reply = responder.resolve("سؤال غير معروف").await;
        assert_eq!(reply, MISSING_KEY_REPLY);
    }

    #[tokio::test]
    async fn completion_failure_becomes_apology_string() {
        let (responder, calls) = responder_with(true);
        let reply = responder.resolve("سؤال غير معروف").await;
        assert!(reply.starts_with("عذراً"));
        assert!(!reply.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
