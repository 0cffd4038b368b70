use log::info;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use thiserror::Error;

/// Built-in question/answer pairs for the academy. Keys are matched
/// verbatim against incoming message text.
static BUILTIN_FAQ: Lazy<HashMap<String, String>> = Lazy::new(|| {
    [
        (
            "ما هي أكاديمية الماهرون؟",
            "هي أكاديمية لتحفيظ وتعليم القرآن الكريم أونلاين، بدأت عام 2022.",
        ),
        (
            "هل يوجد تجربة مجانية؟",
            "نعم، الأكاديمية توفر حصة تجريبية مجانية تمامًا.",
        ),
        (
            "هل الحصص فردية أم جماعية؟",
            "كل الحصص فردية وخاصة بين الطالب والمعلم.",
        ),
        (
            "ما هي الأسعار؟",
            "تختلف حسب عدد الأيام والأوقات. تواصل معنا لتحديد السعر المناسب.",
        ),
        (
            "هل توجد شهادات؟",
            "نعم، يحصل الطالب على شهادة بعد اجتياز المستوى.",
        ),
    ]
    .into_iter()
    .map(|(q, a)| (q.to_string(), a.to_string()))
    .collect()
});

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("knowledge file IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("knowledge file JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fixed mapping from literal question text to literal answer text,
/// populated once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: HashMap<String, String>,
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            entries: BUILTIN_FAQ.clone(),
        }
    }
}

impl KnowledgeBase {
    /// Load the table from an optional JSON file, falling back to the
    /// built-in entries when no path is given.
    pub fn load(path: Option<&str>) -> Result<Self, KnowledgeError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, KnowledgeError> {
        let content = fs::read_to_string(path)?;
        let base = Self::from_json(&content)?;
        info!("loaded {} knowledge entries from {}", base.len(), path);
        Ok(base)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, String> = serde_json::from_str(content)?;
        Ok(Self { entries })
    }

    /// Exact, case-sensitive, whitespace-sensitive lookup. Near-miss
    /// phrasing deliberately returns `None`.
    pub fn lookup(&self, question: &str) -> Option<&str> {
        self.entries.get(question).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
