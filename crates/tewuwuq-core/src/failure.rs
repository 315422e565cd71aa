//! Classification of AI call failures into user-facing messages.

use tewuwuq_types::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Authentication,
    Generic,
}

const TIMEOUT_MARKERS: &[&str] = &["timeout", "timed out", "deadline", "504"];
const AUTH_MARKERS: &[&str] = &[
    "api key",
    "api_key",
    "unauthorized",
    "unauthenticated",
    "authentication",
    "permission denied",
    "401",
    "403",
];

impl FailureKind {
    /// Classify by inspecting the error text
    pub fn classify(err: &ChatError) -> Self {
        if matches!(err, ChatError::Timeout(_)) {
            return FailureKind::Timeout;
        }
        let text = err.to_string().to_lowercase();
        if TIMEOUT_MARKERS.iter().any(|m| text.contains(m)) {
            FailureKind::Timeout
        } else if AUTH_MARKERS.iter().any(|m| text.contains(m)) {
            FailureKind::Authentication
        } else {
            FailureKind::Generic
        }
    }

    /// Text for the chat bubble recorded in the conversation
    pub fn bubble_text(&self) -> &'static str {
        match self {
            FailureKind::Timeout => {
                "ይቅርታ፣ የ AI ምላሽ ጊዜው አልፏል። እባክዎ እንደገና ይሞክሩ። \
                 (The AI took too long to respond. Please try again.)"
            }
            FailureKind::Authentication => {
                "ይቅርታ፣ ከ AI አገልግሎቱ ጋር መገናኘት አልተቻለም። የ API ቁልፉን ያረጋግጡ። \
                 (Could not authenticate with the AI service. Check the API key.)"
            }
            FailureKind::Generic => {
                "ይቅርታ፣ ስህተት ተፈጥሯል። እባክዎ እንደገና ይሞክሩ። \
                 (Something went wrong. Please try again.)"
            }
        }
    }

    /// Short description for the toast
    pub fn notice_text(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "The AI request timed out. Please try again.",
            FailureKind::Authentication => "AI authentication failed. Check the API key in settings.",
            FailureKind::Generic => "Failed to get a response from the AI. Please try again.",
        }
    }
}
