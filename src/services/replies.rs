use crate::core::card::{CardType, EmailCard};

/// Short reply suggestions for a card. Canned: no AI backend is assumed to
/// exist, so suggestions come from fixed per-category sets.
pub trait SmartReplies: Send + Sync {
    fn replies_for(&self, card: &EmailCard) -> Vec<String>;
}

/// One-line summary of a card for list rows and notifications.
pub trait Summarizer: Send + Sync {
    fn summarize(&self, card: &EmailCard) -> String;
}

pub struct CannedReplies;

impl SmartReplies for CannedReplies {
    fn replies_for(&self, card: &EmailCard) -> Vec<String> {
        let replies: &[&str] = match card.card_type {
            CardType::Event => &[
                "I'll be there!",
                "Sorry, I can't make it.",
                "Let me check my calendar and get back to you.",
            ],
            CardType::Billing => &[
                "Payment is on its way.",
                "Can you resend the invoice?",
                "I have a question about this charge.",
            ],
            CardType::Delivery => &[
                "Thanks for the update!",
                "Can you hold the package at the depot?",
            ],
            CardType::Security => &[
                "This was me.",
                "This wasn't me, please secure my account.",
            ],
            _ => &["Thanks!", "Got it.", "I'll take a look."],
        };
        replies.iter().map(|r| r.to_string()).collect()
    }
}

/// Summarizes by truncating: the card's summary field when present, else the
/// head of the body.
pub struct TruncatingSummarizer {
    pub max_chars: usize,
}

impl Default for TruncatingSummarizer {
    fn default() -> Self {
        Self { max_chars: 140 }
    }
}

impl Summarizer for TruncatingSummarizer {
    fn summarize(&self, card: &EmailCard) -> String {
        let source = if card.summary.trim().is_empty() {
            &card.body
        } else {
            &card.summary
        };
        let mut out: String = source.chars().take(self.max_chars).collect();
        if source.chars().count() > self.max_chars {
            out.push('…');
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
