//! Canned-response assistant
//!
//! No inference happens here. A message is routed to one of a fixed set of
//! replies by keyword, and anything unmatched gets a reply picked by a
//! stable hash of the message.

use regex::Regex;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Fixed reply set
pub const RESPONSES: [&str; 5] = [
    "Based on your spending patterns, I notice you've been spending more on dining out this month. \
     Would you like me to suggest some budget-friendly meal planning strategies?",
    "I can see your income has been consistent. Let me analyze your expense categories to find \
     potential savings opportunities.",
    "Your emergency fund is looking good! You're on track to reach your savings goal by the end \
     of the quarter.",
    "I've noticed some unusual transactions. Would you like me to help categorize them or flag \
     any potential issues?",
    "Your budget adherence has improved by 15% this month. Great job! Here are some tips to \
     maintain this momentum.",
];

/// Keyword routes, checked in order; the first match wins
fn routes() -> &'static [(Regex, usize)] {
    static ROUTES: once_cell::sync::OnceCell<Vec<(Regex, usize)>> = once_cell::sync::OnceCell::new();
    ROUTES.get_or_init(|| {
        [
            (r"(?i)\b(emergency|goals?|fund)\b", 2),
            (r"(?i)\b(unusual|suspicious|fraud|flag(ged)?|categori[sz]e)\b", 3),
            (r"(?i)\b(budgets?|adherence|limits?)\b", 4),
            (r"(?i)\b(dining|food|restaurants?|eat(ing)?|spend(ing)?)\b", 0),
            (r"(?i)\b(income|salary|savings?|earn(ings)?)\b", 1),
        ]
        .into_iter()
        .filter_map(|(pattern, index)| Regex::new(pattern).ok().map(|re| (re, index)))
        .collect()
    })
}

fn hashed_index(message: &str) -> usize {
    let mut hasher = DefaultHasher::new();
    message.hash(&mut hasher);
    (hasher.finish() % RESPONSES.len() as u64) as usize
}

/// Reply to a user message. The same message always gets the same reply.
pub fn reply(message: &str) -> &'static str {
    let message = message.trim();

    let index = routes()
        .iter()
        .find(|(re, _)| re.is_match(message))
        .map(|(_, index)| *index)
        .unwrap_or_else(|| hashed_index(message));

    log::debug!("Assistant routed message to reply {}", index);
    RESPONSES[index]
}
