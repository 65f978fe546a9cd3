//! Bounded model context
//!
//! History sent upstream is cut to an approximate token budget, newest
//! messages first.

use crate::models::{Message, Role};

pub const DEFAULT_TOKEN_BUDGET: usize = 3000;

/// Approximate token count for a message
pub trait TokenEstimator: Send + Sync {
    fn estimate(&self, message: &Message) -> usize;
}

/// Characters-per-token heuristic plus a fixed per-message overhead
#[derive(Debug, Clone, Copy)]
pub struct CharRatioEstimator {
    pub chars_per_token: usize,
    pub message_overhead: usize,
}

impl Default for CharRatioEstimator {
    fn default() -> Self {
        Self {
            chars_per_token: 4,
            message_overhead: 4,
        }
    }
}

impl TokenEstimator for CharRatioEstimator {
    fn estimate(&self, message: &Message) -> usize {
        let chars = message.content.chars().count();
        chars.div_ceil(self.chars_per_token.max(1)) + self.message_overhead
    }
}

/// Longest suffix of `history` whose estimated size fits `budget`
///
/// The newest message is always kept, even when it alone is over budget.
/// Leading assistant messages are dropped so the window opens on a user turn.
pub fn trim<'a>(
    history: &'a [Message],
    budget: usize,
    estimator: &dyn TokenEstimator,
) -> &'a [Message] {
    if history.is_empty() {
        return history;
    }

    let mut start = history.len() - 1;
    let mut used = estimator.estimate(&history[start]);

    while start > 0 {
        let cost = estimator.estimate(&history[start - 1]);
        if used + cost > budget {
            break;
        }
        used += cost;
        start -= 1;
    }

    while start < history.len() - 1 && history[start].role == Role::Assistant {
        start += 1;
    }

    &history[start..]
}
