//! Swipe actions and the append-only event log entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a feed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Dislike,
}

/// One recorded swipe. Events are append-only and never replayed to derive
/// state; they exist for audit and analytics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeEvent {
    pub paper_id: String,
    pub action: SwipeAction,
    pub timestamp: DateTime<Utc>,
}

impl SwipeEvent {
    /// Record an action against a paper, timestamped now.
    pub fn now(paper_id: impl Into<String>, action: SwipeAction) -> Self {
        Self {
            paper_id: paper_id.into(),
            action,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SwipeAction::Like).unwrap(), "\"like\"");
        let back: SwipeAction = serde_json::from_str("\"dislike\"").unwrap();
        assert_eq!(back, SwipeAction::Dislike);
    }

    #[test]
    fn event_round_trip() {
        let event = SwipeEvent::now("p1", SwipeAction::Like);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"paperId\""));
        let back: SwipeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
