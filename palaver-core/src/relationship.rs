//! Relationship — one person's evolving belief about another.

use serde::{Deserialize, Serialize};

use crate::conversation::Conversation;
use crate::types::PersonHandle;

/// Perceived identity before any conversation has revised it.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Affect before any conversation has revised it.
pub const NEUTRAL_AFFECT: &str = "neutral";

/// One person's belief about a specific other person.
///
/// Exactly one relationship exists per (owner, target) pair, created lazily
/// on first contact and never removed. Only the owner's belief-revision step
/// mutates it, at most once per completed conversation with that target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// The other person this belief is about.
    pub target: PersonHandle,
    /// Who the owner currently thinks the target is.
    pub perceived_identity: String,
    /// Free-form sentiment label toward the target.
    pub affect: String,
    /// Completed conversation snapshots, in chronological order.
    pub conversation_history: Vec<Conversation>,
}

impl Relationship {
    /// Create a fresh relationship with sentinel beliefs.
    #[must_use]
    pub fn new(target: PersonHandle) -> Self {
        Self {
            target,
            perceived_identity: UNKNOWN_IDENTITY.to_string(),
            affect: NEUTRAL_AFFECT.to_string(),
            conversation_history: Vec::new(),
        }
    }

    /// Overwrite both belief fields from a parsed oracle report.
    ///
    /// Full replacement, never a merge.
    pub fn apply(&mut self, report: BeliefReport) {
        self.perceived_identity = report.identity;
        self.affect = report.affect;
    }

    /// How many conversations with the target have completed.
    #[must_use]
    pub fn conversation_count(&self) -> usize {
        self.conversation_history.len()
    }
}

/// The two-field JSON object a belief-revision reply must parse as.
///
/// The expected reply shape is held as an explicit record type and validated
/// eagerly at the oracle boundary — a reply missing either field never
/// reaches the relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeliefReport {
    /// Revised perceived identity of the interlocutor.
    pub identity: String,
    /// Revised sentiment label toward the interlocutor.
    pub affect: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PersonId;

    fn target() -> PersonHandle {
        PersonHandle::new(PersonId::new(), "Brendan")
    }

    #[test]
    fn new_relationship_has_sentinel_beliefs() {
        let relationship = Relationship::new(target());
        assert_eq!(relationship.perceived_identity, UNKNOWN_IDENTITY);
        assert_eq!(relationship.affect, NEUTRAL_AFFECT);
        assert_eq!(relationship.conversation_count(), 0);
    }

    #[test]
    fn apply_replaces_both_fields() {
        let mut relationship = Relationship::new(target());
        relationship.apply(BeliefReport {
            identity: "a cautious merchant".into(),
            affect: "wary".into(),
        });

        assert_eq!(relationship.perceived_identity, "a cautious merchant");
        assert_eq!(relationship.affect, "wary");
    }

    #[test]
    fn belief_report_requires_both_fields() {
        let full: Result<BeliefReport, _> =
            serde_json::from_str(r#"{"identity": "a dancer", "affect": "curious"}"#);
        assert!(full.is_ok());

        let partial: Result<BeliefReport, _> = serde_json::from_str(r#"{"identity": "a dancer"}"#);
        assert!(partial.is_err());
    }
}
