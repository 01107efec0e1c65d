//! Error types for the Palaver core.

use thiserror::Error;

/// Top-level error type for core operations.
///
/// The core performs no local recovery: oracle failures and contract
/// violations surface to the caller unchanged, and no partial belief update
/// is ever committed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An utterance was attributed to someone who is not a party to the
    /// conversation. A programming-contract violation — fatal to the call,
    /// never silently dropped.
    #[error("Invalid speaker '{speaker}' for conversation between {conversation}")]
    InvalidSpeaker {
        /// Name of the out-of-conversation speaker.
        speaker: String,
        /// The two parties of the conversation.
        conversation: String,
    },

    /// A conversation was ended by a person who never started one.
    #[error("{person} has no active conversation to end")]
    NoActiveConversation {
        /// Name of the idle person.
        person: String,
    },

    /// The oracle call failed. Propagated uncaught; the core never retries.
    #[error("Oracle call failed: {0}")]
    Oracle(#[from] palaver_llm::OracleError),

    /// The belief-revision reply was not the expected two-field JSON object.
    /// Prior beliefs are left untouched.
    #[error("Malformed belief reply ({reason}): '{raw}'")]
    MalformedBeliefReply {
        /// Why parsing failed.
        reason: String,
        /// The raw reply text, for diagnostics.
        raw: String,
    },
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, CoreError>;
