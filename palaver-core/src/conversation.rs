//! Conversation — one side's ledger of a bounded two-party exchange.

use palaver_llm::prompt::FIRST_TURN_PROMPT;
use palaver_llm::types::ChatMessage;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::PersonHandle;

/// One bounded dialogue session, viewed from one participant's side.
///
/// Each participant instantiates its own mirror: `primary` is the owning
/// side, `secondary` the interlocutor. The two mirrors describing one
/// social interaction are never the same instance — every mutation stays
/// single-owner, which is what lets the core run without locking. Turns
/// alternate, so the two ledgers are always equal or differ by at most one
/// in length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    primary: PersonHandle,
    secondary: PersonHandle,
    primary_messages: Vec<String>,
    secondary_messages: Vec<String>,
}

impl Conversation {
    /// Start an empty conversation between `primary` (the owning side) and
    /// `secondary` (the interlocutor).
    #[must_use]
    pub fn new(primary: PersonHandle, secondary: PersonHandle) -> Self {
        Self {
            primary,
            secondary,
            primary_messages: Vec::new(),
            secondary_messages: Vec::new(),
        }
    }

    /// The owning side of this mirror.
    #[must_use]
    pub fn primary(&self) -> &PersonHandle {
        &self.primary
    }

    /// The interlocutor.
    #[must_use]
    pub fn secondary(&self) -> &PersonHandle {
        &self.secondary
    }

    /// Append an utterance attributed to `speaker`.
    ///
    /// Empty utterances are dropped silently. A speaker who is neither side
    /// of this conversation is a contract violation: the call fails with
    /// [`CoreError::InvalidSpeaker`] and mutates nothing.
    pub fn append_message(&mut self, text: &str, speaker: &PersonHandle) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if speaker.id == self.primary.id {
            self.primary_messages.push(text.to_string());
        } else if speaker.id == self.secondary.id {
            self.secondary_messages.push(text.to_string());
        } else {
            return Err(CoreError::InvalidSpeaker {
                speaker: speaker.name.clone(),
                conversation: format!("{} and {}", self.primary.name, self.secondary.name),
            });
        }
        Ok(())
    }

    /// Interleave both ledgers into the role-tagged sequence the oracle's
    /// chat contract expects.
    ///
    /// Role tagging is relative to whoever is about to generate: the owning
    /// side's past utterances are the model's own prior turns (assistant),
    /// the interlocutor's are the human-equivalent turns (user) — the
    /// request reads as "continue this dialogue as yourself". A brand-new
    /// conversation yields a single synthetic user entry so the opening
    /// turn has non-empty context.
    #[must_use]
    pub fn to_chat_messages(&self) -> Vec<ChatMessage> {
        if self.primary_messages.is_empty() && self.secondary_messages.is_empty() {
            return vec![ChatMessage::user(FIRST_TURN_PROMPT)];
        }

        let turns = self.primary_messages.len().max(self.secondary_messages.len());
        let mut messages = Vec::with_capacity(self.primary_messages.len() + self.secondary_messages.len());
        for i in 0..turns {
            if let Some(text) = self.primary_messages.get(i) {
                messages.push(ChatMessage::assistant(text.clone()));
            }
            if let Some(text) = self.secondary_messages.get(i) {
                messages.push(ChatMessage::user(text.clone()));
            }
        }
        messages
    }

    /// Render `"{speaker}: {utterance}"` lines in chronological order.
    ///
    /// Consumed only by belief revision — dialogue turns are always built
    /// from [`Conversation::to_chat_messages`] instead.
    #[must_use]
    pub fn to_transcript_text(&self) -> String {
        let turns = self.primary_messages.len().max(self.secondary_messages.len());
        let mut lines = Vec::with_capacity(self.primary_messages.len() + self.secondary_messages.len());
        for i in 0..turns {
            if let Some(text) = self.primary_messages.get(i) {
                lines.push(format!("{}: {}", self.primary.name, text));
            }
            if let Some(text) = self.secondary_messages.get(i) {
                lines.push(format!("{}: {}", self.secondary.name, text));
            }
        }
        lines.join("\n")
    }

    /// Ledger lengths as `(own, theirs)`.
    #[must_use]
    pub fn message_counts(&self) -> (usize, usize) {
        (self.primary_messages.len(), self.secondary_messages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PersonId;
    use palaver_llm::types::Role;

    fn handles() -> (PersonHandle, PersonHandle) {
        (
            PersonHandle::new(PersonId::new(), "Aisha"),
            PersonHandle::new(PersonId::new(), "Brendan"),
        )
    }

    #[test]
    fn append_grows_only_the_matching_ledger() {
        let (me, them) = handles();
        let mut conversation = Conversation::new(me.clone(), them.clone());

        conversation.append_message("hello", &me).expect("append");
        assert_eq!(conversation.message_counts(), (1, 0));

        conversation.append_message("hi there", &them).expect("append");
        assert_eq!(conversation.message_counts(), (1, 1));
    }

    #[test]
    fn empty_utterances_are_dropped() {
        let (me, them) = handles();
        let mut conversation = Conversation::new(me.clone(), them);

        conversation.append_message("", &me).expect("no-op");
        assert_eq!(conversation.message_counts(), (0, 0));
    }

    #[test]
    fn foreign_speaker_fails_and_mutates_nothing() {
        let (me, them) = handles();
        let stranger = PersonHandle::new(PersonId::new(), "Agnes");
        let mut conversation = Conversation::new(me, them);

        let result = conversation.append_message("intruding", &stranger);
        assert!(matches!(result, Err(CoreError::InvalidSpeaker { .. })));
        assert_eq!(conversation.message_counts(), (0, 0));
    }

    #[test]
    fn fresh_conversation_yields_the_synthetic_opener() {
        let (me, them) = handles();
        let conversation = Conversation::new(me, them);

        let messages = conversation.to_chat_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, FIRST_TURN_PROMPT);
    }

    #[test]
    fn interleaving_for_two_one_ledgers() {
        let (me, them) = handles();
        let mut conversation = Conversation::new(me.clone(), them.clone());
        conversation.append_message("first", &me).expect("append");
        conversation.append_message("reply", &them).expect("append");
        conversation.append_message("second", &me).expect("append");

        let messages = conversation.to_chat_messages();
        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(messages[1].content, "reply");
    }

    #[test]
    fn transcript_names_each_speaker() {
        let (me, them) = handles();
        let mut conversation = Conversation::new(me.clone(), them.clone());
        conversation.append_message("shall we?", &me).expect("append");
        conversation.append_message("after you", &them).expect("append");

        let transcript = conversation.to_transcript_text();
        assert_eq!(transcript, "Aisha: shall we?\nBrendan: after you");
    }

    #[test]
    fn transcript_of_empty_conversation_is_empty() {
        let (me, them) = handles();
        let conversation = Conversation::new(me, them);
        assert!(conversation.to_transcript_text().is_empty());
    }
}
