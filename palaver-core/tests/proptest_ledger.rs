//! Property-Based Tests for the Conversation Ledger.
//!
//! Uses `proptest` to verify ledger invariants under arbitrary utterance
//! sequences: growth accounting, interleaving shape, and the
//! invalid-speaker contract.

use proptest::prelude::*;

use palaver_core::conversation::Conversation;
use palaver_core::types::{PersonHandle, PersonId};
use palaver_llm::types::Role;

fn handles() -> (PersonHandle, PersonHandle) {
    (
        PersonHandle::new(PersonId::new(), "Aisha"),
        PersonHandle::new(PersonId::new(), "Brendan"),
    )
}

proptest! {
    // Each append grows exactly the matching ledger, and only for non-empty
    // text.
    #[test]
    fn append_accounting_is_exact(
        utterances in prop::collection::vec((any::<bool>(), ".{0,40}"), 0..30)
    ) {
        let (me, them) = handles();
        let mut conversation = Conversation::new(me.clone(), them.clone());

        let mut expected_own = 0usize;
        let mut expected_theirs = 0usize;
        for (from_me, text) in &utterances {
            let speaker = if *from_me { &me } else { &them };
            conversation.append_message(text, speaker).expect("valid speaker");
            if !text.is_empty() {
                if *from_me {
                    expected_own += 1;
                } else {
                    expected_theirs += 1;
                }
            }
            prop_assert_eq!(conversation.message_counts(), (expected_own, expected_theirs));
        }
    }

    // The role-tagged sequence contains every recorded utterance exactly
    // once, or the single synthetic opener when nothing was recorded.
    #[test]
    fn role_tagged_sequence_covers_every_utterance(
        utterances in prop::collection::vec((any::<bool>(), ".{1,40}"), 0..30)
    ) {
        let (me, them) = handles();
        let mut conversation = Conversation::new(me.clone(), them.clone());

        for (from_me, text) in &utterances {
            let speaker = if *from_me { &me } else { &them };
            conversation.append_message(text, speaker).expect("valid speaker");
        }

        let messages = conversation.to_chat_messages();
        let (own, theirs) = conversation.message_counts();
        if own + theirs == 0 {
            prop_assert_eq!(messages.len(), 1);
            prop_assert_eq!(messages[0].role, Role::User);
        } else {
            prop_assert_eq!(messages.len(), own + theirs);
            let assistant_turns = messages.iter().filter(|m| m.role == Role::Assistant).count();
            prop_assert_eq!(assistant_turns, own);
        }
    }

    // The transcript renders one line per recorded utterance, each prefixed
    // by its speaker's name.
    #[test]
    fn transcript_has_one_line_per_utterance(
        utterances in prop::collection::vec((any::<bool>(), "[a-z ]{1,20}"), 1..20)
    ) {
        let (me, them) = handles();
        let mut conversation = Conversation::new(me.clone(), them.clone());

        for (from_me, text) in &utterances {
            let speaker = if *from_me { &me } else { &them };
            conversation.append_message(text, speaker).expect("valid speaker");
        }

        let transcript = conversation.to_transcript_text();
        let (own, theirs) = conversation.message_counts();
        prop_assert_eq!(transcript.lines().count(), own + theirs);
        for line in transcript.lines() {
            prop_assert!(line.starts_with("Aisha: ") || line.starts_with("Brendan: "));
        }
    }

    // A speaker outside the conversation always fails and never mutates.
    #[test]
    fn foreign_speaker_never_mutates(text in ".{1,40}") {
        let (me, them) = handles();
        let stranger = PersonHandle::new(PersonId::new(), "Agnes");
        let mut conversation = Conversation::new(me, them);

        prop_assert!(conversation.append_message(&text, &stranger).is_err());
        prop_assert_eq!(conversation.message_counts(), (0, 0));
    }
}
