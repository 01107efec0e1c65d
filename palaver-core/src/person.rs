//! Person — the agent aggregate: identity, goal, relationship store, and
//! the dialogue-turn and belief-revision engines.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use palaver_llm::client::{Oracle, parse_structured};
use palaver_llm::prompt::{PromptEngine, PromptId, render_template};
use palaver_llm::types::{ChatMessage, ChatRequest};

use crate::catalog;
use crate::conversation::Conversation;
use crate::error::{CoreError, Result};
use crate::relationship::{BeliefReport, Relationship};
use crate::types::{PersonHandle, PersonId};

/// An autonomous person in the simulation.
///
/// A person owns its relationship mapping and its active-conversation slot
/// exclusively; the only cross-person references are cheap
/// [`PersonHandle`]s. Name, biography, and goal are fixed at creation; all
/// later mutation flows through [`Person::get_message`] and
/// [`Person::end_conversation`].
pub struct Person {
    id: PersonId,
    name: String,
    identity: String,
    goal: String,
    relationships: HashMap<PersonId, Relationship>,
    active_conversation: Option<Conversation>,
    oracle: Arc<dyn Oracle>,
    prompts: PromptEngine,
}

impl Person {
    /// Create a person with explicit name, biography, and goal.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        identity: impl Into<String>,
        goal: impl Into<String>,
        oracle: Arc<dyn Oracle>,
    ) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            identity: identity.into(),
            goal: goal.into(),
            relationships: HashMap::new(),
            active_conversation: None,
            oracle,
            prompts: PromptEngine::builtin(),
        }
    }

    /// Create a person with catalog-sampled name and biography.
    ///
    /// `goal` pins the motivating directive; `None` samples one from the
    /// catalog too.
    #[must_use]
    pub fn spawn(rng: &mut impl Rng, goal: Option<String>, oracle: Arc<dyn Oracle>) -> Self {
        let name = catalog::sample_name(rng);
        let identity = catalog::sample_identity(rng);
        let goal = goal.unwrap_or_else(|| catalog::sample_goal(rng));
        Self::new(name, identity, goal, oracle)
    }

    /// Replace the prompt templates (e.g. with on-disk overrides).
    #[must_use]
    pub fn with_prompts(mut self, prompts: PromptEngine) -> Self {
        self.prompts = prompts;
        self
    }

    /// The person's unique ID.
    #[must_use]
    pub fn id(&self) -> PersonId {
        self.id
    }

    /// The person's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The person's biography, fixed at creation.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The person's motivating directive, fixed at creation.
    #[must_use]
    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// A cheap reference to this person.
    #[must_use]
    pub fn handle(&self) -> PersonHandle {
        PersonHandle::new(self.id, self.name.clone())
    }

    /// Whether no conversation is currently in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active_conversation.is_none()
    }

    /// The current belief about `id`, if any contact has happened.
    #[must_use]
    pub fn relationship(&self, id: &PersonId) -> Option<&Relationship> {
        self.relationships.get(id)
    }

    /// Fetch or create the belief record about `other`.
    ///
    /// Idempotent: the first call per target installs sentinel beliefs, and
    /// no later call ever resets an initialized belief. Entries are never
    /// removed.
    pub fn relationship_with(&mut self, other: &PersonHandle) -> &mut Relationship {
        self.relationships
            .entry(other.id)
            .or_insert_with(|| Relationship::new(other.clone()))
    }

    /// Produce this person's next utterance in a conversation with `other`.
    ///
    /// `other_said` is what the interlocutor just said — empty on the
    /// opening turn. The conversation and the relationship are created
    /// lazily on first contact. The request sent to the oracle is the
    /// rendered system instruction followed by the conversation's
    /// role-tagged sequence; the returned text is mirrored into this side's
    /// own ledger and handed back verbatim. Oracle failures propagate
    /// unchanged — retry policy belongs to the oracle, not here.
    pub async fn get_message(&mut self, other_said: &str, other: &PersonHandle) -> Result<String> {
        let own_handle = self.handle();
        let (perceived_identity, affect) = {
            let relationship = self.relationship_with(other);
            (
                relationship.perceived_identity.clone(),
                relationship.affect.clone(),
            )
        };

        let history = {
            let conversation = self
                .active_conversation
                .get_or_insert_with(|| Conversation::new(own_handle.clone(), other.clone()));
            conversation.append_message(other_said, other)?;
            conversation.to_chat_messages()
        };

        let system = self.system_instruction(other, &perceived_identity, &affect)?;
        let (max_tokens, temperature) = self.sampling_params(PromptId::Dialogue)?;

        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(system));
        messages.extend(history);

        let request = ChatRequest::new(messages, max_tokens, temperature);
        let response = self.oracle.chat(&request).await?;
        let utterance = response.text;

        debug!(person = %self.name, other = %other.name, len = utterance.len(), "produced utterance");

        if let Some(conversation) = self.active_conversation.as_mut() {
            conversation.append_message(&utterance, &own_handle)?;
        }

        Ok(utterance)
    }

    /// Deliver an utterance from `other` outside a generation turn.
    ///
    /// The bounded alternation leaves the exchange's final utterance
    /// undelivered to the side that spoke first; the driver hands it over
    /// with this call so both mirrors close out at the same length.
    pub fn hear(&mut self, text: &str, other: &PersonHandle) -> Result<()> {
        self.relationship_with(other);
        let own_handle = self.handle();
        let conversation = self
            .active_conversation
            .get_or_insert_with(|| Conversation::new(own_handle, other.clone()));
        conversation.append_message(text, other)
    }

    /// Conclude the active conversation and revise the belief about the
    /// interlocutor.
    ///
    /// The conversation is appended to the relationship's history and the
    /// slot is cleared before the oracle is consulted — a conversation that
    /// has ended stays ended even if interpretation fails. The oracle's
    /// reply must parse as a two-field JSON object; on success both belief
    /// fields are overwritten, on failure they are left untouched and
    /// [`CoreError::MalformedBeliefReply`] surfaces to the caller. The
    /// history append is deliberately not rolled back in that case.
    pub async fn end_conversation(&mut self) -> Result<()> {
        let conversation =
            self.active_conversation
                .take()
                .ok_or_else(|| CoreError::NoActiveConversation {
                    person: self.name.clone(),
                })?;

        let (own_count, their_count) = conversation.message_counts();
        if own_count != their_count {
            warn!(
                person = %self.name,
                own_count,
                their_count,
                "conversation mirrors closed at unequal lengths"
            );
        }

        let other = conversation.secondary().clone();
        let transcript = conversation.to_transcript_text();

        let (prior_identity, prior_affect) = {
            let relationship = self.relationship_with(&other);
            relationship.conversation_history.push(conversation);
            (
                relationship.perceived_identity.clone(),
                relationship.affect.clone(),
            )
        };

        let system = self.system_instruction(&other, &prior_identity, &prior_affect)?;
        let interpretation = {
            let template = self.template(PromptId::Interpret)?;
            render_template(
                &template.user,
                &[
                    ("other_name", other.name.as_str()),
                    ("transcript", transcript.as_str()),
                    ("perceived_identity", prior_identity.as_str()),
                    ("affect", prior_affect.as_str()),
                ],
            )
        };
        let (max_tokens, temperature) = self.sampling_params(PromptId::Interpret)?;

        let request = ChatRequest::new(
            vec![ChatMessage::system(system), ChatMessage::user(interpretation)],
            max_tokens,
            temperature,
        );
        let response = self.oracle.chat(&request).await?;

        let report: BeliefReport =
            parse_structured(&response).map_err(|e| CoreError::MalformedBeliefReply {
                reason: e.to_string(),
                raw: response.text.clone(),
            })?;

        debug!(
            person = %self.name,
            other = %other.name,
            identity = %report.identity,
            affect = %report.affect,
            "belief revised"
        );

        self.relationship_with(&other).apply(report);
        Ok(())
    }

    /// Drop the active conversation without revising beliefs.
    ///
    /// Used by drivers to recover from an aborted exchange; nothing is
    /// recorded in the relationship history. Returns whether a conversation
    /// was actually dropped.
    pub fn abandon_conversation(&mut self) -> bool {
        self.active_conversation.take().is_some()
    }

    /// Render the shared system instruction from a belief snapshot.
    fn system_instruction(
        &self,
        other: &PersonHandle,
        perceived_identity: &str,
        affect: &str,
    ) -> Result<String> {
        let template = self.template(PromptId::Dialogue)?;
        Ok(render_template(
            &template.system,
            &[
                ("name", self.name.as_str()),
                ("identity", self.identity.as_str()),
                ("goal", self.goal.as_str()),
                ("other_name", other.name.as_str()),
                ("perceived_identity", perceived_identity),
                ("affect", affect),
            ],
        ))
    }

    fn template(&self, id: PromptId) -> Result<&palaver_llm::prompt::PromptTemplate> {
        self.prompts.get(id).ok_or_else(|| {
            CoreError::Oracle(palaver_llm::OracleError::ConfigError(format!(
                "prompt template '{id}' not loaded"
            )))
        })
    }

    fn sampling_params(&self, id: PromptId) -> Result<(u32, f32)> {
        let template = self.template(id)?;
        Ok((template.max_tokens, template.temperature))
    }
}

impl fmt::Debug for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Person")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("goal", &self.goal)
            .field("relationships", &self.relationships.len())
            .field("in_conversation", &self.active_conversation.is_some())
            .finish_non_exhaustive()
    }
}
