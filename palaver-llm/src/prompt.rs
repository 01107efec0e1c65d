//! Prompt templates for Palaver oracle operations.
//!
//! Every prompt is a versioned, testable artifact. The built-in constants
//! cover the two calls the simulation makes; on-disk TOML overrides can be
//! loaded with [`PromptEngine::from_directory`].

/// System instruction for both oracle calls: who the speaker is, who they
/// are talking to, and what they currently believe about them.
pub const DIALOGUE_SYSTEM: &str = r"You are {name}, {identity}.
You are talking to {other_name}.
You believe {other_name} is {perceived_identity}.
Right now you feel {affect} toward them.
Your goal: {goal}.

RULES:
- Respond as {name}, in the first person. You are having a conversation, not narrating a story.
- Keep replies short and conversational, three sentences at most.
- Steer the conversation toward your goal.";

/// Interpretation prompt run once per completed conversation: reread the
/// transcript and revise the belief about the interlocutor.
pub const INTERPRET_USER: &str = r#"The conversation with {other_name} has ended. This is the full transcript:

{transcript}

Before this conversation you believed {other_name} was {perceived_identity}, and you felt {affect} toward them.

Reconsider. Return JSON:
{"identity": "who you now think they are", "affect": "one or two words for how you now feel about them"}"#;

/// Synthetic user entry for the very first turn of a conversation, so the
/// opening request has non-empty context.
pub const FIRST_TURN_PROMPT: &str = "What do you say to them?";

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

// ---------------------------------------------------------------------------
// PromptEngine — Versioned TOML Template Loader
// ---------------------------------------------------------------------------

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::OracleError;

/// Identifies a prompt template by purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    /// One dialogue turn: continue the conversation as yourself.
    Dialogue,
    /// Post-conversation belief interpretation (structured JSON reply).
    Interpret,
}

impl PromptId {
    /// Returns the TOML filename (without path) for this prompt.
    #[must_use]
    pub fn filename(self) -> &'static str {
        match self {
            Self::Dialogue => "dialogue.toml",
            Self::Interpret => "interpret.toml",
        }
    }

    /// All prompt IDs.
    #[must_use]
    pub fn all() -> &'static [PromptId] {
        &[Self::Dialogue, Self::Interpret]
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dialogue => "dialogue",
            Self::Interpret => "interpret",
        };
        write!(f, "{name}")
    }
}

impl FromStr for PromptId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dialogue" => Ok(Self::Dialogue),
            "interpret" => Ok(Self::Interpret),
            _ => Err(format!("unknown prompt id: '{s}'")),
        }
    }
}

/// Metadata and templates parsed from a TOML prompt file.
#[derive(Debug, Clone, Deserialize)]
struct TomlPromptFile {
    prompt: TomlPromptData,
}

/// Inner `[prompt]` section of a TOML file.
#[derive(Debug, Clone, Deserialize)]
struct TomlPromptData {
    version: String,
    max_tokens: u32,
    temperature: f32,
    system: String,
    #[serde(default)]
    user: String,
}

/// A loaded, ready-to-render prompt template.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Prompt version string (e.g., "1.0").
    pub version: String,
    /// Maximum output tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// System prompt template (contains `{key}` placeholders).
    pub system: String,
    /// User prompt template. Empty for the dialogue prompt, whose user side
    /// is the conversation ledger itself.
    pub user: String,
}

/// Engine that loads versioned prompt templates and renders them.
#[derive(Debug, Clone)]
pub struct PromptEngine {
    templates: HashMap<PromptId, PromptTemplate>,
}

impl PromptEngine {
    /// Create a `PromptEngine` pre-loaded with the built-in constant
    /// templates. Does not require any files on disk.
    ///
    /// The dialogue parameters (0.7 / 200 tokens) favor varied small talk;
    /// the interpret parameters (0.3 / 150 tokens) favor a reply that stays
    /// inside the requested JSON shape.
    #[must_use]
    pub fn builtin() -> Self {
        let mut templates = HashMap::new();

        templates.insert(
            PromptId::Dialogue,
            PromptTemplate {
                version: "builtin".into(),
                max_tokens: 200,
                temperature: 0.7,
                system: DIALOGUE_SYSTEM.into(),
                user: String::new(),
            },
        );

        templates.insert(
            PromptId::Interpret,
            PromptTemplate {
                version: "builtin".into(),
                max_tokens: 150,
                temperature: 0.3,
                system: DIALOGUE_SYSTEM.into(),
                user: INTERPRET_USER.into(),
            },
        );

        Self { templates }
    }

    /// Load prompt templates from a directory of TOML files.
    ///
    /// Each TOML file must match a known [`PromptId`] filename. Unknown
    /// files are ignored; IDs without a file fall back to the built-in
    /// template.
    ///
    /// # Errors
    ///
    /// Returns an error if a TOML file exists but cannot be parsed, or if
    /// the directory contains no templates at all.
    pub fn from_directory(dir: impl AsRef<Path>) -> Result<Self, OracleError> {
        let dir = dir.as_ref();
        let mut engine = Self::builtin();
        let mut loaded = 0usize;

        for id in PromptId::all() {
            let path: PathBuf = dir.join(id.filename());
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    OracleError::ConfigError(format!("failed to read {}: {e}", path.display()))
                })?;
                let parsed: TomlPromptFile = toml::from_str(&content).map_err(|e| {
                    OracleError::ConfigError(format!("failed to parse {}: {e}", path.display()))
                })?;

                let d = parsed.prompt;
                engine.templates.insert(
                    *id,
                    PromptTemplate {
                        version: d.version,
                        max_tokens: d.max_tokens,
                        temperature: d.temperature,
                        system: d.system,
                        user: d.user,
                    },
                );
                loaded += 1;
            }
        }

        if loaded == 0 {
            return Err(OracleError::ConfigError(format!(
                "no prompt templates found in directory: {}",
                dir.display()
            )));
        }

        Ok(engine)
    }

    /// Get a loaded prompt template by ID.
    #[must_use]
    pub fn get(&self, id: PromptId) -> Option<&PromptTemplate> {
        self.templates.get(&id)
    }

    /// Render both system and user prompts for a given ID.
    ///
    /// Returns `(system_prompt, user_prompt)` with all `{key}` placeholders
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt ID is not loaded.
    pub fn render(
        &self,
        id: PromptId,
        vars: &[(&str, &str)],
    ) -> Result<(String, String), OracleError> {
        let tpl = self
            .get(id)
            .ok_or_else(|| OracleError::ConfigError(format!("prompt template '{id}' not loaded")))?;

        let system = render_template(&tpl.system, vars);
        let user = render_template(&tpl.user, vars);
        Ok((system, user))
    }
}
