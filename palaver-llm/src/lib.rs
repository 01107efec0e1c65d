//! # palaver-llm — Oracle Abstraction Layer for Palaver
//!
//! The oracle is the external language-generation service the simulation
//! calls to obtain utterances and belief-interpretation replies. This crate
//! provides everything the core needs from it:
//!
//!   - A chat-completion contract ([`Oracle`]): given an ordered sequence of
//!     role-tagged messages, return a text completion or an explicit failure.
//!   - HTTP backends for that contract ([`HttpOracle`]): **Ollama** (local,
//!     recommended default) and any **OpenAI-compatible API**.
//!   - Strict structured-JSON reply parsing ([`parse_structured`]).
//!   - Versioned prompt templates ([`prompt::PromptEngine`]).
//!   - A deterministic scripted backend for tests ([`ScriptedOracle`]).
//!
//! Retry and timeout policy live here, on the collaborator side of the
//! contract — the core never retries an oracle call.

pub mod client;
pub mod error;
pub mod mock;
pub mod prompt;
pub mod types;

pub use client::{HttpOracle, Oracle, Provider, parse_structured};
pub use error::OracleError;
pub use mock::ScriptedOracle;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role};
