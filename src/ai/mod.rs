//! AI text-generation backend.
//!
//! The core only ever sees the [`TextGenerator`] trait; the HTTP
//! implementation speaks the chat APIs of four providers. Configuration
//! is an explicit struct injected at construction time, never ambient
//! state, so tests substitute a fake backend per call.

pub mod client;
pub mod provider;
pub mod request;

pub use client::{GeneratorConfig, HttpGenerator, TextGenerator};
pub use provider::{AuthScheme, Provider};
pub use request::TaskType;

/// Byte budget for content sent to a backend (token limits).
pub const MAX_PROMPT_BYTES: usize = 8000;
