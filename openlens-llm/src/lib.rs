//! openlens-llm: prompt construction and description client for OpenLens
//!
//! Turns a deduplicated object-label sequence into a natural-language
//! request and fetches a short description from an OpenAI-style chat
//! endpoint, degrading to a deterministic offline response when no usable
//! credential is configured.

pub mod config;
pub mod describe;
pub mod error;
pub mod prompt;
pub mod providers;

pub use config::{DescribeConfig, PLACEHOLDER_API_KEY};
pub use describe::{Describer, DescriptionResult, DescriptionSource};
pub use error::LLMError;
pub use prompt::{build_prompt, NO_OBJECTS_MESSAGE, SYSTEM_PROMPT};
