//! # jobpilot-clients
//!
//! HTTP collaborators consumed by the jobpilot pipeline core:
//!
//! - [`HhClient`] — HeadHunter vacancy search with bounded-concurrency
//!   detail hydration
//! - [`HhResponder`] — application submission with transient/permanent
//!   failure classification
//! - [`DeepSeekBackend`] — LLM-backed cover letter generation
//! - [`TemplateGenerator`] — keyword-gated templated letters
//! - [`mock`] — deterministic fakes for pipeline tests

pub mod deepseek;
pub mod hh;
pub mod mock;
pub mod responder;
pub mod template;

pub use deepseek::DeepSeekBackend;
pub use hh::HhClient;
pub use mock::{MockGenerator, MockSubmission};
pub use responder::HhResponder;
pub use template::TemplateGenerator;
