//! # askrelay-core
//!
//! Deterministic building blocks for the askrelay question relay.
//!
//! This crate answers the parts of a query that never touch the network:
//! - How is a raw question normalized?
//! - What prompt is sent upstream?
//! - What does the caller get back?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: normalization and prompt building are pure functions
//! 2. **Total**: no operation here can fail
//! 3. **No I/O**: provider calls live in `askrelay-runtime`
//!
//! ## Example
//!
//! ```rust
//! use askrelay_core::{build_prompt, normalize};
//!
//! let processed = normalize("What is the Capital of France?");
//! assert_eq!(processed, "what is the capital of france");
//!
//! let prompt = build_prompt(&processed);
//! assert!(prompt.contains("Question: what is the capital of france"));
//! ```

pub mod normalize;
pub mod prompt;
pub mod record;

// Re-export main items at crate root
pub use normalize::normalize;
pub use prompt::{build_prompt, PROMPT_PREAMBLE};
pub use record::{simulated_answer, AnswerRecord, SIMULATED_PREFIX, SIMULATED_SOURCE};
