//! Prompt template sent to every provider.

/// Instruction line that opens every prompt.
pub const PROMPT_PREAMBLE: &str = "You are a helpful assistant. Answer concisely and clearly.";

/// Embed a processed question into the fixed prompt template.
///
/// The question is interpolated exactly once, between the `Question: `
/// marker and the trailing `Answer:` line, so distinct questions always
/// produce distinct prompts.
pub fn build_prompt(processed_question: &str) -> String {
    format!("{PROMPT_PREAMBLE}\nQuestion: {processed_question}\nAnswer:")
}
