//! Fixed instructions sent to the model.

/// Instruction accompanying every camera frame posted to `/analyze`.
pub const SCENE_PROMPT: &str = "You are helping a blind user walk safely.\n\
1. Detect and describe obstacles or objects in 2 lines max.\n\
2. Estimate distance and give clear walk instructions.\n\
3. If hazard like stairs/hole is detected, say '⚠ Stop! Obstacle ahead.'\n\
4. Mention if any moving objects like people are detected.";

const QUESTION_PREAMBLE: &str =
    "You are a helpful assistant for blind people. Answer the following clearly in 2 lines:";

/// Wraps a user's question in the assistant instruction.
pub fn question_prompt(query: &str) -> String {
    format!("{}\n{}", QUESTION_PREAMBLE, query)
}
