// Shared prompt fragments. Each feature builds its own prompt in
// features/prompts.rs; this file holds the cross-cutting pieces.

/// Formatting rules the model is asked to follow. The page renders exactly
/// this subset (see render::markdown), so every feature that displays text
/// as markup appends it.
pub const MARKDOWN_INSTRUCTION: &str =
    "Use markdown for formatting (e.g., use '**' for bold and '*' for list items).";

/// Canned low-cost prompt used to check that the API is reachable.
pub const PING_PROMPT: &str = "hello";
