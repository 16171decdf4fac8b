// Shared prompt constants. Each component that calls the generator keeps its
// own prompts.rs alongside it; this file holds the cross-cutting fragments.

/// System prompt used for every generation call.
pub const ASSISTANT_SYSTEM: &str = "You are a helpful assistant.";
