// Content Generation: prompt + platforms in, one piece of content per platform out.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod generator;
pub mod handlers;
pub mod platform;
pub mod prompts;
