// Content Planner: turns a planner form into a dated content calendar.
// Generator output is unstructured prose; `normalizer` salvages it into plan entries.
// All LLM calls go through llm_client.

pub mod cadence;
pub mod duration;
pub mod export;
pub mod handlers;
pub mod normalizer;
pub mod prompts;
