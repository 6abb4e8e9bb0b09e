// Proposal generation: marker language, field composition, prompt building,
// orchestration. All LLM calls go through llm_client.

pub mod builder;
pub mod composer;
pub mod generator;
pub mod handlers;
pub mod markers;
pub mod prompts;
