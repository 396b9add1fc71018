// Brief assembly: summary generation, keyword derivation, place scraping,
// snapshot persistence, and the HTTP handlers that drive them.
// All LLM calls go through llm_client — no direct completion-API calls here.

pub mod assembler;
pub mod handlers;
pub mod prompts;
pub mod snapshot;
