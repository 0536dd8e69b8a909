// Career analysis: prompt rendering, the single model call, and response validation.
// All LLM calls go through llm_client; nothing here talks to Gemini directly.

pub mod prompts;
pub mod requester;
