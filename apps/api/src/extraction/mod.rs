// Resume extraction: free text in, structured record out.
// All model calls go through llm_client; nothing here speaks HTTP to the provider.

pub mod extractor;
pub mod handlers;
pub mod normalize;
pub mod prompts;
