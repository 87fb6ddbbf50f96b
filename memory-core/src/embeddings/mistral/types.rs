//! Re-export Mistral types from config module

pub use crate::embeddings::config::mistral::{
    MistralEmbeddingData, MistralEmbeddingInput, MistralEmbeddingRequest, MistralEmbeddingResponse,
    MistralUsage,
};
