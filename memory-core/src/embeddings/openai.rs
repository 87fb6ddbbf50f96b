//! OpenAI embedding provider for high-quality cloud-based embeddings

use super::config::ModelConfig;
use anyhow::Result;

#[cfg(feature = "openai")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "openai")]
use std::time::Instant;

/// OpenAI embedding provider
///
/// Uses OpenAI's embedding API for high-quality semantic embeddings.
/// Requires an API key and internet connection.
///
/// # Supported Models
/// - text-embedding-ada-002 (1536 dimensions, legacy)
/// - text-embedding-3-small (1536 dimensions, improved)
/// - text-embedding-3-large (3072 dimensions, highest quality)
///
/// # Example
/// ```no_run
/// use memory_core::embeddings::{OpenAIEmbeddingProvider, ModelConfig};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ModelConfig::openai_3_small();
///     let provider = OpenAIEmbeddingProvider::new(
///         "your-api-key".to_string(),
///         config
///     );
///     
///     let embedding = provider.embed_text("Hello world").await?;
///     println!("Generated embedding with {} dimensions", embedding.len());
///     Ok(())
/// }
/// ```
#[cfg(feature = "openai")]
pub struct OpenAIEmbeddingProvider {
    /// OpenAI API key
    api_key: String,
    /// Model configuration
    config: ModelConfig,
    /// HTTP client for API requests
    client: reqwest::Client,
    /// Base URL for OpenAI API
    base_url: String,
}

#[cfg(feature = "openai")]
impl OpenAIEmbeddingProvider {
    /// Create a new OpenAI embedding provider
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `config` - Model configuration
    ///
    /// # Returns
    /// Configured OpenAI embedding provider
    pub fn new(api_key: String, config: ModelConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            config,
            client,
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Create provider with custom base URL (for Azure OpenAI, etc.)
    pub fn with_custom_url(api_key: String, config: ModelConfig, base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            config,
            client,
            base_url,
        }
    }

    /// Make embedding request to OpenAI API
    async fn request_embeddings(&self, input: EmbeddingInput) -> Result<EmbeddingResponse> {
        let url = format!("{}/embeddings", self.base_url);

        let request = EmbeddingRequest {
            input,
            model: self.config.model_name.clone(),
            encoding_format: Some("float".to_string()),
            dimensions: None, // Let OpenAI use default for the model
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error {}: {}", status, error_text);
        }

        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .context("Failed to parse OpenAI API response")?;

        Ok(embedding_response)
    }
}

#[cfg(feature = "openai")]
#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let start_time = Instant::now();

        let input = EmbeddingInput::Single(text.to_string());
        let response = self.request_embeddings(input).await?;

        if response.data.is_empty() {
            anyhow::bail!("OpenAI API returned no embeddings");
        }

        let embedding = response.data[0].embedding.clone();
        let generation_time = start_time.elapsed().as_millis() as u64;

        tracing::debug!(
            "Generated OpenAI embedding in {}ms, {} tokens, {} dimensions",
            generation_time,
            response.usage.total_tokens,
            embedding.len()
        );

        Ok(embedding)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let start_time = Instant::now();

        let input = EmbeddingInput::Batch(texts.to_vec());
        let response = self.request_embeddings(input).await?;

        if response.data.len() != texts.len() {
            anyhow::bail!(
                "OpenAI API returned {} embeddings for {} texts",
                response.data.len(),
                texts.len()
            );
        }

        // Sort by index to ensure correct order
        let mut data = response.data;
        data.sort_by_key(|item| item.index);

        let embeddings: Vec<Vec<f32>> = data.into_iter().map(|item| item.embedding).collect();

        let generation_time = start_time.elapsed().as_millis() as u64;

        tracing::debug!(
            "Generated {} OpenAI embeddings in {}ms, {} tokens",
            embeddings.len(),
            generation_time,
            response.usage.total_tokens
        );

        Ok(embeddings)
    }

    fn embedding_dimension(&self) -> usize {
        self.config.embedding_dimension
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }

    async fn is_available(&self) -> bool {
        // Test with a simple request
        self.embed_text("test").await.is_ok()
    }

    async fn warmup(&self) -> Result<()> {
        // Test embedding generation to warm up the connection
        let _embedding = self.embed_text("warmup test").await?;
        Ok(())
    }

    fn metadata(&self) -> serde_json::Value {
        serde_json::json!({
            "model": self.model_name(),
            "dimension": self.embedding_dimension(),
            "type": "openai",
            "provider": "OpenAI",
            "base_url": self.base_url
        })
    }
}

// OpenAI API request/response structures

#[cfg(feature = "openai")]
#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    input: EmbeddingInput,
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    encoding_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[cfg(feature = "openai")]
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum EmbeddingInput {
    Single(String),
    Batch(Vec<String>),
}

#[cfg(feature = "openai")]
#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
    model: String,
    usage: Usage,
}

#[cfg(feature = "openai")]
#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    index: usize,
    object: String, // Should be "embedding"
}

#[cfg(feature = "openai")]
#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: usize,
    total_tokens: usize,
}

/// Utility functions for OpenAI provider
pub mod utils {
    use super::*;

    /// Validate OpenAI API key format
    #[allow(dead_code)]
    pub fn validate_api_key(api_key: &str) -> Result<()> {
        if api_key.is_empty() {
            anyhow::bail!("OpenAI API key is empty");
        }

        if !api_key.starts_with("sk-") {
            anyhow::bail!("OpenAI API key should start with 'sk-'");
        }

        if api_key.len() < 20 {
            anyhow::bail!("OpenAI API key appears to be too short");
        }

        Ok(())
    }

    /// Get the appropriate model configuration for different use cases
    #[allow(dead_code)]
    pub fn get_recommended_model(use_case: OpenAIModelUseCase) -> ModelConfig {
        match use_case {
            OpenAIModelUseCase::Balanced => ModelConfig::openai_3_small(),
            OpenAIModelUseCase::Quality => ModelConfig::openai_3_large(),
            OpenAIModelUseCase::Legacy => ModelConfig::openai_ada_002(),
        }
    }

    /// Calculate approximate cost for embedding generation
    ///
    /// Based on OpenAI's pricing as of 2024. Prices may change.
    #[allow(dead_code)]
    pub fn estimate_cost(num_tokens: usize, model: &str) -> f64 {
        let cost_per_million_tokens = match model {
            "text-embedding-ada-002" => 0.10,
            "text-embedding-3-small" => 0.02,
            "text-embedding-3-large" => 0.13,
            _ => 0.10, // Default to ada-002 pricing
        };

        (num_tokens as f64 / 1_000_000.0) * cost_per_million_tokens
    }

    /// Estimate token count for text (approximate)
    ///
    /// This is a rough estimate. Actual token count may differ.
    #[allow(dead_code)]
    pub fn estimate_tokens(text: &str) -> usize {
        // Rough estimate: ~1 token per 4 characters for English text
        (text.len() as f64 / 4.0).ceil() as usize
    }

    /// Use cases for OpenAI model selection
    #[allow(dead_code)]
    pub enum OpenAIModelUseCase {
        /// Balanced performance and cost (text-embedding-3-small)
        Balanced,
        /// Highest quality (text-embedding-3-large)
        Quality,
        /// Legacy compatibility (text-embedding-ada-002)
        Legacy,
    }
}
