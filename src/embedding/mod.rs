//! Sentence embeddings for semantic similarity.
//!
//! [`SentenceEmbedder`] wraps a candle BERT encoder loaded once at startup. Use
//! [`EmbedderConfig::stub`] for tests without model files: the stub returns
//! deterministic unit vectors derived from a BLAKE3 hash of the text, so identical
//! strings have cosine similarity 1.0.

/// BERT encoder and sequence classifier.
pub mod bert;
/// Embedder configuration.
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Tokenizer loading helpers.
pub mod utils;


pub use bert::{BertEncoder, BertSequenceClassifier};
pub use config::{DEFAULT_EMBED_MAX_SEQ_LEN, EmbedderConfig, STUB_EMBEDDING_DIM};
pub use error::EmbeddingError;

use tracing::{debug, info, warn};

use device::select_device;

enum EmbedderBackend {
    Model(BertEncoder),
    Stub { dim: usize },
}

/// Produces unit-length sentence embeddings.
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model(encoder) => format!("{:?}", encoder),
                    EmbedderBackend::Stub { dim } => format!("Stub(dim={})", dim),
                },
            )
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Sentence embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub {
                    dim: STUB_EMBEDDING_DIM,
                },
                config,
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for sentence embedder");

        let encoder = BertEncoder::load(&config.model_dir, config.max_seq_len, &device)?;
        info!(
            model_dir = %config.model_dir.display(),
            hidden_size = encoder.hidden_size(),
            max_seq_len = config.max_seq_len,
            "Sentence embedder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model(encoder),
            config,
        })
    }

    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model(encoder) => encoder.embed(text),
            EmbedderBackend::Stub { dim } => Ok(stub_embedding(text, *dim)),
        }
    }

    pub fn embedding_dim(&self) -> usize {
        match &self.backend {
            EmbedderBackend::Model(encoder) => encoder.hidden_size(),
            EmbedderBackend::Stub { dim } => *dim,
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub { .. })
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }
}

fn stub_embedding(text: &str, dim: usize) -> Vec<f32> {
    let seed = blake3::hash(text.as_bytes());
    let mut state = u64::from_le_bytes(
        seed.as_bytes()[..8]
            .try_into()
            .unwrap_or([0u8; 8]),
    );

    let mut embedding = Vec::with_capacity(dim);
    for _ in 0..dim {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        embedding.push(((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0);
    }
    bert::normalize(&mut embedding);
    embedding
}

/// Cosine similarity of two vectors; 0.0 when either is zero or lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
