//! Crate-wide defaults shared across modules.

/// Default embedding dimension (BERT-base CLS hidden size).
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Default max tokens per input text. Longer input is truncated deterministically.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Upper bound of the dummy/linear score scale.
pub const SCORE_SCALE_MAX: f64 = 5.0;
