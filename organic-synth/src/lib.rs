//! # organic-synth
//!
//! Synthetic fallback sources. [`ConversationDataset`] replays truncated,
//! lightly perturbed user turns from a JSON-lines conversation corpus.

pub mod augment;
pub mod conversation;

pub use augment::Augmenter;
pub use conversation::{ConversationDataset, ConversationRecord, ConversationSample, Turn};
