//! JSON-lines conversation corpus replayed as synthetic samples.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use organic_core::errors::{OrganicResult, SourceError};
use organic_core::traits::SyntheticSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::augment::Augmenter;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: String,
    pub content: String,
}

/// One line of the corpus: `{"conversation": [{"role": .., "content": ..}, ..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub conversation: Vec<Turn>,
}

/// Sample handed to the scoring strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSample {
    pub roles: Vec<String>,
    pub messages: Vec<String>,
    pub organic: bool,
    pub source: String,
}

impl ConversationSample {
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Synthetic source over a conversation corpus.
///
/// Each sample is a random conversation cut at a random turn, never ending
/// on an assistant turn, with non-assistant messages optionally augmented.
/// A corpus that fails to load is still constructed; the failure is
/// returned from every `sample()` call instead.
#[derive(Debug)]
pub struct ConversationDataset {
    name: String,
    records: Result<Vec<ConversationRecord>, SourceError>,
    augmenter: Option<Augmenter>,
    rng: Mutex<StdRng>,
}

impl ConversationDataset {
    /// Dataset over in-memory records. Empty conversations are dropped.
    pub fn from_records(name: impl Into<String>, records: Vec<ConversationRecord>) -> Self {
        let records: Vec<_> = records
            .into_iter()
            .filter(|record| !record.conversation.is_empty())
            .collect();
        Self::with_records(name.into(), Ok(records))
    }

    /// Load a JSON-lines file. Blank lines are skipped; the first malformed
    /// line fails the whole load.
    pub fn from_jsonl(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path.display().to_string();
        let records = load_jsonl(&name, path);
        match &records {
            Ok(records) => info!(source = %name, records = records.len(), "conversation corpus loaded"),
            Err(e) => warn!(source = %name, error = %e, "conversation corpus failed to load"),
        }
        Self::with_records(name, records)
    }

    fn with_records(name: String, records: Result<Vec<ConversationRecord>, SourceError>) -> Self {
        Self {
            name,
            records,
            augmenter: Some(Augmenter::new()),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reseed for reproducible sampling.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    pub fn with_augmenter(mut self, augmenter: Augmenter) -> Self {
        self.augmenter = Some(augmenter);
        self
    }

    /// Replay user turns verbatim.
    pub fn without_augmentation(mut self) -> Self {
        self.augmenter = None;
        self
    }

    pub fn len(&self) -> usize {
        self.records.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stored load failure, if any.
    pub fn load_error(&self) -> Option<&SourceError> {
        self.records.as_ref().err()
    }

    pub fn draw(&self) -> Result<ConversationSample, SourceError> {
        let records = self.records.as_ref().map_err(Clone::clone)?;
        if records.is_empty() {
            return Err(SourceError::Empty {
                source_name: self.name.clone(),
            });
        }

        let mut rng = self.lock_rng();
        let record = &records[rng.gen_range(0..records.len())];
        let cut = rng.gen_range(1..=record.conversation.len());
        let mut turns = &record.conversation[..cut];
        if let Some((last, rest)) = turns.split_last() {
            if last.role == "assistant" {
                turns = rest;
            }
        }

        let mut roles = Vec::with_capacity(turns.len());
        let mut messages = Vec::with_capacity(turns.len());
        for turn in turns {
            let message = match &self.augmenter {
                Some(augmenter) => augmenter.augment(&turn.role, &turn.content, &mut *rng),
                None => turn.content.clone(),
            };
            roles.push(turn.role.clone());
            messages.push(message);
        }

        Ok(ConversationSample {
            roles,
            messages,
            organic: false,
            source: self.name.clone(),
        })
    }

    fn lock_rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SyntheticSource for ConversationDataset {
    type Sample = ConversationSample;

    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self) -> OrganicResult<ConversationSample> {
        Ok(self.draw()?)
    }
}

fn load_jsonl(name: &str, path: &Path) -> Result<Vec<ConversationRecord>, SourceError> {
    let content = fs::read_to_string(path).map_err(|e| SourceError::Unavailable {
        source_name: name.to_string(),
        reason: e.to_string(),
    })?;

    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record: ConversationRecord =
            serde_json::from_str(line).map_err(|e| SourceError::MalformedRecord {
                source_name: name.to_string(),
                line: idx + 1,
                reason: e.to_string(),
            })?;
        if !record.conversation.is_empty() {
            records.push(record);
        }
    }
    Ok(records)
}
