use std::io::Write;

use organic_core::errors::{OrganicError, SourceError};
use organic_core::traits::SyntheticSource;
use organic_synth::{Augmenter, ConversationDataset};
use proptest::prelude::*;
use tempfile::NamedTempFile;

const CORPUS: &str = r#"{"conversation":[{"role":"user","content":"what is a big cat"},{"role":"assistant","content":"a lion"},{"role":"user","content":"and a small one"},{"role":"assistant","content":"a kitten"}]}

{"conversation":[{"role":"user","content":"hello"},{"role":"assistant","content":"hi there"}]}
{"conversation":[]}
"#;

fn corpus_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn loads_records_and_skips_blank_and_empty() {
    let file = corpus_file(CORPUS);
    let dataset = ConversationDataset::from_jsonl(file.path());
    assert!(dataset.load_error().is_none());
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.name(), file.path().display().to_string());
}

#[test]
fn samples_never_end_on_assistant() {
    let file = corpus_file(CORPUS);
    let dataset = ConversationDataset::from_jsonl(file.path())
        .with_seed(42)
        .without_augmentation();
    for _ in 0..200 {
        let sample = dataset.sample().unwrap();
        assert_eq!(sample.roles.len(), sample.messages.len());
        assert!(!sample.is_empty());
        assert_eq!(sample.roles.last().unwrap(), "user");
        assert!(!sample.organic);
        assert_eq!(sample.roles[0], "user");
    }
}

#[test]
fn unaugmented_messages_are_verbatim_prefixes() {
    let file = corpus_file(CORPUS);
    let dataset = ConversationDataset::from_jsonl(file.path())
        .with_seed(9)
        .without_augmentation();
    for _ in 0..50 {
        let sample = dataset.sample().unwrap();
        let first = sample.messages[0].as_str();
        assert!(first == "what is a big cat" || first == "hello", "{first}");
    }
}

#[test]
fn same_seed_same_samples() {
    let file = corpus_file(CORPUS);
    let augmenter = Augmenter::new().with_synonyms("big", ["large", "huge"]);
    let a = ConversationDataset::from_jsonl(file.path())
        .with_augmenter(augmenter.clone())
        .with_seed(1234);
    let b = ConversationDataset::from_jsonl(file.path())
        .with_augmenter(augmenter)
        .with_seed(1234);
    for _ in 0..20 {
        assert_eq!(a.sample().unwrap(), b.sample().unwrap());
    }
}

#[test]
fn missing_file_error_is_returned_every_time() {
    let dataset = ConversationDataset::from_jsonl("/nonexistent/corpus.jsonl");
    assert!(matches!(
        dataset.load_error(),
        Some(SourceError::Unavailable { .. })
    ));
    for _ in 0..3 {
        let err = dataset.sample().unwrap_err();
        assert!(matches!(
            err,
            OrganicError::Source(SourceError::Unavailable { .. })
        ));
        assert!(err.is_recoverable());
    }
}

#[test]
fn malformed_line_fails_the_load() {
    let file = corpus_file("{\"conversation\":[{\"role\":\"user\",\"content\":\"ok\"}]}\nnot json\n");
    let dataset = ConversationDataset::from_jsonl(file.path());
    match dataset.load_error() {
        Some(SourceError::MalformedRecord { line, .. }) => assert_eq!(*line, 2),
        other => panic!("expected malformed record, got {other:?}"),
    }
    assert!(dataset.is_empty());
}

// ── Augmentation leaves assistant turns and roles untouched ───────────

proptest! {
    #[test]
    fn augmentation_preserves_roles_and_assistant_turns(seed in any::<u64>()) {
        let file = corpus_file(CORPUS);
        let dataset = ConversationDataset::from_jsonl(file.path())
            .with_augmenter(Augmenter::new().with_rates(0.5, 0.2))
            .with_seed(seed);
        let sample = dataset.sample().unwrap();
        for (role, message) in sample.roles.iter().zip(&sample.messages) {
            prop_assert!(role == "user" || role == "assistant");
            if role == "assistant" {
                prop_assert!(message == "a lion" || message == "hi there");
            }
        }
    }
}
