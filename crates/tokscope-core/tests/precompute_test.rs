use tokscope_core::{precompute, CoreError, PromptBatch};
use tokscope_tokens::{EncodingProvider, TiktokenProvider};

#[test]
fn test_precompute_skips_blank_lines() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("prompts.txt");
    let output = temp_dir.path().join("tokens.json");
    std::fs::write(&input, "Hello, world!\n   \nThe quick brown fox jumps\n").unwrap();

    let provider = TiktokenProvider::default();
    let batch = precompute(&provider, &input, &output).unwrap();
    assert_eq!(batch.len(), 2);

    // Output file round-trips and preserves input order
    let written: PromptBatch =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written, batch);
    assert_eq!(written.prompts[0].text, "Hello, world!");
    assert_eq!(written.prompts[1].text, "The quick brown fox jumps");

    for record in &written.prompts {
        assert_eq!(record.token_count, record.tokens.len());
        assert_eq!(record.tokens, provider.encode(&record.text).unwrap());
    }
}

#[test]
fn test_precompute_output_is_pretty_printed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("prompts.txt");
    let output = temp_dir.path().join("tokens.json");
    std::fs::write(&input, "hi\n").unwrap();

    let provider = TiktokenProvider::default();
    precompute(&provider, &input, &output).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("{\n  \"prompts\": [\n    {\n      \"text\": \"hi\""));
}

#[test]
fn test_precompute_missing_input_is_io_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("missing.txt");
    let output = temp_dir.path().join("tokens.json");

    let provider = TiktokenProvider::default();
    let err = precompute(&provider, &input, &output).unwrap_err();
    assert!(matches!(err, CoreError::Io(_)));
    assert!(!output.exists());
}
