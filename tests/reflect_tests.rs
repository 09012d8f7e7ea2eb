mod common;

use common::{ScriptedGenerator, completion, server_error};
use notepsyche::features::reflect::{analyze_all_notes, process_transcript};
use notepsyche::features::summarize::{
    ANALYSIS_MAX_TOKENS, REFLECTION_MAX_TOKENS, Summarizer,
};
use notepsyche::prompt::{build_analysis_prompt, build_reflection_prompt};
use tempfile::TempDir;

const PRIMARY: &str = "llama-3.3-70b-versatile";

fn file_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test(start_paused = true)]
async fn test_process_transcript_writes_reflection_then_analysis() {
    let out = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(|i, _| {
        Ok(completion(if i == 0 {
            "You sound tired but hopeful."
        } else {
            "- Notice the hope"
        }))
    });
    let summarizer = Summarizer::new(generator, PRIMARY);

    let report = process_transcript(
        &summarizer,
        "Long day at work, walked home.",
        "evening walk.m4a",
        out.path(),
    )
    .await
    .unwrap();

    assert_eq!(report.reflection, "You sound tired but hopeful.");
    assert_eq!(report.analysis, "- Notice the hope");

    let names = file_names(out.path());
    assert_eq!(names.len(), 2);
    assert!(names[0].starts_with("analysis_"));
    assert!(names[0].ends_with("_evening_walk.txt"));
    assert!(names[1].starts_with("summary_"));
    assert!(names[1].ends_with("_evening_walk.txt"));
    assert_eq!(
        names[0].trim_start_matches("analysis_"),
        names[1].trim_start_matches("summary_")
    );

    assert_eq!(
        std::fs::read_to_string(&report.reflection_path).unwrap(),
        "You sound tired but hopeful."
    );
    assert_eq!(
        std::fs::read_to_string(&report.analysis_path).unwrap(),
        "- Notice the hope"
    );

    let calls = summarizer.generator().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0].prompt,
        build_reflection_prompt("Long day at work, walked home.")
    );
    assert_eq!(calls[0].max_tokens, REFLECTION_MAX_TOKENS);
    assert_eq!(
        calls[1].prompt,
        build_analysis_prompt("You sound tired but hopeful.")
    );
    assert_eq!(calls[1].max_tokens, ANALYSIS_MAX_TOKENS);
}

#[tokio::test(start_paused = true)]
async fn test_process_transcript_keeps_reflection_when_analysis_fails() {
    let out = TempDir::new().unwrap();
    let generator = ScriptedGenerator::new(|i, _| {
        if i == 0 {
            Ok(completion("reflection"))
        } else {
            Err(server_error())
        }
    });
    let summarizer = Summarizer::new(generator, PRIMARY);

    let result = process_transcript(&summarizer, "hello", "note", out.path()).await;

    assert!(result.is_err());
    let names = file_names(out.path());
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("summary_"));
    assert!(names[0].ends_with("_note.txt"));
}

#[tokio::test(start_paused = true)]
async fn test_analyze_all_notes_combines_in_name_order() {
    let notes = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    std::fs::write(notes.path().join("b.txt"), "second note").unwrap();
    std::fs::write(notes.path().join("a.txt"), "first note").unwrap();
    std::fs::write(notes.path().join("voice.m4a"), b"\x00\x01").unwrap();

    let generator = ScriptedGenerator::new(|_, request| {
        let answer = if request.prompt.contains("first note") {
            "analysis of a"
        } else {
            "analysis of b"
        };
        Ok(completion(answer))
    });
    let summarizer = Summarizer::new(generator, PRIMARY);

    let path = analyze_all_notes(&summarizer, notes.path(), out.path())
        .await
        .unwrap()
        .unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("combined_analysis_"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "--- a.txt ---\nanalysis of a\n\n\n--- b.txt ---\nanalysis of b\n"
    );
    assert_eq!(summarizer.generator().call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_analyze_all_notes_skips_failed_files() {
    let notes = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    std::fs::write(notes.path().join("a.txt"), "broken").unwrap();
    std::fs::write(notes.path().join("b.txt"), "fine").unwrap();

    let generator = ScriptedGenerator::new(|_, request| {
        if request.prompt.contains("broken") {
            Err(server_error())
        } else {
            Ok(completion("looks fine"))
        }
    });
    let summarizer = Summarizer::new(generator, PRIMARY);

    let path = analyze_all_notes(&summarizer, notes.path(), out.path())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "--- b.txt ---\nlooks fine\n"
    );
    // five attempts for the failing note, one for the other
    assert_eq!(summarizer.generator().call_count(), 6);
}

#[tokio::test]
async fn test_analyze_all_notes_empty_folder() {
    let notes = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let summarizer = Summarizer::new(ScriptedGenerator::numbered(), PRIMARY);

    let result = analyze_all_notes(&summarizer, notes.path(), out.path())
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(file_names(out.path()).is_empty());
    assert_eq!(summarizer.generator().call_count(), 0);
}
