use std::fs;

use calibration_corpus::apps::{run_prepare_counseling, run_prepare_dailydialog};
use calibration_corpus::read_examples;

fn args(values: Vec<String>) -> impl Iterator<Item = String> {
    values.into_iter()
}

#[test]
fn dailydialog_runner_writes_capped_examples() {
    let temp = tempfile::tempdir().expect("failed creating tempdir");
    let root = temp.path().join("dailydialog");
    fs::create_dir_all(&root).unwrap();
    fs::write(
        root.join("DailyDialog.csv"),
        "dialog,act,emotion\n\
         \"Hi __eou__ Hello __eou__ How are you?\",\"[1, 2, 3]\",\"[0, 0, 4]\"\n\
         \"only one turn\",\"[1]\",\"[0]\"\n\
         \"Bye __eou__ See you\",,\n",
    )
    .unwrap();
    let output = temp.path().join("out").join("dailydialog_examples.json");

    run_prepare_dailydialog(args(vec![
        "--dataset-root".to_string(),
        root.display().to_string(),
        "--max-examples".to_string(),
        "2".to_string(),
        "--output".to_string(),
        output.display().to_string(),
    ]))
    .expect("dailydialog run failed");

    let saved = read_examples(&output).unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].user, "Hi");
    assert_eq!(saved[0].intent, "2");
    assert_eq!(saved[1].assistant, "How are you?");
    assert_eq!(saved[1].emotion, "4");
}

#[test]
fn dailydialog_runner_honors_explicit_file_path() {
    let temp = tempfile::tempdir().expect("failed creating tempdir");
    fs::write(temp.path().join("DailyDialog.csv"), "dialog\n\"x __eou__ y\"\n").unwrap();
    fs::write(
        temp.path().join("custom.jsonl"),
        "{\"utterances\": [\"a\", \"b\", \"c\"]}\n",
    )
    .unwrap();
    let output = temp.path().join("custom.json");

    run_prepare_dailydialog(args(vec![
        "--dataset-root".to_string(),
        temp.path().display().to_string(),
        "--file-path".to_string(),
        "custom.jsonl".to_string(),
        "--max-examples".to_string(),
        "0".to_string(),
        "--output".to_string(),
        output.display().to_string(),
    ]))
    .expect("dailydialog run failed");

    let saved = read_examples(&output).unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].user, "a");
}

#[test]
fn dailydialog_runner_fails_without_dataset() {
    let temp = tempfile::tempdir().expect("failed creating tempdir");
    let err = run_prepare_dailydialog(args(vec![
        "--dataset-root".to_string(),
        temp.path().join("missing").display().to_string(),
        "--output".to_string(),
        temp.path().join("never.json").display().to_string(),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains("failed to load dataset"));
    assert!(!temp.path().join("never.json").exists());
}

#[test]
fn counseling_runner_reads_local_json_lines() {
    let temp = tempfile::tempdir().expect("failed creating tempdir");
    fs::write(
        temp.path().join("combined_dataset.json"),
        "{\"Context\": \"I can't sleep\", \"Response\": \"Tell me about your evenings\"}\n\
         {\"Context\": \"\", \"Response\": \"orphan answer\"}\n\
         {\"Context\": \"I feel anxious\", \"Response\": \"Let's talk about it\", \"topic\": \"anxiety\"}\n",
    )
    .unwrap();
    let output = temp.path().join("counseling.json");

    run_prepare_counseling(args(vec![
        "--dataset-root".to_string(),
        temp.path().display().to_string(),
        "--max-examples".to_string(),
        "-1".to_string(),
        "--output".to_string(),
        output.display().to_string(),
    ]))
    .expect("counseling run failed");

    let saved = read_examples(&output).unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].intent, "counseling");
    assert_eq!(saved[1].intent, "anxiety");
    assert!(saved.iter().all(|example| example.emotion.is_empty()));
}
