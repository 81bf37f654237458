use std::path::Path;

use lacuna::example::{ChatRecord, OutputFormat, TrainingExample};
use lacuna::pipelines::{
    Batch, Labels, LabelsConfig, Pipeline, Restoration, RestorationConfig, ScrambleMode,
};

const RECORDS: [&str; 5] = [
    r#"{"Edition_with_brackets":"ἔτους δευτέρου Αὐτοκράτορος Καίσαρος -- Τραιανοῦ· ἐπὶ τῆς κώμης ⟨ιβ⟩ Ὀξυρύγχων πόλεως","Edition_without_brackets":"ἔτους δευτέρου Αὐτοκράτορος Καίσαρος -- Τραιανοῦ· ἐπὶ τῆς κώμης ιβ Ὀξυρύγχων πόλεως","date":"100+","place":"Oxyrhynchos (Bahnasa)","TM":12}"#,
    r#"{"Edition_with_brackets":"----------------------------------------------------------------------"}"#,
    r#"{"date":"-50"}"#,
    r#"not a record"#,
    r#"{"Edition_without_brackets":"παρὰ Αὐρηλίου Σαραπίωνος ἀπὸ τῆς λαμπρᾶς καὶ λαμπροτάτης Ὀξυρυγχιτῶν πόλεως","date":"-50±25","place":"null"}"#,
];

fn write_records(dir: &Path) -> std::path::PathBuf {
    let src = dir.join("records.jsonl");
    std::fs::write(&src, RECORDS.join("\n")).unwrap();
    src
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

fn restoration() -> Restoration {
    Restoration::new(RestorationConfig {
        corruption_levels: vec![0.0, 10.0],
        scramble: ScrambleMode::Both,
        ..Default::default()
    })
    .unwrap()
}

#[test_log::test]
fn restoration_rounds() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_records(dir.path());
    let dst = dir.path().join("out");

    let batch = Batch::new(restoration(), src, dst.clone())
        .rounds(2)
        .seed(Some(42));
    let written = batch.run().unwrap();

    // record 1: 2 variants, record 5: 1 variant, each with 2 scrambles and 2 levels
    assert_eq!(written, 2 * (2 + 1) * 2 * 2);
    for round in 1..=2 {
        let path = batch.round_path(round);
        assert_eq!(path, dst.join(format!("text_{}.jsonl", round)));
        let examples: Vec<TrainingExample> = read(&path)
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(examples.len(), 12);
        assert!(examples.iter().all(|e| e.input_text.contains(" letters missing]")));
    }

    // rounds differ
    assert_ne!(read(&batch.round_path(1)), read(&batch.round_path(2)));
}

#[test_log::test]
fn same_seed_same_output() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_records(dir.path());

    let run = |name: &str| {
        let batch = Batch::new(restoration(), src.clone(), dir.path().join(name)).seed(Some(7));
        batch.run().unwrap();
        read(&batch.round_path(1))
    };
    assert_eq!(run("a"), run("b"));
}

#[test_log::test]
fn finished_rounds_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_records(dir.path());
    let dst = dir.path().join("out");
    std::fs::create_dir_all(&dst).unwrap();
    std::fs::write(dst.join("text_1.jsonl"), "kept\n").unwrap();

    let batch = Batch::new(restoration(), src, dst.clone())
        .rounds(2)
        .seed(Some(1));
    assert_eq!(batch.run().unwrap(), 12);
    assert_eq!(read(&dst.join("text_1.jsonl")), "kept\n");
    assert!(dst.join("text_2.jsonl").exists());
    assert!(!dst.join("text_2.jsonl.part").exists());
}

#[test_log::test]
fn segmentation_defects_abort() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("records.jsonl");
    let text = "ἔτους δευτέρου Αὐτοκράτορος Καίσαρος ⟨ιβ Τραιανοῦ ἐπὶ τῆς κώμης Ὀξυρύγχων";
    std::fs::write(&src, format!(r#"{{"Edition_with_brackets":"{}"}}"#, text)).unwrap();
    let dst = dir.path().join("out");

    let batch = Batch::new(restoration(), src, dst.clone()).seed(Some(1));
    assert!(batch.run().is_err());
    assert!(!dst.join("text_1.jsonl").exists());
}

#[test_log::test]
fn chat_labels() {
    let dir = tempfile::tempdir().unwrap();
    let src = write_records(dir.path());
    let dst = dir.path().join("out");

    let labels = Labels::new(LabelsConfig::default()).unwrap();
    let batch = Batch::new(labels, src, dst.clone())
        .seed(Some(3))
        .format(OutputFormat::Chat);
    assert_eq!(batch.run().unwrap(), 2);

    let chats: Vec<ChatRecord> = read(&dst.join("dates_1.jsonl"))
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let targets: Vec<String> = chats
        .into_iter()
        .map(|c| c.into_example().unwrap().target_text)
        .collect();
    assert_eq!(targets, vec!["125".to_string(), "-50".to_string()]);
}

#[test_log::test]
fn undecodable_records_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("records.jsonl");
    let mut data = RECORDS[0].as_bytes().to_vec();
    data.extend_from_slice(b"\n{\"Edition_with_brackets\":\"\xff\xfe\"}\n");
    data.extend_from_slice(RECORDS[4].as_bytes());
    std::fs::write(&src, data).unwrap();
    let dst = dir.path().join("out");

    let batch = Batch::new(restoration(), src, dst).seed(Some(5));
    assert_eq!(batch.run().unwrap(), (2 + 1) * 2 * 2);
    assert!(batch.round_path(1).exists());
}
