//! End-to-end pipeline tests with in-process fakes.

use std::sync::Arc;

use async_trait::async_trait;
use legalytics::models::Annotation;
use legalytics::source::InMemorySource;
use legalytics::{
    AnnotationError, Annotator, Block, Config, DocumentSource, Pipeline, PipelineError,
    SourceError, Stopwords,
};

const DOC: &str = "perda-dki-8-2007";

fn blocks() -> Vec<Block> {
    vec![
        Block::new("Peraturan Daerah tentang Ketertiban Umum").with_meta("No", "1"),
        Block::new(
            "Ditetapkan di Jakarta pada tanggal 10 September 2007. \
             Denda paling banyak Rp50.000.000 bagi pelanggar.",
        )
        .with_meta("No", "2"),
        Block::without_content().with_meta("No", "3"),
        Block::new("Setiap orang dilarang: membuang sampah ke sungai.").with_meta("No", "4"),
    ]
}

fn pipeline(annotator: Option<Arc<dyn Annotator>>) -> Pipeline {
    let source = InMemorySource::new().with_document(DOC, blocks());
    Pipeline::new(
        Config::base_default(),
        Arc::new(source),
        annotator,
        Arc::new(Stopwords::from_words(["di", "pada", "bagi", "ke", "tentang"])),
    )
}

struct AlwaysFails;

#[async_trait]
impl Annotator for AlwaysFails {
    fn annotation_type(&self) -> &str {
        "always_fails"
    }
    fn display_name(&self) -> &str {
        "Always Fails"
    }
    async fn annotate(&self, _chunk: &str) -> Result<Vec<Annotation>, AnnotationError> {
        Err(AnnotationError::Failed("service returned 503".into()))
    }
}

struct FirstWords;

#[async_trait]
impl Annotator for FirstWords {
    fn annotation_type(&self) -> &str {
        "first_words"
    }
    fn display_name(&self) -> &str {
        "First Words"
    }
    async fn annotate(&self, chunk: &str) -> Result<Vec<Annotation>, AnnotationError> {
        let text = chunk.split_whitespace().take(2).collect::<Vec<_>>().join(" ");
        Ok(vec![Annotation::Insight { text }])
    }
}

struct Unreachable;

#[async_trait]
impl DocumentSource for Unreachable {
    fn source_id(&self) -> &str {
        "unreachable"
    }
    async fn fetch(&self, _document_id: &str) -> Result<Vec<Block>, SourceError> {
        Err(SourceError::Connection("connection refused".into()))
    }
}

#[tokio::test]
async fn test_process_document_tables() {
    let payload = pipeline(None).process_document(DOC).await.unwrap();

    let money: Vec<&str> = payload.tables.money.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(money, vec!["Rp50.000.000"]);
    let dates: Vec<&str> = payload.tables.dates.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["10 September 2007"]);
    let prohibitions: Vec<&str> = payload
        .tables
        .prohibitions
        .iter()
        .map(|r| r.text.as_str())
        .collect();
    assert_eq!(prohibitions, vec!["membuang sampah ke sungai"]);

    assert!(payload.tables.money.iter().all(|r| r.insight.is_none()));
    assert!(payload.word_cloud.len() <= 30);
    assert!(payload.word_cloud.iter().all(|w| w.text != "di" && w.text != "ke"));
    assert!(payload.word_cloud.iter().all(|w| !w.text.chars().all(char::is_numeric)));
}

#[tokio::test]
async fn test_records_drop_absent_content() {
    let records = pipeline(None).extract_records(DOC).await.unwrap();
    let numbers: Vec<&str> = records
        .iter()
        .map(|r| r.metadata["No"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(numbers, vec!["1", "2", "4"]);
}

#[tokio::test]
async fn test_failing_annotator_degrades_gracefully() {
    let plain = pipeline(None).process_document(DOC).await.unwrap();
    let degraded = pipeline(Some(Arc::new(AlwaysFails)))
        .process_document(DOC)
        .await
        .unwrap();

    assert_eq!(plain, degraded);
    assert!(degraded.tables.dates.iter().all(|r| r.insight.is_none()));

    let records = pipeline(Some(Arc::new(AlwaysFails)))
        .extract_records(DOC)
        .await
        .unwrap();
    assert!(records.iter().all(|r| r.annotations.is_none()));
}

#[tokio::test]
async fn test_insights_attach_to_rows() {
    let payload = pipeline(Some(Arc::new(FirstWords)))
        .process_document(DOC)
        .await
        .unwrap();

    assert_eq!(
        payload.tables.money[0].insight.as_deref(),
        Some("Ditetapkan di")
    );
    assert_eq!(
        payload.tables.prohibitions[0].insight.as_deref(),
        Some("Setiap orang")
    );
}

#[tokio::test]
async fn test_source_failure_is_fatal() {
    let pipeline = Pipeline::new(
        Config::base_default(),
        Arc::new(Unreachable),
        None,
        Arc::new(Stopwords::empty()),
    );
    let err = pipeline.process_document(DOC).await.unwrap_err();
    assert!(matches!(
        err,
        PipelineError::SourceUnavailable { ref document_id, .. } if document_id == DOC
    ));

    let payload = serde_json::to_value(err.to_payload()).unwrap();
    assert_eq!(payload["error"]["kind"], "source_unavailable");
}

#[tokio::test]
async fn test_unknown_document_is_source_unavailable() {
    let err = pipeline(None).process_document("missing").await.unwrap_err();
    assert_eq!(err.kind(), "source_unavailable");
}

#[tokio::test]
async fn test_detached_annotator_is_never_called() {
    let pipeline = pipeline(Some(Arc::new(FirstWords))).without_annotator();
    assert!(pipeline.annotator().is_none());

    let records = pipeline.extract_records(DOC).await.unwrap();
    assert!(records.iter().all(|r| r.annotations.is_none()));
    assert_eq!(records[1].money, vec!["Rp50.000.000"]);
}

#[tokio::test]
async fn test_identical_input_identical_output() {
    let first = pipeline(None).process_document(DOC).await.unwrap();
    let second = pipeline(None).process_document(DOC).await.unwrap();
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[tokio::test]
async fn test_from_config_with_file_source_and_stopwords() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("uu-3-2020.json"),
        r#"{
            "Judul": "Undang-Undang Nomor 3 Tahun 2020",
            "Blocks": [
                {"content": "Pertambangan mineral dan batubara. Pertambangan rakyat.", "chunks": []},
                {"content": null}
            ]
        }"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("stopwords.txt"), "dan\nyang 12\n").unwrap();

    let mut config = Config::base_default();
    config.source.kind = legalytics::config::SourceKind::File;
    config.source.data_dir = Some(dir.path().to_path_buf());
    config.annotation.strategy = legalytics::AnnotationStrategy::None;
    config.aggregation.stopwords_path = Some(dir.path().join("stopwords.txt"));

    let pipeline = Pipeline::from_config(config).unwrap();
    let payload = pipeline.process_document("uu-3-2020").await.unwrap();

    assert_eq!(payload.word_cloud[0].text, "pertambangan");
    assert_eq!(payload.word_cloud[0].value, 2);
    assert!(payload.word_cloud.iter().all(|w| w.text != "dan"));
}

#[tokio::test]
async fn test_two_block_document() {
    let source = InMemorySource::new().with_document(
        "two",
        vec![
            Block::new("Menimbang bahwa perlu menetapkan peraturan"),
            Block::new("Berlaku sejak 1 Januari 2024 dengan tarif Rp25.000 per orang"),
        ],
    );
    let pipeline = Pipeline::new(
        Config::base_default(),
        Arc::new(source),
        None,
        Arc::new(Stopwords::empty()),
    );
    let payload = pipeline.process_document("two").await.unwrap();

    assert_eq!(payload.tables.money.len(), 1);
    assert_eq!(payload.tables.money[0].value, "Rp25.000");
    assert_eq!(payload.tables.dates.len(), 1);
    assert_eq!(payload.tables.dates[0].date, "1 Januari 2024");
    assert!(payload.tables.prohibitions.is_empty());
}
