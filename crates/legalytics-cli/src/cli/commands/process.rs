//! Document processing commands.

use console::style;

use legalytics::{Config, Pipeline, PipelineError};

use super::to_json;

/// Build the pipeline and report which annotator (if any) will run.
async fn build_pipeline(config: Config) -> Result<Pipeline, PipelineError> {
    let pipeline = Pipeline::from_config(config)?;

    let Some(annotator) = pipeline.annotator() else {
        return Ok(pipeline);
    };
    if annotator.is_available().await {
        eprintln!(
            "{} Annotating with {}",
            style("→").cyan(),
            annotator.display_name()
        );
        return Ok(pipeline);
    }

    eprintln!(
        "{} {} unavailable, continuing without annotations",
        style("!").yellow(),
        annotator.display_name()
    );
    let hint = annotator.availability_hint();
    if !hint.is_empty() {
        eprintln!("  {}", hint);
    }
    Ok(pipeline.without_annotator())
}

/// Print the structured error object and exit non-zero.
fn fail(err: PipelineError, pretty: bool) -> anyhow::Result<()> {
    eprintln!("{} {}", style("✗").red(), err);
    println!("{}", to_json(&err.to_payload(), pretty)?);
    std::process::exit(1);
}

pub async fn cmd_process(config: Config, document_id: &str, pretty: bool) -> anyhow::Result<()> {
    let pipeline = match build_pipeline(config).await {
        Ok(p) => p,
        Err(e) => return fail(e, pretty),
    };

    match pipeline.process_document(document_id).await {
        Ok(payload) => {
            println!("{}", to_json(&payload, pretty)?);
            Ok(())
        }
        Err(e) => fail(e, pretty),
    }
}

pub async fn cmd_records(config: Config, document_id: &str, pretty: bool) -> anyhow::Result<()> {
    let pipeline = match build_pipeline(config).await {
        Ok(p) => p,
        Err(e) => return fail(e, pretty),
    };

    match pipeline.extract_records(document_id).await {
        Ok(records) => {
            println!("{}", to_json(&records, pretty)?);
            Ok(())
        }
        Err(e) => fail(e, pretty),
    }
}
