use anyhow::{Context, Result};
use regex::Regex;

use crate::cloud_providers::aws::datapipeline::{DataPipelineApi, PipelineField};
use crate::status::CheckResult;

const PIPELINE_STATE_KEY: &str = "@pipelineState";
const HEALTH_STATUS_KEY: &str = "@healthStatus";

/// Caller-supplied parameters: which pipeline to check and the patterns its
/// state and health must satisfy.
#[derive(Debug, Clone)]
pub struct CheckParams {
    pub pipeline_name: String,
    pub status_pattern: String,
    pub health_pattern: String,
}

/// Runs the check end to end. Every failure inside the lookup-and-match pass
/// (remote call errors, a bad regex, a malformed response) is folded into an
/// UNKNOWN result; this function never returns an error.
pub async fn run(api: &dyn DataPipelineApi, params: &CheckParams) -> CheckResult {
    match evaluate(api, params).await {
        Ok(result) => result,
        Err(err) => CheckResult::unknown(format!(
            "Pipeline '{}' - {:#}",
            params.pipeline_name, err
        )),
    }
}

async fn evaluate(api: &dyn DataPipelineApi, params: &CheckParams) -> Result<CheckResult> {
    // Compiled before any remote call so a bad pattern costs no API traffic.
    let status_re = Regex::new(&params.status_pattern)
        .with_context(|| format!("invalid status pattern '{}'", params.status_pattern))?;
    let health_re = Regex::new(&params.health_pattern)
        .with_context(|| format!("invalid health pattern '{}'", params.health_pattern))?;

    let pipeline_id = match resolve_pipeline_id(api, &params.pipeline_name).await? {
        Some(id) => id,
        None => {
            return Ok(CheckResult::critical(format!(
                "Pipeline {} not found!",
                params.pipeline_name
            )))
        }
    };
    tracing::debug!(%pipeline_id, "resolved pipeline id");

    let (status, health) = fetch_pipeline_state(api, pipeline_id).await?;

    // An absent field never satisfies a pattern; the state checks are
    // unanchored substring searches, unlike the exact name lookup above.
    let status_matches = status.as_deref().is_some_and(|v| status_re.is_match(v));
    let health_matches = health.as_deref().is_some_and(|v| health_re.is_match(v));

    let status_text = status.unwrap_or_default();
    let health_text = health.unwrap_or_default();
    if status_matches && health_matches {
        Ok(CheckResult::ok(format!(
            "Pipeline '{}' status is '{}' and health is '{}'",
            params.pipeline_name, status_text, health_text
        )))
    } else {
        Ok(CheckResult::critical(format!(
            "Unmatched state - pipeline '{}' status is '{}' and health is '{}'",
            params.pipeline_name, status_text, health_text
        )))
    }
}

/// First pipeline whose name equals `name` exactly, in service order.
async fn resolve_pipeline_id(api: &dyn DataPipelineApi, name: &str) -> Result<Option<String>> {
    let pipelines = api.list_pipelines().await?;
    Ok(pipelines
        .into_iter()
        .find(|pipeline| pipeline.name == name)
        .map(|pipeline| pipeline.id))
}

/// The `@pipelineState` and `@healthStatus` values of one pipeline.
async fn fetch_pipeline_state(
    api: &dyn DataPipelineApi,
    pipeline_id: String,
) -> Result<(Option<String>, Option<String>)> {
    let descriptions = api.describe_pipelines(vec![pipeline_id]).await?;
    let description = descriptions
        .into_iter()
        .next()
        .context("empty DescribePipelines response")?;

    let status = field_value(&description.fields, PIPELINE_STATE_KEY);
    let health = field_value(&description.fields, HEALTH_STATUS_KEY);
    Ok((status, health))
}

/// First-match lookup of a field value by key.
fn field_value(fields: &[PipelineField], key: &str) -> Option<String> {
    fields
        .iter()
        .find(|field| field.key == key)
        .and_then(|field| field.string_value.clone())
}
