use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_datapipeline::Client;
use mockall::automock;

/// One entry from the ListPipelines id list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineIdName {
    pub id: String,
    pub name: String,
}

/// One key/value field of a pipeline description, in service order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineField {
    pub key: String,
    pub string_value: Option<String>,
}

/// A described pipeline: its ordered field list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineDescription {
    pub fields: Vec<PipelineField>,
}

/// The two read-only Data Pipeline calls the check performs. The trait is the
/// seam for substituting a mock client in tests.
#[automock]
#[async_trait]
pub trait DataPipelineApi {
    async fn list_pipelines(&self) -> Result<Vec<PipelineIdName>>;
    async fn describe_pipelines(&self, ids: Vec<String>) -> Result<Vec<PipelineDescription>>;
}

pub struct DataPipelineClient {
    client: Client,
}

impl DataPipelineClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl DataPipelineApi for DataPipelineClient {
    async fn list_pipelines(&self) -> Result<Vec<PipelineIdName>> {
        let mut pipelines = Vec::new();
        let mut pages = self.client.list_pipelines().into_paginator().send();

        while let Some(page) = pages.next().await {
            let page = page.context("ListPipelines call failed")?;
            for entry in page.pipeline_id_list() {
                pipelines.push(PipelineIdName {
                    id: entry.id().unwrap_or_default().to_string(),
                    name: entry.name().unwrap_or_default().to_string(),
                });
            }
        }

        tracing::debug!(count = pipelines.len(), "listed pipelines");
        Ok(pipelines)
    }

    async fn describe_pipelines(&self, ids: Vec<String>) -> Result<Vec<PipelineDescription>> {
        let response = self
            .client
            .describe_pipelines()
            .set_pipeline_ids(Some(ids))
            .send()
            .await
            .context("DescribePipelines call failed")?;

        let descriptions = response
            .pipeline_description_list()
            .iter()
            .map(|description| PipelineDescription {
                fields: description
                    .fields()
                    .iter()
                    .map(|field| PipelineField {
                        key: field.key().to_string(),
                        string_value: field.string_value().map(str::to_string),
                    })
                    .collect(),
            })
            .collect();

        Ok(descriptions)
    }
}
