use clap::Parser;

use crate::check::CheckParams;
use crate::cloud_providers::aws::config::AwsAuth;

pub const DEFAULT_REGION: &str = "us-east-1";

const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY";
const SECRET_KEY_VAR: &str = "AWS_SECRET_KEY";

/// Check the status and health of an AWS Data Pipeline.
///
/// Emits a single line on stdout and exits 0 (OK), 2 (CRITICAL) or
/// 3 (UNKNOWN) for the monitoring scheduler.
#[derive(Parser, Debug)]
#[clap(name = "check-datapipeline", version)]
pub struct Cli {
    /// AWS access key id. Falls back to the AWS_ACCESS_KEY environment variable.
    #[clap(short = 'a', long)]
    pub aws_access_key: Option<String>,

    /// AWS secret access key. Falls back to the AWS_SECRET_KEY environment variable.
    #[clap(short = 'k', long)]
    pub aws_secret_access_key: Option<String>,

    /// AWS region.
    #[clap(short = 'r', long, default_value = DEFAULT_REGION)]
    pub aws_region: String,

    /// Name of the data pipeline to check.
    #[clap(short = 'p', long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub pipeline_name: String,

    /// Regex the pipeline status must match, e.g. 'SCHEDULED|RUNNING'.
    #[clap(short = 's', long)]
    pub status: String,

    /// Regex the pipeline health must match, e.g. 'HEALTHY'.
    #[clap(long)]
    pub health: String,
}

impl Cli {
    /// Credential resolution order: flag, then environment variable, then the
    /// SDK default chain.
    pub fn aws_auth(&self) -> AwsAuth {
        let access_key = self
            .aws_access_key
            .clone()
            .or_else(|| non_empty_var(ACCESS_KEY_VAR));
        let secret_key = self
            .aws_secret_access_key
            .clone()
            .or_else(|| non_empty_var(SECRET_KEY_VAR));

        match (access_key, secret_key) {
            (Some(access_key_id), Some(secret_access_key)) => AwsAuth::Keys {
                access_key_id,
                secret_access_key,
            },
            _ => AwsAuth::Env,
        }
    }

    pub fn check_params(&self) -> CheckParams {
        CheckParams {
            pipeline_name: self.pipeline_name.clone(),
            status_pattern: self.status.clone(),
            health_pattern: self.health.clone(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).expect("args should parse")
    }

    #[test]
    fn region_defaults_to_us_east_1() {
        let cli = parse(&[
            "check-datapipeline",
            "--pipeline-name",
            "mypipeline",
            "--status",
            "RUNNING",
            "--health",
            "HEALTHY",
        ]);
        assert_eq!(cli.aws_region, DEFAULT_REGION);
    }

    #[test]
    fn pipeline_name_is_required() {
        let result = Cli::try_parse_from([
            "check-datapipeline",
            "--status",
            "RUNNING",
            "--health",
            "HEALTHY",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn empty_pipeline_name_is_rejected() {
        let result = Cli::try_parse_from([
            "check-datapipeline",
            "--pipeline-name",
            "",
            "--status",
            "RUNNING",
            "--health",
            "HEALTHY",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn key_flags_take_precedence_over_environment() {
        let cli = parse(&[
            "check-datapipeline",
            "-a",
            "AKIAEXAMPLE",
            "-k",
            "secret",
            "-p",
            "mypipeline",
            "-s",
            "RUNNING",
            "--health",
            "HEALTHY",
        ]);
        // Flags are present, so the environment is never consulted.
        match cli.aws_auth() {
            AwsAuth::Keys {
                access_key_id,
                secret_access_key,
            } => {
                assert_eq!(access_key_id, "AKIAEXAMPLE");
                assert_eq!(secret_access_key, "secret");
            }
            AwsAuth::Env => panic!("expected explicit key credentials"),
        }
    }

    #[test]
    fn partial_credentials_fall_back_to_the_default_chain() {
        std::env::remove_var(ACCESS_KEY_VAR);
        std::env::remove_var(SECRET_KEY_VAR);

        let cli = parse(&[
            "check-datapipeline",
            "-a",
            "AKIAEXAMPLE",
            "-p",
            "mypipeline",
            "-s",
            "RUNNING",
            "--health",
            "HEALTHY",
        ]);
        assert!(matches!(cli.aws_auth(), AwsAuth::Env));
    }
}
