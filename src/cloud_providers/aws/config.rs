use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;

/// How the check authenticates to AWS.
#[derive(Clone, Debug)]
pub enum AwsAuth {
    /// Explicit key pair, from flags or the AWS_ACCESS_KEY / AWS_SECRET_KEY
    /// environment variables.
    Keys {
        access_key_id: String,
        secret_access_key: String,
    },
    /// SDK default provider chain (environment, profile, IMDS).
    Env,
}

// The SDK may fall back to IMDS when running inside EC2.
pub async fn resolve_aws_config(auth: AwsAuth, region: impl Into<String>) -> SdkConfig {
    let region = Region::new(region.into());
    let loader = aws_config::defaults(BehaviorVersion::latest());
    let loader = match auth {
        AwsAuth::Keys {
            access_key_id,
            secret_access_key,
        } => {
            tracing::debug!("Using explicit access key credentials");
            loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                None,
                None,
                "check-datapipeline",
            ))
        }
        AwsAuth::Env => {
            tracing::debug!("Using the default AWS credentials chain");
            loader
        }
    };
    loader.region(region).load().await
}
