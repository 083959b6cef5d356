use crate::{env_or_default, env_required, ConfigError, FromEnv};
use std::env;

/// Object storage configuration for uploaded assets.
#[derive(Clone, Debug)]
pub struct S3Config {
    /// Bucket that receives uploads.
    pub bucket: String,
    /// Base URL under which stored objects are publicly reachable.
    pub public_base_url: String,
    /// Optional region override; the SDK's default chain applies otherwise.
    pub region: Option<String>,
}

impl S3Config {
    pub fn new(bucket: String, public_base_url: String) -> Self {
        Self {
            bucket,
            public_base_url,
            region: None,
        }
    }

    pub fn with_region(mut self, region: String) -> Self {
        self.region = Some(region);
        self
    }
}

impl FromEnv for S3Config {
    /// Reads from environment variables:
    /// - S3_BUCKET: required
    /// - S3_PUBLIC_URL: defaults to the bucket's virtual-hosted S3 URL
    /// - AWS_REGION: optional
    fn from_env() -> Result<Self, ConfigError> {
        let bucket = env_required("S3_BUCKET")?;
        let public_base_url = env_or_default(
            "S3_PUBLIC_URL",
            &format!("https://{}.s3.amazonaws.com", bucket),
        );

        Ok(Self {
            bucket,
            public_base_url,
            region: env::var("AWS_REGION").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_s3_config_requires_bucket() {
        temp_env::with_var_unset("S3_BUCKET", || {
            let result = S3Config::from_env();
            assert!(result.is_err());
            assert!(result.unwrap_err().to_string().contains("S3_BUCKET"));
        });
    }

    #[test]
    fn test_s3_config_derives_public_url_from_bucket() {
        temp_env::with_vars(
            [
                ("S3_BUCKET", Some("catalog-assets")),
                ("S3_PUBLIC_URL", None),
                ("AWS_REGION", None),
            ],
            || {
                let config = S3Config::from_env().unwrap();
                assert_eq!(config.bucket, "catalog-assets");
                assert_eq!(
                    config.public_base_url,
                    "https://catalog-assets.s3.amazonaws.com"
                );
                assert_eq!(config.region, None);
            },
        );
    }

    #[test]
    fn test_s3_config_with_explicit_values() {
        temp_env::with_vars(
            [
                ("S3_BUCKET", Some("catalog-assets")),
                ("S3_PUBLIC_URL", Some("https://cdn.example.com")),
                ("AWS_REGION", Some("ap-south-1")),
            ],
            || {
                let config = S3Config::from_env().unwrap();
                assert_eq!(config.public_base_url, "https://cdn.example.com");
                assert_eq!(config.region.as_deref(), Some("ap-south-1"));
            },
        );
    }

    #[test]
    fn test_s3_config_builder() {
        let config = S3Config::new("b".to_string(), "https://cdn.test".to_string())
            .with_region("us-east-1".to_string());
        assert_eq!(config.region.as_deref(), Some("us-east-1"));
    }
}
