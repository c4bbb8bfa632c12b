//! Configuration management for Lambda functions.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table holding appointment requests
    pub table_name: Option<String>,
    /// S3 bucket serving images linked from the index page
    pub assets_bucket: String,
    /// Verified SES sender address
    pub from_email: String,
    /// Where new-request alerts are sent
    pub operator_email: String,
    /// Business name used in emails
    pub business_name: String,
    /// Business phone used in emails
    pub business_phone: String,
    /// AWS region
    pub aws_region: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Self {
            table_name: var("DYNAMODB_TABLE"),
            assets_bucket: or("S3_BUCKET", "poli-notary-assets"),
            from_email: or("FROM_EMAIL", "noreply@polinotary.com"),
            operator_email: or("OPERATOR_EMAIL", "info@polinotary.com"),
            business_name: or("BUSINESS_NAME", "Poli Notary"),
            business_phone: or("BUSINESS_PHONE", "(555) 123-4567"),
            aws_region: or("AWS_REGION", "us-east-1"),
        }
    }

    /// Base URL for images in the asset bucket.
    pub fn assets_base_url(&self) -> String {
        format!("https://{}.s3.amazonaws.com/assets/images", self.assets_bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.table_name, None);
        assert_eq!(config.assets_bucket, "poli-notary-assets");
        assert_eq!(config.operator_email, "info@polinotary.com");
        assert_eq!(config.aws_region, "us-east-1");
    }

    #[test]
    fn test_empty_table_is_unset() {
        let config = config(&[("DYNAMODB_TABLE", "  ")]);
        assert_eq!(config.table_name, None);
    }

    #[test]
    fn test_assets_base_url() {
        let config = config(&[("DYNAMODB_TABLE", "submissions"), ("S3_BUCKET", "site-assets")]);
        assert_eq!(config.table_name.as_deref(), Some("submissions"));
        assert_eq!(
            config.assets_base_url(),
            "https://site-assets.s3.amazonaws.com/assets/images"
        );
    }
}
