//! Configuration module
//!
//! Settings are read from the process environment (after loading an optional
//! `.env` file) and validated once at startup. Credentials are optional: when
//! `AWS_ACCESS_KEY` and `AWS_SECRET_ACCESS_KEY` are both unset the cloud
//! clients fall back to the provider's default credential chain.

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::time::Duration;

const SERVER_HOST: &str = "0.0.0.0";
const SERVER_PORT: u16 = 8000;
const CORS_ORIGINS: &str = "http://localhost:8000,http://localhost:3000";
const AWS_REGION: &str = "us-east-1";
const AWS_MAX_ATTEMPTS: u32 = 10;
const S3_BUCKET: &str = "videocloud-s3";
const S3_UPLOAD_FOLDER: &str = "uploads/";
const S3_DOWNLOAD_FOLDER: &str = "rendered/";
const UPLOAD_URL_TTL_SECS: u64 = 100;
const DOWNLOAD_URL_TTL_SECS: u64 = 200;
const PROCESSING_FUNCTION_NAME: &str = "videocloud-processing";
const INVOKE_TIMEOUT_SECS: u64 = 300;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Longest lifetime SigV4 allows for a presigned URL (7 days).
pub const MAX_PRESIGN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Explicit access key pair used instead of the default credential chain.
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl Debug for AwsCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Requests served at once before new ones wait for a slot
    pub http_concurrency_limit: usize,
    // AWS client settings
    pub aws_region: String,
    pub aws_credentials: Option<AwsCredentials>,
    pub aws_max_attempts: u32,
    // Object storage
    pub s3_bucket: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub upload_folder: String,
    pub download_folder: String,
    pub upload_url_ttl_secs: u64,
    pub download_url_ttl_secs: u64,
    // Processing function
    pub processing_function_name: String,
    pub invoke_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: SERVER_HOST.to_string(),
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: split_list(CORS_ORIGINS),
            http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
            aws_region: AWS_REGION.to_string(),
            aws_credentials: None,
            aws_max_attempts: AWS_MAX_ATTEMPTS,
            s3_bucket: S3_BUCKET.to_string(),
            s3_endpoint: None,
            upload_folder: S3_UPLOAD_FOLDER.to_string(),
            download_folder: S3_DOWNLOAD_FOLDER.to_string(),
            upload_url_ttl_secs: UPLOAD_URL_TTL_SECS,
            download_url_ttl_secs: DOWNLOAD_URL_TTL_SECS,
            processing_function_name: PROCESSING_FUNCTION_NAME.to_string(),
            invoke_timeout_secs: INVOKE_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|name| env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset. Unparseable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or(defaults.environment);

        let cors_origins = get("CORS_ORIGINS")
            .map(|s| split_list(&s))
            .unwrap_or(defaults.cors_origins);

        let aws_credentials = match (get("AWS_ACCESS_KEY"), get("AWS_SECRET_ACCESS_KEY")) {
            (Some(access_key_id), Some(secret_access_key)) => Some(AwsCredentials {
                access_key_id,
                secret_access_key,
            }),
            (None, None) => None,
            _ => {
                return Err(anyhow::anyhow!(
                    "AWS_ACCESS_KEY and AWS_SECRET_ACCESS_KEY must be set together"
                ))
            }
        };

        Ok(Config {
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or(get("SERVER_PORT"), defaults.server_port),
            environment,
            cors_origins,
            http_concurrency_limit: parse_or(
                get("HTTP_CONCURRENCY_LIMIT"),
                defaults.http_concurrency_limit,
            ),
            aws_region: get("AWS_REGION").unwrap_or(defaults.aws_region),
            aws_credentials,
            aws_max_attempts: parse_or(get("AWS_MAX_ATTEMPTS"), defaults.aws_max_attempts),
            s3_bucket: get("S3_BUCKET").unwrap_or(defaults.s3_bucket),
            s3_endpoint: get("S3_ENDPOINT"),
            upload_folder: get("S3_UPLOAD_FOLDER").unwrap_or(defaults.upload_folder),
            download_folder: get("S3_DOWNLOAD_FOLDER").unwrap_or(defaults.download_folder),
            upload_url_ttl_secs: parse_or(get("UPLOAD_URL_TTL_SECS"), defaults.upload_url_ttl_secs),
            download_url_ttl_secs: parse_or(
                get("DOWNLOAD_URL_TTL_SECS"),
                defaults.download_url_ttl_secs,
            ),
            processing_function_name: get("PROCESSING_FUNCTION_NAME")
                .unwrap_or(defaults.processing_function_name),
            invoke_timeout_secs: parse_or(get("INVOKE_TIMEOUT_SECS"), defaults.invoke_timeout_secs),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.s3_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_BUCKET must not be empty"));
        }

        if self.processing_function_name.trim().is_empty() {
            return Err(anyhow::anyhow!("PROCESSING_FUNCTION_NAME must not be empty"));
        }

        for (name, folder) in [
            ("S3_UPLOAD_FOLDER", &self.upload_folder),
            ("S3_DOWNLOAD_FOLDER", &self.download_folder),
        ] {
            if !folder.ends_with('/') || folder.starts_with('/') {
                return Err(anyhow::anyhow!(
                    "{} must be a relative folder ending with '/' (got '{}')",
                    name,
                    folder
                ));
            }
        }

        for (name, ttl) in [
            ("UPLOAD_URL_TTL_SECS", self.upload_url_ttl_secs),
            ("DOWNLOAD_URL_TTL_SECS", self.download_url_ttl_secs),
        ] {
            if ttl == 0 || ttl > MAX_PRESIGN_TTL_SECS {
                return Err(anyhow::anyhow!(
                    "{} must be between 1 and {} seconds",
                    name,
                    MAX_PRESIGN_TTL_SECS
                ));
            }
        }

        if self.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT must be at least 1"));
        }

        if self.aws_max_attempts == 0 {
            return Err(anyhow::anyhow!("AWS_MAX_ATTEMPTS must be at least 1"));
        }

        if self.invoke_timeout_secs == 0 {
            return Err(anyhow::anyhow!("INVOKE_TIMEOUT_SECS must be at least 1"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn upload_url_ttl(&self) -> Duration {
        Duration::from_secs(self.upload_url_ttl_secs)
    }

    pub fn download_url_ttl(&self) -> Duration {
        Duration::from_secs(self.download_url_ttl_secs)
    }

    pub fn invoke_timeout(&self) -> Duration {
        Duration::from_secs(self.invoke_timeout_secs)
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
