//! S3-backed object lister
//!
//! Wraps an AWS SDK client behind [`crate::lister::ObjectLister`], issuing
//! one `ListObjectsV2` request per page. Credentials come from the default
//! AWS provider chain (environment, profile, instance role); this module
//! does not acquire credentials itself.

use crate::error::{DupeScanError, Result};
use crate::lister::{ObjectLister, ObjectPage};
use aws_sdk_s3::error::ProvideErrorMetadata;

/// Paginated S3 listing client
///
/// # Example
///
/// ```no_run
/// use dupescan::cloud::S3Lister;
/// use dupescan::lister::{list_keys, ObjectLister};
/// use dupescan::progress::NoProgress;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // MinIO or another S3-compatible service
///     let lister = S3Lister::builder()
///         .region("us-east-1")
///         .endpoint_url("http://localhost:9000")
///         .force_path_style(true)
///         .build()
///         .await?;
///
///     let keys = list_keys("", &lister, "my-bucket", &NoProgress).await?;
///     println!("{} objects", keys.len());
///     Ok(())
/// }
/// ```
pub struct S3Lister {
    client: aws_sdk_s3::Client,
    page_size: Option<i32>,
}

impl std::fmt::Debug for S3Lister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Lister")
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl S3Lister {
    /// Create a new S3 lister builder
    pub fn builder() -> S3ListerBuilder {
        S3ListerBuilder::default()
    }

    /// Wrap an already-configured SDK client
    ///
    /// Useful when the caller manages AWS configuration itself.
    pub fn from_client(client: aws_sdk_s3::Client) -> Self {
        Self {
            client,
            page_size: None,
        }
    }
}

impl ObjectLister for S3Lister {
    fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> impl std::future::Future<Output = Result<ObjectPage>> + Send {
        let mut req = self.client.list_objects_v2().bucket(bucket);

        if !prefix.is_empty() {
            req = req.prefix(prefix);
        }

        if let Some(token) = continuation_token {
            req = req.continuation_token(token);
        }

        if let Some(page_size) = self.page_size {
            req = req.max_keys(page_size);
        }

        let bucket = bucket.to_string();

        async move {
            let resp = req.send().await.map_err(|e| {
                let code = e.code().unwrap_or("");
                let message = e.message().unwrap_or("Unknown error");

                match code {
                    "NoSuchBucket" => {
                        DupeScanError::ListError(format!("Bucket '{bucket}' does not exist"))
                    }
                    "AccessDenied" => DupeScanError::ListError(format!(
                        "Access denied to bucket '{bucket}'. Error: {message}"
                    )),
                    _ => DupeScanError::ListError(format!(
                        "S3 ListObjectsV2 failed ({code}): {message}"
                    )),
                }
            })?;

            let keys = resp
                .contents()
                .iter()
                .filter_map(|obj| obj.key().map(str::to_string))
                .collect();

            // S3 only hands out a usable token when the response is truncated.
            let next_token = if resp.is_truncated() == Some(true) {
                resp.next_continuation_token().map(str::to_string)
            } else {
                None
            };

            Ok(ObjectPage { keys, next_token })
        }
    }
}

/// Builder for [`S3Lister`]
///
/// Supports AWS S3 and S3-compatible services (MinIO, Cloudflare R2,
/// DigitalOcean Spaces, etc.)
pub struct S3ListerBuilder {
    region: Option<String>,
    endpoint_url: Option<String>,
    force_path_style: bool,
    page_size: Option<i32>,
}

impl Default for S3ListerBuilder {
    fn default() -> Self {
        Self {
            region: Some("us-east-1".to_string()),
            endpoint_url: None,
            force_path_style: false,
            page_size: None,
        }
    }
}

impl S3ListerBuilder {
    /// Set the AWS region (defaults to us-east-1)
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set custom endpoint URL for S3-compatible services
    ///
    /// # Examples
    ///
    /// ```text
    /// // MinIO
    /// .endpoint_url("http://localhost:9000")
    ///
    /// // Cloudflare R2
    /// .endpoint_url("https://<account_id>.r2.cloudflarestorage.com")
    /// ```
    pub fn endpoint_url(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint.into());
        self
    }

    /// Force path-style addressing (required for MinIO and some S3-compatible services)
    ///
    /// When enabled, uses `http://endpoint/bucket/key` instead of `http://bucket.endpoint/key`
    pub fn force_path_style(mut self, force: bool) -> Self {
        self.force_path_style = force;
        self
    }

    /// Cap the number of keys per listing page (S3 allows 1..=1000)
    ///
    /// Left unset, the service default of 1000 applies.
    pub fn page_size(mut self, page_size: i32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Build the S3Lister
    ///
    /// Loads the default AWS configuration, then applies the optional
    /// endpoint and addressing-style overrides.
    ///
    /// # Errors
    /// - Page size outside 1..=1000
    pub async fn build(self) -> Result<S3Lister> {
        if let Some(page_size) = self.page_size {
            if !(1..=1000).contains(&page_size) {
                return Err(DupeScanError::InvalidConfig(format!(
                    "Page size must be between 1 and 1000, got {page_size}"
                )));
            }
        }

        let region_str = self.region.unwrap_or_else(|| "us-east-1".to_string());
        let region_provider = aws_sdk_s3::config::Region::new(region_str);
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&sdk_config);

        if let Some(endpoint) = &self.endpoint_url {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        if self.force_path_style {
            s3_config_builder = s3_config_builder.force_path_style(true);
        }

        let client = aws_sdk_s3::Client::from_conf(s3_config_builder.build());

        Ok(S3Lister {
            client,
            page_size: self.page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region() {
        let builder = S3ListerBuilder::default();
        assert_eq!(builder.region, Some("us-east-1".to_string()));
    }

    #[test]
    fn test_builder_methods() {
        let builder = S3Lister::builder()
            .region("ap-southeast-1")
            .endpoint_url("http://localhost:9000")
            .force_path_style(true)
            .page_size(500);

        assert_eq!(builder.region, Some("ap-southeast-1".to_string()));
        assert_eq!(builder.endpoint_url, Some("http://localhost:9000".to_string()));
        assert!(builder.force_path_style);
        assert_eq!(builder.page_size, Some(500));
    }

    #[test]
    fn test_page_size_validation() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let result = rt.block_on(S3Lister::builder().page_size(0).build());
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("between 1 and 1000"));
    }
}
