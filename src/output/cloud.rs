//! S3 upload
//!
//! The client is built from the profile's explicit credentials; nothing is
//! read from or written to the process environment. The object key equals
//! the local filename, so a re-run overwrites the prior object.

use crate::config::JobProfile;
use crate::error::{Error, Result};
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Uploads a local artifact into the configured bucket
pub struct ObjectUploader {
    store: Arc<dyn ObjectStore>,
    bucket: String,
}

impl ObjectUploader {
    /// Build an S3 client from the profile's credentials, bucket and region
    pub fn from_profile(profile: &JobProfile) -> Result<Self> {
        let store = AmazonS3Builder::new()
            .with_bucket_name(&profile.aws_s3_bucket)
            .with_region(&profile.aws_region)
            .with_access_key_id(&profile.aws_access_key_id)
            .with_secret_access_key(&profile.aws_secret_access_key)
            .build()
            .map_err(|e| Error::upload(format!("Failed to create S3 client: {e}")))?;

        Ok(Self {
            store: Arc::new(store),
            bucket: profile.aws_s3_bucket.clone(),
        })
    }

    /// Upload the file under a key equal to its filename, overwriting any
    /// existing object. Returns the `s3://bucket/key` URI for the report.
    pub async fn upload(&self, local: &Path) -> Result<String> {
        let key = object_key(local)?;
        let data = fs::read(local)?;

        let path = ObjectPath::from(key.as_str());
        self.store
            .put(&path, Bytes::from(data).into())
            .await
            .map_err(|e| Error::upload(format!("Failed to transfer {key}: {e}")))?;

        Ok(format!("s3://{}/{key}", self.bucket))
    }

    /// Bucket this uploader targets
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Remote object key: the local filename, nothing else
pub fn object_key(local: &Path) -> Result<String> {
    local
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::upload(format!("No filename in path {}", local.display())))
}
