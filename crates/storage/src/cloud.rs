//! S3-compatible object storage disk.

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::config::CloudDiskConfig;
use crate::disk::{content_type_for, normalize_path, Disk};
use crate::error::StorageError;

/// A disk backed by a single S3 bucket, optionally under a key prefix.
#[derive(Debug, Clone)]
pub struct S3Disk {
    name: String,
    client: Client,
    bucket: String,
    prefix: String,
    base_url: String,
}

impl S3Disk {
    /// Build an S3 client from `config`.
    ///
    /// Static credentials are used when both key id and secret are set;
    /// otherwise the default AWS provider chain applies. A custom endpoint
    /// switches to path-style addressing for S3-compatible services.
    pub async fn connect(name: impl Into<String>, config: &CloudDiskConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            builder = builder.credentials_provider(Credentials::new(
                key_id.clone(),
                secret.clone(),
                None,
                None,
                "assetdesk-static",
            ));
        }
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint.clone()).force_path_style(true);
        }

        let base_url = match &config.endpoint {
            Some(endpoint) => format!("{}/{}", endpoint.trim_end_matches('/'), config.bucket),
            None => format!("https://{}.s3.{}.amazonaws.com", config.bucket, config.region),
        };

        Self {
            name: name.into(),
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            prefix: config.prefix.trim_matches('/').to_string(),
            base_url,
        }
    }

    fn key(&self, path: &str) -> Result<String, StorageError> {
        let path = normalize_path(path)?;
        if self.prefix.is_empty() {
            Ok(path)
        } else {
            Ok(format!("{}/{path}", self.prefix))
        }
    }
}

#[async_trait]
impl Disk for S3Disk {
    fn name(&self) -> &str {
        &self.name
    }

    async fn put(&self, path: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let key = self.key(path)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type_for(&key))
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::Remote(format!("put {key}: {}", e.into_service_error())))?;
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let key = self.key(path)?;
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let service = e.into_service_error();
                if service.is_no_such_key() {
                    return Err(StorageError::NotFound {
                        disk: self.name.clone(),
                        path: path.to_string(),
                    });
                }
                return Err(StorageError::Remote(format!("get {key}: {service}")));
            }
        };

        let data = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Remote(format!("read {key}: {e}")))?;
        Ok(data.into_bytes().to_vec())
    }

    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        let key = self.key(path)?;
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service = e.into_service_error();
                if service.is_not_found() {
                    Ok(false)
                } else {
                    Err(StorageError::Remote(format!("head {key}: {service}")))
                }
            }
        }
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let key = self.key(path)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| StorageError::Remote(format!("delete {key}: {}", e.into_service_error())))?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.prefix.is_empty() {
            format!("{}/{path}", self.base_url)
        } else {
            format!("{}/{}/{path}", self.base_url, self.prefix)
        }
    }
}
