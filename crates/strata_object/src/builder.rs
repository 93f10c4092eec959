// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use object_store::ObjectStore;
use strata_tier::{Error, Result, Transform};

use crate::RemoteStore;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Builder for configuring a [`RemoteStore`].
///
/// # Examples
///
/// ```
/// use strata_object::RemoteStoreBuilder;
///
/// let builder = RemoteStoreBuilder::<Vec<u8>>::s3("my-bucket", "cache/v1")
///     .region("us-east-2")
///     .endpoint("http://localhost:9000")
///     .verbose(false);
///
/// // Creating the S3 client needs the `aws` feature.
/// if cfg!(not(feature = "aws")) {
///     assert!(builder.build().unwrap_err().is_configuration());
/// }
/// ```
pub struct RemoteStoreBuilder<V> {
    bucket: String,
    prefix: String,
    region: String,
    endpoint: Option<String>,
    client: Option<Arc<dyn ObjectStore>>,
    transform: Transform<V>,
    verbose: bool,
}

impl<V> fmt::Debug for RemoteStoreBuilder<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStoreBuilder")
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("client", &self.client)
            .field("transform", &self.transform)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl<V: Send + Sync + 'static> RemoteStoreBuilder<V> {
    /// Creates a builder for an Amazon S3 backed store.
    ///
    /// The client is created by [`build`](Self::build) with credentials taken
    /// from the environment.
    #[must_use]
    pub fn s3(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            region: DEFAULT_REGION.to_string(),
            endpoint: None,
            client: None,
            transform: Transform::new(),
            verbose: true,
        }
    }

    /// Creates a builder around an existing client.
    ///
    /// `bucket` only identifies the store; the client decides where objects
    /// actually go.
    #[must_use]
    pub fn with_client(bucket: impl Into<String>, prefix: impl Into<String>, client: Arc<dyn ObjectStore>) -> Self {
        Self {
            client: Some(client),
            ..Self::s3(bucket, prefix)
        }
    }

    /// Sets the service region. Defaults to [`DEFAULT_REGION`].
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets a custom service endpoint, for S3-compatible services.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the function applied to values before they are uploaded.
    #[must_use]
    pub fn encode<F>(mut self, encode: F) -> Self
    where
        F: Fn(V) -> Result<Bytes> + Send + Sync + 'static,
    {
        self.transform = self.transform.with_encode(encode);
        self
    }

    /// Sets the function applied to object bodies after they are fetched.
    #[must_use]
    pub fn decode<F>(mut self, decode: F) -> Self
    where
        F: Fn(Bytes) -> Result<V> + Send + Sync + 'static,
    {
        self.transform = self.transform.with_decode(decode);
        self
    }

    /// Replaces both transform stages at once.
    #[must_use]
    pub fn transform(mut self, transform: Transform<V>) -> Self {
        self.transform = transform;
        self
    }

    /// Enables or disables the per-operation `tracing` events.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builds the store, creating the S3 client if none was supplied.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the bucket name is empty, if an encode
    /// or decode function is missing for a value type that is not raw bytes or
    /// text, or if the S3 client cannot be created. Without the `aws` feature,
    /// building an S3 store always fails with a configuration error.
    pub fn build(self) -> Result<RemoteStore<V>> {
        if self.bucket.is_empty() {
            return Err(Error::configuration("a bucket name is required"));
        }
        self.transform.validate()?;

        let client = match self.client {
            Some(client) => client,
            None => s3_client(&self.bucket, &self.region, self.endpoint.as_deref())?,
        };

        Ok(RemoteStore::new(
            self.bucket,
            self.prefix,
            self.region,
            client,
            self.transform,
            self.verbose,
        ))
    }
}

#[cfg(feature = "aws")]
fn s3_client(bucket: &str, region: &str, endpoint: Option<&str>) -> Result<Arc<dyn ObjectStore>> {
    use object_store::aws::AmazonS3Builder;

    let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket).with_region(region);
    if let Some(endpoint) = endpoint {
        builder = builder.with_endpoint(endpoint);
    }
    let client = builder.build().map_err(Error::configuration)?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "aws"))]
fn s3_client(_bucket: &str, _region: &str, _endpoint: Option<&str>) -> Result<Arc<dyn ObjectStore>> {
    Err(Error::configuration(
        "the S3 client is unavailable: enable the `aws` feature or supply a client with `with_client`",
    ))
}
