//! Source trait and domain-keyed registry.
//!
//! The trait enables dependency injection and mocking for tests. Production
//! code registers the real clients, while tests can substitute
//! [`mocks::MockSource`].

use async_trait::async_trait;

use super::{Release, SourceError};
use crate::config::Config;
use crate::error::{Error, Result};

/// A remote catalog that can describe a release.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Whether this source handles resources under `domain`.
    fn is_mine_resource(&self, domain: &str) -> bool;

    /// Fetch the release behind `uri`.
    async fn fetch(&self, uri: &str) -> std::result::Result<Release, SourceError>;
}

/// Ordered list of sources; the first whose predicate matches wins.
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Box<dyn MetadataSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in source, configured from `config`.
    pub fn with_defaults(config: &Config) -> Result<Self> {
        let mut registry = Self::new();
        registry.register(super::DiscogsClient::from_config(config)?);
        Ok(registry)
    }

    pub fn register(&mut self, source: impl MetadataSource + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Find the source responsible for `uri`.
    pub fn resolve(&self, uri: &str) -> Result<&dyn MetadataSource> {
        let domain = domain_of(uri)?;
        let source = self
            .sources
            .iter()
            .find(|s| s.is_mine_resource(&domain))
            .ok_or_else(|| Error::NoHandler(uri.to_string()))?;

        tracing::debug!(source = source.name(), %domain, "Resolved metadata source");
        Ok(source.as_ref())
    }

    /// Resolve and fetch in one step, validating the album's track total.
    pub async fn fetch(&self, uri: &str) -> Result<Release> {
        let source = self.resolve(uri)?;
        let release = source.fetch(uri).await?;
        release.album.validate(&release.tracks)?;

        tracing::info!(
            source = source.name(),
            album = %release.album.title,
            tracks = release.tracks.len(),
            "Fetched release"
        );
        Ok(release)
    }
}

/// Authority part of a URI: host, plus the port when one is given.
pub fn domain_of(uri: &str) -> Result<String> {
    let url = reqwest::Url::parse(uri).map_err(|e| Error::InvalidResource(format!("{uri}: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidResource(format!("{uri}: missing host")))?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// Mock source for testing.
#[cfg(test)]
pub mod mocks {
    use super::*;

    /// Mock source that returns a predefined release for one domain.
    pub struct MockSource {
        pub domain: String,
        pub release: Option<Release>,
        /// Error to return (takes precedence over release)
        pub error: Option<SourceError>,
    }

    impl MockSource {
        pub fn with_release(domain: &str, release: Release) -> Self {
            Self {
                domain: domain.to_string(),
                release: Some(release),
                error: None,
            }
        }

        pub fn with_error(domain: &str, error: SourceError) -> Self {
            Self {
                domain: domain.to_string(),
                release: None,
                error: Some(error),
            }
        }
    }

    #[async_trait]
    impl MetadataSource for MockSource {
        fn name(&self) -> &str {
            "mock"
        }

        fn is_mine_resource(&self, domain: &str) -> bool {
            self.domain == domain
        }

        async fn fetch(&self, _uri: &str) -> std::result::Result<Release, SourceError> {
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            self.release.clone().ok_or(SourceError::NotFound)
        }
    }
}
