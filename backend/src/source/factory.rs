//! Source construction from configuration.

use std::sync::Arc;

use super::{FileTaxiSource, HttpTaxiSource, SourceError, SourceType, StaticTaxiSource, TaxiSource};
use crate::config::SourceSettings;

/// Builds the configured [`TaxiSource`].
pub struct SourceFactory;

impl SourceFactory {
    pub fn create(settings: &SourceSettings) -> Result<Arc<dyn TaxiSource>, SourceError> {
        let source: Arc<dyn TaxiSource> = match settings.source_type {
            SourceType::Http => Arc::new(HttpTaxiSource::new(settings.url.clone(), settings.timeout())?),
            SourceType::File => {
                let path = settings.path.as_ref().ok_or_else(|| {
                    SourceError::Unavailable("file source configured without a path".to_string())
                })?;
                Arc::new(FileTaxiSource::new(path))
            }
            SourceType::Static => Arc::new(StaticTaxiSource::empty()),
        };
        log::info!("Using {} taxi source", source.name());
        Ok(source)
    }
}
