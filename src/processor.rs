//! # Data processors
//!
//! A [`DataProcessor`] turns an uploaded [`DataProduct`] into [`ReducedDatum`]s ready
//! for storage. Each processor reports the data type it handles and decides, from
//! the product's MIME type, whether it can read it.
//!
//! [`AdesProcessor`] is the processor for ADES astrometry. It routes plaintext
//! products (`text/plain`, `text/csv` by default) to the PSV reader and rejects
//! anything else with `InvalidFileFormat("Unsupported file type")`.
//!
//! ```rust,no_run
//! use ades_ingest::{AdesProcessor, DataProcessor, DataProduct, FileSystemStorage};
//!
//! let processor = AdesProcessor::new(FileSystemStorage::new("/srv/tom/data"));
//! let product = DataProduct::new("targets/2025HX3/ades_astrometry.psv");
//! for datum in processor.process_data(&product)? {
//!     println!("{} {} {:?}", datum.timestamp, datum.source, datum.value.magnitude);
//! }
//! # Ok::<(), ades_ingest::IngestError>(())
//! ```
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
    ades_reader,
    config::ProcessorConfig,
    constants::{ADES_DATA_TYPE, FALLBACK_MIMETYPE},
    ingest_errors::IngestError,
    measurement::{AstrometryValue, Measurement},
    storage::{guess_mimetype, Storage},
};

/// An uploaded file, addressed by its name in a [`Storage`] backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataProduct {
    pub name: String,
    /// Data type chosen at upload, if any
    pub data_type: Option<String>,
}

impl DataProduct {
    pub fn new(name: impl Into<String>) -> Self {
        DataProduct {
            name: name.into(),
            data_type: None,
        }
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }
}

/// One storable datum: `(timestamp, value, source)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReducedDatum<V> {
    pub timestamp: DateTime<Utc>,
    pub value: V,
    pub source: String,
}

impl<V: Serialize> ReducedDatum<V> {
    /// The value as JSON, in the shape it is persisted.
    pub fn value_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.value)
    }
}

/// A processor for one kind of data product.
pub trait DataProcessor {
    type Value: Serialize;

    /// Data type recorded on the reduced data this processor produces.
    fn data_type_override(&self) -> &'static str;

    fn process_data(
        &self,
        product: &DataProduct,
    ) -> Result<Vec<ReducedDatum<Self::Value>>, IngestError>;
}

/// Processor for ADES astrometry and photometry files.
#[derive(Debug, Clone)]
pub struct AdesProcessor<S> {
    storage: S,
    config: ProcessorConfig,
}

impl<S: Storage> AdesProcessor<S> {
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, ProcessorConfig::default())
    }

    pub fn with_config(storage: S, config: ProcessorConfig) -> Self {
        AdesProcessor { storage, config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// MIME type of `product`; plain text when the backend has no path for it.
    pub fn resolve_mimetype(&self, product: &DataProduct) -> Option<&'static str> {
        match self.storage.path(&product.name) {
            Some(path) => guess_mimetype(&path),
            None => Some(FALLBACK_MIMETYPE),
        }
    }

    /// Read `product` as an ADES PSV file.
    ///
    /// The storage handle is opened here and released before this returns.
    pub fn process_astrometry_from_plaintext(
        &self,
        product: &DataProduct,
    ) -> Result<Vec<Measurement>, IngestError> {
        let reader = self
            .storage
            .open(&product.name)
            .map_err(|e| IngestError::storage(&product.name, e))?;
        ades_reader::process_astrometry_from_plaintext(&product.name, reader)
    }
}

impl<S: Storage> DataProcessor for AdesProcessor<S> {
    type Value = AstrometryValue;

    fn data_type_override(&self) -> &'static str {
        ADES_DATA_TYPE
    }

    fn process_data(
        &self,
        product: &DataProduct,
    ) -> Result<Vec<ReducedDatum<AstrometryValue>>, IngestError> {
        let mimetype = self.resolve_mimetype(product);
        debug!(
            product = %product.name,
            mimetype = mimetype.unwrap_or("unknown"),
            "processing ADES data"
        );

        match mimetype {
            Some(m) if self.config.is_plaintext(m) => {
                let measurements = self.process_astrometry_from_plaintext(product)?;
                Ok(measurements
                    .into_iter()
                    .map(|measurement| {
                        let (timestamp, value, source) =
                            measurement.into_parts(&self.config.default_source);
                        ReducedDatum {
                            timestamp,
                            value,
                            source,
                        }
                    })
                    .collect())
            }
            _ => Err(IngestError::invalid_format("Unsupported file type")),
        }
    }
}
