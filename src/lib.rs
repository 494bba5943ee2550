//! # ades_ingest
//!
//! Ingestion of **ADES** (Astrometry Data Exchange Standard) pipe-separated files into
//! normalized astrometric/photometric records.
//!
//! - [`ades_reader`] parses PSV content into [`Measurement`]s.
//! - [`processor`] routes an uploaded [`DataProduct`] by MIME type and reshapes
//!   measurements into storable [`ReducedDatum`]s.
//! - [`storage`] abstracts the blob store the products live in.
pub mod ades_reader;
pub mod config;
pub mod constants;
pub mod ingest_errors;
pub mod measurement;
pub mod processor;
pub mod psv;
pub mod storage;
pub mod time;

pub use ades_reader::{parse_ades_psv, process_astrometry_from_plaintext, AdesPsv};
pub use config::ProcessorConfig;
pub use ingest_errors::{IngestError, ParseRowError};
pub use measurement::{AstrometryValue, Measurement, OptionalQuantity};
pub use processor::{AdesProcessor, DataProcessor, DataProduct, ReducedDatum};
pub use storage::{FileSystemStorage, MemoryStorage, Storage};
