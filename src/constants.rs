//! # Constants and type definitions for ADES ingestion
//!
//! This module centralizes the **ADES column names**, the **MIME types** accepted by the
//! plaintext route, and the **unit aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - ADES PSV column names (fixed by the ADES standard)
//! - Mapping of optional quantities to their source columns
//! - Default reduced-datum source and processor data type
//! - Unit aliases for angles and magnitudes

// -------------------------------------------------------------------------------------------------
// Processor identity
// -------------------------------------------------------------------------------------------------

/// Data type tag reported by the ADES processor
pub const ADES_DATA_TYPE: &str = "ades_astrometry";

/// Source attached to a reduced datum when the record does not carry one
pub const DEFAULT_SOURCE: &str = "MPC";

/// MIME types routed to the plaintext parser by default
pub const PLAINTEXT_MIMETYPES: [&str; 2] = ["text/plain", "text/csv"];

/// Rejection message for a file without any readable data row
pub const EMPTY_TABLE: &str = "Empty table or invalid file type";

/// MIME type assumed when the storage backend cannot resolve a path
pub const FALLBACK_MIMETYPE: &str = "text/plain";

// -------------------------------------------------------------------------------------------------
// ADES PSV format
// -------------------------------------------------------------------------------------------------

/// Field delimiter of the PSV table
pub const PSV_DELIMITER: u8 = b'|';

/// Prefix of an ADES header section line (e.g. `# observatory`)
pub const HEADER_SECTION_PREFIX: char = '#';

/// Prefix of an ADES header keyword line (e.g. `! mpcCode 695`)
pub const HEADER_KEYWORD_PREFIX: char = '!';

pub const COL_OBS_TIME: &str = "obsTime";
pub const COL_BAND: &str = "band";
pub const COL_STN: &str = "stn";
pub const COL_RA: &str = "ra";
pub const COL_DEC: &str = "dec";
pub const COL_RMS_RA: &str = "rmsRA";
pub const COL_RMS_DEC: &str = "rmsDec";
pub const COL_MAG: &str = "mag";
pub const COL_RMS_MAG: &str = "rmsMag";

/// Designation columns, in order of precedence
pub const DESIGNATION_COLUMNS: [&str; 3] = ["permID", "provID", "trkSub"];

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Apparent magnitude
pub type Magnitude = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
