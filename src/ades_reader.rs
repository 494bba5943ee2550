//! # ADES PSV reader
//!
//! Converts the pipe-separated rendition of an ADES file into [`Measurement`]s.
//!
//! ## Column mapping
//! -----------------
//! | ADES column | record field   | presence |
//! |-------------|----------------|----------|
//! | `obsTime`   | `timestamp`    | required, ISO-8601 UTC |
//! | `band`      | `filter`       | column required, `""` when masked |
//! | `stn`       | `telescope`    | column required, `""` when masked |
//! | `ra`, `dec` | `ra`, `dec`    | required, degrees |
//! | `rmsRA`     | `ra_rmserror`  | optional |
//! | `rmsDec`    | `dec_rmserror` | optional |
//! | `mag`       | `magnitude`    | optional |
//! | `rmsMag`    | `mag_error`    | optional |
//! | `permID` / `provID` / `trkSub` | `designation` | optional, first present wins |
//!
//! ## Error Handling
//! -----------------
//! Every failure is an [`IngestError::InvalidFileFormat`]. A table without data rows is
//! rejected as a whole; a single bad row aborts the file, its row number and
//! [`ParseRowError`] are kept as the error cause. Masked optional cells are not errors.
use std::io::Read;

use tracing::{debug, warn};

use crate::{
    constants::{
        COL_BAND, COL_DEC, COL_OBS_TIME, COL_RA, COL_STN, DESIGNATION_COLUMNS, EMPTY_TABLE,
    },
    ingest_errors::{IngestError, ParseRowError},
    measurement::{AstrometryValue, Measurement, OptionalQuantity},
    psv::{AdesHeader, PsvRow, PsvTable},
    time::parse_obs_time,
};

/// Content of an ADES PSV file: its header block and the normalized rows.
#[derive(Debug, Clone, PartialEq)]
pub struct AdesPsv {
    pub header: AdesHeader,
    pub measurements: Vec<Measurement>,
}

fn parse_float(row: &PsvRow<'_>, column: &str) -> Result<f64, ParseRowError> {
    let value = row.required(column)?;
    value.parse::<f64>().map_err(|_| ParseRowError::InvalidFloat {
        column: column.to_string(),
        value: value.to_string(),
    })
}

fn parse_optional_float(row: &PsvRow<'_>, column: &str) -> Result<Option<f64>, ParseRowError> {
    match row.cell(column)? {
        None => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ParseRowError::InvalidFloat {
                column: column.to_string(),
                value: value.to_string(),
            }),
    }
}

/// Map one PSV row to a [`Measurement`].
///
/// `band` and `stn` are taken verbatim, a masked cell giving an empty string. `ra`/`dec`
/// must be unmasked floats, and each [`OptionalQuantity`] is `None` exactly when its
/// source cell is masked.
pub(crate) fn measurement_from_row(row: &PsvRow<'_>) -> Result<Measurement, ParseRowError> {
    let timestamp = parse_obs_time(row.required(COL_OBS_TIME)?)?;
    let filter = row.cell(COL_BAND)?.unwrap_or_default().to_string();
    let telescope = row.cell(COL_STN)?.unwrap_or_default().to_string();
    let ra = parse_float(row, COL_RA)?;
    let dec = parse_float(row, COL_DEC)?;

    let mut value = AstrometryValue::new(filter, telescope, ra, dec);
    for quantity in OptionalQuantity::ALL {
        value.set(quantity, parse_optional_float(row, quantity.column())?);
    }
    value.designation = DESIGNATION_COLUMNS
        .iter()
        .find_map(|column| row.optional_cell(column))
        .map(str::to_string);

    Ok(Measurement::new(timestamp, value))
}

/// Parse the full text of an ADES PSV file.
///
/// Return
/// ----------
/// * The header block and one [`Measurement`] per data row, in file order.
///
/// Errors
/// ----------
/// * `InvalidFileFormat("Empty table or invalid file type")` if the table has no data row.
/// * `InvalidFileFormat` wrapping a [`ParseRowError`] for the first row that cannot be mapped.
pub fn parse_ades_psv(content: &str) -> Result<AdesPsv, IngestError> {
    let table = PsvTable::parse(content)?;
    if table.is_empty() {
        debug!(columns = table.column_names().len(), "ADES table has no data rows");
        return Err(IngestError::invalid_format(EMPTY_TABLE));
    }

    let measurements = table
        .rows()
        .enumerate()
        .map(|(idx, row)| {
            measurement_from_row(&row).map_err(|cause| {
                warn!(row = idx + 1, error = %cause, "rejecting ADES file");
                IngestError::invalid_row(idx + 1, cause)
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        rows = measurements.len(),
        version = table.header().version.as_deref().unwrap_or("unknown"),
        "parsed ADES PSV"
    );

    Ok(AdesPsv {
        header: table.header().clone(),
        measurements,
    })
}

/// Read an ADES PSV resource and return its measurements in file order.
///
/// The reader is consumed and dropped before returning, whatever the outcome.
/// Content that is not UTF-8 text is reported as an invalid file type.
pub fn process_astrometry_from_plaintext<R: Read>(
    name: &str,
    mut reader: R,
) -> Result<Vec<Measurement>, IngestError> {
    let mut content = String::new();
    match reader.read_to_string(&mut content) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            debug!(name, error = %e, "ADES resource is not UTF-8 text");
            return Err(IngestError::invalid_format(EMPTY_TABLE));
        }
        Err(e) => return Err(IngestError::storage(name, e)),
    }
    drop(reader);

    parse_ades_psv(&content).map(|ades| ades.measurements)
}
