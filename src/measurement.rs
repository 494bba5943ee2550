//! # Normalized ADES measurement
//!
//! [`Measurement`] is the output unit of the ADES parser: one record per PSV row,
//! with a UTC timestamp, the reporting band and station, the required position in
//! **degrees** and four independently optional quantities.
//!
//! The optional quantities are filled from their source columns through the
//! [`OptionalQuantity`] table; a masked source cell leaves the field `None`, which
//! serializes as an explicit JSON `null`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        ArcSec, Degree, Magnitude, COL_MAG, COL_RMS_DEC, COL_RMS_MAG, COL_RMS_RA, MJD,
    },
    time::to_mjd_utc,
};

/// Quantities that an ADES row may leave masked, with the column each one comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalQuantity {
    RaRmsError,
    DecRmsError,
    Magnitude,
    MagError,
}

impl OptionalQuantity {
    pub const ALL: [OptionalQuantity; 4] = [
        OptionalQuantity::RaRmsError,
        OptionalQuantity::DecRmsError,
        OptionalQuantity::Magnitude,
        OptionalQuantity::MagError,
    ];

    /// ADES column holding the quantity
    pub fn column(self) -> &'static str {
        match self {
            OptionalQuantity::RaRmsError => COL_RMS_RA,
            OptionalQuantity::DecRmsError => COL_RMS_DEC,
            OptionalQuantity::Magnitude => COL_MAG,
            OptionalQuantity::MagError => COL_RMS_MAG,
        }
    }

    /// Record field receiving the quantity
    pub fn field(self) -> &'static str {
        match self {
            OptionalQuantity::RaRmsError => "ra_rmserror",
            OptionalQuantity::DecRmsError => "dec_rmserror",
            OptionalQuantity::Magnitude => "magnitude",
            OptionalQuantity::MagError => "mag_error",
        }
    }

    fn slot(self, value: &mut AstrometryValue) -> &mut Option<f64> {
        match self {
            OptionalQuantity::RaRmsError => &mut value.ra_rmserror,
            OptionalQuantity::DecRmsError => &mut value.dec_rmserror,
            OptionalQuantity::Magnitude => &mut value.magnitude,
            OptionalQuantity::MagError => &mut value.mag_error,
        }
    }
}

/// Everything a measurement carries besides its timestamp and source.
///
/// This is the payload handed to storage as the reduced-datum value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstrometryValue {
    pub filter: String,
    pub telescope: String,
    pub ra: Degree,
    pub dec: Degree,
    pub ra_rmserror: Option<ArcSec>,
    pub dec_rmserror: Option<ArcSec>,
    pub magnitude: Option<Magnitude>,
    pub mag_error: Option<Magnitude>,
    /// `permID`, `provID` or `trkSub`, whichever the row provides first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
}

impl AstrometryValue {
    pub fn new(filter: String, telescope: String, ra: Degree, dec: Degree) -> Self {
        AstrometryValue {
            filter,
            telescope,
            ra,
            dec,
            ra_rmserror: None,
            dec_rmserror: None,
            magnitude: None,
            mag_error: None,
            designation: None,
        }
    }

    pub fn get(&self, quantity: OptionalQuantity) -> Option<f64> {
        match quantity {
            OptionalQuantity::RaRmsError => self.ra_rmserror,
            OptionalQuantity::DecRmsError => self.dec_rmserror,
            OptionalQuantity::Magnitude => self.magnitude,
            OptionalQuantity::MagError => self.mag_error,
        }
    }

    pub fn set(&mut self, quantity: OptionalQuantity, value: Option<f64>) {
        *quantity.slot(self) = value;
    }
}

/// One normalized ADES observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp: DateTime<Utc>,
    /// Never set by the PSV parser; filled by callers that know the provenance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(flatten)]
    pub value: AstrometryValue,
}

impl Measurement {
    pub fn new(timestamp: DateTime<Utc>, value: AstrometryValue) -> Self {
        Measurement {
            timestamp,
            source: None,
            value,
        }
    }

    /// Observation epoch as a modified julian date in the UTC scale.
    pub fn mjd_utc(&self) -> MJD {
        to_mjd_utc(&self.timestamp)
    }

    /// Split into `(timestamp, value, source)`, falling back to `default_source`.
    pub fn into_parts(self, default_source: &str) -> (DateTime<Utc>, AstrometryValue, String) {
        let source = self.source.unwrap_or_else(|| default_source.to_string());
        (self.timestamp, self.value, source)
    }
}

#[cfg(test)]
mod measurement_test {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn sample() -> Measurement {
        let mut value = AstrometryValue::new("r".into(), "695".into(), 215.987654, -12.012345);
        value.set(OptionalQuantity::Magnitude, Some(19.39));
        value.set(OptionalQuantity::MagError, Some(0.137));
        Measurement::new(
            Utc.with_ymd_and_hms(2025, 4, 27, 21, 51, 58).unwrap(),
            value,
        )
    }

    #[test]
    fn test_optional_quantity_table() {
        let pairs: Vec<_> = OptionalQuantity::ALL
            .iter()
            .map(|q| (q.field(), q.column()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("ra_rmserror", "rmsRA"),
                ("dec_rmserror", "rmsDec"),
                ("magnitude", "mag"),
                ("mag_error", "rmsMag"),
            ]
        );
    }

    #[test]
    fn test_set_and_get() {
        let m = sample();
        assert_eq!(m.value.get(OptionalQuantity::Magnitude), Some(19.39));
        assert_eq!(m.value.get(OptionalQuantity::MagError), Some(0.137));
        assert_eq!(m.value.get(OptionalQuantity::RaRmsError), None);
        assert_eq!(m.value.get(OptionalQuantity::DecRmsError), None);
    }

    #[test]
    fn test_masked_fields_serialize_as_null() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "timestamp": "2025-04-27T21:51:58Z",
                "filter": "r",
                "telescope": "695",
                "ra": 215.987654,
                "dec": -12.012345,
                "ra_rmserror": null,
                "dec_rmserror": null,
                "magnitude": 19.39,
                "mag_error": 0.137,
            })
        );
    }

    #[test]
    fn test_into_parts_default_source() {
        let (timestamp, value, source) = sample().into_parts("MPC");
        assert_eq!(timestamp, Utc.with_ymd_and_hms(2025, 4, 27, 21, 51, 58).unwrap());
        assert_eq!(value.telescope, "695");
        assert_eq!(source, "MPC");

        let mut m = sample();
        m.source = Some("LCO".into());
        assert_eq!(m.into_parts("MPC").2, "LCO");
    }
}
