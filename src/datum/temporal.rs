use super::*;
use chrono::SecondsFormat;

/// A temporal datum: The origin of a time axis
#[derive(Clone, Debug)]
pub struct TemporalDatum {
    common: DatumCommon,
    origin: DateTime<Utc>,
}

impl TemporalDatum {
    pub fn new(common: DatumCommon, origin: DateTime<Utc>) -> Result<TemporalDatum, Error> {
        common.identification().validate("temporal datum")?;
        Ok(TemporalDatum { common, origin })
    }

    pub fn common(&self) -> &DatumCommon {
        &self.common
    }

    pub fn origin(&self) -> DateTime<Utc> {
        self.origin
    }
}

/// The origin is compared in both modes
impl Comparable for TemporalDatum {
    fn equals(&self, other: &Self, mode: ComparisonMode) -> bool {
        self.common.equals(&other.common, mode) && self.origin == other.origin
    }
}

impl PartialEq for TemporalDatum {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, ComparisonMode::Strict)
    }
}

impl FormatWkt for TemporalDatum {
    fn keyword(&self) -> &'static str {
        "TDATUM"
    }

    fn identification(&self) -> Option<&IdentifiedObject> {
        Some(self.common.identification())
    }

    fn format_wkt(&self, formatter: &mut Formatter) {
        let origin = self.origin.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        formatter.element("TIMEORIGIN", |f| f.append_text(&origin));
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn temporal() -> Result<(), Error> {
        let unix = DatumCommon::new("Unix time");
        let gps = DatumCommon::new("GPS time");
        let epoch_1970 = Utc.timestamp_opt(0, 0).single().ok_or(Error::General("epoch"))?;
        let epoch_1980 = Utc
            .with_ymd_and_hms(1980, 1, 6, 0, 0, 0)
            .single()
            .ok_or(Error::General("epoch"))?;

        let unix = TemporalDatum::new(unix, epoch_1970)?;
        assert_eq!(unix.origin(), epoch_1970);
        assert_eq!(
            unix.to_wkt(),
            r#"TDATUM["Unix time", TIMEORIGIN["1970-01-01T00:00:00Z"]]"#
        );

        // Same name, different origin
        let shifted = TemporalDatum::new(DatumCommon::new("Unix time"), epoch_1980)?;
        assert!(!unix.equals(&shifted, ComparisonMode::IgnoreMetadata));
        assert!(!unix.equals(&shifted, ComparisonMode::Strict));

        let gps = TemporalDatum::new(gps, epoch_1980)?;
        assert!(!gps.equals(&shifted, ComparisonMode::IgnoreMetadata));
        assert_eq!(unix, unix.clone());
        Ok(())
    }
}
