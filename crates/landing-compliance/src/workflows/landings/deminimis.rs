use super::domain::SubmissionRecord;

/// Source tag carried by rows submitted from an electronic logbook.
pub const ELECTRONIC_LOG_SOURCE: &str = "ELOG";

/// Tolerance that lets small electronically logged weights through a species mismatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeminimisPolicy {
    tolerance_kg: f64,
}

impl DeminimisPolicy {
    pub const DEFAULT_TOLERANCE_KG: f64 = 50.0;

    pub fn new(tolerance_kg: f64) -> Self {
        let sanitized = if tolerance_kg.is_finite() && tolerance_kg >= 0.0 {
            tolerance_kg
        } else {
            Self::DEFAULT_TOLERANCE_KG
        };

        Self {
            tolerance_kg: sanitized,
        }
    }

    pub fn tolerance_kg(&self) -> f64 {
        self.tolerance_kg
    }

    /// True for electronic-log rows whose mismatched weight sits within the tolerance.
    pub fn exempts(&self, record: &SubmissionRecord) -> bool {
        if !is_electronic_log_source(record) {
            return false;
        }

        record
            .weight_on_cert
            .map(|weight| is_within_deminimus(record.species_exists, weight, self.tolerance_kg))
            .unwrap_or(false)
    }
}

impl Default for DeminimisPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOLERANCE_KG)
    }
}

pub fn is_within_deminimus(
    species_exists: bool,
    weight_on_certificate: f64,
    deminimus_kg: f64,
) -> bool {
    !species_exists && weight_on_certificate <= deminimus_kg
}

pub fn is_electronic_log_source(record: &SubmissionRecord) -> bool {
    record
        .source
        .as_deref()
        .map(|source| source.trim().eq_ignore_ascii_case(ELECTRONIC_LOG_SOURCE))
        .unwrap_or(false)
}
