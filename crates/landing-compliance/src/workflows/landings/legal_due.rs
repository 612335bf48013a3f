use chrono::NaiveDate;

use super::domain::DevolvedAuthority;

/// Certificate weight above which landing data is due for over-12m vessels.
pub const LANDING_DATA_WEIGHT_TOLERANCE_KG: f64 = 50.0;

const UNDER_TEN_METRE_LIMIT: f64 = 10.0;
const OVER_TWELVE_METRE_LIMIT: f64 = 12.0;

/// Whether landing data was legally required by the time the certificate was applied for.
///
/// Vessels of exactly 10m or 12m, and lengths that are not numbers, fall outside both
/// brackets and are never due.
pub fn is_legally_due(
    vessel_length_meters: f64,
    authority: DevolvedAuthority,
    application_date: NaiveDate,
    landed_date: NaiveDate,
    is_quota_species: bool,
    weight_on_certificate_kg: f64,
) -> bool {
    if vessel_length_meters < UNDER_TEN_METRE_LIMIT {
        let days_since_landing = (application_date - landed_date).num_days();
        return match authority {
            DevolvedAuthority::England | DevolvedAuthority::IsleOfMan => {
                is_quota_species || days_since_landing > 1
            }
            DevolvedAuthority::Wales => days_since_landing > 1,
            DevolvedAuthority::Scotland
            | DevolvedAuthority::NorthernIreland
            | DevolvedAuthority::Jersey
            | DevolvedAuthority::Guernsey => false,
        };
    }

    if vessel_length_meters > OVER_TWELVE_METRE_LIMIT {
        return weight_on_certificate_kg > LANDING_DATA_WEIGHT_TOLERANCE_KG;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use DevolvedAuthority::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn today() -> NaiveDate {
        date(2020, 1, 1)
    }

    #[test]
    fn over_twelve_metres_depends_on_certificate_weight() {
        assert!(is_legally_due(13.0, England, today(), today(), true, 100.0));
        assert!(!is_legally_due(13.0, England, today(), today(), true, 50.0));
        assert!(is_legally_due(13.0, Scotland, today(), today(), false, 50.5));
    }

    #[test]
    fn ten_to_twelve_metres_is_never_due() {
        assert!(!is_legally_due(11.0, England, today(), today(), true, 100.0));
        assert!(!is_legally_due(10.0, England, date(2020, 1, 9), today(), true, 100.0));
        assert!(!is_legally_due(12.0, Wales, date(2020, 1, 9), today(), false, 500.0));
    }

    #[test]
    fn under_ten_metres_in_england_follows_quota_or_elapsed_days() {
        assert!(is_legally_due(9.0, England, today(), today(), true, 100.0));
        assert!(is_legally_due(9.0, England, date(2020, 1, 3), today(), false, 100.0));
        assert!(!is_legally_due(9.0, England, today(), date(2020, 1, 2), false, 100.0));
        assert!(!is_legally_due(9.0, England, date(2020, 1, 2), today(), false, 100.0));
        assert!(is_legally_due(9.0, IsleOfMan, today(), today(), true, 0.0));
    }

    #[test]
    fn under_ten_metres_in_wales_ignores_quota_status() {
        assert!(!is_legally_due(9.0, Wales, today(), today(), true, 100.0));
        assert!(is_legally_due(9.0, Wales, date(2020, 1, 3), today(), true, 100.0));
    }

    #[test]
    fn under_ten_metres_elsewhere_is_never_due() {
        for authority in [Scotland, NorthernIreland, Jersey, Guernsey] {
            assert!(!is_legally_due(9.0, authority, today(), today(), true, 100.0));
            assert!(!is_legally_due(9.0, authority, date(2020, 2, 1), today(), true, 100.0));
        }
    }

    #[test]
    fn non_numeric_length_is_not_due() {
        assert!(!is_legally_due(f64::NAN, England, today(), today(), true, 100.0));
    }
}
