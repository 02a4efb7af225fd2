use crate::record::{CountryTypeRecord, RecordSource, TypeCode};

/// The hand-authored demo dataset served whenever the live pipeline cannot
/// produce results. No I/O, no failure mode.
const FALLBACK_ROWS: &[(&str, &str, TypeCode, f64)] = &[
    ("United States", "USA", TypeCode::ISTJ, 12.3),
    ("South Korea", "KOR", TypeCode::ISFJ, 10.1),
    ("Japan", "JPN", TypeCode::ISTJ, 11.0),
    ("United Kingdom", "GBR", TypeCode::ISFJ, 12.0),
    ("Germany", "DEU", TypeCode::ISTJ, 11.5),
    ("Brazil", "BRA", TypeCode::ESFP, 9.0),
    ("India", "IND", TypeCode::ISTJ, 10.5),
    ("Australia", "AUS", TypeCode::ISFJ, 10.8),
    ("Canada", "CAN", TypeCode::ISFJ, 11.2),
    ("France", "FRA", TypeCode::ISFJ, 9.8),
];

pub fn fallback_records() -> Vec<CountryTypeRecord> {
    FALLBACK_ROWS
        .iter()
        .map(|(name, code, type_code, percentage)| CountryTypeRecord {
            country_name: (*name).to_string(),
            country_code: Some((*code).to_string()),
            type_code: *type_code,
            percentage: Some(*percentage),
            source: RecordSource::Fallback,
        })
        .collect()
}
