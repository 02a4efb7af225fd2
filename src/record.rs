use serde::{Deserialize, Serialize};

/// The 16 four-letter personality type codes, in the fixed priority order
/// used by the keyword extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum TypeCode {
    ISTJ,
    ISFJ,
    INFJ,
    INTJ,
    ISTP,
    ISFP,
    INFP,
    INTP,
    ESTP,
    ESFP,
    ENFP,
    ENTP,
    ESTJ,
    ESFJ,
    ENFJ,
    ENTJ,
}

impl TypeCode {
    /// Priority order: earlier codes win when several appear in a page.
    pub const ALL: [TypeCode; 16] = [
        TypeCode::ISTJ,
        TypeCode::ISFJ,
        TypeCode::INFJ,
        TypeCode::INTJ,
        TypeCode::ISTP,
        TypeCode::ISFP,
        TypeCode::INFP,
        TypeCode::INTP,
        TypeCode::ESTP,
        TypeCode::ESFP,
        TypeCode::ENFP,
        TypeCode::ENTP,
        TypeCode::ESTJ,
        TypeCode::ESFJ,
        TypeCode::ENFJ,
        TypeCode::ENTJ,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TypeCode::ISTJ => "ISTJ",
            TypeCode::ISFJ => "ISFJ",
            TypeCode::INFJ => "INFJ",
            TypeCode::INTJ => "INTJ",
            TypeCode::ISTP => "ISTP",
            TypeCode::ISFP => "ISFP",
            TypeCode::INFP => "INFP",
            TypeCode::INTP => "INTP",
            TypeCode::ESTP => "ESTP",
            TypeCode::ESFP => "ESFP",
            TypeCode::ENFP => "ENFP",
            TypeCode::ENTP => "ENTP",
            TypeCode::ESTJ => "ESTJ",
            TypeCode::ESFJ => "ESFJ",
            TypeCode::ENFJ => "ENFJ",
            TypeCode::ENTJ => "ENTJ",
        }
    }

    /// Exact uppercase match only; anything else is out of vocabulary.
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "ISTJ" => Some(TypeCode::ISTJ),
            "ISFJ" => Some(TypeCode::ISFJ),
            "INFJ" => Some(TypeCode::INFJ),
            "INTJ" => Some(TypeCode::INTJ),
            "ISTP" => Some(TypeCode::ISTP),
            "ISFP" => Some(TypeCode::ISFP),
            "INFP" => Some(TypeCode::INFP),
            "INTP" => Some(TypeCode::INTP),
            "ESTP" => Some(TypeCode::ESTP),
            "ESFP" => Some(TypeCode::ESFP),
            "ENFP" => Some(TypeCode::ENFP),
            "ENTP" => Some(TypeCode::ENTP),
            "ESTJ" => Some(TypeCode::ESTJ),
            "ESFJ" => Some(TypeCode::ESFJ),
            "ENFJ" => Some(TypeCode::ENFJ),
            "ENTJ" => Some(TypeCode::ENTJ),
            _ => None,
        }
    }
}

/// Where a record came from, carried for downstream display and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    Extracted,
    Fallback,
}

impl RecordSource {
    pub fn label(self) -> &'static str {
        match self {
            RecordSource::Extracted => "extracted",
            RecordSource::Fallback => "fallback",
        }
    }
}

/// One row of the output table: a country and its most common type.
///
/// `country_code` is absent when the name could not be normalized to an
/// ISO alpha-3 code; `percentage` is absent when no nearby figure could be
/// associated with the type code. Rows without a name or a vocabulary type
/// are never constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryTypeRecord {
    pub country_name: String,
    pub country_code: Option<String>,
    pub type_code: TypeCode,
    pub percentage: Option<f64>,
    pub source: RecordSource,
}
