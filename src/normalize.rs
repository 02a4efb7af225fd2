/// Alternate and short country names the ISO reference does not resolve
/// directly. Checked after the reference lookup; extend deliberately, the
/// table is part of the crate's observable behavior.
pub const COUNTRY_OVERRIDES: &[(&str, &str)] = &[
    ("United States", "USA"),
    ("South Korea", "KOR"),
    ("North Korea", "PRK"),
    ("Russia", "RUS"),
    ("Czech Republic", "CZE"),
    ("Iran", "IRN"),
    ("Syria", "SYR"),
    ("Venezuela", "VEN"),
    ("Bolivia", "BOL"),
    ("Vietnam", "VNM"),
    ("Tanzania", "TZA"),
    ("Laos", "LAO"),
    ("United Kingdom", "GBR"),
    ("Taiwan", "TWN"),
    ("Moldova", "MDA"),
    ("Brunei", "BRN"),
    ("Netherlands", "NLD"),
];

/// Maps free-text country names to canonical ISO 3166-1 alpha-3 codes.
///
/// The standard reference is consulted first (code or official name), the
/// override table second. Unresolvable names yield `None`; they never fail
/// a pipeline run. Pure: same input, same output.
#[derive(Debug, Clone, Copy)]
pub struct CountryNormalizer {
    overrides: &'static [(&'static str, &'static str)],
}

impl Default for CountryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryNormalizer {
    pub fn new() -> Self {
        Self::with_overrides(COUNTRY_OVERRIDES)
    }

    pub fn with_overrides(overrides: &'static [(&'static str, &'static str)]) -> Self {
        Self { overrides }
    }

    pub fn alpha3(&self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        if name.len() == 3
            && let Some(country) = rust_iso3166::from_alpha3(&name.to_ascii_uppercase())
        {
            return Some(country.alpha3.to_string());
        }
        if name.len() == 2
            && let Some(country) = rust_iso3166::from_alpha2(&name.to_ascii_uppercase())
        {
            return Some(country.alpha3.to_string());
        }
        if let Some(country) = rust_iso3166::ALL
            .iter()
            .find(|country| country.name.eq_ignore_ascii_case(name))
        {
            return Some(country.alpha3.to_string());
        }

        self.overrides
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map(|(_, code)| (*code).to_string())
    }
}

/// Display name derived from a profile URL: the trailing path segment with
/// hyphens turned into spaces, title-cased.
pub fn country_name_from_url(url: &str) -> Option<String> {
    let slug = url.trim_end_matches('/').rsplit('/').next()?;
    if slug.is_empty() {
        return None;
    }
    Some(title_case(&slug.replace('-', " ")))
}

fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut word_start = true;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}
