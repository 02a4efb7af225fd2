use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::record::TypeCode;

/// A number immediately followed by `%`: one or two integer digits with an
/// optional single decimal digit. The grammar caps values at 99.9, so an
/// extracted percentage always lies in [0, 100].
const NUMBER: &str = r"([0-9]{1,2}\.[0-9]|[0-9]{1,2})%";

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NUMBER).expect("number pattern compiles"));

/// A vocabulary type code followed, within a short window free of `%` and
/// newlines, by a number-`%` token.
static PROXIMITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let vocab = TypeCode::ALL.map(TypeCode::as_str).join("|");
    // The window is lazy so the percent figure is read from its first
    // digit; a greedy window would swallow "12." out of "12.0%".
    Regex::new(&format!(r"({vocab})[^%\n]{{0,40}}?{NUMBER}")).expect("proximity pattern compiles")
});

/// How far (in characters) around a keyword occurrence the nearest-number
/// strategy searches for a percentage.
const KEYWORD_WINDOW: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extraction {
    pub type_code: TypeCode,
    pub percentage: Option<f64>,
}

/// Flatten page markup to the plain-text view the extractor works on.
pub fn page_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    doc.root_element().text().collect::<Vec<_>>().join(" ")
}

/// Best-effort recovery of a (type, percentage) pair from page text.
///
/// Two strategies are tried in order; `None` means the page yields no
/// record and is skipped by the pipeline. The returned type code is always
/// drawn from the fixed 16-member vocabulary.
pub fn extract(text: &str) -> Option<Extraction> {
    proximity_match(text).or_else(|| keyword_match(text))
}

/// First vocabulary token in document order with a percent figure inside
/// the trailing 40-character window.
fn proximity_match(text: &str) -> Option<Extraction> {
    let caps = PROXIMITY_RE.captures(text)?;
    let type_code = TypeCode::from_str(caps.get(1)?.as_str())?;
    let percentage = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some(Extraction {
        type_code,
        percentage: Some(percentage),
    })
}

/// First vocabulary member in priority order that appears anywhere in the
/// text, paired with the nearest percent figure in a window centered on
/// the occurrence; the percentage stays absent when none is found.
fn keyword_match(text: &str) -> Option<Extraction> {
    for code in TypeCode::ALL {
        let Some(idx) = text.find(code.as_str()) else {
            continue;
        };
        let nearby = window_around(text, idx, KEYWORD_WINDOW);
        let percentage = NUMBER_RE
            .captures(nearby)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());
        return Some(Extraction {
            type_code: code,
            percentage,
        });
    }
    None
}

/// Slice `radius` characters to each side of the byte position `pos`,
/// clamped to the text bounds and kept on char boundaries.
fn window_around(text: &str, pos: usize, radius: usize) -> &str {
    let start = text[..pos]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(pos);
    let end = text[pos..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len());
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proximity_strategy_pairs_type_with_following_percent() {
        let got = extract("In this region ISFJ types make up 12.0% of respondents.").unwrap();
        assert_eq!(got.type_code, TypeCode::ISFJ);
        assert_eq!(got.percentage, Some(12.0));
    }

    #[test]
    fn proximity_prefers_document_order_over_priority_order() {
        // ENTJ precedes ISTJ in the text even though ISTJ outranks it in
        // the keyword priority list.
        let got = extract("ENTJ at 3.2% then ISTJ at 11.0%").unwrap();
        assert_eq!(got.type_code, TypeCode::ENTJ);
        assert_eq!(got.percentage, Some(3.2));
    }

    #[test]
    fn proximity_window_does_not_cross_percent_or_newline() {
        // The 50% figure belongs to an unrelated sentence on the next line.
        let text = "Most common: ISTJ\nsurvey response rate was 50%";
        let got = extract(text).unwrap();
        assert_eq!(got.type_code, TypeCode::ISTJ);
        // Falls through to the keyword strategy, which still finds 50%
        // inside its wider window.
        assert_eq!(got.percentage, Some(50.0));
    }

    #[test]
    fn keyword_strategy_reports_absent_percentage() {
        let filler = "x".repeat(120);
        let text = format!("ISTJ is common here. {filler} 42%");
        let got = extract(&text).unwrap();
        assert_eq!(got.type_code, TypeCode::ISTJ);
        assert_eq!(got.percentage, None);
    }

    #[test]
    fn keyword_strategy_searches_both_sides_of_occurrence() {
        let got = extract("around 9.8% of people identify as INFP here").unwrap();
        assert_eq!(got.type_code, TypeCode::INFP);
        assert_eq!(got.percentage, Some(9.8));
    }

    #[test]
    fn out_of_vocabulary_tokens_never_match() {
        assert_eq!(extract("HTML 30% and CSS 70%"), None);
        assert_eq!(extract("ABCD 12.5% nonsense"), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn extracted_percentages_stay_in_range() {
        // "100%" cannot be consumed whole: the grammar admits at most two
        // integer digits, so only the trailing "00" pairs with the sign.
        let got = extract("ISTJ reached 100%").unwrap();
        assert_eq!(got.percentage, Some(0.0));
        let got = extract("ISFP at 0%").unwrap();
        assert_eq!(got.percentage, Some(0.0));
        let got = extract("ENFP at 99.9%").unwrap();
        assert_eq!(got.percentage, Some(99.9));
    }

    #[test]
    fn window_clamps_on_multibyte_text() {
        // The newline blocks the proximity strategy, so the keyword window
        // has to step back through the multibyte prefix.
        let text = format!("{}ISTP\ncommunes près de 7.5%", "é".repeat(100));
        let got = extract(&text).unwrap();
        assert_eq!(got.type_code, TypeCode::ISTP);
        assert_eq!(got.percentage, Some(7.5));
    }

    #[test]
    fn page_text_flattens_markup() {
        let html = "<html><body><h1>France</h1><p>ISFJ <b>12.0%</b></p></body></html>";
        let text = page_text(html);
        assert!(text.contains("France"));
        let got = extract(&text).unwrap();
        assert_eq!(got.type_code, TypeCode::ISFJ);
        assert_eq!(got.percentage, Some(12.0));
    }
}
