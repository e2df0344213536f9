//! Language code normalization
//!
//! Output file names always carry the ISO 639-3 code of the destination
//! language, while stylesheets receive the code exactly as the catalog wrote
//! it. This module does the first half of that.

use isolang::Language;

use super::error::PipelineError;

/// ISO 639-2/B bibliographic codes that differ from their 639-2/T (and 639-3)
/// counterparts.
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("dut", "nld"),
    ("fre", "fra"),
    ("geo", "kat"),
    ("ger", "deu"),
    ("gre", "ell"),
    ("ice", "isl"),
    ("mac", "mkd"),
    ("mao", "mri"),
    ("may", "msa"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("tib", "bod"),
    ("wel", "cym"),
];

/// Resolve a language identifier to its three-letter ISO 639-3 code.
///
/// Accepts two-letter 639-1 codes, three-letter 639-3 and 639-2/B codes,
/// in any case, optionally followed by a region or script subtag
/// (`en-US`, `pt_BR`).
///
/// # Examples
/// ```
/// use teigen::pipeline::to_alpha3;
///
/// assert_eq!(to_alpha3("en").unwrap(), "eng");
/// assert_eq!(to_alpha3("ger").unwrap(), "deu");
/// assert!(to_alpha3("xx").is_err());
/// ```
pub fn to_alpha3(code: &str) -> Result<&'static str, PipelineError> {
    let unknown = || PipelineError::UnknownLanguage {
        code: code.to_string(),
    };

    let primary = code
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(unknown());
    }

    let language = match primary.len() {
        2 => Language::from_639_1(&primary),
        3 => {
            let terminology = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(bibliographic, _)| *bibliographic == primary)
                .map(|(_, terminology)| *terminology)
                .unwrap_or(primary.as_str());
            Language::from_639_3(terminology)
        }
        _ => None,
    };

    language.map(|lang| lang.to_639_3()).ok_or_else(unknown)
}
