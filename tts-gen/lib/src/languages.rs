//! Languages supported by the Google Translate TTS endpoint.
//!
//! The table mirrors the output of `gtts-cli --all`. Regional accents are
//! not languages of their own: they are selected through the host tld
//! (`com.au`, `co.uk`, `ca`, ...), and the old dialect codes fall back to
//! their base language.

use tracing::warn;

/// `(code, name)` pairs, sorted by code.
pub const TTS_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("ar", "Arabic"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("eo", "Esperanto"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("gu", "Gujarati"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("jw", "Javanese"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("la", "Latin"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("my", "Myanmar (Burmese)"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("su", "Sundanese"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tl", "Filipino"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese (Mandarin)"),
    ("zh-CN", "Chinese (Simplified)"),
    ("zh-TW", "Chinese (Mandarin/Taiwan)"),
];

/// Dialect codes which used to name a language, with the code they now
/// resolve to.
const DEPRECATED_DIALECTS: &[(&str, &str)] = &[
    ("en-au", "en"),
    ("en-ca", "en"),
    ("en-gb", "en"),
    ("en-gh", "en"),
    ("en-ie", "en"),
    ("en-in", "en"),
    ("en-ng", "en"),
    ("en-nz", "en"),
    ("en-ph", "en"),
    ("en-tz", "en"),
    ("en-uk", "en"),
    ("en-us", "en"),
    ("en-za", "en"),
    ("es-es", "es"),
    ("es-us", "es"),
    ("fr-ca", "fr"),
    ("fr-fr", "fr"),
    ("pt-br", "pt"),
    ("pt-pt", "pt"),
];

/// Map a deprecated dialect code to its base language, leaving every other
/// code untouched.
pub fn fallback_deprecated(code: &str) -> &str {
    match DEPRECATED_DIALECTS
        .iter()
        .find(|(dialect, _)| dialect.eq_ignore_ascii_case(code))
    {
        Some(&(dialect, fallback)) => {
            warn!(
                "'{dialect}' is deprecated, falling back to '{fallback}'. \
                 Use the tld to pick a regional accent."
            );
            fallback
        }
        None => code,
    }
}

/// Look up a language code, ignoring ASCII case.
///
/// Deprecated dialect codes resolve to their base language. Returns the
/// canonical `(code, name)` entry.
pub fn lookup(code: &str) -> Option<(&'static str, &'static str)> {
    let code = fallback_deprecated(code.trim());
    TTS_LANGUAGES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .copied()
}
