//! Text preparation for the TTS endpoint.
//!
//! The endpoint rejects long inputs, so text is normalised and split into
//! chunks of at most [`MAX_CHUNK_CHARS`] characters. Each chunk becomes one
//! request and the returned audio is concatenated in order.
//!
//! ## Pipeline
//!
//! 1. Pre-process: space after tone marks, join hyphenated line breaks,
//!    drop the period after common abbreviations, expand `Esq.`.
//! 2. Short text (within the limit) is sent as-is.
//! 3. Longer text is split on sentence and clause punctuation.
//! 4. Tokens made only of punctuation or whitespace are dropped.
//! 5. Tokens still over the limit are cut on the last space before it.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::TtsError;

/// Maximum number of characters the endpoint accepts per request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Marks which end a clause and carry intonation; kept in the token.
const TONE_MARKS: &[char] = &['?', '!', '？', '！'];

/// Punctuation which separates tokens and is dropped.
const OTHER_PUNCTUATION: &[char] = &[
    '¡', '(', ')', '[', ']', '¿', '…', '‥', '،', ';', '—', '。', '，', '、', '：', '\n',
];

/// Non-ASCII punctuation considered when cleaning tokens.
const EXTRA_PUNCTUATION: &[char] = &[
    '¡', '¿', '…', '‥', '،', '—', '。', '，', '、', '：', '？', '！',
];

const SUBSTITUTIONS: &[(&str, &str)] = &[("Esq.", "Esquire")];

static ABBREVIATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(dr|jr|mr|mrs|ms|msgr|prof|sr|st)\.").expect("Invalid abbreviation regex")
});

/// Split `text` into request-sized chunks.
///
/// ## Errors
///
/// Returns `TtsError::NoText` if nothing speakable remains.
///
/// ## Examples
///
/// ```
/// use tts_gen_lib::tokenizer::chunks;
///
/// assert_eq!(chunks("Hello, world!").unwrap(), vec!["Hello, world!"]);
/// assert!(chunks("  ...  ").is_err());
/// ```
pub fn chunks(text: &str) -> Result<Vec<String>, TtsError> {
    let text = preprocess(text.trim());

    let tokens = if char_len(&text) <= MAX_CHUNK_CHARS {
        vec![text]
    } else {
        tokenize(&text)
    };

    let chunks: Vec<String> = clean_tokens(tokens)
        .iter()
        .flat_map(|token| minimize(token, MAX_CHUNK_CHARS))
        .filter(|chunk| !chunk.is_empty())
        .collect();

    if chunks.is_empty() {
        return Err(TtsError::NoText);
    }

    Ok(chunks)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn preprocess(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        out.push(c);
        if TONE_MARKS.contains(&c) {
            out.push(' ');
        }
    }

    let out = out.replace("-\n", "");
    let mut out = ABBREVIATION_RE.replace_all(&out, "$1").into_owned();

    for (from, to) in SUBSTITUTIONS {
        out = out.replace(from, to);
    }

    out
}

/// Whether the period at `idx` closes a dotted abbreviation such as `e.g.`.
fn closes_dotted_abbreviation(chars: &[char], idx: usize) -> bool {
    idx >= 2 && chars[idx - 1].is_ascii_lowercase() && chars[idx - 2] == '.'
}

fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (idx, &c) in chars.iter().enumerate() {
        let prev = idx.checked_sub(1).map(|i| chars[i]);
        let next = chars.get(idx + 1).copied();

        if TONE_MARKS.contains(&c) {
            current.push(c);
            tokens.push(std::mem::take(&mut current));
        } else if (c == '.' || c == ',')
            && next.is_none_or(char::is_whitespace)
            && !closes_dotted_abbreviation(&chars, idx)
        {
            tokens.push(std::mem::take(&mut current));
        } else if c == ':' {
            // times and ratios stay together
            let between_digits = prev.is_some_and(|p| p.is_ascii_digit())
                && next.is_some_and(|n| n.is_ascii_digit());
            if between_digits {
                current.push(c);
            } else {
                tokens.push(std::mem::take(&mut current));
            }
        } else if OTHER_PUNCTUATION.contains(&c) {
            tokens.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

fn is_punctuation_or_space(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation() || EXTRA_PUNCTUATION.contains(&c)
}

fn clean_tokens(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|t| !t.chars().all(is_punctuation_or_space))
        .map(|t| t.trim().to_string())
        .collect()
}

/// Cut `token` into pieces of at most `max` characters, preferring to cut
/// on a space.
fn minimize(token: &str, max: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = token;

    loop {
        rest = rest.strip_prefix(' ').unwrap_or(rest);

        if char_len(rest) <= max {
            pieces.push(rest.to_string());
            return pieces;
        }

        let limit = rest
            .char_indices()
            .nth(max)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());

        let cut = match rest[..limit].rfind(' ') {
            Some(idx) if idx > 0 => idx,
            _ => limit,
        };

        pieces.push(rest[..cut].to_string());
        rest = &rest[cut..];
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // chunks()
    // ========================================================================

    #[test]
    fn test_short_text_is_single_chunk() {
        assert_eq!(chunks("hello").unwrap(), vec!["hello"]);
    }

    #[test]
    fn test_short_text_keeps_punctuation() {
        assert_eq!(
            chunks("Hello, world. How are you").unwrap(),
            vec!["Hello, world. How are you"]
        );
    }

    #[test]
    fn test_empty_text_is_error() {
        assert!(matches!(chunks(""), Err(TtsError::NoText)));
        assert!(matches!(chunks("   \n "), Err(TtsError::NoText)));
    }

    #[test]
    fn test_punctuation_only_is_error() {
        assert!(matches!(chunks("?!..."), Err(TtsError::NoText)));
    }

    #[test]
    fn test_long_text_chunks_respect_limit() {
        let sentence = "The quick brown fox jumps over the lazy dog";
        let text = [sentence; 10].join(" and ");
        let result = chunks(&text).unwrap();

        assert!(result.len() > 1);
        for chunk in &result {
            assert!(
                char_len(chunk) <= MAX_CHUNK_CHARS,
                "chunk too long ({}): {chunk}",
                char_len(chunk)
            );
            assert!(!chunk.starts_with(' ') && !chunk.ends_with(' '));
        }

        let rejoined: String = result.join(" ");
        assert_eq!(rejoined.split_whitespace().count(), text.split_whitespace().count());
    }

    #[test]
    fn test_long_text_splits_on_sentences() {
        let first = "a".repeat(60);
        let second = "b".repeat(60);
        let text = format!("{first}. {second}.");
        let result = chunks(&text).unwrap();
        assert_eq!(result, vec![first, second]);
    }

    #[test]
    fn test_long_text_without_spaces_is_hard_cut() {
        let text = "x".repeat(250);
        let result = chunks(&text).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(char_len(&result[0]), 100);
        assert_eq!(char_len(&result[1]), 100);
        assert_eq!(char_len(&result[2]), 50);
    }

    #[test]
    fn test_multibyte_text_counts_characters() {
        let text = "世界".repeat(80);
        let result = chunks(&text).unwrap();
        for chunk in &result {
            assert!(char_len(chunk) <= MAX_CHUNK_CHARS);
        }
        assert_eq!(result.concat(), text);
    }

    // ========================================================================
    // preprocess()
    // ========================================================================

    #[test]
    fn test_preprocess_tone_marks() {
        assert_eq!(preprocess("Really?Yes!"), "Really? Yes! ");
    }

    #[test]
    fn test_preprocess_end_of_line() {
        assert_eq!(preprocess("exam-\nple"), "example");
    }

    #[test]
    fn test_preprocess_abbreviations() {
        assert_eq!(preprocess("Dr. Smith met Mrs. Jones"), "Dr Smith met Mrs Jones");
        assert_eq!(preprocess("the last."), "the last.");
    }

    #[test]
    fn test_preprocess_substitution() {
        assert_eq!(preprocess("John Smith, Esq."), "John Smith, Esquire");
    }

    // ========================================================================
    // tokenize()
    // ========================================================================

    #[test]
    fn test_tokenize_keeps_tone_marks() {
        assert_eq!(tokenize("Why? Because"), vec!["Why?", " Because"]);
    }

    #[test]
    fn test_tokenize_period_and_comma() {
        assert_eq!(tokenize("One, two. Three"), vec!["One", " two", " Three"]);
    }

    #[test]
    fn test_tokenize_keeps_decimals() {
        assert_eq!(tokenize("It costs 1.50 today"), vec!["It costs 1.50 today"]);
    }

    #[test]
    fn test_tokenize_keeps_dotted_abbreviation() {
        assert_eq!(tokenize("fruit, e.g. apples"), vec!["fruit", " e.g. apples"]);
    }

    #[test]
    fn test_tokenize_colon() {
        assert_eq!(tokenize("Note: at 10:30"), vec!["Note", " at 10:30"]);
    }

    #[test]
    fn test_tokenize_other_punctuation() {
        assert_eq!(tokenize("a; b (c)\nd"), vec!["a", " b ", "c", "", "d"]);
    }

    // ========================================================================
    // clean_tokens() / minimize()
    // ========================================================================

    #[test]
    fn test_clean_tokens_drops_punctuation_only() {
        let tokens = vec![" hi ".to_string(), " ... ".to_string(), "".to_string()];
        assert_eq!(clean_tokens(tokens), vec!["hi"]);
    }

    #[test]
    fn test_minimize_short_token_untouched() {
        assert_eq!(minimize("short one", 100), vec!["short one"]);
    }

    #[test]
    fn test_minimize_cuts_on_space() {
        assert_eq!(minimize("aaa bbb ccc", 5), vec!["aaa", "bbb", "ccc"]);
    }
}
