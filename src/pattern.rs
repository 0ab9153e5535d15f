//! Translation of character and word patterns to regular expressions.
//!
//! A *character pattern* describes a value one character at a time:
//!
//! | Pattern | Matches |
//! | --- | --- |
//! | `A` | upper-case Latin letter |
//! | `a` | lower-case Latin letter |
//! | `9` | ASCII digit |
//! | `C` | CJK ideograph |
//! | `H` | hiragana |
//! | `K` | full-width katakana |
//! | `k` | half-width katakana |
//! | `G` | hangul |
//! | anything else | itself |
//!
//! So `Aaa Aaaa` matches `Bob Dole` but not `bob dole`.
//!
//! A *word pattern* describes a value one word at a time, with bracketed
//! tokens such as `[Word]`, `[word]`, `[WORD]`, `[digit]` or `[number]`.
//! Text outside brackets matches itself.
//!
//! Both translators return a regex anchored at both ends.

const UPPER_LATIN: &str = "A-ZÀ-ÖØ-Þ";
const LOWER_LATIN: &str = "a-zß-öø-ÿ";
const KATAKANA: &str = r"\x{30A0}-\x{30FF}";
const HALF_WIDTH_KATAKANA: &str = r"\x{FF66}-\x{FF9D}";

/// Translates a character pattern to an anchored regex.
///
/// # Examples
///
/// ```
/// use tql_dsel::pattern::to_regex;
///
/// let re = regex::Regex::new(&to_regex("Aaa 99")).unwrap();
/// assert!(re.is_match("Bob 42"));
/// assert!(!re.is_match("bob 42"));
/// ```
pub fn to_regex(pattern: &str) -> String {
    let mut regex = String::from("^");
    for c in pattern.chars() {
        match c {
            'A' => regex.push_str(&format!("[{UPPER_LATIN}]")),
            'a' => regex.push_str(&format!("[{LOWER_LATIN}]")),
            '9' => regex.push_str("[0-9]"),
            'C' => regex.push_str(r"\p{Han}"),
            'H' => regex.push_str(r"\p{Hiragana}"),
            'K' => regex.push_str(&format!("[{KATAKANA}]")),
            'k' => regex.push_str(&format!("[{HALF_WIDTH_KATAKANA}]")),
            'G' => regex.push_str(r"\p{Hangul}"),
            c => regex.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    regex.push('$');
    regex
}

/// Regex for one bracketed word-pattern token, `None` if unknown.
fn word_token_regex(token: &str) -> Option<String> {
    let regex = match token {
        "word" => format!("[{LOWER_LATIN}]+"),
        "Word" => format!("[{UPPER_LATIN}][{LOWER_LATIN}]*"),
        "WORD" => format!("[{UPPER_LATIN}]+"),
        "wOrD" => format!("[{UPPER_LATIN}{LOWER_LATIN}]+"),
        "char" => format!("[{LOWER_LATIN}]"),
        "Char" => format!("[{UPPER_LATIN}]"),
        "digit" => "[0-9]".to_string(),
        "number" => "[0-9]+".to_string(),
        "alnum" => format!("[{UPPER_LATIN}{LOWER_LATIN}0-9]+"),
        "Ideogram" => r"\p{Han}".to_string(),
        "IdeogramSeq" => r"\p{Han}+".to_string(),
        "hiraganaSeq" => r"\p{Hiragana}+".to_string(),
        "katakanaSeq" => format!("[{KATAKANA}]+"),
        "hangulSeq" => r"\p{Hangul}+".to_string(),
        _ => return None,
    };
    Some(regex)
}

/// Translates a word pattern to an anchored regex.
///
/// # Examples
///
/// ```
/// use tql_dsel::pattern::word_pattern_to_regex;
///
/// let re = regex::Regex::new(&word_pattern_to_regex("[Word] [word][digit]")).unwrap();
/// assert!(re.is_match("Hello world7"));
/// assert!(!re.is_match("hello world7"));
/// ```
pub fn word_pattern_to_regex(pattern: &str) -> String {
    let mut regex = String::from("^");
    let mut rest = pattern;

    while !rest.is_empty() {
        if let Some(after_open) = rest.strip_prefix('[') {
            if let Some(close) = after_open.find(']') {
                if let Some(token_regex) = word_token_regex(&after_open[..close]) {
                    regex.push_str(&token_regex);
                    rest = &after_open[close + 1..];
                    continue;
                }
            }
        }
        // Literal text up to the next '[' (or a lone unknown '[')
        let first_len = rest.chars().next().map_or(1, char::len_utf8);
        let end = rest[first_len..]
            .find('[')
            .map_or(rest.len(), |i| i + first_len);
        regex.push_str(&regex::escape(&rest[..end]));
        rest = &rest[end..];
    }

    regex.push('$');
    regex
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn matches(regex: &str, value: &str) -> bool {
        Regex::new(regex).unwrap().is_match(value)
    }

    #[test]
    fn char_pattern_classes() {
        assert!(matches(&to_regex("Aaa Aaaa"), "Bob Dole"));
        assert!(matches(&to_regex("Aaa Aaaa"), "Éva Roux"));
        assert!(!matches(&to_regex("Aaa Aaaa"), "Bob Dolee"));
        assert!(matches(&to_regex("99-99"), "12-34"));
        assert!(matches(&to_regex("CC"), "中文"));
        assert!(matches(&to_regex("HH"), "ひら"));
        assert!(matches(&to_regex("KK"), "カタ"));
        assert!(matches(&to_regex("G"), "한"));
    }

    #[test]
    fn special_characters_are_literal() {
        assert!(matches(&to_regex("a.a"), "x.y"));
        assert!(!matches(&to_regex("a.a"), "xzy"));
        assert!(matches(&to_regex("(99)"), "(12)"));
    }

    #[test]
    fn word_pattern_tokens() {
        let regex = word_pattern_to_regex("[Word] [word][digit]");
        assert!(matches(&regex, "Hello world7"));
        assert!(!matches(&regex, "Hello World7"));
        assert!(matches(&word_pattern_to_regex("[WORD]-[number]"), "ABC-1234"));
    }

    #[test]
    fn unknown_word_token_is_literal() {
        let regex = word_pattern_to_regex("[foo] [word]");
        assert!(matches(&regex, "[foo] bar"));
    }
}
