use fancy_regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::text_source_map::TextSourceMap;

static MATCH_REPLACEMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\$|&|`|'|(\d\d?)|<([^>]*)>)").expect("replacement pattern is valid")
});

/// Applies `replacement_pattern` to the matches of `pattern` in `text`,
/// keeping `source_map` aligned with the result.
///
/// Only the first match is replaced unless `is_global` is set.
pub fn apply_text_replacement(
    text: &str,
    source_map: &mut TextSourceMap,
    pattern: &Regex,
    replacement_pattern: &str,
    is_global: bool,
) -> Result<String, fancy_regex::Error> {
    let mut current_text = text.to_string();
    let mut current_pos = 0;

    loop {
        let Some(captures) = pattern.captures_from_pos(&current_text, current_pos)? else {
            break;
        };
        let Some(whole) = captures.get(0) else {
            break;
        };
        let match_start = whole.start();
        let match_end = whole.end();

        let actual_replacement =
            apply_match_replacement(replacement_pattern, &captures, &current_text);

        let index = current_text[..match_start].chars().count();
        let match_length = whole.as_str().chars().count();
        let replacement_length = actual_replacement.chars().count();
        if replacement_length > 0 {
            source_map.insert(index, &vec![0; replacement_length]);
            source_map.combine(index + replacement_length - 1, match_length);
        } else {
            source_map.combine(index, match_length);
        }

        let mut new_text = String::with_capacity(
            current_text.len() - (match_end - match_start) + actual_replacement.len(),
        );
        new_text.push_str(&current_text[..match_start]);
        new_text.push_str(&actual_replacement);
        new_text.push_str(&current_text[match_end..]);
        current_text = new_text;

        if !is_global {
            break;
        }

        current_pos = match_start + actual_replacement.len();
        if match_start == match_end {
            // step over one char so empty matches cannot loop forever
            match current_text[current_pos..].chars().next() {
                Some(c) => current_pos += c.len_utf8(),
                None => break,
            }
        }
        if current_pos > current_text.len() {
            break;
        }
    }

    Ok(current_text)
}

/// Expands `$$`, `$&`, `` $` ``, `$'`, `$n` and `$<name>` inside a replacement.
pub fn apply_match_replacement(
    replacement_pattern: &str,
    outer_captures: &Captures,
    text_at_match_time: &str,
) -> String {
    let (match_start, match_end, match_str) = match outer_captures.get(0) {
        Some(m) => (m.start(), m.end(), m.as_str()),
        None => (0, 0, ""),
    };
    MATCH_REPLACEMENT_PATTERN
        .replace_all(replacement_pattern, |inner_caps: &Captures| {
            let g0 = inner_caps.get(0).map_or("", |m| m.as_str());

            if let Some(digits) = inner_caps.get(1) {
                let digits = digits.as_str();
                let group = |idx: usize| {
                    (idx > 0 && idx < outer_captures.len()).then(|| {
                        outer_captures
                            .get(idx)
                            .map_or(String::new(), |m| m.as_str().to_string())
                    })
                };
                if let Some(value) = digits.parse::<usize>().ok().and_then(group) {
                    return value;
                }
                // `$12` with a single group is group 1 followed by a literal `2`
                if digits.len() == 2 {
                    if let Some(value) = digits[..1].parse::<usize>().ok().and_then(group) {
                        return value + &digits[1..];
                    }
                }
                g0.to_string()
            } else if let Some(name) = inner_caps.get(2) {
                match outer_captures.name(name.as_str()) {
                    Some(named) => named.as_str().to_string(),
                    None => g0.to_string(),
                }
            } else {
                match g0 {
                    "$$" => "$".to_string(),
                    "$&" => match_str.to_string(),
                    "$`" => text_at_match_time[..match_start].to_string(),
                    "$'" => text_at_match_time[match_end..].to_string(),
                    _ => g0.to_string(),
                }
            }
        })
        .into_owned()
}
