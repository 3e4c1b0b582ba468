use wana_kana::ConvertJapanese;

use crate::text_source_map::TextSourceMap;

/// Converts romaji (half or full-width) to hiragana.
///
/// Characters that are not romaji are kept as-is and split the text into
/// independently converted parts.
pub fn convert_alphabetic_to_kana(text: &str, source_map: &mut TextSourceMap) -> String {
    let mut part = String::new();
    let mut result = String::new();
    let mut result_length = 0;

    for c in text.chars() {
        let normalized = match c as u32 {
            code_point @ 0x41..=0x5a => char::from_u32(code_point + 0x61 - 0x41),
            0x61..=0x7a => Some(c),
            code_point @ 0xff21..=0xff3a => char::from_u32(code_point + 0x61 - 0xff21),
            code_point @ 0xff41..=0xff5a => char::from_u32(code_point + 0x61 - 0xff41),
            0x2d | 0xff0d => Some('-'),
            _ => None,
        };
        match normalized {
            Some(normalized) => part.push(normalized),
            None => {
                if !part.is_empty() {
                    let kana = convert_alphabetic_part_to_kana(&part, source_map, result_length);
                    result_length += kana.chars().count();
                    result.push_str(&kana);
                    part.clear();
                }
                result.push(c);
                result_length += 1;
            }
        }
    }

    if !part.is_empty() {
        result.push_str(&convert_alphabetic_part_to_kana(
            &part,
            source_map,
            result_length,
        ));
    }

    result
}

/// Converts one romaji run and records, starting at `source_map_start`, how
/// many romaji letters each kana came from.
fn convert_alphabetic_part_to_kana(
    text: &str,
    source_map: &mut TextSourceMap,
    mut source_map_start: usize,
) -> String {
    let result = text.to_hiragana();
    let text_chars: Vec<char> = text.chars().collect();
    let result_chars: Vec<char> = result.chars().collect();

    let mut i = 0;
    let mut result_pos = 0;
    while i < text_chars.len() {
        // smallest prefix whose conversion is a prefix of the result
        let mut i_next = i + 1;
        let mut result_pos_next = result_chars.len();
        while i_next < text_chars.len() {
            let prefix: String = text_chars[..i_next].iter().collect();
            let converted: Vec<char> = prefix.to_hiragana().chars().collect();
            if result_chars.starts_with(&converted) {
                result_pos_next = converted.len();
                break;
            }
            i_next += 1;
        }

        let removals = i_next - i - 1;
        if removals > 0 {
            source_map.combine(source_map_start, removals);
        }
        source_map_start += 1;

        let additions = result_pos_next.saturating_sub(result_pos + 1);
        for _ in 0..additions {
            source_map.insert(source_map_start, &[0]);
            source_map_start += 1;
        }

        i = i_next;
        result_pos = result_pos_next;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn romaji_converts_to_hiragana() {
        let mut map = TextSourceMap::new("taberu");
        let result = convert_alphabetic_to_kana("taberu", &mut map);
        assert_eq!(result, "たべる");
        assert_eq!(map.source_prefix(1), "ta");
        assert_eq!(map.source_prefix(2), "tabe");
        assert_eq!(map.get_source_length(3), 6);
    }

    #[test]
    fn non_romaji_splits_parts() {
        let mut map = TextSourceMap::new("ＴＡ食ka");
        let result = convert_alphabetic_to_kana("ＴＡ食ka", &mut map);
        assert_eq!(result, "た食か");
        assert_eq!(map.source_prefix(2), "ＴＡ食");
        assert_eq!(map.get_source_length(3), 5);
    }
}
