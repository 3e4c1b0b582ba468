use std::{collections::HashMap, sync::LazyLock};

use crate::{
    language::cjk_utils::{
        is_code_point_in_range, is_code_point_in_ranges, CodepointRange, CJK_IDEOGRAPH_RANGES,
    },
    text_source_map::TextSourceMap,
};

pub const HIRAGANA_SMALL_TSU_CODE_POINT: u32 = 0x3063;
pub const KATAKANA_SMALL_TSU_CODE_POINT: u32 = 0x30c3;
pub const KATAKANA_SMALL_KA_CODE_POINT: u32 = 0x30f5;
pub const KATAKANA_SMALL_KE_CODE_POINT: u32 = 0x30f6;
pub const KANA_PROLONGED_SOUND_MARK_CODE_POINT: u32 = 0x30fc;

const HALFWIDTH_DAKUTEN_CODE_POINT: u32 = 0xff9e;
const HALFWIDTH_HANDAKUTEN_CODE_POINT: u32 = 0xff9f;

pub const HIRAGANA_CONVERSION_RANGE: CodepointRange = (0x3041, 0x3096);
pub const KATAKANA_CONVERSION_RANGE: CodepointRange = (0x30a1, 0x30f6);

pub const HIRAGANA_RANGE: CodepointRange = (0x3040, 0x309f);
pub const KATAKANA_RANGE: CodepointRange = (0x30a0, 0x30ff);

pub const JP_RANGES_BASE: [CodepointRange; 14] = [
    HIRAGANA_RANGE,
    KATAKANA_RANGE,
    (0xff66, 0xff9f), // Halfwidth katakana
    (0x30fb, 0x30fc), // Katakana punctuation
    (0xff61, 0xff65), // Kana punctuation
    (0x3000, 0x303f), // CJK punctuation
    (0xff10, 0xff19), // Fullwidth numbers
    (0xff21, 0xff3a), // Fullwidth upper case Latin letters
    (0xff41, 0xff5a), // Fullwidth lower case Latin letters
    (0xff01, 0xff0f), // Fullwidth punctuation 1
    (0xff1a, 0xff1f), // Fullwidth punctuation 2
    (0xff3b, 0xff3f), // Fullwidth punctuation 3
    (0xff5b, 0xff60), // Fullwidth punctuation 4
    (0xffe0, 0xffee), // Currency markers
];

/// Index 0 is the plain kana, 1 with dakuten, 2 with handakuten.
/// A missing slot or `-` means the combination does not exist.
#[rustfmt::skip]
static HALFWIDTH_KATAKANA_MAP: LazyLock<HashMap<char, &str>> = LazyLock::new(|| {
    HashMap::from([
        ('･', "・"),('ｦ', "ヲヺ"),('ｧ', "ァ"),('ｨ', "ィ"),('ｩ', "ゥ"),('ｪ', "ェ"),
        ('ｫ', "ォ"),('ｬ', "ャ"),('ｭ', "ュ"),('ｮ', "ョ"),('ｯ', "ッ"),('ｰ', "ー"),
        ('ｱ', "ア"),('ｲ', "イ"),('ｳ', "ウヴ"),('ｴ', "エ"),('ｵ', "オ"),('ｶ', "カガ"),
        ('ｷ', "キギ"),('ｸ', "クグ"),('ｹ', "ケゲ"),('ｺ', "コゴ"),('ｻ', "サザ"),
        ('ｼ', "シジ"),('ｽ', "スズ"),('ｾ', "セゼ"),('ｿ', "ソゾ"),('ﾀ', "タダ"),('ﾁ', "チヂ"),
        ('ﾂ', "ツヅ"),('ﾃ', "テデ"),('ﾄ', "トド"),('ﾅ', "ナ"),('ﾆ', "ニ"),('ﾇ', "ヌ"),
        ('ﾈ', "ネ"),('ﾉ', "ノ"),('ﾊ', "ハバパ"),('ﾋ', "ヒビピ"),('ﾌ', "フブプ"),
        ('ﾍ', "ヘベペ"),('ﾎ', "ホボポ"),('ﾏ', "マ"),('ﾐ', "ミ"),('ﾑ', "ム"),
        ('ﾒ', "メ"),('ﾓ', "モ"),('ﾔ', "ヤ"),('ﾕ', "ユ"),('ﾖ', "ヨ"),('ﾗ', "ラ"),
        ('ﾘ', "リ"),('ﾙ', "ル"),('ﾚ', "レ"),('ﾛ', "ロ"),('ﾜ', "ワ"),('ﾝ', "ン"),
    ])
});

#[rustfmt::skip]
const VOWEL_TO_KANA_MAPPING: [(char, &str); 5] = [
    ('a', "ぁあかがさざただなはばぱまゃやらゎわヵァアカガサザタダナハバパマャヤラヮワヵヷ"),
    ('i', "ぃいきぎしじちぢにひびぴみりゐィイキギシジチヂニヒビピミリヰヸ"),
    ('u', "ぅうくぐすずっつづぬふぶぷむゅゆるゥウクグスズッツヅヌフブプムュユルヴ"),
    ('e', "ぇえけげせぜてでねへべぺめれゑヶェエケゲセゼテデネヘベペメレヱヶヹ"),
    ('o', "ぉおこごそぞとどのほぼぽもょよろをォオコゴソゾトドノホボポモョヨロヲヺ"),
];

static KANA_TO_VOWEL_MAPPING: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (vowel, characters) in VOWEL_TO_KANA_MAPPING {
        for c in characters.chars() {
            map.insert(c, vowel);
        }
    }
    map
});

/// The hiragana a `ー` stands for after `previous`.
fn get_prolonged_hiragana(previous: char) -> Option<char> {
    match KANA_TO_VOWEL_MAPPING.get(&previous)? {
        'a' => Some('あ'),
        'i' => Some('い'),
        'u' => Some('う'),
        'e' => Some('え'),
        'o' => Some('う'),
        _ => None,
    }
}

pub fn is_code_point_japanese(code_point: u32) -> bool {
    is_code_point_in_ranges(code_point, &JP_RANGES_BASE)
        || is_code_point_in_ranges(code_point, &CJK_IDEOGRAPH_RANGES)
}

pub fn is_emphatic_code_point(code_point: u32) -> bool {
    code_point == HIRAGANA_SMALL_TSU_CODE_POINT
        || code_point == KATAKANA_SMALL_TSU_CODE_POINT
        || code_point == KANA_PROLONGED_SOUND_MARK_CODE_POINT
}

/// Cuts `text` at the first character outside the Japanese ranges.
pub fn trim_to_japanese(text: &str) -> &str {
    match text
        .char_indices()
        .find(|(_, c)| !is_code_point_japanese(*c as u32))
    {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

pub fn convert_katakana_to_hiragana(text: &str, keep_prolonged_sound_marks: bool) -> String {
    let mut result = String::with_capacity(text.len());
    let offset = KATAKANA_CONVERSION_RANGE.0 - HIRAGANA_CONVERSION_RANGE.0;
    let mut previous: Option<char> = None;

    for c in text.chars() {
        let code_point = c as u32;
        let converted = match code_point {
            KATAKANA_SMALL_KA_CODE_POINT | KATAKANA_SMALL_KE_CODE_POINT => c,
            KANA_PROLONGED_SOUND_MARK_CODE_POINT if !keep_prolonged_sound_marks => previous
                .and_then(get_prolonged_hiragana)
                .unwrap_or(c),
            _ if is_code_point_in_range(code_point, KATAKANA_CONVERSION_RANGE) => {
                char::from_u32(code_point - offset).unwrap_or(c)
            }
            _ => c,
        };
        result.push(converted);
        previous = Some(converted);
    }

    result
}

pub fn convert_hiragana_to_katakana(text: &str) -> String {
    let offset = KATAKANA_CONVERSION_RANGE.0 - HIRAGANA_CONVERSION_RANGE.0;
    text.chars()
        .map(|c| {
            let code_point = c as u32;
            if is_code_point_in_range(code_point, HIRAGANA_CONVERSION_RANGE) {
                char::from_u32(code_point + offset).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// ASCII digits to their full-width forms. Length is preserved.
pub fn convert_numeric_to_fullwidth(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '0'..='9' => char::from_u32(c as u32 + (0xff10 - 0x30)).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Half-width katakana to full-width, merging a trailing voicing mark
/// into the preceding kana.
pub fn convert_halfwidth_kana_to_fullwidth(text: &str, source_map: &mut TextSourceMap) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut result_length = 0;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let Some(mapping) = HALFWIDTH_KATAKANA_MAP.get(&c) else {
            result.push(c);
            result_length += 1;
            i += 1;
            continue;
        };

        let index = match chars.get(i + 1).map(|&next| next as u32) {
            Some(HALFWIDTH_DAKUTEN_CODE_POINT) => 1,
            Some(HALFWIDTH_HANDAKUTEN_CODE_POINT) => 2,
            _ => 0,
        };
        let plain = mapping.chars().next().unwrap_or(c);
        let converted = match mapping.chars().nth(index) {
            Some(voiced) if index > 0 && voiced != '-' => {
                i += 1;
                source_map.combine(result_length, 1);
                voiced
            }
            _ => plain,
        };

        result.push(converted);
        result_length += 1;
        i += 1;
    }

    result
}

/// Shortens runs of `っ`, `ッ` and `ー`.
///
/// Without `full_collapse` the first character of each run is kept,
/// otherwise every one of them is removed.
pub fn collapse_emphatic_sequences(
    text: &str,
    full_collapse: bool,
    source_map: &mut TextSourceMap,
) -> String {
    let mut result = String::with_capacity(text.len());
    let mut result_length: usize = 0;
    let mut collapse_code_point: Option<u32> = None;

    for c in text.chars() {
        let code_point = c as u32;
        if !is_emphatic_code_point(code_point) {
            collapse_code_point = None;
            result.push(c);
            result_length += 1;
            continue;
        }
        if collapse_code_point != Some(code_point) {
            collapse_code_point = Some(code_point);
            if !full_collapse {
                result.push(c);
                result_length += 1;
                continue;
            }
        }
        source_map.combine(result_length.saturating_sub(1), 1);
    }

    result
}
