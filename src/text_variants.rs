use crate::{
    settings::{TranslationCollapseEmphaticSequences, TranslationConvertType},
    translation::{FindTermsOptions, FindTermsTextReplacement},
};

/// One combination of text transforms to try on the searched text.
#[derive(Clone, Copy, Debug)]
pub struct TextVariant<'a> {
    pub text_replacements: Option<&'a [FindTermsTextReplacement]>,
    pub half_width: bool,
    pub numeric: bool,
    pub alphabetic: bool,
    pub hiragana_to_katakana: bool,
    pub katakana_to_hiragana: bool,
    pub collapse_emphatic: bool,
    pub collapse_emphatic_full: bool,
}

fn convert_type_values(convert_type: TranslationConvertType) -> &'static [bool] {
    match convert_type {
        TranslationConvertType::False => &[false],
        TranslationConvertType::True => &[true],
        TranslationConvertType::Variant => &[false, true],
    }
}

fn collapse_emphatic_values(
    collapse: TranslationCollapseEmphaticSequences,
) -> &'static [(bool, bool)] {
    match collapse {
        TranslationCollapseEmphaticSequences::False => &[(false, false)],
        TranslationCollapseEmphaticSequences::True => &[(false, false), (true, false)],
        TranslationCollapseEmphaticSequences::Full => {
            &[(false, false), (true, false), (true, true)]
        }
    }
}

/// Lazy cross-product of every transform axis of a [FindTermsOptions].
///
/// Axis order is text replacements, half-width, numeric, alphabetic,
/// hiragana to katakana, katakana to hiragana, then emphatic collapse.
/// The first axis varies fastest.
#[derive(Clone, Debug)]
pub struct TextVariants<'a> {
    text_replacements: &'a [Option<Vec<FindTermsTextReplacement>>],
    flags: [&'static [bool]; 5],
    collapse_emphatic: &'static [(bool, bool)],
    index: usize,
    total: usize,
}

impl<'a> TextVariants<'a> {
    pub fn new(options: &'a FindTermsOptions) -> Self {
        let flags = [
            convert_type_values(options.convert_half_width_characters),
            convert_type_values(options.convert_numeric_characters),
            convert_type_values(options.convert_alphabetic_characters),
            convert_type_values(options.convert_hiragana_to_katakana),
            convert_type_values(options.convert_katakana_to_hiragana),
        ];
        let collapse_emphatic = collapse_emphatic_values(options.collapse_emphatic_sequences);
        let total = options.text_replacements.len()
            * flags.iter().map(|values| values.len()).product::<usize>()
            * collapse_emphatic.len();
        Self {
            text_replacements: &options.text_replacements,
            flags,
            collapse_emphatic,
            index: 0,
            total,
        }
    }

    fn variant_at(&self, index: usize) -> TextVariant<'a> {
        let mut rest = index;
        let mut take = |len: usize| {
            let value = rest % len;
            rest /= len;
            value
        };

        let replacement_groups: &'a [Option<Vec<FindTermsTextReplacement>>] =
            self.text_replacements;
        let text_replacements = replacement_groups[take(replacement_groups.len())].as_deref();
        let [half_width, numeric, alphabetic, hiragana_to_katakana, katakana_to_hiragana] =
            self.flags.map(|values| values[take(values.len())]);
        let (collapse_emphatic, collapse_emphatic_full) =
            self.collapse_emphatic[take(self.collapse_emphatic.len())];

        TextVariant {
            text_replacements,
            half_width,
            numeric,
            alphabetic,
            hiragana_to_katakana,
            katakana_to_hiragana,
            collapse_emphatic,
            collapse_emphatic_full,
        }
    }
}

impl<'a> Iterator for TextVariants<'a> {
    type Item = TextVariant<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }
        let variant = self.variant_at(self.index);
        self.index += 1;
        Some(variant)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TextVariants<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options() -> FindTermsOptions {
        FindTermsOptions {
            convert_katakana_to_hiragana: TranslationConvertType::False,
            ..Default::default()
        }
    }

    #[test]
    fn all_false_yields_single_identity_variant() {
        let options = options();
        let variants: Vec<_> = TextVariants::new(&options).collect();
        assert_eq!(variants.len(), 1);
        let variant = variants[0];
        assert!(variant.text_replacements.is_none());
        assert!(!variant.half_width && !variant.katakana_to_hiragana && !variant.collapse_emphatic);
    }

    #[test]
    fn first_axis_varies_fastest() {
        let mut options = options();
        options.convert_half_width_characters = TranslationConvertType::Variant;
        options.collapse_emphatic_sequences = TranslationCollapseEmphaticSequences::Full;

        let variants: Vec<(bool, bool, bool)> = TextVariants::new(&options)
            .map(|v| (v.half_width, v.collapse_emphatic, v.collapse_emphatic_full))
            .collect();
        assert_eq!(
            variants,
            vec![
                (false, false, false),
                (true, false, false),
                (false, true, false),
                (true, true, false),
                (false, true, true),
                (true, true, true),
            ]
        );
    }

    #[test]
    fn true_is_a_single_value() {
        let mut options = options();
        options.convert_numeric_characters = TranslationConvertType::True;
        let variants: Vec<_> = TextVariants::new(&options).collect();
        assert_eq!(variants.len(), 1);
        assert!(variants[0].numeric);
    }

    #[test]
    fn iterator_is_restartable() {
        let mut options = options();
        options.convert_alphabetic_characters = TranslationConvertType::Variant;
        options.convert_katakana_to_hiragana = TranslationConvertType::Variant;
        let variants = TextVariants::new(&options);
        assert_eq!(variants.len(), 4);

        let mut partial = variants.clone();
        partial.next();
        assert_eq!(partial.len(), 3);
        assert_eq!(variants.collect::<Vec<_>>().len(), 4);
    }

    #[test]
    fn no_text_replacements_means_no_variants() {
        let mut options = options();
        options.text_replacements = vec![];
        assert_eq!(TextVariants::new(&options).count(), 0);
    }
}
