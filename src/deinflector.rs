use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::DeinflectorError;

/// A candidate base form produced by a [Deinflector].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deinflection {
    pub term: String,
    /// Bitmask of the word classes `term` may belong to. `0` means any.
    pub rules: u32,
    /// Outermost reason first.
    pub reasons: Vec<String>,
}

/// Rule engine used by the translator to recover base forms.
pub trait Deinflector: Send + Sync {
    /// Every candidate for `source`, including `source` itself with no rules.
    fn deinflect(&self, source: &str) -> Vec<Deinflection>;

    fn rules_to_rule_flags(&self, rules: &[String]) -> u32;
}

/// Word classes understood by [ReasonDeinflector].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RuleType {
    /// Ichidan verb
    V1 = 0b0000001,
    /// Godan verb
    V5 = 0b0000010,
    /// Suru verb
    Vs = 0b0000100,
    /// Kuru verb
    Vk = 0b0001000,
    /// Zuru verb
    Vz = 0b0010000,
    /// I-adjective
    AdjI = 0b0100000,
    /// Intermediate -iru form
    Iru = 0b1000000,
}

impl RuleType {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "v1" => RuleType::V1,
            "v5" => RuleType::V5,
            "vs" => RuleType::Vs,
            "vk" => RuleType::Vk,
            "vz" => RuleType::Vz,
            "adj-i" => RuleType::AdjI,
            "iru" => RuleType::Iru,
            _ => return None,
        })
    }

    pub fn flag(self) -> u32 {
        self as u32
    }
}

/// Unknown rule names are ignored.
pub fn rule_names_to_flags<S: AsRef<str>>(rules: &[S]) -> u32 {
    rules
        .iter()
        .filter_map(|rule| RuleType::from_name(rule.as_ref()))
        .fold(0, |flags, rule| flags | rule.flag())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReasonVariant {
    pub kana_in: String,
    pub kana_out: String,
    pub rules_in: Vec<String>,
    pub rules_out: Vec<String>,
}

/// Reason name to its suffix rewrites, in table order.
pub type RawReasons = IndexMap<String, Vec<RawReasonVariant>>;

#[derive(Clone, Debug, PartialEq, Eq)]
struct ReasonVariant {
    kana_in: String,
    kana_out: String,
    rules_in: u32,
    rules_out: u32,
}

/// Breadth-first suffix-rewriting deinflector driven by a reason table.
#[derive(Clone, Debug, Default)]
pub struct ReasonDeinflector {
    reasons: Vec<(String, Vec<ReasonVariant>)>,
}

impl ReasonDeinflector {
    pub fn new(reasons: RawReasons) -> Self {
        let reasons = reasons
            .into_iter()
            .map(|(reason, variants)| {
                let variants = variants
                    .into_iter()
                    .map(|variant| ReasonVariant {
                        rules_in: rule_names_to_flags(&variant.rules_in),
                        rules_out: rule_names_to_flags(&variant.rules_out),
                        kana_in: variant.kana_in,
                        kana_out: variant.kana_out,
                    })
                    .collect();
                (reason, variants)
            })
            .collect();
        Self { reasons }
    }

    /// Parses a `{reason: [{kanaIn, kanaOut, rulesIn, rulesOut}]}` table.
    pub fn from_json(json: &str) -> Result<Self, DeinflectorError> {
        let raw: RawReasons = serde_json::from_str(json)?;
        Ok(Self::new(raw))
    }
}

impl Deinflector for ReasonDeinflector {
    fn deinflect(&self, source: &str) -> Vec<Deinflection> {
        let mut results = vec![Deinflection {
            term: source.to_string(),
            rules: 0,
            reasons: vec![],
        }];

        // results grows while it is walked
        let mut i = 0;
        while i < results.len() {
            let Deinflection {
                term,
                rules,
                reasons,
            } = results[i].clone();
            let term_length = term.chars().count();

            for (reason, variants) in &self.reasons {
                for variant in variants {
                    if (rules != 0 && (rules & variant.rules_in) == 0)
                        || !term.ends_with(&variant.kana_in)
                    {
                        continue;
                    }
                    let kana_in_length = variant.kana_in.chars().count();
                    let kana_out_length = variant.kana_out.chars().count();
                    if term_length + kana_out_length <= kana_in_length {
                        continue;
                    }

                    let base = &term[..term.len() - variant.kana_in.len()];
                    let mut next_reasons = Vec::with_capacity(reasons.len() + 1);
                    next_reasons.push(reason.clone());
                    next_reasons.extend(reasons.iter().cloned());
                    results.push(Deinflection {
                        term: format!("{base}{}", variant.kana_out),
                        rules: variant.rules_out,
                        reasons: next_reasons,
                    });
                }
            }
            i += 1;
        }

        results
    }

    fn rules_to_rule_flags(&self, rules: &[String]) -> u32 {
        rule_names_to_flags(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REASONS: &str = r#"{
        "past": [
            {"kanaIn": "た", "kanaOut": "る", "rulesIn": [], "rulesOut": ["v1"]},
            {"kanaIn": "った", "kanaOut": "う", "rulesIn": [], "rulesOut": ["v5"]}
        ],
        "-tai": [
            {"kanaIn": "たい", "kanaOut": "る", "rulesIn": ["adj-i"], "rulesOut": ["v1"]}
        ],
        "negative": [
            {"kanaIn": "くない", "kanaOut": "い", "rulesIn": [], "rulesOut": ["adj-i"]},
            {"kanaIn": "ない", "kanaOut": "る", "rulesIn": ["adj-i"], "rulesOut": ["v1"]}
        ]
    }"#;

    fn deinflector() -> ReasonDeinflector {
        ReasonDeinflector::from_json(REASONS).unwrap()
    }

    #[test]
    fn source_is_always_first() {
        let results = deinflector().deinflect("食べた");
        assert_eq!(
            results[0],
            Deinflection {
                term: "食べた".to_string(),
                rules: 0,
                reasons: vec![],
            }
        );
    }

    #[test]
    fn single_step() {
        let results = deinflector().deinflect("食べた");
        let base = results.iter().find(|d| d.term == "食べる").unwrap();
        assert_eq!(base.rules, RuleType::V1.flag());
        assert_eq!(base.reasons, vec!["past".to_string()]);
    }

    #[test]
    fn chained_reasons_are_outermost_first() {
        let results = deinflector().deinflect("食べない");
        let base = results.iter().find(|d| d.term == "食べる").unwrap();
        assert_eq!(base.reasons, vec!["negative".to_string()]);

        let results = deinflector().deinflect("食べたくない");
        let chained = results.iter().find(|d| d.term == "食べる").unwrap();
        assert_eq!(
            chained.reasons,
            vec!["-tai".to_string(), "negative".to_string()]
        );
    }

    #[test]
    fn rules_in_filter_blocks_incompatible_chain() {
        let deinflector = ReasonDeinflector::from_json(
            r#"{
                "first": [{"kanaIn": "x", "kanaOut": "y", "rulesIn": [], "rulesOut": ["v1"]}],
                "second": [{"kanaIn": "y", "kanaOut": "z", "rulesIn": ["adj-i"], "rulesOut": []}]
            }"#,
        )
        .unwrap();

        let terms: Vec<String> = deinflector.deinflect("x").into_iter().map(|d| d.term).collect();
        assert_eq!(terms, vec!["x".to_string(), "y".to_string()]);

        let terms: Vec<String> = deinflector.deinflect("y").into_iter().map(|d| d.term).collect();
        assert_eq!(terms, vec!["y".to_string(), "z".to_string()]);
    }

    #[test]
    fn empty_results_are_skipped() {
        let results = deinflector().deinflect("た");
        assert!(results.iter().all(|d| !d.term.is_empty()));
        assert!(results.iter().any(|d| d.term == "る"));
    }

    #[test]
    fn rule_flags() {
        let flags = rule_names_to_flags(&["v1", "adj-i", "unknown"]);
        assert_eq!(flags, RuleType::V1.flag() | RuleType::AdjI.flag());
        assert_eq!(rule_names_to_flags::<&str>(&[]), 0);
    }

    #[test]
    fn invalid_table_is_an_error() {
        assert!(ReasonDeinflector::from_json("[1, 2]").is_err());
    }
}
