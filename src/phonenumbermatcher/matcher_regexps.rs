// Copyright (C) 2025 The phonefinder developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    phonenumberutil::helper_constants::{
        MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, PLUS_CHARS, VALID_PUNCTUATION,
    },
    regexp_cache::RegexCache,
};

/// Builds a `{lower,upper}` quantifier.
fn limit(lower: usize, upper: usize) -> String {
    format!("{{{},{}}}", lower, upper)
}

/// The compiled regular expression set the scanner runs on. Immutable after
/// construction and shared by every matcher in the process.
pub(super) struct PhoneNumberMatcherRegExps {
    /// The phone number pattern used by the scanner, similar to the viable
    /// number pattern of the parser but with whitespace and brackets allowed
    /// between the digit blocks. Deliberately permissive: candidates are
    /// culled by the verifier, not here.
    pub pattern: Regex,

    /// Matches strings that look like publication pages, to skip citations
    /// such as "Computer Science 76-80 (2001)".
    pub pub_pages: Regex,

    /// Matches strings that look like dates using "/" as a separator.
    /// Examples: 3/10/2011, 31/10/96 or 08/31/95.
    pub slash_separated_dates: Regex,

    /// Matches timestamps. Examples: "2012-01-02 08:00". The hour is matched
    /// here; `time_stamps_suffix` matches the minutes that follow the
    /// candidate in the surrounding text.
    pub time_stamps: Regex,
    pub time_stamps_suffix: Regex,

    /// Matches white-space that may indicate the end of a phone number and
    /// the start of something else, such as a neighbouring number.
    pub group_separator: Regex,

    /// Punctuation that may legitimately start a phone number.
    pub lead_class_pattern: Regex,

    /// Verifies the bracketing in a candidate: at most four bracket pairs, an
    /// opening bracket at the very start need not be closed (it may have been
    /// dropped from the match), but any later opener must be.
    pub matching_brackets: Regex,

    /// Compiles leading-digit patterns of alternate formats on demand.
    pub regexp_cache: RegexCache,
}

impl PhoneNumberMatcherRegExps {
    fn new() -> Self {
        let opening_parens = "(\\[\u{FF08}\u{FF3B}";
        let closing_parens = ")\\]\u{FF09}\u{FF3D}";
        let non_parens = format!("[^{}{}]", opening_parens, closing_parens);
        // Limit on the number of pairs of brackets in a phone number.
        let bracket_pair_limit = limit(0, 3);
        let matching_brackets = format!(
            "(?:[{op}])?(?:{np}+[{cl}])?{np}+(?:[{op}]{np}+[{cl}]){lim}{np}*",
            op = opening_parens,
            cl = closing_parens,
            np = non_parens,
            lim = bracket_pair_limit,
        );

        let lead_class_chars = format!("{}{}", opening_parens, PLUS_CHARS);
        let lead_class = format!("[{}]", lead_class_chars);

        // Limit on the number of leading (plus) characters.
        let lead_limit = limit(0, 2);
        // Limit on the number of consecutive punctuation characters.
        let punctuation_limit = limit(0, 4);
        // The maximum number of digits allowed in a digit-separated block.
        // As we allow all digits in a single block, this should be set high
        // enough to accommodate the entire national number and the maximum
        // country code.
        let digit_block_limit = MAX_LENGTH_FOR_NSN + MAX_LENGTH_COUNTRY_CODE;
        // Limit on the number of blocks separated by punctuation. Uses
        // digit_block_limit since some formats use spaces to separate each
        // digit.
        let block_limit = limit(0, digit_block_limit);

        let punctuation = format!("[{}]{}", VALID_PUNCTUATION, punctuation_limit);
        // A digit block spans between punctuation.
        let digit_sequence = format!(r"\p{{Nd}}{}", limit(1, digit_block_limit));

        let pattern = format!(
            "(?i)(?:{lead}{punct}){lead_lim}{digits}(?:{punct}{digits}){block_lim}(?:{extn})?",
            lead = lead_class,
            punct = punctuation,
            lead_lim = lead_limit,
            digits = digit_sequence,
            block_lim = block_limit,
            extn = crate::phonenumberutil::extn_patterns_for_matching(),
        );

        Self {
            pattern: Regex::new(&pattern).unwrap(),
            pub_pages: Regex::new(r"\d{1,5}-+\d{1,5}\s{0,4}\(\d{1,4}").unwrap(),
            slash_separated_dates: Regex::new(
                r"(?:(?:[0-3]?\d/[01]?\d)|(?:[01]?\d/[0-3]?\d))/(?:[12]\d)?\d{2}",
            )
            .unwrap(),
            time_stamps: Regex::new(r"[12]\d{3}[-/]?[01]\d[-/]?[0-3]\d +[0-2]\d$").unwrap(),
            time_stamps_suffix: Regex::new(r":[0-5]\d").unwrap(),
            group_separator: Regex::new(&format!(r"\p{{Z}}[^{}\p{{Nd}}]*", lead_class_chars))
                .unwrap(),
            lead_class_pattern: Regex::new(&lead_class).unwrap(),
            matching_brackets: Regex::new(&matching_brackets).unwrap(),
            regexp_cache: RegexCache::with_capacity(32),
        }
    }
}

pub(super) static MATCHER_REG_EXPS: LazyLock<PhoneNumberMatcherRegExps> =
    LazyLock::new(PhoneNumberMatcherRegExps::new);

#[cfg(test)]
mod tests {
    #[test]
    fn check_regexps_are_compiling() {
        super::PhoneNumberMatcherRegExps::new();
    }
}
