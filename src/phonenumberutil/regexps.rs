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

use regex::Regex;

use crate::regexp_cache::RegexCache;

use super::{
    helper_constants::{
        DIGITS, MIN_LENGTH_FOR_NSN, PLUS_CHARS, SECOND_NUMBER_START, STAR_SIGN,
        UNWANTED_END_CHARS, VALID_ALPHA, VALID_PUNCTUATION,
    },
    helper_functions::create_extn_pattern,
};

pub(super) struct PhoneNumberRegExpsAndMappings {
    pub regexp_cache: RegexCache,

    pub capturing_digit_pattern: Regex,

    /// Regular expression of acceptable characters that may start a phone
    /// number for the purposes of parsing. This allows us to strip away
    /// meaningless prefixes to phone numbers that may be mistakenly given to
    /// us. This consists of digits and the plus symbol. It does not contain
    /// other punctuation, as this will be stripped later during parsing and
    /// is of no information value when parsing a number. The string starting
    /// with this valid character is considered the possible number.
    pub valid_start_char_pattern: Regex,

    /// Regular expression of characters that start a second phone number.
    pub second_number_start_pattern: Regex,

    /// Regular expression of trailing characters to remove; anchored at the
    /// end so a single find yields the whole junk run.
    pub unwanted_end_char_pattern: Regex,

    /// Regular expression of groups of valid punctuation characters.
    pub separator_pattern: Regex,

    /// Splits digit groups apart when checking candidate grouping.
    pub non_digits_pattern: Regex,

    /// Regexp of all known extension prefixes used by different regions
    /// followed by 1 or more valid digits, for use when parsing. Anchored to
    /// the end of the number.
    pub extn_pattern: Regex,

    /// We append optionally the extension pattern to the end here, as a valid
    /// phone number may have an extension prefix appended, followed by 1 or
    /// more digits.
    pub valid_phone_number_pattern: Regex,

    /// The first_group_capturing_pattern was originally set to $1 but there
    /// are some countries for which the first group is not used in the
    /// national pattern (e.g. Argentina) so the $1 group does not match
    /// correctly. Therefore, we use \d, so that the first group actually
    /// used in the pattern will be matched.
    pub first_group_capturing_pattern: Regex,

    pub plus_chars_pattern: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    pub fn new() -> Self {
        let extn_patterns_for_parsing = create_extn_pattern(true);

        // Regular expression of viable phone numbers. This is location
        // independent. Checks we have at least three leading digits, and only
        // valid punctuation, alpha characters and digits in the phone number.
        // Does not include extension data. The symbol 'x' is allowed here as
        // valid punctuation since it is often used as a placeholder for
        // carrier codes, for example in Brazilian phone numbers. We also allow
        // multiple plus-signs at the start.
        //
        // The two-digit alternative exists so short numbers can be parsed if
        // they are entered as "15" etc, but only if there is no punctuation in
        // them; it comes last so the full form is preferred.
        let valid_phone_number = format!(
            "[{}]*(?:[{}{}]*{}){{3,}}[{}{}{}{}]*|{}{{{}}}",
            PLUS_CHARS,
            VALID_PUNCTUATION, STAR_SIGN, DIGITS,
            VALID_PUNCTUATION, STAR_SIGN, DIGITS, VALID_ALPHA,
            DIGITS, MIN_LENGTH_FOR_NSN,
        );

        Self {
            regexp_cache: RegexCache::with_capacity(128),
            capturing_digit_pattern: Regex::new(&format!("({})", DIGITS)).unwrap(),
            valid_start_char_pattern: Regex::new(&format!("[{}{}]", PLUS_CHARS, DIGITS)).unwrap(),
            second_number_start_pattern: Regex::new(SECOND_NUMBER_START).unwrap(),
            unwanted_end_char_pattern: Regex::new(UNWANTED_END_CHARS).unwrap(),
            separator_pattern: Regex::new(&format!("[{}]+", VALID_PUNCTUATION)).unwrap(),
            non_digits_pattern: Regex::new(&format!("[^{}]+", DIGITS)).unwrap(),
            extn_pattern: Regex::new(&format!("(?i)(?:{})$", &extn_patterns_for_parsing)).unwrap(),
            valid_phone_number_pattern: Regex::new(&format!(
                "(?i)^(?:{})(?:{})?$",
                &valid_phone_number, &extn_patterns_for_parsing
            ))
            .unwrap(),
            first_group_capturing_pattern: Regex::new(r"(\$\d)").unwrap(),
            plus_chars_pattern: Regex::new(&format!("[{}]+", PLUS_CHARS)).unwrap(),
        }
    }
}
