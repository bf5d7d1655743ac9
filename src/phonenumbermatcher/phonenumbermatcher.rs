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

use log::debug;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::{
    phonenumbermatcher::matcher_regexps::MATCHER_REG_EXPS,
    phonenumberutil::phonenumberutil::PhoneNumberUtil,
    regex_util::{RegexConsume, RegexFullMatch},
};

use super::{leniency::Leniency, phone_number_match::PhoneNumberMatch};

/// A lazy iterator yielding the phone numbers found in a piece of text.
///
/// Candidates are produced by a deliberately permissive pattern and then
/// verified at the requested [`Leniency`]; the iterator yields matches in
/// strictly ascending, non-overlapping order of their offsets. Iteration
/// stops once the text is exhausted or `max_tries` rejected candidates have
/// been seen, whichever comes first.
///
/// A matcher is consumed by iterating it; construct a new one to scan again.
pub struct PhoneNumberMatcher<'a> {
    phone_util: &'a PhoneNumberUtil,
    /// The text searched for phone numbers.
    text: &'a str,
    /// The region numbers without an international prefix are assumed to be
    /// written in; "ZZ" when unknown.
    preferred_region: &'a str,
    leniency: Leniency,
    /// The degenerate-input guard: one unit is spent on every candidate the
    /// verifier rejects, and iteration ends when none are left.
    max_tries: u64,
    search_index: usize,
    last_match: Option<PhoneNumberMatch>,
    done: bool,
}

impl<'a> PhoneNumberMatcher<'a> {
    /// Creates a new matcher over `text`.
    ///
    /// # Parameters
    ///
    /// * `phone_util`: The parsing facade used to verify candidates.
    /// * `text`: The text to search.
    /// * `preferred_region`: Region to assume for numbers written in
    ///   national format; pass `"ZZ"` when unknown (only international
    ///   numbers will then match).
    /// * `leniency`: Strictness of the verification gate.
    /// * `max_tries`: How many rejected candidates to tolerate before giving
    ///   up on the remaining text; bounds worst-case work on adversarial
    ///   input. Zero means no candidate is ever attempted.
    pub fn new(
        phone_util: &'a PhoneNumberUtil,
        text: &'a str,
        preferred_region: &'a str,
        leniency: Leniency,
        max_tries: u64,
    ) -> Self {
        Self {
            phone_util,
            text,
            preferred_region,
            leniency,
            max_tries,
            search_index: 0,
            last_match: None,
            done: false,
        }
    }

    /// The most recent match produced by `next()`, if any.
    pub fn current(&self) -> Option<&PhoneNumberMatch> {
        self.last_match.as_ref()
    }

    /// Attempts to find the next match in the text starting at `index`.
    fn find(&mut self, mut index: usize) -> Option<PhoneNumberMatch> {
        while self.max_tries > 0 {
            let matched = MATCHER_REG_EXPS.pattern.find_at(self.text, index)?;
            let start = matched.start();
            let mut candidate = &self.text[start..matched.end()];
            // Check for extra numbers at the end of the candidate.
            candidate = self.phone_util.trim_after_second_number_start(candidate);
            if let Some(phone_match) = self.extract_match(candidate, start) {
                return Some(phone_match);
            }
            // Move past this candidate. Recovery may already have drained
            // the budget, so saturate.
            index = start + candidate.len();
            self.max_tries = self.max_tries.saturating_sub(1);
        }
        None
    }

    /// Attempts to extract a match from `candidate`.
    fn extract_match(&mut self, candidate: &str, offset: usize) -> Option<PhoneNumberMatch> {
        // Skip a match that is more likely to be a publication page reference
        // or a date.
        if MATCHER_REG_EXPS.pub_pages.is_match(candidate)
            || MATCHER_REG_EXPS.slash_separated_dates.is_match(candidate)
        {
            debug!("Discarded date or page-reference candidate: {}", candidate);
            return None;
        }
        // Skip potential time-stamps; the minutes follow the candidate in the
        // surrounding text. A truncated tail means "not a timestamp".
        if MATCHER_REG_EXPS.time_stamps.is_match(candidate) {
            let following_text = &self.text[offset + candidate.len()..];
            if MATCHER_REG_EXPS.time_stamps_suffix.matches_start(following_text) {
                debug!("Discarded timestamp candidate: {}", candidate);
                return None;
            }
        }
        // Try to come up with a valid match given the entire candidate.
        if let Some(phone_match) = self.parse_and_verify(candidate, offset) {
            return Some(phone_match);
        }
        // If that failed, try to find an "inner match" -- there might be a
        // phone number within this candidate.
        self.extract_inner_match(candidate, offset)
    }

    /// Parses a candidate and verifies it at the configured leniency.
    fn parse_and_verify(&self, candidate: &str, offset: usize) -> Option<PhoneNumberMatch> {
        // Check the candidate doesn't contain any formatting which would
        // indicate that it really isn't a phone number.
        if !MATCHER_REG_EXPS.matching_brackets.full_match(candidate) {
            return None;
        }
        // If leniency is set to VALID or stricter, we also want to skip
        // numbers that are surrounded by Latin alphabetic characters, to
        // skip cases like abc8005001234 or 8005001234def.
        if self.leniency >= Leniency::Valid {
            // If the candidate is not at the start of the text, and does not
            // start with phone-number punctuation, check the previous
            // character.
            if offset > 0 && !MATCHER_REG_EXPS.lead_class_pattern.matches_start(candidate) {
                let previous_char = self.text[..offset]
                    .chars()
                    .next_back()
                    .expect("offset is positive and char-aligned");
                if is_invalid_punctuation_symbol(previous_char) || is_latin_letter(previous_char) {
                    return None;
                }
            }
            let last_char_index = offset + candidate.len();
            if last_char_index < self.text.len() {
                let next_char = self.text[last_char_index..]
                    .chars()
                    .next()
                    .expect("index is in bounds and char-aligned");
                if is_invalid_punctuation_symbol(next_char) || is_latin_letter(next_char) {
                    return None;
                }
            }
        }
        let mut number = self
            .phone_util
            .parse_and_keep_raw_input(candidate, self.preferred_region)
            .ok()?;
        if self.leniency.verify(&number, candidate, self.phone_util) {
            // We used parse_and_keep_raw_input to create this number, but the
            // context fields it fills in are byproducts of the raw-input
            // parse and are not exposed on matches.
            number.clear_country_code_source();
            number.clear_raw_input();
            number.clear_preferred_domestic_carrier_code();
            return Some(PhoneNumberMatch::new(offset, candidate.to_owned(), number));
        }
        None
    }

    /// When the full candidate failed, retries promising inner slices: the
    /// first group by itself, the tail after the first group, and the head
    /// before the last group.
    fn extract_inner_match(&mut self, candidate: &str, offset: usize) -> Option<PhoneNumberMatch> {
        let mut group_separators = MATCHER_REG_EXPS.group_separator.find_iter(candidate);
        let first_separator = group_separators.next()?;

        // Try the first group by itself.
        let first_group_only = self
            .phone_util
            .trim_unwanted_end_chars(&candidate[..first_separator.start()]);
        if let Some(phone_match) = self.parse_and_verify(first_group_only, offset) {
            return Some(phone_match);
        }
        self.max_tries = self.max_tries.saturating_sub(1);

        // Try the rest of the candidate without the first group.
        let without_first_group_start = first_separator.end();
        let without_first_group = self
            .phone_util
            .trim_unwanted_end_chars(&candidate[without_first_group_start..]);
        if let Some(phone_match) =
            self.parse_and_verify(without_first_group, offset + without_first_group_start)
        {
            return Some(phone_match);
        }
        self.max_tries = self.max_tries.saturating_sub(1);

        if self.max_tries > 0 {
            // Find the last group.
            let mut last_group_start = without_first_group_start;
            for group_separator in group_separators {
                last_group_start = group_separator.start();
            }
            let without_last_group = self
                .phone_util
                .trim_unwanted_end_chars(&candidate[..last_group_start]);
            if without_last_group == first_group_only {
                // If there are only two groups, then the group "without the
                // last group" is the same as the first group. In these cases,
                // we don't want to re-check the number group, so we exit
                // already.
                return None;
            }
            if let Some(phone_match) = self.parse_and_verify(without_last_group, offset) {
                return Some(phone_match);
            }
            self.max_tries = self.max_tries.saturating_sub(1);
        }
        None
    }
}

impl Iterator for PhoneNumberMatcher<'_> {
    type Item = PhoneNumberMatch;

    fn next(&mut self) -> Option<PhoneNumberMatch> {
        if self.done {
            return None;
        }
        match self.find(self.search_index) {
            Some(phone_match) => {
                self.search_index = phone_match.end();
                self.last_match = Some(phone_match.clone());
                Some(phone_match)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Whether `letter` is a Latin-script letter or combining mark. Combining
/// marks are accepted because they are assumed to attach to a preceding
/// Latin letter.
fn is_latin_letter(letter: char) -> bool {
    if !letter.is_alphabetic()
        && get_general_category(letter) != GeneralCategory::NonspacingMark
    {
        return false;
    }
    matches!(letter as u32,
        // Basic Latin and the Latin-1 Supplement.
        0x0000..=0x00FF
        // Latin Extended-A and Extended-B.
        | 0x0100..=0x024F
        // Combining Diacritical Marks.
        | 0x0300..=0x036F
        // Latin Extended Additional.
        | 0x1E00..=0x1EFF)
}

fn is_invalid_punctuation_symbol(character: char) -> bool {
    character == '%' || get_general_category(character) == GeneralCategory::CurrencySymbol
}

#[cfg(test)]
mod tests {
    use super::{is_invalid_punctuation_symbol, is_latin_letter};

    #[test]
    fn latin_letter_classification() {
        assert!(is_latin_letter('c'));
        assert!(is_latin_letter('C'));
        assert!(is_latin_letter('\u{00C9}')); // É
        assert!(is_latin_letter('\u{0301}')); // combining acute accent
        assert!(!is_latin_letter(':'));
        assert!(!is_latin_letter('5'));
        assert!(!is_latin_letter('-'));
        assert!(!is_latin_letter('.'));
        assert!(!is_latin_letter(' '));
        assert!(!is_latin_letter('\u{6211}')); // 我 (non-Latin script)
    }

    #[test]
    fn invalid_punctuation_classification() {
        assert!(is_invalid_punctuation_symbol('%'));
        assert!(is_invalid_punctuation_symbol('$'));
        assert!(is_invalid_punctuation_symbol('\u{20AC}')); // €
        assert!(!is_invalid_punctuation_symbol('-'));
        assert!(!is_invalid_punctuation_symbol('('));
    }
}
