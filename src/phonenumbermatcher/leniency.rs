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

use strum::EnumIter;

use crate::{
    phonenumber::{CountryCodeSource, PhoneNumber},
    phonenumberutil::{enums::MatchType, phonenumberutil::PhoneNumberUtil},
};

use super::grouping::{check_number_grouping_is_valid, GroupingCheck};

/// How strict the scanner is when deciding whether a candidate is a phone
/// number.
///
/// The levels form a total order; every check performed at some level is
/// also performed at all stricter levels, so the matches found at a stricter
/// level are always a subset of those found at a more lenient one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Leniency {
    /// Matches are possible phone numbers: their length is plausible for the
    /// deduced region. Numbers that would fail full validation, such as
    /// dates or mistyped numbers of the right length, are accepted.
    Possible,
    /// Matches are valid phone numbers: possible, matching the national
    /// number pattern of their region, written with their national prefix
    /// when one is required, and with consistent use of 'x' and '/'.
    Valid,
    /// Valid phone numbers whose digit groups, as written, never split a
    /// group of the formatted number apart. "650 253 0000" and
    /// "650 2530000" both qualify for the US; "6502 530000" does not.
    StrictGrouping,
    /// Valid phone numbers written in exactly the groups the region (or one
    /// of its alternate formats) would use: "650 253 0000" qualifies for the
    /// US, "650 2530000" does not.
    ExactGrouping,
}

impl Leniency {
    pub(super) fn verify(
        self,
        number: &PhoneNumber,
        candidate: &str,
        util: &PhoneNumberUtil,
    ) -> bool {
        match self {
            Leniency::Possible => util.is_possible_number(number),
            Leniency::Valid => verify_valid(number, candidate, util),
            Leniency::StrictGrouping => {
                verify_valid(number, candidate, util)
                    && check_number_grouping_is_valid(
                        number,
                        candidate,
                        util,
                        GroupingCheck::AllGroupsRemainGrouped,
                    )
            }
            Leniency::ExactGrouping => {
                verify_valid(number, candidate, util)
                    && check_number_grouping_is_valid(
                        number,
                        candidate,
                        util,
                        GroupingCheck::AllGroupsAreExactlyPresent,
                    )
            }
        }
    }
}

fn verify_valid(number: &PhoneNumber, candidate: &str, util: &PhoneNumberUtil) -> bool {
    util.is_possible_number(number)
        && util.is_valid_number(number)
        && contains_only_valid_x_chars(number, candidate, util)
        && !contains_more_than_one_slash(candidate)
        && is_national_prefix_present_if_required(number, util)
}

/// The characters 'x' and 'X' can be (1) a carrier code, in which case they
/// always precede the national significant number or (2) an extension sign,
/// in which case they always precede the extension number. We assume a
/// carrier code is more than 1 digit, so the first case has to have more than
/// 1 consecutive 'x' or 'X', whereas the second case can only have exactly 1
/// 'x' or 'X'. We ignore the character if it appears as the last character of
/// the string.
fn contains_only_valid_x_chars(
    number: &PhoneNumber,
    candidate: &str,
    util: &PhoneNumberUtil,
) -> bool {
    let chars: Vec<(usize, char)> = candidate.char_indices().collect();
    let mut index = 0;
    while index + 1 < chars.len() {
        let current_char = chars[index].1;
        if current_char == 'x' || current_char == 'X' {
            let (next_offset, next_char) = chars[index + 1];
            if next_char == 'x' || next_char == 'X' {
                // This is the carrier code case, in which the 'X's always
                // precede the national significant number.
                index += 1;
                if util.is_number_match_with_string(number, &candidate[next_offset..])
                    != MatchType::NsnMatch
                {
                    return false;
                }
            } else if util.normalize_digits_only(&candidate[chars[index].0..]) != number.extension()
            {
                // This is the extension sign case, in which the 'x' or 'X'
                // should always precede the extension number.
                return false;
            }
        }
        index += 1;
    }
    true
}

fn contains_more_than_one_slash(candidate: &str) -> bool {
    candidate.bytes().filter(|&b| b == b'/').count() >= 2
}

fn is_national_prefix_present_if_required(number: &PhoneNumber, util: &PhoneNumberUtil) -> bool {
    // First, check how we deduced the country code. If it was written in
    // international format, then the national prefix is not required.
    if number.country_code_source() != CountryCodeSource::FromDefaultCountry {
        return true;
    }
    let phone_number_region = util.get_region_code_for_country_code(number.country_code());
    let Some(metadata) = util.metadata_for_region(phone_number_region) else {
        return true;
    };
    // Check if a national prefix should be present when formatting this
    // number.
    let national_number = util.get_national_significant_number(number);
    let Some(format_rule) =
        util.choose_formatting_pattern(metadata.number_format(), &national_number)
    else {
        return true;
    };
    if format_rule.national_prefix_formatting_rule().is_empty() {
        return true;
    }
    if format_rule.national_prefix_optional_when_formatting() {
        // The national prefix is optional in these cases, so we don't need to
        // check if it was present.
        return true;
    }
    // Remove the first-group symbol and everything after it. We assume the
    // first-group symbol is never _before_ the national prefix.
    let prefix_rule = format_rule.national_prefix_formatting_rule();
    let candidate_national_prefix = match prefix_rule.find("$1") {
        Some(first_group) => &prefix_rule[..first_group],
        None => prefix_rule,
    };
    if util.normalize_digits_only(candidate_national_prefix).is_empty() {
        // National prefix not needed for this number.
        return true;
    }
    // Check if we found a national prefix and/or carrier code at the start of
    // the raw input, and return the result.
    let mut raw_input = util.normalize_digits_only(number.raw_input());
    util.maybe_strip_national_prefix_and_carrier_code(&mut raw_input, metadata, None)
}
