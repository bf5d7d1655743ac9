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

//! Reconciles the digit grouping found in the raw text with the grouping the
//! formatter would emit for the parsed number, including per-country
//! alternate formats.

use crate::{
    metadata,
    phonenumber::{CountryCodeSource, PhoneNumber},
    phonenumberutil::{enums::PhoneNumberFormat, phonenumberutil::PhoneNumberUtil},
    regex_util::RegexConsume,
};

use super::matcher_regexps::MATCHER_REG_EXPS;

const METADATA_REGEX_EXPECT: &str =
    "A valid regex is expected in metadata; this indicates a library bug.";

/// Which grouping predicate to apply to a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum GroupingCheck {
    /// Every group of the formatted number must appear unbroken in the
    /// candidate.
    AllGroupsRemainGrouped,
    /// The candidate groups must be exactly the groups of the formatted
    /// number.
    AllGroupsAreExactlyPresent,
}

impl GroupingCheck {
    fn check(
        self,
        util: &PhoneNumberUtil,
        number: &PhoneNumber,
        normalized_candidate: &str,
        formatted_groups: &[String],
    ) -> bool {
        match self {
            GroupingCheck::AllGroupsRemainGrouped => {
                all_number_groups_remain_grouped(util, number, normalized_candidate, formatted_groups)
            }
            GroupingCheck::AllGroupsAreExactlyPresent => all_number_groups_are_exactly_present(
                util,
                number,
                normalized_candidate,
                formatted_groups,
            ),
        }
    }
}

pub(super) fn check_number_grouping_is_valid(
    number: &PhoneNumber,
    candidate: &str,
    util: &PhoneNumberUtil,
    checker: GroupingCheck,
) -> bool {
    let normalized_candidate = util.normalize_digits(candidate);
    let formatted_groups = get_national_number_groups(util, number);
    if checker.check(util, number, &normalized_candidate, &formatted_groups) {
        return true;
    }
    // If this didn't pass, see if there are any alternate formats that match,
    // and try them instead.
    let national_significant_number = util.get_national_significant_number(number);
    if let Some(alternate_formats) =
        metadata::alternate_formats_for_country_code(number.country_code())
    {
        for alternate_format in alternate_formats.number_format() {
            if let Some(leading_digits) = alternate_format.leading_digits_pattern().first() {
                // There is only one leading digits pattern for alternate
                // formats.
                let pattern = MATCHER_REG_EXPS
                    .regexp_cache
                    .get_regex(leading_digits)
                    .expect(METADATA_REGEX_EXPECT);
                if !pattern.matches_start(&national_significant_number) {
                    // Leading digits don't match; try another one.
                    continue;
                }
            }
            let formatted_groups =
                get_national_number_groups_for_pattern(util, number, alternate_format);
            if checker.check(util, number, &normalized_candidate, &formatted_groups) {
                return true;
            }
        }
    }
    false
}

/// Splits the canonical RFC3966 rendering of the number into its digit
/// groups, dropping the country code and any extension.
fn get_national_number_groups(util: &PhoneNumberUtil, number: &PhoneNumber) -> Vec<String> {
    // This will be in the format +CC-DG1-DG2-DGX;ext=EXT.
    let rfc3966_format = util.format(number, PhoneNumberFormat::RFC3966);
    let end_index = rfc3966_format.find(';').unwrap_or(rfc3966_format.len());
    // The country code will have a '-' following it.
    let start_index = rfc3966_format
        .find('-')
        .map(|index| index + 1)
        .unwrap_or(0);
    rfc3966_format[start_index..end_index]
        .split('-')
        .map(str::to_owned)
        .collect()
}

/// As above, but formatting the national significant number with one
/// specific (alternate) formatting pattern.
fn get_national_number_groups_for_pattern(
    util: &PhoneNumberUtil,
    number: &PhoneNumber,
    formatting_pattern: &metadata::NumberFormat,
) -> Vec<String> {
    let national_significant_number = util.get_national_significant_number(number);
    util.format_nsn_using_pattern(
        &national_significant_number,
        formatting_pattern,
        PhoneNumberFormat::RFC3966,
    )
    .split('-')
    .map(str::to_owned)
    .collect()
}

fn all_number_groups_remain_grouped(
    util: &PhoneNumberUtil,
    number: &PhoneNumber,
    normalized_candidate: &str,
    formatted_groups: &[String],
) -> bool {
    let mut from_index = 0;
    if number.country_code_source() != CountryCodeSource::FromDefaultCountry {
        // First skip the country code if the normalized candidate contained
        // it.
        let mut buf = itoa::Buffer::new();
        let country_code = buf.format(number.country_code());
        if let Some(found) = normalized_candidate.find(country_code) {
            from_index = found + country_code.len();
        }
    }
    // Check each group of consecutive digits are not broken into separate
    // groupings in the candidate.
    for (group_index, group) in formatted_groups.iter().enumerate() {
        // Fails if the candidate from from_index onwards doesn't contain the
        // consecutive digits of this group.
        let Some(found) = normalized_candidate[from_index..].find(group.as_str()) else {
            return false;
        };
        let group_start = from_index + found;
        from_index = group_start + group.len();
        if group_index == 0 && from_index < normalized_candidate.len() {
            // We are at the position right after the NDC. When the next
            // character is a digit the candidate carries no formatting inside
            // the number; we then only accept it when the whole national
            // significant number follows in one run.
            let next_is_digit = normalized_candidate[from_index..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit());
            if next_is_digit {
                let national_significant_number = util.get_national_significant_number(number);
                return normalized_candidate[group_start..]
                    .starts_with(&national_significant_number);
            }
        }
    }
    // The check here makes sure that we haven't mistakenly already used the
    // extension to match the last group of the subscriber number. Note the
    // extension cannot have formatting in-between digits.
    normalized_candidate[from_index..].contains(number.extension())
}

fn all_number_groups_are_exactly_present(
    util: &PhoneNumberUtil,
    number: &PhoneNumber,
    normalized_candidate: &str,
    formatted_groups: &[String],
) -> bool {
    let mut candidate_groups: Vec<&str> = util
        .non_digits_pattern()
        .split(normalized_candidate)
        .collect();
    // A trailing separator produces a trailing empty group; it carries no
    // digits and is not a group.
    while candidate_groups.last() == Some(&"") {
        candidate_groups.pop();
    }
    if candidate_groups.is_empty() {
        return false;
    }
    // Set this to the last group, skipping it if the number has an extension.
    let mut candidate_index = if number.has_extension() {
        candidate_groups.len() as isize - 2
    } else {
        candidate_groups.len() as isize - 1
    };
    if candidate_index < 0 {
        return false;
    }
    // First we check if the national significant number is formatted as a
    // block. We use contains and not equals, since the national significant
    // number may be present with a prefix such as a national number prefix,
    // or the country code itself.
    let national_significant_number = util.get_national_significant_number(number);
    if candidate_groups.len() == 1
        || candidate_groups[candidate_index as usize].contains(&national_significant_number)
    {
        return true;
    }
    // Starting from the end, go through in reverse, excluding the first
    // group, and check the candidate and number groups are the same.
    let mut formatted_index = formatted_groups.len() as isize - 1;
    while formatted_index > 0 && candidate_index >= 0 {
        if candidate_groups[candidate_index as usize] != formatted_groups[formatted_index as usize]
        {
            return false;
        }
        formatted_index -= 1;
        candidate_index -= 1;
    }
    // Now check the first group. There may be a national prefix at the start,
    // so we only check that the candidate group ends with the formatted
    // number group.
    candidate_index >= 0
        && candidate_groups[candidate_index as usize].ends_with(&formatted_groups[0])
}
