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

//! This module provides the main entry point for interacting with the phone
//! number handling half of the library.
//!
//! It exposes the `PhoneNumberUtil` struct: parsing, formatting and
//! comparison of phone numbers, plus the normalization and stripping
//! primitives the text scanner builds on.

use log::debug;
use regex::Regex;

use crate::{
    interfaces::MatcherApi,
    metadata::{self, NumberFormat, PhoneMetadata},
    phonenumber::{CountryCodeSource, PhoneNumber},
    regex_based_matcher::RegexBasedMatcher,
    regex_util::{trim_after_first_match, RegexConsume, RegexFullMatch},
    region_code::RegionCode,
};

use super::{
    enums::{MatchType, NumberLengthType, PhoneNumberFormat},
    errors::{ExtractNumberError, NotANumberError, ParseError, ValidationError},
    helper_constants::{
        DEFAULT_EXTN_PREFIX, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN,
        RFC3966_EXTN_PREFIX,
    },
    helper_functions::{
        copy_core_fields_only, is_national_number_suffix_of_the_other,
        prefix_number_with_country_calling_code, test_number_length,
    },
    regexps::PhoneNumberRegExpsAndMappings,
};

const METADATA_REGEX_EXPECT: &str =
    "A valid regex is expected in metadata; this indicates a library bug.";

/// The main struct for all phone number-related operations.
///
/// It encapsulates parsing, formatting and matching of phone numbers. An
/// instance of this struct is the primary entry point for using these
/// features; the scanner borrows one for the lifetime of an iteration.
pub struct PhoneNumberUtil {
    reg_exps: PhoneNumberRegExpsAndMappings,
    matcher_api: RegexBasedMatcher,
}

impl PhoneNumberUtil {
    /// Creates new `PhoneNumberUtil` instance
    pub fn new() -> Self {
        Self {
            reg_exps: PhoneNumberRegExpsAndMappings::new(),
            matcher_api: RegexBasedMatcher::new(),
        }
    }

    /// Parses a string into a `PhoneNumber`.
    ///
    /// This is the primary method for converting a string representation of a
    /// number into a structured `PhoneNumber` object.
    ///
    /// # Parameters
    ///
    /// * `number_to_parse`: The phone number string.
    /// * `default_region`: The two-letter region code (ISO 3166-1) to use if
    ///   the number is not in international format.
    ///
    /// # Returns
    ///
    /// A `Result` containing the parsed `PhoneNumber` on success, or a
    /// `ParseError` on failure.
    pub fn parse(
        &self,
        number_to_parse: impl AsRef<str>,
        default_region: impl AsRef<str>,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse.as_ref(), default_region.as_ref(), false, true)
    }

    /// Parses a string into a `PhoneNumber`, keeping the raw input string.
    ///
    /// In addition to the fields set by [`Self::parse`], the result records
    /// the raw input itself, how the country code was deduced, and a carrier
    /// selection code when one was stripped.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: impl AsRef<str>,
        default_region: impl AsRef<str>,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse.as_ref(), default_region.as_ref(), true, true)
    }

    /// Formats a `PhoneNumber` into a standardized format.
    ///
    /// # Parameters
    ///
    /// * `phone_number`: The `PhoneNumber` to be formatted.
    /// * `number_format`: The `PhoneNumberFormat` to be applied (e.g., E164,
    ///   INTERNATIONAL, NATIONAL).
    ///
    /// # Panics
    ///
    /// This method panics if the metadata tables contain an invalid regular
    /// expression, which indicates a critical library bug.
    pub fn format(&self, phone_number: &PhoneNumber, number_format: PhoneNumberFormat) -> String {
        let country_code = phone_number.country_code();
        let national_significant_number = self.get_national_significant_number(phone_number);
        if let PhoneNumberFormat::E164 = number_format {
            // Early exit for E164 case (even if the country calling code is
            // invalid) since no formatting of the national number needs to be
            // applied. Extensions are not formatted.
            let mut formatted = national_significant_number;
            prefix_number_with_country_calling_code(
                country_code,
                PhoneNumberFormat::E164,
                &mut formatted,
            );
            return formatted;
        }
        let region_code = self.get_region_code_for_country_code(country_code);
        let Some(region_metadata) = metadata::metadata_for_region(region_code) else {
            let mut formatted = national_significant_number;
            prefix_number_with_country_calling_code(country_code, number_format, &mut formatted);
            return formatted;
        };
        let mut formatted =
            self.format_nsn(&national_significant_number, region_metadata, number_format);
        self.maybe_append_formatted_extension(phone_number, number_format, &mut formatted);
        prefix_number_with_country_calling_code(country_code, number_format, &mut formatted);
        formatted
    }

    /// Formats a national significant number with one specific formatting
    /// pattern, ignoring which region the pattern was defined for.
    pub fn format_nsn_using_pattern(
        &self,
        national_number: &str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
    ) -> String {
        let pattern = self
            .reg_exps
            .regexp_cache
            .get_regex(formatting_pattern.pattern())
            .expect(METADATA_REGEX_EXPECT);
        let number_format_rule = formatting_pattern.format();

        let mut formatted = if number_format == PhoneNumberFormat::National
            && !formatting_pattern.national_prefix_formatting_rule().is_empty()
        {
            // Fold the national prefix rule into the first group of the
            // format rule, then apply it.
            let rule_with_prefix = self.reg_exps.first_group_capturing_pattern.replace(
                number_format_rule,
                formatting_pattern.national_prefix_formatting_rule(),
            );
            pattern
                .replace(national_number, rule_with_prefix.as_ref())
                .into_owned()
        } else {
            pattern.replace(national_number, number_format_rule).into_owned()
        };

        if number_format == PhoneNumberFormat::RFC3966 {
            // Strip any leading punctuation, then turn the remaining
            // separator runs into single dashes.
            if let Some(leading) = self.reg_exps.separator_pattern.find_start(&formatted) {
                formatted.drain(..leading.end());
            }
            formatted = self
                .reg_exps
                .separator_pattern
                .replace_all(&formatted, "-")
                .into_owned();
        }
        formatted
    }

    /// Picks the formatting pattern applying to a national significant
    /// number, by leading digits and full pattern match.
    pub fn choose_formatting_pattern<'a>(
        &self,
        available_formats: &'a [NumberFormat],
        national_number: &str,
    ) -> Option<&'a NumberFormat> {
        for number_format in available_formats {
            // The last leading-digits pattern is the most detailed one and
            // decides whether the format applies at all.
            if let Some(leading_digits) = number_format.leading_digits_pattern().last() {
                let leading_digits_regex = self
                    .reg_exps
                    .regexp_cache
                    .get_regex(leading_digits)
                    .expect(METADATA_REGEX_EXPECT);
                if !leading_digits_regex.matches_start(national_number) {
                    continue;
                }
            }
            let pattern = self
                .reg_exps
                .regexp_cache
                .get_regex(number_format.pattern())
                .expect(METADATA_REGEX_EXPECT);
            if pattern.full_match(national_number) {
                return Some(number_format);
            }
        }
        None
    }

    /// Gets the National Significant Number (NSN) from a `PhoneNumber`.
    ///
    /// The NSN is the part of the number that follows the country code,
    /// including any leading zeros the region dials.
    pub fn get_national_significant_number(&self, phone_number: &PhoneNumber) -> String {
        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(phone_number.national_number());
        if phone_number.italian_leading_zero() && phone_number.number_of_leading_zeros() > 0 {
            let leading_zeros = phone_number.number_of_leading_zeros() as usize;
            let mut national_significant_number =
                String::with_capacity(leading_zeros + national_number.len());
            for _ in 0..leading_zeros {
                national_significant_number.push('0');
            }
            national_significant_number.push_str(national_number);
            national_significant_number
        } else {
            national_number.to_owned()
        }
    }

    /// Gets the primary region code for a given country calling code.
    ///
    /// Note: Some country codes are shared by multiple regions; this returns
    /// the main region for that code. Returns "ZZ" for invalid codes.
    pub fn get_region_code_for_country_code(&self, country_code: i32) -> &'static str {
        metadata::region_code_for_country_code(country_code)
    }

    /// Gets the numbering-plan metadata for a region, if the region is
    /// supported.
    pub fn metadata_for_region(&self, region_code: impl AsRef<str>) -> Option<&'static PhoneMetadata> {
        metadata::metadata_for_region(region_code.as_ref())
    }

    /// Performs a fast check to determine if a `PhoneNumber` is possibly
    /// valid, based only on its length.
    ///
    /// This method is less strict than `is_valid_number`.
    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    /// Checks if a `PhoneNumber` is possibly valid and provides a reason if
    /// not.
    pub fn is_possible_number_with_reason(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<NumberLengthType, ValidationError> {
        let national_number = self.get_national_significant_number(phone_number);
        let region_code = self.get_region_code_for_country_code(phone_number.country_code());
        let Some(region_metadata) = metadata::metadata_for_region(region_code) else {
            return Err(ValidationError::InvalidCountryCode);
        };
        test_number_length(&national_number, region_metadata)
    }

    /// Performs a full validation of a `PhoneNumber` against the national
    /// number pattern of its region.
    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        let region_code = self.get_region_code_for_country_code(phone_number.country_code());
        let Some(region_metadata) = metadata::metadata_for_region(region_code) else {
            return false;
        };
        let national_number = self.get_national_significant_number(phone_number);
        self.matcher_api
            .match_national_number(&national_number, region_metadata.general_desc(), false)
    }

    /// Compares two phone numbers and returns their `MatchType`.
    ///
    /// Only the fields that uniquely identify a number take part in the
    /// comparison; context fields such as the raw input are ignored.
    pub fn is_number_match(
        &self,
        first_number: &PhoneNumber,
        second_number: &PhoneNumber,
    ) -> MatchType {
        let mut first = PhoneNumber::default();
        copy_core_fields_only(first_number, &mut first);
        let mut second = PhoneNumber::default();
        copy_core_fields_only(second_number, &mut second);

        // Early exit if both had extensions and these are different.
        if first.has_extension() && second.has_extension() && first.extension() != second.extension()
        {
            return MatchType::NoMatch;
        }

        let first_country_code = first.country_code();
        let second_country_code = second.country_code();
        // Both had country calling code specified.
        if first_country_code != 0 && second_country_code != 0 {
            if first == second {
                return MatchType::ExactMatch;
            } else if first_country_code == second_country_code
                && is_national_number_suffix_of_the_other(&first, &second)
            {
                // A SHORT_NSN_MATCH occurs if there is a difference because of
                // the presence or absence of an 'Italian leading zero', the
                // presence or absence of an extension, or one NSN being a
                // shorter variant of the other.
                return MatchType::ShortNsnMatch;
            }
            return MatchType::NoMatch;
        }
        // Checks cases where one or both country calling codes were not
        // specified. To make equality checks easier, we first set the country
        // code fields to be equal.
        first.set_country_code(second_country_code);
        // If all else was the same, then this is an NSN_MATCH.
        if first == second {
            return MatchType::NsnMatch;
        }
        if is_national_number_suffix_of_the_other(&first, &second) {
            return MatchType::ShortNsnMatch;
        }
        MatchType::NoMatch
    }

    /// Compares a phone number with a second number given as a string.
    ///
    /// The string is first parsed on its own; if it carries no country code
    /// of its own it is re-parsed in the first number's region, in which case
    /// an exact match is downgraded to an NSN match.
    pub fn is_number_match_with_string(
        &self,
        first_number: &PhoneNumber,
        second_number: impl AsRef<str>,
    ) -> MatchType {
        let second_number = second_number.as_ref();
        match self.parse(second_number, RegionCode::get_unknown()) {
            Ok(second_number_as_proto) => self.is_number_match(first_number, &second_number_as_proto),
            Err(ParseError::InvalidCountryCode) => {
                // The second number has no country calling code. EXACT_MATCH
                // is no longer possible. We parse it as if the region was the
                // same as that for the first number, and if EXACT_MATCH is
                // returned, we replace this with NSN_MATCH.
                let first_number_region =
                    self.get_region_code_for_country_code(first_number.country_code());
                if first_number_region != RegionCode::get_unknown() {
                    match self.parse(second_number, first_number_region) {
                        Ok(second_number_with_first_number_region) => {
                            let match_type = self
                                .is_number_match(first_number, &second_number_with_first_number_region);
                            if match_type == MatchType::ExactMatch {
                                MatchType::NsnMatch
                            } else {
                                match_type
                            }
                        }
                        Err(_) => MatchType::NotANumber,
                    }
                } else {
                    // The first number's region is unknown too; compare the
                    // national numbers as parsed without any region.
                    match self.parse_helper(second_number, RegionCode::get_unknown(), false, false)
                    {
                        Ok(second_number_as_proto) => {
                            self.is_number_match(first_number, &second_number_as_proto)
                        }
                        Err(_) => MatchType::NotANumber,
                    }
                }
            }
            Err(_) => MatchType::NotANumber,
        }
    }

    /// Checks to see if the string of characters could possibly be a phone
    /// number at all. At the moment, checks to see that the string begins
    /// with at least 2 digits, ignoring any punctuation commonly found in
    /// phone numbers.
    pub fn is_viable_phone_number(&self, number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        if number.len() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.full_match(number)
    }

    /// Converts any unicode decimal digits to their ASCII form and strips
    /// everything else.
    pub fn normalize_digits_only(&self, number: impl AsRef<str>) -> String {
        let normalized = dec_from_char::normalize_decimals(number.as_ref());
        normalized.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// Converts any unicode decimal digits to their ASCII form, keeping all
    /// other characters as they are.
    pub fn normalize_digits(&self, number: impl AsRef<str>) -> String {
        dec_from_char::normalize_decimals(number.as_ref()).to_string()
    }

    /// Trims the candidate at the first marker that starts a second phone
    /// number, such as the second extension in
    /// `(530) 583-6985 x302/x2303`.
    pub fn trim_after_second_number_start<'a>(&self, number: &'a str) -> &'a str {
        trim_after_first_match(&self.reg_exps.second_number_start_pattern, number)
    }

    /// Right-strips characters that are neither alphanumeric nor `#`.
    pub fn trim_unwanted_end_chars<'a>(&self, number: &'a str) -> &'a str {
        trim_after_first_match(&self.reg_exps.unwanted_end_char_pattern, number)
    }

    pub(crate) fn non_digits_pattern(&self) -> &Regex {
        &self.reg_exps.non_digits_pattern
    }

    /// Attempts to extract a possible number from the string passed in.
    ///
    /// The leading part of the string up to the first plus sign or digit is
    /// dropped, trailing junk and second-number markers are cut off.
    pub(crate) fn extract_possible_number<'a>(
        &self,
        number: &'a str,
    ) -> Result<&'a str, ExtractNumberError> {
        let Some(start) = self.reg_exps.valid_start_char_pattern.find(number) else {
            return Err(ExtractNumberError::NoValidStartCharacter);
        };
        let mut extracted = &number[start.start()..];
        extracted = self.trim_unwanted_end_chars(extracted);
        extracted = self.trim_after_second_number_start(extracted);
        Ok(extracted)
    }

    /// Strips any extension from the end of `number` and returns it.
    ///
    /// The number is only treated as having an extension when the part
    /// preceding the extension is itself a viable number.
    pub(crate) fn maybe_strip_extension(&self, number: &mut String) -> Option<String> {
        let captures = self.reg_exps.extn_pattern.captures(number)?;
        let whole_match = captures.get(0).expect("group 0 always participates");
        if !self.is_viable_phone_number(&number[..whole_match.start()]) {
            return None;
        }
        // The numbers are captured into groups in the regular expression.
        for group_index in 1..captures.len() {
            if let Some(group) = captures.get(group_index) {
                // We go through the capturing groups until we find one that
                // captured some digits.
                let extension = group.as_str().to_owned();
                number.truncate(whole_match.start());
                return Some(extension);
            }
        }
        None
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number, normalizes the rest, and reports how the number was written.
    pub(crate) fn maybe_strip_international_prefix_and_normalize(
        &self,
        number: &mut String,
        possible_idd_prefix: Option<&str>,
    ) -> CountryCodeSource {
        if number.is_empty() {
            return CountryCodeSource::FromDefaultCountry;
        }
        // Check to see if the number begins with one or more plus signs.
        if let Some(plus_signs) = self.reg_exps.plus_chars_pattern.find_start(number) {
            number.drain(..plus_signs.end());
            // Can now normalize the rest of the number since we've consumed
            // the "+" sign at the start.
            *number = self.normalize_digits_only(number.as_str());
            return CountryCodeSource::FromNumberWithPlusSign;
        }
        // Attempt to parse the first digits as an international prefix.
        *number = self.normalize_digits_only(number.as_str());
        let Some(possible_idd_prefix) = possible_idd_prefix else {
            return CountryCodeSource::FromDefaultCountry;
        };
        let idd_pattern = self
            .reg_exps
            .regexp_cache
            .get_regex(possible_idd_prefix)
            .expect(METADATA_REGEX_EXPECT);
        if self.parse_prefix_as_idd(&idd_pattern, number) {
            CountryCodeSource::FromNumberWithIdd
        } else {
            CountryCodeSource::FromDefaultCountry
        }
    }

    fn parse_prefix_as_idd(&self, idd_pattern: &Regex, number: &mut String) -> bool {
        let Some(idd_match) = idd_pattern.find_start(number) else {
            return false;
        };
        let match_end = idd_match.end();
        // Only strip this if the first digit after the match is not a 0, since
        // country calling codes cannot begin with 0.
        if let Some(captures) = self
            .reg_exps
            .capturing_digit_pattern
            .captures(&number[match_end..])
        {
            let digit = captures.get(1).expect("pattern has one group").as_str();
            if self.normalize_digits_only(digit) == "0" {
                return false;
            }
        }
        number.drain(..match_end);
        true
    }

    /// Strips any national prefix (such as 0, 1) present at the start of a
    /// fully-normalized number, together with any carrier selection code
    /// preceding the number proper.
    ///
    /// Returns `true` when a prefix (or carrier code) was removed; the
    /// stripped carrier code, if any, is appended to `carrier_code`.
    pub fn maybe_strip_national_prefix_and_carrier_code(
        &self,
        number: &mut String,
        metadata: &PhoneMetadata,
        mut carrier_code: Option<&mut String>,
    ) -> bool {
        let Some(possible_national_prefix) = metadata.national_prefix_for_parsing() else {
            return false;
        };
        if number.is_empty() || possible_national_prefix.is_empty() {
            return false;
        }
        // Attempt to parse the first digits as a national prefix.
        let prefix_regex = self
            .reg_exps
            .regexp_cache
            .get_regex(possible_national_prefix)
            .expect(METADATA_REGEX_EXPECT);
        let Some(prefix_captures) = prefix_regex.captures_start(number) else {
            return false;
        };
        let prefix_end = prefix_captures.get(0).expect("group 0 always participates").end();
        let general_desc = metadata.general_desc();
        // Check if the original number is viable.
        let is_viable_original_number =
            self.matcher_api.match_national_number(number, general_desc, false);
        // A non-participating last group implies nothing was captured by the
        // capturing groups in the prefix pattern; therefore, no transformation
        // is necessary, and we just remove the national prefix.
        let group_count = prefix_captures.len() - 1;
        let last_group_captured =
            group_count > 0 && prefix_captures.get(group_count).is_some();
        let transform_rule = metadata.national_prefix_transform_rule().unwrap_or("");
        if transform_rule.is_empty() || !last_group_captured {
            // If the original number was viable, and the resultant number is
            // not, we return.
            if is_viable_original_number
                && !self
                    .matcher_api
                    .match_national_number(&number[prefix_end..], general_desc, false)
            {
                return false;
            }
            if last_group_captured {
                if let Some(carrier_code) = carrier_code.as_deref_mut() {
                    carrier_code.push_str(
                        prefix_captures
                            .get(1)
                            .expect("first group captured")
                            .as_str(),
                    );
                }
            }
            number.drain(..prefix_end);
            true
        } else {
            // Check that the resultant number is still viable. If not, return.
            // Check this by applying the transformation on a copy first.
            let transformed_number = prefix_regex.replace(number, transform_rule).into_owned();
            if is_viable_original_number
                && !self
                    .matcher_api
                    .match_national_number(&transformed_number, general_desc, false)
            {
                return false;
            }
            if group_count > 1 {
                if let Some(carrier_code) = carrier_code.as_deref_mut() {
                    carrier_code.push_str(
                        prefix_captures
                            .get(1)
                            .expect("first group captured")
                            .as_str(),
                    );
                }
            }
            *number = transformed_number;
            true
        }
    }

    /// Tries to extract a country calling code from the beginning of a
    /// possibly-international number.
    ///
    /// Writes the remaining national number into `national_number` and
    /// returns the country code, or `0` when the number is in national form.
    pub(crate) fn maybe_extract_country_code(
        &self,
        number: &str,
        default_region_metadata: Option<&PhoneMetadata>,
        national_number: &mut String,
        keep_raw_input: bool,
        phone_number: &mut PhoneNumber,
    ) -> Result<i32, ParseError> {
        if number.is_empty() {
            return Ok(0);
        }
        let mut full_number = number.to_owned();
        // Set the default prefix to be something that will never match.
        let possible_idd_prefix = default_region_metadata.and_then(|m| m.international_prefix());
        let country_code_source =
            self.maybe_strip_international_prefix_and_normalize(&mut full_number, possible_idd_prefix);
        if keep_raw_input {
            phone_number.set_country_code_source(country_code_source);
        }
        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.len() <= MIN_LENGTH_FOR_NSN {
                return Err(ParseError::TooShortAfterIdd);
            }
            if let Some((potential_country_code, rest)) = self.extract_country_code(&full_number) {
                phone_number.set_country_code(potential_country_code);
                national_number.push_str(rest);
                return Ok(potential_country_code);
            }
            // If this fails, they must be using a strange country calling code
            // that we don't recognize, or that doesn't exist.
            return Err(ParseError::InvalidCountryCode);
        } else if let Some(metadata) = default_region_metadata {
            // Check to see if the number starts with the country calling code
            // for the default region. If so, we remove the country calling
            // code, and do some checks on the validity of the number before
            // and after.
            let default_country_code = metadata.country_code();
            let mut buf = itoa::Buffer::new();
            let default_country_code_str = buf.format(default_country_code);
            if let Some(rest) = full_number.strip_prefix(default_country_code_str) {
                let mut potential_national_number = rest.to_owned();
                let general_desc = metadata.general_desc();
                self.maybe_strip_national_prefix_and_carrier_code(
                    &mut potential_national_number,
                    metadata,
                    None,
                );
                // If the number was not valid before but is valid now, or if
                // it was too long before, we consider the number with the
                // country calling code stripped to be a better result and
                // keep that instead.
                if (!self
                    .matcher_api
                    .match_national_number(&full_number, general_desc, false)
                    && self.matcher_api.match_national_number(
                        &potential_national_number,
                        general_desc,
                        false,
                    ))
                    || test_number_length(&full_number, metadata)
                        == Err(ValidationError::TooLong)
                {
                    national_number.push_str(&potential_national_number);
                    if keep_raw_input {
                        phone_number
                            .set_country_code_source(CountryCodeSource::FromNumberWithoutPlusSign);
                    }
                    phone_number.set_country_code(default_country_code);
                    return Ok(default_country_code);
                }
            }
        }
        // No country calling code present.
        phone_number.set_country_code(0);
        Ok(0)
    }

    /// Extracts the leading country calling code from a normalized number,
    /// returning it together with the rest of the number.
    fn extract_country_code<'a>(&self, full_number: &'a str) -> Option<(i32, &'a str)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return None;
        }
        for length in 1..=MAX_LENGTH_COUNTRY_CODE.min(full_number.len()) {
            let potential_country_code: i32 = full_number[..length].parse().ok()?;
            if metadata::region_code_for_country_code(potential_country_code)
                != RegionCode::get_unknown()
            {
                return Some((potential_country_code, &full_number[length..]));
            }
        }
        None
    }

    fn check_region_for_parsing(&self, number_to_parse: &str, default_region: &str) -> bool {
        metadata::is_supported_region(default_region)
            || (!number_to_parse.is_empty()
                && self.reg_exps.plus_chars_pattern.matches_start(number_to_parse))
    }

    fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: &str,
        keep_raw_input: bool,
        check_region: bool,
    ) -> Result<PhoneNumber, ParseError> {
        let possible_number = self.extract_possible_number(number_to_parse)?;
        if !self.is_viable_phone_number(possible_number) {
            return Err(NotANumberError::NotMatchedValidNumberPattern.into());
        }
        if check_region && !self.check_region_for_parsing(possible_number, default_region) {
            debug!("Missing or invalid default region.");
            return Err(ParseError::InvalidCountryCode);
        }

        let mut phone_number = PhoneNumber::default();
        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse.to_owned());
        }
        let mut national_number = possible_number.to_owned();
        // Attempt to parse extension first, since it doesn't require
        // region-specific data and we want to have the non-normalised number
        // here.
        if let Some(extension) = self.maybe_strip_extension(&mut national_number) {
            phone_number.set_extension(extension);
        }

        let mut region_metadata = metadata::metadata_for_region(default_region);
        let mut normalized_national_number = String::new();
        let country_code = self.maybe_extract_country_code(
            &national_number,
            region_metadata,
            &mut normalized_national_number,
            keep_raw_input,
            &mut phone_number,
        )?;
        if country_code != 0 {
            let phone_number_region = self.get_region_code_for_country_code(country_code);
            if phone_number_region != default_region {
                region_metadata = metadata::metadata_for_region(phone_number_region);
            }
        } else {
            // If no extracted country calling code, use the region supplied
            // instead. The national number is just the normalized version of
            // the number we were given to parse.
            normalized_national_number = self.normalize_digits_only(&national_number);
            if let Some(metadata) = region_metadata {
                phone_number.set_country_code(metadata.country_code());
            }
        }
        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn);
        }
        if let Some(metadata) = region_metadata {
            let mut carrier_code = String::new();
            let mut potential_national_number = normalized_national_number.clone();
            self.maybe_strip_national_prefix_and_carrier_code(
                &mut potential_national_number,
                metadata,
                Some(&mut carrier_code),
            );
            // We require that the NSN remaining after stripping the national
            // prefix and carrier code be long enough to be a possible length
            // for the region. Otherwise, we don't do the stripping, since the
            // original number could be a valid short number.
            match test_number_length(&potential_national_number, metadata) {
                Ok(NumberLengthType::IsPossible) | Err(ValidationError::TooLong) => {
                    normalized_national_number = potential_national_number;
                    if keep_raw_input && !carrier_code.is_empty() {
                        phone_number.set_preferred_domestic_carrier_code(carrier_code);
                    }
                }
                _ => {}
            }
        }
        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn);
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            return Err(ParseError::TooLongNsn);
        }
        set_italian_leading_zeros_for_phone_number(&normalized_national_number, &mut phone_number);
        phone_number.set_national_number(
            normalized_national_number
                .parse::<u64>()
                .map_err(NotANumberError::FailedToParseNumberAsInt)?,
        );
        Ok(phone_number)
    }

    fn format_nsn(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
        number_format: PhoneNumberFormat,
    ) -> String {
        match self.choose_formatting_pattern(metadata.number_format(), national_number) {
            Some(formatting_pattern) => {
                self.format_nsn_using_pattern(national_number, formatting_pattern, number_format)
            }
            None => national_number.to_owned(),
        }
    }

    fn maybe_append_formatted_extension(
        &self,
        phone_number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        formatted_number: &mut String,
    ) {
        if !phone_number.has_extension() || phone_number.extension().is_empty() {
            return;
        }
        if number_format == PhoneNumberFormat::RFC3966 {
            formatted_number.push_str(RFC3966_EXTN_PREFIX);
        } else {
            formatted_number.push_str(DEFAULT_EXTN_PREFIX);
        }
        formatted_number.push_str(phone_number.extension());
    }
}

/// Keeps track of leading zeros that survive in the national number of some
/// regions (e.g. Italy), since the integer representation drops them.
fn set_italian_leading_zeros_for_phone_number(
    national_number: &str,
    phone_number: &mut PhoneNumber,
) {
    if national_number.len() > 1 && national_number.starts_with('0') {
        phone_number.set_italian_leading_zero(true);
        let mut number_of_leading_zeros = 1;
        // Note that if the national number is all "0"s, the last "0" is not
        // counted as a leading zero.
        let bytes = national_number.as_bytes();
        while number_of_leading_zeros < national_number.len() - 1
            && bytes[number_of_leading_zeros] == b'0'
        {
            number_of_leading_zeros += 1;
        }
        if number_of_leading_zeros != 1 {
            phone_number.set_number_of_leading_zeros(number_of_leading_zeros as i32);
        }
    }
}
