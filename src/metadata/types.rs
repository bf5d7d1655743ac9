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

/// Description of the numbers a region considers its own.
#[derive(Clone, Debug, Default)]
pub struct PhoneNumberDesc {
    /// The pattern a valid national significant number matches. This
    /// specifies information such as its total length and leading digits.
    pub(crate) national_number_pattern: Option<String>,

    /// The lengths a national significant number from this region can be,
    /// sorted from smallest to biggest, without country calling code or
    /// national prefix.
    pub(crate) possible_length: Vec<i32>,

    /// The lengths that only local numbers (without an area code) can be.
    /// For example, the American number 456-1234 may be locally diallable,
    /// although not diallable from outside the area, so 7 is a possible
    /// value here.
    pub(crate) possible_length_local_only: Vec<i32>,
}

impl PhoneNumberDesc {
    pub fn national_number_pattern(&self) -> &str {
        self.national_number_pattern.as_deref().unwrap_or("")
    }

    pub fn has_national_number_pattern(&self) -> bool {
        self.national_number_pattern.is_some()
    }

    pub fn possible_length(&self) -> &[i32] {
        &self.possible_length
    }

    pub fn possible_length_local_only(&self) -> &[i32] {
        &self.possible_length_local_only
    }
}

/// Description of a phone number format.
///
/// The pattern matches the national significant number; the format string
/// specifies how the captured groups are laid out, e.g. pattern
/// `(\d{3})(\d{3})(\d{4})` with format `($1) $2-$3`.
#[derive(Clone, Debug, Default)]
pub struct NumberFormat {
    pub(crate) pattern: String,
    pub(crate) format: String,

    /// Each entry matches a certain number of leading digits of the
    /// national significant number; the last one decides whether this
    /// format applies.
    pub(crate) leading_digits_pattern: Vec<String>,

    /// How the national prefix ($NP) and the first group ($FG) combine
    /// when formatting nationally, e.g. `0$1`.
    pub(crate) national_prefix_formatting_rule: Option<String>,

    /// Whether the national prefix may be left out when formatting with
    /// this rule.
    pub(crate) national_prefix_optional_when_formatting: bool,
}

impl NumberFormat {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn leading_digits_pattern(&self) -> &[String] {
        &self.leading_digits_pattern
    }

    pub fn national_prefix_formatting_rule(&self) -> &str {
        self.national_prefix_formatting_rule.as_deref().unwrap_or("")
    }

    pub fn has_national_prefix_formatting_rule(&self) -> bool {
        self.national_prefix_formatting_rule.is_some()
    }

    pub fn national_prefix_optional_when_formatting(&self) -> bool {
        self.national_prefix_optional_when_formatting
    }
}

/// Numbering-plan metadata for one region.
#[derive(Clone, Debug, Default)]
pub struct PhoneMetadata {
    /// The CLDR two-letter representation of the region.
    pub(crate) id: String,
    pub(crate) country_code: i32,

    /// The prefix dialled before an international number, e.g. `00` in
    /// most of Europe or `011` in NANPA countries. May be a regex when a
    /// region has more than one.
    pub(crate) international_prefix: Option<String>,

    /// The prefix dialled before the national significant number when
    /// dialling domestically, e.g. `0` in Germany.
    pub(crate) national_prefix: Option<String>,

    /// Regex stripping the national prefix (and a possible carrier
    /// selection code, captured in a group) when parsing. Defaults to the
    /// national prefix itself when absent.
    pub(crate) national_prefix_for_parsing: Option<String>,

    /// Replacement applied together with `national_prefix_for_parsing`
    /// in the rare regions that rewrite numbers while stripping.
    pub(crate) national_prefix_transform_rule: Option<String>,

    pub(crate) general_desc: PhoneNumberDesc,
    pub(crate) number_format: Vec<NumberFormat>,

    /// Set for the main region of a shared country calling code.
    pub(crate) main_country_for_code: bool,
}

impl PhoneMetadata {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn international_prefix(&self) -> Option<&str> {
        self.international_prefix.as_deref()
    }

    pub fn national_prefix(&self) -> Option<&str> {
        self.national_prefix.as_deref()
    }

    pub fn national_prefix_for_parsing(&self) -> Option<&str> {
        self.national_prefix_for_parsing
            .as_deref()
            .or(self.national_prefix.as_deref())
    }

    pub fn national_prefix_transform_rule(&self) -> Option<&str> {
        self.national_prefix_transform_rule.as_deref()
    }

    pub fn general_desc(&self) -> &PhoneNumberDesc {
        &self.general_desc
    }

    pub fn number_format(&self) -> &[NumberFormat] {
        &self.number_format
    }

    pub fn is_main_country_for_code(&self) -> bool {
        self.main_country_for_code
    }
}
