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

/// How the country code of a parsed number was deduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountryCodeSource {
    #[default]
    Unspecified,
    /// The number began with a plus sign.
    FromNumberWithPlusSign,
    /// The number began with an international dialling prefix such as `00`.
    FromNumberWithIdd,
    /// The number began with the country code digits without a plus sign.
    FromNumberWithoutPlusSign,
    /// The country code was taken from the default region supplied by the
    /// caller.
    FromDefaultCountry,
}

/// A parsed phone number.
///
/// The national number is stored as an integer and hence cannot keep
/// leading zeros; regions that dial them (e.g. Italy) carry them in
/// `italian_leading_zero` / `number_of_leading_zeros` instead. Use
/// `PhoneNumberUtil::get_national_significant_number` to obtain the digit
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PhoneNumber {
    pub(crate) country_code: i32,
    pub(crate) national_number: u64,
    pub(crate) extension: Option<String>,
    pub(crate) italian_leading_zero: Option<bool>,
    pub(crate) number_of_leading_zeros: Option<i32>,
    pub(crate) raw_input: Option<String>,
    pub(crate) country_code_source: Option<CountryCodeSource>,
    pub(crate) preferred_domestic_carrier_code: Option<String>,
}

impl PhoneNumber {
    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn set_country_code(&mut self, country_code: i32) {
        self.country_code = country_code;
    }

    pub fn national_number(&self) -> u64 {
        self.national_number
    }

    pub fn set_national_number(&mut self, national_number: u64) {
        self.national_number = national_number;
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or("")
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    pub fn set_extension(&mut self, extension: String) {
        self.extension = Some(extension);
    }

    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.unwrap_or(false)
    }

    pub fn set_italian_leading_zero(&mut self, italian_leading_zero: bool) {
        self.italian_leading_zero = Some(italian_leading_zero);
    }

    /// Defaults to one leading zero once `italian_leading_zero` is set.
    pub fn number_of_leading_zeros(&self) -> i32 {
        self.number_of_leading_zeros.unwrap_or(1)
    }

    pub fn set_number_of_leading_zeros(&mut self, number_of_leading_zeros: i32) {
        self.number_of_leading_zeros = Some(number_of_leading_zeros);
    }

    pub fn raw_input(&self) -> &str {
        self.raw_input.as_deref().unwrap_or("")
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn set_raw_input(&mut self, raw_input: String) {
        self.raw_input = Some(raw_input);
    }

    pub fn clear_raw_input(&mut self) {
        self.raw_input = None;
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source.unwrap_or_default()
    }

    pub fn has_country_code_source(&self) -> bool {
        self.country_code_source.is_some()
    }

    pub fn set_country_code_source(&mut self, country_code_source: CountryCodeSource) {
        self.country_code_source = Some(country_code_source);
    }

    pub fn clear_country_code_source(&mut self) {
        self.country_code_source = None;
    }

    pub fn preferred_domestic_carrier_code(&self) -> &str {
        self.preferred_domestic_carrier_code.as_deref().unwrap_or("")
    }

    pub fn set_preferred_domestic_carrier_code(&mut self, carrier_code: String) {
        self.preferred_domestic_carrier_code = Some(carrier_code);
    }

    pub fn clear_preferred_domestic_carrier_code(&mut self) {
        self.preferred_domestic_carrier_code = None;
    }
}
