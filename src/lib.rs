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

//! Finds phone numbers in free-form text.
//!
//! [`PhoneNumberMatcher`] drives a permissive pattern over a piece of text
//! and verifies every candidate with the parsing and validation facade
//! ([`PhoneNumberUtil`]), yielding [`PhoneNumberMatch`] values with the
//! exact raw span and the parsed number. The [`Leniency`] chosen at
//! construction decides how aggressively false positives are culled.

mod interfaces;
mod metadata;
mod phonenumber;
mod phonenumbermatcher;
mod phonenumberutil;
mod regex_based_matcher;
pub(crate) mod regex_util;
mod regexp_cache;
pub mod region_code;

pub use metadata::{NumberFormat, PhoneMetadata, PhoneNumberDesc};
pub use phonenumber::{CountryCodeSource, PhoneNumber};
pub use phonenumbermatcher::{Leniency, PhoneNumberMatch, PhoneNumberMatcher};
pub use phonenumberutil::{
    enums::{MatchType, NumberLengthType, PhoneNumberFormat},
    errors::{ExtractNumberError, NotANumberError, ParseError, ValidationError},
    phonenumberutil::PhoneNumberUtil,
    PHONE_NUMBER_UTIL,
};
pub use regexp_cache::InvalidRegexError;

#[cfg(test)]
mod tests;
