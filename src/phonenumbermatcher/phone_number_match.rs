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

use std::fmt;

use crate::phonenumber::PhoneNumber;

/// One occurrence of a phone number within a piece of text.
///
/// Matches may be found using the [`PhoneNumberMatcher`] iterator. A match
/// consists of the byte offset of the number in the searched text, the raw
/// substring exactly as it occurred there, and the parsed number value. The
/// raw string always satisfies
/// `text[m.start()..m.end()] == m.raw_string()`.
///
/// [`PhoneNumberMatcher`]: super::PhoneNumberMatcher
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumberMatch {
    start: usize,
    raw_string: String,
    number: PhoneNumber,
}

impl PhoneNumberMatch {
    pub(super) fn new(start: usize, raw_string: String, number: PhoneNumber) -> Self {
        Self {
            start,
            raw_string,
            number,
        }
    }

    /// The byte offset of the matched substring within the searched text.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The byte offset immediately after the matched substring.
    pub fn end(&self) -> usize {
        self.start + self.raw_string.len()
    }

    /// The raw substring exactly as it appears in the searched text.
    pub fn raw_string(&self) -> &str {
        &self.raw_string
    }

    /// The parsed and verified phone number.
    pub fn number(&self) -> &PhoneNumber {
        &self.number
    }

    /// Consumes the match, returning the parsed number.
    pub fn into_number(self) -> PhoneNumber {
        self.number
    }
}

impl fmt::Display for PhoneNumberMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PhoneNumberMatch [{},{}) {}",
            self.start(),
            self.end(),
            self.raw_string
        )
    }
}
