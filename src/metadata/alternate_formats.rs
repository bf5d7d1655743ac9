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

//! Alternate groupings people commonly write numbers in, keyed by country
//! calling code. Consulted by the grouping checks when the canonical
//! format does not line up with the text.

use super::types::{NumberFormat, PhoneMetadata};

fn alternate(pattern: &str, fmt: &str, leading_digits: &[&str]) -> NumberFormat {
    NumberFormat {
        pattern: pattern.to_owned(),
        format: fmt.to_owned(),
        leading_digits_pattern: leading_digits.iter().map(|s| (*s).to_owned()).collect(),
        ..Default::default()
    }
}

fn alternates_49() -> PhoneMetadata {
    PhoneMetadata {
        id: "DE".to_owned(),
        country_code: 49,
        number_format: vec![
            alternate(r"(\d{2})(\d{4})(\d{2,7})", "$1 $2 $3", &["3[02]|40|[68]9"]),
            alternate(r"(\d{3})(\d{3})(\d{1,8})", "$1 $2 $3", &["2|3[3-9]|[4-9]"]),
        ],
        ..Default::default()
    }
}

pub(super) fn load() -> Vec<PhoneMetadata> {
    vec![alternates_49()]
}
