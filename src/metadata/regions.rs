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

//! Hand-maintained numbering plans for the supported regions.
//!
//! These are condensed plans: one general descriptor per region plus the
//! formats the formatter and the grouping checks feed on. Patterns are
//! anchored by use, never here.

use super::types::{NumberFormat, PhoneMetadata, PhoneNumberDesc};

fn format(
    pattern: &str,
    fmt: &str,
    leading_digits: &[&str],
    national_prefix_formatting_rule: Option<&str>,
    national_prefix_optional_when_formatting: bool,
) -> NumberFormat {
    NumberFormat {
        pattern: pattern.to_owned(),
        format: fmt.to_owned(),
        leading_digits_pattern: leading_digits.iter().map(|s| (*s).to_owned()).collect(),
        national_prefix_formatting_rule: national_prefix_formatting_rule.map(str::to_owned),
        national_prefix_optional_when_formatting,
    }
}

fn metadata_us() -> PhoneMetadata {
    PhoneMetadata {
        id: "US".to_owned(),
        country_code: 1,
        international_prefix: Some("011".to_owned()),
        national_prefix: Some("1".to_owned()),
        general_desc: PhoneNumberDesc {
            national_number_pattern: Some(r"[2-9]\d{2}[2-9]\d{6}".to_owned()),
            possible_length: vec![10],
            possible_length_local_only: vec![7],
        },
        number_format: vec![
            format(r"(\d{3})(\d{4})", "$1-$2", &[], None, true),
            format(r"(\d{3})(\d{3})(\d{4})", "($1) $2-$3", &[], None, true),
        ],
        main_country_for_code: true,
        ..Default::default()
    }
}

fn metadata_gb() -> PhoneMetadata {
    PhoneMetadata {
        id: "GB".to_owned(),
        country_code: 44,
        international_prefix: Some("00".to_owned()),
        national_prefix: Some("0".to_owned()),
        general_desc: PhoneNumberDesc {
            national_number_pattern: Some(r"[1-9]\d{8,9}".to_owned()),
            possible_length: vec![9, 10],
            possible_length_local_only: vec![7],
        },
        number_format: vec![
            format(r"(\d{2})(\d{4})(\d{4})", "$1 $2 $3", &["2"], Some("0$1"), false),
            format(r"(\d{3})(\d{3})(\d{4})", "$1 $2 $3", &["1"], Some("0$1"), false),
            format(r"(\d{4})(\d{6})", "$1 $2", &["7"], Some("0$1"), false),
            format(r"(\d{3})(\d{4})(\d{3})", "$1 $2 $3", &["8"], Some("0$1"), false),
        ],
        main_country_for_code: true,
        ..Default::default()
    }
}

fn metadata_de() -> PhoneMetadata {
    PhoneMetadata {
        id: "DE".to_owned(),
        country_code: 49,
        international_prefix: Some("00".to_owned()),
        national_prefix: Some("0".to_owned()),
        general_desc: PhoneNumberDesc {
            national_number_pattern: Some(r"[1-9]\d{5,10}".to_owned()),
            possible_length: vec![6, 7, 8, 9, 10, 11],
            possible_length_local_only: vec![],
        },
        number_format: vec![
            format(r"(\d{2})(\d{3,11})", "$1 $2", &["3[02]|40|[68]9"], Some("0$1"), false),
            format(r"(\d{3})(\d{3,10})", "$1 $2", &["2|3[3-9]|[4-9]"], Some("0$1"), false),
            format(r"(\d{3})(\d{3,8})", "$1 $2", &["1"], Some("0$1"), false),
        ],
        main_country_for_code: true,
        ..Default::default()
    }
}

fn metadata_fr() -> PhoneMetadata {
    PhoneMetadata {
        id: "FR".to_owned(),
        country_code: 33,
        international_prefix: Some("00".to_owned()),
        national_prefix: Some("0".to_owned()),
        general_desc: PhoneNumberDesc {
            national_number_pattern: Some(r"[1-9]\d{8}".to_owned()),
            possible_length: vec![9],
            possible_length_local_only: vec![],
        },
        number_format: vec![format(
            r"(\d)(\d{2})(\d{2})(\d{2})(\d{2})",
            "$1 $2 $3 $4 $5",
            &[],
            Some("0$1"),
            false,
        )],
        main_country_for_code: true,
        ..Default::default()
    }
}

fn metadata_ch() -> PhoneMetadata {
    PhoneMetadata {
        id: "CH".to_owned(),
        country_code: 41,
        international_prefix: Some("00".to_owned()),
        national_prefix: Some("0".to_owned()),
        general_desc: PhoneNumberDesc {
            national_number_pattern: Some(r"[2-9]\d{8}".to_owned()),
            possible_length: vec![9],
            possible_length_local_only: vec![],
        },
        number_format: vec![format(
            r"(\d{2})(\d{3})(\d{2})(\d{2})",
            "$1 $2 $3 $4",
            &[],
            Some("0$1"),
            false,
        )],
        main_country_for_code: true,
        ..Default::default()
    }
}

fn metadata_it() -> PhoneMetadata {
    PhoneMetadata {
        id: "IT".to_owned(),
        country_code: 39,
        international_prefix: Some("00".to_owned()),
        // Italy keeps the leading zero as part of the number itself.
        national_prefix: None,
        general_desc: PhoneNumberDesc {
            national_number_pattern: Some(r"0\d{5,10}|3\d{8,9}".to_owned()),
            possible_length: vec![6, 7, 8, 9, 10, 11],
            possible_length_local_only: vec![],
        },
        number_format: vec![
            format(r"(\d{2})(\d{4})(\d{4})", "$1 $2 $3", &["0[26]"], None, false),
            format(r"(\d{3})(\d{3})(\d{4})", "$1 $2 $3", &["3"], None, false),
            format(r"(\d{4})(\d{2,6})", "$1 $2", &["0"], None, false),
        ],
        main_country_for_code: true,
        ..Default::default()
    }
}

pub(super) fn load() -> Vec<PhoneMetadata> {
    vec![
        metadata_us(),
        metadata_gb(),
        metadata_de(),
        metadata_fr(),
        metadata_ch(),
        metadata_it(),
    ]
}
