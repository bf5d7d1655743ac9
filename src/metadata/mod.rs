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

mod alternate_formats;
mod regions;
mod types;

use std::collections::HashMap;
use std::sync::LazyLock;

pub use types::{NumberFormat, PhoneMetadata, PhoneNumberDesc};

use crate::region_code::RegionCode;

static REGIONS: LazyLock<Vec<PhoneMetadata>> = LazyLock::new(regions::load);

static REGION_INDEX: LazyLock<HashMap<&'static str, &'static PhoneMetadata>> =
    LazyLock::new(|| {
        LazyLock::force(&REGIONS)
            .iter()
            .map(|metadata| (metadata.id(), metadata))
            .collect()
    });

static COUNTRY_CODE_INDEX: LazyLock<HashMap<i32, Vec<&'static PhoneMetadata>>> =
    LazyLock::new(|| {
        let mut index: HashMap<i32, Vec<&'static PhoneMetadata>> = HashMap::new();
        for metadata in LazyLock::force(&REGIONS).iter() {
            let entry = index.entry(metadata.country_code()).or_default();
            // The main country goes first so lookups by calling code land on it.
            if metadata.is_main_country_for_code() {
                entry.insert(0, metadata);
            } else {
                entry.push(metadata);
            }
        }
        index
    });

static ALTERNATE_FORMATS: LazyLock<HashMap<i32, PhoneMetadata>> = LazyLock::new(|| {
    alternate_formats::load()
        .into_iter()
        .map(|metadata| (metadata.country_code(), metadata))
        .collect()
});

pub(crate) fn metadata_for_region(region_code: &str) -> Option<&'static PhoneMetadata> {
    REGION_INDEX.get(region_code).copied()
}

pub(crate) fn region_code_for_country_code(country_code: i32) -> &'static str {
    COUNTRY_CODE_INDEX
        .get(&country_code)
        .and_then(|regions| regions.first())
        .map(|metadata| metadata.id())
        .unwrap_or_else(RegionCode::get_unknown)
}

pub(crate) fn is_supported_region(region_code: &str) -> bool {
    REGION_INDEX.contains_key(region_code)
}

pub(crate) fn alternate_formats_for_country_code(
    country_code: i32,
) -> Option<&'static PhoneMetadata> {
    ALTERNATE_FORMATS.get(&country_code)
}
