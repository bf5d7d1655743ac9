pub(crate) mod helper_constants;
mod helper_functions;
pub mod errors;
pub mod enums;
pub mod phonenumberutil;
mod regexps;

use std::sync::LazyLock;

pub use enums::{MatchType, NumberLengthType, PhoneNumberFormat};

use crate::phonenumberutil::phonenumberutil::PhoneNumberUtil;

/// The extension pattern fragment used when hunting for numbers in text, as
/// opposed to parsing explicit input.
pub(crate) fn extn_patterns_for_matching() -> String {
    helper_functions::create_extn_pattern(false)
}

pub static PHONE_NUMBER_UTIL: LazyLock<PhoneNumberUtil> =
    LazyLock::new(|| PhoneNumberUtil::new());
