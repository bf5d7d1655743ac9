use std::sync::Once;

use crate::{
    metadata::{PhoneMetadata, PhoneNumberDesc},
    CountryCodeSource, MatchType, ParseError, PhoneNumberFormat, PhoneNumberUtil,
    PHONE_NUMBER_UTIL,
};

use super::region_code::RegionCode;

static ONCE: Once = Once::new();

fn get_phone_util() -> &'static PhoneNumberUtil {
    ONCE.call_once(|| {
        let _ = colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .try_init();
    });
    &PHONE_NUMBER_UTIL
}

#[test]
fn parse_national_number() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("(650) 253-0000", RegionCode::us()).unwrap();
    assert_eq!(number.country_code(), 1);
    assert_eq!(number.national_number(), 6502530000);
    assert!(!number.has_extension());
}

#[test]
fn parse_number_with_plus_sign() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("+44 20 7031 3000", RegionCode::us()).unwrap();
    assert_eq!(number.country_code(), 44);
    assert_eq!(number.national_number(), 2070313000);
}

#[test]
fn parse_number_with_idd() {
    let phone_util = get_phone_util();
    // 011 is the international prefix dialled from NANPA countries.
    let number = phone_util.parse("011 41 44 668 1800", RegionCode::us()).unwrap();
    assert_eq!(number.country_code(), 41);
    assert_eq!(number.national_number(), 446681800);
}

#[test]
fn parse_strips_national_prefix() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("020 7031 3000", RegionCode::gb()).unwrap();
    assert_eq!(number.country_code(), 44);
    assert_eq!(number.national_number(), 2070313000);
}

#[test]
fn parse_keeps_italian_leading_zero() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("02 3661 8300", RegionCode::it()).unwrap();
    assert_eq!(number.country_code(), 39);
    assert_eq!(number.national_number(), 236618300);
    assert!(number.italian_leading_zero());
    assert_eq!(phone_util.get_national_significant_number(&number), "0236618300");
}

#[test]
fn parse_extensions() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("650-253-0000 ext. 4567", RegionCode::us()).unwrap();
    assert_eq!(number.extension(), "4567");
    let number = phone_util.parse("650-253-0000;ext=4567", RegionCode::us()).unwrap();
    assert_eq!(number.extension(), "4567");
    let number = phone_util.parse("650-253-0000 x4567", RegionCode::us()).unwrap();
    assert_eq!(number.extension(), "4567");
}

#[test]
fn parse_and_keep_raw_input_records_context() {
    let phone_util = get_phone_util();
    let number = phone_util
        .parse_and_keep_raw_input("+41 44 668 1800", RegionCode::us())
        .unwrap();
    assert_eq!(number.raw_input(), "+41 44 668 1800");
    assert_eq!(
        number.country_code_source(),
        CountryCodeSource::FromNumberWithPlusSign
    );

    let number = phone_util
        .parse_and_keep_raw_input("650-253-0000", RegionCode::us())
        .unwrap();
    assert_eq!(number.raw_input(), "650-253-0000");
    assert_eq!(
        number.country_code_source(),
        CountryCodeSource::FromDefaultCountry
    );

    // Plain parse leaves the context fields unset.
    let number = phone_util.parse("650-253-0000", RegionCode::us()).unwrap();
    assert!(!number.has_raw_input());
    assert!(!number.has_country_code_source());
}

#[test]
fn parse_failure_cases() {
    let phone_util = get_phone_util();
    assert!(matches!(
        phone_util.parse("hello", RegionCode::us()),
        Err(ParseError::NotANumber(_))
    ));
    assert!(matches!(
        phone_util.parse("1", RegionCode::us()),
        Err(ParseError::NotANumber(_))
    ));
    // A national number cannot be interpreted without a region.
    assert_eq!(
        phone_util.parse("650-253-0000", RegionCode::zz()),
        Err(ParseError::InvalidCountryCode)
    );
    // Unknown country calling code after the plus sign.
    assert_eq!(
        phone_util.parse("+999 123 456 789", RegionCode::us()),
        Err(ParseError::InvalidCountryCode)
    );
    assert_eq!(
        phone_util.parse("+49 2", RegionCode::de()),
        Err(ParseError::TooShortNsn)
    );
    assert_eq!(
        phone_util.parse("+1 650253000012345678", RegionCode::us()),
        Err(ParseError::TooLongNsn)
    );
}

#[test]
fn format_us_number() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("650-253-0000", RegionCode::us()).unwrap();
    assert_eq!(phone_util.format(&number, PhoneNumberFormat::E164), "+16502530000");
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::National),
        "(650) 253-0000"
    );
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::International),
        "+1 (650) 253-0000"
    );
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::RFC3966),
        "tel:+1-650-253-0000"
    );
}

#[test]
fn format_ch_number_folds_national_prefix() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("+41446681800", RegionCode::zz()).unwrap();
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::National),
        "044 668 18 00"
    );
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::International),
        "+41 44 668 18 00"
    );
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::RFC3966),
        "tel:+41-44-668-18-00"
    );
}

#[test]
fn format_appends_extension() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("650-253-0000 x4567", RegionCode::us()).unwrap();
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::National),
        "(650) 253-0000 ext. 4567"
    );
    assert_eq!(
        phone_util.format(&number, PhoneNumberFormat::RFC3966),
        "tel:+1-650-253-0000;ext=4567"
    );
}

#[test]
fn choose_formatting_pattern_by_length_and_leading_digits() {
    let phone_util = get_phone_util();
    let metadata = phone_util.metadata_for_region(RegionCode::us()).unwrap();
    let ten_digit = phone_util
        .choose_formatting_pattern(metadata.number_format(), "6502530000")
        .unwrap();
    assert_eq!(ten_digit.pattern(), r"(\d{3})(\d{3})(\d{4})");
    let seven_digit = phone_util
        .choose_formatting_pattern(metadata.number_format(), "2530000")
        .unwrap();
    assert_eq!(seven_digit.pattern(), r"(\d{3})(\d{4})");
    assert!(phone_util
        .choose_formatting_pattern(metadata.number_format(), "65025")
        .is_none());
}

#[test]
fn format_nsn_using_pattern_rfc3966() {
    let phone_util = get_phone_util();
    let metadata = phone_util.metadata_for_region(RegionCode::us()).unwrap();
    let formatting_pattern = phone_util
        .choose_formatting_pattern(metadata.number_format(), "6502530000")
        .unwrap();
    assert_eq!(
        phone_util.format_nsn_using_pattern("6502530000", formatting_pattern, PhoneNumberFormat::RFC3966),
        "650-253-0000"
    );
}

#[test]
fn strip_national_prefix_and_carrier_code() {
    let phone_util = get_phone_util();

    let metadata = PhoneMetadata {
        national_prefix_for_parsing: Some("1".to_owned()),
        general_desc: PhoneNumberDesc {
            national_number_pattern: Some(r"\d{4,8}".to_owned()),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut number = "1800123".to_owned();
    assert!(phone_util.maybe_strip_national_prefix_and_carrier_code(&mut number, &metadata, None));
    assert_eq!(number, "800123");

    // Stripping is refused when it would turn a viable number non-viable.
    let mut number = "1023".to_owned();
    assert!(!phone_util.maybe_strip_national_prefix_and_carrier_code(&mut number, &metadata, None));
    assert_eq!(number, "1023");

    // No prefix present.
    let mut number = "800123".to_owned();
    assert!(!phone_util.maybe_strip_national_prefix_and_carrier_code(&mut number, &metadata, None));
    assert_eq!(number, "800123");
}

#[test]
fn strip_national_prefix_captures_carrier_code() {
    let phone_util = get_phone_util();
    let metadata = PhoneMetadata {
        national_prefix_for_parsing: Some(r"0(\d{2})?".to_owned()),
        general_desc: PhoneNumberDesc {
            national_number_pattern: Some(r"[1-9]\d{7,9}".to_owned()),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut number = "01512345678".to_owned();
    let mut carrier_code = String::new();
    assert!(phone_util.maybe_strip_national_prefix_and_carrier_code(
        &mut number,
        &metadata,
        Some(&mut carrier_code)
    ));
    assert_eq!(number, "12345678");
    assert_eq!(carrier_code, "15");
}

#[test]
fn strip_national_prefix_applies_transform_rule() {
    let phone_util = get_phone_util();
    let metadata = PhoneMetadata {
        national_prefix_for_parsing: Some(r"0(\d{2})".to_owned()),
        national_prefix_transform_rule: Some("5$1".to_owned()),
        general_desc: PhoneNumberDesc {
            national_number_pattern: Some(r"5\d{8,10}".to_owned()),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut number = "01512345678".to_owned();
    assert!(phone_util.maybe_strip_national_prefix_and_carrier_code(&mut number, &metadata, None));
    assert_eq!(number, "51512345678");
}

#[test]
fn strip_extension_requires_viable_prefix() {
    let phone_util = get_phone_util();
    let mut number = "650-253-0000 ext. 4567".to_owned();
    assert_eq!(phone_util.maybe_strip_extension(&mut number), Some("4567".to_owned()));
    assert_eq!(number, "650-253-0000");

    let mut number = "650-253-0000".to_owned();
    assert_eq!(phone_util.maybe_strip_extension(&mut number), None);
    assert_eq!(number, "650-253-0000");

    // A bare extension is not preceded by a viable number, so nothing is
    // stripped.
    let mut number = "ext. 4567".to_owned();
    assert_eq!(phone_util.maybe_strip_extension(&mut number), None);
}

#[test]
fn is_number_match_levels() {
    let phone_util = get_phone_util();
    let international = phone_util.parse("+1 650-253-0000", RegionCode::us()).unwrap();
    let national = phone_util.parse("650-253-0000", RegionCode::us()).unwrap();
    assert_eq!(
        phone_util.is_number_match(&international, &national),
        MatchType::ExactMatch
    );

    let with_extension = phone_util.parse("650-253-0000 x1234", RegionCode::us()).unwrap();
    assert_eq!(
        phone_util.is_number_match(&international, &with_extension),
        MatchType::ShortNsnMatch
    );

    let other = phone_util.parse("+41 44 668 1800", RegionCode::us()).unwrap();
    assert_eq!(phone_util.is_number_match(&international, &other), MatchType::NoMatch);
}

#[test]
fn is_number_match_with_string_operand() {
    let phone_util = get_phone_util();
    let number = phone_util.parse("+1 650-253-0000", RegionCode::us()).unwrap();
    // Without a country code of its own the second number is parsed in the
    // first number's region, and an exact match is reported as an NSN match.
    assert_eq!(
        phone_util.is_number_match_with_string(&number, "6502530000"),
        MatchType::NsnMatch
    );
    assert_eq!(
        phone_util.is_number_match_with_string(&number, "+1 650 253 0000"),
        MatchType::ExactMatch
    );
    assert_eq!(
        phone_util.is_number_match_with_string(&number, "+41 44 668 1800"),
        MatchType::NoMatch
    );
    assert_eq!(
        phone_util.is_number_match_with_string(&number, "not a number"),
        MatchType::NotANumber
    );
}

#[test]
fn possible_and_valid_disagree_on_local_numbers() {
    let phone_util = get_phone_util();
    let valid = phone_util.parse("+41 44 668 1800", RegionCode::zz()).unwrap();
    assert!(phone_util.is_possible_number(&valid));
    assert!(phone_util.is_valid_number(&valid));

    // A seven-digit US number is diallable locally but not valid nationally.
    let local = phone_util.parse("253-0000", RegionCode::us()).unwrap();
    assert!(phone_util.is_possible_number(&local));
    assert!(!phone_util.is_valid_number(&local));

    // Right length, impossible leading digit for NANPA.
    let impossible = phone_util.parse("+1 123-456-7890", RegionCode::zz()).unwrap();
    assert!(phone_util.is_possible_number(&impossible));
    assert!(!phone_util.is_valid_number(&impossible));
}

#[test]
fn normalization_converts_unicode_digits() {
    let phone_util = get_phone_util();
    assert_eq!(phone_util.normalize_digits_only("650-253-0000"), "6502530000");
    assert_eq!(
        phone_util.normalize_digits_only("\u{FF16}\u{FF15}\u{FF10} 253"),
        "650253"
    );
    assert_eq!(phone_util.normalize_digits("650-253"), "650-253");
}

#[test]
fn trims_candidate_noise() {
    let phone_util = get_phone_util();
    assert_eq!(
        phone_util.trim_after_second_number_start("583-6985 x302/x2303"),
        "583-6985 x302"
    );
    assert_eq!(
        phone_util.trim_after_second_number_start("650-253-0000"),
        "650-253-0000"
    );
    assert_eq!(phone_util.trim_unwanted_end_chars("650-253-0000.. "), "650-253-0000");
    // The hash is kept, it may mark the previous block as an extension.
    assert_eq!(phone_util.trim_unwanted_end_chars("402 x910#"), "402 x910#");
}

#[test]
fn viable_number_check() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_viable_phone_number("+41 44 668 18 00"));
    assert!(phone_util.is_viable_phone_number("15"));
    assert!(!phone_util.is_viable_phone_number("1"));
    assert!(!phone_util.is_viable_phone_number("alpha"));
}

#[test]
fn region_and_country_code_lookup() {
    let phone_util = get_phone_util();
    assert_eq!(phone_util.get_region_code_for_country_code(1), RegionCode::us());
    assert_eq!(phone_util.get_region_code_for_country_code(44), RegionCode::gb());
    assert_eq!(phone_util.get_region_code_for_country_code(999), RegionCode::zz());
    assert!(phone_util.metadata_for_region(RegionCode::ch()).is_some());
    assert!(phone_util.metadata_for_region(RegionCode::zz()).is_none());
}
