use std::sync::Once;

use strum::IntoEnumIterator;

use crate::{
    Leniency, PhoneNumberMatch, PhoneNumberMatcher, PhoneNumberUtil, PHONE_NUMBER_UTIL,
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

fn find_matches(
    text: &str,
    region: &str,
    leniency: Leniency,
    max_tries: u64,
) -> Vec<PhoneNumberMatch> {
    PhoneNumberMatcher::new(get_phone_util(), text, region, leniency, max_tries).collect()
}

#[test]
fn finds_national_number_in_prose() {
    let matches = find_matches("Call me at 650-253-0000.", RegionCode::us(), Leniency::Valid, 10);
    assert_eq!(matches.len(), 1);
    let found = &matches[0];
    assert_eq!(found.start(), 11);
    assert_eq!(found.end(), 23);
    assert_eq!(found.raw_string(), "650-253-0000");
    assert_eq!(found.number().country_code(), 1);
    assert_eq!(found.number().national_number(), 6502530000);
    assert_eq!(
        get_phone_util().get_national_significant_number(found.number()),
        "6502530000"
    );
    // The context fields of the raw-input parse are not exposed on matches.
    assert!(!found.number().has_raw_input());
    assert!(!found.number().has_country_code_source());
}

#[test]
fn rejects_publication_pages() {
    let matches = find_matches(
        "VLDB J. 12(3): 211-227 (2003).",
        RegionCode::us(),
        Leniency::Valid,
        10,
    );
    assert!(matches.is_empty());
}

#[test]
fn rejects_slash_separated_dates() {
    let matches = find_matches("on 08/31/95 at noon", RegionCode::us(), Leniency::Valid, 10);
    assert!(matches.is_empty());
}

#[test]
fn rejects_timestamp_followed_by_minutes() {
    let matches = find_matches(
        "2012-01-02 08:00 log entry",
        RegionCode::us(),
        Leniency::Valid,
        10,
    );
    assert!(matches.is_empty());
}

#[test]
fn timestamp_without_minutes_is_not_a_timestamp() {
    // With nothing after the hour there is no ":mm" tail to peek at, and the
    // digits happen to form a plausible number.
    let matches = find_matches(
        "backup finished 2012-01-02 08",
        RegionCode::us(),
        Leniency::Valid,
        10,
    );
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_string(), "2012-01-02 08");
}

#[test]
fn cuts_candidate_before_second_number() {
    let matches = find_matches(
        "Contact: +41 79 123 45 67 / 68, ext 9",
        RegionCode::ch(),
        Leniency::Valid,
        10,
    );
    assert_eq!(matches.len(), 1);
    let found = &matches[0];
    assert_eq!(found.raw_string(), "+41 79 123 45 67");
    assert_eq!(found.start(), 9);
    assert_eq!(found.number().country_code(), 41);
    assert_eq!(found.number().national_number(), 791234567);
}

#[test]
fn latin_letter_boundary_applies_from_valid() {
    let text = "abc8005001234def";
    assert!(find_matches(text, RegionCode::us(), Leniency::Valid, 10).is_empty());

    let possible = find_matches(text, RegionCode::us(), Leniency::Possible, 10);
    assert_eq!(possible.len(), 1);
    assert_eq!(possible[0].raw_string(), "8005001234");
    assert_eq!(possible[0].start(), 3);
}

#[test]
fn empty_text_has_no_matches() {
    assert!(find_matches("", RegionCode::us(), Leniency::Valid, 10).is_empty());
}

#[test]
fn zero_tries_means_no_matches() {
    let matches = find_matches("Call me at 650-253-0000.", RegionCode::us(), Leniency::Valid, 0);
    assert!(matches.is_empty());
}

#[test]
fn matches_are_ordered_and_span_exact_text() {
    let text = "Office: 650-253-0000, mobile: (415) 666-7777 or +41 44 668 1800.";
    let matches = find_matches(text, RegionCode::us(), Leniency::Valid, 20);
    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].raw_string(), "650-253-0000");
    assert_eq!(matches[1].raw_string(), "(415) 666-7777");
    assert_eq!(matches[2].raw_string(), "+41 44 668 1800");
    let mut previous_end = 0;
    for found in &matches {
        assert!(found.start() >= previous_end);
        assert_eq!(&text[found.start()..found.end()], found.raw_string());
        previous_end = found.end();
    }
}

#[test]
fn matches_survive_reparsing() {
    let text = "Office: 650-253-0000, mobile: (415) 666-7777 or +41 44 668 1800.";
    let phone_util = get_phone_util();
    for found in find_matches(text, RegionCode::us(), Leniency::Valid, 20) {
        let mut reparsed = phone_util
            .parse_and_keep_raw_input(found.raw_string(), RegionCode::us())
            .expect("raw span should parse again");
        reparsed.clear_country_code_source();
        reparsed.clear_raw_input();
        reparsed.clear_preferred_domestic_carrier_code();
        assert_eq!(&reparsed, found.number());
    }
}

#[test]
fn finds_number_with_extension() {
    let matches = find_matches(
        "Call 650-253-0000 ext. 1234 today",
        RegionCode::us(),
        Leniency::Valid,
        10,
    );
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_string(), "650-253-0000 ext. 1234");
    assert_eq!(matches[0].number().extension(), "1234");
}

#[test]
fn finds_number_with_x_extension_sign() {
    let matches = find_matches(
        "Call 650-253-0000 x 303 now",
        RegionCode::us(),
        Leniency::Valid,
        10,
    );
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_string(), "650-253-0000 x 303");
    assert_eq!(matches[0].number().extension(), "303");
}

#[test]
fn recovers_number_before_bogus_carrier_code() {
    // "xx" announces a carrier code; "303" is not the national number, so
    // the full candidate fails and the first group is matched on its own.
    let matches = find_matches(
        "Call 650-253-0000 xx 303 now",
        RegionCode::us(),
        Leniency::Valid,
        10,
    );
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_string(), "650-253-0000");
    assert_eq!(matches[0].number().extension(), "");
}

#[test]
fn trims_second_extension_after_slash() {
    let matches = find_matches(
        "(530) 583-6985 x302/x2303 is the customer line",
        RegionCode::us(),
        Leniency::Valid,
        10,
    );
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_string(), "(530) 583-6985 x302");
    assert_eq!(matches[0].number().extension(), "302");
}

#[test]
fn national_prefix_must_be_present_when_required() {
    // German numbers are dialled with a leading 0 nationally; without it the
    // candidate is not accepted as VALID.
    assert!(find_matches("Tel: 30 123456", RegionCode::de(), Leniency::Valid, 10).is_empty());

    let matches = find_matches("Tel: 030 123456", RegionCode::de(), Leniency::Valid, 10);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_string(), "030 123456");
    assert_eq!(matches[0].number().national_number(), 30123456);
}

#[test]
fn seven_digit_local_number_is_possible_but_not_valid() {
    let text = "Ask for 253-0000 in Palo Alto";
    let possible = find_matches(text, RegionCode::us(), Leniency::Possible, 10);
    assert_eq!(possible.len(), 1);
    assert_eq!(possible[0].raw_string(), "253-0000");
    assert!(find_matches(text, RegionCode::us(), Leniency::Valid, 10).is_empty());
}

#[test]
fn strict_grouping_requires_groups_to_survive() {
    let matches = find_matches("Call 650 253 0000", RegionCode::us(), Leniency::StrictGrouping, 10);
    assert_eq!(matches.len(), 1);
    // An unbroken run does not split any group either.
    let matches = find_matches("Call 650 2530000", RegionCode::us(), Leniency::StrictGrouping, 10);
    assert_eq!(matches.len(), 1);
    // Pairwise grouping splits every canonical group apart.
    assert!(
        find_matches("Call 65 02 53 00 00", RegionCode::us(), Leniency::StrictGrouping, 10)
            .is_empty()
    );
}

#[test]
fn exact_grouping_requires_canonical_groups() {
    assert_eq!(
        find_matches("650-253-0000", RegionCode::us(), Leniency::ExactGrouping, 10).len(),
        1
    );
    // A single block containing the whole national number is always accepted.
    assert_eq!(
        find_matches("Call 6502530000 now", RegionCode::us(), Leniency::ExactGrouping, 10).len(),
        1
    );
    // "650 2530000" keeps groups unbroken but is not the canonical grouping.
    let text = "Call 650 2530000 now";
    assert_eq!(find_matches(text, RegionCode::us(), Leniency::StrictGrouping, 10).len(), 1);
    assert!(find_matches(text, RegionCode::us(), Leniency::ExactGrouping, 10).is_empty());
}

#[test]
fn alternate_formats_rescue_strict_grouping() {
    // 030 1234 5678 is not the canonical 30/12345678 split, but matches the
    // alternate 30/1234/5678 grouping registered for Germany.
    let matches = find_matches(
        "Bitte 030 1234 5678 anrufen",
        RegionCode::de(),
        Leniency::StrictGrouping,
        10,
    );
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_string(), "030 1234 5678");

    let matches = find_matches(
        "Bitte 030 1234 5678 anrufen",
        RegionCode::de(),
        Leniency::ExactGrouping,
        10,
    );
    assert_eq!(matches.len(), 1);
}

#[test]
fn budget_yields_prefix_of_unbounded_scan() {
    let text = "Dates: 08/31/95, 09/01/95, pages 211-227 (2003), then 650-253-0000 and 415-666-7777.";
    let full = find_matches(text, RegionCode::us(), Leniency::Valid, 100);
    assert_eq!(full.len(), 2);
    for budget in 0..10 {
        let limited = find_matches(text, RegionCode::us(), Leniency::Valid, budget);
        assert!(limited.len() <= full.len());
        assert_eq!(full[..limited.len()], limited[..]);
    }
}

#[test]
fn stricter_leniency_never_adds_matches() {
    let corpus = [
        ("Call me at 650-253-0000.", RegionCode::us()),
        ("abc8005001234def", RegionCode::us()),
        ("Contact: +41 79 123 45 67 / 68, ext 9", RegionCode::ch()),
        ("Tel: 030 1234 5678, Fax: 030 1234 5600", RegionCode::de()),
        ("(415) 6667777 and 415-666-7777", RegionCode::us()),
    ];
    for (text, region) in corpus {
        let mut looser: Option<Vec<PhoneNumberMatch>> = None;
        for leniency in Leniency::iter() {
            let matches = find_matches(text, region, leniency, 50);
            if let Some(looser) = &looser {
                for found in &matches {
                    assert!(
                        looser.contains(found),
                        "{found} found at {leniency:?} but not at the looser level in {text:?}"
                    );
                }
            }
            looser = Some(matches);
        }
    }
}

#[test]
fn current_returns_last_match() {
    let phone_util = get_phone_util();
    let mut matcher = PhoneNumberMatcher::new(
        phone_util,
        "650-253-0000 and 415-666-7777",
        RegionCode::us(),
        Leniency::Valid,
        10,
    );
    assert!(matcher.current().is_none());
    let first = matcher.next().expect("first match");
    assert_eq!(matcher.current(), Some(&first));
    let second = matcher.next().expect("second match");
    assert_eq!(matcher.current(), Some(&second));
    assert!(matcher.next().is_none());
    // The last produced match stays current after the scan ends.
    assert_eq!(matcher.current(), Some(&second));
}

#[test]
fn international_numbers_match_without_region() {
    let matches = find_matches(
        "From abroad dial +41 44 668 18 00 instead.",
        RegionCode::zz(),
        Leniency::Valid,
        10,
    );
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].raw_string(), "+41 44 668 18 00");
    assert_eq!(matches[0].number().country_code(), 41);

    // National notation cannot be resolved without a region.
    assert!(find_matches("Call 650-253-0000", RegionCode::zz(), Leniency::Valid, 10).is_empty());
}
