use criterion::{black_box, criterion_group, criterion_main, Criterion};

use phonefinder::{Leniency, PhoneNumberMatcher, PHONE_NUMBER_UTIL};

/// A prose corpus mixing real numbers with the classic false positives the
/// scanner has to reject (dates, citations, timestamps, identifiers).
fn corpus() -> String {
    let paragraphs = [
        "Call our office at 650-253-0000 or (415) 666-7777 before 5pm.",
        "From Switzerland dial +41 44 668 18 00, ext. 200 for reception.",
        "The meeting was moved from 08/31/95 to 09/01/95 at noon.",
        "See VLDB J. 12(3): 211-227 (2003) for the original result.",
        "Log rotated 2012-01-02 08:00, no entries were dropped.",
        "Berlin desk: 030 1234 5678, Hamburg desk: 040 2345 6789.",
        "Ticket ids abc8005001234def and xyz4156667777abc are internal.",
        "Support: (530) 583-6985 x302/x2303, choose the first extension.",
    ];
    paragraphs.repeat(8).join(" ")
}

fn matcher_benchmark(c: &mut Criterion) {
    let text = corpus();
    let mut group = c.benchmark_group("Scanning");

    for (name, leniency) in [
        ("possible", Leniency::Possible),
        ("valid", Leniency::Valid),
        ("exact_grouping", Leniency::ExactGrouping),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let matcher = PhoneNumberMatcher::new(
                    &PHONE_NUMBER_UTIL,
                    black_box(&text),
                    black_box("US"),
                    leniency,
                    u64::MAX,
                );
                matcher.count()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, matcher_benchmark);
criterion_main!(benches);
