use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use staymaster::catalog::default_room_types;
use staymaster::sink::{InMemoryBookingSink, RecordingNotifier};
use staymaster::{pricing, ReservationWizard, SubmitOutcome};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// Benchmark for pricing quotes over stays of increasing length
pub fn pricing_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pricing_quote");
    let rooms = default_room_types();
    let deluxe = rooms.iter().find(|r| r.id == "deluxe").unwrap().clone();

    for nights in [1, 7, 30, 365].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(nights),
            nights,
            |b, &nights| {
                let check_in = date("2024-01-10");
                let check_out = check_in + chrono::Duration::days(nights);
                b.iter(|| {
                    black_box(pricing::quote(
                        black_box(&deluxe),
                        check_in,
                        check_out,
                        2,
                    ))
                });
            },
        );
    }

    group.finish();
}

// Benchmark for the full wizard walkthrough including submission
pub fn wizard_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reservation_wizard");

    group.bench_function("walk_and_submit", |b| {
        let sink = InMemoryBookingSink::new();
        let notifier = RecordingNotifier::new();

        b.iter(|| {
            let mut wizard =
                ReservationWizard::with_today(default_room_types(), date("2024-01-01"));
            {
                let draft = wizard.draft_mut();
                draft.stay.room_type_id = Some("deluxe".to_string());
                draft.stay.check_in = Some(date("2024-01-10"));
                draft.stay.check_out = Some(date("2024-01-14"));
                draft.guest.name = "John Smith".to_string();
                draft.guest.email = "john@example.com".to_string();
                draft.guest.phone = "555-123-4567".to_string();
                draft.payment.card_number = "4111 1111 1111 1111".to_string();
                draft.payment.expiry = "12/25".to_string();
                draft.payment.cvv = "123".to_string();
                draft.agree_to_terms = true;
            }
            for _ in 0..4 {
                assert!(wizard.advance());
            }

            let outcome = tokio_test::block_on(wizard.submit(&sink, &notifier));
            assert!(matches!(outcome, SubmitOutcome::Booked(_)));
            black_box(wizard.current_step())
        });
    });

    group.finish();
}

criterion_group!(benches, pricing_benchmark, wizard_benchmark);
criterion_main!(benches);
