use chrono::FixedOffset;
use daybook_core::{
    count_by_category, delta, distribution, frequency, group_by_day, leaders, Record, Window,
};
use uuid::Uuid;

const DAY_MS: i64 = 86_400_000;
const HOUR_MS: i64 = 3_600_000;

fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

fn fixed_record(suffix: u32, category: &str, recorded_at: i64) -> Record {
    let id = Uuid::parse_str(&format!("00000000-0000-4000-8000-{suffix:012x}")).unwrap();
    Record::with_id(id, category, recorded_at)
}

fn at_noon(day: i64) -> i64 {
    day * DAY_MS + 12 * HOUR_MS
}

#[test]
fn count_by_category_sums_to_record_count() {
    let records = vec![
        fixed_record(1, "mood", at_noon(1)),
        fixed_record(2, "plants", at_noon(1)),
        fixed_record(3, "mood", at_noon(2)),
        fixed_record(4, "mood", at_noon(3)),
    ];

    let counts = count_by_category(&records);
    assert_eq!(counts.get("mood"), Some(&3));
    assert_eq!(counts.get("plants"), Some(&1));
    assert_eq!(counts.values().sum::<usize>(), records.len());
}

#[test]
fn empty_input_yields_documented_empty_values() {
    let none: Vec<Record> = Vec::new();
    assert!(count_by_category(&none).is_empty());
    assert!(distribution(&none).is_empty());
    assert!(group_by_day(&none, utc()).is_empty());
    assert_eq!(frequency(&none, Window::trailing(7, at_noon(10)), utc()), 0.0);
    assert_eq!(delta(&none, "height_cm", Window::new(0, i64::MAX)), None);
}

#[test]
fn distribution_shares_sum_to_one() {
    let records = vec![
        fixed_record(1, "mood", at_noon(1)),
        fixed_record(2, "mood", at_noon(2)),
        fixed_record(3, "plants", at_noon(2)),
        fixed_record(4, "weather", at_noon(3)),
    ];

    let shares = distribution(&records);
    assert_eq!(shares.get("mood"), Some(&0.5));
    assert_eq!(shares.get("plants"), Some(&0.25));
    let total: f64 = shares.values().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn frequency_is_one_for_single_record_on_single_day() {
    let records = vec![fixed_record(1, "mood", at_noon(5))];
    let window = Window::trailing(7, at_noon(6));
    assert_eq!(frequency(&records, window, utc()), 1.0);
}

#[test]
fn frequency_counts_entries_per_active_day() {
    // Three entries on one day, window covering only that day.
    let same_day = vec![
        fixed_record(1, "mood", at_noon(5)),
        fixed_record(2, "mood", at_noon(5) + HOUR_MS),
        fixed_record(3, "mood", at_noon(5) + 2 * HOUR_MS),
    ];
    let window = Window::new(5 * DAY_MS, 6 * DAY_MS);
    assert_eq!(frequency(&same_day, window, utc()), 3.0);

    // Four entries across two days.
    let two_days = vec![
        fixed_record(1, "mood", at_noon(5)),
        fixed_record(2, "mood", at_noon(5) + HOUR_MS),
        fixed_record(3, "mood", at_noon(6)),
        fixed_record(4, "mood", at_noon(6) + HOUR_MS),
    ];
    let window = Window::new(5 * DAY_MS, 7 * DAY_MS);
    assert_eq!(frequency(&two_days, window, utc()), 2.0);
}

#[test]
fn frequency_is_zero_when_window_has_no_records() {
    let records = vec![fixed_record(1, "mood", at_noon(1))];
    let window = Window::new(10 * DAY_MS, 20 * DAY_MS);
    assert_eq!(frequency(&records, window, utc()), 0.0);
}

#[test]
fn delta_is_last_minus_first_by_ascending_timestamp() {
    let records = vec![
        fixed_record(1, "plants", at_noon(1)).with_measurement("height_cm", 10.0),
        fixed_record(2, "plants", at_noon(3)).with_measurement("height_cm", 14.0),
    ];

    let window = Window::new(0, 10 * DAY_MS);
    assert_eq!(delta(&records, "height_cm", window), Some(4.0));
}

#[test]
fn delta_ignores_records_without_the_field_or_outside_the_window() {
    let records = vec![
        // Outside the window despite carrying the field.
        fixed_record(1, "plants", at_noon(20)).with_measurement("height_cm", 99.0),
        fixed_record(2, "plants", at_noon(1)).with_measurement("height_cm", 10.0),
        // No height measurement.
        fixed_record(3, "plants", at_noon(2)).with_note("watered"),
        fixed_record(4, "plants", at_noon(3)).with_measurement("height_cm", 13.0),
    ];

    let window = Window::new(0, 10 * DAY_MS);
    assert_eq!(delta(&records, "height_cm", window), Some(3.0));
}

#[test]
fn delta_requires_two_qualifying_records() {
    let window = Window::new(0, 10 * DAY_MS);

    let one = vec![fixed_record(1, "plants", at_noon(1)).with_measurement("height_cm", 10.0)];
    assert_eq!(delta(&one, "height_cm", window), None);

    // Two records, same value: a literal zero, not "insufficient data".
    let flat = vec![
        fixed_record(1, "plants", at_noon(1)).with_measurement("height_cm", 10.0),
        fixed_record(2, "plants", at_noon(2)).with_measurement("height_cm", 10.0),
    ];
    assert_eq!(delta(&flat, "height_cm", window), Some(0.0));
}

#[test]
fn delta_orders_input_before_subtracting() {
    // Later entry appears first in the sequence.
    let records = vec![
        fixed_record(1, "plants", at_noon(3)).with_measurement("height_cm", 14.0),
        fixed_record(2, "plants", at_noon(1)).with_measurement("height_cm", 10.0),
    ];

    let window = Window::new(0, 10 * DAY_MS);
    assert_eq!(delta(&records, "height_cm", window), Some(4.0));
}

#[test]
fn group_by_day_buckets_same_calendar_day_together() {
    let records = vec![
        fixed_record(1, "mood", at_noon(5)),
        fixed_record(2, "mood", at_noon(5) + HOUR_MS),
        fixed_record(3, "mood", at_noon(5) + 2 * HOUR_MS),
    ];

    let grouped = group_by_day(&records, utc());
    assert_eq!(grouped.len(), 1);
    let (_, entries) = grouped.iter().next().unwrap();
    assert_eq!(entries.len(), 3);
}

#[test]
fn group_by_day_honors_reporting_timezone() {
    // 23:30 UTC on day 5 is already day 6 in UTC+2.
    let late_evening = 5 * DAY_MS + 23 * HOUR_MS + 30 * 60_000;
    let records = vec![fixed_record(1, "weather", late_evening)];

    let utc_grouped = group_by_day(&records, utc());
    let shifted_grouped = group_by_day(&records, FixedOffset::east_opt(2 * 3600).unwrap());

    let utc_day = *utc_grouped.keys().next().unwrap();
    let shifted_day = *shifted_grouped.keys().next().unwrap();
    assert_eq!(shifted_day, utc_day.succ_opt().unwrap());
}

#[test]
fn leaders_rank_categories_by_descending_delta() {
    let window = Window::new(0, 10 * DAY_MS);
    let records = vec![
        fixed_record(1, "fern", at_noon(1)).with_measurement("height_cm", 10.0),
        fixed_record(2, "fern", at_noon(3)).with_measurement("height_cm", 14.0),
        fixed_record(3, "ivy", at_noon(1)).with_measurement("height_cm", 5.0),
        fixed_record(4, "ivy", at_noon(2)).with_measurement("height_cm", 11.0),
        // One sample only: omitted from the board.
        fixed_record(5, "cactus", at_noon(1)).with_measurement("height_cm", 4.0),
    ];

    let board = leaders(&records, "height_cm", window);
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].category, "ivy");
    assert_eq!(board[0].delta, 6.0);
    assert_eq!(board[0].samples, 2);
    assert_eq!(board[1].category, "fern");
    assert_eq!(board[1].delta, 4.0);
}

#[test]
fn leaders_break_delta_ties_by_category_id() {
    let window = Window::new(0, 10 * DAY_MS);
    let records = vec![
        fixed_record(1, "zinnia", at_noon(1)).with_measurement("height_cm", 1.0),
        fixed_record(2, "zinnia", at_noon(2)).with_measurement("height_cm", 3.0),
        fixed_record(3, "aster", at_noon(1)).with_measurement("height_cm", 2.0),
        fixed_record(4, "aster", at_noon(2)).with_measurement("height_cm", 4.0),
    ];

    let board = leaders(&records, "height_cm", window);
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].category, "aster");
    assert_eq!(board[1].category, "zinnia");
}

#[test]
fn aggregates_are_idempotent_over_the_same_snapshot() {
    let records = vec![
        fixed_record(1, "mood", at_noon(1)),
        fixed_record(2, "plants", at_noon(2)),
    ];
    let window = Window::new(0, 10 * DAY_MS);

    assert_eq!(count_by_category(&records), count_by_category(&records));
    assert_eq!(
        frequency(&records, window, utc()),
        frequency(&records, window, utc())
    );
    assert_eq!(group_by_day(&records, utc()), group_by_day(&records, utc()));
}
