use chrono::{Duration, NaiveDate};
use freshkeep_core::{classify, food_item_views, summarize, FoodItem, Freshness};
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn item_expiring_in(today: NaiveDate, days: i64) -> FoodItem {
    FoodItem::new("item", today + Duration::days(days))
}

#[test]
fn boundary_days_classify_exactly() {
    let today = date(2024, 6, 15);

    assert_eq!(classify(&item_expiring_in(today, -1), today), Freshness::Expired);
    assert_eq!(classify(&item_expiring_in(today, 0), today), Freshness::ExpiringSoon);
    assert_eq!(classify(&item_expiring_in(today, 2), today), Freshness::ExpiringSoon);
    assert_eq!(classify(&item_expiring_in(today, 3), today), Freshness::Fresh);
}

#[test]
fn day_distance_crosses_month_and_year_boundaries() {
    let item = FoodItem::new("cheese", date(2025, 1, 1));

    assert_eq!(item.days_until(date(2024, 12, 30)), 2);
    assert_eq!(item.days_until(date(2025, 1, 2)), -1);
    assert_eq!(classify(&item, date(2024, 12, 29)), Freshness::Fresh);
    assert_eq!(classify(&item, date(2024, 12, 30)), Freshness::ExpiringSoon);
}

#[test]
fn leap_day_counts_as_a_full_day() {
    let item = FoodItem::new("bread", date(2024, 3, 1));
    assert_eq!(item.days_until(date(2024, 2, 28)), 2);
}

#[test]
fn views_keep_insertion_order_and_summary_counts_buckets() {
    let today = date(2024, 6, 15);
    let items = vec![
        item_expiring_in(today, 10),
        item_expiring_in(today, -3),
        item_expiring_in(today, 1),
        item_expiring_in(today, 0),
    ];

    let views = food_item_views(&items, today);
    let ids: Vec<_> = views.iter().map(|view| view.item.id).collect();
    let expected: Vec<_> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, expected);
    assert_eq!(views[1].days_until, -3);
    assert_eq!(views[1].freshness, Freshness::Expired);

    let summary = summarize(&items, today);
    assert_eq!(summary.expired, 1);
    assert_eq!(summary.expiring_soon, 2);
    assert_eq!(summary.fresh, 1);
    assert_eq!(summary.total(), items.len());
}

proptest! {
    #[test]
    fn classification_matches_threshold_policy(days in -100_000i64..100_000) {
        let expected = if days < 0 {
            Freshness::Expired
        } else if days <= 2 {
            Freshness::ExpiringSoon
        } else {
            Freshness::Fresh
        };
        prop_assert_eq!(Freshness::from_days_until(days), expected);

        let today = date(2024, 6, 15);
        prop_assert_eq!(classify(&item_expiring_in(today, days), today), expected);
    }
}
