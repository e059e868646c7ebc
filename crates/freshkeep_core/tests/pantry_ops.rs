use chrono::NaiveDate;
use freshkeep_core::{
    add_food_item, add_grocery_item, promote_grocery_item, remove_food_item,
    remove_grocery_item_named, remove_grocery_items_at, FoodItem, PantryError,
};
use std::collections::HashSet;
use uuid::Uuid;

fn june(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
}

fn groceries(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn add_food_item_appends_trimmed_item() {
    let existing = vec![FoodItem::new("Bread", june(20))];

    let (items, created) = add_food_item(&existing, "  Milk ", june(18)).unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0], existing[0]);
    assert_eq!(items[1], created);
    assert_eq!(created.name, "Milk");
    assert_eq!(created.expiration_date, june(18));
    assert!(!created.id.is_nil());
}

#[test]
fn add_food_item_rejects_whitespace_name() {
    let existing = vec![FoodItem::new("Bread", june(20))];

    let err = add_food_item(&existing, "  ", june(18)).unwrap_err();
    assert_eq!(err, PantryError::EmptyName);
    assert_eq!(existing.len(), 1);
}

#[test]
fn add_then_remove_restores_prior_collection() {
    let before = vec![FoodItem::new("Bread", june(20)), FoodItem::new("Eggs", june(25))];

    let (with_milk, milk) = add_food_item(&before, "Milk", june(18)).unwrap();
    let after = remove_food_item(&with_milk, milk.id);

    assert_eq!(after, before);
}

#[test]
fn remove_unknown_food_id_is_noop() {
    let items = vec![FoodItem::new("Bread", june(20))];
    assert_eq!(remove_food_item(&items, Uuid::new_v4()), items);
}

#[test]
fn generated_ids_are_unique() {
    let mut items = Vec::new();
    for _ in 0..200 {
        let (next, _) = add_food_item(&items, "Apple", june(20)).unwrap();
        items = next;
    }
    let ids: HashSet<_> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids.len(), items.len());
}

#[test]
fn grocery_add_keeps_duplicates_and_rejects_blank() {
    let list = add_grocery_item(&[], "Eggs").unwrap();
    let list = add_grocery_item(&list, "Eggs ").unwrap();
    assert_eq!(list, groceries(&["Eggs", "Eggs"]));

    assert_eq!(
        add_grocery_item(&list, "\t").unwrap_err(),
        PantryError::EmptyName
    );
}

#[test]
fn remove_grocery_positions_zero_and_two() {
    let list = groceries(&["A", "B", "C"]);
    assert_eq!(remove_grocery_items_at(&list, &[0, 2]).unwrap(), groceries(&["B"]));
}

#[test]
fn remove_grocery_positions_ignores_order_and_repeats() {
    let list = groceries(&["A", "B", "C", "D"]);
    assert_eq!(
        remove_grocery_items_at(&list, &[3, 1, 3]).unwrap(),
        groceries(&["A", "C"])
    );
}

#[test]
fn out_of_range_position_rejects_whole_request() {
    let list = groceries(&["A", "B", "C"]);

    let err = remove_grocery_items_at(&list, &[0, 3]).unwrap_err();
    assert_eq!(err, PantryError::OutOfRange { index: 3, len: 3 });
    assert_eq!(list, groceries(&["A", "B", "C"]));
}

#[test]
fn remove_grocery_by_value_removes_first_match_only() {
    let list = groceries(&["Eggs", "Milk", "Eggs"]);

    assert_eq!(
        remove_grocery_item_named(&list, "Eggs"),
        groceries(&["Milk", "Eggs"])
    );
    assert_eq!(remove_grocery_item_named(&list, "Butter"), list);
}

#[test]
fn promote_removes_exactly_one_duplicate() {
    let list = groceries(&["Eggs", "Eggs"]);

    let promotion = promote_grocery_item(&[], &list, "Eggs", june(22)).unwrap();

    assert_eq!(promotion.grocery_items, groceries(&["Eggs"]));
    assert_eq!(promotion.food_items.len(), 1);
    assert_eq!(promotion.food_items[0], promotion.created);
    assert_eq!(promotion.created.name, "Eggs");
    assert_eq!(promotion.created.expiration_date, june(22));
}

#[test]
fn promote_unlisted_name_still_tracks_food() {
    let list = groceries(&["Milk"]);

    let promotion = promote_grocery_item(&[], &list, "Eggs", june(22)).unwrap();

    assert_eq!(promotion.grocery_items, list);
    assert_eq!(promotion.food_items.len(), 1);
}

#[test]
fn promote_blank_name_changes_nothing() {
    let list = groceries(&["Eggs"]);
    let err = promote_grocery_item(&[], &list, " ", june(22)).unwrap_err();
    assert_eq!(err, PantryError::EmptyName);
}
