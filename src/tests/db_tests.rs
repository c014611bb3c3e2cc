use chrono::Utc;

use crate::db::{listings, phones};
use crate::domain::conditions::{ConditionGrade, ConditionMap};
use crate::domain::phone::PhoneFilters;
use crate::domain::platforms::PlatformCatalog;
use crate::errors::StoreError;
use crate::tests::utils::{init_test_db, sample_phone};

#[test]
fn create_phone_derives_one_listing_per_platform() {
    let db = init_test_db();
    let catalog = PlatformCatalog::standard();
    let map = ConditionMap::standard();

    let phone = sample_phone("iPhone 12", ConditionGrade::Excellent, 100.0);
    let id = phones::create_phone(&db, &catalog, &map, &phone).unwrap();

    let rows = listings::listings_for_phone(&db, id).unwrap();
    assert_eq!(rows.len(), 3);

    let x = listings::get_listing(&db, id, "X").unwrap();
    assert_eq!(x.platform_price, 110.0);
    assert_eq!(x.platform_condition.as_deref(), Some("Good"));
    assert!(!x.listed);

    let y = listings::get_listing(&db, id, "Y").unwrap();
    assert_eq!(y.platform_price, 110.0);
    assert_eq!(y.platform_condition.as_deref(), Some("3 stars (Excellent)"));

    let z = listings::get_listing(&db, id, "Z").unwrap();
    assert_eq!(z.platform_price, 112.0);
    assert_eq!(z.platform_condition.as_deref(), Some("As New"));
}

#[test]
fn create_phone_rejects_bad_base_price() {
    let db = init_test_db();
    let catalog = PlatformCatalog::standard();
    let map = ConditionMap::standard();

    let phone = sample_phone("Broken", ConditionGrade::Good, 0.0);
    match phones::create_phone(&db, &catalog, &map, &phone) {
        Err(StoreError::InvalidInput(_)) => {}
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn update_refreshes_listing_prices_and_conditions() {
    let db = init_test_db();
    let catalog = PlatformCatalog::standard();
    let map = ConditionMap::standard();

    let phone = sample_phone("Pixel 6", ConditionGrade::Good, 100.0);
    let id = phones::create_phone(&db, &catalog, &map, &phone).unwrap();

    let mut updated = sample_phone("Pixel 6", ConditionGrade::Fair, 200.0);
    updated.stock_quantity = 4;
    phones::update_phone(&db, &catalog, &map, id, &updated).unwrap();

    let record = phones::get_phone(&db, id).unwrap();
    assert_eq!(record.base_price, 200.0);
    assert_eq!(record.condition, ConditionGrade::Fair);
    assert_eq!(record.stock_quantity, 4);

    let x = listings::get_listing(&db, id, "X").unwrap();
    assert_eq!(x.platform_price, 220.0);
    let y = listings::get_listing(&db, id, "Y").unwrap();
    assert_eq!(y.platform_price, 218.0);
    assert_eq!(y.platform_condition.as_deref(), Some("1 star (Usable)"));
}

#[test]
fn update_to_unsupported_condition_delists() {
    let db = init_test_db();
    let catalog = PlatformCatalog::standard();
    let map = ConditionMap::standard();

    let phone = sample_phone("Galaxy S21", ConditionGrade::Good, 100.0);
    let id = phones::create_phone(&db, &catalog, &map, &phone).unwrap();
    listings::mark_listed(&db, id, "Z", Utc::now().naive_utc()).unwrap();

    // Poor has no mapping on Z: the listing must be cleared, not kept live.
    let downgraded = sample_phone("Galaxy S21", ConditionGrade::Poor, 100.0);
    phones::update_phone(&db, &catalog, &map, id, &downgraded).unwrap();

    let z = listings::get_listing(&db, id, "Z").unwrap();
    assert_eq!(z.platform_condition, None);
    assert!(!z.listed);
    assert!(z.listing_date.is_none());

    // X still supports Poor (as "Scrap") and keeps its state.
    let x = listings::get_listing(&db, id, "X").unwrap();
    assert_eq!(x.platform_condition.as_deref(), Some("Scrap"));
}

#[test]
fn update_of_missing_phone_is_not_found() {
    let db = init_test_db();
    let catalog = PlatformCatalog::standard();
    let map = ConditionMap::standard();

    let phone = sample_phone("Ghost", ConditionGrade::Good, 100.0);
    assert!(matches!(
        phones::update_phone(&db, &catalog, &map, 9999, &phone),
        Err(StoreError::NotFound)
    ));
}

#[test]
fn delete_removes_phone_and_listings() {
    let db = init_test_db();
    let catalog = PlatformCatalog::standard();
    let map = ConditionMap::standard();

    let phone = sample_phone("iPhone 12", ConditionGrade::Good, 100.0);
    let id = phones::create_phone(&db, &catalog, &map, &phone).unwrap();

    phones::delete_phone(&db, id).unwrap();
    assert!(matches!(
        phones::get_phone(&db, id),
        Err(StoreError::NotFound)
    ));
    assert!(listings::listings_for_phone(&db, id).unwrap().is_empty());
    assert!(matches!(
        phones::delete_phone(&db, id),
        Err(StoreError::NotFound)
    ));
}

#[test]
fn list_phones_filters_by_search_and_condition() {
    let db = init_test_db();
    let catalog = PlatformCatalog::standard();
    let map = ConditionMap::standard();

    let mut a = sample_phone("iPhone 12", ConditionGrade::Good, 100.0);
    a.brand = "Apple".into();
    let mut b = sample_phone("Galaxy S21", ConditionGrade::New, 150.0);
    b.brand = "Samsung".into();
    let mut c = sample_phone("Pixel 6", ConditionGrade::Good, 80.0);
    c.brand = "Google".into();
    for phone in [&a, &b, &c] {
        phones::create_phone(&db, &catalog, &map, phone).unwrap();
    }

    let all = phones::list_phones(&db, &PhoneFilters::default()).unwrap();
    assert_eq!(all.len(), 3);
    // Every entry carries listed flags for all three platforms.
    assert!(all.iter().all(|p| p.platforms.len() == 3));
    assert!(all
        .iter()
        .all(|p| p.platforms.values().all(|listed| !listed)));

    let apples = phones::list_phones(
        &db,
        &PhoneFilters {
            search: Some("apple".into()),
            condition: None,
        },
    )
    .unwrap();
    assert_eq!(apples.len(), 1);
    assert_eq!(apples[0].phone.model_name, "iPhone 12");

    let good = phones::list_phones(
        &db,
        &PhoneFilters {
            search: None,
            condition: Some(ConditionGrade::Good),
        },
    )
    .unwrap();
    assert_eq!(good.len(), 2);

    let good_google = phones::list_phones(
        &db,
        &PhoneFilters {
            search: Some("Pixel".into()),
            condition: Some(ConditionGrade::Good),
        },
    )
    .unwrap();
    assert_eq!(good_google.len(), 1);
}

#[test]
fn mark_listed_enforces_the_condition_invariant() {
    let db = init_test_db();
    let catalog = PlatformCatalog::standard();
    let map = ConditionMap::standard();

    let phone = sample_phone("Old Nokia", ConditionGrade::Poor, 50.0);
    let id = phones::create_phone(&db, &catalog, &map, &phone).unwrap();

    // Unsupported on Z.
    assert!(matches!(
        listings::mark_listed(&db, id, "Z", Utc::now().naive_utc()),
        Err(StoreError::InvalidInput(_))
    ));
    // Missing row.
    assert!(matches!(
        listings::mark_listed(&db, 9999, "X", Utc::now().naive_utc()),
        Err(StoreError::InvalidInput(_))
    ));

    // Supported on X.
    listings::mark_listed(&db, id, "X", Utc::now().naive_utc()).unwrap();
    let x = listings::get_listing(&db, id, "X").unwrap();
    assert!(x.listed);
    assert!(x.listing_date.is_some());
}

#[test]
fn refresh_platform_prices_recomputes_from_base_prices() {
    let db = init_test_db();
    let catalog = PlatformCatalog::standard();
    let map = ConditionMap::standard();

    let phone = sample_phone("iPhone 12", ConditionGrade::Good, 100.0);
    let id = phones::create_phone(&db, &catalog, &map, &phone).unwrap();

    // Change the base price behind the store's back, leaving the stale
    // derived price in place.
    db.with_conn(|conn| {
        conn.execute(
            "UPDATE phones SET base_price = 300.0 WHERE id = ?1",
            rusqlite::params![id],
        )
        .map_err(|e| StoreError::DbError(e.to_string()))?;
        Ok(())
    })
    .unwrap();
    assert_eq!(
        listings::get_listing(&db, id, "X").unwrap().platform_price,
        110.0
    );

    let refreshed = listings::refresh_platform_prices(&db, &catalog, "X").unwrap();
    assert_eq!(refreshed, 1);
    assert_eq!(
        listings::get_listing(&db, id, "X").unwrap().platform_price,
        330.0
    );

    assert!(matches!(
        listings::refresh_platform_prices(&db, &catalog, "Q"),
        Err(StoreError::NotFound)
    ));
}

#[test]
fn platform_summary_counts_and_averages() {
    let db = init_test_db();
    let catalog = PlatformCatalog::standard();
    let map = ConditionMap::standard();

    let a = sample_phone("iPhone 12", ConditionGrade::Good, 100.0);
    let b = sample_phone("Pixel 6", ConditionGrade::Good, 200.0);
    let id_a = phones::create_phone(&db, &catalog, &map, &a).unwrap();
    let _id_b = phones::create_phone(&db, &catalog, &map, &b).unwrap();

    listings::mark_listed(&db, id_a, "X", Utc::now().naive_utc()).unwrap();

    let summary = listings::platform_summary(&db, &catalog).unwrap();
    let x = &summary["X"];
    assert_eq!(x.name, "Platform X");
    assert_eq!(x.total_phones, 2);
    assert_eq!(x.listed_phones, 1);
    assert_eq!(x.avg_price, 110.0);
    assert_eq!(x.fee_structure, "10%");

    let y = &summary["Y"];
    assert_eq!(y.total_phones, 2);
    assert_eq!(y.listed_phones, 0);
    assert_eq!(y.avg_price, 0.0);
}
