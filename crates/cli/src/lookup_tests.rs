#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::time::FakeClock;

fn case(code: &str) -> CaseFixture {
    CaseFixture {
        code: code.to_string(),
        id: None,
        name: None,
        error: None,
    }
}

fn item(code: &str) -> ItemFixture {
    ItemFixture {
        code: code.to_string(),
        amount: Some(40.0),
        unit: Some("USD".to_string()),
        category: Some("Food".to_string()),
        description: Some("Grocery voucher".to_string()),
        error: None,
    }
}

#[tokio::test]
async fn test_case_lookup_defaults_id_to_code() {
    let mut catalog = FixtureCatalog::new(FakeClock::at_epoch().into());
    catalog.insert_case(case("CASE-7"));

    let found = catalog.lookup_case("CASE-7").await.unwrap().unwrap();
    assert_eq!(found.id, "CASE-7");
    assert_eq!(found.name, None);
}

#[tokio::test]
async fn test_case_lookup_uses_fixture_id_and_name() {
    let mut catalog = FixtureCatalog::new(FakeClock::at_epoch().into());
    catalog.insert_case(CaseFixture {
        id: Some("1042".to_string()),
        name: Some("Jordan Smith".to_string()),
        ..case("CARD-1042")
    });

    let found = catalog.lookup_case("CARD-1042").await.unwrap().unwrap();
    assert_eq!(found.id, "1042");
    assert_eq!(found.name.as_deref(), Some("Jordan Smith"));
}

#[tokio::test]
async fn test_unknown_codes_are_not_found() {
    let catalog = FixtureCatalog::new(FakeClock::at_epoch().into());
    assert_eq!(catalog.lookup_case("NOPE").await.unwrap(), None);
    assert_eq!(catalog.lookup_assistance_item("NOPE").await.unwrap(), None);
}

#[tokio::test]
async fn test_item_lookup_copies_payload() {
    let mut catalog = FixtureCatalog::new(FakeClock::at_epoch().into());
    catalog.insert_item(item("ITEM-1"));

    let found = catalog.lookup_assistance_item("ITEM-1").await.unwrap().unwrap();
    assert_eq!(found.amount, Some(40.0));
    assert_eq!(found.category.as_deref(), Some("Food"));
}

#[tokio::test]
async fn test_fixture_errors_surface() {
    let mut catalog = FixtureCatalog::new(FakeClock::at_epoch().into());
    catalog.insert_case(CaseFixture {
        error: Some("timeout".to_string()),
        ..case("CASE-1")
    });
    catalog.insert_item(ItemFixture {
        error: Some("voucher expired".to_string()),
        ..item("ITEM-1")
    });

    assert_eq!(
        catalog.lookup_case("CASE-1").await,
        Err(LookupError::Unavailable("timeout".to_string()))
    );
    assert_eq!(
        catalog.lookup_assistance_item("ITEM-1").await,
        Err(LookupError::Rejected("voucher expired".to_string()))
    );
}

#[tokio::test]
async fn test_delay_advances_fake_clock() {
    let clock = FakeClock::new(1000);
    let mut catalog = FixtureCatalog::new(clock.clone().into()).with_delay_ms(250);
    catalog.insert_case(case("CASE-1"));

    catalog.lookup_case("CASE-1").await.unwrap();
    assert_eq!(clock.now_millis(), 1250);
}

#[test]
fn test_from_config() {
    let config = ScenarioConfig {
        cases: vec![case("CASE-1"), case("CASE-2")],
        items: vec![item("ITEM-1")],
        lookup_delay_ms: 5,
        ..ScenarioConfig::default()
    };
    let catalog = FixtureCatalog::from_config(&config, FakeClock::at_epoch().into());
    assert_eq!(catalog.case_count(), 2);
    assert_eq!(catalog.item_count(), 1);
}
