use crate::domain::platforms::{FeeModel, Platform, PlatformCatalog};

#[test]
fn standard_catalog_lookup_and_order() {
    let catalog = PlatformCatalog::standard();
    assert_eq!(catalog.codes(), vec!["X", "Y", "Z"]);

    let y = catalog.get("Y").expect("Y should exist");
    assert_eq!(y.name, "Platform Y");
    assert_eq!(
        y.fee_model,
        FeeModel::PercentagePlusFixed {
            rate: 0.08,
            fixed_fee: 2.0
        }
    );
    assert!(catalog.get("Q").is_none());
}

#[test]
fn fee_structure_descriptions() {
    let catalog = PlatformCatalog::standard();
    assert_eq!(catalog.get("X").unwrap().fee_model.describe(), "10%");
    assert_eq!(catalog.get("Y").unwrap().fee_model.describe(), "8% + $2");
    assert_eq!(catalog.get("Z").unwrap().fee_model.describe(), "12%");
}

#[test]
fn custom_catalogs_are_supported() {
    let catalog = PlatformCatalog::new(vec![Platform {
        code: "W".into(),
        name: "Platform W".into(),
        fee_model: FeeModel::Percentage { rate: 0.05 },
        conditions: vec!["Any".into()],
    }]);
    assert_eq!(catalog.codes(), vec!["W"]);
    assert!(catalog.get("X").is_none());
}
