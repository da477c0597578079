use price_trends::areas::SelectableArea;
use price_trends::utils::{format_chf, format_thousands};
use rstest::rstest;

#[rstest]
#[case(8123.567, "8,124")]
#[case(999.4, "999")]
#[case(1000.0, "1,000")]
#[case(1234567.89, "1,234,568")]
#[case(8124.5, "8,124")]
#[case(8125.5, "8,126")]
#[case(0.5, "0")]
#[case(0.2, "0")]
#[case(-0.4, "0")]
#[case(-0.5, "0")]
#[case(-15250.0, "-15,250")]
fn test_format_thousands(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(format_thousands(value), expected);
}

#[test]
fn test_format_chf() {
    assert_eq!(format_chf(14_321.7), "CHF 14,322");
}

#[test]
fn test_display_labels() {
    let district = SelectableArea {
        label: "Kreis 8".to_string(),
        depth: 0,
    };
    let child = SelectableArea {
        label: "Seefeld".to_string(),
        depth: 1,
    };

    assert_eq!(district.display(), "Kreis 8");
    assert_eq!(child.display(), " • Seefeld");
}
