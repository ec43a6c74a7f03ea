//! End-to-end field scenarios: a custom weekday pattern and a locale toggle.

use datefield_widget::{DateValue, LocaleDateField, Resolution};
use pretty_assertions::assert_eq;

#[test]
fn day_field_with_custom_weekday_pattern() {
    let mut field = LocaleDateField::new(Resolution::Day);
    field.set_width("200px");
    field.set_date_format(Some("dd/MM/yyyy EEE")).unwrap();
    field.set_value(Some(DateValue::from_ymd(2014, 3, 14).unwrap()));

    assert_eq!(field.formatted_value(), "14/03/2014 Fri");
    assert_eq!(field.width(), Some("200px"));

    // The displayed text round-trips through the field's own parser.
    assert_eq!(
        field.parse("14/03/2014 Fri").unwrap(),
        field.value().unwrap()
    );
}

#[test]
fn locale_toggle_keeps_the_value() {
    let mut field = LocaleDateField::new(Resolution::Day);
    field.set_locale("fi-FI").unwrap();
    field.set_caption("fi-FI");
    let value = DateValue::from_ymd(2013, 7, 27).unwrap();
    field.set_value(Some(value));
    assert_eq!(field.formatted_value(), "27.7.2013");

    // Flip between Finnish and Chinese a few times: the value survives every
    // flip and the caption follows the active locale.
    for expected in ["2013/7/27", "27.7.2013", "2013/7/27"] {
        let next = if field.locale_id() == "fi-FI" {
            "zh-CN"
        } else {
            "fi-FI"
        };
        field.set_locale(next).unwrap();
        field.set_caption(next);

        assert_eq!(field.value(), Some(value));
        assert_eq!(field.formatted_value(), expected);
        assert_eq!(field.caption(), Some(next));
    }
}

#[test]
fn displayed_text_reenters_cleanly() {
    let mut field = LocaleDateField::new(Resolution::Day);
    field.set_locale("fi-FI").unwrap();
    field.set_value(Some(DateValue::from_ymd(2013, 7, 27).unwrap()));

    let shown = field.formatted_value();
    field.clear();
    field.apply_input(&shown).unwrap();
    assert_eq!(field.formatted_value(), shown);
}
