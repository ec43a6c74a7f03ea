use datefield_widget::{DateValue, FieldSnapshot, LocaleDateField, Resolution, SnapshotError};
use pretty_assertions::assert_eq;

#[test]
fn snapshot_round_trips_through_json() {
    let mut field = LocaleDateField::new(Resolution::Minute);
    field.set_locale("fi-FI").unwrap();
    field.set_date_format(Some("dd.MM.yyyy HH:mm")).unwrap();
    field.set_caption("Meeting start");
    field.set_width("200px");
    field.set_lenient(true);
    field
        .set_range(
            Some(DateValue::from_ymd(2013, 1, 1).unwrap()),
            Some(DateValue::from_ymd(2013, 12, 31).unwrap()),
        )
        .unwrap();
    field.set_value(Some(
        DateValue::from_ymd_hms(2013, 7, 27, 14, 30, 0).unwrap(),
    ));

    let json = serde_json::to_string(&field.snapshot()).unwrap();
    let decoded: FieldSnapshot = serde_json::from_str(&json).unwrap();
    let restored = LocaleDateField::from_snapshot(&decoded).unwrap();

    assert_eq!(restored.snapshot(), field.snapshot());
    assert_eq!(restored.formatted_value(), field.formatted_value());
    assert_eq!(restored.formatted_value(), "27.07.2013 14:30");
}

#[test]
fn empty_parts_are_left_off_the_wire() {
    let json = serde_json::to_value(LocaleDateField::new(Resolution::Day).snapshot()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "resolution": "day",
            "locale": "en-US",
            "lenient": false,
        })
    );
}

#[test]
fn missing_fields_fall_back_to_field_defaults() {
    let snapshot: FieldSnapshot = serde_json::from_str(r#"{"locale":"fi-FI"}"#).unwrap();
    let field = LocaleDateField::from_snapshot(&snapshot).unwrap();
    assert_eq!(field.locale_id(), "fi-FI");
    assert_eq!(field.resolution(), Resolution::Day);
    assert!(field.is_empty());
    assert!(!field.lenient());
}

#[test]
fn bad_snapshots_name_the_failing_part() {
    let base: FieldSnapshot = serde_json::from_str("{}").unwrap();

    let bad_locale = FieldSnapshot {
        locale: "xx-XX".into(),
        ..base.clone()
    };
    assert!(matches!(
        LocaleDateField::from_snapshot(&bad_locale),
        Err(SnapshotError::Locale(_))
    ));

    let bad_pattern = FieldSnapshot {
        format_pattern: Some("dd/QQ/yyyy".into()),
        ..base.clone()
    };
    assert!(matches!(
        LocaleDateField::from_snapshot(&bad_pattern),
        Err(SnapshotError::Pattern(_))
    ));

    let inverted = FieldSnapshot {
        range_start: Some(DateValue::from_ymd(2014, 3, 20).unwrap()),
        range_end: Some(DateValue::from_ymd(2014, 3, 10).unwrap()),
        ..base
    };
    assert!(matches!(
        LocaleDateField::from_snapshot(&inverted),
        Err(SnapshotError::Range(_))
    ));
}

#[test]
fn listeners_never_travel_with_snapshots() {
    let mut field = LocaleDateField::new(Resolution::Day);
    field.on_value_change(|_| {});
    assert_eq!(field.listener_count(), 1);

    let restored = LocaleDateField::from_snapshot(&field.snapshot()).unwrap();
    assert_eq!(restored.listener_count(), 0);
}
