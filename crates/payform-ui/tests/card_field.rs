use payform_card::{BinMetadataOracle, CardBrand, CountryCode, YearMonth};
use payform_foundation::{SegmentKind, ValidationState};
use payform_testing::{backspace, key_events, shift_tab, tab, EventRecorder, FakeBinOracle};
use payform_ui::prelude::*;
use std::rc::Rc;

const TODAY: YearMonth = YearMonth::new(2026, 10);

fn field_with(config: CardFieldConfig, oracle: Rc<dyn BinMetadataOracle>) -> CardField {
    let field = CardField::new(config, oracle).unwrap();
    field.set_today(TODAY);
    field
}

fn field() -> CardField {
    let field = CardField::with_defaults();
    field.set_today(TODAY);
    field
}

fn type_keys(field: &CardField, text: &str) {
    for event in key_events(text) {
        assert!(field.handle_key_event(&event), "{event}");
    }
}

fn focus_changes(events: &[CardFieldEvent]) -> Vec<(Option<SegmentKind>, Option<SegmentKind>)> {
    events
        .iter()
        .filter_map(|event| match event {
            CardFieldEvent::FocusChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

#[test]
fn visa_number_hands_focus_to_expiry_exactly_once() {
    let field = field();
    field.request_focus(SegmentKind::Number);
    let recorder = EventRecorder::new();
    field.add_listener(recorder.sink());

    for (index, event) in key_events("4242424242424242").iter().enumerate() {
        field.handle_key_event(event);
        let expected = if index < 15 {
            Some(SegmentKind::Number)
        } else {
            Some(SegmentKind::Expiry)
        };
        assert_eq!(field.focused(), expected, "after digit {}", index + 1);
    }
    assert_eq!(
        focus_changes(&recorder.events()),
        vec![(Some(SegmentKind::Number), Some(SegmentKind::Expiry))]
    );
    assert_eq!(field.formatted_value(SegmentKind::Number), "4242 4242 4242 4242");
}

#[test]
fn events_arrive_in_commit_order() {
    let field = field();
    field.set_available_width(400.0);
    field.request_focus(SegmentKind::Number);
    field.insert_text("424242424242424");
    let recorder = EventRecorder::new();
    field.add_listener(recorder.sink());

    field.insert_text("2");
    let events = recorder.events();
    let position = |predicate: &dyn Fn(&CardFieldEvent) -> bool| {
        events.iter().position(|event| predicate(event)).unwrap()
    };
    let validation = position(&|event: &CardFieldEvent| {
        matches!(
            event,
            CardFieldEvent::ValidationChanged {
                segment: SegmentKind::Number,
                state: ValidationState::Valid
            }
        )
    });
    let focus = position(&|event: &CardFieldEvent| matches!(event, CardFieldEvent::FocusChanged { .. }));
    let did_change = position(&|event: &CardFieldEvent| *event == CardFieldEvent::DidChange);
    assert!(validation < focus);
    assert!(focus < did_change);
    assert_eq!(recorder.count(|event| *event == CardFieldEvent::DidChange), 1);
}

#[test]
fn backspace_at_empty_cvc_edits_expiry() {
    let field = field();
    field.set_value(SegmentKind::Expiry, "1225");
    field.request_focus(SegmentKind::Cvc);

    assert!(field.handle_key_event(&backspace()));
    assert_eq!(field.focused(), Some(SegmentKind::Expiry));
    assert_eq!(field.raw_value(SegmentKind::Expiry), "122");
    assert_eq!(field.formatted_value(SegmentKind::Expiry), "12/2");
}

#[test]
fn cvc_advance_waits_for_configured_maximum() {
    let field = field_with(
        CardFieldConfig::default().with_cvc_max_length(4),
        Rc::new(payform_card::StaticBinOracle::default()),
    );
    field.set_value(SegmentKind::Number, "4242424242424242");
    field.request_focus(SegmentKind::Cvc);

    type_keys(&field, "123");
    assert_eq!(field.focused(), Some(SegmentKind::Cvc));
    assert!(field.validation(SegmentKind::Cvc).is_valid());
    type_keys(&field, "4");
    assert_eq!(field.focused(), Some(SegmentKind::PostalCode));
}

#[test]
fn complete_field_reports_once_and_stays_complete_for_hidden_postal() {
    let ireland: CountryCode = "IE".parse().unwrap();
    let field = field();
    field.set_country(ireland);
    assert!(!field.postal_code_visible());

    let recorder = EventRecorder::new();
    field.add_listener(recorder.sink());
    field.set_value(SegmentKind::Number, "4242424242424242");
    field.set_value(SegmentKind::Expiry, "1230");
    field.set_value(SegmentKind::Cvc, "123");
    assert!(field.is_complete());

    field.set_value(SegmentKind::PostalCode, "D02 X285");
    assert!(field.is_complete());
    assert_eq!(
        recorder.count(|event| *event == CardFieldEvent::BecameComplete),
        1
    );
}

#[test]
fn late_metadata_releases_number() {
    let oracle = Rc::new(FakeBinOracle::new());
    let field = field_with(CardFieldConfig::default(), oracle.clone());
    field.request_focus(SegmentKind::Number);

    field.insert_text("4242424242424242");
    assert_eq!(field.validation(SegmentKind::Number), ValidationState::Incomplete);
    assert_eq!(oracle.pending_prefixes(), vec!["424242".to_string()]);

    assert_eq!(oracle.resolve("424242", CardBrand::Visa), 1);
    assert_eq!(field.validation(SegmentKind::Number), ValidationState::Valid);
    assert_eq!(field.focused(), Some(SegmentKind::Expiry));
}

#[test]
fn stale_metadata_is_discarded() {
    let oracle = Rc::new(FakeBinOracle::new());
    let field = field_with(CardFieldConfig::default(), oracle.clone());
    field.request_focus(SegmentKind::Number);
    let recorder = EventRecorder::new();
    field.add_listener(recorder.sink());

    field.insert_text("424242424242424");
    field.insert_text("2");
    assert_eq!(oracle.pending_count(), 2);

    assert_eq!(oracle.resolve("424242", CardBrand::Visa), 2);
    assert_eq!(field.validation(SegmentKind::Number), ValidationState::Valid);
    assert_eq!(
        focus_changes(&recorder.events()),
        vec![(Some(SegmentKind::Number), Some(SegmentKind::Expiry))]
    );
}

#[test]
fn failed_metadata_lookup_is_swallowed() {
    let oracle = Rc::new(FakeBinOracle::new());
    let field = field_with(CardFieldConfig::default(), oracle.clone());
    field.request_focus(SegmentKind::Number);
    field.insert_text("4242424242424242");

    oracle.fail("424242");
    assert_eq!(field.validation(SegmentKind::Number), ValidationState::Valid);
    assert_eq!(field.focused(), Some(SegmentKind::Expiry));
}

#[test]
fn dropped_field_ignores_resolution() {
    let oracle = Rc::new(FakeBinOracle::new());
    {
        let field = field_with(CardFieldConfig::default(), oracle.clone());
        field.request_focus(SegmentKind::Number);
        field.insert_text("4242424242424242");
    }
    assert_eq!(oracle.resolve("424242", CardBrand::Visa), 1);
}

#[test]
fn narrow_field_hides_far_segments_first() {
    let field = field();
    field.request_focus(SegmentKind::Number);
    field.set_available_width(230.0);

    let layout = field.layout();
    assert_eq!(layout.visibility(SegmentKind::Number), Some(LayoutVisibility::Visible));
    assert_eq!(layout.visibility(SegmentKind::Expiry), Some(LayoutVisibility::Visible));
    assert_eq!(layout.visibility(SegmentKind::Cvc), Some(LayoutVisibility::Hidden));
    assert_eq!(
        layout.visibility(SegmentKind::PostalCode),
        Some(LayoutVisibility::Hidden)
    );
    assert!(!layout.overflowed);
}

#[test]
fn focusing_cvc_compresses_number() {
    let field = field();
    field.request_focus(SegmentKind::Number);
    field.set_available_width(230.0);
    let recorder = EventRecorder::new();
    field.add_listener(recorder.sink());

    field.request_focus(SegmentKind::Cvc);
    let layout = field.layout();
    let number = layout.get(SegmentKind::Number).copied().unwrap();
    assert_eq!(number.visibility, LayoutVisibility::Compressed);
    assert_eq!(number.width, 32.0);
    assert_eq!(number.content_offset, -120.0);
    assert_eq!(layout.visibility(SegmentKind::Cvc), Some(LayoutVisibility::Visible));
    assert!(recorder
        .events()
        .contains(&CardFieldEvent::LayoutChanged(layout)));
}

#[test]
fn country_without_postal_codes_drops_postal_from_layout() {
    let field = field();
    field.set_available_width(400.0);
    assert!(field.layout().get(SegmentKind::PostalCode).is_some());
    field.set_country("HK".parse().unwrap());
    assert!(field.layout().get(SegmentKind::PostalCode).is_none());
}

#[test]
fn us_zip_plus_four_completes_the_field() {
    let field = field();
    field.request_focus(SegmentKind::Number);
    type_keys(&field, "42424242424242421226123");
    assert_eq!(field.focused(), Some(SegmentKind::PostalCode));

    field.insert_text("94107-1234");
    assert_eq!(field.raw_value(SegmentKind::PostalCode), "941071234");
    assert_eq!(field.validation(SegmentKind::PostalCode), ValidationState::Valid);
    assert!(field.is_complete());
}

#[test]
fn diners_number_past_its_range_length_is_not_accepted() {
    let field = field();
    field.set_value(SegmentKind::Number, "3600000000000008");
    assert_eq!(field.raw_value(SegmentKind::Number), "36000000000000");
    assert!(field.validation(SegmentKind::Number).is_invalid());
}

#[test]
fn listeners_may_read_the_field() {
    let field = field();
    field.request_focus(SegmentKind::Number);
    let seen = EventRecorder::new();
    let probe = field.clone();
    let sink = seen.sink();
    field.add_listener(move |event| {
        if *event == CardFieldEvent::DidChange {
            sink(&probe.formatted_value(SegmentKind::Number));
        }
    });

    type_keys(&field, "37828");
    assert_eq!(seen.events().last().map(String::as_str), Some("3782 8"));
}

#[test]
fn removed_listener_stops_receiving() {
    let field = field();
    let recorder = EventRecorder::new();
    let id = field.add_listener(recorder.sink());
    assert!(field.remove_listener(id));
    field.request_focus(SegmentKind::Number);
    field.insert_text("4");
    assert!(recorder.is_empty());
}

#[test]
fn tab_walks_segments_and_releases_at_the_end() {
    let field = field();
    assert!(field.handle_key_event(&tab()));
    assert_eq!(field.focused(), Some(SegmentKind::Number));
    for expected in [SegmentKind::Expiry, SegmentKind::Cvc, SegmentKind::PostalCode] {
        assert!(field.handle_key_event(&tab()));
        assert_eq!(field.focused(), Some(expected));
    }
    assert!(!field.handle_key_event(&tab()));
    assert!(field.handle_key_event(&shift_tab()));
    assert_eq!(field.focused(), Some(SegmentKind::Cvc));
}

#[test]
fn unfocused_field_ignores_typing() {
    let field = field();
    assert!(!field.handle_key_event(&key_events("4")[0]));
    assert!(!field.handle_key_event(&backspace()));
    assert_eq!(field.raw_value(SegmentKind::Number), "");
}

#[test]
fn clear_resets_the_field() {
    let field = field();
    field.request_focus(SegmentKind::Number);
    field.insert_text("4242424242424242");
    field.clear();
    assert_eq!(field.focused(), None);
    assert_eq!(field.brand(), CardBrand::Unknown);
    assert_eq!(field.formatted_value(SegmentKind::Number), "");
}

#[test]
fn invalid_cvc_configuration_is_rejected() {
    let result = CardField::new(
        CardFieldConfig::default().with_cvc_max_length(2),
        Rc::new(payform_card::StaticBinOracle::default()),
    );
    assert!(matches!(result, Err(payform_ui::ConfigError::CvcMaxLength(2))));
}
