use super::*;
use crate::card_field::CardFieldConfig;
use payform_card::StaticBinOracle;
use payform_testing::FakeBinOracle;

const TODAY: YearMonth = YearMonth::new(2026, 10);

fn coordinator_with(config: CardFieldConfig) -> FieldCoordinator {
    FieldCoordinator::new(config, Rc::new(StaticBinOracle::default()), TODAY)
}

fn coordinator() -> FieldCoordinator {
    coordinator_with(CardFieldConfig::default())
}

fn ireland() -> CountryCode {
    "IE".parse().unwrap()
}

fn type_digits(coordinator: &mut FieldCoordinator, text: &str) -> Vec<Transition> {
    text.chars()
        .map(|ch| coordinator.insert_text(&ch.to_string()))
        .collect()
}

#[test]
fn visa_number_advances_once_after_sixteenth_digit() {
    let mut coordinator = coordinator();
    coordinator.request_focus(SegmentKind::Number);

    let transitions = type_digits(&mut coordinator, "4242424242424242");
    let advanced: Vec<usize> = transitions
        .iter()
        .enumerate()
        .filter(|(_, transition)| transition.focus_moved())
        .map(|(index, _)| index)
        .collect();
    assert_eq!(advanced, vec![15]);
    assert_eq!(coordinator.focused(), Some(SegmentKind::Expiry));
    assert_eq!(coordinator.brand(), CardBrand::Visa);
}

#[test]
fn backspace_on_empty_segment_retreats_and_deletes() {
    let mut coordinator = coordinator();
    coordinator.set_value(SegmentKind::Expiry, "1225");
    coordinator.request_focus(SegmentKind::Cvc);

    let transition = coordinator.delete_backward();
    assert_eq!(coordinator.focused(), Some(SegmentKind::Expiry));
    assert_eq!(coordinator.raw_value(SegmentKind::Expiry), "122");
    assert!(transition.events.contains(&CardFieldEvent::FocusChanged {
        from: Some(SegmentKind::Cvc),
        to: Some(SegmentKind::Expiry),
    }));
    assert!(transition.value_changed);
}

#[test]
fn backspace_in_first_empty_segment_does_nothing() {
    let mut coordinator = coordinator();
    coordinator.request_focus(SegmentKind::Number);
    assert!(coordinator.delete_backward().is_empty());
    assert_eq!(coordinator.focused(), Some(SegmentKind::Number));
}

#[test]
fn cvc_waits_for_configured_maximum() {
    let mut coordinator = coordinator_with(CardFieldConfig::default().with_cvc_max_length(4));
    coordinator.set_value(SegmentKind::Number, "4242424242424242");
    coordinator.request_focus(SegmentKind::Cvc);

    let transitions = type_digits(&mut coordinator, "123");
    assert!(transitions.iter().all(|transition| !transition.focus_moved()));
    assert_eq!(coordinator.validation(SegmentKind::Cvc), Some(&ValidationState::Valid));

    let fourth = coordinator.insert_text("4");
    assert!(fourth.focus_moved());
    assert_eq!(coordinator.focused(), Some(SegmentKind::PostalCode));
}

#[test]
fn cvc_advances_at_brand_maximum() {
    let mut coordinator = coordinator();
    coordinator.set_value(SegmentKind::Number, "4242424242424242");
    coordinator.request_focus(SegmentKind::Cvc);
    type_digits(&mut coordinator, "123");
    assert_eq!(coordinator.focused(), Some(SegmentKind::PostalCode));
}

#[test]
fn last_participating_segment_keeps_focus_on_completion() {
    let mut coordinator = coordinator_with(CardFieldConfig::default().with_country(ireland()));
    coordinator.set_value(SegmentKind::Number, "4242424242424242");
    coordinator.set_value(SegmentKind::Expiry, "1230");
    coordinator.request_focus(SegmentKind::Cvc);

    let transitions = type_digits(&mut coordinator, "123");
    let last = transitions.last().unwrap();
    assert!(last.became_complete);
    assert!(!last.focus_moved());
    assert_eq!(coordinator.focused(), Some(SegmentKind::Cvc));
    assert!(coordinator.is_complete());
}

#[test]
fn postal_code_is_skipped_where_not_used() {
    let mut coordinator = coordinator_with(CardFieldConfig::default().with_country(ireland()));
    assert_eq!(
        coordinator.participating().collect::<Vec<_>>(),
        SegmentKind::CARD_ORDER[..3].to_vec()
    );
    assert!(coordinator.request_focus(SegmentKind::PostalCode).is_empty());
}

#[test]
fn editing_hidden_postal_code_keeps_field_complete() {
    let mut coordinator = coordinator_with(CardFieldConfig::default().with_country(ireland()));
    coordinator.set_value(SegmentKind::Number, "4242424242424242");
    coordinator.set_value(SegmentKind::Expiry, "1230");
    coordinator.set_value(SegmentKind::Cvc, "123");
    assert!(coordinator.is_complete());

    for raw in ["D02", "", "X"] {
        coordinator.set_value(SegmentKind::PostalCode, raw);
        assert!(coordinator.is_complete(), "postal {raw:?}");
    }
}

#[test]
fn switching_to_postal_country_requires_postal_code() {
    let mut coordinator = coordinator_with(CardFieldConfig::default().with_country(ireland()));
    coordinator.set_value(SegmentKind::Number, "4242424242424242");
    coordinator.set_value(SegmentKind::Expiry, "1230");
    coordinator.set_value(SegmentKind::Cvc, "123");

    let transition = coordinator.set_country(CountryCode::US);
    assert!(transition.value_changed);
    assert!(!coordinator.is_complete());
    assert!(coordinator.is_participating(SegmentKind::PostalCode));

    let transition = coordinator.set_value(SegmentKind::PostalCode, "94107");
    assert!(transition.became_complete);
}

#[test]
fn losing_postal_code_moves_focus_back() {
    let mut coordinator = coordinator();
    coordinator.request_focus(SegmentKind::PostalCode);
    coordinator.set_country(ireland());
    assert_eq!(coordinator.focused(), Some(SegmentKind::Cvc));
}

#[test]
fn number_change_revalidates_cvc() {
    let mut coordinator = coordinator();
    coordinator.set_value(SegmentKind::Cvc, "1234");
    assert_eq!(coordinator.validation(SegmentKind::Cvc), Some(&ValidationState::Valid));

    let transition = coordinator.set_value(SegmentKind::Number, "4242");
    assert!(coordinator
        .validation(SegmentKind::Cvc)
        .is_some_and(ValidationState::is_invalid));
    assert!(transition.events.iter().any(|event| matches!(
        event,
        CardFieldEvent::ValidationChanged {
            segment: SegmentKind::Cvc,
            ..
        }
    )));
}

#[test]
fn pasted_number_is_filtered_and_cut_to_brand_length() {
    let mut coordinator = coordinator();
    coordinator.request_focus(SegmentKind::Number);
    coordinator.insert_text("3782-8224-6310-0051-99");
    assert_eq!(coordinator.raw_value(SegmentKind::Number), "378282246310005");
    assert_eq!(coordinator.formatted_value(SegmentKind::Number), "3782 822463 10005");
    assert_eq!(coordinator.focused(), Some(SegmentKind::Expiry));
}

#[test]
fn pasted_diners_number_is_cut_to_range_length() {
    let mut coordinator = coordinator();
    coordinator.request_focus(SegmentKind::Number);
    coordinator.insert_text("3600 000000 000899");
    assert_eq!(coordinator.raw_value(SegmentKind::Number), "36000000000008");
    assert_eq!(
        coordinator.validation(SegmentKind::Number),
        Some(&ValidationState::Valid)
    );
    assert_eq!(coordinator.formatted_value(SegmentKind::Number), "3600 000000 0008");
    assert_eq!(coordinator.focused(), Some(SegmentKind::Expiry));
}

#[test]
fn zip_plus_four_with_separator_is_stored_as_digits() {
    let mut coordinator = coordinator();
    coordinator.request_focus(SegmentKind::PostalCode);
    coordinator.insert_text("94107-1234");
    assert_eq!(coordinator.raw_value(SegmentKind::PostalCode), "941071234");
    assert_eq!(
        coordinator.validation(SegmentKind::PostalCode),
        Some(&ValidationState::Valid)
    );
    coordinator.insert_text("5");
    assert_eq!(coordinator.raw_value(SegmentKind::PostalCode), "941071234");
}

#[test]
fn freeform_postal_code_keeps_letters_and_spaces() {
    let gb: CountryCode = "GB".parse().unwrap();
    let mut coordinator = coordinator_with(CardFieldConfig::default().with_country(gb));
    coordinator.request_focus(SegmentKind::PostalCode);
    coordinator.insert_text("sw1a 1aa");
    assert_eq!(coordinator.raw_value(SegmentKind::PostalCode), "SW1A 1AA");
    assert_eq!(
        coordinator.validation(SegmentKind::PostalCode),
        Some(&ValidationState::Valid)
    );
}

#[test]
fn single_digit_month_is_padded() {
    let mut coordinator = coordinator();
    coordinator.request_focus(SegmentKind::Expiry);
    coordinator.insert_text("4");
    assert_eq!(coordinator.raw_value(SegmentKind::Expiry), "04");
    assert_eq!(coordinator.formatted_value(SegmentKind::Expiry), "04/");
}

#[test]
fn expired_card_is_invalid_for_injected_month() {
    let mut coordinator = coordinator();
    coordinator.set_value(SegmentKind::Expiry, "1126");
    assert_eq!(coordinator.validation(SegmentKind::Expiry), Some(&ValidationState::Valid));
    coordinator.set_today(YearMonth::new(2026, 12));
    assert!(coordinator
        .validation(SegmentKind::Expiry)
        .is_some_and(ValidationState::is_invalid));
}

#[test]
fn pending_metadata_holds_number_incomplete() {
    let oracle = Rc::new(FakeBinOracle::new());
    let mut coordinator = FieldCoordinator::new(CardFieldConfig::default(), oracle.clone(), TODAY);
    coordinator.request_focus(SegmentKind::Number);

    let transition = coordinator.insert_text("4242424242424242");
    assert_eq!(
        transition.lookup,
        Some(PendingLookup {
            prefix: "424242".to_string(),
            number: "4242424242424242".to_string(),
        })
    );
    assert_eq!(
        coordinator.validation(SegmentKind::Number),
        Some(&ValidationState::Incomplete)
    );
    assert_eq!(coordinator.focused(), Some(SegmentKind::Number));

    oracle.resolve("424242", CardBrand::Visa);
    let transition = coordinator
        .apply_resolution(BinResolution::loaded("424242", CardBrand::Visa), "4242424242424242");
    assert_eq!(coordinator.validation(SegmentKind::Number), Some(&ValidationState::Valid));
    assert!(transition.focus_moved());
    assert_eq!(coordinator.focused(), Some(SegmentKind::Expiry));
}

#[test]
fn stale_resolution_is_discarded() {
    let oracle = Rc::new(FakeBinOracle::new());
    let mut coordinator = FieldCoordinator::new(CardFieldConfig::default(), oracle.clone(), TODAY);
    coordinator.set_value(SegmentKind::Number, "4242424242424242");
    oracle.resolve("424242", CardBrand::Visa);

    let transition = coordinator
        .apply_resolution(BinResolution::loaded("424242", CardBrand::Visa), "424242424242");
    assert!(transition.is_empty());
    assert_eq!(
        coordinator.validation(SegmentKind::Number),
        Some(&ValidationState::Incomplete)
    );
}

#[test]
fn failed_lookup_validates_best_effort() {
    let oracle = Rc::new(FakeBinOracle::new());
    let mut coordinator = FieldCoordinator::new(CardFieldConfig::default(), oracle, TODAY);
    coordinator.request_focus(SegmentKind::Number);
    coordinator.insert_text("4242424242424242");

    coordinator.apply_resolution(BinResolution::failed("424242"), "4242424242424242");
    assert_eq!(coordinator.validation(SegmentKind::Number), Some(&ValidationState::Valid));
    assert_eq!(coordinator.focused(), Some(SegmentKind::Expiry));
}

#[test]
fn late_resolution_does_not_steal_focus() {
    let oracle = Rc::new(FakeBinOracle::new());
    let mut coordinator = FieldCoordinator::new(CardFieldConfig::default(), oracle, TODAY);
    coordinator.request_focus(SegmentKind::Number);
    coordinator.insert_text("4242424242424242");
    coordinator.request_focus(SegmentKind::PostalCode);

    coordinator.apply_resolution(BinResolution::failed("424242"), "4242424242424242");
    assert_eq!(coordinator.focused(), Some(SegmentKind::PostalCode));
}

#[test]
fn tab_order_follows_participating_segments() {
    let mut coordinator = coordinator();
    coordinator.focus_next();
    assert_eq!(coordinator.focused(), Some(SegmentKind::Number));
    coordinator.request_focus(SegmentKind::PostalCode);
    assert!(coordinator.focus_next().is_empty());
    coordinator.focus_previous();
    assert_eq!(coordinator.focused(), Some(SegmentKind::Cvc));
}

#[test]
fn clear_resets_values_and_focus() {
    let mut coordinator = coordinator();
    coordinator.request_focus(SegmentKind::Number);
    coordinator.insert_text("4242");
    let transition = coordinator.clear();
    assert!(transition.value_changed);
    assert_eq!(coordinator.focused(), None);
    assert_eq!(coordinator.raw_value(SegmentKind::Number), "");
    assert_eq!(coordinator.brand(), CardBrand::Unknown);
}

#[test]
fn only_one_segment_is_marked_focused() {
    let mut coordinator = coordinator();
    coordinator.request_focus(SegmentKind::Number);
    coordinator.request_focus(SegmentKind::Cvc);
    let focused: Vec<SegmentKind> = coordinator
        .segments()
        .iter()
        .filter(|segment| segment.is_focused())
        .map(Segment::kind)
        .collect();
    assert_eq!(focused, vec![SegmentKind::Cvc]);
}
