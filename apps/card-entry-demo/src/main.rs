//! Drives a card field and a one-time code field through a scripted session
//! and prints every event the host would receive.
//!
//! Usage: `card-entry-demo [card-number] [country] [width]`
//! Defaults: `4242424242424242 US 260`.

use anyhow::{bail, Context, Result};
use payform_card::CountryCode;
use payform_foundation::{KeyCode, KeyEvent, SegmentKind};
use payform_ui::prelude::*;
use payform_ui_layout::SegmentLayout;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args = std::env::args().skip(1);
    let number = args.next().unwrap_or_else(|| "4242424242424242".to_string());
    let country: CountryCode = args
        .next()
        .as_deref()
        .unwrap_or("US")
        .parse()
        .context("country must be a two-letter code")?;
    let width: f32 = match args.next() {
        Some(width) => width.parse().context("width must be a number")?,
        None => 260.0,
    };

    log::info!("card entry session: country {country}, width {width}");
    println!("=== Payform card entry ===");
    let field = CardField::new(
        CardFieldConfig::default().with_country(country),
        std::rc::Rc::new(payform_card::StaticBinOracle::default()),
    )?;
    field.add_listener(print_card_event);
    field.set_available_width(width);
    field.request_focus(SegmentKind::Number);

    type_text(&field, &number);
    type_text(&field, "1230");
    type_text(&field, "123");
    if field.postal_code_visible() {
        type_text(&field, "94107");
    }

    println!("\n-- backspace twice from the current segment --");
    field.handle_key_event(&KeyEvent::key(KeyCode::Backspace));
    field.handle_key_event(&KeyEvent::key(KeyCode::Backspace));

    println!("\n-- summary --");
    for kind in SegmentKind::CARD_ORDER {
        println!(
            "{:>12}: {:<20} {:?}",
            kind.to_string(),
            field.formatted_value(kind),
            field.validation(kind)
        );
    }
    println!("brand: {}, complete: {}", field.brand(), field.is_complete());
    if field.is_complete() {
        log::info!("card field complete ({})", field.brand());
    } else {
        log::warn!("card field incomplete after scripted session");
    }

    println!("\n=== One-time code ===");
    let mut code = OneTimeCodeField::default();
    code.add_listener(|event| println!("  otc event: {event:?}"));
    code.handle_key_event(&KeyEvent::text("12345678"));
    println!("value {} (slots {:?})", code.value(), code.slot_states());
    log::info!(
        "one-time code {} of {} slots filled",
        code.value().len(),
        code.capacity()
    );
    if !code.is_complete() {
        bail!("one-time code should be complete after pasting eight digits");
    }
    Ok(())
}

fn type_text(field: &CardField, text: &str) {
    let target = field.focused();
    log::debug!("typing {} characters into {target:?}", text.chars().count());
    println!("\n-- typing {text:?} into {target:?} --");
    for ch in text.chars() {
        field.handle_key_event(&KeyEvent::text(ch.to_string()));
    }
}

fn print_card_event(event: &CardFieldEvent) {
    match event {
        CardFieldEvent::LayoutChanged(layout) => {
            let segments: Vec<String> = layout
                .segments
                .iter()
                .map(|(kind, segment)| describe_segment(*kind, segment))
                .collect();
            println!(
                "  layout: {} (padding {:.1}{})",
                segments.join(", "),
                layout.padding,
                if layout.overflowed { ", overflowed" } else { "" }
            );
        }
        other => println!("  event: {other:?}"),
    }
}

fn describe_segment(kind: SegmentKind, segment: &SegmentLayout) -> String {
    match segment.visibility {
        LayoutVisibility::Hidden => format!("{kind} hidden"),
        LayoutVisibility::Compressed => format!(
            "{kind} compressed @{:.0} w{:.0} shift{:.0}",
            segment.x, segment.width, segment.content_offset
        ),
        LayoutVisibility::Visible => format!("{kind} @{:.0} w{:.0}", segment.x, segment.width),
    }
}
