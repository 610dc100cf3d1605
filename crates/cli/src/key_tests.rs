#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[rstest]
#[case("a", Key::Char('a'))]
#[case("7", Key::Char('7'))]
#[case(" ", Key::Char(' '))]
#[case("Enter", Key::Enter)]
#[case("RETURN", Key::Enter)]
#[case("Shift", Key::Other("Shift".to_string()))]
#[case("", Key::Other(String::new()))]
fn test_parse(#[case] name: &str, #[case] expected: Key) {
    assert_eq!(Key::parse(name), expected);
}

#[test]
fn test_focus_text_entry() {
    assert!(!FocusTarget::Body.is_text_entry());
    assert!(FocusTarget::TextInput.is_text_entry());
    assert!(FocusTarget::Editable.is_text_entry());
}

#[test]
fn test_focus_deserializes_snake_case() {
    let focus: FocusTarget = serde_json::from_str(r#""text_input""#).unwrap();
    assert_eq!(focus, FocusTarget::TextInput);
}

#[test]
fn test_event_builders() {
    let event = KeyEvent::char('x', 40).with_focus(FocusTarget::Editable);
    assert_eq!(event.key, Key::Char('x'));
    assert_eq!(event.at_ms, 40);
    assert_eq!(event.focus, FocusTarget::Editable);
    assert_eq!(KeyEvent::enter(5).focus, FocusTarget::Body);
}
