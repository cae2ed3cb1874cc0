use super::*;

fn chord(s: &str) -> KeyChord {
    s.parse().unwrap()
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parses_modifiers_and_enter() {
    let parsed = chord("Ctrl+Enter");
    assert!(parsed.ctrl && !parsed.meta && !parsed.shift);
    assert_eq!(parsed.key, Key::Enter);
    assert!(chord("cmd+enter").meta);
    assert!(chord("shift+return").shift);
}

#[test]
fn parses_single_character() {
    assert_eq!(chord("a"), KeyChord::plain(Key::Char('a')));
}

#[test]
fn rejects_unknown_tokens() {
    assert_eq!("hyper+enter".parse::<KeyChord>(), Err(KeyParseError::UnknownToken("hyper".into())));
    assert_eq!("ctrl+pagedown".parse::<KeyChord>(), Err(KeyParseError::UnknownToken("pagedown".into())));
    assert_eq!("".parse::<KeyChord>(), Err(KeyParseError::Empty));
    assert_eq!("ctrl+".parse::<KeyChord>(), Err(KeyParseError::Empty));
}

#[test]
fn display_round_trips_through_parse() {
    let original = chord("ctrl+shift+enter");
    assert_eq!(original.to_string(), "ctrl+shift+enter");
    assert_eq!(chord(&original.to_string()), original);
}

#[test]
fn parses_targets() {
    assert_eq!("composer".parse::<InputTarget>(), Ok(InputTarget::Composer));
    assert_eq!("query".parse::<InputTarget>(), Ok(InputTarget::Query));
    assert!("sidebar".parse::<InputTarget>().is_err());
}

// =============================================================
// Resolution
// =============================================================

#[test]
fn composer_sends_only_with_command_modifier() {
    assert_eq!(resolve(InputTarget::Composer, chord("ctrl+enter")), Some(ShortcutAction::SendMessage));
    assert_eq!(resolve(InputTarget::Composer, chord("cmd+enter")), Some(ShortcutAction::SendMessage));
    assert_eq!(resolve(InputTarget::Composer, chord("enter")), None);
    assert_eq!(resolve(InputTarget::Composer, chord("shift+enter")), None);
}

#[test]
fn query_submits_on_enter_without_shift() {
    assert_eq!(resolve(InputTarget::Query, chord("enter")), Some(ShortcutAction::SubmitQuery));
    assert_eq!(resolve(InputTarget::Query, chord("ctrl+enter")), Some(ShortcutAction::SubmitQuery));
    assert_eq!(resolve(InputTarget::Query, chord("shift+enter")), None);
}

#[test]
fn non_enter_keys_are_ignored() {
    assert_eq!(resolve(InputTarget::Query, chord("ctrl+a")), None);
    assert_eq!(resolve(InputTarget::Composer, chord("x")), None);
}
