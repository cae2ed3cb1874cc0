use super::*;

#[test]
fn default_draft_is_empty_and_unsendable() {
    let composer = Composer::default();
    assert_eq!(composer.draft(), "");
    assert!(!composer.can_send());
}

#[test]
fn whitespace_draft_is_not_sendable() {
    let mut composer = Composer::default();
    composer.set_draft("   \n\t");
    assert!(!composer.can_send());
    assert_eq!(composer.take_outgoing(), None);
    assert_eq!(composer.draft(), "   \n\t");
}

#[test]
fn take_outgoing_returns_text_and_clears() {
    let mut composer = Composer::default();
    composer.set_draft("  On it!  ");
    assert!(composer.can_send());
    assert_eq!(composer.take_outgoing().as_deref(), Some("  On it!  "));
    assert_eq!(composer.draft(), "");
    assert!(!composer.can_send());
}
