//! Tests for reply classification and hint extraction.

use danetka_core::classifier::TRIGGERS;
use danetka_core::{Outcome, classify, extract_hint};
use proptest::prelude::*;
use strum::IntoEnumIterator;

#[test]
fn test_reveal_beats_yes() {
    assert_eq!(classify("the solution is 42, yes it is"), Outcome::RevealSolution);
}

#[test]
fn test_case_and_punctuation_insensitive() {
    assert_eq!(classify("YES!!"), Outcome::Yes);
    assert_eq!(classify("yes"), Outcome::Yes);
    assert_eq!(classify("YES!!"), classify("yes"));
    assert_eq!(classify("  No.  "), Outcome::No);
    assert_eq!(classify("You WON! Game over."), Outcome::Win);
    assert_eq!(classify("The solution is: a shadow."), Outcome::RevealSolution);
}

#[test]
fn test_no_match_is_invalid() {
    assert_eq!(classify("maybe"), Outcome::Invalid);
    assert_eq!(classify("Please ask only questions I can answer"), Outcome::Invalid);
}

#[test]
fn test_empty_is_invalid() {
    assert_eq!(classify(""), Outcome::Invalid);
    assert_eq!(classify("   \n\t"), Outcome::Invalid);
    assert_eq!(classify("?!..."), Outcome::Invalid);
}

#[test]
fn test_yes_and_no_resolves_to_yes() {
    assert_eq!(classify("No... well, yes."), Outcome::Yes);
}

#[test]
fn test_punctuation_inside_phrase_is_ignored() {
    // "you-won" loses its hyphen and no longer contains "you won".
    assert_eq!(classify("you-won"), Outcome::Invalid);
    assert_eq!(classify("y.e.s"), Outcome::Yes);
}

#[test]
fn test_every_trigger_maps_to_its_outcome() {
    for (phrase, outcome) in TRIGGERS {
        assert_eq!(classify(phrase), *outcome, "phrase {:?}", phrase);
        assert_eq!(classify(&phrase.to_uppercase()), *outcome);
    }
}

#[test]
fn test_outcome_display_is_snake_case() {
    let names: Vec<String> = Outcome::iter().map(|o| o.to_string()).collect();
    assert_eq!(names, ["yes", "no", "win", "reveal_solution", "invalid"]);
}

#[test]
fn test_extract_hint() {
    assert_eq!(
        extract_hint("No.\nHint: think about the weather."),
        Some("think about the weather.".to_string())
    );
    assert_eq!(extract_hint("  hint:   water  "), Some("water".to_string()));
    assert_eq!(extract_hint("Yes."), None);
    assert_eq!(extract_hint("No.\nHint:   "), None);
    assert_eq!(extract_hint("The hint: is not at line start"), None);
}

proptest! {
    #[test]
    fn prop_classify_is_total_and_idempotent(text in any::<String>()) {
        let first = classify(&text);
        let second = classify(&text);
        prop_assert_eq!(first, second);
        prop_assert!(Outcome::iter().any(|o| o == first));
    }

    #[test]
    fn prop_classify_ignores_case_and_trailing_punctuation(text in "[a-zA-Z ]{0,40}", tail in "[!?.,;]{0,5}") {
        let decorated = format!("  {}{}  ", text.to_uppercase(), tail);
        prop_assert_eq!(classify(&decorated), classify(&text.to_lowercase()));
    }

    #[test]
    fn prop_reveal_phrase_always_wins(prefix in "[a-z ]{0,20}", suffix in "[a-z ]{0,20}") {
        let reply = format!("{} the solution is {}", prefix, suffix);
        prop_assert_eq!(classify(&reply), Outcome::RevealSolution);
    }
}
