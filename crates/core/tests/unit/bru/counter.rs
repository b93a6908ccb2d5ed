//! Saturating Counter Tests.

use bpsim_core::Outcome;
use bpsim_core::bru::counter::SaturatingCounter;
use rstest::rstest;

use SaturatingCounter::{StrongNotTaken, StrongTaken, WeakNotTaken, WeakTaken};

#[rstest]
fn ten_taken_bumps_saturate(
    #[values(StrongNotTaken, WeakNotTaken, WeakTaken, StrongTaken)] start: SaturatingCounter,
) {
    let mut state = start;
    for _ in 0..10 {
        state = state.bump(Outcome::Taken);
    }
    assert_eq!(state, StrongTaken);
    assert_eq!(state.bump(Outcome::Taken), StrongTaken, "must clamp, not wrap");
}

#[rstest]
fn ten_not_taken_bumps_saturate(
    #[values(StrongNotTaken, WeakNotTaken, WeakTaken, StrongTaken)] start: SaturatingCounter,
) {
    let mut state = start;
    for _ in 0..10 {
        state = state.bump(Outcome::NotTaken);
    }
    assert_eq!(state, StrongNotTaken);
    assert_eq!(state.bump(Outcome::NotTaken), StrongNotTaken, "must clamp, not wrap");
}

#[test]
fn bump_moves_one_step() {
    for pair in SaturatingCounter::ALL.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        assert_eq!(lo.bump(Outcome::Taken), hi);
        assert_eq!(hi.bump(Outcome::NotTaken), lo);
    }
}

#[rstest]
#[case(StrongNotTaken, Outcome::NotTaken)]
#[case(WeakNotTaken, Outcome::NotTaken)]
#[case(WeakTaken, Outcome::Taken)]
#[case(StrongTaken, Outcome::Taken)]
fn read_direction(#[case] state: SaturatingCounter, #[case] expected: Outcome) {
    assert_eq!(state.read(), expected);
}

#[test]
fn ordinal_values() {
    assert_eq!(StrongNotTaken.value(), 0);
    assert_eq!(WeakNotTaken.value(), 1);
    assert_eq!(WeakTaken.value(), 2);
    assert_eq!(StrongTaken.value(), 3);
    assert!(StrongNotTaken < WeakNotTaken && WeakNotTaken < WeakTaken && WeakTaken < StrongTaken);
}

#[test]
fn from_value_saturates() {
    for state in SaturatingCounter::ALL {
        assert_eq!(SaturatingCounter::from_value(state.value()), state);
    }
    assert_eq!(SaturatingCounter::from_value(200), StrongTaken);
}

#[test]
fn strength() {
    assert!(StrongNotTaken.is_strong());
    assert!(StrongTaken.is_strong());
    assert!(!WeakNotTaken.is_strong());
    assert!(!WeakTaken.is_strong());
}
