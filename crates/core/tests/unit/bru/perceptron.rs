//! Perceptron Predictor Tests.
//!
//! Checks the dot-product output, the threshold rule that skips confident
//! correct predictions, the ±1 reinforcement of each weight, saturation at
//! the weight range, and slot aliasing through the address hash.

use bpsim_core::Outcome::{self, NotTaken, Taken};
use bpsim_core::bru::BranchPredictor;
use bpsim_core::bru::perceptron::{HASH_MULTIPLIER, PerceptronPredictor, training_threshold};
use bpsim_core::config::PerceptronConfig;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

/// H = 4, 8 slots, 4-bit weights in [-8, 7], θ = 21.
fn small() -> PerceptronPredictor {
    PerceptronPredictor::new(&PerceptronConfig {
        history_length: 4,
        slots: 8,
        weight_bits: 4,
    })
}

fn step(bp: &mut PerceptronPredictor, pc: u32, outcome: Outcome) -> Outcome {
    let prediction = bp.predict(pc);
    bp.train(pc, outcome);
    prediction
}

#[rstest]
#[case(4, 21)]
#[case(8, 29)]
#[case(31, 73)]
#[case(62, 133)]
fn threshold_formula(#[case] history_length: u32, #[case] theta: i32) {
    assert_eq!(training_threshold(history_length), theta);
}

#[test]
fn geometry() {
    let bp = small();
    assert_eq!(bp.threshold(), 21);
    assert_eq!(bp.weight_range(), (-8, 7));
    assert_eq!(bp.slots(), 8);
    assert_eq!(bp.weights(3), &[0, 0, 0, 0, 0]);
    assert_eq!(bp.storage_bits(), 8 * 5 * 4 + 4);
}

#[test]
fn initial_prediction_taken() {
    let mut bp = small();
    assert_eq!(bp.predict(0x1000), Taken, "all weights zero, output 0 >= 0");
    let scratch = bp.scratch();
    assert_eq!(scratch.output, 0);
    assert!(scratch.needs_train);
}

#[test]
fn slot_hash() {
    let bp = small();
    assert_eq!(bp.slot(0), 0);
    assert_eq!(bp.slot(1), (HASH_MULTIPLIER % 8) as usize);
    assert_eq!(bp.slot(u32::MAX), ((u64::from(u32::MAX) * HASH_MULTIPLIER) % 8) as usize);
}

proptest! {
    /// Addresses congruent modulo the slot count hash to the same perceptron.
    #[test]
    fn congruent_addresses_alias(pc in 0u32..u32::MAX - 8) {
        let bp = small();
        prop_assert_eq!(bp.slot(pc), bp.slot(pc + 8));
        prop_assert!(bp.slot(pc) < 8);
    }
}

#[test]
fn aliased_addresses_share_weights() {
    let mut bp = small();
    let _ = step(&mut bp, 5, NotTaken);
    let slot = bp.slot(13);
    assert_eq!(slot, bp.slot(5));
    assert_ne!(bp.weights(slot), &[0, 0, 0, 0, 0]);
    assert!(bp.output(slot) < 0, "13 sees the not-taken training done through 5");
}

#[test]
fn output_is_signed_dot_product() {
    let mut bp = small();
    // History (newest first): T, T, N, T.
    for outcome in [Taken, NotTaken, Taken, Taken] {
        let _ = step(&mut bp, 1, outcome);
    }
    assert_eq!(bp.history().value(), 0b1011);

    // One misprediction on pc 0 leaves weights [bias -1, -1, -1, +1, -1].
    let _ = step(&mut bp, 0, NotTaken);
    assert_eq!(bp.weights(0), &[-1, -1, -1, 1, -1]);
    // History is now N, T, T, N: out = -1 + 1 + (-1) + 1 + 1 = 1.
    assert_eq!(bp.history().value(), 0b0110);
    assert_eq!(bp.output(0), 1);
    assert_eq!(bp.predict(0), Taken);
}

#[test]
fn reinforces_each_weight_by_one() {
    let mut bp = small();
    for outcome in [Taken, NotTaken, Taken, Taken] {
        let _ = step(&mut bp, 1, outcome);
    }
    let history = bp.history().value();
    let before = bp.weights(0).to_vec();

    assert_eq!(bp.predict(0), Taken);
    assert!(bp.scratch().needs_train);
    bp.train(0, NotTaken);

    let after = bp.weights(0);
    assert_eq!(i32::from(after[0]) - i32::from(before[0]), -1, "bias follows the outcome");
    for age in 0..4 {
        let bit = Outcome::from_bit(history >> age);
        let delta = i32::from(after[age + 1]) - i32::from(before[age + 1]);
        let expected = if bit == NotTaken { 1 } else { -1 };
        assert_eq!(delta, expected, "weight for history bit {age}");
    }
}

#[test]
fn trains_on_low_confidence_correct_prediction() {
    let mut bp = small();
    assert_eq!(bp.predict(0), Taken);
    assert!(bp.scratch().needs_train);
    bp.train(0, Taken);
    // History was all not-taken, so every history weight disagreed with the outcome.
    assert_eq!(bp.weights(0), &[1, -1, -1, -1, -1]);
}

#[test]
fn confident_correct_prediction_is_not_trained() {
    let mut bp = small();
    for _ in 0..40 {
        let _ = step(&mut bp, 0, Taken);
    }

    let before = bp.weights(0).to_vec();
    assert_eq!(bp.predict(0), Taken);
    let scratch = bp.scratch();
    assert!(scratch.output >= bp.threshold(), "output {} not confident", scratch.output);
    assert!(!scratch.needs_train);

    bp.train(0, Taken);
    assert_eq!(bp.weights(0), before.as_slice());
    assert_eq!(bp.history().value(), 0b1111, "history still advances");
}

#[test]
fn confident_misprediction_is_trained() {
    let mut bp = small();
    for _ in 0..40 {
        let _ = step(&mut bp, 0, Taken);
    }
    let before = bp.weights(0).to_vec();
    assert_eq!(bp.predict(0), Taken);
    assert!(!bp.scratch().needs_train);
    bp.train(0, NotTaken);
    assert_ne!(bp.weights(0), before.as_slice());
    assert_eq!(i32::from(bp.weights(0)[0]), i32::from(before[0]) - 1);
}

#[test]
fn weights_saturate() {
    // 2-bit weights: range [-2, 1]; θ = 21 exceeds any reachable output, so every branch trains.
    let mut bp = PerceptronPredictor::new(&PerceptronConfig {
        history_length: 4,
        slots: 4,
        weight_bits: 2,
    });
    assert_eq!(bp.weight_range(), (-2, 1));
    for _ in 0..20 {
        let _ = step(&mut bp, 0, NotTaken);
    }
    assert_eq!(bp.weights(0), &[-2, 1, 1, 1, 1]);
}

#[test]
fn learns_taken_then_not_taken() {
    let mut bp = PerceptronPredictor::new(&PerceptronConfig {
        history_length: 8,
        slots: 64,
        weight_bits: 8,
    });
    for _ in 0..50 {
        let _ = step(&mut bp, 0x1000, Taken);
    }
    assert_eq!(bp.predict(0x1000), Taken);
    bp.train(0x1000, Taken);

    for _ in 0..100 {
        let _ = step(&mut bp, 0x1000, NotTaken);
    }
    assert_eq!(bp.predict(0x1000), NotTaken);
}

#[test]
fn learns_correlation_with_other_branch() {
    // Branch B always repeats the outcome of the pseudo-random branch A just before it.
    let mut bp = PerceptronPredictor::new(&PerceptronConfig::default());
    let (a, b) = (0x400, 0x404);
    assert_ne!(bp.slot(a), bp.slot(b));

    let mut seed: u32 = 0x2545_F491;
    let mut mispredicted = 0;
    for i in 0..2000 {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let outcome = Outcome::from(seed & 1 == 1);
        let _ = step(&mut bp, a, outcome);
        if step(&mut bp, b, outcome) != outcome && i >= 1000 {
            mispredicted += 1;
        }
    }
    assert!(mispredicted < 50, "{mispredicted} mispredictions on the correlated branch");
}
