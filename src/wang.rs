// Search for a pair of 64-byte messages that collide under MD4, using the
// first-round message modification technique from Wang et al.'s "Cryptanalysis
// of the Hash Functions MD4 and RIPEMD".
//
// The attack follows a differential path through the compression function.
// The path cancels through round 1 whenever a set of per-step bit conditions
// on the intermediate state holds. Rather than hoping a random message
// satisfies them, we enforce them: run each round-1 step, force the
// conditioned bits of its output, then solve for the message word that
// produces the forced output. Rotation is invertible bit-exactly and the
// additions invert to subtractions mod 2^32, so the step
//
//   out = (state + F(b, c, d) + word) <<< shift
//
// rearranges to
//
//   word = (out >>> shift) - state - F(b, c, d)
//
// giving a message word that reproduces the corrected output under the real
// compression function. Rounds 2 and 3 remain uncontrolled, so after
// correcting all 16 round-1 steps an attempt still only collides with some
// fixed probability; the search loops over fresh random messages until the
// full digests agree.

use crate::hash::Hasher;
use crate::md4::{f, Md4, INITIALISATION_CONSTANTS};
use crate::message::{block_to_words, words_to_block, BLOCK_SIZE, WORDS_PER_BLOCK};

use rand::Rng;
use rayon::prelude::*;

use Constraint::{Matches, One, Zero};

const ROUND1_SHIFTS: [u32; 4] = [3, 7, 11, 19];
const PARALLEL_BATCH: usize = 1024;

/// A required value for one bit of a step's output: equal to the same bit of
/// a reference word, forced to zero, or forced to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Matches(u32),
    Zero(u32),
    One(u32),
}

impl Constraint {
    pub fn apply(self, word: u32, reference: u32) -> u32 {
        match self {
            Matches(bit) => (word & !(1 << bit)) | (reference & (1 << bit)),
            Zero(bit) => word & !(1 << bit),
            One(bit) => word | (1 << bit),
        }
    }

    pub fn bit(self) -> u32 {
        match self {
            Matches(bit) | Zero(bit) | One(bit) => bit,
        }
    }
}

/// Wang's sufficient conditions on the 16 round-1 step outputs, one ordered
/// list per step. `Matches` refers to the first input of F at that step,
/// which is the register updated by the previous step.
static ROUND1_CONDITIONS: [&[Constraint]; 16] = [
    &[Matches(6)],
    &[Zero(6), Matches(7), Matches(10)],
    &[One(6), One(7), Zero(10), Matches(25)],
    &[One(6), Zero(7), Zero(10), Zero(25)],
    &[One(7), One(10), Zero(25), Matches(13)],
    &[Zero(13), Matches(18), Matches(19), Matches(20), Matches(21), One(25)],
    &[Matches(12), Zero(13), Matches(14), Zero(18), Zero(19), One(20), Zero(21)],
    &[One(12), One(13), Zero(14), Matches(16), Zero(18), Zero(19), Zero(20), Zero(21)],
    &[
        One(12),
        One(13),
        One(14),
        Zero(16),
        Zero(18),
        Zero(19),
        Zero(20),
        Matches(22),
        Matches(21),
        Matches(25),
    ],
    &[
        One(12),
        One(13),
        One(14),
        Zero(16),
        Zero(19),
        One(20),
        One(21),
        Zero(22),
        One(25),
        Matches(29),
    ],
    &[One(16), Zero(19), Zero(20), Zero(21), Zero(22), Zero(25), One(29), Matches(31)],
    &[Zero(19), One(20), One(21), Matches(22), One(25), Zero(29), Zero(31)],
    &[Zero(22), Zero(25), Matches(26), Matches(28), One(29), Zero(31)],
    &[Zero(22), Zero(25), One(26), One(28), Zero(29), One(31)],
    &[Matches(18), One(22), One(25), Zero(26), Zero(28), Zero(29)],
    &[Zero(18), Matches(25), One(26), One(28), Zero(29)],
];

/// Two distinct 64-byte messages with equal MD4 digests.
pub struct CollisionPair {
    pub message: [u8; BLOCK_SIZE],
    pub sibling: [u8; BLOCK_SIZE],
}

/// Run round-1 step `step`, force the conditioned bits of its output, and
/// rewrite `words[step]` so the unmodified step function reproduces the
/// corrected output from the pre-step state.
fn corrected_step(state: &mut [u32; 4], words: &mut [u32; WORDS_PER_BLOCK], step: usize) {
    let i = (16 - step) % 4;
    let shift = ROUND1_SHIFTS[step % 4];
    let reference = state[(i + 1) % 4];
    let mix = f(state[(i + 1) % 4], state[(i + 2) % 4], state[(i + 3) % 4]);

    let raw = state[i]
        .wrapping_add(mix)
        .wrapping_add(words[step])
        .rotate_left(shift);
    let corrected = ROUND1_CONDITIONS[step]
        .iter()
        .fold(raw, |word, constraint| constraint.apply(word, reference));

    words[step] = corrected
        .rotate_right(shift)
        .wrapping_sub(state[i])
        .wrapping_sub(mix);

    let replayed = state[i]
        .wrapping_add(mix)
        .wrapping_add(words[step])
        .rotate_left(shift);
    assert_eq!(
        replayed, corrected,
        "step {step}: rewritten message word does not reproduce the corrected state word"
    );

    state[i] = corrected;
}

/// Correct all 16 round-1 steps in place, starting from the MD4
/// initialisation vector. Returns the state after round 1.
pub fn enforce_round1_conditions(words: &mut [u32; WORDS_PER_BLOCK]) -> [u32; 4] {
    let mut state = INITIALISATION_CONSTANTS;
    for step in 0..16 {
        corrected_step(&mut state, words, step);
    }
    state
}

/// Sample one random message, enforce the round-1 conditions on it, and check
/// whether the original and corrected messages collide under the full MD4.
/// `None` means the uncontrolled later rounds did not cooperate; sample a new
/// message and try again.
pub fn attempt_collision<R: Rng>(rng: &mut R) -> Option<CollisionPair> {
    let mut message = [0u8; BLOCK_SIZE];
    rng.fill(&mut message[..]);

    let mut words = block_to_words(&message);
    enforce_round1_conditions(&mut words);
    let sibling = words_to_block(&words);

    if message != sibling && Md4::digest_message(&message) == Md4::digest_message(&sibling) {
        Some(CollisionPair { message, sibling })
    } else {
        None
    }
}

pub fn find_collision<R: Rng>(rng: &mut R) -> CollisionPair {
    loop {
        if let Some(pair) = attempt_collision(rng) {
            return pair;
        }
    }
}

/// Race batches of independent attempts across a thread pool and take the
/// first success. Attempts share nothing but the read-only condition table.
pub fn find_collision_parallel() -> CollisionPair {
    loop {
        let found = (0..PARALLEL_BATCH)
            .into_par_iter()
            .find_map_any(|_| attempt_collision(&mut rand::thread_rng()));
        if let Some(pair) = found {
            return pair;
        }
    }
}
