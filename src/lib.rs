mod hash;
mod hex;
mod md4;
mod message;
mod wang;

pub use hash::Hasher;
pub use hex::{bytes_to_hex, hex_to_bytes};
pub use md4::Md4;
pub use message::{block_to_words, words_to_block, BLOCK_SIZE, WORDS_PER_BLOCK};
pub use wang::{
    attempt_collision, enforce_round1_conditions, find_collision, find_collision_parallel,
    CollisionPair, Constraint,
};
