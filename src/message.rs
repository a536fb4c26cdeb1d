/// Codec between a 64-byte message block and its sixteen little-endian
/// 32-bit words, as consumed by the MD4 compression function.

pub const BLOCK_SIZE: usize = 64;
pub const WORDS_PER_BLOCK: usize = 16;

pub fn block_to_words(block: &[u8; BLOCK_SIZE]) -> [u32; WORDS_PER_BLOCK] {
    std::array::from_fn(|i| u32::from_le_bytes(block[(4 * i)..(4 + 4 * i)].try_into().unwrap()))
}

pub fn words_to_block(words: &[u32; WORDS_PER_BLOCK]) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    for (chunk, word) in block.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rstest::rstest;

    #[test]
    fn words_are_decoded_little_endian() {
        let mut block = [0u8; BLOCK_SIZE];
        block[..4].copy_from_slice(&[0x01, 0x23, 0x45, 0x67]);
        block[60..].copy_from_slice(&[0xef, 0xbe, 0xad, 0xde]);

        let words = block_to_words(&block);

        assert_eq!(words[0], 0x67452301);
        assert_eq!(words[15], 0xdeadbeef);
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(192)]
    fn encoding_words_then_decoding_is_the_identity(#[case] seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let words: [u32; WORDS_PER_BLOCK] = std::array::from_fn(|_| rng.gen());

        assert_eq!(block_to_words(&words_to_block(&words)), words);
    }

    #[rstest]
    #[case(1)]
    #[case(55)]
    #[case(4096)]
    fn decoding_a_block_then_encoding_is_the_identity(#[case] seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut block = [0u8; BLOCK_SIZE];
        rng.fill(&mut block[..]);

        assert_eq!(words_to_block(&block_to_words(&block)), block);
    }
}
