use crate::hash::Hasher;
use crate::message::{block_to_words, BLOCK_SIZE};

pub(crate) const INITIALISATION_CONSTANTS: [u32; 4] =
    [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476];
const MD4_SIZE: usize = 16;

pub struct Md4 {
    buffer: Vec<u8>,
    digest: [u32; 4],
    message_bit_len: u64,
}

impl Default for Md4 {
    fn default() -> Self {
        Self {
            buffer: Vec::new(),
            digest: INITIALISATION_CONSTANTS,
            message_bit_len: 0,
        }
    }
}

impl Hasher<MD4_SIZE> for Md4 {
    fn update(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
        self.message_bit_len += (data.len() as u64) * 8;
    }

    fn digest(mut self) -> [u8; MD4_SIZE] {
        let mut buffer = std::mem::take(&mut self.buffer);
        buffer.push(0x80);
        while buffer.len() % BLOCK_SIZE != 56 {
            buffer.push(0x00);
        }
        buffer.extend_from_slice(&self.message_bit_len.to_le_bytes());

        for chunk in buffer.chunks_exact(BLOCK_SIZE) {
            self.process_chunk(chunk.try_into().unwrap());
        }

        self.digest
            .map(|d| d.to_le_bytes())
            .concat()
            .try_into()
            .unwrap()
    }
}

impl Md4 {
    fn process_chunk(&mut self, chunk: &[u8; BLOCK_SIZE]) {
        let x = block_to_words(chunk);

        let mut d = self.digest;
        // Round 1
        let s = [3, 7, 11, 19];
        for r in 0..16 {
            let i = (16 - r) % 4;
            let k = r;
            d[i] = d[i]
                .wrapping_add(f(d[(i + 1) % 4], d[(i + 2) % 4], d[(i + 3) % 4]))
                .wrapping_add(x[k])
                .rotate_left(s[r % 4]);
        }

        // Round 2
        let s = [3, 5, 9, 13];
        for r in 0..16 {
            let i = (16 - r) % 4;
            let k = 4 * (r % 4) + r / 4;
            d[i] = d[i]
                .wrapping_add(g(d[(i + 1) % 4], d[(i + 2) % 4], d[(i + 3) % 4]))
                .wrapping_add(x[k])
                .wrapping_add(0x5a827999)
                .rotate_left(s[r % 4]);
        }

        // Round 3
        let s = [3, 9, 11, 15];
        let k = [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];
        for r in 0..16 {
            let i = (16 - r) % 4;
            d[i] = d[i]
                .wrapping_add(h(d[(i + 1) % 4], d[(i + 2) % 4], d[(i + 3) % 4]))
                .wrapping_add(x[k[r]])
                .wrapping_add(0x6ed9eba1)
                .rotate_left(s[r % 4]);
        }

        for (state, increment) in self.digest.iter_mut().zip(d) {
            *state = increment.wrapping_add(*state);
        }
    }
}

pub(crate) fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::hex_to_bytes;

    use rstest::rstest;

    // Test vectors from RFC 1320, appendix A.5.
    #[rstest]
    #[case("", "31d6cfe0d16ae931b73c59d7e0c089c0")]
    #[case("a", "bde52cb31de33e46245e05fbdbd6fb24")]
    #[case("abc", "a448017aaf21d8525fc10ae87aa6729d")]
    #[case("message digest", "d9130a8164549fe818874806e1c7014b")]
    #[case("abcdefghijklmnopqrstuvwxyz", "d79e1c308aa5bbcdeea8ed63df412da9")]
    #[case(
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
        "043f8582f241db351ce627e153e7f0e4"
    )]
    #[case(
        "12345678901234567890123456789012345678901234567890123456789012345678901234567890",
        "e33b4ddc9c38f2199c3e7b164fcc0536"
    )]
    fn md4_generates_test_vector_hashes(#[case] input: &str, #[case] expected: &str) {
        let digest = Md4::digest_message(input.as_bytes());

        let expected_bytes = hex_to_bytes(expected).unwrap();
        assert_eq!(digest.to_vec(), expected_bytes);
    }

    #[test]
    fn split_updates_match_a_single_update() {
        // Long enough that the splits straddle a block boundary.
        let message = [0x61u8; 150];

        let mut md4 = Md4::default();
        md4.update(&message[..70]);
        md4.update(&message[70..]);

        assert_eq!(md4.digest(), Md4::digest_message(&message));
    }
}
