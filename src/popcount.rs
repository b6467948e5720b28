/// Number of set bits in every possible byte value.
///
/// Only the remainder paths read it: for fewer than 8 trailing bytes a table
/// lookup is cheaper than assembling and masking a partial word.
pub const BYTE_POPCOUNT: [u8; 256] = byte_popcount_table();

const fn byte_popcount_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = (i as u8).count_ones() as u8;
        i += 1;
    }
    table
}

#[inline(always)]
pub fn popcount32(x: u32) -> u32 {
    x.count_ones()
}

#[inline(always)]
pub fn popcount64(x: u64) -> u32 {
    x.count_ones()
}

/// Reads the 64-bit word starting at byte `offset`.
///
/// Codes are decoded little-endian; both distances are invariant under byte
/// permutation inside a word, so the result does not depend on the host.
#[inline(always)]
pub(crate) fn read_u64(code: &[u8], offset: usize) -> u64 {
    let mut word = [0u8; 8];
    word.copy_from_slice(&code[offset..offset + 8]);
    u64::from_le_bytes(word)
}

#[inline(always)]
pub(crate) fn read_u32(code: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&code[offset..offset + 4]);
    u32::from_le_bytes(word)
}

/// Decodes the first `N` words of `code`.
#[inline(always)]
pub(crate) fn read_words<const N: usize>(code: &[u8]) -> [u64; N] {
    let mut words = [0u64; N];
    for (i, word) in words.iter_mut().enumerate() {
        *word = read_u64(code, i * 8);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_table() {
        assert_eq!(BYTE_POPCOUNT[0], 0);
        assert_eq!(BYTE_POPCOUNT[0xFF], 8);
        assert_eq!(BYTE_POPCOUNT[0b1010_0101], 4);
        for (byte, &count) in BYTE_POPCOUNT.iter().enumerate() {
            let mut expected = 0;
            for bit in 0..8 {
                expected += (byte >> bit) & 1;
            }
            assert_eq!(count as usize, expected);
        }
    }

    #[test]
    fn test_word_popcount() {
        assert_eq!(popcount32(0), 0);
        assert_eq!(popcount32(u32::MAX), 32);
        assert_eq!(popcount64(u64::MAX), 64);
        assert_eq!(popcount64(0x8000_0000_0000_0001), 2);
    }

    #[test]
    fn test_read_unaligned() {
        let bytes: Vec<u8> = (0u8..24).collect();
        // offset 3 is never 8-byte aligned relative to the Vec start
        assert_eq!(
            read_u64(&bytes, 3),
            u64::from_le_bytes([3, 4, 5, 6, 7, 8, 9, 10])
        );
        assert_eq!(read_u32(&bytes, 16), u32::from_le_bytes([16, 17, 18, 19]));
        assert_eq!(read_words::<2>(&bytes[8..]), [read_u64(&bytes, 8), read_u64(&bytes, 16)]);
    }
}
