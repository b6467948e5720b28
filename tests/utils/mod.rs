use rand::Rng;

pub fn random_code(code_size: usize, rng: &mut rand::rngs::StdRng) -> Vec<u8> {
    (0..code_size).map(|_| rng.gen()).collect()
}

/// Copy of `code` with `flips` random bits inverted (possibly the same bit twice).
pub fn perturbed_code(code: &[u8], flips: usize, rng: &mut rand::rngs::StdRng) -> Vec<u8> {
    let mut result = code.to_vec();
    if result.is_empty() {
        return result;
    }
    for _ in 0..flips {
        let bit = rng.gen_range(0..result.len() * 8);
        result[bit / 8] ^= 1 << (bit % 8);
    }
    result
}

pub fn hamming_brute_force(a: &[u8], b: &[u8]) -> u32 {
    let mut h = 0;
    for (&x, &y) in a.iter().zip(b) {
        for bit in 0..8 {
            if (x >> bit) & 1 != (y >> bit) & 1 {
                h += 1;
            }
        }
    }
    h
}

pub fn generalized_hamming_brute_force(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).filter(|(x, y)| x != y).count() as u32
}
