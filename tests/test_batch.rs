#[allow(unused)]
mod utils;

#[cfg(test)]
mod tests {
    use code_distance::{
        batch::{count_within, distance_table, distances},
        Acceleration, CodeParameters, HammingError, Metric,
    };
    use rand::SeedableRng;

    use crate::utils::{generalized_hamming_brute_force, hamming_brute_force, random_code};

    const CODES_COUNT: usize = 97;

    fn brute_force(metric: Metric, a: &[u8], b: &[u8]) -> u32 {
        match metric {
            Metric::Hamming => hamming_brute_force(a, b),
            Metric::GeneralizedHamming => generalized_hamming_brute_force(a, b),
        }
    }

    #[test]
    fn test_distances() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let cases = [
            (Metric::Hamming, 4),
            (Metric::Hamming, 20),
            (Metric::Hamming, 64),
            (Metric::Hamming, 33),
            (Metric::GeneralizedHamming, 8),
            (Metric::GeneralizedHamming, 32),
            (Metric::GeneralizedHamming, 72),
        ];
        for (metric, code_size) in cases {
            for acceleration in [Acceleration::Auto, Acceleration::Scalar] {
                let params = CodeParameters {
                    code_size,
                    metric,
                    acceleration,
                };
                let query = random_code(code_size, &mut rng);
                let codes = random_code(code_size * CODES_COUNT, &mut rng);
                let mut out = vec![0; CODES_COUNT];

                distances(&params, &query, &codes, &mut out).unwrap();

                for (code, &distance) in codes.chunks_exact(code_size).zip(&out) {
                    assert_eq!(distance, brute_force(metric, &query, code));
                }
            }
        }
    }

    #[test]
    fn test_distance_table() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let code_size = 24;
        let nq = 5;
        for metric in [Metric::Hamming, Metric::GeneralizedHamming] {
            let params = CodeParameters::new(code_size, metric);
            let queries = random_code(code_size * nq, &mut rng);
            let codes = random_code(code_size * CODES_COUNT, &mut rng);
            let mut table = vec![0; nq * CODES_COUNT];

            distance_table(&params, &queries, &codes, &mut table).unwrap();

            for (i, query) in queries.chunks_exact(code_size).enumerate() {
                for (j, code) in codes.chunks_exact(code_size).enumerate() {
                    assert_eq!(table[i * CODES_COUNT + j], brute_force(metric, query, code));
                }
            }
        }
    }

    #[test]
    fn test_count_within() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let code_size = 16;
        let params = CodeParameters::new(code_size, Metric::Hamming);
        let queries = random_code(code_size * 3, &mut rng);
        let mut codes = random_code(code_size * CODES_COUNT, &mut rng);
        // plant exact copies of the first query
        codes[..code_size].copy_from_slice(&queries[..code_size]);
        codes[5 * code_size..6 * code_size].copy_from_slice(&queries[..code_size]);

        assert!(count_within(&params, &queries, &codes, 0).unwrap() >= 2);

        let threshold = 60;
        let mut expected = 0;
        for query in queries.chunks_exact(code_size) {
            for code in codes.chunks_exact(code_size) {
                if hamming_brute_force(query, code) <= threshold {
                    expected += 1;
                }
            }
        }
        assert_eq!(
            count_within(&params, &queries, &codes, threshold).unwrap(),
            expected
        );
        assert_eq!(
            count_within(&params, &queries, &codes, 8 * code_size as u32).unwrap(),
            3 * CODES_COUNT
        );
    }

    #[test]
    fn test_validation() {
        let params = CodeParameters::new(8, Metric::Hamming);
        let query = [0u8; 8];
        let mut out = [0u32; 2];

        assert_eq!(
            distances(&params, &query, &[0u8; 12], &mut out),
            Err(HammingError::UnalignedBuffer {
                len: 12,
                code_size: 8,
            })
        );
        assert_eq!(
            distances(&params, &query, &[0u8; 24], &mut out),
            Err(HammingError::OutputLength {
                expected: 3,
                actual: 2,
            })
        );
        assert_eq!(
            distances(&params, &query[..4], &[0u8; 16], &mut out),
            Err(HammingError::CodeTooShort {
                expected: 8,
                actual: 4,
            })
        );

        let params = CodeParameters::new(12, Metric::GeneralizedHamming);
        assert!(matches!(
            count_within(&params, &[0u8; 12], &[0u8; 24], 1),
            Err(HammingError::InvalidCodeSize { code_size: 12, .. })
        ));

        let params = CodeParameters::new(0, Metric::Hamming);
        assert!(params.validate().is_err());
        assert_eq!(
            params.codes_count(&[0u8; 8]),
            Err(HammingError::InvalidCodeSize {
                computer: "CodeParameters",
                code_size: 0,
            })
        );
        assert_eq!(params.codes_count(&[]), params.codes_count(&[0u8; 8]));
        let mut out = [0u32; 1];
        assert!(distances(&params, &[], &[0u8; 8], &mut out).is_err());
    }

    #[test]
    fn test_empty_inputs() {
        let params = CodeParameters::new(16, Metric::Hamming);
        let mut table: Vec<u32> = Vec::new();
        distance_table(&params, &[0u8; 32], &[], &mut table).unwrap();
        distance_table(&params, &[], &[0u8; 32], &mut table).unwrap();
        assert_eq!(count_within(&params, &[], &[0u8; 32], 0).unwrap(), 0);
    }

    #[test]
    fn test_parameters_json() {
        let params: CodeParameters =
            serde_json::from_str(r#"{"code_size": 32, "metric": "generalized_hamming"}"#).unwrap();
        assert_eq!(params, CodeParameters::new(32, Metric::GeneralizedHamming));
        assert_eq!(params.acceleration, Acceleration::Auto);

        let params = CodeParameters {
            code_size: 20,
            metric: Metric::Hamming,
            acceleration: Acceleration::Scalar,
        };
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains(r#""acceleration":"scalar""#));
        assert_eq!(serde_json::from_str::<CodeParameters>(&json).unwrap(), params);
        assert_eq!(params.kernels().popcnt_isa(), "scalar");
    }
}
