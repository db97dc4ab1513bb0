//! Ground-truth checks: suffix index search against a brute-force scan

use suffixseek::{
    build_index, search, IndexConfig, PatternSearcher, SequenceStore, SortAlgorithm, SuffixIndex,
};

/// Small xorshift generator so sequences are reproducible without extra crates
struct SeqGen(u64);

impl SeqGen {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn sequence(&mut self, len: usize, alphabet: &[u8]) -> Vec<u8> {
        (0..len)
            .map(|_| alphabet[(self.next() % alphabet.len() as u64) as usize])
            .collect()
    }
}

fn brute_force(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.len() > text.len() {
        return Vec::new();
    }
    (0..=text.len() - pattern.len())
        .filter(|&k| &text[k..k + pattern.len()] == pattern)
        .collect()
}

#[test]
fn test_scenarios() {
    let cases: [(&[u8], &[u8], &[usize]); 5] = [
        (b"AGCTAGCTA", b"AGC", &[0, 4]),
        (b"AAAA", b"AA", &[0, 1, 2]),
        (b"GATTACA", b"TTT", &[]),
        (b"X", b"XY", &[]),
        (b"", b"ACGT", &[]),
    ];

    for (text, pattern, expected) in cases {
        let store = SequenceStore::from_bytes(text);
        let index = build_index(&store).unwrap();
        let matches = search(&index, &store, pattern).unwrap();
        assert_eq!(matches.as_slice(), expected, "pattern {:?}", pattern);
    }
}

#[test]
fn test_random_sequences_match_brute_force() {
    let mut rng = SeqGen(0x5eed_1234_abcd_ef01);

    for round in 0..40 {
        let len = 1 + (rng.next() % 300) as usize;
        let alphabet: &[u8] = if round % 2 == 0 { b"ACGT" } else { b"AC" };
        let text = rng.sequence(len, alphabet);

        let store = SequenceStore::from_bytes(text.clone());
        let index = build_index(&store).unwrap();
        assert!(index.is_sorted_over(&text));
        let searcher = PatternSearcher::new(&index, &store).unwrap();

        for _ in 0..25 {
            // Half the patterns are taken from the text, half are random
            let plen = 1 + (rng.next() % 8) as usize;
            let pattern = if rng.next() % 2 == 0 && plen <= len {
                let start = (rng.next() % (len - plen + 1) as u64) as usize;
                text[start..start + plen].to_vec()
            } else {
                rng.sequence(plen, b"ACGT")
            };

            let found = searcher.find_all(&pattern).unwrap();
            assert_eq!(
                found.as_slice(),
                brute_force(&text, &pattern).as_slice(),
                "text {:?} pattern {:?}",
                String::from_utf8_lossy(&text),
                String::from_utf8_lossy(&pattern)
            );
        }
    }
}

#[test]
fn test_repetitive_sequences() {
    // Long shared prefixes between neighbouring suffixes
    let texts: [Vec<u8>; 3] = [
        vec![b'A'; 200],
        b"AC".repeat(100),
        b"ACGTT".repeat(40),
    ];

    for text in texts {
        let store = SequenceStore::from_bytes(text.clone());
        let index = build_index(&store).unwrap();
        let searcher = PatternSearcher::new(&index, &store).unwrap();

        for pattern in [&b"A"[..], b"AA", b"AC", b"CA", b"ACGTTACG", b"TTA", b"G"] {
            assert_eq!(
                searcher.find_all(pattern).unwrap().as_slice(),
                brute_force(&text, pattern).as_slice()
            );
        }
    }
}

#[test]
fn test_boundary_patterns() {
    let text = b"TTAGGGCATTAGGG";
    let store = SequenceStore::from_bytes(&text[..]);
    let index = build_index(&store).unwrap();
    let searcher = PatternSearcher::new(&index, &store).unwrap();

    // Every single byte occurrence
    for byte in [b'A', b'C', b'G', b'T'] {
        assert_eq!(
            searcher.find_all(&[byte]).unwrap().as_slice(),
            brute_force(text, &[byte]).as_slice()
        );
    }

    // The whole buffer matches only at offset zero, anything longer never
    assert_eq!(searcher.find_all(text).unwrap().as_slice(), &[0]);
    let mut longer = text.to_vec();
    longer.push(b'A');
    assert!(searcher.find_all(&longer).unwrap().is_empty());

    // A pattern running past the end of a matching tail
    assert!(searcher.find_all(b"AGGGT").unwrap().is_empty());
    assert_eq!(searcher.find_all(b"AGGG").unwrap().as_slice(), &[2, 10]);
}

#[test]
fn test_strategies_give_identical_results() {
    let mut rng = SeqGen(42);
    let text = rng.sequence(2_000, b"ACGTN");
    let store = SequenceStore::from_bytes(text.clone());

    let comparison = SuffixIndex::build(
        &store,
        &IndexConfig {
            algorithm: SortAlgorithm::Comparison,
            parallel: false,
        },
    )
    .unwrap();
    let sais = SuffixIndex::build(
        &store,
        &IndexConfig {
            algorithm: SortAlgorithm::SuffixArray,
            parallel: true,
        },
    )
    .unwrap();
    assert_eq!(comparison, sais);

    let patterns: Vec<Vec<u8>> = (0..50).map(|_| rng.sequence(4, b"ACGTN")).collect();
    let searcher = PatternSearcher::new(&sais, &store).unwrap();
    for (pattern, result) in patterns.iter().zip(searcher.search_batch(&patterns)) {
        assert_eq!(
            result.unwrap().as_slice(),
            brute_force(&text, pattern).as_slice()
        );
    }
}
