//! Identifier key derivation.
//!
//! A query is hashed with the classic 31-multiplier string hash (computed as
//! `(h << 5) - h + c`, wrapped to 32 bits) and then reduced into the catalog's
//! identifier space. The reduction is a truncating remainder, so keys keep the
//! sign of the hash: a negative hash gives a negative key.

/// Size of the identifier space keys are reduced into.
pub const KEY_MODULUS: i32 = 100_000;

/// Each narrowing step divides the candidate by this factor.
pub const NARROWING_DIVISOR: i32 = 10;

/// Case-insensitive 32-bit rolling hash of `text`.
///
/// Each character contributes its first UTF-16 code unit, so characters
/// outside the Basic Multilingual Plane hash as their high surrogate.
pub fn hash_code(text: &str) -> i32 {
    text.to_lowercase().chars().fold(0i32, |hash, ch| {
        let mut units = [0u16; 2];
        let code = ch.encode_utf16(&mut units)[0] as i32;
        (hash << 5).wrapping_sub(hash).wrapping_add(code)
    })
}

/// Reduce an arbitrary identifier into `(-KEY_MODULUS, KEY_MODULUS)`.
pub fn reduce_key(id: i32) -> i32 {
    id % KEY_MODULUS
}

/// Identifier key for a query.
pub fn identifier_key(query: &str) -> i32 {
    reduce_key(hash_code(query))
}

/// Next narrowing candidate: `candidate / 10`, halves rounding up.
///
/// Only meaningful for positive candidates; the narrowing loop never runs
/// for candidates of 1 or less.
pub fn narrow(candidate: i32) -> i32 {
    (candidate + NARROWING_DIVISOR / 2) / NARROWING_DIVISOR
}

/// Iterator over the candidates probed when narrowing from `key`.
///
/// Yields `narrow(key)`, `narrow(narrow(key))`, ... and stops once the
/// previous candidate is 1 or less. The starting key itself is not yielded.
pub fn narrowing_candidates(key: i32) -> NarrowingCandidates {
    NarrowingCandidates { current: key }
}

#[derive(Debug, Clone)]
pub struct NarrowingCandidates {
    current: i32,
}

impl Iterator for NarrowingCandidates {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.current <= 1 {
            return None;
        }
        self.current = narrow(self.current);
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_matches_reference_values() {
        assert_eq!(hash_code(""), 0);
        assert_eq!(hash_code("a"), 97);
        assert_eq!(hash_code("hello"), 99_162_322);
        assert_eq!(hash_code("lego"), 3_317_793);
    }

    #[test]
    fn test_hash_is_case_insensitive() {
        assert_eq!(hash_code("Clone"), hash_code("clone"));
        assert_eq!(hash_code("LEGO"), hash_code("lego"));
        assert_eq!(hash_code("ZoË"), hash_code("zoë"));
    }

    #[test]
    fn test_hash_wraps_to_32_bits() {
        assert_eq!(hash_code("polygenelubricants"), i32::MIN);
        assert_eq!(hash_code("Ada Lovelace"), -1_107_851_189);
    }

    #[test]
    fn test_hash_uses_first_utf16_unit() {
        // U+1F980 encodes as D83E DD80.
        assert_eq!(hash_code("🦀"), 0xD83E);
        assert_eq!(hash_code("Zoë"), 120_918);
    }

    #[test]
    fn test_key_keeps_sign_of_hash() {
        assert_eq!(identifier_key("hello"), 62_322);
        assert_eq!(identifier_key("lego"), 17_793);
        assert_eq!(identifier_key("Ada Lovelace"), -51_189);
        assert_eq!(identifier_key("polygenelubricants"), -83_648);
    }

    #[test]
    fn test_key_is_bounded() {
        for query in ["", "a", "hello", "Ada Lovelace", "polygenelubricants", "jane doe"] {
            assert!(identifier_key(query).abs() < KEY_MODULUS, "query {:?}", query);
        }
    }

    #[test]
    fn test_reduce_key_leaves_small_ids_alone() {
        assert_eq!(reduce_key(8014), 8014);
        assert_eq!(reduce_key(100_000), 0);
        assert_eq!(reduce_key(-123_456), -23_456);
    }

    #[test]
    fn test_narrow_rounds_half_up() {
        assert_eq!(narrow(95), 10);
        assert_eq!(narrow(15), 2);
        assert_eq!(narrow(14), 1);
        assert_eq!(narrow(5), 1);
        assert_eq!(narrow(2), 0);
    }

    #[test]
    fn test_narrowing_candidates() {
        let chain: Vec<i32> = narrowing_candidates(62_322).collect();
        assert_eq!(chain, vec![6232, 623, 62, 6, 1]);

        let chain: Vec<i32> = narrowing_candidates(15).collect();
        assert_eq!(chain, vec![2, 0]);

        assert_eq!(narrowing_candidates(1).count(), 0);
        assert_eq!(narrowing_candidates(0).count(), 0);
        assert_eq!(narrowing_candidates(-51_189).count(), 0);
    }

    #[test]
    fn test_narrowing_terminates_within_log10_bound() {
        for key in (2..KEY_MODULUS).step_by(7).chain([10, 95, 99_999]) {
            let bound = (key as f64).log10().ceil() as usize;
            let steps = narrowing_candidates(key).count();
            assert!(steps <= bound, "key {} took {} steps (bound {})", key, steps, bound);
        }
    }
}
