//! BLAKE3 keys for the evidence cache.
//!
//! Claims are normalized before hashing so trivially different spellings of the same
//! claim ("Free vaccines " vs "free  vaccines") share one cache slot.

/// Lowercases, trims, and collapses internal whitespace.
pub fn normalize_claim(claim: &str) -> String {
    claim
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full 32-byte BLAKE3 hash of the normalized claim.
#[inline]
pub fn hash_claim(claim: &str) -> [u8; 32] {
    *blake3::hash(normalize_claim(claim).as_bytes()).as_bytes()
}

/// Key for one retrieval. Covers the normalized claim, the source query built from
/// it, and the result cap, so calls that would query differently never share a slot.
pub fn evidence_key(claim: &str, query: &str, max_results: usize) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(normalize_claim(claim).as_bytes());
    hasher.update(&[0]);
    hasher.update(normalize_claim(query).as_bytes());
    hasher.update(&(max_results as u64).to_le_bytes());
    *hasher.finalize().as_bytes()
}

/// Hex form of [`hash_claim`], used in log lines.
pub fn claim_key_hex(claim: &str) -> String {
    blake3::hash(normalize_claim(claim).as_bytes())
        .to_hex()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_claim() {
        assert_eq!(
            normalize_claim("  Free   Vaccines\tavailable NOW "),
            "free vaccines available now"
        );
        assert_eq!(normalize_claim(""), "");
    }

    #[test]
    fn test_hash_claim_ignores_case_and_spacing() {
        assert_eq!(
            hash_claim("Free vaccines available now"),
            hash_claim("  free   VACCINES available now")
        );
        assert_ne!(
            hash_claim("Free vaccines available now"),
            hash_claim("Free vaccines available tomorrow")
        );
    }

    #[test]
    fn test_evidence_key_scope() {
        let base = evidence_key("Free vaccines", "DOH Free vaccines", 5);
        assert_eq!(base, evidence_key("  free VACCINES", "doh free  vaccines", 5));
        assert_ne!(base, evidence_key("Free vaccines", "DOH Free vaccines", 10));
        assert_ne!(base, evidence_key("Free vaccines", "Marcos Free vaccines", 5));
    }

    #[test]
    fn test_claim_key_hex_is_64_chars() {
        let key = claim_key_hex("marcos libreng kuryente");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
