//! Tests for `PatternBitset` set operations

#[cfg(test)]
mod tests {
    use wavetile::algorithm::bitset::PatternBitset;

    // Verifies new PatternBitset holds no identities
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = PatternBitset::new(10);
        assert!(bitset.to_vec().is_empty());
        assert!((0..10).all(|id| !bitset.contains(id)));
    }

    // Tests identity 0 is a valid member
    // Verified by offsetting identities by one
    #[test]
    fn test_zero_identity() {
        let mut bitset = PatternBitset::new(3);
        bitset.insert(0);
        assert!(bitset.contains(0));
        assert_eq!(bitset.to_vec(), vec![0]);
    }

    // Tests out-of-range identities are ignored
    // Verified by growing the bitset on insert
    #[test]
    fn test_out_of_range_ignored() {
        let mut bitset = PatternBitset::new(3);
        bitset.insert(3);
        assert!(bitset.to_vec().is_empty());
        assert!(!bitset.contains(3));
    }

    // Tests union accumulates identities in place
    // Verified by replacing instead of accumulating
    #[test]
    fn test_union_with() {
        let mut acc = PatternBitset::new(6);
        let mut other = PatternBitset::new(6);
        other.insert(1);
        acc.union_with(&other);
        let mut another = PatternBitset::new(6);
        another.insert(4);
        another.insert(1);
        acc.union_with(&another);
        assert_eq!(acc.to_vec(), vec![1, 4]);
    }
}
