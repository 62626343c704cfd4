//! Tests for the weighted multiset of pattern identities

#[cfg(test)]
mod tests {
    use wavetile::algorithm::multiset::WeightedMultiset;
    use wavetile::math::probability::RandomSelector;

    // Tests repeated identities merge and iteration is sorted
    // Verified by appending entries without merging
    #[test]
    fn test_from_counts_merges_and_sorts() {
        let multiset = WeightedMultiset::from_counts([(5, 1), (2, 3), (5, 2)]);
        assert_eq!(multiset.iter().collect::<Vec<_>>(), vec![(2, 3), (5, 3)]);
        assert_eq!(multiset.total(), 6);
        assert_eq!(multiset.distinct_len(), 2);
    }

    // Tests zero counts are never stored
    // Verified by inserting zero-count entries
    #[test]
    fn test_zero_counts_skipped() {
        let multiset = WeightedMultiset::from_counts([(1, 0), (2, 0)]);
        assert!(multiset.is_empty());
        assert_eq!(multiset.total(), 0);
        assert!(!multiset.contains(1));
    }

    // Tests collecting a sequence with repetition counts each element
    // Verified by deduplicating in from_iter
    #[test]
    fn test_from_iterator_counts_repeats() {
        let multiset: WeightedMultiset = [3, 1, 3, 3].into_iter().collect();
        assert_eq!(multiset.count(3), 3);
        assert_eq!(multiset.count(1), 1);
        assert_eq!(multiset.ids().collect::<Vec<_>>(), vec![1, 3]);
    }

    // Tests removing an identity drops all its instances
    // Verified by decrementing the count instead
    #[test]
    fn test_remove_drops_identity() {
        let mut multiset = WeightedMultiset::from_counts([(0, 4), (1, 1)]);
        multiset.remove(0);
        assert_eq!(multiset.count(0), 0);
        assert_eq!(multiset.single(), Some(1));
    }

    // Tests the multiset subset relation compares counts
    // Verified by comparing identities only
    #[test]
    fn test_subset_respects_counts() {
        let big = WeightedMultiset::from_counts([(0, 3), (1, 1)]);
        let small = WeightedMultiset::from_counts([(0, 2)]);
        let grown = WeightedMultiset::from_counts([(1, 2)]);
        assert!(small.is_subset_of(&big));
        assert!(!grown.is_subset_of(&big));
        assert!(WeightedMultiset::new().is_subset_of(&small));
    }

    // Tests normalisation only applies to a single distinct identity
    // Verified by normalising every count to one
    #[test]
    fn test_normalized() {
        let single = WeightedMultiset::from_counts([(7, 4)]).normalized();
        assert_eq!(single, WeightedMultiset::singleton(7));

        let several = WeightedMultiset::from_counts([(1, 2), (7, 4)]);
        assert_eq!(several.clone().normalized(), several);
    }

    // Tests weighted sampling follows counts
    // Verified by sampling uniformly over distinct identities
    #[test]
    fn test_sample_follows_counts() {
        let multiset = WeightedMultiset::from_counts([(0, 9), (1, 1)]);
        let mut selector = RandomSelector::new(7);
        let draws = 2000;
        let zeros = (0..draws)
            .filter(|_| multiset.sample(&mut selector) == Some(0))
            .count();
        let ratio = zeros as f64 / f64::from(draws);
        assert!((0.85..0.95).contains(&ratio), "ratio {ratio}");
    }

    // Tests sampling an empty multiset yields nothing
    // Verified by returning identity 0 for empty input
    #[test]
    fn test_sample_empty() {
        let mut selector = RandomSelector::new(1);
        assert_eq!(WeightedMultiset::new().sample(&mut selector), None);
    }
}
