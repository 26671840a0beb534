use pile_of_pets::{checksum_str, decode, encode, CollectionStore, ProgressionConfig};
use proptest::prelude::*;

mod common;
use common::{pet_codec, PETS};

fn arb_store() -> impl Strategy<Value = CollectionStore> {
    prop::collection::btree_map(prop::sample::select(PETS.to_vec()), any::<u32>(), 0..=PETS.len())
        .prop_map(|counts| counts.into_iter().collect())
}

fn arb_config() -> impl Strategy<Value = ProgressionConfig> {
    (1u32..=64, 1.0f64..4.0, 0u32..=20, 0.0f64..3.0).prop_map(
        |(initial, scaling, max_tier, multiplier)| {
            ProgressionConfig::new(initial, scaling, max_tier, multiplier)
                .expect("strategy only yields valid values")
        },
    )
}

proptest! {
    #[test]
    fn encode_decode_roundtrip(store in arb_store()) {
        let codec = pet_codec();
        let blob = encode(&store, &codec).expect("catalog identifiers always encode");
        let outcome = decode(&blob, &codec);
        prop_assert!(outcome.is_complete());
        prop_assert_eq!(outcome.store, store);
    }

    #[test]
    fn checksum_matches_reference(text in ".{0,64}") {
        prop_assert_eq!(checksum_str(&text), crc32fast::hash(text.as_bytes()));
    }

    #[test]
    fn tier_is_monotonic(config in arb_config(), a in 0u64..1_000_000, b in 0u64..1_000_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(config.tier_from_count(low) <= config.tier_from_count(high));
        prop_assert_eq!(config.tier_from_count(0), 0);
    }

    #[test]
    fn tier_never_exceeds_cap(config in arb_config(), count in any::<u64>()) {
        prop_assume!(config.max_tier() > 0);
        prop_assert!(config.tier_from_count(count) <= config.max_tier());
        prop_assert!(config.tier_from_count(u64::MAX) <= config.max_tier());
    }

    #[test]
    fn progress_stays_below_threshold(config in arb_config(), count in 0u64..1_000_000) {
        let progress = config.progress(count);
        if let Some(threshold) = progress.next_threshold {
            prop_assert!(progress.progress < threshold);
        }
        prop_assert!(progress.progress <= count);
    }
}
