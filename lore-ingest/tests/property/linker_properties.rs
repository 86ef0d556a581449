use std::collections::BTreeSet;

use lore_ingest::linker::jaccard;
use proptest::prelude::*;

fn tag_set() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set("[a-z]{1,8}", 0..12)
}

proptest! {
    #[test]
    fn jaccard_is_bounded(a in tag_set(), b in tag_set()) {
        let score = jaccard(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn jaccard_is_symmetric(a in tag_set(), b in tag_set()) {
        prop_assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    }

    #[test]
    fn identical_nonempty_sets_score_one(a in tag_set()) {
        prop_assume!(!a.is_empty());
        prop_assert!((jaccard(&a, &a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disjoint_sets_score_zero(a in tag_set()) {
        let b: BTreeSet<String> = a.iter().map(|t| format!("{t}-other")).collect();
        prop_assert_eq!(jaccard(&a, &b), 0.0);
    }
}
