use lore_core::hash;
use proptest::prelude::*;

proptest! {
    #[test]
    fn digest_is_always_64_lowercase_hex(content in ".*") {
        let digest = hash::hash(&content);
        prop_assert_eq!(digest.len(), 64);
        prop_assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn hashing_is_deterministic(content in ".*") {
        prop_assert_eq!(hash::hash(&content), hash::hash(&content));
    }

    #[test]
    fn equal_agrees_with_string_equality(a in ".*", b in ".*") {
        let ha = hash::hash(&a);
        let hb = hash::hash(&b);
        prop_assert_eq!(hash::equal(&ha, &hb), ha == hb);
    }
}
