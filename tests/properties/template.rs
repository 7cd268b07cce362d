//! Property tests for literal escaping in templates.

use proptest::prelude::*;

use funcstack::domain::value_objects::{escape_literal, unescape_literal};

fn template_ish() -> impl Strategy<Value = String> {
    // Bias towards the characters that form template introducers.
    proptest::string::string_regex("[a-z${}% ]{0,48}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: unescaping an escaped literal gives the literal back.
    #[test]
    fn property_escape_is_reversible(text in template_ish()) {
        prop_assert_eq!(unescape_literal(&escape_literal(&text)), text);
    }

    /// PROPERTY: escaped text carries no unescaped interpolation.
    #[test]
    fn property_escaped_text_has_no_bare_introducer(text in template_ish()) {
        let escaped = escape_literal(&text);
        let bytes = escaped.as_bytes();
        for i in 0..bytes.len().saturating_sub(1) {
            if bytes[i + 1] == b'{' && (bytes[i] == b'$' || bytes[i] == b'%') {
                prop_assert!(i > 0 && bytes[i - 1] == bytes[i], "bare introducer in {:?}", escaped);
            }
        }
    }
}
