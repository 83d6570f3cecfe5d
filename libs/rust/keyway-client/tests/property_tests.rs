//! Property-based tests for the `.env` parser and secret hygiene.

use keyway_client::{PullRequest, envfile};
use proptest::prelude::*;
use secrecy::SecretString;

// Strategy for keys: non-empty, no whitespace, no '=' or '#'
fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,30}"
}

// Strategy for values that survive a round trip unchanged:
// single-line, quote-free at the edges, no surrounding whitespace
fn plain_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:/@.?&=!*+-]{0,40}"
}

// Strategy for token-like secrets
fn token_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{16,48}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Round trip: serializing a quote-free single-line mapping and
    /// re-parsing it reproduces the original mapping.
    #[test]
    fn prop_serialize_parse_round_trip(
        entries in prop::collection::hash_map(key_strategy(), plain_value_strategy(), 0..16),
    ) {
        let text = envfile::serialize(&entries);
        let reparsed = envfile::parse(&text);
        prop_assert_eq!(reparsed, entries);
    }

    /// Only the first `=` splits key from value; the rest of the line is
    /// kept verbatim.
    #[test]
    fn prop_value_keeps_embedded_equals(
        key in key_strategy(),
        left in plain_value_strategy(),
        right in plain_value_strategy(),
    ) {
        let line = format!("{key}={left}={right}");
        let parsed = envfile::parse(&line);
        let expected = format!("{left}={right}");
        prop_assert_eq!(parsed.get(&key).map(String::as_str), Some(expected.as_str()));
    }

    /// Later assignments to the same key overwrite earlier ones.
    #[test]
    fn prop_duplicate_key_last_wins(
        key in key_strategy(),
        first in plain_value_strategy(),
        second in plain_value_strategy(),
    ) {
        let content = format!("{key}={first}\n{key}={second}");
        let parsed = envfile::parse(&content);
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(parsed.get(&key).map(String::as_str), Some(second.as_str()));
    }

    /// Comment and blank lines never produce entries.
    #[test]
    fn prop_comments_and_blanks_ignored(
        key in key_strategy(),
        value in plain_value_strategy(),
        comment in "[ -~]{0,40}",
    ) {
        let content = format!("# {comment}\n\n{key}={value}\n   \n#{comment}");
        let parsed = envfile::parse(&content);
        prop_assert_eq!(parsed.len(), 1);
        prop_assert_eq!(parsed.get(&key).map(String::as_str), Some(value.as_str()));
    }

    /// A matching outer quote pair is stripped exactly once; the inner
    /// text is preserved literally.
    #[test]
    fn prop_quoted_value_stripped_once(
        key in key_strategy(),
        inner in "[a-zA-Z0-9 =:#]{0,40}",
    ) {
        let double = format!("{key}=\"{inner}\"");
        let parsed = envfile::parse(&double);
        prop_assert_eq!(parsed.get(&key).map(String::as_str), Some(inner.as_str()));

        let single = format!("{key}='{inner}'");
        let parsed = envfile::parse(&single);
        prop_assert_eq!(parsed.get(&key).map(String::as_str), Some(inner.as_str()));
    }

    /// Access tokens never leak through `Debug` formatting.
    #[test]
    fn prop_token_not_exposed_in_debug(
        token in token_strategy(),
        environment in "[a-z]{3,12}",
    ) {
        let request = PullRequest::new(
            "owner/repo",
            environment,
            SecretString::from(token.clone()),
        )
        .expect("owner/repo is a valid repository");

        let debug_output = format!("{request:?}");

        prop_assert!(
            !debug_output.contains(&token),
            "Debug output should not contain the access token"
        );
        prop_assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should show [REDACTED]"
        );
    }
}
