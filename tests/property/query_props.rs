//! Query-engine properties: robustness against arbitrary input and the
//! boolean algebra identities.

use std::sync::LazyLock;

use crate::common::*;
use boolex::Index;
use proptest::prelude::*;
use tempfile::TempDir;

/// One shared index for all query properties; queries never mutate it.
static FIXTURE: LazyLock<(TempDir, Index)> = LazyLock::new(|| {
    build_and_load(&[
        ("d0", "D0", "", "alpha beta"),
        ("d1", "D1", "", "beta gamma delta"),
        ("d2", "D2", "", "alpha gamma"),
        ("d3", "D3", "", "delta"),
        ("d4", "D4", "", ""),
    ])
});

fn index() -> &'static Index {
    &FIXTURE.1
}

fn fragment_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "alpha", "beta", "gamma", "delta", "missing", "&&", "||", "!", "(", ")", "&", "|", "@",
    ])
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..12).prop_map(|parts| parts.join(" "))
}

fn term_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["alpha", "beta", "gamma", "delta", "missing"])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(400))]

    /// Property: no query line panics, and every result is a sorted
    /// duplicate-free subset of the universe.
    #[test]
    fn prop_eval_total_and_well_formed(query in query_strategy()) {
        let result = eval_line(index(), &query);
        for pair in result.windows(2) {
            prop_assert!(pair[0] < pair[1], "result not strictly increasing");
        }
        prop_assert!(result.iter().all(|&d| d < index().doc_count()));
    }

    /// Property: implicit AND is exactly explicit AND.
    #[test]
    fn prop_implicit_and(a in term_strategy(), b in term_strategy()) {
        prop_assert_eq!(
            eval_line(index(), &format!("{a} {b}")),
            eval_line(index(), &format!("{a} && {b}"))
        );
    }

    /// Property: De Morgan's laws hold over posting lists.
    #[test]
    fn prop_de_morgan(a in term_strategy(), b in term_strategy()) {
        prop_assert_eq!(
            eval_line(index(), &format!("!({a} && {b})")),
            eval_line(index(), &format!("!{a} || !{b}"))
        );
        prop_assert_eq!(
            eval_line(index(), &format!("!({a} || {b})")),
            eval_line(index(), &format!("!{a} && !{b}"))
        );
    }

    /// Property: AND and OR are commutative.
    #[test]
    fn prop_commutative(a in term_strategy(), b in term_strategy()) {
        prop_assert_eq!(
            eval_line(index(), &format!("{a} && {b}")),
            eval_line(index(), &format!("{b} && {a}"))
        );
        prop_assert_eq!(
            eval_line(index(), &format!("{a} || {b}")),
            eval_line(index(), &format!("{b} || {a}"))
        );
    }

    /// Property: double negation is the identity on term results.
    #[test]
    fn prop_double_negation(a in term_strategy()) {
        prop_assert_eq!(
            eval_line(index(), &format!("!!{a}")),
            eval_line(index(), a)
        );
    }

    /// Property: single and double operator spellings agree.
    #[test]
    fn prop_operator_spellings(a in term_strategy(), b in term_strategy()) {
        prop_assert_eq!(
            eval_line(index(), &format!("{a} & {b}")),
            eval_line(index(), &format!("{a} && {b}"))
        );
        prop_assert_eq!(
            eval_line(index(), &format!("{a} | {b}")),
            eval_line(index(), &format!("{a} || {b}"))
        );
    }
}
