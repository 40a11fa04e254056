//! Edge-case behaviour of the query engine.

use crate::common::*;

#[test]
fn test_not_of_missing_term_is_universe() {
    let (_dir, index) = build_and_load(SCENARIO_CORPUS);
    assert_eq!(eval_line(&index, "!zzzmissing"), vec![0, 1]);
}

#[test]
fn test_missing_term_alone_is_empty() {
    let (_dir, index) = build_and_load(SCENARIO_CORPUS);
    assert_eq!(eval_line(&index, "zzzmissing"), Vec::<u32>::new());
}

#[test]
fn test_empty_program_yields_empty_result() {
    let (_dir, index) = build_and_load(SCENARIO_CORPUS);
    assert_eq!(eval_line(&index, ""), Vec::<u32>::new());
    assert_eq!(eval_line(&index, "@#$%"), Vec::<u32>::new());
}

#[test]
fn test_operator_underflow_is_tolerated() {
    let (_dir, index) = build_and_load(SCENARIO_CORPUS);
    // Missing operands read as the empty list; nothing panics.
    assert_eq!(eval_line(&index, "&& cat"), Vec::<u32>::new());
    assert_eq!(eval_line(&index, "cat &&"), Vec::<u32>::new());
    assert_eq!(eval_line(&index, "||"), Vec::<u32>::new());
    // OR with one missing operand degrades to the present one.
    assert_eq!(eval_line(&index, "|| cat"), vec![0]);
}

#[test]
fn test_unbalanced_parens_tolerated() {
    let (_dir, index) = build_and_load(SCENARIO_CORPUS);
    assert_eq!(eval_line(&index, "(cat"), eval_line(&index, "cat"));
    assert_eq!(eval_line(&index, "cat)"), eval_line(&index, "cat"));
    assert_eq!(eval_line(&index, "((cat))"), eval_line(&index, "cat"));
    assert_eq!(eval_line(&index, "(cat)))"), eval_line(&index, "cat"));
}

#[test]
fn test_not_partition_of_present_term() {
    let (_dir, index) = build_and_load(SCENARIO_CORPUS);
    let pos = eval_line(&index, "cat");
    let neg = eval_line(&index, "!cat");
    let mut all = pos.clone();
    all.extend(&neg);
    all.sort_unstable();
    assert_eq!(all, vec![0, 1]);
    assert!(pos.iter().all(|d| !neg.contains(d)));
}

#[test]
fn test_garbage_between_terms_is_ignored() {
    let (_dir, index) = build_and_load(SCENARIO_CORPUS);
    assert_eq!(
        eval_line(&index, "cat ### dog"),
        eval_line(&index, "cat dog")
    );
}

#[test]
fn test_numeric_terms() {
    let (_dir, index) = build_and_load(&[
        ("a", "A", "", "error 404 page"),
        ("b", "B", "", "status 200 ok"),
    ]);
    assert_eq!(eval_line(&index, "404"), vec![0]);
    assert_eq!(eval_line(&index, "404 || 200"), vec![0, 1]);
}
