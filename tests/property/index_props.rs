//! Built-index invariants over randomly generated corpora.
//!
//! Each case writes a corpus to disk, runs the real build, loads the
//! artifacts back, and checks the index against an oracle computed directly
//! from the document texts. Cases are few because every one is a full
//! build, but each case checks every invariant at once.

use std::collections::{BTreeMap, BTreeSet};

use crate::common::*;
use boolex::Tokenizer;
use proptest::prelude::*;

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    let word = prop::string::string_regex("[a-z0-9]{1,8}").unwrap();
    let doc = prop::collection::vec(word, 0..12).prop_map(|words| words.join(" "));
    prop::collection::vec(doc, 1..6)
}

/// Stems of a document text, computed independently of the build pipeline's
/// accumulation structures.
fn oracle_stems(text: &str) -> BTreeSet<Vec<u8>> {
    let mut stems = BTreeSet::new();
    let mut tok = Tokenizer::new();
    tok.feed(text.as_bytes(), |t| {
        let mut stem = t.to_vec();
        boolex::stem_in_place(&mut stem);
        if !stem.is_empty() {
            stems.insert(stem);
        }
    });
    tok.finish(|t| {
        let mut stem = t.to_vec();
        boolex::stem_in_place(&mut stem);
        if !stem.is_empty() {
            stems.insert(stem);
        }
    });
    stems
}

fn build_from_texts(texts: &[String]) -> (tempfile::TempDir, boolex::Index) {
    let docs: Vec<(String, String, String, String)> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            (
                format!("d{i}"),
                format!("Doc {i}"),
                format!("/doc/{i}"),
                text.clone(),
            )
        })
        .collect();
    let refs: Vec<TestDoc> = docs
        .iter()
        .map(|(a, b, c, d)| (a.as_str(), b.as_str(), c.as_str(), d.as_str()))
        .collect();
    build_and_load(&refs)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Invariants 1, 3, 5: strictly increasing postings, strictly sorted
    /// lexicon, df consistency.
    #[test]
    fn prop_index_well_formed(texts in corpus_strategy()) {
        let (_dir, index) = build_from_texts(&texts);

        let terms = dump_terms(&index);
        for pair in terms.windows(2) {
            prop_assert!(pair[0].0 < pair[1].0, "lexicon out of order");
        }
        for (term, postings) in &terms {
            prop_assert!(!postings.is_empty(), "df=0 term {:?} in lexicon", term);
            for ids in postings.windows(2) {
                prop_assert!(ids[0] < ids[1], "postings of {:?} not strictly increasing", term);
            }
            prop_assert!(postings.iter().all(|&d| d < index.doc_count()));
        }
        for i in 0..index.term_count() as usize {
            let rec = index.lexicon_record(i);
            prop_assert_eq!(rec.df, rec.postings_len);
        }
    }

    /// Invariants 2 and 4: d is in postings(t) iff some token of doc d stems
    /// to t, and never more than once.
    #[test]
    fn prop_postings_match_oracle(texts in corpus_strategy()) {
        let (_dir, index) = build_from_texts(&texts);

        let mut expected: BTreeMap<Vec<u8>, Vec<u32>> = BTreeMap::new();
        for (doc_id, text) in texts.iter().enumerate() {
            for stem in oracle_stems(text) {
                expected.entry(stem).or_default().push(doc_id as u32);
            }
        }

        let actual: BTreeMap<Vec<u8>, Vec<u32>> = dump_terms(&index).into_iter().collect();
        prop_assert_eq!(actual, expected);
    }

    /// Binary search finds exactly the stored terms.
    #[test]
    fn prop_find_term_exact(texts in corpus_strategy()) {
        let (_dir, index) = build_from_texts(&texts);

        for (i, (term, _)) in dump_terms(&index).into_iter().enumerate() {
            prop_assert_eq!(index.find_term(&term), Some(i));
        }
        prop_assert_eq!(index.find_term(b"zzzzzzzzzznotaterm"), None);
        prop_assert_eq!(index.find_term(b""), None);
    }

    /// Invariant 6: NOT partitions the universe for every stored term.
    #[test]
    fn prop_not_partitions_universe(texts in corpus_strategy()) {
        let (_dir, index) = build_from_texts(&texts);

        for (term, postings) in dump_terms(&index) {
            let complement = boolex::query::complement(index.doc_count(), &postings);
            prop_assert!(postings.iter().all(|d| !complement.contains(d)));
            let mut union = boolex::query::unite(&postings, &complement);
            union.dedup();
            let universe: Vec<u32> = (0..index.doc_count()).collect();
            prop_assert_eq!(union, universe, "partition failed for {:?}", term);
        }
    }
}
