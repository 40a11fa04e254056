//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use boolex::{run_build, BuildOptions, Index};
use tempfile::TempDir;

/// One test document: (doc_id, title, url, text).
pub type TestDoc<'a> = (&'a str, &'a str, &'a str, &'a str);

/// The two-document corpus from the end-to-end scenarios: "run" stems from
/// both docs, "cat" only from the first, "dog"/"fast" only from the second.
pub const SCENARIO_CORPUS: &[TestDoc<'static>] = &[
    ("d0", "Cats", "http://example.org/cats", "The cats are running."),
    ("d1", "Dogs", "http://example.org/dogs", "A dog runs fast."),
];

/// Write a manifest plus corpus directory into a fresh temp dir.
///
/// Manifest lines are generated with serde_json so the bespoke extractor is
/// always exercised against real JSON shapes.
pub fn write_corpus(docs: &[TestDoc]) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus).expect("create corpus dir");

    let mut manifest = String::new();
    for (doc_id, title, url, text) in docs {
        let line = serde_json::json!({
            "doc_id": doc_id,
            "title": title,
            "url": url,
        });
        manifest.push_str(&line.to_string());
        manifest.push('\n');
        fs::write(corpus.join(format!("{doc_id}.txt")), text).expect("write doc");
    }
    fs::write(dir.path().join("manifest.jsonl"), manifest).expect("write manifest");
    dir
}

/// Build an index under `<dir>/<out_name>` with the given memory budget.
pub fn build_into(dir: &TempDir, out_name: &str, mem_mb: u64) -> PathBuf {
    let out = dir.path().join(out_name);
    run_build(&BuildOptions {
        manifest: dir.path().join("manifest.jsonl"),
        corpus: dir.path().join("corpus"),
        out: out.clone(),
        mem_mb,
        report_mb: 0,
    })
    .expect("build should succeed");
    out
}

/// Write, build with a default budget, and load: the common happy path.
pub fn build_and_load(docs: &[TestDoc]) -> (TempDir, Index) {
    let dir = write_corpus(docs);
    let out = build_into(&dir, "out", 512);
    let index = Index::load(&out).expect("load built index");
    (dir, index)
}

/// Evaluate one query line against a loaded index.
pub fn eval_line(index: &Index, line: &str) -> Vec<u32> {
    boolex::eval_postfix(index, &boolex::parse_query(line))
}

/// Stem a word the way the engine does, as a String.
pub fn stem_str(word: &str) -> String {
    let mut buf = word.as_bytes().to_vec();
    boolex::stem_in_place(&mut buf);
    String::from_utf8(buf).expect("stems of ASCII input are ASCII")
}

/// All (term, postings) pairs of a loaded index, in lexicon order.
pub fn dump_terms(index: &Index) -> Vec<(Vec<u8>, Vec<u32>)> {
    (0..index.term_count() as usize)
        .map(|i| {
            let rec = index.lexicon_record(i);
            (
                index.term_bytes(&rec).to_vec(),
                index.postings(&rec).to_vec(),
            )
        })
        .collect()
}
