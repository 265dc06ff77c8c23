//! Command-line front end: build an index from a directory of text files,
//! or run a Boolean search against a previously built one.

use std::env;
use std::process::ExitCode;

use textdex::{load_doc_map, FsCorpus, IndexPaths, Result, Retriever};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let result = match args.get(1).map(String::as_str) {
        Some("build") if args.len() == 4 => build(&args[2], &args[3]),
        Some("search") if args.len() >= 4 => search(&args[2], &args[3..]),
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!(
        r#"textdex-cli: a self-contained Boolean text search engine

Usage:
  textdex-cli build <corpus-dir> <index-dir>
  textdex-cli search <index-dir> <query...>
"#
    );
}

fn build(corpus_dir: &str, index_dir: &str) -> Result<()> {
    std::fs::create_dir_all(index_dir)?;
    let paths = IndexPaths::in_dir(index_dir);

    let corpus = FsCorpus::scan(corpus_dir)?;
    let report = textdex::build_index(corpus, &paths)?;

    println!(
        "indexed {} documents ({} skipped), {} distinct terms",
        report.documents_indexed, report.documents_skipped, report.terms_indexed
    );
    Ok(())
}

fn search(index_dir: &str, query_words: &[String]) -> Result<()> {
    let paths = IndexPaths::in_dir(index_dir);
    let retriever = Retriever::load(&paths)?;
    let doc_map = load_doc_map(&paths.docmap_path).unwrap_or_default();

    let query = query_words.join(" ");
    let results = retriever.search(&query);

    if results.is_empty() {
        println!("no matches for {query:?}");
        return Ok(());
    }

    for (rank, doc_id) in results.iter().enumerate() {
        match doc_map.get(doc_id) {
            Some(path) => println!("{}. doc {} ({})", rank + 1, doc_id, path),
            None => println!("{}. doc {}", rank + 1, doc_id),
        }
    }
    Ok(())
}
