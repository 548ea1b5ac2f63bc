use anyhow::{bail, Context};
use clap::Parser;
use serde_json::Value;
use std::fs;

use quizdex::binary::{corpus_key, decode_snapshot, inspect, BlobFooter, BlobHeader};
use quizdex::keywords::collect_strings;
use quizdex::{
    segment, vocabulary, DocumentStore, EngineConfig, MemoryStore, SearchEngine, SearchOptions,
    Tokenizer, Vocabulary,
};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display::{
    bucket_label, check, ellipsize, field, format_size, row, savings_colored, score_value,
    section_bot, section_mid, section_top, themed, GRAY,
};
use cli::{Cli, Commands};

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `QUIZDEX_LOG` (warnings only by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("QUIZDEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Search {
            docs,
            query,
            collection,
            page,
            page_size,
            use_tag,
        } => {
            let engine = open_engine(&docs, &collection, config)?;
            run_search(&engine, &collection, &query, page_size, page, use_tag)
        }
        Commands::Complete {
            docs,
            prefix,
            collection,
            tags,
            limit,
        } => {
            let engine = open_engine(&docs, &collection, config)?;
            let vocabulary = if tags {
                Vocabulary::Tags
            } else {
                Vocabulary::Words
            };
            for completion in engine.prefix_search(&collection, vocabulary, &prefix, limit)? {
                println!("{}", completion);
            }
            Ok(())
        }
        Commands::Index {
            docs,
            output,
            collection,
        } => {
            let engine = open_engine(&docs, &collection, config)?;
            run_index(&engine, &collection, &output)
        }
        Commands::Inspect { file } => run_inspect(&file),
        Commands::Tokenize { text } => {
            run_tokenize(&text);
            Ok(())
        }
    }
}

/// Load a docs file into a memory store and wrap it in an engine.
///
/// An array goes into `collection`; an object maps collection names to arrays.
fn open_engine(
    path: &str,
    collection: &str,
    config: EngineConfig,
) -> anyhow::Result<SearchEngine<MemoryStore>> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let json: Value =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path))?;

    let store = MemoryStore::new();
    match &json {
        Value::Array(_) => {
            let schema = config.schema(collection);
            store.import(collection, &json, &schema.id_field)?;
        }
        Value::Object(collections) => {
            for (name, docs) in collections {
                let schema = config.schema(name);
                store.import(name, docs, &schema.id_field)?;
            }
        }
        _ => bail!("{} must hold a JSON array or an object of arrays", path),
    }

    Ok(SearchEngine::new(store, config)?)
}

fn run_search(
    engine: &SearchEngine<MemoryStore>,
    collection: &str,
    query: &str,
    page_size: usize,
    page: usize,
    use_tag: bool,
) -> anyhow::Result<()> {
    let options = SearchOptions { use_tag };
    let scored = engine.search_scored(collection, query, page_size, page, options)?;

    section_top("QUERY");
    field("text", query);
    field("keywords", &scored.keywords.join(" "));
    field(
        "page",
        &format!("{} of {}", page + 1, scored.total_pages.max(1)),
    );

    section_mid("RESULTS");
    if scored.result.is_empty() {
        row(&format!(" {}", themed(GRAY, &[], "no matches")));
    }
    let top = scored.result.first().map_or(0.0, |hit| hit.score);
    for hit in &scored.result {
        let snippet = engine
            .store()
            .get_document(collection, &hit.doc_id)?
            .and_then(|doc| collect_strings(&doc.body).first().map(|s| s.to_string()))
            .unwrap_or_default();
        row(&format!(
            " {} {:<14} {}",
            score_value(hit.score, top),
            ellipsize(&hit.doc_id, 14),
            ellipsize(&snippet, 44)
        ));
    }
    section_bot();
    Ok(())
}

fn run_index(
    engine: &SearchEngine<MemoryStore>,
    collection: &str,
    output: &str,
) -> anyhow::Result<()> {
    let snapshot = engine.rebuild(collection)?;
    let Some(blob) = engine.store().load_corpus_stats(&corpus_key(collection))? else {
        bail!("corpus for {} was not persisted", collection);
    };
    fs::write(output, &blob).with_context(|| format!("Failed to write {}", output))?;

    section_top("INDEX");
    field("collection", collection);
    field("documents", &snapshot.stats.total_docs.to_string());
    field("words", &snapshot.words.len().to_string());
    field("tags", &snapshot.tags.len().to_string());
    field("blob", &format!("{} → {}", format_size(blob.len()), output));
    section_bot();
    Ok(())
}

fn run_inspect(path: &str) -> anyhow::Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    let header = inspect(&bytes)?;
    let snapshot = decode_snapshot(&bytes)?;
    let crc = BlobFooter::read(&bytes[bytes.len() - BlobFooter::SIZE..])?.crc32;

    section_top("BLOB");
    field("file", path);
    field("size", &format_size(bytes.len()));
    field("version", &header.version.to_string());
    field(
        "compression",
        if header.flags.is_brotli() {
            "brotli"
        } else {
            "none"
        },
    );
    field(
        "payload",
        &format!(
            "{} ({})",
            format_size(header.payload_len as usize),
            savings_colored(
                header.uncompressed_len as usize,
                header.payload_len as usize
            )
        ),
    );
    field("crc32", &format!("{:#010x} {}", crc, check(true)));
    field("header bytes", &BlobHeader::SIZE.to_string());

    section_mid("CORPUS");
    let stats = &snapshot.stats;
    field("documents", &stats.total_docs.to_string());
    field("avg length", &format!("{:.2}", stats.average_doc_length));
    field("avg bigrams", &format!("{:.2}", stats.average_doc_length2));
    field("unigrams", &stats.vocabulary_size().to_string());
    field("bigrams", &stats.idf2.len().to_string());
    field("words trie", &snapshot.words.len().to_string());
    field("tags trie", &snapshot.tags.len().to_string());
    section_bot();
    Ok(())
}

fn run_tokenize(text: &str) {
    let normalized = quizdex::normalize(text);
    let tokenizer = Tokenizer::for_text(&normalized);

    section_top("TOKENIZE");
    field("bucket", &bucket_label(tokenizer.bucket()));
    field("raw split", &tokenizer.split(&normalized).join(" | "));
    field("segment", &segment(&normalized).join(" | "));
    field("vocabulary", &vocabulary(text).join(" | "));
    section_bot();
}
