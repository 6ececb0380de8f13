use std::env;
use std::path::PathBuf;

use knowbase_core::config::{expand_path, Config};
use knowbase_core::corpus::Corpus;
use knowbase_embed::default_embedder;
use knowbase_retrieval::RetrievalService;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [--k N] [--json] [corpus_dir]", args[0]);
        eprintln!("Example: {} 'how do I redeem a voucher' --k 3", args[0]);
        std::process::exit(1);
    }
    let query_text = &args[1];

    let config = Config::load()?;
    let mut k = config.default_k();
    let mut json = false;
    let mut corpus_dir: Option<PathBuf> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--k" => {
                if let Some(n) = args.get(i + 1).and_then(|v| v.parse::<usize>().ok()) {
                    k = n;
                    i += 1;
                } else {
                    eprintln!("Error: --k requires a number");
                    std::process::exit(1);
                }
            }
            "--json" => json = true,
            _ if !args[i].starts_with('-') => corpus_dir = Some(PathBuf::from(&args[i])),
            _ => {}
        }
        i += 1;
    }

    let corpus = match corpus_dir {
        Some(dir) => Corpus::from_dir(&dir)?,
        None => match config.get::<String>("data.corpus_dir") {
            Ok(dir) => Corpus::from_dir(&expand_path(dir))?,
            Err(_) => Corpus::builtin(),
        },
    };

    let embedder = default_embedder()?;
    let service = RetrievalService::new(embedder, corpus, config.chunking()?);
    service.initialize()?;

    let chunks = service.retrieve(query_text, k);
    if json {
        println!("{}", serde_json::to_string_pretty(&chunks)?);
        return Ok(());
    }
    println!("Found {} passages for: \"{}\"", chunks.len(), query_text);
    for (i, chunk) in chunks.iter().enumerate() {
        println!(
            "\n  {}. {}#{} (bytes {}..{})",
            i + 1,
            chunk.doc_id,
            chunk.chunk_index,
            chunk.start_offset,
            chunk.end_offset
        );
        println!("     {}", chunk.content.trim());
    }
    Ok(())
}
