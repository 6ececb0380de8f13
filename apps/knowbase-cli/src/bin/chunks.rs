use std::env;
use std::fs;
use std::path::PathBuf;

use knowbase_core::chunker::{split, ChunkingConfig};
use knowbase_core::config::Config;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file.txt> [--max N] [--overlap N]", args[0]);
        std::process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    let config = Config::load()?;
    let defaults = config.chunking()?;
    let mut max = defaults.max_chars();
    let mut overlap = defaults.overlap_chars();
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--max" => {
                if let Some(n) = args.get(i + 1).and_then(|v| v.parse::<usize>().ok()) {
                    max = n;
                    i += 1;
                } else {
                    eprintln!("Error: --max requires a number");
                    std::process::exit(1);
                }
            }
            "--overlap" => {
                if let Some(n) = args.get(i + 1).and_then(|v| v.parse::<usize>().ok()) {
                    overlap = n;
                    i += 1;
                } else {
                    eprintln!("Error: --overlap requires a number");
                    std::process::exit(1);
                }
            }
            _ => {}
        }
        i += 1;
    }

    let text = fs::read_to_string(&path)?;
    let cfg = ChunkingConfig::new(max, overlap)?;
    let spans = split(&text, cfg);
    println!(
        "{} chunks from {} ({} bytes, max={}, overlap={})",
        spans.len(),
        path.display(),
        text.len(),
        max,
        overlap
    );
    for (i, s) in spans.iter().enumerate() {
        let preview: String = text[s.start..s.end].chars().take(60).collect();
        println!("  {:>3}. bytes {:>6}..{:<6} {:?}", i, s.start, s.end, preview);
    }
    Ok(())
}
