//! Terminal demo for the completion engine.
//!
//! Feeds typed lines character by character through a [`Session`] over an
//! in-memory surface, so the offer/overwrite/commit flow can be exercised
//! without a graphical text widget. A pending completion shows up as the
//! bracketed (selected) portion of the buffer.
//!
//! Run with: cargo run -p libcomplete-cli -- path/to/word-freq.txt

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use libcomplete_core::{
    dictionary, BufferSurface, Completer, CompletionEditor, Config, Mode, Session, TextSurface,
};

#[derive(Parser, Debug)]
#[command(name = "libcomplete", about = "Frequency-ranked word completion demo")]
struct Args {
    /// Word-frequency dictionary file (one "rank word frequency" line per word)
    dictionary: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_toml(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    let trie = dictionary::load_from_path(&args.dictionary);
    if trie.is_empty() {
        println!("dictionary empty or unavailable; continuing without completions");
    } else {
        println!("dictionary loaded: {} words", trie.word_count());
    }

    let completer = Arc::new(Completer::new(trie, &config));
    let editor = CompletionEditor::new(completer.clone(), &config);
    let mut session = Session::new(BufferSurface::new(), editor);

    println!();
    println!("Type text and press Enter to feed it character by character.");
    println!("Commands:");
    println!("  :commit         accept the pending completion (or insert a newline)");
    println!("  :back           backspace once");
    println!("  :list <prefix>  list dictionary words with the prefix");
    println!("  :best <prefix>  show the most frequent word with the prefix");
    println!("  :clear          clear the buffer");
    println!("  :quit           exit");
    println!();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        match line {
            ":quit" => break,
            ":commit" => {
                session.commit();
                render(&session);
            }
            ":back" => {
                session.backspace();
                render(&session);
            }
            ":clear" => {
                session.clear();
                render(&session);
            }
            _ if line.starts_with(":list") => {
                let prefix = line[":list".len()..].trim();
                let words = completer.completions(prefix);
                if words.is_empty() {
                    println!("  (no words with prefix {prefix:?})");
                } else {
                    for word in words {
                        println!("  {word}");
                    }
                }
            }
            _ if line.starts_with(":best") => {
                let prefix = line[":best".len()..].trim();
                match completer.most_frequent(prefix) {
                    Some(candidate) => {
                        println!("  {} (frequency {})", candidate.text, candidate.frequency)
                    }
                    None => println!("  (no match for prefix {prefix:?})"),
                }
            }
            _ => {
                for ch in line.chars() {
                    session.type_char(ch);
                }
                render(&session);
            }
        }
    }

    let (hits, misses) = completer.cache_stats();
    tracing::debug!(hits, misses, "query cache at exit");
    println!("bye");
    Ok(())
}

/// Print the buffer with the pending (selected) suffix bracketed.
fn render(session: &Session<BufferSurface>) {
    let surface = session.surface();
    let chars: Vec<char> = surface.text().chars().collect();
    let start = surface.selection_start();
    let end = surface.selection_end();

    let label = match session.mode() {
        Mode::Insert => "insert",
        Mode::Completion => "completion",
    };

    if start == end {
        let text: String = chars.iter().collect();
        println!("  [{label}] {text}");
    } else {
        let before: String = chars[..start].iter().collect();
        let selected: String = chars[start..end].iter().collect();
        let after: String = chars[end..].iter().collect();
        println!("  [{label}] {before}[{selected}]{after}");
    }
}
