use anyhow::{bail, Context, Result};
use clap::Parser;
use song_match::config::ConfigArgs;
use song_match::logging::init_tracing;
use song_match::records::candidates_from_json;
use song_match::safety::safe_file_name;
use song_match::selection::{parse_selection, Selection};
use song_match::{Candidate, MatchResult, Resolver};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "song-match")]
#[command(about = "Resolve a free-text song query against provider search results")]
struct Args {
    /// Provider search response (JSON array or provider envelope)
    candidates: PathBuf,

    /// "title-artist", "title artist", a bare title or a bare artist
    query: String,

    /// Pick from a shortlist: "3", "1,3,5", "2-6", "all" or "0"
    #[arg(long)]
    pick: Option<String>,

    /// Extension used for the suggested download file names
    #[arg(long, default_value = "mp3")]
    ext: String,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Debug logging for the resolver
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    tuning: ConfigArgs,
}

fn print_candidate(idx: usize, c: &Candidate) {
    let album = c.album.as_deref().unwrap_or("-");
    println!(
        "{:>3}. {} - {}  [{}]  (ID: {})",
        idx + 1,
        c.title,
        c.artist,
        album,
        c.id
    );
}

fn print_result(query: &str, result: &MatchResult) {
    println!("\nResults for '{}':", query);
    println!("{:-<80}", "");
    match result {
        MatchResult::SingleMatch { candidate } => {
            println!("Match:");
            print_candidate(0, candidate);
        }
        MatchResult::Shortlist { candidates, reason } => {
            println!("Shortlist ({}, {} candidates):", reason, candidates.len());
            for (i, c) in candidates.iter().enumerate() {
                print_candidate(i, c);
            }
        }
        MatchResult::NoMatch => println!("No results found."),
    }
    println!("{:-<80}", "");
}

/// Candidates a `--pick` selection applies to.
fn pickable(result: &MatchResult) -> &[Candidate] {
    match result {
        MatchResult::SingleMatch { candidate } => std::slice::from_ref(candidate),
        MatchResult::Shortlist { candidates, .. } => candidates,
        MatchResult::NoMatch => &[],
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.tuning.load().context("Invalid resolver configuration")?;
    let resolver = Resolver::new(config);

    let text = std::fs::read_to_string(&args.candidates)
        .with_context(|| format!("Failed to read {:?}", args.candidates))?;
    let candidates = candidates_from_json(&text)
        .with_context(|| format!("Failed to decode candidates from {:?}", args.candidates))?;
    info!("Loaded {} candidates", candidates.len());

    let result = resolver.resolve(&args.query, &candidates)?;
    info!(kind = result.kind(), "Resolved '{}'", args.query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&args.query, &result);
    }

    if let Some(pick) = &args.pick {
        let options = pickable(&result);
        if options.is_empty() {
            bail!("Nothing to pick from: no candidates matched '{}'", args.query);
        }
        match parse_selection(pick, options.len())? {
            Selection::Cancel => println!("Selection cancelled."),
            Selection::Indices(indices) => {
                println!("\nSelected {} track(s):", indices.len());
                for i in indices {
                    let c = &options[i];
                    print_candidate(i, c);
                    println!("     -> {}", safe_file_name(c, &args.ext));
                }
            }
        }
    }

    Ok(())
}
