//*** START FILE: src/main.rs ***//
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use conlang_lexicon::config::load_config;
use conlang_lexicon::language_builder::build_language;
use conlang_lexicon::language_io::{load_save, save_language};
use conlang_lexicon::Result;

/// Builds a lexicon document from a language generator save file.
#[derive(Parser, Debug)]
#[command(name = "conlang-lexicon", version, about)]
struct Args {
    /// Save file to read.
    #[arg(short = 'i', long = "input", value_name = "FILE_PATH")]
    input: PathBuf,

    /// Where the language document is written.
    #[arg(short = 'o', long = "output", value_name = "FILE_PATH")]
    output: PathBuf,

    /// Generator settings; `config.toml` is used when present.
    #[arg(short = 'c', long = "config", value_name = "FILE_PATH")]
    config: Option<PathBuf>,

    /// Include every declined form of every word. Produces a large document.
    #[arg(long)]
    decline: bool,

    /// Leave out the derived word list.
    #[arg(long)]
    no_derive: bool,

    /// Amazon Polly voice for speaking the language.
    #[arg(short = 'v', long)]
    voice: Option<String>,

    /// espeak-ng language code.
    #[arg(long)]
    espeak_language: Option<String>,

    /// Language whose phonetics should be used when speaking.
    #[arg(short = 'l', long = "language")]
    language: Option<String>,
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut options = config.build_options();
    // flags win over the config file
    if args.decline {
        options.decline = true;
    }
    if args.no_derive {
        options.derive = false;
    }
    if args.voice.is_some() {
        options.voice = args.voice;
    }
    if args.espeak_language.is_some() {
        options.espeak_language = args.espeak_language;
    }
    if args.language.is_some() {
        options.preferred_language = args.language;
    }

    let save = load_save(&args.input)?;
    let language = build_language(&save, &options)?;
    save_language(&language, &args.output)?;
    info!(
        entries = language.lexicon.len(),
        output = %args.output.display(),
        "done"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
//*** END FILE: src/main.rs ***//
