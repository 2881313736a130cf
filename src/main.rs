mod cue;
mod error;
mod parser;
mod processor;
mod serialiser;

use crate::parser::Parser;

use std::error::Error;
use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

#[derive(ClapParser)]
#[command(about = "Convert WebVTT subtitles into a JSON list of timed cues")]
struct Cli {
    #[arg(
        value_name = "FILE",
        help = "The subtitle file to convert. It is removed once it has been parsed.",
        default_value = "downloads/subtitle.vtt"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write to. If not supplied, the JSON will be written to standard output.",
        default_value = "-"
    )]
    output: String,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // The destination is opened first, since a successful parse consumes
    // the input.
    let dst: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout().lock())
    } else {
        let file = fs::File::create(&cli.output)
            .context(format!("Failed to create output file: '{}'", cli.output))?;
        Box::new(file)
    };

    let parser = Parser::new()?;
    let parsed = match parser.parse_file(&cli.input) {
        Ok(parsed) => parsed,
        Err(err) => {
            drop(dst);
            if cli.output != "-" {
                fs::remove_file(&cli.output).ok();
            }
            return Err(err).context(format!("Failed to convert subtitle file: '{}'", cli.input));
        }
    };

    if let Some(err) = parsed.cleanup {
        eprintln!("Warning: {}", err);
        if let Some(cause) = err.source() {
            eprintln!("    {}", cause);
        }
    }

    serialiser::serialise(&parsed.cues, dst)
}
