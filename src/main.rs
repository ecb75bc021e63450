use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use talentsheet::{Job, PageSize, generate_talent_trees};

#[derive(Parser, Debug)]
#[command(version, about = "Generate printable talent tree sheets as PDF")]
struct Args {
    /// Sheet records: a YAML document stream, or a JSON list if named *.json
    #[arg(short, long)]
    data: PathBuf,

    /// Localization file (.properties, UTF-8)
    #[arg(short, long)]
    strings: Option<PathBuf>,

    /// Language picking strings_<lang>.txt next to the data file (ignored when --strings is set)
    #[arg(short, long)]
    lang: Option<String>,

    /// Directory holding the sheet typefaces
    #[arg(short, long)]
    fonts: Option<PathBuf>,

    #[arg(short, long, value_enum, ignore_case = true, default_value_t = PageSize::A4)]
    page_size: PageSize,

    /// Output PDF; defaults to the localized file name
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let job = Job {
        data: &args.data,
        strings: args.strings.as_deref(),
        language: args.lang.as_deref(),
        fonts: args.fonts.as_deref(),
        page_size: args.page_size,
        output: args.output.as_deref(),
    };
    match generate_talent_trees(&job) {
        Ok(path) => {
            log::info!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
