use clap::{Parser, Subcommand};
use simple_edu::load::LoadError;
use simple_edu::merge::MergeError;
use simple_edu::{config, generate, i18n, load, navigate, output, search};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simple-edu")]
#[command(about = "Static site generator for multilingual course content")]
#[command(long_about = "\
Static site generator for multilingual course content

JSON documents in the content directory are merged into one content tree
(subjects → levels → lessons, exercises, summaries) and rendered as a static
site in every configured language.

Content structure:

  content/
  ├── config.toml          # Site config (optional)
  ├── database.json        # Master subject list
  ├── math-1ac.json        # Level document: <subject>-<level>.json
  ├── math-2ac.json
  ├── physics-1ac.json
  ├── home.json            # Page documents, keyed by language
  ├── about.json
  ├── privacy.json
  └── images/              # Assets → copied to the output root

Text fields are either a plain string or a per-language object
({\"fr\": ..., \"ar\": ..., \"en\": ...}). Missing languages fall back to
French, then English.

Run 'simple-edu gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log more (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and merge all documents, print the content inventory
    Check {
        /// Language used for names
        #[arg(long)]
        lang: Option<String>,
    },
    /// Generate the static site
    Build,
    /// Search titles, content and exercise solutions
    Search {
        query: String,
        /// Search language (defaults to the site's default language)
        #[arg(long)]
        lang: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one lesson, exercise or summary
    Show {
        subject: String,
        level: String,
        /// lessons, exercises or summaries
        kind: String,
        id: String,
        #[arg(long)]
        lang: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let site_config = config::load_config(&cli.source)?;
    init_thread_pool(&site_config.processing);
    let default_lang = site_config.site.default_language.clone();

    let (site, report) = match load::load_with_source(&load::FsSource::new(&cli.source), site_config) {
        Ok(loaded) => loaded,
        Err(LoadError::Merge(MergeError::MergeUnavailable)) => {
            eprintln!("{}", i18n::translations(&default_lang).global_error());
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };

    match cli.command {
        Command::Check { lang } => {
            let lang = lang.unwrap_or(default_lang);
            println!("==> Checking {}", cli.source.display());
            output::print_load_output(&site, &report, &lang);
        }
        Command::Build => {
            println!("==> Generating HTML → {}", cli.output.display());
            let result = generate::generate(&site, Some(&cli.source), &cli.output)?;
            output::print_generate_output(&result);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Search { query, lang, json } => {
            let lang = lang.unwrap_or(default_lang);
            let Some(query) = search::searchable_query(&query, site.config.search.min_query_length)
            else {
                eprintln!(
                    "Query must be at least {} characters",
                    site.config.search.min_query_length
                );
                return Ok(ExitCode::FAILURE);
            };
            let results = search::search(&site.tree, query, &lang);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                output::print_search_results(&results, &lang);
            }
        }
        Command::Show {
            subject,
            level,
            kind,
            id,
            lang,
        } => {
            let lang = lang.unwrap_or(default_lang);
            match navigate::find_content(&site.tree, &subject, &level, &kind, &id) {
                Some(content) => output::print_content(content, &lang),
                None => {
                    println!("{}", i18n::translations(&lang).empty_content);
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Command::GenConfig => unreachable!("handled before loading"),
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Size the global rayon pool used for fetching level documents.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
