// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands the work to Layer 2 and
// prints the human-facing summary. Nothing is computed here.
//
// Exit status:
//   0 — report written, or no PDFs found (nothing written)
//   1 — fatal error, e.g. persona config missing
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ConfigureArgs, OutlineArgs, RankArgs};
use std::io;
use std::path::Path;

use crate::data::loader::PdfTokenizer;
use crate::infra::persona_store::PersonaStore;

#[derive(Parser, Debug)]
#[command(
    name = "persona-rank",
    version,
    about = "Rebuild PDF section structure and rank sections for a persona and job."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Rank(args)      => run_rank(args),
            Commands::Configure(args) => run_configure(args),
            Commands::Outline(args)   => run_outline(args),
        }
    }
}

fn run_rank(args: RankArgs) -> Result<()> {
    use crate::application::configure_use_case::ConfigureUseCase;
    use crate::application::rank_use_case::{RankUseCase, RunOutcome};

    if args.configure {
        ConfigureUseCase::new(PersonaStore::new(&args.config))
            .execute(&mut io::stdin().lock(), &mut io::stdout())?;
    }

    // Missing config is fatal before any document is read
    let profile = PersonaStore::new(&args.config).load()?;

    let use_case = RankUseCase::new((&args).into(), profile, PdfTokenizer::new());
    match use_case.execute()? {
        RunOutcome::NoDocuments { input_dir } => {
            println!(
                "No PDFs found in {}. Please add PDFs and try again.",
                input_dir.display()
            );
        }
        RunOutcome::Completed { report_path, documents, results, failures, .. } => {
            if !failures.is_empty() {
                println!("Skipped {} of {} documents:", failures.len(), documents);
                for f in &failures {
                    println!("  - {}: {}", f.document, f.reason);
                }
            }
            println!("{} relevant sections ranked.", results);
            println!("Done! Results saved to {}", report_path.display());
        }
    }
    Ok(())
}

fn run_configure(args: ConfigureArgs) -> Result<()> {
    use crate::application::configure_use_case::ConfigureUseCase;

    ConfigureUseCase::new(PersonaStore::new(&args.config))
        .execute(&mut io::stdin().lock(), &mut io::stdout())?;
    Ok(())
}

fn run_outline(args: OutlineArgs) -> Result<()> {
    use crate::application::outline_use_case::OutlineUseCase;

    let sections = OutlineUseCase::new(PdfTokenizer::new()).outline(Path::new(&args.pdf))?;
    if sections.is_empty() {
        println!("No headings detected in {}", args.pdf);
    }
    for s in &sections {
        println!("{}\tp{}\t{}\t({} content lines)", s.level, s.page, s.title, s.line_count());
    }
    Ok(())
}
