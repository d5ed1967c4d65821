// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   rank       — rank PDF sections against the persona profile
//   configure  — interactively write the persona profile
//   outline    — show the sections detected in one PDF
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::rank_use_case::RankConfig;
use crate::infra::persona_store::DEFAULT_CONFIG_FILE;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank the sections of every PDF in the input folder
    Rank(RankArgs),

    /// Write the persona profile interactively
    Configure(ConfigureArgs),

    /// Print the sections detected in a single PDF
    Outline(OutlineArgs),
}

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Folder containing the PDFs to rank
    #[arg(long, default_value = "./input_pdfs")]
    pub input_dir: String,

    /// Folder the report is written to (as persona_results.json)
    #[arg(long, default_value = "./output")]
    pub output_dir: String,

    /// Persona profile JSON
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Edit the persona profile interactively before ranking
    #[arg(long)]
    pub configure: bool,
}

/// The application layer never sees clap types.
impl From<&RankArgs> for RankConfig {
    fn from(a: &RankArgs) -> Self {
        RankConfig {
            input_dir:  a.input_dir.clone(),
            output_dir: a.output_dir.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Where to save the persona profile
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,
}

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// The PDF to inspect
    pub pdf: String,
}
