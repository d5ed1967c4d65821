// ============================================================
// Layer 2 — RankUseCase
// ============================================================
// Runs the full pipeline in order:
//
//   Step 1: List the PDFs in the input folder       (Layer 4 - data)
//   Step 2: Per document, extract tokens            (Layer 4 - data)
//           → classify headings → build sections
//   Step 3: Score every section                     (Layer 5 - relevance)
//   Step 4: Rank, pick snippets, assemble report    (Layer 5 - relevance)
//   Step 5: Write the report                        (Layer 6 - infra)
//
// Documents are processed one at a time, in file-name order.
// A document whose extraction fails is reported as a failure
// and contributes no sections; the other documents still run.
//
// The persona profile is passed in already loaded. Reading
// (or interactively editing) the configuration happens before
// this use case is built.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::{
    header_classifier::HeaderClassifier,
    loader::PdfFolder,
    section_builder::build_sections,
};
use crate::domain::persona::PersonaProfile;
use crate::domain::section::Section;
use crate::domain::traits::TokenSource;
use crate::infra::report_writer::ReportWriter;
use crate::relevance::{ranking::assemble_report, scorer::ScoringProfile};

// ─── Run Configuration ───────────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    pub input_dir:  String,
    pub output_dir: String,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            input_dir:  "./input_pdfs".to_string(),
            output_dir: "./output".to_string(),
        }
    }
}

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// What happened to one document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    Extracted { document: String, sections: Vec<Section> },
    Failed { document: String, reason: String },
}

/// A document that was skipped because its extraction failed.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFailure {
    pub document: String,
    pub reason: String,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The input folder held no PDFs; nothing was written.
    NoDocuments { input_dir: PathBuf },

    /// The report was written.
    Completed {
        report_path: PathBuf,
        documents: usize,
        sections: usize,
        results: usize,
        failures: Vec<DocumentFailure>,
    },
}

// ─── RankUseCase ──────────────────────────────────────────────────────────────
pub struct RankUseCase<S: TokenSource> {
    config:     RankConfig,
    profile:    PersonaProfile,
    source:     S,
    classifier: HeaderClassifier,
}

impl<S: TokenSource> RankUseCase<S> {
    pub fn new(config: RankConfig, profile: PersonaProfile, source: S) -> Self {
        Self {
            config,
            profile,
            source,
            classifier: HeaderClassifier::new(),
        }
    }

    /// Execute the pipeline end to end
    pub fn execute(&self) -> Result<RunOutcome> {
        let cfg = &self.config;

        // ── Step 1: List input documents ─────────────────────────────────────
        let folder = PdfFolder::new(&cfg.input_dir);
        let pdfs = folder.list()?;
        if pdfs.is_empty() {
            tracing::info!("No PDFs found in '{}'", cfg.input_dir);
            return Ok(RunOutcome::NoDocuments {
                input_dir: folder.dir().to_path_buf(),
            });
        }

        // ── Step 2: Sections per document ────────────────────────────────────
        let mut all_sections: Vec<Section> = Vec::new();
        let mut failures = Vec::new();

        for path in &pdfs {
            match self.process_document(path) {
                DocumentOutcome::Extracted { document, sections } => {
                    tracing::debug!("{}: {} sections", document, sections.len());
                    all_sections.extend(sections);
                }
                DocumentOutcome::Failed { document, reason } => {
                    tracing::warn!("Skipping '{}': {}", document, reason);
                    failures.push(DocumentFailure { document, reason });
                }
            }
        }

        // ── Step 3: Score ────────────────────────────────────────────────────
        let scoring = ScoringProfile::from(&self.profile);
        for section in &mut all_sections {
            section.score = scoring.score(section);
        }

        // ── Step 4: Rank and assemble ────────────────────────────────────────
        let report = assemble_report(&self.profile, &all_sections, &Local::now());
        tracing::info!(
            "{} of {} sections are relevant",
            report.results.len(),
            all_sections.len()
        );

        // ── Step 5: Write ────────────────────────────────────────────────────
        let results = report.results.len();
        let report_path = ReportWriter::new(&cfg.output_dir).write(&report)?;

        Ok(RunOutcome::Completed {
            report_path,
            documents: pdfs.len(),
            sections: all_sections.len(),
            results,
            failures,
        })
    }

    /// Tokens → header tags → sections for one document.
    /// Extraction failures are captured, never propagated.
    pub fn process_document(&self, path: &Path) -> DocumentOutcome {
        let document = document_name(path);
        tracing::info!("Processing {}...", document);

        match self.source.extract_tokens(path) {
            Ok(tokens) => {
                let tags: Vec<_> = self.classifier.classify(&tokens).collect();
                let sections = build_sections(&document, &tokens, &tags);
                DocumentOutcome::Extracted { document, sections }
            }
            Err(e) => DocumentOutcome::Failed {
                document,
                reason: e.to_string(),
            },
        }
    }
}

/// The file name used to identify a document in the report
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    use crate::domain::errors::ExtractionError;
    use crate::domain::report::Report;
    use crate::domain::token::Token;

    /// In-memory token source keyed by file name. Unknown files fail.
    struct FakeSource {
        docs: HashMap<String, Vec<Token>>,
    }

    impl TokenSource for FakeSource {
        fn extract_tokens(&self, path: &Path) -> Result<Vec<Token>, ExtractionError> {
            self.docs.get(&document_name(path)).cloned().ok_or_else(|| {
                ExtractionError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "corrupt file",
                ))
            })
        }
    }

    fn profile() -> PersonaProfile {
        let mut p = PersonaProfile::default();
        p.persona.role = "Engineer".to_string();
        p.persona.expertise = "Advanced".to_string();
        p.job = "Plan an audit".to_string();
        p.keywords = vec!["energy".to_string(), "diagram".to_string()];
        p.advanced_terms = vec!["exergy".to_string()];
        p
    }

    fn setup(files: &[&str]) -> (tempfile::TempDir, RankConfig) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input_pdfs");
        fs::create_dir(&input).unwrap();
        for f in files {
            fs::write(input.join(f), b"%PDF").unwrap();
        }
        let config = RankConfig {
            input_dir:  input.to_string_lossy().into_owned(),
            output_dir: dir.path().join("output").to_string_lossy().into_owned(),
        };
        (dir, config)
    }

    fn sample_docs() -> HashMap<String, Vec<Token>> {
        let mut docs = HashMap::new();
        docs.insert(
            "a.pdf".to_string(),
            vec![
                Token::new("Handbook", 20.0, 1),
                Token::new("general", 10.0, 1),
                Token::new("1.", 12.0, 1),
                Token::new("The energy diagram", 10.0, 1),
                Token::new("exergy", 10.0, 2),
            ],
        );
        docs.insert(
            "b.pdf".to_string(),
            vec![
                Token::new("Notes", 16.0, 1),
                Token::new("energy", 10.0, 1),
            ],
        );
        docs
    }

    #[test]
    fn test_empty_folder_writes_nothing() {
        let (_dir, config) = setup(&["readme.txt"]);
        let output_dir = PathBuf::from(&config.output_dir);
        let use_case = RankUseCase::new(config, profile(), FakeSource { docs: HashMap::new() });

        let outcome = use_case.execute().unwrap();
        assert!(matches!(outcome, RunOutcome::NoDocuments { .. }));
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_full_run_ranks_across_documents() {
        let (_dir, config) = setup(&["b.pdf", "a.pdf"]);
        let use_case = RankUseCase::new(config, profile(), FakeSource { docs: sample_docs() });

        let RunOutcome::Completed { report_path, documents, sections, results, failures } =
            use_case.execute().unwrap()
        else {
            panic!("expected a completed run");
        };
        assert_eq!(documents, 2);
        assert_eq!(sections, 3);
        assert_eq!(results, 2);
        assert!(failures.is_empty());

        let report: Report =
            serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
        // a.pdf "1." scores energy + diagram + exergy, b.pdf "Notes" scores energy,
        // a.pdf "Handbook" scores nothing and is dropped
        assert_eq!(report.results[0].document, "a.pdf");
        assert_eq!(report.results[0].section_title, "1.");
        assert_eq!(report.results[0].relevance_score, 3);
        assert_eq!(report.results[0].snippet, "The energy diagram");
        assert_eq!(report.results[1].document, "b.pdf");
        assert_eq!(report.results[1].relevance_rank, 2);
        assert_eq!(report.metadata.pdfs, vec!["a.pdf", "b.pdf"]);
        assert_eq!(report.metadata.job, "Plan an audit");
    }

    #[test]
    fn test_failed_document_is_isolated() {
        let (_dir, config) = setup(&["a.pdf", "broken.pdf"]);
        let use_case = RankUseCase::new(config, profile(), FakeSource { docs: sample_docs() });

        let RunOutcome::Completed { results, failures, .. } = use_case.execute().unwrap() else {
            panic!("expected a completed run");
        };
        assert_eq!(results, 1);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].document, "broken.pdf");
        assert!(failures[0].reason.contains("corrupt file"));
    }

    #[test]
    fn test_document_without_headings_has_no_sections() {
        let mut docs = HashMap::new();
        docs.insert("flat.pdf".to_string(), Vec::new());
        let use_case = RankUseCase::new(RankConfig::default(), profile(), FakeSource { docs });

        assert_eq!(
            use_case.process_document(Path::new("/tmp/flat.pdf")),
            DocumentOutcome::Extracted {
                document: "flat.pdf".to_string(),
                sections: Vec::new(),
            }
        );
    }
}
