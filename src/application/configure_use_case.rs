// ============================================================
// Layer 2 — Configure Use Case
// ============================================================
// Interactive persona profile editor. Asks, in order:
//
//   1. persona role
//   2. persona expertise
//   3. job to be done
//   4. keywords               (comma separated)
//   5. advanced terms         (comma separated, optional)
//
// then saves the profile through PersonaStore. Answers are
// trimmed and empty list entries dropped.
//
// Reads from any BufRead and prompts on any Write, so the CLI
// passes stdin/stdout and tests pass byte buffers. Closed input
// counts as an empty answer.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::domain::persona::{Persona, PersonaProfile};
use crate::infra::persona_store::PersonaStore;

pub struct ConfigureUseCase {
    store: PersonaStore,
}

impl ConfigureUseCase {
    pub fn new(store: PersonaStore) -> Self {
        Self { store }
    }

    /// Prompt for a profile, save it, and return it.
    pub fn execute<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<PersonaProfile> {
        let profile = prompt_profile(input, output)?;
        self.store.save(&profile)?;

        let name = self
            .store
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.store.path().display().to_string());
        writeln!(output, "{} saved with new configuration.", name)?;

        tracing::info!("Persona profile saved to '{}'", self.store.path().display());
        Ok(profile)
    }
}

/// Ask every question and build the profile. Nothing is saved.
pub fn prompt_profile<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<PersonaProfile> {
    writeln!(output, "Update persona configuration:")?;

    let role      = ask(input, output, "Enter persona role (e.g., 'Data Scientist'): ")?;
    let expertise = ask(input, output, "Enter persona expertise (e.g., 'Beginner', 'Advanced'): ")?;
    let job       = ask(input, output, "Enter job to be done: ")?;
    let keywords  = ask(input, output, "Enter keywords (comma separated): ")?;
    let advanced  = ask(
        input,
        output,
        "Enter advanced/technical terms (comma separated, optional): ",
    )?;

    Ok(PersonaProfile {
        persona: Persona { role, expertise, ..Persona::default() },
        job,
        keywords: split_list(&keywords),
        advanced_terms: split_list(&advanced),
    })
}

/// Print a prompt and read one trimmed line.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("Cannot read answer")?;
    Ok(line.trim().to_string())
}

/// "a, b,,c " → ["a", "b", "c"]
pub fn split_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
