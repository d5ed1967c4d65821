// ============================================================
// Layer 3 — Persona Profile
// ============================================================
// The persona / job profile a run ranks sections against.
// Mirrors the on-disk JSON layout:
//
//   {
//     "persona": { "role": "...", "expertise": "..." },
//     "job": "...",
//     "keywords": ["...", ...],
//     "advanced_terms": ["...", ...]
//   }
//
// Every field is optional on read and defaults to empty.
// Unknown keys inside "persona" are kept and written back out
// with the report metadata.
// Loaded once per run and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Who the report is for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default)]
    pub role: String,

    /// Free text, e.g. "Beginner" or "Advanced". Advanced-term
    /// scoring only applies when this mentions "advanced".
    #[serde(default)]
    pub expertise: String,

    /// Any other persona keys, e.g. "focus" or "languages"
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The full profile: persona plus job, keywords and advanced terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    #[serde(default)]
    pub persona: Persona,

    #[serde(default)]
    pub job: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub advanced_terms: Vec<String>,
}

impl PersonaProfile {
    /// True when the persona's expertise mentions "advanced"
    /// (case-insensitive).
    pub fn is_advanced(&self) -> bool {
        self.persona.expertise.to_lowercase().contains("advanced")
    }
}
