//! Review inputs and their validation.

use crate::error::ReviewError;
use serde::{Deserialize, Serialize};

/// Language the analysis should answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Chinese.
    Zh,
}

/// Everything a reviewer submits for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisInput {
    /// Ground-truth facts the output must respect.
    pub facts: String,
    /// The prompt (process) that produced the output.
    pub process: String,
    /// Optional reasoning trace.
    pub reasoning: String,
    /// The generated output under review.
    pub output: String,
    /// Answer language.
    pub language: Language,
}

impl AnalysisInput {
    /// Ensure the required fields (`facts`, `output`) are not blank.
    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.facts.trim().is_empty() {
            return Err(ReviewError::MissingInput { field: "facts" });
        }
        if self.output.trim().is_empty() {
            return Err(ReviewError::MissingInput { field: "output" });
        }
        Ok(())
    }
}
