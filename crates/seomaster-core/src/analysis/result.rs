use serde::{Deserialize, Serialize};

use crate::genai::Citation;

/// The terminal result of one streaming analysis: the full Markdown
/// transcript plus the web sources it was grounded on, unique by uri in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub transcript: String,
    pub citations: Vec<Citation>,
}

impl AnalysisResult {
    /// Renders the result as a single Markdown document, appending a
    /// Sources section when any citations were collected.
    pub fn to_markdown(&self) -> String {
        let mut md = self.transcript.clone();

        if !self.citations.is_empty() {
            if !md.is_empty() && !md.ends_with('\n') {
                md.push('\n');
            }
            md.push_str("\n## 🌐 Sources\n");
            for citation in &self.citations {
                md.push_str(&format!("* [{}]({})\n", citation.title, citation.uri));
            }
        }

        md
    }
}
