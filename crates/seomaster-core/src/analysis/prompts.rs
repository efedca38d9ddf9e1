use crate::module::{AnalysisModule, InputValues};

/// Preamble shared by every module's system instruction. Pins the exact
/// Markdown section structure the renderer expects.
pub const ANALYSIS_SYSTEM_PREAMBLE: &str = r#"You are SEOMaster AI, an advanced SEO intelligence system.
Your output must be structured, professional, and actionable.
Always respond in this exact Markdown format:

## 🔍 Overview of Analysis
[Short professional summary]

## 📊 Key Findings
* [Insight 1]
* [Insight 2]

## 📈 Detailed Analysis
[Deep dive based on the module]

## 🛠 Action Plan
1. [Step 1]
2. [Step 2]

## ✨ AI-Generated Assets
[Code snippets, titles, meta descriptions, or outlines]

## 🎯 Final Recommendation
[Conclusion]

Use emojis appropriately as headers. Keep tone professional, data-driven, yet beginner-friendly."#;

/// The instruction and prompt text for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParts {
    pub instruction: String,
    pub prompt: String,
}

/// Builds the instruction and user prompt for a module from its input
/// values.
///
/// Pure and total: a field the caller did not supply substitutes as the
/// empty string. Presence validation belongs to the submission boundary
/// (see [`AnalysisModule::missing_fields`]).
pub fn build(module: AnalysisModule, inputs: &InputValues) -> PromptParts {
    PromptParts {
        instruction: system_instruction(module),
        prompt: user_prompt(module, inputs),
    }
}

/// The full system instruction for a module: shared preamble plus one
/// module-specific focus sentence.
pub fn system_instruction(module: AnalysisModule) -> String {
    format!("{ANALYSIS_SYSTEM_PREAMBLE}\n{}", focus(module))
}

fn focus(module: AnalysisModule) -> &'static str {
    match module {
        AnalysisModule::ContentGap => {
            "Focus on: Content gaps, keyword comparison, missed ranking opportunities, \
             and SEO-optimized titles/outlines."
        }
        AnalysisModule::TechnicalAudit => {
            "Focus on: Metadata, headings, internal links, page speed estimates, schema, \
             and readability. Provide a Health Score (0-100) at the start of Detailed Analysis."
        }
        AnalysisModule::SerpPlanner => {
            "Focus on: 3-6 month strategy, monthly goals, weekly tasks, pillar/cluster pages, \
             and social amplification."
        }
        AnalysisModule::KeywordCluster => {
            "Focus on: Expanding keyword lists, grouping by intent, ranking difficulty, \
             and internal linking structure."
        }
        AnalysisModule::LocalSeo => {
            "Focus on: Local keywords, GMB optimization, NAP consistency, \
             and city-specific competitor analysis."
        }
        AnalysisModule::CompetitorAnalysis => {
            "Focus on: Competitor content strategy, meta structure, semantic keywords, \
             backlinks, and weaknesses to exploit."
        }
    }
}

/// The user prompt for a module, with field values substituted verbatim.
pub fn user_prompt(module: AnalysisModule, inputs: &InputValues) -> String {
    match module {
        AnalysisModule::ContentGap => format!(
            "Analyze content gap. My URL: {}. Competitor URL: {}.",
            field(inputs, "myUrl"),
            field(inputs, "competitorUrl"),
        ),
        AnalysisModule::TechnicalAudit => {
            // Accepts pasted page content under "content" when no URL is given.
            let target = match field(inputs, "url") {
                "" => field(inputs, "content"),
                url => url,
            };
            format!(
                "Perform a technical SEO audit for: {target}. \
                 If it is a URL, use Google Search to find public technical details."
            )
        }
        AnalysisModule::SerpPlanner => format!(
            "Create a SERP domination plan for niche/goal: {}.",
            field(inputs, "goal"),
        ),
        AnalysisModule::KeywordCluster => format!(
            "Generate keyword clusters for topic: {}.",
            field(inputs, "topic"),
        ),
        AnalysisModule::LocalSeo => format!(
            "Boost Local SEO for Business: {} in City: {}.",
            field(inputs, "businessType"),
            field(inputs, "city"),
        ),
        AnalysisModule::CompetitorAnalysis => format!(
            "Reverse engineer competitor: {}.",
            field(inputs, "competitorUrl"),
        ),
    }
}

fn field<'a>(inputs: &'a InputValues, name: &str) -> &'a str {
    inputs.get(name).map(String::as_str).unwrap_or("")
}
