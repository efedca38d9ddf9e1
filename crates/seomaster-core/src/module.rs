use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field values collected from the caller, keyed by field name.
pub type InputValues = HashMap<String, String>;

/// The six analysis modules offered by SEOMaster.
///
/// Each module selects one system-instruction focus and one user prompt
/// template. The enum is closed on purpose: adding a module means adding a
/// variant, and the compiler points at every match that needs a new arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisModule {
    ContentGap,
    TechnicalAudit,
    SerpPlanner,
    KeywordCluster,
    LocalSeo,
    CompetitorAnalysis,
}

/// Describes one input field a module requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key under which the value is supplied in [`InputValues`].
    pub name: &'static str,
    /// Human-readable label for the field.
    pub label: &'static str,
    /// Example value shown to the user.
    pub placeholder: &'static str,
}

impl AnalysisModule {
    /// All modules, in menu order.
    pub const ALL: [AnalysisModule; 6] = [
        AnalysisModule::ContentGap,
        AnalysisModule::TechnicalAudit,
        AnalysisModule::SerpPlanner,
        AnalysisModule::KeywordCluster,
        AnalysisModule::LocalSeo,
        AnalysisModule::CompetitorAnalysis,
    ];

    /// Stable identifier used on the command line and in config files.
    pub fn id(&self) -> &'static str {
        match self {
            AnalysisModule::ContentGap => "content-gap",
            AnalysisModule::TechnicalAudit => "technical-audit",
            AnalysisModule::SerpPlanner => "serp-planner",
            AnalysisModule::KeywordCluster => "keyword-cluster",
            AnalysisModule::LocalSeo => "local-seo",
            AnalysisModule::CompetitorAnalysis => "competitor-analysis",
        }
    }

    /// Display title for the module.
    pub fn title(&self) -> &'static str {
        match self {
            AnalysisModule::ContentGap => "AI Content Gap Analyzer",
            AnalysisModule::TechnicalAudit => "SEO Health Doctor",
            AnalysisModule::SerpPlanner => "AI SERP Domination Planner",
            AnalysisModule::KeywordCluster => "AI Keyword Cluster Generator",
            AnalysisModule::LocalSeo => "AI Local SEO Booster",
            AnalysisModule::CompetitorAnalysis => "Competitor Reverse Engineering",
        }
    }

    /// One-line description of what the module produces.
    pub fn description(&self) -> &'static str {
        match self {
            AnalysisModule::ContentGap => {
                "Identify missed opportunities by comparing your site against a competitor. \
                 Uncover high-value keywords you are missing."
            }
            AnalysisModule::TechnicalAudit => {
                "Perform a comprehensive technical SEO audit. Enter a URL for analysis \
                 using Google Search data."
            }
            AnalysisModule::SerpPlanner => {
                "Generate a 3-6 month strategic plan to dominate search results for your niche."
            }
            AnalysisModule::KeywordCluster => {
                "Turn a seed topic into organized keyword clusters with search intent and \
                 difficulty estimates."
            }
            AnalysisModule::LocalSeo => {
                "Optimize for local search. Get GMB strategies, local keywords, and citation plans."
            }
            AnalysisModule::CompetitorAnalysis => {
                "Deep dive into a competitor's strategy. Understand their content, backlinks, \
                 and weaknesses."
            }
        }
    }

    /// The input fields this module requires. All fields are required and
    /// must be non-empty; presence is checked at the submission boundary,
    /// not inside the prompt builder.
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            AnalysisModule::ContentGap => &[
                FieldSpec {
                    name: "myUrl",
                    label: "Your Website URL",
                    placeholder: "https://example.com",
                },
                FieldSpec {
                    name: "competitorUrl",
                    label: "Competitor URL",
                    placeholder: "https://competitor.com",
                },
            ],
            AnalysisModule::TechnicalAudit => &[FieldSpec {
                name: "url",
                label: "Website URL to Audit",
                placeholder: "https://example.com",
            }],
            AnalysisModule::SerpPlanner => &[FieldSpec {
                name: "goal",
                label: "Niche or Main Goal",
                placeholder: "e.g. \"Best Vegan Shoes\" or \"SaaS CRM Software\"",
            }],
            AnalysisModule::KeywordCluster => &[FieldSpec {
                name: "topic",
                label: "Seed Topic or Keywords",
                placeholder: "e.g. \"Digital Marketing\" or \"Home Renovation\"",
            }],
            AnalysisModule::LocalSeo => &[
                FieldSpec {
                    name: "city",
                    label: "Target City",
                    placeholder: "e.g. \"Austin, TX\"",
                },
                FieldSpec {
                    name: "businessType",
                    label: "Business Type",
                    placeholder: "e.g. \"Plumber\" or \"Coffee Shop\"",
                },
            ],
            AnalysisModule::CompetitorAnalysis => &[FieldSpec {
                name: "competitorUrl",
                label: "Competitor URL",
                placeholder: "https://competitor.com",
            }],
        }
    }

    /// Returns the names of required fields that are absent or empty.
    pub fn missing_fields(&self, inputs: &InputValues) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter(|f| inputs.get(f.name).map_or(true, |v| v.trim().is_empty()))
            .map(|f| f.name)
            .collect()
    }
}

impl fmt::Display for AnalysisModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when a module identifier is not recognized.
#[derive(Debug, Clone, Error)]
#[error("unknown module '{0}' (expected one of: content-gap, technical-audit, serp-planner, keyword-cluster, local-seo, competitor-analysis)")]
pub struct ParseModuleError(String);

impl FromStr for AnalysisModule {
    type Err = ParseModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnalysisModule::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| ParseModuleError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        for module in AnalysisModule::ALL {
            assert_eq!(module.id().parse::<AnalysisModule>().unwrap(), module);
        }
    }

    #[test]
    fn test_unknown_id_rejected() {
        assert!("backlink-explorer".parse::<AnalysisModule>().is_err());
    }

    #[test]
    fn test_every_module_declares_fields() {
        for module in AnalysisModule::ALL {
            assert!(!module.fields().is_empty(), "{module} has no fields");
        }
    }
}
