//! Brief assembly — orchestrates the two external calls and merges results.
//!
//! Flow: summary completion → keyword completion → one scrape per keyword →
//!       merge into a `Brief`.
//!
//! External content-generation failures never abort assembly: each stage
//! degrades to a fixed fallback and the degradation is recorded on the
//! returned `Assembly` so callers and tests can observe it instead of
//! inferring it from content.

use tracing::{info, warn};

use crate::brief::prompts;
use crate::llm_client::TextGenerator;
use crate::models::{Brief, BriefRequest, Connection};
use crate::scraper::PlacesSource;

/// Fallback search phrases used when the keyword completion fails.
pub const FALLBACK_KEYWORDS: [&str; 3] = ["SEO agency", "business coach", "coworking space"];

/// Which pipeline stage fell back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Summary,
    Keywords,
    Scrape { keyword: String },
}

/// One recorded fallback: the stage that failed and the upstream reason.
#[derive(Debug, Clone)]
pub struct Degradation {
    pub stage: Stage,
    pub reason: String,
}

/// Assembly output: the brief plus any degradations that occurred building it.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub brief: Brief,
    pub degradations: Vec<Degradation>,
}

impl Assembly {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Runs the full assembly pipeline for one submission.
///
/// Steps:
/// 1. Summary completion; on error fall back to a mock text embedding the
///    prompt and the error.
/// 2. Keyword completion; clean the returned lines; on error fall back to
///    `FALLBACK_KEYWORDS`.
/// 3. One scrape per keyword, sequentially, results concatenated in keyword
///    order with no dedup; on error append a single placeholder connection.
/// 4. Merge into a `Brief`.
pub async fn assemble(
    llm: &dyn TextGenerator,
    places: &dyn PlacesSource,
    request: &BriefRequest,
) -> Assembly {
    let mut degradations = Vec::new();

    // Step 1: summary
    let summary_prompt = prompts::summary_prompt(request);
    let summary = match llm.complete(prompts::SUMMARY_SYSTEM, &summary_prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("summary completion failed, falling back to mock output: {e}");
            degradations.push(Degradation {
                stage: Stage::Summary,
                reason: e.to_string(),
            });
            format!("Mock Output:\n\n{summary_prompt}\n\nError: {e}")
        }
    };

    // Step 2: keywords
    let keyword_prompt = prompts::keyword_prompt(request);
    let keywords = match llm.complete(prompts::KEYWORD_SYSTEM, &keyword_prompt).await {
        Ok(text) => clean_keyword_lines(&text),
        Err(e) => {
            warn!("keyword completion failed, using fallback keywords: {e}");
            degradations.push(Degradation {
                stage: Stage::Keywords,
                reason: e.to_string(),
            });
            FALLBACK_KEYWORDS.iter().map(|k| k.to_string()).collect()
        }
    };
    info!("derived {} search keywords", keywords.len());

    // Step 3: scrape per keyword, in order
    let mut connections = Vec::new();
    for keyword in &keywords {
        match places.search(keyword, &request.location).await {
            Ok(mut batch) => connections.append(&mut batch),
            Err(e) => {
                warn!("scrape failed for '{keyword}': {e}");
                degradations.push(Degradation {
                    stage: Stage::Scrape {
                        keyword: keyword.clone(),
                    },
                    reason: e.to_string(),
                });
                connections.push(Connection::scrape_failed(&e.to_string()));
            }
        }
    }

    // Step 4: merge
    let brief = Brief {
        business: request.business_name.clone(),
        category: request.category.clone(),
        location: request.location.clone(),
        goal: request.goal.clone(),
        summary,
        connections,
    };

    Assembly {
        brief,
        degradations,
    }
}

/// Splits a keyword completion into clean search phrases.
///
/// Strips leading bullet markers (`-`, `•`) and surrounding whitespace, drops
/// empty lines, preserves order.
pub fn clean_keyword_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.trim().trim_start_matches(['-', '•']).trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::llm_client::LlmError;
    use crate::scraper::ScrapeError;

    struct StubLlm {
        summary: Result<&'static str, ()>,
        keywords: Result<&'static str, ()>,
    }

    #[async_trait]
    impl TextGenerator for StubLlm {
        async fn complete(&self, system: &str, _prompt: &str) -> Result<String, LlmError> {
            let result = if system == prompts::SUMMARY_SYSTEM {
                self.summary
            } else {
                self.keywords
            };
            match result {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(LlmError::Api {
                    status: 500,
                    message: "upstream down".to_string(),
                }),
            }
        }
    }

    struct StubPlaces {
        fail: bool,
    }

    #[async_trait]
    impl PlacesSource for StubPlaces {
        async fn search(
            &self,
            term: &str,
            _location: &str,
        ) -> Result<Vec<Connection>, ScrapeError> {
            if self.fail {
                return Err(ScrapeError::Api {
                    status: 502,
                    message: "actor run failed".to_string(),
                });
            }
            Ok(vec![Connection {
                name: Some(format!("{term} partner")),
                address: None,
                website: None,
                rating: Some(4.5),
            }])
        }
    }

    fn request() -> BriefRequest {
        BriefRequest {
            business_name: "Acme Co".to_string(),
            website: "https://acme.example".to_string(),
            category: "bakery".to_string(),
            location: "Austin".to_string(),
            goal: "more foot traffic".to_string(),
        }
    }

    #[test]
    fn test_clean_keyword_lines_strips_bullets_and_empties() {
        let raw = "- SEO agency\n• business coach\n\n  coworking space  ";
        assert_eq!(
            clean_keyword_lines(raw),
            vec!["SEO agency", "business coach", "coworking space"]
        );
    }

    #[test]
    fn test_clean_keyword_lines_preserves_order_and_interior_text() {
        let raw = "-  local print shop\nfarmers market\n•\t web designer";
        assert_eq!(
            clean_keyword_lines(raw),
            vec!["local print shop", "farmers market", "web designer"]
        );
    }

    #[tokio::test]
    async fn test_happy_path_has_no_degradations() {
        let llm = StubLlm {
            summary: Ok("A fine summary."),
            keywords: Ok("- SEO agency\n- business coach"),
        };
        let places = StubPlaces { fail: false };

        let assembly = assemble(&llm, &places, &request()).await;

        assert!(!assembly.is_degraded());
        assert_eq!(assembly.brief.business, "Acme Co");
        assert_eq!(assembly.brief.summary, "A fine summary.");
        // One stub connection per keyword, in keyword order.
        let names: Vec<_> = assembly
            .brief
            .connections
            .iter()
            .map(|c| c.name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["SEO agency partner", "business coach partner"]);
    }

    #[tokio::test]
    async fn test_summary_failure_degrades_to_mock_output() {
        let llm = StubLlm {
            summary: Err(()),
            keywords: Ok("- SEO agency"),
        };
        let places = StubPlaces { fail: false };

        let assembly = assemble(&llm, &places, &request()).await;

        assert!(assembly.brief.summary.starts_with("Mock Output:"));
        assert!(assembly.brief.summary.contains("Business: Acme Co"));
        assert!(assembly.brief.summary.contains("upstream down"));
        assert!(assembly
            .degradations
            .iter()
            .any(|d| d.stage == Stage::Summary));
    }

    #[tokio::test]
    async fn test_keyword_failure_uses_fixed_fallback_list() {
        let llm = StubLlm {
            summary: Ok("A fine summary."),
            keywords: Err(()),
        };
        let places = StubPlaces { fail: false };

        let assembly = assemble(&llm, &places, &request()).await;

        let names: Vec<_> = assembly
            .brief
            .connections
            .iter()
            .map(|c| c.name.as_deref().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "SEO agency partner",
                "business coach partner",
                "coworking space partner"
            ]
        );
        assert!(assembly
            .degradations
            .iter()
            .any(|d| d.stage == Stage::Keywords));
    }

    #[tokio::test]
    async fn test_scrape_failure_appends_placeholder_per_keyword() {
        let llm = StubLlm {
            summary: Ok("A fine summary."),
            keywords: Ok("- SEO agency\n- business coach"),
        };
        let places = StubPlaces { fail: true };

        let assembly = assemble(&llm, &places, &request()).await;

        assert_eq!(assembly.brief.connections.len(), 2);
        for conn in &assembly.brief.connections {
            assert!(conn.name.as_deref().unwrap().starts_with("Scrape failed:"));
        }
        let scrape_degradations: Vec<_> = assembly
            .degradations
            .iter()
            .filter(|d| matches!(d.stage, Stage::Scrape { .. }))
            .collect();
        assert_eq!(scrape_degradations.len(), 2);
    }

    #[tokio::test]
    async fn test_all_services_down_still_produces_a_brief() {
        let llm = StubLlm {
            summary: Err(()),
            keywords: Err(()),
        };
        let places = StubPlaces { fail: true };

        let assembly = assemble(&llm, &places, &request()).await;

        assert_eq!(assembly.brief.business, "Acme Co");
        assert!(assembly.brief.summary.starts_with("Mock Output:"));
        // One placeholder per fallback keyword.
        assert_eq!(assembly.brief.connections.len(), FALLBACK_KEYWORDS.len());
        assert!(assembly.is_degraded());
    }
}
