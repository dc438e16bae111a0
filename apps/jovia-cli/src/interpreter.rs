use async_trait::async_trait;
use jovia::narrative::NarrativePayload;
use jovia::providers::{GenerationError, Interpretation, PromptTemplate, TextGenerationProvider};

/// Headlines keyed by the leading theme; first theme present in the payload wins.
const HEADLINES: [(&str, &str); 6] = [
    ("love", "A time to open your heart"),
    ("structure", "Structure brings success"),
    ("responsibility", "Structure brings success"),
    ("intuition", "Follow the intuitive shimmer"),
    ("healing", "Integrate the unseen"),
    ("transformation", "Integrate the unseen"),
];

const DEFAULT_HEADLINE: &str = "Your chart opens new pathways";

/// Deterministic text used when no language model is reachable.
///
/// Works from the payload alone; the prompt template only names the reading.
#[derive(Debug, Default)]
pub struct TemplateInterpreter;

#[async_trait]
impl TextGenerationProvider for TemplateInterpreter {
    async fn generate(
        &self,
        payload: &NarrativePayload,
        template: &PromptTemplate,
    ) -> Result<Interpretation, GenerationError> {
        if payload.themes.is_empty() {
            return Err(GenerationError::unavailable(format!(
                "'{}' needs at least one theme to interpret",
                template.name
            )));
        }

        let headline = payload
            .themes
            .iter()
            .find_map(|score| {
                HEADLINES
                    .iter()
                    .find(|(theme, _)| *theme == score.theme)
                    .map(|(_, headline)| *headline)
            })
            .unwrap_or(DEFAULT_HEADLINE);

        let motifs: Vec<&str> = payload.themes.iter().map(|s| s.theme.as_str()).collect();
        let summary = format!(
            "The {} axis weaves through your chart. Key motifs: {}.",
            payload.axis,
            motifs.join(", ")
        );

        Ok(Interpretation {
            headline: headline.to_string(),
            summary,
            advice: payload.focus.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jovia::archetype::ThemeScore;
    use jovia::narrative::NarrativeStrategy;

    fn payload(themes: &[(&str, f64)]) -> NarrativePayload {
        NarrativePayload {
            axis: "Yay–İkizler".to_string(),
            themes: themes
                .iter()
                .map(|(theme, score)| ThemeScore {
                    theme: theme.to_string(),
                    score: *score,
                })
                .collect(),
            focus: "Ufkunu genişletmeye odaklan.".to_string(),
            derived_from: vec![],
            confidence: Some(0.5),
            strategy: NarrativeStrategy::Dominant,
        }
    }

    #[tokio::test]
    async fn test_headline_follows_theme_rank() {
        let text = TemplateInterpreter
            .generate(&payload(&[("challenge", 1.5), ("intuition", 1.0), ("love", 0.5)]), &PromptTemplate::default())
            .await
            .unwrap();
        assert_eq!(text.headline, "Follow the intuitive shimmer");
        assert_eq!(
            text.summary,
            "The Yay–İkizler axis weaves through your chart. Key motifs: challenge, intuition, love."
        );
        assert_eq!(text.advice, "Ufkunu genişletmeye odaklan.");
    }

    #[tokio::test]
    async fn test_default_headline_and_empty_payload() {
        let text = TemplateInterpreter
            .generate(&payload(&[("flow", 1.0)]), &PromptTemplate::default())
            .await
            .unwrap();
        assert_eq!(text.headline, DEFAULT_HEADLINE);

        let err = TemplateInterpreter
            .generate(&payload(&[]), &PromptTemplate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Unavailable { .. }));
    }
}
