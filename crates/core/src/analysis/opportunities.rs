use crate::domain::hotel::MAX_OPPORTUNITIES;
use crate::llm::{CompletionRequest, TextGenerator};

pub const MAX_TOKENS: u32 = 250;
pub const TEMPERATURE: f32 = 0.7;

pub fn prompt(summary: &str) -> String {
    format!(
        "Given the following reviews, create a concise list of up to five actionable \
opportunities of 10-20 words each to improve the hotel, based on its own guest feedback \
and the performance of nearby competitors:\n\n\"{summary}\"\n\nOpportunities:"
    )
}

/// Asks the generator for improvement suggestions grounded in `summary`.
///
/// The call is made even for an empty summary.
pub async fn generate(generator: &dyn TextGenerator, summary: &str) -> anyhow::Result<Vec<String>> {
    let text = generator
        .complete(CompletionRequest {
            prompt: prompt(summary),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        })
        .await?;
    Ok(split_lines(&text))
}

/// One suggestion per non-blank line, trimmed, at most five.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_OPPORTUNITIES)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeGenerator;

    #[test]
    fn prompt_quotes_the_summary() {
        let p = prompt("Great pool.");
        assert!(p.contains("\"Great pool.\""));
        assert!(p.ends_with("Opportunities:"));
    }

    #[test]
    fn split_trims_each_line_and_keeps_order() {
        let out = split_lines("  1. Faster check-in  \r\n2. Quieter rooms\n3. Better breakfast");
        assert_eq!(
            out,
            vec!["1. Faster check-in", "2. Quieter rooms", "3. Better breakfast"]
        );
    }

    #[test]
    fn split_caps_at_five() {
        let text = (1..=8).map(|i| format!("{i}. idea")).collect::<Vec<_>>().join("\n");
        let out = split_lines(&text);
        assert_eq!(out.len(), 5);
        assert_eq!(out[4], "5. idea");
    }

    #[test]
    fn split_passes_malformed_lines_through_but_drops_blanks() {
        let out = split_lines("Here are some ideas:\n\n- do better\n   \n");
        assert_eq!(out, vec!["Here are some ideas:", "- do better"]);
    }

    #[test]
    fn split_of_empty_text_is_empty() {
        assert!(split_lines("").is_empty());
    }

    #[tokio::test]
    async fn generate_sends_fixed_sampling_controls() {
        let gen = FakeGenerator::replying("a\nb");
        let out = generate(&gen, "").await.unwrap();
        assert_eq!(out, vec!["a", "b"]);

        let requests = gen.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].max_tokens, 250);
        assert!((requests[0].temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(requests[0].prompt, prompt(""));
    }

    #[tokio::test]
    async fn generate_propagates_upstream_failure() {
        let gen = FakeGenerator::failing();
        assert!(generate(&gen, "text").await.is_err());
    }
}
