//! Fixed prompts and user-facing strings for the workflow stages.

use crate::message::Message;
use crate::state::RetrievedDocument;

/// Substituted for the context block when retrieval produced nothing.
pub const NO_CONTEXT_PLACEHOLDER: &str = "No relevant documentation found.";

/// Answer returned when the generation call itself fails.
pub const GENERATION_APOLOGY: &str =
    "Sorry, I ran into a problem answering that. Please try again in a moment.";

/// Scoring rubric for the interest evaluator. The model must reply with a
/// strict JSON object; prose around it is tolerated by the parser.
pub const INTEREST_RUBRIC: &str = "\
You rate how interested a prospective customer is in purchasing or signing up, \
based on a support conversation transcript.

Scoring guide:
- 0-2: purely informational questions, no buying signals
- 3-4: exploring capabilities, comparing options
- 5-6: asking about pricing, plans, or limits
- 7-8: discussing their own company's use case, timelines, or integration
- 9-10: explicitly asking to buy, sign up, or talk to sales

Reply with exactly one JSON object and nothing else:
{\"score\": <integer 0-10>, \"reason\": \"<one short sentence>\"}";

/// System instruction for the answer generator; `{}` receives the context block.
const ANSWER_SYSTEM_TEMPLATE: &str = "\
You are a documentation assistant. Answer the user's question using ONLY the \
documentation excerpts below. If the excerpts do not contain the answer, say \
you don't know and suggest contacting support; never invent details. Keep \
answers concise and friendly, and use short paragraphs or bullet points.

Documentation excerpts:
{}";

/// Builds the generation system prompt around the formatted context block.
pub fn answer_system_prompt(context: &str) -> String {
    ANSWER_SYSTEM_TEMPLATE.replacen("{}", context, 1)
}

/// Formats retrieved documents into one labeled context block.
///
/// Each document renders as a title line, an optional source line, and the
/// chunk body; blocks are joined with a separator. Empty input yields the
/// fixed placeholder so generation always has a context section.
pub fn format_context(documents: &[RetrievedDocument]) -> String {
    if documents.is_empty() {
        return NO_CONTEXT_PLACEHOLDER.to_string();
    }
    documents
        .iter()
        .map(|doc| {
            let mut block = format!("### {}", doc.title.as_deref().unwrap_or("Untitled"));
            if let Some(url) = &doc.source_url {
                block.push_str(&format!("\nSource: {}", url));
            }
            block.push('\n');
            block.push_str(&doc.content);
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Renders messages as `role: content` lines for the interest evaluator.
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role(), m.content()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Thank-you note appended to the answer after contact capture.
pub fn thank_you(name: Option<&str>) -> String {
    match name {
        Some(name) => format!(
            "Thanks, {}! We've got your details and someone from our team will reach out shortly.",
            name
        ),
        None => "Thanks! We've got your details and someone from our team will reach out shortly."
            .to_string(),
    }
}

/// Solicitation appended to the answer when entering collection mode.
pub fn contact_request(include_company: bool) -> String {
    if include_company {
        "By the way, you seem quite interested - if you'd like a follow-up from our team, \
just share your email address and company name."
            .to_string()
    } else {
        "By the way, you seem quite interested - if you'd like a follow-up from our team, \
just share your email address."
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: empty retrieval formats as the fixed placeholder.
    #[test]
    fn format_context_empty_uses_placeholder() {
        assert_eq!(format_context(&[]), NO_CONTEXT_PLACEHOLDER);
    }

    /// **Scenario**: documents render title, source, and body, joined by a separator.
    #[test]
    fn format_context_renders_labeled_blocks() {
        let docs = vec![
            RetrievedDocument {
                content: "Reset via settings.".into(),
                title: Some("Passwords".into()),
                source_url: Some("https://docs.test/pw".into()),
            },
            RetrievedDocument {
                content: "Plans start at $10.".into(),
                title: None,
                source_url: None,
            },
        ];
        let block = format_context(&docs);
        assert!(block.contains("### Passwords"));
        assert!(block.contains("Source: https://docs.test/pw"));
        assert!(block.contains("Reset via settings."));
        assert!(block.contains("### Untitled"));
        assert!(block.contains("\n\n---\n\n"));
    }

    /// **Scenario**: the system prompt embeds the context block once.
    #[test]
    fn answer_system_prompt_embeds_context() {
        let prompt = answer_system_prompt("CONTEXT-HERE");
        assert!(prompt.contains("CONTEXT-HERE"));
        assert!(prompt.contains("say you don't know"));
    }

    /// **Scenario**: transcript lines are `role: content`.
    #[test]
    fn render_transcript_lines() {
        let messages = vec![Message::user("hi"), Message::assistant("hello")];
        assert_eq!(render_transcript(&messages), "user: hi\nassistant: hello");
    }

    /// **Scenario**: thank-you personalizes when a name is known.
    #[test]
    fn thank_you_personalization() {
        assert!(thank_you(Some("Jane")).contains("Thanks, Jane!"));
        assert!(thank_you(None).starts_with("Thanks!"));
    }

    /// **Scenario**: the solicitation mentions company only when asked to.
    #[test]
    fn contact_request_company_mention() {
        assert!(contact_request(true).contains("company name"));
        assert!(!contact_request(false).contains("company name"));
    }
}
