//! Pattern extraction: contact fields from user text and the score object
//! from evaluator output.
//!
//! The contact patterns are best-effort heuristics; false positives and
//! negatives are expected and tolerated by the surrounding stages.

use once_cell::sync::Lazy;
use regex::Regex;

/// Email-shaped substring.
static EMAIL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").ok());

/// Capitalized name after "my name is" / "I am" / "I'm"; up to two words.
static NAME: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(?i:\bmy name is|\bi am|\bi'm)\s+([A-Z][A-Za-z'\-]+(?:\s+[A-Z][A-Za-z'\-]+)?)")
        .ok()
});

/// Capitalized company after "from" / "at" / "work at|for" / "company";
/// capitalization ends the match, which stops it at trailing conjunctions.
static COMPANY: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(
        r"(?i:\bwork (?:at|for)|\bfrom|\bat|\bcompany(?: is)?:?)\s+([A-Z][\w&\-]*(?:\s+[A-Z][\w&\-]*)*)",
    )
    .ok()
});

/// First JSON object carrying a "score" key, anywhere in the response.
static SCORE_OBJECT: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"\{[^{}]*"score"[^{}]*\}"#).ok());

/// Compiled contact patterns, or None when any pattern failed to compile
/// (the contact stage then resets collection mode instead of wedging).
pub struct ContactPatterns {
    email: &'static Regex,
    name: &'static Regex,
    company: &'static Regex,
}

/// Returns the compiled contact patterns, if all compiled.
pub fn contact_patterns() -> Option<ContactPatterns> {
    Some(ContactPatterns {
        email: EMAIL.as_ref()?,
        name: NAME.as_ref()?,
        company: COMPANY.as_ref()?,
    })
}

impl ContactPatterns {
    /// First email-shaped substring in `text`.
    pub fn email(&self, text: &str) -> Option<String> {
        self.email.find(text).map(|m| m.as_str().to_string())
    }

    /// Name from self-introduction phrases, when present.
    pub fn name(&self, text: &str) -> Option<String> {
        self.name
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Company from affiliation phrases, when present.
    pub fn company(&self, text: &str) -> Option<String> {
        self.company
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[derive(serde::Deserialize)]
struct InterestVerdict {
    score: f64,
    #[serde(default)]
    #[allow(dead_code)]
    reason: String,
}

/// Extracts and clamps the interest score from evaluator output.
///
/// The response may carry prose around the JSON object; the first object
/// with a "score" key wins. Returns None when no such object parses.
pub fn parse_interest_score(response: &str) -> Option<u8> {
    let pattern = SCORE_OBJECT.as_ref()?;
    let matched = pattern.find(response)?;
    let verdict: InterestVerdict = serde_json::from_str(matched.as_str()).ok()?;
    Some(verdict.score.clamp(0.0, 10.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> ContactPatterns {
        contact_patterns().expect("patterns compile")
    }

    /// **Scenario**: email extraction from a mixed sentence.
    #[test]
    fn extracts_email() {
        let p = patterns();
        assert_eq!(
            p.email("sure, my email is jane.doe+test@acme-corp.io thanks"),
            Some("jane.doe+test@acme-corp.io".to_string())
        );
        assert_eq!(p.email("no address here"), None);
    }

    /// **Scenario**: name extraction covers all three self-introduction forms.
    #[test]
    fn extracts_name_forms() {
        let p = patterns();
        assert_eq!(p.name("my name is Jane"), Some("Jane".to_string()));
        assert_eq!(p.name("Hi, I'm Jane Doe, nice to meet you"), Some("Jane Doe".to_string()));
        assert_eq!(p.name("I am John and I have a question"), Some("John".to_string()));
        assert_eq!(p.name("the name escapes me"), None);
    }

    /// **Scenario**: company extraction stops at lowercase continuations.
    #[test]
    fn extracts_company_forms() {
        let p = patterns();
        assert_eq!(p.company("I'm Jane from Acme"), Some("Acme".to_string()));
        assert_eq!(
            p.company("I work at Globex Corp and need pricing"),
            Some("Globex Corp".to_string())
        );
        assert_eq!(p.company("our company is Initech."), Some("Initech".to_string()));
    }

    /// **Scenario**: the §8-style combined utterance yields all three fields.
    #[test]
    fn extracts_full_contact_line() {
        let p = patterns();
        let text = "my email is x@y.com, I'm Jane from Acme";
        assert_eq!(p.email(text), Some("x@y.com".to_string()));
        assert_eq!(p.name(text), Some("Jane".to_string()));
        assert_eq!(p.company(text), Some("Acme".to_string()));
    }

    /// **Scenario**: score parses from a bare object and from surrounded prose.
    #[test]
    fn parses_score_with_and_without_prose() {
        assert_eq!(parse_interest_score(r#"{"score": 7, "reason": "pricing"}"#), Some(7));
        assert_eq!(
            parse_interest_score(
                "Here is my assessment:\n{\"score\": 9, \"reason\": \"asked to buy\"}\nDone."
            ),
            Some(9)
        );
    }

    /// **Scenario**: out-of-range scores clamp into [0, 10].
    #[test]
    fn clamps_out_of_range_scores() {
        assert_eq!(parse_interest_score(r#"{"score": 42, "reason": ""}"#), Some(10));
        assert_eq!(parse_interest_score(r#"{"score": -3, "reason": ""}"#), Some(0));
    }

    /// **Scenario**: unparsable output yields None, not a panic.
    #[test]
    fn unparsable_output_yields_none() {
        assert_eq!(parse_interest_score("I'd say about a seven."), None);
        assert_eq!(parse_interest_score(r#"{"points": 7}"#), None);
        assert_eq!(parse_interest_score(""), None);
    }
}
