//! Decides what happens to a chat query before any network call is made.

/// Accepted-topics reply for queries that are not about jobs or careers.
pub const REFUSAL: &str = "I can only assist with job and career-related questions. \
Please ask about:\n• Job roles\n• Career skills\n• Professional development\n\
• Job market information\n• Interview preparation";

const GREETING: &str =
    "Hello! I'm a job skills chatbot. How can I assist you with your career-related questions?";
const THANKS: &str =
    "You're welcome! Is there anything else I can help you with about jobs or careers?";
const FAREWELL: &str = "Goodbye! Feel free to come back if you need career advice.";

const CANNED_PHRASES: &[(&str, &str)] = &[
    ("hi", GREETING),
    ("hello", GREETING),
    ("hey", GREETING),
    ("thank you", THANKS),
    ("thanks", THANKS),
    ("bye", FAREWELL),
    ("goodbye", FAREWELL),
];

const JOB_KEYWORDS: &[&str] = &[
    "job", "career", "work", "profession", "role", "skill", "employment", "interview",
    "resume", "salary", "company", "industry", "certification", "professional", "workplace",
    "hiring", "employee", "recruitment", "occupation", "position", "internship",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Answer locally with a fixed reply.
    Canned(&'static str),
    /// Not career related; answer with `REFUSAL`.
    Refused,
    /// Send to the completion endpoint.
    Forward,
}

/// Exact (trimmed, case-insensitive) canned phrase first, then the keyword allow-list.
pub fn evaluate(query: &str) -> GateDecision {
    let lowered = query.trim().to_lowercase();

    if let Some((_, reply)) = CANNED_PHRASES.iter().find(|(phrase, _)| *phrase == lowered) {
        return GateDecision::Canned(reply);
    }

    if JOB_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        GateDecision::Forward
    } else {
        GateDecision::Refused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_is_canned() {
        assert_eq!(evaluate("hi"), GateDecision::Canned(GREETING));
        assert_eq!(evaluate("  HeLLo "), GateDecision::Canned(GREETING));
        assert_eq!(evaluate("Thank you"), GateDecision::Canned(THANKS));
        assert_eq!(evaluate("bye"), GateDecision::Canned(FAREWELL));
    }

    #[test]
    fn test_canned_requires_exact_phrase() {
        // "hi there" is not canned and has no career keyword
        assert_eq!(evaluate("hi there"), GateDecision::Refused);
    }

    #[test]
    fn test_off_topic_is_refused() {
        assert_eq!(evaluate("tell me a joke"), GateDecision::Refused);
    }

    #[test]
    fn test_career_question_is_forwarded() {
        assert_eq!(
            evaluate("what skills do I need as a data analyst"),
            GateDecision::Forward
        );
        assert_eq!(evaluate("How do I prepare for an INTERVIEW?"), GateDecision::Forward);
    }

    #[test]
    fn test_refusal_lists_topics() {
        assert!(REFUSAL.contains("Interview preparation"));
        assert!(REFUSAL.contains("Job roles"));
    }
}
