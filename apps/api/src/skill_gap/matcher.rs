//! Skill matcher. Decides which of a role's required skills a resume covers.
//!
//! Both sides are normalized (case, separators, whitespace) before comparison.
//! A role skill is matched when any resume skill is equal to it, contains it or
//! is contained by it, or sits in the same alias group.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical skill names and their known synonyms.
pub const SKILL_ALIASES: &[(&str, &[&str])] = &[
    ("javascript", &["js"]),
    ("typescript", &["ts"]),
    ("python", &["py"]),
    ("react", &["reactjs", "react.js"]),
    ("node.js", &["nodejs", "node"]),
    ("postgresql", &["postgres"]),
    ("firebase", &["firestore"]),
    ("mongodb", &["mongo"]),
];

/// How containment between two normalized skills is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Raw substring containment. Permissive: "java" is found inside "javascript".
    Substring,
    /// One side's words must appear as a contiguous run of the other's words.
    #[default]
    TokenBoundary,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "token" | "token_boundary" => Ok(MatchMode::TokenBoundary),
            other => Err(format!("Unknown match mode '{other}'")),
        }
    }
}

/// Role skills split into those the resume covers and those it lacks.
/// Both lists keep the order of the role's skill list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Lowercases, trims, turns `-` `_` `.` `/` into spaces and collapses whitespace runs.
pub fn normalize(skill: &str) -> String {
    skill
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '.' | '/'))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when both normalized skills belong to the same alias group.
fn same_alias_group(a: &str, b: &str) -> bool {
    SKILL_ALIASES.iter().any(|(canonical, aliases)| {
        let in_group = |skill: &str| {
            normalize(canonical) == skill || aliases.iter().any(|alias| normalize(alias) == skill)
        };
        in_group(a) && in_group(b)
    })
}

fn contains_tokens(haystack: &str, needle: &str) -> bool {
    let hay: Vec<&str> = haystack.split(' ').collect();
    let needle: Vec<&str> = needle.split(' ').collect();
    needle.len() <= hay.len() && hay.windows(needle.len()).any(|w| w == needle.as_slice())
}

/// Compares two already-normalized skills.
fn normalized_match(resume: &str, role: &str, mode: MatchMode) -> bool {
    if resume.is_empty() || role.is_empty() {
        return false;
    }
    if resume == role {
        return true;
    }
    let contained = match mode {
        MatchMode::Substring => resume.contains(role) || role.contains(resume),
        MatchMode::TokenBoundary => contains_tokens(resume, role) || contains_tokens(role, resume),
    };
    contained || same_alias_group(resume, role)
}

/// Returns true if `resume_skill` covers `role_skill`.
pub fn skills_match(resume_skill: &str, role_skill: &str, mode: MatchMode) -> bool {
    normalized_match(&normalize(resume_skill), &normalize(role_skill), mode)
}

/// Splits `role_skills` into matched and missing against `resume_skills`.
///
/// Duplicate role skills are reported once. An empty resume list leaves every
/// role skill missing.
pub fn match_skills<R, S>(resume_skills: &[R], role_skills: &[S], mode: MatchMode) -> SkillMatch
where
    R: AsRef<str>,
    S: AsRef<str>,
{
    let resume: Vec<String> = resume_skills
        .iter()
        .map(|s| normalize(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();

    let mut seen = HashSet::new();
    let mut result = SkillMatch::default();

    for role_skill in role_skills.iter().map(AsRef::as_ref) {
        if !seen.insert(role_skill) {
            continue;
        }
        let role_norm = normalize(role_skill);
        if resume.iter().any(|r| normalized_match(r, &role_norm, mode)) {
            result.matched.push(role_skill.to_string());
        } else {
            result.missing.push(role_skill.to_string());
        }
    }

    result
}
