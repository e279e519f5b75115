use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::skill_gap::catalog::find_role;
use crate::skill_gap::matcher::{match_skills, MatchMode};
use crate::skill_gap::resources::{skill_resources, LearningLink};

pub const NO_SKILLS_MESSAGE: &str =
    "No skills found in resume. Please ensure your resume has a clear Skills section.";

/// Outcome of comparing a resume against one target role. Recomputed per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapResult {
    pub selected_role: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Role-level learning platforms, in catalog display order.
    pub recommendations: Vec<LearningLink>,
    /// Learning links for each missing skill.
    pub skill_resources: BTreeMap<String, Vec<LearningLink>>,
}

/// Runs the matcher for `role_name` and attaches resources to every gap.
///
/// Refuses to run without resume skills; the caller reports that to the user.
pub fn analyze_skill_gap(
    resume_skills: &[String],
    role_name: &str,
    mode: MatchMode,
) -> Result<SkillGapResult, AppError> {
    if resume_skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(NO_SKILLS_MESSAGE.to_string()));
    }

    let role = find_role(role_name).ok_or_else(|| {
        AppError::NotFound(format!("Job role '{}' is not in our database.", role_name.trim()))
    })?;

    let result = match_skills(resume_skills, role.skills, mode);
    debug!(
        role = role.name,
        matched = ?result.matched,
        missing = ?result.missing,
        "Skill gap computed"
    );

    let skill_resources = result
        .missing
        .iter()
        .map(|skill| (skill.clone(), skill_resources(skill)))
        .collect();

    Ok(SkillGapResult {
        selected_role: role.name.to_string(),
        recommendations: role
            .resources
            .iter()
            .map(|(platform, url)| LearningLink {
                platform: platform.to_string(),
                url: url.to_string(),
            })
            .collect(),
        matched_skills: result.matched,
        missing_skills: result.missing,
        skill_resources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_data_analyst_scenario() {
        let resume = skills(&["Python", "react.js", "Excel"]);
        let result = analyze_skill_gap(&resume, "data analyst", MatchMode::TokenBoundary).unwrap();

        assert!(result.matched_skills.contains(&"python".to_string()));
        assert!(result.matched_skills.contains(&"excel".to_string()));
        assert!(!result.missing_skills.contains(&"python".to_string()));
        assert!(result.missing_skills.contains(&"sql".to_string()));
        assert_eq!(result.selected_role, "data analyst");
    }

    #[test]
    fn test_every_missing_skill_has_resources() {
        let resume = skills(&["excel"]);
        let result = analyze_skill_gap(&resume, "Data Analyst", MatchMode::Substring).unwrap();

        assert_eq!(result.skill_resources.len(), result.missing_skills.len());
        assert_eq!(result.skill_resources["sql"][0].platform, "SQLZoo");
        assert_eq!(result.skill_resources["tableau"].len(), 3);
        assert!(result.recommendations.iter().any(|r| r.platform == "Kaggle Learn"));
    }

    #[test]
    fn test_recommendations_keep_catalog_order() {
        let result =
            analyze_skill_gap(&skills(&["sql"]), "data analyst", MatchMode::TokenBoundary).unwrap();
        let platforms: Vec<&str> = result
            .recommendations
            .iter()
            .map(|r| r.platform.as_str())
            .collect();
        assert_eq!(
            platforms,
            [
                "LinkedIn Learning",
                "Forage Virtual Internship",
                "DataCamp Courses",
                "Kaggle Learn",
                "Google Data Analytics Certificate",
            ]
        );
    }

    #[test]
    fn test_no_skills_is_rejected() {
        let err = analyze_skill_gap(&[], "data analyst", MatchMode::TokenBoundary).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == NO_SKILLS_MESSAGE));

        let err = analyze_skill_gap(&skills(&["  "]), "data analyst", MatchMode::TokenBoundary)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unknown_role_is_not_found() {
        let err = analyze_skill_gap(&skills(&["python"]), "astronaut", MatchMode::TokenBoundary)
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
