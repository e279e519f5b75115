use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Employment situation chosen on the profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Unemployed,
    Student,
    Employed,
    Freelancer,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Unemployed => "Unemployed",
            EmploymentStatus::Student => "Student",
            EmploymentStatus::Employed => "Employed",
            EmploymentStatus::Freelancer => "Freelancer",
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unemployed" => Ok(EmploymentStatus::Unemployed),
            "Student" => Ok(EmploymentStatus::Student),
            "Employed" => Ok(EmploymentStatus::Employed),
            "Freelancer" => Ok(EmploymentStatus::Freelancer),
            other => Err(format!("Unknown employment status '{other}'")),
        }
    }
}

/// Per-user profile document, keyed by the identity provider subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
    pub status: Option<EmploymentStatus>,
    pub qualifications: String,
    pub resume_file_name: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserProfileRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: Option<i32>,
    pub status: Option<String>,
    pub qualifications: String,
    pub resume_file_name: Option<String>,
}

impl TryFrom<UserProfileRow> for UserProfile {
    type Error = String;

    fn try_from(row: UserProfileRow) -> Result<Self, Self::Error> {
        Ok(UserProfile {
            id: row.id,
            name: row.name,
            email: row.email,
            age: row
                .age
                .map(|a| u32::try_from(a).map_err(|_| format!("invalid stored age {a}")))
                .transpose()?,
            status: row.status.as_deref().map(str::parse).transpose()?,
            qualifications: row.qualifications,
            resume_file_name: row.resume_file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_display_name() {
        let json = serde_json::to_string(&EmploymentStatus::Freelancer).unwrap();
        assert_eq!(json, r#""Freelancer""#);
    }

    #[test]
    fn test_row_with_unknown_status_is_rejected() {
        let row = UserProfileRow {
            id: "uid-1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            age: Some(24),
            status: Some("Retired".to_string()),
            qualifications: String::new(),
            resume_file_name: None,
        };
        assert!(UserProfile::try_from(row).is_err());
    }

    #[test]
    fn test_row_with_negative_age_is_rejected() {
        let row = UserProfileRow {
            id: "uid-1".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            age: Some(-4),
            status: None,
            qualifications: String::new(),
            resume_file_name: None,
        };
        assert!(UserProfile::try_from(row).is_err());
    }
}
