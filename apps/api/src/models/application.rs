use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Pipeline stage of a job application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    Applied,
    #[serde(rename = "Interview Scheduled")]
    InterviewScheduled,
    #[serde(rename = "Offer Received")]
    OfferReceived,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::InterviewScheduled => "Interview Scheduled",
            ApplicationStatus::OfferReceived => "Offer Received",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Applied" => Ok(ApplicationStatus::Applied),
            "Interview Scheduled" => Ok(ApplicationStatus::InterviewScheduled),
            "Offer Received" => Ok(ApplicationStatus::OfferReceived),
            "Rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("Unknown application status '{other}'")),
        }
    }
}

/// A logged job application. (owner_id, company, role) is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: Uuid,
    pub owner_id: String,
    pub company: String,
    pub role: String,
    pub description: String,
    pub salary: Option<f64>,
    pub status: ApplicationStatus,
    pub application_date: NaiveDate,
    pub skills: Vec<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new application, ready for insertion.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub owner_id: String,
    pub company: String,
    pub role: String,
    pub description: String,
    pub salary: Option<f64>,
    pub status: ApplicationStatus,
    pub application_date: NaiveDate,
    pub skills: Vec<String>,
    pub url: Option<String>,
}

impl NewApplication {
    pub fn into_application(self, id: Uuid, created_at: DateTime<Utc>) -> JobApplication {
        JobApplication {
            id,
            owner_id: self.owner_id,
            company: self.company,
            role: self.role,
            description: self.description,
            salary: self.salary,
            status: self.status,
            application_date: self.application_date,
            skills: self.skills,
            url: self.url,
            created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub owner_id: String,
    pub company: String,
    pub role: String,
    pub description: String,
    pub salary: Option<f64>,
    pub status: String,
    pub application_date: NaiveDate,
    pub skills: Vec<String>,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<JobApplicationRow> for JobApplication {
    type Error = String;

    fn try_from(row: JobApplicationRow) -> Result<Self, Self::Error> {
        Ok(JobApplication {
            id: row.id,
            owner_id: row.owner_id,
            company: row.company,
            role: row.role,
            description: row.description,
            salary: row.salary,
            status: row.status.parse()?,
            application_date: row.application_date,
            skills: row.skills,
            url: row.url,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_uses_spaced_wire_names() {
        let json = serde_json::to_string(&ApplicationStatus::InterviewScheduled).unwrap();
        assert_eq!(json, r#""Interview Scheduled""#);
        let parsed: ApplicationStatus = serde_json::from_str(r#""Offer Received""#).unwrap();
        assert_eq!(parsed, ApplicationStatus::OfferReceived);
    }

    #[test]
    fn test_status_from_str_matches_as_str() {
        for status in [
            ApplicationStatus::Applied,
            ApplicationStatus::InterviewScheduled,
            ApplicationStatus::OfferReceived,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ApplicationStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_default_status_is_applied() {
        assert_eq!(ApplicationStatus::default(), ApplicationStatus::Applied);
    }
}
