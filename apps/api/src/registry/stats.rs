use serde::Serialize;

use crate::models::application::{ApplicationStatus, JobApplication};

/// Dashboard counters over one owner's applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub applied: usize,
    pub interview_scheduled: usize,
    pub offers_received: usize,
    pub rejected: usize,
}

pub fn compute_stats(applications: &[JobApplication]) -> ApplicationStats {
    applications
        .iter()
        .fold(ApplicationStats::default(), |mut stats, app| {
            stats.total += 1;
            match app.status {
                ApplicationStatus::Applied => stats.applied += 1,
                ApplicationStatus::InterviewScheduled => stats.interview_scheduled += 1,
                ApplicationStatus::OfferReceived => stats.offers_received += 1,
                ApplicationStatus::Rejected => stats.rejected += 1,
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    fn app(status: ApplicationStatus) -> JobApplication {
        JobApplication {
            id: Uuid::new_v4(),
            owner_id: "u1".to_string(),
            company: "Acme".to_string(),
            role: "Analyst".to_string(),
            description: String::new(),
            salary: None,
            status,
            application_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            skills: vec![],
            url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_counts_each_status() {
        let apps = vec![
            app(ApplicationStatus::Applied),
            app(ApplicationStatus::InterviewScheduled),
            app(ApplicationStatus::InterviewScheduled),
            app(ApplicationStatus::OfferReceived),
            app(ApplicationStatus::Rejected),
        ];
        let stats = compute_stats(&apps);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.interview_scheduled, 2);
        assert_eq!(stats.offers_received, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.applied, 1);
    }

    #[test]
    fn test_empty_is_all_zero() {
        assert_eq!(compute_stats(&[]), ApplicationStats::default());
    }
}
