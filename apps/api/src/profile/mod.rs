//! User profile completion and editing.

pub mod handlers;
pub mod store;

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{EmploymentStatus, UserProfile};
use crate::session::identity::AuthUser;
use store::ProfileStore;

/// Form fields; anything absent keeps its stored value on update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub status: Option<EmploymentStatus>,
    pub qualifications: Option<String>,
    pub resume_file_name: Option<String>,
}

const AGE_RANGE: std::ops::RangeInclusive<u32> = 1..=150;

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

fn validated_age(age: u32) -> Result<u32, AppError> {
    if AGE_RANGE.contains(&age) {
        Ok(age)
    } else {
        Err(AppError::Validation(format!(
            "Age must be between {} and {}",
            AGE_RANGE.start(),
            AGE_RANGE.end()
        )))
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{field} is required")))
}

/// First-time completion. The email always comes from the identity provider;
/// name, age, status and qualifications must all be supplied.
pub async fn complete_profile(
    store: &dyn ProfileStore,
    user: &AuthUser,
    form: ProfileForm,
) -> Result<UserProfile, AppError> {
    let name = required(trimmed(form.name).filter(|n| !n.is_empty()), "Name")?;
    let age = validated_age(required(form.age, "Age")?)?;
    let status = required(form.status, "Status")?;
    let qualifications = required(
        trimmed(form.qualifications).filter(|q| !q.is_empty()),
        "Qualifications",
    )?;

    if store.get(&user.uid).await?.is_some() {
        return Err(AppError::Conflict("Profile already completed".to_string()));
    }

    let profile = UserProfile {
        id: user.uid.clone(),
        name,
        email: user.email.clone(),
        age: Some(age),
        status: Some(status),
        qualifications,
        resume_file_name: trimmed(form.resume_file_name).filter(|f| !f.is_empty()),
    };

    let saved = store.upsert(profile).await?;
    info!("Profile completed for {}", saved.id);
    Ok(saved)
}

pub async fn update_profile(
    store: &dyn ProfileStore,
    uid: &str,
    form: ProfileForm,
) -> Result<UserProfile, AppError> {
    let mut profile = store
        .get(uid)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not completed yet".to_string()))?;

    if let Some(name) = trimmed(form.name) {
        if name.is_empty() {
            return Err(AppError::Validation("Name cannot be empty".to_string()));
        }
        profile.name = name;
    }
    if let Some(age) = form.age {
        profile.age = Some(validated_age(age)?);
    }
    if form.status.is_some() {
        profile.status = form.status;
    }
    if let Some(q) = trimmed(form.qualifications) {
        profile.qualifications = q;
    }
    if let Some(file) = trimmed(form.resume_file_name) {
        profile.resume_file_name = Some(file).filter(|f| !f.is_empty());
    }

    store.upsert(profile).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryProfileStore;

    fn user() -> AuthUser {
        AuthUser {
            uid: "uid-7".to_string(),
            email: "meera@example.com".to_string(),
            display_name: None,
        }
    }

    fn full_form() -> ProfileForm {
        ProfileForm {
            name: Some("Meera".to_string()),
            age: Some(23),
            status: Some(EmploymentStatus::Student),
            qualifications: Some("BSc Statistics".to_string()),
            resume_file_name: None,
        }
    }

    #[tokio::test]
    async fn test_complete_takes_email_from_identity() {
        let store = MemoryProfileStore::default();
        let form = ProfileForm {
            name: Some("  Meera ".to_string()),
            ..full_form()
        };
        let profile = complete_profile(&store, &user(), form).await.unwrap();
        assert_eq!(profile.name, "Meera");
        assert_eq!(profile.email, "meera@example.com");
        assert_eq!(profile.status, Some(EmploymentStatus::Student));
        assert_eq!(store.get("uid-7").await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_complete_requires_name() {
        let store = MemoryProfileStore::default();
        let err = complete_profile(&store, &user(), ProfileForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_complete_requires_every_field() {
        let store = MemoryProfileStore::default();
        let incomplete = [
            ProfileForm { age: None, ..full_form() },
            ProfileForm { status: None, ..full_form() },
            ProfileForm { qualifications: None, ..full_form() },
            ProfileForm { qualifications: Some("  ".to_string()), ..full_form() },
        ];
        for form in incomplete {
            let err = complete_profile(&store, &user(), form).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(store.get("uid-7").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_age_outside_range_is_rejected() {
        let store = MemoryProfileStore::default();
        for age in [0, 151, 3_000_000_000] {
            let form = ProfileForm { age: Some(age), ..full_form() };
            let err = complete_profile(&store, &user(), form).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }

        complete_profile(&store, &user(), full_form()).await.unwrap();
        let err = update_profile(
            &store,
            "uid-7",
            ProfileForm { age: Some(3_000_000_000), ..Default::default() },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.get("uid-7").await.unwrap().unwrap().age, Some(23));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let store = MemoryProfileStore::default();
        complete_profile(&store, &user(), full_form()).await.unwrap();

        let updated = update_profile(
            &store,
            "uid-7",
            ProfileForm {
                status: Some(EmploymentStatus::Employed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.status, Some(EmploymentStatus::Employed));
        assert_eq!(updated.age, Some(23));
        assert_eq!(updated.qualifications, "BSc Statistics");
    }

    #[tokio::test]
    async fn test_update_before_completion_is_not_found() {
        let store = MemoryProfileStore::default();
        let err = update_profile(&store, "nobody", ProfileForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
