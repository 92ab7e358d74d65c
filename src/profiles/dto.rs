use serde::Deserialize;

use super::repo_types::{NewProfile, ProfileChanges};

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub user_id: Option<i64>,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub exp: Option<String>,
    pub skills: Option<String>,
}

impl From<CreateProfileRequest> for NewProfile {
    fn from(r: CreateProfileRequest) -> Self {
        Self {
            user_id: r.user_id,
            first_name: r.firstname,
            last_name: r.lastname,
            email: r.email,
            phone: r.phone,
            avatar: r.avatar,
            exp: r.exp,
            skills: r.skills,
        }
    }
}

/// Absent fields become `""` and overwrite whatever was stored.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub exp: String,
    #[serde(default)]
    pub skills: String,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(r: UpdateProfileRequest) -> Self {
        Self {
            email: r.email,
            phone: r.phone,
            exp: r.exp,
            skills: r.skills,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_uses_wire_names() {
        let body: CreateProfileRequest = serde_json::from_str(
            r#"{"user_id":3,"firstname":"Jane","lastname":"Doe","exp":"5"}"#,
        )
        .unwrap();
        let p = NewProfile::from(body);
        assert_eq!(p.user_id, Some(3));
        assert_eq!(p.first_name, "Jane");
        assert_eq!(p.last_name, "Doe");
        assert_eq!(p.exp.as_deref(), Some("5"));
        assert!(p.email.is_none());
    }

    #[test]
    fn update_body_defaults_missing_fields_to_empty() {
        let body: UpdateProfileRequest = serde_json::from_str(r#"{"skills":"go"}"#).unwrap();
        assert_eq!(body.skills, "go");
        assert_eq!(body.email, "");
        assert_eq!(body.phone, "");
        assert_eq!(body.exp, "");
    }
}
