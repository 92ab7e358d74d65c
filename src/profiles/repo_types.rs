use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: Option<i64>, // not checked against "user"
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub exp: Option<String>,
    pub skills: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
}

/// Column values for a new profile row.
#[derive(Debug, Default)]
pub struct NewProfile {
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub exp: Option<String>,
    pub skills: Option<String>,
}

/// The four columns an update overwrites, all of them, every time.
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub email: String,
    pub phone: String,
    pub exp: String,
    pub skills: String,
}
