use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_postgres::Row;

#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub owner_id: i64,
    pub company_id: Option<i64>,
    pub active: bool,
    pub marketing_opt_in: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Contact {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            owner_id: row.try_get("owner_id")?,
            company_id: row.try_get("company_id")?,
            active: row.try_get("active")?,
            marketing_opt_in: row.try_get("marketing_opt_in")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub department: String,
}

impl User {
    pub fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            role: row.try_get("role")?,
            department: row.try_get("department")?,
        })
    }
}
