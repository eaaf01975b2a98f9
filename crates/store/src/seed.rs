//! Demo schema bootstrap: creates the tables and inserts the embedded
//! seed users, companies and contacts.

use crate::error::StoreError;
use serde::Deserialize;
use tokio_postgres::Client;
use tracing::info;

const SCHEMA_SQL: &str = include_str!("sql/schema.sql");
const SEED_JSON: &str = include_str!("sql/seed.json");

const INSERT_USER_SQL: &str = "insert into users (name, username, email, role, department) \
     values ($1, $2, $3, $4, $5) returning id";
const INSERT_COMPANY_SQL: &str = "insert into companies (name) values ($1) returning id";
const INSERT_CONTACT_SQL: &str =
    "insert into contacts (first_name, last_name, owner_id, company_id, active, marketing_opt_in) \
     values ($1, $2, $3, $4, $5, $6)";

#[derive(Debug, Deserialize)]
struct SeedUser {
    name: String,
    username: String,
    email: String,
    role: String,
    department: String,
    #[serde(default)]
    contacts: Vec<SeedContact>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedContact {
    company: Option<SeedCompany>,
    first_name: String,
    last_name: String,
    #[serde(default)]
    marketing_opt_in: bool,
    #[serde(default)]
    active: bool,
}

#[derive(Debug, Deserialize)]
struct SeedCompany {
    name: String,
}

pub async fn setup_database(client: &Client) -> Result<(), StoreError> {
    let users: Vec<SeedUser> = serde_json::from_str(SEED_JSON)?;

    client.batch_execute(SCHEMA_SQL).await?;

    for user in &users {
        let row = client
            .query_one(
                INSERT_USER_SQL,
                &[
                    &user.name,
                    &user.username,
                    &user.email,
                    &user.role,
                    &user.department,
                ],
            )
            .await?;
        let user_id: i64 = row.get(0);

        for contact in &user.contacts {
            let company_id = match &contact.company {
                Some(company) => {
                    let row = client.query_one(INSERT_COMPANY_SQL, &[&company.name]).await?;
                    Some(row.get::<_, i64>(0))
                }
                None => None,
            };
            client
                .execute(
                    INSERT_CONTACT_SQL,
                    &[
                        &contact.first_name,
                        &contact.last_name,
                        &user_id,
                        &company_id,
                        &contact.active,
                        &contact.marketing_opt_in,
                    ],
                )
                .await?;
        }
    }

    info!(users = users.len(), "seeded database");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_seed_data_parses() {
        let users: Vec<SeedUser> = serde_json::from_str(SEED_JSON).unwrap();
        assert!(!users.is_empty());
        let contacts: usize = users.iter().map(|user| user.contacts.len()).sum();
        assert!(contacts > 0);
    }
}
