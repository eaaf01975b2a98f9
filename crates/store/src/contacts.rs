//! A postgres-backed contact repository that applies the outcome of plan
//! dispatch: denied plans never reach the database, unconditional plans
//! run the select-all query, and conditional plans run with the compiled
//! WHERE fragment and its bound arguments.

use crate::error::StoreError;
use crate::model::{Contact, User};
use crate::params::PgParamStore;
use crate::seed;
use async_trait::async_trait;
use filter::{FieldResolver, QueryScope, sql_scope};
use plan::PlanFilter;
use tokio_postgres::{Client, Config, NoTls};
use tracing::{debug, error};

const SELECT_CONTACTS_SQL: &str = "select id, first_name, last_name, owner_id, company_id, \
     active, marketing_opt_in, created_at, updated_at from contacts";
const SELECT_USER_SQL: &str =
    "select id, username, email, name, role, department from users where username = $1";

#[async_trait]
pub trait ContactRepository {
    async fn get_all_contacts(&self) -> Result<Vec<Contact>, StoreError>;
    async fn get_contacts(&self, filter: &PlanFilter) -> Result<Vec<Contact>, StoreError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

pub struct PgContactStore {
    client: Client,
    resolver: FieldResolver,
}

impl PgContactStore {
    pub async fn connect(url: &str, resolver: FieldResolver) -> Result<Self, StoreError> {
        let config = url.parse::<Config>()?;
        let (client, connection) = config.connect(NoTls).await?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                error!(%err, "Postgres connection error");
            }
        });
        Ok(PgContactStore { client, resolver })
    }

    /// Creates the schema and inserts the seed rows.
    pub async fn setup(&self) -> Result<(), StoreError> {
        seed::setup_database(&self.client).await
    }
}

#[async_trait]
impl ContactRepository for PgContactStore {
    async fn get_all_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        let rows = self.client.query(SELECT_CONTACTS_SQL, &[]).await?;
        rows.iter()
            .map(|row| Contact::from_row(row).map_err(StoreError::from))
            .collect()
    }

    async fn get_contacts(&self, filter: &PlanFilter) -> Result<Vec<Contact>, StoreError> {
        match sql_scope(&self.resolver, filter)? {
            QueryScope::Empty => Ok(Vec::new()),
            QueryScope::Unrestricted => self.get_all_contacts().await,
            QueryScope::Restricted((where_clause, args)) => {
                let sql = format!("{SELECT_CONTACTS_SQL} where {where_clause}");
                debug!(%sql, args = args.len(), "running filtered contact query");
                let params = PgParamStore::from_values(args)?;
                let rows = self.client.query(&sql, &params.as_refs()).await?;
                rows.iter()
                    .map(|row| Contact::from_row(row).map_err(StoreError::from))
                    .collect()
            }
        }
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = self.client.query_opt(SELECT_USER_SQL, &[&username]).await?;
        row.as_ref().map(User::from_row).transpose().map_err(StoreError::from)
    }
}
