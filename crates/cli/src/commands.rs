use crate::error::CliError;
use clap::{Subcommand, ValueEnum};
use client::{PlanClient, Principal, Resource};
use filter::{
    Dialect, FieldResolver, MySql, Postgres, QueryScope, Render, Renderer, predicate_scope,
    sql_scope,
};
use plan::{Expression, PlanFilter};
use std::path::{Path, PathBuf};
use store::{ContactRepository, PgContactStore};
use tracing::info;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a query plan from a JSON file and print the SQL filter
    Compile {
        /// Path to a plan filter (or bare expression) JSON file
        #[arg(long)]
        plan: PathBuf,
        /// SQL dialect for the structured backend
        #[arg(long, value_enum, default_value = "postgres")]
        dialect: DialectKind,
        /// Render through the structured predicate backend instead of the
        /// textual emitter
        #[arg(long)]
        structured: bool,
    },
    /// Create the demo schema and seed data
    Seed {
        /// Postgres connection URL
        #[arg(long)]
        db: String,
    },
    /// Fetch a query plan for a user and list the contacts it allows
    Contacts {
        /// Postgres connection URL
        #[arg(long)]
        db: String,
        /// Policy engine base URL
        #[arg(long)]
        policy: String,
        /// Username to request the plan for
        #[arg(long)]
        username: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DialectKind {
    Postgres,
    Mysql,
}

pub fn compile(path: &Path, dialect: DialectKind, structured: bool) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(path)?;
    let plan_filter = parse_plan(&raw)?;
    let resolver = FieldResolver::new();

    if structured {
        match predicate_scope(&resolver, &plan_filter)? {
            QueryScope::Empty => println!("-- always denied"),
            QueryScope::Unrestricted => println!("-- always allowed"),
            QueryScope::Restricted(predicate) => {
                let dialect: &dyn Dialect = match dialect {
                    DialectKind::Postgres => &Postgres,
                    DialectKind::Mysql => &MySql,
                };
                info!(dialect = %dialect.name(), "rendering structured predicate");
                let mut renderer = Renderer::new(dialect);
                predicate.render(&mut renderer);
                let (sql, params) = renderer.finish();
                println!("{sql}");
                println!(
                    "-- args: {}",
                    serde_json::to_string(&params).map_err(CliError::JsonSerialize)?
                );
            }
        }
    } else {
        match sql_scope(&resolver, &plan_filter)? {
            QueryScope::Empty => println!("-- always denied"),
            QueryScope::Unrestricted => println!("-- always allowed"),
            QueryScope::Restricted((sql, args)) => {
                println!("{sql}");
                println!(
                    "-- args: {}",
                    serde_json::to_string(&args).map_err(CliError::JsonSerialize)?
                );
            }
        }
    }

    Ok(())
}

// Accepts either a full plan filter or a bare expression, which is then
// treated as a conditional plan.
fn parse_plan(raw: &str) -> Result<PlanFilter, serde_json::Error> {
    match serde_json::from_str::<PlanFilter>(raw) {
        Ok(filter) => Ok(filter),
        Err(_) => {
            let expression: Expression = serde_json::from_str(raw)?;
            Ok(PlanFilter::conditional(expression))
        }
    }
}

pub async fn seed(db: &str) -> Result<(), CliError> {
    let store = PgContactStore::connect(db, FieldResolver::new()).await?;
    store.setup().await?;
    info!("database seeded");
    Ok(())
}

pub async fn contacts(db: &str, policy: &str, username: &str) -> Result<(), CliError> {
    let store = PgContactStore::connect(db, FieldResolver::new()).await?;
    let user = store
        .get_user_by_username(username)
        .await?
        .ok_or_else(|| CliError::UserNotFound(username.to_string()))?;

    let principal = Principal::new(&user.id.to_string())
        .with_role(&user.role)
        .with_attr("department", user.department.clone());
    let resource = Resource::new("contact");

    let client = PlanClient::new(policy);
    let response = client.plan_resources(&principal, &resource, "read").await?;
    info!(kind = ?response.filter.kind, "received query plan");

    let contacts = store.get_contacts(&response.filter).await?;
    let rendered =
        serde_json::to_string_pretty(&contacts).map_err(CliError::JsonSerialize)?;
    println!("{rendered}");
    Ok(())
}
