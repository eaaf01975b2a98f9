pub mod dialect;
pub mod dispatch;
pub mod error;
pub mod fields;
pub mod predicate;
pub mod render;
pub mod sink;
pub mod text;

pub use dialect::{Dialect, MySql, Postgres};
pub use dispatch::{QueryScope, predicate_scope, sql_scope};
pub use error::{FilterError, Result};
pub use fields::FieldResolver;
pub use predicate::{CompareOp, Predicate, PredicateEmitter, compile_predicate};
pub use render::{Render, Renderer};
pub use sink::{QuerySink, compile};
pub use text::{SqlEmitter, compile_sql};
