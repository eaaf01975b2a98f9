//! Bridges plan literals to postgres query parameters.

use crate::error::StoreError;
use plan::Value;
use tokio_postgres::types::ToSql;

pub struct PgParam(Box<dyn ToSql + Sync + Send>);

impl PgParam {
    pub fn from_value(value: Value) -> Result<Self, StoreError> {
        Ok(match value {
            Value::Null => PgParam(Box::new(Option::<String>::None)),
            Value::Boolean(v) => PgParam(Box::new(v)),
            Value::Int(v) => PgParam(Box::new(v)),
            Value::Float(v) => PgParam(Box::new(v)),
            Value::String(v) => PgParam(Box::new(v)),
            Value::List(items) => Self::from_list(items)?,
        })
    }

    // A list binds as a single array parameter, so its elements must share
    // one postgres type.
    fn from_list(items: Vec<Value>) -> Result<Self, StoreError> {
        if items.iter().all(|item| matches!(item, Value::Int(_))) {
            let ints: Vec<i64> = items.iter().filter_map(Value::as_i64).collect();
            return Ok(PgParam(Box::new(ints)));
        }
        if items.iter().all(|item| matches!(item, Value::String(_))) {
            let strings: Vec<String> = items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect();
            return Ok(PgParam(Box::new(strings)));
        }
        if items.iter().all(|item| matches!(item, Value::Boolean(_))) {
            let bools: Vec<bool> = items.iter().filter_map(Value::as_bool).collect();
            return Ok(PgParam(Box::new(bools)));
        }
        if items
            .iter()
            .all(|item| matches!(item, Value::Float(_) | Value::Int(_)))
        {
            let floats: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
            return Ok(PgParam(Box::new(floats)));
        }
        Err(StoreError::UnsupportedParam(format!(
            "mixed-type list {items:?}"
        )))
    }
}

impl AsRef<dyn ToSql + Sync> for PgParam {
    fn as_ref(&self) -> &(dyn ToSql + Sync + 'static) {
        &*self.0
    }
}

pub struct PgParamStore {
    pub params: Vec<PgParam>,
}

impl PgParamStore {
    pub fn from_values(values: Vec<Value>) -> Result<Self, StoreError> {
        Ok(Self {
            params: values
                .into_iter()
                .map(PgParam::from_value)
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|param| param.as_ref())
            .collect::<Vec<_>>()
    }
}
