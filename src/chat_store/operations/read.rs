use crate::chat_store::error::Result;
use crate::models::Message;
use deadpool_postgres::Pool;
use serde_json::Value;

/// Retrieve the stored history of one thread
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `table_name` - Validated chat table name
/// * `key` - Thread id
///
/// # Returns
///
/// Messages in insertion order, or an empty list if the thread has no row
pub async fn get_messages(pool: &Pool, table_name: &str, key: &str) -> Result<Vec<Message>> {
    let conn = pool.get().await?;

    let sql = format!("SELECT value FROM {} WHERE key = $1", table_name);

    let row = conn.query_opt(&sql, &[&key]).await?;

    match row {
        Some(row) => {
            let value: Value = row.try_get(0)?;
            parse_messages(value)
        }
        None => Ok(Vec::new()),
    }
}

/// Decode the JSONB array stored for a thread
pub(crate) fn parse_messages(value: Value) -> Result<Vec<Message>> {
    match value {
        Value::Null => Ok(Vec::new()),
        value => Ok(serde_json::from_value(value)?),
    }
}
