use crate::chat_store::error::Result;
use crate::models::ThreadSummary;
use deadpool_postgres::Pool;

/// Create the chat table if it does not exist yet
///
/// Layout: one row per thread, `value` holding a JSONB array of
/// `{"role", "content"}` objects in insertion order.
pub async fn create_table(pool: &Pool, table_name: &str) -> Result<()> {
    let conn = pool.get().await?;

    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {} (\
           id BIGSERIAL PRIMARY KEY, \
           key VARCHAR NOT NULL UNIQUE, \
           value JSONB NOT NULL DEFAULT '[]'::jsonb\
         )",
        table_name
    );

    conn.batch_execute(&sql).await?;

    Ok(())
}

/// List every non-empty thread with its message count, oldest thread first
pub async fn list_threads(pool: &Pool, table_name: &str) -> Result<Vec<ThreadSummary>> {
    let conn = pool.get().await?;

    let sql = format!(
        "SELECT key, jsonb_array_length(value)::BIGINT FROM {} \
         WHERE jsonb_array_length(value) > 0 ORDER BY id",
        table_name
    );

    let rows = conn.query(&sql, &[]).await?;

    rows.iter()
        .map(|row| -> Result<ThreadSummary> {
            let thread_id: String = row.try_get(0)?;
            let count: i64 = row.try_get(1)?;
            Ok(ThreadSummary {
                thread_id,
                message_count: count.max(0) as usize,
            })
        })
        .collect()
}
