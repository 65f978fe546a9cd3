use crate::chat_store::{error::Result, store::DeleteOutcome};
use crate::models::Message;
use deadpool_postgres::Pool;

/// Append messages to a thread in a single statement
///
/// # Behavior
///
/// 1. **Atomic**: the row is created or extended by one `INSERT ... ON CONFLICT`,
///    so concurrent appends to the same key serialize on the row lock and
///    neither batch is lost
/// 2. **Contiguous**: the batch is concatenated as a whole, never interleaved
/// 3. **No-op**: an empty batch touches nothing
pub async fn append_messages(
    pool: &Pool,
    table_name: &str,
    key: &str,
    messages: &[Message],
) -> Result<()> {
    if messages.is_empty() {
        return Ok(());
    }

    let conn = pool.get().await?;

    let sql = format!(
        "INSERT INTO {t} (key, value) VALUES ($1, $2) \
         ON CONFLICT (key) DO UPDATE SET value = {t}.value || EXCLUDED.value",
        t = table_name
    );

    let value = serde_json::to_value(messages)?;

    conn.execute(&sql, &[&key, &value]).await?;

    Ok(())
}

/// Delete the row for a thread
pub async fn delete_messages(pool: &Pool, table_name: &str, key: &str) -> Result<DeleteOutcome> {
    let conn = pool.get().await?;

    let sql = format!("DELETE FROM {} WHERE key = $1", table_name);

    let deleted = conn.execute(&sql, &[&key]).await?;

    Ok(if deleted > 0 {
        DeleteOutcome::Deleted
    } else {
        DeleteOutcome::NotFound
    })
}
