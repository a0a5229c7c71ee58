use crate::models::LedgerRecord;
use sqlx::{Pool, Sqlite};
use tracing::info;

/// Batch-insert raw ledger records. Rows whose natural key already exists
/// are silently dropped, so re-ingesting the same window is a no-op.
pub async fn append_ledger(
    pool: &Pool<Sqlite>,
    records: &[LedgerRecord],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for record in records {
        sqlx::query(
            r#"
            INSERT INTO ledger_entries (hash, address, category, value, timestamp)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (hash, category, address, value, timestamp) DO NOTHING
            "#,
        )
        .bind(&record.hash)
        .bind(&record.address)
        .bind(record.category.as_str())
        .bind(record.value)
        .bind(&record.timestamp)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(records = records.len(), "appended ledger batch");
    Ok(())
}

pub async fn count_entries(pool: &Pool<Sqlite>) -> Result<i64, sqlx::Error> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM ledger_entries")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
