use crate::accumulate::CycleTotals;
use crate::models::BalanceRow;
use sqlx::{Pool, Row, Sqlite};
use tracing::info;

/// Apply one cycle's totals to the durable balances.
///
/// For every address seen on either side, insert a fresh row or add the
/// deltas to the existing totals. The balance column is maintained by the
/// same statement that updates the totals.
pub async fn apply_balance_deltas(
    pool: &Pool<Sqlite>,
    totals: &CycleTotals,
) -> Result<(), sqlx::Error> {
    let addresses = totals.addresses();
    let mut tx = pool.begin().await?;

    for address in &addresses {
        let total_input = totals.input.get(*address).copied().unwrap_or(0);
        let total_output = totals.output.get(*address).copied().unwrap_or(0);

        sqlx::query(
            r#"
            INSERT INTO address_balances (address, total_input, total_output, balance)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (address) DO UPDATE SET
                total_input = total_input + excluded.total_input,
                total_output = total_output + excluded.total_output,
                balance = balance + excluded.total_input - excluded.total_output
            "#,
        )
        .bind(*address)
        .bind(total_input)
        .bind(total_output)
        .bind(total_input - total_output)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    info!(addresses = addresses.len(), "updated address balances");
    Ok(())
}

pub async fn get_balance(
    pool: &Pool<Sqlite>,
    address: &str,
) -> Result<Option<BalanceRow>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT address, total_input, total_output, balance
         FROM address_balances WHERE address = ?",
    )
    .bind(address)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| BalanceRow {
        address: row.get("address"),
        total_input: row.get("total_input"),
        total_output: row.get("total_output"),
        balance: row.get("balance"),
    }))
}

pub async fn get_all_balances(pool: &Pool<Sqlite>) -> Result<Vec<BalanceRow>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT address, total_input, total_output, balance
         FROM address_balances ORDER BY address ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| BalanceRow {
            address: row.get("address"),
            total_input: row.get("total_input"),
            total_output: row.get("total_output"),
            balance: row.get("balance"),
        })
        .collect())
}
