use super::HostedError;
use postgres::{Client, NoTls};
use tracing::info;

/// Run `sql` against the hosted database in a single transaction: either every
/// statement applies or none do.
pub fn apply_migration(database_url: &str, sql: &str) -> Result<(), HostedError> {
    let mut client = Client::connect(database_url, NoTls)
        .map_err(|e| HostedError::Database(format!("connect failed: {e}")))?;

    let mut tx = client
        .transaction()
        .map_err(|e| HostedError::Database(format!("begin failed: {e}")))?;
    tx.batch_execute(sql)
        .map_err(|e| HostedError::Database(e.to_string()))?;
    tx.commit()
        .map_err(|e| HostedError::Database(format!("commit failed: {e}")))?;

    info!("migration applied");
    Ok(())
}
