use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    data::{booking::BookingRepository, token::TokenRepository, user::UserRepository},
    error::AppError,
    service::{storage::FileStorage, user::delete_accounts},
};

/// Rows removed by one purge run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PurgeReport {
    pub bookings: u64,
    pub users: u64,
    pub tokens: u64,
}

/// Starts the expiry scheduler
///
/// Runs every minute and removes:
/// - `void` bookings whose checkout window passed, with their additional drivers
/// - Unverified accounts past their activation deadline, with their files
/// - Activation and reset tokens past their expiry
///
/// # Arguments
/// - `db`: Database connection
/// - `storage`: File storage holding avatars and licenses of purged accounts
pub async fn start_scheduler(db: DatabaseConnection, storage: FileStorage) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job_storage = storage.clone();

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let db = job_db.clone();
        let storage = job_storage.clone();

        Box::pin(async move {
            match purge_expired(&db, &storage, Utc::now()).await {
                Ok(report) if report != PurgeReport::default() => {
                    tracing::info!(
                        "Purged {} expired bookings, {} expired accounts and {} expired tokens",
                        report.bookings,
                        report.users,
                        report.tokens
                    );
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Error purging expired records: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Expiry scheduler started");

    Ok(())
}

/// Removes everything that expired before `now`.
///
/// Bookings go first so an abandoned guest checkout releases its driver account in
/// the same run.
pub async fn purge_expired(
    db: &DatabaseConnection,
    storage: &FileStorage,
    now: DateTime<Utc>,
) -> Result<PurgeReport, AppError> {
    let bookings = BookingRepository::new(db).delete_expired_void(now).await?;

    let token_repo = TokenRepository::new(db);
    let expired_users = UserRepository::new(db)
        .find_expired_unverified_ids(now)
        .await?;
    let mut tokens = token_repo.delete_by_users(expired_users.clone()).await?;
    let users = delete_accounts(db, storage, expired_users).await?;

    tokens += token_repo.delete_expired(now).await?;

    Ok(PurgeReport {
        bookings,
        users,
        tokens,
    })
}
