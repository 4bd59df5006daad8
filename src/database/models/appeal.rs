use anyhow::{anyhow, Result};
use sqlx::FromRow;

/// The two kinds of appeal a user can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppealType {
    Unban,
    Admin,
}

impl AppealType {
    /// Parses a callback payload. Anything outside the two known types is
    /// rejected before it can reach the store.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "unban" => Ok(AppealType::Unban),
            "admin" => Ok(AppealType::Admin),
            other => Err(anyhow!("Unknown appeal type: {other}")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppealType::Unban => "unban",
            AppealType::Admin => "admin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AppealType::Unban => "Unban",
            AppealType::Admin => "Admin",
        }
    }
}

/// Lifecycle states of an appeal. Every appeal is created `Pending`; the
/// other two states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppealStatus {
    Pending,
    Approved,
    Rejected,
}

impl AppealStatus {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "pending" => Ok(AppealStatus::Pending),
            "approved" => Ok(AppealStatus::Approved),
            "rejected" => Ok(AppealStatus::Rejected),
            other => Err(anyhow!("Unknown appeal status: {other}")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppealStatus::Pending => "pending",
            AppealStatus::Approved => "approved",
            AppealStatus::Rejected => "rejected",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AppealStatus::Pending => "Pending",
            AppealStatus::Approved => "Approved",
            AppealStatus::Rejected => "Rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppealStatus::Pending)
    }

    /// The only legal transitions are pending -> approved and
    /// pending -> rejected; terminal states have no outgoing transitions.
    pub fn can_transition(from: AppealStatus, to: AppealStatus) -> bool {
        from == AppealStatus::Pending && to.is_terminal()
    }
}

/// An appeal as seen by the rest of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct Appeal {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub appeal_type: AppealType,
    pub status: AppealStatus,
    pub timestamp: String,
}

/// Raw table row; enum conversion happens only when crossing the store
/// boundary.
#[derive(Debug, FromRow)]
struct AppealRow {
    id: i64,
    user_id: i64,
    username: String,
    appeal_type: String,
    status: String,
    timestamp: String,
}

impl TryFrom<AppealRow> for Appeal {
    type Error = sqlx::Error;

    fn try_from(row: AppealRow) -> Result<Self, sqlx::Error> {
        let appeal_type = AppealType::parse(&row.appeal_type)
            .map_err(|e| sqlx::Error::Decode(e.to_string().into()))?;
        let status = AppealStatus::parse(&row.status)
            .map_err(|e| sqlx::Error::Decode(e.to_string().into()))?;

        Ok(Appeal {
            id: row.id,
            user_id: row.user_id,
            username: row.username,
            appeal_type,
            status,
            timestamp: row.timestamp,
        })
    }
}

impl Appeal {
    /// Inserts a new pending appeal and returns its assigned id.
    pub async fn create(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        username: &str,
        appeal_type: AppealType,
        timestamp: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO appeals (user_id, username, appeal_type, status, timestamp) VALUES (?, ?, ?, 'pending', ?)",
        )
        .bind(user_id)
        .bind(username)
        .bind(appeal_type.as_str())
        .bind(timestamp)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let row = sqlx::query_as::<_, AppealRow>(
            "SELECT id, user_id, username, appeal_type, status, timestamp FROM appeals WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        row.map(Appeal::try_from).transpose()
    }

    pub async fn count_by_status(
        pool: &sqlx::SqlitePool,
        status: AppealStatus,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM appeals WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Pages through appeals of one status in insertion order (ascending id).
    pub async fn list_by_status(
        pool: &sqlx::SqlitePool,
        status: AppealStatus,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AppealRow>(
            "SELECT id, user_id, username, appeal_type, status, timestamp FROM appeals WHERE status = ? ORDER BY id ASC LIMIT ? OFFSET ?",
        )
        .bind(status.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(Appeal::try_from).collect()
    }

    /// Sets the status unconditionally. Returns the number of affected rows,
    /// 0 when the id does not exist.
    pub async fn update_status(
        pool: &sqlx::SqlitePool,
        id: i64,
        status: AppealStatus,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE appeals SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn get_user_id(
        pool: &sqlx::SqlitePool,
        id: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT user_id FROM appeals WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(|(user_id,)| user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appeal_type_parse_valid() {
        assert_eq!(AppealType::parse("unban").unwrap(), AppealType::Unban);
        assert_eq!(AppealType::parse("admin").unwrap(), AppealType::Admin);
    }

    #[test]
    fn test_appeal_type_parse_invalid() {
        assert!(AppealType::parse("").is_err());
        assert!(AppealType::parse("Unban").is_err());
        assert!(AppealType::parse("page_1").is_err());
        assert!(AppealType::parse("unban ").is_err());
    }

    #[test]
    fn test_appeal_type_round_trip() {
        for appeal_type in [AppealType::Unban, AppealType::Admin] {
            assert_eq!(AppealType::parse(appeal_type.as_str()).unwrap(), appeal_type);
        }
    }

    #[test]
    fn test_appeal_status_parse_valid() {
        assert_eq!(AppealStatus::parse("pending").unwrap(), AppealStatus::Pending);
        assert_eq!(AppealStatus::parse("approved").unwrap(), AppealStatus::Approved);
        assert_eq!(AppealStatus::parse("rejected").unwrap(), AppealStatus::Rejected);
    }

    #[test]
    fn test_appeal_status_parse_invalid() {
        assert!(AppealStatus::parse("").is_err());
        assert!(AppealStatus::parse("closed").is_err());
        assert!(AppealStatus::parse("PENDING").is_err());
    }

    #[test]
    fn test_pending_is_the_only_non_terminal_status() {
        assert!(!AppealStatus::Pending.is_terminal());
        assert!(AppealStatus::Approved.is_terminal());
        assert!(AppealStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_legal_transitions() {
        assert!(AppealStatus::can_transition(AppealStatus::Pending, AppealStatus::Approved));
        assert!(AppealStatus::can_transition(AppealStatus::Pending, AppealStatus::Rejected));
    }

    #[test]
    fn test_illegal_transitions() {
        // No transition leaves a sink and there are no self-transitions.
        assert!(!AppealStatus::can_transition(AppealStatus::Pending, AppealStatus::Pending));
        assert!(!AppealStatus::can_transition(AppealStatus::Approved, AppealStatus::Rejected));
        assert!(!AppealStatus::can_transition(AppealStatus::Approved, AppealStatus::Pending));
        assert!(!AppealStatus::can_transition(AppealStatus::Rejected, AppealStatus::Approved));
        assert!(!AppealStatus::can_transition(AppealStatus::Rejected, AppealStatus::Rejected));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(AppealType::Unban.display_name(), "Unban");
        assert_eq!(AppealType::Admin.display_name(), "Admin");
        assert_eq!(AppealStatus::Approved.display_name(), "Approved");
        assert_eq!(AppealStatus::Rejected.display_name(), "Rejected");
    }
}
