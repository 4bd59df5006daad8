use anyhow::Result;
use chrono::Utc;
use fed_appeals_bot::database::{connection::DatabaseManager, models::*};
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

async fn submit_appeal(
    db: &DatabaseManager,
    user_id: i64,
    username: &str,
    appeal_type: AppealType,
) -> Result<i64> {
    let timestamp = Utc::now().to_rfc3339();
    let id = Appeal::create(&db.pool, user_id, username, appeal_type, &timestamp).await?;
    Ok(id)
}

#[tokio::test]
async fn test_create_assigns_increasing_ids_and_pending_status() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let first = submit_appeal(&db, 7, "someuser", AppealType::Unban).await?;
    let second = submit_appeal(&db, 8, "otheruser", AppealType::Admin).await?;
    let third = submit_appeal(&db, 7, "someuser", AppealType::Admin).await?;

    assert!(second > first);
    assert!(third > second);

    for id in [first, second, third] {
        let appeal = Appeal::find_by_id(&db.pool, id).await?;
        assert_eq!(appeal.unwrap().status, AppealStatus::Pending);
    }

    Ok(())
}

#[tokio::test]
async fn test_find_by_id_returns_stored_fields() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let timestamp = Utc::now().to_rfc3339();
    let id = Appeal::create(&db.pool, 7, "someuser", AppealType::Unban, &timestamp).await?;

    let appeal = Appeal::find_by_id(&db.pool, id).await?;
    assert!(appeal.is_some());
    let appeal = appeal.unwrap();
    assert_eq!(appeal.id, id);
    assert_eq!(appeal.user_id, 7);
    assert_eq!(appeal.username, "someuser");
    assert_eq!(appeal.appeal_type, AppealType::Unban);
    assert_eq!(appeal.status, AppealStatus::Pending);
    assert_eq!(appeal.timestamp, timestamp);

    Ok(())
}

#[tokio::test]
async fn test_find_by_id_not_found() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let result = Appeal::find_by_id(&db.pool, 999).await?;
    assert!(result.is_none());

    Ok(())
}

#[tokio::test]
async fn test_count_by_status() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    assert_eq!(Appeal::count_by_status(&db.pool, AppealStatus::Pending).await?, 0);

    let first = submit_appeal(&db, 1, "user1", AppealType::Unban).await?;
    submit_appeal(&db, 2, "user2", AppealType::Admin).await?;
    submit_appeal(&db, 3, "user3", AppealType::Unban).await?;

    assert_eq!(Appeal::count_by_status(&db.pool, AppealStatus::Pending).await?, 3);

    Appeal::update_status(&db.pool, first, AppealStatus::Approved).await?;

    assert_eq!(Appeal::count_by_status(&db.pool, AppealStatus::Pending).await?, 2);
    assert_eq!(Appeal::count_by_status(&db.pool, AppealStatus::Approved).await?, 1);
    assert_eq!(Appeal::count_by_status(&db.pool, AppealStatus::Rejected).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_list_by_status_pages_in_insertion_order() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let mut ids = Vec::new();
    for i in 0..12 {
        ids.push(submit_appeal(&db, 100 + i, &format!("user{i}"), AppealType::Unban).await?);
    }

    // 12 pending rows with page size 5: pages of 5, 5, 2, then empty.
    let page0 = Appeal::list_by_status(&db.pool, AppealStatus::Pending, 5, 0).await?;
    let page1 = Appeal::list_by_status(&db.pool, AppealStatus::Pending, 5, 5).await?;
    let page2 = Appeal::list_by_status(&db.pool, AppealStatus::Pending, 5, 10).await?;
    let page3 = Appeal::list_by_status(&db.pool, AppealStatus::Pending, 5, 15).await?;

    assert_eq!(page0.len(), 5);
    assert_eq!(page1.len(), 5);
    assert_eq!(page2.len(), 2);
    assert!(page3.is_empty());

    let listed: Vec<i64> = page0
        .iter()
        .chain(page1.iter())
        .chain(page2.iter())
        .map(|a| a.id)
        .collect();
    assert_eq!(listed, ids);

    Ok(())
}

#[tokio::test]
async fn test_resolved_appeals_leave_the_pending_list() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let first = submit_appeal(&db, 1, "user1", AppealType::Unban).await?;
    let second = submit_appeal(&db, 2, "user2", AppealType::Admin).await?;

    Appeal::update_status(&db.pool, first, AppealStatus::Rejected).await?;

    let pending = Appeal::list_by_status(&db.pool, AppealStatus::Pending, 5, 0).await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second);

    Ok(())
}

#[tokio::test]
async fn test_update_status_read_after_write() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let id = submit_appeal(&db, 7, "someuser", AppealType::Unban).await?;

    let affected = Appeal::update_status(&db.pool, id, AppealStatus::Approved).await?;
    assert_eq!(affected, 1);

    let appeal = Appeal::find_by_id(&db.pool, id).await?.unwrap();
    assert_eq!(appeal.status, AppealStatus::Approved);
    // Only the status is mutable; everything else is unchanged.
    assert_eq!(appeal.user_id, 7);
    assert_eq!(appeal.appeal_type, AppealType::Unban);

    Ok(())
}

#[tokio::test]
async fn test_update_status_missing_id_changes_nothing() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let id = submit_appeal(&db, 7, "someuser", AppealType::Unban).await?;

    let affected = Appeal::update_status(&db.pool, 999, AppealStatus::Approved).await?;
    assert_eq!(affected, 0);

    let appeal = Appeal::find_by_id(&db.pool, id).await?.unwrap();
    assert_eq!(appeal.status, AppealStatus::Pending);
    assert_eq!(Appeal::count_by_status(&db.pool, AppealStatus::Approved).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_get_user_id() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let id = submit_appeal(&db, 7, "someuser", AppealType::Unban).await?;

    assert_eq!(Appeal::get_user_id(&db.pool, id).await?, Some(7));
    assert_eq!(Appeal::get_user_id(&db.pool, 999).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_status_check_constraint_rejects_unknown_values() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    // The store never writes anything outside the enum, so go through raw
    // SQL to prove the storage-level constraint holds on its own.
    let result = sqlx::query(
        "INSERT INTO appeals (user_id, username, appeal_type, status, timestamp) VALUES (1, 'someuser', 'unban', 'bogus', '2026-01-01T00:00:00+00:00')",
    )
    .execute(&db.pool)
    .await;

    assert!(result.is_err());

    Ok(())
}
