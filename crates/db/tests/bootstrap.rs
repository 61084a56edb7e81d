use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    lollyshoppe_db::health_check(&pool).await.unwrap();

    // Verify all five entity tables exist and are empty
    let tables = ["users", "projects", "milestones", "deliverables", "invoices"];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The users table must reject duplicate external ids; identity-sync
/// idempotency under concurrency depends on this constraint existing.
#[sqlx::test(migrations = "./migrations")]
async fn test_external_id_unique_constraint(pool: PgPool) {
    sqlx::query("INSERT INTO users (external_id, email) VALUES ('sub_1', 'a@example.com')")
        .execute(&pool)
        .await
        .unwrap();

    let err = sqlx::query("INSERT INTO users (external_id, email) VALUES ('sub_1', 'b@example.com')")
        .execute(&pool)
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_users_external_id"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

/// updated_at must advance on UPDATE via the shared trigger.
#[sqlx::test(migrations = "./migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    sqlx::query("INSERT INTO users (external_id, email) VALUES ('sub_t', 't@example.com')")
        .execute(&pool)
        .await
        .unwrap();

    let (created, updated): (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) =
        sqlx::query_as("SELECT created_at, updated_at FROM users WHERE external_id = 'sub_t'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(created, updated);

    sqlx::query("UPDATE users SET email = 't2@example.com' WHERE external_id = 'sub_t'")
        .execute(&pool)
        .await
        .unwrap();

    let (_, updated_after): (chrono::DateTime<chrono::Utc>, chrono::DateTime<chrono::Utc>) =
        sqlx::query_as("SELECT created_at, updated_at FROM users WHERE external_id = 'sub_t'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(updated_after > updated);
}
