//! Schema convention checks against the migrated database.

use sqlx::PgPool;

/// All `id` columns must be bigint.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table must have `created_at` as timestamptz.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_tables_have_created_at(pool: PgPool) {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT table_name
         FROM information_schema.tables
         WHERE table_schema = 'public'
           AND table_type = 'BASE TABLE'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table,) in &tables {
        let data_type: Option<(String,)> = sqlx::query_as(
            "SELECT data_type
             FROM information_schema.columns
             WHERE table_schema = 'public'
               AND table_name = $1
               AND column_name = 'created_at'",
        )
        .bind(table)
        .fetch_optional(&pool)
        .await
        .unwrap();

        assert_eq!(
            data_type.map(|(t,)| t).as_deref(),
            Some("timestamp with time zone"),
            "Table {table} should have created_at timestamptz"
        );
    }
}

/// Unique constraints use the `uq_` prefix so the API can map violations to 409.
#[sqlx::test(migrations = "./migrations")]
async fn test_unique_constraints_are_prefixed(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT conname::text
         FROM pg_constraint
         WHERE contype = 'u'
           AND connamespace = 'public'::regnamespace",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in &names {
        assert!(name.starts_with("uq_"), "constraint {name} lacks uq_ prefix");
    }
}

/// At most one main photo per parent is enforced by the schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_second_main_photo_is_rejected(pool: PgPool) {
    let company_id: i64 = sqlx::query_scalar(
        "INSERT INTO companies (name, category) VALUES ('Padaria Sol', 'alimentacao') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO company_photos (company_id, filename, is_main) VALUES ($1, 'a.jpg', true)")
        .bind(company_id)
        .execute(&pool)
        .await
        .unwrap();
    let second = sqlx::query(
        "INSERT INTO company_photos (company_id, filename, is_main) VALUES ($1, 'b.jpg', true)",
    )
    .bind(company_id)
    .execute(&pool)
    .await;

    assert!(second.is_err());
}
