use dbkit::{ConnectOpts, DbEngine, DbHandle, StorageError};
use sea_orm::{ConnectionTrait, DbBackend, Statement};

#[tokio::test]
async fn memory_database_keeps_state_across_queries() {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .unwrap();
    assert_eq!(db.engine(), DbEngine::Sqlite);

    let conn = db.sea();
    conn.execute_unprepared("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT NOT NULL)")
        .await
        .unwrap();
    conn.execute_unprepared("INSERT INTO t (v) VALUES ('a')")
        .await
        .unwrap();

    let row = conn
        .query_one(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT COUNT(*) AS n FROM t",
        ))
        .await
        .unwrap()
        .unwrap();
    let n: i64 = row.try_get("", "n").unwrap();
    assert_eq!(n, 1);

    db.close().await;
}

#[tokio::test]
async fn foreign_keys_are_enforced() {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .unwrap();
    let conn = db.sea();
    conn.execute_unprepared("CREATE TABLE parent (id INTEGER PRIMARY KEY)")
        .await
        .unwrap();
    conn.execute_unprepared(
        "CREATE TABLE child (id INTEGER PRIMARY KEY, parent_id INTEGER NOT NULL REFERENCES parent(id))",
    )
    .await
    .unwrap();

    let err = conn
        .execute_unprepared("INSERT INTO child (parent_id) VALUES (42)")
        .await
        .unwrap_err();
    assert!(matches!(
        StorageError::from(err),
        StorageError::ForeignKeyViolation(_)
    ));
}

#[tokio::test]
async fn unique_violation_is_classified() {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .unwrap();
    let conn = db.sea();
    conn.execute_unprepared("CREATE TABLE u (email TEXT NOT NULL UNIQUE)")
        .await
        .unwrap();
    conn.execute_unprepared("INSERT INTO u VALUES ('a@b.c')")
        .await
        .unwrap();

    let err = conn
        .execute_unprepared("INSERT INTO u VALUES ('a@b.c')")
        .await
        .unwrap_err();
    assert!(matches!(
        StorageError::from(err),
        StorageError::UniqueViolation(_)
    ));
}

#[tokio::test]
async fn file_database_creates_parent_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested/rental.db");
    let dsn = format!("sqlite://{}", path.to_string_lossy().replace('\\', "/"));

    let db = DbHandle::connect(&dsn, ConnectOpts::default()).await.unwrap();
    db.sea()
        .execute_unprepared("CREATE TABLE t (id INTEGER PRIMARY KEY)")
        .await
        .unwrap();
    db.close().await;

    assert!(path.exists());
}

#[tokio::test]
async fn percent_encoded_dsn_lands_in_the_decoded_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().to_string_lossy().replace('\\', "/");
    let dsn = format!("sqlite://{base}/my%20db/rental.db");

    let db = DbHandle::connect(&dsn, ConnectOpts::default()).await.unwrap();
    db.sea()
        .execute_unprepared("CREATE TABLE t (id INTEGER PRIMARY KEY)")
        .await
        .unwrap();
    db.close().await;

    assert!(tmp.path().join("my db").join("rental.db").exists());
    assert!(!tmp.path().join("my%20db").exists());
}
