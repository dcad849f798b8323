#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_missing_key_is_none() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.get_item("nope").unwrap(), None);
}

#[test]
fn test_set_then_get() {
    let mut db = Database::open_in_memory().unwrap();
    db.set_item("greeting", "hello").unwrap();
    assert_eq!(db.get_item("greeting").unwrap().as_deref(), Some("hello"));
}

#[test]
fn test_set_overwrites() {
    let mut db = Database::open_in_memory().unwrap();
    db.set_item("k", "one").unwrap();
    db.set_item("k", "two").unwrap();
    assert_eq!(db.get_item("k").unwrap().as_deref(), Some("two"));

    let rows: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM kv", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_keys_are_independent() {
    let mut db = Database::open_in_memory().unwrap();
    db.set_item("a", "[]").unwrap();
    db.set_item("b", "500").unwrap();
    assert_eq!(db.get_item("a").unwrap().as_deref(), Some("[]"));
    assert_eq!(db.get_item("b").unwrap().as_deref(), Some("500"));
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}

#[test]
fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saldofixo.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.set_item("saldoFixo_savings", "250.5").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(
        db.get_item("saldoFixo_savings").unwrap().as_deref(),
        Some("250.5")
    );
}

#[test]
fn test_reopen_does_not_reapply_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saldofixo.db");
    Database::open(&path).unwrap();
    let db = Database::open(&path).unwrap();
    let rows: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_newer_schema_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saldofixo.db");
    {
        let db = Database::open(&path).unwrap();
        db.conn
            .execute("UPDATE schema_version SET version = 99", [])
            .unwrap();
    }
    let err = Database::open(&path).err().unwrap();
    assert!(format!("{err:#}").contains("v99 is newer"));
}

#[test]
fn test_missing_version_row_is_restored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saldofixo.db");
    {
        let mut db = Database::open(&path).unwrap();
        db.set_item("saldoFixo_savings", "100").unwrap();
        db.conn.execute("DELETE FROM schema_version", []).unwrap();
    }
    let db = Database::open(&path).unwrap();
    let version: i32 = db
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
    assert_eq!(
        db.get_item("saldoFixo_savings").unwrap().as_deref(),
        Some("100")
    );
}
