use crate::error::{AppError, AppResult};
use common::model::user::User;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// A user row including the stored credential hash.
pub struct Credentials {
    pub user: User,
    pub password_hash: String,
}

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        is_admin: row.get(2)?,
    })
}

pub fn list(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, username, is_admin FROM users ORDER BY username")?;
    let users = stmt
        .query_map([], map_user)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}

pub fn get(conn: &Connection, id: i64) -> AppResult<User> {
    conn.query_row(
        "SELECT id, username, is_admin FROM users WHERE id = ?1",
        params![id],
        map_user,
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}

pub fn find_credentials(conn: &Connection, username: &str) -> AppResult<Option<Credentials>> {
    let found = conn
        .query_row(
            "SELECT id, username, is_admin, password_hash FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok(Credentials {
                    user: map_user(row)?,
                    password_hash: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(found)
}

/// Inserts a user. The caller hashes the password.
pub fn insert(conn: &Connection, username: &str, password_hash: &str, is_admin: bool) -> AppResult<User> {
    if find_credentials(conn, username)?.is_some() {
        return Err(AppError::Validation(format!(
            "The username '{}' already exists",
            username
        )));
    }
    conn.execute(
        "INSERT INTO users (username, password_hash, is_admin) VALUES (?1, ?2, ?3)",
        params![username, password_hash, is_admin],
    )?;
    Ok(User {
        id: conn.last_insert_rowid(),
        username: username.to_string(),
        is_admin,
    })
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<User> {
    let user = get(conn, id)?;
    conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    Ok(user)
}
