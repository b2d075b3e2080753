use crate::error::{AppError, AppResult};
use common::model::attachment::Attachment;
use rusqlite::{params, Connection, OptionalExtension, Row};

fn map_attachment(row: &Row<'_>) -> rusqlite::Result<Attachment> {
    Ok(Attachment {
        id: row.get(0)?,
        entry_id: row.get(1)?,
        filename: row.get(2)?,
    })
}

pub fn insert(conn: &Connection, entry_id: i64, filename: &str) -> AppResult<Attachment> {
    conn.execute(
        "INSERT INTO attachments (entry_id, filename) VALUES (?1, ?2)",
        params![entry_id, filename],
    )?;
    Ok(Attachment {
        id: conn.last_insert_rowid(),
        entry_id,
        filename: filename.to_string(),
    })
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Attachment> {
    conn.query_row(
        "SELECT id, entry_id, filename FROM attachments WHERE id = ?1",
        params![id],
        map_attachment,
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("Attachment {} not found", id)))
}

pub fn for_entry(conn: &Connection, entry_id: i64) -> AppResult<Vec<Attachment>> {
    let mut stmt = conn.prepare(
        "SELECT id, entry_id, filename FROM attachments WHERE entry_id = ?1 ORDER BY id",
    )?;
    let attachments = stmt
        .query_map(params![entry_id], map_attachment)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(attachments)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<Attachment> {
    let attachment = get(conn, id)?;
    conn.execute("DELETE FROM attachments WHERE id = ?1", params![id])?;
    Ok(attachment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entries::{self, CustomerChoice, EntryFields};
    use crate::db::Store;
    use chrono::Utc;
    use common::model::entry::{EntryKind, EntryStatus};

    #[test]
    fn deleting_an_entry_cascades_to_its_attachments() {
        let store = Store::open_in_memory().unwrap();
        let entry = store
            .write(|tx| {
                let fields = EntryFields {
                    kind: EntryKind::Order,
                    order_number: 7,
                    status: EntryStatus::NotStarted,
                    job_site: None,
                    description: "Janela".to_string(),
                    notes: None,
                    customer: CustomerChoice::Temporary("Ana".to_string()),
                };
                entries::insert(tx, &fields, Utc::now().naive_utc())
            })
            .unwrap();
        store
            .write(|tx| {
                insert(tx, entry.id, "a1_planta.pdf")?;
                insert(tx, entry.id, "b2_foto.jpg")
            })
            .unwrap();

        let (_, files) = store.write(|tx| entries::delete(tx, entry.id)).unwrap();
        assert_eq!(files, vec!["a1_planta.pdf".to_string(), "b2_foto.jpg".to_string()]);
        assert!(store.read(|c| for_entry(c, entry.id)).unwrap().is_empty());
    }

    #[test]
    fn missing_attachment_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let err = store.write(|tx| delete(tx, 3)).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
