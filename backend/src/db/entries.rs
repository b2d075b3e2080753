use crate::db::{attachments, customers, folded_pattern, non_empty};
use crate::error::{AppError, AppResult};
use chrono::NaiveDateTime;
use common::model::dashboard::DashboardData;
use common::model::entry::{CustomerLink, Entry, EntryKind, EntryStatus};
use common::model::page::{Page, PER_PAGE};
use common::requests::EntryForm;
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;

const SELECT: &str = "SELECT e.id, e.kind, e.order_number, e.registered_at, e.customer_id, c.name, \
     e.customer_name_temp, e.job_site, e.status, e.description, e.notes, e.archived \
     FROM entries e LEFT JOIN customers c ON c.id = e.customer_id";

/// Who the entry is being written for.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerChoice {
    Registered(i64),
    Temporary(String),
}

/// Validated entry data, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFields {
    pub kind: EntryKind,
    pub order_number: i64,
    pub status: EntryStatus,
    pub job_site: Option<String>,
    pub description: String,
    pub notes: Option<String>,
    pub customer: CustomerChoice,
}

impl EntryFields {
    /// Validates a submitted form. `auto_number` numbers quotes sent without
    /// one; pass `None` where a number is mandatory.
    pub fn from_form(form: EntryForm, auto_number: Option<i64>) -> AppResult<Self> {
        let kind = form
            .kind
            .ok_or_else(|| AppError::Validation("The entry type is required".to_string()))?;

        let order_number = match non_empty(form.order_number) {
            Some(text) => parse_order_number(&text)?,
            None => match (kind, auto_number) {
                (EntryKind::Quote, Some(number)) => number,
                _ => {
                    return Err(AppError::Validation(
                        "The order number is required".to_string(),
                    ))
                }
            },
        };

        let status = match non_empty(form.status) {
            Some(label) => label
                .parse()
                .map_err(|e: common::model::UnknownLabel| AppError::Validation(e.to_string()))?,
            None => EntryStatus::default(),
        };

        let description = non_empty(form.description)
            .ok_or_else(|| AppError::Validation("The description is required".to_string()))?;

        let customer = match (form.customer_id, non_empty(form.customer_name)) {
            (Some(id), _) => CustomerChoice::Registered(id),
            (None, Some(name)) => CustomerChoice::Temporary(name),
            (None, None) => {
                return Err(AppError::Validation(
                    "Select a registered customer or type a customer name".to_string(),
                ))
            }
        };

        Ok(Self {
            kind,
            order_number,
            status,
            job_site: non_empty(form.job_site),
            description,
            notes: non_empty(form.notes),
            customer,
        })
    }
}

fn parse_order_number(text: &str) -> AppResult<i64> {
    let invalid = || AppError::Validation("The order number must contain only digits".to_string());
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse().map_err(|_| invalid())
}

/// Row filter shared by the panel, archive and export queries.
#[derive(Debug, Clone, Default)]
pub struct EntryQuery {
    pub kind: Option<EntryKind>,
    pub archived: Option<bool>,
    pub status: Option<EntryStatus>,
    /// Matches order number, description and either customer name.
    pub search: Option<String>,
    /// Matches the registered or temporary customer name only.
    pub customer: Option<String>,
}

impl EntryQuery {
    fn where_clause(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(kind) = self.kind {
            clauses.push("e.kind = ?");
            values.push(Box::new(kind.label()));
        }
        if let Some(archived) = self.archived {
            clauses.push("e.archived = ?");
            values.push(Box::new(archived));
        }
        if let Some(status) = self.status {
            clauses.push("e.status = ?");
            values.push(Box::new(status.label()));
        }
        if let Some(term) = self.search.as_deref().filter(|t| !t.trim().is_empty()) {
            clauses.push(
                "(CAST(e.order_number AS TEXT) LIKE ? ESCAPE '\\' \
                 OR fold_case(e.description) LIKE ? ESCAPE '\\' \
                 OR c.name_key LIKE ? ESCAPE '\\' \
                 OR fold_case(e.customer_name_temp) LIKE ? ESCAPE '\\')",
            );
            for _ in 0..4 {
                values.push(Box::new(folded_pattern(term)));
            }
        }
        if let Some(term) = self.customer.as_deref().filter(|t| !t.trim().is_empty()) {
            clauses.push(
                "(c.name_key LIKE ? ESCAPE '\\' OR fold_case(e.customer_name_temp) LIKE ? ESCAPE '\\')",
            );
            for _ in 0..2 {
                values.push(Box::new(folded_pattern(term)));
            }
        }

        let sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };
        (sql, values)
    }
}

fn conversion_error(idx: usize, err: common::model::UnknownLabel) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn map_entry(row: &Row<'_>) -> rusqlite::Result<Entry> {
    let kind: String = row.get(1)?;
    let status: String = row.get(8)?;
    let customer_id: Option<i64> = row.get(4)?;
    let customer = match customer_id {
        Some(id) => CustomerLink::Registered {
            id,
            name: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        },
        None => CustomerLink::Temporary {
            name: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        },
    };
    Ok(Entry {
        id: row.get(0)?,
        kind: kind.parse().map_err(|e| conversion_error(1, e))?,
        order_number: row.get(2)?,
        registered_at: row.get(3)?,
        customer,
        job_site: row.get(7)?,
        status: status.parse().map_err(|e| conversion_error(8, e))?,
        description: row.get(9)?,
        notes: row.get(10)?,
        archived: row.get(11)?,
    })
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Entry> {
    conn.query_row(&format!("{} WHERE e.id = ?1", SELECT), params![id], map_entry)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("Entry {} not found", id)))
}

pub fn number_taken(conn: &Connection, number: i64, except: Option<i64>) -> AppResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM entries WHERE order_number = ?1",
            params![number],
            |row| row.get(0),
        )
        .optional()?;
    Ok(matches!(found, Some(id) if Some(id) != except))
}

fn customer_columns(conn: &Connection, choice: &CustomerChoice) -> AppResult<(Option<i64>, Option<String>)> {
    match choice {
        CustomerChoice::Registered(id) => match customers::get(conn, *id) {
            Ok(customer) => Ok((Some(customer.id), None)),
            Err(AppError::NotFound(_)) => Err(AppError::Validation(format!(
                "The selected customer ({}) does not exist",
                id
            ))),
            Err(e) => Err(e),
        },
        CustomerChoice::Temporary(name) => Ok((None, Some(name.clone()))),
    }
}

fn duplicate_number(number: i64) -> AppError {
    AppError::Validation(format!(
        "The entry number {} already exists. Try another one.",
        number
    ))
}

pub fn insert(conn: &Connection, fields: &EntryFields, registered_at: NaiveDateTime) -> AppResult<Entry> {
    if number_taken(conn, fields.order_number, None)? {
        return Err(duplicate_number(fields.order_number));
    }
    let (customer_id, customer_name_temp) = customer_columns(conn, &fields.customer)?;
    conn.execute(
        "INSERT INTO entries (kind, order_number, registered_at, customer_id, customer_name_temp, \
         job_site, status, description, notes, archived) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0)",
        params![
            fields.kind.label(),
            fields.order_number,
            registered_at,
            customer_id,
            customer_name_temp,
            fields.job_site,
            fields.status.label(),
            fields.description,
            fields.notes,
        ],
    )?;
    get(conn, conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, fields: &EntryFields) -> AppResult<Entry> {
    get(conn, id)?;
    if number_taken(conn, fields.order_number, Some(id))? {
        return Err(duplicate_number(fields.order_number));
    }
    let (customer_id, customer_name_temp) = customer_columns(conn, &fields.customer)?;
    conn.execute(
        "UPDATE entries SET kind = ?2, order_number = ?3, customer_id = ?4, customer_name_temp = ?5, \
         job_site = ?6, status = ?7, description = ?8, notes = ?9 WHERE id = ?1",
        params![
            id,
            fields.kind.label(),
            fields.order_number,
            customer_id,
            customer_name_temp,
            fields.job_site,
            fields.status.label(),
            fields.description,
            fields.notes,
        ],
    )?;
    get(conn, id)
}

pub fn set_status(conn: &Connection, id: i64, status: EntryStatus) -> AppResult<Entry> {
    get(conn, id)?;
    conn.execute(
        "UPDATE entries SET status = ?2 WHERE id = ?1",
        params![id, status.label()],
    )?;
    get(conn, id)
}

/// Turns a quote into an order, restarting its workflow.
pub fn convert_to_order(conn: &Connection, id: i64) -> AppResult<Entry> {
    let entry = get(conn, id)?;
    if entry.kind == EntryKind::Order {
        return Err(AppError::Validation("This entry is already an order".to_string()));
    }
    conn.execute(
        "UPDATE entries SET kind = ?2, status = ?3 WHERE id = ?1",
        params![id, EntryKind::Order.label(), EntryStatus::NotStarted.label()],
    )?;
    get(conn, id)
}

pub fn set_archived(conn: &Connection, id: i64, archived: bool) -> AppResult<Entry> {
    get(conn, id)?;
    conn.execute(
        "UPDATE entries SET archived = ?2 WHERE id = ?1",
        params![id, archived],
    )?;
    get(conn, id)
}

/// Deletes an entry and its attachment rows. Returns the stored file names
/// so the caller can remove them once the transaction has committed.
pub fn delete(conn: &Connection, id: i64) -> AppResult<(Entry, Vec<String>)> {
    let entry = get(conn, id)?;
    let files = attachments::for_entry(conn, id)?
        .into_iter()
        .map(|a| a.filename)
        .collect();
    conn.execute("DELETE FROM entries WHERE id = ?1", params![id])?;
    Ok((entry, files))
}

/// Loads every entry in `ids`; fails as a whole when any is missing. With
/// `archived_only`, active entries count as missing.
pub fn fetch_many(conn: &Connection, ids: &[i64], archived_only: bool) -> AppResult<Vec<Entry>> {
    let unique: BTreeSet<i64> = ids.iter().copied().collect();
    let mut found = Vec::with_capacity(unique.len());
    for id in unique {
        match get(conn, id) {
            Ok(entry) if !archived_only || entry.archived => found.push(entry),
            Ok(_) | Err(AppError::NotFound(_)) => {
                return Err(AppError::NotFound("Some entries were not found".to_string()));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(found)
}

pub fn set_archived_many(conn: &Connection, ids: &[i64], archived: bool, archived_only: bool) -> AppResult<usize> {
    let entries = fetch_many(conn, ids, archived_only)?;
    for entry in &entries {
        conn.execute(
            "UPDATE entries SET archived = ?2 WHERE id = ?1",
            params![entry.id, archived],
        )?;
    }
    Ok(entries.len())
}

pub fn delete_many(conn: &Connection, ids: &[i64], archived_only: bool) -> AppResult<(usize, Vec<String>)> {
    let entries = fetch_many(conn, ids, archived_only)?;
    let mut files = Vec::new();
    for entry in &entries {
        let (_, mut owned) = delete(conn, entry.id)?;
        files.append(&mut owned);
    }
    Ok((entries.len(), files))
}

pub fn select(conn: &Connection, query: &EntryQuery, order_by: &str) -> AppResult<Vec<Entry>> {
    let (where_sql, values) = query.where_clause();
    let mut stmt = conn.prepare(&format!("{}{} ORDER BY {}", SELECT, where_sql, order_by))?;
    let entries = stmt
        .query_map(params_from_iter(values.iter()), map_entry)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

pub fn count(conn: &Connection, query: &EntryQuery) -> AppResult<u64> {
    let (where_sql, values) = query.where_clause();
    let total: i64 = conn.query_row(
        &format!(
            "SELECT COUNT(*) FROM entries e LEFT JOIN customers c ON c.id = e.customer_id{}",
            where_sql
        ),
        params_from_iter(values.iter()),
        |row| row.get(0),
    )?;
    Ok(total as u64)
}

/// One page of entries, newest registrations first.
pub fn page(conn: &Connection, query: &EntryQuery, page: u32) -> AppResult<Page<Entry>> {
    let page = page.max(1);
    let total = count(conn, query)?;
    let order_by = format!(
        "e.registered_at DESC, e.id DESC LIMIT {} OFFSET {}",
        PER_PAGE,
        Page::<Entry>::offset(page)
    );
    let items = select(conn, query, &order_by)?;
    Ok(Page::new(items, page, total))
}

/// Aggregate counts of non-archived entries per kind and status.
pub fn dashboard(conn: &Connection) -> AppResult<DashboardData> {
    let mut stmt = conn.prepare(
        "SELECT kind, status, COUNT(*) FROM entries WHERE archived = 0 GROUP BY kind, status",
    )?;
    let rows = stmt
        .query_map([], |row| {
            let kind: String = row.get(0)?;
            let status: String = row.get(1)?;
            let count: i64 = row.get(2)?;
            Ok((
                kind.parse::<EntryKind>().map_err(|e| conversion_error(0, e))?,
                status.parse::<EntryStatus>().map_err(|e| conversion_error(1, e))?,
                count as u64,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut data = DashboardData::default();
    for (kind, status, count) in rows {
        match kind {
            EntryKind::Order => data.orders.add(status, count),
            EntryKind::Quote => data.quotes.add(status, count),
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::customers::{self, CustomerFields};
    use crate::db::Store;
    use chrono::Utc;

    pub(crate) fn order(number: i64, customer: CustomerChoice) -> EntryFields {
        EntryFields {
            kind: EntryKind::Order,
            order_number: number,
            status: EntryStatus::NotStarted,
            job_site: None,
            description: format!("Entry {}", number),
            notes: None,
            customer,
        }
    }

    fn temp(name: &str) -> CustomerChoice {
        CustomerChoice::Temporary(name.to_string())
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    fn form(kind: EntryKind, number: Option<&str>) -> EntryForm {
        EntryForm {
            kind: Some(kind),
            order_number: number.map(str::to_string),
            description: Some(" Vidro fixo ".to_string()),
            customer_name: Some("Ana".to_string()),
            ..EntryForm::default()
        }
    }

    #[test]
    fn quotes_without_number_are_auto_numbered() {
        let fields = EntryFields::from_form(form(EntryKind::Quote, None), Some(1_700_000_000)).unwrap();
        assert_eq!(fields.order_number, 1_700_000_000);
        assert_eq!(fields.status, EntryStatus::NotStarted);
        assert_eq!(fields.description, "Vidro fixo");

        let err = EntryFields::from_form(form(EntryKind::Order, None), Some(1_700_000_000)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = EntryFields::from_form(form(EntryKind::Quote, Some(" ")), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn form_validation_rejects_bad_input() {
        let bad_number = EntryFields::from_form(form(EntryKind::Order, Some("12a")), None);
        assert!(matches!(bad_number, Err(AppError::Validation(_))));

        let mut bad_status = form(EntryKind::Order, Some("12"));
        bad_status.status = Some("Pronto".to_string());
        assert!(matches!(EntryFields::from_form(bad_status, None), Err(AppError::Validation(_))));

        let mut no_customer = form(EntryKind::Order, Some("12"));
        no_customer.customer_name = Some("  ".to_string());
        assert!(matches!(EntryFields::from_form(no_customer, None), Err(AppError::Validation(_))));

        let mut registered = form(EntryKind::Order, Some("12"));
        registered.customer_id = Some(3);
        let fields = EntryFields::from_form(registered, None).unwrap();
        assert_eq!(fields.customer, CustomerChoice::Registered(3));
    }

    #[test]
    fn duplicate_number_fails_for_any_kind() {
        let store = Store::open_in_memory().unwrap();
        store.write(|tx| insert(tx, &order(100, temp("Ana")), now())).unwrap();

        let mut quote = order(100, temp("Bia"));
        quote.kind = EntryKind::Quote;
        let err = store.write(|tx| insert(tx, &quote, now())).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.read(|c| count(c, &EntryQuery::default())).unwrap(), 1);
    }

    #[test]
    fn customer_link_switches_between_registered_and_temporary() {
        let store = Store::open_in_memory().unwrap();
        let customer = store
            .write(|tx| {
                customers::insert(
                    tx,
                    &CustomerFields {
                        name: "Construtora Alfa".to_string(),
                        ..CustomerFields::default()
                    },
                )
            })
            .unwrap();
        let entry = store.write(|tx| insert(tx, &order(1, temp("Alfa")), now())).unwrap();
        assert_eq!(entry.customer, CustomerLink::Temporary { name: "Alfa".to_string() });

        let linked = store
            .write(|tx| update(tx, entry.id, &order(1, CustomerChoice::Registered(customer.id))))
            .unwrap();
        assert_eq!(
            linked.customer,
            CustomerLink::Registered {
                id: customer.id,
                name: "Construtora Alfa".to_string()
            }
        );
        let (id, temp_name): (Option<i64>, Option<String>) = store
            .read(|c| {
                Ok(c.query_row(
                    "SELECT customer_id, customer_name_temp FROM entries WHERE id = ?1",
                    params![entry.id],
                    |r| Ok((r.get(0)?, r.get(1)?)),
                )?)
            })
            .unwrap();
        assert_eq!(id, Some(customer.id));
        assert_eq!(temp_name, None);
    }

    #[test]
    fn unknown_registered_customer_is_rejected() {
        let store = Store::open_in_memory().unwrap();
        let err = store
            .write(|tx| insert(tx, &order(5, CustomerChoice::Registered(99)), now()))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn store_rejects_rows_with_both_customer_columns() {
        let store = Store::open_in_memory().unwrap();
        let customer = store
            .write(|tx| {
                customers::insert(
                    tx,
                    &CustomerFields {
                        name: "Ana".to_string(),
                        ..CustomerFields::default()
                    },
                )
            })
            .unwrap();
        let result = store.write(|tx| {
            tx.execute(
                "INSERT INTO entries (kind, order_number, registered_at, customer_id, customer_name_temp, \
                 status, description) VALUES ('Pedido', 1, '2024-01-01 00:00:00', ?1, 'Ana', 'Não iniciado', 'x')",
                params![customer.id],
            )?;
            Ok(())
        });
        assert!(result.is_err());
    }

    #[test]
    fn dashboard_counts_only_active_entries() {
        let store = Store::open_in_memory().unwrap();
        let archived = store
            .write(|tx| {
                insert(tx, &order(1, temp("A")), now())?;
                let mut busy = order(2, temp("B"));
                busy.status = EntryStatus::InProgress;
                insert(tx, &busy, now())?;
                let mut quote = order(3, temp("C"));
                quote.kind = EntryKind::Quote;
                quote.status = EntryStatus::Done;
                insert(tx, &quote, now())?;
                insert(tx, &order(4, temp("D")), now())
            })
            .unwrap();

        let before = store.read(dashboard).unwrap();
        assert_eq!(before.orders.total, 3);
        assert_eq!(before.orders.not_started, 2);
        assert_eq!(before.orders.in_progress, 1);
        assert_eq!(before.quotes.total, 1);
        assert_eq!(before.quotes.done, 1);

        store.write(|tx| set_archived(tx, archived.id, true)).unwrap();
        let after = store.read(dashboard).unwrap();
        assert_eq!(after.orders.total, 2);
        assert_eq!(after.orders.not_started, 1);

        store.write(|tx| set_archived(tx, archived.id, false)).unwrap();
        assert_eq!(store.read(dashboard).unwrap(), before);
    }

    #[test]
    fn convert_resets_status_and_rejects_orders() {
        let store = Store::open_in_memory().unwrap();
        let mut quote = order(9, temp("Ana"));
        quote.kind = EntryKind::Quote;
        quote.status = EntryStatus::Done;
        let quote = store.write(|tx| insert(tx, &quote, now())).unwrap();

        let converted = store.write(|tx| convert_to_order(tx, quote.id)).unwrap();
        assert_eq!(converted.kind, EntryKind::Order);
        assert_eq!(converted.status, EntryStatus::NotStarted);

        let err = store.write(|tx| convert_to_order(tx, quote.id)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn bulk_delete_with_missing_id_changes_nothing() {
        let store = Store::open_in_memory().unwrap();
        let (a, b) = store
            .write(|tx| {
                let a = insert(tx, &order(1, temp("A")), now())?;
                let b = insert(tx, &order(2, temp("B")), now())?;
                Ok((a, b))
            })
            .unwrap();

        let err = store
            .write(|tx| delete_many(tx, &[a.id, b.id, 999], false))
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.read(|c| count(c, &EntryQuery::default())).unwrap(), 2);

        let (deleted, _) = store.write(|tx| delete_many(tx, &[a.id, b.id], false)).unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(store.read(|c| count(c, &EntryQuery::default())).unwrap(), 0);
    }

    #[test]
    fn archived_bulk_actions_ignore_active_entries() {
        let store = Store::open_in_memory().unwrap();
        let (active, archived) = store
            .write(|tx| {
                let active = insert(tx, &order(1, temp("A")), now())?;
                let archived = insert(tx, &order(2, temp("B")), now())?;
                set_archived(tx, archived.id, true)?;
                Ok((active, archived))
            })
            .unwrap();

        let err = store
            .write(|tx| set_archived_many(tx, &[active.id, archived.id], false, true))
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let restored = store
            .write(|tx| set_archived_many(tx, &[archived.id], false, true))
            .unwrap();
        assert_eq!(restored, 1);
        assert!(!store.read(|c| get(c, archived.id)).unwrap().archived);
    }

    #[test]
    fn search_matches_number_description_and_names() {
        let store = Store::open_in_memory().unwrap();
        store
            .write(|tx| {
                let mut first = order(1234, temp("Dona Maria"));
                first.description = "Box de banheiro".to_string();
                insert(tx, &first, now())?;
                insert(tx, &order(5678, temp("Seu João")), now())
            })
            .unwrap();

        let by = |term: &str| {
            let query = EntryQuery {
                search: Some(term.to_string()),
                ..EntryQuery::default()
            };
            store.read(|c| select(c, &query, "e.order_number")).unwrap()
        };
        assert_eq!(by("123").len(), 1);
        assert_eq!(by("banheiro").len(), 1);
        assert_eq!(by("maria").len(), 1);
        assert_eq!(by("Entry").len(), 1);
        assert_eq!(by("zzz").len(), 0);
    }

    #[test]
    fn search_folds_accented_names_and_descriptions() {
        let store = Store::open_in_memory().unwrap();
        store
            .write(|tx| {
                let customer = customers::insert(
                    tx,
                    &CustomerFields {
                        name: "CONSTRUÇÕES ÉPICAS".to_string(),
                        ..CustomerFields::default()
                    },
                )?;
                let mut first = order(1, CustomerChoice::Registered(customer.id));
                first.description = "PORTA DE VIDRO".to_string();
                insert(tx, &first, now())?;
                let mut second = order(2, temp("JOÃO GONÇALVES"));
                second.description = "ESPELHO BISOTÊ".to_string();
                insert(tx, &second, now())
            })
            .unwrap();

        let by = |query: EntryQuery| store.read(|c| select(c, &query, "e.order_number")).unwrap();
        let search = |term: &str| EntryQuery {
            search: Some(term.to_string()),
            ..EntryQuery::default()
        };
        let customer = |term: &str| EntryQuery {
            customer: Some(term.to_string()),
            ..EntryQuery::default()
        };

        assert_eq!(by(search("construções"))[0].order_number, 1);
        assert_eq!(by(search("joão"))[0].order_number, 2);
        assert_eq!(by(search("bisotê"))[0].order_number, 2);
        assert_eq!(by(customer("épicas")).len(), 1);
        assert_eq!(by(customer("gonçalves")).len(), 1);
    }
}
