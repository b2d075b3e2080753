use crate::db::{folded_pattern, like_pattern, non_empty};
use crate::error::{AppError, AppResult};
use common::model::customer::{Customer, CustomerSuggestion, PersonKind};
use common::model::page::{Page, PER_PAGE};
use common::requests::CustomerForm;
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;

const COLUMNS: &str = "id, customer_number, name, phone, person_kind, tax_id, referral_source, \
     street, street_number, complement, district, city, state, postal_code, notes";

/// Validated customer data, ready to be written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFields {
    pub name: String,
    pub phone: Option<String>,
    pub person_kind: PersonKind,
    pub tax_id: Option<String>,
    pub referral_source: Option<String>,
    pub street: Option<String>,
    pub street_number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub notes: Option<String>,
}

impl CustomerFields {
    pub fn from_form(form: CustomerForm) -> AppResult<Self> {
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("The customer name is required".to_string()));
        }
        let person_kind = match non_empty(form.person_kind) {
            Some(label) => label
                .parse()
                .map_err(|e: common::model::UnknownLabel| AppError::Validation(e.to_string()))?,
            None => PersonKind::default(),
        };
        Ok(Self {
            name,
            phone: non_empty(form.phone),
            person_kind,
            tax_id: non_empty(form.tax_id),
            referral_source: non_empty(form.referral_source),
            street: non_empty(form.street),
            street_number: non_empty(form.street_number),
            complement: non_empty(form.complement),
            district: non_empty(form.district),
            city: non_empty(form.city),
            state: non_empty(form.state),
            postal_code: non_empty(form.postal_code),
            notes: non_empty(form.notes),
        })
    }
}

/// Filters of the customer registry list.
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    pub name: Option<String>,
    pub person_kind: Option<PersonKind>,
    pub tax_id: Option<String>,
}

pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

fn map_customer(row: &Row<'_>) -> rusqlite::Result<Customer> {
    let person_kind: String = row.get(4)?;
    Ok(Customer {
        id: row.get(0)?,
        customer_number: row.get(1)?,
        name: row.get(2)?,
        phone: row.get(3)?,
        person_kind: person_kind
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?,
        tax_id: row.get(5)?,
        referral_source: row.get(6)?,
        street: row.get(7)?,
        street_number: row.get(8)?,
        complement: row.get(9)?,
        district: row.get(10)?,
        city: row.get(11)?,
        state: row.get(12)?,
        postal_code: row.get(13)?,
        notes: row.get(14)?,
    })
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Customer> {
    conn.query_row(
        &format!("SELECT {} FROM customers WHERE id = ?1", COLUMNS),
        params![id],
        map_customer,
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("Customer {} not found", id)))
}

/// Case-insensitive exact lookup by name.
pub fn find_by_name(conn: &Connection, name: &str) -> AppResult<Option<Customer>> {
    Ok(conn
        .query_row(
            &format!("SELECT {} FROM customers WHERE name_key = ?1", COLUMNS),
            params![name_key(name)],
            map_customer,
        )
        .optional()?)
}

pub fn find_by_tax_id(conn: &Connection, tax_id: &str) -> AppResult<Option<Customer>> {
    Ok(conn
        .query_row(
            &format!("SELECT {} FROM customers WHERE tax_id = ?1", COLUMNS),
            params![tax_id],
            map_customer,
        )
        .optional()?)
}

pub fn next_number(conn: &Connection) -> AppResult<i64> {
    let max: Option<i64> =
        conn.query_row("SELECT MAX(customer_number) FROM customers", [], |row| row.get(0))?;
    Ok(max.unwrap_or(0) + 1)
}

fn check_unique(conn: &Connection, fields: &CustomerFields, own_id: Option<i64>) -> AppResult<()> {
    if let Some(existing) = find_by_name(conn, &fields.name)? {
        if Some(existing.id) != own_id {
            return Err(AppError::Validation(format!(
                "The customer \"{}\" is already registered",
                fields.name
            )));
        }
    }
    if let Some(tax_id) = &fields.tax_id {
        if let Some(existing) = find_by_tax_id(conn, tax_id)? {
            if Some(existing.id) != own_id {
                return Err(AppError::Validation(
                    "This CPF/CNPJ is already registered to another customer".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Creates a customer with the next sequential number.
pub fn insert(conn: &Connection, fields: &CustomerFields) -> AppResult<Customer> {
    check_unique(conn, fields, None)?;
    let number = next_number(conn)?;
    conn.execute(
        "INSERT INTO customers (customer_number, name, name_key, phone, person_kind, tax_id, \
         referral_source, street, street_number, complement, district, city, state, postal_code, notes) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            number,
            fields.name,
            name_key(&fields.name),
            fields.phone,
            fields.person_kind.label(),
            fields.tax_id,
            fields.referral_source,
            fields.street,
            fields.street_number,
            fields.complement,
            fields.district,
            fields.city,
            fields.state,
            fields.postal_code,
            fields.notes,
        ],
    )?;
    get(conn, conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, fields: &CustomerFields) -> AppResult<Customer> {
    get(conn, id)?;
    check_unique(conn, fields, Some(id))?;
    conn.execute(
        "UPDATE customers SET name = ?2, name_key = ?3, phone = ?4, person_kind = ?5, tax_id = ?6, \
         referral_source = ?7, street = ?8, street_number = ?9, complement = ?10, district = ?11, \
         city = ?12, state = ?13, postal_code = ?14, notes = ?15 WHERE id = ?1",
        params![
            id,
            fields.name,
            name_key(&fields.name),
            fields.phone,
            fields.person_kind.label(),
            fields.tax_id,
            fields.referral_source,
            fields.street,
            fields.street_number,
            fields.complement,
            fields.district,
            fields.city,
            fields.state,
            fields.postal_code,
            fields.notes,
        ],
    )?;
    get(conn, id)
}

/// Points entries that were registered under a temporary name equal to the
/// customer's name at the customer. Returns how many were linked.
pub fn link_temporary_entries(conn: &Connection, customer: &Customer) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE entries SET customer_id = ?1, customer_name_temp = NULL \
         WHERE customer_name_temp = ?2",
        params![customer.id, customer.name],
    )?)
}

pub fn linked_entry_count(conn: &Connection, id: i64) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE customer_id = ?1",
        params![id],
        |row| row.get(0),
    )?)
}

/// Deletes a customer that no entry references.
pub fn delete(conn: &Connection, id: i64) -> AppResult<Customer> {
    let customer = get(conn, id)?;
    let linked = linked_entry_count(conn, id)?;
    if linked > 0 {
        return Err(AppError::Integrity(format!(
            "The customer \"{}\" cannot be deleted because it is linked to {} order(s)/quote(s)",
            customer.name, linked
        )));
    }
    conn.execute("DELETE FROM customers WHERE id = ?1", params![id])?;
    Ok(customer)
}

/// Deletes every customer in `ids`, or none of them. Repeated ids count once.
pub fn delete_many(conn: &Connection, ids: &[i64]) -> AppResult<usize> {
    let unique: BTreeSet<i64> = ids.iter().copied().collect();
    let mut customers = Vec::with_capacity(unique.len());
    for id in unique {
        match get(conn, id) {
            Ok(customer) => customers.push(customer),
            Err(AppError::NotFound(_)) => {
                return Err(AppError::NotFound("Some customers were not found".to_string()));
            }
            Err(e) => return Err(e),
        }
    }

    let mut blocked = Vec::new();
    for customer in &customers {
        if linked_entry_count(conn, customer.id)? > 0 {
            blocked.push(customer.name.clone());
        }
    }
    if !blocked.is_empty() {
        return Err(AppError::Integrity(format!(
            "The following customers cannot be deleted because they have linked orders/quotes: {}",
            blocked.join(", ")
        )));
    }

    for customer in &customers {
        conn.execute("DELETE FROM customers WHERE id = ?1", params![customer.id])?;
    }
    Ok(customers.len())
}

pub fn all(conn: &Connection) -> AppResult<Vec<Customer>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM customers ORDER BY customer_number",
        COLUMNS
    ))?;
    let customers = stmt
        .query_map([], map_customer)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(customers)
}

pub fn list(conn: &Connection, filter: &CustomerFilter, page: u32) -> AppResult<Page<Customer>> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(name) = filter.name.as_deref().filter(|n| !n.trim().is_empty()) {
        clauses.push("name_key LIKE ? ESCAPE '\\'");
        values.push(Box::new(folded_pattern(name)));
    }
    if let Some(kind) = filter.person_kind {
        clauses.push("person_kind = ?");
        values.push(Box::new(kind.label()));
    }
    if let Some(tax_id) = filter.tax_id.as_deref().filter(|t| !t.trim().is_empty()) {
        clauses.push("tax_id LIKE ? ESCAPE '\\'");
        values.push(Box::new(like_pattern(tax_id)));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM customers{}", where_sql),
        params_from_iter(values.iter()),
        |row| row.get(0),
    )?;

    let page = page.max(1);
    let sql = format!(
        "SELECT {} FROM customers{} ORDER BY customer_number LIMIT {} OFFSET {}",
        COLUMNS,
        where_sql,
        PER_PAGE,
        Page::<Customer>::offset(page)
    );
    let mut stmt = conn.prepare(&sql)?;
    let items = stmt
        .query_map(params_from_iter(values.iter()), map_customer)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page::new(items, page, total as u64))
}

/// Autocomplete lookup: up to ten customers whose name contains `term`.
pub fn search(conn: &Connection, term: &str) -> AppResult<Vec<CustomerSuggestion>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM customers WHERE name_key LIKE ?1 ESCAPE '\\' ORDER BY name LIMIT 10",
        COLUMNS
    ))?;
    let suggestions = stmt
        .query_map(params![folded_pattern(term)], map_customer)?
        .map(|row| row.map(|customer| CustomerSuggestion::from(&customer)))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    fn fields(name: &str, tax_id: Option<&str>) -> CustomerFields {
        CustomerFields {
            name: name.to_string(),
            tax_id: tax_id.map(str::to_string),
            ..CustomerFields::default()
        }
    }

    #[test]
    fn numbers_are_sequential() {
        let store = Store::open_in_memory().unwrap();
        let first = store.write(|tx| insert(tx, &fields("Ana", None))).unwrap();
        let second = store.write(|tx| insert(tx, &fields("Bruno", None))).unwrap();
        assert_eq!(first.customer_number, 1);
        assert_eq!(second.customer_number, 2);
    }

    #[test]
    fn names_are_unique_ignoring_case() {
        let store = Store::open_in_memory().unwrap();
        store.write(|tx| insert(tx, &fields("Vidraçaria Sol", None))).unwrap();
        let err = store
            .write(|tx| insert(tx, &fields("VIDRAÇARIA SOL", None)))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn tax_ids_are_unique_but_optional() {
        let store = Store::open_in_memory().unwrap();
        store.write(|tx| insert(tx, &fields("Ana", Some("123")))).unwrap();
        store.write(|tx| insert(tx, &fields("Bia", None))).unwrap();
        store.write(|tx| insert(tx, &fields("Caio", None))).unwrap();
        let err = store
            .write(|tx| insert(tx, &fields("Davi", Some("123"))))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn update_may_keep_its_own_name_and_tax_id() {
        let store = Store::open_in_memory().unwrap();
        let ana = store.write(|tx| insert(tx, &fields("Ana", Some("123")))).unwrap();
        let mut changed = fields("ANA", Some("123"));
        changed.city = Some("Recife".to_string());
        let updated = store.write(|tx| update(tx, ana.id, &changed)).unwrap();
        assert_eq!(updated.name, "ANA");
        assert_eq!(updated.city.as_deref(), Some("Recife"));
        assert_eq!(updated.customer_number, ana.customer_number);
    }

    #[test]
    fn list_filters_and_paginates() {
        let store = Store::open_in_memory().unwrap();
        store
            .write(|tx| {
                for i in 0..35 {
                    insert(tx, &fields(&format!("Cliente {:02}", i), None))?;
                }
                insert(tx, &fields("Outro", None))
            })
            .unwrap();

        let filter = CustomerFilter {
            name: Some("cliente".to_string()),
            ..CustomerFilter::default()
        };
        let first = store.read(|conn| list(conn, &filter, 1)).unwrap();
        assert_eq!(first.total, 35);
        assert_eq!(first.items.len(), 30);
        assert!(first.has_next);

        let second = store.read(|conn| list(conn, &filter, 2)).unwrap();
        assert_eq!(second.items.len(), 5);
        assert_eq!(second.items[0].name, "Cliente 30");
    }

    #[test]
    fn search_returns_labelled_suggestions() {
        let store = Store::open_in_memory().unwrap();
        store.write(|tx| insert(tx, &fields("Construtora Alfa", None))).unwrap();
        let found = store.read(|conn| search(conn, "alfa")).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "Construtora Alfa (1)");
        assert_eq!(found[0].value, "Construtora Alfa");
    }

    #[test]
    fn name_lookups_fold_accented_letters() {
        let store = Store::open_in_memory().unwrap();
        store.write(|tx| insert(tx, &fields("VIDRAÇARIA SOL", None))).unwrap();

        let found = store.read(|conn| search(conn, "vidraçaria")).unwrap();
        assert_eq!(found.len(), 1);

        let filter = CustomerFilter {
            name: Some("Çaria s".to_string()),
            ..CustomerFilter::default()
        };
        let page = store.read(|conn| list(conn, &filter, 1)).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "VIDRAÇARIA SOL");
    }

    #[test]
    fn bulk_delete_counts_repeated_ids_once() {
        let store = Store::open_in_memory().unwrap();
        let ana = store.write(|tx| insert(tx, &fields("Ana", None))).unwrap();
        store.write(|tx| insert(tx, &fields("Bia", None))).unwrap();

        let deleted = store
            .write(|tx| delete_many(tx, &[ana.id, ana.id]))
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(store.read(all).unwrap().len(), 1);
    }
}
