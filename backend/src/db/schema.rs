use rusqlite::Connection;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    is_admin      INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS customers (
    id              INTEGER PRIMARY KEY,
    customer_number INTEGER NOT NULL UNIQUE,
    name            TEXT NOT NULL,
    name_key        TEXT NOT NULL UNIQUE,
    phone           TEXT,
    person_kind     TEXT NOT NULL,
    tax_id          TEXT UNIQUE,
    referral_source TEXT,
    street          TEXT,
    street_number   TEXT,
    complement      TEXT,
    district        TEXT,
    city            TEXT,
    state           TEXT,
    postal_code     TEXT,
    notes           TEXT
);

CREATE TABLE IF NOT EXISTS entries (
    id                 INTEGER PRIMARY KEY,
    kind               TEXT NOT NULL CHECK (kind IN ('Pedido', 'Orçamento')),
    order_number       INTEGER NOT NULL UNIQUE,
    registered_at      TEXT NOT NULL,
    customer_id        INTEGER REFERENCES customers (id),
    customer_name_temp TEXT,
    job_site           TEXT,
    status             TEXT NOT NULL
        CHECK (status IN ('Não iniciado', 'Em andamento', 'Concluído')),
    description        TEXT NOT NULL,
    notes              TEXT,
    archived           INTEGER NOT NULL DEFAULT 0,
    CHECK ((customer_id IS NULL) <> (customer_name_temp IS NULL))
);

CREATE INDEX IF NOT EXISTS entries_customer_id ON entries (customer_id);

CREATE TABLE IF NOT EXISTS attachments (
    id       INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    entry_id INTEGER NOT NULL REFERENCES entries (id) ON DELETE CASCADE
);
";

pub(super) fn initialize(conn: &Connection) -> rusqlite::Result<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.execute_batch(SCHEMA)
}
