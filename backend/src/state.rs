use crate::auth::SessionStore;
use crate::config::Config;
use crate::db::{entries, Store};
use crate::error::AppResult;
use crate::notifier::ChangeNotifier;
use crate::romaneio::{LopdfExtractor, ReportParser, RomaneioParser, TextExtractor};
use crate::storage::FileStorage;
use common::model::dashboard::DashboardData;
use log::warn;
use std::sync::Arc;

/// Everything a handler needs, shared through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Store,
    pub sessions: SessionStore,
    pub notifier: ChangeNotifier,
    pub files: FileStorage,
    pub extractor: Arc<dyn TextExtractor>,
    pub parser: Arc<dyn ReportParser>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let store = Store::open(&config.database_path)?;
        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Store) -> AppResult<Self> {
        Ok(Self {
            files: FileStorage::new(&config.upload_dir)?,
            sessions: SessionStore::new(config.session_max_age_secs),
            notifier: ChangeNotifier::new(),
            extractor: Arc::new(LopdfExtractor),
            parser: Arc::new(RomaneioParser::new()?),
            store,
            config,
        })
    }

    /// Fresh aggregate counts straight from the store.
    pub fn dashboard(&self) -> AppResult<DashboardData> {
        self.store.read(entries::dashboard)
    }

    /// Counts to attach to the answer of a committed mutation. A failed read
    /// must not turn that answer into an error, so it only drops the counts.
    pub fn dashboard_after_commit(&self) -> Option<DashboardData> {
        self.dashboard()
            .inspect_err(|e| warn!("Could not refresh dashboard counts: {}", e))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::db::entries::{self, CustomerChoice, EntryFields};
    use crate::test_support::test_state;
    use chrono::Utc;
    use common::model::entry::{EntryKind, EntryStatus};

    #[test]
    fn dashboard_after_commit_is_dropped_when_the_read_fails() {
        let (state, _dir) = test_state();
        state
            .store
            .write(|tx| {
                let fields = EntryFields {
                    kind: EntryKind::Quote,
                    order_number: 10,
                    status: EntryStatus::InProgress,
                    job_site: None,
                    description: "Tampo".to_string(),
                    notes: None,
                    customer: CustomerChoice::Temporary("Rita".to_string()),
                };
                entries::insert(tx, &fields, Utc::now().naive_utc())
            })
            .unwrap();
        let counts = state.dashboard_after_commit().unwrap();
        assert_eq!(counts.quotes.in_progress, 1);

        state
            .store
            .write(|tx| Ok(tx.execute_batch("DROP TABLE attachments; DROP TABLE entries;")?))
            .unwrap();
        assert!(state.dashboard().is_err());
        assert_eq!(state.dashboard_after_commit(), None);
    }
}
