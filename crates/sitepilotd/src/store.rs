//! SQLite content store - page text searched by the answer flow.
//!
//! Schema:
//! - pages: id, optional display name, content (often HTML)
//!
//! Searches are case-insensitive substring matches. When the whole prompt
//! matches nothing, the prompt's keywords are searched one by one.

use rusqlite::{params, Connection};
use sitepilot_common::{extract_keywords, ContentRecord, Language};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::config::RankingConfig;
use crate::error::StoreError;

/// Pages inserted by `--seed-demo`
const DEMO_PAGES: &[(&str, &str)] = &[
    (
        "about-us",
        "<h1>About Us</h1><p>GS1 is a neutral, not-for-profit organisation that develops and maintains global standards for business communication.</p>",
    ),
    (
        "gs1-benefits",
        "<h2>Benefits</h2><p>GS1 barcodes let retailers identify products uniquely &amp; share data across the supply chain.</p>",
    ),
    (
        "gs1-system-standards",
        "<p>The GS1 system of standards covers identification keys, barcodes, EPC/RFID and data sharing.</p>",
    ),
    (
        "global-product-classification",
        "<p>Global Product Classification (GPC) groups products by their essential properties so buyers and sellers speak the same language.</p>",
    ),
];

/// How many records each search stage may return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub primary: usize,
    pub per_keyword: usize,
    pub total: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::from(&RankingConfig::default())
    }
}

impl From<&RankingConfig> for SearchLimits {
    fn from(config: &RankingConfig) -> Self {
        Self {
            primary: config.primary_limit,
            per_keyword: config.per_keyword_limit,
            total: config.total_limit,
        }
    }
}

/// SQLite-backed page store, cheap to clone
#[derive(Clone)]
pub struct ContentStore {
    conn: Arc<Mutex<Connection>>,
}

impl ContentStore {
    /// Open or create the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        info!("Opened content store at {}", path.display());
        Self::init(conn)
    }

    /// Store that lives only as long as the process (tests, demos)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS pages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                content TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    ) -> Result<T, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Task(format!("connection lock poisoned: {}", e)))?;
        Ok(f(&conn)?)
    }

    /// Insert a page, returning its id
    pub fn insert(&self, name: Option<&str>, content: &str) -> Result<i64, StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO pages (name, content) VALUES (?1, ?2)",
                params![name, content],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM pages", [], |row| row.get::<_, i64>(0))
        })
        .map(|n| n as usize)
    }

    /// Insert the demo pages into an empty store
    pub fn seed_demo(&self) -> Result<usize, StoreError> {
        if self.count()? > 0 {
            return Ok(0);
        }
        for &(name, content) in DEMO_PAGES {
            self.insert(Some(name), content)?;
        }
        info!("Seeded {} demo pages", DEMO_PAGES.len());
        Ok(DEMO_PAGES.len())
    }

    /// Pages whose content contains `needle`, case-insensitively, by id
    pub fn search(&self, needle: &str, limit: usize) -> Result<Vec<ContentRecord>, StoreError> {
        let pattern = format!("%{}%", escape_like(needle));
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, content FROM pages
                 WHERE content LIKE ?1 ESCAPE '\\'
                 ORDER BY id
                 LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![pattern, limit as i64], |row| {
                Ok(ContentRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    content: row.get(2)?,
                })
            })?;
            let records = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
    }

    /// Search the whole prompt, then each keyword if that finds nothing
    pub fn search_with_fallback(
        &self,
        prompt: &str,
        limits: SearchLimits,
    ) -> Result<Vec<ContentRecord>, StoreError> {
        let records = self.search(prompt, limits.primary)?;
        if !records.is_empty() {
            return Ok(records);
        }

        let keywords = extract_keywords(prompt, Language::detect(prompt));
        debug!("No direct match, searching keywords: {:?}", keywords);

        let mut records = Vec::new();
        for keyword in &keywords {
            records.extend(self.search(keyword, limits.per_keyword)?);
            if records.len() >= limits.total {
                records.truncate(limits.total);
                break;
            }
        }
        Ok(records)
    }

    /// Run blocking store work off the async runtime
    pub async fn run<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&ContentStore) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
