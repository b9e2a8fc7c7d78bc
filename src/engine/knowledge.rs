// Xyna Engine — Knowledge Cache
// Append-only question/answer store in SQLite via rusqlite, with
// similarity lookup through an injected, already-fitted vectorizer.
// Entries are never updated, deduplicated or evicted.

use crate::atoms::constants::KNOWLEDGE_DB_FILE;
use crate::atoms::error::EngineResult;
use crate::atoms::traits::TextVectorizer;
use crate::atoms::types::KnowledgeEntry;
use crate::engine::embedding::best_match;
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;

/// Thread-safe knowledge store. Share it with `Arc`; the mutex serialises writers.
pub struct KnowledgeStore {
    pub conn: Mutex<Connection>,
}

pub(crate) fn run_migrations(conn: &Connection) -> EngineResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS knowledge (
            id INTEGER PRIMARY KEY,
            question TEXT NOT NULL,
            answer TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );
        ",
    )?;
    Ok(())
}

impl KnowledgeStore {
    /// Open (or create) the store at `path`.
    pub fn open(path: &Path) -> EngineResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        info!("[knowledge] Opening knowledge store at {:?}", path);
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;").ok();
        run_migrations(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open `knowledge.db` inside `cache_dir`.
    pub fn open_in_dir(cache_dir: &Path) -> EngineResult<Self> {
        Self::open(&cache_dir.join(KNOWLEDGE_DB_FILE))
    }

    pub fn open_in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Append one entry. Returns its row id.
    pub fn add_entry(&self, question: &str, answer: &str, category: &str) -> EngineResult<i64> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO knowledge (question, answer, category, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![question, answer, category, chrono::Utc::now().to_rfc3339()],
        )?;
        let id = conn.last_insert_rowid();
        debug!("[knowledge] Stored entry {} ({})", id, category);
        Ok(id)
    }

    pub fn entries(&self) -> EngineResult<Vec<KnowledgeEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, question, answer, category, created_at FROM knowledge ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(KnowledgeEntry {
                    id: row.get(0)?,
                    question: row.get(1)?,
                    answer: row.get(2)?,
                    category: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn count(&self) -> EngineResult<usize> {
        let conn = self.conn.lock();
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM knowledge", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Answer of the single most similar stored question, if its cosine
    /// similarity to `query` reaches `threshold`.
    ///
    /// Returns `None` when the store is empty or no fitted vectorizer is
    /// supplied. A hit does not touch the matched row.
    pub fn find_similar(
        &self,
        query: &str,
        threshold: f64,
        vectorizer: Option<&dyn TextVectorizer>,
    ) -> EngineResult<Option<String>> {
        let Some(vectorizer) = vectorizer.filter(|v| v.is_fitted()) else {
            return Ok(None);
        };
        let entries = self.entries()?;
        if entries.is_empty() {
            return Ok(None);
        }

        let mut texts: Vec<&str> = Vec::with_capacity(entries.len() + 1);
        texts.push(query);
        texts.extend(entries.iter().map(|e| e.question.as_str()));
        let mut vectors = vectorizer.vectorize(&texts)?;
        if vectors.is_empty() {
            return Ok(None);
        }
        let query_vec = vectors.remove(0);

        match best_match(&query_vec, &vectors) {
            Some((idx, score)) if score >= threshold => {
                let entry = &entries[idx];
                debug!("[knowledge] Hit entry {} (similarity {:.3})", entry.id, score);
                Ok(Some(entry.answer.clone()))
            }
            Some((_, score)) => {
                debug!("[knowledge] Best similarity {:.3} below {:.3}", score, threshold);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
