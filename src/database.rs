//! # Storage
//!
//! SQLite persistence for the user profile, reminders, expenses, memories
//! and contacts. Every call opens its own connection on the blocking pool
//! and closes it before returning; nothing is cached in process.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Contacts table with case-insensitive unique names
//! - 1.1.0: Added `clear_all_data` for full resets
//! - 1.0.0: Initial release with profile, reminders, expenses and memories

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::Serialize;
use sqlite::{Connection, State, Statement};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS user_profile (
        id   INTEGER PRIMARY KEY,
        name TEXT
    );
    CREATE TABLE IF NOT EXISTS reminders (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        message    TEXT NOT NULL,
        remind_at  TEXT NOT NULL,
        notified   INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE TABLE IF NOT EXISTS expenses (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        amount     REAL NOT NULL,
        category   TEXT NOT NULL,
        note       TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE TABLE IF NOT EXISTS memories (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        content    TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE TABLE IF NOT EXISTS contacts (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        name       TEXT NOT NULL UNIQUE COLLATE NOCASE,
        phone      TEXT,
        email      TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reminder {
    pub id: i64,
    pub message: String,
    /// 24-hour "HH:MM"
    pub remind_at: String,
    pub notified: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub note: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Memory {
    pub id: i64,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: String,
}

/// Handle to the assistant's SQLite file
#[derive(Debug, Clone)]
pub struct Database {
    path: Arc<PathBuf>,
}

impl Database {
    /// Create the database file (and its directory) and ensure all tables exist
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let database = Database {
            path: Arc::new(path),
        };
        database
            .with_connection(|conn| conn.execute(SCHEMA).map_err(Into::into))
            .await?;

        info!("Database ready at {}", database.path.display());
        Ok(database)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` against a fresh connection on the blocking pool
    async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || {
            let conn = sqlite::open(path.as_path())?;
            f(&conn)
        })
        .await
        .map_err(|e| anyhow!("Database task panicked: {e}"))?
    }

    // ------------------------------------------------------------------
    // User profile
    // ------------------------------------------------------------------

    /// Replace the stored user name (the profile table keeps a single row)
    pub async fn save_user_name(&self, name: &str) -> Result<()> {
        let name = name.to_string();
        self.with_connection(move |conn| {
            conn.execute("BEGIN")?;
            let result = (|| -> Result<()> {
                conn.execute("DELETE FROM user_profile")?;
                let mut stmt = conn.prepare("INSERT INTO user_profile (name) VALUES (?)")?;
                stmt.bind((1, name.as_str()))?;
                stmt.next()?;
                Ok(())
            })();
            match result {
                Ok(()) => conn.execute("COMMIT").map_err(Into::into),
                Err(e) => {
                    let _ = conn.execute("ROLLBACK");
                    Err(e)
                }
            }
        })
        .await
    }

    pub async fn get_user_name(&self) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT name FROM user_profile LIMIT 1")?;
            if let State::Row = stmt.next()? {
                Ok(stmt.read::<Option<String>, _>("name")?)
            } else {
                Ok(None)
            }
        })
        .await
    }

    // ------------------------------------------------------------------
    // Reminders
    // ------------------------------------------------------------------

    /// Store a reminder due at `remind_at` ("HH:MM") and return its id
    pub async fn add_reminder(&self, message: &str, remind_at: &str) -> Result<i64> {
        let message = message.to_string();
        let remind_at = remind_at.to_string();
        self.with_connection(move |conn| {
            let mut stmt =
                conn.prepare("INSERT INTO reminders (message, remind_at) VALUES (?, ?)")?;
            stmt.bind((1, message.as_str()))?;
            stmt.bind((2, remind_at.as_str()))?;
            stmt.next()?;
            last_insert_id(conn)
        })
        .await
    }

    /// Reminders that have not fired yet
    pub async fn get_pending_reminders(&self) -> Result<Vec<Reminder>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, message, remind_at, notified, created_at
                 FROM reminders WHERE notified = 0 ORDER BY remind_at, id",
            )?;
            collect_rows(&mut stmt, read_reminder)
        })
        .await
    }

    /// Every stored reminder, earliest due time first
    pub async fn get_todays_reminders(&self) -> Result<Vec<Reminder>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, message, remind_at, notified, created_at
                 FROM reminders ORDER BY remind_at, id",
            )?;
            collect_rows(&mut stmt, read_reminder)
        })
        .await
    }

    /// Flag a reminder as fired. Returns false when it was already flagged.
    pub async fn mark_reminder_notified(&self, reminder_id: i64) -> Result<bool> {
        self.with_connection(move |conn| {
            let mut stmt =
                conn.prepare("UPDATE reminders SET notified = 1 WHERE id = ? AND notified = 0")?;
            stmt.bind((1, reminder_id))?;
            stmt.next()?;
            Ok(conn.change_count() > 0)
        })
        .await
    }

    // ------------------------------------------------------------------
    // Expenses
    // ------------------------------------------------------------------

    pub async fn add_expense(&self, amount: f64, category: &str, note: &str) -> Result<i64> {
        if !(amount > 0.0) {
            return Err(anyhow!("Expense amount must be positive, got {amount}"));
        }
        let category = category.to_string();
        let note = note.to_string();
        self.with_connection(move |conn| {
            let mut stmt =
                conn.prepare("INSERT INTO expenses (amount, category, note) VALUES (?, ?, ?)")?;
            stmt.bind((1, amount))?;
            stmt.bind((2, category.as_str()))?;
            stmt.bind((3, note.as_str()))?;
            stmt.next()?;
            last_insert_id(conn)
        })
        .await
    }

    /// Expenses logged today (UTC calendar day), newest first
    pub async fn get_todays_expenses(&self) -> Result<Vec<Expense>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, amount, category, note, created_at FROM expenses
                 WHERE DATE(created_at) = DATE('now')
                 ORDER BY created_at DESC, id DESC",
            )?;
            collect_rows(&mut stmt, |stmt| {
                Ok(Expense {
                    id: stmt.read::<i64, _>("id")?,
                    amount: stmt.read::<f64, _>("amount")?,
                    category: stmt.read::<String, _>("category")?,
                    note: stmt.read::<Option<String>, _>("note")?,
                    created_at: stmt.read::<String, _>("created_at")?,
                })
            })
        })
        .await
    }

    pub async fn get_total_expenses_today(&self) -> Result<f64> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT COALESCE(SUM(amount), 0.0) AS total FROM expenses
                 WHERE DATE(created_at) = DATE('now')",
            )?;
            stmt.next()?;
            Ok(stmt.read::<f64, _>("total")?)
        })
        .await
    }

    // ------------------------------------------------------------------
    // Memories
    // ------------------------------------------------------------------

    pub async fn add_memory(&self, content: &str) -> Result<i64> {
        if content.trim().is_empty() {
            return Err(anyhow!("Memory content must not be empty"));
        }
        let content = content.to_string();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare("INSERT INTO memories (content) VALUES (?)")?;
            stmt.bind((1, content.as_str()))?;
            stmt.next()?;
            last_insert_id(conn)
        })
        .await
    }

    /// All memories, newest first
    pub async fn get_all_memories(&self) -> Result<Vec<Memory>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, content, created_at FROM memories ORDER BY created_at DESC, id DESC",
            )?;
            collect_rows(&mut stmt, |stmt| {
                Ok(Memory {
                    id: stmt.read::<i64, _>("id")?,
                    content: stmt.read::<String, _>("content")?,
                    created_at: stmt.read::<String, _>("created_at")?,
                })
            })
        })
        .await
    }

    // ------------------------------------------------------------------
    // Contacts
    // ------------------------------------------------------------------

    /// Insert a contact, or update phone/email in place when the name exists
    pub async fn add_contact(
        &self,
        name: &str,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Result<()> {
        let name = name.to_string();
        let phone = phone.map(str::to_string);
        let email = email.map(str::to_string);
        self.with_connection(move |conn| {
            let inserted = (|| -> std::result::Result<(), sqlite::Error> {
                let mut stmt =
                    conn.prepare("INSERT INTO contacts (name, phone, email) VALUES (?, ?, ?)")?;
                stmt.bind((1, name.as_str()))?;
                stmt.bind((2, phone.as_deref()))?;
                stmt.bind((3, email.as_deref()))?;
                stmt.next()?;
                Ok(())
            })();

            match inserted {
                Ok(()) => Ok(()),
                Err(e) if is_unique_violation(&e) => {
                    debug!("Contact {name} already exists, updating in place");
                    let mut stmt = conn.prepare(
                        "UPDATE contacts SET phone = ?, email = ? WHERE name = ? COLLATE NOCASE",
                    )?;
                    stmt.bind((1, phone.as_deref()))?;
                    stmt.bind((2, email.as_deref()))?;
                    stmt.bind((3, name.as_str()))?;
                    stmt.next()?;
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
    }

    /// Case-insensitive lookup by name
    pub async fn get_contact(&self, name: &str) -> Result<Option<Contact>> {
        let name = name.to_string();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, phone, email, created_at FROM contacts
                 WHERE name = ? COLLATE NOCASE",
            )?;
            stmt.bind((1, name.as_str()))?;
            if let State::Row = stmt.next()? {
                Ok(Some(read_contact(&stmt)?))
            } else {
                Ok(None)
            }
        })
        .await
    }

    /// All contacts sorted by name
    pub async fn get_all_contacts(&self) -> Result<Vec<Contact>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, phone, email, created_at FROM contacts ORDER BY name",
            )?;
            collect_rows(&mut stmt, read_contact)
        })
        .await
    }

    /// Case-insensitive delete. Returns whether a row existed.
    pub async fn delete_contact(&self, name: &str) -> Result<bool> {
        let name = name.to_string();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare("DELETE FROM contacts WHERE name = ? COLLATE NOCASE")?;
            stmt.bind((1, name.as_str()))?;
            stmt.next()?;
            Ok(conn.change_count() > 0)
        })
        .await
    }

    /// Remove every reminder, expense, memory and contact. The profile row stays.
    pub async fn clear_all_data(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute(
                "BEGIN;
                 DELETE FROM reminders;
                 DELETE FROM expenses;
                 DELETE FROM memories;
                 DELETE FROM contacts;
                 COMMIT;",
            )?;
            Ok(())
        })
        .await?;
        info!("Cleared all reminders, expenses, memories and contacts");
        Ok(())
    }
}

fn last_insert_id(conn: &Connection) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT last_insert_rowid() AS id")?;
    stmt.next()?;
    Ok(stmt.read::<i64, _>("id")?)
}

fn collect_rows<T>(
    stmt: &mut Statement<'_>,
    read: impl Fn(&Statement<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    let mut rows = Vec::new();
    while let State::Row = stmt.next()? {
        rows.push(read(&*stmt)?);
    }
    Ok(rows)
}

fn read_reminder(stmt: &Statement<'_>) -> Result<Reminder> {
    Ok(Reminder {
        id: stmt.read::<i64, _>("id")?,
        message: stmt.read::<String, _>("message")?,
        remind_at: stmt.read::<String, _>("remind_at")?,
        notified: stmt.read::<i64, _>("notified")? != 0,
        created_at: stmt.read::<String, _>("created_at")?,
    })
}

fn read_contact(stmt: &Statement<'_>) -> Result<Contact> {
    Ok(Contact {
        id: stmt.read::<i64, _>("id")?,
        name: stmt.read::<String, _>("name")?,
        phone: stmt.read::<Option<String>, _>("phone")?,
        email: stmt.read::<Option<String>, _>("email")?,
        created_at: stmt.read::<String, _>("created_at")?,
    })
}

/// SQLITE_CONSTRAINT (19), or the message SQLite attaches to it
fn is_unique_violation(error: &sqlite::Error) -> bool {
    error.code.map(|code| code & 0xff == 19).unwrap_or(false)
        || error
            .message
            .as_deref()
            .map(|m| m.contains("UNIQUE constraint failed"))
            .unwrap_or(false)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fresh database file in the OS temp dir
    pub(crate) async fn temp_database() -> Database {
        let path = std::env::temp_dir().join(format!("aide-test-{}.db", uuid::Uuid::new_v4()));
        Database::new(&path).await.unwrap()
    }

    #[tokio::test]
    async fn test_user_name_keeps_single_row() {
        let db = temp_database().await;
        assert_eq!(db.get_user_name().await.unwrap(), None);

        db.save_user_name("Asha").await.unwrap();
        db.save_user_name("Ravi").await.unwrap();
        assert_eq!(db.get_user_name().await.unwrap().as_deref(), Some("Ravi"));

        let count = db
            .with_connection(|conn| {
                let mut stmt = conn.prepare("SELECT COUNT(*) AS n FROM user_profile")?;
                stmt.next()?;
                Ok(stmt.read::<i64, _>("n")?)
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_reminder_lifecycle() {
        let db = temp_database().await;
        let later = db.add_reminder("stretch", "18:00").await.unwrap();
        let sooner = db.add_reminder("drink water", "15:00").await.unwrap();

        let pending = db.get_pending_reminders().await.unwrap();
        assert_eq!(pending.len(), 2);
        assert_eq!(pending[0].id, sooner);
        assert_eq!(pending[0].remind_at, "15:00");
        assert!(!pending[0].notified);

        assert!(db.mark_reminder_notified(sooner).await.unwrap());
        // notified only ever moves false -> true
        assert!(!db.mark_reminder_notified(sooner).await.unwrap());

        let pending = db.get_pending_reminders().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, later);

        let all = db.get_todays_reminders().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].notified);
        assert!(!all[1].notified);
    }

    #[tokio::test]
    async fn test_expense_totals() {
        let db = temp_database().await;
        assert_eq!(db.get_total_expenses_today().await.unwrap(), 0.0);

        db.add_expense(50.0, "food", "i spent 50 dollars on food")
            .await
            .unwrap();
        db.add_expense(12.5, "transport", "bus 12.5").await.unwrap();

        let expenses = db.get_todays_expenses().await.unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].category, "transport");
        assert_eq!(expenses[1].note.as_deref(), Some("i spent 50 dollars on food"));
        assert_eq!(db.get_total_expenses_today().await.unwrap(), 62.5);
    }

    #[tokio::test]
    async fn test_expense_rejects_non_positive_amount() {
        let db = temp_database().await;
        assert!(db.add_expense(0.0, "food", "").await.is_err());
        assert!(db.get_todays_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memories_newest_first() {
        let db = temp_database().await;
        db.add_memory("my dog's name is max").await.unwrap();
        db.add_memory("i prefer dark mode").await.unwrap();
        assert!(db.add_memory("   ").await.is_err());

        let memories = db.get_all_memories().await.unwrap();
        assert_eq!(memories.len(), 2);
        assert_eq!(memories[0].content, "i prefer dark mode");
    }

    #[tokio::test]
    async fn test_contact_upsert_does_not_duplicate() {
        let db = temp_database().await;
        db.add_contact("Dad", Some("9876543210"), None).await.unwrap();
        db.add_contact("dad", Some("555-1234"), Some("dad@example.com"))
            .await
            .unwrap();

        let contacts = db.get_all_contacts().await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Dad");
        assert_eq!(contacts[0].phone.as_deref(), Some("555-1234"));
        assert_eq!(contacts[0].email.as_deref(), Some("dad@example.com"));
    }

    #[tokio::test]
    async fn test_contact_lookup_and_delete_ignore_case() {
        let db = temp_database().await;
        db.add_contact("Mom", Some("5551234"), None).await.unwrap();
        db.add_contact("Alice", Some("5559876"), None).await.unwrap();

        let mom = db.get_contact("MOM").await.unwrap().unwrap();
        assert_eq!(mom.phone.as_deref(), Some("5551234"));

        let names: Vec<_> = db
            .get_all_contacts()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Alice", "Mom"]);

        assert!(db.delete_contact("mom").await.unwrap());
        assert!(!db.delete_contact("mom").await.unwrap());
        assert!(db.get_contact("Mom").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_all_data_keeps_profile() {
        let db = temp_database().await;
        db.save_user_name("Asha").await.unwrap();
        db.add_reminder("stretch", "18:00").await.unwrap();
        db.add_expense(20.0, "food", "tea").await.unwrap();
        db.add_memory("gym at 7").await.unwrap();
        db.add_contact("Dad", Some("9876543210"), None).await.unwrap();

        db.clear_all_data().await.unwrap();

        assert!(db.get_todays_reminders().await.unwrap().is_empty());
        assert!(db.get_todays_expenses().await.unwrap().is_empty());
        assert!(db.get_all_memories().await.unwrap().is_empty());
        assert!(db.get_all_contacts().await.unwrap().is_empty());
        assert_eq!(db.get_user_name().await.unwrap().as_deref(), Some("Asha"));
    }
}
