use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use csv::{Reader, Writer};
use sha2::{Digest, Sha256};
use crate::errors::{StoreError, StoreResult};
use crate::models::Account;

const HEADER: [&str; 4] = ["Username", "Password", "Full Name", "Email"];

/// Hashes a password into a lowercase SHA-256 hex digest.
///
/// Unsalted and deterministic: the same password always produces the same
/// 64 character digest. It only keeps plain passwords out of the file.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Accounts table persisted as a CSV file, reloaded in full on every call.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the file with only a header row if it is missing
    pub fn ensure_exists(&self) -> StoreResult<()> {
        if !self.path.exists() {
            tracing::info!("Creating accounts file: {}", self.path.display());
            self.write_accounts(&[])?;
        }
        Ok(())
    }

    pub fn accounts(&self) -> StoreResult<Vec<Account>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut reader = Reader::from_reader(BufReader::new(file));

        reader
            .deserialize()
            .map(|row| {
                row.map_err(|e| StoreError::Malformed {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })
            })
            .collect()
    }

    pub fn exists(&self, username: &str) -> StoreResult<bool> {
        Ok(self.accounts()?.iter().any(|a| a.username == username))
    }

    /// Appends a new account, failing if the username is already taken.
    /// Nothing is written when the name exists.
    pub fn add(&self, username: &str, password: &str, full_name: &str, email: &str) -> StoreResult<Account> {
        if self.exists(username)? {
            tracing::warn!("Registration rejected, username taken: {}", username);
            return Err(StoreError::AlreadyExists(username.to_string()));
        }

        let mut accounts = self.accounts()?;

        let account = Account {
            username: username.to_string(),
            password_hash: hash_password(password),
            full_name: full_name.to_string(),
            email: email.to_string(),
        };
        accounts.push(account.clone());
        self.write_accounts(&accounts)?;

        tracing::debug!("Stored account {} ({} total)", username, accounts.len());
        Ok(account)
    }

    /// True only when both the username and the password digest match
    pub fn authenticate(&self, username: &str, password: &str) -> StoreResult<bool> {
        let password_hash = hash_password(password);
        Ok(self
            .accounts()?
            .iter()
            .any(|a| a.username == username && a.password_hash == password_hash))
    }

    fn write_accounts(&self, accounts: &[Account]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let mut writer = Writer::from_writer(BufWriter::new(file));

        // Serializing an empty slice would leave the file without a header
        if accounts.is_empty() {
            writer.write_record(HEADER)?;
        }
        for account in accounts {
            writer.serialize(account)?;
        }

        writer.flush()?;
        Ok(())
    }
}
