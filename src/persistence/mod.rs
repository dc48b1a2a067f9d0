//! Gold persistence
//!
//! Gold is the only value that outlives a session. It is stored as a plain
//! integer string under a single key, read once at startup and written on
//! every coin collection.

use std::fmt;

use crate::error::StorageError;

/// Storage key for the gold total
pub const GOLD_KEY: &str = "gold";

/// Backing store for the gold total
pub trait GoldStore: fmt::Debug {
    /// Read the stored total; a missing value reads as zero
    fn load(&self) -> Result<u64, StorageError>;
    /// Overwrite the stored total
    fn save(&mut self, gold: u64) -> Result<(), StorageError>;
}

/// Parse a stored gold value; blank reads as zero
pub fn parse_gold(raw: &str) -> Result<u64, StorageError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<u64>().map_err(|_| StorageError::Parse {
        value: raw.to_string(),
    })
}

/// In-process store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryGoldStore {
    value: Option<String>,
}

impl MemoryGoldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing raw stored value
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            value: Some(raw.into()),
        }
    }
}

impl GoldStore for MemoryGoldStore {
    fn load(&self) -> Result<u64, StorageError> {
        match &self.value {
            Some(raw) => parse_gold(raw),
            None => Ok(0),
        }
    }

    fn save(&mut self, gold: u64) -> Result<(), StorageError> {
        self.value = Some(gold.to_string());
        Ok(())
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageGoldStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageGoldStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl GoldStore for LocalStorageGoldStore {
    fn load(&self) -> Result<u64, StorageError> {
        let storage = Self::storage()?;
        match storage.get_item(GOLD_KEY) {
            Ok(Some(raw)) => parse_gold(&raw),
            Ok(None) => Ok(0),
            Err(e) => Err(StorageError::Read(format!("{e:?}"))),
        }
    }

    fn save(&mut self, gold: u64) -> Result<(), StorageError> {
        let storage = Self::storage()?;
        storage
            .set_item(GOLD_KEY, &gold.to_string())
            .map_err(|e| StorageError::Write(format!("{e:?}")))
    }
}

/// Gold total plus the store it is mirrored to
#[derive(Debug)]
pub struct Wallet {
    gold: u64,
    store: Box<dyn GoldStore>,
}

impl Wallet {
    /// Read the starting total; unreadable values start at zero
    pub fn open(store: Box<dyn GoldStore>) -> Self {
        let gold = store.load().unwrap_or_else(|e| {
            log::warn!("Could not read gold, starting from 0: {e}");
            0
        });
        log::info!("Wallet opened with {gold} gold");
        Self { gold, store }
    }

    /// Wallet backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryGoldStore::new()))
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    /// Add gold and persist immediately. A failed write keeps the
    /// in-memory total; the next successful write catches the store up.
    pub fn deposit(&mut self, amount: u64) -> u64 {
        self.gold = self.gold.saturating_add(amount);
        if let Err(e) = self.store.save(self.gold) {
            log::warn!("Could not persist gold: {e}");
        }
        self.gold
    }
}
