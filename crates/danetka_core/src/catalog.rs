//! Riddle catalog: game definitions loaded from a source of JSON records.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// A validated riddle: title, riddle text and hidden solution.
///
/// All three fields are non-blank. Definitions are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize)]
pub struct GameDefinition {
    /// Display title.
    title: String,
    /// Riddle presented to the player.
    riddle: String,
    /// Solution known only to the host.
    solution: String,
}

impl GameDefinition {
    /// Creates a definition, rejecting blank fields.
    ///
    /// # Errors
    ///
    /// Returns the name of the first blank field.
    pub fn new(
        title: impl Into<String>,
        riddle: impl Into<String>,
        solution: impl Into<String>,
    ) -> Result<Self, &'static str> {
        let (title, riddle, solution) = (title.into(), riddle.into(), solution.into());
        for (name, value) in [("title", &title), ("riddle", &riddle), ("solution", &solution)] {
            if value.trim().is_empty() {
                return Err(name);
            }
        }
        Ok(Self {
            title,
            riddle,
            solution,
        })
    }
}

/// On-disk shape of a game record. Fields are optional so that a missing
/// field is reported by name instead of as a generic parse failure.
#[derive(Debug, Deserialize)]
struct GameRecord {
    title: Option<String>,
    riddle: Option<String>,
    solution: Option<String>,
}

impl GameRecord {
    fn validate(self) -> Result<GameDefinition, String> {
        let title = self.title.ok_or("missing field `title`")?;
        let riddle = self.riddle.ok_or("missing field `riddle`")?;
        let solution = self.solution.ok_or("missing field `solution`")?;
        GameDefinition::new(title, riddle, solution)
            .map_err(|field| format!("empty field `{}`", field))
    }
}

/// One raw record yielded by a [`GameSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    /// Where the record came from (file name, index, ...).
    pub origin: String,
    /// Raw bytes, expected to be UTF-8 JSON, or why they could not be read.
    pub bytes: Result<Vec<u8>, String>,
}

impl SourceRecord {
    /// Creates a record from its raw bytes.
    pub fn new(origin: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            origin: origin.into(),
            bytes: Ok(bytes.into()),
        }
    }

    /// Creates a record whose bytes could not be read.
    pub fn unreadable(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            bytes: Err(reason.into()),
        }
    }
}

/// A malformed record that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq, Display, new)]
#[display("Skipped game record {}: {}", origin, reason)]
pub struct ValidationWarning {
    /// Origin of the skipped record.
    pub origin: String,
    /// Why it was rejected.
    pub reason: String,
}

/// Catalog errors.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CatalogError {
    /// The source location does not exist.
    #[display("Game source not found: {}", location)]
    SourceMissing {
        /// Location that was looked up.
        location: String,
    },

    /// The source location exists but cannot be read.
    #[display("Failed to read game source {}: {}", location, reason)]
    Unreadable {
        /// Location that failed.
        location: String,
        /// Underlying failure.
        reason: String,
    },

    /// The source yielded no valid definitions.
    #[display("No valid game definitions found in: {}", location)]
    Empty {
        /// Location that was scanned.
        location: String,
    },

    /// A game index outside the catalog was requested.
    #[display("Game index {} out of range (catalog has {} games)", index, len)]
    OutOfRange {
        /// Requested index (zero-based).
        index: usize,
        /// Catalog size.
        len: usize,
    },
}

impl CatalogError {
    /// Returns `true` for errors that must abort startup.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CatalogError::OutOfRange { .. })
    }
}

/// Supplier of raw game records.
pub trait GameSource {
    /// Human-readable location, used in errors and logs.
    fn location(&self) -> String;

    /// Yields every record in a stable order.
    ///
    /// A record that cannot be read is yielded as
    /// [`SourceRecord::unreadable`] so the rest still load.
    ///
    /// # Errors
    ///
    /// Fails only when the source as a whole is missing or unreadable.
    fn records(&self) -> Result<Vec<SourceRecord>, CatalogError>;
}

/// Reads every `*.json` file of a directory, one record per file.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Creates a source over `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl GameSource for DirectorySource {
    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    #[instrument(skip(self), fields(path = %self.dir.display()))]
    fn records(&self) -> Result<Vec<SourceRecord>, CatalogError> {
        let path = &self.dir;

        if !path.exists() {
            return Err(CatalogError::SourceMissing {
                location: self.location(),
            });
        }

        if !path.is_dir() {
            return Err(CatalogError::Unreadable {
                location: self.location(),
                reason: "not a directory".to_string(),
            });
        }

        let unreadable = |e: std::io::Error| CatalogError::Unreadable {
            location: self.location(),
            reason: e.to_string(),
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(path).map_err(unreadable)? {
            let entry_path = entry.map_err(unreadable)?.path();

            if !entry_path.is_file() {
                debug!(path = %entry_path.display(), "Skipping non-file entry");
                continue;
            }

            if entry_path.extension().and_then(|s| s.to_str()) != Some("json") {
                debug!(path = %entry_path.display(), "Skipping non-JSON file");
                continue;
            }

            files.push(entry_path);
        }

        // read_dir order is platform dependent.
        files.sort();

        let mut records = Vec::with_capacity(files.len());
        for file in files {
            let origin = file
                .file_name()
                .map_or_else(|| file.display().to_string(), |n| n.to_string_lossy().into_owned());
            let record = match std::fs::read(&file) {
                Ok(bytes) => SourceRecord::new(origin, bytes),
                Err(e) => {
                    warn!(path = %file.display(), error = %e, "Failed to read game file");
                    SourceRecord::unreadable(origin, e.to_string())
                }
            };
            records.push(record);
        }
        Ok(records)
    }
}

/// In-memory records, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<SourceRecord>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record; its origin is its position.
    pub fn with_record(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        let origin = format!("record #{}", self.records.len() + 1);
        self.records.push(SourceRecord::new(origin, bytes));
        self
    }
}

impl GameSource for MemorySource {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn records(&self) -> Result<Vec<SourceRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}

/// Validated, read-only collection of games.
#[derive(Debug, Clone)]
pub struct GameCatalog {
    games: Vec<GameDefinition>,
    warnings: Vec<ValidationWarning>,
}

impl GameCatalog {
    /// Loads every valid record from `source`.
    ///
    /// Malformed records are skipped and recorded as [`ValidationWarning`]s.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`CatalogError`] if the source is missing, unreadable,
    /// or yields no valid definitions.
    #[instrument(skip(source), fields(location = %source.location()))]
    pub fn load(source: &impl GameSource) -> Result<Self, CatalogError> {
        info!("Loading game catalog");

        let mut games = Vec::new();
        let mut warnings = Vec::new();

        for record in source.records()? {
            let parsed = record
                .bytes
                .map_err(|e| format!("unreadable: {}", e))
                .and_then(|bytes| parse_record(&bytes));
            match parsed {
                Ok(game) => {
                    debug!(origin = %record.origin, title = %game.title(), "Loaded game");
                    games.push(game);
                }
                Err(reason) => {
                    let warning = ValidationWarning::new(record.origin, reason);
                    warn!(%warning, "Skipping invalid game record");
                    warnings.push(warning);
                }
            }
        }

        if games.is_empty() {
            return Err(CatalogError::Empty {
                location: source.location(),
            });
        }

        info!(count = games.len(), skipped = warnings.len(), "Game catalog loaded");
        Ok(Self { games, warnings })
    }

    /// Loads every `*.json` file in `dir`.
    ///
    /// # Errors
    ///
    /// See [`GameCatalog::load`].
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        Self::load(&DirectorySource::new(dir))
    }

    /// Returns the game at zero-based `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::OutOfRange`] for an invalid index.
    pub fn get(&self, index: usize) -> Result<&GameDefinition, CatalogError> {
        self.games.get(index).ok_or(CatalogError::OutOfRange {
            index,
            len: self.games.len(),
        })
    }

    /// Returns all games in load order.
    pub fn games(&self) -> &[GameDefinition] {
        &self.games
    }

    /// Returns the records skipped during load.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Returns the number of games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Returns `true` if the catalog holds no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

fn parse_record(bytes: &[u8]) -> Result<GameDefinition, String> {
    let text = std::str::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {}", e))?;
    let record: GameRecord =
        serde_json::from_str(text).map_err(|e| format!("invalid JSON: {}", e))?;
    record.validate()
}
