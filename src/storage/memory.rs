use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::path::Path;
use tracing::info;

/// Dataset compiled into the binary, used unless a data file is configured.
const SEED: &str = include_str!("seed.json");

/// A note. Everything besides `id` is carried as an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// A rating attached to a note through `noteId`.
///
/// `note_id` is not checked against the notes collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: i64,
    pub note_id: i64,
    pub stars: Number,
    pub comment: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Dataset {
    #[serde(default)]
    notes: Vec<Note>,
    #[serde(default)]
    ratings: Vec<Rating>,
}

/// Read-only in-memory store for notes and ratings.
///
/// Built once at startup and never mutated. Lookups are linear scans in
/// collection order, so the first record wins when ids repeat.
#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    notes: Vec<Note>,
    ratings: Vec<Rating>,
}

impl NoteStore {
    pub fn new(notes: Vec<Note>, ratings: Vec<Rating>) -> Self {
        Self { notes, ratings }
    }

    /// Store backed by the built-in dataset
    pub fn seed() -> Result<Self> {
        Self::from_json_str(SEED).context("Built-in seed data is malformed")
    }

    /// Parse a `{ "notes": [...], "ratings": [...] }` document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        Ok(Self::new(dataset.notes, dataset.ratings))
    }

    /// Load a dataset file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read data file {:?}", path))?;
        let store = Self::from_json_str(&raw)
            .with_context(|| format!("Failed to parse data file {:?}", path))?;

        info!(
            notes = store.notes.len(),
            ratings = store.ratings.len(),
            "Loaded dataset from {:?}",
            path
        );

        Ok(store)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn find_note_by_id(&self, note_id: i64) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == note_id)
    }

    /// All ratings for a note, in collection order. Empty is not an error.
    pub fn find_ratings_by_note_id(&self, note_id: i64) -> Vec<&Rating> {
        self.ratings
            .iter()
            .filter(|rating| rating.note_id == note_id)
            .collect()
    }

    pub fn find_rating_by_note_and_rating_id(
        &self,
        note_id: i64,
        rating_id: i64,
    ) -> Option<&Rating> {
        self.ratings
            .iter()
            .find(|rating| rating.note_id == note_id && rating.id == rating_id)
    }

    pub fn find_rating_by_id(&self, rating_id: i64) -> Option<&Rating> {
        self.ratings.iter().find(|rating| rating.id == rating_id)
    }
}
