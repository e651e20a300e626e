use std::collections::HashMap;
use std::path::Path;

use crate::{
    catalog::loader,
    error::{AppError, AppResult, CatalogError},
    models::MovieEntry,
};

/// Stable position of a movie in the catalog
///
/// Assigned once at load time. The same id addresses the movie and its row of
/// the similarity matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

impl EntryId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A movie together with its similarity scores against every catalog entry
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    movie: MovieEntry,
    similarities: Box<[f64]>,
}

impl CatalogEntry {
    pub fn movie(&self) -> &MovieEntry {
        &self.movie
    }

    /// Scores indexed by `EntryId::index`
    pub fn similarities(&self) -> &[f64] {
        &self.similarities
    }
}

/// Read-only movie catalog paired with the similarity matrix
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    by_title: HashMap<String, EntryId>,
}

impl CatalogStore {
    /// Loads the catalog table and similarity matrix from disk
    pub fn load(catalog_path: &Path, similarity_path: &Path) -> AppResult<Self> {
        let movies = loader::read_catalog(catalog_path)?;
        let matrix = loader::read_similarity(similarity_path)?;

        let store = Self::from_entries(movies, matrix)?;

        tracing::info!(
            catalog = %catalog_path.display(),
            similarity = %similarity_path.display(),
            entries = store.len(),
            "Loaded movie catalog"
        );

        Ok(store)
    }

    /// Builds a catalog, pairing each movie with the matrix row at the same position
    ///
    /// Fails if the matrix is not square with one row per movie, if any score is
    /// not finite, or if a title is empty.
    pub fn from_entries(
        movies: Vec<MovieEntry>,
        matrix: Vec<Vec<f64>>,
    ) -> Result<Self, CatalogError> {
        let expected = movies.len();
        if matrix.len() != expected {
            return Err(CatalogError::DimensionMismatch {
                entries: expected,
                rows: matrix.len(),
            });
        }

        let mut entries = Vec::with_capacity(expected);
        let mut by_title = HashMap::with_capacity(expected);

        for (row, (movie, scores)) in movies.into_iter().zip(matrix).enumerate() {
            if movie.title.is_empty() {
                return Err(CatalogError::EmptyTitle { row });
            }
            if scores.len() != expected {
                return Err(CatalogError::RaggedRow {
                    row,
                    expected,
                    found: scores.len(),
                });
            }
            if let Some(column) = scores.iter().position(|score| !score.is_finite()) {
                return Err(CatalogError::NonFiniteScore { row, column });
            }

            let id = EntryId(row);
            if let Some(first) = by_title.get(&movie.title) {
                // Lookups by title keep resolving to the first row.
                tracing::warn!(
                    title = %movie.title,
                    first_row = EntryId::index(*first),
                    duplicate_row = row,
                    "Duplicate title in catalog"
                );
            } else {
                by_title.insert(movie.title.clone(), id);
            }

            entries.push(CatalogEntry {
                movie,
                similarities: scores.into_boxed_slice(),
            });
        }

        Ok(Self { entries, by_title })
    }

    /// Returns the row of the first movie with exactly this title
    pub fn index_of(&self, title: &str) -> AppResult<EntryId> {
        self.by_title
            .get(title)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Title not in catalog: {}", title)))
    }

    pub fn entry(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.entries.get(id.0)
    }

    /// Poster reference stored for a row, if any
    pub fn poster_url(&self, id: EntryId) -> Option<&str> {
        self.entry(id).and_then(|entry| entry.movie.poster())
    }

    /// Similarity scores of a row against every entry
    pub fn similarities(&self, id: EntryId) -> Option<&[f64]> {
        self.entry(id).map(CatalogEntry::similarities)
    }

    /// All titles in load order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.movie.title.as_str())
    }

    /// All entries in load order
    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &CatalogEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(row, entry)| (EntryId(row), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
