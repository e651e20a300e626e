//! Readers for the two static artifacts behind the catalog
//!
//! The catalog table is accepted as a list of records, as a map of column
//! arrays, or as a map of columns keyed by row index (`"0"`, `"1"`, ...). The
//! similarity matrix is a JSON array of rows.

use serde::{de::DeserializeOwned, Deserialize};
use std::collections::HashMap;
use std::path::Path;

use crate::{error::CatalogError, models::MovieEntry};

/// Serialized catalog table in any of the supported layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CatalogTable {
    Records(Vec<MovieEntry>),
    Columns(CatalogColumns),
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogColumns {
    #[serde(default)]
    title: Option<Column<String>>,
    #[serde(default)]
    poster_url: Option<Column<Option<String>>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Column<T> {
    List(Vec<T>),
    Indexed(HashMap<String, T>),
}

impl<T> Column<T> {
    /// Flattens the column into row order
    ///
    /// Indexed columns must cover exactly the rows `0..n`.
    fn into_rows(self) -> Result<Vec<T>, CatalogError> {
        match self {
            Column::List(values) => Ok(values),
            Column::Indexed(values) => {
                let mut keyed = Vec::with_capacity(values.len());
                for (key, value) in values {
                    let row = key.trim().parse::<usize>().map_err(|_| {
                        CatalogError::InvalidRowKey {
                            row: keyed.len(),
                            key: key.clone(),
                        }
                    })?;
                    keyed.push((row, key, value));
                }
                keyed.sort_by_key(|(row, _, _)| *row);

                keyed
                    .into_iter()
                    .enumerate()
                    .map(|(expected, (row, key, value))| {
                        if row == expected {
                            Ok(value)
                        } else {
                            Err(CatalogError::InvalidRowKey { row: expected, key })
                        }
                    })
                    .collect()
            }
        }
    }
}

impl CatalogTable {
    pub(crate) fn into_movies(self) -> Result<Vec<MovieEntry>, CatalogError> {
        match self {
            CatalogTable::Records(movies) => Ok(movies),
            CatalogTable::Columns(columns) => {
                let titles = columns
                    .title
                    .ok_or(CatalogError::MissingTitleColumn)?
                    .into_rows()?;

                let posters = match columns.poster_url {
                    Some(column) => {
                        let posters = column.into_rows()?;
                        if posters.len() != titles.len() {
                            return Err(CatalogError::ColumnLength {
                                column: "poster_url",
                                expected: titles.len(),
                                found: posters.len(),
                            });
                        }
                        posters
                    }
                    None => vec![None; titles.len()],
                };

                Ok(titles
                    .into_iter()
                    .zip(posters)
                    .map(|(title, poster_url)| MovieEntry { title, poster_url })
                    .collect())
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the catalog table artifact
pub fn read_catalog(path: &Path) -> Result<Vec<MovieEntry>, CatalogError> {
    let table: CatalogTable = read_json(path)?;
    let movies = table.into_movies()?;
    tracing::debug!(path = %path.display(), rows = movies.len(), "Read catalog table");
    Ok(movies)
}

/// Reads the similarity matrix artifact
pub fn read_similarity(path: &Path) -> Result<Vec<Vec<f64>>, CatalogError> {
    let matrix: Vec<Vec<f64>> = read_json(path)?;
    tracing::debug!(path = %path.display(), rows = matrix.len(), "Read similarity matrix");
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(json: &str) -> Result<Vec<MovieEntry>, CatalogError> {
        serde_json::from_str::<CatalogTable>(json)
            .unwrap()
            .into_movies()
    }

    #[test]
    fn test_records_layout() {
        let movies = parse(
            r#"[
                {"title": "Alien", "poster_url": "https://img.example/alien.jpg"},
                {"title": "Heat", "poster_url": null},
                {"title": "Ran"}
            ]"#,
        )
        .unwrap();

        assert_eq!(movies.len(), 3);
        assert_eq!(movies[0].poster(), Some("https://img.example/alien.jpg"));
        assert_eq!(movies[1].poster(), None);
        assert_eq!(movies[2].title, "Ran");
    }

    #[test]
    fn test_column_arrays_layout() {
        let movies = parse(
            r#"{
                "movie_id": [19995, 285, 206647],
                "title": ["Avatar", "Pirates", "Spectre"],
                "poster_url": ["https://img.example/a.jpg", null, ""]
            }"#,
        )
        .unwrap();

        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Avatar", "Pirates", "Spectre"]);
        assert_eq!(movies[1].poster(), None);
        assert_eq!(movies[2].poster(), None);
    }

    #[test]
    fn test_indexed_columns_are_ordered_by_row() {
        let movies = parse(
            r#"{
                "title": {"2": "Spectre", "0": "Avatar", "1": "Pirates", "10": "Tangled",
                          "3": "Batman", "4": "Carter", "5": "Spider", "6": "Ultron",
                          "7": "Potter", "8": "Justice", "9": "Superman"},
                "poster_url": {"0": "https://img.example/a.jpg", "1": null, "2": null,
                               "3": null, "4": null, "5": null, "6": null, "7": null,
                               "8": null, "9": null, "10": "https://img.example/t.jpg"}
            }"#,
        )
        .unwrap();

        assert_eq!(movies[0].title, "Avatar");
        assert_eq!(movies[2].title, "Spectre");
        assert_eq!(movies[10].title, "Tangled");
        assert_eq!(movies[10].poster(), Some("https://img.example/t.jpg"));
    }

    #[test]
    fn test_missing_poster_column() {
        let movies = parse(r#"{"title": ["Avatar", "Spectre"]}"#).unwrap();
        assert!(movies.iter().all(|m| m.poster_url.is_none()));
    }

    #[test]
    fn test_missing_title_column() {
        let result = parse(r#"{"poster_url": ["https://img.example/a.jpg"]}"#);
        assert!(matches!(result, Err(CatalogError::MissingTitleColumn)));
    }

    #[test]
    fn test_column_length_mismatch() {
        let result = parse(r#"{"title": ["Avatar", "Spectre"], "poster_url": [null]}"#);
        assert!(matches!(
            result,
            Err(CatalogError::ColumnLength {
                column: "poster_url",
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_gap_in_row_index() {
        let result = parse(r#"{"title": {"0": "Avatar", "2": "Spectre"}}"#);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidRowKey { row: 1, .. })
        ));
    }

    #[test]
    fn test_non_numeric_row_key() {
        let result = parse(r#"{"title": {"first": "Avatar"}}"#);
        assert!(matches!(result, Err(CatalogError::InvalidRowKey { .. })));
    }

    #[test]
    fn test_read_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("movies.json");
        let similarity_path = dir.path().join("similarity.json");

        let mut catalog = std::fs::File::create(&catalog_path).unwrap();
        catalog
            .write_all(br#"{"title": ["Avatar", "Spectre"]}"#)
            .unwrap();
        std::fs::write(&similarity_path, "[[1.0, 0.3], [0.3, 1.0]]").unwrap();

        assert_eq!(read_catalog(&catalog_path).unwrap().len(), 2);
        assert_eq!(
            read_similarity(&similarity_path).unwrap(),
            vec![vec![1.0, 0.3], vec![0.3, 1.0]]
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_catalog(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_malformed_matrix_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.json");
        std::fs::write(&path, r#"[[1.0, "high"]]"#).unwrap();
        assert!(matches!(
            read_similarity(&path),
            Err(CatalogError::Parse { .. })
        ));
    }
}
