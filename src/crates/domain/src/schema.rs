use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchemaError {
    #[error("table name for {role} is empty")]
    Empty { role: &'static str },
    #[error("table name {name:?} for {role} is not a plain SQL identifier")]
    InvalidIdentifier { role: &'static str, name: String },
    #[error("table name {0:?} is used for more than one table")]
    Duplicate(String),
}

/// Names of the seven tables the pipeline writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub staged_artists: String,
    pub staged_songs: String,
    pub artists: String,
    pub locations: String,
    pub artist_locations: String,
    pub albums: String,
    pub songs: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            staged_artists: "artists_init".to_string(),
            staged_songs: "songs_init".to_string(),
            artists: "artists".to_string(),
            locations: "locations".to_string(),
            artist_locations: "artists_locations".to_string(),
            albums: "albums".to_string(),
            songs: "songs".to_string(),
        }
    }
}

impl TableNames {
    fn roles(&self) -> [(&'static str, &str); 7] {
        [
            ("staged_artists", &self.staged_artists),
            ("staged_songs", &self.staged_songs),
            ("artists", &self.artists),
            ("locations", &self.locations),
            ("artist_locations", &self.artist_locations),
            ("albums", &self.albums),
            ("songs", &self.songs),
        ]
    }
}

/// Validated schema definition handed to the store and to the DDL helper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDef {
    tables: TableNames,
}

impl SchemaDef {
    pub fn new(tables: TableNames) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for (role, name) in tables.roles() {
            if name.is_empty() {
                return Err(SchemaError::Empty { role });
            }
            if !is_identifier(name) {
                return Err(SchemaError::InvalidIdentifier {
                    role,
                    name: name.to_string(),
                });
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(SchemaError::Duplicate(name.to_string()));
            }
        }
        Ok(Self { tables })
    }

    pub fn tables(&self) -> &TableNames {
        &self.tables
    }
}

// [A-Za-z_][A-Za-z0-9_]*
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names_are_valid() {
        let schema = SchemaDef::new(TableNames::default()).unwrap();
        assert_eq!(schema.tables().staged_artists, "artists_init");
        assert_eq!(schema, SchemaDef::default());
    }

    #[test]
    fn test_rejects_empty_name() {
        let tables = TableNames {
            albums: String::new(),
            ..TableNames::default()
        };
        assert_eq!(
            SchemaDef::new(tables),
            Err(SchemaError::Empty { role: "albums" })
        );
    }

    #[test]
    fn test_rejects_non_identifier() {
        let tables = TableNames {
            songs: "songs; DROP TABLE artists".to_string(),
            ..TableNames::default()
        };
        assert!(matches!(
            SchemaDef::new(tables),
            Err(SchemaError::InvalidIdentifier { role: "songs", .. })
        ));

        let tables = TableNames {
            songs: "1songs".to_string(),
            ..TableNames::default()
        };
        assert!(SchemaDef::new(tables).is_err());
    }

    #[test]
    fn test_rejects_duplicates() {
        let tables = TableNames {
            albums: "Artists".to_string(),
            ..TableNames::default()
        };
        assert_eq!(
            SchemaDef::new(tables),
            Err(SchemaError::Duplicate("Artists".to_string()))
        );
    }
}
