use std::fmt::{self, Display};

// Helper macro to define surrogate key newtypes and common trait impls
macro_rules! define_id {
    ($name:ident $(, $extra:ident)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash $(, $extra)*)]
        pub struct $name(i32);

        impl $name {
            pub fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(ArtistId, PartialOrd, Ord);
define_id!(LocationId, PartialOrd, Ord);
define_id!(ArtistLocationId);
define_id!(AlbumId, PartialOrd, Ord);
define_id!(SongId);

/// 源文件标识（通常是文件路径），用于错误上下文和日志
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&std::path::Path> for SourceId {
    fn from(path: &std::path::Path) -> Self {
        Self(path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_conversions() {
        let id = ArtistId::from(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(id.to_string(), "42");
        assert!(ArtistId::from(1) < ArtistId::from(2));
    }

    #[test]
    fn test_source_id_from_path() {
        let path = std::path::Path::new("data/A/B/TRABC.json");
        let source = SourceId::from(path);
        assert_eq!(source.as_str(), "data/A/B/TRABC.json");
    }
}
