use std::fmt;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Stage,
    Artist,
    Location,
    Link,
    Album,
    Song,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Stage,
        Stage::Artist,
        Stage::Location,
        Stage::Link,
        Stage::Album,
        Stage::Song,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Stage => "stage",
            Stage::Artist => "artist",
            Stage::Location => "location",
            Stage::Link => "link",
            Stage::Album => "album",
            Stage::Song => "song",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_linear() {
        assert!(Stage::ALL.windows(2).all(|w| w[0] < w[1]));
        let names: Vec<String> = Stage::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            vec!["stage", "artist", "location", "link", "album", "song"]
        );
    }
}
