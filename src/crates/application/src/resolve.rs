//! Agreement rule shared by the location resolver and the artist linker:
//! a value is kept only when every observation agrees on it. A null
//! observation is a value of its own, so `{1.0, null}` does not agree.

/// Outcome of reducing a group of observations to one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Agreement<T> {
    /// No observations at all.
    Empty,
    /// Every observation carried this value.
    Single(T),
    /// Number of distinct values seen (always >= 2).
    Conflict(usize),
}

impl<T> Agreement<T> {
    pub fn single(self) -> Option<T> {
        match self {
            Agreement::Single(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Agreement::Conflict(_))
    }
}

/// Distinct values in first-seen order. `PartialEq` is enough here; groups
/// are small and floats are compared by value.
pub fn distinct<T: PartialEq>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

pub fn agree<T: PartialEq>(values: impl IntoIterator<Item = T>) -> Agreement<T> {
    let mut unique = distinct(values);
    match unique.len() {
        0 => Agreement::Empty,
        1 => Agreement::Single(unique.remove(0)),
        n => Agreement::Conflict(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agreed_coordinate(values: Vec<Option<f64>>) -> Option<f64> {
        agree(values).single().flatten()
    }

    #[test]
    fn test_single_value_survives() {
        assert_eq!(agreed_coordinate(vec![Some(1.0), Some(1.0)]), Some(1.0));
    }

    #[test]
    fn test_conflicting_values_become_null() {
        assert_eq!(agreed_coordinate(vec![Some(1.0), Some(2.0)]), None);
        assert!(agree([Some(1.0), Some(2.0), Some(1.0)]).is_conflict());
    }

    #[test]
    fn test_null_counts_as_a_value() {
        assert_eq!(agreed_coordinate(vec![Some(1.0), None]), None);
        assert_eq!(agree([Some(1.0), None]), Agreement::Conflict(2));
        assert_eq!(agree([None::<f64>, None]), Agreement::Single(None));
    }

    #[test]
    fn test_empty_group() {
        assert_eq!(agree(Vec::<Option<String>>::new()), Agreement::Empty);
        assert_eq!(agreed_coordinate(Vec::new()), None);
    }

    #[test]
    fn test_distinct_keeps_first_seen_order() {
        assert_eq!(distinct(["Y", "X", "Y", "Z", "X"]), vec!["Y", "X", "Z"]);
    }
}
