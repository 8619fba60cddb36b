use std::fmt;

/// Things that can go wrong when driving one of the maps. Plain absence (a
/// missing key, a value nobody stored) is never an error; that's what `None`
/// is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// A traversal was asked for another entry after it had already yielded
    /// its last one.
    Exhausted,

    /// A hash map was asked to hash into zero buckets.
    ZeroBuckets,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Exhausted => {
                write!(f, "traversal advanced past its last entry")
            }
            MapError::ZeroBuckets => {
                write!(f, "a chained hash map needs at least one bucket")
            }
        }
    }
}

impl std::error::Error for MapError {}

#[cfg(test)]
mod tests {
    use super::MapError;

    #[test]
    fn test_display() {
        assert_eq!(
            "traversal advanced past its last entry",
            MapError::Exhausted.to_string()
        );
        assert_eq!(
            "a chained hash map needs at least one bucket",
            MapError::ZeroBuckets.to_string()
        );
    }

    #[test]
    fn test_is_std_error() {
        let e: Box<dyn std::error::Error> = Box::new(MapError::Exhausted);
        assert!(e.source().is_none());
    }
}
