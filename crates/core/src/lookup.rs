//! Three-way outcome for store queries
//!
//! Every query distinguishes "nothing stored" from "storage failed". The
//! numeric sentinels of the legacy contract (`0` for no data, `-1` for
//! failure) remain available through [`Lookup::sentinel`].

use crate::StoreError;

/// Outcome of a store query
#[derive(Debug)]
pub enum Lookup<T> {
    /// Storage answered and holds nothing for the query
    Empty,
    /// Storage answered with a value
    Value(T),
    /// Storage could not answer; the state is unknown
    Failed(StoreError),
}

impl<T> Lookup<T> {
    /// Build from an optional value
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Value(v),
            None => Lookup::Empty,
        }
    }

    /// Get the value if present
    pub fn value(self) -> Option<T> {
        match self {
            Lookup::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Borrow the value if present
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Lookup::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Lookup::Empty)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Lookup::Failed(_))
    }

    /// Transform the value, keeping `Empty` and `Failed` as they are
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Empty => Lookup::Empty,
            Lookup::Value(v) => Lookup::Value(f(v)),
            Lookup::Failed(e) => Lookup::Failed(e),
        }
    }

    /// Convert into a `Result`, with `Empty` as `Ok(None)`
    pub fn into_result(self) -> Result<Option<T>, StoreError> {
        match self {
            Lookup::Empty => Ok(None),
            Lookup::Value(v) => Ok(Some(v)),
            Lookup::Failed(e) => Err(e),
        }
    }
}

impl<T: Default> Lookup<T> {
    /// Collapse `Empty` and `Failed` into the default value
    pub fn unwrap_or_default(self) -> T {
        self.value().unwrap_or_default()
    }
}

impl<T> From<Result<Option<T>, StoreError>> for Lookup<T> {
    fn from(result: Result<Option<T>, StoreError>) -> Self {
        match result {
            Ok(value) => Lookup::from_option(value),
            Err(e) => Lookup::Failed(e),
        }
    }
}

impl Lookup<u64> {
    /// Legacy numeric view: the count, `0` when empty, `-1` on failure
    pub fn sentinel(&self) -> i64 {
        match self {
            Lookup::Empty => 0,
            Lookup::Value(v) => i64::try_from(*v).unwrap_or(i64::MAX),
            Lookup::Failed(_) => -1,
        }
    }
}

impl Lookup<i64> {
    /// Legacy numeric view: the timestamp, `0` when empty, `-1` on failure
    pub fn sentinel(&self) -> i64 {
        match self {
            Lookup::Empty => 0,
            Lookup::Value(v) => *v,
            Lookup::Failed(_) => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_distinguish_empty_from_failure() {
        let empty: Lookup<i64> = Lookup::Empty;
        let value: Lookup<i64> = Lookup::Value(1000);
        let failed: Lookup<i64> = Lookup::Failed(StoreError::Connection("down".into()));

        assert_eq!(empty.sentinel(), 0);
        assert_eq!(value.sentinel(), 1000);
        assert_eq!(failed.sentinel(), -1);

        let count: Lookup<u64> = Lookup::Value(0);
        assert_eq!(count.sentinel(), 0);
        let count: Lookup<u64> = Lookup::Failed(StoreError::Query("locked".into()));
        assert_eq!(count.sentinel(), -1);
    }

    #[test]
    fn test_unwrap_or_default_flattens_failure() {
        let failed: Lookup<Vec<u8>> = Lookup::Failed(StoreError::Connection("down".into()));
        assert!(failed.unwrap_or_default().is_empty());
        assert_eq!(Lookup::Value(vec![1u8]).unwrap_or_default(), vec![1u8]);
    }

    #[test]
    fn test_from_result() {
        let empty: Result<Option<u8>, StoreError> = Ok(None);
        assert!(Lookup::from(empty).is_empty());
        let found: Result<Option<u8>, StoreError> = Ok(Some(7));
        assert_eq!(Lookup::from(found).value(), Some(7));
        let failed: Result<Option<u8>, StoreError> = Err(StoreError::Query("bad".into()));
        assert!(Lookup::from(failed).is_failed());
    }

    #[test]
    fn test_map_preserves_failure() {
        let failed: Lookup<u8> = Lookup::Failed(StoreError::Connection("down".into()));
        assert!(failed.map(|v| v + 1).is_failed());
        assert_eq!(Lookup::Value(1u8).map(|v| v + 1).value(), Some(2));
    }
}
