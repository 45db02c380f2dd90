//! Loading state for a page's list of records.

#[cfg(test)]
#[path = "records_test.rs"]
mod records_test;

#[derive(Clone, Debug, PartialEq)]
pub enum Records<T> {
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

impl<T> Default for Records<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Records<T> {
    /// Loaded items; empty while loading or after a failure.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Ready(items) => items,
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Loading | Self::Ready(_) => None,
        }
    }

    /// Replace the record with matching `id`, or append it.
    pub fn upsert(&mut self, record: T, id_of: impl Fn(&T) -> &str) {
        match self {
            Self::Ready(items) => {
                let id = id_of(&record).to_owned();
                match items.iter_mut().find(|item| id_of(item) == id) {
                    Some(slot) => *slot = record,
                    None => items.insert(0, record),
                }
            }
            Self::Loading | Self::Failed(_) => *self = Self::Ready(vec![record]),
        }
    }
}

impl<T> From<Result<Vec<T>, String>> for Records<T> {
    fn from(result: Result<Vec<T>, String>) -> Self {
        match result {
            Ok(items) => Self::Ready(items),
            Err(e) => Self::Failed(e),
        }
    }
}
