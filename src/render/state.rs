//! Render state of one page section

use serde::Serialize;

use crate::fetcher::FetchError;

/// What a section shows at a given moment
#[derive(Debug, Clone, PartialEq)]
pub enum SectionState<T> {
    /// Fetch still pending; draw a placeholder of this shape
    Loading(Shape),
    /// Fetch resolved with nothing to show
    Empty,
    /// Fetch resolved with data, in fetch order
    Populated(T),
    /// Fetch failed; only this section is affected
    Failed,
}

impl<T> SectionState<Vec<T>> {
    /// State for a list-valued fetch
    pub fn from_list(result: Result<Vec<T>, FetchError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => SectionState::Empty,
            Ok(items) => SectionState::Populated(items),
            Err(e) => {
                tracing::error!("Section fetch failed: {}", e);
                SectionState::Failed
            }
        }
    }
}

impl<T> SectionState<T> {
    /// State for a singleton fetch
    pub fn from_optional(result: Result<Option<T>, FetchError>) -> Self {
        match result {
            Ok(Some(value)) => SectionState::Populated(value),
            Ok(None) => SectionState::Empty,
            Err(e) => {
                tracing::error!("Section fetch failed: {}", e);
                SectionState::Failed
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SectionState::Loading(_) => "loading",
            SectionState::Empty => "empty",
            SectionState::Populated(_) => "populated",
            SectionState::Failed => "failed",
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SectionState<U> {
        match self {
            SectionState::Loading(shape) => SectionState::Loading(shape),
            SectionState::Empty => SectionState::Empty,
            SectionState::Populated(value) => SectionState::Populated(f(value)),
            SectionState::Failed => SectionState::Failed,
        }
    }
}

/// Layout of a loading placeholder
///
/// `repeat` items are drawn under an optional heading bar; each item is a
/// stack of rows and each row a line of bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub class: &'static str,
    pub heading: bool,
    pub repeat: usize,
    pub rows: Vec<Vec<Bar>>,
}

/// One shimmering block
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub width: &'static str,
    pub height: &'static str,
    pub round: bool,
}

impl Bar {
    pub const fn line(width: &'static str) -> Self {
        Self {
            width,
            height: "1em",
            round: false,
        }
    }

    pub const fn block(width: &'static str, height: &'static str) -> Self {
        Self {
            width,
            height,
            round: false,
        }
    }

    pub const fn circle(size: &'static str) -> Self {
        Self {
            width: size,
            height: size,
            round: true,
        }
    }
}

impl Shape {
    /// Total number of bars the placeholder draws
    pub fn bar_count(&self) -> usize {
        let per_item: usize = self.rows.iter().map(Vec::len).sum();
        usize::from(self.heading) + self.repeat * per_item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_from_list() {
        assert_eq!(SectionState::<Vec<u8>>::from_list(Ok(vec![])), SectionState::Empty);
        assert_eq!(
            SectionState::from_list(Ok(vec![1, 2])),
            SectionState::Populated(vec![1, 2])
        );
        let failed: SectionState<Vec<u8>> = SectionState::from_list(Err(FetchError::Store(
            StoreError::Unavailable("down".to_string()),
        )));
        assert_eq!(failed, SectionState::Failed);
    }

    #[test]
    fn test_from_optional() {
        assert_eq!(SectionState::from_optional(Ok(Some(3))), SectionState::Populated(3));
        assert_eq!(SectionState::<u8>::from_optional(Ok(None)), SectionState::Empty);
        assert_eq!(SectionState::<u8>::from_optional(Ok(None)).name(), "empty");
    }

    #[test]
    fn test_bar_count() {
        let shape = Shape {
            class: "list",
            heading: true,
            repeat: 3,
            rows: vec![vec![Bar::line("60%"), Bar::line("30%")], vec![Bar::line("70%")]],
        };
        assert_eq!(shape.bar_count(), 10);
    }
}
