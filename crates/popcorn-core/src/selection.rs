/// Result of a selection call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// A different result is now selected; its detail should be fetched
    Opened(String),
    /// Nothing is selected any more
    Closed,
    /// Nothing was selected and nothing is
    Unchanged,
}

/// At most one selected search result
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: Option<String>,
}

impl Selection {
    /// Toggle: picking the selected id again clears the selection
    pub fn select(&mut self, imdb_id: &str) -> SelectionChange {
        if self.selected.as_deref() == Some(imdb_id) {
            self.selected = None;
            SelectionChange::Closed
        } else {
            self.selected = Some(imdb_id.to_string());
            SelectionChange::Opened(imdb_id.to_string())
        }
    }

    pub fn close(&mut self) -> SelectionChange {
        match self.selected.take() {
            Some(_) => SelectionChange::Closed,
            None => SelectionChange::Unchanged,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
