use std::collections::VecDeque;

/// Most recently selected recipe names for one meal-type, newest first
#[derive(Debug, Clone)]
pub struct RecencyWindow {
    names: VecDeque<String>,
    capacity: usize,
}

impl RecencyWindow {
    pub fn new(capacity: usize) -> Self {
        RecencyWindow {
            names: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Prepend a batch of selections, keeping their order, then truncate
    pub fn record<I, S>(&mut self, selected: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let batch: Vec<String> = selected.into_iter().map(Into::into).collect();
        for name in batch.into_iter().rev() {
            self.names.push_front(name);
        }
        self.names.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
