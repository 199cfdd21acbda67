//! Data structures describing the billable content of an invoice.
//!
//! The types in this module are plain, serialization-friendly records.  They
//! intentionally avoid referencing the page surface so the values can be
//! produced by a task-tracker client or loaded from disk without pulling in
//! rendering concerns.

/// One billing party: the sender or the recipient of the invoice.
///
/// The two tax identifiers are modelled as explicit optional fields rather
/// than sentinel empty strings; an absent identifier contributes no line to
/// the rendered address block, while an empty string still renders its line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Party {
    name: String,
    address: String,
    country: String,
    postal_code: String,
    ico: Option<String>,
    dic: Option<String>,
}

impl Party {
    /// Creates a party with the four mandatory postal fields.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        country: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            country: country.into(),
            postal_code: postal_code.into(),
            ico: None,
            dic: None,
        }
    }

    /// Returns the party name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the street address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the country.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Returns the postal code.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Returns the company registration number (ICO), if any.
    pub fn ico(&self) -> Option<&str> {
        self.ico.as_deref()
    }

    /// Returns the tax identification number (DIC), if any.
    pub fn dic(&self) -> Option<&str> {
        self.dic.as_deref()
    }

    /// Sets the company registration number and returns the updated party.
    pub fn with_ico(mut self, ico: impl Into<Option<String>>) -> Self {
        self.ico = ico.into();
        self
    }

    /// Sets the tax identification number and returns the updated party.
    pub fn with_dic(mut self, dic: impl Into<Option<String>>) -> Self {
        self.dic = dic.into();
        self
    }
}

/// One billable task as reported by the task tracker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Task {
    name: String,
    time_ms: i64,
}

impl Task {
    /// Creates a task with the given name and tracked time in milliseconds.
    pub fn new(name: impl Into<String>, time_ms: i64) -> Self {
        Self {
            name: name.into(),
            time_ms,
        }
    }

    /// Returns the task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tracked time in milliseconds.
    pub fn time_ms(&self) -> i64 {
        self.time_ms
    }
}

/// An insertion-ordered collection of tasks keyed by tracker id.
///
/// Row order in the rendered table is insertion order, so the collection is
/// backed by a vector of pairs instead of a hash map.  Keys are unique:
/// inserting an id that is already present replaces the task while keeping its
/// original position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskList {
    entries: Vec<(String, Task)>,
}

impl TaskList {
    /// Creates an empty task list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a task under the given tracker id.
    ///
    /// Returns the previous task for the id, if there was one.
    pub fn insert(&mut self, id: impl Into<String>, task: Task) -> Option<Task> {
        let id = id.into();
        match self.entries.iter_mut().find(|(key, _)| *key == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, task)),
            None => {
                self.entries.push((id, task));
                None
            }
        }
    }

    /// Inserts a task and returns the updated list.
    pub fn with_task(mut self, id: impl Into<String>, task: Task) -> Self {
        self.insert(id, task);
        self
    }

    /// Returns the task stored under `id`, if any.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, task)| task)
    }

    /// Returns the number of tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(id, task)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Task)> {
        self.entries.iter().map(|(id, task)| (id.as_str(), task))
    }
}

impl<I: Into<String>> FromIterator<(I, Task)> for TaskList {
    fn from_iter<T: IntoIterator<Item = (I, Task)>>(iter: T) -> Self {
        let mut list = Self::new();
        for (id, task) in iter {
            list.insert(id, task);
        }
        list
    }
}
