//! Record types for extracted book data
//!
//! A [`BookRecord`] is an open-ended, ordered mapping from field name to
//! value. Every record carries the four core fields plus whatever keys the
//! detail page's product-information table happens to contain, plus the
//! originating category URL added by the orchestrator. A [`ResultSet`] is
//! the ordered sequence of records produced by one crawl run.

/// Value used when an expected field cannot be located on the page
pub const SENTINEL: &str = "N/A";

/// Core field key: book title
pub const BOOK_NAME: &str = "book_name";

/// Core field key: display price
pub const BOOK_PRICE: &str = "book_price";

/// Core field key: star-rating level (e.g. "Three")
pub const BOOK_STAR_COUNT: &str = "book_star_count";

/// Core field key: product description
pub const BOOK_DESC: &str = "book_desc";

/// Key for the category URL a record was discovered under
pub const CAT_URL: &str = "cat_url";

/// The four core field keys, in record order
pub const CORE_FIELDS: [&str; 4] = [BOOK_NAME, BOOK_PRICE, BOOK_STAR_COUNT, BOOK_DESC];

/// One extracted book: an ordered string-to-string mapping
///
/// Insertion order is preserved. Inserting an existing key replaces its
/// value in place, which gives table-derived fields the last word when a
/// product-table row shares a name with a core field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookRecord {
    entries: Vec<(String, String)>,
}

impl BookRecord {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field, replacing the value in place if the key exists
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for a key, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the record contains the given key
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over field keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

/// Ordered sequence of records from one crawl run
///
/// Insertion order is crawl order: category order, then page order, then
/// in-page order. Records are heterogeneous; no uniqueness is enforced, so
/// a book listed under two target categories appears twice.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    records: Vec<BookRecord>,
}

impl ResultSet {
    /// Creates an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, preserving crawl order
    pub fn push(&mut self, record: BookRecord) {
        self.records.push(record);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records were collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view of the records
    pub fn records(&self) -> &[BookRecord] {
        &self.records
    }

    /// Iterates over records in crawl order
    pub fn iter(&self) -> impl Iterator<Item = &BookRecord> {
        self.records.iter()
    }

    /// Union of field keys across all records, in first-seen order
    ///
    /// Records carry variable key sets, so the tabular view is sparse: a
    /// record without one of these columns simply has an empty cell there.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for record in &self.records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.to_string());
                }
            }
        }
        columns
    }

    /// Row and column counts of the sparse tabular view
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), self.columns().len())
    }
}
