use once_cell::sync::OnceCell;

/// The free text part of a search.
///
/// The terms are kept in the order they were given, which is the order they
/// appear in the generated search string. The search string itself is
/// computed by the backend adapter and cached here on first use.
#[derive(Debug, Clone, Default)]
pub struct Query {
    terms: Vec<String>,
    search_string: OnceCell<String>,
}

impl Query {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query {
            terms: terms.into_iter().map(Into::into).collect(),
            search_string: OnceCell::new(),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The search string, if it was already computed.
    pub fn search_string(&self) -> Option<&str> {
        self.search_string.get().map(String::as_str)
    }

    pub fn search_string_or_init<F>(&self, init: F) -> &str
    where
        F: FnOnce() -> String,
    {
        self.search_string.get_or_init(init)
    }
}
