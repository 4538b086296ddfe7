use std::collections::BTreeMap;
use std::fmt;

/// Value of a named search backend parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Text(String),
    Integer(i64),
    Float(f64),
    List(Vec<String>),
}

impl ParameterValue {
    pub fn is_empty_list(&self) -> bool {
        matches!(self, ParameterValue::List(values) if values.is_empty())
    }

    /// The value as a list of clauses: a single value becomes a one element
    /// list.
    pub fn into_list(self) -> Vec<String> {
        match self {
            ParameterValue::List(values) => values,
            other => vec![other.to_string()],
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Text(text) => f.write_str(text),
            ParameterValue::Integer(value) => write!(f, "{}", value),
            ParameterValue::Float(value) => write!(f, "{}", value),
            ParameterValue::List(values) => f.write_str(&values.join(",")),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<u32> for ParameterValue {
    fn from(value: u32) -> Self {
        ParameterValue::Integer(i64::from(value))
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(values: Vec<String>) -> Self {
        ParameterValue::List(values)
    }
}

/// Named parameters sent along with the main query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParameters(BTreeMap<String, ParameterValue>);

impl SearchParameters {
    pub fn new() -> Self {
        SearchParameters::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ParameterValue> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &ParameterValue) -> bool,
    {
        self.0.retain(|name, value| keep(name, value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Flattens the parameters into `(name, value)` pairs, as they go into
    /// a query string. A list value yields one pair per element.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .flat_map(|(name, value)| match value {
                ParameterValue::List(values) => values
                    .iter()
                    .map(|v| (name.clone(), v.clone()))
                    .collect::<Vec<_>>(),
                other => vec![(name.clone(), other.to_string())],
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for SearchParameters
where
    K: Into<String>,
    V: Into<ParameterValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        SearchParameters(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
