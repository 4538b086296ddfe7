use url::form_urlencoded;

use crate::domain::model::error::Error;

/// A type request parameters can be converted into.
///
/// `TYPE_NAME` is the name the user sees when the conversion fails.
pub trait ParameterType: Sized {
    const TYPE_NAME: &'static str;

    fn parse_parameter(raw: &str) -> Option<Self>;
}

impl ParameterType for String {
    const TYPE_NAME: &'static str = "str";

    fn parse_parameter(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl ParameterType for f64 {
    const TYPE_NAME: &'static str = "float";

    fn parse_parameter(raw: &str) -> Option<Self> {
        raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

macro_rules! integer_parameter_type {
    ($($ty:ty),*) => {
        $(
            impl ParameterType for $ty {
                const TYPE_NAME: &'static str = "int";

                fn parse_parameter(raw: &str) -> Option<Self> {
                    raw.trim().parse::<$ty>().ok()
                }
            }
        )*
    };
}

integer_parameter_type!(i32, i64, u32);

/// The raw parameters of a request, in the order they were given.
///
/// Nothing is sanitized here: values only get converted into the requested
/// type. A parameter given more than once keeps all its values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParameters(Vec<(String, String)>);

impl RequestParameters {
    pub fn from_query_string(query_string: &str) -> Self {
        RequestParameters(
            form_urlencoded::parse(query_string.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }

    fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The value of an optional parameter. When given more than once, the
    /// last value counts.
    pub fn get<T: ParameterType>(&self, name: &str) -> Result<Option<T>, Error> {
        self.values(name)
            .last()
            .map(|raw| convert(name, raw))
            .transpose()
    }

    pub fn get_or<T: ParameterType>(&self, name: &str, default: T) -> Result<T, Error> {
        Ok(self.get(name)?.unwrap_or(default))
    }

    pub fn require<T: ParameterType>(&self, name: &str) -> Result<T, Error> {
        self.get(name)?.ok_or_else(|| Error::MissingParameter {
            name: name.to_string(),
        })
    }

    /// All values of a repeatable parameter. A single value that cannot be
    /// converted fails the whole list.
    pub fn get_list<T: ParameterType>(&self, name: &str) -> Result<Vec<T>, Error> {
        self.values(name).map(|raw| convert(name, raw)).collect()
    }

    pub fn require_list<T: ParameterType>(&self, name: &str) -> Result<Vec<T>, Error> {
        if !self.contains(name) {
            return Err(Error::MissingParameter {
                name: name.to_string(),
            });
        }
        self.get_list(name)
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RequestParameters(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

fn convert<T: ParameterType>(name: &str, raw: &str) -> Result<T, Error> {
    T::parse_parameter(raw).ok_or_else(|| Error::InvalidParameterFormat {
        name: name.to_string(),
        expected_type: T::TYPE_NAME,
    })
}
