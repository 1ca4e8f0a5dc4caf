use serde_json::{Map, Value};

/// How a parameter appeared in the query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue<'a> {
    Missing,
    Single(&'a str),
    /// The key was given more than once
    Repeated,
}

/// Query string pairs exactly as the client sent them, order included
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn get(&self, name: &str) -> ParamValue<'_> {
        let mut values = self.pairs.iter().filter(|(k, _)| k == name).map(|(_, v)| v.as_str());
        match (values.next(), values.next()) {
            (None, _) => ParamValue::Missing,
            (Some(value), None) => ParamValue::Single(value),
            (Some(_), Some(_)) => ParamValue::Repeated,
        }
    }

    /// JSON object of every parameter in received order; repeated keys become arrays.
    ///
    /// Two requests only share a cache entry when they send the same
    /// parameters in the same order.
    pub fn cache_key(&self) -> String {
        let mut object = Map::new();
        for (key, value) in &self.pairs {
            match object.get_mut(key) {
                Some(Value::Array(values)) => values.push(Value::String(value.clone())),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(value.clone())]);
                }
                None => {
                    object.insert(key.clone(), Value::String(value.clone()));
                }
            }
        }
        Value::Object(object).to_string()
    }
}
