use indexmap::IndexMap;

/// Named string values substituted into operation text through `{{key}}`
/// placeholders. Created empty for a session, then replaced wholesale by the
/// environment a preflight run hands back.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Environment {
    #[serde(default)]
    pub variables: IndexMap<String, String>,
}
impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.variables.shift_remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            variables: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
