use uuid::Uuid;

/// A named operation as the playground stores it: GraphQL source text plus
/// the raw JSON text of its variables, headers and extensions.
///
/// `query` is never kept parsed. Every edit goes through the text.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Operation {
    pub id: Uuid,
    pub name: String,
    pub query: String,
    #[serde(default)]
    pub variables: String,
    #[serde(default)]
    pub headers: String,
    #[serde(default)]
    pub extensions: String,
}
impl Operation {
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            query: query.into(),
            variables: String::new(),
            headers: String::new(),
            extensions: String::new(),
        }
    }

    /// Subscriptions are recognized by the literal leading keyword, the same
    /// way the printed form of a subscription document always starts.
    pub fn is_subscription(&self) -> bool {
        self.query.starts_with("subscription")
    }
}
