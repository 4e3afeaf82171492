use std::fmt;
use std::str::FromStr;

/// The three GraphQL operation types. A [`FieldPath`](crate::FieldPath)
/// always starts with one of these.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Mutation,
    Query,
    Subscription,
}
impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mutation => "mutation",
            Self::Query => "query",
            Self::Subscription => "subscription",
        }
    }
}
impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
impl FromStr for OperationKind {
    type Err = UnknownOperationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mutation" => Ok(Self::Mutation),
            "query" => Ok(Self::Query),
            "subscription" => Ok(Self::Subscription),
            other => Err(UnknownOperationKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("`{0}` is not an operation kind (expected query, mutation or subscription)")]
pub struct UnknownOperationKind(pub String);
