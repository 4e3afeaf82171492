use crate::operation::OperationKind;
use crate::operation::UnknownOperationKind;
use std::fmt;
use std::str::FromStr;

/// A parsed path: the operation kind followed by field names descending
/// through nested selection sets.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FieldPath {
    kind: OperationKind,
    segments: Vec<String>,
}
impl FieldPath {
    pub fn new(kind: OperationKind, segments: Vec<String>) -> Self {
        Self { kind, segments }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// The field names after the operation kind. Empty for a bare
    /// `query`/`mutation`/`subscription` path.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn child(&self, field_name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field_name.to_string());
        Self::new(self.kind, segments)
    }
}
impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        for segment in &self.segments {
            write!(f, ".{segment}")?;
        }
        Ok(())
    }
}
impl FromStr for FieldPath {
    type Err = FieldPathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let kind = parts.next().unwrap_or_default().parse::<OperationKind>()?;
        let segments = parts.map(str::to_string).collect::<Vec<_>>();
        if segments.iter().any(String::is_empty) {
            return Err(FieldPathParseError::EmptySegment(s.to_string()));
        }
        Ok(Self { kind, segments })
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FieldPathParseError {
    #[error("field path `{0}` contains an empty segment")]
    EmptySegment(String),

    #[error(transparent)]
    UnknownOperationKind(#[from] UnknownOperationKind),
}
