use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel upstream uses when a measurement is not available.
pub const UNKNOWN: &str = "unknown";

/// Sortable attribute of a record.
///
/// The raw upstream string is kept so it can be written back out verbatim.
/// Classification happens once, when the attribute is built, and is never
/// repeated while sorting. Only whole non-negative integers are comparable;
/// "172.5" or "1,358" are kept as unknown rather than truncated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Attribute {
    Known { value: u64, raw: String },
    Unknown(String),
}

impl Attribute {
    pub fn parse<S: Into<String>>(raw: S) -> Self {
        let raw = raw.into();
        if raw == UNKNOWN {
            return Attribute::Unknown(raw);
        }
        match raw.trim().parse::<u64>() {
            Ok(value) => Attribute::Known { value, raw },
            Err(_) => Attribute::Unknown(raw),
        }
    }

    /// Numeric value, or `None` when the attribute is not comparable.
    pub fn value(&self) -> Option<u64> {
        match self {
            Attribute::Known { value, .. } => Some(*value),
            Attribute::Unknown(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Attribute::Known { .. })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Attribute::Known { raw, .. } | Attribute::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Attribute {
    fn from(raw: String) -> Self {
        Attribute::parse(raw)
    }
}

impl From<&str> for Attribute {
    fn from(raw: &str) -> Self {
        Attribute::parse(raw)
    }
}

impl From<Attribute> for String {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Known { raw, .. } | Attribute::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized upstream entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub attribute: Attribute,
    pub category: String,
}

impl Record {
    pub fn new<N, A, C>(name: N, attribute: A, category: C) -> Self
    where
        N: Into<String>,
        A: Into<Attribute>,
        C: Into<String>,
    {
        Record {
            name: name.into(),
            attribute: attribute.into(),
            category: category.into(),
        }
    }
}

/// A record with its category projected away.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedRecord {
    pub name: String,
    pub attribute: Attribute,
}

impl CategorizedRecord {
    pub fn new<N, A>(name: N, attribute: A) -> Self
    where
        N: Into<String>,
        A: Into<Attribute>,
    {
        CategorizedRecord {
            name: name.into(),
            attribute: attribute.into(),
        }
    }
}

impl From<&Record> for CategorizedRecord {
    fn from(record: &Record) -> Self {
        CategorizedRecord {
            name: record.name.clone(),
            attribute: record.attribute.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub records: Vec<CategorizedRecord>,
}
