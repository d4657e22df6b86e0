//! Flat `key=value` text, one property per line.
//!
//! Keys are case-insensitive (lower-cased on read and write) and surrounding
//! whitespace is trimmed.  Lines without `=` are ignored.

use super::Value;

#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: Value,
}

impl Property {
    pub fn new(name: &str, value: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

pub fn read_properties(text: &str) -> Vec<Property> {
    text.lines()
        .filter_map(|line| {
            let (name, value) = line.split_once('=')?;
            Some(Property {
                name: name.trim().to_lowercase(),
                value: Value::from(value.trim()),
            })
        })
        .collect()
}

pub fn write_properties(properties: &[Property]) -> String {
    let mut out = String::new();
    for property in properties {
        out.push_str(&property.name.to_lowercase());
        out.push('=');
        out.push_str(property.value.as_str());
        out.push('\n');
    }
    out
}
