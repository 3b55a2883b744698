use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{DatasetError, ParseError};

/// One parsed data row: header→value pairs in header order. The header row of
/// each parse defines the schema, so unknown headers carry through verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

// JSON objects keep header order; serde_json's default map would sort keys.
impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A parsed dataset: the header list plus its rows, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Serialize back to delimited text. Values containing the delimiter or a
    /// newline will not round-trip; the format has no quoting.
    pub fn to_text(&self) -> String {
        let mut out = self.headers.join(",");
        out.push('\n');
        for row in &self.rows {
            let values: Vec<&str> = self
                .headers
                .iter()
                .map(|header| row.value(header))
                .collect();
            out.push_str(&values.join(","));
            out.push('\n');
        }
        out
    }
}

/// Parse comma-delimited text: first non-empty line is the header row, data
/// rows split positionally, short rows pad with empty strings. Quoting of the
/// delimiter is not supported.
pub fn parse(text: &str) -> Result<Table, ParseError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(ParseError::MissingHeader)?;
    let headers: Vec<String> = header_line
        .split(',')
        .map(|name| name.trim().to_string())
        .collect();

    let rows = lines
        .map(|line| {
            let values: Vec<&str> = line.split(',').collect();
            let fields = headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = values.get(i).map(|v| v.trim()).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect();
            Row::new(fields)
        })
        .collect();

    Ok(Table { headers, rows })
}

/// Read and parse the dataset at `path`, fresh on every call.
pub fn load(path: &Path) -> Result<Table, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&text)?)
}
