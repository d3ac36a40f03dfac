use std::fmt;
use std::str::FromStr;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{Error, Result, ValidationError};

/// Collections that can be exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportCollection {
    Accounts,
    Ledger,
    Stocks,
    MutualFunds,
    Bonds,
    Transactions,
    Fno,
    Goals,
    Transfers,
}

impl ExportCollection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ExportCollection::Accounts => "accounts",
            ExportCollection::Ledger => "ledger",
            ExportCollection::Stocks => "stocks",
            ExportCollection::MutualFunds => "mutual-funds",
            ExportCollection::Bonds => "bonds",
            ExportCollection::Transactions => "transactions",
            ExportCollection::Fno => "fno",
            ExportCollection::Goals => "goals",
            ExportCollection::Transfers => "transfers",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for ExportCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportCollection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "accounts" => Ok(ExportCollection::Accounts),
            "ledger" => Ok(ExportCollection::Ledger),
            "stocks" => Ok(ExportCollection::Stocks),
            "mutual-funds" | "mutual_funds" => Ok(ExportCollection::MutualFunds),
            "bonds" => Ok(ExportCollection::Bonds),
            "transactions" => Ok(ExportCollection::Transactions),
            "fno" => Ok(ExportCollection::Fno),
            "goals" => Ok(ExportCollection::Goals),
            "transfers" => Ok(ExportCollection::Transfers),
            other => Err(Error::Validation(ValidationError::invalid(format!(
                "Unknown export collection '{}'",
                other
            )))),
        }
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Renders rows as CSV text.
///
/// The header is `headers` when given, otherwise the keys of the first row
/// in insertion order. Missing and null values render empty. Empty input
/// renders as an empty string; records are joined with `\n` and no
/// terminator follows the last one.
pub fn rows_to_csv(rows: &[Map<String, Value>], headers: Option<&[&str]>) -> Result<String> {
    let Some(first) = rows.first() else {
        return Ok(String::new());
    };
    let columns: Vec<String> = match headers {
        Some(headers) => headers.iter().map(|h| h.to_string()).collect(),
        None => first.keys().cloned().collect(),
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_line(&columns)?);
    for row in rows {
        let cells: Vec<String> = columns.iter().map(|c| cell(row.get(c))).collect();
        lines.push(render_line(&cells)?);
    }
    Ok(lines.join("\n"))
}

/// Renders one record without its terminator.
fn render_line(fields: &[String]) -> Result<String> {
    // The csv writer quotes a lone empty field as `""`.
    if let [only] = fields {
        if only.is_empty() {
            return Ok(String::new());
        }
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    let line = String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))?;
    Ok(line.strip_suffix('\n').unwrap_or(&line).to_string())
}

/// Serializes `items` to JSON objects and renders them with [`rows_to_csv`].
pub fn to_csv<T: Serialize>(items: &[T], headers: Option<&[&str]>) -> Result<String> {
    let rows = items
        .iter()
        .map(|item| match serde_json::to_value(item)? {
            Value::Object(map) => Ok(map),
            other => Err(Error::Export(format!("Expected an object row, got {}", other))),
        })
        .collect::<Result<Vec<_>>>()?;
    rows_to_csv(&rows, headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_empty_rows_render_empty() {
        assert_eq!(rows_to_csv(&[], None).unwrap(), "");
    }

    #[test]
    fn test_header_follows_first_row_key_order() {
        let rows = vec![row(json!({"name": "Savings", "balance": 100, "active": true}))];
        assert_eq!(
            rows_to_csv(&rows, None).unwrap(),
            "name,balance,active\nSavings,100,true"
        );
    }

    #[test]
    fn test_values_with_commas_and_quotes_are_quoted() {
        let rows = vec![
            row(json!({"note": "hello, world"})),
            row(json!({"note": "say \"hi\""})),
            row(json!({"note": "two\nlines"})),
        ];
        assert_eq!(
            rows_to_csv(&rows, None).unwrap(),
            "note\n\"hello, world\"\n\"say \"\"hi\"\"\"\n\"two\nlines\""
        );
    }

    #[test]
    fn test_explicit_headers_select_columns_and_nulls_are_empty() {
        let rows = vec![
            row(json!({"a": 1, "b": null, "c": "x"})),
            row(json!({"a": 2, "c": "y"})),
        ];
        assert_eq!(
            rows_to_csv(&rows, Some(&["c", "b"])).unwrap(),
            "c,b\nx,\ny,"
        );
    }

    #[test]
    fn test_single_column_nulls_render_as_blank_lines() {
        let rows = vec![
            row(json!({"a": null})),
            row(json!({"a": "x"})),
            row(json!({"a": ""})),
            row(json!({"a": "y"})),
        ];
        assert_eq!(rows_to_csv(&rows, None).unwrap(), "a\n\nx\n\ny");
    }

    #[test]
    fn test_export_collection_names() {
        assert_eq!(
            "mutual-funds".parse::<ExportCollection>().unwrap(),
            ExportCollection::MutualFunds
        );
        assert!("crypto".parse::<ExportCollection>().is_err());
    }
}
