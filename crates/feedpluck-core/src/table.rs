//! Tabular projection of JSON records.
//!
//! A [`TableSpec`] declares named columns, each a [`Path`] into a record, a
//! [`ColumnParser`] and the default handed to [`pluck_value`] when the path is
//! unreachable. [`project`] applies it to a list of records and keeps one
//! outcome per record, in input order. A column that fails to parse marks
//! only its own row as failed; what to do with failed rows is up to the
//! caller ([`Projection::into_complete`] or [`Projection::into_partial`]).

use std::collections::BTreeSet;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::json::JsonValue;
use crate::pluck::{pluck_value, Path};
use crate::{TableError, Timestamp};

/// One parsed field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Timestamp(Timestamp),
    Json(JsonValue),
}

impl Cell {
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub const fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }
}

/// How a plucked value becomes a [`Cell`].
#[derive(Debug, Clone)]
pub enum ColumnParser {
    /// RFC3339 string.
    Timestamp,
    /// Any finite JSON number.
    Number,
    /// JSON number with an exact `i64` value.
    Integer,
    Text,
    Bool,
    /// The value unchanged; `null` becomes [`Cell::Null`].
    Raw,
    /// `null` passes through as [`Cell::Null`], anything else goes to the inner parser.
    Nullable(Box<ColumnParser>),
    Custom(fn(&JsonValue) -> Result<Cell, String>),
}

impl ColumnParser {
    pub fn nullable(self) -> Self {
        Self::Nullable(Box::new(self))
    }

    pub fn parse(&self, value: &JsonValue) -> Result<Cell, String> {
        match self {
            Self::Nullable(_) | Self::Raw if value.is_null() => Ok(Cell::Null),
            Self::Nullable(inner) => inner.parse(value),
            Self::Raw => Ok(Cell::Json(value.clone())),
            Self::Custom(parse) => parse(value),
            Self::Timestamp => match value {
                JsonValue::String(text) => Timestamp::parse(text)
                    .map(Cell::Timestamp)
                    .map_err(|error| error.to_string()),
                other => Err(expected("RFC3339 timestamp string", other)),
            },
            Self::Number => value
                .as_f64()
                .filter(|number| number.is_finite())
                .map(Cell::Number)
                .ok_or_else(|| expected("number", value)),
            Self::Integer => value
                .as_i64()
                .map(Cell::Integer)
                .ok_or_else(|| expected("integer", value)),
            Self::Text => value
                .as_str()
                .map(|text| Cell::Text(text.to_owned()))
                .ok_or_else(|| expected("string", value)),
            Self::Bool => value
                .as_bool()
                .map(Cell::Bool)
                .ok_or_else(|| expected("boolean", value)),
        }
    }
}

fn expected(what: &str, found: &JsonValue) -> String {
    let kind = match found {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    };
    format!("expected {what}, found {kind}")
}

/// A named column.
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    path: Path,
    parser: ColumnParser,
    default: JsonValue,
}

impl Column {
    /// Column whose unreachable path plucks to `null`.
    pub fn new(name: impl Into<String>, path: Path, parser: ColumnParser) -> Self {
        Self {
            name: name.into(),
            path,
            parser,
            default: JsonValue::Null,
        }
    }

    pub fn with_default(mut self, default: JsonValue) -> Self {
        self.default = default;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Ordered, uniquely named columns.
#[derive(Debug, Clone)]
pub struct TableSpec {
    columns: Vec<Column>,
}

impl TableSpec {
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        if columns.is_empty() {
            return Err(TableError::NoColumns);
        }

        let mut seen = BTreeSet::new();
        for column in &columns {
            if column.name.is_empty() {
                return Err(TableError::EmptyColumnName);
            }
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }
        }

        Ok(Self { columns })
    }

    /// For column lists fixed in this crate and covered by its tests.
    pub(crate) fn from_trusted(columns: Vec<Column>) -> Self {
        debug_assert!(Self::new(columns.clone()).is_ok());
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }
}

/// One projected record: cells in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<(String, Cell)>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(name, cell)| (name.as_str(), cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, cell) in &self.cells {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

/// A record whose column could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("row {row}, column '{column}': {reason}")]
pub struct RowError {
    /// Position of the record in the input.
    pub row: usize,
    pub column: String,
    pub reason: String,
}

/// One outcome per input record, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    outcomes: Vec<Result<Row, RowError>>,
}

impl Projection {
    pub fn outcomes(&self) -> &[Result<Row, RowError>] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.outcomes.iter().filter_map(|outcome| outcome.as_ref().ok())
    }

    pub fn errors(&self) -> impl Iterator<Item = &RowError> {
        self.outcomes.iter().filter_map(|outcome| outcome.as_ref().err())
    }

    /// Every row, or the first failure.
    pub fn into_complete(self) -> Result<Vec<Row>, RowError> {
        self.outcomes.into_iter().collect()
    }

    /// Good rows and failures, each in input order.
    pub fn into_partial(self) -> (Vec<Row>, Vec<RowError>) {
        let mut rows = Vec::with_capacity(self.outcomes.len());
        let mut errors = Vec::new();
        for outcome in self.outcomes {
            match outcome {
                Ok(row) => rows.push(row),
                Err(error) => errors.push(error),
            }
        }
        (rows, errors)
    }

    pub fn into_outcomes(self) -> Vec<Result<Row, RowError>> {
        self.outcomes
    }
}

/// Project every record through `spec`.
pub fn project(records: &[JsonValue], spec: &TableSpec) -> Projection {
    let outcomes = records
        .iter()
        .enumerate()
        .map(|(index, record)| project_record(index, record, spec))
        .collect();

    Projection { outcomes }
}

fn project_record(index: usize, record: &JsonValue, spec: &TableSpec) -> Result<Row, RowError> {
    let cells = spec
        .columns
        .iter()
        .map(|column| {
            let value = pluck_value(record, &column.path, column.default.clone()).into_inner();
            column
                .parser
                .parse(&value)
                .map(|cell| (column.name.clone(), cell))
                .map_err(|reason| {
                    tracing::debug!(row = index, column = %column.name, %reason, "column parse failed");
                    RowError {
                        row: index,
                        column: column.name.clone(),
                        reason,
                    }
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Row { cells })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn path(text: &str) -> Path {
        text.parse().expect("valid path")
    }

    fn member_spec() -> TableSpec {
        TableSpec::new(vec![
            Column::new("name", path("member.nameFullTitle"), ColumnParser::Text)
                .with_default(json!("Unknown member")),
            Column::new("id", path("member.id"), ColumnParser::Integer.nullable()),
        ])
        .expect("valid spec")
    }

    #[test]
    fn defaults_fill_unreachable_paths() {
        let records = vec![
            json!({"member": {"nameFullTitle": "Lord Example", "id": 4321}}),
            json!({}),
        ];

        let rows = project(&records, &member_spec())
            .into_complete()
            .expect("all rows parse");

        assert_eq!(rows[0].get("name"), Some(&Cell::Text(String::from("Lord Example"))));
        assert_eq!(rows[0].get("id"), Some(&Cell::Integer(4321)));
        assert_eq!(rows[1].get("name"), Some(&Cell::Text(String::from("Unknown member"))));
        assert_eq!(rows[1].get("id"), Some(&Cell::Null));
    }

    #[test]
    fn parse_failure_is_reported_for_its_row_only() {
        let records = vec![
            json!({"member": {"nameFullTitle": "A", "id": "not a number"}}),
            json!({"member": {"nameFullTitle": "B", "id": 7}}),
        ];

        let projection = project(&records, &member_spec());
        assert_eq!(projection.len(), 2);

        let errors: Vec<&RowError> = projection.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row, 0);
        assert_eq!(errors[0].column, "id");
        assert_eq!(errors[0].reason, "expected integer, found string");
        assert_eq!(projection.rows().count(), 1);
    }

    #[test]
    fn spec_rejects_duplicate_and_empty_names() {
        let duplicate = TableSpec::new(vec![
            Column::new("a", path("x"), ColumnParser::Raw),
            Column::new("a", path("y"), ColumnParser::Raw),
        ]);
        assert_eq!(
            duplicate.expect_err("must fail"),
            TableError::DuplicateColumn {
                name: String::from("a")
            }
        );

        let empty = TableSpec::new(vec![Column::new("", path("x"), ColumnParser::Raw)]);
        assert_eq!(empty.expect_err("must fail"), TableError::EmptyColumnName);
        assert_eq!(TableSpec::new(Vec::new()).expect_err("must fail"), TableError::NoColumns);
    }

    #[test]
    fn rows_serialize_as_ordered_objects() {
        let records = vec![json!({"member": {"nameFullTitle": "Lord Example", "id": 4321}})];
        let rows = project(&records, &member_spec())
            .into_complete()
            .expect("row parses");

        assert_eq!(
            serde_json::to_string(&rows[0]).expect("serializable"),
            r#"{"name":"Lord Example","id":4321}"#
        );
    }

    #[test]
    fn number_parser_rejects_null_and_nullable_accepts_it() {
        assert!(ColumnParser::Number.parse(&JsonValue::Null).is_err());
        assert_eq!(
            ColumnParser::Number.nullable().parse(&JsonValue::Null),
            Ok(Cell::Null)
        );
        assert_eq!(ColumnParser::Number.parse(&json!(72)), Ok(Cell::Number(72.0)));
    }
}
