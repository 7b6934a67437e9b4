//! Forward-only cursor over a query result.

use futures::stream::{BoxStream, StreamExt};
use sqlx::any::AnyRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::collections::HashMap;

use crate::error::QuillResult;
use crate::value::{FromValue, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Active,
    Exhausted,
    Disposed,
}

/// Streams rows from a [`Connection`](super::Connection) one at a time.
///
/// The reader borrows its connection mutably, so no other statement can run
/// on that connection until the reader is dropped or disposed.
pub struct DataReader<'a> {
    stream: Option<BoxStream<'a, Result<AnyRow, sqlx::Error>>>,
    pending: Option<AnyRow>,
    row: Option<Vec<(String, Value)>>,
    state: ReaderState,
}

impl<'a> DataReader<'a> {
    /// Wrap `stream`, pulling the first row so statement errors surface now.
    pub(crate) async fn open(
        mut stream: BoxStream<'a, Result<AnyRow, sqlx::Error>>,
    ) -> QuillResult<DataReader<'a>> {
        let first = stream.next().await.transpose()?;
        let state = if first.is_some() {
            ReaderState::Active
        } else {
            ReaderState::Exhausted
        };
        Ok(Self {
            stream: first.as_ref().map(|_| stream),
            pending: first,
            row: None,
            state,
        })
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Advance to the next row. Returns `false` once the result is exhausted
    /// or the reader disposed, and keeps returning `false` afterwards.
    pub async fn read(&mut self) -> QuillResult<bool> {
        if self.state != ReaderState::Active {
            self.row = None;
            return Ok(false);
        }

        let next = match self.pending.take() {
            Some(row) => Some(row),
            None => match self.stream.as_mut() {
                Some(stream) => match stream.next().await.transpose() {
                    Ok(row) => row,
                    Err(e) => {
                        self.finish(ReaderState::Exhausted);
                        return Err(e.into());
                    }
                },
                None => None,
            },
        };

        match next {
            Some(row) => {
                self.row = Some(decode_row(&row)?);
                Ok(true)
            }
            None => {
                self.finish(ReaderState::Exhausted);
                Ok(false)
            }
        }
    }

    /// Read `field` from the current row, or `default` when the column is
    /// missing, `NULL`, or cannot be coerced to `T`.
    pub fn get<T: FromValue>(&self, field: &str, default: T) -> T {
        self.value(field).and_then(T::from_value).unwrap_or(default)
    }

    /// Raw value of `field` in the current row.
    pub fn value(&self, field: &str) -> Option<&Value> {
        self.row
            .as_ref()?
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Column names of the current row.
    pub fn columns(&self) -> Vec<&str> {
        self.row
            .iter()
            .flatten()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn to_map(&self) -> HashMap<String, Value> {
        self.row.iter().flatten().cloned().collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .row
            .iter()
            .flatten()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        serde_json::Value::Object(map)
    }

    /// Release the result. Safe to call more than once.
    pub fn dispose(&mut self) {
        self.finish(ReaderState::Disposed);
    }

    fn finish(&mut self, state: ReaderState) {
        self.stream = None;
        self.pending = None;
        self.row = None;
        if self.state != ReaderState::Disposed {
            self.state = state;
        }
    }
}

/// Decode every column of `row`.
///
/// Expression columns (`COUNT(*)`, `MAX(id)`) carry no declared type, so
/// dispatch goes by the type of each value rather than of its column.
pub(crate) fn decode_row(row: &AnyRow) -> QuillResult<Vec<(String, Value)>> {
    let mut values = Vec::with_capacity(row.columns().len());
    for (i, column) in row.columns().iter().enumerate() {
        let name = column.name().to_string();
        let raw = row.try_get_raw(i)?;
        if raw.is_null() {
            values.push((name, Value::Null));
            continue;
        }

        let type_info = raw.type_info();
        let value = match type_info.name() {
            "BOOLEAN" => Value::Bool(row.try_get::<bool, _>(i)?),
            "SMALLINT" => Value::Int(row.try_get::<i16, _>(i)?.into()),
            "INTEGER" => Value::Int(row.try_get::<i32, _>(i)?.into()),
            "BIGINT" => Value::Int(row.try_get::<i64, _>(i)?),
            "REAL" => Value::Float(row.try_get::<f32, _>(i)?.into()),
            "DOUBLE" => Value::Float(row.try_get::<f64, _>(i)?),
            "BLOB" => Value::Bytes(row.try_get::<Vec<u8>, _>(i)?),
            _ => Value::String(row.try_get::<String, _>(i)?),
        };
        values.push((name, value));
    }
    Ok(values)
}
