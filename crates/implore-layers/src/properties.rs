//! Per-point property table
//!
//! Properties are named columns of per-point annotations. A column is either
//! categorical (strings) or continuous (numbers); the kind is fixed when the
//! column is ingested and mixed input is rejected.
//!
//! Alongside the columns the table keeps the *current properties*: one value
//! per column that is given to the next added point.

use std::collections::BTreeSet;
use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::array::remove_items;
use crate::error::{LayerResult, ValueError};

/// Kind of values stored in a property column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// String labels
    Categorical,
    /// Numbers
    Continuous,
}

impl PropertyKind {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Categorical => "categorical",
            PropertyKind::Continuous => "continuous",
        }
    }

    /// Value given to new points of a column that has no current value
    pub fn fill_value(&self) -> PropertyValue {
        match self {
            PropertyKind::Categorical => PropertyValue::Categorical(String::new()),
            PropertyKind::Continuous => PropertyValue::Continuous(0.0),
        }
    }
}

/// A single property value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Categorical(String),
    Continuous(f64),
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Categorical(_) => PropertyKind::Categorical,
            PropertyValue::Continuous(_) => PropertyKind::Continuous,
        }
    }

    /// Try to extract as a string label
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Categorical(s) => Some(s),
            PropertyValue::Continuous(_) => None,
        }
    }

    /// Try to extract as a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Continuous(v) => Some(*v),
            PropertyValue::Categorical(_) => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Categorical(s) => f.write_str(s),
            PropertyValue::Continuous(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Categorical(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Categorical(s)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Continuous(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Continuous(v as f64)
    }
}

/// A typed column of per-point values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyColumn {
    Categorical(Vec<String>),
    Continuous(Vec<f64>),
}

impl PropertyColumn {
    /// Ingest loosely typed values, rejecting a mix of labels and numbers
    pub fn from_values(name: &str, values: Vec<PropertyValue>) -> LayerResult<Self> {
        let mixed = || ValueError::MixedPropertyTypes {
            name: name.to_string(),
        };

        match values.first().map(PropertyValue::kind) {
            Some(PropertyKind::Categorical) => values
                .into_iter()
                .map(|v| match v {
                    PropertyValue::Categorical(s) => Ok(s),
                    PropertyValue::Continuous(_) => Err(mixed().into()),
                })
                .collect::<LayerResult<Vec<_>>>()
                .map(PropertyColumn::Categorical),
            Some(PropertyKind::Continuous) | None => values
                .into_iter()
                .map(|v| match v {
                    PropertyValue::Continuous(x) => Ok(x),
                    PropertyValue::Categorical(_) => Err(mixed().into()),
                })
                .collect::<LayerResult<Vec<_>>>()
                .map(PropertyColumn::Continuous),
        }
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyColumn::Categorical(_) => PropertyKind::Categorical,
            PropertyColumn::Continuous(_) => PropertyKind::Continuous,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PropertyColumn::Categorical(v) => v.len(),
            PropertyColumn::Continuous(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at a row
    pub fn get(&self, index: usize) -> Option<PropertyValue> {
        match self {
            PropertyColumn::Categorical(v) => v.get(index).cloned().map(PropertyValue::Categorical),
            PropertyColumn::Continuous(v) => v.get(index).copied().map(PropertyValue::Continuous),
        }
    }

    /// All values in row order
    pub fn values(&self) -> Vec<PropertyValue> {
        (0..self.len()).filter_map(|i| self.get(i)).collect()
    }

    pub fn as_categorical(&self) -> Option<&[String]> {
        match self {
            PropertyColumn::Categorical(v) => Some(v),
            PropertyColumn::Continuous(_) => None,
        }
    }

    pub fn as_continuous(&self) -> Option<&[f64]> {
        match self {
            PropertyColumn::Continuous(v) => Some(v),
            PropertyColumn::Categorical(_) => None,
        }
    }

    /// (min, max) over the finite values of a continuous column
    pub fn range(&self) -> Option<(f64, f64)> {
        let values = self.as_continuous()?;
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    fn empty_like(&self) -> Self {
        match self {
            PropertyColumn::Categorical(_) => PropertyColumn::Categorical(Vec::new()),
            PropertyColumn::Continuous(_) => PropertyColumn::Continuous(Vec::new()),
        }
    }

    /// Append `count` copies of a value; false if the value has the wrong kind
    fn push_repeated(&mut self, value: &PropertyValue, count: usize) -> bool {
        match (self, value) {
            (PropertyColumn::Categorical(v), PropertyValue::Categorical(s)) => {
                v.extend(std::iter::repeat(s.clone()).take(count));
                true
            }
            (PropertyColumn::Continuous(v), PropertyValue::Continuous(x)) => {
                v.extend(std::iter::repeat(*x).take(count));
                true
            }
            _ => false,
        }
    }

    fn set(&mut self, index: usize, value: &PropertyValue) -> bool {
        match (self, value) {
            (PropertyColumn::Categorical(v), PropertyValue::Categorical(s)) if index < v.len() => {
                v[index] = s.clone();
                true
            }
            (PropertyColumn::Continuous(v), PropertyValue::Continuous(x)) if index < v.len() => {
                v[index] = *x;
                true
            }
            _ => false,
        }
    }

    fn extend_from(&mut self, other: &PropertyColumn) -> bool {
        match (self, other) {
            (PropertyColumn::Categorical(v), PropertyColumn::Categorical(o)) => {
                v.extend_from_slice(o);
                true
            }
            (PropertyColumn::Continuous(v), PropertyColumn::Continuous(o)) => {
                v.extend_from_slice(o);
                true
            }
            _ => false,
        }
    }

    fn remove_rows(&mut self, removed: &BTreeSet<usize>) {
        match self {
            PropertyColumn::Categorical(v) => remove_items(v, removed),
            PropertyColumn::Continuous(v) => remove_items(v, removed),
        }
    }

    fn truncate(&mut self, n: usize) {
        match self {
            PropertyColumn::Categorical(v) => v.truncate(n),
            PropertyColumn::Continuous(v) => v.truncate(n),
        }
    }

    fn take(&self, indices: &[usize]) -> Self {
        match self {
            PropertyColumn::Categorical(v) => {
                PropertyColumn::Categorical(indices.iter().map(|&i| v[i].clone()).collect())
            }
            PropertyColumn::Continuous(v) => {
                PropertyColumn::Continuous(indices.iter().map(|&i| v[i]).collect())
            }
        }
    }
}

impl From<Vec<&str>> for PropertyColumn {
    fn from(values: Vec<&str>) -> Self {
        PropertyColumn::Categorical(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for PropertyColumn {
    fn from(values: Vec<String>) -> Self {
        PropertyColumn::Categorical(values)
    }
}

impl From<Vec<f64>> for PropertyColumn {
    fn from(values: Vec<f64>) -> Self {
        PropertyColumn::Continuous(values)
    }
}

impl From<Vec<i64>> for PropertyColumn {
    fn from(values: Vec<i64>) -> Self {
        PropertyColumn::Continuous(values.into_iter().map(|v| v as f64).collect())
    }
}

impl From<Array1<f64>> for PropertyColumn {
    fn from(values: Array1<f64>) -> Self {
        PropertyColumn::Continuous(values.to_vec())
    }
}

/// One value per property column, in column order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyRow(Vec<(String, PropertyValue)>);

impl PropertyRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Set a value, replacing any existing value for the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>, V: Into<PropertyValue>> FromIterator<(S, V)> for PropertyRow {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut row = PropertyRow::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

/// Columnar store of per-point properties
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyTable {
    columns: Vec<(String, PropertyColumn)>,
    current: PropertyRow,
}

impl PropertyTable {
    /// Create an empty table with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table for `n_points` points.
    ///
    /// With `n_points == 0` the columns only supply defaults: the first value of
    /// each column becomes the current row and the table starts with zero rows.
    /// An empty column is accepted and defaults to its kind's fill value.
    /// Otherwise every column must have exactly `n_points` values and the
    /// current row is the last row.
    pub fn from_columns(
        columns: Vec<(String, PropertyColumn)>,
        n_points: usize,
    ) -> LayerResult<Self> {
        let mut seen = BTreeSet::new();
        for (name, column) in &columns {
            if !seen.insert(name.as_str()) {
                return Err(ValueError::DuplicateProperty { name: name.clone() }.into());
            }
            if n_points > 0 && column.len() != n_points {
                return Err(ValueError::PropertyLength {
                    name: name.clone(),
                    expected: n_points,
                    actual: column.len(),
                }
                .into());
            }
        }

        let current_index = if n_points == 0 { 0 } else { n_points - 1 };
        let current = columns
            .iter()
            .map(|(name, column)| {
                let value = column
                    .get(current_index)
                    .unwrap_or_else(|| column.kind().fill_value());
                (name.clone(), value)
            })
            .collect();

        let columns = if n_points == 0 {
            columns
                .into_iter()
                .map(|(name, column)| {
                    let empty = column.empty_like();
                    (name, empty)
                })
                .collect()
        } else {
            columns
        };

        Ok(Self { columns, current })
    }

    /// Whether the table has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn first_name(&self) -> Option<&str> {
        self.names().next()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&PropertyColumn> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn columns(&self) -> &[(String, PropertyColumn)] {
        &self.columns
    }

    /// Values of every column at `index`
    pub fn row(&self, index: usize) -> PropertyRow {
        self.columns
            .iter()
            .filter_map(|(name, column)| column.get(index).map(|v| (name.clone(), v)))
            .collect()
    }

    /// The row given to the next added point
    pub fn current(&self) -> &PropertyRow {
        &self.current
    }

    /// Value of `name` in the current row
    pub fn default_value(&self, name: &str) -> Option<&PropertyValue> {
        self.current.get(name)
    }

    /// Merge `row` into the current row and write it into every selected point
    pub(crate) fn set_current(
        &mut self,
        row: PropertyRow,
        selected: &BTreeSet<usize>,
    ) -> LayerResult<()> {
        for (name, value) in row.iter() {
            let column = self.column(name).ok_or_else(|| ValueError::UnknownProperty {
                name: name.to_string(),
            })?;
            if column.kind() != value.kind() {
                return Err(ValueError::PropertyValueType {
                    name: name.to_string(),
                    expected: column.kind().name().to_string(),
                }
                .into());
            }
        }

        for (name, value) in row.iter() {
            self.current.insert(name, value.clone());
            if let Some((_, column)) = self.columns.iter_mut().find(|(n, _)| n == name) {
                for &index in selected {
                    column.set(index, value);
                }
            }
        }
        Ok(())
    }

    /// Make row `index` the current row
    pub(crate) fn select_current(&mut self, index: usize) {
        let row = self.row(index);
        if !row.is_empty() {
            self.current = row;
        }
    }

    pub(crate) fn set_value(
        &mut self,
        name: &str,
        index: usize,
        value: PropertyValue,
    ) -> LayerResult<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| ValueError::UnknownProperty {
                name: name.to_string(),
            })?;
        if column.kind() != value.kind() {
            return Err(ValueError::PropertyValueType {
                name: name.to_string(),
                expected: column.kind().name().to_string(),
            }
            .into());
        }
        if !column.set(index, &value) {
            return Err(ValueError::SelectionOutOfRange {
                index,
                len: column.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Append the current row `n` times
    pub(crate) fn on_points_added(&mut self, n: usize) {
        for (name, column) in &mut self.columns {
            let value = current_or_fill(&self.current, name, column);
            column.push_repeated(&value, n);
        }
    }

    /// Append `n` rows taken from `rows`; columns missing from `rows` (or of a
    /// different kind) receive the current value instead
    pub(crate) fn append_columns(&mut self, rows: &[(String, PropertyColumn)], n: usize) {
        for (name, column) in &mut self.columns {
            let copied = rows
                .iter()
                .find(|(other, c)| other == name && c.len() == n)
                .map(|(_, c)| column.extend_from(c))
                .unwrap_or(false);
            if !copied {
                let value = current_or_fill(&self.current, name, column);
                column.push_repeated(&value, n);
            }
        }
    }

    pub(crate) fn on_points_removed(&mut self, removed: &BTreeSet<usize>) {
        for (_, column) in &mut self.columns {
            column.remove_rows(removed);
        }
    }

    pub(crate) fn truncate(&mut self, n: usize) {
        for (_, column) in &mut self.columns {
            column.truncate(n);
        }
    }

    /// Copy the given rows of every column
    pub(crate) fn take_rows(&self, indices: &[usize]) -> Vec<(String, PropertyColumn)> {
        self.columns
            .iter()
            .map(|(name, column)| (name.clone(), column.take(indices)))
            .collect()
    }
}

/// The current value of a column, or its kind's fill value when the current
/// row has none of the right kind
fn current_or_fill(current: &PropertyRow, name: &str, column: &PropertyColumn) -> PropertyValue {
    current
        .get(name)
        .filter(|v| v.kind() == column.kind())
        .cloned()
        .unwrap_or_else(|| column.kind().fill_value())
}
