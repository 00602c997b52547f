//! Deduplication of raw table rows into institutions.
//!
//! Rows sharing a `(name, city, state)` key collapse into one institution.
//! Identity text comes from the first row of the group and every numeric
//! column is averaged. Groups keep the order of their first row.

use std::collections::HashMap;

use collegiate_core::{Category, CategoryShares, Demographic, FieldOfStudy, Institution};
use csv::{StringRecord, StringRecordsIter};
use geo::Coord;

use super::{DatasetError, DatasetSchema};

/// Header positions of the columns the loader reads.
#[derive(Debug)]
pub(super) struct ColumnIndex {
    key: [usize; 3],
    numeric: Vec<(String, usize)>,
}

impl ColumnIndex {
    pub(super) fn resolve(headers: &StringRecord, schema: &DatasetSchema) -> Result<Self, DatasetError> {
        let position = |column: &str| {
            headers
                .iter()
                .position(|header| header.trim() == column)
                .ok_or_else(|| DatasetError::MissingColumn {
                    column: column.to_owned(),
                })
        };
        let [name, city, state] = schema.key_columns();
        let key = [position(name)?, position(city)?, position(state)?];
        let numeric = schema
            .numeric_columns()
            .map(|column| position(column).map(|index| (column.to_owned(), index)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { key, numeric })
    }
}

#[derive(Debug)]
struct Group {
    name: String,
    city: String,
    state: String,
    sums: Vec<f64>,
    count: u32,
}

#[derive(Debug, Default)]
pub(super) struct DedupAccumulator {
    groups: Vec<Group>,
    by_key: HashMap<(String, String, String), usize>,
    rows: usize,
}

impl DedupAccumulator {
    pub(super) fn consume<R: std::io::Read>(
        &mut self,
        records: StringRecordsIter<'_, R>,
        columns: &ColumnIndex,
    ) -> Result<(), DatasetError> {
        for record in records {
            let record = record.map_err(|source| DatasetError::Read { source })?;
            self.push(&record, columns)?;
        }
        Ok(())
    }

    pub(super) const fn rows(&self) -> usize {
        self.rows
    }

    fn push(&mut self, record: &StringRecord, columns: &ColumnIndex) -> Result<(), DatasetError> {
        let line = record.position().map_or(0, csv::Position::line);
        let [name, city, state] = columns
            .key
            .map(|index| record.get(index).unwrap_or_default().trim().to_owned());
        let values = columns
            .numeric
            .iter()
            .map(|(column, index)| parse_number(record.get(*index), column, line))
            .collect::<Result<Vec<f64>, _>>()?;
        self.rows += 1;

        let key = (name, city, state);
        if let Some(group) = self.by_key.get(&key).and_then(|&at| self.groups.get_mut(at)) {
            group.absorb(&values);
            return Ok(());
        }
        self.by_key.insert(key.clone(), self.groups.len());
        let (name, city, state) = key;
        self.groups.push(Group {
            name,
            city,
            state,
            sums: values,
            count: 1,
        });
        Ok(())
    }

    pub(super) fn finish(self, schema: &DatasetSchema) -> Vec<Institution> {
        self.groups
            .into_iter()
            .map(|group| group.into_institution(schema))
            .collect()
    }
}

impl Group {
    #[expect(
        clippy::float_arithmetic,
        reason = "duplicate rows are summed before averaging"
    )]
    fn absorb(&mut self, values: &[f64]) {
        for (sum, value) in self.sums.iter_mut().zip(values) {
            *sum += value;
        }
        self.count += 1;
    }

    #[expect(clippy::float_arithmetic, reason = "numeric columns are averaged")]
    fn into_institution(self, schema: &DatasetSchema) -> Institution {
        let count = f64::from(self.count);
        let mut means = self.sums.into_iter().map(|sum| sum / count);
        let latitude = means.next().unwrap_or_default();
        let longitude = means.next().unwrap_or_default();
        let mut institution = Institution::new(
            self.name,
            self.city,
            self.state,
            Coord {
                x: longitude,
                y: latitude,
            },
        );
        for feature in &schema.features {
            if let Some(value) = means.next() {
                institution.features.insert(feature.clone(), value);
            }
        }
        institution.field_of_study = CategoryShares::new(
            FieldOfStudy::ALL
                .iter()
                .copied()
                .zip(means.by_ref().take(FieldOfStudy::ALL.len())),
        );
        institution.demographic =
            CategoryShares::new(Demographic::ALL.iter().copied().zip(means));
        institution
    }
}

fn parse_number(cell: Option<&str>, column: &str, line: u64) -> Result<f64, DatasetError> {
    let raw = cell.unwrap_or_default().trim();
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| DatasetError::InvalidNumber {
            line,
            column: column.to_owned(),
            value: raw.to_owned(),
        })
}
