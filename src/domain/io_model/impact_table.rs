//! Impact tables: entities by indicators.

use nalgebra::{DMatrix, DVector};
use std::collections::HashSet;

use crate::domain::foundation::{AnalysisError, AxisIndex, AxisKey, ValidationError};

/// Entity × indicator values (footprints, or harmonized deltas).
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactTable {
    entities: AxisIndex,
    indicators: Vec<String>,
    values: DMatrix<f64>,
}

impl ImpactTable {
    /// Creates a table; `values` is entities × indicators.
    pub fn new(
        entities: AxisIndex,
        indicators: Vec<String>,
        values: DMatrix<f64>,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for name in &indicators {
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::duplicate_label("indicator", name.clone()));
            }
        }
        if values.shape() != (entities.len(), indicators.len()) {
            return Err(ValidationError::shape_mismatch(
                "impact table",
                (entities.len(), indicators.len()),
                values.shape(),
            ));
        }
        Ok(Self {
            entities,
            indicators,
            values,
        })
    }

    /// Builds a table from one column per indicator.
    pub fn from_columns(
        entities: AxisIndex,
        columns: Vec<(String, DVector<f64>)>,
    ) -> Result<Self, ValidationError> {
        let mut values = DMatrix::zeros(entities.len(), columns.len());
        let mut indicators = Vec::with_capacity(columns.len());
        for (k, (name, column)) in columns.into_iter().enumerate() {
            if column.len() != entities.len() {
                return Err(ValidationError::shape_mismatch(
                    name,
                    (entities.len(), 1),
                    (column.len(), 1),
                ));
            }
            values.set_column(k, &column);
            indicators.push(name);
        }
        Self::new(entities, indicators, values)
    }

    pub fn entities(&self) -> &AxisIndex {
        &self.entities
    }

    pub fn indicators(&self) -> &[String] {
        &self.indicators
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn indicator_position(&self, indicator: &str) -> Option<usize> {
        self.indicators.iter().position(|i| i == indicator)
    }

    pub fn get(&self, entity: &AxisKey, indicator: &str) -> Option<f64> {
        let n = self.entities.position(entity)?;
        let k = self.indicator_position(indicator)?;
        Some(self.values[(n, k)])
    }

    /// Values of one indicator across all entities.
    pub fn column(&self, indicator: &str) -> Result<DVector<f64>, AnalysisError> {
        let k = self
            .indicator_position(indicator)
            .ok_or_else(|| AnalysisError::unknown_indicator(indicator))?;
        Ok(self.values.column(k).into_owned())
    }

    /// Sum over all entities, per indicator.
    pub fn column_sums(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.values.ncols(),
            self.values.column_iter().map(|c| c.sum()),
        )
    }

    pub(crate) fn with_values(&self, values: DMatrix<f64>) -> Self {
        debug_assert_eq!(values.shape(), self.values.shape());
        Self {
            entities: self.entities.clone(),
            indicators: self.indicators.clone(),
            values,
        }
    }

    /// Sums the rows of `members` regions per item and labels the result
    /// with `label` as its region. Items keep first-seen order.
    pub fn regroup(&self, label: &str, members: &[String]) -> Result<Self, AnalysisError> {
        if members.is_empty() {
            return Err(ValidationError::empty_field(format!("members of '{}'", label)).into());
        }
        let missing: Vec<String> = members
            .iter()
            .filter(|m| !self.entities.contains_region(m))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(AnalysisError::SelectorMismatch {
                matrix: format!("region group '{}'", label),
                axis: "regions".to_string(),
                missing,
            });
        }

        let members: HashSet<&str> = members.iter().map(String::as_str).collect();
        let items: Vec<&str> = self
            .entities
            .keys()
            .iter()
            .filter(|k| members.contains(k.region.as_str()))
            .map(|k| k.item.as_str())
            .fold(Vec::new(), |mut acc, item| {
                if !acc.contains(&item) {
                    acc.push(item);
                }
                acc
            });

        let mut values = DMatrix::zeros(items.len(), self.indicators.len());
        for (n, key) in self.entities.keys().iter().enumerate() {
            if !members.contains(key.region.as_str()) {
                continue;
            }
            if let Some(row) = items.iter().position(|i| *i == key.item) {
                let mut target = values.row_mut(row);
                target += self.values.row(n);
            }
        }

        let entities = AxisIndex::new(items.iter().map(|i| AxisKey::new(label, *i)).collect())?;
        Ok(Self::new(entities, self.indicators.clone(), values)?)
    }

    /// Collapses every region into one labeled region.
    pub fn collapse(&self, label: &str) -> Result<Self, AnalysisError> {
        let regions: Vec<String> = self.entities.regions().into_iter().map(String::from).collect();
        self.regroup(label, &regions)
    }

    /// Stacks tables with identical indicators. Entity keys must not repeat.
    pub fn concat(tables: &[ImpactTable]) -> Result<Self, AnalysisError> {
        let first = tables
            .first()
            .ok_or_else(|| ValidationError::empty_field("impact tables"))?;

        for table in tables.iter().skip(1) {
            if table.indicators != first.indicators {
                return Err(AnalysisError::dimension_mismatch(
                    "indicators of concatenated tables",
                    first.indicators.join(", "),
                    table.indicators.join(", "),
                ));
            }
        }

        let keys: Vec<AxisKey> = tables
            .iter()
            .flat_map(|t| t.entities.keys().iter().cloned())
            .collect();
        let rows: usize = tables.iter().map(|t| t.values.nrows()).sum();
        let entities = AxisIndex::new(keys).map_err(|err| match err {
            ValidationError::DuplicateLabel { label, .. } => AnalysisError::dimension_mismatch(
                "entities of concatenated tables",
                "distinct keys",
                format!("'{}' repeated", label),
            ),
            other => other.into(),
        })?;

        let mut values = DMatrix::zeros(rows, first.indicators.len());
        let mut offset = 0;
        for table in tables {
            let n = table.values.nrows();
            values.rows_mut(offset, n).copy_from(&table.values);
            offset += n;
        }

        Ok(Self::new(entities, first.indicators.clone(), values)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ImpactTable {
        let entities = AxisIndex::product(&["AT", "BR", "DE"], &["Agri", "Steel"]).unwrap();
        let values = DMatrix::from_row_slice(
            6,
            2,
            &[
                1.0, 10.0, // AT Agri
                2.0, 20.0, // AT Steel
                3.0, 30.0, // BR Agri
                4.0, 40.0, // BR Steel
                5.0, 50.0, // DE Agri
                6.0, 60.0, // DE Steel
            ],
        );
        ImpactTable::new(entities, vec!["GHG".to_string(), "VA".to_string()], values).unwrap()
    }

    #[test]
    fn column_and_get_use_labels() {
        let t = table();
        assert_eq!(t.get(&AxisKey::new("BR", "Steel"), "VA"), Some(40.0));
        assert_eq!(t.column("GHG").unwrap().sum(), 21.0);
        assert!(matches!(t.column("Water"), Err(AnalysisError::UnknownIndicator { .. })));
    }

    #[test]
    fn regroup_sums_member_regions_per_item() {
        let eu = table().regroup("EU", &["AT".to_string(), "DE".to_string()]).unwrap();
        assert_eq!(eu.entities().len(), 2);
        assert_eq!(eu.get(&AxisKey::new("EU", "Agri"), "GHG"), Some(6.0));
        assert_eq!(eu.get(&AxisKey::new("EU", "Steel"), "VA"), Some(80.0));
    }

    #[test]
    fn regroup_rejects_unknown_members() {
        let err = table().regroup("EU", &["FR".to_string()]).unwrap_err();
        assert!(matches!(err, AnalysisError::SelectorMismatch { missing, .. } if missing == vec!["FR"]));
    }

    #[test]
    fn collapse_sums_everything_per_item() {
        let world = table().collapse("World").unwrap();
        assert_eq!(world.get(&AxisKey::new("World", "Agri"), "GHG"), Some(9.0));
        assert_eq!(world.get(&AxisKey::new("World", "Steel"), "GHG"), Some(12.0));
    }

    #[test]
    fn concat_stacks_rows_in_order() {
        let t = table();
        let eu = t.regroup("EU", &["AT".to_string(), "DE".to_string()]).unwrap();
        let lac = t.regroup("LAC", &["BR".to_string()]).unwrap();
        let both = ImpactTable::concat(&[eu, lac]).unwrap();
        assert_eq!(both.entities().len(), 4);
        assert_eq!(both.entities().get(2), Some(&AxisKey::new("LAC", "Agri")));
        assert_eq!(both.get(&AxisKey::new("LAC", "Steel"), "VA"), Some(40.0));
    }

    #[test]
    fn concat_rejects_repeated_entities() {
        let t = table();
        let err = ImpactTable::concat(&[t.clone(), t]).unwrap_err();
        assert!(matches!(err, AnalysisError::DimensionMismatch { .. }));
    }

    #[test]
    fn concat_rejects_different_indicators() {
        let t = table();
        let other = ImpactTable::from_columns(
            AxisIndex::product(&["CN"], &["Agri"]).unwrap(),
            vec![("GHG".to_string(), DVector::from_vec(vec![1.0]))],
        )
        .unwrap();
        assert!(ImpactTable::concat(&[t, other]).is_err());
    }

    #[test]
    fn column_sums_total_each_indicator() {
        assert_eq!(table().column_sums(), DVector::from_vec(vec![21.0, 210.0]));
    }
}
