//! Entity selectors used to address matrix slices.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnalysisError, AxisIndex};

/// Picks axis entries by region and item. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selector {
    pub regions: Option<Vec<String>>,
    pub items: Option<Vec<String>>,
}

impl Selector {
    /// Matches every entry.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches every item of the given regions.
    pub fn regions<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: Some(regions.into_iter().map(Into::into).collect()),
            items: None,
        }
    }

    /// Restricts the selection to the given items.
    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    /// Matches exactly one `(region, item)` entry.
    pub fn entity(region: impl Into<String>, item: impl Into<String>) -> Self {
        Self::regions([region.into()]).with_items([item.into()])
    }

    /// Positions of the matching entries, in index order.
    ///
    /// # Errors
    ///
    /// - `SelectorMismatch` if a listed region or item is not in the index
    /// - `EmptySelection` if nothing matches
    pub fn resolve(
        &self,
        index: &AxisIndex,
        matrix: &str,
        axis: &str,
    ) -> Result<Vec<usize>, AnalysisError> {
        let mut missing = Vec::new();
        if let Some(regions) = &self.regions {
            missing.extend(regions.iter().filter(|r| !index.contains_region(r)).cloned());
        }
        if let Some(items) = &self.items {
            missing.extend(items.iter().filter(|i| !index.contains_item(i)).cloned());
        }
        if !missing.is_empty() {
            return Err(AnalysisError::SelectorMismatch {
                matrix: matrix.to_string(),
                axis: axis.to_string(),
                missing,
            });
        }

        let positions: Vec<usize> = index
            .keys()
            .iter()
            .enumerate()
            .filter(|(_, key)| {
                let region_ok = self
                    .regions
                    .as_ref()
                    .map_or(true, |r| r.iter().any(|x| *x == key.region));
                let item_ok = self
                    .items
                    .as_ref()
                    .map_or(true, |i| i.iter().any(|x| *x == key.item));
                region_ok && item_ok
            })
            .map(|(position, _)| position)
            .collect();

        if positions.is_empty() {
            return Err(AnalysisError::EmptySelection {
                matrix: matrix.to_string(),
                axis: axis.to_string(),
            });
        }
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> AxisIndex {
        AxisIndex::product(&["EU", "LAC"], &["Agriculture", "Fertilisers", "Compost"]).unwrap()
    }

    #[test]
    fn all_selects_every_entry() {
        assert_eq!(Selector::all().resolve(&index(), "A", "rows").unwrap(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn regions_and_items_intersect() {
        let selector = Selector::regions(["LAC"]).with_items(["Fertilisers", "Agriculture"]);
        // index order, not selector order
        assert_eq!(selector.resolve(&index(), "A", "rows").unwrap(), vec![3, 4]);
    }

    #[test]
    fn entity_selects_one_position() {
        let selector = Selector::entity("EU", "Compost");
        assert_eq!(selector.resolve(&index(), "A", "columns").unwrap(), vec![2]);
    }

    #[test]
    fn unknown_labels_are_reported() {
        let selector = Selector::regions(["EU", "APAC"]).with_items(["Mining"]);
        let err = selector.resolve(&index(), "coefficients", "rows").unwrap_err();
        assert_eq!(
            err,
            AnalysisError::SelectorMismatch {
                matrix: "coefficients".to_string(),
                axis: "rows".to_string(),
                missing: vec!["APAC".to_string(), "Mining".to_string()],
            }
        );
    }

    #[test]
    fn empty_lists_select_nothing_and_fail() {
        let selector = Selector::regions(Vec::<String>::new());
        assert!(matches!(
            selector.resolve(&index(), "A", "rows"),
            Err(AnalysisError::EmptySelection { .. })
        ));
    }

    #[test]
    fn missing_fields_default_to_all() {
        let selector: Selector = serde_json::from_str(r#"{"items":["Compost"]}"#).unwrap();
        assert_eq!(selector.resolve(&index(), "A", "rows").unwrap(), vec![2, 5]);
    }
}
