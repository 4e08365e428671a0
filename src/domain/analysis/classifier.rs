//! Trade-off Classifier - sign-based categories and magnitudes.

use serde::Serialize;

use super::category::{pair_category, triple_category, Category, CategoryKind};
use crate::domain::foundation::{AnalysisError, Outcome};

/// One classified row of a pivot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedRow {
    pub entity: String,
    pub values: Vec<f64>,
    pub category: Category,
    pub kind: CategoryKind,
    /// Euclidean norm of `values`.
    pub magnitude: f64,
}

/// Count and summed magnitude of one observed category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTally {
    pub category: Category,
    pub kind: CategoryKind,
    pub count: usize,
    pub magnitude: f64,
}

/// Classified rows plus per-category aggregates.
///
/// Categories appear in the order they were first observed in `rows`;
/// unobserved categories are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub rows: Vec<ClassifiedRow>,
    pub categories: Vec<CategoryTally>,
}

impl ClassificationResult {
    pub fn tally(&self, label: &str) -> Option<&CategoryTally> {
        self.categories.iter().find(|t| t.category.label() == label)
    }

    pub fn row(&self, entity: &str) -> Option<&ClassifiedRow> {
        self.rows.iter().find(|r| r.entity == entity)
    }

    /// Number of rows carrying a category of `kind`.
    pub fn count_of_kind(&self, kind: CategoryKind) -> usize {
        self.categories
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.count)
            .sum()
    }
}

/// Stateless classifier for two- and three-position rows.
pub struct TradeoffClassifier;

impl TradeoffClassifier {
    /// Classifies rows of two values.
    ///
    /// # Errors
    ///
    /// `UndefinedCategory` if any value is NaN.
    pub fn classify_pairs(rows: &[(String, [f64; 2])]) -> Result<ClassificationResult, AnalysisError> {
        Self::classify(rows, pair_category)
    }

    /// Classifies rows of three values.
    ///
    /// # Errors
    ///
    /// `UndefinedCategory` if any value is NaN.
    pub fn classify_triples(rows: &[(String, [f64; 3])]) -> Result<ClassificationResult, AnalysisError> {
        Self::classify(rows, triple_category)
    }

    /// Euclidean norm of a row.
    pub fn magnitude(values: &[f64]) -> f64 {
        values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    fn classify<const N: usize>(
        rows: &[(String, [f64; N])],
        lookup: fn([Outcome; N]) -> Option<&'static Category>,
    ) -> Result<ClassificationResult, AnalysisError> {
        let classified = rows
            .iter()
            .map(|(entity, values)| {
                let undefined = || AnalysisError::UndefinedCategory {
                    entity: entity.clone(),
                    values: values.to_vec(),
                };

                let mut outcomes = [Outcome::Tie; N];
                for (slot, value) in outcomes.iter_mut().zip(values) {
                    *slot = Outcome::from_value(*value).ok_or_else(undefined)?;
                }
                let category = lookup(outcomes).ok_or_else(undefined)?.clone();

                Ok(ClassifiedRow {
                    entity: entity.clone(),
                    values: values.to_vec(),
                    kind: category.kind(),
                    category,
                    magnitude: Self::magnitude(values),
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        let categories = Self::aggregate(&classified);

        tracing::debug!(
            rows = classified.len(),
            categories = categories.len(),
            arity = N,
            "Classified trade-off rows"
        );

        Ok(ClassificationResult {
            rows: classified,
            categories,
        })
    }

    fn aggregate(rows: &[ClassifiedRow]) -> Vec<CategoryTally> {
        let mut tallies: Vec<CategoryTally> = Vec::new();
        for row in rows {
            match tallies.iter_mut().find(|t| t.category == row.category) {
                Some(tally) => {
                    tally.count += 1;
                    tally.magnitude += row.magnitude;
                }
                None => tallies.push(CategoryTally {
                    category: row.category.clone(),
                    kind: row.kind,
                    count: 1,
                    magnitude: row.magnitude,
                }),
            }
        }
        tallies
    }
}
