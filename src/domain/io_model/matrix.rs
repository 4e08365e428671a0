//! Labeled matrices: technical coefficients and final demand.

use nalgebra::{DMatrix, DVector};

use crate::domain::foundation::{AnalysisError, AxisIndex, AxisKey, ValidationError};
use crate::domain::scenario::Selector;

/// Dense matrix with a two-level label on each axis.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledMatrix {
    name: String,
    rows: AxisIndex,
    columns: AxisIndex,
    values: DMatrix<f64>,
}

impl LabeledMatrix {
    /// Creates a labeled matrix, checking shape and finiteness.
    pub fn new(
        name: impl Into<String>,
        rows: AxisIndex,
        columns: AxisIndex,
        values: DMatrix<f64>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if values.shape() != (rows.len(), columns.len()) {
            return Err(ValidationError::shape_mismatch(
                name,
                (rows.len(), columns.len()),
                values.shape(),
            ));
        }
        if let Some((row, col)) = first_non_finite(&values) {
            return Err(ValidationError::NonFinite { field: name, row, col });
        }
        Ok(Self {
            name,
            rows,
            columns,
            values,
        })
    }

    /// Creates a labeled matrix from row-major nested vectors.
    pub fn from_rows(
        name: impl Into<String>,
        rows: AxisIndex,
        columns: AxisIndex,
        data: Vec<Vec<f64>>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let ncols = columns.len();
        if data.len() != rows.len() || data.iter().any(|r| r.len() != ncols) {
            let actual_cols = data.iter().map(Vec::len).find(|len| *len != ncols).unwrap_or(ncols);
            return Err(ValidationError::shape_mismatch(
                name,
                (rows.len(), ncols),
                (data.len(), actual_cols),
            ));
        }
        let flat: Vec<f64> = data.into_iter().flatten().collect();
        let values = DMatrix::from_row_slice(rows.len(), ncols, &flat);
        Self::new(name, rows, columns, values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &AxisIndex {
        &self.rows
    }

    pub fn columns(&self) -> &AxisIndex {
        &self.columns
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Value at `(row, column)` keys, if both exist.
    pub fn get(&self, row: &AxisKey, column: &AxisKey) -> Option<f64> {
        let r = self.rows.position(row)?;
        let c = self.columns.position(column)?;
        Some(self.values[(r, c)])
    }

    /// Same labels, new values. Shapes are guaranteed by the caller.
    pub(crate) fn with_values(&self, values: DMatrix<f64>) -> Self {
        debug_assert_eq!(values.shape(), self.values.shape());
        Self {
            name: self.name.clone(),
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            values,
        }
    }

    /// Resolves a rectangular slice to row and column positions.
    pub fn resolve_slice(
        &self,
        rows: &Selector,
        columns: &Selector,
    ) -> Result<(Vec<usize>, Vec<usize>), AnalysisError> {
        let r = rows.resolve(&self.rows, &self.name, "rows")?;
        let c = columns.resolve(&self.columns, &self.name, "columns")?;
        Ok((r, c))
    }

    /// Sum across columns for every row.
    pub fn row_sums(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.values.nrows(),
            self.values.row_iter().map(|row| row.sum()),
        )
    }

    /// Sum of the given columns for every row.
    pub fn sum_of_columns(&self, positions: &[usize]) -> DVector<f64> {
        let mut total = DVector::zeros(self.values.nrows());
        for &c in positions {
            total += self.values.column(c);
        }
        total
    }

    /// Checks that another matrix carries identical labels.
    pub fn ensure_same_labels(&self, other: &LabeledMatrix) -> Result<(), AnalysisError> {
        if self.rows != other.rows || self.columns != other.columns {
            return Err(AnalysisError::dimension_mismatch(
                format!("labels of {} and {}", self.name, other.name),
                format!("{}x{}", self.rows.len(), self.columns.len()),
                format!("{}x{}", other.rows.len(), other.columns.len()),
            ));
        }
        Ok(())
    }
}

fn first_non_finite(values: &DMatrix<f64>) -> Option<(usize, usize)> {
    (0..values.nrows())
        .flat_map(|r| (0..values.ncols()).map(move |c| (r, c)))
        .find(|&(r, c)| !values[(r, c)].is_finite())
}

fn first_negative(values: &DMatrix<f64>) -> Option<(usize, usize, f64)> {
    (0..values.nrows())
        .flat_map(|r| (0..values.ncols()).map(move |c| (r, c)))
        .map(|(r, c)| (r, c, values[(r, c)]))
        .find(|&(_, _, v)| v < 0.0)
}

/// Square inter-industry technical coefficient matrix `A`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientMatrix(LabeledMatrix);

impl CoefficientMatrix {
    /// Wraps a labeled matrix, requiring identical row/column labels and
    /// non-negative entries.
    pub fn new(matrix: LabeledMatrix) -> Result<Self, ValidationError> {
        Self::ensure_square(&matrix)?;
        if let Some((row, col, value)) = first_negative(matrix.values()) {
            return Err(ValidationError::NegativeValue {
                field: matrix.name().to_string(),
                row,
                col,
                value,
            });
        }
        Ok(Self(matrix))
    }

    /// Wraps a counterfactual matrix. Negative entries produced by a rate
    /// below -1 are kept and reported, not rejected.
    pub fn from_perturbed(matrix: LabeledMatrix) -> Result<Self, ValidationError> {
        Self::ensure_square(&matrix)?;
        if let Some((row, col, value)) = first_negative(matrix.values()) {
            tracing::warn!(
                matrix = matrix.name(),
                row,
                col,
                value,
                "Perturbed coefficient matrix has negative entries"
            );
        }
        Ok(Self(matrix))
    }

    fn ensure_square(matrix: &LabeledMatrix) -> Result<(), ValidationError> {
        if matrix.rows() != matrix.columns() {
            return Err(ValidationError::invalid_format(
                matrix.name(),
                "coefficient matrix rows and columns must share one index",
            ));
        }
        Ok(())
    }

    pub fn matrix(&self) -> &LabeledMatrix {
        &self.0
    }

    pub fn entities(&self) -> &AxisIndex {
        self.0.rows()
    }

    pub fn values(&self) -> &DMatrix<f64> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.rows().is_empty()
    }

    /// Number of columns whose sum is at least one. Any such column means
    /// the column-sum bound no longer guarantees a spectral radius below one.
    pub fn columns_at_or_above_unity(&self) -> usize {
        self.0
            .values()
            .column_iter()
            .filter(|c| c.sum() >= 1.0)
            .count()
    }
}

/// Final demand `Y`: producing entities by consuming `(region, category)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalDemandMatrix(LabeledMatrix);

impl FinalDemandMatrix {
    pub fn new(matrix: LabeledMatrix) -> Self {
        Self(matrix)
    }

    pub fn matrix(&self) -> &LabeledMatrix {
        &self.0
    }

    pub fn entities(&self) -> &AxisIndex {
        self.0.rows()
    }

    /// Total final demand per producing entity (`Y` summed over columns).
    pub fn total_demand(&self) -> DVector<f64> {
        self.0.row_sums()
    }

    /// Final demand of the consuming regions in `regions`, summed.
    pub fn regional_demand(&self, regions: &[String]) -> Result<DVector<f64>, AnalysisError> {
        let selector = Selector::regions(regions.iter().cloned());
        let columns = selector.resolve(self.0.columns(), self.0.name(), "columns")?;
        Ok(self.0.sum_of_columns(&columns))
    }
}
