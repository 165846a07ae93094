use super::domain::{Department, Percent, ProjectionError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

/// Share of the macro headcount allocated to each department.
///
/// Weights are kept exactly as supplied. A total above 100% is legal and is
/// reported through [`DepartmentWeights::is_over_allocated`] rather than
/// normalized away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentWeights {
    weights: BTreeMap<Department, Percent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepartmentWeight {
    pub department: Department,
    pub weight_pct: Percent,
}

impl DepartmentWeights {
    /// The allocation departmental heads returned for the biotech case study.
    /// Sums to 107%.
    pub fn standard() -> Self {
        let weights = [
            (Department::Execs, 200),
            (Department::Managers, 2_500),
            (Department::Engineers, 2_000),
            (Department::Ops, 3_000),
            (Department::HR, 500),
            (Department::IT, 2_000),
            (Department::Finance, 500),
        ]
        .into_iter()
        .map(|(department, basis_points)| (department, Percent::from_basis_points(basis_points)))
        .collect();

        Self { weights }
    }

    pub fn from_entries<I>(entries: I) -> Result<Self, ProjectionError>
    where
        I: IntoIterator<Item = DepartmentWeight>,
    {
        let mut weights: BTreeMap<Department, Percent> = Department::ordered()
            .into_iter()
            .map(|department| (department, Percent::ZERO))
            .collect();
        let mut seen = Vec::new();

        for entry in entries {
            if seen.contains(&entry.department) {
                return Err(ProjectionError::invalid(
                    "department_weights",
                    format!("{} is listed more than once", entry.department),
                ));
            }
            if entry.weight_pct < Percent::ZERO || entry.weight_pct > Percent::HUNDRED {
                return Err(ProjectionError::invalid(
                    "department_weights",
                    format!(
                        "{} weight {} is outside the 0% to 100% range",
                        entry.department, entry.weight_pct
                    ),
                ));
            }
            seen.push(entry.department);
            weights.insert(entry.department, entry.weight_pct);
        }

        Ok(Self { weights })
    }

    pub fn weight(&self, department: Department) -> Percent {
        self.weights
            .get(&department)
            .copied()
            .unwrap_or(Percent::ZERO)
    }

    pub fn entries(&self) -> Vec<DepartmentWeight> {
        Department::ordered()
            .into_iter()
            .map(|department| DepartmentWeight {
                department,
                weight_pct: self.weight(department),
            })
            .collect()
    }

    pub fn total(&self) -> Percent {
        let basis_points = self
            .weights
            .values()
            .map(|weight| weight.basis_points())
            .sum();
        Percent::from_basis_points(basis_points)
    }

    pub fn is_over_allocated(&self) -> bool {
        self.total() > Percent::HUNDRED
    }
}

impl Default for DepartmentWeights {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug)]
pub enum WeightsImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownDepartment(String),
    Invalid(ProjectionError),
}

impl fmt::Display for WeightsImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightsImportError::Io(err) => write!(f, "failed to read weights file: {}", err),
            WeightsImportError::Csv(err) => write!(f, "invalid weights CSV data: {}", err),
            WeightsImportError::UnknownDepartment(name) => {
                write!(f, "unknown department '{}' in weights file", name)
            }
            WeightsImportError::Invalid(err) => write!(f, "rejected department weights: {}", err),
        }
    }
}

impl std::error::Error for WeightsImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeightsImportError::Io(err) => Some(err),
            WeightsImportError::Csv(err) => Some(err),
            WeightsImportError::UnknownDepartment(_) => None,
            WeightsImportError::Invalid(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for WeightsImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for WeightsImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<ProjectionError> for WeightsImportError {
    fn from(err: ProjectionError) -> Self {
        Self::Invalid(err)
    }
}

#[derive(Debug, Deserialize)]
struct WeightRow {
    department: String,
    weight_pct: f64,
}

/// Loads department weights from a `department,weight_pct` CSV.
pub struct WeightsImporter;

impl WeightsImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<DepartmentWeights, WeightsImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<DepartmentWeights, WeightsImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut entries = Vec::new();

        for row in csv_reader.deserialize::<WeightRow>() {
            let row = row?;
            let department = Department::parse(&row.department)
                .ok_or_else(|| WeightsImportError::UnknownDepartment(row.department.clone()))?;
            let weight_pct = Percent::from_percent(row.weight_pct)?;
            entries.push(DepartmentWeight {
                department,
                weight_pct,
            });
        }

        Ok(DepartmentWeights::from_entries(entries)?)
    }
}
