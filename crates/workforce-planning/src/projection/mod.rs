pub mod demand;
pub mod domain;
pub mod gap;
pub mod report;
pub mod supply;
pub mod weights;

pub use demand::{apply_department_weights, project_demand, ProjectionSeries, YearPoint};
pub use domain::{Department, Percent, ProjectionError, ProjectionParameters, MAX_HORIZON_YEARS};
pub use gap::{compose_gap, write_gap_csv, GapRow};
pub use report::{WorkforcePlan, WorkforcePlanSummary};
pub use supply::{build_waterfall, project_attrition, WaterfallRow};
pub use weights::{DepartmentWeight, DepartmentWeights, WeightsImportError, WeightsImporter};
