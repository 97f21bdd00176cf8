use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::errors::FinsightResult;

/// Chart rendering capability (external collaborator).
///
/// The workspace ships no renderer; deployments inject one and tests
/// use fakes. Only the returned image path crosses the seam.
pub trait IChartRenderer: Send + Sync {
    /// Render the per-year values and return the written image path.
    fn render(
        &self,
        metric_label: &str,
        values_by_year: &BTreeMap<u16, f64>,
    ) -> FinsightResult<PathBuf>;
}
