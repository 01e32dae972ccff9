//! Column projection
//!
//! Shape precedence (first match wins):
//! 1. `SELECT *`: every table field, in table order
//! 2. `SELECT COUNT(*)`: one integer column named `count`
//! 3. Aggregations present:
//!    - single-value: one integer column per selected expression, named by key
//!    - bucketed: `field_name`, `key`, `count`
//! 4. Otherwise: one column per selected expression whose source field
//!    exists in the table; unresolvable expressions are dropped

use crate::request::SqlRequest;
use crate::results::ResultWarning;
use crate::schema::ColumnType;

use super::column::Projection;

/// Projection plus the anomalies found while building it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionOutcome {
    pub projection: Projection,
    pub warnings: Vec<ResultWarning>,
}

/// Derives output columns from a request and its table
pub struct ColumnProjector;

impl ColumnProjector {
    /// Builds the projection.
    ///
    /// `has_aggregations` is true when the backend returned a non-empty
    /// aggregation tree.
    pub fn project(request: &SqlRequest, has_aggregations: bool) -> ProjectionOutcome {
        let mut outcome = ProjectionOutcome::default();
        let projection = &mut outcome.projection;
        let select = &request.select;

        if request.is_full_projection() {
            for field in request.table.fields() {
                projection.push(field.name.clone(), field.field_type, None);
            }
        } else if request.is_count_star() {
            projection.push("count", ColumnType::Integer, None);
        } else if has_aggregations {
            if request.has_single_value {
                // Typed integer even for avg/sum; cells carry the backend scalar as-is
                for col in &select.columns {
                    projection.push(col.key(), ColumnType::Integer, Some(col.clone()));
                }
            } else if request.has_multi_value {
                projection.push("field_name", ColumnType::String, None);
                projection.push("key", ColumnType::String, None);
                projection.push("count", ColumnType::Integer, None);
            }
        } else {
            for col in &select.columns {
                match request.table.field(&col.source_field) {
                    Some(field) => {
                        projection.push(col.source_field.clone(), field.field_type, Some(col.clone()))
                    }
                    None => outcome.warnings.push(ResultWarning::UnresolvedColumn {
                        expression: col.expression.clone(),
                    }),
                }
            }
        }

        outcome
    }
}
