//! Classification of database errors by violated constraint.

use crate::error::AppError;

/// Returns `true` if a mapped [`AppError`] is a conflict on the named
/// constraint.
///
/// Repositories translate unique violations into [`AppError::Conflict`] with
/// the constraint name in the details; the create path uses this to decide
/// whether a failed insert was a short-code collision worth retrying.
pub fn is_conflict_on(e: &AppError, constraint: &str) -> bool {
    match e {
        AppError::Conflict { details, .. } => details
            .get("constraint")
            .and_then(|v| v.as_str())
            .is_some_and(|c| c == constraint),
        _ => false,
    }
}
