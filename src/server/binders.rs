//! Path binders for values axum cannot extract on its own

use crate::core::error::RequestError;
use uuid::Uuid;

/// Parse a company collection key such as `(id1,id2)`
///
/// Surrounding parentheses are optional and blank entries are skipped.
/// Duplicates are dropped while keeping the first occurrence's position.
pub fn parse_id_list(raw: &str) -> Result<Vec<Uuid>, RequestError> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    let mut ids = Vec::new();
    for part in inner.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = Uuid::parse_str(part).map_err(|_| RequestError::InvalidIdList {
            value: raw.to_string(),
        })?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Render ids back into the `(id1,id2)` form used in `Location`
pub fn format_id_list(ids: &[Uuid]) -> String {
    let joined = ids.iter().map(Uuid::to_string).collect::<Vec<_>>().join(",");
    format!("({})", joined)
}
