//! Accessory constants, sort allow-list, search matching policy and
//! reference normalization.

use crate::search::{contains_pattern, SortField};
use crate::types::DbId;

pub const ENTITY: &str = "Accessory";

/// Path segment the accessory resource is mounted under.
pub const RESOURCE: &str = "accessories";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessorySortField {
    #[default]
    Id,
    Name,
    Description,
    AcquisitionYear,
    Value,
    InstallationMinutes,
}

impl SortField for AccessorySortField {
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("id", AccessorySortField::Id),
        ("name", AccessorySortField::Name),
        ("description", AccessorySortField::Description),
        ("acquisitionYear", AccessorySortField::AcquisitionYear),
        ("value", AccessorySortField::Value),
        ("installationMinutes", AccessorySortField::InstallationMinutes),
    ];

    fn key(self) -> &'static str {
        match self {
            AccessorySortField::Id => "id",
            AccessorySortField::Name => "name",
            AccessorySortField::Description => "description",
            AccessorySortField::AcquisitionYear => "acquisitionYear",
            AccessorySortField::Value => "value",
            AccessorySortField::InstallationMinutes => "installationMinutes",
        }
    }
}

/// How an accessory search query is matched.
///
/// A query that parses as an integer matches acquisition year or
/// installation minutes exactly; anything else is a case-insensitive
/// substring match on the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessoryFilter {
    All,
    Number(i32),
    /// An `ILIKE` pattern for the name column.
    NameContains(String),
}

impl AccessoryFilter {
    pub fn from_query(query: Option<&str>) -> Self {
        match query {
            None => AccessoryFilter::All,
            Some(q) if q.trim().is_empty() => AccessoryFilter::All,
            Some(q) => match q.parse::<i32>() {
                Ok(number) => AccessoryFilter::Number(number),
                Err(_) => AccessoryFilter::NameContains(contains_pattern(q)),
            },
        }
    }
}

/// Collapse submitted manufacturer references into the ids to resolve.
///
/// Null entries, entries without an id and zero ids are skipped; duplicates
/// keep their first position.
pub fn manufacturer_ids<I>(refs: I) -> Vec<DbId>
where
    I: IntoIterator<Item = Option<DbId>>,
{
    let mut ids = Vec::new();
    for id in refs.into_iter().flatten() {
        if id != 0 && !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_query_matches_numbers() {
        assert_eq!(
            AccessoryFilter::from_query(Some("2020")),
            AccessoryFilter::Number(2020)
        );
        assert_eq!(
            AccessoryFilter::from_query(Some("-5")),
            AccessoryFilter::Number(-5)
        );
    }

    #[test]
    fn text_query_matches_name() {
        assert_eq!(
            AccessoryFilter::from_query(Some("Brake")),
            AccessoryFilter::NameContains("%Brake%".into())
        );
    }

    #[test]
    fn out_of_range_number_falls_back_to_text() {
        assert_eq!(
            AccessoryFilter::from_query(Some("99999999999")),
            AccessoryFilter::NameContains("%99999999999%".into())
        );
    }

    #[test]
    fn padded_number_is_text() {
        assert_eq!(
            AccessoryFilter::from_query(Some(" 30")),
            AccessoryFilter::NameContains("% 30%".into())
        );
    }

    #[test]
    fn blank_query_matches_everything() {
        assert_eq!(AccessoryFilter::from_query(None), AccessoryFilter::All);
        assert_eq!(AccessoryFilter::from_query(Some("  ")), AccessoryFilter::All);
    }

    #[test]
    fn manufacturer_ids_skip_empty_and_duplicate_refs() {
        let ids = manufacturer_ids([Some(3), None, Some(0), Some(1), Some(3)]);
        assert_eq!(ids, vec![3, 1]);
    }
}
