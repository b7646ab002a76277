//! Manufacturer constants and sort allow-list.

use crate::search::SortField;

pub const ENTITY: &str = "Manufacturer";

/// Path segment the manufacturer resource is mounted under.
pub const RESOURCE: &str = "manufacturers";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManufacturerSortField {
    #[default]
    Id,
    Name,
    Details,
}

impl SortField for ManufacturerSortField {
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("id", ManufacturerSortField::Id),
        ("name", ManufacturerSortField::Name),
        ("details", ManufacturerSortField::Details),
    ];

    fn key(self) -> &'static str {
        match self {
            ManufacturerSortField::Id => "id",
            ManufacturerSortField::Name => "name",
            ManufacturerSortField::Details => "details",
        }
    }
}
