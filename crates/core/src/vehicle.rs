//! Vehicle constants and sort allow-list.

use crate::search::SortField;

pub const ENTITY: &str = "Vehicle";

/// Path segment the vehicle resource is mounted under.
pub const RESOURCE: &str = "vehicles";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VehicleSortField {
    #[default]
    Id,
    Model,
    ManufactureDate,
    CountryOfAssembly,
}

impl SortField for VehicleSortField {
    const ALLOWED: &'static [(&'static str, Self)] = &[
        ("id", VehicleSortField::Id),
        ("model", VehicleSortField::Model),
        ("manufactureDate", VehicleSortField::ManufactureDate),
        ("countryOfAssembly", VehicleSortField::CountryOfAssembly),
    ];

    fn key(self) -> &'static str {
        match self {
            VehicleSortField::Id => "id",
            VehicleSortField::Model => "model",
            VehicleSortField::ManufactureDate => "manufactureDate",
            VehicleSortField::CountryOfAssembly => "countryOfAssembly",
        }
    }
}
