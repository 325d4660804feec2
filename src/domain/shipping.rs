//! Country → division → location lookups for the delivery address form.

use resource_store::StoreEntity;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub country_id: i64,
    pub country_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub division_id: i64,
    pub division_name: String,
    pub country_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_id: i64,
    pub location_name: String,
    pub division_id: i64,
    #[serde(default)]
    pub delivery_charge: f64,
}

macro_rules! read_only_entity {
    ($entity:ty, $field:ident) => {
        impl StoreEntity for $entity {
            type Id = i64;
            type Patch = Infallible;

            fn id(&self) -> i64 {
                self.$field
            }

            fn apply_patch(&mut self, patch: &Infallible) {
                match *patch {}
            }
        }
    };
}

read_only_entity!(Country, country_id);
read_only_entity!(Division, division_id);
read_only_entity!(Location, location_id);

/// The shopper's picks in the cascading dropdowns, cached between sessions.
///
/// A division only makes sense under its country and a location under its
/// division; the setters drop whatever sits below the level being changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingSelection {
    pub country: Option<Country>,
    pub division: Option<Division>,
    pub location: Option<Location>,
}

impl ShippingSelection {
    pub fn select_country(&mut self, country: Country) {
        self.country = Some(country);
        self.division = None;
        self.location = None;
    }

    pub fn select_division(&mut self, division: Division) {
        self.division = Some(division);
        self.location = None;
    }

    pub fn select_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn is_complete(&self) -> bool {
        self.country.is_some() && self.division.is_some() && self.location.is_some()
    }

    /// Delivery charge of the chosen location, zero until one is picked.
    pub fn delivery_charge(&self) -> f64 {
        self.location
            .as_ref()
            .map(|location| location.delivery_charge)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changing_country_clears_lower_levels() {
        let mut selection = ShippingSelection::default();
        selection.select_country(Country {
            country_id: 1,
            country_name: "Bangladesh".into(),
        });
        selection.select_division(Division {
            division_id: 10,
            division_name: "Dhaka".into(),
            country_id: 1,
        });
        selection.select_location(Location {
            location_id: 100,
            location_name: "Gulshan".into(),
            division_id: 10,
            delivery_charge: 60.0,
        });
        assert!(selection.is_complete());
        assert_eq!(selection.delivery_charge(), 60.0);

        selection.select_country(Country {
            country_id: 2,
            country_name: "Nepal".into(),
        });
        assert_eq!(selection.division, None);
        assert_eq!(selection.location, None);
        assert_eq!(selection.delivery_charge(), 0.0);
    }
}
