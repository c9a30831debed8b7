use super::{mock::MockCatalog, seeded::SeededCatalog};
use crate::traits::PartyCatalog;
use crate::types::Party;
use crate::types::PartyForecast;

/// Enum representing all possible party catalog implementations.
pub enum PartyCatalogVariant {
    Seeded(SeededCatalog),
    Mock(MockCatalog),
}

impl PartyCatalogVariant {
    pub fn seeded() -> Self {
        PartyCatalogVariant::Seeded(SeededCatalog::new())
    }

    pub fn mock(codes: &[&str]) -> Self {
        PartyCatalogVariant::Mock(MockCatalog::with_codes(codes))
    }
}

impl PartyCatalog for PartyCatalogVariant {
    fn name(&self) -> &'static str {
        match self {
            PartyCatalogVariant::Seeded(inner) => inner.name(),
            PartyCatalogVariant::Mock(inner) => inner.name(),
        }
    }

    fn parties(&self) -> &[Party] {
        match self {
            PartyCatalogVariant::Seeded(inner) => inner.parties(),
            PartyCatalogVariant::Mock(inner) => inner.parties(),
        }
    }

    fn forecasts(&self) -> &[PartyForecast] {
        match self {
            PartyCatalogVariant::Seeded(inner) => inner.forecasts(),
            PartyCatalogVariant::Mock(inner) => inner.forecasts(),
        }
    }

    fn is_registered(&self, party_code: &str) -> bool {
        match self {
            PartyCatalogVariant::Seeded(inner) => inner.is_registered(party_code),
            PartyCatalogVariant::Mock(inner) => inner.is_registered(party_code),
        }
    }
}
