use crate::traits::PartyCatalog;
use crate::types::Party;
use crate::types::PartyForecast;

/// Catalog with a caller-defined party list, for tests.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    pub parties: Vec<Party>,
    pub forecasts: Vec<PartyForecast>,
}

impl MockCatalog {
    /// Parties named after their codes, without forecasts.
    pub fn with_codes(codes: &[&str]) -> Self {
        Self {
            parties: codes
                .iter()
                .map(|c| Party {
                    code: c.to_string(),
                    name: c.to_string(),
                })
                .collect(),
            forecasts: Vec::new(),
        }
    }

    pub fn with_forecast(mut self, party_code: &str, weight: f64) -> Self {
        self.forecasts.push(PartyForecast {
            party_code: party_code.to_string(),
            weight,
        });
        self
    }
}

impl PartyCatalog for MockCatalog {
    fn name(&self) -> &'static str {
        "mock-catalog"
    }

    fn parties(&self) -> &[Party] {
        &self.parties
    }

    fn forecasts(&self) -> &[PartyForecast] {
        &self.forecasts
    }
}
