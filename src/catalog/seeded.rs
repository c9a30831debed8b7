use crate::traits::PartyCatalog;
use crate::types::Party;
use crate::types::PartyForecast;

/// (code, name, forecast weight)
const SEED: [(&str, &str, f64); 20] = [
    ("ANC", "African National Congress", 40.0),
    ("DA", "Democratic Alliance", 20.0),
    ("MK", "Umkhonto we Sizwe", 15.0),
    ("EFF", "Economic Freedom Fighters", 10.0),
    ("IFP", "Inkatha Freedom Party", 3.0),
    ("PA", "Patriotic Alliance", 2.0),
    ("VF+", "Freedom Front Plus", 1.5),
    ("ACTIONSA", "ActionSA", 1.5),
    ("RISE", "Rise Mzansi", 1.0),
    ("UDM", "United Democratic Movement", 1.0),
    ("BOSA", "Build One South Africa", 0.5),
    ("ATM", "African Transformation Movement", 0.5),
    ("GOOD", "Good", 0.5),
    ("COPE", "Congress of the People", 0.5),
    ("ACDP", "African Christian Democratic Party", 0.5),
    ("PAC", "Pan Africanist Congress of Azania", 0.5),
    ("UAT", "United Africans Transformation", 0.5),
    ("NFP", "National Freedom Party", 0.5),
    ("ALJAMA", "Al Jama-ah", 0.5),
    ("CCC", "National Coloured Congress", 0.5),
];

/// Catalog seeded with twenty registered parties and their forecasts.
pub struct SeededCatalog {
    parties: Vec<Party>,
    forecasts: Vec<PartyForecast>,
}

impl SeededCatalog {
    pub fn new() -> Self {
        let parties = SEED
            .iter()
            .map(|(code, name, _)| Party {
                code: code.to_string(),
                name: name.to_string(),
            })
            .collect();
        let forecasts = SEED
            .iter()
            .map(|(code, _, weight)| PartyForecast {
                party_code: code.to_string(),
                weight: *weight,
            })
            .collect();

        Self { parties, forecasts }
    }
}

impl Default for SeededCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PartyCatalog for SeededCatalog {
    fn name(&self) -> &'static str {
        "seeded-catalog"
    }

    fn parties(&self) -> &[Party] {
        &self.parties
    }

    fn forecasts(&self) -> &[PartyForecast] {
        &self.forecasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecasts_cover_every_party() {
        let catalog = SeededCatalog::new();
        assert_eq!(catalog.parties().len(), 20);
        for party in catalog.parties() {
            assert!(catalog.forecasts().iter().any(|f| f.party_code == party.code));
        }
        let total: f64 = catalog.forecasts().iter().map(|f| f.weight).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn registration_ignores_case_and_whitespace() {
        let catalog = SeededCatalog::new();
        assert!(catalog.is_registered("ANC"));
        assert!(catalog.is_registered(" anc "));
        assert!(catalog.is_registered("vf+"));
        assert!(!catalog.is_registered("XYZ"));
        assert!(!catalog.is_registered(""));
    }
}
