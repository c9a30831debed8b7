use crate::types::Party;
use crate::types::PartyForecast;

/// Read-only reference data about the parties a vote may be cast for.
///
/// Implementations are consulted on every admission, so lookups must be cheap
/// and must not block.
pub trait PartyCatalog: Send + Sync {
    /// Human-readable catalog name for logging.
    fn name(&self) -> &'static str;

    /// Every registered party.
    fn parties(&self) -> &[Party];

    /// Forecast weights, one per party that has a forecast.
    fn forecasts(&self) -> &[PartyForecast];

    /// Whether `party_code` names a registered party.
    ///
    /// Codes are compared after trimming and ignoring ASCII case.
    fn is_registered(&self, party_code: &str) -> bool {
        let code = party_code.trim();
        self.parties()
            .iter()
            .any(|p| p.code.eq_ignore_ascii_case(code))
    }

    /// Forecasts restricted to the given party codes, matched like `is_registered`.
    fn forecasts_for(&self, party_codes: &[String]) -> Vec<PartyForecast> {
        self.forecasts()
            .iter()
            .filter(|f| {
                party_codes
                    .iter()
                    .any(|c| c.trim().eq_ignore_ascii_case(f.party_code.trim()))
            })
            .cloned()
            .collect()
    }
}
