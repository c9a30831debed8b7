pub mod mock;
pub mod synthetic;
pub mod variant;

pub use mock::MockVoters;
pub use synthetic::SyntheticVoters;
pub use variant::VoterSourceVariant;
