pub mod mock;
pub mod seeded;
pub mod variant;

pub use mock::MockCatalog;
pub use seeded::SeededCatalog;
pub use variant::PartyCatalogVariant;
