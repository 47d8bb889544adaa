//! Services for usage aggregation, classification, and presentation

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod naming;
pub mod package_catalog;
pub mod presenter;
pub mod usage_loader;

pub use aggregator::Aggregator;
pub use classifier::{AppClassifier, SystemAppClassifier, SystemAppRule};
pub use config::Config;
pub use naming::NameResolver;
pub use package_catalog::{NoPackageMetadata, PackageCatalog, PackageLookup};
pub use presenter::{format_date, format_duration, paginate, Presenter};
pub use usage_loader::{LoadOutcome, UsageLoader, UsageReport};
