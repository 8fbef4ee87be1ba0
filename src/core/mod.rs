//! Core loading pipeline and its building blocks.

mod builder;
mod cache;
mod loader;
mod properties;
mod settings;
mod store;

pub use builder::PropertyLoaderBuilder;
pub use cache::{
    BEGIN_MARKER, CACHE_SUFFIX, CachePath, END_MARKER, PENDING_SUFFIX, sanitize_location,
    snapshot_payload,
};
pub use loader::{ApplyReport, PropertyLoader};
pub use properties::PropertyTable;
pub use settings::LoaderSettings;
pub use store::{GlobalProperties, PropertyStore, global};
