pub mod error;
pub mod field;
pub mod keys;
pub mod manifest;
pub mod model;
mod lenient;

pub use error::CoreError;
pub use field::{Quantity, Scalar};
pub use lenient::parse_quantity;
pub use manifest::{Expiration, PrecacheEntry, PrecacheManifest, RouteMatch, RuntimeRoute, Strategy};
pub use model::{
    Catalog, Dictionary, Document, LineItem, NomenclatureEntry, Section, Settings,
    SettingsPatch, duplicate_ids, find_document,
};
