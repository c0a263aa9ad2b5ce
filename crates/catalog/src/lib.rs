//! `autocatalog-catalog`
//!
//! **Responsibility:** typed, flattened records for every collection the admin
//! console manages (vehicles, brands, categories, articles, leads) plus the
//! media descriptors they reference.
//!
//! Records mirror the backend's flattened response shape; unwrapping the
//! `{data, meta}` envelope is the client's job, not this crate's.

pub mod article;
pub mod brand;
pub mod category;
pub mod collection;
pub mod media;
mod nullable;
pub mod solicitud;
pub mod timestamps;
pub mod vehicle;

pub use article::Article;
pub use brand::Brand;
pub use category::Category;
pub use collection::{Collection, CollectionKind};
pub use media::{Media, MediaFormat, MediaFormats};
pub use solicitud::{LeadStatus, Solicitud};
pub use timestamps::Timestamps;
pub use vehicle::{Vehicle, VehicleStatus};
