//! FloatChat Float Catalog
//!
//! Static ocean-float data and the geometry behind the nearest-float query:
//!
//! - **types**: Core data structures (Coordinate, FloatRecord, RankedFloat)
//! - **geo**: Haversine distance and distance ranking
//! - **catalog**: The built-in floats and tsunami-risk map markers
//! - **series**: Synthetic monthly temperature series and chart payloads
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use floatchat::floats::{FloatCatalog, REFERENCE_POINT};
//!
//! let catalog = FloatCatalog::builtin();
//! let nearest = catalog.nearest(REFERENCE_POINT, 3).unwrap();
//!
//! for ranked in &nearest {
//!     println!("{}: {:.1} km", ranked.float.name, ranked.distance_km);
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod geo;
pub mod series;
pub mod types;

// Re-export commonly used types
pub use catalog::{FloatCatalog, DEFAULT_NEAREST_LIMIT, REFERENCE_POINT};
pub use error::{GeoError, GeoResult};
pub use geo::{haversine_km, nearest, rank_by_distance, EARTH_RADIUS_KM};
pub use series::{ChartData, ChartDataset, ChartKind, TemperaturePoint, TemperatureSeries};
pub use types::{Coordinate, FloatRecord, RankedFloat, RiskLevel, TsunamiRiskLocation};
