//! Client-side data and state core for a points-of-interest explorer.
//!
//! The host app renders a map and a list of attractions kept in mutual sync
//! around one "active" record. This crate owns everything underneath that
//! UI: fetching and decoding the feature-service payload, sanitizing it into
//! [`AttractionRecord`]s, deriving filtered/sorted views, formatting
//! distances, and reconciling the active selection with the navigation
//! stack without feedback loops.
//!
//! Flow: [`Fetcher`] retrieves and decodes → [`Catalog`] stores the record
//! set and derives views → [`SelectionSync`] (owned by [`Explorer`])
//! mediates which record is active → [`geo::formatted_distance`] formats
//! distances for display.
//!
//! A single control thread owns all mutation. The blocking fetch is the
//! only suspension point, and overlapping fetches are serialized with a
//! generation token (see [`Explorer`]).

pub mod catalog;
pub mod explorer;
pub mod fetch;
pub mod geo;
pub mod location;
pub mod record;
pub mod selection;

pub use catalog::{Catalog, FilterPolicy, SortPolicy};
pub use explorer::{Explorer, FetchGeneration, FetchStatus};
pub use fetch::{parse_payload, FetchError, Fetcher};
pub use geo::{format_distance, formatted_distance, haversine_distance, Coordinate};
pub use location::{FixedLocation, LocationProvider, RandomSource, ThreadRngSource};
pub use record::{unescape_html_entities, AttractionRecord, RecordId};
pub use selection::{PanelDetent, SelectionSync};
