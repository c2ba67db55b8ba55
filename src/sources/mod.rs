//! Fetch-once providers for the three input documents
//!
//! Each document (forecast, forward geocoding, reverse geocoding) can come
//! from a remote API or from a local JSON file. Both implement
//! [`DataSource`]; [`Source`] picks one at runtime.

use crate::Result;
use serde::de::DeserializeOwned;

pub mod file;
pub mod nominatim;
pub mod nws;

pub use file::JsonFile;
pub use nominatim::{NominatimReverse, NominatimSearch};
pub use nws::NwsForecast;

/// Something that can produce one document
pub trait DataSource {
    type Document;

    /// Whether the document comes from a remote service
    fn is_remote(&self) -> bool;

    /// Fetch and decode the document
    async fn fetch(&self) -> Result<Self::Document>;
}

/// A remote source or a local file holding the same document
pub enum Source<A: DataSource> {
    Api(A),
    File(JsonFile<A::Document>),
}

impl<A> DataSource for Source<A>
where
    A: DataSource,
    A::Document: DeserializeOwned,
{
    type Document = A::Document;

    fn is_remote(&self) -> bool {
        match self {
            Source::Api(api) => api.is_remote(),
            Source::File(file) => file.is_remote(),
        }
    }

    async fn fetch(&self) -> Result<Self::Document> {
        match self {
            Source::Api(api) => api.fetch().await,
            Source::File(file) => file.fetch().await,
        }
    }
}

/// NWS hourly forecast or a saved copy
pub type ForecastSource = Source<NwsForecast>;
/// Nominatim search or a saved result list
pub type ForwardGeocodeSource = Source<NominatimSearch>;
/// Nominatim reverse lookup or a saved result
pub type ReverseGeocodeSource = Source<NominatimReverse>;
