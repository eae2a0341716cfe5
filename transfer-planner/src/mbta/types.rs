//! MBTA v3 API wire types.
//!
//! The API speaks JSON:API: every response is a document whose `data`
//! member holds resources, each with an `id` and an `attributes` object.
//! Only the attributes the planner needs are modelled; everything else in
//! the payload is ignored.

use serde::{Deserialize, Serialize};

/// A JSON:API document holding a list of resources.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Document<T> {
    pub data: Vec<Resource<T>>,
}

/// A single JSON:API resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resource<T> {
    pub id: String,
    pub attributes: T,
}

/// Attributes of a `route` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteAttributes {
    /// e.g. "Red Line"; empty for some bus routes
    #[serde(default)]
    pub long_name: Option<String>,

    /// e.g. "B" for Green Line B
    #[serde(default)]
    pub short_name: Option<String>,

    /// GTFS route type: 0 light rail, 1 heavy rail, 2 commuter rail, 3 bus, 4 ferry
    #[serde(default, rename = "type")]
    pub route_type: Option<u8>,
}

/// Attributes of a `stop` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StopAttributes {
    #[serde(default)]
    pub name: Option<String>,
}

pub type RouteResource = Resource<RouteAttributes>;
pub type StopResource = Resource<StopAttributes>;

impl RouteResource {
    /// Display name: the long name, else the short name, else the id.
    pub fn display_name(&self) -> &str {
        [&self.attributes.long_name, &self.attributes.short_name]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or(self.id.as_str())
    }
}
