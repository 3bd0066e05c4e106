//! Hypermedia link representation

use serde::{Deserialize, Serialize};

/// A link attached to a resource: where it points, how it relates, and
/// which method to use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDto {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl LinkDto {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }
}
