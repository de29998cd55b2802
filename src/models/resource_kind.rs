//! Resource kind definitions
//!
//! Centralized enum for the resource kinds kubedoc can display. This
//! eliminates hardcoded strings throughout the codebase and provides type
//! safety for kind references.

use std::fmt;
use std::str::FromStr;

/// Enumeration of the displayable resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Service,
    Pod,
}

impl ResourceKind {
    /// Get the display name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Service => "Service",
            ResourceKind::Pod => "Pod",
        }
    }

    /// Get the plural, lower-case name used for headings and section ids
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Service => "services",
            ResourceKind::Pod => "pods",
        }
    }

    /// Heading title for this kind's document section
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Service => "Services",
            ResourceKind::Pod => "Pods",
        }
    }

    /// Get all resource kinds
    ///
    /// Returns an array of all ResourceKind variants, in document order.
    pub fn all() -> &'static [Self] {
        &[ResourceKind::Service, ResourceKind::Pod]
    }

    /// Try to parse a string (case-insensitive, aliases allowed) into a kind
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "service" | "services" | "svc" => Some(ResourceKind::Service),
            "pod" | "pods" | "po" => Some(ResourceKind::Pod),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Service" => Ok(ResourceKind::Service),
            "Pod" => Ok(ResourceKind::Pod),
            _ => Err(format!("Unknown resource kind: {}", s)),
        }
    }
}
