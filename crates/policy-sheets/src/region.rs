//! Region code → display name

use std::collections::HashMap;

use once_cell::sync::Lazy;

static REGION_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("australiaeast", "Australia East"),
        ("australiasoutheast", "Australia Southeast"),
        ("northeurope", "North Europe"),
        ("westeurope", "West Europe"),
        ("eastus", "East US"),
        ("eastus2", "East US 2"),
    ])
});

/// Format a region code for display
///
/// Lookup is case-insensitive; unknown codes pass through unchanged.
pub fn format_location(code: &str) -> String {
    if code.is_empty() {
        return String::new();
    }
    REGION_NAMES
        .get(code.to_lowercase().as_str())
        .map_or_else(|| code.to_string(), |name| (*name).to_string())
}
