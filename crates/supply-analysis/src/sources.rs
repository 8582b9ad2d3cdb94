/// Static registry of the stock-photography catalogs we blend.
/// Weights reflect each catalog's market relevance and need not sum
/// to 1; the aggregator normalizes by the weights actually used.
#[derive(Debug, Clone, Copy)]
pub struct SupplySourceConfig {
    pub id: &'static str,
    pub name: &'static str,
    pub weight: f64,
    /// Free catalogs feed the free-saturation metric.
    pub free: bool,
}

pub const SUPPLY_SOURCES: &[SupplySourceConfig] = &[
    SupplySourceConfig {
        id: "adobe_stock",
        name: "Adobe Stock",
        weight: 0.40,
        free: false,
    },
    SupplySourceConfig {
        id: "shutterstock",
        name: "Shutterstock",
        weight: 0.35,
        free: false,
    },
    SupplySourceConfig {
        id: "pexels",
        name: "Pexels (Free)",
        weight: 0.15,
        free: true,
    },
    SupplySourceConfig {
        id: "unsplash",
        name: "Unsplash (Free)",
        weight: 0.10,
        free: true,
    },
];

pub fn find_source(id: &str) -> Option<&'static SupplySourceConfig> {
    SUPPLY_SOURCES.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert_eq!(find_source("adobe_stock").unwrap().weight, 0.40);
        assert!(find_source("getty").is_none());
    }

    #[test]
    fn test_two_free_sources() {
        assert_eq!(SUPPLY_SOURCES.iter().filter(|s| s.free).count(), 2);
    }
}
