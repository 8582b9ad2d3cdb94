use serde::{Deserialize, Serialize};

/// How calendar-dependent a category's demand is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seasonality {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Seasonality {
    /// Months in which this class historically peaks (1 = January).
    pub fn peak_months(&self) -> &'static [u32] {
        match self {
            // Holiday season
            Seasonality::VeryHigh => &[11, 12, 1, 2],
            // Summer plus Christmas
            Seasonality::High => &[6, 7, 8, 12],
            // New Year, spring, back to school
            Seasonality::Medium => &[1, 5, 9],
            // Year-round
            Seasonality::Low => &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        }
    }

    pub fn is_peak_month(&self, month: u32) -> bool {
        self.peak_months().contains(&month)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Seasonality::Low => "low",
            Seasonality::Medium => "medium",
            Seasonality::High => "high",
            Seasonality::VeryHigh => "very_high",
        }
    }
}

/// Static reference data for one niche category. Never mutated at
/// runtime.
#[derive(Debug, Clone, Copy)]
pub struct NicheCategory {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    /// Multiplier > 1.0 for fast-growing domains.
    pub growth_factor: f64,
    pub seasonality: Seasonality,
}

pub const NICHE_CATEGORIES: &[NicheCategory] = &[
    NicheCategory {
        name: "Technology",
        keywords: &[
            "AI", "Robot", "Smart Home", "Automation", "Drone", "VR", "AR", "Blockchain", "IoT",
            "Machine Learning", "Quantum Computing", "Cybersecurity",
        ],
        growth_factor: 1.2,
        seasonality: Seasonality::Low,
    },
    NicheCategory {
        name: "Lifestyle",
        keywords: &[
            "Minimalist", "Wellness", "Mindfulness", "Self Care", "Work Life Balance",
            "Digital Detox", "Slow Living", "Hygge", "Cozy",
        ],
        growth_factor: 1.1,
        seasonality: Seasonality::Medium,
    },
    NicheCategory {
        name: "Sustainability",
        keywords: &[
            "Eco Friendly", "Zero Waste", "Sustainable", "Green Energy", "Solar", "Recycle",
            "Organic", "Carbon Neutral", "Climate",
        ],
        growth_factor: 1.3,
        seasonality: Seasonality::Low,
    },
    NicheCategory {
        name: "Business",
        keywords: &[
            "Remote Work", "Startup", "Freelance", "Coworking", "Entrepreneur", "Digital Nomad",
            "Leadership", "Teamwork", "Office",
        ],
        growth_factor: 1.0,
        seasonality: Seasonality::Low,
    },
    NicheCategory {
        name: "Health",
        keywords: &[
            "Mental Health", "Meditation", "Yoga", "Fitness", "Nutrition", "Sleep", "Holistic",
            "Therapy", "Healthcare",
        ],
        growth_factor: 1.15,
        seasonality: Seasonality::Medium,
    },
    NicheCategory {
        name: "Food",
        keywords: &[
            "Plant Based", "Vegan", "Healthy Eating", "Meal Prep", "Superfoods", "Organic Food",
            "Farm to Table", "Food Photography",
        ],
        growth_factor: 1.1,
        seasonality: Seasonality::High,
    },
    NicheCategory {
        name: "Travel",
        keywords: &[
            "Ecotourism", "Adventure", "Solo Travel", "Staycation", "Glamping", "Road Trip",
            "Beach", "Mountain", "City Break",
        ],
        growth_factor: 1.0,
        seasonality: Seasonality::High,
    },
    NicheCategory {
        name: "Creative",
        keywords: &[
            "Digital Art", "NFT Art", "Generative Art", "3D Design", "Motion Graphics",
            "Abstract", "Retro", "Aesthetic", "Gradient",
        ],
        growth_factor: 1.25,
        seasonality: Seasonality::Low,
    },
    NicheCategory {
        name: "Finance",
        keywords: &[
            "Cryptocurrency", "Fintech", "Investment", "Passive Income", "Stock Market",
            "Banking", "Money", "Wealth",
        ],
        growth_factor: 1.1,
        seasonality: Seasonality::Low,
    },
    NicheCategory {
        name: "Seasonal",
        keywords: &[
            "Christmas", "New Year", "Valentine", "Easter", "Halloween", "Thanksgiving",
            "Summer", "Winter", "Autumn", "Spring",
        ],
        growth_factor: 1.0,
        seasonality: Seasonality::VeryHigh,
    },
];

/// Look up a category by name (case-insensitive).
pub fn find_category(name: &str) -> Option<&'static NicheCategory> {
    NICHE_CATEGORIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
}

pub fn category_names() -> Vec<String> {
    NICHE_CATEGORIES.iter().map(|c| c.name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_category_case_insensitive() {
        assert!(find_category("technology").is_some());
        assert!(find_category("Technology").is_some());
        assert!(find_category("nonexistent").is_none());
    }

    #[test]
    fn test_growth_factors_at_least_one() {
        for category in NICHE_CATEGORIES {
            assert!(category.growth_factor >= 1.0, "{}", category.name);
            assert!(!category.keywords.is_empty(), "{}", category.name);
        }
    }

    #[test]
    fn test_peak_months_valid() {
        for seasonality in [
            Seasonality::Low,
            Seasonality::Medium,
            Seasonality::High,
            Seasonality::VeryHigh,
        ] {
            for &month in seasonality.peak_months() {
                assert!((1..=12).contains(&month));
            }
        }
        // Low seasonality is a year-round class
        assert_eq!(Seasonality::Low.peak_months().len(), 12);
        assert!(Seasonality::VeryHigh.is_peak_month(12));
        assert!(!Seasonality::VeryHigh.is_peak_month(7));
    }
}
