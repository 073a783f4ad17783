//! The industry catalog.
//!
//! Read-only, process-lifetime data. Every `Industry` has exactly one entry.

use veripura_contracts::industry::{Industry, IndustryConfig};

/// Combined annual trade volume across the catalog, as shown in the sidebar.
pub const TOTAL_MARKET: &str = "$700B+";

const FOOD: IndustryConfig = IndustryConfig {
    icon: "🌾",
    market_size: "$296B",
    problem: "Traceability takes 7-14 days. 15-20% border rejection rate.",
    solution_points: &[
        "AI validates pesticide levels",
        "IOTA DID verifies organic credentials",
        "Real-time farm-to-shelf tracking",
    ],
};

const FASHION: IndustryConfig = IndustryConfig {
    icon: "👔",
    market_size: "$95B",
    problem: "7-tier supply chains lead to greenwashing and labor risks.",
    solution_points: &[
        "IOTA Hierarchies mapping",
        "Chemical compliance (REACH)",
        "Digital Passports for sustainability",
    ],
};

const PET_FOOD: IndustryConfig = IndustryConfig {
    icon: "🐾",
    market_size: "$28-33B",
    problem: "Salmonella zero tolerance and ingredient sourcing opacity.",
    solution_points: &[
        "BSE-free sourcing via DIDs",
        "Nutritional profile validation",
        "Ingredient provenance",
    ],
};

const COSMETICS: IndustryConfig = IndustryConfig {
    icon: "💄",
    market_size: "$17-18B",
    problem: "1,600+ prohibited substances. 12-month wait for safety assessors.",
    solution_points: &[
        "Auto-validation of ingredients",
        "Safety Assessor Marketplace",
        "EU CPNP integration",
    ],
};

const PHARMA: IndustryConfig = IndustryConfig {
    icon: "💊",
    market_size: "$325B",
    problem: "10% counterfeit rate. Temperature excursions cost $500k/batch.",
    solution_points: &[
        "API-to-patient traceability",
        "IoT feeless temperature monitoring",
        "QP network integration",
    ],
};

/// The static profile of `industry`.
pub fn industry_config(industry: Industry) -> &'static IndustryConfig {
    match industry {
        Industry::Food => &FOOD,
        Industry::Fashion => &FASHION,
        Industry::PetFood => &PET_FOOD,
        Industry::Cosmetics => &COSMETICS,
        Industry::Pharma => &PHARMA,
    }
}

/// A plausible product to pre-fill the description field with.
pub fn sample_product(industry: Industry) -> &'static str {
    match industry {
        Industry::Food => "Organic Sun-Dried Mangoes",
        Industry::Fashion => "Recycled Polyester Outdoor Jacket",
        Industry::PetFood => "Grain-Free Salmon Kibble 12kg",
        Industry::Cosmetics => "Vitamin C Brightening Serum 30ml",
        Industry::Pharma => "Amoxicillin 500mg Capsules",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_industry_has_a_profile() {
        for industry in Industry::ALL {
            let config = industry_config(industry);
            assert!(!config.icon.is_empty());
            assert!(config.market_size.starts_with('$'));
            assert_eq!(config.solution_points.len(), 3, "{industry}");
            assert!(!sample_product(industry).is_empty());
        }
    }

    #[test]
    fn food_profile_is_exact() {
        let food = industry_config(Industry::Food);
        assert_eq!(food.icon, "🌾");
        assert_eq!(food.market_size, "$296B");
        assert_eq!(
            food.problem,
            "Traceability takes 7-14 days. 15-20% border rejection rate."
        );
        assert_eq!(food.solution_points[1], "IOTA DID verifies organic credentials");
    }

    #[test]
    fn profiles_are_distinct() {
        let sizes: Vec<&str> = Industry::ALL
            .iter()
            .map(|i| industry_config(*i).market_size)
            .collect();
        assert_eq!(sizes, vec!["$296B", "$95B", "$28-33B", "$17-18B", "$325B"]);
        assert_eq!(TOTAL_MARKET, "$700B+");
    }
}
