//! Keyword category guesser
//!
//! Suggestions only. Rules are checked in order against the upper-cased raw
//! description and the first match wins, so merchant brands sit above the
//! generic rental and transfer phrases they might contain.

use crate::domain::Category;

/// How a rule's keywords must appear in the description
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Any one keyword
    Any(&'static [&'static str]),
    /// Every keyword
    All(&'static [&'static str]),
}

impl Matcher {
    fn matches(&self, haystack: &str) -> bool {
        match self {
            Matcher::Any(keywords) => keywords.iter().any(|k| haystack.contains(k)),
            Matcher::All(keywords) => keywords.iter().all(|k| haystack.contains(k)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub matcher: Matcher,
    pub category: Category,
}

const fn any(keywords: &'static [&'static str], category: Category) -> CategoryRule {
    CategoryRule { matcher: Matcher::Any(keywords), category }
}

const fn all(keywords: &'static [&'static str], category: Category) -> CategoryRule {
    CategoryRule { matcher: Matcher::All(keywords), category }
}

/// Ordered rule table; keywords are upper case
pub const RULES: &[CategoryRule] = &[
    any(
        &["WOOLWORTHS", "COLES", "ALDI", "IGA", "COSTCO", "FOODWORKS", "FOODLAND"],
        Category::Groceries,
    ),
    any(
        &[
            "AMPOL", "BP ", "SHELL", "CALTEX", "7-ELEVEN", "PUMA ENERGY", "UNITED PETROL",
            "LIBERTY OIL",
        ],
        Category::Fuel,
    ),
    any(&["BUNNINGS", "MITRE 10", "TOTAL TOOLS", "MASTERS"], Category::RepairsAndMaintenance),
    any(
        &["SYNERGY", "WATER CORP", "ORIGIN ENERGY", "AGL", "ALINTA", "HORIZON POWER"],
        Category::Utilities,
    ),
    any(&["TELSTRA", "OPTUS", "VODAFONE", "TPG", "AUSSIE BROADBAND"], Category::Utilities),
    any(&["COUNCIL", "SHIRE", "RATES"], Category::CouncilRates),
    any(
        &["INSURANCE", "NRMA", "RACQ", "RAC ", "ALLIANZ", "SUNCORP", "QBE", "YOUI"],
        Category::InsuranceProperty,
    ),
    any(&["STRATA", "BODY CORP", "OWNERS CORP"], Category::BodyCorporate),
    any(&["PROPERTY MANAGEMENT", "REAL ESTATE", "RENTAL MANAGEMENT"], Category::AgentFees),
    any(&["RENTAL", "RENT PAYMENT", "TENANT"], Category::RentalIncome),
    all(&["INTEREST", "LOAN"], Category::InterestOnLoans),
    any(&["ATO", "AUSTRALIAN TAX", "TAX OFFICE"], Category::Tax),
    any(
        &[
            "MCDONALD", "KFC", "HUNGRY JACK", "SUBWAY", "DOMINOS", "PIZZA HUT", "NANDOS", "GRILL'D",
            "GUZMAN",
        ],
        Category::DiningOut,
    ),
    any(&["UBER EATS", "DOORDASH", "MENULOG", "DELIVEROO"], Category::DiningOut),
    any(
        &[
            "QANTAS", "VIRGIN", "JETSTAR", "FLIGHT CENTRE", "BOOKING.COM", "AIRBNB", "EXPEDIA",
            "WEBJET",
        ],
        Category::Travel,
    ),
    any(
        &[
            "NETFLIX", "SPOTIFY", "DISNEY+", "AMAZON PRIME", "STAN", "YOUTUBE", "APPLE.COM",
            "GOOGLE STORAGE", "MICROSOFT", "ADOBE",
        ],
        Category::Subscriptions,
    ),
    any(&["TRANSFER TO", "TFR TO"], Category::TransferFamily),
    any(&["TRANSFER BETWEEN", "INTERNAL TRANSFER"], Category::TransferBetweenAccounts),
];

/// Suggest a category for a raw (uncleaned) description
pub fn guess_category(raw_description: &str) -> Category {
    let haystack = raw_description.to_uppercase();
    RULES
        .iter()
        .find(|rule| rule.matcher.matches(&haystack))
        .map(|rule| rule.category)
        .unwrap_or(Category::Uncategorized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("EFTPOS WOOLWORTHS 1234 PERTH", Category::Groceries)]
    #[case("coles express", Category::Groceries)]
    #[case("BP NORTHBRIDGE", Category::Fuel)]
    #[case("Bunnings Warehouse", Category::RepairsAndMaintenance)]
    #[case("SYNERGY ELECTRICITY", Category::Utilities)]
    #[case("Telstra Mobile", Category::Utilities)]
    #[case("CITY OF PERTH COUNCIL", Category::CouncilRates)]
    #[case("RAC INSURANCE", Category::InsuranceProperty)]
    #[case("STRATA LEVY Q3", Category::BodyCorporate)]
    #[case("RAY WHITE REAL ESTATE", Category::AgentFees)]
    #[case("RENT PAYMENT SMITH", Category::RentalIncome)]
    #[case("INTEREST CHARGED HOME LOAN", Category::InterestOnLoans)]
    #[case("ATO PAYMENT", Category::Tax)]
    #[case("MCDONALDS MORLEY", Category::DiningOut)]
    #[case("UBER EATS", Category::DiningOut)]
    #[case("QANTAS AIRWAYS", Category::Travel)]
    #[case("NETFLIX.COM", Category::Subscriptions)]
    #[case("Transfer to Mum", Category::TransferFamily)]
    #[case("INTERNAL TRANSFER SAVINGS", Category::TransferBetweenAccounts)]
    #[case("SOMETHING ELSE ENTIRELY", Category::Uncategorized)]
    #[case("", Category::Uncategorized)]
    fn test_guess(#[case] description: &str, #[case] expected: Category) {
        assert_eq!(guess_category(description), expected);
    }

    #[test]
    fn test_first_match_wins() {
        // Groceries is checked before Rental Income
        assert_eq!(guess_category("COLES RENTAL"), Category::Groceries);
        // Agent Fees is checked before Rental Income
        assert_eq!(guess_category("RENTAL MANAGEMENT FEE"), Category::AgentFees);
    }

    #[test]
    fn test_all_of_rule_needs_every_keyword() {
        assert_eq!(guess_category("INTEREST EARNED"), Category::Uncategorized);
        assert_eq!(guess_category("LOAN FEE"), Category::Uncategorized);
    }
}
