//! Category vocabulary

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Transaction category label
///
/// The import engine only ever suggests a subset of these; the full list is
/// the vocabulary offered when a user re-categorizes a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Uncategorized,
    Groceries,
    Fuel,
    DiningOut,
    RepairsAndMaintenance,
    Travel,
    Utilities,
    InsuranceProperty,
    Subscriptions,
    Entertainment,
    Health,
    CouncilRates,
    WaterCharges,
    LandTax,
    BodyCorporate,
    AgentFees,
    Cleaning,
    Gardening,
    PestControl,
    InterestOnLoans,
    RentalIncome,
    Salary,
    InterestEarned,
    OtherIncome,
    Tax,
    TransferFamily,
    TransferBetweenAccounts,
    TransferOther,
    OtherExpense,
}

impl Category {
    /// All categories in dropdown order
    pub const ALL: [Category; 29] = [
        Category::Uncategorized,
        Category::Groceries,
        Category::Fuel,
        Category::DiningOut,
        Category::RepairsAndMaintenance,
        Category::Travel,
        Category::Utilities,
        Category::InsuranceProperty,
        Category::Subscriptions,
        Category::Entertainment,
        Category::Health,
        Category::CouncilRates,
        Category::WaterCharges,
        Category::LandTax,
        Category::BodyCorporate,
        Category::AgentFees,
        Category::Cleaning,
        Category::Gardening,
        Category::PestControl,
        Category::InterestOnLoans,
        Category::RentalIncome,
        Category::Salary,
        Category::InterestEarned,
        Category::OtherIncome,
        Category::Tax,
        Category::TransferFamily,
        Category::TransferBetweenAccounts,
        Category::TransferOther,
        Category::OtherExpense,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Uncategorized => "Uncategorized",
            Category::Groceries => "Groceries",
            Category::Fuel => "Fuel",
            Category::DiningOut => "Dining Out",
            Category::RepairsAndMaintenance => "Repairs & Maintenance",
            Category::Travel => "Travel",
            Category::Utilities => "Utilities",
            Category::InsuranceProperty => "Insurance - Property",
            Category::Subscriptions => "Subscriptions",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::CouncilRates => "Council Rates",
            Category::WaterCharges => "Water Charges",
            Category::LandTax => "Land Tax",
            Category::BodyCorporate => "Body Corporate",
            Category::AgentFees => "Agent Fees",
            Category::Cleaning => "Cleaning",
            Category::Gardening => "Gardening",
            Category::PestControl => "Pest Control",
            Category::InterestOnLoans => "Interest on Loans",
            Category::RentalIncome => "Rental Income",
            Category::Salary => "Salary",
            Category::InterestEarned => "Interest Earned",
            Category::OtherIncome => "Other Income",
            Category::Tax => "Tax",
            Category::TransferFamily => "Transfer - Family",
            Category::TransferBetweenAccounts => "Transfer - Between Accounts",
            Category::TransferOther => "Transfer - Other",
            Category::OtherExpense => "Other Expense",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Serialized as the display label so downstream storage keeps plain strings
impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Category::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category: {}", label)))
    }
}
