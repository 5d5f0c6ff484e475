//! Column names shared across stages
//!
//! Names follow the source datasets verbatim.

// Review table
pub const GENDER: &str = "Gender";
pub const EDUCATION: &str = "Education";
pub const PURCHASED: &str = "Purchased";
pub const REVIEW: &str = "Review";
pub const SENTIMENT: &str = "Sentiment";
pub const POSITIVE_REVIEW: &str = "Positive_Review";

// Profile table
pub const ID: &str = "ID";
pub const YEAR_BIRTH: &str = "Year_Birth";
pub const INCOME: &str = "Income";
pub const TEENHOME: &str = "Teenhome";
pub const DT_CUSTOMER: &str = "Dt_Customer";
pub const RECENCY: &str = "Recency";
pub const MARITAL_STATUS: &str = "Marital_Status";
pub const RESPONSE: &str = "Response";
pub const TOTAL_SPENT: &str = "Total_Spent";
pub const TOTAL_PURCHASES: &str = "Total_Purchases";

/// Columns the review cleaner requires
pub const REQUIRED_REVIEW_COLS: &[&str] = &[GENDER, EDUCATION, PURCHASED, REVIEW];

/// Columns the profile cleaner requires
pub const REQUIRED_PROFILE_COLS: &[&str] = &[
    ID,
    YEAR_BIRTH,
    INCOME,
    TEENHOME,
    DT_CUSTOMER,
    RECENCY,
    MARITAL_STATUS,
    RESPONSE,
];

/// Columns the KPI stage requires from each table
pub const KPI_REVIEW_COLS: &[&str] = &[REVIEW, PURCHASED];
pub const KPI_PROFILE_COLS: &[&str] = &[ID, RECENCY];

/// Columns the KPI stage derives; dropped from inputs before re-deriving
pub const DERIVED_REVIEW_COLS: &[&str] = &[SENTIMENT, POSITIVE_REVIEW];
pub const DERIVED_PROFILE_COLS: &[&str] = &[TOTAL_SPENT, TOTAL_PURCHASES];

/// Closed marital status set; anything else maps to `OTHER_MARITAL_STATUS`
pub const VALID_MARITAL_STATUS: &[&str] = &["Married", "Together", "Single", "Divorced", "Widow"];
pub const OTHER_MARITAL_STATUS: &str = "Other";

/// Inclusive birth year bounds
pub const MIN_BIRTH_YEAR: i64 = 1900;
pub const MAX_BIRTH_YEAR: i64 = 2025;
