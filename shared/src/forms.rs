/// Toast shown when a form is submitted with blank required fields
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Border color applied to a blank required field
pub const INVALID_FIELD_BORDER: &str = "var(--accent)";

/// Payment method whose instructions panel is shown on selection
pub const GCASH_PAYMENT_METHOD: &str = "gcash";

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn shows_gcash_instructions(payment_method: &str) -> bool {
    payment_method == GCASH_PAYMENT_METHOD
}
