// Standardized error codes reported by OncoBill tools

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INPUT_TOO_LARGE: &str = "VALIDATION_1003";
}

pub mod catalog {
    pub const INVALID_REFERENCE_TABLE: &str = "CATALOG_2001";
}

pub mod config {
    pub const SOURCE_NOT_FOUND: &str = "CONFIG_3001";
    pub const PARSE_FAILED: &str = "CONFIG_3002";
    pub const INVALID_VALUE: &str = "CONFIG_3003";
}

pub mod system {
    pub const IO_FAILED: &str = "SYS_4001";
    pub const SERIALIZATION_FAILED: &str = "SYS_4002";
    pub const INTERNAL: &str = "SYS_4999";
}
