// ✅ Validation Utilities - pure field checks shared by every device
//
// Constructors truncate or fall back to defaults, setters reject.
// Both paths go through the functions below.

// ============================================================================
// FIXED ENUMERATIONS
// ============================================================================

/// Manufacturers a device may carry (matched case-insensitively)
pub const MANUFACTURER_NAMES: [&str; 5] = ["APPLE", "SAMSUNG", "Garmin", "FitBit", "Whoop"];

/// Display panels a SmartWatch may carry (matched case-insensitively)
pub const DISPLAY_TYPES: [&str; 4] = ["AMOLED", "LCD", "LED", "TFT"];

// ============================================================================
// FIELD CONSTRAINTS
// ============================================================================

pub const MIN_PRICE: f64 = 20.0;
pub const MAX_SIZE_LEN: usize = 10;
pub const MAX_MATERIAL_LEN: usize = 20;
pub const MAX_MODEL_NAME_LEN: usize = 30;
pub const MAX_ID_LEN: usize = 10;

pub const DEFAULT_MANUFACTURER: &str = "unknown";
pub const DEFAULT_ID: &str = "unknown";
pub const DEFAULT_DISPLAY_TYPE: &str = "LCD";

// ============================================================================
// CHECKS
// ============================================================================

/// First `max_len` characters of `s` (or `s` itself when short enough)
pub fn truncate(s: &str, max_len: usize) -> String {
    s.chars().take(max_len).collect()
}

/// NaN and infinities never pass; they cannot be stored as JSON numbers
pub fn is_above_minimum(value: f64, minimum: f64) -> bool {
    value.is_finite() && value >= minimum
}

/// Case-insensitive equality over full Unicode case folding ("émile" == "ÉMILE")
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Length is counted in chars, so multi-byte text is not penalised
pub fn is_valid_length(s: &str, max_len: usize) -> bool {
    s.chars().count() <= max_len
}

pub fn is_valid_enum_member(value: &str, allowed: &[&str]) -> bool {
    allowed.iter().any(|member| eq_ignore_case(member, value))
}

pub fn is_valid_manufacturer(name: &str) -> bool {
    is_valid_enum_member(name, &MANUFACTURER_NAMES)
}

pub fn is_valid_display_type(display_type: &str) -> bool {
    is_valid_enum_member(display_type, &DISPLAY_TYPES)
}

/// "APPLE, SAMSUNG, Garmin" - used in shell prompts
pub fn format_list(allowed: &[&str]) -> String {
    allowed.join(", ")
}

pub fn to_two_decimal_places(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
