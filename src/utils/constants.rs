//! Constants Module - Single Source of Truth
//!
//! All fixed strings and defaults used across the application live here.

// ============================================
// APPLICATION CONSTANTS
// ============================================

/// Application name
pub const APP_NAME: &str = "DiaScreen";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shown with every result, regardless of classification
pub const DISCLAIMER: &str = "⚕️  This screening is for educational purposes only and is not a \
medical diagnosis. Consult a qualified healthcare professional about any health concerns.";

// ============================================
// SCREENING DEFAULTS
// ============================================

/// Default simulated processing pause (milliseconds)
pub const DEFAULT_DELAY_MS: u64 = 1500;

/// Default telemetry export directory
pub const DEFAULT_TELEMETRY_DIR: &str = "./telemetry";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disclaimer_mentions_no_diagnosis() {
        assert!(DISCLAIMER.contains("not a medical diagnosis"));
    }
}
