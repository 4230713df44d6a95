// ==========================================
// Roti Goolung Kitchen Core - Configuration
// ==========================================

/// Behavior switches for the kitchen workflow.
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// When true, a saved production snapshot whose location x product
    /// grid no longer matches the current targets is discarded and
    /// rebuilt. When false (the historical behavior) any saved
    /// snapshot is adopted as-is, even against changed targets.
    pub strict_targets_match: bool,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        KitchenConfig {
            strict_targets_match: false,
        }
    }
}
