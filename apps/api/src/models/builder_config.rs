use serde::{Deserialize, Serialize};

/// Visual preferences for the rendered resume. Stored next to the resume itself.
///
/// Every field has a default so that a partially stored object is merged over the defaults
/// instead of being rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    pub font_family: String,
    pub base_font_size: u8,
    pub primary_color: String,
    pub secondary_color: String,
    pub skills_columns: u8,
    pub scale: f32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        BuilderConfig {
            font_family: "Montserrat".to_string(),
            base_font_size: 12,
            primary_color: "#3f51b5".to_string(),
            secondary_color: "#374151".to_string(),
            skills_columns: 1,
            scale: 1.0,
        }
    }
}
