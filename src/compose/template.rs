// SPDX-License-Identifier: GPL-3.0-only

//! Strip layout templates

use serde::{Deserialize, Serialize};

/// Named layout strategy for the composite strip.
///
/// Chosen once per session before capture begins; the variant decides both
/// the placement geometry and the photo-count bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Vertical strip of equal-height stacked frames
    #[default]
    Classic,
    /// 2×2 photo grid
    Grid,
    /// Overlapping tilted polaroid cards
    Polaroid,
}

impl Template {
    /// All variants for UI iteration
    pub const ALL: [Template; 3] = [Template::Classic, Template::Grid, Template::Polaroid];

    /// Display name for the template
    pub fn display_name(&self) -> &'static str {
        match self {
            Template::Classic => "Classic",
            Template::Grid => "Grid",
            Template::Polaroid => "Polaroid",
        }
    }

    /// Most photos a strip of this template can hold
    pub fn max_photos(&self) -> usize {
        match self {
            Template::Classic => 4,
            Template::Grid => 4,
            Template::Polaroid => 4,
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Template::Classic),
            "grid" => Ok(Template::Grid),
            "polaroid" => Ok(Template::Polaroid),
            other => Err(format!("Unknown template: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for template in Template::ALL {
            let round_tripped: Template = template
                .display_name()
                .to_lowercase()
                .parse()
                .unwrap();
            assert_eq!(round_tripped, template);
        }
        assert!("diagonal".parse::<Template>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Template::Polaroid).unwrap();
        assert_eq!(json, "\"polaroid\"");
    }
}
