//! Core types for fact requests and title classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when the prompt does not quote one.
pub const UNKNOWN_TITLE: &str = "Unknown Cosmic Object";

/// Topic category of an astronomical image, derived from its title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Emission, reflection and dark nebulae; gas clouds.
    Nebula,
    /// Spiral, elliptical and other galaxies.
    Galaxy,
    /// Open and globular star clusters, galaxy groups.
    Cluster,
    /// Supernovae and their remnants.
    SupernovaRemnant,
    /// Solar system planets.
    Planet,
    /// Anything the keyword table does not recognise.
    Generic,
}

impl Category {
    /// Returns the human-readable name of this category.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nebula => "Nebula",
            Self::Galaxy => "Galaxy",
            Self::Cluster => "Cluster",
            Self::SupernovaRemnant => "Supernova Remnant",
            Self::Planet => "Planet",
            Self::Generic => "Generic",
        }
    }

    /// Returns all categories in classification order.
    pub fn all() -> &'static [Category] {
        &[
            Self::Nebula,
            Self::Galaxy,
            Self::Cluster,
            Self::SupernovaRemnant,
            Self::Planet,
            Self::Generic,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which form of the title a template interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleCase {
    /// The title exactly as it appeared in the prompt.
    Original,
    /// The title lower-cased.
    Lower,
}

/// A fixed fact sentence with a `{title}` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactTemplate {
    /// Sentence text containing `{title}` where the title goes.
    pub text: &'static str,
    /// Form of the title substituted into `text`.
    pub case: TitleCase,
}

impl FactTemplate {
    /// Template interpolating the original-case title.
    pub const fn original(text: &'static str) -> Self {
        Self {
            text,
            case: TitleCase::Original,
        }
    }

    /// Template interpolating the lower-cased title.
    pub const fn lower(text: &'static str) -> Self {
        Self {
            text,
            case: TitleCase::Lower,
        }
    }

    /// Render this template for `title`.
    pub fn render(&self, title: &str) -> String {
        match self.case {
            TitleCase::Original => self.text.replace("{title}", title),
            TitleCase::Lower => self.text.replace("{title}", &title.to_lowercase()),
        }
    }
}

/// The inputs the fallback generator needs, read from one prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRequest {
    /// Name of the astronomical subject.
    pub title: String,
    /// Number of facts asked for, already clamped to the policy ceiling.
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_display_uses_name() {
        assert_eq!(Category::SupernovaRemnant.to_string(), "Supernova Remnant");
        assert_eq!(Category::Generic.to_string(), "Generic");
    }

    #[test]
    fn generic_is_last_in_classification_order() {
        let all = Category::all();
        assert_eq!(all.len(), 6);
        assert_eq!(all.first(), Some(&Category::Nebula));
        assert_eq!(all.last(), Some(&Category::Generic));
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::SupernovaRemnant).unwrap();
        assert_eq!(json, "\"supernova_remnant\"");
    }

    #[test]
    fn render_original_keeps_case() {
        let t = FactTemplate::original("About {title}.");
        assert_eq!(t.render("Crab Nebula"), "About Crab Nebula.");
    }

    #[test]
    fn render_lower_lowercases_title_only() {
        let t = FactTemplate::lower("The {title} Is Here.");
        assert_eq!(t.render("Pillars Of Creation"), "The pillars of creation Is Here.");
    }

    #[test]
    fn render_replaces_every_placeholder() {
        let t = FactTemplate::original("{title} and {title}");
        assert_eq!(t.render("M31"), "M31 and M31");
    }
}
