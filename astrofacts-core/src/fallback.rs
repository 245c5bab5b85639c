//! Deterministic facts for when no generated response is available.
//!
//! The title is classified into a [`Category`] by keyword, then the first
//! `count` templates of that category are rendered with the title
//! substituted. Classification walks [`CATEGORY_KEYWORDS`] in order and the
//! first category with a matching keyword wins; a title with no match is
//! [`Category::Generic`].
//!
//! Each category carries seven templates, so a request for more than seven
//! facts receives seven.

use crate::types::{Category, FactTemplate};

/// Keyword sets checked in order against the lower-cased title.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Nebula, &["nebula", "cloud", "gas"]),
    (Category::Galaxy, &["galaxy", "spiral", "elliptical"]),
    (Category::Cluster, &["cluster", "group"]),
    (
        Category::SupernovaRemnant,
        &["supernova", "explosion", "remnant"],
    ),
    (
        Category::Planet,
        &["planet", "mars", "jupiter", "saturn", "venus", "mercury"],
    ),
];

const NEBULA: &[FactTemplate] = &[
    FactTemplate::original(
        "Nebulae like {title} are stellar nurseries where new stars are born from collapsing gas and dust.",
    ),
    FactTemplate::original(
        "The beautiful colors in {title} are created by different elements glowing at specific wavelengths.",
    ),
    FactTemplate::original(
        "This nebula spans several light-years across, containing enough material to form hundreds of stars.",
    ),
    FactTemplate::original(
        "Hydrogen gas in {title} glows red when ionized by ultraviolet light from young, hot stars nearby.",
    ),
    FactTemplate::original(
        "Dark lanes of dust in {title} block visible light but shine brightly to infrared telescopes.",
    ),
    FactTemplate::lower(
        "Despite its vivid appearance, the {title} is so diffuse that a cubic centimeter holds only a few hundred atoms.",
    ),
    FactTemplate::original(
        "Radiation and stellar winds from newborn stars are slowly sculpting and eroding the clouds of {title}.",
    ),
];

const GALAXY: &[FactTemplate] = &[
    FactTemplate::original(
        "The galaxy {title} contains billions of stars, each potentially hosting planetary systems.",
    ),
    FactTemplate::original(
        "Galaxies like {title} are held together by dark matter, which makes up about 85% of all matter.",
    ),
    FactTemplate::original(
        "The supermassive black hole at the center of {title} influences the motion of stars throughout the galaxy.",
    ),
    FactTemplate::original(
        "Light from the outer edges of {title} began its journey long before modern humans walked the Earth.",
    ),
    FactTemplate::original(
        "Over billions of years {title} has grown by merging with and absorbing smaller neighboring galaxies.",
    ),
    FactTemplate::lower(
        "Stars in the {title} orbit its center so slowly that a single revolution takes hundreds of millions of years.",
    ),
    FactTemplate::original(
        "Astronomers measure the distance to {title} using variable stars and supernovae as standard candles.",
    ),
];

const CLUSTER: &[FactTemplate] = &[
    FactTemplate::original(
        "Star clusters like {title} formed from the same giant molecular cloud, making all stars roughly the same age.",
    ),
    FactTemplate::original(
        "The gravitational binding of {title} has kept these stars together for millions of years.",
    ),
    FactTemplate::original(
        "Open clusters like {title} will eventually disperse as gravitational interactions scatter the stars.",
    ),
    FactTemplate::original(
        "Because its stars share a common distance, {title} lets astronomers compare stellar brightness directly.",
    ),
    FactTemplate::original(
        "The most massive stars in {title} burn through their fuel first, leaving the cluster redder as it ages.",
    ),
    FactTemplate::lower(
        "Seen from a planet inside the {title}, the night sky would blaze with thousands of brilliant stars.",
    ),
    FactTemplate::original(
        "Measuring where stars in {title} leave the main sequence reveals the age of the whole cluster.",
    ),
];

const SUPERNOVA_REMNANT: &[FactTemplate] = &[
    FactTemplate::original(
        "The supernova {title} released more energy in seconds than our Sun will produce in its entire lifetime.",
    ),
    FactTemplate::original(
        "Heavy elements forged in {title} are now scattered throughout space, enriching future star formation.",
    ),
    FactTemplate::original(
        "The shockwave from {title} continues to expand, heating and compressing nearby interstellar material.",
    ),
    FactTemplate::original(
        "Gas in {title} has been heated to millions of degrees, making it glow brightly in X-rays.",
    ),
    FactTemplate::original(
        "The collapsed core left behind by {title} may be a neutron star spinning many times per second.",
    ),
    FactTemplate::lower(
        "Material in the {title} is still racing outward at thousands of kilometers per second.",
    ),
    FactTemplate::original(
        "Shock fronts in {title} accelerate particles to nearly light speed, seeding the cosmic rays that reach Earth.",
    ),
];

const PLANET: &[FactTemplate] = &[
    FactTemplate::original(
        "The atmospheric conditions on {title} create unique weather patterns unlike anything on Earth.",
    ),
    FactTemplate::original(
        "Studying {title} helps astronomers understand planetary formation in our solar system.",
    ),
    FactTemplate::original(
        "The surface features visible on {title} tell a story of billions of years of geological evolution.",
    ),
    FactTemplate::original(
        "Robotic spacecraft have visited {title}, returning data that reshaped our picture of the solar system.",
    ),
    FactTemplate::original(
        "The length of a day on {title} differs greatly from a day on Earth because of its own rotation rate.",
    ),
    FactTemplate::lower(
        "Sunlight takes minutes to hours to reach the {title}, depending on where it sits in its orbit.",
    ),
    FactTemplate::original(
        "The gravity of {title} has shaped the orbits of moons, asteroids and comets in its neighborhood.",
    ),
];

const GENERIC: &[FactTemplate] = &[
    FactTemplate::lower(
        "The {title} represents one of the most fascinating phenomena in our universe.",
    ),
    FactTemplate::original(
        "Astronomical observations of objects like '{title}' help scientists understand the formation and evolution of cosmic structures.",
    ),
    FactTemplate::lower(
        "The light captured in this image of {title} may have traveled millions or billions of years to reach us.",
    ),
    FactTemplate::original(
        "Images like '{title}' are often assembled from many exposures taken through different color filters.",
    ),
    FactTemplate::lower(
        "Much of what makes the {title} visible is light at wavelengths our eyes cannot see, mapped to visible colors.",
    ),
    FactTemplate::original(
        "Every atom heavier than helium in a scene like '{title}' was forged inside an earlier generation of stars.",
    ),
    FactTemplate::lower(
        "Studying the {title} adds one more piece to the puzzle of how the universe evolved from the Big Bang.",
    ),
];

/// Classify `title` by case-insensitive keyword containment.
pub fn classify(title: &str) -> Category {
    let lower = title.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Generic)
}

/// Ordered fact templates for `category`.
pub fn templates(category: Category) -> &'static [FactTemplate] {
    match category {
        Category::Nebula => NEBULA,
        Category::Galaxy => GALAXY,
        Category::Cluster => CLUSTER,
        Category::SupernovaRemnant => SUPERNOVA_REMNANT,
        Category::Planet => PLANET,
        Category::Generic => GENERIC,
    }
}

/// Number of facts available for `title`'s category.
pub fn template_count(title: &str) -> usize {
    templates(classify(title)).len()
}

/// Render the first `count` facts for `title`.
///
/// Returns `min(count, template_count(title))` facts.
pub fn generate(title: &str, count: usize) -> Vec<String> {
    let category = classify(title);
    tracing::debug!(%category, count, "generating fallback facts");
    templates(category)
        .iter()
        .take(count)
        .map(|template| template.render(title))
        .collect()
}
