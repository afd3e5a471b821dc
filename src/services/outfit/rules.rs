//! Static color and style knowledge used when matching items.

/// Colors that pair with anything
pub const NEUTRAL_COLORS: [&str; 7] = ["white", "black", "gray", "beige", "cream", "tan", "navy"];

/// Forward-only lookup: reference color → colors that complement it
const COMPLEMENTARY_PAIRS: [(&str, &[&str]); 9] = [
    ("blue", &["orange", "tan", "cream"]),
    ("red", &["green", "gray"]),
    ("green", &["red", "pink"]),
    ("yellow", &["purple", "navy"]),
    ("purple", &["yellow", "cream"]),
    ("orange", &["blue", "navy"]),
    ("pink", &["green", "gray"]),
    ("navy", &["white", "cream", "tan", "orange"]),
    ("brown", &["blue", "cream", "white"]),
];

const STYLE_COMPATIBILITY: [(&str, &[&str]); 4] = [
    ("casual", &["casual", "sporty", "streetwear"]),
    ("formal", &["formal"]),
    ("sporty", &["sporty", "casual"]),
    ("streetwear", &["streetwear", "casual", "sporty"]),
];

const STYLE_TAGS: [(&str, &str); 4] = [
    ("casual", "Clean Casual"),
    ("formal", "Smart Formal"),
    ("sporty", "Active Fit"),
    ("streetwear", "Street Style"),
];

const STYLE_DESCRIPTIONS: [(&str, &[&str]); 4] = [
    (
        "casual",
        &[
            "easy, balanced, works today",
            "relaxed vibes, effortless style",
            "simple and clean look",
        ],
    ),
    (
        "formal",
        &[
            "polished and professional",
            "sharp and sophisticated",
            "dressed to impress",
        ],
    ),
    (
        "sporty",
        &[
            "active and ready to move",
            "comfortable with an edge",
            "athleisure done right",
        ],
    ),
    (
        "streetwear",
        &[
            "urban cool, street ready",
            "bold statement piece",
            "trendy and expressive",
        ],
    ),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}

/// Expects a lowercased color name
pub fn is_neutral(color: &str) -> bool {
    NEUTRAL_COLORS.contains(&color)
}

/// Colors that complement `color`; empty for colors outside the table
pub fn complements(color: &str) -> &'static [&'static str] {
    lookup(&COMPLEMENTARY_PAIRS, color).unwrap_or(&[])
}

/// Whether `candidate` can be worn with an item of style `reference`.
/// Unknown reference styles only accept themselves.
pub fn is_style_compatible(reference: &str, candidate: &str) -> bool {
    match lookup(&STYLE_COMPATIBILITY, reference) {
        Some(compatible) => compatible.contains(&candidate),
        None => reference == candidate,
    }
}

/// Display label for an outfit's dominant style
pub fn style_tag(style: &str) -> &'static str {
    lookup(&STYLE_TAGS, style).unwrap_or("Clean Casual")
}

/// Flavor phrases for an outfit's dominant style
pub fn style_descriptions(style: &str) -> &'static [&'static str] {
    lookup(&STYLE_DESCRIPTIONS, style)
        .or_else(|| lookup(&STYLE_DESCRIPTIONS, "casual"))
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navy_is_neutral() {
        assert!(is_neutral("navy"));
        assert!(!is_neutral("red"));
    }

    #[test]
    fn test_complements_are_forward_only() {
        assert!(complements("blue").contains(&"orange"));
        assert!(complements("orange").contains(&"blue"));
        assert!(complements("tan").is_empty());
        assert!(!complements("white").contains(&"navy"));
    }

    #[test]
    fn test_formal_only_matches_formal() {
        assert!(is_style_compatible("formal", "formal"));
        assert!(!is_style_compatible("formal", "casual"));
    }

    #[test]
    fn test_casual_accepts_sporty_and_streetwear() {
        assert!(is_style_compatible("casual", "sporty"));
        assert!(is_style_compatible("casual", "streetwear"));
        assert!(!is_style_compatible("sporty", "streetwear"));
    }

    #[test]
    fn test_unknown_style_only_matches_itself() {
        assert!(is_style_compatible("boho", "boho"));
        assert!(!is_style_compatible("boho", "casual"));
    }

    #[test]
    fn test_unknown_style_falls_back_to_casual_labels() {
        assert_eq!(style_tag("boho"), "Clean Casual");
        assert_eq!(style_descriptions("boho"), style_descriptions("casual"));
        assert_eq!(style_tag("streetwear"), "Street Style");
    }
}
