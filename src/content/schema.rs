//! Typed shapes of the site's content documents.
//!
//! Every field is optional with the default the templates fall back to, so a
//! sparse document still renders. A field of the wrong JSON type is a shape
//! error and fails only the section that reads it.

use serde::Deserialize;

// ==================== Shared ====================

/// Link with a visible label (navigation entries, footer links).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: Option<String>,
    pub href: Option<String>,
}

// ==================== homepage.json ====================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeroButton {
    pub text: Option<String>,
    pub href: Option<String>,
}

/// Hero banner used by the home, goals, about and signup pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub button: Option<HeroButton>,
}

/// Card shown in the homepage goals grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GoalCard {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
}

// ==================== goals.json ====================

/// Entry of the goals page list, with its key targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GoalDetail {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub targets: Vec<String>,
}

// ==================== about.json ====================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeamMember {
    pub name: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
}

// ==================== header.json ====================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Header {
    pub logo: Option<String>,
    pub languages: Vec<String>,
    pub nav: Vec<Link>,
    pub button: Option<Link>,
}

// ==================== footer.json ====================

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub logo: Option<String>,
    pub links: Vec<Link>,
    pub copyright: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hero_accepts_sparse_document() {
        let hero: Hero = serde_json::from_value(json!({ "title": "Act now" })).expect("hero");
        assert_eq!(hero.title.as_deref(), Some("Act now"));
        assert!(hero.button.is_none());
        assert!(hero.image.is_none());
    }

    #[test]
    fn test_header_defaults_to_empty_lists() {
        let header: Header = serde_json::from_value(json!({})).expect("header");
        assert!(header.languages.is_empty());
        assert!(header.nav.is_empty());
    }

    #[test]
    fn test_goal_detail_with_targets() {
        let goal: GoalDetail = serde_json::from_value(json!({
            "title": "Climate Action",
            "icon": "assets/icons/13.png",
            "targets": ["Halve emissions", "Protect forests"]
        }))
        .expect("goal");

        assert_eq!(goal.targets.len(), 2);
        assert!(goal.description.is_none());
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let footer: Result<Footer, _> = serde_json::from_value(json!({ "links": "not a list" }));
        assert!(footer.is_err());

        let hero: Result<Hero, _> = serde_json::from_value(json!({ "title": 42 }));
        assert!(hero.is_err());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let footer: Footer = serde_json::from_value(json!({
            "copyright": "© 2024",
            "social": { "twitter": "@green" }
        }))
        .expect("footer");
        assert_eq!(footer.copyright.as_deref(), Some("© 2024"));
    }
}
