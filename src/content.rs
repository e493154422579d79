use rust_embed::Embed;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

use crate::motion::MotionConfig;

pub static SITE: LazyLock<SiteContent> = LazyLock::new(|| {
    SiteContent::load().unwrap_or_else(|e| {
        log::warn!("falling back to empty site content: {e}");
        SiteContent::default()
    })
});

#[derive(Embed)]
#[folder = "content"]
pub struct ContentAssets;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content file {0} not found")]
    NotFound(String),
    #[error("Couldn't parse content file {name}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: f64,
    #[serde(default)]
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub href: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    /// Part of the name rendered with the accent gradient.
    pub highlight: String,
    pub role: String,
    pub tagline: String,
    pub availability: String,
    pub email: String,
    pub location: String,
    pub resume_url: String,
    pub about_heading: String,
    pub about: Vec<String>,
    pub stats: Vec<Stat>,
    pub nav: Vec<NavLink>,
    pub socials: Vec<SocialLink>,
    pub contact_blurb: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    pub accent: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub accent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub accent: String,
}

/// Parse one embedded JSON file.
pub fn load<T: DeserializeOwned>(name: &str) -> Result<T, ContentError> {
    let file = ContentAssets::get(name).ok_or_else(|| ContentError::NotFound(name.to_string()))?;
    serde_json::from_slice(&file.data).map_err(|source| ContentError::Parse {
        name: name.to_string(),
        source,
    })
}

/// Everything the page renders, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub profile: Profile,
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub experience: Vec<Job>,
    pub motion: MotionConfig,
}

impl SiteContent {
    pub fn load() -> Result<Self, ContentError> {
        Ok(Self {
            profile: load("profile.json")?,
            skills: load("skills.json")?,
            projects: load("projects.json")?,
            experience: load("experience.json")?,
            motion: load_motion_config(),
        })
    }
}

/// Motion parameters from `motion.json`, or the built-in set if the file is
/// missing or malformed.
pub fn load_motion_config() -> MotionConfig {
    match load::<MotionConfig>("motion.json") {
        Ok(config) => config,
        Err(e) => {
            log::warn!("using default motion config: {e}");
            MotionConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_content_parses() {
        let site = SiteContent::load().expect("bundled content should parse");
        assert!(!site.profile.name.is_empty());
        assert_eq!(site.profile.nav.len(), 5);
        assert_eq!(site.profile.nav[0].href, "#about");
        assert_eq!(site.skills.len(), 4);
        assert!(site.skills.iter().all(|c| !c.skills.is_empty()));
        assert!(!site.projects.is_empty());
        assert!(!site.experience.is_empty());
    }

    #[test]
    fn test_stats_keep_fractional_values() {
        let profile: Profile = load("profile.json").expect("profile should parse");
        let years = profile
            .stats
            .iter()
            .find(|s| s.label == "Years Exp")
            .expect("years stat");
        assert_eq!(years.value, 4.5);
        assert_eq!(years.suffix, "+");
    }

    #[test]
    fn test_bundled_motion_config_matches_defaults() {
        assert_eq!(load_motion_config(), MotionConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let err = load::<Profile>("nope.json").expect_err("should not exist");
        assert!(matches!(err, ContentError::NotFound(ref n) if n == "nope.json"));
    }

    #[test]
    fn test_parse_error_names_file() {
        // experience is an array, not a profile
        let err = load::<Profile>("experience.json").expect_err("wrong shape");
        match err {
            ContentError::Parse { name, .. } => assert_eq!(name, "experience.json"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
