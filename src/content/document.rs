//! Typed content-store documents
//!
//! Raw JSON from the store is checked here, once, before anything else
//! sees it. A record that does not fit its kind is rejected with
//! `None` and the caller decides what to log.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").unwrap();
}

/// Store projections return `null` for unset fields
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Type tag distinguishing schemas in the content store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Project,
    Skill,
    Profile,
    Contact,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Project,
        DocumentKind::Skill,
        DocumentKind::Profile,
        DocumentKind::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Project => "project",
            DocumentKind::Skill => "skill",
            DocumentKind::Profile => "profile",
            DocumentKind::Contact => "contact",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_end_matches('s') {
            "project" => Ok(DocumentKind::Project),
            "skill" => Ok(DocumentKind::Skill),
            "profile" => Ok(DocumentKind::Profile),
            "contact" => Ok(DocumentKind::Contact),
            other => anyhow::bail!(
                "Unknown type: {}. Available: project, skill, profile, contact",
                other
            ),
        }
    }
}

/// A portfolio project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id", default, deserialize_with = "null_default")]
    pub id: String,

    pub title: String,

    /// Rich-text body
    #[serde(default)]
    pub description: Value,

    /// Repository URL; empty or absent when private
    #[serde(default)]
    pub github: Option<String>,

    #[serde(default, deserialize_with = "null_default")]
    pub is_private_repo: bool,

    #[serde(default)]
    pub demo: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default, deserialize_with = "null_default")]
    pub tags: Vec<String>,

    /// Display order, lower first
    #[serde(default, deserialize_with = "null_default")]
    pub order: i64,
}

impl Project {
    /// Validate a raw store record
    pub fn from_value(value: Value) -> Option<Self> {
        let project: Project = serde_json::from_value(value).ok()?;
        if project.title.trim().is_empty() {
            return None;
        }
        Some(project)
    }

    /// Repository link to show, if any
    pub fn repository(&self) -> Option<&str> {
        if self.is_private_repo {
            return None;
        }
        self.github.as_deref().filter(|url| !url.trim().is_empty())
    }
}

/// Skill grouping used for filtering and section headings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Tools,
    Ai,
    Design,
    Database,
    Other,
}

impl SkillCategory {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("frontend") => SkillCategory::Frontend,
            Some("backend") => SkillCategory::Backend,
            Some("tools") => SkillCategory::Tools,
            Some("ai") => SkillCategory::Ai,
            Some("design") => SkillCategory::Design,
            Some("database") => SkillCategory::Database,
            _ => SkillCategory::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Backend => "Backend",
            SkillCategory::Tools => "DevOps & Tools",
            SkillCategory::Ai => "AI & ML",
            SkillCategory::Design => "Design",
            SkillCategory::Database => "Database",
            SkillCategory::Other => "Other",
        }
    }
}

/// Self-assessed proficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value?.trim() {
            "beginner" => Some(SkillLevel::Beginner),
            "intermediate" => Some(SkillLevel::Intermediate),
            "advanced" => Some(SkillLevel::Advanced),
            "expert" => Some(SkillLevel::Expert),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

/// Wire shape of a skill before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSkill {
    #[serde(rename = "_id", default, deserialize_with = "null_default")]
    id: String,
    name: String,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    proficiency_percentage: Option<f64>,
    #[serde(default)]
    years_of_experience: Option<f64>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    featured: Option<bool>,
    #[serde(default)]
    order: Option<i64>,
}

/// A skill badge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub subtitle: Option<String>,
    pub category: SkillCategory,
    pub level: Option<SkillLevel>,
    /// 0..=100
    pub proficiency_percentage: Option<u8>,
    pub years_of_experience: Option<f64>,
    pub image_url: Option<String>,
    /// `#rgb` or `#rrggbb`
    pub color: Option<String>,
    pub featured: bool,
    pub order: Option<i64>,
}

impl Skill {
    /// Sort key used when `order` is missing
    pub const UNORDERED: i64 = 999_999;

    /// Validate a raw store record
    pub fn from_value(value: Value) -> Option<Self> {
        let raw: RawSkill = serde_json::from_value(value).ok()?;
        let name = raw.name.trim().to_string();
        if name.is_empty() {
            return None;
        }

        Some(Skill {
            id: raw.id,
            name,
            subtitle: raw.subtitle.filter(|s| !s.trim().is_empty()),
            category: SkillCategory::parse(raw.category.as_deref()),
            level: SkillLevel::parse(raw.level.as_deref()),
            proficiency_percentage: raw
                .proficiency_percentage
                .filter(|p| p.is_finite())
                .map(|p| p.round().clamp(0.0, 100.0) as u8),
            years_of_experience: raw.years_of_experience.filter(|y| y.is_finite() && *y >= 0.0),
            image_url: raw.image_url.filter(|s| !s.trim().is_empty()),
            color: raw.color.filter(|c| HEX_COLOR.is_match(c)),
            featured: raw.featured.unwrap_or(false),
            order: raw.order,
        })
    }

    pub fn sort_order(&self) -> i64 {
        self.order.unwrap_or(Self::UNORDERED)
    }

    /// Key used to spot the same skill entered twice
    pub fn dedup_key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Owner profile shown in the hero and about sections
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id", default, deserialize_with = "null_default")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub short_bio: Option<String>,

    /// Either a plain string or a rich-text body
    #[serde(default)]
    pub about: Value,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub github: Option<String>,

    #[serde(default)]
    pub linkedin: Option<String>,
}

impl Profile {
    /// Validate a raw store record
    pub fn from_value(value: Value) -> Option<Self> {
        let profile: Profile = serde_json::from_value(value).ok()?;
        if profile.name.trim().is_empty() {
            return None;
        }
        Some(profile)
    }

    /// Whether `about` carries anything worth showing
    pub fn has_about(&self) -> bool {
        match &self.about {
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => false,
        }
    }
}

/// A stored contact-form message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(rename = "_id", default, deserialize_with = "null_default")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub received_at: Option<String>,
}

impl ContactMessage {
    /// Validate a raw store record
    pub fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_parse() {
        assert_eq!("project".parse::<DocumentKind>().unwrap(), DocumentKind::Project);
        assert_eq!("Skills".parse::<DocumentKind>().unwrap(), DocumentKind::Skill);
        assert_eq!("contacts".parse::<DocumentKind>().unwrap(), DocumentKind::Contact);
        assert!("post".parse::<DocumentKind>().is_err());
        assert_eq!(DocumentKind::Profile.to_string(), "profile");
    }

    #[test]
    fn test_project_validation() {
        let project = Project::from_value(json!({
            "_id": "p1",
            "title": "Shop",
            "description": [{"children": [{"text": "x"}]}],
            "github": "",
            "isPrivateRepo": false,
            "tags": ["Rust"],
            "order": 2
        }))
        .unwrap();
        assert_eq!(project.id, "p1");
        assert_eq!(project.order, 2);
        assert_eq!(project.repository(), None);

        assert!(Project::from_value(json!({"title": "  "})).is_none());
        assert!(Project::from_value(json!({"title": "x", "tags": "Rust"})).is_none());
        assert!(Project::from_value(json!(null)).is_none());
    }

    #[test]
    fn test_private_repo_hides_github() {
        let project = Project::from_value(json!({
            "title": "Secret",
            "github": "https://github.com/me/secret",
            "isPrivateRepo": true
        }))
        .unwrap();
        assert_eq!(project.repository(), None);
    }

    #[test]
    fn test_skill_validation() {
        let skill = Skill::from_value(json!({
            "_id": "s1",
            "name": " Rust ",
            "category": "backend",
            "level": "expert",
            "proficiencyPercentage": 140,
            "color": "#DEA584",
            "featured": true
        }))
        .unwrap();
        assert_eq!(skill.name, "Rust");
        assert_eq!(skill.category, SkillCategory::Backend);
        assert_eq!(skill.level, Some(SkillLevel::Expert));
        assert_eq!(skill.proficiency_percentage, Some(100));
        assert_eq!(skill.color.as_deref(), Some("#DEA584"));
        assert_eq!(skill.sort_order(), Skill::UNORDERED);

        let skill = Skill::from_value(json!({
            "name": "Figma",
            "category": "painting",
            "level": "guru",
            "color": "red"
        }))
        .unwrap();
        assert_eq!(skill.category, SkillCategory::Other);
        assert_eq!(skill.level, None);
        assert_eq!(skill.color, None);
        assert!(!skill.featured);

        assert!(Skill::from_value(json!({"subtitle": "no name"})).is_none());
    }

    #[test]
    fn test_profile_about_shapes() {
        let profile = Profile::from_value(json!({"name": "Ada", "about": "Hello"})).unwrap();
        assert!(profile.has_about());

        let profile = Profile::from_value(json!({"name": "Ada", "about": []})).unwrap();
        assert!(!profile.has_about());

        let profile = Profile::from_value(json!({"name": "Ada"})).unwrap();
        assert!(!profile.has_about());
    }
}
