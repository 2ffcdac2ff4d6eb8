//! Content loader - fetches documents from the store with local fallbacks

use anyhow::Result;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

use super::document::{ContactMessage, DocumentKind, Profile, Project, Skill};
use super::fallback::{default_subtitle, fallback_profile, fallback_projects, fallback_skills};
use crate::cms::{CmsError, ContentStore};
use crate::config::SiteConfig;

/// Everything the portfolio page shows
#[derive(Debug, Clone)]
pub struct SiteContent {
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
}

/// Loads and validates content for a page render
pub struct ContentLoader<'a> {
    store: Arc<dyn ContentStore>,
    config: &'a SiteConfig,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(store: Arc<dyn ContentStore>, config: &'a SiteConfig) -> Self {
        Self { store, config }
    }

    /// Load every section of the page; reads are issued concurrently
    pub async fn load_all(&self) -> SiteContent {
        let (profile, projects, skills) =
            tokio::join!(self.load_profile(), self.load_projects(), self.load_skills());
        SiteContent {
            profile,
            projects,
            skills,
        }
    }

    /// Load projects, lowest `order` first
    pub async fn load_projects(&self) -> Vec<Project> {
        let mut projects = match self.fetch_list(DocumentKind::Project).await {
            Ok(values) => validate(values, Project::from_value, DocumentKind::Project),
            Err(e) => {
                tracing::warn!("Failed to fetch projects, using fallback: {}", e);
                return fallback_projects();
            }
        };

        if projects.is_empty() {
            tracing::info!("No projects in the content store, using fallback");
            return fallback_projects();
        }

        projects.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));
        projects
    }

    /// Load skills: deduplicated by name, featured first, then by order and name
    pub async fn load_skills(&self) -> Vec<Skill> {
        let skills = match self.fetch_list(DocumentKind::Skill).await {
            Ok(values) => validate(values, Skill::from_value, DocumentKind::Skill),
            Err(e) => {
                tracing::warn!("Failed to fetch skills, using fallback: {}", e);
                return fallback_skills();
            }
        };

        if skills.is_empty() {
            tracing::info!("No skills in the content store, using fallback");
            return fallback_skills();
        }

        arrange_skills(skills)
    }

    /// Load the profile, or the configured fallback
    pub async fn load_profile(&self) -> Profile {
        match self.store.fetch(DocumentKind::Profile).await {
            Ok(Value::Null) => {
                tracing::info!("No profile in the content store, using fallback");
                fallback_profile(self.config)
            }
            Ok(value) => {
                // A query without [0] yields an array; take its head
                let value = match value {
                    Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
                    other => other,
                };
                Profile::from_value(value).unwrap_or_else(|| {
                    tracing::warn!("Profile document failed validation, using fallback");
                    fallback_profile(self.config)
                })
            }
            Err(e) => {
                tracing::warn!("Failed to fetch profile, using fallback: {}", e);
                fallback_profile(self.config)
            }
        }
    }

    /// Load stored contact messages, newest first; errors propagate
    pub async fn load_contacts(&self) -> Result<Vec<ContactMessage>> {
        let values = self.fetch_list(DocumentKind::Contact).await?;
        let mut messages = validate(values, ContactMessage::from_value, DocumentKind::Contact);
        messages.sort_by(|a, b| b.received_at.cmp(&a.received_at));
        Ok(messages)
    }

    async fn fetch_list(&self, kind: DocumentKind) -> Result<Vec<Value>, CmsError> {
        match self.store.fetch(kind).await? {
            Value::Array(items) => Ok(items),
            Value::Null => Ok(Vec::new()),
            other => Err(CmsError::Decode(format!(
                "expected a list of {} documents, got {}",
                kind,
                type_name(&other)
            ))),
        }
    }
}

/// Dedup by trimmed lower-cased name (first wins), fill subtitles, order
pub fn arrange_skills(skills: Vec<Skill>) -> Vec<Skill> {
    let mut seen = HashSet::new();
    let mut skills: Vec<Skill> = skills
        .into_iter()
        .filter(|skill| seen.insert(skill.dedup_key()))
        .map(|mut skill| {
            if skill.subtitle.is_none() {
                skill.subtitle = Some(default_subtitle(&skill.name).to_string());
            }
            skill
        })
        .collect();

    skills.sort_by(|a, b| {
        b.featured
            .cmp(&a.featured)
            .then_with(|| a.sort_order().cmp(&b.sort_order()))
            .then_with(|| a.name.cmp(&b.name))
    });
    skills
}

fn validate<T>(values: Vec<Value>, parse: fn(Value) -> Option<T>, kind: DocumentKind) -> Vec<T> {
    let total = values.len();
    let valid: Vec<T> = values.into_iter().filter_map(parse).collect();
    if valid.len() < total {
        tracing::warn!(
            "Dropped {} malformed {} documents",
            total - valid.len(),
            kind
        );
    }
    valid
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::MemoryStore;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn loader_with(store: MemoryStore, config: &SiteConfig) -> ContentLoader<'_> {
        ContentLoader::new(Arc::new(store), config)
    }

    fn skill(name: &str, featured: bool, order: Option<i64>) -> Value {
        json!({"_type": "skill", "name": name, "featured": featured, "order": order})
    }

    #[tokio::test]
    async fn test_skills_dedup_and_order() {
        let store = MemoryStore::with_documents(vec![
            skill("Zig", false, Some(1)),
            skill("rust", true, None),
            skill("Go", false, None),
            skill(" RUST ", false, Some(0)),
            skill("Css", true, Some(5)),
            skill("Ada", false, Some(1)),
        ]);
        let config = SiteConfig::default();
        let skills = loader_with(store, &config).load_skills().await;

        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Css", "rust", "Ada", "Zig", "Go"]);
        assert!(skills.iter().all(|s| s.subtitle.is_some()));
    }

    #[tokio::test]
    async fn test_projects_sorted_and_invalid_dropped() {
        let store = MemoryStore::with_documents(vec![
            json!({"_type": "project", "title": "B", "order": 2}),
            json!({"_type": "project", "title": "A", "order": 1}),
            json!({"_type": "project", "order": 0}),
            json!({"_type": "project", "title": "C", "order": null, "tags": null}),
        ]);
        let config = SiteConfig::default();
        let projects = loader_with(store, &config).load_projects().await;

        let titles: Vec<&str> = projects.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_uses_fallback() {
        let store = MemoryStore::with_documents(vec![
            json!({"_type": "project", "title": "Live"}),
            json!({"_type": "profile", "name": "Live Person"}),
        ]);
        store.fail_reads.store(true, Ordering::Relaxed);

        let mut config = SiteConfig::default();
        config.author = "Fallback Person".to_string();
        let content = loader_with(store, &config).load_all().await;

        assert_eq!(content.profile.name, "Fallback Person");
        assert!(content.profile.has_about());
        assert_eq!(content.projects.len(), fallback_projects().len());
        assert_eq!(content.skills.len(), fallback_skills().len());
    }

    #[tokio::test]
    async fn test_empty_store_uses_fallback() {
        let config = SiteConfig::default();
        let content = loader_with(MemoryStore::new(), &config).load_all().await;
        assert_eq!(content.profile.name, config.author);
        assert!(!content.projects.is_empty());
        assert!(!content.skills.is_empty());
    }

    #[tokio::test]
    async fn test_profile_from_store() {
        let store = MemoryStore::with_documents(vec![json!({
            "_type": "profile",
            "name": "Ada",
            "shortBio": "Engineer",
            "about": [{"children": [{"text": "Hi"}]}]
        })]);
        let config = SiteConfig::default();
        let profile = loader_with(store, &config).load_profile().await;
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.short_bio.as_deref(), Some("Engineer"));
        assert!(profile.about.is_array());
    }

    #[tokio::test]
    async fn test_contacts_propagate_errors() {
        let store = MemoryStore::with_documents(vec![
            json!({"_type": "contact", "name": "a", "email": "a@x", "message": "1", "receivedAt": "2024-01-01T00:00:00Z"}),
            json!({"_type": "contact", "name": "b", "email": "b@x", "message": "2", "receivedAt": "2024-06-01T00:00:00Z"}),
        ]);
        let config = SiteConfig::default();
        let loader = loader_with(store, &config);
        let messages = loader.load_contacts().await.unwrap();
        assert_eq!(messages[0].name, "b");

        let store = MemoryStore::new();
        store.fail_reads.store(true, Ordering::Relaxed);
        assert!(loader_with(store, &config).load_contacts().await.is_err());
    }
}
