//! List content-store documents

use anyhow::Result;

use crate::content::{ContentLoader, DocumentKind};
use crate::Folio;

/// List documents of one kind
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let kind: DocumentKind = content_type.parse()?;
    let store = folio.store()?;
    let loader = ContentLoader::new(store, &folio.config);

    match kind {
        DocumentKind::Project => {
            let projects = loader.load_projects().await;
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!(
                    "  {:>3}. {} [{}]",
                    project.order,
                    project.title,
                    project.tags.join(", ")
                );
            }
        }
        DocumentKind::Skill => {
            let skills = loader.load_skills().await;
            println!("Skills ({}):", skills.len());
            for skill in skills {
                println!(
                    "  {}{} - {}",
                    if skill.featured { "* " } else { "" },
                    skill.name,
                    skill.category.label()
                );
            }
        }
        DocumentKind::Profile => {
            let profile = loader.load_profile().await;
            println!("Profile:");
            println!("  name: {}", profile.name);
            if let Some(bio) = &profile.short_bio {
                println!("  bio: {}", bio);
            }
            if let Some(email) = &profile.email {
                println!("  email: {}", email);
            }
        }
        DocumentKind::Contact => {
            let messages = loader.load_contacts().await?;
            println!("Contact messages ({}):", messages.len());
            for message in messages {
                println!(
                    "  {} - {} <{}>",
                    message.received_at.as_deref().unwrap_or("unknown"),
                    message.name,
                    message.email
                );
            }
        }
    }

    Ok(())
}
