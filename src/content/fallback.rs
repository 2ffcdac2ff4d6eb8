//! Locally-held content
//!
//! Used twice: as the page content whenever a store read fails, and as the
//! documents written by the seeding commands.

use serde_json::{json, Value};

use super::document::{Profile, Project, Skill};
use crate::config::SiteConfig;

/// Bio shown when the profile cannot be fetched
pub const FALLBACK_ABOUT: &str = "I'm a developer who builds fast, accessible websites, \
e-commerce platforms and AI-driven tools. I work mostly with TypeScript, Rust and Python, \
and I'm always happy to collaborate on something new.";

/// Subtitle for well-known skills that were entered without one
pub fn default_subtitle(name: &str) -> &'static str {
    match name.trim().to_lowercase().as_str() {
        "next.js" => "React framework for production",
        "typescript" => "Typed JavaScript for scale",
        "tailwind css" => "Utility-first styling",
        "html" => "Semantic markup foundation",
        "git" => "Version control & collaboration",
        "css" => "Responsive modern UI",
        "python" => "Scripting, data and AI workflows",
        "rust" => "Fast, reliable systems code",
        "vercel" => "Fast deploys and edge hosting",
        "context_api" => "Lightweight React state sharing",
        "fastapi" => "High-performance Python APIs",
        "npm" => "Package management & scripts",
        "nodejs" | "node.js" => "Server-side JavaScript runtime",
        "figma" => "Design & prototyping",
        "github" => "Code hosting & workflows",
        "markdown" => "Lightweight documentation",
        "open_ai_sdk" | "openai" => "Agentic AI & tool calling",
        "web3" => "Decentralized applications & blockchain",
        _ => "Modern, scalable development",
    }
}

fn text_block(text: &str) -> Value {
    json!([{
        "_type": "block",
        "style": "normal",
        "markDefs": [],
        "children": [{"_type": "span", "text": text, "marks": []}]
    }])
}

/// Initial project documents
pub fn initial_projects() -> Vec<Value> {
    vec![
        json!({
            "_type": "project",
            "title": "E-commerce Storefront",
            "description": text_block(
                "A full-stack web application built with Next.js, TypeScript and Tailwind CSS."
            ),
            "github": "https://github.com/example/storefront",
            "isPrivateRepo": false,
            "demo": "https://storefront.example.com",
            "tags": ["Next.js", "TypeScript", "Tailwind CSS", "Sanity"],
            "order": 1
        }),
        json!({
            "_type": "project",
            "title": "Car Showcase",
            "description": text_block(
                "A simple and responsive car website built using HTML and CSS, optimized for all devices."
            ),
            "github": "",
            "isPrivateRepo": true,
            "demo": "https://cars.example.com",
            "tags": ["HTML", "CSS"],
            "order": 2
        }),
        json!({
            "_type": "project",
            "title": "Blog Platform",
            "description": text_block(
                "A dynamic blog using Next.js, Tailwind CSS and a headless CMS for content management."
            ),
            "github": "",
            "isPrivateRepo": true,
            "demo": "https://blog.example.com",
            "tags": ["Next.js", "TypeScript", "Tailwind CSS", "Sanity"],
            "order": 3
        }),
    ]
}

/// Initial skill documents
pub fn initial_skills() -> Vec<Value> {
    let skills = [
        ("Next.js", "frontend", "advanced", 85, true, 1),
        ("TypeScript", "frontend", "advanced", 80, true, 2),
        ("Tailwind CSS", "frontend", "expert", 90, false, 3),
        ("Python", "backend", "intermediate", 75, true, 4),
        ("FastAPI", "backend", "intermediate", 65, false, 5),
        ("Git", "tools", "advanced", 80, false, 6),
        ("OpenAI", "ai", "intermediate", 70, false, 7),
        ("Figma", "design", "beginner", 50, false, 8),
    ];

    skills
        .iter()
        .map(|(name, category, level, percent, featured, order)| {
            json!({
                "_type": "skill",
                "name": name,
                "subtitle": default_subtitle(name),
                "category": category,
                "level": level,
                "proficiencyPercentage": percent,
                "featured": featured,
                "order": order
            })
        })
        .collect()
}

/// Initial profile document
pub fn initial_profile(config: &SiteConfig) -> Value {
    json!({
        "_type": "profile",
        "name": config.author,
        "shortBio": config.description,
        "about": FALLBACK_ABOUT,
        "email": Value::Null,
        "github": Value::Null,
        "linkedin": Value::Null
    })
}

pub fn fallback_projects() -> Vec<Project> {
    initial_projects()
        .into_iter()
        .filter_map(Project::from_value)
        .collect()
}

pub fn fallback_skills() -> Vec<Skill> {
    initial_skills()
        .into_iter()
        .filter_map(Skill::from_value)
        .collect()
}

pub fn fallback_profile(config: &SiteConfig) -> Profile {
    Profile {
        id: String::new(),
        name: config.author.clone(),
        short_bio: Some(config.description.clone()).filter(|s| !s.is_empty()),
        about: Value::String(FALLBACK_ABOUT.to_string()),
        email: None,
        github: None,
        linkedin: None,
    }
}
