//! Portfolio page generator
//!
//! Turns loaded [`SiteContent`] into one HTML document. Every string that
//! comes from the content store is escaped or passed through the rich-text
//! renderer; nothing is inserted raw.

use anyhow::Result;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::config::SiteConfig;
use crate::content::{Profile, Project, RichTextRenderer, SiteContent, Skill, SkillCategory};
use crate::helpers::{
    css, full_url_for, html_escape, image_tag, link_to, meta_generator, open_graph, url_for,
};

/// Client-side submit handler for the contact form
const CONTACT_SCRIPT: &str = r#"<script>
(function() {
    var form = document.getElementById('contact-form');
    var status = document.getElementById('contact-status');
    if (!form) return;
    form.addEventListener('submit', function(e) {
        e.preventDefault();
        var button = form.querySelector('button');
        button.disabled = true;
        status.textContent = '';
        var data = {
            name: form.elements.name.value,
            email: form.elements.email.value,
            message: form.elements.message.value,
            receivedAt: new Date().toISOString()
        };
        fetch(form.action, {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(data)
        }).then(function(res) {
            if (!res.ok) throw new Error('Failed to submit the form');
            status.textContent = 'Thank you! Your message has been sent successfully.';
            status.className = 'contact-status success';
            form.reset();
        }).catch(function() {
            status.textContent = 'Sorry, there was an error sending your message. Please try again.';
            status.className = 'contact-status error';
        }).finally(function() {
            button.disabled = false;
        });
    });
})();
</script>"#;

/// Single-page portfolio generator
pub struct Generator<'a> {
    config: &'a SiteConfig,
    renderer: RichTextRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            renderer: RichTextRenderer::with_link_base(&url_for(config, &config.link_base)),
        }
    }

    /// Write `index.html` and the static assets into `public_dir`
    pub fn generate(&self, content: &SiteContent, public_dir: &Path, static_dir: &Path) -> Result<()> {
        fs::create_dir_all(public_dir)?;

        if static_dir.exists() {
            copy_static_assets(static_dir, public_dir)?;
        } else {
            tracing::debug!("No static directory at {:?}", static_dir);
        }

        let index = public_dir.join("index.html");
        fs::write(&index, self.render_page(content))?;
        tracing::info!("Generated: {:?}", index);

        Ok(())
    }

    /// Render the full page
    pub fn render_page(&self, content: &SiteContent) -> String {
        let title = if content.profile.name.trim().is_empty() {
            self.config.title.clone()
        } else {
            format!("{} | {}", content.profile.name, self.config.title)
        };

        let mut html = String::with_capacity(16 * 1024);
        html.push_str(&format!(
            "<!DOCTYPE html>\n<html lang=\"{}\">\n",
            html_escape(&self.config.language)
        ));
        html.push_str(&self.render_head(&title));
        html.push_str("<body>\n");
        html.push_str(&self.render_nav());
        html.push_str("<main>\n");
        html.push_str(&self.render_hero(&content.profile));
        html.push_str(&self.render_about(&content.profile));
        html.push_str(&self.render_skills(&content.skills));
        html.push_str(&self.render_projects(&content.projects));
        html.push_str(&self.render_contact(&content.profile));
        html.push_str("</main>\n");
        html.push_str(&self.render_footer(&content.profile));
        html.push_str(CONTACT_SCRIPT);
        html.push_str("\n</body>\n</html>\n");
        html
    }

    fn render_head(&self, title: &str) -> String {
        let description = if self.config.description.is_empty() {
            String::new()
        } else {
            format!(
                "<meta name=\"description\" content=\"{}\">\n",
                html_escape(&self.config.description)
            )
        };

        format!(
            "<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{}</title>\n{}{}\n{}\n{}\n</head>\n",
            html_escape(title),
            description,
            open_graph(
                title,
                &self.config.description,
                &full_url_for(self.config, "/"),
                &self.config.title
            ),
            meta_generator(),
            css(self.config, "style"),
        )
    }

    fn render_nav(&self) -> String {
        let items = [
            ("#about", "About"),
            ("#skills", "Skills"),
            ("#projects", "Projects"),
            ("#contact", "Contact"),
        ];
        let links: Vec<String> = items
            .iter()
            .map(|(href, label)| format!("<li>{}</li>", link_to(href, label)))
            .collect();
        format!(
            "<header class=\"site-header\">\n<a class=\"brand\" href=\"{}\">{}</a>\n<nav><ul>{}</ul></nav>\n</header>\n",
            html_escape(&url_for(self.config, "/")),
            html_escape(&self.config.title),
            links.join("")
        )
    }

    fn render_hero(&self, profile: &Profile) -> String {
        let bio = profile
            .short_bio
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("<p class=\"hero-bio\">{}</p>\n", html_escape(s)))
            .unwrap_or_default();

        format!(
            "<section id=\"home\" class=\"hero\">\n<h1>{}</h1>\n{}</section>\n",
            html_escape(&profile.name),
            bio
        )
    }

    fn render_about(&self, profile: &Profile) -> String {
        if !profile.has_about() {
            return String::new();
        }
        format!(
            "<section id=\"about\" class=\"about\">\n<h2>About Me</h2>\n<p>{}</p>\n</section>\n",
            self.render_field(&profile.about)
        )
    }

    fn render_skills(&self, skills: &[Skill]) -> String {
        if skills.is_empty() {
            return String::new();
        }

        let mut groups: IndexMap<SkillCategory, Vec<&Skill>> = IndexMap::new();
        for skill in skills {
            groups.entry(skill.category).or_default().push(skill);
        }

        let mut html = String::from("<section id=\"skills\" class=\"skills\">\n<h2>My Skills</h2>\n");
        for (category, skills) in groups {
            html.push_str(&format!(
                "<div class=\"skill-group\" id=\"skills-{}\">\n<h3>{}</h3>\n<ul>\n",
                slug::slugify(category.label()),
                html_escape(category.label())
            ));
            for skill in skills {
                html.push_str(&render_skill(skill));
            }
            html.push_str("</ul>\n</div>\n");
        }
        html.push_str("</section>\n");
        html
    }

    fn render_projects(&self, projects: &[Project]) -> String {
        let mut html = String::from(
            "<section id=\"projects\" class=\"projects\">\n<h2>Featured Projects</h2>\n<div class=\"project-grid\">\n",
        );

        for project in projects {
            html.push_str("<article class=\"project\">\n");
            if let Some(image) = project.image_url.as_deref().filter(|s| !s.is_empty()) {
                html.push_str(&image_tag(image, &project.title));
                html.push('\n');
            }
            html.push_str(&format!("<h3>{}</h3>\n", html_escape(&project.title)));
            html.push_str(&format!(
                "<p class=\"project-description\">{}</p>\n",
                self.render_field(&project.description)
            ));

            if !project.tags.is_empty() {
                let tags: Vec<String> = project
                    .tags
                    .iter()
                    .map(|tag| format!("<li class=\"tag\">{}</li>", html_escape(tag)))
                    .collect();
                html.push_str(&format!("<ul class=\"tags\">{}</ul>\n", tags.join("")));
            }

            let mut links = Vec::new();
            if let Some(repo) = project.repository() {
                links.push(link_to(repo, "Code"));
            }
            if let Some(demo) = project.demo.as_deref().filter(|s| !s.trim().is_empty()) {
                links.push(link_to(demo, "Live Demo"));
            }
            if !links.is_empty() {
                html.push_str(&format!(
                    "<div class=\"project-links\">{}</div>\n",
                    links.join(" ")
                ));
            }
            html.push_str("</article>\n");
        }

        html.push_str("</div>\n</section>\n");
        html
    }

    fn render_contact(&self, profile: &Profile) -> String {
        let email = profile
            .email
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|email| {
                format!(
                    "<p class=\"contact-email\">{}</p>\n",
                    link_to(&format!("mailto:{}", email), email)
                )
            })
            .unwrap_or_default();

        format!(
            "<section id=\"contact\" class=\"contact\">\n<h2>Get In Touch</h2>\n{}\
             <form id=\"contact-form\" action=\"{}\" method=\"post\">\n\
             <label for=\"name\">Name</label>\n<input id=\"name\" name=\"name\" type=\"text\" required>\n\
             <label for=\"email\">Email</label>\n<input id=\"email\" name=\"email\" type=\"email\" required>\n\
             <label for=\"message\">Message</label>\n<textarea id=\"message\" name=\"message\" rows=\"5\" required></textarea>\n\
             <button type=\"submit\">Send Message</button>\n\
             <p id=\"contact-status\" class=\"contact-status\" role=\"status\"></p>\n\
             </form>\n</section>\n",
            email,
            html_escape(&url_for(self.config, "/api/contact"))
        )
    }

    fn render_footer(&self, profile: &Profile) -> String {
        let mut links = Vec::new();
        if let Some(github) = profile.github.as_deref().filter(|s| !s.trim().is_empty()) {
            links.push(link_to(github, "GitHub"));
        }
        if let Some(linkedin) = profile.linkedin.as_deref().filter(|s| !s.trim().is_empty()) {
            links.push(link_to(linkedin, "LinkedIn"));
        }

        format!(
            "<footer class=\"site-footer\">\n<p>&copy; {} {}</p>\n{}</footer>\n",
            chrono::Local::now().format("%Y"),
            html_escape(&profile.name),
            if links.is_empty() {
                String::new()
            } else {
                format!("<p class=\"social\">{}</p>\n", links.join(" "))
            }
        )
    }

    /// A field is either plain text or a rich-text body
    fn render_field(&self, value: &Value) -> String {
        match value {
            Value::String(text) => html_escape(text),
            other => self.renderer.render_html(other),
        }
    }
}

fn render_skill(skill: &Skill) -> String {
    let mut html = format!(
        "<li class=\"skill{}\"",
        if skill.featured { " featured" } else { "" }
    );
    if let Some(color) = &skill.color {
        // validated as a hex colour at load time
        html.push_str(&format!(" style=\"--skill-color: {}\"", color));
    }
    html.push('>');

    if let Some(image) = &skill.image_url {
        html.push_str(&image_tag(image, &format!("{} logo", skill.name)));
    }
    html.push_str(&format!(
        "<span class=\"skill-name\">{}</span>",
        html_escape(&skill.name)
    ));
    if skill.featured {
        html.push_str("<span class=\"skill-badge\" title=\"Featured\">&#9733;</span>");
    }
    if let Some(subtitle) = &skill.subtitle {
        html.push_str(&format!(
            "<span class=\"skill-subtitle\">{}</span>",
            html_escape(subtitle)
        ));
    }
    if let Some(level) = skill.level {
        html.push_str(&format!(
            "<span class=\"skill-level\">{}</span>",
            level.label()
        ));
    }
    if let Some(percent) = skill.proficiency_percentage {
        html.push_str(&format!(
            "<meter min=\"0\" max=\"100\" value=\"{0}\">{0}%</meter>",
            percent
        ));
    }
    if let Some(years) = skill.years_of_experience {
        html.push_str(&format!(
            "<span class=\"skill-years\">{} yrs</span>",
            years
        ));
    }
    html.push_str("</li>\n");
    html
}

/// Copy static assets (css, images, etc.) to the public directory
fn copy_static_assets(static_dir: &Path, public_dir: &Path) -> Result<()> {
    for entry in WalkDir::new(static_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let relative = path.strip_prefix(static_dir)?;
        let dest = public_dir.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
    }

    Ok(())
}
