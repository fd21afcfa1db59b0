// Prompt templates for the AI features.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::MARKDOWN_INSTRUCTION;
use crate::models::profile::{Profile, Project};

/// Career coach prompt template.
/// Replace: {skills}, {projects}
pub const CAREER_COACH_PROMPT_TEMPLATE: &str = "Based on a portfolio with skills like {skills} \
    and projects like {projects}, act as an AI career coach. What are two advanced skills this \
    person should learn next to advance their career in AI/ML? Also, suggest one niche industry \
    where these skills are in high demand. Provide a concise, encouraging response formatted \
    with markdown.";

/// Project insight prompt template.
/// Replace: {markdown_instruction}, {title}, {description}
pub const PROJECT_INSIGHT_PROMPT_TEMPLATE: &str = r#"You are an expert AI/ML engineering manager reviewing a portfolio project. Based on the following project, generate a detailed analysis in two parts. {markdown_instruction}

Project Title: {title}
Project Description: {description}

**Technical Breakdown**
- Provide a plausible technical architecture.
- Explain the role of key technologies.
- Mention one potential technical challenge and how to solve it.

**Future Enhancements**
- Suggest two concrete, innovative features to improve this project.
- Briefly explain the business or user value of each suggestion."#;

/// Message draft prompt template.
/// Replace: {name}, {email}, {topic}
pub const MESSAGE_DRAFT_PROMPT_TEMPLATE: &str = r#"You are a software engineer interested in connecting with a fellow AI/ML engineer named {name}. Draft a short, professional, and friendly email to '{email}' starting a conversation about the topic: "{topic}". Keep it brief and encouraging a response. Start with "Subject: Connecting to chat about {topic}" and then the body of the email."#;

/// Skills and projects named in the coach prompt. The coach only needs the headline items.
const COACH_SKILL_COUNT: usize = 3;
const COACH_PROJECT_COUNT: usize = 2;

pub fn career_coach_prompt(profile: &Profile) -> String {
    let skills = join_with_and(
        profile
            .skills
            .iter()
            .take(COACH_SKILL_COUNT)
            .map(|s| s.name.to_string())
            .collect(),
    );
    let projects = join_with_and(
        profile
            .projects
            .iter()
            .take(COACH_PROJECT_COUNT)
            .map(|p| format!("'{}'", p.title))
            .collect(),
    );

    CAREER_COACH_PROMPT_TEMPLATE
        .replace("{skills}", &skills)
        .replace("{projects}", &projects)
}

pub fn project_insight_prompt(project: &Project) -> String {
    PROJECT_INSIGHT_PROMPT_TEMPLATE
        .replace("{markdown_instruction}", MARKDOWN_INSTRUCTION)
        .replace("{title}", project.title)
        .replace("{description}", project.description)
}

pub fn message_draft_prompt(profile: &Profile, topic: &str) -> String {
    // Topic goes last so a topic containing a placeholder is never re-expanded.
    MESSAGE_DRAFT_PROMPT_TEMPLATE
        .replace("{name}", profile.short_name)
        .replace("{email}", profile.email)
        .replace("{topic}", topic)
}

/// "a", "a and b", "a, b and c".
fn join_with_and(mut items: Vec<String>) -> String {
    match items.len() {
        0 => String::new(),
        1 => items.remove(0),
        _ => {
            let last = items.pop().unwrap_or_default();
            format!("{} and {}", items.join(", "), last)
        }
    }
}
