//! Prompt composition.
//!
//! A prompt is assembled from five blocks: the role framing, the brief
//! fields, the first two expert frameworks mapped to the role, the task
//! description, and the upstream phase context serialized as JSON.

use std::fmt::Write;

use copyforge_shared::{Brief, KnowledgeBrief};

use crate::experts::Expert;

/// How many of a role's experts make it into the prompt.
const EXPERTS_PER_PROMPT: usize = 2;

/// Render a content brief as a prompt block.
pub fn brief_block(brief: &Brief) -> String {
    let mut out = String::from("Content Brief:\n");
    let _ = writeln!(out, "- Topic: {}", brief.topic);
    let _ = writeln!(out, "- Target Audience: {}", brief.target_audience);
    let _ = writeln!(out, "- Primary Keyword: {}", brief.primary_keyword);
    let _ = writeln!(out, "- Secondary Keywords: {}", brief.secondary_keywords.join(", "));
    let _ = writeln!(out, "- Content Type: {}", brief.content_type);
    let _ = writeln!(out, "- Business Goal: {}", brief.business_goal);
    let _ = writeln!(out, "- Pain Points: {}", brief.pain_points.join(", "));
    let _ = writeln!(out, "- Desired Outcomes: {}", brief.desired_outcomes.join(", "));
    let _ = writeln!(out, "- Tone: {}", brief.tone);
    let _ = writeln!(out, "- Urgency: {}", brief.urgency);
    let _ = writeln!(out, "- Word Count Target: {}", brief.word_count);
    out
}

/// Render a knowledge brief as a prompt block.
pub fn knowledge_brief_block(brief: &KnowledgeBrief) -> String {
    let mut out = String::from("Research Brief:\n");
    let _ = writeln!(out, "- Topic: {}", brief.topic);
    let _ = writeln!(out, "- Depth Level: {}", brief.depth_level);
    let _ = writeln!(out, "- Scope: {}", brief.scope);
    let _ = writeln!(out, "- Reader Starting Point: {}", brief.target_expertise);
    let _ = writeln!(out, "- Goal Expertise Level: {}", brief.desired_expertise);
    let _ = writeln!(out, "- Knowledge Goals: {}", brief.knowledge_goals.join(", "));
    let _ = writeln!(
        out,
        "- Misconceptions to Correct: {}",
        brief.misconceptions_to_address.join(", ")
    );
    let _ = writeln!(out, "- Prerequisites: {}", brief.prerequisites.join(", "));
    let _ = writeln!(
        out,
        "- Primary Sources Required: {}",
        brief.primary_sources_required
    );
    let _ = writeln!(out, "- Data Requirements: {}", brief.data_requirements.join(", "));
    let _ = writeln!(out, "- Visual Requirements: {}", brief.visual_requirements.join(", "));
    out
}

/// Render the first two expert frameworks for a role.
fn expert_block(experts: &[Expert]) -> String {
    let mut out = String::new();
    for expert in experts.iter().take(EXPERTS_PER_PROMPT) {
        let _ = writeln!(out, "{}:", expert.name);
        let _ = writeln!(out, "- Framework: {}", expert.framework);
        let _ = writeln!(out, "- Principle: {}", expert.principle);
    }
    out
}

/// Assemble the full prompt for one generation call.
pub fn compose(
    role_title: &str,
    brief_block: &str,
    experts: &[Expert],
    task: &str,
    context: &serde_json::Value,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "You are an expert {role_title} producing one step of a content pipeline.\n"
    );
    out.push_str(brief_block);

    let experts_rendered = expert_block(experts);
    if !experts_rendered.is_empty() {
        out.push_str("\nFrameworks to Apply:\n");
        out.push_str(&experts_rendered);
    }

    let _ = writeln!(out, "\nTask: {task}");

    let context_json =
        serde_json::to_string_pretty(context).unwrap_or_else(|_| "{}".to_string());
    let _ = writeln!(out, "\nContext from Upstream Phases:\n{context_json}");

    out.push_str("\nReturn a single JSON object shaped for your role. No prose outside the JSON.\n");
    out
}
