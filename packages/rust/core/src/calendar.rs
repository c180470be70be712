//! Series and calendar workflows built on the content pipeline.
//!
//! A series runs one pipeline per subtopic against the same shared graph;
//! every brief carries the series slug as a shared secondary keyword so the
//! graph can actually relate the posts, and from the second post on the
//! related-content hits are attached as internal links.

use serde::Serialize;
use tracing::{info, instrument};

use copyforge_records::FinalRecord;
use copyforge_shared::{Brief, BusinessGoal, ContentType, Result, Tone, Urgency, slugify};

use crate::content::EditorInChief;
use crate::phases::PipelineProgress;

// ---------------------------------------------------------------------------
// Brief factories
// ---------------------------------------------------------------------------

/// Brief for a breaking-news piece.
pub fn breaking_news_brief(
    news: &str,
    angle: &str,
    implications: &[String],
) -> Result<Brief> {
    Brief::builder(news)
        .audience("Tech-savvy marketers and AI enthusiasts")
        .secondary_keywords(["breaking", "news", "update"])
        .content_type(ContentType::ThoughtLeadership)
        .word_count(1500)
        .business_goal(BusinessGoal::AuthorityBuilding)
        .pain_points([angle.to_string()])
        .desired_outcomes(implications.to_vec())
        .tone(Tone::Conversational)
        .urgency(Urgency::Breaking)
        .build()
}

/// Brief for a case-study piece.
pub fn case_study_brief(
    client: &str,
    results: &str,
    challenge: &str,
    solution: &str,
) -> Result<Brief> {
    Brief::builder(format!("How {client} Achieved {results}"))
        .audience("Enterprise marketing leaders")
        .primary_keyword(format!("{}-case-study", slugify(client)))
        .secondary_keywords([client.to_lowercase(), "case study".into(), "success story".into()])
        .content_type(ContentType::CaseStudy)
        .word_count(3000)
        .business_goal(BusinessGoal::LeadGeneration)
        .pain_points([challenge.to_string()])
        .desired_outcomes([results.to_string(), solution.to_string()])
        .tone(Tone::Analytical)
        .build()
}

/// Brief for a long-form pillar piece.
pub fn pillar_brief(topic: &str) -> Result<Brief> {
    Brief::builder(topic)
        .content_type(ContentType::ThoughtLeadership)
        .word_count(4000)
        .business_goal(BusinessGoal::AuthorityBuilding)
        .urgency(Urgency::High)
        .build()
}

/// Brief for one entry of a series.
fn series_brief(series_slug: &str, subtopic: &str) -> Result<Brief> {
    Brief::builder(subtopic)
        .secondary_keywords([series_slug.to_string()])
        .content_type(ContentType::ThoughtLeadership)
        .word_count(2500)
        .business_goal(BusinessGoal::AuthorityBuilding)
        .build()
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Run the content pipeline for each subtopic of a series.
///
/// Posts after the first carry internal links to earlier posts that share
/// keywords with them.
#[instrument(skip_all, fields(series = %series_name, subtopics = subtopics.len()))]
pub async fn create_series(
    editor: &EditorInChief,
    series_name: &str,
    subtopics: &[String],
    progress: &dyn PipelineProgress,
) -> Result<Vec<FinalRecord>> {
    let series_slug = slugify(series_name);
    let mut records = Vec::with_capacity(subtopics.len());

    for (index, subtopic) in subtopics.iter().enumerate() {
        info!(part = index + 1, %subtopic, "series entry");
        let brief = series_brief(&series_slug, subtopic)?;
        let record = editor.create_post(&brief, progress).await?;

        let record = if index > 0 {
            let links = editor.graph().related(subtopic).await;
            record.with_internal_links(links)
        } else {
            record
        };
        records.push(record);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Weekly calendar
// ---------------------------------------------------------------------------

/// Topics for one week of content.
#[derive(Debug, Clone)]
pub struct WeeklyTopics {
    pub breaking: String,
    pub how_to: String,
    pub case_study_client: String,
    pub case_study_results: String,
    pub case_study_challenge: String,
    pub case_study_solution: String,
}

/// One scheduled entry of the weekly calendar.
#[derive(Debug, Serialize)]
pub struct CalendarEntry {
    pub day: &'static str,
    pub slot: &'static str,
    pub record: FinalRecord,
}

/// Generate a week's worth of content: breaking news on Monday, a how-to
/// on Wednesday, a case study on Friday.
#[instrument(skip_all)]
pub async fn weekly_calendar(
    editor: &EditorInChief,
    topics: &WeeklyTopics,
    progress: &dyn PipelineProgress,
) -> Result<Vec<CalendarEntry>> {
    let mut entries = Vec::with_capacity(3);

    let breaking = breaking_news_brief(&topics.breaking, "why this matters now", &[])?;
    entries.push(CalendarEntry {
        day: "Monday",
        slot: "breaking-news",
        record: editor.create_post(&breaking, progress).await?,
    });

    let how_to = Brief::builder(&topics.how_to)
        .content_type(ContentType::HowTo)
        .word_count(2500)
        .build()?;
    entries.push(CalendarEntry {
        day: "Wednesday",
        slot: "how-to",
        record: editor.create_post(&how_to, progress).await?,
    });

    let case = case_study_brief(
        &topics.case_study_client,
        &topics.case_study_results,
        &topics.case_study_challenge,
        &topics.case_study_solution,
    )?;
    entries.push(CalendarEntry {
        day: "Friday",
        slot: "case-study",
        record: editor.create_post(&case, progress).await?,
    });

    Ok(entries)
}
