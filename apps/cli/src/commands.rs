//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use copyforge_core::calendar::{self, WeeklyTopics};
use copyforge_core::{EditorInChief, KnowledgeArchitect, PipelineProgress};
use copyforge_generation::{BridgeGenerator, Generator, HttpGenerator, PlaceholderGenerator};
use copyforge_graph::SharedKnowledgeGraph;
use copyforge_records::{FinalRecord, save_record};
use copyforge_shared::{
    AppConfig, Brief, ContentType, DepthLevel, KnowledgeBrief, Scope, init_config, load_config,
    slugify,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// copyforge — multi-agent content pipeline generator.
#[derive(Parser)]
#[command(
    name = "copyforge",
    version,
    about = "Generate structured blog-post records with a multi-agent content pipeline.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Generator backend: placeholder, bridge, or http. Overrides config.
    #[arg(long, global = true)]
    pub generator: Option<String>,

    /// Output directory for records. Overrides config.
    #[arg(short, long, global = true)]
    pub out: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate a post for a custom topic.
    Post {
        /// Topic of the post.
        topic: String,

        /// Target audience.
        #[arg(short, long)]
        audience: Option<String>,

        /// Word count target.
        #[arg(short, long)]
        words: Option<u32>,

        /// Content type: case-study, how-to, thought-leadership, data-analysis.
        #[arg(short = 't', long, default_value = "how-to")]
        content_type: String,

        /// Secondary keywords (repeatable).
        #[arg(short, long)]
        keyword: Vec<String>,
    },

    /// Generate a breaking-news post.
    Breaking {
        /// The news item.
        news: String,

        /// The angle to take on it.
        #[arg(long)]
        angle: String,

        /// Implications for the reader (repeatable).
        #[arg(long)]
        implication: Vec<String>,
    },

    /// Generate a case-study post.
    #[command(name = "case-study")]
    CaseStudy {
        /// Client or company name.
        #[arg(long)]
        client: String,

        /// Headline results, e.g. "509% Organic Traffic Growth".
        #[arg(long)]
        results: String,

        /// The challenge the client faced.
        #[arg(long)]
        challenge: String,

        /// The solution that produced the results.
        #[arg(long)]
        solution: String,
    },

    /// Generate a long-form pillar post.
    Pillar {
        /// Topic of the pillar piece.
        topic: String,
    },

    /// Generate a series of related posts with internal links.
    Series {
        /// Series name.
        name: String,

        /// Subtopics, one post each (at least one).
        #[arg(required = true)]
        subtopics: Vec<String>,
    },

    /// Generate a week of content: breaking news, how-to, case study.
    Weekly {
        #[arg(long)]
        breaking: String,

        #[arg(long)]
        how_to: String,

        #[arg(long)]
        case_client: String,

        #[arg(long)]
        case_results: String,

        #[arg(long)]
        case_challenge: String,

        #[arg(long)]
        case_solution: String,
    },

    /// Generate knowledge-first content via the research pipeline.
    Knowledge {
        /// Topic to research.
        topic: String,

        /// Depth level: beginner, intermediate, advanced, expert.
        #[arg(short, long, default_value = "advanced")]
        depth: String,

        /// Scope: comprehensive, focused, survey, deep-dive.
        #[arg(short, long, default_value = "comprehensive")]
        scope: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "copyforge=info",
        1 => "copyforge=debug",
        _ => "copyforge=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        };
    }

    let config = load_config()?;
    let generator = build_generator(&config, cli.generator.as_deref())?;
    let out_dir = PathBuf::from(
        cli.out
            .clone()
            .unwrap_or_else(|| config.defaults.output_dir.clone()),
    );
    let graph = SharedKnowledgeGraph::new();

    match cli.command {
        Command::Post {
            topic,
            audience,
            words,
            content_type,
            keyword,
        } => {
            let brief = Brief::builder(&topic)
                .audience(audience.unwrap_or_else(|| config.defaults.audience.clone()))
                .word_count(words.unwrap_or(config.defaults.word_count))
                .content_type(parse_content_type(&content_type)?)
                .secondary_keywords(keyword)
                .build()?;
            run_content(generator, graph, &brief, "custom_post", &out_dir).await
        }

        Command::Breaking {
            news,
            angle,
            implication,
        } => {
            let brief = calendar::breaking_news_brief(&news, &angle, &implication)?;
            run_content(generator, graph, &brief, "breaking_news", &out_dir).await
        }

        Command::CaseStudy {
            client,
            results,
            challenge,
            solution,
        } => {
            let brief = calendar::case_study_brief(&client, &results, &challenge, &solution)?;
            run_content(generator, graph, &brief, "case_study", &out_dir).await
        }

        Command::Pillar { topic } => {
            let brief = calendar::pillar_brief(&topic)?;
            run_content(generator, graph, &brief, "pillar_content", &out_dir).await
        }

        Command::Series { name, subtopics } => {
            let start = Instant::now();
            let editor = EditorInChief::new(generator, graph);
            let reporter = CliProgress::new();

            let records =
                calendar::create_series(&editor, &name, &subtopics, &reporter).await?;
            reporter.finish();

            let slug = slugify(&name);
            let mut paths = Vec::new();
            for (index, record) in records.iter().enumerate() {
                let file_name = format!("series_{slug}_part{}", index + 1);
                paths.push(save_record(record, &file_name, &out_dir)?);
            }

            println!();
            println!("  Series generated!");
            println!("  Name:   {name}");
            println!("  Posts:  {}", records.len());
            for path in &paths {
                println!("  Saved:  {}", path.display());
            }
            println!("  Time:   {:.1}s", start.elapsed().as_secs_f64());
            println!();
            Ok(())
        }

        Command::Weekly {
            breaking,
            how_to,
            case_client,
            case_results,
            case_challenge,
            case_solution,
        } => {
            let start = Instant::now();
            let editor = EditorInChief::new(generator, graph);
            let reporter = CliProgress::new();

            let topics = WeeklyTopics {
                breaking,
                how_to,
                case_study_client: case_client,
                case_study_results: case_results,
                case_study_challenge: case_challenge,
                case_study_solution: case_solution,
            };
            let entries = calendar::weekly_calendar(&editor, &topics, &reporter).await?;
            reporter.finish();

            println!();
            println!("  Weekly calendar generated!");
            for entry in &entries {
                let file_name = format!("weekly_{}", entry.slot.replace('-', "_"));
                let path = save_record(&entry.record, &file_name, &out_dir)?;
                println!("  {:<10} {:<14} {}", entry.day, entry.slot, path.display());
            }
            println!("  Time:   {:.1}s", start.elapsed().as_secs_f64());
            println!();
            Ok(())
        }

        Command::Knowledge { topic, depth, scope } => {
            let start = Instant::now();
            let brief = KnowledgeBrief::builder(&topic)
                .depth_level(parse_depth(&depth)?)
                .scope(parse_scope(&scope)?)
                .build()?;

            info!(%topic, %depth, %scope, "generating knowledge content");
            let architect = KnowledgeArchitect::new(generator, graph);
            let reporter = CliProgress::new();
            let record = architect.create_knowledge_content(&brief, &reporter).await?;
            reporter.finish();

            let path = save_record(&record, "knowledge_content", &out_dir)?;
            print_summary(&record, &path, start.elapsed());
            if !record.knowledge_gaps.is_empty() {
                println!("  Gaps:");
                for gap in &record.knowledge_gaps {
                    println!("    - {gap}");
                }
                println!();
            }
            Ok(())
        }

        Command::Config { .. } => unreachable!("handled above"),
    }
}

/// Run the content pipeline for one brief and save the record.
async fn run_content(
    generator: Arc<dyn Generator>,
    graph: SharedKnowledgeGraph,
    brief: &Brief,
    file_name: &str,
    out_dir: &std::path::Path,
) -> Result<()> {
    let start = Instant::now();
    info!(topic = %brief.topic, "generating post");

    let editor = EditorInChief::new(generator, graph);
    let reporter = CliProgress::new();
    let record = editor.create_post(brief, &reporter).await?;
    reporter.finish();

    let path = save_record(&record, file_name, out_dir)?;
    print_summary(&record, &path, start.elapsed());
    Ok(())
}

fn print_summary(record: &FinalRecord, path: &std::path::Path, elapsed: std::time::Duration) {
    println!();
    println!("  Record generated!");
    println!("  Run:    {}", record.run_id);
    println!("  Kind:   {}", record.pipeline);
    println!("  Phases: {}", record.phases.len());
    println!("  Agents: {}", record.metadata.agents_used.len());
    println!("  Path:   {}", path.display());
    println!("  Time:   {:.1}s", elapsed.as_secs_f64());
    println!();
}

// ---------------------------------------------------------------------------
// Generator selection
// ---------------------------------------------------------------------------

/// Build the generator backend from config plus the CLI override.
fn build_generator(
    config: &AppConfig,
    override_kind: Option<&str>,
) -> Result<Arc<dyn Generator>> {
    let kind = override_kind.unwrap_or(&config.defaults.generator);
    match kind {
        "placeholder" => Ok(Arc::new(PlaceholderGenerator::new())),
        "http" => Ok(Arc::new(HttpGenerator::new(&config.llm)?)),
        "bridge" => {
            if config.bridge.script.is_empty() {
                return Err(eyre!(
                    "bridge generator selected but [bridge].script is not configured"
                ));
            }
            Ok(Arc::new(BridgeGenerator::spawn(&config.bridge)?))
        }
        other => Err(eyre!(
            "unknown generator '{other}': expected 'placeholder', 'bridge', or 'http'"
        )),
    }
}

// ---------------------------------------------------------------------------
// Flag parsing helpers
// ---------------------------------------------------------------------------

fn parse_content_type(value: &str) -> Result<ContentType> {
    Ok(match value {
        "case-study" => ContentType::CaseStudy,
        "how-to" => ContentType::HowTo,
        "thought-leadership" => ContentType::ThoughtLeadership,
        "data-analysis" => ContentType::DataAnalysis,
        "research" => ContentType::Research,
        other => return Err(eyre!("unknown content type '{other}'")),
    })
}

fn parse_depth(value: &str) -> Result<DepthLevel> {
    Ok(match value {
        "beginner" => DepthLevel::Beginner,
        "intermediate" => DepthLevel::Intermediate,
        "advanced" => DepthLevel::Advanced,
        "expert" => DepthLevel::Expert,
        other => return Err(eyre!("unknown depth level '{other}'")),
    })
}

fn parse_scope(value: &str) -> Result<Scope> {
    Ok(match value {
        "comprehensive" => Scope::Comprehensive,
        "focused" => Scope::Focused,
        "survey" => Scope::Survey,
        "deep-dive" => Scope::DeepDive,
        other => return Err(eyre!("unknown scope '{other}'")),
    })
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Pipeline progress shown as an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl PipelineProgress for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(format!("Running phase: {name}"));
    }

    fn phase_done(&self, name: &str, completed: usize, total: usize) {
        self.spinner
            .set_message(format!("[{completed}/{total}] {name} done"));
    }
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
