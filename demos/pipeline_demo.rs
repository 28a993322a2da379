use anyhow::Result;
use async_trait::async_trait;
use pressroom::{
    config::Config,
    formatter::{AdvancedArticleSettings, DisclaimerType, format_article},
    pipeline::{StageArtifact, StageId},
    runner::{ExecutorRegistry, PipelineRunner, StageContext, StageExecutor},
};

/// Simulated executor covering every stage; the format-conversion stage
/// runs the real formatting processor over the simulated rewrite output.
struct SimulatedStage {
    stage: StageId,
}

#[async_trait]
impl StageExecutor for SimulatedStage {
    async fn run(&self, ctx: &StageContext) -> Result<StageArtifact> {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let artifact = match self.stage {
            StageId::Upload => StageArtifact::Upload {
                object_key: format!("uploads/{}", ctx.job_id),
                size_bytes: 24_000,
            },
            StageId::Extract => StageArtifact::Extract {
                markdown: "# Launch Day\n\nAcme Co shipped its new rocket today.".to_string(),
                word_count: 8,
            },
            StageId::Process => StageArtifact::Process {
                content: "<h2>Launch Day</h2><p>Acme Co shipped its new rocket today.</p>"
                    .to_string(),
            },
            StageId::AdvancedAi => StageArtifact::AdvancedAi {
                content: "<h2>Launch Day</h2><p>Acme Co successfully launched its new rocket this morning.</p>"
                    .to_string(),
                excerpt: Some("Acme Co's new rocket reached orbit on its first flight.".to_string()),
            },
            StageId::FormatConversion => {
                let Some(StageArtifact::AdvancedAi { content, excerpt }) =
                    ctx.artifact(StageId::AdvancedAi)
                else {
                    anyhow::bail!("rewrite artifact missing");
                };
                let settings = AdvancedArticleSettings {
                    header_disclaimer: DisclaimerType::Sponsored,
                    footer_disclaimer: DisclaimerType::Sponsored,
                    author_name: Some("Acme Co".to_string()),
                };
                let analysis = pressroom::formatter::ContentAnalysisSummary {
                    excerpt: excerpt.clone(),
                    related_articles: Vec::new(),
                };
                let result = format_article(content, &settings, Some(&analysis));
                for rule in &result.metadata.applied_rules {
                    println!("  formatting: {rule}");
                }
                StageArtifact::FormatConversion {
                    html: result.formatted_content,
                }
            }
            StageId::CopyEditing => {
                let Some(StageArtifact::FormatConversion { html }) =
                    ctx.artifact(StageId::FormatConversion)
                else {
                    anyhow::bail!("formatted artifact missing");
                };
                StageArtifact::CopyEditing {
                    html: html.clone(),
                    title: Some("Acme Co Reaches Orbit".to_string()),
                    tags: vec!["aerospace".to_string(), "launches".to_string()],
                }
            }
            StageId::PrepPublish => StageArtifact::PrepPublish {
                cover_image_url: Some("https://cdn.example.com/covers/launch.png".to_string()),
            },
            StageId::PublishNews => StageArtifact::PublishNews {
                post_url: "https://news.example.com/p/acme-reaches-orbit".to_string(),
            },
        };
        Ok(artifact)
    }

    fn stage(&self) -> StageId {
        self.stage
    }
}

/// Demo program that drives one simulated URL job through the pipeline and
/// prints every progress snapshot.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let mut registry = ExecutorRegistry::new();
    for stage in pressroom::pipeline::STAGE_TOPOLOGY {
        registry.register(SimulatedStage { stage });
    }

    let mut runner = PipelineRunner::new(registry, config.runner_config());
    runner.machine_mut().subscribe(|state| {
        println!(
            "[{:>6.2}%] {:?} - current stage: {}",
            state.overall.progress, state.overall.status, state.current_stage
        );
    });

    runner
        .run_url_job("https://example.com/press/acme-launch", "article")
        .await?;

    let state = runner.machine().state().expect("job state present");
    if let Some(StageArtifact::PublishNews { post_url }) =
        state.stage_results.get(&StageId::PublishNews)
    {
        println!("Published: {post_url}");
    }

    Ok(())
}
