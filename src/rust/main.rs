use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use careerlens::{
    ArtifactStore, Certification, Gender, Prediction, Profile, Recommendation, Recommender,
    RecommenderConfig, WorkingStatus, MIN_CGPA,
};

#[derive(Parser)]
#[command(author, version, about = "Job recommendations from your profile", long_about = None)]
struct Cli {
    /// Directory holding the model artifacts and the dataset
    #[arg(long, global = true)]
    artifacts: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend jobs and predict a career category for a profile
    Recommend(RecommendArgs),
    /// List the majors available in the dataset
    Majors,
    /// Check artifacts exist and match the manifest digests
    Verify,
    /// Describe the application
    About,
}

#[derive(Args)]
struct RecommendArgs {
    /// Male, Female or "Prefer not to say"
    #[arg(long)]
    gender: Gender,

    /// Undergraduate major, one of `careerlens majors`
    #[arg(long)]
    major: String,

    /// Main interests, comma separated (e.g. "technology, data science, ai")
    #[arg(long, default_value = "")]
    interests: String,

    /// Skills, comma separated (e.g. "python, machine learning, sql")
    #[arg(long, default_value = "")]
    skills: String,

    /// Average CGPA between 2.0 and 4.0
    #[arg(long, default_value_t = MIN_CGPA)]
    cgpa: f64,

    /// Whether you hold a certification (Yes or No)
    #[arg(long, default_value = "No")]
    certification: Certification,

    /// Certification title, if any
    #[arg(long, default_value = "")]
    certification_title: String,

    /// Working or "Not Working"
    #[arg(long, default_value = "Not Working")]
    status: WorkingStatus,

    /// Show interest and skill match counts for each job
    #[arg(long)]
    details: bool,

    /// Print the recommendation as JSON
    #[arg(long)]
    json: bool,
}

impl RecommendArgs {
    fn profile(&self) -> Profile {
        Profile::new(self.gender, self.major.trim())
            .with_interests(self.interests.trim())
            .with_skills(self.skills.trim())
            .with_min_cgpa(self.cgpa)
            .with_certification(self.certification, self.certification_title.trim())
            .with_working_status(self.status)
    }
}

fn load_config(cli: &Cli) -> Result<RecommenderConfig> {
    let mut config = match &cli.config {
        Some(path) => RecommenderConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RecommenderConfig::default(),
    };
    if let Some(dir) = &cli.artifacts {
        config.artifact_dir = dir.clone();
    }
    info!("Using artifacts in {:?}", config.artifact_dir);
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store = ArtifactStore::new(load_config(&cli)?);

    match &cli.command {
        Command::Recommend(args) => recommend(&store, args),
        Command::Majors => majors(&store),
        Command::Verify => verify(&store),
        Command::About => {
            about();
            Ok(())
        }
    }
}

fn recommend(store: &ArtifactStore, args: &RecommendArgs) -> Result<()> {
    let dataset = match store.load_dataset() {
        Ok(dataset) => dataset,
        Err(e) => {
            // Without data there is nothing to filter; report and stop.
            warn!("Dataset unavailable: {}", e);
            println!("Error: {}", e);
            return Ok(());
        }
    };

    let recommender = Recommender::builder()
        .with_artifacts(store)?
        .with_dataset(dataset)
        .build()
        .context("Failed to build recommender")?;

    let profile = args.profile();
    let recommendation = match recommender.recommend(&profile) {
        Ok(recommendation) => recommendation,
        Err(e) if e.is_validation() => {
            println!("Warning: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        render(&recommendation, args.details);
    }
    Ok(())
}

fn render(recommendation: &Recommendation, details: bool) {
    println!("Job Recommendations:");
    if let Prediction::Category(_) = recommendation.prediction {
        println!("{}", recommendation.prediction);
    }
    for warning in recommendation.warnings() {
        println!("Warning: {}", warning);
    }

    for job in &recommendation.jobs {
        if details {
            println!(
                "  {} (interests: {}, skills: {}, total: {})",
                job.category(),
                job.interest_match,
                job.skill_match,
                job.total_match()
            );
        } else {
            println!("  {}", job.category());
        }
    }
}

fn majors(store: &ArtifactStore) -> Result<()> {
    match store.load_dataset() {
        Ok(dataset) => {
            for major in dataset.majors() {
                println!("{}", major);
            }
        }
        Err(e) => println!("Error: {}", e),
    }
    Ok(())
}

fn verify(store: &ArtifactStore) -> Result<()> {
    let missing = store.missing_artifacts();
    if !missing.is_empty() {
        for path in &missing {
            println!("Missing: {}", path.display());
        }
        anyhow::bail!("{} model artifacts are missing", missing.len());
    }

    let verified = store.verify()?;
    if verified == 0 {
        println!("All model artifacts present (no manifest to verify against)");
    } else {
        println!("Verified {} files against the manifest", verified);
    }
    Ok(())
}

fn about() {
    println!("Job Recommendation System");
    println!();
    println!("Recommends jobs based on your profile:");
    for field in [
        "Gender",
        "Undergraduate major",
        "Main interests",
        "Skills",
        "Average CGPA",
        "Certification",
        "Current working status",
    ] {
        println!("  - {}", field);
    }
    println!();
    println!("Matching jobs are ranked by shared interests and skills; a nearest-neighbour");
    println!("model trained offline predicts the career category that fits your profile.");
}
