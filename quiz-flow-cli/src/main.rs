use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use quiz_flow::config::SubmitConfig;
use quiz_flow::{
    ConfigLoader, DirectorySubmitter, HttpSubmitter, LogFormat, QuestionGraph, QuizConfig,
    QuizDefinition, QuizError, Session, SubmitError, Submission, Submitter, init_tracing,
};
use quiz_flow_dialoguer::DialoguerFrontend;

#[derive(Parser, Debug)]
#[command(
    name = "quiz-flow",
    about = "Run branching quizzes in the terminal",
    version
)]
struct Cli {
    /// Config file, layered over ./quiz-flow.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `quiz_flow=trace` (RUST_LOG wins)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormatChoice>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a quiz and submit the result
    Run {
        #[command(flatten)]
        source: QuizSource,

        /// Post answers to this endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Store answers and monthly tallies under this directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Plain prompts without colors
        #[arg(long)]
        plain: bool,
    },

    /// Report structural problems in a quiz
    Check {
        #[command(flatten)]
        source: QuizSource,
    },

    /// List the built-in quizzes
    List,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct QuizSource {
    /// Quiz definition file (.json or .toml)
    #[arg(long)]
    quiz: Option<PathBuf>,

    /// Name of a built-in quiz (see `list`)
    #[arg(long)]
    builtin: Option<String>,
}

impl QuizSource {
    fn load(&self) -> Result<QuizDefinition> {
        if let Some(path) = &self.quiz {
            return QuizDefinition::load(path)
                .with_context(|| format!("Failed to load quiz from {}", path.display()));
        }
        let name = self.builtin.as_deref().unwrap_or_default();
        match example_quizzes::builtin(name) {
            Some(quiz) => Ok(quiz?),
            None => bail!(
                "Unknown built-in quiz `{name}`, expected one of: {}",
                example_quizzes::NAMES.join(", ")
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

/// Where a finished quiz goes.
#[derive(Debug)]
enum Sink {
    Http(HttpSubmitter),
    Directory(DirectorySubmitter),
    Print,
}

impl Sink {
    fn from_config(config: &SubmitConfig) -> Result<Self> {
        if let Some(endpoint) = &config.endpoint {
            let submitter = HttpSubmitter::with_timeout(endpoint.clone(), config.timeout())
                .context("Failed to build HTTP client")?
                .retries(config.retries);
            return Ok(Self::Http(submitter));
        }
        if let Some(dir) = &config.output_dir {
            return Ok(Self::Directory(DirectorySubmitter::new(dir.clone())));
        }
        Ok(Self::Print)
    }
}

impl Submitter for Sink {
    type Error = SubmitError;

    fn submit(&self, submission: &Submission) -> Result<(), Self::Error> {
        match self {
            Self::Http(submitter) => submitter.submit(submission),
            Self::Directory(submitter) => submitter.submit(submission),
            Self::Print => {
                println!("{}", submission.to_json()?);
                Ok(())
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.log.format = format.into();
    }
    init_tracing(&config.log.level, config.log.format);

    match cli.command {
        Command::Run {
            source,
            endpoint,
            output_dir,
            plain,
        } => {
            if endpoint.is_some() {
                config.submit.endpoint = endpoint;
            }
            if output_dir.is_some() {
                config.submit.output_dir = output_dir;
            }
            run(&source, &config, plain)
        }
        Command::Check { source } => check(&source),
        Command::List => list(),
    }
}

fn run(source: &QuizSource, config: &QuizConfig, plain: bool) -> Result<()> {
    let graph = QuestionGraph::checked(source.load()?)?;
    let sink = Sink::from_config(&config.submit)?;
    let frontend = if plain {
        DialoguerFrontend::plain()
    } else {
        DialoguerFrontend::new()
    }
    .with_text_rules(config.text.clone());

    match Session::start(&graph).run(frontend, sink) {
        Ok(_) => Ok(()),
        Err(QuizError::Cancelled) => {
            info!("quiz cancelled, nothing submitted");
            Ok(())
        }
        Err(err) => {
            if let Some(payload) = err.unsubmitted() {
                warn!("submission failed, printing answers instead");
                println!("{}", payload.to_json()?);
            }
            Err(err.into())
        }
    }
}

fn check(source: &QuizSource) -> Result<()> {
    let graph = QuestionGraph::new(source.load()?)?;
    let findings = graph.validate();
    let unreachable = graph.unreachable();

    for finding in &findings {
        println!("error: {finding}");
    }
    for id in &unreachable {
        println!("warning: question {id} cannot be reached from the root");
    }

    if !findings.is_empty() {
        bail!("{} problem(s) in quiz `{}`", findings.len(), graph.quiz_id());
    }
    println!(
        "quiz `{}` is fine ({} questions)",
        graph.quiz_id(),
        graph.len()
    );
    Ok(())
}

fn list() -> Result<()> {
    for (name, quiz) in example_quizzes::all()? {
        println!(
            "{name:<16} {} ({} questions)",
            quiz.title.as_deref().unwrap_or(&quiz.id),
            quiz.questions.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_needs_exactly_one_source() {
        assert!(Cli::try_parse_from(["quiz-flow", "run"]).is_err());
        assert!(
            Cli::try_parse_from([
                "quiz-flow",
                "run",
                "--quiz",
                "a.json",
                "--builtin",
                "sandwich"
            ])
            .is_err()
        );

        let cli = Cli::try_parse_from(["quiz-flow", "run", "--builtin", "sandwich", "--plain"])
            .unwrap();
        let Command::Run { source, plain, .. } = cli.command else {
            panic!("expected run");
        };
        assert!(plain);
        assert_eq!(source.builtin.as_deref(), Some("sandwich"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "quiz-flow",
            "list",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert!(matches!(cli.log_format, Some(LogFormatChoice::Json)));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn builtin_sources_load() {
        let source = QuizSource {
            quiz: None,
            builtin: Some("spooky-forest".into()),
        };
        assert_eq!(source.load().unwrap().id, "spooky-forest");

        let unknown = QuizSource {
            quiz: None,
            builtin: Some("pizza".into()),
        };
        assert!(unknown.load().is_err());
    }

    #[test]
    fn file_sources_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.json");
        let json = example_quizzes::course_feedback().to_json_pretty().unwrap();
        std::fs::write(&path, json).unwrap();

        let source = QuizSource {
            quiz: Some(path),
            builtin: None,
        };
        assert_eq!(source.load().unwrap().id, "1");
    }

    #[test]
    fn sink_prefers_endpoint_over_directory() {
        let mut config = SubmitConfig {
            output_dir: Some("answers".into()),
            ..SubmitConfig::default()
        };
        assert!(matches!(
            Sink::from_config(&config).unwrap(),
            Sink::Directory(_)
        ));

        config.endpoint = Some("http://localhost:8080/store".into());
        assert!(matches!(Sink::from_config(&config).unwrap(), Sink::Http(_)));

        assert!(matches!(
            Sink::from_config(&SubmitConfig::default()).unwrap(),
            Sink::Print
        ));
    }

    #[test]
    fn check_reports_broken_quizzes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(
            &path,
            r#"{"id":"b","questions":[{"id":0,"title":"Go","type":"button","answers":[{"id":1,"text":"On","nextQuestionId":7}]}]}"#,
        )
        .unwrap();

        let broken = QuizSource {
            quiz: Some(path),
            builtin: None,
        };
        assert!(check(&broken).is_err());

        let fine = QuizSource {
            quiz: None,
            builtin: Some("coffee".into()),
        };
        assert!(check(&fine).is_ok());
    }
}
