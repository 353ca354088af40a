use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;

use efficient_gitlab::config::{Config, OutputFormat};
use efficient_gitlab::gitlab::types::{
    JobScope, OrderBy, PipelineScope, PipelineSource, PipelineStatus, SortOrder,
};
use efficient_gitlab::{
    BridgeFilter, BridgesRequest, GitLabClient, Order, Pagination, PipelineFilter,
    PipelineJobFilter, PipelineJobsRequest, ProjectJobsRequest, ProjectPipelinesRequest, Token,
};

use crate::output;

#[derive(Parser)]
#[command(name = "efficient-gitlab")]
#[command(author, version, about = "Query GitLab pipelines and jobs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./efficient-gitlab.toml or the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, env = "GITLAB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// GitLab instance base URL
    #[arg(short, long, global = true)]
    url: Option<String>,

    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pipeline queries
    #[command(subcommand)]
    Pipelines(PipelineCommands),

    /// Job queries
    #[command(subcommand)]
    Jobs(JobCommands),
}

#[derive(Subcommand)]
enum PipelineCommands {
    List {
        #[command(flatten)]
        target: ProjectArg,
        #[command(flatten)]
        page: PageArgs,
        #[command(flatten)]
        filter: PipelineFilterArgs,
    },
    Get {
        #[command(flatten)]
        target: ProjectArg,
        #[arg(long)]
        pipeline: u64,
    },
    Latest {
        #[command(flatten)]
        target: ProjectArg,
    },
    Variables {
        #[command(flatten)]
        target: ProjectArg,
        #[arg(long)]
        pipeline: u64,
    },
}

#[derive(Subcommand)]
enum JobCommands {
    /// Jobs of a project
    List {
        #[command(flatten)]
        target: ProjectArg,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Jobs of one pipeline
    Pipeline {
        #[command(flatten)]
        target: ProjectArg,
        #[arg(long)]
        pipeline: u64,
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        include_retried: Option<bool>,
        #[arg(long, value_delimiter = ',')]
        scope: Vec<JobScope>,
    },
    /// Bridge (trigger) jobs of one pipeline
    Bridges {
        #[command(flatten)]
        target: ProjectArg,
        #[arg(long)]
        pipeline: u64,
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, value_delimiter = ',')]
        scope: Vec<JobScope>,
    },
    Get {
        #[command(flatten)]
        target: ProjectArg,
        #[arg(long)]
        job: u64,
    },
}

#[derive(Args)]
struct ProjectArg {
    /// Numeric project ID (falls back to the config file)
    #[arg(short = 'P', long)]
    project: Option<u64>,
}

#[derive(Args)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 20)]
    per_page: u32,
    #[arg(long, default_value_t = OrderBy::UpdatedAt)]
    order_by: OrderBy,
    #[arg(long, default_value_t = SortOrder::Desc)]
    sort: SortOrder,
}

impl PageArgs {
    fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page)
    }

    fn order(&self) -> Order {
        Order::new(self.order_by, self.sort)
    }
}

#[derive(Args)]
struct PipelineFilterArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long = "ref")]
    ref_: Option<String>,
    #[arg(long)]
    scope: Option<PipelineScope>,
    #[arg(long)]
    sha: Option<String>,
    #[arg(long)]
    source: Option<PipelineSource>,
    #[arg(long)]
    status: Option<PipelineStatus>,
    /// RFC 3339 timestamp
    #[arg(long)]
    updated_after: Option<DateTime<Utc>>,
    /// RFC 3339 timestamp
    #[arg(long)]
    updated_before: Option<DateTime<Utc>>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    yaml_errors: Option<bool>,
}

impl From<PipelineFilterArgs> for PipelineFilter {
    fn from(args: PipelineFilterArgs) -> Self {
        Self {
            name: args.name,
            ref_: args.ref_,
            scope: args.scope,
            sha: args.sha,
            source: args.source,
            status: args.status,
            updated_after: args.updated_after,
            updated_before: args.updated_before,
            username: args.username,
            yaml_errors: args.yaml_errors,
        }
    }
}

struct Session {
    client: GitLabClient,
    default_project: Option<u64>,
    format: OutputFormat,
    pretty: bool,
}

impl Session {
    fn project(&self, target: &ProjectArg) -> Result<u64> {
        target
            .project
            .or(self.default_project)
            .context("No project given (use --project or set `project` in the config file)")
    }

    fn emit<T: Serialize + output::Tabular>(&self, items: &[T]) -> Result<()> {
        match self.format {
            OutputFormat::Table => output::print_table(items),
            OutputFormat::Json => output::print_json(items, self.pretty)?,
        }
        Ok(())
    }
}

impl Cli {
    fn session(self) -> Result<(Session, Commands)> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(url) = self.url {
            config.gitlab.base_url = url;
        }

        let client_config = config.gitlab.client_config(self.token.map(Token::from))?;
        let client = GitLabClient::new(client_config)?;

        let session = Session {
            client,
            default_project: config.gitlab.project,
            format: self.format.unwrap_or(config.output.format),
            pretty: self.pretty || config.output.pretty,
        };
        Ok((session, self.command))
    }

    pub async fn execute(self) -> Result<()> {
        let (ctx, command) = self.session()?;
        info!("Using GitLab API at {}", ctx.client.api_url());

        match command {
            Commands::Pipelines(command) => execute_pipelines(&ctx, command).await,
            Commands::Jobs(command) => execute_jobs(&ctx, command).await,
        }
    }
}

async fn execute_pipelines(ctx: &Session, command: PipelineCommands) -> Result<()> {
    let pipelines = ctx.client.pipelines();

    match command {
        PipelineCommands::List {
            target,
            page,
            filter,
        } => {
            let request = ProjectPipelinesRequest::new(ctx.project(&target)?)
                .pagination(page.pagination())
                .order(page.order())
                .filter(filter.into());
            let items = pipelines.list_project(&request).await?;
            info!("Fetched {} pipelines", items.len());
            ctx.emit(&items)
        }
        PipelineCommands::Get { target, pipeline } => {
            let item = pipelines.get(ctx.project(&target)?, pipeline).await?;
            ctx.emit(&[item])
        }
        PipelineCommands::Latest { target } => {
            let item = pipelines.latest(ctx.project(&target)?).await?;
            ctx.emit(&[item])
        }
        PipelineCommands::Variables { target, pipeline } => {
            let items = pipelines.variables(ctx.project(&target)?, pipeline).await?;
            ctx.emit(&items)
        }
    }
}

async fn execute_jobs(ctx: &Session, command: JobCommands) -> Result<()> {
    let jobs = ctx.client.jobs();

    match command {
        JobCommands::List { target, page } => {
            let request = ProjectJobsRequest::new(ctx.project(&target)?)
                .pagination(page.pagination())
                .order(page.order());
            let items = jobs.list_project(&request).await?;
            info!("Fetched {} jobs", items.len());
            ctx.emit(&items)
        }
        JobCommands::Pipeline {
            target,
            pipeline,
            page,
            include_retried,
            scope,
        } => {
            let request = PipelineJobsRequest::new(ctx.project(&target)?, pipeline)
                .pagination(page.pagination())
                .order(page.order())
                .filter(PipelineJobFilter {
                    include_retried,
                    scope,
                });
            let items = jobs.list_pipeline(&request).await?;
            ctx.emit(&items)
        }
        JobCommands::Bridges {
            target,
            pipeline,
            page,
            scope,
        } => {
            let request = BridgesRequest::new(ctx.project(&target)?, pipeline)
                .pagination(page.pagination())
                .order(page.order())
                .filter(BridgeFilter { scope });
            let items = jobs.list_bridges(&request).await?;
            ctx.emit(&items)
        }
        JobCommands::Get { target, job } => {
            let item = jobs.get(ctx.project(&target)?, job).await?;
            ctx.emit(&[item])
        }
    }
}
