use std::{io::Write, sync::Arc};

use clap::Parser;
use reviewbot_config::Config;
use reviewbot_core::CoreModule;
use reviewbot_database_interface::{DatabaseError, DbService};
use reviewbot_database_memory::MemoryDb;
use reviewbot_models::{PullRequest, Team, User};
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub db_service: MemoryDb,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self {
            config: Config::from_env_no_version(),
            core_module: CoreModule::builder().build(),
            db_service: MemoryDb::new(),
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            db_service: Box::new(self.db_service),
            writer,
        }
    }
}

pub(crate) async fn seed_team(
    ctx: &CommandContextTest,
    name: &str,
    member_ids: &[&str],
) -> Result<Team, DatabaseError> {
    ctx.db_service
        .teams_create(
            Team {
                name: name.into(),
                ..Default::default()
            }
            .with_members(
                member_ids
                    .iter()
                    .map(|id| User {
                        id: id.to_string(),
                        name: id.to_uppercase(),
                        is_active: true,
                        ..Default::default()
                    })
                    .collect(),
            ),
        )
        .await
}

pub(crate) async fn seed_pull_request(
    ctx: &CommandContextTest,
    id: &str,
    author_id: &str,
    reviewers: &[&str],
) -> Result<PullRequest, DatabaseError> {
    ctx.db_service
        .pull_requests_create(PullRequest {
            id: id.into(),
            name: format!("Pull request {id}"),
            author_id: author_id.into(),
            reviewers: reviewers.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        })
        .await
}

async fn run_command(ctx: CommandContextTest, command_args: &[&str]) -> (anyhow::Result<()>, String) {
    let buf = Arc::new(RwLock::new(Vec::new()));

    let result = {
        let command_args = {
            let mut tmp_args = vec!["bot"];
            tmp_args.extend(command_args);
            tmp_args
        };

        match Args::try_parse_from(command_args) {
            Ok(args) => {
                CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone())).await
            }
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    };

    let vec = buf.read().await.to_vec();
    (result, std::str::from_utf8(&vec).unwrap().to_string())
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, output) = run_command(ctx, command_args).await;
    result.unwrap();
    output
}

pub(crate) async fn test_command_error(
    ctx: CommandContextTest,
    command_args: &[&str],
) -> anyhow::Error {
    let (result, _) = run_command(ctx, command_args).await;
    result.unwrap_err()
}
