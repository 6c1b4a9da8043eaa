//! CLI runner - executes commands

use crate::api::WsApi;
use crate::cli::commands::{Cli, Commands, OutputFormat, PagingArgs};
use crate::config::{ClientConfig, PagingConfig};
use crate::error::{Error, Result};
use crate::nations::{nation_path, NationIndex};
use crate::pagination::PageEnumerator;
use crate::types::OptionStringExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        if let Commands::Nation { zone_path, nations } = &self.cli.command {
            return self.nation(zone_path, nations.as_deref());
        }

        let api = WsApi::new(self.client_config()?)?;
        debug!(client = ?api.client(), "Client ready");

        match &self.cli.command {
            Commands::Player { login } => self.emit(&api.players().info(login).await?),
            Commands::Maniastars { login } => {
                let planets = api.players().maniastars(login).await?;
                self.emit(&json!({ "login": login, "maniastars": planets }))
            }
            Commands::Server { login } => self.emit(&api.servers().info(login).await?),
            Commands::ServerPlayers { login } => {
                for player in api.servers().online_players(login).await? {
                    self.emit(&player)?;
                }
                Ok(())
            }
            Commands::Servers { paging } => {
                let (step_size, max_retries) = resolve_paging(paging, api.client().config().paging);
                let enumerator = api.servers().enumerator(step_size, max_retries);
                self.drain("servers", enumerator, paging.limit).await
            }
            Commands::Zone { zone } => {
                let info = match zone.trim().parse::<u32>() {
                    Ok(id) => api.zones().info_by_id(id).await?,
                    Err(_) => api.zones().info_by_path(zone).await?,
                };
                self.emit(&info)
            }
            Commands::Zones {
                sort,
                order,
                paging,
            } => {
                let (step_size, max_retries) = resolve_paging(paging, api.client().config().paging);
                let enumerator = api
                    .zones()
                    .enumerator(step_size, max_retries, *sort, *order);
                self.drain("zones", enumerator, paging.limit).await
            }
            Commands::Title { id } => self.emit(&api.titles().info(id).await?),
            Commands::Team { id } => self.emit(&api.teams().info(*id).await?),
            Commands::Ranking { login, title } => {
                self.emit(&api.rankings().multiplayer_player(login, title).await?)
            }
            // Handled before the client is built
            Commands::Nation { .. } => Ok(()),
        }
    }

    /// Effective client configuration
    ///
    /// Precedence, lowest first: defaults, config file, environment, flags.
    pub(crate) fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        }
        .with_env_overrides();

        if let Some(username) = self.cli.username.clone().none_if_empty() {
            config.credentials.username = username;
        }
        if let Some(password) = self.cli.password.clone().none_if_empty() {
            config.credentials.password = password;
        }
        if let Some(base_url) = self.cli.base_url.clone().none_if_empty() {
            config.base_url = base_url;
        }

        if config.credentials.username.trim().is_empty() {
            return Err(Error::config(format!(
                "No username given; use --username, the config file or {}",
                crate::config::ENV_USERNAME
            )));
        }

        Ok(config)
    }

    /// Resolve a zone path offline
    fn nation(&self, zone_path: &str, nations: Option<&std::path::Path>) -> Result<()> {
        let path = nation_path(zone_path);

        let Some(file) = nations else {
            return self.emit(&json!({ "zone_path": zone_path, "nation_path": path }));
        };

        let index = NationIndex::from_file(file)?;
        match index.get(zone_path) {
            Some(nation) => self.emit(&json!({
                "zone_path": zone_path,
                "nation_path": path,
                "nation": nation,
            })),
            None => Err(Error::nation_data(format!(
                "No nation for '{zone_path}' and no catch-all entry"
            ))),
        }
    }

    /// Emit every item of a listing, then log how it ended
    async fn drain<T>(
        &self,
        listing: &str,
        mut enumerator: PageEnumerator<T>,
        limit: Option<usize>,
    ) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        let start = Instant::now();
        let limit = limit.unwrap_or(usize::MAX);
        let mut count = 0usize;

        while count < limit {
            let Some(item) = enumerator.next_item().await else {
                break;
            };
            self.emit(&item)?;
            count += 1;
        }

        info!(
            listing,
            count,
            pages = enumerator.pages_decoded(),
            fetches = enumerator.fetch_attempts(),
            retries = enumerator.retries_used(),
            end_reason = ?enumerator.end_reason(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Listing finished"
        );
        Ok(())
    }

    /// Output a record
    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{line}");
        Ok(())
    }
}

/// Fill unset paging flags from the config
fn resolve_paging(args: &PagingArgs, defaults: PagingConfig) -> (u32, u32) {
    (
        args.step_size.unwrap_or(defaults.step_size),
        args.max_retries.unwrap_or(defaults.max_retries),
    )
}
