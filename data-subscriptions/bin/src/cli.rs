use std::{io, io::Write, path::PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::{
    command::{run_notify, run_notify_non_subscribable},
    config::Config,
    error, shadow,
};

#[derive(Debug, Parser)]
#[command(author,
    version,
    long_version = shadow::CLAP_LONG_VERSION,
    about,
    long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(
        long = "config",
        short = 'c',
        env = "DATA_SUBSCRIPTIONS_CONFIG_FILE_PATH",
        help = "Specify a configuration file"
    )]
    config_file_path: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[clap(about = "Print version information")]
    Version,

    #[clap(about = "Output shell completion code for the specified shell (bash, zsh, fish)")]
    Completion { shell: Shell },

    #[clap(about = "Output default configuration")]
    DefaultConfig,

    #[clap(about = "Email users about recent activity on the datasets they subscribed to")]
    Notify {
        #[clap(
            long = "input",
            short = 'i',
            help = "JSON file holding an array of notification candidates"
        )]
        input: PathBuf,
    },

    #[clap(about = "Tell a user their subscription to a no longer subscribable dataset was removed")]
    NotifyNonSubscribable {
        #[clap(long = "dataset-id", help = "Id or name of the dataset")]
        dataset_id: String,

        #[clap(long = "user-id", help = "Id or name of the subscribed user")]
        user_id: String,
    },
}

impl Cli {
    pub fn run(self) -> Result<(), Box<error::Error>> {
        match self.command {
            Command::Version => {
                io::stdout()
                    .write_all(Self::command().render_long_version().as_bytes())
                    .expect("failed to write to stdout");
            }
            Command::Completion { shell } => {
                let mut command = Self::command();
                let bin_name = command.get_name().to_string();
                clap_complete::generate(shell, &mut command, bin_name, &mut io::stdout());
            }
            Command::DefaultConfig => {
                let config_text =
                    serde_yaml::to_string(&Config::default()).expect("`Config` is serializable");
                io::stdout().write_all(config_text.as_bytes()).expect("failed to write to stdout");
            }
            Command::Notify { ref input } => {
                let config = self.load_config()?;
                run_notify(config, input)?;
            }
            Command::NotifyNonSubscribable { ref dataset_id, ref user_id } => {
                let config = self.load_config()?;
                run_notify_non_subscribable(config, dataset_id, user_id)?;
            }
        }

        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn load_config(&self) -> Result<Config, error::Error> {
        let config_file_path = &self.config_file_path.clone().unwrap_or_else(Config::default_path);
        Ok(Config::load(config_file_path)?)
    }
}
