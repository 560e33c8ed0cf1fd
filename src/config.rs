use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::data::loader::{LoadConfig, DEFAULT_METADATA_FILE, DEFAULT_PARTS};

/// Hall of Fame enhancers dashboard.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding the peak chunks and the metadata file
    #[arg(short, long, env = "HOF_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Metadata file, relative to the data directory unless absolute
    #[arg(short, long, env = "HOF_METADATA_FILE", default_value = DEFAULT_METADATA_FILE)]
    pub metadata_file: PathBuf,

    /// Number of chunk families to load (part1 … partN)
    #[arg(long, default_value_t = DEFAULT_PARTS)]
    pub parts: usize,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Move chunk CSVs and the metadata file into the data directory, then exit
    Stage {
        /// Directory currently holding the files
        #[arg(long, default_value = "data_chunks")]
        from: PathBuf,
    },
}

impl Args {
    pub fn load_config(&self) -> LoadConfig {
        LoadConfig {
            data_dir: self.data_dir.clone(),
            metadata_file: self.metadata_file.clone(),
            parts: self.parts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dataset_layout() {
        let args = Args::try_parse_from(["hof-enhancers"]).unwrap();
        assert_eq!(args.load_config(), LoadConfig::default());
        assert!(args.command.is_none());
    }

    #[test]
    fn stage_subcommand() {
        let args = Args::try_parse_from(["hof-enhancers", "--data-dir", "/srv/hof", "stage", "--from", "incoming"])
            .unwrap();
        assert_eq!(args.data_dir, PathBuf::from("/srv/hof"));
        match args.command {
            Some(Command::Stage { from }) => assert_eq!(from, PathBuf::from("incoming")),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
