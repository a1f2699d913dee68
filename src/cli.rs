// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::bookmarks::export_bookmarks;
use crate::cmd::bookmarks::import_bookmarks;
use crate::cmd::check::check_source;
use crate::cmd::drill::server::start_server;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::config::Config;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill vocabulary in the browser.
    Drill {
        /// Path or URL of the vocabulary document.
        source: Option<String>,
        /// The port to serve on.
        #[arg(long)]
        port: Option<u16>,
        /// Path to the session database.
        #[arg(long)]
        database: Option<PathBuf>,
        /// Don't open the browser.
        #[arg(long)]
        no_open: bool,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Check that a document parses and contains vocabulary.
    Check {
        /// Path or URL of the vocabulary document.
        source: Option<String>,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print statistics about a document and its saved session.
    Stats {
        /// Path or URL of the vocabulary document.
        source: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
        /// Path to the session database.
        #[arg(long)]
        database: Option<PathBuf>,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the saved bookmarks as JSON.
    ExportBookmarks {
        /// Path or URL of the vocabulary document.
        source: Option<String>,
        /// Path to the session database.
        #[arg(long)]
        database: Option<PathBuf>,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Replace the saved bookmarks with those in a bookmark file.
    ImportBookmarks {
        /// Path to the bookmark file.
        file: PathBuf,
        /// Path or URL of the vocabulary document.
        source: Option<String>,
        /// Path to the session database.
        #[arg(long)]
        database: Option<PathBuf>,
        /// Path to the configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            source,
            port,
            database,
            no_open,
            config,
        } => {
            let config = Config::load(config.as_deref())?
                .with_overrides(source, port, database, no_open);
            start_server(config).await
        }
        Command::Check { source, config } => {
            let config = Config::load(config.as_deref())?
                .with_overrides(source, None, None, false);
            check_source(&config).await
        }
        Command::Stats {
            source,
            format,
            database,
            config,
        } => {
            let config = Config::load(config.as_deref())?
                .with_overrides(source, None, database, false);
            print_stats(&config, format).await
        }
        Command::ExportBookmarks {
            source,
            database,
            config,
        } => {
            let config = Config::load(config.as_deref())?
                .with_overrides(source, None, database, false);
            export_bookmarks(&config).await
        }
        Command::ImportBookmarks {
            file,
            source,
            database,
            config,
        } => {
            let config = Config::load(config.as_deref())?
                .with_overrides(source, None, database, false);
            import_bookmarks(&config, &file).await
        }
    }
}
