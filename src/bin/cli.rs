use clap::{Parser, Subcommand};

use steamscout::catalog::DEFAULT_NEWS_COUNT;
use steamscout::{LookupConfig, LookupError, SteamLookup};

#[derive(Parser)]
#[command(name = "steamscout")]
#[command(about = "Steam catalog and profile lookup", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Steam Web API key (falls back to STEAM_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the storefront catalog for a game
    Search {
        /// Game title to search for
        query: String,
    },

    /// Latest news for a game
    News {
        /// Game title
        title: String,

        /// Number of entries
        #[arg(short, long, default_value_t = DEFAULT_NEWS_COUNT)]
        count: usize,
    },

    /// Global achievement unlock percentages for a game
    Achievements {
        /// Game title
        title: String,
    },

    /// Current player count for a game
    Players {
        /// Game title
        title: String,
    },

    /// Search community profiles by display name
    Profiles {
        /// Display name to search for
        display_name: String,
    },

    /// Resolve a vanity alias to a steamid64
    Vanity {
        /// Vanity alias
        vanity_name: String,
    },

    /// Owned games of a steamid64
    Owned {
        /// SteamID64
        steam_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let api_key = cli
        .api_key
        .or_else(|| std::env::var("STEAM_API_KEY").ok())
        .unwrap_or_default();
    let lookup = SteamLookup::new(LookupConfig { api_key, ..LookupConfig::default() });

    match cli.command {
        Commands::Search { query } => {
            println!("🔍 Searching for: {}", query);
            match lookup.search_games(&query).await {
                Ok(games) => {
                    println!("\n✅ {} result(s):", games.len());
                    for game in games {
                        let metascore = game
                            .metascore
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| "N/A".to_string());
                        println!("   {} (appid {})", game.name, game.app_id);
                        println!("      Price: {}", game.price);
                        println!("      Metascore: {}", metascore);
                        println!("      Platforms: {}", game.platforms.labels().join(", "));
                        println!("      URL: {}", game.store_url());
                    }
                }
                Err(e) => report(e),
            }
        }

        Commands::News { title, count } => {
            println!("🔍 Fetching news for: {}", title);
            match lookup.fetch_news(&title, count).await {
                Ok(items) => {
                    println!("\n📰 {} item(s):", items.len());
                    for item in items {
                        println!(
                            "   [{}] {}",
                            item.published_at().format("%Y-%m-%d"),
                            item.title
                        );
                        println!("      {}", item.url);
                    }
                }
                Err(e) => report(e),
            }
        }

        Commands::Achievements { title } => {
            println!("🔍 Fetching achievements for: {}", title);
            match lookup.fetch_achievements(&title).await {
                Ok(stats) => {
                    println!("\n🏆 {} achievement(s):", stats.len());
                    for stat in stats {
                        println!("   {:.1}%  {}", stat.percent, stat.name);
                    }
                }
                Err(e) => report(e),
            }
        }

        Commands::Players { title } => {
            println!("🔍 Fetching player count for: {}", title);
            match lookup.fetch_player_count(&title).await {
                Ok(count) => println!("\n✅ {} players in game right now", count),
                Err(e) => report(e),
            }
        }

        Commands::Profiles { display_name } => {
            println!("🔍 Searching profiles for: {} (this drives a browser, hang on)", display_name);
            match lookup.search_display_names(&display_name).await {
                Ok(profiles) => {
                    println!("\n✅ {} profile(s):", profiles.len());
                    for profile in profiles {
                        println!("   {} -> {}", profile.display_name, profile.profile_url);
                    }
                }
                Err(e) => report(e),
            }
        }

        Commands::Vanity { vanity_name } => {
            println!("🔍 Resolving vanity alias: {}", vanity_name);
            match lookup.resolve_vanity_url(&vanity_name).await {
                Ok(steam_id) => println!("\n✅ steamid64: {}", steam_id),
                Err(e) => report(e),
            }
        }

        Commands::Owned { steam_id } => {
            println!("🔍 Fetching owned games for: {}", steam_id);
            match lookup.fetch_owned_games(&steam_id).await {
                Ok(games) => {
                    println!("\n✅ {} game(s):", games.len());
                    for game in games {
                        println!("   {} ({:.1}h total)", game.name, game.playtime_hours());
                    }
                }
                Err(e) => report(e),
            }
        }
    }

    Ok(())
}

/// One fixed informational message per non-success variant. The structured
/// cause goes to the log, never raw into the terminal output.
fn report(err: LookupError) {
    tracing::debug!("lookup failed: {}", err);

    match err {
        LookupError::NotFound { query } => println!("❌ Nothing found for '{}'.", query),
        LookupError::Transport(_) => println!("⚠️ Steam could not be reached. Try again later."),
        LookupError::Parse(_) => println!("⚠️ Steam answered with something unexpected. Try again later."),
        LookupError::Session(_) => println!("⚠️ The browser session could not be started or crashed."),
        LookupError::Cancelled => println!("🚫 Lookup cancelled."),
    }
}
