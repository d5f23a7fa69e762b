//! FloatChat CLI
//!
//! Command-line interface for FloatChat operations:
//! - Chat with the backend (greeting stub, sessions, or the analytics service)
//! - Inspect floats, nearest-float rankings and temperature series
//! - Check status
//! - Generate a config file

use clap::{Parser, Subcommand};
use floatchat::analytics::AnalyticsClient;
use floatchat::chat::{AppFunctionality, Attachment, ChatType};
use floatchat::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "floatchat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chat with ocean float data")]
#[command(long_about = "FloatChat answers questions about ocean floats.\nFind the nearest floats, plot temperature trends, or ask the analytics service about stored data.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:5000", global = true)]
    pub api_url: String,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a chat message
    Chat {
        /// Message text
        #[arg(required = true)]
        message: Vec<String>,
        /// Send within a session (answered by the local assistant)
        #[arg(short, long, conflicts_with = "remote")]
        session: Option<String>,
        /// Ask the analytics service instead of the backend
        #[arg(short, long)]
        remote: bool,
        /// Chat type for the analytics service (default: from config)
        #[arg(short, long)]
        chat_type: Option<String>,
        /// Treat the message as a file-processing request
        #[arg(long)]
        process_files: bool,
    },

    /// Ask the local assistant (nearest floats, temperature graphs)
    Demo {
        /// Message text
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// List all floats
    Floats,

    /// Rank floats by distance
    Nearest {
        /// Reference latitude (default: server reference point)
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Reference longitude (default: server reference point)
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Number of floats to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the monthly temperature series of a float
    Series {
        /// Float id
        id: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported chat types
    ChatTypes {
        /// Ask the analytics service instead of the backend
        #[arg(short, long)]
        remote: bool,
    },

    /// Show system status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Chat {
            message,
            session,
            remote,
            chat_type,
            process_files,
        } => {
            let message = message.join(" ");

            if remote {
                let config = Config::load_default();
                let chat_type: ChatType = chat_type
                    .as_deref()
                    .unwrap_or(&config.analytics.default_chat_type)
                    .parse()?;
                let functionality = if process_files {
                    AppFunctionality::ProcessFiles
                } else {
                    AppFunctionality::Chat
                };

                let analytics = AnalyticsClient::new(config.analytics.client_config())?;
                let reply = match analytics.chat(&message, chat_type, functionality).await {
                    Ok(reply) => reply.into_message(),
                    Err(e) => e.into_message(),
                };

                match &reply.attachment {
                    Some(Attachment::Image { data_uri }) => {
                        println!("{}", reply.content);
                        println!("[graph: {} bytes]", data_uri.len());
                    }
                    Some(Attachment::Error) => {
                        eprintln!("{}", reply.content);
                        std::process::exit(1);
                    }
                    _ => println!("{}", reply.content),
                }
                return Ok(());
            }

            let body = serde_json::json!({ "message": message });
            let url = match &session {
                Some(id) => format!("{}/api/chat/session/{}", cli.api_url, id),
                None => format!("{}/api/chat", cli.api_url),
            };

            let response = client.post(url).json(&body).send().await?;
            let data: serde_json::Value = check(response, "Chat").await.json().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!("{}", data["reply"].as_str().unwrap_or("-"));
                if let Some(floats) = data.get("floats") {
                    println!();
                    print_floats(floats);
                }
            }
        }

        Commands::Demo { message } => {
            let body = serde_json::json!({ "message": message.join(" ") });

            let response = client
                .post(format!("{}/api/demo/chat", cli.api_url))
                .json(&body)
                .send()
                .await?;
            let data: serde_json::Value = check(response, "Demo chat").await.json().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!("[{}]", data["intent"].as_str().unwrap_or("-"));
                println!("{}", data["reply"].as_str().unwrap_or("-"));

                if let Some(floats) = data.get("floats") {
                    println!();
                    print_floats(floats);
                }
                if let Some(chart) = data.get("chart") {
                    println!();
                    print_chart(chart);
                }
            }
        }

        Commands::Floats => {
            let response = client
                .get(format!("{}/api/floats", cli.api_url))
                .send()
                .await?;
            let data: serde_json::Value = check(response, "Fetching floats").await.json().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print_floats(&data["floats"]);
            }
        }

        Commands::Nearest { lat, lon, limit } => {
            let mut query: Vec<(&str, String)> = Vec::new();
            if let (Some(lat), Some(lon)) = (lat, lon) {
                query.push(("lat", lat.to_string()));
                query.push(("lon", lon.to_string()));
            }
            if let Some(limit) = limit {
                query.push(("limit", limit.to_string()));
            }

            let response = client
                .get(format!("{}/api/floats/nearest", cli.api_url))
                .query(&query)
                .send()
                .await?;
            let data: serde_json::Value = check(response, "Nearest query").await.json().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!(
                    "Nearest to ({}, {}):",
                    data["reference"]["lat"], data["reference"]["lon"]
                );
                println!();
                print_floats(&data["floats"]);
            }
        }

        Commands::Series { id, output } => {
            let format = if cli.format == "csv" { "csv" } else { "json" };

            let response = client
                .get(format!("{}/api/floats/{}/series", cli.api_url, id))
                .query(&[("format", format)])
                .send()
                .await?;
            let text = check(response, "Series export").await.text().await?;

            let rendered = match cli.format.as_str() {
                "csv" => text,
                "json" => {
                    let data: serde_json::Value = serde_json::from_str(&text)?;
                    serde_json::to_string_pretty(&data)? + "\n"
                }
                _ => {
                    let data: serde_json::Value = serde_json::from_str(&text)?;
                    render_series(&data)
                }
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered)?;
                    println!("Exported to {:?}", path);
                }
                None => {
                    print!("{}", rendered);
                }
            }
        }

        Commands::ChatTypes { remote } => {
            let chat_types = if remote {
                let config = Config::load_default();
                let analytics = AnalyticsClient::new(config.analytics.client_config())?;
                analytics.chat_types().await?
            } else {
                let response = client
                    .get(format!("{}/api/chat-types", cli.api_url))
                    .send()
                    .await?;
                let data: serde_json::Value =
                    check(response, "Fetching chat types").await.json().await?;
                data["chat_types"]
                    .as_array()
                    .map(|types| {
                        types
                            .iter()
                            .filter_map(|t| t.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default()
            };

            for chat_type in chat_types {
                println!("{}", chat_type);
            }
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/api/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("FloatChat v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    if let Some(sessions) = health["sessions"].as_u64() {
                        println!("Active sessions: {}", sessions);
                    }
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime: {}", format_duration(uptime));
                    }
                    if let Some(started) = health["started_at"].as_str() {
                        println!("Started: {}", started);
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to FloatChat API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the FloatChat API server is running:");
                    eprintln!("  cargo run --bin floatchat-api");
                    std::process::exit(1);
                }
            }

            let config = Config::load_default();
            let analytics = AnalyticsClient::new(config.analytics.client_config())?;
            let analytics_status = match analytics.health_check().await {
                Ok(()) => "ok".to_string(),
                Err(e) => e.to_string(),
            };
            println!();
            println!(
                "Analytics service ({}): {}",
                analytics.config().base_url,
                analytics_status
            );
        }

        Commands::Config { output } => {
            let config = floatchat::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Exit with the server's error body unless the response succeeded
async fn check(response: reqwest::Response, action: &str) -> reqwest::Response {
    if response.status().is_success() {
        return response;
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| body["error"].as_str().map(str::to_string))
        .unwrap_or(text);

    eprintln!("{} failed ({}): {}", action, status, message);
    std::process::exit(1);
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_floats(floats: &serde_json::Value) {
    let floats = match floats.as_array() {
        Some(f) if !f.is_empty() => f,
        _ => {
            println!("No floats");
            return;
        }
    };

    println!(
        "{:<10} {:<32} {:>9} {:>9} {:>7} {:>11}",
        "ID", "Name", "Lat", "Lon", "°C", "Distance"
    );
    println!("{}", "-".repeat(83));

    for float in floats {
        let distance = float["distance_km"]
            .as_f64()
            .map(|d| format!("{:.1} km", d))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<10} {:<32} {:>9.4} {:>9.4} {:>7.1} {:>11}",
            float["id"].as_str().unwrap_or("-"),
            float["name"].as_str().unwrap_or("-"),
            float["location"]["lat"].as_f64().unwrap_or(0.0),
            float["location"]["lon"].as_f64().unwrap_or(0.0),
            float["temperature"].as_f64().unwrap_or(0.0),
            distance
        );
    }
}

fn print_chart(chart: &serde_json::Value) {
    println!(
        "{} ({} chart)",
        chart["title"].as_str().unwrap_or("Chart"),
        chart["kind"].as_str().unwrap_or("bar")
    );

    let datasets = match chart["datasets"].as_array() {
        Some(d) => d,
        None => return,
    };

    for dataset in datasets {
        let values: Vec<String> = dataset["data"]
            .as_array()
            .map(|data| {
                data.iter()
                    .filter_map(|v| v.as_f64())
                    .map(|v| format!("{:.1}", v))
                    .collect()
            })
            .unwrap_or_default();

        println!(
            "  {:<32} {}",
            dataset["label"].as_str().unwrap_or("-"),
            values.join(" ")
        );
    }
}

fn render_series(series: &serde_json::Value) -> String {
    let mut out = format!(
        "{} ({})\n",
        series["float_name"].as_str().unwrap_or("-"),
        series["float_id"].as_str().unwrap_or("-")
    );
    out.push_str(&format!("{:<6} {:>8}\n", "Month", "°C"));
    out.push_str(&format!("{}\n", "-".repeat(15)));

    if let Some(points) = series["points"].as_array() {
        for point in points {
            out.push_str(&format!(
                "{:<6} {:>8.2}\n",
                point["month"].as_str().unwrap_or("-"),
                point["temperature"].as_f64().unwrap_or(0.0)
            ));
        }
    }

    out
}
