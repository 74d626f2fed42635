//! Demonstration client for the CJTP server.
//!
//! Speaks newline-delimited CJTP over a single TCP connection. The
//! `demo` subcommand replays the canonical request sequence; `send`
//! fires one ad-hoc request.

use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

#[derive(Parser)]
#[command(name = "cjtp-cli")]
#[command(about = "Demonstration client for the CJTP server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    address: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the canonical request sequence
    Demo,
    /// Send a single request
    Send {
        /// Method: read, create, update, delete, or echo
        method: String,
        /// Resource path, e.g. /api/categories/1
        path: String,
        /// Request body, when the method needs one
        #[arg(short, long)]
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let stream = TcpStream::connect(&cli.address).await?;
    println!("Connected to {}", cli.address);
    let (read_half, write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut writer = write_half;

    match cli.command {
        Commands::Demo => {
            let requests = [
                request("read", "/api/categories", None),
                request("read", "/api/categories/1", None),
                request(
                    "create",
                    "/api/categories",
                    Some(json!({"name": "Seafood"}).to_string()),
                ),
                request(
                    "update",
                    "/api/categories/3",
                    Some(json!({"cid": 3, "name": "Test"}).to_string()),
                ),
                request("delete", "/api/categories/3", None),
                request("echo", "/test", Some("Hello, server!".to_string())),
            ];
            for req in requests {
                exchange(&mut reader, &mut writer, req).await?;
            }
            println!("All requests sent.");
        }
        Commands::Send { method, path, body } => {
            exchange(&mut reader, &mut writer, request(&method, &path, body)).await?;
        }
    }

    Ok(())
}

/// Build a request object stamped with the current Unix time.
fn request(method: &str, path: &str, body: Option<String>) -> Value {
    let mut object = Map::new();
    object.insert("method".to_string(), Value::String(method.to_string()));
    object.insert("path".to_string(), Value::String(path.to_string()));
    object.insert("date".to_string(), Value::String(unix_now()));
    if let Some(body) = body {
        object.insert("body".to_string(), Value::String(body));
    }
    Value::Object(object)
}

fn unix_now() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
        .to_string()
}

/// Send one request and print the response.
async fn exchange(
    reader: &mut BufReader<OwnedReadHalf>,
    writer: &mut OwnedWriteHalf,
    request: Value,
) -> Result<(), Box<dyn std::error::Error>> {
    writer.write_all(request.to_string().as_bytes()).await?;
    writer.write_all(b"\n").await?;

    let mut line = String::new();
    reader.read_line(&mut line).await?;
    let response: Value = serde_json::from_str(line.trim_end())?;

    let method = request["method"].as_str().unwrap_or("?");
    let path = request["path"].as_str().unwrap_or("?");
    let status = response["status"].as_str().unwrap_or("?");
    print!("{method} {path} {status}");

    match response["body"].as_str() {
        Some(body) => match serde_json::from_str::<Value>(body) {
            Ok(parsed) => println!(" {}", serde_json::to_string_pretty(&parsed)?),
            // Plain text, e.g. an echo body.
            Err(_) => println!(" {body}"),
        },
        None => println!(),
    }

    println!("{}", "-".repeat(60));
    Ok(())
}
