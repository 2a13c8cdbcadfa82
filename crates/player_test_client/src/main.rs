//! # Waypoint Position Server - Player Session Simulator
//!
//! Drives the line-oriented text protocol end to end against a running
//! server: each simulated player connects over TCP, JOINs under a
//! generated nickname, performs a bounded random walk with MOVE updates
//! at the configured frequency, then LEAVEs cleanly. Useful for manual
//! verification and for putting many concurrent sessions on one server.

use clap::Parser;
use rand::Rng;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::interval;
use tracing::{error, info, warn};

#[derive(Parser, Debug, Clone)]
#[command(name = "waypoint-simulate")]
#[command(about = "Waypoint Position Server - player session simulator")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:4000")]
    address: String,

    /// Number of simultaneous players to simulate
    #[arg(short, long, default_value = "5")]
    players: u32,

    /// Position updates per second per player
    #[arg(short, long, default_value = "10.0")]
    move_freq: f64,

    /// Simulation duration in seconds
    #[arg(short, long, default_value = "30")]
    duration: u64,

    /// Half-extent of the cubic world for the random walk
    #[arg(short, long, default_value = "1000")]
    world_size: i64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    info!(
        "🎮 Simulating {} player(s) against {} for {}s",
        args.players, args.address, args.duration
    );

    let mut handles = Vec::new();
    for id in 0..args.players {
        let args = args.clone();
        handles.push(tokio::spawn(async move {
            if let Err(e) = simulate_player(id, &args).await {
                error!("Player {} failed: {}", id, e);
            }
        }));
    }
    for handle in handles {
        let _ = handle.await;
    }

    info!("✅ Simulation complete");
}

/// Runs one full JOIN → random walk → LEAVE session.
async fn simulate_player(
    id: u32,
    args: &Args,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let nickname = format!("Player_{id}");
    let stream = TcpStream::connect(&args.address).await?;
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    writer
        .write_all(format!("JOIN:{nickname}\n").as_bytes())
        .await?;
    match lines.next_line().await? {
        Some(reply) if reply == format!("WELCOME:{nickname}") => {
            info!("🙋 {} joined", nickname);
        }
        Some(reply) => {
            warn!("{} got unexpected join reply: {}", nickname, reply);
            return Ok(());
        }
        None => return Err("server closed the stream during join".into()),
    }

    // MOVE gets no reply on success, so the walk runs open-loop; any
    // ERROR the server produced shows up before the GOODBYE below.
    let mut position = (0i64, 0i64, 0i64);
    let mut ticker = interval(Duration::from_secs_f64(1.0 / args.move_freq));
    let deadline = tokio::time::Instant::now() + Duration::from_secs(args.duration);
    let mut moves = 0u64;

    while tokio::time::Instant::now() < deadline {
        ticker.tick().await;
        position.0 = step(position.0, args.world_size);
        position.1 = step(position.1, args.world_size);
        position.2 = step(position.2, args.world_size);
        writer
            .write_all(format!("MOVE:{},{},{}\n", position.0, position.1, position.2).as_bytes())
            .await?;
        moves += 1;
    }

    writer.write_all(b"LEAVE:\n").await?;
    loop {
        match lines.next_line().await? {
            Some(reply) if reply == format!("GOODBYE:{nickname}") => {
                info!("👋 {} left cleanly after {} move(s)", nickname, moves);
                return Ok(());
            }
            Some(reply) => {
                warn!("{} got unexpected reply before goodbye: {}", nickname, reply);
            }
            None => {
                warn!("{} stream ended before goodbye", nickname);
                return Ok(());
            }
        }
    }
}

/// One bounded random-walk step along a single axis.
fn step(current: i64, bound: i64) -> i64 {
    let next = current + rand::thread_rng().gen_range(-10..=10);
    next.clamp(-bound, bound)
}
