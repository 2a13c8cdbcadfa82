//! Binary entry point for the Waypoint position server.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    lib_waypoint::init().await
}
