//! Connection handling for the target MongoDB deployment.

use mongodb::bson::doc;
use mongodb::{options::ClientOptions, Client, Database};

/// Connect to the MongoDB instance and return a handle to the named database.
///
/// The driver connects lazily; a bad URI fails here, an unreachable server
/// fails on the first command issued against the handle.
pub async fn connect(mongo_uri: &str, db_name: &str) -> mongodb::error::Result<Database> {
    let client_options = ClientOptions::parse(mongo_uri).await?;
    let client = Client::with_options(client_options)?;
    Ok(client.database(db_name))
}

/// Round-trip a `ping` command to confirm the deployment is reachable.
pub async fn ping(db: &Database) -> mongodb::error::Result<()> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
