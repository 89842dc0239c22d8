use bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};

use crate::domain::user::User;

pub const USERS_COLLECTION: &str = "Users";
pub const PRODUCTS_COLLECTION: &str = "Products";

/// Connects to MongoDB and verifies the server answers a ping
pub async fn connect(uri: &str, database_name: &str) -> mongodb::error::Result<Database> {
    let client = Client::with_uri_str(uri).await?;
    let database = client.database(database_name);
    database.run_command(doc! { "ping": 1 }, None).await?;
    Ok(database)
}

/// Creates the unique indexes backing the email and phone checks at signup
pub async fn ensure_indexes(database: &Database) -> mongodb::error::Result<()> {
    let users = database.collection::<User>(USERS_COLLECTION);
    let unique = || IndexOptions::builder().unique(true).build();

    users
        .create_indexes(
            [
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique())
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "phone": 1 })
                    .options(unique())
                    .build(),
            ],
            None,
        )
        .await?;

    Ok(())
}
