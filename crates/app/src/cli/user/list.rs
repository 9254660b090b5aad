use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService},
};

#[derive(Debug, Args)]
pub(crate) struct ListUsersArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: ListUsersArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let users = PgUsersService::new(Db::new(pool))
        .list_users()
        .await
        .map_err(|error| format!("failed to list users: {error}"))?;

    if users.is_empty() {
        println!("no users found");
        return Ok(());
    }

    for user in users {
        println!(
            "{}\t{}\t{}\t{} {}",
            user.uuid, user.role, user.email, user.first_name, user.last_name
        );
    }

    Ok(())
}
