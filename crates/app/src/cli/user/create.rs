use clap::Args;
use trolley_app::domain::users::{
    PgUsersService, UsersService, data::Registration, records::UserUuid,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[arg(long)]
    username: String,

    #[arg(long)]
    email: String,

    #[arg(long, env = "TROLLEY_USER_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let service = PgUsersService::new(args.database.connect().await?);

    let user = service
        .register(Registration {
            uuid: UserUuid::new(),
            username: args.username,
            email: args.email,
            confirm_password: args.password.clone(),
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("role: {}", user.role);

    Ok(())
}
