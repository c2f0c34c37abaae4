use clap::{App, Arg};
use log::error;
use qrtag_admin::prelude::*;

async fn run(supplier_id: &str, email: Option<&str>, password: Option<&str>) -> Result<(), Error> {
    let options = ClientOptions::from_env()?;
    let console = QrAdmin::new(options)?;

    if console.auth().check_auth().await != AuthState::Authenticated {
        let (email, password) = match (email, password) {
            (Some(email), Some(password)) => (email, password),
            _ => return Err(Error::validation("not signed in: pass --email and --password")),
        };
        let response = console.auth().login(email, password).await;
        if !response.success {
            return Err(Error::backend(
                None,
                response.message.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }
    }

    let stock = console.admin().stock_balance(supplier_id).await?;
    println!("{}", serde_json::to_string_pretty(&stock)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let matches = App::new("qrtag-stock")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print the QR-code stock balance of a supplier")
        .arg(
            Arg::new("supplier")
                .short('s')
                .long("supplier")
                .value_name("ID")
                .help("Supplier id")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::new("email")
                .long("email")
                .value_name("EMAIL")
                .help("Admin email, used when no valid token is stored")
                .takes_value(true),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .value_name("PASSWORD")
                .env("QRTAG_ADMIN_PASSWORD")
                .help("Admin password")
                .takes_value(true),
        )
        .get_matches();

    let supplier_id = matches.value_of("supplier").unwrap_or_default();
    let result = run(
        supplier_id,
        matches.value_of("email"),
        matches.value_of("password"),
    )
    .await;

    if let Err(err) = result {
        error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
