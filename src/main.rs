use fastfood_billing::*;

use anyhow::Result;
use catalog::Catalog;
use clap::Parser;
use colored::Colorize;
use config::{Args, Command, Config};
use ledger::{LedgerState, RandomStamps};
use log::info;
use render::{render_menu, render_receipt};
use session::Session;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args = Args::parse();
    let config = Config::load(&args.config)?.with_env_overrides();
    let catalog = Catalog::builtin();

    info!("🍔 {} billing ready ({} menu items)", config.store.name, catalog.len());

    match args.command.unwrap_or(Command::Interactive) {
        Command::Menu { category } => {
            println!("{}", render_menu(&catalog, None, category, &config));
        }

        Command::Bill { items, pay, json } => {
            let mut state = LedgerState::new().select_payment(&pay)?;
            for (item_id, quantity) in &items {
                state = state.set_quantity(&catalog, item_id, *quantity)?;
            }

            let state = state.generate_bill(&catalog, &mut RandomStamps::new())?;
            let Some(order) = state.generated_order() else {
                anyhow::bail!("bill generation produced no order");
            };

            if json {
                println!("{}", serde_json::to_string_pretty(order)?);
            } else {
                println!("{}", render_receipt(order, &config));
            }
        }

        Command::Interactive => {
            let mut session = Session::new(catalog, config, RandomStamps::new());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();

            session.run(stdin, &mut stdout).await?;
            println!("{}", "👋 Bye!".bold());
        }
    }

    Ok(())
}
