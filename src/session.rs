use crate::catalog::Catalog;
use crate::config::Config;
use crate::domain::Category;
use crate::ledger::{LedgerError, LedgerState, StampSource};
use crate::render::{render_menu, render_receipt, render_summary};
use anyhow::Result;
use colored::Colorize;
use log::warn;
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{sleep, Duration};

pub const HELP: &str = "\
Commands:
  menu [category]     show the menu (food, beverage, dessert)
  set <id> <qty>      set an item quantity (0-10)
  add <id> [n]        add n of an item (default 1)
  remove <id> [n]     remove n of an item (default 1)
  pay <cash|card|upi> choose the payment method
  show                show the current order
  bill                generate the bill
  receipt             print the last generated bill again
  new                 start a new order
  help                this text
  quit                leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Menu(Option<Category>),
    Set { item_id: String, quantity: i64 },
    Adjust { item_id: String, delta: i64 },
    Pay(String),
    Show,
    Bill,
    Receipt,
    New,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        // counts are non-negative; the sign comes from add/remove
        let count = |raw: Option<&&str>| -> Result<i64, String> {
            match raw {
                Some(n) => n
                    .parse::<u32>()
                    .map(i64::from)
                    .map_err(|_| format!("'{}' is not a valid count", n)),
                None => Ok(1),
            }
        };

        match parts.as_slice() {
            ["menu"] => Ok(SessionCommand::Menu(None)),
            ["menu", category] => Ok(SessionCommand::Menu(Some(category.parse()?))),
            ["set", id, qty] => Ok(SessionCommand::Set {
                item_id: id.to_string(),
                quantity: qty
                    .parse()
                    .map_err(|_| format!("'{}' is not a number", qty))?,
            }),
            ["add", id, rest @ ..] if rest.len() <= 1 => Ok(SessionCommand::Adjust {
                item_id: id.to_string(),
                delta: count(rest.first())?,
            }),
            ["remove", id, rest @ ..] if rest.len() <= 1 => Ok(SessionCommand::Adjust {
                item_id: id.to_string(),
                delta: -count(rest.first())?,
            }),
            ["pay", code] => Ok(SessionCommand::Pay(code.to_string())),
            ["show"] => Ok(SessionCommand::Show),
            ["bill"] => Ok(SessionCommand::Bill),
            ["receipt"] => Ok(SessionCommand::Receipt),
            ["new"] => Ok(SessionCommand::New),
            ["help"] | ["?"] => Ok(SessionCommand::Help),
            ["quit"] | ["exit"] => Ok(SessionCommand::Quit),
            _ => Err(format!("Unknown command: {} (try 'help')", line.trim())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Bill(String),
    Quit,
}

pub struct Session<S: StampSource> {
    catalog: Catalog,
    config: Config,
    state: LedgerState,
    stamps: S,
}

impl<S: StampSource> Session<S> {
    pub fn new(catalog: Catalog, config: Config, stamps: S) -> Self {
        Self {
            catalog,
            config,
            state: LedgerState::new(),
            stamps,
        }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Applies one command. On error the state is left as it was.
    pub fn apply(&mut self, command: SessionCommand) -> Result<Reply, LedgerError> {
        match command {
            SessionCommand::Menu(only) => Ok(Reply::Text(render_menu(
                &self.catalog,
                Some(&self.state.selection),
                only,
                &self.config,
            ))),

            SessionCommand::Set { item_id, quantity } => {
                self.state = self.state.set_quantity(&self.catalog, &item_id, quantity)?;
                Ok(self.quantity_reply(&item_id))
            }

            SessionCommand::Adjust { item_id, delta } => {
                self.state = self.state.adjust_quantity(&self.catalog, &item_id, delta)?;
                Ok(self.quantity_reply(&item_id))
            }

            SessionCommand::Pay(code) => {
                self.state = self.state.select_payment(&code)?;
                let display = self.state.payment_method.display();
                Ok(Reply::Text(format!(
                    "{} {} selected",
                    display.icon.glyph(),
                    display.label
                )))
            }

            SessionCommand::Show => {
                let lines = self.state.bill_lines(&self.catalog);
                let totals = self.state.totals(&self.catalog);
                Ok(Reply::Text(render_summary(
                    &lines,
                    &totals,
                    self.state.payment_method,
                    &self.config,
                )))
            }

            SessionCommand::Bill => {
                self.state = self.state.generate_bill(&self.catalog, &mut self.stamps)?;
                Ok(Reply::Bill(self.receipt_text()))
            }

            SessionCommand::Receipt => match self.state.generated_order() {
                Some(_) => Ok(Reply::Text(self.receipt_text())),
                None => Ok(Reply::Text("No bill generated yet.".to_string())),
            },

            SessionCommand::New => {
                self.state = self.state.reset_order();
                Ok(Reply::Text("New order started.".to_string()))
            }

            SessionCommand::Help => Ok(Reply::Text(HELP.to_string())),
            SessionCommand::Quit => Ok(Reply::Quit),
        }
    }

    fn quantity_reply(&self, item_id: &str) -> Reply {
        let name = self
            .catalog
            .get(item_id)
            .map(|item| item.name.as_str())
            .unwrap_or(item_id);
        Reply::Text(format!("{}: {}", name, self.state.selection.get(item_id)))
    }

    fn receipt_text(&self) -> String {
        self.state
            .generated_order()
            .map(|order| render_receipt(order, &self.config))
            .unwrap_or_default()
    }

    /// Reads commands line by line until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();

        writeln!(out, "{}", format!("🍔 {} Billing System 🍟", self.config.store.name).bold())?;
        writeln!(out, "Type 'help' for commands.")?;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<SessionCommand>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(out, "{}", e.yellow())?;
                    continue;
                }
            };

            match self.apply(command) {
                Ok(Reply::Text(text)) => writeln!(out, "{}", text)?,
                Ok(Reply::Bill(receipt)) => {
                    self.wait_for_bill(out).await?;
                    writeln!(out, "{}", receipt)?;
                }
                Ok(Reply::Quit) => break,
                Err(e) => writeln!(out, "{}", e.to_string().red())?,
            }
        }

        Ok(())
    }

    // purely cosmetic; Ctrl-C skips the wait
    async fn wait_for_bill<W: Write>(&self, out: &mut W) -> Result<()> {
        let delay = self.config.session.bill_delay_ms;
        if delay == 0 {
            return Ok(());
        }

        writeln!(out, "⏳ Preparing your bill...")?;
        out.flush()?;

        tokio::select! {
            _ = sleep(Duration::from_millis(delay)) => {}
            _ = tokio::signal::ctrl_c() => warn!("⏭️ Bill delay skipped"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentMethod, Phase};
    use crate::ledger::FixedStamps;
    use chrono::{Local, TimeZone};

    fn session() -> Session<FixedStamps> {
        let stamps = FixedStamps::new(1500, Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        Session::new(Catalog::builtin(), Config::default(), stamps)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "set fries 3".parse::<SessionCommand>(),
            Ok(SessionCommand::Set {
                item_id: "fries".to_string(),
                quantity: 3
            })
        );
        assert_eq!(
            "add coke".parse::<SessionCommand>(),
            Ok(SessionCommand::Adjust {
                item_id: "coke".to_string(),
                delta: 1
            })
        );
        assert_eq!(
            "remove coke 2".parse::<SessionCommand>(),
            Ok(SessionCommand::Adjust {
                item_id: "coke".to_string(),
                delta: -2
            })
        );
        assert_eq!(
            "menu dessert".parse::<SessionCommand>(),
            Ok(SessionCommand::Menu(Some(Category::Dessert)))
        );
        assert_eq!("  bill ".parse::<SessionCommand>(), Ok(SessionCommand::Bill));
        assert_eq!("exit".parse::<SessionCommand>(), Ok(SessionCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!("set fries".parse::<SessionCommand>().is_err());
        assert!("set fries many".parse::<SessionCommand>().is_err());
        assert!("add coke 1 2".parse::<SessionCommand>().is_err());
        assert!("dance".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn test_extreme_counts_are_parse_errors() {
        assert!("remove coke -9223372036854775808"
            .parse::<SessionCommand>()
            .is_err());
        assert!("add coke 9223372036854775807".parse::<SessionCommand>().is_err());
        assert!("add coke -2".parse::<SessionCommand>().is_err());
        assert_eq!(
            "remove coke 4294967295".parse::<SessionCommand>(),
            Ok(SessionCommand::Adjust {
                item_id: "coke".to_string(),
                delta: -4294967295
            })
        );
    }

    #[test]
    fn test_empty_bill_keeps_composing() {
        let mut s = session();
        assert_eq!(s.apply(SessionCommand::Bill), Err(LedgerError::EmptyOrder));
        assert_eq!(s.state().phase, Phase::Composing);
    }

    #[test]
    fn test_bill_then_new() {
        let mut s = session();
        s.apply("set fries 2".parse().unwrap()).unwrap();
        s.apply("add coke".parse().unwrap()).unwrap();
        s.apply("pay upi".parse().unwrap()).unwrap();

        match s.apply(SessionCommand::Bill).unwrap() {
            Reply::Bill(receipt) => {
                assert!(receipt.contains("₹231"));
                assert!(receipt.contains("UPI Payment"));
                assert!(receipt.contains("Order #: 1500"));
            }
            other => panic!("expected bill, got {:?}", other),
        }
        assert!(s.state().phase.is_generated());

        s.apply(SessionCommand::New).unwrap();
        assert!(s.state().selection.is_empty());
        assert_eq!(s.state().payment_method, PaymentMethod::Cash);
        assert_eq!(s.state().phase, Phase::Composing);
    }

    #[test]
    fn test_errors_leave_state() {
        let mut s = session();
        s.apply("set coke 2".parse().unwrap()).unwrap();
        let before = s.state().clone();

        assert!(s.apply("set pizza 1".parse().unwrap()).is_err());
        assert!(s.apply("pay gold".parse().unwrap()).is_err());
        assert_eq!(s.state(), &before);
    }

    #[tokio::test]
    async fn test_bill_delay_announced_before_receipt() {
        let mut config = Config::default();
        config.session.bill_delay_ms = 10;
        let stamps = FixedStamps::new(1500, Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap());
        let mut s = Session::new(Catalog::builtin(), config, stamps);

        let mut out = Vec::new();
        s.run("set coke 2\nbill\n".as_bytes(), &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        let waiting = text.find("Preparing your bill").unwrap();
        let receipt = text.find("Order #: 1500").unwrap();
        assert!(waiting < receipt);

        let order = s.state().generated_order().unwrap();
        assert_eq!(order.subtotal, 120);
        assert_eq!(order.grand_total, 126);
        assert_eq!(s.state().selection.get("coke"), 2);
    }

    #[tokio::test]
    async fn test_no_delay_line_when_disabled() {
        let mut s = session();
        let mut out = Vec::new();
        s.run("set coke 1\nbill\n".as_bytes(), &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Preparing your bill"));
        assert!(s.state().phase.is_generated());
    }

    #[tokio::test]
    async fn test_run_script() {
        let mut s = session();
        let script = "menu\nset big-mac 1\nset nope 1\nbill\nset big-mac 4\nreceipt\nquit\nset fries 1\n";
        let mut out = Vec::new();

        s.run(script.as_bytes(), &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Big Mac: 1"));
        assert!(text.contains("Unknown menu item: nope"));
        assert!(text.contains("Order #: 1500"));
        // receipt reprinted after the edit still shows the frozen bill
        assert_eq!(text.matches("₹189").count(), 2);
        // nothing after quit is applied
        assert_eq!(s.state().selection.get("fries"), 0);
        assert_eq!(s.state().selection.get("big-mac"), 4);
    }
}
