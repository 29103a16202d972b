//! Line-oriented front end: each line is one UI event.

use std::fmt::Write;
use std::str::FromStr;

use crate::app_system::DeliverySystem;
use crate::domain::OrderStatus;
use crate::error::{AppError, CommandError};
use crate::queries::SortKey;
use crate::view::Region;

pub const HELP: &str = "\
open <location>            open a page (/, /cardapio.html?category=pizza, /pedidos.html)
search <text>              type into the search box
category <name>            pick a category (todos for all)
sort <nome|preco>          sort the listing
add <id> <price> <name>    add a food to the cart
status <id> <status>       move an order (Em preparo, Saiu para entrega, Entregue, Cancelado)
view <id>                  view an order
cart                       show the cart
show                       print every page region
quit                       exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(String),
    Search(String),
    Category(String),
    Sort(SortKey),
    Add { food_id: u64, price: f64, name: String },
    Status { order_id: u64, status: OrderStatus },
    View(u64),
    Cart,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match word {
            "open" if !rest.is_empty() => Ok(Command::Open(rest.to_string())),
            "open" => Err(CommandError::Usage("open <location>")),
            "search" => Ok(Command::Search(rest.to_string())),
            "category" if !rest.is_empty() => Ok(Command::Category(rest.to_string())),
            "category" => Err(CommandError::Usage("category <name>")),
            "sort" => Ok(Command::Sort(SortKey::from(rest))),
            "add" => parse_add(rest).ok_or(CommandError::Usage("add <id> <price> <name>")),
            "status" => parse_status(rest).ok_or(CommandError::Usage("status <id> <status>")),
            "view" => rest
                .parse()
                .map(Command::View)
                .map_err(|_| CommandError::Usage("view <id>")),
            "cart" => Ok(Command::Cart),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_add(rest: &str) -> Option<Command> {
    let mut parts = rest.splitn(3, char::is_whitespace);
    let food_id = parts.next()?.parse().ok()?;
    let price = parts.next()?.replace(',', ".").parse().ok()?;
    let name = parts.next()?.trim();
    if name.is_empty() {
        return None;
    }
    Some(Command::Add {
        food_id,
        price,
        name: name.to_string(),
    })
}

fn parse_status(rest: &str) -> Option<Command> {
    let (id, status) = rest.split_once(char::is_whitespace)?;
    let status = status.trim();
    if status.is_empty() {
        return None;
    }
    Some(Command::Status {
        order_id: id.parse().ok()?,
        status: OrderStatus::from(status),
    })
}

/// Run one command and return what to print.
///
/// Query failures are already shown in their regions; only actor failures
/// come back as errors.
pub async fn execute(system: &DeliverySystem, command: Command) -> Result<String, AppError> {
    let client = &system.client;
    let out = match command {
        Command::Open(location) => {
            let page = client.navigate(location).await?;
            format!("Opened {page:?}")
        }
        Command::Search(text) => {
            client.search_input(text).await?;
            "Search scheduled".to_string()
        }
        Command::Category(category) => match client.select_category(category).await {
            Ok(count) => format!("{count} item(s)"),
            Err(AppError::Request(e)) => e.to_string(),
            Err(e) => return Err(e),
        },
        Command::Sort(key) => match client.select_sort(key).await {
            Ok(count) => format!("{count} item(s)"),
            Err(AppError::Request(e)) => e.to_string(),
            Err(e) => return Err(e),
        },
        Command::Add { food_id, price, name } => {
            let line = client.add_to_cart(food_id, name, price).await?;
            format!("{} x{}", line.name, line.quantity)
        }
        Command::Status { order_id, status } => match client.update_order_status(order_id, status).await {
            Ok(count) => format!("{count} order(s)"),
            Err(AppError::Request(e)) => e.to_string(),
            Err(e) => return Err(e),
        },
        Command::View(order_id) => {
            client.view_order(order_id).await?;
            system.view.content(Region::Alert).unwrap_or_default()
        }
        Command::Cart => {
            let cart = client.get_cart().await?;
            let mut out = format!("{} item(s) in cart", cart.count);
            for item in &cart.items {
                let _ = write!(out, "\n  #{} {} x{} @ {:.2}", item.id, item.name, item.quantity, item.price);
            }
            out
        }
        Command::Show => render_regions(system),
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };
    Ok(out)
}

fn render_regions(system: &DeliverySystem) -> String {
    let mut out = String::new();
    for region in Region::ALL {
        if let Some(html) = system.view.content(region) {
            let _ = writeln!(out, "[{}]\n{}", region.id(), html);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "open /cardapio.html?category=pizza".parse(),
            Ok(Command::Open("/cardapio.html?category=pizza".into()))
        );
        assert_eq!("search  ".parse(), Ok(Command::Search(String::new())));
        assert_eq!("sort preco".parse(), Ok(Command::Sort(SortKey::Price)));
        assert_eq!(
            "add 3 45,90 Pizza Margherita".parse(),
            Ok(Command::Add {
                food_id: 3,
                price: 45.9,
                name: "Pizza Margherita".into()
            })
        );
        assert_eq!(
            "status 7 Saiu para entrega".parse(),
            Ok(Command::Status {
                order_id: 7,
                status: OrderStatus::OutForDelivery
            })
        );
        assert_eq!("view 42".parse(), Ok(Command::View(42)));
        assert_eq!("quit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("dance".parse::<Command>(), Err(CommandError::Unknown("dance".into())));
        assert!(matches!("add 3 abc".parse::<Command>(), Err(CommandError::Usage(_))));
        assert!(matches!("status 7".parse::<Command>(), Err(CommandError::Usage(_))));
        assert!(matches!("view x".parse::<Command>(), Err(CommandError::Usage(_))));
        assert!(matches!("open".parse::<Command>(), Err(CommandError::Usage(_))));
    }
}
