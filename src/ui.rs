// UI layer: a simple interactive menu using `dialoguer`. Each entry maps
// to one client operation and prints the returned JSON.

use crate::client::ToastClient;
use crate::error::Result as ToastResult;
use crate::transport::Transport;
use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::time::Duration;

const MENU_ITEMS: &[&str] = &[
    "Get order",
    "Get orders in date range",
    "Get orders by business date",
    "List jobs",
    "Get employee",
    "List employees",
    "Exit",
];

/// Main interactive menu. Runs until the user chooses "Exit". Request
/// failures are printed and the loop continues.
pub fn main_menu<T: Transport>(mut client: ToastClient<T>) -> Result<()> {
    loop {
        let selection = Select::new().items(MENU_ITEMS).default(0).interact()?;
        if selection == MENU_ITEMS.len() - 1 {
            break;
        }

        let result = match selection {
            0 => {
                let guid = prompt("Order GUID")?;
                let rguid = prompt_restaurant(&client)?;
                with_spinner("Fetching order...", || client.get_order(&guid, rguid.as_deref()))
            }
            1 => {
                let start = prompt("Start date (e.g. 2024-01-01 or 2024-01-01 08:00)")?;
                let end = prompt("End date")?;
                let rguid = prompt_restaurant(&client)?;
                with_spinner("Fetching orders...", || {
                    client.get_orders_in_range(&start, &end, rguid.as_deref())
                })
            }
            2 => {
                let date = prompt("Business date (yyyyMMdd)")?;
                let rguid = prompt_restaurant(&client)?;
                with_spinner("Fetching orders...", || {
                    client.get_orders_by_business_date(&date, rguid.as_deref())
                })
            }
            3 => {
                let rguid = prompt_restaurant(&client)?;
                with_spinner("Fetching jobs...", || client.get_jobs(rguid.as_deref()))
            }
            4 => {
                let guid = prompt("Employee GUID")?;
                let rguid = prompt_restaurant(&client)?;
                with_spinner("Fetching employee...", || client.get_employee(&guid, rguid.as_deref()))
            }
            5 => {
                let rguid = prompt_restaurant(&client)?;
                with_spinner("Fetching employees...", || client.get_employees(rguid.as_deref()))
            }
            _ => continue,
        };

        match result {
            Ok(value) => print_json(&value)?,
            Err(e) => println!("Request failed: {}", e),
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    let value: String = Input::new().with_prompt(label).interact_text()?;
    Ok(value.trim().to_string())
}

/// Ask for a restaurant GUID; empty input keeps the current one.
fn prompt_restaurant<T: Transport>(client: &ToastClient<T>) -> Result<Option<String>> {
    let current = client.restaurant_guid().unwrap_or("none");
    let value: String = Input::new()
        .with_prompt(format!("Restaurant GUID (empty keeps {})", current))
        .allow_empty(true)
        .interact_text()?;
    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

fn with_spinner<F>(message: &'static str, f: F) -> ToastResult<Value>
where
    F: FnOnce() -> ToastResult<Value>,
{
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = f();
    spinner.finish_and_clear();
    result
}

fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Formatting response")?;
    println!("{}", text);
    Ok(())
}
