use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use rangeselect::{Choice, Entry, PromptError, RangeSelect, Separator};

/// Pick a contiguous range of items from a list.
#[derive(Parser)]
#[command(name = "rangeselect", version, about)]
struct Cli {
    /// Prompt message displayed above the list.
    #[arg(short, long, default_value = "Select a range")]
    message: String,

    /// Values checked when the prompt opens; defaults to every selectable
    /// item. Repeatable.
    #[arg(short, long = "default", value_name = "VALUE")]
    defaults: Vec<String>,

    /// Viewport height in rows.
    #[arg(long, value_name = "ROWS")]
    page_size: Option<usize>,

    /// Require at least this many selected items.
    #[arg(long, value_name = "COUNT")]
    min: Option<usize>,

    /// Print the answer as a JSON array instead of one value per line.
    #[arg(long)]
    json: bool,

    /// Generate shell completions and exit.
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,

    /// List items in order. Prefix an item with `sep:` for a separator row
    /// or `skip:` for a disabled row (`skip:<reason>:<label>` to attach a
    /// reason). Without items, a demo list is shown.
    items: Vec<String>,
}

fn main() -> Result<()> {
    rangeselect::init();
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "rangeselect", &mut io::stdout());
        return Ok(());
    }

    let entries = if cli.items.is_empty() {
        demo_entries()
    } else {
        cli.items.iter().map(|item| parse_item(item)).collect()
    };

    let mut prompt = RangeSelect::new(cli.message).entries(entries);
    if !cli.defaults.is_empty() {
        prompt = prompt.default_values(cli.defaults);
    }
    if let Some(rows) = cli.page_size {
        prompt = prompt.page_size(rows);
    }
    if let Some(min) = cli.min {
        prompt = prompt.validate_with(move |values: &[String]| {
            if values.len() < min {
                Err(format!("Select at least {min} items."))
            } else {
                Ok(())
            }
        });
    }

    let answer = match prompt.interact() {
        Ok(answer) => answer,
        Err(PromptError::Interrupted) => std::process::exit(130),
        Err(err) => return Err(err.into()),
    };

    if cli.json {
        println!("{}", serde_json::to_string(&answer)?);
    } else {
        for value in answer {
            println!("{value}");
        }
    }
    Ok(())
}

fn parse_item(item: &str) -> Entry<String> {
    if let Some(label) = item.strip_prefix("sep:") {
        return Entry::Separator(if label.is_empty() {
            Separator::line()
        } else {
            Separator::new(label)
        });
    }
    if let Some(rest) = item.strip_prefix("skip:") {
        let choice = match rest.split_once(':') {
            Some((reason, label)) => {
                Choice::new(label, label.to_owned()).disabled_because(reason)
            }
            None => Choice::new(rest, rest.to_owned()).disabled(),
        };
        return Entry::Choice(choice);
    }
    Entry::from(item)
}

fn demo_entries() -> Vec<Entry<String>> {
    vec![
        Entry::Separator(Separator::new("Preparation")),
        Entry::Choice(Choice::new("Gather ingredients", "gather".to_owned())),
        Entry::Choice(
            Choice::new("Deal with squeaky door", "squeaky-door".to_owned()).disabled(),
        ),
        Entry::Separator(Separator::new("Cooking")),
        Entry::Choice(
            Choice::new("Purchase fish", "fish".to_owned())
                .disabled_because("Not needed for this meal."),
        ),
        Entry::Choice(Choice::new("Preheat oven", "pre-heat".to_owned())),
        Entry::Choice(Choice::new("Grill the steak", "steak".to_owned())),
        Entry::Choice(Choice::new("Serve", "serve".to_owned())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_parse_into_the_three_row_kinds() {
        assert_eq!(
            parse_item("plain"),
            Entry::Choice(Choice::new("plain", "plain".to_owned()))
        );
        assert_eq!(
            parse_item("sep:Section"),
            Entry::Separator(Separator::new("Section"))
        );
        assert_eq!(
            parse_item("skip:later"),
            Entry::Choice(Choice::new("later", "later".to_owned()).disabled())
        );
        assert_eq!(
            parse_item("skip:out of stock:fish"),
            Entry::Choice(
                Choice::new("fish", "fish".to_owned()).disabled_because("out of stock")
            )
        );
    }
}
