// src/core/help.rs

use crate::{
    core::schema::{OptionSpec, Schema},
    models::{CommandDescriptor, ValueType},
};
use colored::Colorize;

/// Gap between the option column and the description column.
const COLUMN_GAP: usize = 3;

/// Renders the usage text of a command.
///
/// Layout:
/// ```text
/// usage: <name> <option usage...> [[<variadic>]...]
/// <description>
///  -s,--long <arg>   description (required)
///
/// v<version>
/// ```
/// Colours are only emitted when `color` is set; the layout is identical either way.
pub fn render(
    descriptor: &CommandDescriptor,
    schema: &Schema,
    version: Option<&str>,
    color: bool,
) -> String {
    let style = Style { color };
    let mut out = String::new();

    // --- Usage line ---
    let mut usage = vec![style.command(&descriptor.name)];
    usage.extend(schema.options().iter().map(|option| usage_item(option, &style)));
    if let Some(name) = schema.variadic_name() {
        usage.push(format!("[{}]...", style.placeholder(&format!("<{}>", name))));
    }
    out.push_str(&format!("{} {}\n", style.header("usage:"), usage.join(" ")));

    if !descriptor.description.is_empty() {
        out.push_str(&descriptor.description);
        out.push('\n');
    }

    // --- Option table ---
    let rows: Vec<(String, &OptionSpec)> = schema
        .options()
        .iter()
        .map(|option| (plain_column(option), option))
        .collect();
    let width = rows.iter().map(|(plain, _)| plain.len()).max().unwrap_or(0);

    for (plain, option) in &rows {
        let description = descriptor
            .parameters
            .get(option.index)
            .map(|p| p.description.as_str())
            .unwrap_or_default();
        let mut line = format!(
            " {}{}{}",
            styled_column(option, &style),
            " ".repeat(width - plain.len() + COLUMN_GAP),
            description
        );
        if option.mandatory {
            line.push_str(&format!(" {}", style.marker("(required)")));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if let Some(version) = version {
        out.push_str(&format!("\nv{}\n", version));
    }
    out
}

fn value_placeholder(option: &OptionSpec) -> Option<String> {
    match option.value_type {
        ValueType::Flag => None,
        ValueType::Enumeration { members, .. } => Some(format!("<{}>", members.join("|"))),
        _ => Some("<arg>".to_string()),
    }
}

fn usage_item(option: &OptionSpec, style: &Style) -> String {
    let mut item = style.option(&option.display_name());
    if let Some(placeholder) = value_placeholder(option) {
        item.push(' ');
        item.push_str(&style.placeholder(&placeholder));
    }
    if option.mandatory {
        item
    } else {
        format!("[{}]", item)
    }
}

fn names(option: &OptionSpec) -> Vec<String> {
    let mut names = Vec::new();
    if let Some(short) = &option.short {
        names.push(format!("-{}", short));
    }
    if let Some(long) = &option.long {
        names.push(format!("--{}", long));
    }
    names
}

fn plain_column(option: &OptionSpec) -> String {
    let mut column = names(option).join(",");
    if let Some(placeholder) = value_placeholder(option) {
        column.push(' ');
        column.push_str(&placeholder);
    }
    column
}

fn styled_column(option: &OptionSpec, style: &Style) -> String {
    let mut column = names(option)
        .iter()
        .map(|name| style.option(name))
        .collect::<Vec<_>>()
        .join(",");
    if let Some(placeholder) = value_placeholder(option) {
        column.push(' ');
        column.push_str(&style.placeholder(&placeholder));
    }
    column
}

/// Applies the help palette when colours are enabled.
struct Style {
    color: bool,
}

impl Style {
    fn paint(&self, text: &str, paint: impl FnOnce(&str) -> colored::ColoredString) -> String {
        if self.color {
            paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn header(&self, text: &str) -> String {
        self.paint(text, |t| t.yellow().bold())
    }

    fn command(&self, text: &str) -> String {
        self.paint(text, |t| t.bold())
    }

    fn option(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan().bold())
    }

    fn placeholder(&self, text: &str) -> String {
        self.paint(text, |t| t.green())
    }

    fn marker(&self, text: &str) -> String {
        self.paint(text, |t| t.red())
    }
}
