//! Every line the assistant says.

use crate::catalogue::TechnologyRecord;
use crate::rich_text::RichText;

use super::state::MenuChoice;

pub fn greeting() -> RichText {
    RichText::from("🤖 Hi! I'm your technology assistant. How can I help?")
}

/// What the user "says" when picking a menu entry.
pub fn user_line(choice: MenuChoice) -> &'static str {
    match choice {
        MenuChoice::Detail => "I want details on a technology.",
        MenuChoice::Evolution => "Show me an evolution timeline.",
        MenuChoice::Compare => "I want to compare technologies.",
    }
}

pub fn prompt(choice: MenuChoice) -> String {
    match choice {
        MenuChoice::Detail => "Which technology would you like details on?".to_string(),
        MenuChoice::Evolution => "Which technology's evolution would you like to see?".to_string(),
        MenuChoice::Compare => "Pick the first technology to compare.".to_string(),
    }
}

pub fn second_prompt(first: &TechnologyRecord) -> String {
    format!("OK, the first one is {}. What is the second?", first.name)
}

pub fn not_found() -> RichText {
    RichText::from("I couldn't find that technology. Please try again.")
}

pub fn load_failure() -> RichText {
    RichText::from("Sorry, I'm having trouble reaching my information. Try reloading the page.")
}

/// Full detail card.
pub fn details(record: &TechnologyRecord) -> RichText {
    RichText::new()
        .text("Sure! Here are the details about ")
        .bold(&record.name)
        .text(":")
        .paragraph()
        .text(format!("{} Released in ", record.description))
        .bold(record.year.to_string())
        .text(", it is considered a ")
        .bold(record.level.to_string())
        .text(" technology. Its code runs ")
        .bold(record.execution_type.to_lowercase())
        .text(".")
        .paragraph()
        .text(format!("A fun fact: {}", lower_first(&record.trivia)))
        .paragraph()
        .text("It is commonly used for: ")
        .bold(record.tags.join(", "))
        .text(".")
        .paragraph()
        .text("You can find more in the ")
        .link("official documentation", &record.link)
        .text(".")
}

/// Timeline in document order, or the differentiator when none is on file.
pub fn evolution(record: &TechnologyRecord) -> RichText {
    match record.timeline() {
        Some(entries) => {
            let mut msg = RichText::new()
                .bold(format!("--- Timeline of {} ---", record.name))
                .paragraph();
            for entry in entries {
                msg = msg
                    .bold(format!("{}:", entry.year))
                    .text(format!(" {}", entry.event))
                    .paragraph();
            }
            msg
        }
        None => {
            let msg = RichText::new().text(format!(
                "Sorry, I don't have a detailed history for {} yet",
                record.name
            ));
            match record.differentiator() {
                Some(text) => msg.text(", but I know what sets it apart:").paragraph().bold(text),
                None => msg.text(", and no differentiator is on file either."),
            }
        }
    }
}

fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
