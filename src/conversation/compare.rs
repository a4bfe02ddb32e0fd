//! Comparison providers.

use crate::catalogue::TechnologyRecord;
use crate::rich_text::RichText;

/// Composes the answer to "compare two technologies".
pub trait Comparator: Send + Sync {
    fn compare(&self, first: &TechnologyRecord, second: &TechnologyRecord) -> RichText;
}

/// Lays the two stored differentiators side by side.
#[derive(Debug, Clone, Copy, Default)]
pub struct DifferentiatorComparator;

impl Comparator for DifferentiatorComparator {
    fn compare(&self, first: &TechnologyRecord, second: &TechnologyRecord) -> RichText {
        let msg = RichText::new()
            .text("Here is what sets each technology apart:")
            .paragraph();
        let msg = differentiator_section(msg, first).paragraph();
        differentiator_section(msg, second)
    }
}

fn differentiator_section(msg: RichText, record: &TechnologyRecord) -> RichText {
    match record.differentiator() {
        Some(text) => msg
            .bold(format!("What sets {} apart:", record.name))
            .text(format!(" {text}")),
        None => msg.text(format!("No differentiator on file for {}.", record.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::fixtures::sample;

    #[test]
    fn lists_both_differentiators_in_order() {
        let catalogue = sample();
        let python = catalogue.find_by_exact_name("Python").unwrap();
        let c = catalogue.find_by_exact_name("C").unwrap();

        let text = DifferentiatorComparator.compare(python, c).to_plain();
        let first = text.find("What sets Python apart: Python stands out.").unwrap();
        let second = text.find("What sets C apart: X").unwrap();
        assert!(first < second);
    }

    #[test]
    fn missing_differentiator_is_noted_per_side() {
        let catalogue = sample();
        let python = catalogue.find_by_exact_name("Python").unwrap();
        let rust = catalogue.find_by_exact_name("Rust").unwrap();

        let text = DifferentiatorComparator.compare(rust, python).to_plain();
        assert!(text.contains("No differentiator on file for Rust."));
        assert!(text.contains("What sets Python apart:"));
    }
}
