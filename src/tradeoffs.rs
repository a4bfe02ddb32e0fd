//! Static explanations for execution types and abstraction levels.

use crate::catalogue::{Catalogue, Level, TechnologyRecord};
use crate::matcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tradeoff {
    pub advantage: &'static str,
    pub disadvantage: &'static str,
}

const EXECUTION_TRADEOFFS: &[(&str, Tradeoff)] = &[
    (
        "Compiled",
        Tradeoff {
            advantage: "Peak performance, since the code is already in the machine's language.",
            disadvantage: "Less portable. The program only runs on the system it was compiled for.",
        },
    ),
    (
        "Interpreted",
        Tradeoff {
            advantage: "Highly portable (runs anywhere the interpreter does) and quick to iterate on.",
            disadvantage: "Slower than compiled code.",
        },
    ),
    (
        "Interpreted (JIT)",
        Tradeoff {
            advantage: "A good balance between the flexibility of interpretation and the speed of compilation.",
            disadvantage: "May have a slower warm-up while the runtime optimises hot code.",
        },
    ),
    (
        "Transpiled",
        Tradeoff {
            advantage: "Brings modern language features to platforms that do not support them natively.",
            disadvantage: "Adds a build step and can make debugging harder.",
        },
    ),
    (
        "Compiled to bytecode",
        Tradeoff {
            advantage: "Excellent portability: write once, run anywhere a JVM is available.",
            disadvantage: "Requires the Java Virtual Machine to be installed.",
        },
    ),
    (
        "Compiled to IL",
        Tradeoff {
            advantage: "Portable across systems with modern .NET and interoperable between .NET languages.",
            disadvantage: "Requires the Common Language Runtime to be installed.",
        },
    ),
];

/// Known execution types, in table order.
pub fn execution_types() -> impl Iterator<Item = &'static str> {
    EXECUTION_TRADEOFFS.iter().map(|(name, _)| *name)
}

/// Trade-offs for an execution type; unknown types have none.
pub fn execution_tradeoff(execution_type: &str) -> Option<Tradeoff> {
    EXECUTION_TRADEOFFS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(execution_type.trim()))
        .map(|(_, t)| *t)
}

pub fn level_description(level: Level) -> &'static str {
    match level {
        Level::High => {
            "Close to human language. They hide hardware details, making programming faster, \
             easier and less error-prone."
        }
        Level::Intermediate => {
            "A bridge between both worlds: high-level abstractions together with access to \
             low-level resources such as memory management."
        }
        Level::Low => {
            "Very close to machine code. Maximum control over the hardware and extreme \
             performance, at the cost of complexity."
        }
    }
}

/// Records at `level`, by name.
pub fn records_at_level(catalogue: &Catalogue, level: Level) -> Vec<&TechnologyRecord> {
    let mut records: Vec<_> = catalogue.all().iter().filter(|r| r.level == level).collect();
    matcher::sort_by_name(&mut records);
    records
}
