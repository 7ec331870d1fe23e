//! Prints what the generator fills in for each demo step type.
//!
//! Run with: cargo run -p fuzzshape-demos --bin describe-steps [INPUT]
//!
//! With an INPUT file, also fills both step types from its bytes and prints
//! the result.

use eyre::{Result, WrapErr};
use fuzzshape_demos::sorted_tree::SortedTreeFuzzStep;
use fuzzshape_demos::stack::StackFuzzStep;
use owo_colors::OwoColorize;

fn section(title: &str, body: &str) {
    println!("{}", title.bold().cyan());
    print!("{body}");
    println!();
}

fn main() -> Result<()> {
    let generator = StackFuzzStep::generator();
    let stack = generator
        .describe_to_string(&Vec::<StackFuzzStep>::new())
        .wrap_err("describing stack steps")?;
    section("Vec<StackFuzzStep>", &stack);

    let tree = fuzzshape::describe_to_string(&SortedTreeFuzzStep::default())
        .wrap_err("describing sorted tree steps")?;
    section("SortedTreeFuzzStep", &tree);

    let Some(path) = std::env::args().nth(1) else {
        return Ok(());
    };
    let bytes = std::fs::read(&path).wrap_err_with(|| format!("reading {path}"))?;
    println!("{} {} bytes from {}", "input:".dimmed(), bytes.len(), path);

    let mut steps: Vec<StackFuzzStep> = Vec::new();
    generator.fill(&mut steps, &bytes)?;
    let listing: String = steps
        .iter()
        .map(|step| format!("{} {:?}\n", step.operation, step.push_value))
        .collect();
    section("stack steps", &listing);

    let mut first = SortedTreeFuzzStep::default();
    fuzzshape::fill(&mut first, &bytes)?;
    let listing: String = first
        .iter()
        .map(|step| format!("{:?}\n", step.value))
        .collect();
    section("sorted tree steps", &listing);

    Ok(())
}
