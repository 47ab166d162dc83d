use crate::genetic_algorithm::Outcome;
use crate::history::History;
use crate::individual::Individual;
use crate::problem::KnapsackProblem;
use colored::Colorize;
use itertools::Itertools;
use std::cmp::Ordering;

const HISTORY_HEADERS: [&str; 8] = [
    "gen", "value", "fitness", "avg", "mut", "cross", "weight", "t(s)",
];

/// Per-generation history as an aligned text table.
pub fn history_table(history: &History) -> String {
    if history.is_empty() {
        return "(no history)".to_string();
    }

    let rows: Vec<[String; 8]> = history
        .records()
        .iter()
        .zip(history.generation_times())
        .map(|(record, generation_time)| {
            [
                record.gen.to_string(),
                record.best_value.to_string(),
                format!("{:.2}", record.best_fitness),
                format!("{:.2}", record.avg_fitness),
                record.mutations.to_string(),
                record.crossovers.to_string(),
                record.best_weight.to_string(),
                format!("{:.4}", generation_time),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..HISTORY_HEADERS.len())
        .map(|column| {
            rows.iter()
                .map(|row| row[column].len())
                .chain(std::iter::once(HISTORY_HEADERS[column].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = HISTORY_HEADERS
        .iter()
        .zip(&widths)
        .map(|(header, &width)| format!("{:^width$}", header, width = width))
        .join(" | ");
    let separator = widths.iter().map(|&width| "-".repeat(width)).join("-+-");

    let mut lines = vec![header.bold().to_string(), separator];
    lines.extend(rows.iter().map(|row| {
        row.iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{:>width$}", cell, width = width))
            .join(" | ")
    }));
    lines.join("\n")
}

/// Included items, densest first, with totals.
pub fn selected_items(best: &Individual, problem: &KnapsackProblem) -> String {
    let items = problem.items();
    let mut selected: Vec<usize> = best.selected().filter(|&index| index < items.len()).collect();

    if selected.is_empty() {
        return "No items selected by the best individual.".to_string();
    }

    selected.sort_by(|&a, &b| {
        items[b]
            .ratio()
            .partial_cmp(&items[a].ratio())
            .unwrap_or(Ordering::Equal)
    });

    let mut lines = vec![format!("{}", "Selected items (by value/weight):".bold())];
    let mut total_value: u128 = 0;
    let mut total_weight: u128 = 0;

    for (position, &index) in selected.iter().enumerate() {
        let item = &items[index];
        let name = item
            .name
            .clone()
            .unwrap_or_else(|| format!("Item_{}", index + 1));
        lines.push(format!(
            "  {}) {} - weight={}, value={}",
            position + 1,
            name,
            item.weight,
            item.value
        ));
        total_value += u128::from(item.value);
        total_weight += u128::from(item.weight);
    }

    lines.push(format!("Selected item count: {}", selected.len()));
    lines.push(format!(
        "Total weight of selected items: {} / {}",
        total_weight,
        problem.capacity()
    ));
    lines.push(format!("Total value of selected items: {}", total_value));
    lines.join("\n")
}

/// Headline numbers of a finished run.
pub fn run_summary(outcome: &Outcome<Individual>, problem: &KnapsackProblem) -> String {
    [
        format!("{} {}", "Best individual:".bold(), outcome.best),
        format!(
            "{} {}",
            "Total value:".bold(),
            outcome.total_value().to_string().green()
        ),
        format!(
            "{} {} / {}",
            "Total weight:".bold(),
            outcome.total_weight(),
            problem.capacity()
        ),
        format!(
            "{} {} ({})",
            "Generations:".bold(),
            outcome.generations,
            outcome.reason
        ),
        format!(
            "{} {:.4} s",
            "Runtime:".bold(),
            outcome.elapsed.as_secs_f64()
        ),
    ]
    .join("\n")
}
