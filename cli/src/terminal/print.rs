use std::fmt::Display;

use colored::*;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{}", line);
}

pub fn fat_separator() {
    println!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
}

pub fn centerln(msg: &ColoredString) {
    let width = console::measure_text_width(&msg.to_string());
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    println!("{}{}", space, msg);
}

pub fn tree_head(idx: usize, name: &str) {
    println!(
        "{} {}",
        format!("[{}]", idx).bright_black(),
        name.bright_green()
    );
}

pub fn as_tree_one_level<V: Display>(leaves: &[V]) {
    for (i, leaf) in leaves.iter().enumerate() {
        let last: bool = i + 1 == leaves.len();
        let branch: ColoredString = if !last {
            "├─".bright_black()
        } else {
            "└─".bright_black()
        };
        println!(" {} {}", branch, leaf);
    }
}

pub fn no_results() {
    println!("{}", "Nothing to report, move along.".yellow().bold());
}
