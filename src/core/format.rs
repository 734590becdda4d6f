use std::fmt::Write;

use super::types::{Outcome, Simulation};

/// en-US dollar formatting, e.g. `$1,035.00` or `-$12.50`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return format!("${value}");
    }

    let scaled = (value.abs() * 100.0).round();
    if scaled >= u128::MAX as f64 {
        return format!("${value:.2}");
    }
    let cents = scaled as u128;
    let dollars = group_thousands(cents / 100);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${dollars}.{:02}", cents % 100)
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn group_thousands(mut n: u128) -> String {
    let mut groups = Vec::new();
    loop {
        let rest = n / 1000;
        if rest == 0 {
            groups.push(format!("{}", n % 1000));
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n = rest;
    }
    groups.reverse();
    groups.join(",")
}

const MONTH_WIDTH: usize = 5;
const RETURN_WIDTH: usize = 9;
const MONEY_WIDTH: usize = 16;

/// Plain-text rendering of a run for terminals.
pub fn render_table(sim: &Simulation) -> String {
    let mut out = String::new();
    let rule = "-".repeat(MONTH_WIDTH + RETURN_WIDTH + 2 * MONEY_WIDTH + 9);

    let _ = writeln!(out, "Simulation Results");
    let _ = writeln!(
        out,
        "{:>MONTH_WIDTH$} | {:>RETURN_WIDTH$} | {:>MONEY_WIDTH$} | {:>MONEY_WIDTH$}",
        "Month", "Return", "Gain/Loss", "End Balance"
    );
    let _ = writeln!(out, "{rule}");

    for month in &sim.months {
        let _ = writeln!(
            out,
            "{:>MONTH_WIDTH$} | {:>RETURN_WIDTH$} | {:>MONEY_WIDTH$} | {:>MONEY_WIDTH$}",
            month.month,
            format_percent(month.percent),
            format_usd(month.gain_loss),
            format_usd(month.end_balance),
        );
    }

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Total Summary");
    let _ = writeln!(
        out,
        "Total Return: {} ({})",
        format_percent(sim.summary.total_return_percent),
        match sim.summary.outcome() {
            Outcome::Gain => "gain",
            Outcome::Loss => "loss",
        }
    );
    let _ = writeln!(out, "Final Balance: {}", format_usd(sim.summary.final_balance));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SimulationInput, UniformSource, simulate};

    struct ConstantSource(f64);

    impl UniformSource for ConstantSource {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn usd_groups_thousands_and_rounds_to_cents() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(35.0), "$35.00");
        assert_eq!(format_usd(1035.0), "$1,035.00");
        assert_eq!(format_usd(1511.0687), "$1,511.07");
        assert_eq!(format_usd(1_234_567.891), "$1,234,567.89");
    }

    #[test]
    fn usd_negative_values_carry_leading_sign() {
        assert_eq!(format_usd(-35.0), "-$35.00");
        assert_eq!(format_usd(-12_500.5), "-$12,500.50");
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn percent_uses_two_decimals() {
        assert_eq!(format_percent(3.5), "3.50%");
        assert_eq!(format_percent(-7.999), "-8.00%");
        assert_eq!(format_percent(51.106), "51.11%");
    }

    #[test]
    fn usd_beyond_cent_range_falls_back_to_plain_digits() {
        let formatted = format_usd(1.0e40);
        assert!(formatted.starts_with("$10000000000"), "{formatted}");
        assert!(formatted.ends_with(".00"), "{formatted}");
        assert!(!formatted.contains(','), "{formatted}");
    }

    #[test]
    fn table_lists_every_month_and_summary() {
        let input = SimulationInput::new(1000.0).expect("valid");
        let sim = simulate(input, &mut ConstantSource(0.5));
        let table = render_table(&sim);

        assert!(table.starts_with("Simulation Results\n"));
        for month in 1..=12 {
            assert!(
                table
                    .lines()
                    .any(|line| line.trim_start().starts_with(&format!("{month} |"))),
                "missing row for month {month}"
            );
        }
        assert!(table.contains("3.50%"));
        assert!(table.contains("$35.00"));
        assert!(table.contains("$1,035.00"));
        assert!(table.contains("Total Return: 51.11% (gain)"));
        assert!(table.contains("Final Balance: $1,511.07"));
    }
}
