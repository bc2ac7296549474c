use anyhow::Result;
use hanoi_core::{HanoiConfig, RetentionSummary};
use hanoi_core::retention::simulate;

pub fn run(config: &HanoiConfig, days: u64, format: &str) -> Result<()> {
    let summary = simulate(config.rotation()?, days);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        _ => println!("{}", format_summary(&summary)),
    }
    Ok(())
}

pub fn format_summary(summary: &RetentionSummary) -> String {
    let gaps = summary
        .gaps
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = String::new();
    out.push_str(&format!("Days simulated: {}\n", summary.days));
    out.push_str(&format!(
        "Tapes in use:   {}/{}\n",
        summary.slots_in_use, summary.slots
    ));
    out.push_str(&format!(
        "Retention:      {} days ({:.2} years)\n",
        summary.span_days, summary.span_years
    ));
    out.push_str(&format!("Gaps (days):    {gaps}"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanoi_core::RotationConfig;

    #[test]
    fn text_summary() {
        let summary = simulate(RotationConfig::new(4, 1).unwrap(), 16);
        let text = format_summary(&summary);
        assert!(text.contains("Days simulated: 16"));
        assert!(text.contains("Tapes in use:   4/4"));
        assert!(text.contains("Retention:      7 days (0.02 years)"));
        assert!(text.ends_with("Gaps (days):    4 2 1"));
    }

    #[test]
    fn json_summary_fields() {
        let summary = simulate(RotationConfig::new(3, 2).unwrap(), 10);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["days"], 10);
        assert_eq!(value["slots"], 6);
        assert!(value["gaps"].is_array());
    }
}
