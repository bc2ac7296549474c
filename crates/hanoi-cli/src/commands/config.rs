use anyhow::Result;
use hanoi_core::HanoiConfig;

pub fn run(config: &HanoiConfig) -> Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

/// Effective configuration as TOML, with the state path made explicit.
pub fn render(config: &HanoiConfig) -> Result<String> {
    let mut effective = config.clone();
    effective.state.path = Some(config.state.resolved_path());
    effective.to_toml_string()
}
