//! Config command implementation.

use anyhow::Result;

use migration_graph_ops::Config;

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("Migration-Graph CLI Configuration");
    println!("{:-<40}", "");
    println!("Data Directory:  {}", config.data_dir.display());
    println!("Threshold:       {}", config.threshold);
    println!(
        "Direction:       {} ({})",
        config.direction,
        config.direction.legacy_label()
    );
    println!("Table Rows:      {}", config.table_rows);

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let key = key.replace('-', "_");
    if !Config::KEYS.contains(&key.as_str()) {
        anyhow::bail!(
            "Unknown config key: {}. Valid keys: {}",
            key,
            Config::KEYS.join(", ")
        );
    }

    config.set(&key, value)?;
    config.save()?;
    println!("Set {} to: {}", key, config.get(&key).unwrap_or_default());
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    let key = key.replace('-', "_");
    match config.get(&key) {
        Some(value) => println!("{}", value),
        None => anyhow::bail!("Unknown config key: {}", key),
    }
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    Config::default().save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
