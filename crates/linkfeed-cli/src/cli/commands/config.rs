//! `linkfeed config` – show config location and effective settings.

use anyhow::Result;
use linkfeed_core::config::{self, LinkfeedConfig};
use std::path::Path;

pub fn run_config(cfg: &LinkfeedConfig, explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("config:      {}", path.display());
    println!("endpoint:    {}", cfg.endpoint);
    println!(
        "default bot: {}",
        cfg.default_bot.as_deref().unwrap_or("-")
    );
    if cfg.bots.is_empty() {
        println!("bots:        (any)");
    } else {
        println!("bots:        {}", cfg.bots.join(", "));
    }
    println!("clear:       {:?}", cfg.clear_policy());
    let http = cfg.http.clone().unwrap_or_default();
    let secs = |v: Option<u64>| v.map(|s| format!("{s}s")).unwrap_or_else(|| "none".to_string());
    println!(
        "timeouts:    connect {}, total {}",
        secs(http.connect_timeout_secs),
        secs(http.timeout_secs)
    );
    for (key, value) in &cfg.extra_fields {
        println!("field:       {key}={value}");
    }
    Ok(())
}
