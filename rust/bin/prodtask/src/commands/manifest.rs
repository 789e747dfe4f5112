//! `prodtask manifest`: print the offline precache manifest.

use anyhow::Result;
use prodtask_core::PrecacheManifest;

use super::print_json;

pub fn print(base: &str, json: bool) -> Result<()> {
    let manifest = PrecacheManifest::default_for(base);
    if json {
        return print_json(&manifest);
    }

    println!("Precache ({} assets)", manifest.precache.len());
    for entry in &manifest.precache {
        println!("  {}  {}", entry.revision, entry.url);
    }
    println!("\nRuntime routes");
    for route in &manifest.routes {
        println!(
            "  {:?}  {:?}  cache={}",
            route.matcher, route.strategy, route.cache_name
        );
    }
    Ok(())
}
