use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct RegionArgs {
    pub timezone: String,
}

#[derive(Debug, Args)]
pub struct TimezonesArgs {
    /// Only list timezones for this region code
    #[arg(long)]
    pub region: Option<String>,
}

pub fn region(ctx: &Context<'_>, args: RegionArgs) -> Result<()> {
    if args.timezone.trim().is_empty() {
        return Err(invalid_input("timezone cannot be empty"));
    }
    let index = ctx.normalizer.index();
    let region = index
        .region_for(Some(args.timezone.as_str()))?
        .ok_or_else(|| invalid_input("timezone cannot be empty"))?;

    if ctx.json {
        print_json(&serde_json::json!({ "timezone": args.timezone, "region": region }))?;
    } else {
        println!("{}", region);
    }
    Ok(())
}

pub fn list_timezones(ctx: &Context<'_>, args: TimezonesArgs) -> Result<()> {
    let index = ctx.normalizer.index();
    let timezones: Vec<&str> = match args.region.as_deref() {
        Some(region) => index
            .timezones_for(region)
            .ok_or_else(|| not_found(format!("region {}", region)))?
            .iter()
            .map(String::as_str)
            .collect(),
        None => index.all_timezones(),
    };

    if ctx.json {
        print_json(&timezones)?;
        return Ok(());
    }

    for timezone in timezones {
        println!("{}", timezone);
    }
    Ok(())
}
