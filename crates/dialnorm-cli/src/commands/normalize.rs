use crate::commands::{print_json, Context};
use crate::error::CliError;
use anyhow::{Context as _, Result};
use clap::Args;
use dialnorm_config::LocaleConfig;
use dialnorm_core::Normalized;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[arg(required = true)]
    pub numbers: Vec<String>,
    /// Region code for numbers written in national format
    #[arg(long, conflicts_with = "timezone")]
    pub region: Option<String>,
    /// IANA timezone whose region applies to national-format numbers
    #[arg(long)]
    pub timezone: Option<String>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(required = true)]
    pub numbers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct NormalizeDto<'a> {
    input: &'a str,
    #[serde(flatten)]
    result: &'a Normalized,
}

#[derive(Debug, Serialize)]
struct ValidateDto<'a> {
    input: &'a str,
    valid: bool,
}

#[derive(Clone, Copy)]
enum Locale<'a> {
    Region(Option<&'a str>),
    Timezone(&'a str),
}

fn locale<'a>(ctx: &'a Context<'_>, args: &'a NormalizeArgs) -> Locale<'a> {
    if let Some(region) = args.region.as_deref() {
        return Locale::Region(Some(region));
    }
    if let Some(timezone) = args.timezone.as_deref() {
        return Locale::Timezone(timezone);
    }
    match &ctx.config.locale {
        LocaleConfig::Region(region) => Locale::Region(Some(region)),
        LocaleConfig::Timezone(timezone) => Locale::Timezone(timezone),
        LocaleConfig::None => Locale::Region(None),
    }
}

pub fn normalize(ctx: &Context<'_>, args: NormalizeArgs) -> Result<()> {
    let locale = locale(ctx, &args);
    let mut results = Vec::with_capacity(args.numbers.len());
    for number in &args.numbers {
        let result = match locale {
            Locale::Region(region) => ctx.normalizer.normalize_by_region(number, region),
            Locale::Timezone(timezone) => ctx
                .normalizer
                .normalize_by_timezone(number, Some(timezone))
                .with_context(|| format!("resolve timezone {}", timezone))?,
        };
        results.push(result);
    }

    if ctx.json {
        let items: Vec<NormalizeDto<'_>> = args
            .numbers
            .iter()
            .zip(&results)
            .map(|(input, result)| NormalizeDto { input, result })
            .collect();
        print_json(&items)?;
    } else {
        for result in &results {
            match result {
                Normalized::Canonical(number) => println!("{}", number),
                Normalized::Unchanged(raw) => println!("could not normalize: {}", raw),
            }
        }
    }

    let failed = results.iter().filter(|result| !result.is_canonical()).count();
    if failed > 0 {
        return Err(CliError::Rejected {
            failed,
            total: results.len(),
            action: "normalized",
        }
        .into());
    }
    Ok(())
}

pub fn validate(ctx: &Context<'_>, args: ValidateArgs) -> Result<()> {
    let items: Vec<ValidateDto<'_>> = args
        .numbers
        .iter()
        .map(|input| ValidateDto {
            input,
            valid: ctx.normalizer.is_valid_number(input),
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
    } else {
        for item in &items {
            let label = if item.valid { "valid" } else { "invalid" };
            println!("{}: {}", item.input, label);
        }
    }

    let failed = items.iter().filter(|item| !item.valid).count();
    if failed > 0 {
        return Err(CliError::Rejected {
            failed,
            total: items.len(),
            action: "validated",
        }
        .into());
    }
    Ok(())
}
