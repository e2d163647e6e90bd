use anyhow::Result;
use dialnorm_config::AppConfig;
use dialnorm_core::{LibPhoneOracle, Normalizer};
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod normalize;
pub mod timezones;

pub struct Context<'a> {
    pub normalizer: &'a Normalizer<LibPhoneOracle>,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
