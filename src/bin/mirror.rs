// src/bin/mirror.rs
use color_eyre::eyre::{Result, WrapErr};
use table_mirror::{config::options::MirrorOptions, log, runner};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    log::init();

    let opts = MirrorOptions::default();
    let mut scheduler = runner::mirror(&opts).wrap_err("failed to set up the mirror")?;

    // One background worker; main just waits on it.
    let worker = tokio::spawn(async move { scheduler.run().await });
    worker.await.wrap_err("scheduler task stopped")?;
    Ok(())
}
