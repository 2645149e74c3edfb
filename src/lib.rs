//! Session state core for an LLM poker viewer.
//!
//! Two modes share one data model:
//!
//! - [`live`]: a WebSocket-driven session against a running game server,
//!   with HTTP fallback for submitting the hero's actions
//! - [`replay`]: cursor navigation and autoplay over a recorded [`timeline`]
//!
//! [`session`] holds the mutable state the live path populates, [`view`]
//! derives read-only projections, and [`Viewer`] owns whichever mode is
//! currently active.
pub mod config;
pub mod live;
pub mod replay;
pub mod session;
pub mod timeline;
pub mod view;
pub mod viewer;

pub use config::*;
pub use viewer::*;

/// Chip amounts as reported by the game server.
pub type Chips = i64;
/// Hand counter within a game, starting at 1.
pub type HandNumber = u64;
/// Index into the decision or event sequence of a loaded log.
pub type Index = usize;

/// Locks a std mutex, recovering the guard if a previous holder panicked.
/// State behind these mutexes is always left consistent between statements.
pub(crate) fn guard<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Exit immediately on Ctrl-C.
#[cfg(feature = "cli")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
