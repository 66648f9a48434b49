#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use color_eyre::eyre;
pub use partial_testhelpers_macros::test;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::{OwoColorize, Style};
use std::io::Write;
use std::sync::Once;

/// Environment variable holding the logger's level
pub const LOG_ENV: &str = "PARTIAL_LOG";

struct StderrLogger {
    max_level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_style = match record.level() {
            Level::Error => Style::new().fg_rgb::<243, 139, 168>(),
            Level::Warn => Style::new().fg_rgb::<249, 226, 175>(),
            Level::Info => Style::new().fg_rgb::<166, 227, 161>(),
            Level::Debug => Style::new().fg_rgb::<137, 180, 250>(),
            Level::Trace => Style::new().fg_rgb::<148, 226, 213>(),
        };

        eprintln!(
            "{} - {}: {}",
            record.level().style(level_style),
            record
                .target()
                .style(Style::new().fg_rgb::<137, 180, 250>()),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Parses a `PARTIAL_LOG` value. Unset or unrecognized values mean `trace`.
pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Trace)
}

/// Installs color-eyre and color-backtrace (except on miri), and a logger on
/// stderr. Safe to call from every test: only the first call in a process
/// does anything.
pub fn setup() {
    static SETUP: Once = Once::new();
    SETUP.call_once(install);
}

/// [`setup`], then logs which test is starting.
pub fn setup_for(test_name: &str) {
    setup();
    log::debug!(target: "partial_testhelpers", "running {test_name}");
}

fn install() {
    #[cfg(not(miri))]
    {
        use color_eyre::config::HookBuilder;
        use regex::Regex;
        use std::sync::LazyLock;

        /// Frames from the panic machinery and the test harness, which say
        /// nothing about the failing test.
        static IGNORE_FRAMES: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^(std::panic|core::panic|test::run_test|__pthread_cond_wait|std::sys::(pal|backtrace)|std::thread::Builder|core::ops::function|test::__rust_begin_short_backtrace|<core::panic::|<alloc::boxed::Box<F,A> as core::ops::function::FnOnce<Args>>::call_once|std::sync::once)")
                .unwrap()
        });

        let eyre_filter = move |frames: &mut Vec<&color_eyre::config::Frame>| {
            frames.retain(|frame| {
                frame
                    .name
                    .as_ref()
                    .map(|n| !IGNORE_FRAMES.is_match(&n.to_string()))
                    .unwrap_or(true)
            });
        };

        // another hook may already be installed by the host test binary
        let _ = HookBuilder::default()
            .add_frame_filter(Box::new(eyre_filter))
            .install();

        {
            use color_backtrace::{BacktracePrinter, Frame};

            let filter = move |frames: &mut Vec<&Frame>| {
                frames.retain(|frame| {
                    frame
                        .name
                        .as_ref()
                        .map(|name| !IGNORE_FRAMES.is_match(name))
                        .unwrap_or(true)
                });
            };

            let stderr = color_backtrace::termcolor::StandardStream::stderr(
                color_backtrace::termcolor::ColorChoice::Auto,
            );
            let printer = BacktracePrinter::new().add_frame_filter(Box::new(filter));
            printer.install(Box::new(stderr));
        }
    }

    let max_level = level_from_env(std::env::var(LOG_ENV).ok().as_deref());
    if log::set_boxed_logger(Box::new(StderrLogger { max_level })).is_ok() {
        log::set_max_level(max_level);
    }
}
