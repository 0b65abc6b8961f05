//! Глобальный logger симуляции
//!
//! Host (headless бинарник, тесты, движок) подставляет свой `LogPrinter`,
//! по умолчанию: `ConsoleLogger`. Уровень фильтрации общий для процесса.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::sync::Mutex;

static LOGGER: Lazy<Mutex<Option<Box<dyn LogPrinter>>>> = Lazy::new(|| Mutex::new(None));

static LOGGER_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Debug));

/// Уровень сообщения (порядок важен: Debug < Info < Warning < Error)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
pub enum LogLevel {
    #[default]
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

pub fn set_logger(logger: Box<dyn LogPrinter>) {
    // Poisoned mutex не должен ронять симуляцию: logger просто продолжает работать
    let mut slot = LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = Some(logger);
}

pub fn set_logger_if_needed(logger: Box<dyn LogPrinter>) {
    let mut slot = LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if slot.is_none() {
        *slot = Some(logger);
    }
}

pub fn set_log_level(level: LogLevel) {
    *LOGGER_LEVEL.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = level;
}

pub fn log_level() -> LogLevel {
    *LOGGER_LEVEL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    if level < log_level() {
        return;
    }

    let slot = LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(logger) = slot.as_ref() {
        // Timestamp добавляем здесь, printer получает готовую строку
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        logger.log(level, &format!("[{}] {}", timestamp, message));
    }
}

pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {}", level.as_str(), message);
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}
