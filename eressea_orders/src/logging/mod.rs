//! Global logging for the order engine
//!
//! A process-wide `LoggingService` behind a `OnceLock`, plus a thread-local
//! order context (unit id and line number) that is attached to every event
//! logged while it is set.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// The unit and line an event belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderContext {
    pub unit: String,
    pub line: Option<usize>,
}

thread_local! {
    static ORDER_CONTEXT: RefCell<Option<OrderContext>> = const { RefCell::new(None) };
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized")?;

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with a caller-supplied service (bridges, tests)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

// ============================================================================
// ORDER CONTEXT MANAGEMENT
// ============================================================================

pub fn set_order_context(unit: &str, line: Option<usize>) {
    ORDER_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(OrderContext {
            unit: unit.to_string(),
            line,
        });
    });
}

pub fn clear_order_context() {
    ORDER_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Run `f` with the order context set, restoring the previous one afterwards
pub fn with_order_context<F, R>(unit: &str, line: Option<usize>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_order_context();
    set_order_context(unit, line);
    let result = f();
    ORDER_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

pub fn get_current_order_context() -> Option<OrderContext> {
    ORDER_CONTEXT.with(|ctx| ctx.borrow().clone())
}

fn attach_order_context(mut event: LogEvent) -> LogEvent {
    if let Some(order_ctx) = get_current_order_context() {
        event = event.with_context("unit", &order_ctx.unit);
        if let Some(line) = order_ctx.line {
            event = event.with_context("line", &line.to_string());
        }
    }
    event
}

fn dispatch(mut event: LogEvent, context: Vec<(&str, &str)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };
    if !logger.should_log(event.level) {
        return;
    }
    event.message = config::clamp_message(&event.message).to_string();
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    logger.log_event(attach_order_context(event));
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, &str)>,
) {
    let mut event = LogEvent::error(code, message);
    if let Some(s) = span {
        event = event.with_span(s);
    }
    dispatch(event, context);
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::success(code, message), context);
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::info(message), context);
}

/// Used by `log_warning!`
pub fn log_warning_with_context(code: Option<Code>, message: &str, context: Vec<(&str, &str)>) {
    let event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    dispatch(event, context);
}

/// Used by `log_debug!`
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(LogEvent::debug(message), context);
}

/// Error logging that falls back to stderr when logging is not initialized
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(attach_order_context(LogEvent::error(code, message)));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_context_management() {
        assert!(get_current_order_context().is_none());

        set_order_context("abc", Some(3));
        let context = get_current_order_context().unwrap();
        assert_eq!(context.unit, "abc");
        assert_eq!(context.line, Some(3));

        clear_order_context();
        assert!(get_current_order_context().is_none());
    }

    #[test]
    fn test_with_order_context_restores_previous() {
        set_order_context("outer", None);

        let result = with_order_context("inner", Some(1), || {
            assert_eq!(get_current_order_context().unwrap().unit, "inner");
            42
        });

        assert_eq!(result, 42);
        assert_eq!(get_current_order_context().unwrap().unit, "outer");
        clear_order_context();
    }

    #[test]
    fn test_attach_order_context() {
        let event = with_order_context("xyz", Some(7), || {
            attach_order_context(LogEvent::info("checking"))
        });
        assert_eq!(event.context.get("unit").map(String::as_str), Some("xyz"));
        assert_eq!(event.context.get("line").map(String::as_str), Some("7"));
    }

    #[test]
    fn test_global_initialization() {
        let _ = init_global_logging();
        assert!(is_initialized());
        let (service, _) = service::create_test_service();
        assert!(init_global_logging_with_service(Arc::new(service)).is_err());
    }

    #[test]
    fn test_safe_logging() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }
}
