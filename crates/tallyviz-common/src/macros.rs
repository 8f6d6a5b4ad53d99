//! Convenience macros for error handling and propagation

/// Return early with a [`ChartError`](crate::ChartError).
///
/// A string literal or format string becomes a generic error; any other
/// expression is converted with `ChartError::from`.
///
/// # Examples
///
/// ```rust
/// use tallyviz_common::{bail, ChartError, Result};
///
/// fn check_width(width: u32) -> Result<()> {
///     if width == 0 {
///         bail!(ChartError::validation_field("width must be positive", "canvas.width"));
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::ChartError::new($msg))
    };
    ($err:expr $(,)?) => {
        return Err($crate::ChartError::from($err))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::ChartError::new(format!($fmt, $($arg)*)))
    };
}

/// Check a condition and return an error if it does not hold.
///
/// # Examples
///
/// ```rust
/// use tallyviz_common::{ensure, ChartError, Result};
///
/// fn check_padding(padding: f64) -> Result<()> {
///     ensure!((0.0..1.0).contains(&padding), ChartError::scale("padding out of range"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($crate::ChartError::new($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($crate::ChartError::from($err));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return Err($crate::ChartError::new(format!($fmt, $($arg)*)));
        }
    };
}

/// Wrap an error with a message while preserving the error chain.
///
/// ```rust
/// use tallyviz_common::{with_context, Result};
///
/// fn read_rows(path: &str) -> Result<String> {
///     std::fs::read_to_string(path).map_err(|e| with_context!(e, "Failed to read {}", path))
/// }
/// ```
#[macro_export]
macro_rules! with_context {
    ($err:expr, $msg:literal $(,)?) => {
        $crate::ChartError::with_source($msg, $err)
    };
    ($err:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::ChartError::with_source(format!($fmt, $($arg)*), $err)
    };
}
