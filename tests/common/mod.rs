//! Common test utilities for recordops
//!
//! ```rust,ignore
//! use crate::common::fixtures::StoreFactory;
//!
//! let (context, store) = StoreFactory::context();
//! ```

pub mod fixtures;
pub mod transport;

pub use fixtures::{StoreFactory, tasks};
pub use transport::LocalTransport;

/// Assert a task result is an `Error: ...` string containing `$needle`
#[macro_export]
macro_rules! assert_task_error {
    ($result:expr, $needle:expr) => {
        let result: &str = &$result;
        assert!(
            result.starts_with("Error") && result.contains($needle),
            "expected an error result containing `{}`, got `{}`",
            $needle,
            result
        );
    };
}

/// Assert a task result is not an error
#[macro_export]
macro_rules! assert_task_ok {
    ($result:expr) => {
        let result: &str = &$result;
        assert!(
            !result.starts_with("Error"),
            "expected a successful result, got `{}`",
            result
        );
    };
}
