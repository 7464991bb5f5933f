//! Assertion utilities for testing

/// Assert that a result is OK and unwrap it
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok, got Err: {:?}", err),
        }
    };
    ($expr:expr, $($arg:tt)+) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok, got Err: {:?} ({})", err, format!($($arg)+)),
        }
    };
}

/// Assert that a result is Err and unwrap the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(val) => panic!("Expected Err, got Ok: {:?}", val),
            Err(err) => err,
        }
    };
    ($expr:expr, $($arg:tt)+) => {
        match $expr {
            Ok(val) => panic!("Expected Err, got Ok: {:?} ({})", val, format!($($arg)+)),
            Err(err) => err,
        }
    };
}

/// Assert that a transaction receipt succeeded and borrow its events
#[macro_export]
macro_rules! assert_receipt_ok {
    ($receipt:expr) => {{
        let receipt = &$receipt;
        if let Some(err) = &receipt.error {
            panic!("Expected tx {} to succeed, got {:?}", receipt.index, err);
        }
        &receipt.events
    }};
}

/// Assert that a transaction receipt failed with `(codespace, code)`
#[macro_export]
macro_rules! assert_receipt_err {
    ($receipt:expr, $codespace:expr, $code:expr) => {{
        let receipt = &$receipt;
        match &receipt.error {
            Some(err) => {
                assert_eq!(
                    (err.codespace.as_str(), err.code),
                    ($codespace, $code),
                    "tx {} failed with unexpected error: {}",
                    receipt.index,
                    err.message
                );
                assert!(receipt.events.is_empty(), "failed tx emitted events");
            }
            None => panic!(
                "Expected tx {} to fail with {}/{}, but it succeeded",
                receipt.index, $codespace, $code
            ),
        }
    }};
}
